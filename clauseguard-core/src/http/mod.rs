// clauseguard-core/src/http/mod.rs

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderMap, header::AUTHORIZATION},
    routing::{get, post},
};
use axum_server::{Handle, Server};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use clauseguard_common::models::{
    ActionResponse, CallerCredentials, GdprContractRequest, GdprContractResult,
    RiskAssessmentRequest, RiskAssessmentResult,
};

use crate::services::ContractActions;
use crate::Error;

pub use clauseguard_common::routes::{GDPR_CONTRACT_PATH, HEALTH_PATH, RISK_ASSESSMENT_PATH};

/// Shared state for the action routes.
#[derive(Clone)]
pub struct AppState {
    pub actions: Arc<ContractActions>,
}

/// Builds the router. Every action route answers 200 with an [`ActionResponse`],
/// including for unreadable request bodies.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(RISK_ASSESSMENT_PATH, post(handle_risk_assessment))
        .route(GDPR_CONTRACT_PATH, post(handle_gdpr_contract))
        .route(HEALTH_PATH, get(|| async { "ok" }))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Pulls `Authorization: Bearer <token>` out of the headers, if present.
pub fn credentials_from_headers(headers: &HeaderMap) -> CallerCredentials {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| {
            let (scheme, token) = v.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim().to_string())
        })
        .filter(|t| !t.is_empty());

    CallerCredentials { bearer_token: token }
}

async fn handle_risk_assessment(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<RiskAssessmentRequest>, JsonRejection>,
) -> Json<ActionResponse<RiskAssessmentResult>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return Json(invalid_body(rejection)),
    };
    let credentials = credentials_from_headers(&headers);
    Json(state.actions.run_contract_risk_assessment(&credentials, request).await)
}

async fn handle_gdpr_contract(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<GdprContractRequest>, JsonRejection>,
) -> Json<ActionResponse<GdprContractResult>> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return Json(invalid_body(rejection)),
    };
    let credentials = credentials_from_headers(&headers);
    Json(state.actions.run_generate_gdpr_contract(&credentials, request).await)
}

fn invalid_body<T>(rejection: JsonRejection) -> ActionResponse<T> {
    ActionResponse::fail(format!("Invalid request body: {}", rejection.body_text()))
}

/// Serves `app` on `addr` until `shutdown` resolves, then drains connections.
pub async fn serve<F>(addr: SocketAddr, app: Router, shutdown: F) -> Result<(), Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let handle = Handle::new();
    let handle_clone = handle.clone();

    tokio::spawn(async move {
        shutdown.await;
        info!("Shutdown requested; draining connections.");
        handle_clone.graceful_shutdown(Some(Duration::from_secs(10)));
    });

    info!("ClauseGuard listening on http://{}", addr);
    let result = Server::bind(addr)
        .handle(handle)
        .serve(app.into_make_service())
        .await;

    if let Err(e) = &result {
        error!("HTTP server error: {}", e);
    }
    info!("HTTP server shut down.");
    result.map_err(Error::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(credentials_from_headers(&headers).bearer_token.as_deref(), Some("abc.def"));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer   xyz "));
        assert_eq!(credentials_from_headers(&headers).bearer_token.as_deref(), Some("xyz"));
    }

    #[test]
    fn other_schemes_and_blank_tokens_are_ignored() {
        let mut headers = HeaderMap::new();
        assert!(credentials_from_headers(&headers).bearer_token.is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert!(credentials_from_headers(&headers).bearer_token.is_none());

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert!(credentials_from_headers(&headers).bearer_token.is_none());
    }
}
