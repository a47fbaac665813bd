// clauseguard-core/src/auth/session_token.rs

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use clauseguard_common::models::identity::{CallerCredentials, Identity};
use clauseguard_common::traits::auth_traits::IdentityResolver;

use crate::crypto::TokenCipher;
use crate::Error;

pub const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    iat: i64,
    exp: i64,
}

/// Mints and verifies sealed session tokens.
#[derive(Clone)]
pub struct SessionTokens {
    cipher: TokenCipher,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(cipher: TokenCipher, ttl: Duration) -> Self {
        Self { cipher, ttl }
    }

    pub fn issue(&self, identity: &Identity) -> Result<String, Error> {
        self.issue_at(identity, Utc::now())
    }

    pub fn issue_at(&self, identity: &Identity, now: DateTime<Utc>) -> Result<String, Error> {
        if identity.user_id.trim().is_empty() {
            return Err(Error::Auth("cannot issue a token without a user id".to_string()));
        }
        let expires = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| Error::Auth("session token lifetime is out of range".to_string()))?;
        let claims = SessionClaims {
            sub: identity.user_id.clone(),
            email: identity.email.clone(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        let payload = serde_json::to_vec(&claims)?;
        self.cipher.seal(&payload)
    }

    pub fn verify(&self, token: &str) -> Result<Identity, Error> {
        self.verify_at(token, Utc::now())
    }

    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Identity, Error> {
        let payload = self
            .cipher
            .open(token.trim())
            .map_err(|e| Error::Auth(format!("session token rejected: {}", e)))?;
        let claims: SessionClaims = serde_json::from_slice(&payload)
            .map_err(|e| Error::Auth(format!("session token has malformed claims: {}", e)))?;

        if claims.exp <= now.timestamp() {
            return Err(Error::Auth("session token expired".to_string()));
        }
        if claims.sub.trim().is_empty() {
            return Err(Error::Auth("session token has no subject".to_string()));
        }

        Ok(Identity {
            user_id: claims.sub,
            email: claims.email,
        })
    }
}

/// Resolves the caller from a bearer session token.
///
/// Missing, forged, malformed and expired tokens all resolve to no identity.
pub struct SessionTokenResolver {
    tokens: Arc<SessionTokens>,
}

impl SessionTokenResolver {
    pub fn new(tokens: Arc<SessionTokens>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl IdentityResolver for SessionTokenResolver {
    async fn resolve(&self, credentials: &CallerCredentials) -> Result<Option<Identity>, Error> {
        let Some(token) = credentials.bearer_token.as_deref() else {
            debug!("No bearer token presented");
            return Ok(None);
        };

        match self.tokens.verify(token) {
            Ok(identity) => Ok(Some(identity)),
            Err(e) => {
                warn!("Rejecting bearer token: {}", e);
                Ok(None)
            }
        }
    }
}
