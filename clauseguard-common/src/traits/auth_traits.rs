use async_trait::async_trait;

use crate::error::Error;
use crate::models::identity::{CallerCredentials, Identity};

/// Resolves the caller behind a request.
///
/// `Ok(None)` means nobody is signed in; `Err` is reserved for failures of the
/// resolver itself.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, credentials: &CallerCredentials) -> Result<Option<Identity>, Error>;
}
