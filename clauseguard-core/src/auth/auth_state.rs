// clauseguard-core/src/auth/auth_state.rs

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tracing::error;

use clauseguard_common::models::identity::{AuthState, CallerCredentials, Identity};
use clauseguard_common::traits::auth_traits::IdentityResolver;

use crate::Error;

/// Holds the latest identity state (sign-in / sign-out) and notifies listeners of changes.
///
/// Starts out unknown. A new listener sees the current state at once once anything
/// has been published.
pub struct AuthStateFeed {
    tx: watch::Sender<Option<AuthState>>,
}

impl AuthStateFeed {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Replaces the current state. Returns how many listeners were attached.
    pub fn publish(&self, state: AuthState) -> usize {
        self.tx.send_replace(Some(state));
        self.tx.receiver_count()
    }

    pub fn current(&self) -> Option<AuthState> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<AuthState>> {
        self.tx.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for AuthStateFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Takes the first auth-state emission after subscribing, then unsubscribes.
///
/// The first emission is the current state when one is known; otherwise this waits
/// for the first publish, with no timeout. The credentials are ignored and nothing is
/// verified. Use [`super::SessionTokenResolver`] at a network boundary.
pub struct AuthStateResolver {
    feed: Arc<AuthStateFeed>,
}

impl AuthStateResolver {
    pub fn new(feed: Arc<AuthStateFeed>) -> Self {
        Self { feed }
    }
}

#[async_trait]
impl IdentityResolver for AuthStateResolver {
    async fn resolve(&self, _credentials: &CallerCredentials) -> Result<Option<Identity>, Error> {
        let mut rx = self.feed.subscribe();
        let first = rx.wait_for(Option::is_some).await.map(|state| state.clone());
        drop(rx);

        match first {
            Ok(state) => Ok(state.and_then(AuthState::into_identity)),
            Err(_) => {
                error!("Auth state feed closed before the first emission");
                Ok(None)
            }
        }
    }
}
