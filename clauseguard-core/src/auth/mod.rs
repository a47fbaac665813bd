// =============================================================================
// clauseguard-core/src/auth/mod.rs
// =============================================================================

pub mod auth_state;
pub mod session_token;

pub use auth_state::{AuthStateFeed, AuthStateResolver};
pub use clauseguard_common::traits::auth_traits::IdentityResolver;
pub use session_token::{SessionTokenResolver, SessionTokens, DEFAULT_TOKEN_TTL_HOURS};

/// Message returned to callers when no identity could be resolved.
pub const NOT_AUTHENTICATED: &str = "User not authenticated.";
