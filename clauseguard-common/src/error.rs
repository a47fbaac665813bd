// ================================================================
// File: clauseguard-common/src/error.rs
// ================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or too-short input, raised before any external call.
    /// The message is shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    /// No resolvable identity. The message is shown to the user as-is.
    #[error("{0}")]
    Auth(String),

    #[error("Model output error: {0}")]
    ModelOutput(String),

    #[error("Model provider error: {0}")]
    Provider(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Encryption error: {0}")]
    Encryption(String),

    #[error("Decryption error: {0}")]
    Decryption(String),

    #[error("{0}")]
    Unknown(String),
}

impl Error {
    /// Taxonomy bucket used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation(_) => "ValidationError",
            Error::Auth(_) => "AuthenticationError",
            Error::ModelOutput(_) => "ModelOutputError",
            Error::Provider(_) | Error::Http(_) => "ModelProviderError",
            Error::Persistence(_) | Error::Database(_) | Error::Migration(_) => "PersistenceError",
            Error::Config(_) => "ConfigurationError",
            Error::Json(_)
            | Error::Io(_)
            | Error::Encryption(_)
            | Error::Decryption(_)
            | Error::Unknown(_) => "UnknownError",
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Unknown(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Unknown(s.to_string())
    }
}

impl From<anyhow::Error> for Error {
    fn from(e: anyhow::Error) -> Self {
        // Keep our own variants intact when they were boxed into anyhow upstream.
        match e.downcast::<Error>() {
            Ok(inner) => inner,
            Err(other) => Error::Unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_and_auth_messages_are_shown_verbatim() {
        let v = Error::Validation("Contract text must be at least 50 characters.".into());
        assert_eq!(v.to_string(), "Contract text must be at least 50 characters.");
        assert_eq!(v.kind(), "ValidationError");

        let a = Error::Auth("User not authenticated.".into());
        assert_eq!(a.to_string(), "User not authenticated.");
        assert_eq!(a.kind(), "AuthenticationError");
    }

    #[test]
    fn anyhow_round_trip_keeps_variant() {
        let boxed: anyhow::Error = Error::ModelOutput("missing field".into()).into();
        let back: Error = boxed.into();
        assert_eq!(back.kind(), "ModelOutputError");

        let plain: Error = anyhow::anyhow!("boom").into();
        assert_eq!(plain.kind(), "UnknownError");
        assert_eq!(plain.to_string(), "boom");
    }

    #[test]
    fn database_errors_are_persistence() {
        let e: Error = sqlx::Error::RowNotFound.into();
        assert_eq!(e.kind(), "PersistenceError");
    }
}
