// File: clauseguard-common/src/models/validation.rs

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A single failed field check, carrying the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Lengths are counted in Unicode scalar values, not bytes.
pub fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Pushes `message` for `field` when `value` has fewer than `min` characters once
/// surrounding whitespace is trimmed. Whitespace-only values always fail.
pub fn check_min_chars(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &str,
    min: usize,
    message: &str,
) {
    let trimmed = value.trim();
    if trimmed.is_empty() || char_len(trimmed) < min {
        errors.push(FieldError::new(field, message));
    }
}

/// Collapses field errors into the first one, as a `Validation` error.
pub fn into_result(errors: Vec<FieldError>) -> Result<(), Error> {
    match errors.into_iter().next() {
        Some(first) => Err(Error::Validation(first.message)),
        None => Ok(()),
    }
}
