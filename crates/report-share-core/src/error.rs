//! Error types for the report sharing core.

use thiserror::Error;

/// Core errors that can occur while encoding or decoding shared state.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}

/// Validation errors for share requests.
///
/// These are raised only by the owner-facing share action. The access
/// evaluator never validates; it normalizes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    #[error("expiry date {expiry} is not after share time {now}")]
    ExpiryInPast { expiry: i64, now: i64 },

    #[error("share token length must be between {min} and {max}, got {got}")]
    InvalidTokenLength { min: usize, max: usize, got: usize },

    #[error("malformed share token: {0:?}")]
    MalformedToken(String),
}
