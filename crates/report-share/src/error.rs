//! Error types for the share service.

use report_share_core::{ReportId, UserId, ValidationError};
use report_share_store::StoreError;
use thiserror::Error;

/// Errors that can occur during service operations.
///
/// Access denials are not errors; they come back as decisions.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Share request validation error.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// No report with this ID.
    #[error("report not found: {0:?}")]
    ReportNotFound(ReportId),

    /// No report carries this share token.
    #[error("share link not found")]
    LinkNotFound,

    /// Only the report's owner may change its sharing.
    #[error("user {user:?} does not own report {report:?}")]
    NotOwner { report: ReportId, user: UserId },

    /// Could not find an unused share token.
    #[error("no unused share token after {0} attempts")]
    TokenCollision(usize),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
