//! # Report Share Core
//!
//! Pure data model for report sharing: records, settings, tokens, and
//! view events.
//!
//! This crate contains no I/O, no storage, no policy. It defines the shapes
//! every other crate in the workspace agrees on.
//!
//! ## Key Types
//!
//! - [`ShareRecord`] - The sharing state of one report
//! - [`ShareSettings`] - Typed share configuration with explicit defaults
//! - [`ShareToken`] - Opaque, URL-safe link token
//! - [`Email`] - Lowercased, trimmed email address
//! - [`ViewEvent`] - One granted view, append-only
//!
//! ## Settings Defaults
//!
//! A settings document with missing keys decodes to:
//! `allowComments = false`, `requireAuth = false`, `expiryDate = null`,
//! `sharingMode = "anyone"`, `allowedViewers = []`.

pub mod email;
pub mod error;
pub mod record;
pub mod request;
pub mod settings;
pub mod token;
pub mod types;
pub mod validation;
pub mod view;

pub use email::Email;
pub use error::{CoreError, ValidationError};
pub use record::ShareRecord;
pub use request::{share_url, ShareRequest, ShareResponse};
pub use settings::{ShareSettings, SharingMode};
pub use token::{
    ShareToken, DEFAULT_TOKEN_LENGTH, MAX_TOKEN_LENGTH, MIN_TOKEN_LENGTH, TOKEN_ALPHABET,
};
pub use types::{now_millis, ReportId, UserId};
pub use validation::validate_share_request;
pub use view::{Session, ViewContext, ViewEvent};
