//! Share settings: the typed configuration attached to a shared report.
//!
//! Settings are persisted as a document whose keys may be absent. Every
//! recognized option has an explicit default so a partial (or empty)
//! document always decodes to a complete [`ShareSettings`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::email::Email;
use crate::error::CoreError;

/// Who may open a share link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharingMode {
    /// Anyone holding the link.
    #[default]
    Anyone,
    /// Only the owner and addresses on the allow-list.
    Specific,
}

/// Configuration of a shared report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ShareSettings {
    /// Whether comments can be read and written on the shared view.
    pub allow_comments: bool,

    /// Whether anonymous requesters are turned away with a sign-in prompt.
    pub require_auth: bool,

    /// When the link stops working (Unix milliseconds).
    pub expiry_date: Option<i64>,

    /// Whether `allowed_viewers` is consulted.
    pub sharing_mode: SharingMode,

    /// Normalized addresses permitted under [`SharingMode::Specific`].
    pub allowed_viewers: BTreeSet<Email>,
}

impl ShareSettings {
    /// Whether the link has expired at `now`.
    ///
    /// Expiry is strict: the link still works at exactly `expiry_date`.
    pub fn is_expired(&self, now: i64) -> bool {
        matches!(self.expiry_date, Some(expiry) if now > expiry)
    }

    /// Whether an allow-list is actually in force.
    ///
    /// A `Specific` mode with no viewers configured does not restrict access.
    pub fn restricts_viewers(&self) -> bool {
        self.sharing_mode == SharingMode::Specific && !self.allowed_viewers.is_empty()
    }

    /// Allow-list membership. Both sides are normalized, so this is
    /// case-insensitive.
    pub fn is_allowed_viewer(&self, email: &Email) -> bool {
        self.allowed_viewers.contains(email)
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}
