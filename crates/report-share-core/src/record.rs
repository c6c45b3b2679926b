//! The persisted sharing state of a report.

use serde::{Deserialize, Serialize};

use crate::settings::ShareSettings;
use crate::token::ShareToken;
use crate::types::{ReportId, UserId};

/// Sharing configuration of one report.
///
/// Owned by the report's lifecycle: created unshared alongside the report,
/// moved between shared and unshared by [`share`](Self::share) and
/// [`revoke`](Self::revoke), never deleted on its own.
///
/// Invariant: `is_public == share_token.is_some()`. The mutators keep it;
/// records loaded from storage are not trusted to, which is why the access
/// evaluator checks both fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareRecord {
    /// The report this record governs.
    pub report_id: ReportId,

    /// Author of the report.
    pub owner_id: UserId,

    /// Current share token, if shared.
    pub share_token: Option<ShareToken>,

    /// Whether the report is reachable through its share link.
    pub is_public: bool,

    /// Share configuration. Defaults while unshared.
    pub settings: ShareSettings,

    /// Last lifecycle change (Unix milliseconds).
    pub updated_at: i64,
}

impl ShareRecord {
    /// A record for a report that has not been shared.
    pub fn unshared(report_id: ReportId, owner_id: UserId, now: i64) -> Self {
        Self {
            report_id,
            owner_id,
            share_token: None,
            is_public: false,
            settings: ShareSettings::default(),
            updated_at: now,
        }
    }

    /// Make the report public under `token` with `settings`.
    pub fn share(&mut self, token: ShareToken, settings: ShareSettings, now: i64) {
        self.share_token = Some(token);
        self.is_public = true;
        self.settings = settings;
        self.updated_at = now;
    }

    /// Clear the token and settings.
    pub fn revoke(&mut self, now: i64) {
        self.share_token = None;
        self.is_public = false;
        self.settings = ShareSettings::default();
        self.updated_at = now;
    }

    /// Whether the report is currently reachable through a share link.
    pub fn is_shared(&self) -> bool {
        self.is_public && self.share_token.is_some()
    }

    /// Whether the public/token invariant holds.
    pub fn is_consistent(&self) -> bool {
        self.is_public == self.share_token.is_some()
    }

    /// Whether `user` authored the report.
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        &self.owner_id == user
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SharingMode;

    fn record() -> ShareRecord {
        ShareRecord::unshared(ReportId::new("r1"), UserId::new("u1"), 0)
    }

    #[test]
    fn test_unshared_is_consistent() {
        let r = record();
        assert!(!r.is_shared());
        assert!(r.is_consistent());
    }

    #[test]
    fn test_share_then_revoke() {
        let mut r = record();
        let settings = ShareSettings {
            allow_comments: true,
            sharing_mode: SharingMode::Specific,
            ..Default::default()
        };

        r.share(ShareToken::parse("abc").unwrap(), settings.clone(), 10);
        assert!(r.is_shared());
        assert!(r.is_consistent());
        assert_eq!(r.settings, settings);
        assert_eq!(r.updated_at, 10);

        r.revoke(20);
        assert!(!r.is_shared());
        assert!(r.is_consistent());
        assert_eq!(r.share_token, None);
        assert_eq!(r.settings, ShareSettings::default());
        assert_eq!(r.updated_at, 20);
    }

    #[test]
    fn test_inconsistent_record_is_not_shared() {
        let mut r = record();
        r.is_public = true;
        assert!(!r.is_consistent());
        assert!(!r.is_shared());
    }

    #[test]
    fn test_ownership() {
        let r = record();
        assert!(r.is_owned_by(&UserId::new("u1")));
        assert!(!r.is_owned_by(&UserId::new("u2")));
    }
}
