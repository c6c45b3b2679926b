//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use report_share_core::{
    now_millis, Email, ReportId, Session, ShareRecord, ShareSettings, ShareToken, SharingMode, UserId,
};
use report_share_store::MemoryStore;

/// A test fixture with an owner session and a memory store.
pub struct TestFixture {
    pub owner: Session,
    pub store: MemoryStore,
}

impl TestFixture {
    /// Create a new fixture owned by `owner@example.com`.
    pub fn new() -> Self {
        Self::with_owner("owner", "owner@example.com")
    }

    /// Create a fixture with a specific owner.
    pub fn with_owner(user_id: &str, email: &str) -> Self {
        Self {
            owner: Session::new(user_id, email),
            store: MemoryStore::new(),
        }
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner.user_id
    }

    /// A report that has never been shared.
    pub fn make_unshared(&self, report_id: &str) -> ShareRecord {
        ShareRecord::unshared(ReportId::new(report_id), self.owner.user_id.clone(), now_millis())
    }

    /// A report shared under `token` with `settings`.
    pub fn make_shared(&self, report_id: &str, token: &str, settings: ShareSettings) -> ShareRecord {
        let mut record = self.make_unshared(report_id);
        let token = ShareToken::parse(token).unwrap_or_else(|e| panic!("bad token {token:?}: {e}"));
        record.share(token, settings, now_millis());
        record
    }

    /// A report anyone with the link can open without signing in.
    pub fn make_open(&self, report_id: &str, token: &str) -> ShareRecord {
        self.make_shared(report_id, token, open_settings())
    }

    /// A report restricted to `viewers`.
    pub fn make_restricted(&self, report_id: &str, token: &str, viewers: &[&str]) -> ShareRecord {
        self.make_shared(report_id, token, restricted_settings(viewers))
    }

    /// A session for someone other than the owner.
    pub fn visitor(&self, n: usize) -> Session {
        Session::new(format!("visitor-{n}"), &format!("visitor{n}@example.com"))
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for an open link: anyone, no sign-in, comments on.
pub fn open_settings() -> ShareSettings {
    ShareSettings {
        allow_comments: true,
        require_auth: false,
        ..Default::default()
    }
}

/// Settings restricted to `viewers`, sign-in required, comments on.
pub fn restricted_settings(viewers: &[&str]) -> ShareSettings {
    ShareSettings {
        allow_comments: true,
        require_auth: true,
        sharing_mode: SharingMode::Specific,
        allowed_viewers: viewers.iter().map(|v| Email::normalize(v)).collect(),
        ..Default::default()
    }
}

/// Create several visitor sessions with distinct users and emails.
pub fn visitors(count: usize) -> Vec<Session> {
    let fixture = TestFixture::new();
    (0..count).map(|i| fixture.visitor(i)).collect()
}
