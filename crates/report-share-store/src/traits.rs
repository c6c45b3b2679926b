//! Store traits: the abstract interfaces for share records and view events.
//!
//! These traits keep the service storage-agnostic. Implementations include
//! SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use report_share_core::{ReportId, ShareRecord, ShareToken, UserId, ViewEvent};

use crate::error::Result;

/// Result of looking up a share token.
///
/// Distinguishes a token nobody holds from a token whose report is not
/// public, so the caller can answer "not shared" rather than "not found".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenLookup {
    /// No record carries this token.
    NotFound,
    /// A record carries the token but is not public.
    NotPublic(ShareRecord),
    /// A record carries the token and is public.
    Public(ShareRecord),
}

impl TokenLookup {
    /// Classify the result of an exact-match token query.
    pub fn from_record(record: Option<ShareRecord>) -> Self {
        match record {
            None => TokenLookup::NotFound,
            Some(record) if record.is_public => TokenLookup::Public(record),
            Some(record) => TokenLookup::NotPublic(record),
        }
    }

    /// The record, if any.
    pub fn into_record(self) -> Option<ShareRecord> {
        match self {
            TokenLookup::NotFound => None,
            TokenLookup::NotPublic(record) | TokenLookup::Public(record) => Some(record),
        }
    }
}

/// Persistence for share records.
///
/// # Design Notes
///
/// - **Exact token match**: `find_by_token` never does prefix or
///   case-insensitive matching.
/// - **Unique tokens**: `put_record` fails with `TokenConflict` if another
///   report already holds the token.
/// - **Last write wins**: concurrent share/revoke on the same report are not
///   serialized beyond what the backend provides.
#[async_trait]
pub trait ShareStore: Send + Sync {
    /// Get the record for a report.
    async fn get_record(&self, report_id: &ReportId) -> Result<Option<ShareRecord>>;

    /// Get the record carrying exactly this token, public or not.
    async fn find_by_token(&self, token: &ShareToken) -> Result<Option<ShareRecord>>;

    /// Insert or replace the record for `record.report_id`.
    async fn put_record(&self, record: &ShareRecord) -> Result<()>;

    /// All records that are currently public, ordered by report ID.
    async fn list_public(&self) -> Result<Vec<ShareRecord>>;

    /// All records owned by `owner`, ordered by report ID.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ShareRecord>>;
}

/// Extension trait for common store patterns.
pub trait ShareStoreExt: ShareStore {
    /// Look up a token and classify the result.
    fn lookup_token(
        &self,
        token: &ShareToken,
    ) -> impl std::future::Future<Output = Result<TokenLookup>> + Send;
}

impl<S: ShareStore + ?Sized> ShareStoreExt for S {
    async fn lookup_token(&self, token: &ShareToken) -> Result<TokenLookup> {
        let record = self.find_by_token(token).await?;
        Ok(TokenLookup::from_record(record))
    }
}

/// Append-only sink for view events.
///
/// View counts are derived by counting events, never by incrementing a
/// stored counter, so concurrent appends cannot lose updates.
#[async_trait]
pub trait ViewSink: Send + Sync {
    /// Append one view event.
    async fn record_view(&self, event: &ViewEvent) -> Result<()>;

    /// Number of recorded views for a report.
    async fn count_views(&self, report_id: &ReportId) -> Result<u64>;

    /// Recorded views for a report, oldest first.
    async fn views_for(&self, report_id: &ReportId) -> Result<Vec<ViewEvent>>;
}
