//! The share service: unified API over records, policy, and view accounting.
//!
//! The service resolves records through the store, derives the requester
//! from the session, and hands the decision to the policy crate. It never
//! makes access decisions of its own.

use std::sync::Arc;

use report_share_core::{
    share_url, validate_share_request, ReportId, Session, ShareRecord, ShareRequest,
    ShareResponse, ShareToken, SharingMode, UserId, ViewContext,
};
use report_share_policy::{
    evaluate_access, evaluate_comment, AccessDecision, CommentAction, CommentDecision, Requester,
};
use report_share_store::{ShareStore, ShareStoreExt, TokenLookup, ViewSink};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};

/// How many fresh tokens to try before giving up on a collision.
const MAX_TOKEN_ATTEMPTS: usize = 5;

/// Result of opening a shared report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedView {
    /// The record behind the link.
    pub record: ShareRecord,
    /// What the requester may do.
    pub decision: AccessDecision,
    /// Whether the requester authored the report.
    pub is_owner: bool,
    /// Total recorded views, including this one.
    /// `None` when the view could not be recorded or counted.
    pub views: Option<u64>,
}

/// Result of a comment access check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAccess {
    pub record: ShareRecord,
    pub decision: CommentDecision,
}

/// A report listed for a session, with its view statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedReport {
    pub record: ShareRecord,
    /// Recorded views.
    pub views: u64,
    /// Latest recorded view (Unix milliseconds).
    pub last_viewed: Option<i64>,
    /// Whether the session authored the report.
    pub is_owner: bool,
}

/// The main service struct.
///
/// Provides a unified API for:
/// - Registering reports and sharing or revoking them
/// - Opening shared reports (with view accounting)
/// - Checking comment access on shared reports
/// - Listing reports a user can see
pub struct ShareService<S: ShareStore, V: ViewSink> {
    /// Share record storage.
    store: Arc<S>,
    /// View event sink.
    views: Arc<V>,
    /// Configuration.
    config: ServiceConfig,
}

impl<S: ShareStore, V: ViewSink> Clone for ShareService<S, V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            views: Arc::clone(&self.views),
            config: self.config.clone(),
        }
    }
}

impl<S: ShareStore, V: ViewSink> ShareService<S, V> {
    /// Create a new service.
    pub fn new(store: S, views: V, config: ServiceConfig) -> Self {
        Self::from_shared(Arc::new(store), Arc::new(views), config)
    }

    /// Create a service over already shared backends.
    ///
    /// Use this when one value implements both traits.
    pub fn from_shared(store: Arc<S>, views: Arc<V>, config: ServiceConfig) -> Self {
        Self {
            store,
            views,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn views(&self) -> &V {
        &self.views
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Create the unshared record for a new report.
    ///
    /// Idempotent for the same owner. A different owner for an existing
    /// report is rejected.
    pub async fn register_report(
        &self,
        report_id: ReportId,
        owner_id: UserId,
        now: i64,
    ) -> Result<ShareRecord> {
        if let Some(existing) = self.store.get_record(&report_id).await? {
            if !existing.is_owned_by(&owner_id) {
                return Err(ServiceError::NotOwner {
                    report: report_id,
                    user: owner_id,
                });
            }
            return Ok(existing);
        }

        let record = ShareRecord::unshared(report_id, owner_id, now);
        self.store.put_record(&record).await?;
        debug!(report_id = %record.report_id, "report registered");
        Ok(record)
    }

    /// Share a report, or update the settings of an existing share.
    ///
    /// Keeps the current token if there is one, otherwise issues a new one.
    pub async fn share(
        &self,
        report_id: &ReportId,
        actor: &UserId,
        request: &ShareRequest,
        now: i64,
    ) -> Result<ShareResponse> {
        let mut record = self.owned_record(report_id, actor).await?;
        let settings = validate_share_request(request, self.config.default_require_auth, now)?;

        let token = match record.share_token.clone() {
            Some(token) => token,
            None => self.issue_token().await?,
        };

        record.share(token.clone(), settings, now);
        self.store.put_record(&record).await?;

        info!(
            report_id = %record.report_id,
            token = %token,
            mode = ?record.settings.sharing_mode,
            viewers = record.settings.allowed_viewers.len(),
            "report shared"
        );

        Ok(ShareResponse {
            share_url: share_url(&self.config.base_url, &token),
            share_token: token,
            settings: record.settings,
        })
    }

    /// Stop sharing a report. Revoking an unshared report does nothing.
    pub async fn revoke(&self, report_id: &ReportId, actor: &UserId, now: i64) -> Result<()> {
        let mut record = self.owned_record(report_id, actor).await?;

        if record.share_token.is_none() && !record.is_public {
            debug!(report_id = %report_id, "revoke on unshared report");
            return Ok(());
        }

        record.revoke(now);
        self.store.put_record(&record).await?;
        info!(report_id = %report_id, "report share revoked");
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Access Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Open a shared report through its link.
    ///
    /// On `Granted`, appends a view event. Recording is best-effort: a
    /// failure is logged and the decision is returned unchanged.
    pub async fn open_shared(
        &self,
        token: &ShareToken,
        session: Option<&Session>,
        context: &ViewContext,
        now: i64,
    ) -> Result<SharedView> {
        let record = self.resolve_token(token).await?;
        let requester = requester_for(&record, session);
        let decision = evaluate_access(&record, &requester, now);

        debug!(
            report_id = %record.report_id,
            token = %token,
            decision = ?decision,
            "shared report access evaluated"
        );

        if decision.is_granted()
            && !requester.is_owner()
            && record.settings.sharing_mode == SharingMode::Specific
            && record.settings.allowed_viewers.is_empty()
        {
            debug!(report_id = %record.report_id, "specific sharing with no viewers grants any requester");
        }

        let views = if decision.is_granted() {
            self.account_view(&record.report_id, context, now).await
        } else {
            None
        };

        Ok(SharedView {
            is_owner: requester.is_owner(),
            record,
            decision,
            views,
        })
    }

    /// Check whether the session may read or write comments on a shared report.
    ///
    /// Never records a view.
    pub async fn comment_access(
        &self,
        token: &ShareToken,
        session: Option<&Session>,
        action: CommentAction,
        now: i64,
    ) -> Result<CommentAccess> {
        let record = self.resolve_token(token).await?;
        let requester = requester_for(&record, session);
        let decision = evaluate_comment(&record, &requester, action, now);

        debug!(
            report_id = %record.report_id,
            action = ?action,
            decision = ?decision,
            "comment access evaluated"
        );

        Ok(CommentAccess { record, decision })
    }

    /// Every public report the session would be granted, own reports included.
    ///
    /// Most recently shared first; ties by report ID.
    pub async fn shared_with(&self, session: &Session, now: i64) -> Result<Vec<SharedReport>> {
        let records = self.store.list_public().await?;

        let mut listed = Vec::new();
        for record in records {
            let requester = requester_for(&record, Some(session));
            if !evaluate_access(&record, &requester, now).is_granted() {
                continue;
            }

            let events = self.views.views_for(&record.report_id).await?;
            listed.push(SharedReport {
                views: events.len() as u64,
                last_viewed: events.iter().map(|e| e.viewed_at).max(),
                is_owner: requester.is_owner(),
                record,
            });
        }

        listed.sort_by(|a, b| {
            b.record
                .updated_at
                .cmp(&a.record.updated_at)
                .then_with(|| a.record.report_id.cmp(&b.record.report_id))
        });
        Ok(listed)
    }

    /// The owner's reports that currently have a share link.
    pub async fn shares_by(&self, owner: &UserId) -> Result<Vec<ShareRecord>> {
        let records = self.store.list_by_owner(owner).await?;
        Ok(records.into_iter().filter(ShareRecord::is_shared).collect())
    }

    /// Number of recorded views of a report.
    pub async fn view_count(&self, report_id: &ReportId) -> Result<u64> {
        Ok(self.views.count_views(report_id).await?)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    async fn owned_record(&self, report_id: &ReportId, actor: &UserId) -> Result<ShareRecord> {
        let record = self
            .store
            .get_record(report_id)
            .await?
            .ok_or_else(|| ServiceError::ReportNotFound(report_id.clone()))?;

        if !record.is_owned_by(actor) {
            return Err(ServiceError::NotOwner {
                report: report_id.clone(),
                user: actor.clone(),
            });
        }

        Ok(record)
    }

    async fn resolve_token(&self, token: &ShareToken) -> Result<ShareRecord> {
        match self.store.lookup_token(token).await? {
            TokenLookup::NotFound => Err(ServiceError::LinkNotFound),
            TokenLookup::NotPublic(record) | TokenLookup::Public(record) => Ok(record),
        }
    }

    async fn issue_token(&self) -> Result<ShareToken> {
        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let token = ShareToken::generate(self.config.token_length)?;
            if self.store.find_by_token(&token).await?.is_none() {
                return Ok(token);
            }
            debug!(token = %token, "share token collision, retrying");
        }
        Err(ServiceError::TokenCollision(MAX_TOKEN_ATTEMPTS))
    }

    /// Append a view event and read back the count. Never fails.
    ///
    /// `None` when either the append or the count failed.
    async fn account_view(
        &self,
        report_id: &ReportId,
        context: &ViewContext,
        now: i64,
    ) -> Option<u64> {
        if self.config.record_views {
            let event = context.event(report_id.clone(), now);
            if let Err(e) = self.views.record_view(&event).await {
                warn!(report_id = %report_id, error = %e, "failed to record view");
                return None;
            }
        }

        match self.views.count_views(report_id).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(report_id = %report_id, error = %e, "failed to count views");
                None
            }
        }
    }
}

/// Derive the policy requester from a session.
///
/// This is where ownership is decided: the session's user ID against the
/// record's owner.
pub fn requester_for(record: &ShareRecord, session: Option<&Session>) -> Requester {
    match session {
        None => Requester::Anonymous,
        Some(session) => Requester::User {
            email: session.email.clone(),
            is_owner: record.is_owned_by(&session.user_id),
        },
    }
}
