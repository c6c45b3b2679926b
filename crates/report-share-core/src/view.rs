//! View events and the identity of whoever is asking.

use serde::{Deserialize, Serialize};

use crate::email::Email;
use crate::types::{ReportId, UserId};

/// One granted view of a shared report. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEvent {
    /// The report that was viewed.
    pub report_id: ReportId,

    /// When the view was granted (Unix milliseconds).
    pub viewed_at: i64,

    /// Requester user agent, for analytics.
    pub user_agent: Option<String>,

    /// Requester address, for analytics.
    pub viewer_ip: Option<String>,
}

/// Request metadata captured alongside a view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContext {
    pub user_agent: Option<String>,
    pub viewer_ip: Option<String>,
}

impl ViewContext {
    /// Build a view event for `report_id` at `now`.
    pub fn event(&self, report_id: ReportId, now: i64) -> ViewEvent {
        ViewEvent {
            report_id,
            viewed_at: now,
            user_agent: self.user_agent.clone(),
            viewer_ip: self.viewer_ip.clone(),
        }
    }
}

/// An authenticated session as supplied by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub user_id: UserId,
    pub email: Email,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: &str) -> Self {
        Self {
            user_id: UserId::new(user_id),
            email: Email::normalize(email),
        }
    }
}
