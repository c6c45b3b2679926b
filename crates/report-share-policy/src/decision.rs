//! Access decisions and their boundary mapping.
//!
//! A denial is a normal result, not an error. Each variant maps to one HTTP
//! status and one user-facing message so handlers never need to invent
//! their own wording.

use serde::{Deserialize, Serialize};

/// Outcome of evaluating view access to a shared report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessDecision {
    /// The requester may view the report.
    Granted,
    /// The report has no share link, or it was revoked.
    DeniedNotPublic,
    /// The share link is past its expiry date.
    DeniedExpired,
    /// An anonymous requester must sign in first.
    DeniedAuthRequired,
    /// The requester is not on the allow-list.
    DeniedNotAllowed,
}

impl AccessDecision {
    pub fn is_granted(self) -> bool {
        self == AccessDecision::Granted
    }

    /// Whether the caller should show a sign-in prompt.
    pub fn prompts_sign_in(self) -> bool {
        self == AccessDecision::DeniedAuthRequired
    }

    /// HTTP status for this decision.
    pub fn status_code(self) -> u16 {
        match self {
            AccessDecision::Granted => 200,
            AccessDecision::DeniedAuthRequired => 401,
            AccessDecision::DeniedNotPublic
            | AccessDecision::DeniedExpired
            | AccessDecision::DeniedNotAllowed => 403,
        }
    }

    /// User-facing message.
    pub fn message(self) -> &'static str {
        match self {
            AccessDecision::Granted => "OK",
            AccessDecision::DeniedNotPublic => "This report is not shared",
            AccessDecision::DeniedExpired => "This share link has expired",
            AccessDecision::DeniedAuthRequired => "Sign in to view this report",
            AccessDecision::DeniedNotAllowed => "You don't have permission to view this report",
        }
    }
}

/// Outcome of evaluating comment access on a shared report.
///
/// A superset of [`AccessDecision`]: any view denial carries over unchanged,
/// plus the comment-only [`DeniedCommentsDisabled`](Self::DeniedCommentsDisabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CommentDecision {
    Granted,
    DeniedNotPublic,
    DeniedExpired,
    DeniedAuthRequired,
    DeniedNotAllowed,
    /// The owner turned comments off for this link.
    DeniedCommentsDisabled,
}

impl CommentDecision {
    pub fn is_granted(self) -> bool {
        self == CommentDecision::Granted
    }

    pub fn prompts_sign_in(self) -> bool {
        self == CommentDecision::DeniedAuthRequired
    }

    /// HTTP status for this decision.
    pub fn status_code(self) -> u16 {
        match self {
            CommentDecision::Granted => 200,
            CommentDecision::DeniedAuthRequired => 401,
            CommentDecision::DeniedNotPublic
            | CommentDecision::DeniedExpired
            | CommentDecision::DeniedNotAllowed
            | CommentDecision::DeniedCommentsDisabled => 403,
        }
    }

    /// User-facing message.
    pub fn message(self) -> &'static str {
        match self {
            CommentDecision::DeniedCommentsDisabled => "Comments are disabled for this report",
            CommentDecision::DeniedAuthRequired => "Sign in to comment on this report",
            other => other.as_access().map_or("OK", AccessDecision::message),
        }
    }

    /// The equivalent view decision, if this is not comment-specific.
    pub fn as_access(self) -> Option<AccessDecision> {
        match self {
            CommentDecision::Granted => Some(AccessDecision::Granted),
            CommentDecision::DeniedNotPublic => Some(AccessDecision::DeniedNotPublic),
            CommentDecision::DeniedExpired => Some(AccessDecision::DeniedExpired),
            CommentDecision::DeniedAuthRequired => Some(AccessDecision::DeniedAuthRequired),
            CommentDecision::DeniedNotAllowed => Some(AccessDecision::DeniedNotAllowed),
            CommentDecision::DeniedCommentsDisabled => None,
        }
    }
}

impl From<AccessDecision> for CommentDecision {
    fn from(decision: AccessDecision) -> Self {
        match decision {
            AccessDecision::Granted => CommentDecision::Granted,
            AccessDecision::DeniedNotPublic => CommentDecision::DeniedNotPublic,
            AccessDecision::DeniedExpired => CommentDecision::DeniedExpired,
            AccessDecision::DeniedAuthRequired => CommentDecision::DeniedAuthRequired,
            AccessDecision::DeniedNotAllowed => CommentDecision::DeniedNotAllowed,
        }
    }
}
