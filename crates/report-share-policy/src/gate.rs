//! The comment gate.
//!
//! Comments require view access first. On top of that:
//!
//! - `allowComments = false` denies reading and writing, for everyone
//! - writing needs a signed-in requester to attribute the comment to,
//!   whatever `requireAuth` says

use report_share_core::ShareRecord;
use serde::{Deserialize, Serialize};

use crate::decision::{AccessDecision, CommentDecision};
use crate::evaluator::evaluate_access;
use crate::requester::Requester;

/// What the requester wants to do with comments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentAction {
    Read,
    Write,
}

/// Decide whether `requester` may perform `action` on the report's comments.
pub fn evaluate_comment(
    record: &ShareRecord,
    requester: &Requester,
    action: CommentAction,
    now: i64,
) -> CommentDecision {
    let access = evaluate_access(record, requester, now);
    if access != AccessDecision::Granted {
        return access.into();
    }

    if !record.settings.allow_comments {
        return CommentDecision::DeniedCommentsDisabled;
    }

    if action == CommentAction::Write && requester.is_anonymous() {
        return CommentDecision::DeniedAuthRequired;
    }

    CommentDecision::Granted
}
