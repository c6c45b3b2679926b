//! The access policy evaluator.
//!
//! Rules are checked in a fixed order and the first match wins:
//!
//! 1. No token, or not public: `DeniedNotPublic`
//! 2. Owner: `Granted` (bypasses everything below)
//! 3. Past expiry: `DeniedExpired`
//! 4. Auth required and anonymous: `DeniedAuthRequired`
//! 5. Allow-list in force and requester absent from it: `DeniedNotAllowed`
//! 6. Otherwise: `Granted`
//!
//! The evaluator is total, pure, and never fails.

use report_share_core::ShareRecord;

use crate::decision::AccessDecision;
use crate::requester::Requester;

/// Decide whether `requester` may view the report governed by `record` at `now`.
pub fn evaluate_access(record: &ShareRecord, requester: &Requester, now: i64) -> AccessDecision {
    if record.share_token.is_none() || !record.is_public {
        return AccessDecision::DeniedNotPublic;
    }

    if requester.is_owner() {
        return AccessDecision::Granted;
    }

    let settings = &record.settings;

    if settings.is_expired(now) {
        return AccessDecision::DeniedExpired;
    }

    if settings.require_auth && requester.is_anonymous() {
        return AccessDecision::DeniedAuthRequired;
    }

    // `Specific` with an empty allow-list falls through to Granted.
    if settings.restricts_viewers() {
        let allowed = requester
            .email()
            .is_some_and(|email| settings.is_allowed_viewer(email));
        if !allowed {
            return AccessDecision::DeniedNotAllowed;
        }
    }

    AccessDecision::Granted
}
