//! # Report Share Policy
//!
//! Access decisions for shared reports.
//!
//! ## Overview
//!
//! Given a [`ShareRecord`](report_share_core::ShareRecord), a [`Requester`],
//! and the current time, [`evaluate_access`] returns exactly one
//! [`AccessDecision`]. [`evaluate_comment`] layers the comment rules on top
//! and returns a [`CommentDecision`].
//!
//! Both functions are pure and synchronous: no I/O, no shared state, no
//! failure modes. Denials are values, not errors.
//!
//! ## Usage
//!
//! ```rust
//! use report_share_core::{ReportId, ShareRecord, ShareSettings, ShareToken, UserId};
//! use report_share_policy::{evaluate_access, evaluate_comment, AccessDecision, CommentAction,
//!     CommentDecision, Requester};
//!
//! let mut record = ShareRecord::unshared(ReportId::new("r1"), UserId::new("u1"), 0);
//! record.share(ShareToken::parse("abc").unwrap(), ShareSettings::default(), 0);
//!
//! let anonymous = Requester::anonymous();
//! assert_eq!(evaluate_access(&record, &anonymous, 1), AccessDecision::Granted);
//! assert_eq!(
//!     evaluate_comment(&record, &anonymous, CommentAction::Write, 1),
//!     CommentDecision::DeniedCommentsDisabled
//! );
//! ```

pub mod decision;
pub mod evaluator;
pub mod gate;
pub mod requester;

pub use decision::{AccessDecision, CommentDecision};
pub use evaluator::evaluate_access;
pub use gate::{evaluate_comment, CommentAction};
pub use requester::Requester;
