//! # Report Share
//!
//! The unified API for sharing reports: link issuance, access decisions,
//! comment gating, and view accounting.
//!
//! ## Overview
//!
//! A report's owner shares it by minting a link token. Anyone holding the
//! link is then evaluated against the report's share settings:
//!
//! - **Sharing mode**: anyone with the link, or specific email addresses
//! - **Require auth**: whether anonymous requesters are turned away
//! - **Expiry**: a point in time after which the link stops working
//! - **Comments**: whether viewers may read and write comments
//!
//! Granted views append an event to the view log. Recording is best-effort
//! and never changes the decision.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use report_share::{ServiceConfig, ShareService};
//! use report_share::core::{ReportId, Session, ShareRequest, UserId, ViewContext, now_millis};
//! use report_share::store::SqliteStore;
//!
//! async fn example() {
//!     let store = SqliteStore::open("share.db").unwrap();
//!     let service = ShareService::new(store.clone(), store, ServiceConfig::default());
//!
//!     let report = ReportId::new("report-1");
//!     let owner = UserId::new("user-1");
//!     service.register_report(report.clone(), owner.clone(), now_millis()).await.unwrap();
//!
//!     let response = service
//!         .share(&report, &owner, &ShareRequest::specific(["viewer@example.com"]), now_millis())
//!         .await
//!         .unwrap();
//!     println!("share at {}", response.share_url);
//!
//!     let viewer = Session::new("user-2", "viewer@example.com");
//!     let view = service
//!         .open_shared(&response.share_token, Some(&viewer), &ViewContext::default(), now_millis())
//!         .await
//!         .unwrap();
//!     assert!(view.decision.is_granted());
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `report_share::core` - Records, settings, tokens, and validation
//! - `report_share::policy` - Access evaluator and comment gate
//! - `report_share::store` - Storage abstraction and SQLite

pub mod config;
pub mod error;
pub mod service;

// Re-export component crates
pub use report_share_core as core;
pub use report_share_policy as policy;
pub use report_share_store as store;

// Re-export main types for convenience
pub use config::ServiceConfig;
pub use error::{Result, ServiceError};
pub use service::{requester_for, CommentAccess, ShareService, SharedReport, SharedView};

// Re-export commonly used types
pub use report_share_core::{
    ReportId, Session, ShareRecord, ShareRequest, ShareResponse, ShareSettings, ShareToken,
    SharingMode, UserId, ViewContext,
};
pub use report_share_policy::{AccessDecision, CommentAction, CommentDecision, Requester};
