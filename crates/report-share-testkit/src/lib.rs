//! # Report Share Testkit
//!
//! Testing utilities for report sharing.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Scenarios**: Reference records and requesters with expected decisions
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Scenarios
//!
//! Every evaluator must reproduce the reference decisions:
//!
//! ```rust
//! use report_share_testkit::scenarios::{all_scenarios, run_scenario};
//!
//! for scenario in all_scenarios() {
//!     let outcome = run_scenario(&scenario);
//!     assert!(outcome.matches(&scenario), "{}", scenario.name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use report_share_policy::evaluate_access;
//! use report_share_testkit::generators::{record_from_params, requester, RecordParams};
//!
//! proptest! {
//!     #[test]
//!     fn evaluation_is_deterministic(params: RecordParams, r in requester(), now in 0i64..) {
//!         let record = record_from_params(&params);
//!         prop_assert_eq!(evaluate_access(&record, &r, now), evaluate_access(&record, &r, now));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test records:
//!
//! ```rust
//! use report_share_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let record = fixture.make_restricted("report-1", "tok123", &["viewer@example.com"]);
//! assert!(record.is_shared());
//! ```

pub mod fixtures;
pub mod generators;
pub mod scenarios;

pub use fixtures::{open_settings, restricted_settings, visitors, TestFixture};
pub use generators::{record_from_params, RecordParams};
pub use scenarios::{all_scenarios, failing_scenarios, run_scenario, Scenario, ScenarioOutcome};
