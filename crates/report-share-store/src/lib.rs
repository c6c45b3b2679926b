//! # Report Share Store
//!
//! Storage abstraction for share records and view events. Provides
//! trait-based interfaces with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The [`ShareStore`] trait is the report store boundary: lookup by report
//! ID or by exact share token, and last-write-wins updates on share and
//! revoke. The [`ViewSink`] trait is the append-only view log. Both
//! [`SqliteStore`] and [`MemoryStore`] implement both traits.
//!
//! ## Key Types
//!
//! - [`ShareStore`] - Async trait for share record persistence
//! - [`ViewSink`] - Async trait for view accounting
//! - [`TokenLookup`] - Not found / not public / public
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//!
//! ## Usage
//!
//! ```rust,no_run
//! use report_share_store::{ShareStore, ShareStoreExt, SqliteStore, TokenLookup};
//! use report_share_core::ShareToken;
//!
//! async fn example() {
//!     let store = SqliteStore::open("share.db").unwrap();
//!
//!     let token = ShareToken::parse("V1StGXR8_Z").unwrap();
//!     match store.lookup_token(&token).await.unwrap() {
//!         TokenLookup::Public(record) => println!("shared report {}", record.report_id),
//!         TokenLookup::NotPublic(_) => println!("not shared"),
//!         TokenLookup::NotFound => println!("no such link"),
//!     }
//! }
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{ShareStore, ShareStoreExt, TokenLookup, ViewSink};
