//! Database schema migrations for SQLite.
//!
//! We use a simple versioned migration system. Each migration is a SQL string
//! that transforms the schema from version N to N+1.

use report_share_core::now_millis;
use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// This function is idempotent - it can be called multiple times safely.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let current: u32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;

    if current > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema version {} is newer than supported version {}",
            current, CURRENT_VERSION
        )));
    }

    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            tracing::debug!(version, "applying schema migration");
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- One row per report; unshared reports have a NULL token
        CREATE TABLE share_records (
            report_id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            share_token TEXT UNIQUE,          -- NULL when not shared
            is_public INTEGER NOT NULL DEFAULT 0,
            settings BLOB NOT NULL,           -- CBOR ShareSettings
            updated_at INTEGER NOT NULL       -- Unix ms
        );

        -- Append-only view log; counts are derived from it
        CREATE TABLE report_views (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            report_id TEXT NOT NULL,
            viewed_at INTEGER NOT NULL,       -- Unix ms
            user_agent TEXT,
            viewer_ip TEXT
        );

        CREATE INDEX idx_share_records_owner ON share_records(owner_id);
        CREATE INDEX idx_share_records_public ON share_records(is_public);
        CREATE INDEX idx_report_views_report ON report_views(report_id);
        "#,
    )?;

    Ok(())
}
