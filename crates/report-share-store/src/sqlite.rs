//! SQLite implementation of the store traits.
//!
//! This is the primary storage backend. It uses rusqlite with bundled
//! SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use report_share_core::{ReportId, ShareRecord, ShareSettings, ShareToken, UserId, ViewEvent};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{ShareStore, ViewSink};

const RECORD_COLUMNS: &str = "report_id, owner_id, share_token, is_public, settings, updated_at";

/// SQLite-based store implementation.
///
/// Implements both [`ShareStore`] and [`ViewSink`]. Thread-safe via internal
/// Mutex. All operations use spawn_blocking to avoid blocking the async
/// runtime.
#[derive(Clone)]
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection on the blocking thread pool.
    async fn call<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|e| StoreError::LockPoisoned(format!("mutex poisoned: {}", e)))?;
            f(&conn)
        })
        .await
        .map_err(|e| StoreError::Task(e.to_string()))?
    }
}

/// Raw column values of a `share_records` row.
struct RecordRow {
    report_id: String,
    owner_id: String,
    share_token: Option<String>,
    is_public: bool,
    settings: Vec<u8>,
    updated_at: i64,
}

impl RecordRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            report_id: row.get("report_id")?,
            owner_id: row.get("owner_id")?,
            share_token: row.get("share_token")?,
            is_public: row.get("is_public")?,
            settings: row.get("settings")?,
            updated_at: row.get("updated_at")?,
        })
    }

    fn into_record(self) -> Result<ShareRecord> {
        let share_token = self
            .share_token
            .map(|t| ShareToken::parse(&t))
            .transpose()
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;

        Ok(ShareRecord {
            report_id: ReportId::new(self.report_id),
            owner_id: UserId::new(self.owner_id),
            share_token,
            is_public: self.is_public,
            settings: ShareSettings::from_bytes(&self.settings)?,
            updated_at: self.updated_at,
        })
    }
}

fn query_records(conn: &Connection, sql: &str, arg: Option<&str>) -> Result<Vec<ShareRecord>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = match arg {
        Some(arg) => stmt
            .query_map(params![arg], RecordRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
        None => stmt
            .query_map([], RecordRow::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?,
    };
    rows.into_iter().map(RecordRow::into_record).collect()
}

fn row_to_view(row: &rusqlite::Row<'_>) -> rusqlite::Result<ViewEvent> {
    Ok(ViewEvent {
        report_id: ReportId::new(row.get::<_, String>("report_id")?),
        viewed_at: row.get("viewed_at")?,
        user_agent: row.get("user_agent")?,
        viewer_ip: row.get("viewer_ip")?,
    })
}

#[async_trait]
impl ShareStore for SqliteStore {
    async fn get_record(&self, report_id: &ReportId) -> Result<Option<ShareRecord>> {
        let report_id = report_id.as_str().to_string();
        self.call(move |conn| {
            conn.query_row(
                &format!("SELECT {} FROM share_records WHERE report_id = ?1", RECORD_COLUMNS),
                params![report_id],
                RecordRow::from_row,
            )
            .optional()?
            .map(RecordRow::into_record)
            .transpose()
        })
        .await
    }

    async fn find_by_token(&self, token: &ShareToken) -> Result<Option<ShareRecord>> {
        let token = token.as_str().to_string();
        self.call(move |conn| {
            conn.query_row(
                &format!("SELECT {} FROM share_records WHERE share_token = ?1", RECORD_COLUMNS),
                params![token],
                RecordRow::from_row,
            )
            .optional()?
            .map(RecordRow::into_record)
            .transpose()
        })
        .await
    }

    async fn put_record(&self, record: &ShareRecord) -> Result<()> {
        let record = record.clone();
        let settings = record.settings.to_bytes()?;

        self.call(move |conn| {
            let report_id = record.report_id.as_str();
            let token = record.share_token.as_ref().map(ShareToken::as_str);

            // Check if a different report already holds the token
            if let Some(token) = token {
                let existing: Option<String> = conn
                    .query_row(
                        "SELECT report_id FROM share_records WHERE share_token = ?1 AND report_id != ?2",
                        params![token, report_id],
                        |row| row.get(0),
                    )
                    .optional()?;

                if let Some(existing) = existing {
                    return Err(StoreError::TokenConflict {
                        token: record
                            .share_token
                            .as_ref()
                            .map(ToString::to_string)
                            .unwrap_or_default(),
                        existing,
                    });
                }
            }

            conn.execute(
                "INSERT INTO share_records (report_id, owner_id, share_token, is_public, settings, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT(report_id) DO UPDATE SET
                    owner_id = excluded.owner_id,
                    share_token = excluded.share_token,
                    is_public = excluded.is_public,
                    settings = excluded.settings,
                    updated_at = excluded.updated_at",
                params![
                    report_id,
                    record.owner_id.as_str(),
                    token,
                    record.is_public,
                    settings,
                    record.updated_at,
                ],
            )?;

            Ok(())
        })
        .await
    }

    async fn list_public(&self) -> Result<Vec<ShareRecord>> {
        self.call(|conn| {
            query_records(
                conn,
                &format!(
                    "SELECT {} FROM share_records WHERE is_public = 1 ORDER BY report_id",
                    RECORD_COLUMNS
                ),
                None,
            )
        })
        .await
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ShareRecord>> {
        let owner = owner.as_str().to_string();
        self.call(move |conn| {
            query_records(
                conn,
                &format!(
                    "SELECT {} FROM share_records WHERE owner_id = ?1 ORDER BY report_id",
                    RECORD_COLUMNS
                ),
                Some(&owner),
            )
        })
        .await
    }
}

#[async_trait]
impl ViewSink for SqliteStore {
    async fn record_view(&self, event: &ViewEvent) -> Result<()> {
        let event = event.clone();
        self.call(move |conn| {
            conn.execute(
                "INSERT INTO report_views (report_id, viewed_at, user_agent, viewer_ip)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    event.report_id.as_str(),
                    event.viewed_at,
                    event.user_agent,
                    event.viewer_ip,
                ],
            )?;
            Ok(())
        })
        .await
    }

    async fn count_views(&self, report_id: &ReportId) -> Result<u64> {
        let report_id = report_id.as_str().to_string();
        self.call(move |conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM report_views WHERE report_id = ?1",
                params![report_id],
                |row| row.get(0),
            )?;
            u64::try_from(count).map_err(|e| StoreError::InvalidData(e.to_string()))
        })
        .await
    }

    async fn views_for(&self, report_id: &ReportId) -> Result<Vec<ViewEvent>> {
        let report_id = report_id.as_str().to_string();
        self.call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT report_id, viewed_at, user_agent, viewer_ip
                 FROM report_views WHERE report_id = ?1 ORDER BY id",
            )?;
            let views = stmt
                .query_map(params![report_id], row_to_view)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(views)
        })
        .await
    }
}
