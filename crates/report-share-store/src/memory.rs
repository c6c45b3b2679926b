//! In-memory implementation of the store traits.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use report_share_core::{ReportId, ShareRecord, ShareToken, UserId, ViewEvent};

use crate::error::{Result, StoreError};
use crate::traits::{ShareStore, ViewSink};

/// In-memory store implementation.
///
/// Implements both [`ShareStore`] and [`ViewSink`]. All data is lost when
/// the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    /// Records indexed by report ID.
    records: HashMap<ReportId, ShareRecord>,

    /// Token index: token -> report ID.
    tokens: HashMap<ShareToken, ReportId>,

    /// Append-only view log.
    views: Vec<ViewEvent>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn sorted(mut records: Vec<ShareRecord>) -> Vec<ShareRecord> {
    records.sort_by(|a, b| a.report_id.cmp(&b.report_id));
    records
}

#[async_trait]
impl ShareStore for MemoryStore {
    async fn get_record(&self, report_id: &ReportId) -> Result<Option<ShareRecord>> {
        let inner = self.read()?;
        Ok(inner.records.get(report_id).cloned())
    }

    async fn find_by_token(&self, token: &ShareToken) -> Result<Option<ShareRecord>> {
        let inner = self.read()?;
        Ok(inner
            .tokens
            .get(token)
            .and_then(|report_id| inner.records.get(report_id))
            .cloned())
    }

    async fn put_record(&self, record: &ShareRecord) -> Result<()> {
        let mut inner = self.write()?;

        if let Some(token) = &record.share_token {
            if let Some(existing) = inner.tokens.get(token) {
                if existing != &record.report_id {
                    return Err(StoreError::TokenConflict {
                        token: token.to_string(),
                        existing: existing.to_string(),
                    });
                }
            }
        }

        // Drop the token index entry of the record being replaced
        let previous_token = inner
            .records
            .get(&record.report_id)
            .and_then(|r| r.share_token.clone());
        if let Some(previous) = previous_token {
            inner.tokens.remove(&previous);
        }

        if let Some(token) = &record.share_token {
            inner.tokens.insert(token.clone(), record.report_id.clone());
        }
        inner.records.insert(record.report_id.clone(), record.clone());

        Ok(())
    }

    async fn list_public(&self) -> Result<Vec<ShareRecord>> {
        let inner = self.read()?;
        Ok(sorted(
            inner
                .records
                .values()
                .filter(|r| r.is_public)
                .cloned()
                .collect(),
        ))
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<ShareRecord>> {
        let inner = self.read()?;
        Ok(sorted(
            inner
                .records
                .values()
                .filter(|r| &r.owner_id == owner)
                .cloned()
                .collect(),
        ))
    }
}

#[async_trait]
impl ViewSink for MemoryStore {
    async fn record_view(&self, event: &ViewEvent) -> Result<()> {
        let mut inner = self.write()?;
        inner.views.push(event.clone());
        Ok(())
    }

    async fn count_views(&self, report_id: &ReportId) -> Result<u64> {
        let inner = self.read()?;
        Ok(inner
            .views
            .iter()
            .filter(|v| &v.report_id == report_id)
            .count() as u64)
    }

    async fn views_for(&self, report_id: &ReportId) -> Result<Vec<ViewEvent>> {
        let inner = self.read()?;
        Ok(inner
            .views
            .iter()
            .filter(|v| &v.report_id == report_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ShareStoreExt, TokenLookup};
    use report_share_core::ShareSettings;

    fn record(id: &str, owner: &str) -> ShareRecord {
        ShareRecord::unshared(ReportId::new(id), UserId::new(owner), 0)
    }

    fn token(s: &str) -> ShareToken {
        ShareToken::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStore::new();
        let mut r = record("r1", "u1");
        store.put_record(&r).await.unwrap();

        assert_eq!(store.get_record(&r.report_id).await.unwrap(), Some(r.clone()));
        assert_eq!(store.lookup_token(&token("abc")).await.unwrap(), TokenLookup::NotFound);

        r.share(token("abc"), ShareSettings::default(), 1);
        store.put_record(&r).await.unwrap();
        assert_eq!(
            store.lookup_token(&token("abc")).await.unwrap(),
            TokenLookup::Public(r.clone())
        );
    }

    #[tokio::test]
    async fn test_revoke_clears_token_index() {
        let store = MemoryStore::new();
        let mut r = record("r1", "u1");
        r.share(token("abc"), ShareSettings::default(), 1);
        store.put_record(&r).await.unwrap();

        r.revoke(2);
        store.put_record(&r).await.unwrap();

        assert_eq!(store.find_by_token(&token("abc")).await.unwrap(), None);
        assert!(store.list_public().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_token_conflict() {
        let store = MemoryStore::new();
        let mut a = record("a", "u1");
        let mut b = record("b", "u1");
        a.share(token("same"), ShareSettings::default(), 1);
        b.share(token("same"), ShareSettings::default(), 1);

        store.put_record(&a).await.unwrap();
        let err = store.put_record(&b).await.unwrap_err();
        assert!(matches!(err, StoreError::TokenConflict { .. }));

        // Re-putting the holder is fine
        store.put_record(&a).await.unwrap();
    }

    #[tokio::test]
    async fn test_lists_are_sorted_and_filtered() {
        let store = MemoryStore::new();
        for (id, owner, public) in [("c", "u1", true), ("a", "u2", true), ("b", "u1", false)] {
            let mut r = record(id, owner);
            if public {
                r.share(token(&format!("tok-{}", id)), ShareSettings::default(), 1);
            }
            store.put_record(&r).await.unwrap();
        }

        let public: Vec<_> = store
            .list_public()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.report_id.to_string())
            .collect();
        assert_eq!(public, vec!["a", "c"]);

        let owned: Vec<_> = store
            .list_by_owner(&UserId::new("u1"))
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.report_id.to_string())
            .collect();
        assert_eq!(owned, vec!["b", "c"]);
    }

    #[tokio::test]
    async fn test_view_counts() {
        let store = MemoryStore::new();
        let r1 = ReportId::new("r1");
        let r2 = ReportId::new("r2");

        for i in 0..3 {
            store
                .record_view(&ViewEvent {
                    report_id: r1.clone(),
                    viewed_at: i,
                    user_agent: None,
                    viewer_ip: None,
                })
                .await
                .unwrap();
        }

        assert_eq!(store.count_views(&r1).await.unwrap(), 3);
        assert_eq!(store.count_views(&r2).await.unwrap(), 0);
        let stamps: Vec<_> = store
            .views_for(&r1)
            .await
            .unwrap()
            .iter()
            .map(|v| v.viewed_at)
            .collect();
        assert_eq!(stamps, vec![0, 1, 2]);
    }

    /// Apply `ops` as (report index, share?) pairs and check every stored
    /// token resolves back to its own record.
    fn check_token_index(ops: &[(usize, bool)]) -> Result<()> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| StoreError::Task(e.to_string()))?;
        rt.block_on(async {
            let store = MemoryStore::new();
            for (step, &(idx, share)) in ops.iter().enumerate() {
                let id = format!("r{}", idx);
                let mut r = store
                    .get_record(&ReportId::new(id.clone()))
                    .await?
                    .unwrap_or_else(|| record(&id, "u1"));
                if share {
                    if r.share_token.is_none() {
                        r.share(token(&format!("tok-{}-{}", idx, step)), ShareSettings::default(), 1);
                    }
                } else {
                    r.revoke(2);
                }
                store.put_record(&r).await?;
            }

            let inner = store.read()?;
            assert_eq!(
                inner.tokens.len(),
                inner.records.values().filter(|r| r.share_token.is_some()).count()
            );
            for (token, report_id) in &inner.tokens {
                let r = &inner.records[report_id];
                assert_eq!(r.share_token.as_ref(), Some(token));
            }
            Ok::<(), StoreError>(())
        })
    }

    proptest::proptest! {
        #[test]
        fn prop_token_index_tracks_records(
            ops in proptest::collection::vec((0usize..4, proptest::bool::ANY), 0..24)
        ) {
            check_token_index(&ops).unwrap();
        }
    }
}
