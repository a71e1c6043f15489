//! In-process file record store backed by moka.

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use pinshare_core::config::storage::StorageConfig;
use pinshare_core::result::AppResult;
use pinshare_core::traits::file_store::FileRecordStore;
use pinshare_core::types::file::{FileOwner, FileRecord};
use pinshare_core::types::id::FileId;

/// Bounded in-memory [`FileRecordStore`].
///
/// Records are lost on restart. Once `max_records` is reached moka evicts
/// the least useful entries.
#[derive(Debug, Clone)]
pub struct MemoryFileStore {
    records: Cache<FileId, FileRecord>,
}

impl MemoryFileStore {
    /// Create a store sized from configuration.
    pub fn new(config: &StorageConfig) -> Self {
        Self::with_capacity(config.max_records)
    }

    /// Create a store holding at most `max_records`.
    pub fn with_capacity(max_records: u64) -> Self {
        Self {
            records: Cache::builder().max_capacity(max_records).build(),
        }
    }
}

#[async_trait]
impl FileRecordStore for MemoryFileStore {
    async fn save(&self, record: &FileRecord) -> AppResult<()> {
        self.records.insert(record.id, record.clone()).await;
        debug!(id = %record.id, content_id = %record.content_id, "File record saved");
        Ok(())
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileRecord>> {
        Ok(self.records.get(&id).await)
    }

    async fn find_by_content_id(
        &self,
        owner: &FileOwner,
        content_id: &str,
    ) -> AppResult<Option<FileRecord>> {
        if owner.is_anonymous() {
            return Ok(None);
        }
        Ok(self
            .records
            .iter()
            .map(|(_, record)| record)
            .find(|record| record.content_id == content_id && owner.owns(record)))
    }

    async fn list_for_owner(&self, owner: &FileOwner) -> AppResult<Vec<FileRecord>> {
        if owner.is_anonymous() {
            return Ok(Vec::new());
        }

        let mut records: Vec<FileRecord> = self
            .records
            .iter()
            .map(|(_, record)| record)
            .filter(|record| owner.owns(record))
            .collect();
        records.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(records)
    }

    async fn delete(&self, id: FileId) -> AppResult<bool> {
        Ok(self.records.remove(&id).await.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn record(cid: &str, user: Option<&str>, wallet: Option<&str>, age_minutes: i64) -> FileRecord {
        FileRecord {
            id: FileId::new(),
            name: format!("{cid}.txt"),
            mime_type: "text/plain".into(),
            size_bytes: 3,
            content_id: cid.into(),
            uploaded_at: Utc::now() - Duration::minutes(age_minutes),
            user_id: user.map(str::to_string),
            wallet_address: wallet.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_save_find_delete() {
        let store = MemoryFileStore::with_capacity(100);
        let r = record("QmOne1234567", Some("u1"), None, 0);
        store.save(&r).await.expect("save");

        assert_eq!(store.find_by_id(r.id).await.expect("ok"), Some(r.clone()));
        let u1 = FileOwner {
            user_id: Some("u1".into()),
            wallet_address: None,
        };
        let u2 = FileOwner {
            user_id: Some("u2".into()),
            wallet_address: None,
        };
        assert_eq!(
            store.find_by_content_id(&u1, "QmOne1234567").await.expect("ok"),
            Some(r.clone())
        );
        assert!(store
            .find_by_content_id(&u2, "QmOne1234567")
            .await
            .expect("ok")
            .is_none());
        assert!(store.delete(r.id).await.expect("ok"));
        assert!(!store.delete(r.id).await.expect("ok"));
        assert!(store.find_by_id(r.id).await.expect("ok").is_none());
    }

    #[tokio::test]
    async fn test_list_for_owner_matches_either_identity_newest_first() {
        let store = MemoryFileStore::with_capacity(100);
        let old = record("QmOld12345678", Some("u1"), None, 30);
        let new = record("QmNew12345678", None, Some("0xABC"), 1);
        let other = record("QmOther123456", Some("u2"), Some("0xdef"), 5);
        for r in [&old, &new, &other] {
            store.save(r).await.expect("save");
        }

        let owner = FileOwner {
            user_id: Some("u1".into()),
            wallet_address: Some("0xabc".into()),
        };
        let listed = store.list_for_owner(&owner).await.expect("list");
        assert_eq!(listed, vec![new, old]);

        assert!(store
            .list_for_owner(&FileOwner::default())
            .await
            .expect("list")
            .is_empty());
    }
}
