//! JSON-file-backed store: a [`MemoryStore`] persisted after every
//! mutation. Keeps CLI state between runs without a real database.

use async_trait::async_trait;
use pesalog_core::LedgerEntry;
use std::path::PathBuf;

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::store::{AggregateRow, AggregateSpec, EntryFilter, EntryStore, EntryUpdate};

pub struct JsonStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonStore {
    /// Open a store file, loading existing entries; a missing file means
    /// an empty ledger.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let inner = if path.exists() {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| StoreError::Unavailable(format!("read {}: {e}", path.display())))?;
            let entries: Vec<LedgerEntry> = serde_json::from_str(&text)
                .map_err(|e| StoreError::Unavailable(format!("parse {}: {e}", path.display())))?;
            MemoryStore::with_entries(entries)
        } else {
            MemoryStore::new()
        };
        Ok(JsonStore { path, inner })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    async fn persist(&self) -> Result<(), StoreError> {
        let entries = self.inner.snapshot().await;
        let json = serde_json::to_string_pretty(&entries)
            .map_err(|e| StoreError::Unavailable(format!("serialize entries: {e}")))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| StoreError::Unavailable(format!("write {}: {e}", self.path.display())))
    }
}

#[async_trait]
impl EntryStore for JsonStore {
    async fn insert_batch(&self, entries: &[LedgerEntry]) -> Result<(), StoreError> {
        self.inner.insert_batch(entries).await?;
        self.persist().await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<LedgerEntry>, StoreError> {
        self.inner.find_by_id(id).await
    }

    async fn update_by_id(
        &self,
        id: &str,
        update: EntryUpdate,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        let updated = self.inner.update_by_id(id, update).await?;
        if updated.is_some() {
            self.persist().await?;
        }
        Ok(updated)
    }

    async fn find(
        &self,
        filter: &EntryFilter,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<LedgerEntry>, usize), StoreError> {
        self.inner.find(filter, skip, limit).await
    }

    async fn aggregate(&self, spec: &AggregateSpec) -> Result<Vec<AggregateRow>, StoreError> {
        self.inner.aggregate(spec).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let deleted = self.inner.delete_by_id(id).await?;
        if deleted {
            self.persist().await?;
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, NaiveDate, Utc};
    use pesalog_core::Direction;

    fn entry(id: &str) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 2)
                .unwrap()
                .and_hms_opt(14, 30, 0)
                .unwrap(),
            description: "Sent to Mary".to_string(),
            amount: 350.0,
            direction: Direction::Debit,
            category: "Money Transfer".to_string(),
            balance: 90.5,
            receipt_no: Some("RB10AAA".to_string()),
            created_at: DateTime::parse_from_rfc3339("2024-05-02T15:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");

        let store = JsonStore::open(&path).unwrap();
        store
            .insert_batch(&[entry("a"), entry("b")])
            .await
            .unwrap();
        drop(store);

        let reopened = JsonStore::open(&path).unwrap();
        let (items, total) = reopened
            .find(&EntryFilter::default(), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 2);
        assert_eq!(items[0], entry("a"));
    }

    #[tokio::test]
    async fn test_update_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");

        let store = JsonStore::open(&path).unwrap();
        store.insert_batch(&[entry("a")]).await.unwrap();
        store
            .update_by_id(
                "a",
                EntryUpdate {
                    category: Some("Family".to_string()),
                },
            )
            .await
            .unwrap();

        let reopened = JsonStore::open(&path).unwrap();
        let got = reopened.find_by_id("a").await.unwrap().unwrap();
        assert_eq!(got.category, "Family");
    }

    #[tokio::test]
    async fn test_missing_file_is_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("fresh.json")).unwrap();
        let (items, total) = store.find(&EntryFilter::default(), 0, 10).await.unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("entries.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonStore::open(&path),
            Err(StoreError::Unavailable(_))
        ));
    }
}
