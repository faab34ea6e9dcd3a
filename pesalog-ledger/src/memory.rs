//! In-memory store: the reference `EntryStore` used by tests and as the
//! backing state of the JSON file store.

use async_trait::async_trait;
use chrono::Datelike;
use pesalog_core::LedgerEntry;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{
    AggregateRow, AggregateSpec, EntryFilter, EntryStore, EntryUpdate, GroupKey, GroupValue,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Vec<LedgerEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_entries(entries: Vec<LedgerEntry>) -> Self {
        MemoryStore {
            entries: RwLock::new(entries),
        }
    }

    /// Copy of the current entry set, in insertion order.
    pub async fn snapshot(&self) -> Vec<LedgerEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn insert_batch(&self, entries: &[LedgerEntry]) -> Result<(), StoreError> {
        self.entries.write().await.extend_from_slice(entries);
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<LedgerEntry>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn update_by_id(
        &self,
        id: &str,
        update: EntryUpdate,
    ) -> Result<Option<LedgerEntry>, StoreError> {
        let mut entries = self.entries.write().await;
        let Some(entry) = entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };
        if let Some(category) = update.category {
            entry.category = category;
        }
        Ok(Some(entry.clone()))
    }

    async fn find(
        &self,
        filter: &EntryFilter,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<LedgerEntry>, usize), StoreError> {
        let entries = self.entries.read().await;
        let mut matched: Vec<&LedgerEntry> = entries.iter().filter(|e| filter.matches(e)).collect();
        // Date descending; stable, so same-date entries keep store order.
        matched.sort_by(|a, b| b.date.cmp(&a.date));

        let total = matched.len();
        let items = matched
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn aggregate(&self, spec: &AggregateSpec) -> Result<Vec<AggregateRow>, StoreError> {
        let entries = self.entries.read().await;

        let mut buckets: HashMap<BucketKey, (f64, u64)> = HashMap::new();
        for entry in entries.iter().filter(|e| spec.filter.matches(e)) {
            let key = match spec.group {
                GroupKey::Category => BucketKey::Category(entry.category.clone()),
                GroupKey::Month => BucketKey::Month(entry.date.year(), entry.date.month()),
            };
            let bucket = buckets.entry(key).or_insert((0.0, 0));
            bucket.0 += entry.amount;
            bucket.1 += 1;
        }

        Ok(buckets
            .into_iter()
            .map(|(key, (total, count))| AggregateRow {
                group: match key {
                    BucketKey::Category(c) => GroupValue::Category(c),
                    BucketKey::Month(year, month) => GroupValue::Month { year, month },
                },
                total,
                count,
            })
            .collect())
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() < before)
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum BucketKey {
    Category(String),
    Month(i32, u32),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::DateRange;
    use chrono::{NaiveDate, NaiveDateTime, Utc};
    use pesalog_core::Direction;

    fn entry(id: &str, date: NaiveDateTime, category: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            id: id.to_string(),
            date,
            description: format!("entry {id}"),
            amount,
            direction: Direction::Debit,
            category: category.to_string(),
            balance: 0.0,
            receipt_no: None,
            created_at: Utc::now(),
        }
    }

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn seeded() -> MemoryStore {
        MemoryStore::with_entries(vec![
            entry("a", at(1), "Transport", 100.0),
            entry("b", at(3), "Dining", 250.0),
            entry("c", at(2), "Transport", 80.0),
        ])
    }

    #[tokio::test]
    async fn test_find_sorts_date_descending_with_count() {
        let store = seeded();
        let (items, total) = store.find(&EntryFilter::default(), 0, 10).await.unwrap();
        assert_eq!(total, 3);
        let ids: Vec<_> = items.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[tokio::test]
    async fn test_find_skip_and_limit() {
        let store = seeded();
        let (items, total) = store.find(&EntryFilter::default(), 1, 1).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "c");

        let (items, total) = store.find(&EntryFilter::default(), 10, 5).await.unwrap();
        assert_eq!(total, 3);
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn test_find_filters_are_conjunctive() {
        let store = seeded();
        let filter = EntryFilter {
            category: Some("Transport".to_string()),
            direction: Some(Direction::Debit),
            range: Some(DateRange {
                from: Some(at(2)),
                to: None,
            }),
        };
        let (items, total) = store.find(&filter, 0, 10).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(items[0].id, "c");
    }

    #[tokio::test]
    async fn test_aggregate_by_category_sums_and_counts() {
        let store = seeded();
        let spec = AggregateSpec::new(GroupKey::Category, EntryFilter::default());
        let mut rows = store.aggregate(&spec).await.unwrap();
        rows.sort_by(|a, b| a.count.cmp(&b.count));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].group, GroupValue::Category("Dining".to_string()));
        assert_eq!(rows[0].total, 250.0);
        assert_eq!(rows[1].group, GroupValue::Category("Transport".to_string()));
        assert_eq!(rows[1].total, 180.0);
        assert_eq!(rows[1].count, 2);
    }

    #[tokio::test]
    async fn test_aggregate_by_month() {
        let store = MemoryStore::with_entries(vec![
            entry("a", at(1), "Transport", 100.0),
            entry(
                "b",
                NaiveDate::from_ymd_opt(2024, 2, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap(),
                "Dining",
                40.0,
            ),
        ]);
        let spec = AggregateSpec::new(GroupKey::Month, EntryFilter::default());
        let mut rows = store.aggregate(&spec).await.unwrap();
        rows.sort_by_key(|r| match r.group {
            GroupValue::Month { year, month } => (year, month),
            _ => unreachable!(),
        });
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].group, GroupValue::Month { year: 2024, month: 1 });
        assert_eq!(rows[1].total, 40.0);
    }

    #[tokio::test]
    async fn test_update_by_id_changes_category_only() {
        let store = seeded();
        let before = store.find_by_id("a").await.unwrap().unwrap();
        let updated = store
            .update_by_id(
                "a",
                EntryUpdate {
                    category: Some("Commute".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.category, "Commute");
        assert_eq!(updated.id, before.id);
        assert_eq!(updated.date, before.date);
        assert_eq!(updated.amount, before.amount);

        assert!(
            store
                .update_by_id("missing", EntryUpdate::default())
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_by_id() {
        let store = seeded();
        assert!(store.delete_by_id("b").await.unwrap());
        assert!(!store.delete_by_id("b").await.unwrap());
        let (_, total) = store.find(&EntryFilter::default(), 0, 10).await.unwrap();
        assert_eq!(total, 2);
    }
}
