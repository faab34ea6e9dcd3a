//! The store collaborator contract: query/insert/aggregate primitives.
//!
//! The core treats persistence as opaque; anything implementing
//! [`EntryStore`] can back it. Atomicity of `insert_batch` is the
//! store's responsibility.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use pesalog_core::{Direction, LedgerEntry};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Inclusive calendar bounds; an absent bound imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDateTime>,
    pub to: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        if let Some(from) = self.from
            && instant < from
        {
            return false;
        }
        if let Some(to) = self.to
            && instant > to
        {
            return false;
        }
        true
    }
}

/// Conjunctive entry filter; absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryFilter {
    pub category: Option<String>,
    pub direction: Option<Direction>,
    pub range: Option<DateRange>,
}

impl EntryFilter {
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        if let Some(category) = &self.category
            && entry.category != *category
        {
            return false;
        }
        if let Some(direction) = self.direction
            && entry.direction != direction
        {
            return false;
        }
        if let Some(range) = self.range
            && !range.contains(entry.date)
        {
            return false;
        }
        true
    }
}

/// Field updates applied by `update_by_id`. Category correction is the
/// only mutation the core performs; every other field stays immutable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryUpdate {
    pub category: Option<String>,
}

/// Grouping axis for a grouped sum/count query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Category,
    Month,
}

/// The group a result bucket belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupValue {
    Category(String),
    Month { year: i32, month: u32 },
}

/// One bucket of a grouped aggregate: sum of amounts plus entry count.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub group: GroupValue,
    pub total: f64,
    pub count: u64,
}

/// A grouped sum/count query: filter, then bucket by the group key.
/// Result ordering is the caller's concern.
#[derive(Debug, Clone)]
pub struct AggregateSpec {
    pub filter: EntryFilter,
    pub group: GroupKey,
}

impl AggregateSpec {
    pub fn new(group: GroupKey, filter: EntryFilter) -> Self {
        AggregateSpec { filter, group }
    }
}

/// Persistence primitives the core consumes.
///
/// `find` returns items sorted by date descending along with the total
/// filtered count, independent of skip/limit.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All-or-nothing batch insert.
    async fn insert_batch(&self, entries: &[LedgerEntry]) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<LedgerEntry>, StoreError>;

    /// Apply `update` to the entry with this id, returning the updated
    /// entry, or `None` when the id is unknown.
    async fn update_by_id(
        &self,
        id: &str,
        update: EntryUpdate,
    ) -> Result<Option<LedgerEntry>, StoreError>;

    async fn find(
        &self,
        filter: &EntryFilter,
        skip: usize,
        limit: usize,
    ) -> Result<(Vec<LedgerEntry>, usize), StoreError>;

    async fn aggregate(&self, spec: &AggregateSpec) -> Result<Vec<AggregateRow>, StoreError>;

    /// Administrative removal; `true` when an entry was deleted.
    async fn delete_by_id(&self, id: &str) -> Result<bool, StoreError>;
}
