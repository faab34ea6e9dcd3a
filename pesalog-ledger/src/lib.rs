//! pesalog-ledger: the store abstraction, ingestion pipeline, aggregates,
//! and paginated queries over persisted ledger entries.

pub mod error;
pub mod json;
pub mod ledger;
pub mod memory;
pub mod pipeline;
pub mod query;
pub mod reports;
pub mod store;

pub use error::{LedgerError, StoreError};
pub use json::JsonStore;
pub use ledger::Ledger;
pub use memory::MemoryStore;
pub use pipeline::IngestOutcome;
pub use query::{EntryPage, ListRequest};
pub use reports::{CategoryTotal, MonthTotal};
pub use store::{
    AggregateRow, AggregateSpec, DateRange, EntryFilter, EntryStore, EntryUpdate, GroupKey,
    GroupValue,
};
