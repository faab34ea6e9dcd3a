//! pesalog-core: canonical ledger types and the description classifier.

pub mod classify;
pub mod entry;

pub use classify::{Classifier, FALLBACK_CATEGORY, Rule, default_rules};
pub use entry::{Direction, LedgerEntry, UNCATEGORIZED};
