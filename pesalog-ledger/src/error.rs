//! Typed failure taxonomy for store round-trips and ledger operations.

use std::time::Duration;
use thiserror::Error;

/// A store call failed. Every variant is surfaced to the caller as-is;
/// the core never retries silently.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Failure of a ledger operation, with enough context to report.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The store rejected the whole batch; nothing was committed from
    /// the core's perspective and no partial retry is attempted here.
    #[error("failed to persist batch of {attempted} entries")]
    BatchPersistFailed {
        attempted: usize,
        #[source]
        source: StoreError,
    },
    #[error("entry not found: {0}")]
    EntryNotFound(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
