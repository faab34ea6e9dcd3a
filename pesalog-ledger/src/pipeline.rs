//! Ingestion pipeline: raw rows → parsed → normalized → classified
//! entries, with per-row isolation.

use chrono::{DateTime, Utc};
use pesalog_core::{Classifier, LedgerEntry};
use pesalog_ingest::{FieldAliases, RawRow, RowRejection, normalize, parse_row};
use tracing::debug;
use uuid::Uuid;

/// Result of one ingestion call: the entries that made it, plus how many
/// rows were dropped on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestOutcome {
    pub accepted: Vec<LedgerEntry>,
    pub rejected: usize,
}

/// Run one row through Parser → Normalizer → Classifier.
///
/// The id and ingestion timestamp are assigned here; nothing else ever
/// creates a [`LedgerEntry`].
pub fn build_entry(
    row: &RawRow,
    aliases: &FieldAliases,
    classifier: &Classifier,
    created_at: DateTime<Utc>,
) -> Result<LedgerEntry, RowRejection> {
    let parsed = parse_row(row, aliases)?;
    let record = normalize(&parsed)?;
    let category = classifier.classify(&record.description);

    Ok(LedgerEntry {
        id: Uuid::new_v4().to_string(),
        date: record.date,
        description: record.description,
        amount: record.amount,
        direction: record.direction,
        category,
        balance: record.balance,
        receipt_no: record.receipt_no,
        created_at,
    })
}

/// Process a whole batch with per-row isolation: a failure at any stage
/// drops that row and counts it, never the batch.
pub fn build_entries(
    rows: &[RawRow],
    aliases: &FieldAliases,
    classifier: &Classifier,
    created_at: DateTime<Utc>,
) -> IngestOutcome {
    let mut outcome = IngestOutcome::default();
    for row in rows {
        match build_entry(row, aliases, classifier, created_at) {
            Ok(entry) => outcome.accepted.push(entry),
            Err(reason) => {
                outcome.rejected += 1;
                debug!(%reason, "rejected statement row");
            }
        }
    }
    outcome
}
