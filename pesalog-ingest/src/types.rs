//! Raw and intermediate row types, plus the per-row rejection reasons.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Snapshot of one input line: source field label → string value.
///
/// Labels are whatever the export format used ("Amount" in one format,
/// "Transaction Amount" in another); alias resolution happens later.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRow {
    fields: HashMap<String, String>,
}

impl RawRow {
    pub fn new() -> Self {
        RawRow::default()
    }

    pub fn set(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(label.into(), value.into());
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.get(label).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, String)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        RawRow {
            fields: iter.into_iter().collect(),
        }
    }
}

/// Alias-resolved row with every field still a string.
///
/// Produced by [`crate::parse_row`], consumed by [`crate::normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRow {
    pub date: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub balance: Option<String>,
    pub receipt: Option<String>,
}

/// Why one row was dropped from a batch.
///
/// Rejections are values, not propagated errors: the pipeline counts them
/// and keeps going, so one bad row never aborts its batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    /// Neither a description nor an amount resolved; the row is not a
    /// candidate entry at all (header junk, blank line, summary row).
    #[error("row has neither a description nor an amount")]
    NoCandidateFields,
    #[error("unparseable date: {0:?}")]
    BadDate(String),
    #[error("unparseable amount: {0:?}")]
    BadAmount(String),
    #[error("description is empty")]
    EmptyDescription,
}
