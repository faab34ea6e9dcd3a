//! Canonical ledger entry types shared by every pesalog crate.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel category for an entry that never went through the classifier.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Whether money moved out of (debit) or into (credit) the account.
///
/// Derived from the sign of the source amount and fixed at ingestion;
/// the stored amount itself is always a non-negative magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Debit,
    Credit,
}

impl Direction {
    /// Negative source amounts are debits; zero and positive are credits.
    pub fn from_signed_amount(amount: f64) -> Self {
        if amount < 0.0 {
            Direction::Debit
        } else {
            Direction::Credit
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Debit => write!(f, "debit"),
            Direction::Credit => write!(f, "credit"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debit" => Ok(Direction::Debit),
            "credit" => Ok(Direction::Credit),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// One normalized, classified financial record.
///
/// Created only by the ingestion pipeline. After persistence the single
/// mutable field is `category` (manual correction); everything else is
/// immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Opaque identifier, assigned once at creation.
    pub id: String,
    /// Calendar instant of the transaction, as printed on the statement.
    pub date: NaiveDateTime,
    pub description: String,
    /// Non-negative magnitude; the sign lives in `direction`.
    pub amount: f64,
    pub direction: Direction,
    #[serde(default = "default_category")]
    pub category: String,
    /// Running balance snapshot, 0.0 when the statement omits the column.
    /// Never validated against neighboring entries.
    #[serde(default)]
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_no: Option<String>,
    /// Ingestion timestamp, set once.
    pub created_at: DateTime<Utc>,
}

fn default_category() -> String {
    UNCATEGORIZED.to_string()
}

impl LedgerEntry {
    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> LedgerEntry {
        LedgerEntry {
            id: "e-001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 14)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            description: "Sent to JOHN DOE".to_string(),
            amount: 1250.0,
            direction: Direction::Debit,
            category: "Money Transfer".to_string(),
            balance: 310.5,
            receipt_no: Some("RC12XYZ".to_string()),
            created_at: DateTime::parse_from_rfc3339("2024-03-15T08:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn test_direction_from_sign() {
        assert_eq!(Direction::from_signed_amount(-0.01), Direction::Debit);
        assert_eq!(Direction::from_signed_amount(0.0), Direction::Credit);
        assert_eq!(Direction::from_signed_amount(450.0), Direction::Credit);
    }

    #[test]
    fn test_direction_parse_and_display() {
        assert_eq!("debit".parse::<Direction>().unwrap(), Direction::Debit);
        assert_eq!(" Credit ".parse::<Direction>().unwrap(), Direction::Credit);
        assert!("both".parse::<Direction>().is_err());
        assert_eq!(Direction::Debit.to_string(), "debit");
    }

    #[test]
    fn test_entry_serde_round_trip() {
        let entry = sample();
        let json = serde_json::to_string(&entry).unwrap();
        let back: LedgerEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_category_defaults_to_sentinel() {
        // Category is only absent when classification was bypassed.
        let json = r#"{
            "id": "e-002",
            "date": "2024-01-02T00:00:00",
            "description": "Airtime purchase",
            "amount": 100.0,
            "direction": "credit",
            "created_at": "2024-01-02T12:00:00Z"
        }"#;
        let entry: LedgerEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.category, UNCATEGORIZED);
        assert_eq!(entry.balance, 0.0);
        assert_eq!(entry.receipt_no, None);
    }
}
