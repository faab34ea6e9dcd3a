//! Entry normalizer: string fields → typed date, signed amount, direction.

use chrono::{NaiveDate, NaiveDateTime};
use pesalog_core::Direction;
use regex::Regex;
use std::sync::LazyLock;

use crate::types::{ParsedRow, RowRejection};

/// Typed output of normalization: a ledger entry minus id, category, and
/// ingestion timestamp (those belong to the pipeline).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub date: NaiveDateTime,
    pub description: String,
    /// Non-negative magnitude; the source sign moved into `direction`.
    pub amount: f64,
    pub direction: Direction,
    pub balance: f64,
    pub receipt_no: Option<String>,
}

/// Datetime layouts tried first, then date-only layouts at midnight.
/// Fixed order, first success wins: ISO before day-first before
/// month-first, so an ambiguous 03/04 date always reads the same way.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y", "%d %b %Y"];

// Leading signed decimal with optional thousands separators, e.g.
// "-1,500.00" or "350". Anchored: "KES 100" is not a number.
static AMOUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d[\d,]*(?:\.\d+)?").expect("amount regex"));

/// Convert a [`ParsedRow`] into a typed record, or reject it.
///
/// Direction is derived from the pre-abs sign of the amount (strictly
/// negative → debit); the stored amount is the absolute value. Balance
/// defaults to 0.0 when the column is absent or unreadable.
pub fn normalize(parsed: &ParsedRow) -> Result<NormalizedRecord, RowRejection> {
    let description = parsed
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or(RowRejection::EmptyDescription)?
        .to_string();

    let amount_str = parsed
        .amount
        .as_deref()
        .ok_or_else(|| RowRejection::BadAmount(String::new()))?;
    let signed = parse_amount(amount_str)
        .ok_or_else(|| RowRejection::BadAmount(amount_str.to_string()))?;

    let date_str = parsed
        .date
        .as_deref()
        .ok_or_else(|| RowRejection::BadDate(String::new()))?;
    let date =
        parse_statement_date(date_str).ok_or_else(|| RowRejection::BadDate(date_str.to_string()))?;

    let balance = parsed
        .balance
        .as_deref()
        .and_then(parse_amount)
        .unwrap_or(0.0);

    let receipt_no = parsed
        .receipt
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string);

    Ok(NormalizedRecord {
        date,
        description,
        amount: signed.abs(),
        direction: Direction::from_signed_amount(signed),
        balance,
        receipt_no,
    })
}

/// Parse a statement timestamp, trying each known layout in order.
pub fn parse_statement_date(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// Parse a signed amount from the start of a statement cell.
/// Thousands separators are stripped before conversion.
pub fn parse_amount(s: &str) -> Option<f64> {
    let token = AMOUNT_RE.find(s.trim())?.as_str().replace(',', "");
    token.parse::<f64>().ok()
}
