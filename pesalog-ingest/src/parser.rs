//! Row parser: resolve logical fields from a raw row via alias priority.

use crate::aliases::FieldAliases;
use crate::types::{ParsedRow, RawRow, RowRejection};

/// Resolve each logical field by trying its aliases in configured order
/// and taking the first present, non-empty value.
///
/// No conversion happens here; every resolved field is still a string.
/// Fails only when the description aliases and the amount aliases both
/// come up empty; such a row is not a candidate entry.
pub fn parse_row(row: &RawRow, aliases: &FieldAliases) -> Result<ParsedRow, RowRejection> {
    let parsed = ParsedRow {
        date: first_present(row, &aliases.date),
        amount: first_present(row, &aliases.amount),
        description: first_present(row, &aliases.description),
        balance: first_present(row, &aliases.balance),
        receipt: first_present(row, &aliases.receipt),
    };

    if parsed.description.is_none() && parsed.amount.is_none() {
        return Err(RowRejection::NoCandidateFields);
    }
    Ok(parsed)
}

fn first_present(row: &RawRow, aliases: &[String]) -> Option<String> {
    aliases
        .iter()
        .filter_map(|label| row.get(label))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string)
}
