//! Field-name alias tables for heterogeneous statement exports.

use serde::{Deserialize, Serialize};

/// Accepted source labels per logical field, in priority order.
///
/// Resolution always takes the first present, non-empty value in list
/// order; never a guess at which column looks "better". The
/// defaults cover the M-Pesa export labels; deployments override the
/// lists from config for other formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldAliases {
    pub date: Vec<String>,
    pub amount: Vec<String>,
    pub description: Vec<String>,
    pub balance: Vec<String>,
    pub receipt: Vec<String>,
}

impl Default for FieldAliases {
    fn default() -> Self {
        FieldAliases {
            date: owned(&["Date", "Completion Time"]),
            amount: owned(&["Amount", "Transaction Amount"]),
            description: owned(&["Description", "Narrative"]),
            balance: owned(&["Balance"]),
            receipt: owned(&["Receipt No."]),
        }
    }
}

fn owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_covers_mpesa_labels() {
        let aliases = FieldAliases::default();
        assert_eq!(aliases.date, vec!["Date", "Completion Time"]);
        assert_eq!(aliases.amount[0], "Amount");
        assert_eq!(aliases.receipt, vec!["Receipt No."]);
    }
}
