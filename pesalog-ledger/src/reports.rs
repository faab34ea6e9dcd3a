//! Reporting rollups: spend by category and by calendar month.

use serde::{Deserialize, Serialize};

use crate::store::{AggregateRow, GroupValue};

/// Spend in one category: sum of debit magnitudes plus entry count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_amount: f64,
    pub count: u64,
}

/// Spend in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub total_amount: f64,
    pub count: u64,
}

/// Order category buckets by total spend, highest first. The sort is
/// stable, so tied buckets keep the order the store returned them in.
pub(crate) fn rank_categories(rows: Vec<AggregateRow>) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = rows
        .into_iter()
        .filter_map(|row| match row.group {
            GroupValue::Category(category) => Some(CategoryTotal {
                category,
                total_amount: row.total,
                count: row.count,
            }),
            GroupValue::Month { .. } => None,
        })
        .collect();
    totals.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount));
    totals
}

/// Order month buckets chronologically.
pub(crate) fn month_series(rows: Vec<AggregateRow>) -> Vec<MonthTotal> {
    let mut totals: Vec<MonthTotal> = rows
        .into_iter()
        .filter_map(|row| match row.group {
            GroupValue::Month { year, month } => Some(MonthTotal {
                year,
                month,
                total_amount: row.total,
                count: row.count,
            }),
            GroupValue::Category(_) => None,
        })
        .collect();
    totals.sort_by_key(|t| (t.year, t.month));
    totals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category_row(category: &str, total: f64, count: u64) -> AggregateRow {
        AggregateRow {
            group: GroupValue::Category(category.to_string()),
            total,
            count,
        }
    }

    #[test]
    fn test_categories_ranked_by_total_descending() {
        let ranked = rank_categories(vec![
            category_row("Dining", 120.0, 4),
            category_row("Transport", 800.0, 2),
            category_row("Airtime", 45.0, 3),
        ]);
        let order: Vec<_> = ranked.iter().map(|t| t.category.as_str()).collect();
        assert_eq!(order, vec!["Transport", "Dining", "Airtime"]);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let ranked = rank_categories(vec![
            category_row("A", 50.0, 1),
            category_row("B", 50.0, 1),
        ]);
        assert_eq!(ranked[0].category, "A");
        assert_eq!(ranked[1].category, "B");
    }

    #[test]
    fn test_months_sorted_chronologically() {
        let rows = vec![
            AggregateRow {
                group: GroupValue::Month { year: 2024, month: 2 },
                total: 10.0,
                count: 1,
            },
            AggregateRow {
                group: GroupValue::Month { year: 2023, month: 11 },
                total: 20.0,
                count: 2,
            },
            AggregateRow {
                group: GroupValue::Month { year: 2024, month: 1 },
                total: 30.0,
                count: 3,
            },
        ];
        let series = month_series(rows);
        let order: Vec<_> = series.iter().map(|t| (t.year, t.month)).collect();
        assert_eq!(order, vec![(2023, 11), (2024, 1), (2024, 2)]);
    }
}
