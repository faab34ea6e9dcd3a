//! Paginated listing request/response types.

use pesalog_core::{Direction, LedgerEntry};
use serde::Serialize;

use crate::store::DateRange;

/// A page request. `page` is 1-indexed; filters are conjunctive and an
/// absent filter imposes no constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct ListRequest {
    pub page: usize,
    pub page_size: usize,
    pub category: Option<String>,
    pub direction: Option<Direction>,
    pub range: Option<DateRange>,
}

impl Default for ListRequest {
    fn default() -> Self {
        ListRequest {
            page: 1,
            page_size: 50,
            category: None,
            direction: None,
            range: None,
        }
    }
}

impl ListRequest {
    pub fn page(page: usize, page_size: usize) -> Self {
        ListRequest {
            page,
            page_size,
            ..ListRequest::default()
        }
    }
}

/// One page of entries plus the filtered total, independent of
/// pagination. A page past the end is empty, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryPage {
    pub entries: Vec<LedgerEntry>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}

impl EntryPage {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            0
        } else {
            self.total.div_ceil(self.page_size)
        }
    }
}
