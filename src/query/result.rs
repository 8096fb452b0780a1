//! Result types for list queries

use std::collections::BTreeMap;

use serde::Serialize;

use super::page::Page;

/// Totals over the filtered (not paged) set
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Records that carried a numeric amount
    pub count: usize,
    /// Sum of those amounts
    pub sum: f64,
    /// Filtered records without a usable amount
    pub missing_amount: usize,
    /// Filtered records per status value
    pub by_status: BTreeMap<String, usize>,
}

impl Summary {
    /// Mean amount, None when nothing was counted
    pub fn average(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Output of one list query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<R> {
    /// Records on the requested page, in result order
    pub records: Vec<R>,
    /// Records that passed every filter
    pub total_matching: usize,
    /// `ceil(total_matching / page size)`
    pub total_pages: usize,
    /// Page that was requested
    pub page: Page,
    /// Present when aggregation was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

impl<R> QueryResult<R> {
    /// Zero-state result for the given page
    pub fn empty(page: Page) -> Self {
        Self {
            records: Vec::new(),
            total_matching: 0,
            total_pages: 0,
            page,
            summary: None,
        }
    }

    /// True when the visible page holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of visible records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Iterates the visible records
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    /// True when a later page holds records
    pub fn has_next_page(&self) -> bool {
        self.page.number() < self.total_pages
    }

    /// True when the requested page lies past the last one
    pub fn is_out_of_range(&self) -> bool {
        self.page.number() > self.total_pages.max(1)
    }

    /// Maps visible records, keeping metadata
    pub fn map<T>(self, f: impl FnMut(R) -> T) -> QueryResult<T> {
        QueryResult {
            records: self.records.into_iter().map(f).collect(),
            total_matching: self.total_matching,
            total_pages: self.total_pages,
            page: self.page,
            summary: self.summary,
        }
    }
}
