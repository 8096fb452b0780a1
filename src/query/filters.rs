//! Record filtering for list queries
//!
//! A record passes when every active filter admits it (AND semantics).
//! Filters are independent of each other, so evaluation order never changes
//! the matching set.

use super::accessor::RecordAccessor;
use super::range::DateRange;
use super::status::StatusFilter;

/// Evaluates the date and status filters of a query against records
pub struct RecordFilter<'q, A> {
    accessor: A,
    date_range: Option<&'q DateRange>,
    status: &'q StatusFilter,
}

impl<'q, A> RecordFilter<'q, A> {
    /// Creates a filter over the given accessor and query parts
    pub fn new(accessor: A, date_range: Option<&'q DateRange>, status: &'q StatusFilter) -> Self {
        Self {
            accessor,
            date_range,
            status,
        }
    }

    /// Checks date and status together
    pub fn matches<R: ?Sized>(&self, record: &R) -> bool
    where
        A: RecordAccessor<R>,
    {
        self.matches_date(record) && self.matches_status(record)
    }

    /// Date check only.
    ///
    /// With no range every record passes, including ones without a usable
    /// timestamp. With a range, a missing or unparseable timestamp is a
    /// non-match.
    pub fn matches_date<R: ?Sized>(&self, record: &R) -> bool
    where
        A: RecordAccessor<R>,
    {
        let range = match self.date_range {
            Some(r) => r,
            None => return true,
        };

        match self.accessor.timestamp(record) {
            Some(at) => range.contains(at),
            None => false,
        }
    }

    /// Status check only
    pub fn matches_status<R: ?Sized>(&self, record: &R) -> bool
    where
        A: RecordAccessor<R>,
    {
        self.status.admits(self.accessor.category(record))
    }
}
