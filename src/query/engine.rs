//! List query engine
//!
//! Execution flow (strict order):
//! 1. Filter by date range, status set and free predicate
//! 2. Aggregate over the filtered set (if requested)
//! 3. Sort newest first (if requested)
//! 4. Slice the requested page
//!
//! The engine is total: every call yields a `QueryResult`. Records with
//! missing or malformed fields are excluded from the filters that need
//! those fields and otherwise pass through.

use serde::Serialize;

use crate::observability::{Event, Logger, Severity};

use super::accessor::RecordAccessor;
use super::filters::RecordFilter;
use super::page::Page;
use super::range::DateRange;
use super::result::{QueryResult, Summary};
use super::sorter::{SortOrder, TimestampSorter};
use super::status::StatusFilter;

/// Parameters of a single list query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListQuery {
    /// Inclusive timestamp window, None for no date restriction
    pub date_range: Option<DateRange>,
    /// Allowed status values
    pub status: StatusFilter,
    /// Requested window
    pub page: Page,
    /// Ordering applied before paging
    pub sort: SortOrder,
    /// Whether to compute a summary
    pub aggregate: bool,
}

impl ListQuery {
    /// Unfiltered, newest-first query for the given page
    pub fn new(page: Page) -> Self {
        Self {
            date_range: None,
            status: StatusFilter::any(),
            page,
            sort: SortOrder::TimestampDesc,
            aggregate: false,
        }
    }

    /// Sets the date range
    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Sets the status filter
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Sets the ordering
    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    /// Requests a summary
    pub fn aggregated(mut self) -> Self {
        self.aggregate = true;
        self
    }

    /// Same query on another page
    pub fn at_page(&self, page: Page) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}

/// Filters, sorts, pages and totals in-memory record sequences
#[derive(Debug, Clone, Default)]
pub struct ListQueryEngine<A> {
    accessor: A,
}

impl<A> ListQueryEngine<A> {
    /// Creates an engine over the given accessor
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }

    /// Returns the accessor
    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Runs a query.
    ///
    /// Deterministic: same records + same query = same result.
    pub fn query<R>(&self, records: &[R], query: &ListQuery) -> QueryResult<R>
    where
        R: Clone,
        A: RecordAccessor<R>,
    {
        self.query_where(records, query, |_| true)
    }

    /// Runs a query with an extra caller predicate, ANDed with the others
    pub fn query_where<R, P>(&self, records: &[R], query: &ListQuery, predicate: P) -> QueryResult<R>
    where
        R: Clone,
        A: RecordAccessor<R>,
        P: Fn(&R) -> bool,
    {
        let filter = RecordFilter::new(&self.accessor, query.date_range.as_ref(), &query.status);

        // Step 1: filter
        let mut matching: Vec<&R> = records
            .iter()
            .filter(|r| filter.matches(*r) && predicate(*r))
            .collect();
        let total_matching = matching.len();

        // Step 2: aggregate over the full filtered set
        let summary = query.aggregate.then(|| self.summarize(&matching));

        // Step 3: sort
        if query.sort == SortOrder::TimestampDesc {
            TimestampSorter::sort_desc(&mut matching, &self.accessor);
        }

        // Step 4: page
        let page = query.page;
        let visible: Vec<R> = matching[page.bounds(total_matching)]
            .iter()
            .copied()
            .cloned()
            .collect();

        let result = QueryResult {
            total_matching,
            total_pages: page.total_pages(total_matching),
            page,
            summary,
            records: visible,
        };

        if Logger::enabled(Severity::Trace) {
            Logger::trace(
                Event::QueryExecuted.as_str(),
                &[
                    ("input", &records.len().to_string()),
                    ("matching", &result.total_matching.to_string()),
                    ("page", &page.number().to_string()),
                    ("total_pages", &result.total_pages.to_string()),
                    ("visible", &result.records.len().to_string()),
                ],
            );
        }

        result
    }

    /// Checks a single record against the query's date and status filters
    pub fn matches<R>(&self, record: &R, query: &ListQuery) -> bool
    where
        A: RecordAccessor<R>,
    {
        RecordFilter::new(&self.accessor, query.date_range.as_ref(), &query.status).matches(record)
    }

    fn summarize<R>(&self, records: &[&R]) -> Summary
    where
        A: RecordAccessor<R>,
    {
        let mut summary = Summary::default();

        for record in records {
            match self.accessor.amount(*record) {
                Some(amount) => {
                    summary.count += 1;
                    summary.sum += amount;
                }
                None => summary.missing_amount += 1,
            }

            if let Some(status) = self.accessor.category(*record) {
                *summary.by_status.entry(status.to_string()).or_insert(0) += 1;
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::JsonAccessor;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn engine() -> ListQueryEngine<JsonAccessor> {
        ListQueryEngine::new(JsonAccessor::default().with_amount("costo"))
    }

    fn page(number: usize, size: usize) -> Page {
        Page::new(number, size).unwrap()
    }

    fn charges() -> Vec<Value> {
        vec![
            json!({"id": 1, "fecha": "2024-03-01", "estado": "pagado", "costo": 30}),
            json!({"id": 2, "fecha": "2024-03-15", "estado": "pendiente", "costo": 30}),
            json!({"id": 3, "fecha": "2024-04-02", "estado": "pagado", "costo": 45}),
            json!({"id": 4, "fecha": "sin fecha", "estado": "pendiente"}),
        ]
    }

    fn ids(result: &QueryResult<Value>) -> Vec<i64> {
        result.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn test_unfiltered_sorted_newest_first() {
        let result = engine().query(&charges(), &ListQuery::new(page(1, 10)));

        assert_eq!(ids(&result), vec![3, 2, 1, 4]);
        assert_eq!(result.total_matching, 4);
        assert_eq!(result.total_pages, 1);
        assert!(result.summary.is_none());
    }

    #[test]
    fn test_input_order_kept() {
        let query = ListQuery::new(page(1, 10)).with_sort(SortOrder::Input);
        let result = engine().query(&charges(), &query);

        assert_eq!(ids(&result), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_date_range_filter() {
        let march = DateRange::between(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let query = ListQuery::new(page(1, 10)).with_date_range(march);
        let result = engine().query(&charges(), &query);

        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn test_status_filter() {
        let query = ListQuery::new(page(1, 10)).with_status(StatusFilter::only(["pendiente"]));
        let result = engine().query(&charges(), &query);

        assert_eq!(ids(&result), vec![2, 4]);
    }

    #[test]
    fn test_free_predicate() {
        let result = engine().query_where(&charges(), &ListQuery::new(page(1, 10)), |r| {
            r["id"].as_i64().unwrap() % 2 == 1
        });

        assert_eq!(ids(&result), vec![3, 1]);
        assert_eq!(result.total_matching, 2);
    }

    #[test]
    fn test_summary_over_filtered_set() {
        let query = ListQuery::new(page(1, 1)).aggregated();
        let result = engine().query(&charges(), &query);
        let summary = result.summary.as_ref().unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.sum, 105.0);
        assert_eq!(summary.missing_amount, 1);
        assert_eq!(summary.by_status.get("pagado"), Some(&2));
        assert_eq!(summary.by_status.get("pendiente"), Some(&2));
    }

    #[test]
    fn test_out_of_range_page_keeps_totals() {
        let result = engine().query(&charges(), &ListQuery::new(page(5, 2)));

        assert!(result.is_empty());
        assert_eq!(result.total_matching, 4);
        assert_eq!(result.total_pages, 2);
        assert!(result.is_out_of_range());
    }

    #[test]
    fn test_matches_single_record() {
        let engine = engine();
        let query = ListQuery::new(page(1, 10)).with_status(StatusFilter::only(["pagado"]));

        assert!(engine.matches(&charges()[0], &query));
        assert!(!engine.matches(&charges()[1], &query));
    }
}
