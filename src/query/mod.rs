//! List query subsystem
//!
//! Given an in-memory collection of records and a `ListQuery`, produces the
//! visible page, pagination metadata and optional totals.
//!
//! # Execution Flow (strict order)
//!
//! 1. Filter by date range (inclusive, day bounds normalized)
//! 2. Filter by status set (empty set = no restriction)
//! 3. Apply the caller predicate, if any
//! 4. Summarize the filtered set (if requested)
//! 5. Sort newest first (if requested, stable)
//! 6. Slice the requested page
//!
//! # Guarantees
//!
//! - Pure: no I/O, no hidden state, identical inputs give identical results
//! - Total: malformed records are excluded, never reported as errors
//! - `total_pages == ceil(total_matching / page size)`

mod accessor;
mod engine;
mod filters;
mod page;
mod range;
mod result;
mod sorter;
mod status;

pub use accessor::{lenient_amount, JsonAccessor, RecordAccessor};
pub use engine::{ListQuery, ListQueryEngine};
pub use filters::RecordFilter;
pub use page::Page;
pub use range::{parse_timestamp, DateBound, DateRange};
pub use result::{QueryResult, Summary};
pub use sorter::{SortOrder, TimestampSorter};
pub use status::StatusFilter;
