//! Result ordering for list queries
//!
//! Newest first by record timestamp. The sort is stable: records with equal
//! timestamps keep their input order. There is no secondary key.

use std::cmp::Ordering;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::accessor::RecordAccessor;

/// Requested ordering of the filtered set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    /// Keep input order
    #[serde(rename = "input")]
    Input,
    /// Newest timestamp first
    #[default]
    #[serde(rename = "desc")]
    TimestampDesc,
}

/// Sorts filtered records
pub struct TimestampSorter;

impl TimestampSorter {
    /// Sorts records newest first.
    ///
    /// Timestamps are extracted once per record. Records without a usable
    /// timestamp go after all timestamped ones, in input order.
    pub fn sort_desc<'r, R, A>(records: &mut Vec<&'r R>, accessor: &A)
    where
        R: ?Sized,
        A: RecordAccessor<R>,
    {
        let mut keyed: Vec<(Option<NaiveDateTime>, &'r R)> = records
            .iter()
            .map(|r| (accessor.timestamp(*r), *r))
            .collect();

        keyed.sort_by(|(a, _), (b, _)| Self::compare_desc(a.as_ref(), b.as_ref()));

        records.clear();
        records.extend(keyed.into_iter().map(|(_, r)| r));
    }

    fn compare_desc(a: Option<&NaiveDateTime>, b: Option<&NaiveDateTime>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
