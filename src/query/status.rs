//! Status (categorical) inclusion filter

use std::collections::BTreeSet;

use serde::Serialize;

/// Set of allowed categorical values.
///
/// Empty means no restriction. Non-empty means strict membership: a record
/// without a categorical value never passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusFilter {
    allowed: BTreeSet<String>,
}

impl StatusFilter {
    /// Filter that lets every record through
    pub fn any() -> Self {
        Self::default()
    }

    /// Filter restricted to the given values
    pub fn only<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: values.into_iter().map(Into::into).collect(),
        }
    }

    /// True when no restriction applies
    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Allowed values in sorted order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.allowed.iter().map(String::as_str)
    }

    /// Checks a record's categorical value against the filter
    pub fn admits(&self, status: Option<&str>) -> bool {
        if self.allowed.is_empty() {
            return true;
        }
        match status {
            Some(s) => self.allowed.contains(s),
            None => false,
        }
    }
}

impl<S: Into<String>> FromIterator<S> for StatusFilter {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::only(iter)
    }
}
