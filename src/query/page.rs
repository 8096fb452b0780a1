//! Page windows over a filtered sequence

use std::ops::Range;

use serde::Serialize;

/// A `(number, size)` window. Both are at least 1.
///
/// Construction goes through [`Page::new`], so a `Page` in hand is always
/// valid; out-of-range page numbers are still valid pages and simply select
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Page {
    number: usize,
    size: usize,
}

impl Page {
    /// Creates a page, or None when number or size is zero
    pub fn new(number: usize, size: usize) -> Option<Self> {
        if number == 0 || size == 0 {
            return None;
        }
        Some(Self { number, size })
    }

    /// First page of the given size, or None for a zero size
    pub fn first(size: usize) -> Option<Self> {
        Self::new(1, size)
    }

    /// 1-based page number
    pub fn number(&self) -> usize {
        self.number
    }

    /// Records per page
    pub fn size(&self) -> usize {
        self.size
    }

    /// Index range selected from a sequence of length `len`.
    ///
    /// `first = (number - 1) * size` and `last = first + size`, both clamped
    /// to `len`.
    pub fn bounds(&self, len: usize) -> Range<usize> {
        let first = (self.number - 1).saturating_mul(self.size).min(len);
        let last = first.saturating_add(self.size).min(len);
        first..last
    }

    /// Number of pages needed for `total` records
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.size)
    }

    /// Same size, number pulled back into `1..=total_pages` (page 1 when there
    /// are no pages).
    pub fn clamp(&self, total_pages: usize) -> Self {
        Self {
            number: self.number.min(total_pages).max(1),
            size: self.size,
        }
    }

    /// Next page, same size
    pub fn next(&self) -> Self {
        Self {
            number: self.number.saturating_add(1),
            size: self.size,
        }
    }

    /// Previous page, or None on the first page
    pub fn previous(&self) -> Option<Self> {
        Self::new(self.number - 1, self.size)
    }
}
