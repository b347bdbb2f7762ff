//! Element offsets of array (per-row vector) data.

use std::ops::Range;

/// Monotonically non-decreasing offsets; each pair of adjacent offsets
/// delimits the elements of one row. The leading `0` is always stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offsets(Vec<usize>);

impl Offsets {
    /// Creates offsets for zero rows.
    pub fn new() -> Offsets {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Offsets {
        let mut offsets = Vec::with_capacity(capacity + 1);
        offsets.push(0);
        Offsets(offsets)
    }

    /// Builds offsets from per-row element counts.
    pub fn from_lengths<I>(lengths: I) -> Offsets
    where
        I: IntoIterator<Item = usize>,
    {
        let mut offsets = Offsets::new();
        for len in lengths {
            offsets.push_length(len);
        }
        offsets
    }

    /// Number of rows described by these offsets.
    #[inline]
    pub fn item_count(&self) -> usize {
        self.0.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Total number of elements across all rows.
    #[inline]
    pub fn last(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Returns the element range of row `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= item_count()`.
    #[inline]
    pub fn range_at(&self, index: usize) -> Range<usize> {
        self.0[index]..self.0[index + 1]
    }

    #[inline]
    pub fn len_at(&self, index: usize) -> usize {
        self.0[index + 1] - self.0[index]
    }

    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.0.windows(2).map(|w| w[0]..w[1])
    }

    /// Appends a row of `len` elements.
    pub fn push_length(&mut self, len: usize) {
        let last = self.last();
        self.0.push(last + len);
    }

    /// Appends `count` empty rows.
    pub fn push_empty(&mut self, count: usize) {
        let last = self.last();
        self.0.resize(self.0.len() + count, last);
    }

    /// Largest row length, `0` for no rows.
    pub fn max_len(&self) -> usize {
        self.ranges().map(|r| r.len()).max().unwrap_or(0)
    }
}

impl Default for Offsets {
    fn default() -> Self {
        Offsets::new()
    }
}
