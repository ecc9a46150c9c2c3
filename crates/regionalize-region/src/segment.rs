//! Horizontal pixel runs

use regionalize_core::Box;
use std::cmp::Ordering;

/// A maximal horizontal run of same-region pixels on one scan line
///
/// Covers every pixel `(x, y)` with `start_x <= x <= end_x`. Segments are
/// ordered by row, then start column, then end column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanSegment {
    start_x: i32,
    end_x: i32,
    y: i32,
}

impl ScanSegment {
    /// Create a segment covering `[start_x, end_x]` on row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `start_x > end_x`.
    pub fn new(start_x: i32, end_x: i32, y: i32) -> Self {
        assert!(
            start_x <= end_x,
            "scan segment with start_x {} > end_x {} on row {}",
            start_x,
            end_x,
            y
        );
        Self { start_x, end_x, y }
    }

    #[inline]
    pub fn start_x(&self) -> i32 {
        self.start_x
    }

    #[inline]
    pub fn end_x(&self) -> i32 {
        self.end_x
    }

    #[inline]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Number of pixels in the run.
    #[inline]
    pub fn pixel_count(&self) -> u64 {
        (self.end_x - self.start_x) as u64 + 1
    }

    /// Check whether the segment covers `(x, y)`.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        y == self.y && x >= self.start_x && x <= self.end_x
    }

    /// Check whether two segments share at least one pixel.
    pub fn overlaps(&self, other: &ScanSegment) -> bool {
        self.y == other.y && self.start_x <= other.end_x && other.start_x <= self.end_x
    }

    /// One-row bounding box of the run.
    pub fn bounds(&self) -> Box {
        Box::from_inclusive(self.start_x, self.y, self.end_x, self.y)
    }
}

impl Ord for ScanSegment {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y
            .cmp(&other.y)
            .then(self.start_x.cmp(&other.start_x))
            .then(self.end_x.cmp(&other.end_x))
    }
}

impl PartialOrd for ScanSegment {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
