//! Published region summaries

use regionalize_core::Box;

/// A region as reported in the catalogue
///
/// `id` equals the label written into the tile images.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    /// Label of the region, starting at 1
    pub id: u32,
    /// Value of the seed pixel the region was grown from
    pub reference_value: f64,
    /// Smallest rectangle enclosing every pixel of the region
    pub bounds: Box,
    /// Number of pixels in the region
    pub pixel_count: u64,
}

impl Region {
    /// Number of pixels in the region.
    #[inline]
    pub fn area(&self) -> u64 {
        self.pixel_count
    }
}
