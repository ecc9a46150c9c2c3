//! Regions under construction

use crate::region::Region;
use crate::segment::ScanSegment;
use regionalize_core::Box;

/// A region being grown by the flood filler
///
/// Holds the region's label, its reference value and the scan segments
/// that make it up. The bounding box and pixel count are kept up to date
/// as segments are added.
#[derive(Debug, Clone)]
pub struct WorkingRegion {
    label: u32,
    reference_value: f64,
    segments: Vec<ScanSegment>,
    bounds: Option<Box>,
    pixel_count: u64,
}

impl WorkingRegion {
    /// Create an empty region.
    pub fn new(label: u32, reference_value: f64) -> Self {
        Self {
            label,
            reference_value,
            segments: Vec::new(),
            bounds: None,
            pixel_count: 0,
        }
    }

    pub(crate) fn add_segment(&mut self, segment: ScanSegment) {
        let run = segment.bounds();
        self.bounds = Some(self.bounds.map_or(run, |b| b.union(&run)));
        self.pixel_count += segment.pixel_count();
        self.segments.push(segment);
    }

    #[inline]
    pub fn label(&self) -> u32 {
        self.label
    }

    #[inline]
    pub fn reference_value(&self) -> f64 {
        self.reference_value
    }

    /// Segments in the order the filler discovered them.
    pub fn segments(&self) -> &[ScanSegment] {
        &self.segments
    }

    pub fn pixel_count(&self) -> u64 {
        self.pixel_count
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Bounding box of all segments, or `None` for an empty region.
    pub fn bounding_box(&self) -> Option<Box> {
        self.bounds
    }

    /// Check whether `(x, y)` belongs to the region.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.bounds.is_some_and(|b| b.contains_point(x, y))
            && self.segments.iter().any(|s| s.contains(x, y))
    }

    /// Snapshot for the region catalogue.
    pub fn to_region(&self) -> Region {
        Region {
            id: self.label,
            reference_value: self.reference_value,
            bounds: self.bounding_box().unwrap_or_default(),
            pixel_count: self.pixel_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_region() {
        let r = WorkingRegion::new(1, 4.0);
        assert!(r.is_empty());
        assert_eq!(r.pixel_count(), 0);
        assert!(r.bounding_box().is_none());
        assert!(!r.contains(0, 0));
    }

    #[test]
    fn test_bounds_and_count() {
        let mut r = WorkingRegion::new(3, 7.0);
        r.add_segment(ScanSegment::new(2, 5, 1));
        r.add_segment(ScanSegment::new(0, 1, 2));
        r.add_segment(ScanSegment::new(4, 9, 0));

        assert_eq!(r.pixel_count(), 4 + 2 + 6);
        assert_eq!(r.bounding_box(), Some(Box::new_unchecked(0, 0, 10, 3)));
        assert!(r.contains(9, 0));
        assert!(!r.contains(1, 1));

        let folded: u64 = r.segments().iter().map(|s| s.pixel_count()).sum();
        assert_eq!(folded, r.pixel_count());

        let region = r.to_region();
        assert_eq!(region.id, 3);
        assert_eq!(region.reference_value, 7.0);
        assert_eq!(region.pixel_count, 12);
        assert_eq!(region.bounds.area(), 30);
    }
}
