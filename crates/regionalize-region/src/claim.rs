//! Ownership index for labelled pixels
//!
//! Every pixel belongs to at most one region. The index stores claimed
//! runs per row, keyed by start column, so a lookup is a single ordered
//! map probe.

use crate::segment::ScanSegment;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Copy)]
struct Claim {
    end_x: i32,
    label: u32,
}

/// Index of claimed scan segments
#[derive(Debug, Default)]
pub struct ClaimIndex {
    rows: HashMap<i32, BTreeMap<i32, Claim>>,
    last_hit: Option<(ScanSegment, u32)>,
    claimed_pixels: u64,
    segment_count: usize,
}

impl ClaimIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `segment` as belonging to `label`.
    ///
    /// # Panics
    ///
    /// Panics if any pixel of `segment` is already claimed.
    pub fn insert(&mut self, segment: ScanSegment, label: u32) {
        let row = self.rows.entry(segment.y()).or_default();
        if let Some((&start, claim)) = row.range(..=segment.end_x()).next_back() {
            assert!(
                !ScanSegment::new(start, claim.end_x, segment.y()).overlaps(&segment),
                "segment {:?} overlaps run [{}, {}] of region {} on row {}",
                segment,
                start,
                claim.end_x,
                claim.label,
                segment.y()
            );
        }
        row.insert(
            segment.start_x(),
            Claim {
                end_x: segment.end_x(),
                label,
            },
        );
        self.claimed_pixels += segment.pixel_count();
        self.segment_count += 1;
    }

    /// Run covering `(x, y)` and the label owning it.
    pub fn run_at(&mut self, x: i32, y: i32) -> Option<(ScanSegment, u32)> {
        if let Some((seg, label)) = self.last_hit {
            if seg.contains(x, y) {
                return Some((seg, label));
            }
        }
        let row = self.rows.get(&y)?;
        let (&start, claim) = row.range(..=x).next_back()?;
        if claim.end_x < x {
            return None;
        }
        let hit = (ScanSegment::new(start, claim.end_x, y), claim.label);
        self.last_hit = Some(hit);
        Some(hit)
    }

    /// Label owning `(x, y)`, if any.
    pub fn owner(&mut self, x: i32, y: i32) -> Option<u32> {
        self.run_at(x, y).map(|(_, label)| label)
    }

    #[inline]
    pub fn is_claimed(&mut self, x: i32, y: i32) -> bool {
        self.run_at(x, y).is_some()
    }

    /// Total number of claimed pixels.
    pub fn claimed_pixels(&self) -> u64 {
        self.claimed_pixels
    }

    /// Number of stored runs.
    pub fn len(&self) -> usize {
        self.segment_count
    }

    pub fn is_empty(&self) -> bool {
        self.segment_count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        let mut claims = ClaimIndex::new();
        claims.insert(ScanSegment::new(0, 3, 0), 1);
        claims.insert(ScanSegment::new(6, 9, 0), 2);
        claims.insert(ScanSegment::new(2, 2, 5), 3);

        assert_eq!(claims.owner(0, 0), Some(1));
        assert_eq!(claims.owner(3, 0), Some(1));
        assert_eq!(claims.owner(4, 0), None);
        assert_eq!(claims.owner(9, 0), Some(2));
        assert_eq!(claims.owner(10, 0), None);
        assert_eq!(claims.owner(2, 5), Some(3));
        assert_eq!(claims.owner(2, 4), None);
        assert_eq!(claims.claimed_pixels(), 4 + 4 + 1);
        assert_eq!(claims.len(), 3);
    }

    #[test]
    fn test_run_at_returns_whole_run() {
        let mut claims = ClaimIndex::new();
        claims.insert(ScanSegment::new(10, 20, 1), 7);
        let (seg, label) = claims.run_at(15, 1).unwrap();
        assert_eq!(seg, ScanSegment::new(10, 20, 1));
        assert_eq!(label, 7);
        // Cached hit must not leak into other rows
        assert!(claims.run_at(15, 2).is_none());
    }

    #[test]
    fn test_adjacent_runs_allowed() {
        let mut claims = ClaimIndex::new();
        claims.insert(ScanSegment::new(0, 4, 0), 1);
        claims.insert(ScanSegment::new(5, 5, 0), 2);
        assert_eq!(claims.owner(4, 0), Some(1));
        assert_eq!(claims.owner(5, 0), Some(2));
    }

    #[test]
    #[should_panic(expected = "overlaps run")]
    fn test_overlapping_insert_panics() {
        let mut claims = ClaimIndex::new();
        claims.insert(ScanSegment::new(0, 4, 0), 1);
        claims.insert(ScanSegment::new(4, 8, 0), 2);
    }

    #[test]
    #[should_panic(expected = "overlaps run")]
    fn test_enclosing_insert_panics() {
        let mut claims = ClaimIndex::new();
        claims.insert(ScanSegment::new(3, 4, 0), 1);
        claims.insert(ScanSegment::new(0, 8, 0), 2);
    }
}
