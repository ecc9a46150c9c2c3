//! Scanline flood fill
//!
//! Regions grow from a seed pixel one horizontal run at a time. Each run
//! found is claimed immediately, then the rows above and below it are
//! scanned for further matching runs. A pixel joins the region when it is
//! unclaimed, lies inside the fill window and its value is within the
//! tolerance of the region's reference value.

use crate::claim::ClaimIndex;
use crate::options::ConnectivityType;
use crate::segment::ScanSegment;
use crate::source::RasterSource;
use crate::working::WorkingRegion;
use regionalize_core::Box;
use std::collections::VecDeque;

/// Receiver for the runs written by a fill
pub trait LabelSink {
    /// Write `label` over every pixel of `segment`.
    fn write_run(&mut self, segment: &ScanSegment, label: u32);
}

/// Check whether `value` is within `tolerance` of `reference`.
///
/// A NaN reference matches only NaN values; a NaN value never matches a
/// numeric reference.
#[inline]
pub fn within_tolerance(value: f64, reference: f64, tolerance: f64) -> bool {
    if reference.is_nan() {
        value.is_nan()
    } else {
        (value - reference).abs() <= tolerance
    }
}

/// Flood filler over one band of a raster source
pub struct FloodFiller<'a, S: RasterSource + ?Sized> {
    source: &'a S,
    band: u32,
    window: Box,
    tolerance: f64,
    connectivity: ConnectivityType,
}

impl<'a, S: RasterSource + ?Sized> FloodFiller<'a, S> {
    /// Create a filler confined to `window`, which must lie inside the
    /// source.
    pub fn new(
        source: &'a S,
        band: u32,
        window: Box,
        tolerance: f64,
        connectivity: ConnectivityType,
    ) -> Self {
        debug_assert!(
            !window.is_empty()
                && window.x >= 0
                && window.y >= 0
                && window.right() <= source.width() as i32
                && window.bottom() <= source.height() as i32,
            "fill window {:?} outside {}x{} source",
            window,
            source.width(),
            source.height()
        );
        Self {
            source,
            band,
            window,
            tolerance,
            connectivity,
        }
    }

    pub fn window(&self) -> Box {
        self.window
    }

    /// Value of the fill band at `(x, y)`.
    #[inline]
    pub fn value_at(&self, x: i32, y: i32) -> f64 {
        self.source.sample(x as u32, y as u32, self.band)
    }

    #[inline]
    fn matches(&self, x: i32, y: i32, reference: f64) -> bool {
        within_tolerance(self.value_at(x, y), reference, self.tolerance)
    }

    /// Grow a region labelled `label` from `(seed_x, seed_y)`.
    ///
    /// Pixels join when they are within tolerance of `reference_value`;
    /// the seed itself always joins. Every run found is claimed in `claims`
    /// and written to `sink` before the fill moves on.
    ///
    /// # Panics
    ///
    /// Panics if the seed is outside the window or already claimed.
    pub fn fill<K: LabelSink + ?Sized>(
        &self,
        seed_x: i32,
        seed_y: i32,
        label: u32,
        reference_value: f64,
        claims: &mut ClaimIndex,
        sink: &mut K,
    ) -> WorkingRegion {
        assert!(
            self.window.contains_point(seed_x, seed_y),
            "seed ({}, {}) outside fill window {:?}",
            seed_x,
            seed_y,
            self.window
        );
        assert!(
            !claims.is_claimed(seed_x, seed_y),
            "seed ({}, {}) already claimed",
            seed_x,
            seed_y
        );

        let reference = reference_value;
        let mut region = WorkingRegion::new(label, reference);
        let mut queue = VecDeque::new();

        let first = self.extend(seed_x, seed_y, reference, claims);
        Self::claim(first, &mut region, claims, sink, &mut queue);

        let reach = self.connectivity.diagonal_reach();
        let min_x = self.window.x;
        let max_x = self.window.max_x();

        while let Some(segment) = queue.pop_front() {
            for ny in [segment.y() - 1, segment.y() + 1] {
                if ny < self.window.y || ny > self.window.max_y() {
                    continue;
                }
                let lo = (segment.start_x() - reach).max(min_x);
                let hi = (segment.end_x() + reach).min(max_x);

                let mut x = lo;
                while x <= hi {
                    if let Some((run, _)) = claims.run_at(x, ny) {
                        x = run.end_x() + 1;
                        continue;
                    }
                    if !self.matches(x, ny, reference) {
                        x += 1;
                        continue;
                    }
                    let found = self.extend(x, ny, reference, claims);
                    Self::claim(found, &mut region, claims, sink, &mut queue);
                    x = found.end_x() + 1;
                }
            }
        }

        region
    }

    /// Widen a matching, unclaimed pixel into a maximal run.
    fn extend(&self, x: i32, y: i32, reference: f64, claims: &mut ClaimIndex) -> ScanSegment {
        let mut start = x;
        while start > self.window.x
            && !claims.is_claimed(start - 1, y)
            && self.matches(start - 1, y, reference)
        {
            start -= 1;
        }
        let mut end = x;
        while end < self.window.max_x()
            && !claims.is_claimed(end + 1, y)
            && self.matches(end + 1, y, reference)
        {
            end += 1;
        }
        ScanSegment::new(start, end, y)
    }

    fn claim<K: LabelSink + ?Sized>(
        segment: ScanSegment,
        region: &mut WorkingRegion,
        claims: &mut ClaimIndex,
        sink: &mut K,
        queue: &mut VecDeque<ScanSegment>,
    ) {
        claims.insert(segment, region.label());
        sink.write_run(&segment, region.label());
        region.add_segment(segment);
        queue.push_back(segment);
    }
}
