//! Segmentation options

use crate::error::{RegionError, RegionResult};
use regionalize_core::Box;

/// Connectivity type for region growth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Horizontal reach into the neighbouring rows: 0 for 4-way, 1 for 8-way.
    #[inline]
    pub fn diagonal_reach(self) -> i32 {
        match self {
            ConnectivityType::FourWay => 0,
            ConnectivityType::EightWay => 1,
        }
    }
}

/// Area a single flood fill may grow into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillWindow {
    /// The whole segmentation area. Regions keep one label across tile
    /// boundaries, so the result does not depend on the tile size.
    #[default]
    Image,
    /// The tile being computed. Regions crossing a tile edge are split
    /// into one region per tile.
    Tile,
}

/// Options for region segmentation
#[derive(Debug, Clone, PartialEq)]
pub struct RegionalizeOptions {
    /// Source band to read values from
    pub band: u32,
    /// Maximum absolute difference from a region's reference value
    pub tolerance: f64,
    /// Pixel neighbourhood used when growing regions
    pub connectivity: ConnectivityType,
    /// Area a single fill may grow into
    pub fill_window: FillWindow,
    /// Restrict segmentation to this rectangle; pixels outside get label 0
    pub roi: Option<Box>,
}

impl Default for RegionalizeOptions {
    fn default() -> Self {
        Self {
            band: 0,
            tolerance: 0.0,
            connectivity: ConnectivityType::FourWay,
            fill_window: FillWindow::Image,
            roi: None,
        }
    }
}

impl RegionalizeOptions {
    /// Create options with the given band and tolerance
    pub fn new(band: u32, tolerance: f64) -> Self {
        Self {
            band,
            tolerance,
            ..Default::default()
        }
    }

    /// Set the band
    pub fn with_band(mut self, band: u32) -> Self {
        self.band = band;
        self
    }

    /// Set the tolerance
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the fill window
    pub fn with_fill_window(mut self, fill_window: FillWindow) -> Self {
        self.fill_window = fill_window;
        self
    }

    /// Restrict segmentation to a rectangle
    pub fn with_roi(mut self, roi: Box) -> Self {
        self.roi = Some(roi);
        self
    }

    /// Check the options against a source with `bands` bands and the given
    /// image size, returning the segmentation area.
    pub(crate) fn validate(&self, bands: u32, width: u32, height: u32) -> RegionResult<Box> {
        if self.band >= bands {
            return Err(RegionError::InvalidBand {
                band: self.band,
                bands,
            });
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(RegionError::InvalidTolerance(self.tolerance));
        }

        let image = Box::new_unchecked(0, 0, width as i32, height as i32);
        match self.roi {
            None => Ok(image),
            Some(roi) => {
                if roi.is_empty() {
                    return Err(RegionError::InvalidParameters(format!(
                        "empty region of interest: {:?}",
                        roi
                    )));
                }
                roi.intersect(&image).ok_or_else(|| {
                    RegionError::InvalidParameters(format!(
                        "region of interest {:?} lies outside the {}x{} image",
                        roi, width, height
                    ))
                })
            }
        }
    }
}
