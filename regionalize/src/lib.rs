//! Regionalize - Tiled region segmentation of raster images
//!
//! Splits a raster into regions of connected pixels whose values lie within
//! a tolerance of the region's seed value. Label tiles are produced on
//! demand and labels are identical whatever order tiles are requested in.
//!
//! # Overview
//!
//! - Raster containers and tile addressing ([`Pix`], [`FPix`], [`TileGrid`])
//! - Image I/O (PNG, PNM)
//! - Segmentation engine and region catalogue
//!
//! # Example
//!
//! ```
//! use regionalize::{FPix, RegionalizeOptions, regionalize};
//!
//! let src = FPix::new_with_value(64, 48, 1.0).unwrap();
//! let (labels, regions) = regionalize(&src, 16, 16, RegionalizeOptions::default()).unwrap();
//! assert_eq!(regions.len(), 1);
//! assert_eq!(labels.get_pixel(63, 47), Some(1));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use regionalize_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use regionalize_io as io;
pub use regionalize_region as region;

// Segmentation entry points
pub use regionalize_region::{
    ConnectivityType, FillWindow, Region, RegionError, RegionalizeEngine, RegionalizeOptions,
    regionalize,
};
