//! regionalize-region - Tiled region segmentation
//!
//! This crate splits a raster into regions of connected pixels whose values
//! lie within a tolerance of the region's seed value:
//!
//! - **Flood fill** - Scanline region growth from a seed pixel
//! - **Segmentation engine** - On-demand label tiles with deterministic labels
//! - **Region catalogue** - Per-region reference value, bounds and pixel count
//!
//! # Examples
//!
//! ## Segmenting a whole image
//!
//! ```
//! use regionalize_core::FPix;
//! use regionalize_region::{RegionalizeOptions, regionalize};
//!
//! // Left half 0.0, right half 1.0
//! let data: Vec<f32> = (0..8 * 4).map(|i| if i % 8 < 4 { 0.0 } else { 1.0 }).collect();
//! let src = FPix::from_data(8, 4, data).unwrap();
//!
//! let (labels, regions) = regionalize(&src, 3, 3, RegionalizeOptions::default()).unwrap();
//! assert_eq!(regions.len(), 2);
//! assert_eq!(labels.get_pixel(0, 0), Some(1));
//! assert_eq!(labels.get_pixel(7, 3), Some(2));
//! ```
//!
//! ## Requesting tiles
//!
//! ```
//! use regionalize_core::{FPix, TileGrid};
//! use regionalize_region::{ConnectivityType, RegionalizeEngine, RegionalizeOptions};
//!
//! let src = FPix::new_with_value(100, 100, 5.0).unwrap();
//! let grid = TileGrid::new(100, 100, 32, 32).unwrap();
//! let options = RegionalizeOptions::new(0, 0.5).with_connectivity(ConnectivityType::EightWay);
//! let engine = RegionalizeEngine::new(src, grid, options).unwrap();
//!
//! // Tiles may be requested in any order
//! let tile = engine.get_tile(3, 3).unwrap().unwrap();
//! assert_eq!(tile.width(), 4);
//! assert!(engine.get_tile(4, 0).unwrap().is_none());
//!
//! let regions = engine.compute_all().unwrap();
//! assert_eq!(regions.len(), 1);
//! assert_eq!(regions[0].pixel_count, 100 * 100);
//! ```

pub mod cache;
pub mod claim;
pub mod engine;
pub mod error;
pub mod fill;
pub mod options;
pub mod region;
pub mod segment;
pub mod source;
pub mod working;

// Re-export main types
pub use error::{RegionError, RegionResult};

// Segmentation engine
pub use engine::{RegionalizeEngine, regionalize};

// Options
pub use options::{ConnectivityType, FillWindow, RegionalizeOptions};

// Regions and their building blocks
pub use claim::ClaimIndex;
pub use region::Region;
pub use segment::ScanSegment;
pub use working::WorkingRegion;

// Flood fill
pub use fill::{FloodFiller, LabelSink, within_tolerance};

// Collaborators
pub use cache::{MemoryTileCache, TileCache};
pub use source::RasterSource;
