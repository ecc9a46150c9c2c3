//! Rasters, rectangles and tile addressing shared by the regionalize crates
//!
//! - [`Pix`] / [`PixMut`]: packed integer rasters, shared and writable
//! - [`FPix`] / [`DPix`]: dense floating-point rasters
//! - [`Box`]: pixel rectangles
//! - [`TileGrid`]: the tile partition of an image
//!
//! ```
//! use regionalize_core::{Pix, PixelDepth, TileGrid};
//!
//! let pix = Pix::new(200, 200, PixelDepth::Bit8).unwrap();
//! let grid = TileGrid::new(pix.width(), pix.height(), 64, 64).unwrap();
//! assert_eq!(grid.num_tiles_x(), 4);
//! assert_eq!(grid.tile_of(130, 10), Some((2, 0)));
//! ```

pub mod box_;
pub mod color;
pub mod error;
pub mod fpix;
pub mod pix;
pub mod tile;

pub use box_::Box;
pub use error::{Error, Result};
pub use fpix::{DPix, FPix, FloatImage};
pub use pix::{Pix, PixMut, PixelDepth};
pub use tile::{TileGrid, TileIter};
