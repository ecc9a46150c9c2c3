use thiserror::Error;

/// Errors raised by raster containers and tile addressing
#[derive(Error, Debug)]
pub enum Error {
    /// Zero-sized or unaddressable raster
    #[error("cannot build a {width}x{height} raster")]
    InvalidDimension { width: u32, height: u32 },

    #[error("{0} bits per pixel is not a valid depth")]
    InvalidDepth(u32),

    #[error("index {index} is past the end ({len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two things that must share a size do not
    #[error("size {}x{} does not match {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Valid depth that this operation cannot handle
    #[error("operation not available at {0} bpp")]
    UnsupportedDepth(u32),

    #[error("{0}")]
    InvalidParameter(String),

    #[error("tiles of {tile_width}x{tile_height} are not allowed")]
    InvalidTileSize { tile_width: u32, tile_height: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
