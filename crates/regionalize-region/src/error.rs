use thiserror::Error;

/// Errors that can occur while configuring or running segmentation
#[derive(Debug, Error)]
pub enum RegionError {
    #[error(transparent)]
    Core(#[from] regionalize_core::Error),

    /// Band index outside the source's bands
    #[error("invalid band {band}: source has {bands} band(s)")]
    InvalidBand { band: u32, bands: u32 },

    /// Negative or NaN tolerance
    #[error("invalid tolerance: {0} (must be a non-negative number)")]
    InvalidTolerance(f64),

    /// Source raster layout the engine cannot read values from
    #[error("unsupported source: {0}")]
    UnsupportedSource(String),

    /// Region of interest or other setting that does not fit the source
    #[error("bad segmentation settings: {0}")]
    InvalidParameters(String),

    /// A tile the engine already computed is no longer in the cache
    #[error("tile ({col}, {row}) was computed but is no longer cached")]
    TileUnavailable { col: i32, row: i32 },

    /// Source with no pixels
    #[error("empty image")]
    EmptyImage,

    /// Too many regions to label with 32-bit labels
    #[error("label space exhausted after {0} regions")]
    LabelOverflow(usize),
}

pub type RegionResult<T> = Result<T, RegionError>;
