use thiserror::Error;

/// Anything that can go wrong loading or saving a raster
#[derive(Error, Debug)]
pub enum IoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Format not recognized, or its feature is disabled
    #[error("format not supported: {0}")]
    UnsupportedFormat(String),

    /// Well-formed stream describing an impossible raster
    #[error("malformed image: {0}")]
    InvalidData(String),

    #[error("decoding failed: {0}")]
    DecodeError(String),

    #[error("encoding failed: {0}")]
    EncodeError(String),

    #[error(transparent)]
    Core(#[from] regionalize_core::Error),
}

pub type IoResult<T> = Result<T, IoError>;
