//! Sniffing the container format from the first bytes of a file

use crate::{IoError, IoResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    #[default]
    Unknown,
    Png,
    /// Binary PBM, PGM or PPM
    Pnm,
}

const PNG_SIGNATURE: [u8; 8] = *b"\x89PNG\r\n\x1a\n";
const PNM_MAGICS: [&[u8; 2]; 3] = [b"P4", b"P5", b"P6"];

impl ImageFormat {
    /// Extension used when writing files of this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Pnm => "pnm",
            Self::Unknown => "dat",
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        if ext == "png" {
            Self::Png
        } else if ["pnm", "pbm", "pgm", "ppm"].contains(&ext.as_str()) {
            Self::Pnm
        } else {
            Self::Unknown
        }
    }
}

/// Format of the file at `path`, judged by its signature.
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut head = Vec::with_capacity(PNG_SIGNATURE.len());
    File::open(path)?
        .take(PNG_SIGNATURE.len() as u64)
        .read_to_end(&mut head)?;
    detect_format_from_bytes(&head)
}

/// Format of an in-memory image, judged by its signature.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] when fewer than two bytes are given.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(format!(
            "{} byte(s) are too few to identify a format",
            data.len()
        )));
    }
    let format = if data.starts_with(&PNG_SIGNATURE) {
        ImageFormat::Png
    } else if PNM_MAGICS.iter().any(|magic| data.starts_with(*magic)) {
        ImageFormat::Pnm
    } else {
        ImageFormat::Unknown
    };
    Ok(format)
}
