//! regionalize-io - Image I/O for the regionalize workspace
//!
//! Loads segmentation sources from disk and dumps label rasters for
//! inspection. Supported formats:
//!
//! - **PNG** (feature `png-format`): 1/2/4/8/16 bpp gray, RGB, RGBA, palette
//! - **PNM** (feature `pnm`): binary PBM, PGM and PPM

mod error;
mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use regionalize_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read an image from a file path, detecting the format from its header.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let format = detect_format(&path)?;
    let reader = BufReader::new(File::open(&path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        other => Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    }
}

/// Write an image to a file path in the given format.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, &mut writer)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, &mut writer)?,
        other => return Err(IoError::UnsupportedFormat(format!("{:?}", other))),
    }
    writer.flush()?;
    Ok(())
}
