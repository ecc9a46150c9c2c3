//! Raster sources the engine reads values from
//!
//! A source exposes a `width x height` grid of pixels, each with one or
//! more numeric bands. Segmentation compares values of a single band.

use crate::error::{RegionError, RegionResult};
use regionalize_core::{FloatImage, Pix, PixelDepth, color};
use std::sync::Arc;

/// Read access to a multi-band raster
pub trait RasterSource: Send + Sync {
    /// Width in pixels
    fn width(&self) -> u32;

    /// Height in pixels
    fn height(&self) -> u32;

    /// Number of bands per pixel
    fn bands(&self) -> u32;

    /// Value of `band` at `(x, y)`.
    ///
    /// Callers guarantee `x < width`, `y < height` and `band < bands`.
    fn sample(&self, x: u32, y: u32, band: u32) -> f64;

    /// Check that the source can be segmented at all.
    fn validate(&self) -> RegionResult<()> {
        if self.bands() == 0 {
            return Err(RegionError::UnsupportedSource(
                "source has no bands".to_string(),
            ));
        }
        Ok(())
    }
}

/// Integer images: 1 to 16 bpp give one band holding the raw pixel
/// value. 32 bpp images with 3 or 4 samples per pixel give one band per
/// color channel (red, green, blue, alpha); with 1 sample per pixel the
/// whole word is a single band.
impl RasterSource for Pix {
    fn width(&self) -> u32 {
        Pix::width(self)
    }

    fn height(&self) -> u32 {
        Pix::height(self)
    }

    fn bands(&self) -> u32 {
        match (self.depth(), self.spp()) {
            (PixelDepth::Bit32, 3) => 3,
            (PixelDepth::Bit32, 4) => 4,
            (PixelDepth::Bit32, 1) => 1,
            (PixelDepth::Bit32, _) => 0,
            _ => 1,
        }
    }

    fn sample(&self, x: u32, y: u32, band: u32) -> f64 {
        let pixel = self.get_pixel_unchecked(x, y);
        if self.depth() == PixelDepth::Bit32 && self.spp() != 1 {
            f64::from(color::channel(pixel, band as usize))
        } else {
            f64::from(pixel)
        }
    }

    fn validate(&self) -> RegionResult<()> {
        if self.bands() == 0 {
            return Err(RegionError::UnsupportedSource(format!(
                "32 bpp image with {} samples per pixel",
                self.spp()
            )));
        }
        Ok(())
    }
}

impl<T> RasterSource for FloatImage<T>
where
    T: Copy + Default + Into<f64> + Send + Sync,
{
    fn width(&self) -> u32 {
        FloatImage::width(self)
    }

    fn height(&self) -> u32 {
        FloatImage::height(self)
    }

    fn bands(&self) -> u32 {
        1
    }

    fn sample(&self, x: u32, y: u32, _band: u32) -> f64 {
        self.get_pixel_unchecked(x, y).into()
    }
}

impl<T: RasterSource + ?Sized> RasterSource for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn bands(&self) -> u32 {
        (**self).bands()
    }

    fn sample(&self, x: u32, y: u32, band: u32) -> f64 {
        (**self).sample(x, y, band)
    }

    fn validate(&self) -> RegionResult<()> {
        (**self).validate()
    }
}

impl<T: RasterSource + ?Sized> RasterSource for Arc<T> {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn bands(&self) -> u32 {
        (**self).bands()
    }

    fn sample(&self, x: u32, y: u32, band: u32) -> f64 {
        (**self).sample(x, y, band)
    }

    fn validate(&self) -> RegionResult<()> {
        (**self).validate()
    }
}
