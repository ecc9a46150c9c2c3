//! Floating-point rasters
//!
//! Sources that are not integral (elevation models, probability maps,
//! filter responses) are held in a [`FloatImage`]: a dense, unpadded,
//! row-major buffer with one value per pixel. [`FPix`] stores `f32` and
//! [`DPix`] stores `f64`.
//!
//! ```
//! use regionalize_core::FPix;
//!
//! let mut fpix = FPix::new(100, 100).unwrap();
//! fpix.set_pixel(10, 20, 0.5).unwrap();
//! assert_eq!(fpix.get_pixel(10, 20).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};
use crate::pix::Pix;

/// Single-precision raster
pub type FPix = FloatImage<f32>;

/// Double-precision raster
pub type DPix = FloatImage<f64>;

/// Dense row-major raster of `T`. Pixel (x, y) lives at `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatImage<T> {
    width: u32,
    height: u32,
    values: Vec<T>,
}

fn pixel_total(width: u32, height: u32) -> Result<usize> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimension { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(Error::InvalidDimension { width, height })
}

impl<T: Copy + Default> FloatImage<T> {
    /// Zero-filled raster.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either side is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, T::default())
    }

    /// Raster with every pixel set to `value`.
    pub fn new_with_value(width: u32, height: u32, value: T) -> Result<Self> {
        let total = pixel_total(width, height)?;
        Ok(Self {
            width,
            height,
            values: vec![value; total],
        })
    }

    /// Wrap row-major `values`.
    ///
    /// # Errors
    ///
    /// Fails on a zero size, or when `values` does not hold exactly
    /// `width * height` entries.
    pub fn from_data(width: u32, height: u32, values: Vec<T>) -> Result<Self> {
        let total = pixel_total(width, height)?;
        if values.len() != total {
            return Err(Error::InvalidParameter(format!(
                "{width}x{height} raster needs {total} values, got {}",
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    fn checked_offset(&self, x: u32, y: u32) -> Result<usize> {
        if x < self.width && y < self.height {
            Ok(self.offset(x, y))
        } else {
            Err(Error::IndexOutOfBounds {
                index: self.offset(x, y),
                len: self.values.len(),
            })
        }
    }

    /// Value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] outside the raster.
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<T> {
        self.checked_offset(x, y).map(|i| self.values[i])
    }

    /// Store `value` at (x, y).
    pub fn set_pixel(&mut self, x: u32, y: u32, value: T) -> Result<()> {
        let i = self.checked_offset(x, y)?;
        self.values[i] = value;
        Ok(())
    }

    /// Value at (x, y). Panics past the end of the buffer; an `x` beyond
    /// the width silently reads the next row.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> T {
        self.values[self.offset(x, y)]
    }

    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, value: T) {
        let i = self.offset(x, y);
        self.values[i] = value;
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.values
    }

    /// Values of row `y`.
    pub fn row(&self, y: u32) -> &[T] {
        let start = self.offset(0, y);
        &self.values[start..start + self.width as usize]
    }
}

impl FPix {
    /// Promote a single-sample integer raster.
    pub fn from_pix(pix: &Pix) -> Result<Self> {
        let mut values = Vec::with_capacity(pixel_total(pix.width(), pix.height())?);
        for y in 0..pix.height() {
            values.extend((0..pix.width()).map(|x| pix.get_pixel_unchecked(x, y) as f32));
        }
        Self::from_data(pix.width(), pix.height(), values)
    }
}
