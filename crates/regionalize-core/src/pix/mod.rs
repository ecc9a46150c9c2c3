//! Packed integer rasters
//!
//! `Pix` carries both the source rasters fed to segmentation (1 to 32 bpp)
//! and the 32 bpp label tiles it produces. Rows are padded to whole 32-bit
//! words and pixels are packed from the most significant bit down; 32 bpp
//! color pixels are `0xRRGGBBAA`.
//!
//! A `Pix` is a cheap, reference-counted handle, so a published tile can be
//! shared with any number of readers. Writing goes through `PixMut`,
//! obtained with [`Pix::try_into_mut`] (no copy when unshared) or
//! [`Pix::to_mut`], and turned back into a `Pix` with `Into`.

mod access;
mod clip;

pub use access::*;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Bits per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    Bit1 = 1,
    Bit2 = 2,
    Bit4 = 4,
    Bit8 = 8,
    Bit16 = 16,
    /// Color (RGB/RGBA) or region labels
    Bit32 = 32,
}

impl PixelDepth {
    /// Depth for a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] unless `bits` is 1, 2, 4, 8, 16 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        Ok(match bits {
            1 => PixelDepth::Bit1,
            2 => PixelDepth::Bit2,
            4 => PixelDepth::Bit4,
            8 => PixelDepth::Bit8,
            16 => PixelDepth::Bit16,
            32 => PixelDepth::Bit32,
            _ => return Err(Error::InvalidDepth(bits)),
        })
    }

    #[inline]
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Largest value a pixel of this depth can hold.
    #[inline]
    pub fn max_value(self) -> u32 {
        u32::MAX >> (32 - self.bits())
    }
}

/// Size and packing of a raster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    width: u32,
    height: u32,
    depth: PixelDepth,
    /// 1 for gray and labels, 3 for RGB, 4 for RGBA
    spp: u32,
    /// 32-bit words per row
    wpl: u32,
}

impl Layout {
    fn new(width: u32, height: u32, depth: PixelDepth, spp: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let wpl = (u64::from(width) * u64::from(depth.bits())).div_ceil(32);
        let wpl = u32::try_from(wpl).map_err(|_| Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            depth,
            spp,
            wpl,
        })
    }

    fn words(&self) -> Result<usize> {
        (self.wpl as usize)
            .checked_mul(self.height as usize)
            .ok_or(Error::InvalidDimension {
                width: self.width,
                height: self.height,
            })
    }

    #[inline]
    fn row_range(&self, y: u32) -> std::ops::Range<usize> {
        let start = y as usize * self.wpl as usize;
        start..start + self.wpl as usize
    }
}

#[derive(Debug)]
struct PixData {
    layout: Layout,
    data: Vec<u32>,
}

impl PixData {
    fn zeroed(layout: Layout) -> Result<Self> {
        Ok(Self {
            data: vec![0; layout.words()?],
            layout,
        })
    }
}

/// Shared, immutable raster
///
/// # Examples
///
/// ```
/// use regionalize_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit8).unwrap();
/// assert_eq!((pix.width(), pix.height()), (640, 480));
///
/// let labels = Pix::new_label(64, 64).unwrap();
/// assert_eq!(labels.spp(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a zeroed raster. 32 bpp rasters are RGB (`spp = 3`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero or unaddressable size.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        let spp = if depth == PixelDepth::Bit32 { 3 } else { 1 };
        Self::with_layout(Layout::new(width, height, depth, spp)?)
    }

    /// Create a zeroed 32 bpp raster with one sample per pixel, used for
    /// region labels.
    pub fn new_label(width: u32, height: u32) -> Result<Self> {
        Self::with_layout(Layout::new(width, height, PixelDepth::Bit32, 1)?)
    }

    fn with_layout(layout: Layout) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::zeroed(layout)?),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.layout.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.layout.height
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.layout.depth
    }

    /// Samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.layout.spp
    }

    /// 32-bit words per row.
    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.layout.wpl
    }

    /// All packed words, row after row.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Number of handles sharing this raster.
    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        &self.inner.data[self.inner.layout.row_range(y)]
    }

    /// Check whether both rasters have the same width, height and depth.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        let (a, b) = (&self.inner.layout, &other.inner.layout);
        (a.width, a.height, a.depth) == (b.width, b.height, b.depth)
    }

    /// Take the raster for writing without copying, if this is the only
    /// handle. Otherwise the handle is given back.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        Arc::try_unwrap(self.inner)
            .map(|inner| PixMut { inner })
            .map_err(|inner| Pix { inner })
    }

    /// Writable copy of the raster.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: PixData {
                layout: self.inner.layout,
                data: self.inner.data.clone(),
            },
        }
    }
}

/// Exclusively owned, writable raster
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.layout.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.layout.height
    }

    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.layout.depth
    }

    #[inline]
    pub fn spp(&self) -> u32 {
        self.inner.layout.spp
    }

    #[inline]
    pub fn wpl(&self) -> u32 {
        self.inner.layout.wpl
    }

    /// Change how 32 bpp pixels are interpreted (1, 3 or 4 samples).
    pub fn set_spp(&mut self, spp: u32) {
        self.inner.layout.spp = spp;
    }

    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Packed words of row `y`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        &self.inner.data[self.inner.layout.row_range(y)]
    }

    /// Writable packed words of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data_mut(&mut self, y: u32) -> &mut [u32] {
        let range = self.inner.layout.row_range(y);
        &mut self.inner.data[range]
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}
