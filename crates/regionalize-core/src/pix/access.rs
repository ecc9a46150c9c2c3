//! Per-pixel reads and writes
//!
//! A row is a run of 32-bit words; pixel 0 sits in the most significant
//! bits of word 0, so for 1 bpp it is bit 31.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Word index and right shift of pixel `x` in a row of `bits`-wide pixels.
#[inline]
fn locate(x: u32, bits: u32) -> (usize, u32) {
    let per_word = 32 / bits;
    ((x / per_word) as usize, 32 - bits * (x % per_word + 1))
}

/// Value of pixel `x` in a packed row.
#[inline]
pub fn read_packed(row: &[u32], x: u32, depth: PixelDepth) -> u32 {
    let (word, shift) = locate(x, depth.bits());
    (row[word] >> shift) & depth.max_value()
}

/// Store `value` (masked to the depth) as pixel `x` of a packed row.
#[inline]
pub fn write_packed(row: &mut [u32], x: u32, depth: PixelDepth, value: u32) {
    let (word, shift) = locate(x, depth.bits());
    let mask = depth.max_value() << shift;
    row[word] = (row[word] & !mask) | ((value << shift) & mask);
}

impl Pix {
    /// Pixel at (x, y), or `None` outside the raster.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width() && y < self.height()).then(|| self.get_pixel_unchecked(x, y))
    }

    /// Pixel at (x, y) with only slice bounds checks.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies past the row's words.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_packed(self.row_data(y), x, self.depth())
    }

    /// Red, green and blue at (x, y) of a 32 bpp raster.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }
}

impl PixMut {
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width() && y < self.height()).then(|| self.get_pixel_unchecked(x, y))
    }

    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        read_packed(self.row_data(y), x, self.depth())
    }

    /// Store `val` at (x, y); bits above the depth are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] naming the offending coordinate.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        for (index, len) in [(x, self.width()), (y, self.height())] {
            if index >= len {
                return Err(Error::IndexOutOfBounds {
                    index: index as usize,
                    len: len as usize,
                });
            }
        }
        self.set_pixel_unchecked(x, y, val);
        Ok(())
    }

    /// # Panics
    ///
    /// Panics if `y >= height` or `x` lies past the row's words.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let depth = self.depth();
        write_packed(self.row_data_mut(y), x, depth, val);
    }

    /// Store an opaque color at (x, y) of a 32 bpp raster.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        match self.depth() {
            PixelDepth::Bit32 => self.set_pixel(x, y, color::compose_rgb(r, g, b)),
            other => Err(Error::UnsupportedDepth(other.bits())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEPTHS: [PixelDepth; 6] = [
        PixelDepth::Bit1,
        PixelDepth::Bit2,
        PixelDepth::Bit4,
        PixelDepth::Bit8,
        PixelDepth::Bit16,
        PixelDepth::Bit32,
    ];

    #[test]
    fn test_msb_first_layout() {
        let mut row = [0u32; 2];
        write_packed(&mut row, 0, PixelDepth::Bit1, 1);
        assert_eq!(row[0], 0x8000_0000);
        write_packed(&mut row, 33, PixelDepth::Bit1, 1);
        assert_eq!(row[1], 0x4000_0000);
        assert_eq!(read_packed(&row, 33, PixelDepth::Bit1), 1);
        write_packed(&mut row, 0, PixelDepth::Bit1, 0);
        assert_eq!(row[0], 0);

        let mut row = [0u32; 1];
        write_packed(&mut row, 1, PixelDepth::Bit8, 0xab);
        assert_eq!(row[0], 0x00ab_0000);
        let mut row = [0u32; 1];
        write_packed(&mut row, 1, PixelDepth::Bit16, 0x1234);
        assert_eq!(row[0], 0x0000_1234);
        assert_eq!(read_packed(&row, 0, PixelDepth::Bit16), 0);
        write_packed(&mut row, 0, PixelDepth::Bit32, 0xdead_beef);
        assert_eq!(row[0], 0xdead_beef);
    }

    #[test]
    fn test_neighbours_untouched() {
        for depth in DEPTHS {
            let mut pm = Pix::new(37, 3, depth).unwrap().to_mut();
            let modulus = depth.max_value().min(1000) + 1;
            for x in 0..37 {
                pm.set_pixel(x, 1, x % modulus).unwrap();
            }
            let pix: Pix = pm.into();
            for x in 0..37 {
                assert_eq!(pix.get_pixel(x, 1), Some(x % modulus), "{depth:?} x={x}");
                assert_eq!(pix.get_pixel(x, 0), Some(0));
                assert_eq!(pix.get_pixel(x, 2), Some(0));
            }
        }
    }

    #[test]
    fn test_out_of_bounds() {
        let mut pm = Pix::new(5, 5, PixelDepth::Bit8).unwrap().to_mut();
        assert!(matches!(
            pm.set_pixel(5, 0, 1),
            Err(Error::IndexOutOfBounds { index: 5, len: 5 })
        ));
        assert!(pm.set_pixel(0, 5, 1).is_err());
        assert_eq!(pm.get_pixel(5, 0), None);
    }

    #[test]
    fn test_value_masked_to_depth() {
        let mut pm = Pix::new(4, 1, PixelDepth::Bit4).unwrap().to_mut();
        pm.set_pixel(2, 0, 0x1f).unwrap();
        assert_eq!(pm.get_pixel(2, 0), Some(0xf));
        assert_eq!(pm.get_pixel(1, 0), Some(0));
        assert_eq!(pm.get_pixel(3, 0), Some(0));
    }

    #[test]
    fn test_rgb() {
        let mut pm = Pix::new(2, 2, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(1, 1, 10, 20, 30).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.get_rgb(1, 1), Some((10, 20, 30)));

        let mut gray = Pix::new(2, 2, PixelDepth::Bit8).unwrap().to_mut();
        assert!(gray.set_rgb(0, 0, 1, 2, 3).is_err());
        assert_eq!(Pix::from(gray).get_rgb(0, 0), None);
    }
}
