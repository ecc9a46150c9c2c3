//! Rectangle extraction and placement
//!
//! Used to cut a tile-sized window out of a larger raster and to assemble
//! tiles back into a full image.

use super::{Pix, PixMut};
use crate::box_::Box;
use crate::error::{Error, Result};

impl Pix {
    /// Extract the part of the image covered by `region`.
    ///
    /// The region is clipped to the image first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the region does not overlap
    /// the image.
    pub fn clip_rectangle(&self, region: &Box) -> Result<Pix> {
        let clipped = region
            .clip(self.width() as i32, self.height() as i32)
            .ok_or_else(|| {
                Error::InvalidParameter(format!("box {:?} lies outside the image", region))
            })?;

        let out = Pix::new(clipped.w as u32, clipped.h as u32, self.depth())?;
        let mut out = out.to_mut();
        out.set_spp(self.spp());
        for dy in 0..clipped.h as u32 {
            for dx in 0..clipped.w as u32 {
                let v = self.get_pixel_unchecked(clipped.x as u32 + dx, clipped.y as u32 + dy);
                out.set_pixel_unchecked(dx, dy, v);
            }
        }
        Ok(out.into())
    }
}

impl PixMut {
    /// Copy `src` into this image with its top-left corner at `(x, y)`.
    ///
    /// Pixels falling outside this image are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the depths differ.
    pub fn paste(&mut self, src: &Pix, x: i32, y: i32) -> Result<()> {
        if src.depth() != self.depth() {
            return Err(Error::UnsupportedDepth(src.depth().bits()));
        }
        let target = Box::new_unchecked(x, y, src.width() as i32, src.height() as i32);
        let Some(visible) = target.clip(self.width() as i32, self.height() as i32) else {
            return Ok(());
        };
        for ty in visible.y..visible.bottom() {
            for tx in visible.x..visible.right() {
                let v = src.get_pixel_unchecked((tx - x) as u32, (ty - y) as u32);
                self.set_pixel_unchecked(tx as u32, ty as u32, v);
            }
        }
        Ok(())
    }
}
