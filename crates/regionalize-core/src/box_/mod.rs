//! Axis-aligned pixel rectangles
//!
//! Used for tile bounds, regions of interest and region extents. `x`/`y`
//! is the top-left pixel; the rectangle covers `w` columns and `h` rows,
//! so `right()` and `bottom()` are one past the last pixel.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Box {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Box {
    /// Rectangle with a checked, non-negative size.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box size {w}x{h} is negative"
            )));
        }
        Ok(Self::new_unchecked(x, y, w, h))
    }

    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle between two exclusive edges, empty when they cross.
    const fn between(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new_unchecked(left, top, right - left, bottom - top)
    }

    /// Smallest rectangle holding every pixel from `(min_x, min_y)` to
    /// `(max_x, max_y)` inclusive.
    pub fn from_inclusive(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self::between(min_x, min_y, max_x + 1, max_y + 1)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[inline]
    pub fn max_x(&self) -> i32 {
        self.right() - 1
    }

    #[inline]
    pub fn max_y(&self) -> i32 {
        self.bottom() - 1
    }

    /// Pixel count; 0 for degenerate boxes.
    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            i64::from(self.w) * i64::from(self.h)
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        (self.x..self.right()).contains(&x) && (self.y..self.bottom()).contains(&y)
    }

    pub fn overlaps(&self, other: &Box) -> bool {
        self.intersect(other).is_some()
    }

    /// Shared part of both boxes, if any.
    pub fn intersect(&self, other: &Box) -> Option<Box> {
        let shared = Self::between(
            self.x.max(other.x),
            self.y.max(other.y),
            self.right().min(other.right()),
            self.bottom().min(other.bottom()),
        );
        (!shared.is_empty()).then_some(shared)
    }

    /// Smallest box holding both.
    pub fn union(&self, other: &Box) -> Box {
        Self::between(
            self.x.min(other.x),
            self.y.min(other.y),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Part of the box inside a `width x height` image.
    pub fn clip(&self, width: i32, height: i32) -> Option<Box> {
        self.intersect(&Box::new_unchecked(0, 0, width, height))
    }
}
