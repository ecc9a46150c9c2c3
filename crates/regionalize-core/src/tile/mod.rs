//! Tile grid addressing
//!
//! A [`TileGrid`] partitions an image into fixed-size rectangular tiles
//! anchored at the image origin. Tile `(col, row)` covers pixels
//! `[col * tile_width, (col + 1) * tile_width) x [row * tile_height, ...)`,
//! clipped to the image, so tiles in the last column/row may be smaller.
//!
//! Tile indices are `i32` so that requests outside the grid (including
//! negative indices) can be represented and rejected rather than wrapped.

use crate::box_::Box;
use crate::error::{Error, Result};

/// Mapping between pixel coordinates and tile indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
}

impl TileGrid {
    /// Create a tile grid over a `width x height` image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty image and
    /// [`Error::InvalidTileSize`] for a zero tile dimension. Tile sizes
    /// beyond the image are reduced to the image size.
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if tile_width == 0 || tile_height == 0 {
            return Err(Error::InvalidTileSize {
                tile_width,
                tile_height,
            });
        }
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(Error::InvalidDimension { width, height });
        }
        // A tile never needs to be larger than the image, which also keeps
        // tile sizes within `i32`.
        Ok(Self {
            width,
            height,
            tile_width: tile_width.min(width),
            tile_height: tile_height.min(height),
        })
    }

    /// A grid with a single tile covering the whole image.
    pub fn single(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, width.max(1), height.max(1))
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
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    #[inline]
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Bounds of the whole image.
    pub fn image_bounds(&self) -> Box {
        Box::new_unchecked(0, 0, self.width as i32, self.height as i32)
    }

    /// Number of tile columns.
    pub fn num_tiles_x(&self) -> u32 {
        self.width.div_ceil(self.tile_width)
    }

    /// Number of tile rows.
    pub fn num_tiles_y(&self) -> u32 {
        self.height.div_ceil(self.tile_height)
    }

    /// Total number of tiles.
    pub fn num_tiles(&self) -> usize {
        self.num_tiles_x() as usize * self.num_tiles_y() as usize
    }

    /// Smallest tile column index (always 0).
    pub fn min_tile_x(&self) -> i32 {
        0
    }

    /// Smallest tile row index (always 0).
    pub fn min_tile_y(&self) -> i32 {
        0
    }

    /// Largest tile column index.
    pub fn max_tile_x(&self) -> i32 {
        self.num_tiles_x() as i32 - 1
    }

    /// Largest tile row index.
    pub fn max_tile_y(&self) -> i32 {
        self.num_tiles_y() as i32 - 1
    }

    /// Check whether `(col, row)` names a tile of this grid.
    pub fn contains_tile(&self, col: i32, row: i32) -> bool {
        (self.min_tile_x()..=self.max_tile_x()).contains(&col)
            && (self.min_tile_y()..=self.max_tile_y()).contains(&row)
    }

    /// Pixel bounds of tile `(col, row)`, clipped to the image.
    pub fn tile_bounds(&self, col: i32, row: i32) -> Option<Box> {
        if !self.contains_tile(col, row) {
            return None;
        }
        let tw = self.tile_width as i32;
        let th = self.tile_height as i32;
        Box::new_unchecked(col * tw, row * th, tw, th).clip(self.width as i32, self.height as i32)
    }

    /// Tile column containing pixel column `x`.
    #[inline]
    pub fn tile_col_of(&self, x: i32) -> i32 {
        x.div_euclid(self.tile_width as i32)
    }

    /// Tile row containing pixel row `y`.
    #[inline]
    pub fn tile_row_of(&self, y: i32) -> i32 {
        y.div_euclid(self.tile_height as i32)
    }

    /// Tile owning pixel `(x, y)`, or `None` outside the image.
    pub fn tile_of(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        if !self.image_bounds().contains_point(x, y) {
            return None;
        }
        Some((self.tile_col_of(x), self.tile_row_of(y)))
    }

    /// Row-major linear index of a tile.
    pub fn tile_index(&self, col: i32, row: i32) -> Option<usize> {
        if !self.contains_tile(col, row) {
            return None;
        }
        Some(row as usize * self.num_tiles_x() as usize + col as usize)
    }

    /// Inverse of [`TileGrid::tile_index`].
    pub fn tile_at_index(&self, index: usize) -> Option<(i32, i32)> {
        if index >= self.num_tiles() {
            return None;
        }
        let nx = self.num_tiles_x() as usize;
        Some(((index % nx) as i32, (index / nx) as i32))
    }

    /// Iterate over all tiles in row-major order.
    pub fn tiles(&self) -> TileIter {
        TileIter {
            grid: *self,
            next: 0,
        }
    }
}

/// Row-major iterator over the tiles of a [`TileGrid`]
#[derive(Debug, Clone)]
pub struct TileIter {
    grid: TileGrid,
    next: usize,
}

impl Iterator for TileIter {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<Self::Item> {
        let tile = self.grid.tile_at_index(self.next)?;
        self.next += 1;
        Some(tile)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.num_tiles().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_extent() {
        let grid = TileGrid::new(200, 100, 64, 64).unwrap();
        assert_eq!(grid.num_tiles_x(), 4);
        assert_eq!(grid.num_tiles_y(), 2);
        assert_eq!(grid.num_tiles(), 8);
        assert_eq!(grid.max_tile_x(), 3);
        assert_eq!(grid.max_tile_y(), 1);
    }

    #[test]
    fn test_invalid_geometry() {
        assert!(TileGrid::new(0, 10, 4, 4).is_err());
        assert!(TileGrid::new(10, 10, 0, 4).is_err());
    }

    #[test]
    fn test_edge_tiles_are_clipped() {
        let grid = TileGrid::new(200, 100, 64, 64).unwrap();
        assert_eq!(grid.tile_bounds(0, 0), Some(Box::new_unchecked(0, 0, 64, 64)));
        assert_eq!(grid.tile_bounds(3, 1), Some(Box::new_unchecked(192, 64, 8, 36)));
        assert_eq!(grid.tile_bounds(4, 0), None);
        assert_eq!(grid.tile_bounds(-1, 0), None);
    }

    #[test]
    fn test_tile_of() {
        let grid = TileGrid::new(200, 100, 64, 64).unwrap();
        assert_eq!(grid.tile_of(0, 0), Some((0, 0)));
        assert_eq!(grid.tile_of(63, 64), Some((0, 1)));
        assert_eq!(grid.tile_of(64, 63), Some((1, 0)));
        assert_eq!(grid.tile_of(199, 99), Some((3, 1)));
        assert_eq!(grid.tile_of(200, 0), None);
        assert_eq!(grid.tile_of(-1, 0), None);
    }

    #[test]
    fn test_row_major_iteration() {
        let grid = TileGrid::new(10, 10, 5, 4).unwrap();
        let tiles: Vec<_> = grid.tiles().collect();
        assert_eq!(tiles, vec![(0, 0), (1, 0), (0, 1), (1, 1), (0, 2), (1, 2)]);
        assert_eq!(grid.tiles().len(), 6);
        for (i, &(c, r)) in tiles.iter().enumerate() {
            assert_eq!(grid.tile_index(c, r), Some(i));
        }
    }

    #[test]
    fn test_oversized_tiles_cover_image() {
        let grid = TileGrid::new(5, 5, u32::MAX, 1 << 31).unwrap();
        assert_eq!((grid.tile_width(), grid.tile_height()), (5, 5));
        assert_eq!(grid.num_tiles(), 1);
        assert_eq!(grid.tile_bounds(0, 0), Some(grid.image_bounds()));
        assert_eq!(grid.tile_of(4, 4), Some((0, 0)));

        let wide = TileGrid::new(40, 30, 1000, 8).unwrap();
        assert_eq!((wide.num_tiles_x(), wide.num_tiles_y()), (1, 4));
        assert_eq!(wide.tile_bounds(0, 3), Some(Box::new_unchecked(0, 24, 40, 6)));
    }

    #[test]
    fn test_single_tile_grid() {
        let grid = TileGrid::single(30, 20).unwrap();
        assert_eq!(grid.num_tiles(), 1);
        assert_eq!(grid.tile_bounds(0, 0), Some(grid.image_bounds()));
    }
}
