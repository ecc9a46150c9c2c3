//! Tiled segmentation engine
//!
//! The engine produces 32 bpp label tiles on demand. Whatever order tiles
//! are requested in, they are computed one at a time in row-major order,
//! so labels are assigned in the same discovery order on every run.
//!
//! Computing a tile scans its pixels in raster order. Each pixel not yet
//! owned by a region seeds a new flood fill whose label is one more than
//! the number of regions found so far. With [`FillWindow::Image`] a fill
//! may run into tiles that are not yet published; those labels go into
//! pending buffers that become the tiles' contents when their turn comes.
//! A published tile is fully claimed, so no later fill can touch it.

use crate::cache::{MemoryTileCache, TileCache};
use crate::claim::ClaimIndex;
use crate::error::{RegionError, RegionResult};
use crate::fill::{FloodFiller, LabelSink};
use crate::options::{FillWindow, RegionalizeOptions};
use crate::region::Region;
use crate::segment::ScanSegment;
use crate::source::RasterSource;
use crate::working::WorkingRegion;
use parking_lot::Mutex;
use regionalize_core::{Box, Pix, TileGrid};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Label buffers of tiles that have been written to but not published
struct PendingTiles {
    grid: TileGrid,
    buffers: HashMap<(i32, i32), Vec<u32>>,
    next_tile: usize,
}

impl PendingTiles {
    fn new(grid: TileGrid) -> Self {
        Self {
            grid,
            buffers: HashMap::new(),
            next_tile: 0,
        }
    }

    fn take(&mut self, col: i32, row: i32) -> Option<Vec<u32>> {
        self.buffers.remove(&(col, row))
    }
}

impl LabelSink for PendingTiles {
    fn write_run(&mut self, segment: &ScanSegment, label: u32) {
        let y = segment.y();
        let row = self.grid.tile_row_of(y);
        let first_col = self.grid.tile_col_of(segment.start_x());
        let last_col = self.grid.tile_col_of(segment.end_x());

        for col in first_col..=last_col {
            let Some(bounds) = self.grid.tile_bounds(col, row) else {
                continue;
            };
            let index = row as usize * self.grid.num_tiles_x() as usize + col as usize;
            assert!(
                index >= self.next_tile,
                "region {} written into published tile ({}, {})",
                label,
                col,
                row
            );

            let buffer = self
                .buffers
                .entry((col, row))
                .or_insert_with(|| vec![0; bounds.w as usize * bounds.h as usize]);
            let x0 = segment.start_x().max(bounds.x) - bounds.x;
            let x1 = segment.end_x().min(bounds.max_x()) - bounds.x;
            let offset = (y - bounds.y) as usize * bounds.w as usize;
            buffer[offset + x0 as usize..=offset + x1 as usize].fill(label);
        }
    }
}

/// State mutated only on the serialized compute path
struct EngineState {
    regions: Vec<WorkingRegion>,
    claims: ClaimIndex,
    pending: PendingTiles,
}

/// On-demand tiled region segmentation over one raster source
///
/// The engine is `Sync`: any number of threads may request tiles at once.
/// Tile computation is serialized behind a single lock, while already
/// cached tiles are served without taking it.
pub struct RegionalizeEngine<S: RasterSource, C: TileCache = MemoryTileCache> {
    source: S,
    grid: TileGrid,
    options: RegionalizeOptions,
    area: Box,
    cache: C,
    state: Mutex<EngineState>,
}

impl<S: RasterSource> RegionalizeEngine<S> {
    /// Create an engine with an in-memory tile cache.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be segmented, the grid does
    /// not match the source size, or the options are invalid for the
    /// source.
    pub fn new(source: S, grid: TileGrid, options: RegionalizeOptions) -> RegionResult<Self> {
        Self::with_cache(source, grid, options, MemoryTileCache::new())
    }
}

impl<S: RasterSource, C: TileCache> RegionalizeEngine<S, C> {
    /// Create an engine storing its tiles in `cache`.
    ///
    /// The cache must be empty and used by this engine only.
    pub fn with_cache(
        source: S,
        grid: TileGrid,
        options: RegionalizeOptions,
        cache: C,
    ) -> RegionResult<Self> {
        source.validate()?;
        let (width, height) = (source.width(), source.height());
        if width == 0 || height == 0 {
            return Err(RegionError::EmptyImage);
        }
        if grid.width() != width || grid.height() != height {
            return Err(regionalize_core::Error::DimensionMismatch {
                expected: (width, height),
                actual: (grid.width(), grid.height()),
            }
            .into());
        }
        let area = options.validate(source.bands(), width, height)?;

        debug!(
            width,
            height,
            tile_width = grid.tile_width(),
            tile_height = grid.tile_height(),
            band = options.band,
            tolerance = options.tolerance,
            connectivity = ?options.connectivity,
            fill_window = ?options.fill_window,
            "created regionalize engine"
        );

        Ok(Self {
            source,
            grid,
            options,
            area,
            cache,
            state: Mutex::new(EngineState {
                regions: Vec::new(),
                claims: ClaimIndex::new(),
                pending: PendingTiles::new(grid),
            }),
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn tile_grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn options(&self) -> &RegionalizeOptions {
        &self.options
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Area being segmented: the image, clipped to the region of interest.
    pub fn segmentation_area(&self) -> Box {
        self.area
    }

    /// Get the label tile at `(col, row)`.
    ///
    /// Computes every tile before it in row-major order that has not been
    /// computed yet. Returns `Ok(None)` for a tile outside the grid.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::TileUnavailable`] if the tile was computed
    /// earlier but the cache no longer holds it, or an allocation error
    /// from creating a tile. A failed computation leaves the engine as it
    /// was before the call.
    pub fn get_tile(&self, col: i32, row: i32) -> RegionResult<Option<Pix>> {
        let Some(index) = self.grid.tile_index(col, row) else {
            return Ok(None);
        };
        if let Some(tile) = self.cache.get(col, row) {
            return Ok(Some(tile));
        }

        let mut state = self.state.lock();
        // Another caller may have produced it while we waited
        if let Some(tile) = self.cache.get(col, row) {
            return Ok(Some(tile));
        }
        if index < state.pending.next_tile {
            return Err(RegionError::TileUnavailable { col, row });
        }

        loop {
            let next = state.pending.next_tile;
            let (c, r) = self
                .grid
                .tile_at_index(next)
                .ok_or(RegionError::TileUnavailable { col, row })?;
            let tile = self.compute_tile(&mut state, c, r)?;
            self.cache.put(c, r, tile.clone());
            state.pending.next_tile += 1;
            if next == index {
                return Ok(Some(tile));
            }
        }
    }

    fn compute_tile(&self, state: &mut EngineState, col: i32, row: i32) -> RegionResult<Pix> {
        let bounds = self
            .grid
            .tile_bounds(col, row)
            .ok_or(RegionError::TileUnavailable { col, row })?;
        let tile = Pix::new_label(bounds.w as u32, bounds.h as u32)?;
        let mut tile = tile.try_into_mut().unwrap_or_else(|p| p.to_mut());

        let discovered = state.regions.len();
        if let Some(active) = bounds.intersect(&self.area) {
            // Each pixel seeds at most one region
            if discovered as u64 + active.area() as u64 > u64::from(u32::MAX) {
                return Err(RegionError::LabelOverflow(discovered));
            }

            let window = match self.options.fill_window {
                FillWindow::Image => self.area,
                FillWindow::Tile => active,
            };
            let filler = FloodFiller::new(
                &self.source,
                self.options.band,
                window,
                self.options.tolerance,
                self.options.connectivity,
            );

            let EngineState {
                regions,
                claims,
                pending,
            } = &mut *state;
            for y in active.y..active.bottom() {
                let mut x = active.x;
                while x < active.right() {
                    if let Some((run, _)) = claims.run_at(x, y) {
                        x = run.end_x() + 1;
                        continue;
                    }
                    let label = regions.len() as u32 + 1;
                    let reference = filler.value_at(x, y);
                    let region = filler.fill(x, y, label, reference, claims, pending);
                    trace!(
                        label,
                        seed_x = x,
                        seed_y = y,
                        pixels = region.pixel_count(),
                        "seeded region"
                    );
                    regions.push(region);
                }
            }
        }

        if let Some(labels) = state.pending.take(col, row) {
            let w = bounds.w as usize;
            for (y, line) in labels.chunks_exact(w).enumerate() {
                tile.row_data_mut(y as u32)[..w].copy_from_slice(line);
            }
        }

        debug!(
            col,
            row,
            seeded = state.regions.len() - discovered,
            regions = state.regions.len(),
            pending_tiles = state.pending.buffers.len(),
            "computed tile"
        );
        Ok(tile.into())
    }

    /// Snapshot of every region discovered so far, in label order.
    pub fn region_catalogue(&self) -> Vec<Region> {
        let state = self.state.lock();
        state.regions.iter().map(WorkingRegion::to_region).collect()
    }

    /// Region with label `id`, if discovered.
    pub fn region(&self, id: u32) -> Option<Region> {
        let index = (id as usize).checked_sub(1)?;
        self.state.lock().regions.get(index).map(WorkingRegion::to_region)
    }

    /// Number of regions discovered so far.
    pub fn region_count(&self) -> usize {
        self.state.lock().regions.len()
    }

    /// Label owning pixel `(x, y)`, if a region has claimed it yet.
    pub fn region_at(&self, x: i32, y: i32) -> Option<u32> {
        self.state.lock().claims.owner(x, y)
    }

    /// Number of tiles computed so far.
    pub fn computed_tiles(&self) -> usize {
        self.state.lock().pending.next_tile
    }

    /// Check whether every tile has been computed.
    pub fn is_complete(&self) -> bool {
        self.computed_tiles() == self.grid.num_tiles()
    }

    /// Compute every tile and return the full region catalogue.
    pub fn compute_all(&self) -> RegionResult<Vec<Region>> {
        let last = self.grid.num_tiles() - 1;
        if let Some((col, row)) = self.grid.tile_at_index(last) {
            self.get_tile(col, row)?;
        }
        Ok(self.region_catalogue())
    }

    /// Compute every tile and assemble them into one label image.
    pub fn label_image(&self) -> RegionResult<Pix> {
        self.compute_all()?;
        let out = Pix::new_label(self.grid.width(), self.grid.height())?;
        let mut out = out.try_into_mut().unwrap_or_else(|p| p.to_mut());
        for (col, row) in self.grid.tiles() {
            let tile = self
                .get_tile(col, row)?
                .ok_or(RegionError::TileUnavailable { col, row })?;
            let bounds = self
                .grid
                .tile_bounds(col, row)
                .ok_or(RegionError::TileUnavailable { col, row })?;
            out.paste(&tile, bounds.x, bounds.y)?;
        }
        Ok(out.into())
    }
}

/// Segment a whole source with tiles of `tile_width x tile_height`.
///
/// Returns the label image and the region catalogue.
pub fn regionalize<S: RasterSource>(
    source: S,
    tile_width: u32,
    tile_height: u32,
    options: RegionalizeOptions,
) -> RegionResult<(Pix, Vec<Region>)> {
    let grid = TileGrid::new(source.width(), source.height(), tile_width, tile_height)?;
    let engine = RegionalizeEngine::new(source, grid, options)?;
    let labels = engine.label_image()?;
    Ok((labels, engine.region_catalogue()))
}
