//! Randomised segmentation properties
//!
//! Random small-valued images are segmented with random tile sizes,
//! tolerances and connectivity. Every run must produce dense labels, full
//! coverage, values within tolerance of their region's reference, connected
//! regions and a catalogue that agrees with the label image.
//!
//! Run with:
//! ```
//! cargo test -p regionalize-region --test properties_reg
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regionalize_core::{Box, FPix, Pix, TileGrid};
use regionalize_region::{
    ConnectivityType, Region, RegionalizeEngine, RegionalizeOptions, within_tolerance,
};
use regionalize_test::RegParams;
use std::collections::{HashMap, VecDeque};

fn random_image(rng: &mut StdRng, w: u32, h: u32, levels: u32) -> FPix {
    let data = (0..w * h)
        .map(|_| rng.random_range(0..levels) as f32)
        .collect();
    FPix::from_data(w, h, data).unwrap()
}

fn neighbours(connectivity: ConnectivityType) -> &'static [(i32, i32)] {
    match connectivity {
        ConnectivityType::FourWay => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
        ConnectivityType::EightWay => &[
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ],
    }
}

/// Check every property on one segmentation; returns a description of the
/// first violation.
fn check_segmentation(
    src: &FPix,
    labels: &Pix,
    regions: &[Region],
    options: &RegionalizeOptions,
) -> Result<(), String> {
    let (w, h) = (src.width() as i32, src.height() as i32);
    let label_at = |x: i32, y: i32| labels.get_pixel_unchecked(x as u32, y as u32);

    // Dense labels in discovery order
    for (i, r) in regions.iter().enumerate() {
        if r.id != i as u32 + 1 {
            return Err(format!("region {} has id {}", i, r.id));
        }
    }

    // Coverage, tolerance and per-region tallies
    let mut counts: HashMap<u32, u64> = HashMap::new();
    let mut bounds: HashMap<u32, Box> = HashMap::new();
    for y in 0..h {
        for x in 0..w {
            let l = label_at(x, y);
            if l == 0 || l as usize > regions.len() {
                return Err(format!("pixel ({}, {}) has label {}", x, y, l));
            }
            let region = &regions[l as usize - 1];
            let v = src.get_pixel_unchecked(x as u32, y as u32) as f64;
            if !within_tolerance(v, region.reference_value, options.tolerance) {
                return Err(format!(
                    "pixel ({}, {}) value {} outside tolerance of region {}",
                    x, y, v, l
                ));
            }
            *counts.entry(l).or_default() += 1;
            let px = Box::new_unchecked(x, y, 1, 1);
            bounds
                .entry(l)
                .and_modify(|b| *b = b.union(&px))
                .or_insert(px);
        }
    }
    for r in regions {
        if counts.get(&r.id) != Some(&r.pixel_count) {
            return Err(format!("region {} pixel count mismatch", r.id));
        }
        if bounds.get(&r.id) != Some(&r.bounds) {
            return Err(format!("region {} bounds mismatch", r.id));
        }
    }

    // Each label is one connected component
    let steps = neighbours(options.connectivity);
    let mut seen = vec![false; (w * h) as usize];
    let mut components = 0usize;
    for y in 0..h {
        for x in 0..w {
            if seen[(y * w + x) as usize] {
                continue;
            }
            components += 1;
            let l = label_at(x, y);
            let mut queue = VecDeque::from([(x, y)]);
            seen[(y * w + x) as usize] = true;
            while let Some((cx, cy)) = queue.pop_front() {
                for &(dx, dy) in steps {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let i = (ny * w + nx) as usize;
                    if !seen[i] && label_at(nx, ny) == l {
                        seen[i] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
    }
    if components != regions.len() {
        return Err(format!(
            "{} connected components for {} regions",
            components,
            regions.len()
        ));
    }

    // A neighbour found later could not have joined the earlier region
    for y in 0..h {
        for x in 0..w {
            let l = label_at(x, y);
            let reference = regions[l as usize - 1].reference_value;
            for &(dx, dy) in steps {
                let (nx, ny) = (x + dx, y + dy);
                if nx < 0 || ny < 0 || nx >= w || ny >= h {
                    continue;
                }
                let m = label_at(nx, ny);
                let v = src.get_pixel_unchecked(nx as u32, ny as u32) as f64;
                if m > l && within_tolerance(v, reference, options.tolerance) {
                    return Err(format!(
                        "pixel ({}, {}) of region {} could have joined region {}",
                        nx, ny, m, l
                    ));
                }
            }
        }
    }

    Ok(())
}

#[test]
fn properties_reg() {
    let mut rp = RegParams::new("properties");
    let mut rng = StdRng::seed_from_u64(0x5EED_0001);

    for round in 0..40 {
        let w = rng.random_range(1..48);
        let h = rng.random_range(1..48);
        let levels = rng.random_range(1..5);
        let src = random_image(&mut rng, w, h, levels);

        let tw = rng.random_range(1..=w);
        let th = rng.random_range(1..=h);
        let tolerance = f64::from(rng.random_range(0..3u32));
        let connectivity = if rng.random_bool(0.5) {
            ConnectivityType::EightWay
        } else {
            ConnectivityType::FourWay
        };
        let options = RegionalizeOptions::new(0, tolerance).with_connectivity(connectivity);

        let grid = TileGrid::new(w, h, tw, th).unwrap();
        let engine = RegionalizeEngine::new(&src, grid, options.clone()).unwrap();
        let labels = engine.label_image().unwrap();
        let regions = engine.region_catalogue();

        let result = check_segmentation(&src, &labels, &regions, &options);
        if let Err(e) = &result {
            eprintln!(
                "round {}: {}x{} tiles {}x{} tol {} {:?}: {}",
                round, w, h, tw, th, tolerance, connectivity, e
            );
        }
        rp.check(result.is_ok(), "segmentation properties");
    }

    assert!(rp.cleanup(), "properties regression test failed");
}

#[test]
fn exact_partition_ignores_tile_size() {
    // With zero tolerance regions are the connected components of equal
    // values, so only the label numbering may depend on the tiling.
    let mut rng = StdRng::seed_from_u64(0x5EED_0002);
    for _ in 0..10 {
        let (w, h) = (rng.random_range(8..40), rng.random_range(8..40));
        let src = random_image(&mut rng, w, h, 3);
        let options = RegionalizeOptions::default();

        let whole = RegionalizeEngine::new(&src, TileGrid::single(w, h).unwrap(), options.clone())
            .unwrap()
            .label_image()
            .unwrap();
        let tiled = RegionalizeEngine::new(
            &src,
            TileGrid::new(w, h, rng.random_range(1..=w), rng.random_range(1..=h)).unwrap(),
            options,
        )
        .unwrap()
        .label_image()
        .unwrap();

        let mut forward: HashMap<u32, u32> = HashMap::new();
        let mut backward: HashMap<u32, u32> = HashMap::new();
        for y in 0..h {
            for x in 0..w {
                let a = whole.get_pixel_unchecked(x, y);
                let b = tiled.get_pixel_unchecked(x, y);
                assert_eq!(*forward.entry(a).or_insert(b), b);
                assert_eq!(*backward.entry(b).or_insert(a), a);
            }
        }
    }
}

#[test]
fn random_request_order_matches_sequential() {
    let mut rng = StdRng::seed_from_u64(0x5EED_0003);
    let src = random_image(&mut rng, 45, 38, 3);
    let grid = TileGrid::new(45, 38, 8, 6).unwrap();
    let options = RegionalizeOptions::new(0, 1.0).with_connectivity(ConnectivityType::EightWay);

    let sequential = RegionalizeEngine::new(&src, grid, options.clone()).unwrap();
    let expected = sequential.label_image().unwrap();

    let shuffled = RegionalizeEngine::new(&src, grid, options).unwrap();
    let mut order: Vec<(i32, i32)> = grid.tiles().collect();
    for i in (1..order.len()).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
    for (col, row) in order {
        let tile = shuffled.get_tile(col, row).unwrap().unwrap();
        let bounds = grid.tile_bounds(col, row).unwrap();
        for y in 0..tile.height() {
            for x in 0..tile.width() {
                assert_eq!(
                    tile.get_pixel_unchecked(x, y),
                    expected.get_pixel_unchecked(bounds.x as u32 + x, bounds.y as u32 + y)
                );
            }
        }
    }
    assert_eq!(sequential.region_catalogue(), shuffled.region_catalogue());
}
