//! Chessboard regression test
//!
//! 200x200 board of 25 pixel squares. Orthogonal connectivity keeps every
//! square apart; diagonal connectivity merges same-colored squares through
//! their corners.
//!
//! Run with:
//! ```
//! cargo test -p regionalize-region --test chessboard_reg
//! ```
//!
//! Generate golden files:
//! ```
//! REGTEST_MODE=generate cargo test -p regionalize-region --test chessboard_reg
//! ```

use regionalize_core::{Box, Pix, PixelDepth, TileGrid};
use regionalize_io::ImageFormat;
use regionalize_region::{ConnectivityType, RegionalizeEngine, RegionalizeOptions};
use regionalize_test::RegParams;

const SIZE: u32 = 200;
const SQUARE: u32 = 25;

fn make_chessboard(size: u32, square: u32) -> Pix {
    let pix = Pix::new(size, size, PixelDepth::Bit8).unwrap();
    let mut pm = pix.try_into_mut().unwrap();
    for y in 0..size {
        for x in 0..size {
            let dark = ((x / square) + (y / square)) % 2 == 0;
            pm.set_pixel_unchecked(x, y, if dark { 0 } else { 255 });
        }
    }
    pm.into()
}

#[test]
fn chessboard_reg() {
    let mut rp = RegParams::new("chessboard");
    let board = make_chessboard(SIZE, SQUARE);

    // -----------------------------------------------------------
    // Orthogonal connectivity: one region per square
    // -----------------------------------------------------------
    let grid = TileGrid::new(SIZE, SIZE, 64, 64).unwrap();
    let engine = RegionalizeEngine::new(&board, grid, RegionalizeOptions::default()).unwrap();
    let regions = engine.compute_all().unwrap();
    eprintln!("4-way regions: {}", regions.len());

    rp.compare_values(64.0, regions.len() as f64, 0.0);
    let all_625 = regions.iter().all(|r| r.pixel_count == 625);
    rp.check(all_625, "every square has 625 pixels");
    let all_square = regions
        .iter()
        .all(|r| r.bounds.w == SQUARE as i32 && r.bounds.h == SQUARE as i32);
    rp.check(all_square, "every bounding box is 25x25");

    // Squares are discovered in the order their top-left pixel is reached.
    // With 64 pixel tiles the first tile holds squares (0,0)..(2,2).
    rp.compare_values(0.0, regions[0].reference_value, 0.0);
    rp.check(
        regions[0].bounds == Box::new_unchecked(0, 0, 25, 25),
        "first region is the top-left square",
    );
    rp.check(
        regions[1].bounds == Box::new_unchecked(25, 0, 25, 25),
        "second region is its right neighbour",
    );

    let labels = engine.label_image().unwrap();
    rp.write_pix_and_check(&labels, ImageFormat::Png).unwrap();
    let path = rp.last_output_path(ImageFormat::Png);
    let back = rp.read_back(&path).unwrap();
    rp.compare_pix(&labels, &back);

    // -----------------------------------------------------------
    // Diagonal connectivity: two regions
    // -----------------------------------------------------------
    let options = RegionalizeOptions::default().with_connectivity(ConnectivityType::EightWay);
    let engine = RegionalizeEngine::new(&board, grid, options).unwrap();
    let regions = engine.compute_all().unwrap();
    eprintln!("8-way regions: {}", regions.len());

    rp.compare_values(2.0, regions.len() as f64, 0.0);
    rp.compare_values(20000.0, regions[0].pixel_count as f64, 0.0);
    rp.compare_values(20000.0, regions[1].pixel_count as f64, 0.0);
    rp.compare_values(0.0, regions[0].reference_value, 0.0);
    rp.compare_values(255.0, regions[1].reference_value, 0.0);

    assert!(rp.cleanup(), "chessboard regression test failed");
}

#[test]
fn chessboard_tile_size_independent() {
    let board = make_chessboard(SIZE, SQUARE);
    for (tw, th) in [(25, 25), (7, 200), (200, 1), (33, 47), (200, 200)] {
        let grid = TileGrid::new(SIZE, SIZE, tw, th).unwrap();
        let engine = RegionalizeEngine::new(&board, grid, RegionalizeOptions::default()).unwrap();
        let regions = engine.compute_all().unwrap();
        assert_eq!(regions.len(), 64, "tile size {}x{}", tw, th);
        assert!(regions.iter().all(|r| r.pixel_count == 625));
    }
}
