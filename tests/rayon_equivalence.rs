#![cfg(feature = "rayon")]

use deskew::{DeskewConfig, Deskewer, OwnedImage, PixelFormat, Raster};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn make_page(width: usize, height: usize, seed: u64) -> OwnedImage {
    // Random "words" on a few text lines, so the score curve is not smooth.
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![255u8; width * height];
    let mut y = 4;
    while y + 6 < height {
        let mut x = 3;
        while x + 8 < width {
            let word = rng.random_range(2..8);
            for yy in y..y + 6 {
                for xx in x..(x + word).min(width) {
                    data[yy * width + xx] = rng.random_range(0..80);
                }
            }
            x += word + rng.random_range(2..5);
        }
        y += 10;
    }
    OwnedImage::new(data, width, height).unwrap()
}

#[test]
fn parallel_matches_sequential() {
    let page = make_page(96, 80, 7);
    let raster = Raster::from(page);
    let base = DeskewConfig {
        min_deg: -15.0,
        max_deg: 15.0,
        step_deg: 0.25,
        ..DeskewConfig::default()
    };

    let seq = Deskewer::new(DeskewConfig {
        parallel: false,
        ..base.clone()
    })
    .unwrap()
    .deskew(&raster)
    .unwrap();
    let par = Deskewer::new(DeskewConfig {
        parallel: true,
        ..base
    })
    .unwrap()
    .deskew(&raster)
    .unwrap();

    assert_eq!(seq.estimate.table, par.estimate.table);
    assert_eq!(seq.angle_deg(), par.angle_deg());
    assert_eq!(seq.raster, par.raster);
}

#[test]
fn parallel_ties_still_pick_lowest_angle() {
    let white = Raster::filled(33, 21, PixelFormat::Gray, 255).unwrap();
    let par = Deskewer::new(DeskewConfig {
        min_deg: -3.0,
        max_deg: 3.0,
        step_deg: 0.5,
        parallel: true,
        ..DeskewConfig::default()
    })
    .unwrap()
    .deskew(&white)
    .unwrap();
    assert_eq!(par.angle_deg(), -3.0);
    assert_eq!(par.estimate.table.len(), 13);
}
