// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use seamcarve::seameditor::replay_seams;
use seamcarve::{
    add_seam, remove_seam, resize, seamcarve, CarveError, EnergyMode, Raster, Seam, SeamBatch,
    SeamFinder, SeamSearch, TwoDimensionalMap,
};

const MODES: [EnergyMode; 2] = [EnergyMode::Backward, EnergyMode::Forward];

fn uniform(width: u32, height: u32, level: u8) -> RgbImage {
    ImageBuffer::from_pixel(width, height, Rgb([level, level, level]))
}

// Something with structure in both directions.
fn landscape(width: u32, height: u32) -> RgbImage {
    ImageBuffer::from_fn(width, height, |x, y| {
        let sky = y < height / 3;
        let tree = (x / 3) % 5 == 0 && !sky;
        scenery(sky, tree, x, y)
    })
}

fn scenery(sky: bool, tree: bool, x: u32, y: u32) -> Rgb<u8> {
    if sky {
        Rgb([120, 170, 230])
    } else if tree {
        Rgb([20, (60 + x % 40) as u8, 20])
    } else {
        Rgb([(90 + y % 30) as u8, 140, 60])
    }
}

// Is `needle` a subsequence of `haystack`?
fn in_order(needle: &[Rgb<u8>], haystack: &[Rgb<u8>]) -> bool {
    let mut wanted = needle.iter().peekable();
    for pixel in haystack {
        if wanted.peek() == Some(&pixel) {
            wanted.next();
        }
    }
    wanted.peek().is_none()
}

fn row(image: &RgbImage, y: u32) -> Vec<Rgb<u8>> {
    (0..image.width()).map(|x| *image.get_pixel(x, y)).collect()
}

#[test]
fn grey_image_loses_two_columns_and_stays_grey() {
    let carved = seamcarve(&uniform(10, 4, 128), 8, 4, EnergyMode::Backward).unwrap();
    assert_eq!(carved.dimensions(), (8, 4));
    assert!(carved.pixels().all(|p| *p == Rgb([128, 128, 128])));
}

#[test]
fn uniform_images_stay_uniform_at_every_smaller_width() {
    let source = uniform(10, 6, 77);
    for &mode in &MODES {
        for width in 1..10 {
            let carved = seamcarve(&source, width, 6, mode).unwrap();
            assert_eq!(carved.dimensions(), (width, 6));
            assert!(carved.pixels().all(|p| *p == Rgb([77, 77, 77])));
        }
    }
}

#[test]
fn a_black_line_survives_narrowing() {
    let source: RgbImage = ImageBuffer::from_fn(10, 4, |x, _| {
        if x == 5 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    });
    let carved = seamcarve(&source, 9, 4, EnergyMode::Backward).unwrap();
    assert_eq!(carved.dimensions(), (9, 4));

    let mut line = Vec::new();
    for y in 0..4 {
        let black: Vec<u32> = (0..9)
            .filter(|&x| *carved.get_pixel(x, y) == Rgb([0, 0, 0]))
            .collect();
        assert_eq!(black.len(), 1, "row {}: {:?}", y, black);
        line.push(black[0]);
    }
    assert!(line.windows(2).all(|w| (w[0] as i64 - w[1] as i64).abs() <= 1));
}

#[test]
fn widening_keeps_every_original_column() {
    let source: RgbImage = ImageBuffer::from_fn(5, 3, |x, y| {
        Rgb([(x * 50) as u8, (y * 40 + 10) as u8, (200 - x * 30) as u8])
    });
    for &mode in &MODES {
        let carved = seamcarve(&source, 7, 3, mode).unwrap();
        assert_eq!(carved.dimensions(), (7, 3));
        for y in 0..3 {
            assert!(
                in_order(&row(&source, y), &row(&carved, y)),
                "{} energy, row {}",
                mode,
                y
            );
        }
    }
}

#[test]
fn shrinking_then_growing_restores_the_shape() {
    let source = Raster::from_image(&landscape(24, 15));
    for &mode in &MODES {
        let narrow = resize(source.clone(), 18, 15, mode).unwrap();
        assert_eq!(narrow.dimensions(), (18, 15));
        let wide = resize(narrow, 24, 15, mode).unwrap();
        assert_eq!(wide.dimensions(), (24, 15));

        let short = resize(source.clone(), 24, 10, mode).unwrap();
        let tall = resize(short, 24, 15, mode).unwrap();
        assert_eq!(tall.dimensions(), (24, 15));
    }
}

#[test]
fn growing_rows_keeps_every_original_row() {
    let source = landscape(9, 6);
    let carved = seamcarve(&source, 9, 10, EnergyMode::Forward).unwrap();
    assert_eq!(carved.dimensions(), (9, 10));
    let column = |image: &RgbImage, x: u32| -> Vec<Rgb<u8>> {
        (0..image.height()).map(|y| *image.get_pixel(x, y)).collect()
    };
    for x in 0..9 {
        assert!(in_order(&column(&source, x), &column(&carved, x)));
    }
}

#[test]
fn dynamic_images_are_accepted() {
    let source = DynamicImage::ImageRgb8(landscape(12, 12));
    let carved = seamcarve(&source, 10, 14, EnergyMode::Forward).unwrap();
    assert_eq!(carved.dimensions(), (10, 14));
}

#[test]
fn impossible_requests_fail_cleanly() {
    let source = uniform(6, 4, 0);
    assert_eq!(
        seamcarve(&source, 6, 0, EnergyMode::Forward).err(),
        Some(CarveError::EmptyTarget {
            width: 6,
            height: 0
        })
    );
    assert!(seamcarve(&source, 12, 4, EnergyMode::Forward).is_err());
    assert!(seamcarve(&uniform(1, 1, 0), 2, 2, EnergyMode::Forward).is_err());
}

#[test]
fn found_seams_are_connected_and_in_bounds() {
    let mut raster = Raster::from_image(&landscape(20, 11));
    let mut search = SeamSearch::new(EnergyMode::Forward);
    while raster.width() > 2 {
        let seam = search.find_vertical_seam(&raster).unwrap();
        assert_eq!(seam.len(), 11);
        assert!(seam.fits(raster.width(), 11));
        assert!(seam.is_connected());

        let before = raster.width();
        let widened = add_seam(&raster, &seam);
        assert_eq!(widened.dimensions(), (before + 1, 11));
        raster = remove_seam(raster, &seam.to_mask(before));
        assert_eq!(raster.dimensions(), (before - 1, 11));
    }
}

#[test]
fn replayed_neighbours_land_in_different_columns() {
    // Two seams found back to back on the same spot: the second one's
    // column 3 was the original's column 4.
    let levels = [0.0, 40.0, 80.0, 120.0, 160.0, 200.0];
    let source: Raster = TwoDimensionalMap::from_fn(6, 2, |x, _| {
        let v = levels[x as usize];
        [v, v, v]
    });
    let batch = SeamBatch::from(vec![Seam::from(vec![3, 3]), Seam::from(vec![3, 3])]);
    let widened = replay_seams(source, batch, || ());

    for y in 0..2 {
        let inserted: Vec<u32> = (0..8)
            .filter(|&x| !levels.contains(&widened[(x, y)][0]))
            .collect();
        assert_eq!(inserted, vec![3, 5]);
    }
}
