// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image using the basic Avidan & Shamir
//! "backward energy": the magnitude of each pixel's local gradient.
//!
//! The gradient is a central difference in each direction, wrapping
//! around the edges of the image, so the leftmost column differences
//! against the rightmost and the top row against the bottom:
//!
//! ```text
//!  |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//!  |Δy|² = (Δry)²+(Δgy)²+(Δby)²
//! e(x,y) = √(|Δx|²+|Δy|²)
//! ```
//!
//! Every pixel is independent of every other, so with the `threaded`
//! feature the rows are split into bands and computed concurrently.

use crate::energy::CostGrid;
use crate::pixelpairs::squared_difference;
use crate::raster::Raster;
use crate::twodmap::{wrapping_next, wrapping_prev};

// Fill `out`, which holds whole rows of the cost grid starting at
// `first_row`.
fn energy_rows(image: &Raster, first_row: u32, out: &mut [f64]) {
    let (width, height) = image.dimensions();
    for (dy, row) in out.chunks_mut(width as usize).enumerate() {
        let y = first_row + dy as u32;
        let (up, down) = (wrapping_prev(y, height), wrapping_next(y, height));
        for (x, cell) in (0..width).zip(row.iter_mut()) {
            let (left, right) = (wrapping_prev(x, width), wrapping_next(x, width));
            *cell = (squared_difference(&image[(left, y)], &image[(right, y)])
                + squared_difference(&image[(x, up)], &image[(x, down)]))
            .sqrt();
        }
    }
}

/// Compute the backward energy of every pixel of `image` into `cost`,
/// which must already have the image's dimensions.
#[cfg(not(feature = "threaded"))]
pub fn backward_energy(image: &Raster, cost: &mut CostGrid) {
    debug_assert_eq!(image.dimensions(), cost.dimensions());
    energy_rows(image, 0, &mut cost.data);
}

/// Compute the backward energy of every pixel of `image` into `cost`,
/// which must already have the image's dimensions.
#[cfg(feature = "threaded")]
pub fn backward_energy(image: &Raster, cost: &mut CostGrid) {
    debug_assert_eq!(image.dimensions(), cost.dimensions());
    let width = image.width() as usize;
    let bands = num_cpus::get().max(1);
    let rows_per_band = ((image.height() as usize + bands - 1) / bands).max(1);

    let result = crossbeam::scope(|scope| {
        for (band, out) in cost.data.chunks_mut(rows_per_band * width).enumerate() {
            let first_row = (band * rows_per_band) as u32;
            scope.spawn(move |_| energy_rows(image, first_row, out));
        }
    });
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
}
