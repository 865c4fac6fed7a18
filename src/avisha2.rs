// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image using the Rubinstein, Shamir &
//! Avidan "forward energy" algorithm.
//!
//! Backward energy asks how busy a pixel is.  Forward energy asks how
//! much new contrast would appear if the pixel were removed and its
//! neighbours were pushed together.  Working in luma, with every
//! neighbour lookup wrapping around the image edges:
//!
//! ```text
//! CU(x,y) = D[(x−1,y),(x+1,y)]
//! CL(x,y) = D[(x,y−1),(x−1,y)] + CU(x,y)
//! CR(x,y) = D[(x,y−1),(x+1,y)] + CU(x,y)
//! ```
//!
//! Row by row, the cheapest way into each pixel is then:
//!
//! ```text
//!           ⎧ M(x,y−1)+CU(x,y)
//! M(x,y)=min⎨ M(x−1,y−1)+CL(x,y)
//!           ⎩ M(x+1,y−1)+CR(x,y)
//! ```
//!
//! The energy recorded for the pixel is the C term of whichever branch
//! won, not M itself; the seam finder does its own accumulation.  On
//! ties the branches are preferred in the order shown.
//!
//! The top row has nothing above it and takes CU as both its energy
//! and its M.  Formulations that start the top row at zero leave it
//! blind to content, and produce different seams from these on most
//! images: the first row's CU feeds every M below it.

use crate::cq;
use crate::energy::CostGrid;
use crate::pixelpairs::{luma, luma_difference};
use crate::raster::Raster;
use crate::twodmap::{wrapping_next, wrapping_prev, TwoDimensionalMap};

/// The three removal costs of a single pixel.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
struct RemovalCosts {
    up: f64,
    left: f64,
    right: f64,
}

fn removal_costs(lumas: &TwoDimensionalMap<f64>, (x, y): (u32, u32)) -> RemovalCosts {
    let (width, height) = lumas.dimensions();
    let (left, right) = (
        lumas[(wrapping_prev(x, width), y)],
        lumas[(wrapping_next(x, width), y)],
    );
    let above = lumas[(x, wrapping_prev(y, height))];

    let up = luma_difference(right, left);
    RemovalCosts {
        up,
        left: luma_difference(above, left) + up,
        right: luma_difference(above, right) + up,
    }
}

/// Compute the forward energy of every pixel of `image` into `cost`,
/// which must already have the image's dimensions.
pub fn forward_energy(image: &Raster, cost: &mut CostGrid) {
    debug_assert_eq!(image.dimensions(), cost.dimensions());
    let (width, height) = image.dimensions();

    let lumas: TwoDimensionalMap<f64> =
        TwoDimensionalMap::from_fn(width, height, |x, y| luma(&image[(x, y)]));

    let mut above: Vec<f64> = Vec::with_capacity(width as usize);
    for x in 0..width {
        let costs = removal_costs(&lumas, (x, 0));
        cost[(x, 0)] = costs.up;
        above.push(costs.up);
    }

    let mut current = vec![0.0; width as usize];
    for y in 1..height {
        for x in 0..width {
            let costs = removal_costs(&lumas, (x, y));
            let candidates = [
                (above[x as usize] + costs.up, costs.up),
                (above[wrapping_prev(x, width) as usize] + costs.left, costs.left),
                (above[wrapping_next(x, width) as usize] + costs.right, costs.right),
            ];
            let (total, energy) = candidates[1..]
                .iter()
                .fold(candidates[0], |best, &c| cq!(c.0 < best.0, c, best));
            current[x as usize] = total;
            cost[(x, y)] = energy;
        }
        std::mem::swap(&mut above, &mut current);
    }
}
