// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Render an energy map as a greyscale image, brightest where the
//! energy is highest.  Handy for seeing what the carver sees.

use crate::cq;
use crate::energy::CostGrid;
use image::{GrayImage, ImageBuffer, Luma};

pub fn energy_to_image(energy: &CostGrid) -> GrayImage {
    let factor = energy.as_slice().iter().cloned().fold(0.0, f64::max);
    ImageBuffer::from_fn(energy.width(), energy.height(), |x, y| {
        let level = cq!(factor > 0.0, energy[(x, y)] * 255.0 / factor, 0.0);
        Luma([level.max(0.0).min(255.0).round() as u8])
    })
}
