// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Find the cheapest seam through a cost grid.
//!
//! The classic dynamic program: walking down the grid, every cell adds
//! to itself the cheapest of the (up to) three cells above it, and
//! remembers which one that was.  The cheapest cell of the bottom row
//! is the end of the cheapest seam, and following the remembered
//! parents back up recovers the rest of it.
//!
//! Ties are always broken toward the smaller column index, so a given
//! image always yields the same seam.

use crate::cq;
use crate::energy::{calculate_energy_into, CostGrid, EnergyMode};
use crate::error::CarveError;
use crate::raster::Raster;
use crate::twodmap::TwoDimensionalMap;

/// For each cell, which of the three cells above it (-1, 0 or +1
/// columns away) the cheapest path arrived from.
pub type BacktrackGrid = TwoDimensionalMap<i8>;

/// `true` at exactly one pixel per row: the pixel to be removed.
pub type RemovalMask = TwoDimensionalMap<bool>;

/// A connected top-to-bottom path through an image, given as one column
/// index per row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(pub(crate) Vec<u32>);

impl Seam {
    pub fn columns(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// No step between adjacent rows moves more than one column.
    pub fn is_connected(&self) -> bool {
        self.0
            .windows(2)
            .all(|w| (i64::from(w[0]) - i64::from(w[1])).abs() <= 1)
    }

    /// The seam runs the full height of a `width` x `height` image
    /// without leaving it.
    pub fn fits(&self, width: u32, height: u32) -> bool {
        self.0.len() == height as usize && self.0.iter().all(|&x| x < width)
    }

    /// The mask selecting this seam's pixels out of an image `width`
    /// pixels wide.
    pub fn to_mask(&self, width: u32) -> RemovalMask {
        let mut mask = RemovalMask::new(width, self.0.len() as u32);
        for (y, &x) in self.0.iter().enumerate() {
            mask[(x, y as u32)] = true;
        }
        mask
    }
}

impl From<Vec<u32>> for Seam {
    fn from(columns: Vec<u32>) -> Self {
        Seam(columns)
    }
}

impl AsRef<[u32]> for Seam {
    fn as_ref(&self) -> &[u32] {
        &self.0
    }
}

// Turn `cost` into the cumulative cost of the cheapest path reaching
// each cell, recording the step taken into `backtrack`.
fn accumulate(cost: &mut CostGrid, backtrack: &mut BacktrackGrid) {
    let (width, height) = cost.dimensions();
    assert!(
        width > 0 && height > 0,
        "no seam runs through an empty {}x{} cost grid",
        width,
        height
    );
    backtrack.reshape(width, height);
    let maxwidth = width - 1;
    let stride = width as usize;

    for y in 1..height {
        let (done, rest) = cost.data.split_at_mut(y as usize * stride);
        let above = &done[done.len() - stride..];
        let row = &mut rest[..stride];
        let steps = backtrack.row_mut(y);

        for x in 0..width {
            let (first, last) = (cq!(x == 0, 0, x - 1), cq!(x == maxwidth, maxwidth, x + 1));
            let mut parent_x = first;
            for candidate in (first + 1)..=last {
                if above[candidate as usize] < above[parent_x as usize] {
                    parent_x = candidate;
                }
            }
            row[x as usize] += above[parent_x as usize];
            steps[x as usize] = (i64::from(parent_x) - i64::from(x)) as i8;
        }
    }
}

// Follow the backtrack grid up from the cheapest cell of the bottom row.
fn trace_seam(cumulative: &CostGrid, backtrack: &BacktrackGrid) -> (Seam, f64) {
    let (width, height) = cumulative.dimensions();
    let bottom = cumulative.row(height - 1);

    let mut seam_col = (1..width).fold(0, |best, x| {
        cq!(bottom[x as usize] < bottom[best as usize], x, best)
    });
    let total = bottom[seam_col as usize];

    let mut columns = vec![0; height as usize];
    for y in (0..height).rev() {
        columns[y as usize] = seam_col;
        if y > 0 {
            let step = backtrack[(seam_col, y)];
            assert!(
                (-1..=1).contains(&step),
                "backtrack step {} at ({}, {})",
                step,
                seam_col,
                y
            );
            seam_col = (i64::from(seam_col) + i64::from(step)) as u32;
        }
    }
    (Seam(columns), total)
}

/// Given a cost grid, return the cheapest seam through it and the mask
/// that removes it.  The grid is consumed; it becomes the cumulative
/// cost along the way.
///
/// # Panics
///
/// If the grid has no columns or no rows.
pub fn find_minimum_seam(mut cost: CostGrid) -> (Seam, RemovalMask) {
    let mut backtrack = BacktrackGrid::new(cost.width(), cost.height());
    accumulate(&mut cost, &mut backtrack);
    let (seam, _) = trace_seam(&cost, &backtrack);
    let mask = seam.to_mask(cost.width());
    (seam, mask)
}

/// This trait defines how the carver gets seams out of an image.  It's
/// a primitive interface, just enough to make room for multiple seam
/// strategies and for keeping scratch space between calls.
pub trait SeamFinder {
    /// Find the cheapest top-to-bottom seam through `image`.
    fn find_vertical_seam(&mut self, image: &Raster) -> Result<Seam, CarveError>;
}

/// The energy-map-and-dynamic-program seam finder.  The cost and
/// backtrack grids are kept between calls and reshaped as the image
/// shrinks or grows, rather than reallocated every seam.
#[derive(Debug)]
pub struct SeamSearch {
    mode: EnergyMode,
    cost: CostGrid,
    backtrack: BacktrackGrid,
}

impl SeamSearch {
    pub fn new(mode: EnergyMode) -> Self {
        SeamSearch {
            mode,
            cost: CostGrid::new(0, 0),
            backtrack: BacktrackGrid::new(0, 0),
        }
    }

    pub fn mode(&self) -> EnergyMode {
        self.mode
    }
}

impl SeamFinder for SeamSearch {
    fn find_vertical_seam(&mut self, image: &Raster) -> Result<Seam, CarveError> {
        calculate_energy_into(image, self.mode, &mut self.cost)?;
        accumulate(&mut self.cost, &mut self.backtrack);
        let (seam, total) = trace_seam(&self.cost, &self.backtrack);
        log::debug!(
            "seam ending at column {} costs {:.3}",
            seam.0[seam.len() - 1],
            total
        );
        debug_assert!(seam.fits(image.width(), image.height()) && seam.is_connected());
        Ok(seam)
    }
}
