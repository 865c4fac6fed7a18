// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Cutting seams out, and stitching them back in.
//!
//! Removal is the easy half: drop the flagged pixel from every row.
//!
//! Insertion has to decide *where* to add pixels, and the answer is
//! "where removal would have taken them".  Asking for the cheapest
//! seam `k` times on the same image would return the same seam `k`
//! times, so the seams are discovered by carving them out of a scratch
//! copy one after another.  Each of those seams is expressed in the
//! coordinates of an image that had already lost the earlier ones, so
//! as each is replayed into the full-size image, the seams still
//! waiting are pushed two columns right wherever they sit at or past
//! the one just inserted: one for the new column and one to keep the
//! next insertion clear of it.

use crate::cq;
use crate::error::CarveError;
use crate::raster::{Raster, Rgbf};
use crate::seamfinder::{RemovalMask, Seam, SeamFinder};
use crate::twodmap::TwoDimensionalMap;

/// Remove the flagged pixel from every row, shifting everything to its
/// right one column left.  The map comes back one column narrower.
///
/// # Panics
///
/// If the mask doesn't match the map's dimensions, or any row of the
/// mask doesn't flag exactly one pixel.
pub fn remove_seam<P: Default + Copy>(
    mut image: TwoDimensionalMap<P>,
    mask: &RemovalMask,
) -> TwoDimensionalMap<P> {
    assert_eq!(
        image.dimensions(),
        mask.dimensions(),
        "removal mask does not match the image"
    );
    for (y, row) in mask.rows().enumerate() {
        let flagged = row.iter().filter(|&&m| m).count();
        assert_eq!(flagged, 1, "removal mask flags {} pixels in row {}", flagged, y);
    }

    let mut flags = mask.as_slice().iter();
    image.data.retain(|_| !flags.next().copied().unwrap_or(false));
    image.width -= 1;
    image
}

#[inline]
fn average(p1: &Rgbf, p2: &Rgbf) -> Rgbf {
    [
        (p1[0] + p2[0]) / 2.0,
        (p1[1] + p2[1]) / 2.0,
        (p1[2] + p2[2]) / 2.0,
    ]
}

// Fill `out`, whole rows of the widened image starting at `first_row`.
//
// At seam column x > 0 the new pixel is the average of x-1 and x, and
// lands at x.  At column 0 there is nothing to the left, so the new
// pixel averages 0 and 1 and lands between them.
fn insert_rows(image: &Raster, seam: &[u32], first_row: u32, out: &mut [Rgbf]) {
    let width = image.width() as usize;
    for (dy, dest) in out.chunks_mut(width + 1).enumerate() {
        let y = first_row + dy as u32;
        let row = image.row(y);
        let x = seam[y as usize] as usize;

        let (split, fill) = cq!(
            x == 0,
            (1, average(&row[0], &row[cq!(width > 1, 1, 0)])),
            (x, average(&row[x - 1], &row[x]))
        );
        dest[..split].copy_from_slice(&row[..split]);
        dest[split] = fill;
        dest[split + 1..].copy_from_slice(&row[split..]);
    }
}

fn widened(image: &Raster, seam: &Seam) -> Raster {
    let (width, height) = image.dimensions();
    assert!(
        seam.fits(width, height),
        "seam {:?} does not fit a {}x{} image",
        seam.columns(),
        width,
        height
    );
    Raster::new(width + 1, height)
}

/// Insert a seam, widening the image by one column.  Every original
/// pixel survives; the new ones are interpolated.
#[cfg(not(feature = "threaded"))]
pub fn add_seam(image: &Raster, seam: &Seam) -> Raster {
    let mut output = widened(image, seam);
    insert_rows(image, seam.columns(), 0, &mut output.data);
    output
}

/// Insert a seam, widening the image by one column.  Every original
/// pixel survives; the new ones are interpolated.
#[cfg(feature = "threaded")]
pub fn add_seam(image: &Raster, seam: &Seam) -> Raster {
    let mut output = widened(image, seam);
    let stride = output.width() as usize;
    let bands = num_cpus::get().max(1);
    let rows_per_band = ((image.height() as usize + bands - 1) / bands).max(1);
    let columns = seam.columns();

    let result = crossbeam::scope(|scope| {
        for (band, out) in output.data.chunks_mut(rows_per_band * stride).enumerate() {
            let first_row = (band * rows_per_band) as u32;
            scope.spawn(move |_| insert_rows(image, columns, first_row, out));
        }
    });
    if let Err(panic) = result {
        std::panic::resume_unwind(panic);
    }
    output
}

/// Seams recorded against a shrinking copy of an image, waiting to be
/// replayed into the original.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SeamBatch {
    seams: Vec<Seam>,
}

impl SeamBatch {
    pub fn new() -> Self {
        SeamBatch::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        SeamBatch {
            seams: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, seam: Seam) {
        self.seams.push(seam)
    }

    pub fn pop(&mut self) -> Option<Seam> {
        self.seams.pop()
    }

    pub fn reverse(&mut self) {
        self.seams.reverse()
    }

    pub fn len(&self) -> usize {
        self.seams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seams.is_empty()
    }

    pub fn seams(&self) -> &[Seam] {
        &self.seams
    }

    /// `inserted` has just gone into the image.  Row by row, every
    /// waiting seam at or right of it moves two columns right.
    pub fn shift_past(&mut self, inserted: &Seam) {
        for seam in &mut self.seams {
            assert_eq!(seam.len(), inserted.len(), "seams of different heights");
            for (col, &at) in seam.0.iter_mut().zip(inserted.columns()) {
                if *col >= at {
                    *col += 2;
                }
            }
        }
    }
}

impl From<Vec<Seam>> for SeamBatch {
    fn from(seams: Vec<Seam>) -> Self {
        SeamBatch { seams }
    }
}

/// Find the `count` seams an insertion should widen, by carving them
/// one after another out of a copy of `image`.  `image` itself is never
/// touched, so a failure part way through leaves nothing to undo.
pub fn discover_seams<F, T>(
    image: &Raster,
    count: u32,
    finder: &mut F,
    mut tick: T,
) -> Result<SeamBatch, CarveError>
where
    F: SeamFinder + ?Sized,
    T: FnMut(),
{
    let mut working = image.clone();
    let mut batch = SeamBatch::with_capacity(count as usize);
    for _ in 0..count {
        let seam = finder.find_vertical_seam(&working)?;
        let mask = seam.to_mask(working.width());
        working = remove_seam(working, &mask);
        batch.push(seam);
        tick();
    }
    Ok(batch)
}

/// Insert a discovered batch into the image it was discovered from, in
/// the order the seams were found, correcting the coordinates of the
/// seams still waiting after each insertion.
pub fn replay_seams<T>(mut image: Raster, mut batch: SeamBatch, mut tick: T) -> Raster
where
    T: FnMut(),
{
    batch.reverse();
    while let Some(seam) = batch.pop() {
        image = add_seam(&image, &seam);
        batch.shift_past(&seam);
        tick();
    }
    image
}

/// Widen `image` by `count` seams.
pub fn insert_seams<F>(image: Raster, count: u32, finder: &mut F) -> Result<Raster, CarveError>
where
    F: SeamFinder + ?Sized,
{
    let batch = discover_seams(&image, count, finder, || ())?;
    Ok(replay_seams(image, batch, || ()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyMode;
    use crate::seamfinder::SeamSearch;

    // One grey level per column, the same in every row.
    fn columns(levels: &[f64], height: u32) -> Raster {
        TwoDimensionalMap::from_fn(levels.len() as u32, height, |x, _| {
            let v = levels[x as usize];
            [v, v, v]
        })
    }

    fn first_channel(row: &[Rgbf]) -> Vec<f64> {
        row.iter().map(|p| p[0]).collect()
    }

    #[test]
    fn removal_drops_one_pixel_per_row() {
        let image: TwoDimensionalMap<u32> = TwoDimensionalMap::from_fn(4, 3, |x, y| 10 * y + x);
        let mask = Seam::from(vec![0, 1, 3]).to_mask(4);
        let carved = remove_seam(image, &mask);
        assert_eq!(carved.dimensions(), (3, 3));
        assert_eq!(carved.row(0), &[1, 2, 3]);
        assert_eq!(carved.row(1), &[10, 12, 13]);
        assert_eq!(carved.row(2), &[20, 21, 22]);
    }

    #[test]
    #[should_panic]
    fn removal_rejects_a_mask_with_two_flags_in_a_row() {
        let image: TwoDimensionalMap<u8> = TwoDimensionalMap::new(3, 2);
        let mut mask = Seam::from(vec![0, 0]).to_mask(3);
        mask[(2, 1)] = true;
        remove_seam(image, &mask);
    }

    #[test]
    fn insertion_averages_the_left_neighbour() {
        let image = columns(&[0.0, 10.0, 20.0, 30.0], 2);
        let wider = add_seam(&image, &Seam::from(vec![2, 3]));
        assert_eq!(wider.dimensions(), (5, 2));
        assert_eq!(first_channel(wider.row(0)), [0.0, 10.0, 15.0, 20.0, 30.0]);
        assert_eq!(first_channel(wider.row(1)), [0.0, 10.0, 20.0, 25.0, 30.0]);
    }

    #[test]
    fn insertion_at_the_left_edge_keeps_column_zero_first() {
        let image = columns(&[0.0, 10.0, 20.0], 1);
        let wider = add_seam(&image, &Seam::from(vec![0]));
        assert_eq!(first_channel(wider.row(0)), [0.0, 5.0, 10.0, 20.0]);
    }

    #[test]
    #[should_panic]
    fn insertion_rejects_a_seam_outside_the_image() {
        let image = columns(&[0.0, 10.0], 2);
        add_seam(&image, &Seam::from(vec![0, 2]));
    }

    #[test]
    fn waiting_seams_shift_two_past_an_insertion() {
        let mut batch = SeamBatch::from(vec![
            Seam::from(vec![1, 2, 3]),
            Seam::from(vec![4, 4, 3]),
        ]);
        batch.shift_past(&Seam::from(vec![2, 2, 2]));
        assert_eq!(batch.seams()[0].columns(), &[1, 4, 5]);
        assert_eq!(batch.seams()[1].columns(), &[6, 6, 5]);
    }

    #[test]
    fn adjacent_seams_do_not_collide_on_replay() {
        // Found one after the other: column 2, then column 2 of the
        // narrower image, which was column 3 of the original.
        let image = columns(&[0.0, 10.0, 20.0, 30.0, 40.0], 3);
        let batch = SeamBatch::from(vec![
            Seam::from(vec![2, 2, 2]),
            Seam::from(vec![2, 2, 2]),
        ]);
        let mut ticks = 0;
        let wider = replay_seams(image, batch, || ticks += 1);
        assert_eq!(ticks, 2);
        for row in wider.rows() {
            assert_eq!(
                first_channel(row),
                [0.0, 10.0, 15.0, 20.0, 25.0, 30.0, 40.0]
            );
        }
    }

    #[test]
    fn discovery_leaves_the_image_alone() {
        let image = columns(&[0.0, 90.0, 0.0, 0.0, 90.0, 0.0], 4);
        let before = image.clone();
        let mut search = SeamSearch::new(EnergyMode::Backward);
        let mut ticks = 0;
        let batch = discover_seams(&image, 3, &mut search, || ticks += 1).unwrap();
        assert_eq!(image, before);
        assert_eq!(batch.len(), 3);
        assert_eq!(ticks, 3);
        for (i, seam) in batch.seams().iter().enumerate() {
            assert!(seam.fits(6 - i as u32, 4));
        }
    }

    #[test]
    fn discovery_that_runs_out_of_image_fails() {
        let image = columns(&[0.0, 1.0, 2.0], 2);
        let mut search = SeamSearch::new(EnergyMode::Forward);
        assert_eq!(
            discover_seams(&image, 3, &mut search, || ()),
            Err(CarveError::TooSmall {
                width: 1,
                height: 2
            })
        );
    }

    #[test]
    fn insertion_keeps_every_original_column() {
        let levels = [12.0, 200.0, 7.0, 99.0, 150.0];
        let image = columns(&levels, 3);
        let mut search = SeamSearch::new(EnergyMode::Backward);
        let wider = insert_seams(image, 2, &mut search).unwrap();
        assert_eq!(wider.dimensions(), (7, 3));
        for row in wider.rows() {
            let row = first_channel(row);
            let mut originals = row.iter().filter(|v| levels.contains(v));
            for level in &levels {
                assert_eq!(originals.next(), Some(level));
            }
        }
    }
}
