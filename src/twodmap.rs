// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Two-dimensional maps
//!
//! Every intermediate product of the carver (the working raster, the
//! cost grid, the backtrack grid, the removal mask) is a rectangle of
//! some `Copy` value.  They all share this one row-major container so
//! that the index math lives in exactly one place.

use crate::cq;
use itertools::iproduct;
use std::ops::{Index, IndexMut};
use std::slice::{Chunks, ChunksMut};

/// An addressable two-dimensional field of `P`, stored contiguously,
/// one row after another.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoDimensionalMap<P: Default + Copy> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) data: Vec<P>,
}

impl<P: Default + Copy> TwoDimensionalMap<P> {
    /// A new map, every cell holding `P::default()`.
    pub fn new(width: u32, height: u32) -> Self {
        TwoDimensionalMap {
            width,
            height,
            data: vec![P::default(); width as usize * height as usize],
        }
    }

    /// Wrap an existing row-major buffer.  Returns `None` if the buffer
    /// is not exactly `width * height` long.
    pub fn from_raw(width: u32, height: u32, data: Vec<P>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(TwoDimensionalMap {
            width,
            height,
            data,
        })
    }

    /// Build a map by calling `f(x, y)` for every cell.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> P,
    {
        TwoDimensionalMap {
            width,
            height,
            data: iproduct!(0..height, 0..width)
                .map(|(y, x)| f(x, y))
                .collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside a {}x{} map",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * (self.width as usize) + (x as usize)
    }

    fn row_range(&self, y: u32) -> std::ops::Range<usize> {
        let start = self.get_index(0, y);
        start..start + self.width as usize
    }

    /// One row as a slice.
    pub fn row(&self, y: u32) -> &[P] {
        let range = self.row_range(y);
        &self.data[range]
    }

    /// One row as a mutable slice.
    pub fn row_mut(&mut self, y: u32) -> &mut [P] {
        let range = self.row_range(y);
        &mut self.data[range]
    }

    /// Iterate over the rows, top to bottom.
    pub fn rows(&self) -> Chunks<P> {
        self.data.chunks(self.width.max(1) as usize)
    }

    pub fn rows_mut(&mut self) -> ChunksMut<P> {
        self.data.chunks_mut(self.width.max(1) as usize)
    }

    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<P> {
        self.data
    }

    /// Change the dimensions of the map, keeping the allocation.  The
    /// contents afterward are unspecified; this exists so that scratch
    /// grids can be reused as the image shrinks or grows.
    pub fn reshape(&mut self, width: u32, height: u32) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.data
            .resize(width as usize * height as usize, P::default());
        self.width = width;
        self.height = height;
    }
}

impl<P: Default + Copy> Index<(u32, u32)> for TwoDimensionalMap<P> {
    type Output = P;

    /// A convenience addressing mode for getting values.
    fn index(&self, (x, y): (u32, u32)) -> &P {
        let index = self.get_index(x, y);
        &self.data[index]
    }
}

impl<P: Default + Copy> IndexMut<(u32, u32)> for TwoDimensionalMap<P> {
    /// A convenience addressing mode for setting values.
    fn index_mut(&mut self, (x, y): (u32, u32)) -> &mut P {
        let index = self.get_index(x, y);
        &mut self.data[index]
    }
}

/// The index one step before `i` on a ring of `len` cells.
#[inline]
pub(crate) fn wrapping_prev(i: u32, len: u32) -> u32 {
    cq!(i == 0, len - 1, i - 1)
}

/// The index one step after `i` on a ring of `len` cells.
#[inline]
pub(crate) fn wrapping_next(i: u32, len: u32) -> u32 {
    cq!(i + 1 >= len, 0, i + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addressing_is_row_major() {
        let map = TwoDimensionalMap::from_fn(3, 2, |x, y| x + 10 * y);
        assert_eq!(map.as_slice(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(map[(2, 1)], 12);
        assert_eq!(map.row(1), &[10, 11, 12]);
        assert_eq!(map.rows().count(), 2);
    }

    #[test]
    fn from_raw_checks_length() {
        assert!(TwoDimensionalMap::from_raw(2, 2, vec![0u8; 3]).is_none());
        assert!(TwoDimensionalMap::from_raw(2, 2, vec![0u8; 4]).is_some());
    }

    #[test]
    fn reshape_keeps_the_map_consistent() {
        let mut map: TwoDimensionalMap<f64> = TwoDimensionalMap::new(4, 3);
        map.reshape(3, 3);
        assert_eq!(map.dimensions(), (3, 3));
        assert_eq!(map.as_slice().len(), 9);
        map[(2, 2)] = 1.0;
        assert_eq!(map.row(2)[2], 1.0);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_panics() {
        let map: TwoDimensionalMap<u8> = TwoDimensionalMap::new(2, 2);
        let _ = map[(2, 0)];
    }

    #[test]
    fn ring_neighbours_wrap() {
        assert_eq!(wrapping_prev(0, 5), 4);
        assert_eq!(wrapping_prev(3, 5), 2);
        assert_eq!(wrapping_next(4, 5), 0);
        assert_eq!(wrapping_next(1, 5), 2);
    }
}
