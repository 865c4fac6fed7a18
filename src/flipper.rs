// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Image dimensional flipper
//!
//! Everything downstream only knows how to find and edit vertical
//! seams.  To carve rows instead of columns, the image is turned a
//! quarter counter-clockwise, carved, and turned back.  After the turn
//! each original column is a contiguous row in memory, which is what
//! the seam finder and the editor want.
//!
//! A strided transposing view would avoid the copies, but every seam
//! operation already costs a full pass over the image, so two more
//! per axis don't change the picture.

use crate::twodmap::TwoDimensionalMap;

/// A quarter turn counter-clockwise: the rightmost column becomes the
/// top row.
pub fn rotate_counterclockwise<P: Default + Copy>(
    map: &TwoDimensionalMap<P>,
) -> TwoDimensionalMap<P> {
    let (width, height) = map.dimensions();
    TwoDimensionalMap::from_fn(height, width, |x, y| map[(width - 1 - y, x)])
}

/// A quarter turn clockwise: the leftmost column becomes the top row,
/// read bottom to top.
pub fn rotate_clockwise<P: Default + Copy>(map: &TwoDimensionalMap<P>) -> TwoDimensionalMap<P> {
    let (width, height) = map.dimensions();
    TwoDimensionalMap::from_fn(height, width, |x, y| map[(y, height - 1 - x)])
}
