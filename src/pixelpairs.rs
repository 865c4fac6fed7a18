// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a pixel pair
//!
//! Given two pixels, the energy between them is the relative distance
//! between the colors that make them up.  Backward energy uses the
//! classic d(R²) + d(G²) + d(B²); forward energy converts to
//! grayscale first and uses |d(L)|.

use crate::raster::Rgbf;

/// Sum of the squared per-channel differences:
///
/// ```text
/// |Δ|² = (Δr)²+(Δg)²+(Δb)²
/// ```
#[inline]
pub fn squared_difference(p1: &Rgbf, p2: &Rgbf) -> f64 {
    p1.iter()
        .zip(p2.iter())
        .map(|(c1, c2)| (c1 - c2) * (c1 - c2))
        .sum()
}

/// ITU-R BT.601 luma, from channels truncated to 8 bits.  The weights
/// are the usual 14-bit fixed-point ones (0.299, 0.587, 0.114 scaled by
/// 2^14), rounded half up, so the levels agree with common 8-bit
/// grayscale conversions even where the floating-point sum lands on a
/// half.
#[inline]
pub fn luma(p: &Rgbf) -> f64 {
    #[inline]
    fn level(c: f64) -> u32 {
        c.max(0.0).min(255.0) as u32
    }

    let weighted = level(p[0]) * 4899 + level(p[1]) * 9617 + level(p[2]) * 1868;
    f64::from((weighted + 8192) >> 14)
}

#[inline]
pub fn luma_difference(l1: f64, l2: f64) -> f64 {
    (l1 - l2).abs()
}
