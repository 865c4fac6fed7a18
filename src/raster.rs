// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The working raster
//!
//! Seams inserted into an image are averages of their neighbours, and
//! later seams are averaged against earlier ones.  To keep from
//! compounding rounding error the carver works in `f64` throughout
//! and only returns to 8-bit channels at the very end.

use crate::twodmap::TwoDimensionalMap;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgb, RgbImage};
use num_traits::NumCast;

/// Red, green, blue.
pub type Rgbf = [f64; 3];

/// An image in the middle of being carved.
pub type Raster = TwoDimensionalMap<Rgbf>;

impl TwoDimensionalMap<Rgbf> {
    /// Copy any image into a raster.  The subpixels are taken at face
    /// value, so this expects 8-bit channels.
    pub fn from_image<I, P, S>(image: &I) -> Self
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
    {
        #[inline]
        fn channel<S: Primitive>(c: S) -> f64 {
            <f64 as NumCast>::from(c).unwrap_or(0.0)
        }

        let (width, height) = image.dimensions();
        TwoDimensionalMap::from_fn(width, height, |x, y| {
            let rgb = image.get_pixel(x, y).to_rgb();
            let c = rgb.channels();
            [channel(c[0]), channel(c[1]), channel(c[2])]
        })
    }

    /// Back to 8 bits per channel.  Fractional values are truncated,
    /// and anything outside 0..=255 is clamped.
    pub fn to_rgb_image(&self) -> RgbImage {
        #[inline]
        fn channel(c: f64) -> u8 {
            c.max(0.0).min(255.0) as u8
        }

        ImageBuffer::from_fn(self.width, self.height, |x, y| {
            let p = self[(x, y)];
            Rgb([channel(p[0]), channel(p[1]), channel(p[2])])
        })
    }
}
