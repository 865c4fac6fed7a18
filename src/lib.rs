// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Content-aware image resizing.
//!
//! Rather than scaling or cropping, seam carving removes (or adds)
//! connected top-to-bottom paths of the least interesting pixels, one
//! at a time, until the image is the requested size.

// #![deny(missing_docs)]

extern crate image;

pub mod ternary;

pub mod twodmap;
pub use twodmap::TwoDimensionalMap;

pub mod raster;
pub use raster::{Raster, Rgbf};

pub mod pixelpairs;
pub mod avisha1;
pub mod avisha2;

pub mod energy;
pub use energy::{calculate_energy, CostGrid, EnergyMode};

pub mod seamfinder;
pub use seamfinder::{find_minimum_seam, RemovalMask, Seam, SeamFinder, SeamSearch};

pub mod seameditor;
pub use seameditor::{add_seam, insert_seams, remove_seam, SeamBatch};

pub mod flipper;

pub mod seamcarver;
pub use seamcarver::{resize, seamcarve, CarveOptions, Progress, SeamCarver};

pub mod dump;
pub use dump::energy_to_image;

pub mod error;
pub use error::CarveError;
