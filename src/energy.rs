// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of an image
//!
//! Given a raster, calculate a cost grid: one number per pixel saying
//! how much the picture would suffer if that pixel went away.  Two
//! models are available; see `avisha1` for backward energy and
//! `avisha2` for forward energy.

use crate::avisha1::backward_energy;
use crate::avisha2::forward_energy;
use crate::error::CarveError;
use crate::raster::Raster;
use crate::twodmap::TwoDimensionalMap;
use failure::Fail;
use std::fmt;
use std::str::FromStr;

/// Per-pixel energy.
pub type CostGrid = TwoDimensionalMap<f64>;

/// Which energy model drives the seam search.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnergyMode {
    /// Local gradient magnitude.  Cheap.
    Backward,
    /// Contrast introduced by removal.  One more pass over the image,
    /// noticeably better results.
    Forward,
}

impl Default for EnergyMode {
    fn default() -> Self {
        EnergyMode::Forward
    }
}

impl fmt::Display for EnergyMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            EnergyMode::Backward => "backward",
            EnergyMode::Forward => "forward",
        })
    }
}

#[derive(Debug, Fail, Clone, PartialEq, Eq)]
#[fail(
    display = "unknown energy mode {:?}; expected \"forward\" or \"backward\"",
    _0
)]
pub struct ParseEnergyModeError(String);

impl FromStr for EnergyMode {
    type Err = ParseEnergyModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "backward" => Ok(EnergyMode::Backward),
            "forward" => Ok(EnergyMode::Forward),
            _ => Err(ParseEnergyModeError(s.to_string())),
        }
    }
}

/// Neither energy model means anything on an image a single pixel
/// wide or tall.
pub(crate) fn check_carvable<P: Default + Copy>(
    map: &TwoDimensionalMap<P>,
) -> Result<(), CarveError> {
    let (width, height) = map.dimensions();
    if width < 2 || height < 2 {
        return Err(CarveError::TooSmall { width, height });
    }
    Ok(())
}

/// Compute the energy of every pixel in `image` into `cost`, reshaping
/// `cost` to fit.
pub fn calculate_energy_into(
    image: &Raster,
    mode: EnergyMode,
    cost: &mut CostGrid,
) -> Result<(), CarveError> {
    check_carvable(image)?;
    let (width, height) = image.dimensions();
    if cost.dimensions() != (width, height) {
        log::trace!(
            "reshaping cost grid {:?} -> {:?}",
            cost.dimensions(),
            (width, height)
        );
        cost.reshape(width, height);
    }
    match mode {
        EnergyMode::Backward => backward_energy(image, cost),
        EnergyMode::Forward => forward_energy(image, cost),
    }
    Ok(())
}

/// Compute the energy of every pixel in `image`.
pub fn calculate_energy(image: &Raster, mode: EnergyMode) -> Result<CostGrid, CarveError> {
    let mut cost = CostGrid::new(image.width(), image.height());
    calculate_energy_into(image, mode, &mut cost)?;
    Ok(cost)
}
