// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main function
//!
//! The carver works one axis at a time: first the width, then the
//! height.  Both axes use the same vertical-seam machinery; for the
//! height the image is turned a quarter, carved, and turned back.
//! Shrinking an axis removes its seams one by one.  Growing it finds
//! all the seams first on a scratch copy, then stitches them in.

use crate::cq;
use crate::error::CarveError;
use crate::energy::EnergyMode;
use crate::flipper::{rotate_clockwise, rotate_counterclockwise};
use crate::raster::Raster;
use crate::seameditor::{discover_seams, remove_seam, replay_seams};
use crate::seamfinder::{SeamFinder, SeamSearch};
use image::{GenericImageView, Pixel, Primitive, RgbImage};
use std::cmp::Ordering;
use std::fmt;

/// Which dimension of the image is being carved.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Carve {
    Width,
    Height,
}

impl fmt::Display for Carve {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(cq!(*self == Carve::Width, "width", "height"))
    }
}

/// What the carver is doing with the current seam.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Stage {
    /// Cutting a seam out of the image.
    Removing,
    /// Cutting a seam out of a scratch copy, to learn where to insert.
    Finding,
    /// Stitching a found seam into the image.
    Inserting,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Stage::Removing => "removing",
            Stage::Finding => "finding",
            Stage::Inserting => "inserting",
        })
    }
}

/// Reported after every seam operation.  `completed` goes up by one
/// each time and finishes equal to `total`.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Progress {
    pub axis: Carve,
    pub stage: Stage,
    pub completed: u64,
    pub total: u64,
}

/// A resize request.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct CarveOptions {
    pub width: u32,
    pub height: u32,
    pub energy: EnergyMode,
}

impl CarveOptions {
    /// Resize to `width` x `height` with the default (forward) energy.
    pub fn new(width: u32, height: u32) -> Self {
        CarveOptions {
            width,
            height,
            energy: EnergyMode::default(),
        }
    }

    pub fn energy(mut self, energy: EnergyMode) -> Self {
        self.energy = energy;
        self
    }
}

/// How many seams each axis gains (positive) or loses (negative).
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct CarvePlan {
    pub dx: i64,
    pub dy: i64,
}

// Check one axis of a plan.  `size` is the extent being carved, and
// `(width, height)` the image it is carved from, which must be at
// least two pixels on both sides for energy to mean anything.
fn check_axis(
    axis: Carve,
    size: u32,
    delta: i64,
    (width, height): (u32, u32),
) -> Result<(), CarveError> {
    if delta == 0 {
        return Ok(());
    }
    if width < 2 || height < 2 {
        return Err(CarveError::TooSmall { width, height });
    }
    // Every seam, removed or found for insertion, leaves at least one
    // column behind, and the last one is found on an image at least
    // two wide.
    let available = size - 1;
    let requested = delta.abs();
    if requested > i64::from(available) {
        let requested = requested.min(i64::from(u32::max_value())) as u32;
        return Err(cq!(
            delta < 0,
            CarveError::TooManyRemovals {
                axis,
                requested,
                available
            },
            CarveError::TooManyInsertions {
                axis,
                requested,
                available
            }
        ));
    }
    Ok(())
}

impl CarvePlan {
    /// Plan the carve of a `width` x `height` image by `dx` columns and
    /// `dy` rows.
    pub fn from_deltas(width: u32, height: u32, dx: i64, dy: i64) -> Result<Self, CarveError> {
        check_axis(Carve::Width, width, dx, (width, height))?;
        let carved_width = (i64::from(width) + dx) as u32;
        check_axis(Carve::Height, height, dy, (carved_width, height))?;
        Ok(CarvePlan { dx, dy })
    }

    /// Plan the carve of a `width` x `height` image to the `target`
    /// dimensions.
    pub fn new((width, height): (u32, u32), target: (u32, u32)) -> Result<Self, CarveError> {
        if target.0 == 0 || target.1 == 0 {
            return Err(CarveError::EmptyTarget {
                width: target.0,
                height: target.1,
            });
        }
        CarvePlan::from_deltas(
            width,
            height,
            i64::from(target.0) - i64::from(width),
            i64::from(target.1) - i64::from(height),
        )
    }

    /// Removing a seam is one step.  Inserting one is two: finding it,
    /// then stitching it in.
    pub fn total_steps(&self) -> u64 {
        fn steps(delta: i64) -> u64 {
            cq!(delta < 0, delta.abs() as u64, 2 * delta as u64)
        }
        steps(self.dx) + steps(self.dy)
    }
}

struct Tracker<'o, 'a> {
    completed: u64,
    total: u64,
    observer: &'o mut Option<Box<dyn FnMut(&Progress) + 'a>>,
}

impl<'o, 'a> Tracker<'o, 'a> {
    fn tick(&mut self, axis: Carve, stage: Stage) {
        self.completed += 1;
        debug_assert!(self.completed <= self.total);
        if let Some(observer) = self.observer.as_mut() {
            observer(&Progress {
                axis,
                stage,
                completed: self.completed,
                total: self.total,
            });
        }
    }
}

// Carve `delta` vertical seams out of (or into) `image`.
fn carve_axis<F>(
    mut image: Raster,
    axis: Carve,
    delta: i64,
    finder: &mut F,
    tracker: &mut Tracker,
) -> Result<Raster, CarveError>
where
    F: SeamFinder + ?Sized,
{
    match delta.cmp(&0) {
        Ordering::Less => {
            log::info!("removing {} seams from the {}", -delta, axis);
            for _ in 0..-delta {
                let seam = finder.find_vertical_seam(&image)?;
                let mask = seam.to_mask(image.width());
                image = remove_seam(image, &mask);
                tracker.tick(axis, Stage::Removing);
            }
        }
        Ordering::Greater => {
            log::info!("inserting {} seams into the {}", delta, axis);
            let batch = discover_seams(&image, delta as u32, finder, || {
                tracker.tick(axis, Stage::Finding)
            })?;
            image = replay_seams(image, batch, || tracker.tick(axis, Stage::Inserting));
        }
        Ordering::Equal => {}
    }
    Ok(image)
}

/// A carve request, with an optional progress observer.
pub struct SeamCarver<'a> {
    options: CarveOptions,
    observer: Option<Box<dyn FnMut(&Progress) + 'a>>,
}

impl<'a> SeamCarver<'a> {
    pub fn new(options: CarveOptions) -> Self {
        SeamCarver {
            options,
            observer: None,
        }
    }

    /// Call `observer` after every seam is removed, found, or inserted.
    pub fn on_progress<F>(mut self, observer: F) -> Self
    where
        F: FnMut(&Progress) + 'a,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn options(&self) -> &CarveOptions {
        &self.options
    }

    /// Carve `image` to the requested size.  The request is checked in
    /// full before any seam is touched.
    pub fn carve(&mut self, image: Raster) -> Result<Raster, CarveError> {
        let (width, height) = image.dimensions();
        let plan = CarvePlan::new((width, height), (self.options.width, self.options.height))?;
        log::info!(
            "carving {}x{} to {}x{} with {} energy ({} steps)",
            width,
            height,
            self.options.width,
            self.options.height,
            self.options.energy,
            plan.total_steps()
        );

        let mut finder = SeamSearch::new(self.options.energy);
        let mut tracker = Tracker {
            completed: 0,
            total: plan.total_steps(),
            observer: &mut self.observer,
        };

        let mut image = carve_axis(image, Carve::Width, plan.dx, &mut finder, &mut tracker)?;
        if plan.dy != 0 {
            let turned = rotate_counterclockwise(&image);
            let carved = carve_axis(turned, Carve::Height, plan.dy, &mut finder, &mut tracker)?;
            image = rotate_clockwise(&carved);
        }
        debug_assert_eq!(image.dimensions(), (self.options.width, self.options.height));
        Ok(image)
    }
}

/// Carve `image` to `width` x `height`.
pub fn resize(
    image: Raster,
    width: u32,
    height: u32,
    energy: EnergyMode,
) -> Result<Raster, CarveError> {
    SeamCarver::new(CarveOptions::new(width, height).energy(energy)).carve(image)
}

/// Carve any image to `width` x `height`, returning 8-bit RGB.  The
/// source image is copied, never modified.
pub fn seamcarve<I, P, S>(
    image: &I,
    width: u32,
    height: u32,
    energy: EnergyMode,
) -> Result<RgbImage, CarveError>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    resize(Raster::from_image(image), width, height, energy).map(|r| r.to_rgb_image())
}
