// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

extern crate clap;
extern crate image;

use clap::{value_t, App, Arg};
use failure::{Error, ResultExt};
use seamcarve::{calculate_energy, energy_to_image, CarveOptions, EnergyMode, Raster, SeamCarver};
use std::path::{Path, PathBuf};
use std::process;

// {parent}/{stem}_carved_{width}x{height}{suffix}
fn default_output(input: &Path, width: u32, height: u32) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = input
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    input.with_file_name(format!("{}_carved_{}x{}{}", stem, width, height, suffix))
}

fn run() -> Result<(), Error> {
    let matches = App::new("seamcarve")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Resize an image with seam carving")
        .arg(
            Arg::with_name("input")
                .help("The image to resize")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::with_name("width")
                .help("Target width in pixels")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::with_name("height")
                .help("Target height in pixels")
                .required(true)
                .index(3),
        )
        .arg(
            Arg::with_name("output")
                .help("Where to write the result [default: <input>_carved_<width>x<height>]")
                .short("o")
                .long("output")
                .value_name("FILE")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("energy")
                .help("Energy function used to rank seams")
                .short("e")
                .long("energy")
                .possible_values(&["forward", "backward"])
                .default_value("forward"),
        )
        .arg(
            Arg::with_name("dump-energy")
                .help("Also write the input's energy map as a greyscale image")
                .long("dump-energy")
                .value_name("FILE")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("quiet")
                .help("Don't report progress")
                .short("q")
                .long("quiet"),
        )
        .get_matches();

    let input = value_t!(matches, "input", PathBuf).unwrap_or_else(|e| e.exit());
    let width = value_t!(matches, "width", u32).unwrap_or_else(|e| e.exit());
    let height = value_t!(matches, "height", u32).unwrap_or_else(|e| e.exit());
    let energy = value_t!(matches, "energy", EnergyMode).unwrap_or_else(|e| e.exit());
    let output = matches
        .value_of("output")
        .map(PathBuf::from)
        .unwrap_or_else(|| default_output(&input, width, height));
    let quiet = matches.is_present("quiet");

    let source =
        image::open(&input).with_context(|_| format!("could not read {}", input.display()))?;
    let raster = Raster::from_image(&source);
    log::info!(
        "read {} ({}x{})",
        input.display(),
        raster.width(),
        raster.height()
    );

    if let Some(path) = matches.value_of("dump-energy") {
        energy_to_image(&calculate_energy(&raster, energy)?)
            .save(path)
            .with_context(|_| format!("could not write {}", path))?;
    }

    let mut carver = SeamCarver::new(CarveOptions::new(width, height).energy(energy));
    if !quiet {
        carver = carver.on_progress(|p| {
            eprint!(
                "\r{} {}: {}/{}",
                p.stage, p.axis, p.completed, p.total
            )
        });
    }
    let carved = carver.carve(raster)?;
    if !quiet {
        eprintln!();
    }

    carved
        .to_rgb_image()
        .save(&output)
        .with_context(|_| format!("could not write {}", output.display()))?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("seamcarve: {}", err);
        for cause in err.iter_causes() {
            eprintln!("  caused by: {}", cause);
        }
        process::exit(1);
    }
}
