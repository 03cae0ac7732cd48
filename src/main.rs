extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate juliaset;
extern crate num;

use clap::{App, Arg, ArgMatches};
use failure::Error;
use num::Complex;
use std::path::Path;

use juliaset::config::DEFAULT_CONSTANTS;
use juliaset::output::{extension, prepare_path, write_image, DEFAULT_PALETTES};
use juliaset::parse::{
    complex_param, palette_arg, pass_args, pass_from_matches, validate_pair, value, PassDefaults,
    FORMAT, OUTPUT, PALETTE,
};
use juliaset::{render, Palette};

const CONSTANT: &str = "constant";

const DEFAULTS: PassDefaults = PassDefaults {
    output: "Images",
    x_interval: "-1.6,1.6",
    y_interval: "-1,1",
    iterations: "300",
};

fn args<'a>() -> ArgMatches<'a> {
    pass_args(DEFAULTS)
        .into_iter()
        .fold(
            App::new("juliaset")
                .version("0.1.0")
                .about("Renders Julia set images, one per constant and palette"),
            |app, arg| app.arg(arg),
        )
        .arg(
            Arg::with_name(CONSTANT)
                .long(CONSTANT)
                .short("c")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1)
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse constant"))
                .help("Julia constant as re,im; may be repeated"),
        )
        .arg(
            palette_arg(true)
                .help("Colour palette; may be repeated (default: binary, blues and seismic)"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let pass = pass_from_matches(matches, Complex::new(0.0, 0.0))?;

    let constants = match matches.values_of(CONSTANT) {
        Some(values) => values
            .map(|s| complex_param("constant", s))
            .collect::<Result<Vec<_>, _>>()?,
        None => DEFAULT_CONSTANTS
            .iter()
            .map(|&(re, im)| Complex::new(re, im))
            .collect(),
    };
    let palettes = match matches.values_of(PALETTE) {
        Some(values) => values
            .map(|s| s.parse::<Palette>())
            .collect::<Result<Vec<_>, _>>()?,
        None => DEFAULT_PALETTES.to_vec(),
    };

    let dir = Path::new(value(matches, OUTPUT)?);
    let format = value(matches, FORMAT)?;
    for (i, c) in constants.into_iter().enumerate() {
        let raster = render(&pass.with_c(c))?;
        for (j, &palette) in palettes.iter().enumerate() {
            let name = format!("julia_{}-{}.{}", i + 1, j + 1, extension(format, palette));
            write_image(&prepare_path(dir, &name)?, &raster, palette)?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
