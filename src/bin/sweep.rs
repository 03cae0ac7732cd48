extern crate clap;
extern crate env_logger;
extern crate failure;
extern crate juliaset;
extern crate log;

use clap::{App, Arg, ArgMatches};
use failure::{err_msg, Error};
use log::info;
use std::path::Path;

use juliaset::config::sweep;
use juliaset::output::{extension, file_name, prepare_path, write_image};
use juliaset::parse::{
    number_param, pair_param, palette_arg, pass_args, pass_from_matches, validate_pair,
    validate_range, value, PassDefaults, FORMAT, OUTPUT, PALETTE,
};
use juliaset::{render, Palette};

const REAL: &str = "real";
const IMAGINARY: &str = "imaginary";
const COUNT: &str = "count";

const DEFAULTS: PassDefaults = PassDefaults {
    output: "Images/Test",
    x_interval: "-1.4,1.4",
    y_interval: "-1.25,1.25",
    iterations: "500",
};

fn args<'a>() -> ArgMatches<'a> {
    pass_args(DEFAULTS)
        .into_iter()
        .fold(
            App::new("sweep")
                .version("0.1.0")
                .about("Renders a run of Julia sets while the constant walks along the imaginary axis"),
            |app, arg| app.arg(arg),
        )
        .arg(
            Arg::with_name(REAL)
                .long(REAL)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.1")
                .help("Real part of every constant in the sweep"),
        )
        .arg(
            Arg::with_name(IMAGINARY)
                .long(IMAGINARY)
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.650,0.653")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse imaginary range"))
                .help("First and last imaginary part of the sweep"),
        )
        .arg(
            Arg::with_name(COUNT)
                .long(COUNT)
                .short("n")
                .takes_value(true)
                .default_value("31")
                .validator(|s| {
                    validate_range(
                        &s,
                        1,
                        10_000,
                        "Could not parse step count",
                        "Step count must be between 1 and 10000",
                    )
                })
                .help("Number of constants in the sweep"),
        )
        .arg(palette_arg(false).default_value("gray"))
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), Error> {
    let re: f64 = number_param("real part", value(matches, REAL)?)?;
    let (start, end) = pair_param::<f64>("imaginary range", value(matches, IMAGINARY)?, ',')?;
    let count: usize = number_param("step count", value(matches, COUNT)?)?;
    let constants = sweep(re, start, end, count);

    let first = *constants.first().ok_or_else(|| err_msg("the sweep is empty"))?;
    let pass = pass_from_matches(matches, first)?;
    let palette = value(matches, PALETTE)?.parse::<Palette>()?;

    let dir = Path::new(value(matches, OUTPUT)?);
    let format = extension(value(matches, FORMAT)?, palette);
    for (i, &c) in constants.iter().enumerate() {
        info!("sweep step {} of {}", i + 1, constants.len());
        let raster = render(&pass.with_c(c))?;
        let path = prepare_path(dir, &file_name(c, format))?;
        write_image(&path, &raster, palette)?;
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
