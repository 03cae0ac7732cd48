//! Parsers for the textual forms of command line values: pairs such
//! as `-1.6,1.6`, complex constants such as `-0.8,0.156`, and bounded
//! integers.  The `validate_*` wrappers fit clap's validator hooks.
//!
//! The arguments every renderer binary shares are built here too, along
//! with the code that turns them back into a `PassConfig`.

use clap::{Arg, ArgMatches};
use num::Complex;
use std::str::FromStr;

use crate::config::PassConfig;
use crate::errors::JuliaError;
use crate::escape::Tier;
use crate::planes::Viewport;

/// Directory the images go to.
pub const OUTPUT: &str = "output";
/// Real interval of the viewport.
pub const XINTERVAL: &str = "x-interval";
/// Imaginary interval of the viewport.
pub const YINTERVAL: &str = "y-interval";
/// Pixels along the longer side.
pub const RESOLUTION: &str = "resolution";
/// Iteration bound.
pub const ITERATIONS: &str = "iterations";
/// Worker count.
pub const THREADS: &str = "threads";
/// Escape evaluator.
pub const TIER: &str = "tier";
/// Image file format.
pub const FORMAT: &str = "format";
/// Colour palette.
pub const PALETTE: &str = "palette";

/// Defaults that differ between the binaries.
#[derive(Copy, Clone, Debug)]
pub struct PassDefaults {
    /// Output directory.
    pub output: &'static str,
    /// Real interval, as `left,right`.
    pub x_interval: &'static str,
    /// Imaginary interval, as `bottom,top`.
    pub y_interval: &'static str,
    /// Iteration bound.
    pub iterations: &'static str,
}

/// Given a string and a separator, returns the two values
/// separated by the separator.
pub fn parse_pair<T: FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// `re,im` as a complex number.
pub fn parse_complex(s: &str) -> Option<Complex<f64>> {
    parse_pair(s, ',').map(|(re, im)| Complex { re, im })
}

/// Like `parse_pair`, but names the parameter when it fails.
pub fn pair_param<T: FromStr>(
    name: &'static str,
    s: &str,
    separator: char,
) -> Result<(T, T), JuliaError> {
    parse_pair(s, separator).ok_or_else(|| JuliaError::InvalidParameter {
        name,
        value: s.to_string(),
    })
}

/// Like `parse_complex`, but names the parameter when it fails.
pub fn complex_param(name: &'static str, s: &str) -> Result<Complex<f64>, JuliaError> {
    parse_complex(s).ok_or_else(|| JuliaError::InvalidParameter {
        name,
        value: s.to_string(),
    })
}

/// Parses a single number, naming the parameter when it fails.
pub fn number_param<T: FromStr>(name: &'static str, s: &str) -> Result<T, JuliaError> {
    T::from_str(s).map_err(|_| JuliaError::InvalidParameter {
        name,
        value: s.to_string(),
    })
}

/// clap validator for a pair of numbers.  `err` is shown to the user
/// when the text does not parse.
pub fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

/// clap validator for a number in `low..=high`.
pub fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

/// The arguments that describe one pass and where it is written:
/// output directory, viewport, resolution, iteration bound, threads,
/// evaluator and file format.
pub fn pass_args<'a, 'b>(defaults: PassDefaults) -> Vec<Arg<'a, 'b>> {
    let max_threads = num_cpus::get();

    vec![
        Arg::with_name(OUTPUT)
            .long(OUTPUT)
            .short("o")
            .takes_value(true)
            .default_value(defaults.output)
            .help("Directory the images are written to"),
        Arg::with_name(XINTERVAL)
            .long(XINTERVAL)
            .short("x")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value(defaults.x_interval)
            .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse x interval"))
            .help("Left and right edge of the viewport"),
        Arg::with_name(YINTERVAL)
            .long(YINTERVAL)
            .short("y")
            .takes_value(true)
            .allow_hyphen_values(true)
            .default_value(defaults.y_interval)
            .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse y interval"))
            .help("Bottom and top edge of the viewport"),
        Arg::with_name(RESOLUTION)
            .long(RESOLUTION)
            .short("r")
            .takes_value(true)
            .default_value("1000")
            .validator(|s| {
                validate_range(
                    &s,
                    1,
                    100_000,
                    "Could not parse resolution",
                    "Resolution must be between 1 and 100000",
                )
            })
            .help("Pixels along the longer side of the viewport"),
        Arg::with_name(ITERATIONS)
            .long(ITERATIONS)
            .short("i")
            .takes_value(true)
            .default_value(defaults.iterations)
            .validator(|s| {
                validate_range(
                    &s,
                    0,
                    1_000_000,
                    "Could not parse iteration count",
                    "Iteration count must be between 0 and 1000000",
                )
            })
            .help("Maximum number of iterations per point"),
        Arg::with_name(THREADS)
            .long(THREADS)
            .short("t")
            .takes_value(true)
            .validator(move |s| {
                validate_range(
                    &s,
                    1,
                    max_threads,
                    "Could not parse thread count",
                    &format!("Thread count must be between 1 and {}", max_threads),
                )
            })
            .help("Number of threads to use in solver (default: one per CPU)"),
        Arg::with_name(TIER)
            .long(TIER)
            .takes_value(true)
            .possible_values(&["reference", "unrolled"])
            .default_value("unrolled")
            .help("Escape evaluator"),
        Arg::with_name(FORMAT)
            .long(FORMAT)
            .short("f")
            .takes_value(true)
            .possible_values(&["png", "pnm"])
            .default_value("png")
            .help("Image file format; pnm writes .pgm or .ppm to suit the palette"),
    ]
}

/// The palette argument.  `multiple` lets it be repeated.
pub fn palette_arg<'a, 'b>(multiple: bool) -> Arg<'a, 'b> {
    Arg::with_name(PALETTE)
        .long(PALETTE)
        .short("p")
        .takes_value(true)
        .multiple(multiple)
        .number_of_values(1)
        .possible_values(&["gray", "binary", "blues", "seismic"])
        .help("Colour palette")
}

/// The value of `name`, which must be present.
pub fn value<'a>(matches: &'a ArgMatches, name: &'static str) -> Result<&'a str, JuliaError> {
    matches
        .value_of(name)
        .ok_or_else(|| JuliaError::InvalidParameter {
            name,
            value: String::new(),
        })
}

/// Builds the pass for `c` out of the arguments from `pass_args`.
/// Without `--threads` there is one worker per CPU.
pub fn pass_from_matches(matches: &ArgMatches, c: Complex<f64>) -> Result<PassConfig, JuliaError> {
    let viewport = Viewport::new(
        pair_param("x interval", value(matches, XINTERVAL)?, ',')?,
        pair_param("y interval", value(matches, YINTERVAL)?, ',')?,
    )?;
    let mut pass = PassConfig::new(viewport, c);
    pass.resolution = number_param("resolution", value(matches, RESOLUTION)?)?;
    pass.max_iter = number_param("iterations", value(matches, ITERATIONS)?)?;
    pass.tier = value(matches, TIER)?.parse::<Tier>()?;
    if let Some(threads) = matches.value_of(THREADS) {
        pass.workers = number_param("threads", threads)?;
    }
    Ok(pass)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::App;

    const DEFAULTS: PassDefaults = PassDefaults {
        output: "Images",
        x_interval: "-1.6,1.6",
        y_interval: "-1,1",
        iterations: "300",
    };

    fn matches_from<'a>(argv: &[&str]) -> ArgMatches<'a> {
        pass_args(DEFAULTS)
            .into_iter()
            .fold(App::new("test"), |app, arg| app.arg(arg))
            .arg(palette_arg(true))
            .get_matches_from(argv.iter().cloned())
    }

    #[test]
    fn pairs() {
        assert_eq!(parse_pair::<f64>("-1.6,1.6", ','), Some((-1.6, 1.6)));
        assert_eq!(parse_pair::<usize>("800x600", 'x'), Some((800, 600)));
        assert_eq!(parse_pair::<f64>("-1.6", ','), None);
        assert_eq!(parse_pair::<f64>("a,1", ','), None);
    }

    #[test]
    fn complex() {
        assert_eq!(
            parse_complex("-0.62772,-0.42193"),
            Some(Complex::new(-0.62772, -0.42193))
        );
        assert_eq!(parse_complex("0.5"), None);
        match complex_param("constant", "oops") {
            Err(JuliaError::InvalidParameter { name, value }) => {
                assert_eq!(name, "constant");
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn ranges() {
        assert!(validate_range("4", 1, 8, "nan", "range").is_ok());
        assert_eq!(
            validate_range("9", 1, 8, "nan", "range"),
            Err("range".to_string())
        );
        assert_eq!(
            validate_range::<u32>("x", 1, 8, "nan", "range"),
            Err("nan".to_string())
        );
        assert_eq!(number_param::<u32>("iterations", "300"), Ok(300));
    }

    #[test]
    fn pass_from_defaults() {
        let c = Complex::new(-0.8, 0.156);
        let pass = pass_from_matches(&matches_from(&["test"]), c).unwrap();
        assert_eq!(pass.viewport, Viewport::new((-1.6, 1.6), (-1.0, 1.0)).unwrap());
        assert_eq!(pass.resolution, 1000);
        assert_eq!(pass.max_iter, 300);
        assert_eq!(pass.tier, Tier::Unrolled);
        assert_eq!(pass.workers, num_cpus::get());
        assert_eq!(pass.c, c);
    }

    #[test]
    fn pass_from_arguments() {
        let matches = matches_from(&[
            "test",
            "-x",
            "-2,2",
            "-y",
            "-1.5,1.5",
            "-r",
            "21",
            "-i",
            "50",
            "-t",
            "1",
            "--tier",
            "reference",
            "-p",
            "blues",
            "-p",
            "gray",
        ]);
        let pass = pass_from_matches(&matches, Complex::new(0.0, 0.0)).unwrap();
        assert_eq!(pass.viewport, Viewport::new((-2.0, 2.0), (-1.5, 1.5)).unwrap());
        assert_eq!(pass.resolution, 21);
        assert_eq!(pass.max_iter, 50);
        assert_eq!(pass.workers, 1);
        assert_eq!(pass.tier, Tier::Reference);
        assert_eq!(value(&matches, OUTPUT), Ok("Images"));
        assert_eq!(
            matches.values_of(PALETTE).unwrap().collect::<Vec<_>>(),
            vec!["blues", "gray"]
        );
    }

    #[test]
    fn inverted_interval_fails_the_pass() {
        let matches = matches_from(&["test", "-x", "1,-1"]);
        match pass_from_matches(&matches, Complex::new(0.0, 0.0)) {
            Err(JuliaError::InvalidViewport { .. }) => (),
            other => panic!("expected InvalidViewport, got {:?}", other),
        }
    }

    #[test]
    fn missing_value_names_the_argument() {
        let matches = matches_from(&["test"]);
        assert_eq!(
            value(&matches, THREADS),
            Err(JuliaError::InvalidParameter {
                name: "threads",
                value: String::new(),
            })
        );
    }
}
