//! Turns a raster into an image on disk.  This sits outside the
//! engine proper: the engine only promises a field of counts in
//! `0..=max_iter`, and a palette is one way of looking at it.

use failure::Error;
use image::pnm::{PNMEncoder, PNMSubtype, SampleEncoding};
use image::ColorType;
use num::{clamp, Complex};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::JuliaError;
use crate::raster::Raster;

const BLUES: [[u8; 3]; 3] = [[247, 251, 255], [107, 174, 214], [8, 48, 107]];
const SEISMIC: [[u8; 3]; 5] = [
    [0, 0, 76],
    [0, 0, 255],
    [255, 255, 255],
    [255, 0, 0],
    [127, 0, 0],
];

/// How escape counts become colours.  Every palette runs from the
/// points that escape at once to the ones that never do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Black to white.
    Gray,
    /// White to black.
    Binary,
    /// Pale to deep blue.
    Blues,
    /// Dark blue through white to dark red.
    Seismic,
}

/// The palettes written when none is asked for.
pub const DEFAULT_PALETTES: [Palette; 3] = [Palette::Binary, Palette::Blues, Palette::Seismic];

impl Palette {
    /// Gray palettes are written with one channel, the others with
    /// three.
    pub fn color_type(self) -> ColorType {
        match self {
            Palette::Gray | Palette::Binary => ColorType::Gray(8),
            Palette::Blues | Palette::Seismic => ColorType::RGB(8),
        }
    }

    /// The netpbm extension matching `color_type`.
    pub fn pnm_extension(self) -> &'static str {
        match self {
            Palette::Gray | Palette::Binary => "pgm",
            Palette::Blues | Palette::Seismic => "ppm",
        }
    }

    fn push(self, level: u8, pixels: &mut Vec<u8>) {
        match self {
            Palette::Gray => pixels.push(level),
            Palette::Binary => pixels.push(255 - level),
            Palette::Blues => pixels.extend_from_slice(&ramp(&BLUES, level)),
            Palette::Seismic => pixels.extend_from_slice(&ramp(&SEISMIC, level)),
        }
    }
}

impl FromStr for Palette {
    type Err = JuliaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gray" | "grey" => Ok(Palette::Gray),
            "binary" => Ok(Palette::Binary),
            "blues" => Ok(Palette::Blues),
            "seismic" => Ok(Palette::Seismic),
            _ => Err(JuliaError::InvalidParameter {
                name: "palette",
                value: s.to_string(),
            }),
        }
    }
}

/// Interpolates between evenly spaced colour stops.
fn ramp(stops: &[[u8; 3]], level: u8) -> [u8; 3] {
    let position = f64::from(level) / 255.0 * (stops.len() - 1) as f64;
    let low = (position.floor() as usize).min(stops.len() - 2);
    let t = position - low as f64;
    let mut color = [0; 3];
    for (channel, value) in color.iter_mut().enumerate() {
        let (a, b) = (f64::from(stops[low][channel]), f64::from(stops[low + 1][channel]));
        *value = clamp((a + (b - a) * t).round(), 0.0, 255.0) as u8;
    }
    color
}

/// Scales every count against the largest one in the field, so the
/// slowest-escaping points land on 255.  A field of zeros stays at 0.
pub fn levels(raster: &Raster) -> Vec<u8> {
    let maxi = u64::from(raster.max_count());
    raster
        .as_slice()
        .iter()
        .map(|&count| {
            if maxi == 0 {
                0
            } else {
                clamp((u64::from(count) * 255) / maxi, 0, 255) as u8
            }
        })
        .collect()
}

/// The raster's pixels in `palette`, row by row.
pub fn colorize(raster: &Raster, palette: Palette) -> Vec<u8> {
    let levels = levels(raster);
    let channels = match palette.color_type() {
        ColorType::Gray(_) => 1,
        _ => 3,
    };
    let mut pixels = Vec::with_capacity(levels.len() * channels);
    for level in levels {
        palette.push(level, &mut pixels);
    }
    pixels
}

/// The file name for the pass over `c`.
pub fn file_name(c: Complex<f64>, extension: &str) -> String {
    format!("julia_({:.4},{:.4}).{}", c.re, c.im, extension)
}

/// The extension for `format` in `palette`.  `pnm` turns into `pgm`
/// or `ppm`; anything else is used as given.
pub fn extension(format: &str, palette: Palette) -> &str {
    match format {
        "pnm" => palette.pnm_extension(),
        other => other,
    }
}

/// Makes sure `dir` exists and returns the full path for `name` in it.
pub fn prepare_path(dir: &Path, name: &str) -> Result<PathBuf, Error> {
    fs::create_dir_all(dir)?;
    Ok(dir.join(name))
}

/// Writes the raster as an 8-bit image in `palette`.  `.pgm`, `.ppm`
/// and `.pnm` go through the PNM encoder; anything else is left to the
/// `image` crate to pick from the extension.
pub fn write_image(path: &Path, raster: &Raster, palette: Palette) -> Result<(), Error> {
    let pixels = colorize(raster, palette);
    let (width, height) = (raster.width() as u32, raster.height() as u32);
    let color = palette.color_type();
    match path.extension().and_then(|e| e.to_str()) {
        Some("pgm") | Some("ppm") | Some("pnm") => {
            let subtype = match color {
                ColorType::Gray(_) => PNMSubtype::Graymap(SampleEncoding::Binary),
                _ => PNMSubtype::Pixmap(SampleEncoding::Binary),
            };
            let output = File::create(path)?;
            let mut encoder = PNMEncoder::new(output).with_subtype(subtype);
            encoder.encode(&pixels[..], width, height, color)?;
        }
        _ => image::save_buffer(path, &pixels[..], width, height, color)?,
    }
    info!("saved {}", path.display());
    Ok(())
}
