#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Julia set renderer
//!
//! A Julia set is drawn by taking every point `z` of a region of the
//! complex plane and repeatedly replacing it with `z*z + c`, for some
//! fixed constant `c`, measuring how many steps it takes for the
//! point to run off past a radius of two.  Points that never leave
//! form the (filled) Julia set; the escape counts of the points
//! around it are what make the picture.
//!
//! A render pass resolves the requested viewport into an odd-sized
//! pixel grid, samples one complex number per pixel, runs the escape
//! test for all of them on a pool of worker threads, and reshapes the
//! counts back into a grid of rows.  The counts are handed back as a
//! `Raster`; what colour they become is up to the caller.

extern crate clap;
extern crate crossbeam;
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod config;
pub mod dispatch;
pub mod errors;
pub mod escape;
pub mod output;
pub mod parse;
pub mod planes;
pub mod raster;

pub use crate::config::PassConfig;
pub use crate::dispatch::dispatch;
pub use crate::errors::JuliaError;
pub use crate::escape::{escape, Escape, Tier};
pub use crate::output::Palette;
pub use crate::planes::{Grid, SampleGrid, Viewport};
pub use crate::raster::Raster;

use std::time::Instant;

/// Runs one full pass: grid, samples, escape counts, raster.
pub fn render(pass: &PassConfig) -> Result<Raster, JuliaError> {
    let grid = Grid::resolve(&pass.viewport, pass.resolution)?;
    let samples = SampleGrid::new(pass.viewport, grid).to_vec();

    info!(
        "calculating julia set for c = {} on a {}x{} grid",
        pass.c, grid.width, grid.height
    );
    let start = Instant::now();
    let counts = dispatch(&pass.tier, pass.c, &samples, pass.max_iter, pass.workers)?;
    let elapsed = start.elapsed();
    info!(
        "... done in {}.{:03} secs",
        elapsed.as_secs(),
        elapsed.subsec_millis()
    );

    Raster::assemble(counts, grid.width, grid.height)
}
