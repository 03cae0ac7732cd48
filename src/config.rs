//! The parameters of a single render pass, gathered in one value so
//! that nothing about a pass lives in global state.

use num::Complex;

use crate::escape::Tier;
use crate::planes::{linspace, Viewport};

/// Real interval of the default viewport.
pub const DEFAULT_X_INTERVAL: (f64, f64) = (-1.6, 1.6);
/// Imaginary interval of the default viewport.
pub const DEFAULT_Y_INTERVAL: (f64, f64) = (-1.0, 1.0);
/// Pixels along the longer side, before rounding to odd.
pub const DEFAULT_RESOLUTION: usize = 1000;
/// Iteration bound of the escape test.
pub const DEFAULT_MAX_ITER: u32 = 300;

/// Constants that produce well-known, visually interesting Julia sets.
pub const DEFAULT_CONSTANTS: [(f64, f64); 5] = [
    (-0.62772, -0.42193),
    (-0.74543, 0.11301),
    (-0.75, 0.11),
    (-0.1, 0.651),
    (-0.8, 0.156),
];

/// Everything needed to turn one constant `c` into one raster.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PassConfig {
    /// The region of the plane to sample.
    pub viewport: Viewport,
    /// Pixel count along the longer side of the viewport.
    pub resolution: usize,
    /// The Julia constant.
    pub c: Complex<f64>,
    /// Upper bound on the iteration count of any point.
    pub max_iter: u32,
    /// Size of the thread pool.  Must be at least 1.
    pub workers: usize,
    /// Which evaluator runs the escape test.
    pub tier: Tier,
}

impl PassConfig {
    /// A pass over `viewport` for `c`, with the default resolution,
    /// bound and evaluator, and one worker per CPU.
    pub fn new(viewport: Viewport, c: Complex<f64>) -> PassConfig {
        PassConfig {
            viewport,
            resolution: DEFAULT_RESOLUTION,
            c,
            max_iter: DEFAULT_MAX_ITER,
            workers: num_cpus::get(),
            tier: Tier::default(),
        }
    }

    /// The same pass, for a different constant.
    pub fn with_c(&self, c: Complex<f64>) -> PassConfig {
        PassConfig { c, ..*self }
    }
}

/// `count` evenly spaced constants with a fixed real part and the
/// imaginary part running from `start` to `end` inclusive.
pub fn sweep(re: f64, start: f64, end: f64, count: usize) -> Vec<Complex<f64>> {
    (0..count)
        .map(|i| Complex::new(re, linspace(start, end, count, i)))
        .collect()
}
