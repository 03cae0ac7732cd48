//! Contains the relationship between a rectangle on the complex plane
//! (the Viewport) and the integral pixel grid sampled over it.  The
//! grid always has an odd number of columns and rows, so that there
//! is a pixel sitting exactly at the centre of the viewport.
use itertools::iproduct;
use num::Complex;

use crate::errors::JuliaError;

/// Two real intervals, `(x_left, x_right)` along the real axis and
/// `(y_bottom, y_top)` along the imaginary axis.  The rectangle's
/// top-left corner is `x_left + i*y_top`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    x: (f64, f64),
    y: (f64, f64),
}

impl Viewport {
    /// Takes the x interval as `(left, right)` and the y interval as
    /// `(bottom, top)`.  Both must be finite and strictly increasing.
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Result<Viewport, JuliaError> {
        if !(x.0.is_finite() && x.1.is_finite() && y.0.is_finite() && y.1.is_finite()) {
            return Err(JuliaError::viewport("interval bounds must be finite"));
        }
        if x.0 >= x.1 {
            return Err(JuliaError::viewport(format!(
                "x interval ({}, {}) is empty or inverted",
                x.0, x.1
            )));
        }
        if y.0 >= y.1 {
            return Err(JuliaError::viewport(format!(
                "y interval ({}, {}) is empty or inverted",
                y.0, y.1
            )));
        }
        Ok(Viewport { x, y })
    }

    /// Left edge of the real interval.
    pub fn x_left(&self) -> f64 {
        self.x.0
    }

    /// Right edge of the real interval.
    pub fn x_right(&self) -> f64 {
        self.x.1
    }

    /// Bottom edge of the imaginary interval.
    pub fn y_bottom(&self) -> f64 {
        self.y.0
    }

    /// Top edge of the imaginary interval.
    pub fn y_top(&self) -> f64 {
        self.y.1
    }

    /// Width over height of the rectangle.  The spans are taken at
    /// half size, which keeps them finite for any finite bounds.
    pub fn aspect_ratio(&self) -> f64 {
        (self.x.1 / 2.0 - self.x.0 / 2.0) / (self.y.1 / 2.0 - self.y.0 / 2.0)
    }

    /// The first sample of the grid.
    pub fn top_left(&self) -> Complex<f64> {
        Complex::new(self.x.0, self.y.1)
    }

    /// The last sample of the grid.
    pub fn bottom_right(&self) -> Complex<f64> {
        Complex::new(self.x.1, self.y.0)
    }

    /// Midpoint of the rectangle.  With an odd grid, this is sampled
    /// by the middle cell.
    pub fn center(&self) -> Complex<f64> {
        Complex::new(
            self.x.0 * 0.5 + self.x.1 * 0.5,
            self.y.0 * 0.5 + self.y.1 * 0.5,
        )
    }
}

/// Width and height, in pixels, of the sampled grid.  Both odd.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

fn bump_odd(n: usize) -> usize {
    if n % 2 == 0 {
        n + 1
    } else {
        n
    }
}

impl Grid {
    /// The requested resolution (rounded up to odd) is used for the
    /// longer side of the viewport, and the shorter side is scaled by
    /// the aspect ratio, rounded, and bumped up to odd.
    pub fn resolve(viewport: &Viewport, resolution: usize) -> Result<Grid, JuliaError> {
        if resolution == 0 {
            return Err(JuliaError::viewport("resolution must be positive"));
        }
        let resolution = bump_odd(resolution);
        let ratio = viewport.aspect_ratio();
        let grid = if ratio >= 1.0 {
            Grid {
                width: resolution,
                height: bump_odd((resolution as f64 / ratio).round() as usize),
            }
        } else {
            Grid {
                width: bump_odd((resolution as f64 * ratio).round() as usize),
                height: resolution,
            }
        };
        debug!(
            "resolved {}x{} grid for ratio {:.4} at resolution {}",
            grid.width, grid.height, ratio, resolution
        );
        Ok(grid)
    }

    /// The total number of cells.  Used to size the result buffers.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True if either side has no cells.  Never the case for a
    /// resolved grid.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// `n` evenly spaced values from `start` to `end`, both ends included;
/// returns the `i`th.  A single value sits on `start`.  The two ends
/// are weighted rather than subtracted, so a span wider than `f64`
/// can hold still gives finite values.
pub(crate) fn linspace(start: f64, end: f64, n: usize, i: usize) -> f64 {
    if n < 2 {
        start
    } else if i == n - 1 {
        end
    } else {
        let t = i as f64 / (n - 1) as f64;
        start * (1.0 - t) + end * t
    }
}

/// Maps every cell of a grid to the complex number sampled there.
/// Row 0 is the top of the viewport; column 0 is its left edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SampleGrid {
    viewport: Viewport,
    grid: Grid,
}

impl SampleGrid {
    /// Samples `viewport` at the cells of `grid`.
    pub fn new(viewport: Viewport, grid: Grid) -> SampleGrid {
        SampleGrid { viewport, grid }
    }

    /// The grid being sampled.
    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// The rectangle being sampled.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Number of samples, one per cell.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    /// True if there is nothing to sample.
    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Given the row and column of a cell, return the complex number
    /// it samples.
    pub fn point(&self, row: usize, column: usize) -> Complex<f64> {
        Complex::new(
            linspace(
                self.viewport.x_left(),
                self.viewport.x_right(),
                self.grid.width,
                column,
            ),
            linspace(
                self.viewport.y_top(),
                self.viewport.y_bottom(),
                self.grid.height,
                row,
            ),
        )
    }

    /// Every sample in row-major order.  The iterator holds no shared
    /// state, so cloning it restarts the walk.
    pub fn iter(&self) -> impl Iterator<Item = Complex<f64>> + Clone {
        let samples = *self;
        iproduct!(0..self.grid.height, 0..self.grid.width)
            .map(move |(row, column)| samples.point(row, column))
    }

    /// The whole sequence, materialized for the dispatcher.
    pub fn to_vec(&self) -> Vec<Complex<f64>> {
        let mut points = Vec::with_capacity(self.len());
        points.extend(self.iter());
        points
    }
}
