//! The escape test.  For a fixed constant `c`, a starting point `z0`
//! is iterated through `z = z*z + c` until it leaves the circle of
//! radius two or the iteration bound is reached; the number of
//! iterations performed is the value plotted for that point.
//!
//! Two evaluators implement the same contract.  `Reference` spells
//! the map out with `num::Complex` arithmetic; `Unrolled` works on
//! the real and imaginary parts directly and reuses the squares it
//! already computed for the bound check.  They return identical
//! counts for every input.

use num::Complex;
use std::str::FromStr;

use crate::errors::JuliaError;

/// Anything that can run the escape test.  Implementations must be
/// pure: the dispatcher calls them from many threads at once.
pub trait Escape: Sync {
    /// Returns the iteration count, in `0..=max_iter`.
    fn escape(&self, c: Complex<f64>, z0: Complex<f64>, max_iter: u32) -> u32;
}

/// The escape test written with complex-number operations.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Reference;

impl Escape for Reference {
    fn escape(&self, c: Complex<f64>, z0: Complex<f64>, max_iter: u32) -> u32 {
        let mut z = z0;
        let mut n = 0;
        while z.norm_sqr() < 4.0 && n < max_iter {
            z = z * z + c;
            n += 1;
        }
        n
    }
}

/// The escape test on bare `f64`s.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Unrolled;

impl Escape for Unrolled {
    #[inline]
    fn escape(&self, c: Complex<f64>, z0: Complex<f64>, max_iter: u32) -> u32 {
        let (mut re, mut im) = (z0.re, z0.im);
        let mut n = 0;
        while n < max_iter {
            let re2 = re * re;
            let im2 = im * im;
            if re2 + im2 >= 4.0 {
                break;
            }
            im = 2.0 * re * im + c.im;
            re = re2 - im2 + c.re;
            n += 1;
        }
        n
    }
}

/// Picks one of the evaluators at run time.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tier {
    /// Complex-number arithmetic.
    Reference,
    /// Scalar arithmetic.  The default.
    Unrolled,
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Unrolled
    }
}

impl Escape for Tier {
    #[inline]
    fn escape(&self, c: Complex<f64>, z0: Complex<f64>, max_iter: u32) -> u32 {
        match self {
            Tier::Reference => Reference.escape(c, z0, max_iter),
            Tier::Unrolled => Unrolled.escape(c, z0, max_iter),
        }
    }
}

impl FromStr for Tier {
    type Err = JuliaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reference" => Ok(Tier::Reference),
            "unrolled" | "fast" => Ok(Tier::Unrolled),
            _ => Err(JuliaError::InvalidParameter {
                name: "tier",
                value: s.to_string(),
            }),
        }
    }
}

/// The escape test with the fastest evaluator.
#[inline]
pub fn escape(c: Complex<f64>, z0: Complex<f64>, max_iter: u32) -> u32 {
    Unrolled.escape(c, z0, max_iter)
}
