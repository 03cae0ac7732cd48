// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can abort a render pass.  No error is recovered
//! from inside the engine; each one ends the current pass and is
//! handed back to the caller.

use failure::Fail;

/// The failures a render pass can report.
#[derive(Debug, Fail, PartialEq)]
pub enum JuliaError {
    /// The viewport intervals are inverted, degenerate or not finite,
    /// or the requested resolution is zero.
    #[fail(display = "invalid viewport: {}", reason)]
    InvalidViewport {
        /// What was wrong with the request.
        reason: String,
    },

    /// A worker died before finishing its unit of work.  The whole
    /// pass is discarded.
    #[fail(display = "evaluation failure: {}", reason)]
    EvaluationFailure {
        /// The panic payload of the worker, when it carried a message.
        reason: String,
    },

    /// The number of iteration counts does not match the grid.
    #[fail(
        display = "shape mismatch: expected {} counts, got {}",
        expected, actual
    )]
    ShapeMismatch {
        /// `width * height` of the declared grid.
        expected: usize,
        /// Length of the flat sequence that was handed over.
        actual: usize,
    },

    /// A pass needs at least one worker.
    #[fail(display = "worker count must be at least 1")]
    InvalidWorkerCount,

    /// A command line value could not be understood.
    #[fail(display = "could not parse {}: {:?}", name, value)]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// The offending text.
        value: String,
    },
}

impl JuliaError {
    pub(crate) fn viewport<S: Into<String>>(reason: S) -> Self {
        JuliaError::InvalidViewport {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let e = JuliaError::ShapeMismatch {
            expected: 9,
            actual: 8,
        };
        assert_eq!(format!("{}", e), "shape mismatch: expected 9 counts, got 8");
        assert_eq!(
            format!("{}", JuliaError::viewport("x interval is inverted")),
            "invalid viewport: x interval is inverted"
        );
    }
}
