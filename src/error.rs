// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by the engine, the rasterizer and the
//! gallery.  Every failure is reported at the call that caused it; there
//! is nothing to retry, since a fresh engine with the same seed will
//! produce exactly the same points.

use std::result;

/// Everything that can go wrong while generating or rendering a curve.
#[derive(Debug, Fail, Clone, PartialEq)]
pub enum Error {
    /// A construction parameter, batch size, or image dimension is
    /// outside of its documented domain.
    #[fail(display = "invalid parameter: {}", _0)]
    InvalidParameter(String),

    /// Points were requested before any had been generated.
    #[fail(display = "no points have been generated yet")]
    NotReady,

    /// A generated point (or the bounds derived from the points) is not
    /// a finite number, so it cannot be mapped to a pixel.
    #[fail(display = "point {} diverged to a non-finite value", index)]
    NumericDivergence {
        /// Position of the offending point in the point buffer.
        index: usize,
    },

    /// A batch cursor was used after the engine it came from was cleared.
    #[fail(display = "batch cursor is stale; the engine was cleared")]
    StaleCursor,

    /// The render did not converge within the caller's batch ceiling.
    #[fail(display = "render did not converge within {} batches", batches)]
    BatchLimit {
        /// The ceiling that was hit.
        batches: usize,
    },

    /// The caller asked for the render to stop.
    #[fail(display = "render cancelled")]
    Cancelled,

    /// A render thread panicked.
    #[fail(display = "a render thread panicked")]
    WorkerPanicked,

    /// The filesystem refused an operation other than writing an image.
    #[fail(display = "I/O error: {}", _0)]
    Io(String),

    /// The image encoder refused to write the canvas.
    #[fail(display = "could not write image: {}", _0)]
    Image(String),
}

/// Shorthand used throughout the crate.
pub type Result<T> = result::Result<T, Error>;

/// Checks that a value is finite and within `[-1, 1]`.
pub(crate) fn check_unit(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= -1.0 && value <= 1.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(format!(
            "{} must be between -1 and 1, got {}",
            name, value
        )))
    }
}

/// Checks that a count is at least one.
pub(crate) fn check_positive(name: &str, value: usize) -> Result<usize> {
    if value == 0 {
        Err(Error::InvalidParameter(format!("{} must be at least 1", name)))
    } else {
        Ok(value)
    }
}
