//! Errors reported by the sampler.
//!
//! Only precondition violations reach the caller.  Failures of the
//! sampled function are [`EvalError`]s and end up as gaps in the
//! returned polylines.

use thiserror::Error;

/// Precondition violations.  They are detected before `f` is ever
/// evaluated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid window [{xmin}, {xmax}] × [{ymin}, {ymax}]: \
             bounds must be finite with xmin < xmax and ymin < ymax")]
    InvalidWindow { xmin: f64, xmax: f64, ymin: f64, ymax: f64 },

    #[error("invalid pixel space {width}×{height}: both dimensions \
             must be at least 2")]
    InvalidPixelSpace { width: usize, height: usize },

    #[error("cannot scale from the empty interval [{low}, {high}]")]
    DegenerateInterval { low: f64, high: f64 },

    #[error("index {index} out of range for a table of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a single evaluation of the sampled function is unusable.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The function reported a failure.
    #[error("evaluation failed: {0}")]
    Failed(String),
    /// The function is not defined there (returned `None`).
    #[error("function undefined")]
    Undefined,
    /// NaN or infinite value (e.g. the real part of a non-real result).
    #[error("non-finite value {0}")]
    NotFinite(f64),
}
