#![warn(missing_docs)]

//! Error types for the series integration library.

use core::fmt;

/// Errors that can occur when configuring the integrator or the wheel geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// The requested number of series terms is zero or above
    /// [`SeriesOrder::MAX_TERMS`](crate::SeriesOrder::MAX_TERMS).
    InvalidTermCount(&'static str),
    /// Error for invalid half-track.
    /// This variant is returned when the wheel offset from the body center is not a positive, finite number.
    InvalidHalfTrack(&'static str),
}

impl fmt::Display for SeriesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesError::InvalidTermCount(msg) => write!(f, "Invalid series term count: {}", msg),
            SeriesError::InvalidHalfTrack(msg) => write!(f, "Invalid half-track: {}", msg),
        }
    }
}

impl core::error::Error for SeriesError {}
