//! Constant-acceleration segments, the building blocks of a general-form profile.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which rate a segment drives.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Angular acceleration (rad/s²).
    Angular,
    /// Linear acceleration along the heading (path units/s²).
    Linear,
}

/// A span of time during which one axis holds a constant acceleration.
///
/// Segments of the same axis run back to back in list order, starting at `t = 0`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerationSegment {
    /// Length of the span (s).
    pub duration: f64,
    /// Constant acceleration held during the span.
    pub rate: f64,
    /// Axis the acceleration applies to.
    pub axis: Axis,
}

impl AccelerationSegment {
    /// Construct a segment.
    pub const fn new(duration: f64, rate: f64, axis: Axis) -> Self {
        AccelerationSegment {
            duration,
            rate,
            axis,
        }
    }

    /// Angular segment of `duration` seconds at `rate` rad/s².
    pub const fn angular(duration: f64, rate: f64) -> Self {
        Self::new(duration, rate, Axis::Angular)
    }

    /// Linear segment of `duration` seconds at `rate` path units/s².
    pub const fn linear(duration: f64, rate: f64) -> Self {
        Self::new(duration, rate, Axis::Linear)
    }

    /// Zero-acceleration span that holds the current rate of `axis`.
    pub const fn coast(duration: f64, axis: Axis) -> Self {
        Self::new(duration, 0.0, axis)
    }
}

impl fmt::Display for AccelerationSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} segment ({:.4} s at {:.4})",
            self.axis, self.duration, self.rate
        )
    }
}

/// Speed and angular velocity at `t = 0`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InitialMotion {
    /// Linear speed (path units/s).
    pub speed: f64,
    /// Angular velocity (rad/s).
    pub omega: f64,
}

impl InitialMotion {
    /// Construct initial motion.
    pub const fn new(speed: f64, omega: f64) -> Self {
        InitialMotion { speed, omega }
    }

    /// Start at `speed` without turning.
    pub const fn at_speed(speed: f64) -> Self {
        Self::new(speed, 0.0)
    }
}
