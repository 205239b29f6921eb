//! Differential‑drive wheel kinematics.

use core::fmt;
use libm::{cos, sin};

use crate::error::SeriesError;
use crate::Point;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Left and right wheel ground speeds (path units per second).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelSpeeds {
    /// Left wheel speed.
    pub left: f64,
    /// Right wheel speed.
    pub right: f64,
}

impl WheelSpeeds {
    /// Construct wheel speeds.
    pub const fn new(left: f64, right: f64) -> Self {
        WheelSpeeds { left, right }
    }
}

impl fmt::Display for WheelSpeeds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(vL: {:.3}, vR: {:.3})", self.left, self.right)
    }
}

/// Distance travelled by each wheel (path units).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelDistances {
    /// Left wheel distance.
    pub left: f64,
    /// Right wheel distance.
    pub right: f64,
}

impl WheelDistances {
    /// Construct wheel distances.
    pub const fn new(left: f64, right: f64) -> Self {
        WheelDistances { left, right }
    }

    /// Add the trapezoid-rule distance covered over `dt` while the wheel speeds move from
    /// `from` to `to`.
    pub fn advanced(self, from: WheelSpeeds, to: WheelSpeeds, dt: f64) -> Self {
        WheelDistances {
            left: self.left + (from.left + to.left) * dt / 2.0,
            right: self.right + (from.right + to.right) * dt / 2.0,
        }
    }
}

impl fmt::Display for WheelDistances {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(dL: {:.3}, dR: {:.3})", self.left, self.right)
    }
}

/// Ground contact points of both wheels.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WheelPositions {
    /// Left wheel contact point.
    pub left: Point,
    /// Right wheel contact point.
    pub right: Point,
}

/// Differential‑drive geometry.
///
/// Holds the half-track `R`, the distance from the body center to each wheel along the
/// axle.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelBase {
    half_track: f64,
}

impl WheelBase {
    /// Half-track used when nothing else is configured.
    pub const DEFAULT_HALF_TRACK: f64 = 1.0;

    /// Construct a new wheel base.
    ///
    /// # Errors
    ///
    /// Returns `Err(SeriesError::InvalidHalfTrack)` if `half_track` is not positive and finite.
    pub const fn new(half_track: f64) -> Result<Self, SeriesError> {
        if !(half_track > 0.0) || half_track == f64::INFINITY {
            return Err(SeriesError::InvalidHalfTrack("must be positive and finite"));
        }
        Ok(WheelBase { half_track })
    }

    /// Returns the half-track.
    pub fn half_track(&self) -> f64 {
        self.half_track
    }

    /// Inverse kinematics: wheel speeds `(v − ω·R, v + ω·R)` for body speed `speed` and
    /// angular velocity `omega`.
    pub fn wheel_speeds(&self, speed: f64, omega: f64) -> WheelSpeeds {
        let tangential = omega * self.half_track;
        WheelSpeeds::new(speed - tangential, speed + tangential)
    }

    /// Wheel contact points for a body at `center` facing `heading`.
    ///
    /// The left wheel sits at `heading + π/2`, the right one at `heading − π/2`.
    pub fn wheel_positions(&self, center: Point, heading: f64) -> WheelPositions {
        let lateral = Point::new(
            -sin(heading) * self.half_track,
            cos(heading) * self.half_track,
        );
        WheelPositions {
            left: center + lateral,
            right: center - lateral,
        }
    }
}

impl Default for WheelBase {
    fn default() -> Self {
        WheelBase {
            half_track: Self::DEFAULT_HALF_TRACK,
        }
    }
}

impl fmt::Display for WheelBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WheelBase (R: {:.3})", self.half_track)
    }
}
