#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for closed-form integration of differential-drive motion."]
#![doc = ""]
#![doc = "Heading over a constant-angular-acceleration interval is quadratic in time, so the"]
#![doc = "displacement integral of `speed * (cos θ, sin θ)` has no elementary antiderivative."]
#![doc = "This crate evaluates it with a truncated power series where that converges, a"]
#![doc = "stepped Taylor expansion where it does not, or exact trigonometric identities"]
#![doc = "(zero angular acceleration), and provides the frame"]
#![doc = "rotation and wheel kinematics needed to place the result in the world."]

use core::fmt;
use core::ops::{Add, Sub};
use libm::{cos, sin, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod error;
pub mod linear_phase;
pub mod segment;
pub mod series;
pub mod taylor;
pub mod wheel;

pub use error::SeriesError;
pub use segment::{integrate_segment, phase_offset};
pub use series::{PhaseScale, SeriesOrder, SERIES_RADIUS};
pub use wheel::{WheelBase, WheelDistances, WheelPositions, WheelSpeeds};

/// A 2‑D point or displacement `(x, y)` in path units.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// x coordinate.
    pub x: f64,
    /// y coordinate.
    pub y: f64,
}

impl Point {
    /// The origin `(0, 0)`.
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    /// Construct a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Rotate the point counter‑clockwise about the origin.
    ///
    /// # Arguments
    ///
    /// * `angle`: Rotation in radians. Negative values rotate clockwise.
    ///
    /// # Returns
    ///
    /// The rotated point.
    pub fn rotated(self, angle: f64) -> Self {
        let (s, c) = (sin(angle), cos(angle));
        Point {
            x: self.x * c - self.y * s,
            y: self.x * s + self.y * c,
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        sqrt(dx * dx + dy * dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x: {:.3}, y: {:.3})", self.x, self.y)
    }
}
