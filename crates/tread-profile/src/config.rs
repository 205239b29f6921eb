//! Limits and numeric knobs shared by every profile built from one configuration.

use core::f64::consts::TAU;
use core::fmt;

use tread_series::{SeriesOrder, WheelBase};

use crate::error::ProfileError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Acceleration limits enforced by the direct form.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveLimits {
    max_angular_accel: f64,
    max_linear_accel: f64,
    tolerance: f64,
}

impl DriveLimits {
    /// Default maximum angular acceleration (rad/s²).
    pub const DEFAULT_MAX_ANGULAR_ACCEL: f64 = TAU;
    /// Default maximum linear acceleration (path units/s²).
    pub const DEFAULT_MAX_LINEAR_ACCEL: f64 = 100.0;
    /// Default slack allowed above a limit before a derived rate is rejected.
    pub const DEFAULT_TOLERANCE: f64 = 1e-3;

    /// Construct limits with the default tolerance.
    ///
    /// # Arguments
    ///
    /// * `max_angular_accel`: Largest allowed angular acceleration magnitude (rad/s²).
    /// * `max_linear_accel`: Largest allowed linear acceleration magnitude (path units/s²).
    ///
    /// # Errors
    ///
    /// Returns `Err(ProfileError::InvalidLimit)` if either limit is not positive and finite.
    pub fn new(max_angular_accel: f64, max_linear_accel: f64) -> Result<Self, ProfileError> {
        Ok(DriveLimits {
            max_angular_accel: positive_finite("max_angular_accel", max_angular_accel)?,
            max_linear_accel: positive_finite("max_linear_accel", max_linear_accel)?,
            tolerance: Self::DEFAULT_TOLERANCE,
        })
    }

    /// Replace the feasibility tolerance.
    ///
    /// # Errors
    ///
    /// Returns `Err(ProfileError::InvalidLimit)` if `tolerance` is negative or not finite.
    pub fn with_tolerance(self, tolerance: f64) -> Result<Self, ProfileError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ProfileError::InvalidLimit { name: "tolerance" });
        }
        Ok(DriveLimits { tolerance, ..self })
    }

    /// Returns the angular acceleration limit.
    pub fn max_angular_accel(&self) -> f64 {
        self.max_angular_accel
    }

    /// Returns the linear acceleration limit.
    pub fn max_linear_accel(&self) -> f64 {
        self.max_linear_accel
    }

    /// Returns the feasibility tolerance.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

impl Default for DriveLimits {
    fn default() -> Self {
        DriveLimits {
            max_angular_accel: Self::DEFAULT_MAX_ANGULAR_ACCEL,
            max_linear_accel: Self::DEFAULT_MAX_LINEAR_ACCEL,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }
}

impl fmt::Display for DriveLimits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DriveLimits (angular: {:.3}, linear: {:.3}, tolerance: {:e})",
            self.max_angular_accel, self.max_linear_accel, self.tolerance
        )
    }
}

/// Everything a trajectory needs besides its motion: limits, series order, wheel geometry
/// and the breakpoint merge epsilon.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileConfig {
    limits: DriveLimits,
    series: SeriesOrder,
    wheel_base: WheelBase,
    merge_epsilon: f64,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        ProfileConfig {
            limits: DriveLimits::default(),
            series: SeriesOrder::default(),
            wheel_base: WheelBase::default(),
            merge_epsilon: Self::DEFAULT_MERGE_EPSILON,
        }
    }
}

impl ProfileConfig {
    /// Breakpoints closer together than this (s) are collapsed into one.
    pub const DEFAULT_MERGE_EPSILON: f64 = 1e-4;

    /// Replace the acceleration limits.
    pub fn with_limits(self, limits: DriveLimits) -> Self {
        ProfileConfig { limits, ..self }
    }

    /// Replace the series order used for curved intervals.
    pub fn with_series(self, series: SeriesOrder) -> Self {
        ProfileConfig { series, ..self }
    }

    /// Replace the wheel geometry.
    pub fn with_wheel_base(self, wheel_base: WheelBase) -> Self {
        ProfileConfig { wheel_base, ..self }
    }

    /// Replace the breakpoint merge epsilon.
    ///
    /// # Errors
    ///
    /// Returns `Err(ProfileError::InvalidLimit)` if `epsilon` is not positive and finite.
    pub fn with_merge_epsilon(self, epsilon: f64) -> Result<Self, ProfileError> {
        let merge_epsilon = positive_finite("merge_epsilon", epsilon)?;
        Ok(ProfileConfig {
            merge_epsilon,
            ..self
        })
    }

    /// Returns the acceleration limits.
    pub fn limits(&self) -> &DriveLimits {
        &self.limits
    }

    /// Returns the series order.
    pub fn series(&self) -> SeriesOrder {
        self.series
    }

    /// Returns the wheel geometry.
    pub fn wheel_base(&self) -> WheelBase {
        self.wheel_base
    }

    /// Returns the breakpoint merge epsilon.
    pub fn merge_epsilon(&self) -> f64 {
        self.merge_epsilon
    }
}

fn positive_finite(name: &'static str, value: f64) -> Result<f64, ProfileError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ProfileError::InvalidLimit { name })
    }
}
