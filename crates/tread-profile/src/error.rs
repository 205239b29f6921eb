//! This module defines the error types used by the `tread-profile` crate.

use thiserror::Error;

/// Reasons a motion profile cannot be built.
///
/// Every variant is a caller error detected before any trajectory state is computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProfileError {
    /// The requested heading change turns against the starting angular velocity.
    #[error(
        "heading change {delta_theta} has the opposite sign of the starting angular velocity {omega_start}"
    )]
    DirectionMismatch {
        /// Requested total heading change (rad).
        delta_theta: f64,
        /// Requested starting angular velocity (rad/s).
        omega_start: f64,
    },

    /// Slowing the rotation down within the remaining heading needs more angular
    /// deceleration than allowed, or a negative amount of time.
    #[error("angular deceleration {rate} over {decel_time} s is infeasible (limit {max})")]
    InfeasibleDeceleration {
        /// Derived deceleration rate (rad/s²).
        rate: f64,
        /// Derived deceleration time (s).
        decel_time: f64,
        /// Configured angular acceleration limit (rad/s²).
        max: f64,
    },

    /// Moving from the start to the end angular velocity within the middle time needs more
    /// angular acceleration than allowed.
    #[error("middle-phase angular acceleration {rate} exceeds the limit of {max}")]
    InfeasibleRateChange {
        /// Derived middle-phase rate (rad/s²).
        rate: f64,
        /// Configured angular acceleration limit (rad/s²).
        max: f64,
    },

    /// The linear axis cannot reach the cruise speed and return to the end speed within the
    /// time taken by the angular axis.
    #[error("cruise speed is unreachable: derived cruise time {cruise_time} s is negative")]
    UnreachableCruiseSpeed {
        /// Derived cruise time (s).
        cruise_time: f64,
    },

    /// A construction input is not usable at all.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A general-form segment is malformed.
    #[error("invalid segment #{index}: {reason}")]
    InvalidSegment {
        /// Position of the segment in the caller's list.
        index: usize,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A configured limit is not positive and finite.
    #[error("invalid limit `{name}`: must be positive and finite")]
    InvalidLimit {
        /// Limit name.
        name: &'static str,
    },
}
