//! Direct form: a full turn-and-drive profile from seven numbers.
//!
//! The angular axis accelerates from rest-like conditions at the limit until it reaches the
//! start angular velocity, ramps linearly to the end angular velocity over the middle time,
//! then decelerates to zero exactly where the requested heading change is used up. The
//! linear axis ramps to the cruise speed, cruises, then ramps to the end speed so that both
//! axes finish together.

use core::fmt;

use tracing::debug;

use crate::config::DriveLimits;
use crate::error::ProfileError;
use crate::segment::{AccelerationSegment, Axis, InitialMotion};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optional zero-acceleration holds inserted into a direct-form profile.
///
/// All values are durations in seconds and default to zero.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coasts {
    /// Before the angular acceleration phase.
    pub angular_start: f64,
    /// At the moment the angular velocity crosses zero inside the middle phase.
    /// Ignored when no such crossing exists.
    pub angular_middle: f64,
    /// After the angular deceleration phase.
    pub angular_end: f64,
    /// Before the speed-up phase.
    pub linear_start: f64,
    /// After the slow-down phase.
    pub linear_end: f64,
}

/// Inputs of the direct form.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectParams {
    /// Angular velocity reached at the end of the acceleration phase (rad/s).
    pub omega_start: f64,
    /// Angular velocity at the start of the deceleration phase (rad/s).
    pub omega_end: f64,
    /// Duration of the middle phase (s).
    pub middle_time: f64,
    /// Linear speed at `t = 0`.
    pub start_speed: f64,
    /// Linear speed held between the speed-up and slow-down phases.
    pub cruise_speed: f64,
    /// Linear speed at the end of the profile.
    pub end_speed: f64,
    /// Total heading change (rad).
    pub delta_theta: f64,
    /// Zero-acceleration holds.
    pub coasts: Coasts,
}

impl DirectParams {
    /// Construct direct-form parameters without coasts.
    pub const fn new(
        omega_start: f64,
        omega_end: f64,
        middle_time: f64,
        start_speed: f64,
        cruise_speed: f64,
        end_speed: f64,
        delta_theta: f64,
    ) -> Self {
        DirectParams {
            omega_start,
            omega_end,
            middle_time,
            start_speed,
            cruise_speed,
            end_speed,
            delta_theta,
            coasts: Coasts {
                angular_start: 0.0,
                angular_middle: 0.0,
                angular_end: 0.0,
                linear_start: 0.0,
                linear_end: 0.0,
            },
        }
    }

    /// Replace the coasts.
    pub fn with_coasts(self, coasts: Coasts) -> Self {
        DirectParams { coasts, ..self }
    }

    /// Check the parameters against `limits` without building anything.
    ///
    /// Runs the same derivation as [`DirectParams::plan`], so a profile built from
    /// parameters that pass here never fails on feasibility.
    ///
    /// # Errors
    ///
    /// See [`DirectParams::plan`].
    pub fn validate(&self, limits: &DriveLimits) -> Result<(), ProfileError> {
        self.plan(limits).map(|_| ())
    }

    /// Returns `true` when [`DirectParams::validate`] succeeds.
    pub fn is_feasible(&self, limits: &DriveLimits) -> bool {
        self.validate(limits).is_ok()
    }

    /// Derive phase durations and rates.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if an input is not finite, or a duration is negative.
    /// * `DirectionMismatch` if `delta_theta` and `omega_start` have opposite signs.
    /// * `InfeasibleDeceleration` if the deceleration phase would need a negative duration
    ///   or a rate above the angular limit.
    /// * `InfeasibleRateChange` if the middle phase needs a rate above the angular limit.
    /// * `UnreachableCruiseSpeed` if the linear ramps do not fit in the angular duration.
    pub fn plan(&self, limits: &DriveLimits) -> Result<DirectPlan, ProfileError> {
        let result = self.derive(limits);
        match &result {
            Ok(plan) => debug!(
                duration = plan.duration,
                cruise_time = plan.cruise_time,
                "derived direct-form plan"
            ),
            Err(error) => debug!(%error, params = ?self, "rejected direct-form parameters"),
        }
        result
    }

    fn derive(&self, limits: &DriveLimits) -> Result<DirectPlan, ProfileError> {
        self.check_inputs()?;
        let max_angular = limits.max_angular_accel();
        let tolerance = limits.tolerance();
        let (w1, w2) = (self.omega_start, self.omega_end);

        if self.delta_theta * w1 < 0.0 {
            return Err(ProfileError::DirectionMismatch {
                delta_theta: self.delta_theta,
                omega_start: w1,
            });
        }

        let angular_accel = toward(max_angular, w1);
        let accel_time = w1 / angular_accel;
        let middle_time = self.middle_time;

        // Heading left for the deceleration triangle, doubled.
        let remaining = 2.0 * self.delta_theta - accel_time * w1 - middle_time * (w1 + w2);
        let (decel_time, angular_decel) = if w2 == 0.0 {
            if remaining.abs() > tolerance {
                return Err(ProfileError::InfeasibleDeceleration {
                    rate: f64::INFINITY,
                    decel_time: 0.0,
                    max: max_angular,
                });
            }
            (0.0, 0.0)
        } else {
            let decel_time = remaining / w2;
            let angular_decel = -w2 / decel_time;
            if !(decel_time >= 0.0 && angular_decel.abs() <= max_angular + tolerance) {
                return Err(ProfileError::InfeasibleDeceleration {
                    rate: angular_decel,
                    decel_time,
                    max: max_angular,
                });
            }
            (decel_time, angular_decel)
        };

        let middle_rate = if middle_time > 0.0 {
            (w2 - w1) / middle_time
        } else if w1 == w2 {
            0.0
        } else {
            f64::INFINITY
        };
        if middle_rate.abs() > max_angular + tolerance {
            return Err(ProfileError::InfeasibleRateChange {
                rate: middle_rate,
                max: max_angular,
            });
        }

        let mut crossing_time = if middle_rate == 0.0 {
            0.0
        } else {
            -w1 / middle_rate
        };
        let mut middle_coast = self.coasts.angular_middle;
        if !(crossing_time > 0.0 && crossing_time < middle_time) {
            crossing_time = 0.0;
            middle_coast = 0.0;
        }

        let duration = accel_time
            + middle_time
            + decel_time
            + self.coasts.angular_start
            + middle_coast
            + self.coasts.angular_end;

        let max_linear = limits.max_linear_accel();
        let speed_up = self.cruise_speed - self.start_speed;
        let slow_down = self.end_speed - self.cruise_speed;
        let linear_accel = toward(max_linear, speed_up);
        let linear_decel = toward(max_linear, slow_down);
        let speed_up_time = speed_up / linear_accel;
        let slow_down_time = slow_down / linear_decel;
        let cruise_time = duration
            - speed_up_time
            - slow_down_time
            - self.coasts.linear_start
            - self.coasts.linear_end;
        if cruise_time < 0.0 {
            return Err(ProfileError::UnreachableCruiseSpeed { cruise_time });
        }

        Ok(DirectPlan {
            start_speed: self.start_speed,
            accel_time,
            angular_accel,
            crossing_time,
            middle_coast,
            middle_time,
            middle_rate,
            decel_time,
            angular_decel,
            speed_up_time,
            linear_accel,
            cruise_time,
            slow_down_time,
            linear_decel,
            duration,
            coasts: self.coasts,
        })
    }

    fn check_inputs(&self) -> Result<(), ProfileError> {
        let values = [
            ("omega_start", self.omega_start),
            ("omega_end", self.omega_end),
            ("middle_time", self.middle_time),
            ("start_speed", self.start_speed),
            ("cruise_speed", self.cruise_speed),
            ("end_speed", self.end_speed),
            ("delta_theta", self.delta_theta),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(ProfileError::InvalidParameter {
                    name,
                    reason: "must be finite",
                });
            }
        }
        let durations = [
            ("middle_time", self.middle_time),
            ("coasts.angular_start", self.coasts.angular_start),
            ("coasts.angular_middle", self.coasts.angular_middle),
            ("coasts.angular_end", self.coasts.angular_end),
            ("coasts.linear_start", self.coasts.linear_start),
            ("coasts.linear_end", self.coasts.linear_end),
        ];
        for (name, value) in durations {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ProfileError::InvalidParameter {
                    name,
                    reason: "must be a finite, non-negative duration",
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for DirectParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DirectParams (ω: {:.3} -> {:.3} over {:.3} s, speed: {:.3}/{:.3}/{:.3}, Δθ: {:.4})",
            self.omega_start,
            self.omega_end,
            self.middle_time,
            self.start_speed,
            self.cruise_speed,
            self.end_speed,
            self.delta_theta
        )
    }
}

/// `limit` carrying the sign of `direction`, positive when `direction` is zero.
fn toward(limit: f64, direction: f64) -> f64 {
    if direction < 0.0 { -limit } else { limit }
}

/// Phase durations and rates derived from [`DirectParams`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectPlan {
    /// Linear speed at `t = 0`.
    pub start_speed: f64,
    /// Angular acceleration phase duration (s).
    pub accel_time: f64,
    /// Angular acceleration phase rate (rad/s²).
    pub angular_accel: f64,
    /// Time into the middle phase at which the angular velocity crosses zero, or 0 if it
    /// does not cross strictly inside the phase.
    pub crossing_time: f64,
    /// Middle coast actually inserted at the crossing.
    pub middle_coast: f64,
    /// Middle phase duration (s).
    pub middle_time: f64,
    /// Middle phase rate (rad/s²).
    pub middle_rate: f64,
    /// Angular deceleration phase duration (s).
    pub decel_time: f64,
    /// Angular deceleration phase rate (rad/s²).
    pub angular_decel: f64,
    /// Speed-up phase duration (s).
    pub speed_up_time: f64,
    /// Speed-up phase rate.
    pub linear_accel: f64,
    /// Cruise duration (s).
    pub cruise_time: f64,
    /// Slow-down phase duration (s).
    pub slow_down_time: f64,
    /// Slow-down phase rate.
    pub linear_decel: f64,
    /// Total profile duration (s).
    pub duration: f64,
    /// Coasts the plan was derived with.
    pub coasts: Coasts,
}

impl DirectPlan {
    /// Motion at `t = 0`: the start speed and no rotation.
    pub fn initial_motion(&self) -> InitialMotion {
        InitialMotion::at_speed(self.start_speed)
    }

    /// Segment list in axis order.
    ///
    /// Angular: start coast, acceleration, middle up to the crossing, middle coast, rest of
    /// the middle, deceleration, end coast. Linear: start coast, speed-up, cruise, slow-down,
    /// end coast. Zero-length entries are kept; the timeline drops them.
    pub fn segments(&self) -> Vec<AccelerationSegment> {
        vec![
            AccelerationSegment::coast(self.coasts.angular_start, Axis::Angular),
            AccelerationSegment::angular(self.accel_time, self.angular_accel),
            AccelerationSegment::angular(self.crossing_time, self.middle_rate),
            AccelerationSegment::coast(self.middle_coast, Axis::Angular),
            AccelerationSegment::angular(self.middle_time - self.crossing_time, self.middle_rate),
            AccelerationSegment::angular(self.decel_time, self.angular_decel),
            AccelerationSegment::coast(self.coasts.angular_end, Axis::Angular),
            AccelerationSegment::coast(self.coasts.linear_start, Axis::Linear),
            AccelerationSegment::linear(self.speed_up_time, self.linear_accel),
            AccelerationSegment::coast(self.cruise_time, Axis::Linear),
            AccelerationSegment::linear(self.slow_down_time, self.linear_decel),
            AccelerationSegment::coast(self.coasts.linear_end, Axis::Linear),
        ]
    }
}
