//! Closed-form trajectory queries.
//!
//! A [`Trajectory`] caches the full motion state at every breakpoint. Any query at time `t`
//! finds the breakpoint at or before `t` and evaluates the constant-acceleration motion from
//! there, so every call costs one binary search plus one series evaluation.

use core::fmt;

use tracing::debug;
use tread_series::{
    Point, SeriesOrder, WheelBase, WheelDistances, WheelPositions, WheelSpeeds, integrate_segment,
};

use crate::config::ProfileConfig;
use crate::direct::DirectParams;
use crate::error::ProfileError;
use crate::segment::{AccelerationSegment, InitialMotion};
use crate::timeline::Timeline;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motion state at the start of an interval, plus the accelerations held over it.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryState {
    /// Breakpoint time (s).
    pub time: f64,
    /// Heading, accumulated without wrapping (rad).
    pub angle: f64,
    /// Angular velocity (rad/s).
    pub omega: f64,
    /// Linear speed.
    pub speed: f64,
    /// Body center.
    pub position: Point,
    /// Angular acceleration over the interval.
    pub angular_accel: f64,
    /// Linear acceleration over the interval.
    pub linear_accel: f64,
    /// Distance covered by each wheel since `t = 0`.
    pub wheel_distances: WheelDistances,
}

impl BoundaryState {
    fn angle_after(&self, dt: f64) -> f64 {
        self.angle + self.omega * dt + self.angular_accel * dt * dt / 2.0
    }

    fn omega_after(&self, dt: f64) -> f64 {
        self.omega + self.angular_accel * dt
    }

    fn speed_after(&self, dt: f64) -> f64 {
        self.speed + self.linear_accel * dt
    }

    fn position_after(&self, dt: f64, series: SeriesOrder) -> Point {
        let local = integrate_segment(
            dt,
            self.angular_accel,
            self.omega,
            self.linear_accel,
            self.speed,
            series,
        );
        self.position + local.rotated(self.angle)
    }

    fn wheel_distances_after(&self, dt: f64, wheel_base: WheelBase) -> WheelDistances {
        self.wheel_distances.advanced(
            wheel_base.wheel_speeds(self.speed, self.omega),
            wheel_base.wheel_speeds(self.speed_after(dt), self.omega_after(dt)),
            dt,
        )
    }

    /// State at `time`, which starts an interval held at the given accelerations.
    fn advance(
        &self,
        time: f64,
        angular_accel: f64,
        linear_accel: f64,
        series: SeriesOrder,
        wheel_base: WheelBase,
    ) -> BoundaryState {
        let dt = time - self.time;
        let angle = self.angle_after(dt);
        let omega = self.omega_after(dt);
        BoundaryState {
            time,
            angle,
            omega,
            speed: self.speed_after(dt),
            position: self.position_after(dt, series),
            angular_accel,
            linear_accel,
            wheel_distances: self.wheel_distances_after(dt, wheel_base),
        }
    }
}

/// Body pose at one instant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Body center.
    pub position: Point,
    /// Heading (rad).
    pub heading: f64,
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} facing {:.4} rad", self.position, self.heading)
    }
}

/// Immutable differential-drive trajectory starting at the origin facing +x.
///
/// Queries clamp `t` to `[0, duration]`. Accelerations are zero outside `[0, duration)`;
/// rates and positions hold their end values. A breakpoint time belongs to the interval it
/// starts.
///
/// A built trajectory never changes, so it can be shared between threads freely. It
/// serializes for export but is only constructed through the builders below.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    states: Vec<BoundaryState>,
    duration: f64,
    series: SeriesOrder,
    wheel_base: WheelBase,
}

impl Trajectory {
    /// Build a trajectory from direct-form parameters.
    ///
    /// # Errors
    ///
    /// Any error from [`DirectParams::plan`].
    pub fn direct(params: &DirectParams, config: &ProfileConfig) -> Result<Self, ProfileError> {
        let plan = params.plan(config.limits())?;
        Self::from_segments(plan.initial_motion(), &plan.segments(), config)
    }

    /// Build a trajectory from a general segment list.
    ///
    /// # Arguments
    ///
    /// * `initial`: Speed and angular velocity at `t = 0`.
    /// * `segments`: Angular and linear segments in any interleaving; each axis runs its own
    ///   segments back to back.
    /// * `config`: Series order, wheel geometry and merge epsilon. Limits are not enforced.
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if the initial motion is not finite.
    /// * `InvalidSegment` if a segment has a negative or non-finite duration, or a
    ///   non-finite rate.
    pub fn from_segments(
        initial: InitialMotion,
        segments: &[AccelerationSegment],
        config: &ProfileConfig,
    ) -> Result<Self, ProfileError> {
        if !initial.speed.is_finite() {
            return Err(ProfileError::InvalidParameter {
                name: "initial.speed",
                reason: "must be finite",
            });
        }
        if !initial.omega.is_finite() {
            return Err(ProfileError::InvalidParameter {
                name: "initial.omega",
                reason: "must be finite",
            });
        }
        let timeline = Timeline::merge(segments, config.merge_epsilon())?;
        Ok(Self::from_timeline(initial, &timeline, config))
    }

    /// Build a trajectory from an already merged timeline.
    pub fn from_timeline(
        initial: InitialMotion,
        timeline: &Timeline,
        config: &ProfileConfig,
    ) -> Self {
        let series = config.series();
        let wheel_base = config.wheel_base();
        let duration = timeline.duration();
        let mut breakpoints = timeline.breakpoints().iter();

        let (angular_accel, linear_accel) = breakpoints
            .next()
            .map_or((0.0, 0.0), |b| (b.angular_rate, b.linear_rate));
        let mut current = BoundaryState {
            time: 0.0,
            angle: 0.0,
            omega: initial.omega,
            speed: initial.speed,
            position: Point::ORIGIN,
            angular_accel,
            linear_accel,
            wheel_distances: WheelDistances::default(),
        };

        let mut states = Vec::with_capacity(timeline.breakpoints().len() + 1);
        for breakpoint in breakpoints {
            let next = current.advance(
                breakpoint.time,
                breakpoint.angular_rate,
                breakpoint.linear_rate,
                series,
                wheel_base,
            );
            states.push(current);
            current = next;
        }
        let terminal = current.advance(duration, 0.0, 0.0, series, wheel_base);
        states.push(current);
        states.push(terminal);

        debug!(
            breakpoints = states.len() - 1,
            duration,
            end = %terminal.position,
            heading = terminal.angle,
            "built trajectory"
        );

        Trajectory {
            states,
            duration,
            series,
            wheel_base,
        }
    }

    /// Returns the total duration (s).
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns the cached breakpoint states, ending with the terminal state at the duration.
    pub fn boundary_states(&self) -> &[BoundaryState] {
        &self.states
    }

    /// Returns the wheel geometry used for wheel queries.
    pub fn wheel_base(&self) -> WheelBase {
        self.wheel_base
    }

    /// The state governing `t` and the time elapsed since it, after clamping.
    fn locate(&self, t: f64) -> (&BoundaryState, f64) {
        let t = t.clamp(0.0, self.duration);
        let index = self
            .states
            .partition_point(|s| s.time <= t)
            .saturating_sub(1);
        let state = &self.states[index];
        (state, t - state.time)
    }

    /// Heading at `t` (rad), accumulated without wrapping.
    pub fn angle(&self, t: f64) -> f64 {
        let (state, dt) = self.locate(t);
        state.angle_after(dt)
    }

    /// Angular velocity at `t` (rad/s).
    pub fn angular_velocity(&self, t: f64) -> f64 {
        let (state, dt) = self.locate(t);
        state.omega_after(dt)
    }

    /// Angular acceleration at `t` (rad/s²). Zero before the start.
    pub fn angular_acceleration(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        self.locate(t).0.angular_accel
    }

    /// Linear speed at `t`.
    pub fn speed(&self, t: f64) -> f64 {
        let (state, dt) = self.locate(t);
        state.speed_after(dt)
    }

    /// Linear acceleration at `t`. Zero before the start.
    pub fn linear_acceleration(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        self.locate(t).0.linear_accel
    }

    /// Body center at `t`.
    pub fn position(&self, t: f64) -> Point {
        let (state, dt) = self.locate(t);
        state.position_after(dt, self.series)
    }

    /// Body center and heading at `t`.
    pub fn pose(&self, t: f64) -> Pose {
        let (state, dt) = self.locate(t);
        Pose {
            position: state.position_after(dt, self.series),
            heading: state.angle_after(dt),
        }
    }

    /// Wheel contact points at `t`.
    pub fn wheel_positions(&self, t: f64) -> WheelPositions {
        let pose = self.pose(t);
        self.wheel_base.wheel_positions(pose.position, pose.heading)
    }

    /// Wheel ground speeds at `t`.
    pub fn wheel_speeds(&self, t: f64) -> WheelSpeeds {
        let (state, dt) = self.locate(t);
        self.wheel_base
            .wheel_speeds(state.speed_after(dt), state.omega_after(dt))
    }

    /// Distance covered by each wheel between `0` and `t`.
    ///
    /// Wheel speeds are linear in time within an interval, so the trapezoid rule is exact
    /// for signed distance.
    pub fn wheel_distances(&self, t: f64) -> WheelDistances {
        let (state, dt) = self.locate(t);
        state.wheel_distances_after(dt, self.wheel_base)
    }
}

impl fmt::Display for Trajectory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trajectory ({:.4} s, {} intervals, ends at {})",
            self.duration,
            self.states.len() - 1,
            self.pose(self.duration)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DriveLimits;
    use crate::direct::Coasts;
    use crate::segment::AccelerationSegment as Seg;
    use crate::segment::Axis;
    use core::f64::consts::{FRAC_PI_3, PI};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;
    use std::thread;

    fn sample_params() -> DirectParams {
        DirectParams::new(1.35, 1.15, 0.2, 0.0, 20.0, 20.0, FRAC_PI_3)
    }

    fn build(params: DirectParams) -> Trajectory {
        Trajectory::direct(&params, &ProfileConfig::default()).unwrap()
    }

    /// Runge-Kutta integration of `(θ, ω, v, x, y)` straight from the raw segment list.
    ///
    /// Interval edges are every per-axis segment end; rates come from scanning each axis at
    /// the interval midpoint.
    fn reference_end(initial: InitialMotion, segments: &[AccelerationSegment]) -> (Point, f64) {
        let spans = |axis: Axis| {
            let mut start = 0.0;
            segments
                .iter()
                .filter(|s| s.axis == axis)
                .map(|s| {
                    start += s.duration;
                    (start - s.duration, start, s.rate)
                })
                .collect::<Vec<_>>()
        };
        let (angular, linear) = (spans(Axis::Angular), spans(Axis::Linear));
        let rate_at = |spans: &[(f64, f64, f64)], t: f64| {
            spans
                .iter()
                .find(|&&(start, end, _)| start <= t && t < end)
                .map_or(0.0, |&(_, _, rate)| rate)
        };
        let mut edges: Vec<f64> = angular.iter().chain(&linear).map(|&(_, end, _)| end).collect();
        edges.push(0.0);
        edges.sort_by(f64::total_cmp);

        let mut state = [0.0, initial.omega, initial.speed, 0.0, 0.0];
        for pair in edges.windows(2) {
            let length = pair[1] - pair[0];
            if length <= 0.0 {
                continue;
            }
            let middle = (pair[0] + pair[1]) / 2.0;
            let alpha = rate_at(angular.as_slice(), middle);
            let accel = rate_at(linear.as_slice(), middle);
            let derivative =
                |q: [f64; 5]| [q[1], alpha, accel, q[2] * q[0].cos(), q[2] * q[0].sin()];
            let offset = |q: [f64; 5], d: [f64; 5], h: f64| -> [f64; 5] {
                core::array::from_fn(|i| q[i] + h * d[i])
            };
            let steps = 2000;
            let h = length / steps as f64;
            for _ in 0..steps {
                let k1 = derivative(state);
                let k2 = derivative(offset(state, k1, h / 2.0));
                let k3 = derivative(offset(state, k2, h / 2.0));
                let k4 = derivative(offset(state, k3, h));
                state = core::array::from_fn(|i| {
                    state[i] + h * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) / 6.0
                });
            }
        }
        (Point::new(state[3], state[4]), state[0])
    }

    fn assert_matches_reference(
        initial: InitialMotion,
        segments: &[AccelerationSegment],
        trajectory: &Trajectory,
    ) {
        let end = trajectory.duration();
        let analytic = trajectory.position(end);
        let (numeric, heading) = reference_end(initial, segments);
        let scale = numeric.distance(Point::ORIGIN).max(1.0);
        assert!(
            analytic.distance(numeric) / scale < 1e-9,
            "analytic {analytic} vs reference {numeric}"
        );
        assert!((trajectory.angle(end) - heading).abs() < 1e-9);
    }

    fn assert_direct_matches_reference(params: DirectParams) {
        let plan = params.plan(&DriveLimits::default()).unwrap();
        let trajectory = build(params);
        assert_matches_reference(plan.initial_motion(), &plan.segments(), &trajectory);
    }

    fn assert_continuous(trajectory: &Trajectory) {
        for state in &trajectory.boundary_states()[1..] {
            let (before, at) = (state.time - 1e-9, state.time);
            assert!(
                trajectory.position(before).distance(trajectory.position(at)) < 1e-6,
                "position jumps at {at}"
            );
            assert!((trajectory.angle(before) - trajectory.angle(at)).abs() < 1e-6);
            assert!(
                (trajectory.angular_velocity(before) - trajectory.angular_velocity(at)).abs()
                    < 1e-6
            );
            assert!((trajectory.speed(before) - trajectory.speed(at)).abs() < 1e-6);
            let (l0, l1) = (trajectory.wheel_distances(before), trajectory.wheel_distances(at));
            assert!((l0.left - l1.left).abs() < 1e-6 && (l0.right - l1.right).abs() < 1e-6);
        }
    }

    #[test]
    fn test_sample_profile() {
        let trajectory = build(sample_params());
        let end = trajectory.duration();
        assert!((end - 1.549_063_711_094_246_7).abs() < 1e-12);
        assert!((trajectory.angle(end) - FRAC_PI_3).abs() < 1e-12);
        assert!(trajectory.angular_velocity(end).abs() < 1e-12);
        assert!((trajectory.speed(end) - 20.0).abs() < 1e-12);
        let p = trajectory.position(end);
        assert!((p.x - 21.142_309_690_050_045).abs() < 1e-6, "{p}");
        assert!((p.y - 17.676_658_329_143_603).abs() < 1e-6, "{p}");
    }

    #[test]
    fn test_construction_is_deterministic() {
        let a = build(sample_params());
        let b = build(sample_params());
        assert_eq!(a, b);
        assert_eq!(a.position(a.duration()), b.position(b.duration()));
    }

    #[test]
    fn test_rejected_parameters_build_nothing() {
        let params = DirectParams::new(1.0, 0.0, 0.0001, 0.0, 20.0, 0.0, -1.0);
        assert!(matches!(
            Trajectory::direct(&params, &ProfileConfig::default()),
            Err(ProfileError::DirectionMismatch { .. })
        ));
    }

    #[test]
    fn test_continuity_across_breakpoints() {
        assert_continuous(&build(sample_params()));
        assert_continuous(&build(
            DirectParams::new(2.0, -1.0, 0.6, 5.0, 30.0, 10.0, 0.4).with_coasts(Coasts {
                angular_start: 0.1,
                angular_middle: 0.2,
                angular_end: 0.1,
                linear_start: 0.05,
                linear_end: 0.05,
            }),
        ));
    }

    #[test]
    fn test_direct_profiles_match_reference() {
        for params in [
            sample_params(),
            DirectParams::new(2.0, -1.0, 0.6, 5.0, 30.0, 10.0, 0.4),
            DirectParams::new(-1.0, -1.0, 0.5, 0.0, 10.0, 0.0, -1.2),
            DirectParams::new(1.35, 1.15, 0.2, 20.0, 5.0, 15.0, FRAC_PI_3),
            // Gentle angular acceleration against a brisk turn rate.
            DirectParams::new(2.0, 1.9, 1.0, 0.0, 20.0, 20.0, 2.6),
            DirectParams::new(1.0, 0.9, 1.0, 0.0, 20.0, 20.0, 1.2),
        ] {
            assert_direct_matches_reference(params);
        }
    }

    #[test]
    fn test_slow_turn_ramp_at_speed_matches_reference() {
        let initial = InitialMotion::new(20.0, 1.0);
        let segments = [Seg::angular(1.0, 0.1)];
        let trajectory =
            Trajectory::from_segments(initial, &segments, &ProfileConfig::default()).unwrap();
        assert_matches_reference(initial, &segments, &trajectory);
        // A tenth of a rad/s² barely bends the unit-rate arc of radius 20.
        let arc = Point::new(20.0 * 1f64.sin(), 20.0 * (1.0 - 1f64.cos()));
        assert!(trajectory.position(1.0).distance(arc) < 0.5);
        // Mid-interval queries agree with the reference too.
        let (half, _) = reference_end(initial, &[Seg::angular(0.5, 0.1)]);
        assert!(trajectory.position(0.5).distance(half) < 1e-9);
    }

    #[test]
    fn test_general_profile_matches_reference() {
        let segments = [
            Seg::angular(0.5, 2.0),
            Seg::angular(0.7, 0.0),
            Seg::angular(0.5, -2.0),
            Seg::linear(0.3, 4.0),
            Seg::linear(1.0, 0.0),
            Seg::linear(0.4, -3.0),
        ];
        let initial = InitialMotion::new(1.0, 0.3);
        let trajectory =
            Trajectory::from_segments(initial, &segments, &ProfileConfig::default()).unwrap();
        assert!((trajectory.duration() - 1.7).abs() < 1e-12);
        assert_matches_reference(initial, &segments, &trajectory);
        assert_continuous(&trajectory);
        // Initial angular velocity carries through.
        assert_eq!(trajectory.angular_velocity(0.0), 0.3);
        assert!((trajectory.angular_velocity(1.7) - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_straight_line() {
        let segments = [Seg::linear(2.0, 1.5)];
        let trajectory =
            Trajectory::from_segments(InitialMotion::at_speed(1.0), &segments, &ProfileConfig::default())
                .unwrap();
        let p = trajectory.position(2.0);
        assert!((p.x - (2.0 + 1.5 * 2.0)).abs() < 1e-12);
        assert_eq!(p.y, 0.0);
        let d = trajectory.wheel_distances(2.0);
        assert!((d.left - 5.0).abs() < 1e-12 && (d.right - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_turn_closes_circle() {
        // Unit speed and unit turn rate for 2π: a full unit circle back to the origin.
        let segments = [Seg::angular(2.0 * PI, 0.0)];
        let trajectory = Trajectory::from_segments(
            InitialMotion::new(1.0, 1.0),
            &segments,
            &ProfileConfig::default(),
        )
        .unwrap();
        assert!(trajectory.position(2.0 * PI).distance(Point::ORIGIN) < 1e-12);
        let top = trajectory.position(PI);
        assert!(top.x.abs() < 1e-12 && (top.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_wheel_speed_identity() {
        let trajectory = build(DirectParams::new(2.0, -1.0, 0.6, 5.0, 30.0, 10.0, 0.4));
        let r = trajectory.wheel_base().half_track();
        for k in 0..=50 {
            let t = trajectory.duration() * k as f64 / 50.0;
            let (v, w) = (trajectory.speed(t), trajectory.angular_velocity(t));
            let speeds = trajectory.wheel_speeds(t);
            assert_eq!(speeds.left, v - w * r);
            assert_eq!(speeds.right, v + w * r);
        }
    }

    #[test]
    fn test_wheel_distances_track_heading_and_path() {
        // Speed stays positive, so the mean wheel distance is the path length.
        let trajectory = build(DirectParams::new(2.0, -1.0, 0.6, 5.0, 30.0, 10.0, 0.4));
        let r = trajectory.wheel_base().half_track();
        let mut path = 0.0;
        let mut last = 0.0;
        for state in &trajectory.boundary_states()[1..] {
            let dt = state.time - last;
            path += (trajectory.speed(last) + trajectory.speed(state.time)) * dt / 2.0;
            last = state.time;
        }
        let end = trajectory.duration();
        let d = trajectory.wheel_distances(end);
        assert!(((d.left + d.right) / 2.0 - path).abs() < 1e-9);
        assert!(((d.right - d.left) / (2.0 * r) - trajectory.angle(end)).abs() < 1e-9);
    }

    #[test]
    fn test_wheel_positions_straddle_center() {
        let trajectory = build(sample_params());
        let t = 0.7;
        let wheels = trajectory.wheel_positions(t);
        let center = trajectory.position(t);
        let mid = Point::new(
            (wheels.left.x + wheels.right.x) / 2.0,
            (wheels.left.y + wheels.right.y) / 2.0,
        );
        assert!(mid.distance(center) < 1e-12);
        assert!((wheels.left.distance(wheels.right) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_queries_clamp() {
        let trajectory = build(sample_params());
        let end = trajectory.duration();
        assert_eq!(trajectory.position(end + 5.0), trajectory.position(end));
        assert_eq!(trajectory.speed(end + 5.0), trajectory.speed(end));
        assert_eq!(trajectory.angular_acceleration(end), 0.0);
        assert_eq!(trajectory.linear_acceleration(end + 1.0), 0.0);
        assert_eq!(trajectory.position(-1.0), Point::ORIGIN);
        assert_eq!(trajectory.angle(-1.0), 0.0);
        assert_eq!(trajectory.speed(-1.0), 0.0);
        assert_eq!(trajectory.angular_acceleration(-1.0), 0.0);
        assert_eq!(trajectory.linear_acceleration(-1e-9), 0.0);
        assert!(trajectory.angular_acceleration(0.0) > 0.0);
        assert!(trajectory.linear_acceleration(0.0) > 0.0);
    }

    #[test]
    fn test_breakpoint_belongs_to_next_interval() {
        let trajectory = build(sample_params());
        let states = trajectory.boundary_states();
        for pair in states.windows(2) {
            let next = &pair[1];
            if next.time < trajectory.duration() {
                assert_eq!(trajectory.angular_acceleration(next.time), next.angular_accel);
                assert_eq!(trajectory.linear_acceleration(next.time), next.linear_accel);
            }
        }
    }

    #[test]
    fn test_empty_profile() {
        let trajectory = Trajectory::from_segments(
            InitialMotion::new(2.0, 1.0),
            &[],
            &ProfileConfig::default(),
        )
        .unwrap();
        assert_eq!(trajectory.duration(), 0.0);
        assert_eq!(trajectory.position(1.0), Point::ORIGIN);
        assert_eq!(trajectory.angular_acceleration(0.0), 0.0);
        assert_eq!(trajectory.speed(0.0), 2.0);
    }

    #[test]
    fn test_invalid_initial_motion() {
        assert!(matches!(
            Trajectory::from_segments(
                InitialMotion::new(f64::NAN, 0.0),
                &[],
                &ProfileConfig::default()
            ),
            Err(ProfileError::InvalidParameter {
                name: "initial.speed",
                ..
            })
        ));
    }

    #[test]
    fn test_validation_agrees_with_construction() {
        let limits = DriveLimits::default();
        let config = ProfileConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut cases: Vec<DirectParams> = (0..40)
            .map(|_| {
                DirectParams::new(
                    rng.random_range(-3.0..3.0),
                    rng.random_range(-3.0..3.0),
                    rng.random_range(0.0..1.0),
                    rng.random_range(0.0..40.0),
                    rng.random_range(0.0..40.0),
                    rng.random_range(0.0..40.0),
                    rng.random_range(-3.0..3.0),
                )
            })
            .collect();
        // Deceleration right at the limit, with and without the tolerance slack.
        let (w, middle) = (1.0, 0.5);
        for excess in [0.0, 0.0009, 0.0011] {
            let accel_time = w / limits.max_angular_accel();
            let decel_time = w / (limits.max_angular_accel() + excess);
            let delta = (accel_time * w + middle * 2.0 * w + decel_time * w) / 2.0;
            cases.push(DirectParams::new(w, w, middle, 0.0, 0.0, 0.0, delta));
        }
        cases.extend(limit_cases().into_iter().map(|(params, _)| params));
        cases.push(sample_params());
        cases.push(DirectParams::new(1.0, 0.0, 0.0001, 0.0, 20.0, 0.0, -1.0));

        let mut accepted = 0;
        for params in &cases {
            let valid = params.validate(&limits).is_ok();
            let built = Trajectory::direct(params, &config);
            assert_eq!(valid, built.is_ok(), "{params}");
            if let Ok(trajectory) = built {
                accepted += 1;
                assert!(trajectory.duration().is_finite() && trajectory.duration() >= 0.0);
                assert!((trajectory.angle(trajectory.duration()) - params.delta_theta).abs() < 2e-3);
            }
        }
        assert!(accepted >= 3);
        assert!(accepted < cases.len());
    }

    /// Profiles sitting on the middle-rate and cruise limits, with the expected verdict.
    fn limit_cases() -> Vec<(DirectParams, bool)> {
        let limits = DriveLimits::default();
        let max = limits.max_angular_accel();
        let mut cases = Vec::new();
        // Middle phase changing the rate at the limit, inside and past the tolerance.
        let (w1, middle) = (1.0, 1.0);
        for (excess, accepted) in [(0.0, true), (0.0009, true), (0.0011, false)] {
            let w2 = w1 + (max + excess) * middle;
            let accel_time = w1 / max;
            let decel_time = w2 / (0.9 * max);
            let delta = (accel_time * w1 + middle * (w1 + w2) + decel_time * w2) / 2.0;
            cases.push((DirectParams::new(w1, w2, middle, 0.0, 0.0, 0.0, delta), accepted));
        }
        // Linear ramp that just fits, or just overruns, the angular duration.
        let duration = build(sample_params()).duration();
        let ramp = limits.max_linear_accel() * duration;
        for (scale, accepted) in [(1.0 - 1e-9, true), (1.0 + 1e-9, false)] {
            let cruise = ramp * scale;
            let params = DirectParams::new(1.35, 1.15, 0.2, 0.0, cruise, cruise, FRAC_PI_3);
            cases.push((params, accepted));
        }
        cases
    }

    #[test]
    fn test_limit_boundaries() {
        let limits = DriveLimits::default();
        for (params, accepted) in limit_cases() {
            let result = Trajectory::direct(&params, &ProfileConfig::default());
            assert_eq!(result.is_ok(), accepted, "{params}");
            assert_eq!(params.is_feasible(&limits), accepted, "{params}");
            match result {
                Ok(trajectory) => {
                    let heading = trajectory.angle(trajectory.duration());
                    assert!((heading - params.delta_theta).abs() < 1e-9);
                }
                Err(error) => assert!(
                    matches!(
                        error,
                        ProfileError::InfeasibleRateChange { .. }
                            | ProfileError::UnreachableCruiseSpeed { .. }
                    ),
                    "{error}"
                ),
            }
        }
    }

    #[test]
    fn test_shared_between_threads() {
        let trajectory = Arc::new(build(sample_params()));
        let expected: Vec<Point> = (0..8).map(|k| trajectory.position(k as f64 * 0.2)).collect();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let trajectory = Arc::clone(&trajectory);
                thread::spawn(move || {
                    (0..8)
                        .map(|k| trajectory.position(k as f64 * 0.2))
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }
}
