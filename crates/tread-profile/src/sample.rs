//! Evenly spaced snapshots of a trajectory, for plotting and export.

use core::iter::FusedIterator;

use tread_series::{Point, WheelPositions, WheelSpeeds};

use crate::trajectory::Trajectory;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything a trajectory reports at one instant.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Query time (s), already clamped.
    pub time: f64,
    /// Body center.
    pub position: Point,
    /// Heading (rad).
    pub heading: f64,
    /// Linear speed.
    pub speed: f64,
    /// Angular velocity (rad/s).
    pub omega: f64,
    /// Wheel contact points.
    pub wheels: WheelPositions,
    /// Wheel ground speeds.
    pub wheel_speeds: WheelSpeeds,
}

impl Trajectory {
    /// Snapshot at `t`.
    pub fn sample(&self, t: f64) -> Sample {
        let time = t.clamp(0.0, self.duration());
        let pose = self.pose(time);
        Sample {
            time,
            position: pose.position,
            heading: pose.heading,
            speed: self.speed(time),
            omega: self.angular_velocity(time),
            wheels: self.wheel_base().wheel_positions(pose.position, pose.heading),
            wheel_speeds: self.wheel_speeds(time),
        }
    }

    /// `count` snapshots spread evenly over `[0, duration]`, both ends included.
    ///
    /// A single sample is taken at `t = 0`.
    pub fn samples(&self, count: usize) -> Samples<'_> {
        Samples {
            trajectory: self,
            next: 0,
            count,
        }
    }
}

/// Iterator returned by [`Trajectory::samples`].
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    trajectory: &'a Trajectory,
    next: usize,
    count: usize,
}

impl Iterator for Samples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        if self.next >= self.count {
            return None;
        }
        let t = if self.count == 1 {
            0.0
        } else {
            self.trajectory.duration() * self.next as f64 / (self.count - 1) as f64
        };
        self.next += 1;
        Some(self.trajectory.sample(t))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Samples<'_> {}

impl FusedIterator for Samples<'_> {}
