//! Merges per-axis segment lists into one ordered list of breakpoints.

use crate::error::ProfileError;
use crate::segment::{AccelerationSegment, Axis};

/// Start of an interval during which both accelerations are constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoint {
    /// Interval start (s).
    pub time: f64,
    /// Angular acceleration over the interval.
    pub angular_rate: f64,
    /// Linear acceleration over the interval.
    pub linear_rate: f64,
}

/// Ordered breakpoints plus the total duration.
///
/// The first breakpoint is always at `t = 0`. Consecutive breakpoints are at least the
/// merge epsilon apart, and none lies within the epsilon of the end except the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    breakpoints: Vec<Breakpoint>,
    duration: f64,
}

#[derive(Debug, Clone, Copy)]
struct Span {
    start: f64,
    end: f64,
    rate: f64,
}

#[derive(Debug, Default)]
struct AxisSpans {
    spans: Vec<Span>,
    end: f64,
}

impl AxisSpans {
    fn push(&mut self, duration: f64, rate: f64) {
        let start = self.end;
        self.end += duration;
        self.spans.push(Span {
            start,
            end: self.end,
            rate,
        });
    }

    /// Rate of the span containing `t`, or 0 once the axis has run out.
    fn rate_at(&self, t: f64) -> f64 {
        let index = self.spans.partition_point(|s| s.end <= t);
        match self.spans.get(index) {
            Some(span) if span.start <= t => span.rate,
            _ => 0.0,
        }
    }
}

impl Timeline {
    /// Merge `segments` into breakpoints.
    ///
    /// Segments of each axis run back to back in list order. Zero-length segments are
    /// dropped. Every segment start is a boundary, and so is the end of an axis that finishes
    /// before the other. Boundaries closer than `epsilon` to the previous breakpoint, or to the end,
    /// are collapsed. Each breakpoint takes the rates found at the midpoint of the interval
    /// it starts; an axis whose segments have all ended contributes 0.
    ///
    /// # Errors
    ///
    /// Returns `Err(ProfileError::InvalidSegment)` if a duration is negative or not finite,
    /// or a rate is not finite.
    pub fn merge(segments: &[AccelerationSegment], epsilon: f64) -> Result<Self, ProfileError> {
        let mut angular = AxisSpans::default();
        let mut linear = AxisSpans::default();
        for (index, segment) in segments.iter().enumerate() {
            if !(segment.duration.is_finite() && segment.duration >= 0.0) {
                return Err(ProfileError::InvalidSegment {
                    index,
                    reason: "duration must be finite and non-negative",
                });
            }
            if !segment.rate.is_finite() {
                return Err(ProfileError::InvalidSegment {
                    index,
                    reason: "rate must be finite",
                });
            }
            if segment.duration == 0.0 {
                continue;
            }
            match segment.axis {
                Axis::Angular => angular.push(segment.duration, segment.rate),
                Axis::Linear => linear.push(segment.duration, segment.rate),
            }
        }

        let duration = angular.end.max(linear.end);
        // The shorter axis ends early and falls back to zero there.
        let mut boundaries: Vec<f64> = angular
            .spans
            .iter()
            .chain(&linear.spans)
            .map(|s| s.start)
            .chain([angular.end, linear.end])
            .collect();
        boundaries.sort_by(f64::total_cmp);

        let mut times = vec![0.0];
        let mut last = 0.0;
        for boundary in boundaries {
            if boundary - last >= epsilon && duration - boundary >= epsilon {
                times.push(boundary);
                last = boundary;
            }
        }

        let breakpoints = times
            .iter()
            .enumerate()
            .map(|(i, &time)| {
                let next = times.get(i + 1).copied().unwrap_or(duration);
                let middle = (time + next) / 2.0;
                Breakpoint {
                    time,
                    angular_rate: angular.rate_at(middle),
                    linear_rate: linear.rate_at(middle),
                }
            })
            .collect();

        Ok(Timeline {
            breakpoints,
            duration,
        })
    }

    /// Returns the breakpoints in time order.
    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.breakpoints
    }

    /// Returns the total duration, the longest axis total.
    pub fn duration(&self) -> f64 {
        self.duration
    }
}
