//! Closed-form differential-drive trajectories.
//!
//! Re-exports the profile and series crates, and adds the application glue: TOML and
//! environment settings that produce a [`ProfileConfig`], and tracing setup.

pub mod settings;
pub mod telemetry;

pub use settings::Settings;
pub use tread_profile::{
    AccelerationSegment, Axis, BoundaryState, Breakpoint, Coasts, DirectParams, DirectPlan,
    DriveLimits, InitialMotion, Point, Pose, ProfileConfig, ProfileError, Sample, Samples,
    SeriesOrder, Timeline, Trajectory, WheelBase, WheelDistances, WheelPositions, WheelSpeeds,
};
pub use tread_series::{PhaseScale, SeriesError, integrate_segment, phase_offset};
