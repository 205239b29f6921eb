#![warn(missing_docs)]
#![doc = "Constant-acceleration motion profiles for differential-drive robots."]
#![doc = ""]
#![doc = "A profile is an ordered list of angular and linear acceleration segments. It can be"]
#![doc = "given directly, or derived from seven numbers (start and end angular velocity, middle"]
#![doc = "time, start, cruise and end speed, heading change) under acceleration limits. The"]
#![doc = "resulting [`Trajectory`] answers pose, velocity, acceleration and wheel queries at"]
#![doc = "any time in closed form."]

pub mod config;
pub mod direct;
pub mod error;
pub mod sample;
pub mod segment;
pub mod timeline;
pub mod trajectory;

pub use config::{DriveLimits, ProfileConfig};
pub use direct::{Coasts, DirectParams, DirectPlan};
pub use error::ProfileError;
pub use sample::{Sample, Samples};
pub use segment::{AccelerationSegment, Axis, InitialMotion};
pub use timeline::{Breakpoint, Timeline};
pub use trajectory::{BoundaryState, Pose, Trajectory};

pub use tread_series::{
    Point, SeriesOrder, WheelBase, WheelDistances, WheelPositions, WheelSpeeds,
};
