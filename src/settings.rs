use anyhow::Context;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::Deserialize;
use tracing::{error, info};

use tread_profile::{DriveLimits, ProfileConfig, SeriesOrder, WheelBase};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Environment variables starting with this prefix override file values,
/// e.g. `TREAD__LIMITS__MAX_LINEAR_ACCEL=50`.
pub const ENV_PREFIX: &str = "TREAD";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LimitSettings {
    pub max_angular_accel: f64,
    pub max_linear_accel: f64,
    pub tolerance: f64,
}

impl Default for LimitSettings {
    fn default() -> Self {
        LimitSettings {
            max_angular_accel: DriveLimits::DEFAULT_MAX_ANGULAR_ACCEL,
            max_linear_accel: DriveLimits::DEFAULT_MAX_LINEAR_ACCEL,
            tolerance: DriveLimits::DEFAULT_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RobotSettings {
    pub half_track: f64,
}

impl Default for RobotSettings {
    fn default() -> Self {
        RobotSettings {
            half_track: WheelBase::DEFAULT_HALF_TRACK,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SeriesSettings {
    pub terms: usize,
    pub merge_epsilon: f64,
}

impl Default for SeriesSettings {
    fn default() -> Self {
        SeriesSettings {
            terms: SeriesOrder::DEFAULT_TERMS,
            merge_epsilon: ProfileConfig::DEFAULT_MERGE_EPSILON,
        }
    }
}

/// Raw settings as read from TOML and the environment. Missing keys take library defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub limits: LimitSettings,
    pub robot: RobotSettings,
    pub series: SeriesSettings,
}

impl Settings {
    /// Load `path` (TOML, required) layered with `TREAD__` environment overrides.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        info!("Attempting to load settings from {}", path);
        let builder = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            );
        match Self::deserialize_from(builder) {
            Ok(settings) => {
                info!("Successfully loaded settings: {:?}", settings);
                Ok(settings)
            }
            Err(e) => {
                error!("Failed to load settings: {:#}", e);
                Err(e).with_context(|| format!("loading settings from {path}"))
            }
        }
    }

    /// Parse settings from a TOML string, without environment overrides.
    pub fn from_toml_str(toml: &str) -> anyhow::Result<Self> {
        let builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        Self::deserialize_from(builder)
    }

    fn deserialize_from(builder: ConfigBuilder<DefaultState>) -> anyhow::Result<Self> {
        let settings = builder
            .build()
            .context("building configuration sources")?
            .try_deserialize::<Settings>()
            .context("deserializing settings")?;
        Ok(settings)
    }

    /// Validate the raw values through the library constructors.
    pub fn profile_config(&self) -> anyhow::Result<ProfileConfig> {
        let limits = DriveLimits::new(self.limits.max_angular_accel, self.limits.max_linear_accel)
            .and_then(|l| l.with_tolerance(self.limits.tolerance))
            .context("invalid [limits]")?;
        let wheel_base = WheelBase::new(self.robot.half_track).context("invalid [robot]")?;
        let series = SeriesOrder::new(self.series.terms).context("invalid [series]")?;
        ProfileConfig::default()
            .with_limits(limits)
            .with_wheel_base(wheel_base)
            .with_series(series)
            .with_merge_epsilon(self.series.merge_epsilon)
            .context("invalid [series]")
    }
}
