//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load the printer TOML
//! configuration: a `[printer]` table, one `[stepper_<letter>]` table per
//! configured axis, and an optional `[shared]` table.
//!
//! # Usage
//!
//! ```rust,no_run
//! use gantry_common::config::{ConfigLoader, ConfigError, PrinterConfig};
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let config = PrinterConfig::load(Path::new("printer.toml"))?;
//!     config.validate()?;
//!     println!("axes: {}", config.printer.axis_count);
//!     Ok(())
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::axis::Axis;
use crate::consts::{DEFAULT_AXIS_COUNT, MAX_AXES};
use crate::homing::{HomingDirection, HomingInfo};

/// Error type for configuration loading operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Semantic validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Log level for application logging.
///
/// Uses lowercase serde values for TOML compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Most verbose, detailed tracing information.
    Trace,
    /// Debug information useful during development.
    Debug,
    /// General information about application operation.
    #[default]
    Info,
    /// Warning messages for potentially problematic situations.
    Warn,
    /// Error messages for serious problems.
    Error,
}

impl LogLevel {
    /// Directive string understood by `EnvFilter`.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Common configuration fields shared across gantry applications.
///
/// # TOML Example
///
/// ```toml
/// [shared]
/// log_level = "debug"
/// service_name = "gantry-dry-run"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Logging verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Application instance identifier.
    pub service_name: String,
}

impl SharedConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationError` if `service_name` is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "service_name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Trait for loading configuration from TOML files.
///
/// Blanket-implemented for every `serde::de::DeserializeOwned` type.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}

// ─── Printer ────────────────────────────────────────────────────────

/// Global motion settings (`[printer]` table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrinterSection {
    /// Number of configured axes, `1..=8` (default: 8).
    #[serde(default = "default_axis_count")]
    pub axis_count: usize,
    /// Maximum toolhead velocity [mm/s].
    pub max_velocity: f64,
    /// Maximum toolhead acceleration [mm/s²].
    pub max_accel: f64,
}

fn default_axis_count() -> usize {
    DEFAULT_AXIS_COUNT
}

/// One `[stepper_<letter>]` table: the rail driving a single axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RailConfig {
    /// Lower travel bound [mm].
    #[serde(default)]
    pub position_min: f64,
    /// Upper travel bound [mm].
    pub position_max: f64,
    /// Endstop trigger position [mm].
    pub position_endstop: f64,
    /// Approach direction. Inferred from the endstop position when absent.
    #[serde(default)]
    pub homing_positive_dir: Option<bool>,
    /// Stepper names driven by this rail (default: the section name).
    #[serde(default)]
    pub steppers: Vec<String>,
}

impl RailConfig {
    /// Validate bounds and resolve the homing direction.
    pub fn validate(&self, section: &str) -> Result<(), ConfigError> {
        if !(self.position_min < self.position_max) {
            return Err(ConfigError::ValidationError(format!(
                "{section}: position_min {} must be below position_max {}",
                self.position_min, self.position_max
            )));
        }
        if self.position_endstop < self.position_min || self.position_endstop > self.position_max
        {
            return Err(ConfigError::ValidationError(format!(
                "{section}: position_endstop {} outside [{}, {}]",
                self.position_endstop, self.position_min, self.position_max
            )));
        }
        self.homing_direction(section)?;
        Ok(())
    }

    /// Configured or inferred approach direction.
    ///
    /// Without an explicit flag the endstop must sit exactly on one end of
    /// the travel range.
    pub fn homing_direction(&self, section: &str) -> Result<HomingDirection, ConfigError> {
        if let Some(positive) = self.homing_positive_dir {
            return Ok(HomingDirection::from_positive(positive));
        }
        if self.position_endstop == self.position_max {
            Ok(HomingDirection::Positive)
        } else if self.position_endstop == self.position_min {
            Ok(HomingDirection::Negative)
        } else {
            Err(ConfigError::ValidationError(format!(
                "{section}: unable to infer homing_positive_dir"
            )))
        }
    }

    pub fn homing_info(&self, section: &str) -> Result<HomingInfo, ConfigError> {
        Ok(HomingInfo::new(
            self.position_endstop,
            self.homing_direction(section)?,
        ))
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        (self.position_min, self.position_max)
    }

    /// Stepper names, defaulting to the section name.
    pub fn stepper_names(&self, section: &str) -> Vec<String> {
        if self.steppers.is_empty() {
            vec![section.to_string()]
        } else {
            self.steppers.clone()
        }
    }
}

/// Section name of the rail for `axis`.
pub fn rail_section(axis: Axis) -> String {
    format!("stepper_{}", axis.label())
}

/// Complete printer configuration.
///
/// # TOML Example
///
/// ```toml
/// [printer]
/// axis_count = 3
/// max_velocity = 300.0
/// max_accel = 3000.0
///
/// [stepper_x]
/// position_max = 200.0
/// position_endstop = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterConfig {
    pub printer: PrinterSection,
    #[serde(default)]
    pub shared: Option<SharedConfig>,
    /// `stepper_<letter>` tables keyed by section name.
    #[serde(flatten)]
    pub rails: BTreeMap<String, RailConfig>,
}

impl PrinterConfig {
    /// Parse from a TOML string (no validation).
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate the axis count, global limits and every configured rail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let count = self.printer.axis_count;
        if count == 0 || count > MAX_AXES {
            return Err(ConfigError::ValidationError(format!(
                "axis_count {count} out of range [1, {MAX_AXES}]"
            )));
        }
        if !(self.printer.max_velocity > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "max_velocity {} must be above 0",
                self.printer.max_velocity
            )));
        }
        if !(self.printer.max_accel > 0.0) {
            return Err(ConfigError::ValidationError(format!(
                "max_accel {} must be above 0",
                self.printer.max_accel
            )));
        }
        if let Some(shared) = &self.shared {
            shared.validate()?;
        }
        for axis in Axis::all(count) {
            let section = rail_section(axis);
            self.rail(axis)?.validate(&section)?;
        }
        for name in self.rails.keys() {
            let known = Axis::all(count).any(|a| rail_section(a) == *name);
            if !known {
                debug!("Ignoring rail section [{name}] beyond axis_count {count}");
            }
        }
        Ok(())
    }

    /// Rail configuration for `axis`.
    pub fn rail(&self, axis: Axis) -> Result<&RailConfig, ConfigError> {
        let section = rail_section(axis);
        self.rails.get(&section).ok_or_else(|| {
            ConfigError::ValidationError(format!("missing section [{section}]"))
        })
    }

    /// Log level from `[shared]`, or the default.
    pub fn log_level(&self) -> LogLevel {
        self.shared.as_ref().map(|s| s.log_level).unwrap_or_default()
    }
}
