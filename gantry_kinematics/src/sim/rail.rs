//! Simulated rails and rail sources.

use gantry_common::axis::Axis;
use gantry_common::config::{ConfigError, PrinterConfig, RailConfig, rail_section};
use gantry_common::coord::Coord;
use gantry_common::homing::HomingInfo;
use tracing::trace;

use crate::capability::{Rail, RailSource};
use crate::error::KinematicsError;
use crate::stepper::StepperKinematics;

/// Rail with a tracked position and no hardware behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct SimRail {
    name: String,
    range: (f64, f64),
    homing_info: HomingInfo,
    steppers: Vec<String>,
    kinematics: Option<StepperKinematics>,
    position: f64,
}

impl SimRail {
    /// Single-stepper rail named after its stepper.
    pub fn new(name: &str, range: (f64, f64), homing_info: HomingInfo) -> Self {
        Self {
            name: name.to_string(),
            range,
            homing_info,
            steppers: vec![name.to_string()],
            kinematics: None,
            position: 0.0,
        }
    }

    /// Rail described by a `[stepper_<letter>]` section, named after its
    /// primary stepper.
    pub fn from_config(section: &str, config: &RailConfig) -> Result<Self, ConfigError> {
        config.validate(section)?;
        let steppers = config.stepper_names(section);
        let name = steppers
            .first()
            .cloned()
            .unwrap_or_else(|| section.to_string());
        Ok(Self {
            name,
            range: config.range(),
            homing_info: config.homing_info(section)?,
            steppers,
            kinematics: None,
            position: 0.0,
        })
    }
}

impl Rail for SimRail {
    fn name(&self) -> &str {
        &self.name
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn homing_info(&self) -> HomingInfo {
        self.homing_info
    }

    fn setup_kinematics(&mut self, kinematics: StepperKinematics) {
        self.kinematics = Some(kinematics);
    }

    fn set_position(&mut self, position: &Coord) {
        if let Some(k) = self.kinematics {
            self.position = k.position_of(position);
            trace!("{} position = {:.3}", self.name, self.position);
        }
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn steppers(&self) -> &[String] {
        &self.steppers
    }
}

/// Resolves `SimRail`s from a parsed printer configuration.
#[derive(Debug, Clone, Copy)]
pub struct ConfigRailSource<'a> {
    config: &'a PrinterConfig,
}

impl<'a> ConfigRailSource<'a> {
    pub fn new(config: &'a PrinterConfig) -> Self {
        Self { config }
    }
}

impl RailSource for ConfigRailSource<'_> {
    type Rail = SimRail;

    fn axis_count(&self) -> usize {
        self.config.printer.axis_count
    }

    fn lookup_rail(&mut self, axis: Axis) -> Result<SimRail, KinematicsError> {
        let section = rail_section(axis);
        let rail = self
            .config
            .rails
            .get(&section)
            .ok_or(KinematicsError::MissingRail(axis.label()))?;
        Ok(SimRail::from_config(&section, rail)?)
    }
}

/// Hands out a fixed list of rails, one per axis in order.
#[derive(Debug)]
pub struct StaticRailSource<R> {
    rails: Vec<Option<R>>,
}

impl<R> StaticRailSource<R> {
    pub fn new(rails: Vec<R>) -> Self {
        Self {
            rails: rails.into_iter().map(Some).collect(),
        }
    }
}

impl<R: Rail> RailSource for StaticRailSource<R> {
    type Rail = R;

    fn axis_count(&self) -> usize {
        self.rails.len()
    }

    fn lookup_rail(&mut self, axis: Axis) -> Result<R, KinematicsError> {
        self.rails
            .get_mut(axis.index())
            .and_then(Option::take)
            .ok_or(KinematicsError::MissingRail(axis.label()))
    }
}
