//! Capabilities consumed from external collaborators.
//!
//! The engine never talks to hardware directly. It is handed:
//! - a [`RailSource`] that resolves one [`Rail`] per configured axis,
//! - a [`Toolhead`] that owns the trajectory queue and step generation,
//! - a [`HomingController`] that physically performs homing moves.
//!
//! # Lifecycle
//!
//! 1. `CartesianKinematics::new()` pulls rails from the `RailSource`,
//!    registers step generators and subscribes to events on the `Toolhead`.
//! 2. `check_move()` runs on the planning path for every move.
//! 3. `home()` hands homing targets to the `HomingController`.

use gantry_common::axis::Axis;
use gantry_common::consts::DEFAULT_AXIS_COUNT;
use gantry_common::coord::{Coord, TargetCoord};
use gantry_common::homing::HomingInfo;

use crate::error::{HomingError, KinematicsError};
use crate::stepper::StepperKinematics;

/// One stepper group bound to a single axis.
pub trait Rail {
    /// Rail name, also the key used in stepper position maps.
    fn name(&self) -> &str;

    /// Travel bounds `(position_min, position_max)`.
    fn range(&self) -> (f64, f64);

    /// Endstop position and approach direction.
    fn homing_info(&self) -> HomingInfo;

    /// Install the position callback used by every stepper on the rail.
    fn setup_kinematics(&mut self, kinematics: StepperKinematics);

    /// Reset the tracked stepper positions from a logical coordinate.
    fn set_position(&mut self, position: &Coord);

    /// Currently tracked rail position.
    fn position(&self) -> f64;

    /// Names of the steppers driven by this rail.
    fn steppers(&self) -> &[String];
}

/// Resolves rails from configuration.
pub trait RailSource {
    type Rail: Rail;

    /// Number of configured axes.
    fn axis_count(&self) -> usize {
        DEFAULT_AXIS_COUNT
    }

    /// Rail bound to `axis`.
    ///
    /// # Errors
    /// A configuration error when the rail is missing or invalid.
    fn lookup_rail(&mut self, axis: Axis) -> Result<Self::Rail, KinematicsError>;
}

/// Events published by the surrounding printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrinterEvent {
    /// Stepper drivers were disabled; positions are no longer trustworthy.
    MotorOff,
}

/// Per-stepper step generation hook handed to the toolhead.
#[derive(Debug, Clone, PartialEq)]
pub struct StepGenerator {
    pub stepper: String,
    pub kinematics: StepperKinematics,
}

/// The trajectory planner side of the machine.
pub trait Toolhead {
    /// `(max_velocity, max_accel)`.
    fn max_velocity(&self) -> (f64, f64);

    /// Attach a stepper to the trajectory queue.
    fn register_step_generator(&mut self, generator: StepGenerator);

    /// Deliver `event` to the kinematics when it fires.
    fn subscribe(&mut self, event: PrinterEvent);
}

/// Drives rails toward their endstops.
///
/// `home_rails` blocks until the move physically completes.
pub trait HomingController {
    fn home_rails(
        &mut self,
        rails: &mut [&mut dyn Rail],
        forcepos: &TargetCoord,
        homepos: &TargetCoord,
    ) -> Result<(), HomingError>;
}
