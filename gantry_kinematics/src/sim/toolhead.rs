//! Simulated toolhead.
//!
//! Plays the planner's part around the engine: validates moves before
//! "queueing" them, evaluates the registered step generators at the end of
//! each move, and marks axes homed after a successful homing sequence.

use std::collections::HashMap;

use gantry_common::config::PrinterConfig;
use gantry_common::coord::Coord;
use tracing::debug;

use crate::capability::{HomingController, PrinterEvent, Rail, StepGenerator, Toolhead};
use crate::cartesian::CartesianKinematics;
use crate::error::{KinematicsError, MoveError};
use crate::homing::HomingSummary;
use crate::moves::PlannedMove;
use crate::stepper::TrapMove;

/// Toolhead with a flat stepper position map instead of a step queue.
#[derive(Debug, Clone)]
pub struct SimToolhead {
    max_velocity: f64,
    max_accel: f64,
    generators: Vec<StepGenerator>,
    subscriptions: Vec<PrinterEvent>,
    position: Coord,
    stepper_positions: HashMap<String, f64>,
    print_time: f64,
}

impl SimToolhead {
    pub fn new(max_velocity: f64, max_accel: f64) -> Self {
        Self {
            max_velocity,
            max_accel,
            generators: Vec::new(),
            subscriptions: Vec::new(),
            position: Coord::ZERO,
            stepper_positions: HashMap::new(),
            print_time: 0.0,
        }
    }

    pub fn from_config(config: &PrinterConfig) -> Self {
        Self::new(config.printer.max_velocity, config.printer.max_accel)
    }

    pub fn step_generators(&self) -> &[StepGenerator] {
        &self.generators
    }

    pub fn subscriptions(&self) -> &[PrinterEvent] {
        &self.subscriptions
    }

    /// Commanded logical position.
    pub fn position(&self) -> Coord {
        self.position
    }

    /// Stepper positions keyed by stepper name.
    pub fn stepper_positions(&self) -> &HashMap<String, f64> {
        &self.stepper_positions
    }

    /// Accumulated move time [s].
    pub fn print_time(&self) -> f64 {
        self.print_time
    }

    fn sync_steppers(&mut self, position: &Coord) {
        for g in &self.generators {
            self.stepper_positions
                .insert(g.stepper.clone(), g.kinematics.position_of(position));
        }
    }

    /// Home `axes` in order, then mark the homed axes on success.
    pub fn home<R: Rail, C: HomingController>(
        &mut self,
        kin: &mut CartesianKinematics<R>,
        axes: &[usize],
        controller: &mut C,
    ) -> Result<HomingSummary, KinematicsError> {
        let summary = kin.home(axes, controller)?;
        let homed: Vec<usize> = summary.axis_indices().collect();
        let position = summary.position(&self.position);
        kin.set_position(&position, &homed)?;
        self.position = position;
        self.sync_steppers(&position);
        Ok(summary)
    }

    /// Validate and execute a straight cruise move to `end`.
    pub fn move_to<R: Rail>(
        &mut self,
        kin: &CartesianKinematics<R>,
        end: Coord,
    ) -> Result<(), MoveError> {
        let m = PlannedMove::new(self.position, end);
        kin.check_move(&m)?;
        if !m.is_kinematic_move() {
            return Ok(());
        }

        let move_t = m.move_d / self.max_velocity;
        let trap = TrapMove::new(
            self.print_time,
            move_t,
            self.max_velocity,
            0.0,
            m.start_pos,
            m.axes_d * (1.0 / m.move_d),
        );
        for g in &self.generators {
            self.stepper_positions
                .insert(g.stepper.clone(), g.kinematics.calc_position(&trap, move_t));
        }
        self.position = end;
        self.print_time += move_t;
        debug!("Move done in {:.4}s, print_time={:.4}", move_t, self.print_time);
        Ok(())
    }

    /// Disable the motors, notifying the kinematics if it subscribed.
    pub fn motor_off<R: Rail>(&mut self, kin: &mut CartesianKinematics<R>) {
        if self.subscriptions.contains(&PrinterEvent::MotorOff) {
            kin.handle_event(PrinterEvent::MotorOff);
        }
    }
}

impl Toolhead for SimToolhead {
    fn max_velocity(&self) -> (f64, f64) {
        (self.max_velocity, self.max_accel)
    }

    fn register_step_generator(&mut self, generator: StepGenerator) {
        self.stepper_positions.insert(generator.stepper.clone(), 0.0);
        self.generators.push(generator);
    }

    fn subscribe(&mut self, event: PrinterEvent) {
        if !self.subscriptions.contains(&event) {
            self.subscriptions.push(event);
        }
    }
}
