//! Cartesian kinematics engine.
//!
//! Maps the logical coordinate vector one-to-one onto rails, guards every
//! planned move against the [`AxisLimits`] table and orchestrates homing.
//!
//! ## Homed state
//!
//! | Event                              | Effect on limits                    |
//! |------------------------------------|-------------------------------------|
//! | construction                       | every axis unhomed                  |
//! | `set_position(p, homed)`           | axes in `homed` ← rail range        |
//! | `update_limits(i, r)`              | axis `i` ← `r`, only if homed       |
//! | `motor_off_handler()` / `MotorOff` | every axis unhomed                  |
//!
//! `home()` never touches the limits. The caller marks axes homed through
//! `set_position` once the homing controller reports success.

use std::collections::HashMap;

use gantry_common::axis::Axis;
use gantry_common::consts::MAX_AXES;
use gantry_common::coord::{Coord, TargetCoord};
use tracing::{debug, info, warn};

use crate::capability::{
    HomingController, PrinterEvent, Rail, RailSource, StepGenerator, Toolhead,
};
use crate::error::{KinematicsError, MoveError};
use crate::homing::{HomingSummary, HomingTargets};
use crate::limits::{AxisLimit, AxisLimits};
use crate::moves::PlannedMove;
use crate::status::KinematicsStatus;
use crate::stepper::StepperKinematics;

/// Kinematics of a machine whose axes are independent linear rails.
#[derive(Debug)]
pub struct CartesianKinematics<R: Rail> {
    axes: heapless::Vec<Axis, MAX_AXES>,
    rails: heapless::Vec<R, MAX_AXES>,
    limits: AxisLimits,
    axes_min: Coord,
    axes_max: Coord,
    max_velocity: f64,
    max_accel: f64,
}

impl<R: Rail> CartesianKinematics<R> {
    /// Build the engine from the rails of `source`.
    ///
    /// Binds one rail per axis letter, installs the stepper position
    /// callbacks, registers every stepper with the toolhead and subscribes
    /// to [`PrinterEvent::MotorOff`]. All axes start unhomed.
    ///
    /// # Errors
    /// `AxisCount` when the source reports a count outside `[1, 8]`; any
    /// error from the rail lookup.
    pub fn new<T, S>(toolhead: &mut T, source: &mut S) -> Result<Self, KinematicsError>
    where
        T: Toolhead,
        S: RailSource<Rail = R>,
    {
        let axis_count = source.axis_count();
        if axis_count == 0 || axis_count > MAX_AXES {
            return Err(KinematicsError::AxisCount(axis_count));
        }

        let axes: heapless::Vec<Axis, MAX_AXES> = Axis::all(axis_count).collect();
        let mut rails: heapless::Vec<R, MAX_AXES> = axes
            .iter()
            .map(|&axis| source.lookup_rail(axis))
            .collect::<Result<_, _>>()?;

        for (rail, &axis) in rails.iter_mut().zip(axes.iter()) {
            rail.setup_kinematics(StepperKinematics::cartesian(axis));
        }

        let mut axes_min = Coord::ZERO;
        let mut axes_max = Coord::ZERO;
        for (rail, &axis) in rails.iter().zip(axes.iter()) {
            let (min, max) = rail.range();
            axes_min[axis] = min;
            axes_max[axis] = max;
        }

        for (rail, &axis) in rails.iter().zip(axes.iter()) {
            for stepper in rail.steppers() {
                toolhead.register_step_generator(StepGenerator {
                    stepper: stepper.clone(),
                    kinematics: StepperKinematics::cartesian(axis),
                });
            }
        }
        toolhead.subscribe(PrinterEvent::MotorOff);

        let (max_velocity, max_accel) = toolhead.max_velocity();
        let labels: String = axes.iter().map(|a| a.label()).collect();
        info!(
            "Cartesian kinematics ready: {} axes ({}), max_velocity={}, max_accel={}",
            axis_count, labels, max_velocity, max_accel
        );

        Ok(Self {
            axes,
            rails,
            limits: AxisLimits::all_unhomed(axis_count),
            axes_min,
            axes_max,
            max_velocity,
            max_accel,
        })
    }

    // ─── Accessors ──────────────────────────────────────────────────

    #[inline]
    pub fn axis_count(&self) -> usize {
        self.axes.len()
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn rails(&self) -> &[R] {
        &self.rails
    }

    /// Current limit of `axis`, `None` if not configured.
    pub fn limit(&self, axis: Axis) -> Option<AxisLimit> {
        self.limits.get(axis).copied()
    }

    /// `(max_velocity, max_accel)` captured from the toolhead.
    pub fn max_velocity(&self) -> (f64, f64) {
        (self.max_velocity, self.max_accel)
    }

    /// Names of every stepper, rail by rail in axis order.
    pub fn get_steppers(&self) -> Vec<&str> {
        self.rails
            .iter()
            .flat_map(|r| r.steppers().iter().map(String::as_str))
            .collect()
    }

    fn configured(&self, index: usize) -> Result<Axis, KinematicsError> {
        self.axes
            .get(index)
            .copied()
            .ok_or(KinematicsError::UnknownAxis(index))
    }

    // ─── Coordinate mapping ─────────────────────────────────────────

    /// Logical position from per-rail positions keyed by rail name.
    /// Slots at or beyond the axis count are zero.
    pub fn calc_position(
        &self,
        stepper_positions: &HashMap<String, f64>,
    ) -> Result<Coord, KinematicsError> {
        let mut pos = Coord::ZERO;
        for (rail, &axis) in self.rails.iter().zip(self.axes.iter()) {
            pos[axis] = *stepper_positions
                .get(rail.name())
                .ok_or_else(|| KinematicsError::MissingPosition(rail.name().to_string()))?;
        }
        Ok(pos)
    }

    // ─── Move validation ────────────────────────────────────────────

    /// Reject `m` if it displaces an unhomed axis or ends outside the
    /// homed envelope. Axes with zero displacement are not checked.
    pub fn check_move(&self, m: &PlannedMove) -> Result<(), MoveError> {
        for (&axis, limit) in self.axes.iter().zip(self.limits.iter()) {
            if m.axes_d[axis] == 0.0 {
                continue;
            }
            if !limit.is_homed() {
                return Err(MoveError::MustHomeFirst {
                    axis,
                    end_pos: m.end_pos,
                    axis_count: self.axes.len(),
                });
            }
            // NaN fails `contains`, so it is never admitted.
            if !limit.contains(m.end_pos[axis]) {
                return Err(MoveError::OutOfRange {
                    axis,
                    end_pos: m.end_pos,
                    axis_count: self.axes.len(),
                });
            }
        }
        Ok(())
    }

    // ─── Position and limit synchronization ─────────────────────────

    /// Push `new_position` into every rail, then mark each axis of
    /// `homed_axes` homed with its rail's full range.
    ///
    /// # Errors
    /// `UnknownAxis` if any index is not configured; nothing is changed.
    pub fn set_position(
        &mut self,
        new_position: &Coord,
        homed_axes: &[usize],
    ) -> Result<(), KinematicsError> {
        let homed = homed_axes
            .iter()
            .map(|&i| self.configured(i))
            .collect::<Result<Vec<Axis>, _>>()?;

        for rail in self.rails.iter_mut() {
            rail.set_position(new_position);
        }
        for axis in homed {
            let range = self.rails[axis.index()].range();
            self.limits.set_homed(axis, range);
            debug!("Axis {} homed, limits [{:.3}, {:.3}]", axis, range.0, range.1);
        }
        Ok(())
    }

    /// Tighten or move the bounds of an already homed axis. Silently
    /// ignored when the axis is unhomed.
    pub fn update_limits(&mut self, axis: usize, range: (f64, f64)) -> Result<(), KinematicsError> {
        let axis = self.configured(axis)?;
        if self.limits.update_if_homed(axis, range) {
            debug!("Axis {} limits updated to [{:.3}, {:.3}]", axis, range.0, range.1);
        }
        Ok(())
    }

    /// Mark every axis unhomed.
    pub fn motor_off_handler(&mut self) {
        self.limits.reset_all();
        debug!("Motors off: all axes unhomed");
    }

    /// Dispatch a subscribed printer event.
    pub fn handle_event(&mut self, event: PrinterEvent) {
        match event {
            PrinterEvent::MotorOff => self.motor_off_handler(),
        }
    }

    // ─── Homing ─────────────────────────────────────────────────────

    /// Targets `home_axis` would send for `axis`.
    pub fn homing_targets(&self, axis: Axis) -> Option<HomingTargets> {
        let rail = self.rails.get(axis.index())?;
        Some(HomingTargets::compute(axis, rail.range(), rail.homing_info()))
    }

    /// Home a single axis through `controller`. Returns the home position
    /// of the axis on success; limits are left untouched either way.
    pub fn home_axis<C: HomingController>(
        &mut self,
        axis: Axis,
        controller: &mut C,
    ) -> Result<TargetCoord, KinematicsError> {
        let targets = self
            .homing_targets(axis)
            .ok_or(KinematicsError::UnknownAxis(axis.index()))?;
        let rail = &mut self.rails[axis.index()];
        debug!(
            "Homing axis {} on {}: force={:?} home={:?}",
            axis,
            rail.name(),
            targets.forcepos.get(axis).position(),
            targets.homepos.get(axis).position()
        );

        let mut group: [&mut dyn Rail; 1] = [rail];
        controller
            .home_rails(&mut group, &targets.forcepos, &targets.homepos)
            .map_err(|e| {
                warn!("Homing axis {} failed: {}", axis, e);
                KinematicsError::Homing(e)
            })?;
        Ok(targets.homepos)
    }

    /// Home `requested_axes` strictly one after another in the given order.
    /// Indices at or beyond the axis count are skipped.
    ///
    /// On success the returned summary names the homed axes and their home
    /// position; pass them to [`set_position`](Self::set_position) to mark
    /// the axes homed. The first failure aborts the sequence.
    pub fn home<C: HomingController>(
        &mut self,
        requested_axes: &[usize],
        controller: &mut C,
    ) -> Result<HomingSummary, KinematicsError> {
        let mut summary = HomingSummary::new();
        for &index in requested_axes {
            let Some(&axis) = self.axes.get(index) else {
                continue;
            };
            let homepos = self.home_axis(axis, controller)?;
            summary.record(axis, &homepos);
        }
        Ok(summary)
    }

    // ─── Status ─────────────────────────────────────────────────────

    pub fn get_status(&self) -> KinematicsStatus {
        KinematicsStatus {
            homed_axes: self.limits.homed_mask().letters(),
            axis_minimum: self.axes_min,
            axis_maximum: self.axes_max,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────
