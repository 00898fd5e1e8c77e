//! Per-stepper position callbacks.
//!
//! On a cartesian machine each stepper follows exactly one coordinate
//! component, so the callback is a projection of the trapezoidal move
//! position onto the stepper's axis.

use gantry_common::axis::{ActiveAxes, Axis};
use gantry_common::coord::Coord;

/// One segment of the external trajectory queue.
///
/// Distance along the segment is `(start_v + half_accel * t) * t`; the
/// position is `start_pos + axes_r * distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapMove {
    pub print_time: f64,
    pub move_t: f64,
    pub start_v: f64,
    pub half_accel: f64,
    pub start_pos: Coord,
    /// Unit direction ratios.
    pub axes_r: Coord,
}

impl TrapMove {
    /// Constant-acceleration segment from `start_pos` along `axes_r`.
    pub fn new(
        print_time: f64,
        move_t: f64,
        start_v: f64,
        accel: f64,
        start_pos: Coord,
        axes_r: Coord,
    ) -> Self {
        Self {
            print_time,
            move_t,
            start_v,
            half_accel: 0.5 * accel,
            start_pos,
            axes_r,
        }
    }

    /// Distance travelled `move_time` seconds into the segment.
    #[inline]
    pub fn distance(&self, move_time: f64) -> f64 {
        (self.start_v + self.half_accel * move_time) * move_time
    }

    /// Position `move_time` seconds into the segment.
    #[inline]
    pub fn coord(&self, move_time: f64) -> Coord {
        self.start_pos + self.axes_r * self.distance(move_time)
    }
}

/// Position callback for one cartesian stepper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperKinematics {
    axis: Axis,
}

impl StepperKinematics {
    pub const fn cartesian(axis: Axis) -> Self {
        Self { axis }
    }

    #[inline]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Coordinate components this stepper depends on.
    #[inline]
    pub const fn active_flags(&self) -> ActiveAxes {
        self.axis.active_flag()
    }

    /// Stepper position `move_time` seconds into `m`.
    #[inline]
    pub fn calc_position(&self, m: &TrapMove, move_time: f64) -> f64 {
        m.coord(move_time)[self.axis]
    }

    /// Stepper position for a static coordinate.
    #[inline]
    pub fn position_of(&self, c: &Coord) -> f64 {
        c[self.axis]
    }
}
