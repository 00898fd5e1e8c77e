//! Homing target computation.
//!
//! The engine does not drive hardware while homing. For each axis it builds
//! two target vectors and hands them to the `HomingController`:
//!
//! | Vector     | Target axis                                   | Other axes |
//! |------------|-----------------------------------------------|------------|
//! | `homepos`  | endstop position                              | Hold       |
//! | `forcepos` | endstop offset 1.5× the travel on the far side | Hold       |
//!
//! The forced start position lies beyond the opposite end of the rail so
//! the approach covers the full travel even with backlash.

use gantry_common::axis::Axis;
use gantry_common::consts::{HOMING_FORCE_FACTOR, MAX_AXES};
use gantry_common::coord::{Coord, TargetCoord};
use gantry_common::homing::HomingInfo;
use heapless::Vec;

/// `(forcepos, homepos)` for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingTargets {
    pub forcepos: TargetCoord,
    pub homepos: TargetCoord,
}

impl HomingTargets {
    /// Targets for homing `axis` on a rail with travel `range`.
    pub fn compute(axis: Axis, range: (f64, f64), info: HomingInfo) -> Self {
        let (position_min, position_max) = range;
        let endstop = info.position_endstop;
        let force = if info.positive_dir() {
            endstop - HOMING_FORCE_FACTOR * (endstop - position_min)
        } else {
            endstop + HOMING_FORCE_FACTOR * (position_max - endstop)
        };
        Self {
            forcepos: TargetCoord::single(axis, force),
            homepos: TargetCoord::single(axis, endstop),
        }
    }
}

/// Axes homed by one `home()` call and where they came to rest.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HomingSummary {
    axes: Vec<Axis, MAX_AXES>,
    homepos: TargetCoord,
}

impl HomingSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed axis. Re-homing an axis keeps a single entry.
    pub fn record(&mut self, axis: Axis, homepos: &TargetCoord) {
        self.homepos.0[axis.index()] = homepos.get(axis);
        if !self.axes.contains(&axis) {
            let pushed = self.axes.push(axis);
            debug_assert!(pushed.is_ok(), "more than MAX_AXES distinct axes");
        }
    }

    /// Homed axes in completion order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    /// Axis indices, in the form `set_position` takes.
    pub fn axis_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.axes.iter().map(|a| a.index())
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    /// `current` with each homed axis replaced by its endstop position.
    pub fn position(&self, current: &Coord) -> Coord {
        self.homepos.resolve(current)
    }
}
