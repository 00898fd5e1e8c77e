//! Per-axis safe travel intervals.
//!
//! An [`AxisLimit`] with `low <= high` marks a homed axis whose motion is
//! confined to `[low, high]`. The inverted sentinel `(1.0, -1.0)` marks an
//! unhomed axis. The table is only mutated through:
//! - `set_homed` (homing completion),
//! - `update_if_homed` (tighter runtime bound, ignored for unhomed axes),
//! - `reset_all` (motors disabled).

use gantry_common::axis::{ActiveAxes, Axis};
use gantry_common::consts::{MAX_AXES, UNHOMED_LIMIT};
use heapless::Vec;

/// Safe travel interval of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimit {
    pub low: f64,
    pub high: f64,
}

impl AxisLimit {
    pub const UNHOMED: Self = Self {
        low: UNHOMED_LIMIT.0,
        high: UNHOMED_LIMIT.1,
    };

    #[inline]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    #[inline]
    pub fn is_homed(&self) -> bool {
        self.low <= self.high
    }

    /// Whether `pos` lies inside `[low, high]`. Always false when unhomed.
    #[inline]
    pub fn contains(&self, pos: f64) -> bool {
        pos >= self.low && pos <= self.high
    }

    #[inline]
    pub fn as_tuple(&self) -> (f64, f64) {
        (self.low, self.high)
    }
}

impl From<(f64, f64)> for AxisLimit {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}

/// Limit table, one slot per configured axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLimits {
    slots: Vec<AxisLimit, MAX_AXES>,
}

impl AxisLimits {
    /// Every axis unhomed. `count` is clamped to `MAX_AXES`.
    pub fn all_unhomed(count: usize) -> Self {
        Self {
            slots: (0..count.min(MAX_AXES)).map(|_| AxisLimit::UNHOMED).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> Option<&AxisLimit> {
        self.slots.get(axis.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &AxisLimit> {
        self.slots.iter()
    }

    /// Mark `axis` homed with bounds `range`. Returns false if the axis is
    /// not in the table.
    pub fn set_homed(&mut self, axis: Axis, range: (f64, f64)) -> bool {
        match self.slots.get_mut(axis.index()) {
            Some(slot) => {
                *slot = range.into();
                true
            }
            None => false,
        }
    }

    /// Replace the bounds of `axis` only if it is already homed.
    /// Returns whether the slot changed.
    pub fn update_if_homed(&mut self, axis: Axis, range: (f64, f64)) -> bool {
        match self.slots.get_mut(axis.index()) {
            Some(slot) if slot.is_homed() => {
                *slot = range.into();
                true
            }
            _ => false,
        }
    }

    /// Return every axis to the unhomed sentinel.
    pub fn reset_all(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = AxisLimit::UNHOMED;
        }
    }

    /// Bitmask of homed axes.
    pub fn homed_mask(&self) -> ActiveAxes {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_homed())
            .filter_map(|(i, _)| Axis::new(i))
            .fold(ActiveAxes::empty(), |m, a| m | a.active_flag())
    }
}
