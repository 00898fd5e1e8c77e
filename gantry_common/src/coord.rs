//! Fixed-width coordinate vectors.
//!
//! Every position exchanged between the planner and the kinematics has
//! exactly [`MAX_AXES`] slots, independent of how many axes are configured.
//! Slots beyond the configured count are always zero.

use std::ops::{Add, Index, IndexMut, Mul, Sub};

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::consts::MAX_AXES;

/// Position vector with one slot per possible axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord(pub [f64; MAX_AXES]);

impl Coord {
    pub const ZERO: Self = Self([0.0; MAX_AXES]);

    /// Build from up to `MAX_AXES` leading values; the rest are zero.
    /// Extra values beyond `MAX_AXES` are ignored.
    pub fn from_slice(values: &[f64]) -> Self {
        let mut c = Self::ZERO;
        for (slot, v) in c.0.iter_mut().zip(values) {
            *slot = *v;
        }
        c
    }

    #[inline]
    pub fn as_array(&self) -> &[f64; MAX_AXES] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.0.iter()
    }

    /// Euclidean length over all slots.
    pub fn length(&self) -> f64 {
        self.0.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

impl Index<usize> for Coord {
    type Output = f64;

    #[inline]
    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl IndexMut<usize> for Coord {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl Index<Axis> for Coord {
    type Output = f64;

    #[inline]
    fn index(&self, axis: Axis) -> &f64 {
        &self.0[axis.index()]
    }
}

impl IndexMut<Axis> for Coord {
    #[inline]
    fn index_mut(&mut self, axis: Axis) -> &mut f64 {
        &mut self.0[axis.index()]
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        let mut out = self;
        for (o, r) in out.0.iter_mut().zip(rhs.0) {
            *o += r;
        }
        out
    }
}

impl Sub for Coord {
    type Output = Coord;

    fn sub(self, rhs: Coord) -> Coord {
        let mut out = self;
        for (o, r) in out.0.iter_mut().zip(rhs.0) {
            *o -= r;
        }
        out
    }
}

impl Mul<f64> for Coord {
    type Output = Coord;

    fn mul(self, k: f64) -> Coord {
        let mut out = self;
        for o in out.0.iter_mut() {
            *o *= k;
        }
        out
    }
}

impl From<[f64; MAX_AXES]> for Coord {
    fn from(values: [f64; MAX_AXES]) -> Self {
        Self(values)
    }
}

// ─── Targets ────────────────────────────────────────────────────────

/// Per-axis target of a commanded move.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum AxisTarget {
    /// Leave the axis where it is.
    #[default]
    Hold,
    /// Drive the axis to an absolute position.
    MoveTo(f64),
}

impl AxisTarget {
    #[inline]
    pub fn position(&self) -> Option<f64> {
        match self {
            Self::Hold => None,
            Self::MoveTo(p) => Some(*p),
        }
    }

    #[inline]
    pub fn is_hold(&self) -> bool {
        matches!(self, Self::Hold)
    }
}

/// Fixed-width vector of [`AxisTarget`]s.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TargetCoord(pub [AxisTarget; MAX_AXES]);

impl TargetCoord {
    /// All axes held.
    pub const HOLD: Self = Self([AxisTarget::Hold; MAX_AXES]);

    /// Hold everything except `axis`, which moves to `position`.
    pub fn single(axis: Axis, position: f64) -> Self {
        let mut t = Self::HOLD;
        t.0[axis.index()] = AxisTarget::MoveTo(position);
        t
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> AxisTarget {
        self.0[axis.index()]
    }

    /// Replace held slots with the matching slot of `current`.
    pub fn resolve(&self, current: &Coord) -> Coord {
        let mut out = *current;
        for (o, t) in out.0.iter_mut().zip(self.0) {
            if let AxisTarget::MoveTo(p) = t {
                *o = p;
            }
        }
        out
    }

    /// Axes that are not held.
    pub fn moving_axes(&self) -> impl Iterator<Item = Axis> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_hold())
            .filter_map(|(i, _)| Axis::new(i))
    }
}
