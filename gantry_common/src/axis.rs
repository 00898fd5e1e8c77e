//! Axis enumeration.
//!
//! An [`Axis`] is a slot index in `0..MAX_AXES` paired with its letter from
//! [`AXIS_LETTERS`]. Axes are built once from the configured count and never
//! renumbered; label lookup is a plain array index.

use std::fmt;

use bitflags::bitflags;
use serde::Serialize;

use crate::consts::{AXIS_LETTERS, MAX_AXES};

/// One configured dimension of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Axis {
    index: u8,
    label: char,
}

impl Axis {
    /// Axis for slot `index`, or `None` if the slot does not exist.
    #[inline]
    pub const fn new(index: usize) -> Option<Self> {
        if index < MAX_AXES {
            Some(Self {
                index: index as u8,
                label: AXIS_LETTERS[index],
            })
        } else {
            None
        }
    }

    /// Look up an axis by its letter (case-insensitive).
    pub fn from_letter(letter: char) -> Option<Self> {
        let letter = letter.to_ascii_lowercase();
        AXIS_LETTERS
            .iter()
            .position(|&l| l == letter)
            .and_then(Self::new)
    }

    /// The first `count` axes in slot order. `count` is clamped to `MAX_AXES`.
    pub fn all(count: usize) -> impl Iterator<Item = Axis> {
        (0..count.min(MAX_AXES)).filter_map(Self::new)
    }

    #[inline]
    pub const fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub const fn label(&self) -> char {
        self.label
    }

    /// Single-bit mask for this axis.
    #[inline]
    pub const fn active_flag(&self) -> ActiveAxes {
        ActiveAxes::from_bits_truncate(1 << self.index)
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

bitflags! {
    /// Coordinate components a stepper position callback depends on.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ActiveAxes: u8 {
        const X = 0x01;
        const Y = 0x02;
        const Z = 0x04;
        const W = 0x08;
        const A = 0x10;
        const B = 0x20;
        const C = 0x40;
        const D = 0x80;
    }
}

impl ActiveAxes {
    /// Letters of all set axes, in slot order.
    pub fn letters(&self) -> String {
        Axis::all(MAX_AXES)
            .filter(|a| self.contains(a.active_flag()))
            .map(|a| a.label())
            .collect()
    }
}

impl Default for ActiveAxes {
    fn default() -> Self {
        Self::empty()
    }
}
