//! Homing descriptor types.
//!
//! Defines `HomingDirection` and `HomingInfo`, the per-rail facts the
//! kinematics needs to plan a homing move.

use serde::{Deserialize, Serialize};

/// Direction the rail travels while approaching its endstop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HomingDirection {
    /// Approach in +direction (endstop near `position_max`).
    Positive = 0,
    /// Approach in -direction (endstop near `position_min`).
    Negative = 1,
}

impl HomingDirection {
    #[inline]
    pub const fn from_positive(positive_dir: bool) -> Self {
        if positive_dir {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

impl Default for HomingDirection {
    fn default() -> Self {
        Self::Negative
    }
}

/// Homing facts reported by a rail.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HomingInfo {
    /// Machine coordinate of the endstop trigger point.
    pub position_endstop: f64,
    /// Approach direction.
    pub direction: HomingDirection,
}

impl HomingInfo {
    pub const fn new(position_endstop: f64, direction: HomingDirection) -> Self {
        Self {
            position_endstop,
            direction,
        }
    }

    #[inline]
    pub const fn positive_dir(&self) -> bool {
        matches!(self.direction, HomingDirection::Positive)
    }
}
