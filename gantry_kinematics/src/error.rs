//! Error types for the kinematics engine.
//!
//! - [`KinematicsError`]: configuration and homing failures. Fatal at
//!   construction, propagated unchanged from the homing controller.
//! - [`MoveError`]: a planned move rejected by `check_move`. Recoverable;
//!   the move is never admitted to the trajectory queue.
//! - [`HomingError`]: raised by the external homing controller.

use std::fmt;

use gantry_common::axis::Axis;
use gantry_common::config::ConfigError;
use gantry_common::coord::Coord;
use thiserror::Error;

/// Engine construction, synchronization and homing errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KinematicsError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Axis count outside `[1, MAX_AXES]`.
    #[error("axis_count {0} out of range [1, 8]")]
    AxisCount(usize),

    /// No rail could be resolved for an axis letter.
    #[error("no rail configured for axis '{0}'")]
    MissingRail(char),

    /// Axis index not configured on this machine.
    #[error("axis index {0} is not configured")]
    UnknownAxis(usize),

    /// Stepper position map lacks an entry for a rail.
    #[error("no position reported for rail '{0}'")]
    MissingPosition(String),

    /// Homing controller failure.
    #[error(transparent)]
    Homing(#[from] HomingError),
}

impl KinematicsError {
    /// True for the errors that prevent the engine from starting.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::AxisCount(_) | Self::MissingRail(_)
        )
    }
}

/// Failure reported by the homing controller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HomingError {
    /// The endstop never triggered over the full forced travel.
    #[error("No trigger on {rail} after full movement")]
    EndstopNotTriggered { rail: String },

    /// The endstop was already triggered before the move began.
    #[error("Endstop {rail} still triggered after retract")]
    StillTriggered { rail: String },

    /// Lost contact with the controller driving the rail.
    #[error("Communication error during homing: {0}")]
    Communication(String),
}

/// Rejection of a planned move.
///
/// `end_pos` and `axis_count` are carried for the diagnostic message; no
/// allocation happens until the error is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum MoveError {
    /// The move displaces an axis that has not been homed.
    #[error("Must home axis first: {}", EndPosition(.end_pos, .axis_count))]
    MustHomeFirst {
        axis: Axis,
        end_pos: Coord,
        axis_count: usize,
    },

    /// The move ends outside the homed envelope of an axis.
    #[error("Move out of range: {}", EndPosition(.end_pos, .axis_count))]
    OutOfRange {
        axis: Axis,
        end_pos: Coord,
        axis_count: usize,
    },
}

impl MoveError {
    /// Axis that caused the rejection.
    pub fn axis(&self) -> Axis {
        match self {
            Self::MustHomeFirst { axis, .. } | Self::OutOfRange { axis, .. } => *axis,
        }
    }

    /// Requested end position of the rejected move.
    pub fn end_pos(&self) -> &Coord {
        match self {
            Self::MustHomeFirst { end_pos, .. } | Self::OutOfRange { end_pos, .. } => end_pos,
        }
    }
}

/// `x=1.000 y=2.000 ...` over the configured axes.
struct EndPosition<'a>(&'a Coord, &'a usize);

impl fmt::Display for EndPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, axis) in Axis::all(*self.1).enumerate() {
            if n > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={:.3}", axis.label(), self.0[axis])?;
        }
        Ok(())
    }
}
