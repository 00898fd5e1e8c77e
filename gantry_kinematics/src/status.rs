//! Status snapshot exposed to the rest of the printer.

use gantry_common::coord::Coord;
use serde::Serialize;

/// Read-only kinematics status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KinematicsStatus {
    /// Letters of homed axes in slot order, e.g. `"xz"`.
    pub homed_axes: String,
    /// Lower travel bound per slot (unused slots are zero).
    pub axis_minimum: Coord,
    /// Upper travel bound per slot (unused slots are zero).
    pub axis_maximum: Coord,
}
