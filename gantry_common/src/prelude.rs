//! Prelude module for common re-exports.
//!
//! ```rust
//! use gantry_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{
    ConfigError, ConfigLoader, LogLevel, PrinterConfig, RailConfig, SharedConfig,
};

// ─── System Constants ───────────────────────────────────────────────
pub use crate::consts::{AXIS_LETTERS, MAX_AXES, UNHOMED_LIMIT};

// ─── Geometry ───────────────────────────────────────────────────────
pub use crate::axis::{ActiveAxes, Axis};
pub use crate::coord::{AxisTarget, Coord, TargetCoord};
pub use crate::homing::{HomingDirection, HomingInfo};
