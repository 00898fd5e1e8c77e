//! System-wide constants for the gantry workspace.
//!
//! Single source of truth for axis limits and homing factors.
//! Imported by all crates; do not redefine locally.

use static_assertions::const_assert;

/// Maximum number of axes (width of every coordinate vector).
pub const MAX_AXES: usize = 8;

/// Axis labels in slot order. A machine with N axes uses the first N.
pub const AXIS_LETTERS: [char; MAX_AXES] = ['x', 'y', 'z', 'w', 'a', 'b', 'c', 'd'];

/// Axis count used when the configuration does not name one.
pub const DEFAULT_AXIS_COUNT: usize = MAX_AXES;

/// Overshoot factor applied to the endstop distance when computing the
/// forced start position of a homing move.
pub const HOMING_FORCE_FACTOR: f64 = 1.5;

/// Canonical `(low, high)` interval of an axis that has not been homed.
pub const UNHOMED_LIMIT: (f64, f64) = (1.0, -1.0);

/// Default configuration file path for the dry-run CLI.
pub const DEFAULT_CONFIG_PATH: &str = "config/printer.toml";

const_assert!(DEFAULT_AXIS_COUNT >= 1 && DEFAULT_AXIS_COUNT <= MAX_AXES);
const_assert!(MAX_AXES <= u8::BITS as usize);
