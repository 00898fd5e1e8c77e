//! # Gantry Kinematics Library
//!
//! Host-side cartesian kinematics for a multi-axis printer: maps the
//! logical coordinate vector onto rails, keeps every planned move inside
//! the homed envelope, and orchestrates per-axis homing.
//!
//! ## Layers
//!
//! 1. **Capabilities**: `Rail`, `Toolhead`, `HomingController`, `RailSource`
//! 2. **AxisLimits**: per-axis homed/unhomed travel intervals
//! 3. **CartesianKinematics**: the engine owning rails and limits
//! 4. **Simulation**: in-memory collaborators for dry runs and tests
//!
//! ## Hot path
//!
//! `check_move` runs once per planned move. It is O(axis count), does not
//! allocate and does not log.

pub mod capability;
pub mod cartesian;
pub mod error;
pub mod homing;
pub mod limits;
pub mod moves;
pub mod sim;
pub mod status;
pub mod stepper;

pub use cartesian::CartesianKinematics;
pub use error::{HomingError, KinematicsError, MoveError};
