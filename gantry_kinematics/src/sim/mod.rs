//! In-memory stand-ins for the external collaborators.
//!
//! The simulation backend lets the engine run without hardware: rails
//! track a single scalar position, the toolhead keeps a flat map of stepper
//! positions and the homing controller teleports rails onto their endstops.
//! Used by the dry-run CLI and by tests.

mod homing;
mod rail;
mod toolhead;

pub use homing::{HomingCall, SimHomingController};
pub use rail::{ConfigRailSource, SimRail, StaticRailSource};
pub use toolhead::SimToolhead;
