//! Simulated homing controller.

use gantry_common::coord::{Coord, TargetCoord};
use tracing::debug;

use crate::capability::{HomingController, Rail};
use crate::error::HomingError;

/// One `home_rails` invocation as seen by the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct HomingCall {
    pub rails: Vec<String>,
    pub forcepos: TargetCoord,
    pub homepos: TargetCoord,
}

/// Records every call and places the rails on their endstops.
#[derive(Debug, Default)]
pub struct SimHomingController {
    calls: Vec<HomingCall>,
    fail_rail: Option<String>,
}

impl SimHomingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `EndstopNotTriggered` whenever `rail` is homed.
    pub fn failing_on(mut self, rail: &str) -> Self {
        self.fail_rail = Some(rail.to_string());
        self
    }

    /// Calls in the order they were made, failed ones included.
    pub fn calls(&self) -> &[HomingCall] {
        &self.calls
    }
}

impl HomingController for SimHomingController {
    fn home_rails(
        &mut self,
        rails: &mut [&mut dyn Rail],
        forcepos: &TargetCoord,
        homepos: &TargetCoord,
    ) -> Result<(), HomingError> {
        self.calls.push(HomingCall {
            rails: rails.iter().map(|r| r.name().to_string()).collect(),
            forcepos: *forcepos,
            homepos: *homepos,
        });

        for rail in rails.iter_mut() {
            if self.fail_rail.as_deref() == Some(rail.name()) {
                return Err(HomingError::EndstopNotTriggered {
                    rail: rail.name().to_string(),
                });
            }
            // Start from the forced position, stop on the endstop.
            rail.set_position(&forcepos.resolve(&Coord::ZERO));
            rail.set_position(&homepos.resolve(&Coord::ZERO));
            debug!("{} reached endstop at {:.3}", rail.name(), rail.position());
        }
        Ok(())
    }
}
