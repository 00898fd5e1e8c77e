//! Planned move descriptor validated by `check_move`.

use gantry_common::coord::Coord;

/// A straight move as seen by the planner before it is queued.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedMove {
    pub start_pos: Coord,
    pub end_pos: Coord,
    /// Per-axis displacement `end_pos - start_pos`.
    pub axes_d: Coord,
    /// Euclidean length of `axes_d`.
    pub move_d: f64,
}

impl PlannedMove {
    pub fn new(start_pos: Coord, end_pos: Coord) -> Self {
        let axes_d = end_pos - start_pos;
        Self {
            start_pos,
            end_pos,
            axes_d,
            move_d: axes_d.length(),
        }
    }

    /// Whether the move displaces any axis at all.
    #[inline]
    pub fn is_kinematic_move(&self) -> bool {
        self.move_d > 0.0
    }
}
