//! Integration test: engine invariants across every supported axis count.

use std::collections::HashMap;

use gantry_common::axis::Axis;
use gantry_common::config::rail_section;
use gantry_common::consts::MAX_AXES;
use gantry_common::coord::Coord;
use gantry_common::homing::{HomingDirection, HomingInfo};
use gantry_kinematics::CartesianKinematics;
use gantry_kinematics::limits::AxisLimit;
use gantry_kinematics::moves::PlannedMove;
use gantry_kinematics::sim::{SimRail, SimToolhead, StaticRailSource};
use gantry_kinematics::MoveError;

fn engine(n_axes: usize) -> CartesianKinematics<SimRail> {
    let rails: Vec<SimRail> = Axis::all(n_axes)
        .map(|a| {
            SimRail::new(
                &rail_section(a),
                (0.0, 100.0 + a.index() as f64),
                HomingInfo::new(0.0, HomingDirection::Negative),
            )
        })
        .collect();
    let mut toolhead = SimToolhead::new(300.0, 3000.0);
    let mut source = StaticRailSource::new(rails);
    CartesianKinematics::new(&mut toolhead, &mut source).unwrap()
}

#[test]
fn calc_position_is_full_width_and_zero_padded() {
    for n in 1..=MAX_AXES {
        let kin = engine(n);
        let positions: HashMap<String, f64> = Axis::all(n)
            .map(|a| (rail_section(a), 1.0 + a.index() as f64))
            .collect();
        let pos = kin.calc_position(&positions).unwrap();
        assert_eq!(pos.as_array().len(), MAX_AXES);
        for i in 0..MAX_AXES {
            let want = if i < n { 1.0 + i as f64 } else { 0.0 };
            assert_eq!(pos[i], want, "n={n} slot={i}");
        }
    }
}

#[test]
fn every_axis_starts_unhomed() {
    for n in 1..=MAX_AXES {
        let kin = engine(n);
        assert_eq!(kin.get_status().homed_axes, "");
        for axis in Axis::all(n) {
            let mut end = Coord::ZERO;
            end[axis] = 1.0;
            let err = kin.check_move(&PlannedMove::new(Coord::ZERO, end)).unwrap_err();
            assert!(matches!(err, MoveError::MustHomeFirst { .. }));
            assert_eq!(err.axis(), axis);
        }
    }
}

#[test]
fn set_position_homes_only_requested_axes() {
    for n in 1..=MAX_AXES {
        let mut kin = engine(n);
        let last = n - 1;
        kin.set_position(&Coord::ZERO, &[last]).unwrap();
        for axis in Axis::all(n) {
            let limit = kin.limit(axis).unwrap();
            if axis.index() == last {
                assert_eq!(limit, AxisLimit::new(0.0, 100.0 + last as f64));
            } else {
                assert_eq!(limit, AxisLimit::UNHOMED);
            }
        }
    }
}

#[test]
fn update_limits_is_idempotent() {
    let mut kin = engine(4);
    let w = Axis::new(3).unwrap();
    kin.update_limits(3, (10.0, 20.0)).unwrap();
    assert_eq!(kin.limit(w), Some(AxisLimit::UNHOMED));

    kin.set_position(&Coord::ZERO, &[3]).unwrap();
    kin.update_limits(3, (10.0, 20.0)).unwrap();
    let once = kin.get_status();
    let limit_once = kin.limit(w);
    kin.update_limits(3, (10.0, 20.0)).unwrap();
    assert_eq!(kin.get_status(), once);
    assert_eq!(kin.limit(w), limit_once);
    assert_eq!(limit_once, Some(AxisLimit::new(10.0, 20.0)));
}

#[test]
fn motor_off_is_safe_in_any_state() {
    let mut kin = engine(8);
    kin.motor_off_handler();
    assert_eq!(kin.get_status().homed_axes, "");

    let all: Vec<usize> = (0..8).collect();
    kin.set_position(&Coord::ZERO, &all).unwrap();
    assert_eq!(kin.get_status().homed_axes, "xyzwabcd");
    kin.motor_off_handler();
    kin.motor_off_handler();
    assert!(Axis::all(8).all(|a| kin.limit(a) == Some(AxisLimit::UNHOMED)));
}

#[test]
fn non_finite_targets_never_admitted() {
    for n in 1..=MAX_AXES {
        let mut kin = engine(n);
        let last = Axis::new(n - 1).unwrap();
        let mut end = Coord::ZERO;
        end[last] = f64::NAN;
        let m = PlannedMove::new(Coord::ZERO, end);

        let err = kin.check_move(&m).unwrap_err();
        assert!(matches!(err, MoveError::MustHomeFirst { .. }), "n={n}");

        let all: Vec<usize> = (0..n).collect();
        kin.set_position(&Coord::ZERO, &all).unwrap();
        let err = kin.check_move(&m).unwrap_err();
        assert!(matches!(err, MoveError::OutOfRange { .. }), "n={n}");
        assert_eq!(err.axis(), last);
    }
}
