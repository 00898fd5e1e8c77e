//! Integration test: engine startup from TOML configuration.
//!
//! Validates: TOML string or file → `PrinterConfig` validation → rails
//! resolved per axis letter → engine constructed with every axis unhomed.

use std::io::Write;

use gantry_common::config::{ConfigError, ConfigLoader, PrinterConfig};
use gantry_common::homing::HomingDirection;
use gantry_kinematics::capability::Rail;
use gantry_kinematics::sim::{ConfigRailSource, SimHomingController, SimToolhead};
use gantry_kinematics::{CartesianKinematics, KinematicsError};
use tempfile::NamedTempFile;

// ── Config TOML ─────────────────────────────────────────────────────

const PRINTER_TOML: &str = r#"
[shared]
log_level = "debug"
service_name = "integration"

[printer]
axis_count = 3
max_velocity = 250.0
max_accel = 2000.0

[stepper_x]
position_max = 220.0
position_endstop = 0.0

[stepper_y]
position_max = 210.0
position_endstop = 210.0

[stepper_z]
position_min = -2.0
position_max = 180.0
position_endstop = 0.5
homing_positive_dir = false
steppers = ["stepper_z", "stepper_z1"]
"#;

const MISSING_Y_TOML: &str = r#"
[printer]
axis_count = 2
max_velocity = 250.0
max_accel = 2000.0

[stepper_x]
position_max = 220.0
position_endstop = 0.0
"#;

fn build(
    config: &PrinterConfig,
) -> Result<(CartesianKinematics<gantry_kinematics::sim::SimRail>, SimToolhead), KinematicsError> {
    let mut toolhead = SimToolhead::from_config(config);
    let mut source = ConfigRailSource::new(config);
    let kin = CartesianKinematics::new(&mut toolhead, &mut source)?;
    Ok((kin, toolhead))
}

// ── Tests ───────────────────────────────────────────────────────────

#[test]
fn engine_starts_from_toml_string() {
    let config = PrinterConfig::from_toml_str(PRINTER_TOML).unwrap();
    config.validate().unwrap();
    let (kin, toolhead) = build(&config).unwrap();

    assert_eq!(kin.axis_count(), 3);
    assert_eq!(kin.max_velocity(), (250.0, 2000.0));
    assert_eq!(
        kin.get_steppers(),
        vec!["stepper_x", "stepper_y", "stepper_z", "stepper_z1"]
    );
    assert_eq!(toolhead.step_generators().len(), 4);

    let status = kin.get_status();
    assert_eq!(status.homed_axes, "");
    assert_eq!(status.axis_minimum.0[..4], [0.0, 0.0, -2.0, 0.0]);
    assert_eq!(status.axis_maximum.0[..4], [220.0, 210.0, 180.0, 0.0]);

    // Y has its endstop at max, so it homes in the positive direction.
    assert_eq!(kin.rails()[1].homing_info().direction, HomingDirection::Positive);
    assert_eq!(kin.rails()[2].homing_info().direction, HomingDirection::Negative);
}

#[test]
fn engine_starts_from_toml_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(PRINTER_TOML.as_bytes()).unwrap();

    let config = PrinterConfig::load(file.path()).unwrap();
    config.validate().unwrap();
    assert_eq!(config.log_level().as_str(), "debug");
    assert!(build(&config).is_ok());
}

#[test]
fn missing_file_is_reported() {
    let err = PrinterConfig::load(std::path::Path::new("/nonexistent/printer.toml")).unwrap_err();
    assert_eq!(err, ConfigError::FileNotFound);
}

#[test]
fn missing_rail_aborts_startup() {
    let config = PrinterConfig::from_toml_str(MISSING_Y_TOML).unwrap();
    assert!(config.validate().is_err());

    let Err(err) = build(&config) else {
        panic!("engine started without stepper_y");
    };
    assert_eq!(err, KinematicsError::MissingRail('y'));
    assert!(err.is_config());
}

#[test]
fn axis_count_out_of_range_aborts_startup() {
    let mut config = PrinterConfig::from_toml_str(PRINTER_TOML).unwrap();
    config.printer.axis_count = 9;
    assert!(config.validate().is_err());

    let Err(err) = build(&config) else {
        panic!("engine started with 9 axes");
    };
    assert_eq!(err, KinematicsError::AxisCount(9));
}

#[test]
fn positive_endstop_forces_below_min() {
    let config = PrinterConfig::from_toml_str(PRINTER_TOML).unwrap();
    let (mut kin, mut toolhead) = build(&config).unwrap();
    let mut controller = SimHomingController::new();
    toolhead.home(&mut kin, &[1], &mut controller).unwrap();

    let call = &controller.calls()[0];
    let y = gantry_common::axis::Axis::new(1).unwrap();
    // 210 - 1.5 * (210 - 0)
    assert_eq!(call.forcepos.get(y).position(), Some(-105.0));
    assert_eq!(call.homepos.get(y).position(), Some(210.0));
    assert_eq!(toolhead.position().0[1], 210.0);
    assert_eq!(kin.get_status().homed_axes, "y");
}

#[test]
fn custom_stepper_names_round_trip_through_calc_position() {
    let config = PrinterConfig::from_toml_str(
        r#"
[printer]
axis_count = 1
max_velocity = 100.0
max_accel = 1000.0

[stepper_x]
position_max = 200.0
position_endstop = 0.0
steppers = ["motor_x0", "motor_x1"]
"#,
    )
    .unwrap();
    config.validate().unwrap();
    let (mut kin, mut toolhead) = build(&config).unwrap();
    assert_eq!(kin.get_steppers(), vec!["motor_x0", "motor_x1"]);

    let mut controller = SimHomingController::new();
    toolhead.home(&mut kin, &[0], &mut controller).unwrap();
    toolhead
        .move_to(&kin, gantry_common::coord::Coord::from_slice(&[10.0]))
        .unwrap();

    let pos = kin.calc_position(toolhead.stepper_positions()).unwrap();
    assert!((pos[0] - 10.0).abs() < 1e-9);
}
