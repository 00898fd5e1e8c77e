//! # Gantry Kinematics dry run
//!
//! Loads a printer configuration, builds the cartesian kinematics over the
//! simulation backend and replays a homing request plus a list of moves.
//! The final kinematics status is printed to stdout as JSON.
//!
//! ```text
//! gantry_kinematics --config config/printer.toml --home zxy \
//!     --move x=10,y=20 --move z=5
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use gantry_common::axis::Axis;
use gantry_common::config::{ConfigLoader, LogLevel, PrinterConfig};
use gantry_common::consts::DEFAULT_CONFIG_PATH;
use gantry_common::coord::Coord;
use gantry_kinematics::CartesianKinematics;
use gantry_kinematics::sim::{ConfigRailSource, SimHomingController, SimToolhead};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Gantry Kinematics: homing and move validation dry run
#[derive(Parser, Debug)]
#[command(name = "gantry_kinematics")]
#[command(version)]
#[command(about = "Replay homing and moves against the cartesian kinematics")]
struct Args {
    /// Path to the printer configuration TOML.
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Axis letters to home, in order (e.g. "zxy").
    #[arg(long, value_name = "AXES")]
    home: Option<String>,

    /// Absolute move target, e.g. "x=10,y=20". Unnamed axes hold. Repeatable.
    #[arg(long = "move", value_name = "TARGET")]
    moves: Vec<String>,

    /// Fire the motor-off event after the moves.
    #[arg(long)]
    motor_off: bool,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let loaded = PrinterConfig::load(&args.config);
    let level = loaded
        .as_ref()
        .map(PrinterConfig::log_level)
        .unwrap_or_default();
    setup_tracing(&args, level);

    info!("Gantry Kinematics v{} starting...", env!("CARGO_PKG_VERSION"));

    let result = loaded
        .map_err(|e| -> Box<dyn std::error::Error> {
            format!("{}: {e}", args.config.display()).into()
        })
        .and_then(|config| run(&args, &config));
    if let Err(e) = result {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args, config: &PrinterConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("Loaded config from {}", args.config.display());
    config.validate()?;

    let mut toolhead = SimToolhead::from_config(config);
    let mut source = ConfigRailSource::new(config);
    let mut kin = CartesianKinematics::new(&mut toolhead, &mut source)?;

    if let Some(letters) = &args.home {
        let axes = parse_axes(letters)?;
        let mut controller = SimHomingController::new();
        let summary = toolhead.home(&mut kin, &axes, &mut controller)?;
        let homed: String = summary.axes().iter().map(|a| a.label()).collect();
        info!("Homed axes: {homed}");
    }

    for spec in &args.moves {
        let target = parse_target(spec, &toolhead.position())?;
        match toolhead.move_to(&kin, target) {
            Ok(()) => info!("Move {spec}: ok"),
            Err(e) => warn!("Move {spec} rejected: {e}"),
        }
    }

    if args.motor_off {
        toolhead.motor_off(&mut kin);
        info!("Motors disabled");
    }

    println!("{}", serde_json::to_string_pretty(&kin.get_status())?);
    Ok(())
}

/// Axis letters to slot indices, preserving order.
fn parse_axes(letters: &str) -> Result<Vec<usize>, String> {
    letters
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| {
            Axis::from_letter(c)
                .map(|a| a.index())
                .ok_or_else(|| format!("unknown axis '{c}'"))
        })
        .collect()
}

/// `x=10,y=20` applied on top of `current`.
fn parse_target(spec: &str, current: &Coord) -> Result<Coord, String> {
    let mut target = *current;
    for part in spec.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (letter, value) = part
            .split_once('=')
            .ok_or_else(|| format!("expected <axis>=<value>, got '{part}'"))?;
        let axis = letter
            .trim()
            .chars()
            .next()
            .and_then(Axis::from_letter)
            .ok_or_else(|| format!("unknown axis '{letter}'"))?;
        target[axis] = value
            .trim()
            .parse()
            .map_err(|e| format!("bad value for {axis}: {e}"))?;
    }
    Ok(target)
}

fn setup_tracing(args: &Args, level: LogLevel) {
    let default_level = if args.verbose { "debug" } else { level.as_str() };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries the status JSON.
    if args.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
}
