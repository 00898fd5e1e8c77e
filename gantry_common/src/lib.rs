//! Gantry Common Library
//!
//! Shared constants, fixed-width coordinate types and configuration loading
//! for the gantry workspace crates.
//!
//! # Module Structure
//!
//! - [`consts`] - Axis count limits, axis letters, homing factors
//! - [`axis`] - `Axis` enumeration and `ActiveAxes` bitflags
//! - [`coord`] - Fixed-width `Coord` and `TargetCoord` vectors
//! - [`homing`] - Homing descriptors reported by rails
//! - [`config`] - Printer configuration and TOML loader
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use gantry_common::prelude::*;
//!
//! let c = Coord::from_slice(&[1.0, 2.0]);
//! assert_eq!(c[Axis::new(1).unwrap()], 2.0);
//! ```

pub mod axis;
pub mod config;
pub mod consts;
pub mod coord;
pub mod homing;
pub mod prelude;
