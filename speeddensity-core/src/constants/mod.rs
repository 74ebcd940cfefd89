//! Constants for SpeedDensity Core
//!
//! Centralized, documented constants used by the estimator. All numeric
//! values carry their units in the name.
//!
//! ## Organization
//!
//! - **Physics**: gas law and unit conversion constants
//! - **Calibration**: default scalars for an uncalibrated estimator

/// Physical constants for the ideal gas relation and unit conversions.
pub mod physics;

/// Default displacement, speed-density constant and MAF mode.
pub mod calibration;

pub use physics::{CELSIUS_TO_KELVIN, ABSOLUTE_ZERO_CELSIUS, SEA_LEVEL_PRESSURE_KPA};

pub use calibration::{DEFAULT_DISPLACEMENT_L, SPEED_DENSITY_CONSTANT, DEFAULT_MAF_MODE};
