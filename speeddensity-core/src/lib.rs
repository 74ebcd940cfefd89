//! Mass air flow estimation for engine control
//!
//! Each control-loop cycle computes two airflow values: the MAF sensor
//! reading and a speed-density estimate from engine speed, manifold pressure
//! and calibration tables. A persisted mode flag picks which one the rest of
//! the ECU receives.
//!
//! Key constraints:
//! - Called once per fixed-period tick, single-threaded
//! - No heap allocation, no blocking
//! - Never fails at runtime; bad calibration is rejected at load
//!
//! ```no_run
//! use speeddensity_core::{
//!     EstimatorConfig, MafEstimator, PersistentState, SensorSnapshot,
//!     SpeedDensityTables, Table2D, Table3D,
//! };
//!
//! # fn read_sensors() -> SensorSnapshot { SensorSnapshot::default() }
//! # fn main() -> Result<(), speeddensity_core::CalibrationError> {
//! let scaling = Table2D::new([0.5, 2.5, 5.0], [1.0, 60.0, 320.0])?;
//! let tables = SpeedDensityTables {
//!     volumetric_efficiency: Table3D::new([20.0, 100.0], [800.0, 7000.0], [[0.85; 2]; 2])?,
//!     atmospheric_compensation: Table3D::new([20.0, 100.0], [70.0, 105.0], [[1.0; 2]; 2])?,
//! };
//! let estimator = MafEstimator::new(EstimatorConfig::default(), scaling, tables)?;
//! let mut state = PersistentState::new();
//!
//! loop {
//!     let maf = estimator.compute(&read_sensors(), &mut state);
//!     // hand `maf` to fueling
//! }
//! # }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod constants;
pub mod errors;
pub mod estimator;
pub mod export;
pub mod interpolation;
pub mod mode;
pub mod sensors;
pub mod state;
pub mod tables;

// Public API
pub use errors::{CalibrationError, CalibrationResult};
pub use estimator::{speed_density_maf, EstimatorConfig, MafEstimator, SpeedDensityTables};
pub use export::{DiagnosticExport, ExportEntry, ExportKind};
pub use interpolation::{lookup_1d, lookup_2d};
pub use mode::{MafMode, ModeController};
pub use sensors::{MafSensorHook, SensorSnapshot, SnapshotSource};
pub use state::PersistentState;
pub use tables::{validate_surface, Surface, Table2D, Table3D};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
