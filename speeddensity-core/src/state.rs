//! Persisted Estimator State
//!
//! One [`PersistentState`] lives for the whole power cycle, in memory that a
//! calibration tool can read and write. The estimator overwrites every
//! airflow field each cycle; only the mode carries meaning from one cycle to
//! the next.

use crate::mode::MafMode;

/// State kept between control cycles
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PersistentState {
    /// Selected output; `Undefined` until the first cycle
    pub mode: MafMode,
    /// Airflow from the MAF sensor (g/s)
    pub sensor_maf: f32,
    /// Airflow from speed-density math (g/s)
    pub speed_density_maf: f32,
    /// Last volumetric efficiency lookup
    pub volumetric_efficiency: f32,
    /// Last atmospheric compensation lookup
    pub atmospheric_compensation: f32,
}

impl PersistentState {
    /// Cold-boot state: everything zero, mode `Undefined`
    pub const fn new() -> Self {
        Self {
            mode: MafMode::Undefined,
            sensor_maf: 0.0,
            speed_density_maf: 0.0,
            volumetric_efficiency: 0.0,
            atmospheric_compensation: 0.0,
        }
    }

    /// Cold-boot state with a mode already written by a calibration tool
    pub const fn with_mode(mode: MafMode) -> Self {
        Self { mode, ..Self::new() }
    }

    /// The mode has been set, by the estimator or externally
    pub fn is_initialized(&self) -> bool {
        self.mode.is_defined()
    }

    /// Airflow selected by the current mode
    ///
    /// Reflects the last completed cycle. An `Undefined` mode reads the
    /// sensor value, same as `Sensor`.
    pub fn selected_maf(&self) -> f32 {
        match self.mode {
            MafMode::SpeedDensity => self.speed_density_maf,
            MafMode::Sensor | MafMode::Undefined => self.sensor_maf,
        }
    }
}
