//! MAF Mode Selection
//!
//! ## States
//!
//! ```text
//!               first cycle
//!  Undefined ─────────────────▶ default (Sensor | SpeedDensity)
//!     (cold boot, byte 0)            │
//!                                    └── unchanged for the rest of the power cycle
//! ```
//!
//! The mode lives in persisted RAM. After a cold boot that memory reads as
//! zero, which is `Undefined`. The controller replaces `Undefined` with the
//! calibrated default exactly once; it never changes a defined mode. A
//! calibration tool may overwrite the persisted byte to switch modes live,
//! but that protocol lives outside this crate.

use core::fmt;

use crate::errors::{CalibrationError, CalibrationResult};

/// Which airflow value the estimator returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MafMode {
    /// Persisted memory not yet initialized
    #[default]
    Undefined = 0,
    /// Return the MAF sensor reading
    Sensor = 1,
    /// Return the speed-density estimate
    SpeedDensity = 2,
}

impl MafMode {
    /// Byte as stored in persisted memory
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// True for `Sensor` and `SpeedDensity`
    pub const fn is_defined(self) -> bool {
        !matches!(self, MafMode::Undefined)
    }
}

impl TryFrom<u8> for MafMode {
    type Error = CalibrationError;

    fn try_from(raw: u8) -> CalibrationResult<Self> {
        match raw {
            0 => Ok(MafMode::Undefined),
            1 => Ok(MafMode::Sensor),
            2 => Ok(MafMode::SpeedDensity),
            other => Err(CalibrationError::InvalidMode(other)),
        }
    }
}

impl fmt::Display for MafMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MafMode::Undefined => "undefined",
            MafMode::Sensor => "sensor",
            MafMode::SpeedDensity => "speed-density",
        };
        f.write_str(name)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MafMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            MafMode::Undefined => defmt::write!(fmt, "undefined"),
            MafMode::Sensor => defmt::write!(fmt, "sensor"),
            MafMode::SpeedDensity => defmt::write!(fmt, "speed-density"),
        }
    }
}

/// One-shot initializer for the persisted mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeController {
    default_mode: MafMode,
}

impl ModeController {
    /// Controller that heals `Undefined` to `default_mode`
    ///
    /// `default_mode` must be `Sensor` or `SpeedDensity`.
    pub fn new(default_mode: MafMode) -> CalibrationResult<Self> {
        if !default_mode.is_defined() {
            return Err(CalibrationError::UndefinedDefaultMode);
        }
        Ok(Self { default_mode })
    }

    /// Mode applied to uninitialized state
    pub fn default_mode(&self) -> MafMode {
        self.default_mode
    }

    /// Initialize `mode` if needed and return the mode in effect
    pub fn resolve(&self, mode: &mut MafMode) -> MafMode {
        if *mode == MafMode::Undefined {
            *mode = self.default_mode;
            log_info!("MAF mode initialized to {}", self.default_mode);
        }
        *mode
    }
}
