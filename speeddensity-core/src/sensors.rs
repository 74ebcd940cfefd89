//! Sensor Inputs
//!
//! The estimator never reads sensor variables directly. Each cycle the host
//! captures one [`SensorSnapshot`] and the whole computation works from that
//! copy, so a sensor value updated by an interrupt halfway through the cycle
//! cannot mix old and new readings.
//!
//! The MAF sensor itself is read through [`MafSensorHook`]: the host's own
//! voltage-to-airflow routine. Usually that is a 1-D lookup on the MAF scaling
//! curve, which is why [`Table2D`] implements the hook directly.

use crate::interpolation::lookup_1d;
use crate::tables::Table2D;

/// Sensor values for one control cycle
///
/// Units follow the calibration tables: rpm, kPa, °C and volts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSnapshot {
    /// Engine speed (rpm)
    pub rpm: f32,
    /// Manifold absolute pressure (kPa)
    pub manifold_pressure: f32,
    /// Atmospheric pressure (kPa)
    pub atmospheric_pressure: f32,
    /// Intake air temperature (°C)
    pub intake_air_temp_c: f32,
    /// Raw MAF sensor output (V)
    pub maf_voltage: f32,
}

/// Host-side access to the current sensor values
pub trait SnapshotSource {
    /// Capture every input for one cycle
    fn capture(&self) -> SensorSnapshot;
}

impl SnapshotSource for SensorSnapshot {
    fn capture(&self) -> SensorSnapshot {
        *self
    }
}

/// Voltage-to-airflow conversion for the MAF sensor
pub trait MafSensorHook {
    /// Airflow reported by the sensor at `voltage`
    fn sensor_maf(&self, voltage: f32) -> f32;

    /// Breakpoints and cells of the scaling curve, when the hook is a table
    ///
    /// Lets the diagnostic export list the curve alongside the surfaces.
    fn scaling_curve(&self) -> Option<(&[f32], &[f32])> {
        None
    }
}

/// MAF scaling curve: voltage breakpoints to airflow
impl<const N: usize> MafSensorHook for Table2D<N> {
    fn sensor_maf(&self, voltage: f32) -> f32 {
        lookup_1d(self, voltage)
    }

    fn scaling_curve(&self) -> Option<(&[f32], &[f32])> {
        Some((self.breakpoints().as_slice(), self.cells().as_slice()))
    }
}

impl<F> MafSensorHook for F
where
    F: Fn(f32) -> f32,
{
    fn sensor_maf(&self, voltage: f32) -> f32 {
        self(voltage)
    }
}
