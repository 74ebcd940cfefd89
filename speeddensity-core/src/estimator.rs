//! Mass Air Flow Estimation
//!
//! ## Two Sources of Airflow
//!
//! A hot-wire MAF sensor measures airflow directly but saturates with large
//! turbos and gets confused by reversion pulses from aggressive cams. The
//! speed-density method instead infers airflow from what the engine is doing:
//!
//! ```text
//!            V × rpm × MAP × VE × AtmComp × K
//! MAF   =   ──────────────────────────────────
//!                    IAT[°C] + 273.15
//!
//! Where:
//! - V       = displacement (L)
//! - rpm     = engine speed
//! - MAP     = manifold absolute pressure (kPa)
//! - VE      = volumetric efficiency, from a MAP × rpm surface
//! - AtmComp = atmospheric compensation, from a MAP × baro surface
//! - K       = unit constant (see constants::calibration)
//! ```
//!
//! Both values are computed every cycle and stored in the persisted state so
//! a tuner can log them side by side. The persisted mode picks which one the
//! rest of the ECU receives.
//!
//! ## Cycle
//!
//! ```text
//! snapshot ──▶ sensor hook ──────────────────────────▶ state.sensor_maf
//!          │
//!          ├─▶ mode controller (heal Undefined once)
//!          │
//!          ├─▶ lookup_2d(VE,  MAP, rpm)  ─┐
//!          ├─▶ lookup_2d(Atm, MAP, baro) ─┼──▶ formula ─▶ state.speed_density_maf
//!          └─▶ IAT + 273.15 ──────────────┘
//!
//!          mode == SpeedDensity ? speed_density_maf : sensor_maf
//! ```
//!
//! `compute` never fails. Inputs outside the tables clamp to the edges, and
//! the state is overwritten in full. The intake temperature is not checked:
//! the acquisition layer must keep it above absolute zero.
//!
//! ## Example
//!
//! ```rust
//! use speeddensity_core::{
//!     EstimatorConfig, MafEstimator, MafMode, PersistentState, SensorSnapshot,
//!     SpeedDensityTables, Table2D, Table3D,
//! };
//!
//! let scaling = Table2D::new([0.5, 5.0], [0.0, 300.0])?;
//! let tables = SpeedDensityTables {
//!     volumetric_efficiency: Table3D::new([20.0, 100.0], [800.0, 7000.0], [[0.8; 2]; 2])?,
//!     atmospheric_compensation: Table3D::new([20.0, 100.0], [70.0, 105.0], [[1.0; 2]; 2])?,
//! };
//! let config = EstimatorConfig::default().with_default_mode(MafMode::SpeedDensity);
//! let estimator = MafEstimator::new(config, scaling, tables)?;
//!
//! let mut state = PersistentState::new();
//! let snapshot = SensorSnapshot {
//!     rpm: 3000.0,
//!     manifold_pressure: 60.0,
//!     atmospheric_pressure: 101.3,
//!     intake_air_temp_c: 20.0,
//!     maf_voltage: 2.1,
//! };
//!
//! let maf = estimator.compute(&snapshot, &mut state);
//! assert_eq!(state.mode, MafMode::SpeedDensity);
//! assert_eq!(maf, state.speed_density_maf);
//! # Ok::<(), speeddensity_core::CalibrationError>(())
//! ```

use crate::{
    constants::{
        calibration::{DEFAULT_DISPLACEMENT_L, DEFAULT_MAF_MODE, SPEED_DENSITY_CONSTANT},
        physics::CELSIUS_TO_KELVIN,
    },
    errors::{CalibrationError, CalibrationResult},
    export::{self, DiagnosticExport},
    interpolation::lookup_2d,
    mode::{MafMode, ModeController},
    sensors::{MafSensorHook, SensorSnapshot, SnapshotSource},
    state::PersistentState,
    tables::{validate_surface, Surface},
};

/// Calibration scalars for the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimatorConfig {
    /// Engine displacement (L)
    pub displacement_l: f32,
    /// Unit constant applied to the speed-density product
    pub speed_density_constant: f32,
    /// Mode applied when the persisted mode is `Undefined`
    pub default_mode: MafMode,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            displacement_l: DEFAULT_DISPLACEMENT_L,
            speed_density_constant: SPEED_DENSITY_CONSTANT,
            default_mode: DEFAULT_MAF_MODE,
        }
    }
}

impl EstimatorConfig {
    /// Set displacement in litres
    pub fn with_displacement(mut self, displacement_l: f32) -> Self {
        self.displacement_l = displacement_l;
        self
    }

    /// Set the speed-density unit constant
    pub fn with_speed_density_constant(mut self, constant: f32) -> Self {
        self.speed_density_constant = constant;
        self
    }

    /// Set the mode used to heal uninitialized state
    pub fn with_default_mode(mut self, mode: MafMode) -> Self {
        self.default_mode = mode;
        self
    }

    /// Reject scalars that would make every cycle meaningless
    pub fn validate(&self) -> CalibrationResult<()> {
        check_scalar("displacement_l", self.displacement_l)?;
        check_scalar("speed_density_constant", self.speed_density_constant)?;
        if !self.default_mode.is_defined() {
            return Err(CalibrationError::UndefinedDefaultMode);
        }
        Ok(())
    }
}

fn check_scalar(name: &'static str, value: f32) -> CalibrationResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        log_debug!("Rejecting calibration scalar {} = {}", name, value);
        Err(CalibrationError::InvalidScalar { name, value })
    }
}

/// The two surfaces the speed-density formula reads
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedDensityTables<Ve, Atm> {
    /// Volumetric efficiency; columns are MAP (kPa), rows are engine speed (rpm)
    pub volumetric_efficiency: Ve,
    /// Atmospheric compensation; columns are MAP (kPa), rows are atmospheric pressure (kPa)
    pub atmospheric_compensation: Atm,
}

/// Speed-density airflow from already looked-up table values
pub fn speed_density_maf(
    config: &EstimatorConfig,
    snapshot: &SensorSnapshot,
    volumetric_efficiency: f32,
    atmospheric_compensation: f32,
) -> f32 {
    let intake_temp_k = snapshot.intake_air_temp_c + CELSIUS_TO_KELVIN;

    config.displacement_l
        * snapshot.rpm
        * snapshot.manifold_pressure
        * volumetric_efficiency
        * atmospheric_compensation
        * config.speed_density_constant
        / intake_temp_k
}

/// Per-cycle MAF estimator
///
/// Owns the calibration (scalars, surfaces and sensor hook), all immutable
/// after construction. The only mutable data is the [`PersistentState`]
/// passed into each call.
#[derive(Debug, Clone)]
pub struct MafEstimator<H, Ve, Atm> {
    config: EstimatorConfig,
    modes: ModeController,
    sensor: H,
    tables: SpeedDensityTables<Ve, Atm>,
}

impl<H, Ve, Atm> MafEstimator<H, Ve, Atm>
where
    H: MafSensorHook,
    Ve: Surface,
    Atm: Surface,
{
    /// Validate the calibration and build an estimator
    ///
    /// Both surfaces are checked for shape, ordering and finiteness, so
    /// [`compute`](Self::compute) can never index outside a table.
    pub fn new(
        config: EstimatorConfig,
        sensor: H,
        tables: SpeedDensityTables<Ve, Atm>,
    ) -> CalibrationResult<Self> {
        config.validate()?;
        validate_surface(&tables.volumetric_efficiency)?;
        validate_surface(&tables.atmospheric_compensation)?;
        let modes = ModeController::new(config.default_mode)?;

        Ok(Self {
            config,
            modes,
            sensor,
            tables,
        })
    }

    /// Run one control cycle and return the airflow the ECU should use
    pub fn compute(&self, snapshot: &SensorSnapshot, state: &mut PersistentState) -> f32 {
        state.sensor_maf = self.sensor.sensor_maf(snapshot.maf_voltage);

        let mode = self.modes.resolve(&mut state.mode);

        state.volumetric_efficiency = lookup_2d(
            &self.tables.volumetric_efficiency,
            snapshot.manifold_pressure,
            snapshot.rpm,
        );
        state.atmospheric_compensation = lookup_2d(
            &self.tables.atmospheric_compensation,
            snapshot.manifold_pressure,
            snapshot.atmospheric_pressure,
        );
        state.speed_density_maf = speed_density_maf(
            &self.config,
            snapshot,
            state.volumetric_efficiency,
            state.atmospheric_compensation,
        );

        log_trace!(
            "MAF cycle: sensor {} g/s, speed-density {} g/s (VE {}, atm {}), mode {}",
            state.sensor_maf,
            state.speed_density_maf,
            state.volumetric_efficiency,
            state.atmospheric_compensation,
            mode
        );

        match mode {
            MafMode::SpeedDensity => state.speed_density_maf,
            MafMode::Sensor | MafMode::Undefined => state.sensor_maf,
        }
    }

    /// Capture one snapshot from `source` and run [`compute`](Self::compute) on it
    pub fn step<S: SnapshotSource + ?Sized>(&self, source: &S, state: &mut PersistentState) -> f32 {
        let snapshot = source.capture();
        self.compute(&snapshot, state)
    }

    /// Addresses of the calibration data, for a calibration tool's table definitions
    ///
    /// Addresses are only meaningful while the estimator is not moved.
    pub fn diagnostic_export(&self) -> DiagnosticExport {
        export::collect(
            &self.tables.volumetric_efficiency,
            &self.tables.atmospheric_compensation,
            &self.config,
            self.sensor.scaling_curve(),
        )
    }

    /// Calibration scalars
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Calibration surfaces
    pub fn tables(&self) -> &SpeedDensityTables<Ve, Atm> {
        &self.tables
    }

    /// Sensor hook
    pub fn sensor(&self) -> &H {
        &self.sensor
    }
}
