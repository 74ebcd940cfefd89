//! Control Loop Example
//!
//! Drives the estimator through a short simulated pull: idle, part throttle,
//! then full load, the way an ECU scheduler would call it once per tick.
//!
//! ## What You'll Learn
//!
//! - Building and validating a calibration
//! - How the persisted mode heals itself on the first cycle
//! - Comparing sensor and speed-density airflow side by side
//! - Reading the diagnostic export a calibration tool would use
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_control_loop
//! ```

use speeddensity_core::{
    CalibrationResult, EstimatorConfig, MafEstimator, MafMode, PersistentState, SensorSnapshot,
    SnapshotSource, SpeedDensityTables, Table2D, Table3D,
};

/// Simulated sensor bus: a throttle sweep over a fixed number of ticks
struct SimulatedEngine {
    tick: u32,
}

impl SnapshotSource for SimulatedEngine {
    fn capture(&self) -> SensorSnapshot {
        let load = (self.tick as f32 / 20.0).min(1.0);
        SensorSnapshot {
            rpm: 900.0 + 5000.0 * load,
            manifold_pressure: 30.0 + 110.0 * load,
            atmospheric_pressure: 100.5,
            intake_air_temp_c: 22.0 + 15.0 * load,
            maf_voltage: 1.1 + 3.3 * load,
        }
    }
}

fn calibration() -> CalibrationResult<MafEstimator<Table2D<6>, Table3D<4, 4>, Table3D<2, 2>>> {
    let scaling = Table2D::new(
        [0.5, 1.5, 2.5, 3.5, 4.5, 5.0],
        [0.8, 6.0, 22.0, 62.0, 150.0, 230.0],
    )?;

    let tables = SpeedDensityTables {
        volumetric_efficiency: Table3D::new(
            [20.0, 60.0, 100.0, 160.0],
            [800.0, 2500.0, 4500.0, 7000.0],
            [
                [0.45, 0.60, 0.68, 0.72],
                [0.55, 0.75, 0.85, 0.90],
                [0.57, 0.79, 0.91, 0.96],
                [0.48, 0.70, 0.82, 0.86],
            ],
        )?,
        atmospheric_compensation: Table3D::new(
            [20.0, 160.0],
            [70.0, 105.0],
            [[1.05, 1.03], [0.99, 1.00]],
        )?,
    };

    let config = EstimatorConfig::default().with_default_mode(MafMode::SpeedDensity);
    MafEstimator::new(config, scaling, tables)
}

fn main() -> CalibrationResult<()> {
    println!("SpeedDensity Control Loop Example");
    println!("=================================\n");

    let estimator = calibration()?;

    // Cold boot: persisted memory reads as zero
    let mut state = PersistentState::new();
    println!("Mode at boot: {}\n", state.mode);

    println!("{:>4} {:>7} {:>7} {:>6} {:>9} {:>9} {:>9}", "tick", "rpm", "MAP", "VE", "sensor", "SD", "output");
    let mut engine = SimulatedEngine { tick: 0 };
    for tick in 0..=24 {
        engine.tick = tick;
        let snapshot = engine.capture();
        let maf = estimator.step(&engine, &mut state);

        if tick % 4 == 0 {
            println!(
                "{:>4} {:>7.0} {:>7.1} {:>6.3} {:>9.2} {:>9.2} {:>9.2}",
                tick,
                snapshot.rpm,
                snapshot.manifold_pressure,
                state.volumetric_efficiency,
                state.sensor_maf,
                state.speed_density_maf,
                maf,
            );
        }
    }

    println!("\nMode after first cycle: {}", state.mode);

    println!("\nDiagnostic export:");
    for entry in estimator.diagnostic_export().iter() {
        println!("  {:<36} {:?} @ {:#x} x{}", entry.name, entry.kind, entry.address, entry.len);
    }

    Ok(())
}
