//! Default Calibration Scalars
//!
//! Values used by [`EstimatorConfig::default`](crate::estimator::EstimatorConfig).
//! A real calibration overrides these per engine.

use super::physics::{
    GRAMS_PER_KG, REVOLUTIONS_PER_INTAKE_CYCLE, SECONDS_PER_MINUTE,
    SPECIFIC_GAS_CONSTANT_DRY_AIR_J_PER_KG_K,
};
use crate::mode::MafMode;

/// Engine displacement (litres).
///
/// Typical of a flat-four 2.5 L engine, the platform speed-density
/// conversions are most commonly tuned on.
pub const DEFAULT_DISPLACEMENT_L: f32 = 2.5;

/// Speed-density constant for litres, kPa and rpm in, grams per second out.
///
/// ```text
/// m_dot = V × rpm × MAP × VE × AtmComp × K / T
///
/// V [L] × MAP [kPa]     = J
/// J / (R [J/(kg·K)] × T) = kg per intake cycle
/// rpm / (60 × 2)         = intake cycles per second
///
/// K = 1000 / (R × 60 × 2) ≈ 0.02903
/// ```
pub const SPEED_DENSITY_CONSTANT: f32 = GRAMS_PER_KG
    / (SPECIFIC_GAS_CONSTANT_DRY_AIR_J_PER_KG_K * SECONDS_PER_MINUTE * REVOLUTIONS_PER_INTAKE_CYCLE);

/// Mode applied when persisted state is found uninitialized.
///
/// The sensor path is the stock behavior, so it is the safe default until a
/// tuner has validated the speed-density tables.
pub const DEFAULT_MAF_MODE: MafMode = MafMode::Sensor;
