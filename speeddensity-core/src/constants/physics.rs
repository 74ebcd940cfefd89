//! Physical Constants for Airflow Estimation
//!
//! Fundamental constants used by the speed-density calculation. Values follow
//! the International Standard Atmosphere and the ideal gas law for dry air.

// ===== TEMPERATURE =====

/// Offset between the Celsius and Kelvin scales (K).
///
/// Added to the intake air temperature before it is used as the
/// denominator of the ideal gas relation.
///
/// Source: NIST Special Publication 330 (2019)
pub const CELSIUS_TO_KELVIN: f32 = 273.15;

/// Absolute zero in Celsius (°C).
///
/// An intake air temperature at this value would zero the speed-density
/// denominator. Sensor acquisition must never report it.
pub const ABSOLUTE_ZERO_CELSIUS: f32 = -CELSIUS_TO_KELVIN;

// ===== GAS PROPERTIES =====

/// Specific gas constant of dry air (J/(kg·K)).
///
/// Relates pressure, volume and temperature to mass: `m = P·V / (R·T)`.
///
/// Source: ISO 2533:1975 (Standard Atmosphere)
pub const SPECIFIC_GAS_CONSTANT_DRY_AIR_J_PER_KG_K: f32 = 287.05;

/// Standard atmospheric pressure at sea level (kPa).
///
/// Reference point for atmospheric compensation tables.
///
/// Source: International Standard Atmosphere (ISA)
pub const SEA_LEVEL_PRESSURE_KPA: f32 = 101.325;

// ===== ENGINE CYCLE =====

/// Seconds per minute, for converting engine speed to revolutions per second.
pub const SECONDS_PER_MINUTE: f32 = 60.0;

/// Crankshaft revolutions per intake event of the full displacement.
///
/// A four-stroke engine fills every cylinder once per two revolutions.
pub const REVOLUTIONS_PER_INTAKE_CYCLE: f32 = 2.0;

/// Grams per kilogram.
pub const GRAMS_PER_KG: f32 = 1000.0;
