//! Error Types for Calibration Loading
//!
//! ## Where Errors Can Happen
//!
//! The per-cycle estimator has no error path. Out-of-range inputs are clamped
//! by the interpolator and an uninitialized mode heals itself on the first
//! cycle. That leaves exactly one place where things can go wrong: loading
//! calibration data before the control loop starts.
//!
//! A table with a non-increasing axis would make the bracketing search return
//! a nonsensical interval, and a NaN cell would poison every cycle that
//! touches it. These are rejected once, up front, so the hot path can assume
//! well-formed tables.
//!
//! ## Design
//!
//! Same rules as the rest of the crate's embedded-facing types:
//!
//! 1. **No heap**: context is `&'static str` and plain integers.
//! 2. **Copy**: errors are small and cheap to return by value.
//! 3. **Actionable**: each variant names the axis or value at fault.
//!
//! ```rust
//! use speeddensity_core::{CalibrationError, Table2D};
//!
//! let result = Table2D::new([0.0, 2.0, 1.0], [0.0, 10.0, 20.0]);
//! assert_eq!(
//!     result.unwrap_err(),
//!     CalibrationError::NonIncreasingAxis { axis: "breakpoints", index: 2 },
//! );
//! ```

use thiserror_no_std::Error;

/// Result type for calibration loading
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Calibration data rejected at load time
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CalibrationError {
    /// An axis has no breakpoints
    #[error("Axis '{axis}' has no breakpoints")]
    EmptyAxis {
        /// Which axis of the table
        axis: &'static str,
    },

    /// Breakpoints are not strictly increasing
    #[error("Axis '{axis}' is not strictly increasing at index {index}")]
    NonIncreasingAxis {
        /// Which axis of the table
        axis: &'static str,
        /// Index of the first breakpoint that is not greater than its predecessor
        index: usize,
    },

    /// A breakpoint or cell is NaN or infinite
    #[error("Non-finite value in '{field}' at index {index}")]
    NonFiniteValue {
        /// Axis or cell block containing the value
        field: &'static str,
        /// Flat index of the offending value
        index: usize,
    },

    /// Cell count does not match the axis lengths
    #[error("Dimension mismatch in '{field}': expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Axis or cell block with the wrong length
        field: &'static str,
        /// Length implied by the table shape
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// Raw persisted mode byte is not a known mode
    #[error("Unknown MAF mode byte {0}")]
    InvalidMode(u8),

    /// Default mode must be Sensor or SpeedDensity
    #[error("Default MAF mode must not be Undefined")]
    UndefinedDefaultMode,

    /// A calibration scalar is non-finite or not positive
    #[error("Calibration scalar '{name}' must be finite and positive, got {value}")]
    InvalidScalar {
        /// Name of the scalar
        name: &'static str,
        /// Value supplied
        value: f32,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::EmptyAxis { axis } =>
                defmt::write!(fmt, "Axis {} empty", axis),
            Self::NonIncreasingAxis { axis, index } =>
                defmt::write!(fmt, "Axis {} not increasing at {}", axis, index),
            Self::NonFiniteValue { field, index } =>
                defmt::write!(fmt, "Non-finite {} at {}", field, index),
            Self::DimensionMismatch { field, expected, actual } =>
                defmt::write!(fmt, "{}: expected {}, got {}", field, expected, actual),
            Self::InvalidMode(raw) =>
                defmt::write!(fmt, "Unknown MAF mode {}", raw),
            Self::UndefinedDefaultMode =>
                defmt::write!(fmt, "Default MAF mode undefined"),
            Self::InvalidScalar { name, value } =>
                defmt::write!(fmt, "Scalar {} invalid: {}", name, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_small() {
        assert!(core::mem::size_of::<CalibrationError>() <= 40);
    }

    #[cfg(feature = "std")]
    #[test]
    fn display_names_the_axis() {
        let err = CalibrationError::NonIncreasingAxis { axis: "rows", index: 3 };
        assert_eq!(err.to_string(), "Axis 'rows' is not strictly increasing at index 3");
    }
}
