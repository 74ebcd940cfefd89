//! Diagnostic Export for Calibration Tools
//!
//! A calibration tool edits tables in place, so it needs to know where they
//! live. This module produces a fixed metadata table describing every piece
//! of calibration data by name, kind, address and length. It has no behavior
//! of its own; a debug build can print it, or a host can serialize it into
//! the tool's table definition file.
//!
//! Entry order is stable:
//!
//! ```text
//! 0  volumetric_efficiency.columns      ColumnHeaders
//! 1  volumetric_efficiency.rows         RowHeaders
//! 2  volumetric_efficiency.cells        Cells
//! 3  atmospheric_compensation.columns   ColumnHeaders
//! 4  atmospheric_compensation.rows      RowHeaders
//! 5  atmospheric_compensation.cells     Cells
//! 6  displacement                       Scalar
//! 7  default_mode                       Scalar
//! 8  maf_scaling.breakpoints            ColumnHeaders   (table hooks only)
//! 9  maf_scaling.cells                  Cells           (table hooks only)
//! ```

use heapless::Vec;

use crate::{estimator::EstimatorConfig, tables::Surface};

/// Upper bound on export entries
pub const MAX_EXPORT_ENTRIES: usize = 10;

/// Metadata table handed to a calibration tool
pub type DiagnosticExport = Vec<ExportEntry, MAX_EXPORT_ENTRIES>;

/// What an exported address points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ExportKind {
    /// X axis breakpoints (`f32` array)
    ColumnHeaders,
    /// Y axis breakpoints (`f32` array)
    RowHeaders,
    /// Cell values (`f32` array, row-major)
    Cells,
    /// Single value
    Scalar,
}

/// One exported location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExportEntry {
    /// Stable identifier used in table definitions
    pub name: &'static str,
    /// Layout at `address`
    pub kind: ExportKind,
    /// Address of the first element
    pub address: usize,
    /// Number of elements
    pub len: usize,
}

impl ExportEntry {
    fn array(name: &'static str, kind: ExportKind, values: &[f32]) -> Self {
        Self {
            name,
            kind,
            address: values.as_ptr() as usize,
            len: values.len(),
        }
    }

    fn scalar<T>(name: &'static str, value: &T) -> Self {
        Self {
            name,
            kind: ExportKind::Scalar,
            address: value as *const T as usize,
            len: 1,
        }
    }
}

fn surface_entries<S: Surface + ?Sized>(
    names: [&'static str; 3],
    surface: &S,
) -> [ExportEntry; 3] {
    [
        ExportEntry::array(names[0], ExportKind::ColumnHeaders, surface.column_breakpoints()),
        ExportEntry::array(names[1], ExportKind::RowHeaders, surface.row_breakpoints()),
        ExportEntry::array(names[2], ExportKind::Cells, surface.cell_values()),
    ]
}

/// Build the export table in its documented order
pub fn collect<Ve, Atm>(
    volumetric_efficiency: &Ve,
    atmospheric_compensation: &Atm,
    config: &EstimatorConfig,
    scaling_curve: Option<(&[f32], &[f32])>,
) -> DiagnosticExport
where
    Ve: Surface + ?Sized,
    Atm: Surface + ?Sized,
{
    let ve = surface_entries(
        [
            "volumetric_efficiency.columns",
            "volumetric_efficiency.rows",
            "volumetric_efficiency.cells",
        ],
        volumetric_efficiency,
    );
    let atm = surface_entries(
        [
            "atmospheric_compensation.columns",
            "atmospheric_compensation.rows",
            "atmospheric_compensation.cells",
        ],
        atmospheric_compensation,
    );
    let scalars = [
        ExportEntry::scalar("displacement", &config.displacement_l),
        ExportEntry::scalar("default_mode", &config.default_mode),
    ];
    let curve = scaling_curve.map(|(breakpoints, cells)| {
        [
            ExportEntry::array("maf_scaling.breakpoints", ExportKind::ColumnHeaders, breakpoints),
            ExportEntry::array("maf_scaling.cells", ExportKind::Cells, cells),
        ]
    });

    // At most 3 + 3 + 2 + 2 entries, within MAX_EXPORT_ENTRIES.
    ve.into_iter()
        .chain(atm)
        .chain(scalars)
        .chain(curve.into_iter().flatten())
        .collect()
}
