//! Calibration Table Store
//!
//! ## Table Shapes
//!
//! Engine calibrations are expressed as lookup tables rather than formulas.
//! Two shapes cover everything the estimator needs:
//!
//! ```text
//! Table2D (one input)                 Table3D (two inputs)
//!
//!  X:  0.5  1.0  2.0  3.5  5.0               X (columns) →
//!  V:  2.0  4.5  18   95   310         Y    ┌──────────────────┐
//!                                      ↓    │ V[row][col]      │
//!  e.g. MAF voltage → g/s                   └──────────────────┘
//!                                      e.g. MAP × RPM → VE
//! ```
//!
//! ## Storage
//!
//! Axis lengths are const generics, so a `Table3D<16, 12>` is exactly 16
//! columns by 12 rows and its cell matrix cannot have any other shape. There
//! is no heap allocation; a table is a few fixed arrays that can live in a
//! `static` or inside the estimator.
//!
//! Tables are immutable once constructed. Construction validates that every
//! axis is non-empty, finite and strictly increasing, and that every cell is
//! finite, so lookups never have to re-check.

use crate::errors::{CalibrationError, CalibrationResult};

/// One-input calibration curve
#[derive(Debug, Clone, PartialEq)]
pub struct Table2D<const N: usize> {
    /// Strictly increasing input breakpoints
    breakpoints: [f32; N],
    /// Output value at each breakpoint
    cells: [f32; N],
}

impl<const N: usize> Table2D<N> {
    /// Build a curve from breakpoints and their cell values
    pub fn new(breakpoints: [f32; N], cells: [f32; N]) -> CalibrationResult<Self> {
        validate_axis(&breakpoints, "breakpoints")?;
        validate_cells(&cells, "cells")?;
        Ok(Self { breakpoints, cells })
    }

    /// Input breakpoints
    pub fn breakpoints(&self) -> &[f32; N] {
        &self.breakpoints
    }

    /// Output values
    pub fn cells(&self) -> &[f32; N] {
        &self.cells
    }

    /// Number of breakpoints
    pub const fn len(&self) -> usize {
        N
    }

    /// Always false for a constructed table
    pub const fn is_empty(&self) -> bool {
        N == 0
    }
}

/// Two-input calibration surface
///
/// Cells are stored row-major: `cells[row][col]`, where columns follow the
/// X axis and rows follow the Y axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Table3D<const COLS: usize, const ROWS: usize> {
    columns: [f32; COLS],
    rows: [f32; ROWS],
    cells: [[f32; COLS]; ROWS],
}

impl<const COLS: usize, const ROWS: usize> Table3D<COLS, ROWS> {
    /// Build a surface from its axes and cell matrix
    pub fn new(
        columns: [f32; COLS],
        rows: [f32; ROWS],
        cells: [[f32; COLS]; ROWS],
    ) -> CalibrationResult<Self> {
        validate_axis(&columns, "columns")?;
        validate_axis(&rows, "rows")?;
        validate_cells(cells.as_flattened(), "cells")?;
        Ok(Self { columns, rows, cells })
    }

    /// Build a surface from flat slices, as a calibration image stores them
    ///
    /// `cells` is row-major and must hold exactly `COLS * ROWS` values.
    pub fn from_slices(columns: &[f32], rows: &[f32], cells: &[f32]) -> CalibrationResult<Self> {
        let columns: [f32; COLS] = fixed_len(columns, "columns")?;
        let rows: [f32; ROWS] = fixed_len(rows, "rows")?;

        if cells.len() != COLS * ROWS {
            log_debug!("Rejecting surface: {} cells for {}x{}", cells.len(), COLS, ROWS);
            return Err(CalibrationError::DimensionMismatch {
                field: "cells",
                expected: COLS * ROWS,
                actual: cells.len(),
            });
        }

        let mut matrix = [[0.0; COLS]; ROWS];
        for (row, chunk) in matrix.iter_mut().zip(cells.chunks_exact(COLS.max(1))) {
            row.copy_from_slice(chunk);
        }

        Self::new(columns, rows, matrix)
    }

    /// Column (X) breakpoints
    pub fn columns(&self) -> &[f32; COLS] {
        &self.columns
    }

    /// Row (Y) breakpoints
    pub fn rows(&self) -> &[f32; ROWS] {
        &self.rows
    }

    /// Cell matrix, `[row][col]`
    pub fn cells(&self) -> &[[f32; COLS]; ROWS] {
        &self.cells
    }

    /// Single cell value
    ///
    /// Panics if `row` or `col` is outside the table.
    pub fn cell(&self, row: usize, col: usize) -> f32 {
        self.cells[row][col]
    }

    /// `(columns, rows)`
    pub const fn dimensions(&self) -> (usize, usize) {
        (COLS, ROWS)
    }
}

/// Read access to a two-input table, independent of its dimensions
///
/// The interpolator and the diagnostic export work through this trait so the
/// estimator can hold surfaces of different sizes without naming every
/// dimension in its type.
pub trait Surface {
    /// Column (X) breakpoints
    fn column_breakpoints(&self) -> &[f32];

    /// Row (Y) breakpoints
    fn row_breakpoints(&self) -> &[f32];

    /// Cells, row-major, `rows * columns` long
    fn cell_values(&self) -> &[f32];
}

impl<const COLS: usize, const ROWS: usize> Surface for Table3D<COLS, ROWS> {
    fn column_breakpoints(&self) -> &[f32] {
        &self.columns
    }

    fn row_breakpoints(&self) -> &[f32] {
        &self.rows
    }

    fn cell_values(&self) -> &[f32] {
        self.cells.as_flattened()
    }
}

impl<S: Surface + ?Sized> Surface for &S {
    fn column_breakpoints(&self) -> &[f32] {
        (**self).column_breakpoints()
    }

    fn row_breakpoints(&self) -> &[f32] {
        (**self).row_breakpoints()
    }

    fn cell_values(&self) -> &[f32] {
        (**self).cell_values()
    }
}

/// Check any [`Surface`] the way [`Table3D::new`] checks its own inputs
///
/// Axes must be non-empty, finite and strictly increasing, and the cell slice
/// must hold exactly `rows * columns` finite values. `Table3D` satisfies this
/// by construction; other implementations are checked when a calibration is
/// loaded so lookups can index without bounds failures.
pub fn validate_surface<S: Surface + ?Sized>(surface: &S) -> CalibrationResult<()> {
    let columns = surface.column_breakpoints();
    let rows = surface.row_breakpoints();
    validate_axis(columns, "columns")?;
    validate_axis(rows, "rows")?;

    let cells = surface.cell_values();
    let expected = columns.len() * rows.len();
    if cells.len() != expected {
        log_debug!("Rejecting surface: {} cells for {}x{}", cells.len(), columns.len(), rows.len());
        return Err(CalibrationError::DimensionMismatch {
            field: "cells",
            expected,
            actual: cells.len(),
        });
    }

    validate_cells(cells, "cells")
}

/// Check a breakpoint axis: non-empty, finite, strictly increasing
fn validate_axis(axis: &[f32], name: &'static str) -> CalibrationResult<()> {
    if axis.is_empty() {
        log_debug!("Rejecting table: axis '{}' is empty", name);
        return Err(CalibrationError::EmptyAxis { axis: name });
    }

    validate_cells(axis, name)?;

    if let Some(index) = axis.windows(2).position(|pair| pair[1] <= pair[0]) {
        log_debug!("Rejecting table: axis '{}' not increasing at {}", name, index + 1);
        return Err(CalibrationError::NonIncreasingAxis { axis: name, index: index + 1 });
    }

    Ok(())
}

fn validate_cells(values: &[f32], name: &'static str) -> CalibrationResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => {
            log_debug!("Rejecting table: non-finite value in '{}' at {}", name, index);
            Err(CalibrationError::NonFiniteValue { field: name, index })
        }
        None => Ok(()),
    }
}

fn fixed_len<const N: usize>(values: &[f32], name: &'static str) -> CalibrationResult<[f32; N]> {
    values.try_into().map_err(|_| CalibrationError::DimensionMismatch {
        field: name,
        expected: N,
        actual: values.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_accepts_increasing_axis() {
        let table = Table2D::new([0.0, 1.0, 2.5], [10.0, 20.0, 15.0]).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.breakpoints(), &[0.0, 1.0, 2.5]);
        assert_eq!(table.cells(), &[10.0, 20.0, 15.0]);
    }

    #[test]
    fn curve_rejects_repeated_breakpoint() {
        let result = Table2D::new([0.0, 1.0, 1.0], [0.0, 0.0, 0.0]);
        assert_eq!(
            result,
            Err(CalibrationError::NonIncreasingAxis { axis: "breakpoints", index: 2 })
        );
    }

    #[test]
    fn curve_rejects_empty_axis() {
        let result = Table2D::<0>::new([], []);
        assert_eq!(result, Err(CalibrationError::EmptyAxis { axis: "breakpoints" }));
    }

    #[test]
    fn curve_rejects_nan_cell() {
        let result = Table2D::new([0.0, 1.0], [0.0, f32::NAN]);
        assert_eq!(result, Err(CalibrationError::NonFiniteValue { field: "cells", index: 1 }));
    }

    #[test]
    fn surface_rejects_bad_rows() {
        let result = Table3D::new([0.0, 1.0], [5.0, 4.0], [[0.0; 2]; 2]);
        assert_eq!(result, Err(CalibrationError::NonIncreasingAxis { axis: "rows", index: 1 }));
    }

    #[test]
    fn surface_rejects_infinite_breakpoint() {
        let result = Table3D::new([0.0, f32::INFINITY], [0.0], [[0.0; 2]; 1]);
        assert_eq!(result, Err(CalibrationError::NonFiniteValue { field: "columns", index: 1 }));
    }

    #[test]
    fn surface_from_slices_is_row_major() {
        let table = Table3D::<3, 2>::from_slices(
            &[10.0, 20.0, 30.0],
            &[1.0, 2.0],
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
        )
        .unwrap();

        assert_eq!(table.dimensions(), (3, 2));
        assert_eq!(table.cell(0, 2), 3.0);
        assert_eq!(table.cell(1, 0), 4.0);
        assert_eq!(table.cell_values(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(table.column_breakpoints(), &[10.0, 20.0, 30.0]);
        assert_eq!(table.row_breakpoints(), &[1.0, 2.0]);
    }

    #[test]
    fn surface_from_slices_checks_lengths() {
        let short_cells = Table3D::<2, 2>::from_slices(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 2.0, 3.0]);
        assert_eq!(
            short_cells,
            Err(CalibrationError::DimensionMismatch { field: "cells", expected: 4, actual: 3 })
        );

        let long_axis = Table3D::<2, 2>::from_slices(&[0.0, 1.0, 2.0], &[0.0, 1.0], &[0.0; 4]);
        assert_eq!(
            long_axis,
            Err(CalibrationError::DimensionMismatch { field: "columns", expected: 2, actual: 3 })
        );
    }

    /// Surface backed by borrowed slices, with no shape guarantees
    struct Loose<'a> {
        columns: &'a [f32],
        rows: &'a [f32],
        cells: &'a [f32],
    }

    impl Surface for Loose<'_> {
        fn column_breakpoints(&self) -> &[f32] {
            self.columns
        }

        fn row_breakpoints(&self) -> &[f32] {
            self.rows
        }

        fn cell_values(&self) -> &[f32] {
            self.cells
        }
    }

    #[test]
    fn validate_surface_accepts_table() {
        let table = Table3D::new([0.0, 1.0], [0.0, 1.0], [[1.0; 2]; 2]).unwrap();
        assert_eq!(validate_surface(&table), Ok(()));
    }

    #[test]
    fn validate_surface_checks_custom_shapes() {
        let short = Loose { columns: &[0.0, 1.0], rows: &[0.0, 1.0], cells: &[1.0, 2.0, 3.0] };
        assert_eq!(
            validate_surface(&short),
            Err(CalibrationError::DimensionMismatch { field: "cells", expected: 4, actual: 3 })
        );

        let empty = Loose { columns: &[], rows: &[0.0], cells: &[] };
        assert_eq!(validate_surface(&empty), Err(CalibrationError::EmptyAxis { axis: "columns" }));

        let unordered = Loose { columns: &[0.0, 1.0], rows: &[3.0, 3.0], cells: &[0.0; 4] };
        assert_eq!(
            validate_surface(&unordered),
            Err(CalibrationError::NonIncreasingAxis { axis: "rows", index: 1 })
        );

        let nan = Loose { columns: &[0.0], rows: &[0.0], cells: &[f32::NAN] };
        assert_eq!(
            validate_surface(&nan),
            Err(CalibrationError::NonFiniteValue { field: "cells", index: 0 })
        );
    }
}
