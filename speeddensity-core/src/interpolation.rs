//! Table Interpolation with Edge Clamping
//!
//! ## Bracketing
//!
//! Every lookup starts by locating the input on an axis. The result is a
//! [`Bracket`]: the two breakpoint indices surrounding the input and the
//! input's fractional position between them.
//!
//! ```text
//! axis:      500   1000   2000   4000
//!                    ↑  ↑
//!                 1000  1400  → lower = 1, upper = 2, fraction = 0.4
//! ```
//!
//! Three cases collapse the interval to a single breakpoint
//! (`lower == upper`, `fraction == 0`):
//!
//! - input below the first breakpoint (clamped low)
//! - input above the last breakpoint (clamped high)
//! - input exactly on a breakpoint
//!
//! A zero-width interval returns that breakpoint's cell unchanged, so there is
//! never a division by a zero-width span and there is no extrapolation past
//! the table edges. NaN input is treated as below the axis and clamps low.
//!
//! ## Bilinear Interpolation
//!
//! Two-input lookups bracket each axis independently, interpolate along the
//! columns at both bracketing rows, then interpolate those two results along
//! the rows:
//!
//! ```text
//!            col_lo        col_hi
//! row_lo     Q11 ────●──── Q21        lower = lerp(Q11, Q21, fx)
//!                    │
//!                    ◆                result = lerp(lower, upper, fy)
//!                    │
//! row_hi     Q12 ────●──── Q22        upper = lerp(Q12, Q22, fx)
//! ```
//!
//! ## Cost
//!
//! Bracketing is a binary search over the axis, so a 16-breakpoint axis takes
//! at most five comparisons. A full surface lookup is two searches, six loads
//! and three multiply-adds. Nothing allocates.

use crate::tables::{Surface, Table2D};

/// Position of an input value on a breakpoint axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Index of the breakpoint at or below the input
    pub lower: usize,
    /// Index of the breakpoint above the input (equal to `lower` when collapsed)
    pub upper: usize,
    /// Position between `lower` and `upper`, in `[0, 1)`
    pub fraction: f32,
    /// Input was outside the axis and has been clamped to an edge
    pub clamped: bool,
}

impl Bracket {
    const fn at(index: usize, clamped: bool) -> Self {
        Self {
            lower: index,
            upper: index,
            fraction: 0.0,
            clamped,
        }
    }
}

/// Locate `x` on a strictly increasing axis
///
/// An empty axis yields a clamped bracket at index 0.
pub fn bracket(axis: &[f32], x: f32) -> Bracket {
    let Some(last) = axis.len().checked_sub(1) else {
        return Bracket::at(0, true);
    };

    // Written as a negation so NaN lands here too.
    if !(x > axis[0]) {
        return Bracket::at(0, x != axis[0]);
    }
    if x >= axis[last] {
        return Bracket::at(last, x > axis[last]);
    }

    // axis[0] < x < axis[last], so 1 <= upper <= last
    let upper = axis.partition_point(|&breakpoint| breakpoint <= x);
    let lower = upper - 1;

    if axis[lower] == x {
        return Bracket::at(lower, false);
    }

    Bracket {
        lower,
        upper,
        fraction: (x - axis[lower]) / (axis[upper] - axis[lower]),
        clamped: false,
    }
}

/// Linear blend of `a` toward `b`; exact `a` at `t == 0`
#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// One-input lookup with edge clamping
pub fn lookup_1d<const N: usize>(table: &Table2D<N>, x: f32) -> f32 {
    let position = bracket(table.breakpoints(), x);
    let cells = table.cells();

    if position.clamped {
        log_trace!("1D lookup: input {} clamped to breakpoint {}", x, position.lower);
    }

    lerp(cells[position.lower], cells[position.upper], position.fraction)
}

/// Two-input lookup with edge clamping and bilinear interpolation
///
/// `x` is located on the column axis, `y` on the row axis.
pub fn lookup_2d<S: Surface + ?Sized>(table: &S, x: f32, y: f32) -> f32 {
    let columns = table.column_breakpoints();
    let col = bracket(columns, x);
    let row = bracket(table.row_breakpoints(), y);

    if col.clamped || row.clamped {
        log_trace!(
            "2D lookup: inputs clamped (x: {} → col {}, y: {} → row {})",
            x, col.lower, y, row.lower
        );
    }

    let width = columns.len();
    let cells = table.cell_values();
    let cell = |r: usize, c: usize| cells[r * width + c];

    let lower = lerp(cell(row.lower, col.lower), cell(row.lower, col.upper), col.fraction);
    let upper = lerp(cell(row.upper, col.lower), cell(row.upper, col.upper), col.fraction);

    lerp(lower, upper, row.fraction)
}

impl<const N: usize> Table2D<N> {
    /// See [`lookup_1d`]
    pub fn lookup(&self, x: f32) -> f32 {
        lookup_1d(self, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Table3D;

    fn curve() -> Table2D<4> {
        Table2D::new([1.0, 2.0, 4.0, 8.0], [10.0, 20.0, 30.0, 70.0]).unwrap()
    }

    fn surface() -> Table3D<3, 2> {
        // columns 0, 10, 20; rows 100, 200
        Table3D::new(
            [0.0, 10.0, 20.0],
            [100.0, 200.0],
            [
                [1.0, 2.0, 3.0],
                [5.0, 6.0, 9.0],
            ],
        )
        .unwrap()
    }

    #[test]
    fn bracket_inside_interval() {
        let b = bracket(&[0.0, 10.0, 20.0], 12.5);
        assert_eq!(b, Bracket { lower: 1, upper: 2, fraction: 0.25, clamped: false });
    }

    #[test]
    fn bracket_on_breakpoint_collapses() {
        for (i, x) in [0.0, 10.0, 20.0].into_iter().enumerate() {
            let b = bracket(&[0.0, 10.0, 20.0], x);
            assert_eq!(b, Bracket { lower: i, upper: i, fraction: 0.0, clamped: false });
        }
    }

    #[test]
    fn bracket_clamps_both_edges() {
        assert_eq!(bracket(&[0.0, 10.0], -3.0), Bracket::at(0, true));
        assert_eq!(bracket(&[0.0, 10.0], 99.0), Bracket::at(1, true));
    }

    #[test]
    fn bracket_nan_clamps_low() {
        assert_eq!(bracket(&[0.0, 10.0], f32::NAN), Bracket::at(0, true));
    }

    #[test]
    fn bracket_empty_axis_is_clamped() {
        assert_eq!(bracket(&[], 1.0), Bracket::at(0, true));
        assert_eq!(bracket(&[], f32::NAN), Bracket::at(0, true));
    }

    #[test]
    fn bracket_single_breakpoint() {
        assert_eq!(bracket(&[5.0], 5.0), Bracket::at(0, false));
        assert_eq!(bracket(&[5.0], 1.0), Bracket::at(0, true));
        assert_eq!(bracket(&[5.0], 9.0), Bracket::at(0, true));
    }

    #[test]
    fn curve_exact_values() {
        let table = curve();
        assert_eq!(lookup_1d(&table, 1.0), 10.0);
        assert_eq!(lookup_1d(&table, 2.0), 20.0);
        assert_eq!(lookup_1d(&table, 4.0), 30.0);
        assert_eq!(lookup_1d(&table, 8.0), 70.0);
    }

    #[test]
    fn curve_interpolation() {
        let table = curve();
        assert_eq!(lookup_1d(&table, 1.5), 15.0);
        assert_eq!(lookup_1d(&table, 3.0), 25.0);
        assert_eq!(table.lookup(6.0), 50.0);
    }

    #[test]
    fn curve_clamping() {
        let table = curve();
        assert_eq!(lookup_1d(&table, 0.0), 10.0);
        assert_eq!(lookup_1d(&table, -100.0), 10.0);
        assert_eq!(lookup_1d(&table, 9.0), 70.0);
        assert_eq!(lookup_1d(&table, f32::INFINITY), 70.0);
    }

    #[test]
    fn surface_exact_values() {
        let table = surface();
        for (r, &y) in table.rows().iter().enumerate() {
            for (c, &x) in table.columns().iter().enumerate() {
                assert_eq!(lookup_2d(&table, x, y), table.cell(r, c));
            }
        }
    }

    #[test]
    fn surface_bilinear_center() {
        let table = surface();

        // Between columns 10 and 20, halfway between rows:
        // lower row lerp(2, 3, 0.5) = 2.5, upper row lerp(6, 9, 0.5) = 7.5
        assert_eq!(lookup_2d(&table, 15.0, 150.0), 5.0);
    }

    #[test]
    fn surface_interpolates_one_axis_on_breakpoint() {
        let table = surface();
        assert_eq!(lookup_2d(&table, 5.0, 100.0), 1.5);
        assert_eq!(lookup_2d(&table, 10.0, 150.0), 4.0);
    }

    #[test]
    fn surface_clamps_each_axis_independently() {
        let table = surface();

        // Below both axes
        assert_eq!(lookup_2d(&table, -5.0, 0.0), 1.0);
        // Above both axes
        assert_eq!(lookup_2d(&table, 50.0, 900.0), 9.0);
        // Columns clamped high, rows interpolated
        assert_eq!(lookup_2d(&table, 50.0, 150.0), 6.0);
        // Rows clamped low, columns interpolated
        assert_eq!(lookup_2d(&table, 5.0, 50.0), 1.5);
    }

    #[test]
    fn surface_through_reference() {
        let table = surface();
        let by_ref: &dyn Surface = &table;
        assert_eq!(lookup_2d(by_ref, 15.0, 150.0), 5.0);
    }
}
