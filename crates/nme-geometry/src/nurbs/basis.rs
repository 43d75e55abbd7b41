//! Cox-de Boor basis functions.
//!
//! `basis` is the direct recursion. `basis_row` fills the same triangular table
//! bottom-up for every control point at once, performing identical arithmetic,
//! so both agree exactly.

use nme_core::Tolerance;

/// Degree-0 indicator for span `[knots[i], knots[i + 1])`.
///
/// Spans are half-open, except the last non-empty span which is closed when it
/// ends at the final knot, so `t == t_max` is covered by exactly one span.
fn span_indicator(i: usize, t: f64, knots: &[f64]) -> f64 {
    let (lo, hi) = (knots[i], knots[i + 1]);
    if lo <= t && t < hi {
        return 1.0;
    }
    let last = knots[knots.len() - 1];
    if lo < hi && t == hi && hi == last {
        1.0
    } else {
        0.0
    }
}

/// Basis function `N(i, degree)` at `t` using the default tolerance.
pub fn basis(i: usize, degree: usize, t: f64, knots: &[f64]) -> f64 {
    basis_with_tolerance(i, degree, t, knots, &Tolerance::default())
}

/// Recursive Cox-de Boor evaluation.
///
/// A term whose knot difference is within `tol.basis` of zero contributes 0.
pub fn basis_with_tolerance(
    i: usize,
    degree: usize,
    t: f64,
    knots: &[f64],
    tol: &Tolerance,
) -> f64 {
    if degree == 0 {
        return span_indicator(i, t, knots);
    }

    let mut left = 0.0;
    let d1 = knots[i + degree] - knots[i];
    if tol.span_is_nonzero(d1) {
        left = (t - knots[i]) / d1 * basis_with_tolerance(i, degree - 1, t, knots, tol);
    }

    let mut right = 0.0;
    let d2 = knots[i + degree + 1] - knots[i + 1];
    if tol.span_is_nonzero(d2) {
        right = (knots[i + degree + 1] - t) / d2
            * basis_with_tolerance(i + 1, degree - 1, t, knots, tol);
    }

    left + right
}

/// All `count` basis values `N(i, degree)(t)` for `i in 0..count`.
///
/// Requires `knots.len() >= count + degree + 1`.
#[allow(clippy::needless_range_loop)]
pub fn basis_row(degree: usize, t: f64, knots: &[f64], count: usize, tol: &Tolerance) -> Vec<f64> {
    let spans = knots.len() - 1;
    let mut row: Vec<f64> = (0..spans).map(|i| span_indicator(i, t, knots)).collect();

    for k in 1..=degree {
        // Each level has one entry fewer than the level below it.
        for i in 0..spans - k {
            let mut left = 0.0;
            let d1 = knots[i + k] - knots[i];
            if tol.span_is_nonzero(d1) {
                left = (t - knots[i]) / d1 * row[i];
            }

            let mut right = 0.0;
            let d2 = knots[i + k + 1] - knots[i + 1];
            if tol.span_is_nonzero(d2) {
                right = (knots[i + k + 1] - t) / d2 * row[i + 1];
            }

            row[i] = left + right;
        }
    }

    row.truncate(count);
    row
}
