//! Knot vector generation and queries.
//!
//! Every generator returns `count + degree + 1` knots spanning `[0, 1]`.

use nme_core::{NmeError, Result};

fn check_counts(degree: usize, count: usize) -> Result<()> {
    if degree < 1 {
        return Err(NmeError::InvalidParameter(format!(
            "degree must be >= 1, got {degree}"
        )));
    }
    if count < degree + 1 {
        return Err(NmeError::InvalidParameter(format!(
            "need at least {} control points for degree {degree}, got {count}",
            degree + 1
        )));
    }
    Ok(())
}

/// Open uniform (clamped) knot vector.
///
/// The first and last `degree + 1` knots are 0 and 1; interior knots are spaced
/// evenly at `(i + 1) / (interior + 1)`.
pub fn clamped_knots(degree: usize, count: usize) -> Result<Vec<f64>> {
    check_counts(degree, count)?;

    let num_knots = count + degree + 1;
    let interior = num_knots - 2 * (degree + 1);

    let mut knots = Vec::with_capacity(num_knots);
    knots.extend(std::iter::repeat(0.0).take(degree + 1));
    knots.extend((0..interior).map(|i| (i + 1) as f64 / (interior + 1) as f64));
    knots.extend(std::iter::repeat(1.0).take(degree + 1));

    Ok(knots)
}

/// Uniform (periodic-style) knot vector `i / (m - 1)` over all `m` knots.
///
/// The usable parameter domain is `[knots[degree], knots[count]]`, strictly
/// inside `[0, 1]`.
pub fn uniform_knots(degree: usize, count: usize) -> Result<Vec<f64>> {
    check_counts(degree, count)?;

    let num_knots = count + degree + 1;
    Ok((0..num_knots)
        .map(|i| i as f64 / (num_knots - 1) as f64)
        .collect())
}

/// Degree-2 clamped knots for a rational circle made of `segments` equal arcs.
///
/// Interior knots are doubled at every arc joint, giving `2 * segments + 1`
/// control points.
pub fn circular_knots(segments: usize) -> Result<Vec<f64>> {
    if segments < 1 {
        return Err(NmeError::InvalidParameter(
            "a circular knot vector needs at least one arc".into(),
        ));
    }

    let mut knots = Vec::with_capacity(2 * segments + 4);
    knots.extend([0.0; 3]);
    for k in 1..segments {
        let t = k as f64 / segments as f64;
        knots.extend([t, t]);
    }
    knots.extend([1.0; 3]);
    Ok(knots)
}

/// Parameter domain `(knots[degree], knots[count])` of a knot vector.
pub fn domain(degree: usize, knots: &[f64]) -> (f64, f64) {
    (knots[degree], knots[knots.len() - degree - 1])
}

pub fn is_non_decreasing(knots: &[f64]) -> bool {
    knots.windows(2).all(|w| w[0] <= w[1])
}
