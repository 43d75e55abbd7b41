//! Structural validation for curves and surfaces built from untrusted input.

use nme_core::{NmeError, Result, Validate};
use nme_math::ControlPoint;

use crate::curve::NurbsCurve;
use crate::nurbs::is_non_decreasing;
use crate::surface::NurbsSurface;

/// Check degree, control point count and knot vector of one parametric direction.
pub(crate) fn check_axis(label: &str, degree: usize, count: usize, knots: &[f64]) -> Result<()> {
    let axis = if label.is_empty() { String::new() } else { format!(" {label}") };
    if degree < 1 {
        return Err(NmeError::Validation(format!("degree{axis} must be >= 1")));
    }
    if count < degree + 1 {
        return Err(NmeError::Validation(format!(
            "{count} control points is too few for degree{axis} {degree}"
        )));
    }
    if knots.len() != count + degree + 1 {
        return Err(NmeError::Validation(format!(
            "knot vector{axis} has {} entries, expected {}",
            knots.len(),
            count + degree + 1
        )));
    }
    if knots.iter().any(|k| !k.is_finite()) {
        return Err(NmeError::Validation(format!("knot vector{axis} is not finite")));
    }
    if !is_non_decreasing(knots) {
        return Err(NmeError::Validation(format!("knot vector{axis} is decreasing")));
    }
    Ok(())
}

/// Weights must be positive and every coordinate finite.
pub(crate) fn check_weights<'a>(points: impl IntoIterator<Item = &'a ControlPoint>) -> Result<()> {
    for cp in points {
        if !cp.position.is_finite() {
            return Err(NmeError::Validation("control point is not finite".into()));
        }
        if !(cp.weight.is_finite() && cp.weight > 0.0) {
            return Err(NmeError::Validation(format!(
                "control point weight {} is not positive",
                cp.weight
            )));
        }
    }
    Ok(())
}

pub fn validate_curve(curve: &NurbsCurve) -> bool {
    curve.is_valid()
}

pub fn validate_surface(surface: &NurbsSurface) -> bool {
    surface.is_valid()
}
