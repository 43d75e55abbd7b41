use std::f64::consts::TAU;

use nme_math::{ControlPoint, Point3, Vector3};

use super::positive;
use super::revolve::Arc;
use crate::curve::NurbsCurve;

/// Degree-1 segment from `start` to `end`.
pub fn create_line_curve(start: Point3, end: Point3) -> NurbsCurve {
    NurbsCurve::from_parts(
        1,
        vec![0.0, 0.0, 1.0, 1.0],
        vec![ControlPoint::unit(start), ControlPoint::unit(end)],
    )
}

/// Exact 9-point rational circle in the plane through `center` perpendicular to `normal`.
pub fn create_circle_curve(center: Point3, radius: f64, normal: Vector3) -> Option<NurbsCurve> {
    if !positive("radius", radius) {
        return None;
    }
    let axis = normal.normalize_or_zero();
    if axis == Vector3::ZERO {
        log::warn!("rejected circle with degenerate normal {normal:?}");
        return None;
    }

    let (a, b) = axis.any_orthonormal_pair();
    let arc = Arc::new(0.0, TAU, 4)?;
    let control_points = arc
        .points
        .iter()
        .zip(&arc.weights)
        .map(|(p, w)| ControlPoint::new(center + (a * p.x + b * p.y) * radius, *w))
        .collect();

    log::debug!("created circle r={radius}");
    Some(NurbsCurve::from_parts(2, arc.knots, control_points))
}
