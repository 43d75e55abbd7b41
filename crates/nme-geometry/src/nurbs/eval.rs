//! Rational point evaluation over weighted control points.
//!
//! Control points are stored unweighted; each one is lifted to homogeneous
//! space as `(x*w, y*w, z*w, w)` before blending.

use nme_core::Tolerance;
use nme_math::{normalize_or_z, ControlPoint, DVec4, Point3};

use super::basis::basis_row;
use crate::surface::SurfacePoint;

fn project(h: DVec4, tol: &Tolerance) -> Point3 {
    if tol.weight_is_nonzero(h.w) {
        h.truncate() / h.w
    } else {
        Point3::ZERO
    }
}

/// Point on a rational curve at `t`.
///
/// Returns the origin when the blended weight is not positive.
pub fn rational_curve_point(
    degree: usize,
    knots: &[f64],
    control_points: &[ControlPoint],
    t: f64,
    tol: &Tolerance,
) -> Point3 {
    let n = basis_row(degree, t, knots, control_points.len(), tol);
    let h = control_points
        .iter()
        .zip(&n)
        .fold(DVec4::ZERO, |acc, (cp, b)| acc + cp.to_homogeneous() * *b);
    project(h, tol)
}

/// Position, tangents and normal of a rational surface at `(u, v)`.
///
/// Tangents are accumulated from first differences of adjacent basis values,
/// `B(i) - B(i - 1)`, rather than analytic derivatives; each is divided by its
/// own accumulated weight when that weight is positive. The normal is
/// `normalize(tangent_u x tangent_v)`, or `+Z` when degenerate.
#[allow(clippy::too_many_arguments, clippy::needless_range_loop)]
pub fn rational_surface_point(
    degree_u: usize,
    degree_v: usize,
    knots_u: &[f64],
    knots_v: &[f64],
    control_points: &[Vec<ControlPoint>],
    u: f64,
    v: f64,
    tol: &Tolerance,
) -> SurfacePoint {
    let count_u = control_points.len();
    let count_v = control_points.first().map_or(0, Vec::len);

    let bu = basis_row(degree_u, u, knots_u, count_u, tol);
    let bv = basis_row(degree_v, v, knots_v, count_v, tol);

    let mut position = DVec4::ZERO;
    let mut du = DVec4::ZERO;
    let mut dv = DVec4::ZERO;

    for i in 0..count_u {
        for j in 0..count_v {
            let h = control_points[i][j].to_homogeneous();
            position += h * (bu[i] * bv[j]);
            if i > 0 {
                du += h * ((bu[i] - bu[i - 1]) * bv[j]);
            }
            if j > 0 {
                dv += h * (bu[i] * (bv[j] - bv[j - 1]));
            }
        }
    }

    let tangent = |d: DVec4| {
        if tol.weight_is_nonzero(d.w) {
            d.truncate() / d.w
        } else {
            d.truncate()
        }
    };
    let tangent_u = tangent(du);
    let tangent_v = tangent(dv);

    SurfacePoint {
        position: project(position, tol),
        normal: normalize_or_z(tangent_u.cross(tangent_v), tol.normal),
        tangent_u,
        tangent_v,
    }
}
