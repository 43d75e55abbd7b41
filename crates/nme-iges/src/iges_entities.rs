//! Rational B-spline curve (126) and surface (128) entities.
//!
//! Curve parameters: `K, M, PROP1 (rational), PROP2 (periodic), PROP3 (closed),
//! T[K+M+2], W[K+1] (rational only), (X,Y,Z)[K+1], V0, V1`.
//!
//! Surface parameters: `K1, K2, M1, M2, PROP1 (rational), PROP2 (periodic u),
//! PROP3 (periodic v), PROP4 (closed u), PROP5 (closed v), S[K1+M1+2],
//! T[K2+M2+2], W (rational only), control points, U0, U1, V0, V1`, with the
//! first index varying fastest in the weight and point arrays.
//!
//! A non-rational entity carries no weight array and every weight is 1.
//! Control points are kept unweighted.

use nme_core::{NmeError, Result};
use nme_geometry::{Curve, NurbsCurve, NurbsSurface, Surface};
use nme_math::{dvec3, ControlPoint};

use crate::iges_params::{Param, ParamCursor};

pub const RATIONAL_BSPLINE_CURVE: i32 = 126;
pub const RATIONAL_BSPLINE_SURFACE: i32 = 128;

/// A decoded entity 126.
#[derive(Debug, Clone)]
pub struct IgesCurveRecord {
    pub curve: NurbsCurve,
    pub rational: bool,
    pub periodic: bool,
    pub closed: bool,
    /// `(V0, V1)`
    pub parameter_range: (f64, f64),
}

/// A decoded entity 128.
#[derive(Debug, Clone)]
pub struct IgesSurfaceRecord {
    pub surface: NurbsSurface,
    pub rational: bool,
    pub periodic_u: bool,
    pub periodic_v: bool,
    pub closed_u: bool,
    pub closed_v: bool,
    /// `(U0, U1)`
    pub u_range: (f64, f64),
    /// `(V0, V1)`
    pub v_range: (f64, f64),
}

fn expect_type(cursor: &mut ParamCursor<'_>, expected: i32) -> Result<()> {
    let found = cursor.next_int("entity type")?;
    if found != i64::from(expected) {
        return Err(NmeError::Parse(format!(
            "expected entity {expected}, parameters start with {found}"
        )));
    }
    Ok(())
}

fn flag(cursor: &mut ParamCursor<'_>, what: &str) -> Result<bool> {
    Ok(cursor.next_int(what)? != 0)
}

fn read_weights(cursor: &mut ParamCursor<'_>, count: usize, rational: bool) -> Result<Vec<f64>> {
    if rational {
        cursor.next_reals(count, "weights")
    } else {
        Ok(vec![1.0; count])
    }
}

fn read_points(cursor: &mut ParamCursor<'_>, weights: &[f64]) -> Result<Vec<ControlPoint>> {
    let coords = cursor.next_reals(3 * weights.len(), "control points")?;
    Ok(coords
        .chunks_exact(3)
        .zip(weights)
        .map(|(xyz, w)| ControlPoint::new(dvec3(xyz[0], xyz[1], xyz[2]), *w))
        .collect())
}

/// Decode entity 126 from its full parameter list (entity type first).
pub fn decode_curve(params: &[Param]) -> Result<IgesCurveRecord> {
    let mut cursor = ParamCursor::new(params);
    expect_type(&mut cursor, RATIONAL_BSPLINE_CURVE)?;

    let k = cursor.next_count("K")?;
    let degree = cursor.next_count("M")?;
    let rational = flag(&mut cursor, "PROP1")?;
    let periodic = flag(&mut cursor, "PROP2")?;
    let closed = flag(&mut cursor, "PROP3")?;

    let count = k + 1;
    let knots = cursor.next_reals(count + degree + 1, "knots")?;
    let weights = read_weights(&mut cursor, count, rational)?;
    let control_points = read_points(&mut cursor, &weights)?;
    let parameter_range = (cursor.next_real("V0")?, cursor.next_real("V1")?);

    Ok(IgesCurveRecord {
        curve: NurbsCurve::try_from_parts(degree, knots, control_points)?,
        rational,
        periodic,
        closed,
        parameter_range,
    })
}

/// Decode entity 128 from its full parameter list (entity type first).
pub fn decode_surface(params: &[Param]) -> Result<IgesSurfaceRecord> {
    let mut cursor = ParamCursor::new(params);
    expect_type(&mut cursor, RATIONAL_BSPLINE_SURFACE)?;

    let k1 = cursor.next_count("K1")?;
    let k2 = cursor.next_count("K2")?;
    let degree_u = cursor.next_count("M1")?;
    let degree_v = cursor.next_count("M2")?;
    let rational = flag(&mut cursor, "PROP1")?;
    let periodic_u = flag(&mut cursor, "PROP2")?;
    let periodic_v = flag(&mut cursor, "PROP3")?;
    let closed_u = flag(&mut cursor, "PROP4")?;
    let closed_v = flag(&mut cursor, "PROP5")?;

    let (count_u, count_v) = (k1 + 1, k2 + 1);
    let knots_u = cursor.next_reals(count_u + degree_u + 1, "knots S")?;
    let knots_v = cursor.next_reals(count_v + degree_v + 1, "knots T")?;
    let weights = read_weights(&mut cursor, count_u * count_v, rational)?;
    let flat = read_points(&mut cursor, &weights)?;
    let u_range = (cursor.next_real("U0")?, cursor.next_real("U1")?);
    let v_range = (cursor.next_real("V0")?, cursor.next_real("V1")?);

    // flat[j * count_u + i] is grid point (i, j)
    let control_points = (0..count_u)
        .map(|i| (0..count_v).map(|j| flat[j * count_u + i]).collect())
        .collect();

    Ok(IgesSurfaceRecord {
        surface: NurbsSurface::try_from_parts(degree_u, degree_v, knots_u, knots_v, control_points)?,
        rational,
        periodic_u,
        periodic_v,
        closed_u,
        closed_v,
        u_range,
        v_range,
    })
}

fn same_position(a: &[ControlPoint], b: &[ControlPoint]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(p, q)| (p.position - q.position).length() < 1e-9)
}

fn is_rational<'a>(points: impl IntoIterator<Item = &'a ControlPoint>) -> bool {
    points.into_iter().any(|cp| cp.weight != 1.0)
}

fn push_points(params: &mut Vec<Param>, points: &[&ControlPoint], rational: bool) {
    if rational {
        params.extend(points.iter().map(|cp| Param::Real(cp.weight)));
    }
    for cp in points {
        params.extend([cp.position.x, cp.position.y, cp.position.z].map(Param::Real));
    }
}

fn int(value: usize) -> Param {
    Param::Integer(value as i64)
}

fn bit(value: bool) -> Param {
    Param::Integer(i64::from(value))
}

/// Parameter list of entity 126 for `curve`.
pub fn encode_curve(curve: &NurbsCurve) -> Vec<Param> {
    let points = curve.control_points();
    let (t0, t1) = curve.domain();
    let closed = (curve.point_at(t0) - curve.point_at(t1)).length() < 1e-9;
    let rational = is_rational(points);

    let mut params = vec![
        Param::Integer(i64::from(RATIONAL_BSPLINE_CURVE)),
        int(points.len().saturating_sub(1)),
        int(curve.degree()),
        bit(rational),
        bit(false),
        bit(closed),
    ];
    params.extend(curve.knots().iter().copied().map(Param::Real));
    push_points(&mut params, &points.iter().collect::<Vec<_>>(), rational);
    params.extend([t0, t1].map(Param::Real));
    params
}

/// Parameter list of entity 128 for `surface`.
pub fn encode_surface(surface: &NurbsSurface) -> Vec<Param> {
    let grid = surface.control_points();
    let (count_u, count_v) = (surface.count_u(), surface.count_v());
    let rational = is_rational(grid.iter().flatten());

    let closed_u = match (grid.first(), grid.last()) {
        (Some(first), Some(last)) => count_u > 1 && same_position(first, last),
        _ => false,
    };
    let first_col: Vec<_> = grid.iter().filter_map(|row| row.first().copied()).collect();
    let last_col: Vec<_> = grid.iter().filter_map(|row| row.last().copied()).collect();
    let closed_v = count_v > 1 && same_position(&first_col, &last_col);

    let mut params = vec![
        Param::Integer(i64::from(RATIONAL_BSPLINE_SURFACE)),
        int(count_u.saturating_sub(1)),
        int(count_v.saturating_sub(1)),
        int(surface.degree_u()),
        int(surface.degree_v()),
        bit(rational),
        bit(false),
        bit(false),
        bit(closed_u),
        bit(closed_v),
    ];
    params.extend(surface.knots_u().iter().copied().map(Param::Real));
    params.extend(surface.knots_v().iter().copied().map(Param::Real));

    let flat: Vec<&ControlPoint> = (0..count_v)
        .flat_map(|j| grid.iter().map(move |row| &row[j]))
        .collect();
    push_points(&mut params, &flat, rational);

    let (u0, u1) = surface.domain_u();
    let (v0, v1) = surface.domain_v();
    params.extend([u0, u1, v0, v1].map(Param::Real));
    params
}
