//! Rational B-spline surface with an owned tessellation cache.

use nme_core::{BoundingBox, NmeError, Result, Tolerance, Validate};
use nme_math::{dvec3, Aabb3, ControlPoint, Point3, Transform};
use serde::{Deserialize, Serialize};

use super::{Surface, SurfacePoint};
use crate::nurbs::{domain, knot, rational_surface_point};
use crate::tessellate::{tessellate, TessellatedSurface, MIN_RESOLUTION};

/// A NURBS surface.
///
/// `control_points[i][j]` is the control point at row `i` (u-direction) and
/// column `j` (v-direction). Positions are stored unweighted.
///
/// The tessellation cache is dropped on every mutation; a surface without a
/// cache is dirty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurbsSurface {
    degree_u: usize,
    degree_v: usize,
    knots_u: Vec<f64>,
    knots_v: Vec<f64>,
    control_points: Vec<Vec<ControlPoint>>,
    #[serde(skip)]
    cache: Option<TessellatedSurface>,
}

impl NurbsSurface {
    /// Flat default grid: control point `(i, j)` at `(i, 0, j)`, weight 1,
    /// clamped knots in both directions.
    pub fn new(degree_u: usize, degree_v: usize, count_u: usize, count_v: usize) -> Result<Self> {
        let knots_u = knot::clamped_knots(degree_u, count_u)?;
        let knots_v = knot::clamped_knots(degree_v, count_v)?;
        let control_points = (0..count_u)
            .map(|i| {
                (0..count_v)
                    .map(|j| ControlPoint::unit(dvec3(i as f64, 0.0, j as f64)))
                    .collect()
            })
            .collect();
        Ok(Self::from_parts(degree_u, degree_v, knots_u, knots_v, control_points))
    }

    /// Assemble a surface from trusted parts.
    ///
    /// Untrusted input (file import) should go through [`NurbsSurface::try_from_parts`].
    pub fn from_parts(
        degree_u: usize,
        degree_v: usize,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        control_points: Vec<Vec<ControlPoint>>,
    ) -> Self {
        let n_u = control_points.len();
        let n_v = control_points.first().map_or(0, Vec::len);
        debug_assert!(
            knots_u.len() == n_u + degree_u + 1,
            "knots_u length mismatch: {} != {} + {} + 1",
            knots_u.len(),
            n_u,
            degree_u
        );
        debug_assert!(
            knots_v.len() == n_v + degree_v + 1,
            "knots_v length mismatch: {} != {} + {} + 1",
            knots_v.len(),
            n_v,
            degree_v
        );
        Self {
            degree_u,
            degree_v,
            knots_u,
            knots_v,
            control_points,
            cache: None,
        }
    }

    /// Assemble and validate.
    pub fn try_from_parts(
        degree_u: usize,
        degree_v: usize,
        knots_u: Vec<f64>,
        knots_v: Vec<f64>,
        control_points: Vec<Vec<ControlPoint>>,
    ) -> Result<Self> {
        let surface = Self {
            degree_u,
            degree_v,
            knots_u,
            knots_v,
            control_points,
            cache: None,
        };
        surface.validate()?;
        Ok(surface)
    }

    pub fn degree_u(&self) -> usize {
        self.degree_u
    }

    pub fn degree_v(&self) -> usize {
        self.degree_v
    }

    pub fn knots_u(&self) -> &[f64] {
        &self.knots_u
    }

    pub fn knots_v(&self) -> &[f64] {
        &self.knots_v
    }

    pub fn control_points(&self) -> &[Vec<ControlPoint>] {
        &self.control_points
    }

    pub fn count_u(&self) -> usize {
        self.control_points.len()
    }

    pub fn count_v(&self) -> usize {
        self.control_points.first().map_or(0, Vec::len)
    }

    pub fn control_point(&self, i: usize, j: usize) -> Option<&ControlPoint> {
        self.control_points.get(i)?.get(j)
    }

    /// Replace control point `(i, j)`. Returns `false` when out of range.
    pub fn set_control_point(&mut self, i: usize, j: usize, point: ControlPoint) -> bool {
        match self.control_points.get_mut(i).and_then(|row| row.get_mut(j)) {
            Some(slot) => {
                *slot = point;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Replace knot `index` of the u knot vector. Returns `false` when out of range.
    pub fn set_knot_u(&mut self, index: usize, value: f64) -> bool {
        match self.knots_u.get_mut(index) {
            Some(k) => {
                *k = value;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Replace knot `index` of the v knot vector. Returns `false` when out of range.
    pub fn set_knot_v(&mut self, index: usize, value: f64) -> bool {
        match self.knots_v.get_mut(index) {
            Some(k) => {
                *k = value;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Apply an affine transform to every control point position. Weights are unchanged.
    pub fn transform(&mut self, transform: &Transform) {
        for cp in self.control_points.iter_mut().flatten() {
            cp.position = transform.transform_point(cp.position);
        }
        self.mark_dirty();
    }

    pub fn evaluate_with(&self, u: f64, v: f64, tol: &Tolerance) -> SurfacePoint {
        rational_surface_point(
            self.degree_u,
            self.degree_v,
            &self.knots_u,
            &self.knots_v,
            &self.control_points,
            u,
            v,
            tol,
        )
    }

    pub fn is_dirty(&self) -> bool {
        self.cache.is_none()
    }

    pub fn mark_dirty(&mut self) {
        self.cache = None;
    }

    /// The cached tessellation, if it is current.
    pub fn cached_tessellation(&self) -> Option<&TessellatedSurface> {
        self.cache.as_ref()
    }

    /// Tessellation at `res_u x res_v`, regenerated only when the surface is
    /// dirty or a different resolution is requested.
    pub fn tessellation(&mut self, res_u: usize, res_v: usize) -> &TessellatedSurface {
        let wanted = (res_u.max(MIN_RESOLUTION), res_v.max(MIN_RESOLUTION));
        let mesh = match self.cache.take() {
            Some(mesh) if mesh.resolution() == wanted => mesh,
            _ => {
                let mesh = tessellate(&*self, wanted.0, wanted.1);
                log::trace!(
                    "regenerated tessellation {}x{}: {} vertices, {} triangles",
                    wanted.0,
                    wanted.1,
                    mesh.vertex_count(),
                    mesh.triangle_count()
                );
                mesh
            }
        };
        self.cache.insert(mesh)
    }
}

/// Evaluate `surface` at `(u, v)` with the default tolerance.
pub fn evaluate_surface(surface: &NurbsSurface, u: f64, v: f64) -> SurfacePoint {
    surface.evaluate(u, v)
}

impl Surface for NurbsSurface {
    fn evaluate(&self, u: f64, v: f64) -> SurfacePoint {
        self.evaluate_with(u, v, &Tolerance::default())
    }

    fn domain_u(&self) -> (f64, f64) {
        domain(self.degree_u, &self.knots_u)
    }

    fn domain_v(&self) -> (f64, f64) {
        domain(self.degree_v, &self.knots_v)
    }
}

impl BoundingBox for NurbsSurface {
    type Point = Point3;

    /// Bounds of the control hull, which contains the surface.
    fn bounding_box(&self) -> (Point3, Point3) {
        Aabb3::from_points(self.control_points.iter().flatten().map(|cp| cp.position))
            .map_or((Point3::ZERO, Point3::ZERO), |b| (b.min, b.max))
    }
}

impl Validate for NurbsSurface {
    fn validate(&self) -> Result<()> {
        let count_u = self.count_u();
        let count_v = self.count_v();
        if self.control_points.iter().any(|row| row.len() != count_v) {
            return Err(NmeError::Validation(
                "control point rows have differing lengths".into(),
            ));
        }
        crate::validate::check_axis("u", self.degree_u, count_u, &self.knots_u)?;
        crate::validate::check_axis("v", self.degree_v, count_v, &self.knots_v)?;
        crate::validate::check_weights(self.control_points.iter().flatten())
    }
}
