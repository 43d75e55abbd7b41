//! Rational B-spline curve with a cached polyline.

use nme_core::{BoundingBox, Result, Tolerance, Validate};
use nme_math::{dvec3, Aabb3, ControlPoint, Point3, Transform};
use serde::{Deserialize, Serialize};

use super::Curve;
use crate::nurbs::{domain, knot, rational_curve_point};
use crate::tessellate::{curve_to_polyline, MIN_RESOLUTION};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Polyline {
    resolution: usize,
    points: Vec<Point3>,
}

/// A NURBS curve: degree, weighted control points and knot vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NurbsCurve {
    degree: usize,
    knots: Vec<f64>,
    control_points: Vec<ControlPoint>,
    #[serde(skip)]
    cache: Option<Polyline>,
}

impl NurbsCurve {
    /// Straight default curve: control point `i` at `(i, 0, 0)`, weight 1, clamped knots.
    pub fn new(degree: usize, count: usize) -> Result<Self> {
        let knots = knot::clamped_knots(degree, count)?;
        let control_points = (0..count)
            .map(|i| ControlPoint::unit(dvec3(i as f64, 0.0, 0.0)))
            .collect();
        Ok(Self::from_parts(degree, knots, control_points))
    }

    pub fn from_parts(degree: usize, knots: Vec<f64>, control_points: Vec<ControlPoint>) -> Self {
        debug_assert!(
            knots.len() == control_points.len() + degree + 1,
            "knot vector length mismatch: {} != {} + {} + 1",
            knots.len(),
            control_points.len(),
            degree
        );
        Self {
            degree,
            knots,
            control_points,
            cache: None,
        }
    }

    pub fn try_from_parts(
        degree: usize,
        knots: Vec<f64>,
        control_points: Vec<ControlPoint>,
    ) -> Result<Self> {
        let curve = Self {
            degree,
            knots,
            control_points,
            cache: None,
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    pub fn control_points(&self) -> &[ControlPoint] {
        &self.control_points
    }

    pub fn set_control_point(&mut self, index: usize, point: ControlPoint) -> bool {
        match self.control_points.get_mut(index) {
            Some(slot) => {
                *slot = point;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub fn set_knot(&mut self, index: usize, value: f64) -> bool {
        match self.knots.get_mut(index) {
            Some(k) => {
                *k = value;
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    pub fn transform(&mut self, transform: &Transform) {
        for cp in &mut self.control_points {
            cp.position = transform.transform_point(cp.position);
        }
        self.mark_dirty();
    }

    pub fn evaluate(&self, t: f64) -> Point3 {
        self.evaluate_with(t, &Tolerance::default())
    }

    pub fn evaluate_with(&self, t: f64, tol: &Tolerance) -> Point3 {
        rational_curve_point(self.degree, &self.knots, &self.control_points, t, tol)
    }

    pub fn is_dirty(&self) -> bool {
        self.cache.is_none()
    }

    pub fn mark_dirty(&mut self) {
        self.cache = None;
    }

    /// Polyline of `resolution` samples over the domain, cached until the
    /// curve is mutated or a different resolution is requested.
    pub fn tessellate(&mut self, resolution: usize) -> &[Point3] {
        let resolution = resolution.max(MIN_RESOLUTION);
        let polyline = match self.cache.take() {
            Some(p) if p.resolution == resolution => p,
            _ => Polyline {
                resolution,
                points: curve_to_polyline(&*self, resolution),
            },
        };
        &self.cache.insert(polyline).points
    }
}

/// Evaluate `curve` at `t` with the default tolerance.
pub fn evaluate_curve(curve: &NurbsCurve, t: f64) -> Point3 {
    curve.evaluate(t)
}

impl Curve for NurbsCurve {
    fn point_at(&self, t: f64) -> Point3 {
        self.evaluate(t)
    }

    fn domain(&self) -> (f64, f64) {
        domain(self.degree, &self.knots)
    }
}

impl BoundingBox for NurbsCurve {
    type Point = Point3;

    fn bounding_box(&self) -> (Point3, Point3) {
        Aabb3::from_points(self.control_points.iter().map(|cp| cp.position))
            .map_or((Point3::ZERO, Point3::ZERO), |b| (b.min, b.max))
    }
}

impl Validate for NurbsCurve {
    fn validate(&self) -> Result<()> {
        crate::validate::check_axis("", self.degree, self.control_points.len(), &self.knots)?;
        crate::validate::check_weights(self.control_points.iter())
    }
}
