//! Weighted control points.
//!
//! Positions are stored unweighted (Cartesian) next to a separate weight. The
//! weight is applied only when a point is lifted into homogeneous space for
//! evaluation, so `(x, y, z, w)` always means "the point `(x, y, z)` with
//! influence `w`", never `(x*w, y*w, z*w, w)`.

use crate::{DVec4, Point3};
use serde::{Deserialize, Serialize};

/// A NURBS control point: Cartesian position plus a positive rational weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub position: Point3,
    pub weight: f64,
}

impl ControlPoint {
    pub fn new(position: Point3, weight: f64) -> Self {
        Self { position, weight }
    }

    /// Non-rational control point (weight 1).
    pub fn unit(position: Point3) -> Self {
        Self {
            position,
            weight: 1.0,
        }
    }

    pub fn from_xyzw(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self::new(Point3::new(x, y, z), w)
    }

    /// Lift into homogeneous space: `(x*w, y*w, z*w, w)`.
    pub fn to_homogeneous(self) -> DVec4 {
        (self.position * self.weight).extend(self.weight)
    }

    /// Recover a control point from pre-weighted homogeneous coordinates.
    ///
    /// Returns `None` when the weight is not strictly positive.
    pub fn from_homogeneous(h: DVec4) -> Option<Self> {
        if h.w > 0.0 {
            Some(Self::new(h.truncate() / h.w, h.w))
        } else {
            None
        }
    }
}

impl Default for ControlPoint {
    fn default() -> Self {
        Self::unit(Point3::ZERO)
    }
}

impl From<Point3> for ControlPoint {
    fn from(position: Point3) -> Self {
        Self::unit(position)
    }
}
