//! Surface trait and the NURBS surface model.

mod nurbs;

use nme_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

pub use nurbs::{evaluate_surface, NurbsSurface};

/// Result of evaluating a surface at `(u, v)`.
///
/// Tangents are the raw basis-difference vectors, not unit length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    pub position: Point3,
    pub normal: Vector3,
    pub tangent_u: Vector3,
    pub tangent_v: Vector3,
}

/// Trait for parametric surfaces in 3D space.
pub trait Surface: Send + Sync {
    /// Evaluate position, tangents and normal at `(u, v)`.
    fn evaluate(&self, u: f64, v: f64) -> SurfacePoint;

    fn point_at(&self, u: f64, v: f64) -> Point3 {
        self.evaluate(u, v).position
    }

    fn normal_at(&self, u: f64, v: f64) -> Vector3 {
        self.evaluate(u, v).normal
    }

    /// Return the u-parameter domain `(u_min, u_max)`.
    fn domain_u(&self) -> (f64, f64);

    /// Return the v-parameter domain `(v_min, v_max)`.
    fn domain_v(&self) -> (f64, f64);
}
