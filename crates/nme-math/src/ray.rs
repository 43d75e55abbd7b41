use crate::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A ray in 3D space defined by origin and unit direction.
///
/// Because the direction is normalized, the ray parameter `t` equals the
/// Euclidean distance from the origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ray {
    pub origin: Point3,
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get a point along the ray at parameter t.
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }
}
