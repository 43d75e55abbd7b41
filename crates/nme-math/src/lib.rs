pub mod aabb;
pub mod homogeneous;
pub mod ray;
pub mod transform;

pub use glam::{dvec3, DAffine3, DMat3, DMat4, DQuat, DVec2, DVec3, DVec4, EulerRot};
pub use aabb::Aabb3;
pub use homogeneous::ControlPoint;
pub use ray::Ray;
pub use transform::Transform;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;

/// Normalize `v`, falling back to +Z when its length is at or below `epsilon`.
///
/// Degenerate normals (sphere poles, collapsed iso-lines) take this fallback.
pub fn normalize_or_z(v: Vector3, epsilon: f64) -> Vector3 {
    let len = v.length();
    if len > epsilon {
        v / len
    } else {
        DVec3::Z
    }
}
