use crate::{DMat4, DQuat, EulerRot, Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Affine transform (scale, rotation, translation) applied to control points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub matrix: [f64; 16],
}

impl Transform {
    pub fn identity() -> Self {
        Self::from_mat4(DMat4::IDENTITY)
    }

    pub fn from_translation(t: Vector3) -> Self {
        Self::from_mat4(DMat4::from_translation(t))
    }

    pub fn from_scale(s: Vector3) -> Self {
        Self::from_mat4(DMat4::from_scale(s))
    }

    /// Rotation by Euler angles (radians) applied X, then Y, then Z.
    pub fn from_euler(angles: Vector3) -> Self {
        let q = DQuat::from_euler(EulerRot::ZYX, angles.z, angles.y, angles.x);
        Self::from_mat4(DMat4::from_quat(q))
    }

    /// Scale first, then rotate, then translate.
    pub fn from_trs(translation: Vector3, rotation: Vector3, scale: Vector3) -> Self {
        let q = DQuat::from_euler(EulerRot::ZYX, rotation.z, rotation.y, rotation.x);
        Self::from_mat4(DMat4::from_scale_rotation_translation(scale, q, translation))
    }

    pub fn from_mat4(m: DMat4) -> Self {
        Self {
            matrix: m.to_cols_array(),
        }
    }

    pub fn to_mat4(&self) -> DMat4 {
        DMat4::from_cols_array(&self.matrix)
    }

    pub fn transform_point(&self, p: Point3) -> Point3 {
        self.to_mat4().transform_point3(p)
    }

    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        self.to_mat4().transform_vector3(v)
    }

    /// Apply `self` first, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Self::from_mat4(other.to_mat4() * self.to_mat4())
    }

    pub fn inverse(&self) -> Option<Transform> {
        let m = self.to_mat4();
        if m.determinant().abs() < 1e-15 {
            None
        } else {
            Some(Self::from_mat4(m.inverse()))
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::dvec3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        let p = dvec3(1.0, 2.0, 3.0);
        let result = t.transform_point(p);
        assert!((result - p).length() < 1e-10);
    }

    #[test]
    fn test_translation() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let p = dvec3(1.0, 2.0, 3.0);
        let result = t.transform_point(p);
        assert!((result - dvec3(11.0, 22.0, 33.0)).length() < 1e-10);
        // Vectors ignore translation
        assert!((t.transform_vector(p) - p).length() < 1e-10);
    }

    #[test]
    fn test_rotation_about_x() {
        let t = Transform::from_euler(dvec3(FRAC_PI_2, 0.0, 0.0));
        let result = t.transform_point(dvec3(0.0, 0.0, 1.0));
        assert!((result - dvec3(0.0, -1.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_trs_order() {
        let t = Transform::from_trs(
            dvec3(0.0, 5.0, 0.0),
            dvec3(0.0, 0.0, FRAC_PI_2),
            dvec3(2.0, 2.0, 2.0),
        );
        // scale (1,0,0) -> (2,0,0), rotate about Z -> (0,2,0), translate -> (0,7,0)
        let result = t.transform_point(dvec3(1.0, 0.0, 0.0));
        assert!((result - dvec3(0.0, 7.0, 0.0)).length() < 1e-10);
    }

    #[test]
    fn test_inverse() {
        let t = Transform::from_translation(dvec3(10.0, 20.0, 30.0));
        let inv = t.inverse().unwrap();
        let p = dvec3(1.0, 2.0, 3.0);
        let result = inv.transform_point(t.transform_point(p));
        assert!((result - p).length() < 1e-10);

        assert!(Transform::from_scale(dvec3(1.0, 0.0, 1.0)).inverse().is_none());
    }
}
