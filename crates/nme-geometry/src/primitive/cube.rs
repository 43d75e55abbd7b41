use std::f64::consts::FRAC_PI_2;

use nme_math::{dvec3, DVec3, Transform};

use super::plane::create_plane;
use super::positive;
use crate::surface::NurbsSurface;

/// Axis-aligned box centred at the origin as six bilinear faces.
///
/// Faces are returned as top, bottom, front (+Z), back (-Z), right (+X), left (-X).
pub fn create_cube(width: f64, height: f64, depth: f64) -> Option<[NurbsSurface; 6]> {
    if !(positive("width", width) && positive("height", height) && positive("depth", depth)) {
        return None;
    }

    let (hw, hh, hd) = (width / 2.0, height / 2.0, depth / 2.0);
    let face = |w: f64, h: f64, rotation: DVec3, offset: DVec3| -> Option<NurbsSurface> {
        let mut plane = create_plane(w, h)?;
        plane.transform(&Transform::from_trs(offset, rotation, DVec3::ONE));
        Some(plane)
    };

    let faces = [
        face(width, depth, DVec3::ZERO, dvec3(0.0, hh, 0.0))?,
        face(width, depth, dvec3(std::f64::consts::PI, 0.0, 0.0), dvec3(0.0, -hh, 0.0))?,
        face(width, height, dvec3(FRAC_PI_2, 0.0, 0.0), dvec3(0.0, 0.0, hd))?,
        face(width, height, dvec3(-FRAC_PI_2, 0.0, 0.0), dvec3(0.0, 0.0, -hd))?,
        face(height, depth, dvec3(0.0, 0.0, -FRAC_PI_2), dvec3(hw, 0.0, 0.0))?,
        face(height, depth, dvec3(0.0, 0.0, FRAC_PI_2), dvec3(-hw, 0.0, 0.0))?,
    ];

    log::debug!("created cube {width} x {height} x {depth}");
    Some(faces)
}
