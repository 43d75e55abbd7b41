use nme_math::DVec2;

use super::positive;
use super::revolve::{revolve, Arc};
use crate::surface::NurbsSurface;

/// Truncated cone around Y, degree 2x1 on a 7x2 grid.
///
/// One radius may be zero (an apex); negative radii or both radii zero are rejected.
pub fn create_cone(bottom_radius: f64, top_radius: f64, height: f64) -> Option<NurbsSurface> {
    if !positive("height", height) {
        return None;
    }
    let radius_ok = |r: f64| r.is_finite() && r >= 0.0;
    if !(radius_ok(bottom_radius) && radius_ok(top_radius))
        || (bottom_radius == 0.0 && top_radius == 0.0)
    {
        log::warn!("rejected cone radii bottom={bottom_radius} top={top_radius}");
        return None;
    }

    let ring = Arc::circle(3)?;
    let half = height / 2.0;
    let profile = [
        (DVec2::new(bottom_radius, -half), 1.0),
        (DVec2::new(top_radius, half), 1.0),
    ];

    log::debug!("created cone r0={bottom_radius} r1={top_radius} h={height}");
    Some(NurbsSurface::from_parts(
        2,
        1,
        ring.knots.clone(),
        vec![0.0, 0.0, 1.0, 1.0],
        revolve(&ring, &profile),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tessellate::tessellate;
    use nme_core::Validate;

    #[test]
    fn test_cone_radius_varies_linearly() {
        let cone = create_cone(2.0, 1.0, 2.0).unwrap();
        assert!(cone.is_valid());
        assert_eq!((cone.count_u(), cone.count_v()), (7, 2));

        let mesh = tessellate(&cone, 19, 5);
        for p in mesh.positions() {
            // y in [-1, 1] maps radius 2 -> 1
            let expected = 2.0 - (p.y + 1.0) / 2.0;
            let radial = (p.x * p.x + p.z * p.z).sqrt();
            assert!((radial - expected).abs() < 1e-9, "radial {radial} expected {expected}");
        }
    }

    #[test]
    fn test_cone_apex() {
        let cone = create_cone(1.0, 0.0, 3.0).unwrap();
        for i in 0..7 {
            let apex = cone.control_point(i, 1).unwrap().position;
            assert!((apex - nme_math::dvec3(0.0, 1.5, 0.0)).length() < 1e-12);
        }
    }

    #[test]
    fn test_cone_rejects_bad_parameters() {
        assert!(create_cone(0.0, 0.0, 1.0).is_none());
        assert!(create_cone(-1.0, 1.0, 1.0).is_none());
        assert!(create_cone(1.0, 1.0, 0.0).is_none());
    }
}
