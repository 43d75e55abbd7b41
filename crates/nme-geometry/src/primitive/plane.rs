use nme_math::{dvec3, ControlPoint};

use super::positive;
use crate::surface::NurbsSurface;

/// Bilinear plane in XZ centred at the origin, corners at `(+-width/2, 0, +-height/2)`.
pub fn create_plane(width: f64, height: f64) -> Option<NurbsSurface> {
    if !(positive("width", width) && positive("height", height)) {
        return None;
    }

    let control_points = (0..2)
        .map(|i| {
            (0..2)
                .map(|j| {
                    ControlPoint::unit(dvec3(
                        (i as f64 - 0.5) * width,
                        0.0,
                        (j as f64 - 0.5) * height,
                    ))
                })
                .collect()
        })
        .collect();

    let knots = vec![0.0, 0.0, 1.0, 1.0];
    log::debug!("created plane {width} x {height}");
    Some(NurbsSurface::from_parts(1, 1, knots.clone(), knots, control_points))
}
