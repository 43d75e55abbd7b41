use nme_math::DVec2;

use super::positive;
use super::revolve::{revolve, Arc};
use crate::surface::NurbsSurface;

/// Open cylinder around Y, degree 2x1 on a 9x2 grid, rings at `y = +-height/2`.
pub fn create_cylinder(radius: f64, height: f64) -> Option<NurbsSurface> {
    if !(positive("radius", radius) && positive("height", height)) {
        return None;
    }

    let ring = Arc::circle(4)?;
    let half = height / 2.0;
    let profile = [
        (DVec2::new(radius, -half), 1.0),
        (DVec2::new(radius, half), 1.0),
    ];

    log::debug!("created cylinder r={radius} h={height}");
    Some(NurbsSurface::from_parts(
        2,
        1,
        ring.knots.clone(),
        vec![0.0, 0.0, 1.0, 1.0],
        revolve(&ring, &profile),
    ))
}
