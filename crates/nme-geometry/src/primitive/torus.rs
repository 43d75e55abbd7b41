use nme_math::DVec2;

use super::positive;
use super::revolve::{revolve, Arc};
use crate::surface::NurbsSurface;

/// Torus around Y, degree 2x2 on a 9x9 grid.
///
/// Point `(u, v)` lies at `((R + r cos v) cos u, r sin v, (R + r cos v) sin u)`.
pub fn create_torus(major_radius: f64, minor_radius: f64) -> Option<NurbsSurface> {
    if !(positive("major_radius", major_radius) && positive("minor_radius", minor_radius)) {
        return None;
    }

    let ring = Arc::circle(4)?;
    let tube = Arc::circle(4)?;
    let profile: Vec<_> = tube
        .points
        .iter()
        .zip(&tube.weights)
        .map(|(c, w)| (DVec2::new(major_radius + minor_radius * c.x, minor_radius * c.y), *w))
        .collect();

    log::debug!("created torus R={major_radius} r={minor_radius}");
    Some(NurbsSurface::from_parts(
        2,
        2,
        ring.knots.clone(),
        tube.knots,
        revolve(&ring, &profile),
    ))
}
