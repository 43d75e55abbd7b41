use std::f64::consts::{FRAC_PI_2, PI};

use super::positive;
use super::revolve::{revolve, Arc};
use crate::surface::NurbsSurface;

/// Sphere of `radius` centred at the origin, degree 2x2 on a 7x5 grid.
///
/// u sweeps the azimuth as three 120 degree arcs (7 points); v runs the meridian
/// from the north pole to the south pole as two 90 degree arcs (5 points).
pub fn create_sphere(radius: f64) -> Option<NurbsSurface> {
    if !positive("radius", radius) {
        return None;
    }

    let ring = Arc::circle(3)?;
    let meridian = Arc::new(FRAC_PI_2, -PI, 2)?;
    let profile: Vec<_> = meridian
        .points
        .iter()
        .zip(&meridian.weights)
        .map(|(p, w)| (*p * radius, *w))
        .collect();

    log::debug!("created sphere r={radius}");
    Some(NurbsSurface::from_parts(
        2,
        2,
        ring.knots.clone(),
        meridian.knots,
        revolve(&ring, &profile),
    ))
}
