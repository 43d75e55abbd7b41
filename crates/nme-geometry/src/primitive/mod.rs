//! Closed-form NURBS primitives.
//!
//! Every factory returns `None` for non-positive or non-finite parameters.
//! Round primitives use exact rational circle arcs, so sampled points lie on
//! the analytic shape up to floating point error.

mod cone;
mod cube;
mod curves;
mod cylinder;
mod plane;
mod revolve;
mod sphere;
mod torus;

pub use cone::create_cone;
pub use cube::create_cube;
pub use curves::{create_circle_curve, create_line_curve};
pub use cylinder::create_cylinder;
pub use plane::create_plane;
pub use sphere::create_sphere;
pub use torus::create_torus;

fn positive(name: &str, value: f64) -> bool {
    if value.is_finite() && value > 0.0 {
        true
    } else {
        log::warn!("rejected primitive parameter {name} = {value}: must be positive");
        false
    }
}
