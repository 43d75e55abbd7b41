//! NURBS core algorithms: knot vectors, Cox-de Boor basis functions and rational evaluation.

pub mod basis;
pub mod eval;
pub mod knot;

pub use basis::{basis, basis_row};
pub use eval::{rational_curve_point, rational_surface_point};
pub use knot::{circular_knots, clamped_knots, domain, is_non_decreasing, uniform_knots};
