//! NURBS map editor geometry: knot vectors, Cox-de Boor evaluation, curves,
//! surfaces, tessellation and primitives.

pub mod curve;
pub mod nurbs;
pub mod primitive;
pub mod surface;
pub mod tessellate;
pub mod validate;

pub use curve::{evaluate_curve, Curve, NurbsCurve};
pub use nurbs::basis;
pub use primitive::{
    create_circle_curve, create_cone, create_cube, create_cylinder, create_line_curve,
    create_plane, create_sphere, create_torus,
};
pub use surface::{evaluate_surface, NurbsSurface, Surface, SurfacePoint};
pub use tessellate::{tessellate, TessellatedSurface, TessellationSettings};
pub use validate::{validate_curve, validate_surface};
