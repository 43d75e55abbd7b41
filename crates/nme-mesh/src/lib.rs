pub mod intersect;
pub mod mesh;
pub mod ray_triangle;

pub use intersect::{intersect, intersect_mesh, intersect_ray, pick, CollisionResult};
pub use mesh::TriangleMesh;
pub use ray_triangle::ray_triangle;
