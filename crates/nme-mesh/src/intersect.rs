//! Ray-surface intersection against a transient tessellation.
//!
//! The render cache is never touched; each query tessellates at its own
//! resolution (50x50 by default).

use nme_core::Tolerance;
use nme_geometry::{tessellate, NurbsSurface, Surface, TessellationSettings};
use nme_math::{Point3, Ray, Vector3};
use rayon::prelude::*;

use crate::mesh::TriangleMesh;
use crate::ray_triangle::ray_triangle;

/// Outcome of a ray query. A miss has `distance == f64::INFINITY`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    pub hit: bool,
    pub distance: f64,
    pub point: Point3,
    /// Geometric normal of the hit triangle, facing the ray origin.
    pub normal: Vector3,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            distance: f64::INFINITY,
            point: Point3::ZERO,
            normal: Vector3::ZERO,
        }
    }
}

impl Default for CollisionResult {
    fn default() -> Self {
        Self::miss()
    }
}

/// Nearest hit of the ray `origin + t * direction` with `surface`.
///
/// The direction is normalized, so `distance` is in world units.
pub fn intersect(ray_origin: Point3, ray_direction: Vector3, surface: &dyn Surface) -> CollisionResult {
    intersect_ray(
        &Ray::new(ray_origin, ray_direction),
        surface,
        TessellationSettings::default().intersection_resolution,
        &Tolerance::default(),
    )
}

pub fn intersect_ray(
    ray: &Ray,
    surface: &dyn Surface,
    resolution: usize,
    tol: &Tolerance,
) -> CollisionResult {
    let tess = tessellate(surface, resolution, resolution);
    intersect_mesh(ray, &TriangleMesh::from(&tess), tol)
}

/// Nearest hit over every triangle of `mesh`.
pub fn intersect_mesh(ray: &Ray, mesh: &TriangleMesh, tol: &Tolerance) -> CollisionResult {
    // Flat meshes have zero-thickness bounds; pad them so grazing rays still enter.
    if mesh.bounding_box().expand(tol.ray).ray_interval(ray).is_none() {
        return CollisionResult::miss();
    }

    let mut best = CollisionResult::miss();
    for [v0, v1, v2] in mesh.triangles() {
        let Some(t) = ray_triangle(ray, v0, v1, v2, tol.ray) else {
            continue;
        };
        if t < best.distance {
            let mut normal = (v1 - v0).cross(v2 - v0).normalize_or_zero();
            if normal.dot(ray.direction) > 0.0 {
                normal = -normal;
            }
            best = CollisionResult {
                hit: true,
                distance: t,
                point: ray.at(t),
                normal,
            };
        }
    }
    best
}

/// Nearest hit over several surfaces, with the index of the surface hit.
///
/// Ties go to the lower index.
pub fn pick(ray: &Ray, surfaces: &[NurbsSurface], resolution: usize) -> Option<(usize, CollisionResult)> {
    let tol = Tolerance::default();
    let nearest = surfaces
        .par_iter()
        .enumerate()
        .map(|(index, surface)| (index, intersect_ray(ray, surface, resolution, &tol)))
        .filter(|(_, result)| result.hit)
        .min_by(|a, b| a.1.distance.total_cmp(&b.1.distance).then(a.0.cmp(&b.0)));

    match nearest {
        Some((index, result)) => log::debug!("picked surface {index} at distance {}", result.distance),
        None => log::debug!("pick missed {} surfaces", surfaces.len()),
    }
    nearest
}
