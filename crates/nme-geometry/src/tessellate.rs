//! Uniform-grid tessellation of surfaces and curves.
//!
//! Grid vertex `(i, j)` is stored at index `i * res_v + j`. Each grid cell
//! `(i, j)` with corners `v0 = i*res_v + j`, `v1 = v0 + 1`, `v2 = (i+1)*res_v + j`,
//! `v3 = v2 + 1` emits triangles `(v0, v1, v2)` and `(v1, v3, v2)`.

use nme_math::Point3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::curve::Curve;
use crate::surface::{Surface, SurfacePoint};

/// Smallest resolution per direction; lower requests are raised to it.
pub const MIN_RESOLUTION: usize = 2;

/// Grids with at least this many samples are evaluated in parallel by [`tessellate`].
const PARALLEL_THRESHOLD: usize = 1024;

/// Resolutions used by the editor for render caches and picking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TessellationSettings {
    pub curve_resolution: usize,
    pub surface_resolution_u: usize,
    pub surface_resolution_v: usize,
    pub intersection_resolution: usize,
    pub parallel: bool,
}

impl Default for TessellationSettings {
    fn default() -> Self {
        Self {
            curve_resolution: 100,
            surface_resolution_u: 20,
            surface_resolution_v: 20,
            intersection_resolution: 50,
            parallel: true,
        }
    }
}

impl TessellationSettings {
    /// Render tessellation of `surface` at the configured resolution.
    pub fn tessellate_surface(&self, surface: &dyn Surface) -> TessellatedSurface {
        tessellate_with(
            surface,
            self.surface_resolution_u,
            self.surface_resolution_v,
            self.parallel,
        )
    }

    pub fn curve_polyline(&self, curve: &dyn Curve) -> Vec<Point3> {
        curve_to_polyline(curve, self.curve_resolution)
    }
}

/// A `resolution_u x resolution_v` grid of surface samples and its triangle list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TessellatedSurface {
    pub points: Vec<SurfacePoint>,
    pub indices: Vec<u32>,
    pub resolution_u: usize,
    pub resolution_v: usize,
}

impl TessellatedSurface {
    pub fn resolution(&self) -> (usize, usize) {
        (self.resolution_u, self.resolution_v)
    }

    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    pub fn positions(&self) -> impl Iterator<Item = Point3> + '_ {
        self.points.iter().map(|p| p.position)
    }

    /// GPU vertex buffer layout: `px, py, pz, nx, ny, nz` per vertex.
    pub fn interleaved_vertices(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.points.len() * 6);
        for p in &self.points {
            out.extend_from_slice(&[
                p.position.x as f32,
                p.position.y as f32,
                p.position.z as f32,
                p.normal.x as f32,
                p.normal.y as f32,
                p.normal.z as f32,
            ]);
        }
        out
    }
}

/// `k`-th of `count` evenly spaced samples over `[min, max]`, both ends included.
fn sample_param(min: f64, max: f64, k: usize, count: usize) -> f64 {
    (min + (max - min) * k as f64 / (count - 1) as f64).min(max)
}

/// Tessellate over the surface's parameter domain.
///
/// Large grids are sampled in parallel; the output is identical either way.
pub fn tessellate(surface: &dyn Surface, res_u: usize, res_v: usize) -> TessellatedSurface {
    let parallel = res_u * res_v >= PARALLEL_THRESHOLD;
    tessellate_with(surface, res_u, res_v, parallel)
}

pub fn tessellate_with(
    surface: &dyn Surface,
    res_u: usize,
    res_v: usize,
    parallel: bool,
) -> TessellatedSurface {
    let res_u = res_u.max(MIN_RESOLUTION);
    let res_v = res_v.max(MIN_RESOLUTION);
    let (u_min, u_max) = surface.domain_u();
    let (v_min, v_max) = surface.domain_v();

    let eval = |k: usize| {
        let (i, j) = (k / res_v, k % res_v);
        surface.evaluate(
            sample_param(u_min, u_max, i, res_u),
            sample_param(v_min, v_max, j, res_v),
        )
    };

    let points: Vec<SurfacePoint> = if parallel {
        (0..res_u * res_v).into_par_iter().map(eval).collect()
    } else {
        (0..res_u * res_v).map(eval).collect()
    };

    TessellatedSurface {
        points,
        indices: grid_indices(res_u, res_v),
        resolution_u: res_u,
        resolution_v: res_v,
    }
}

/// Triangle indices for a `res_u x res_v` vertex grid.
pub fn grid_indices(res_u: usize, res_v: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity((res_u - 1) * (res_v - 1) * 6);
    for i in 0..res_u - 1 {
        for j in 0..res_v - 1 {
            let v0 = (i * res_v + j) as u32;
            let v1 = v0 + 1;
            let v2 = ((i + 1) * res_v + j) as u32;
            let v3 = v2 + 1;
            indices.extend_from_slice(&[v0, v1, v2, v1, v3, v2]);
        }
    }
    indices
}

/// Sample `resolution` evenly spaced points over the curve's domain.
pub fn curve_to_polyline(curve: &dyn Curve, resolution: usize) -> Vec<Point3> {
    let resolution = resolution.max(MIN_RESOLUTION);
    let (t_min, t_max) = curve.domain();
    (0..resolution)
        .map(|k| curve.point_at(sample_param(t_min, t_max, k, resolution)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::NurbsCurve;
    use crate::surface::NurbsSurface;
    use nme_math::dvec3;

    #[test]
    fn test_index_validity_and_count() {
        let surf = NurbsSurface::new(2, 2, 4, 3).unwrap();
        for (ru, rv) in [(2, 2), (3, 7), (20, 20), (50, 13)] {
            let mesh = tessellate(&surf, ru, rv);
            assert_eq!(mesh.vertex_count(), ru * rv);
            assert_eq!(mesh.triangle_count(), (ru - 1) * (rv - 1) * 2);
            assert!(mesh.indices.iter().all(|&i| (i as usize) < ru * rv));
        }
    }

    #[test]
    fn test_cell_winding() {
        let indices = grid_indices(3, 4);
        // cell (1, 2): v0 = 6, v1 = 7, v2 = 10, v3 = 11
        let cell = (1 * 3 + 2) * 6;
        assert_eq!(&indices[cell..cell + 6], &[6, 7, 10, 7, 11, 10]);
    }

    #[test]
    fn test_boundary_samples_hit_corners() {
        let surf = NurbsSurface::new(3, 3, 5, 5).unwrap();
        let mesh = tessellate(&surf, 6, 6);
        assert!((mesh.points[0].position - dvec3(0.0, 0.0, 0.0)).length() < 1e-10);
        assert!((mesh.points[35].position - dvec3(4.0, 0.0, 4.0)).length() < 1e-10);
        assert!((mesh.points[5].position - dvec3(0.0, 0.0, 4.0)).length() < 1e-10);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let surf = NurbsSurface::new(2, 3, 5, 6).unwrap();
        let a = tessellate_with(&surf, 17, 9, false);
        let b = tessellate_with(&surf, 17, 9, true);
        assert_eq!(a, b);
    }

    #[test]
    fn test_idempotent() {
        let surf = NurbsSurface::new(2, 2, 3, 3).unwrap();
        assert_eq!(tessellate(&surf, 10, 10), tessellate(&surf, 10, 10));
    }

    #[test]
    fn test_resolution_is_clamped() {
        let surf = NurbsSurface::new(1, 1, 2, 2).unwrap();
        let mesh = tessellate(&surf, 0, 1);
        assert_eq!(mesh.resolution(), (2, 2));
        assert_eq!(mesh.triangle_count(), 2);
    }

    #[test]
    fn test_interleaved_layout() {
        let surf = NurbsSurface::new(1, 1, 2, 2).unwrap();
        let mesh = tessellate(&surf, 2, 2);
        let data = mesh.interleaved_vertices();
        assert_eq!(data.len(), 4 * 6);
        let last = &mesh.points[3];
        assert_eq!(data[18], last.position.x as f32);
        assert_eq!(data[23], last.normal.z as f32);
        assert_eq!(mesh.triangles().count(), 2);
    }

    #[test]
    fn test_curve_polyline() {
        let curve = NurbsCurve::new(1, 3).unwrap();
        let points = curve_to_polyline(&curve, 5);
        assert_eq!(points.len(), 5);
        assert!((points[4] - dvec3(2.0, 0.0, 0.0)).length() < 1e-12);

        let settings = TessellationSettings::default();
        assert_eq!(settings.curve_polyline(&curve).len(), 100);
    }

    #[test]
    fn test_settings_defaults_and_partial_json() {
        let settings: TessellationSettings =
            serde_json::from_str(r#"{ "surface_resolution_u": 8 }"#).unwrap();
        assert_eq!(settings.surface_resolution_u, 8);
        assert_eq!(settings.surface_resolution_v, 20);
        assert_eq!(settings.intersection_resolution, 50);

        let surf = NurbsSurface::new(1, 1, 2, 2).unwrap();
        assert_eq!(settings.tessellate_surface(&surf).resolution(), (8, 20));
    }
}
