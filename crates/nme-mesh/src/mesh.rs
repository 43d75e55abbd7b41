use nme_geometry::TessellatedSurface;
use nme_math::{Aabb3, DVec2, Point3, Vector3};

/// GPU-ready triangle mesh.
///
/// `uvs` holds the normalized grid coordinates of each tessellated sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Point3>,
    pub normals: Vec<Vector3>,
    pub indices: Vec<u32>,
    pub uvs: Vec<DVec2>,
}

impl TriangleMesh {
    pub fn from_tessellation(tess: &TessellatedSurface) -> Self {
        let (res_u, res_v) = tess.resolution();
        let uvs = (0..tess.vertex_count())
            .map(|k| {
                DVec2::new(
                    (k / res_v) as f64 / (res_u - 1) as f64,
                    (k % res_v) as f64 / (res_v - 1) as f64,
                )
            })
            .collect();

        Self {
            positions: tess.points.iter().map(|p| p.position).collect(),
            normals: tess.points.iter().map(|p| p.normal).collect(),
            indices: tess.indices.clone(),
            uvs,
        }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex triples of every triangle.
    pub fn triangles(&self) -> impl Iterator<Item = [Point3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.positions[tri[0] as usize],
                self.positions[tri[1] as usize],
                self.positions[tri[2] as usize],
            ]
        })
    }

    /// Merge another mesh into this one, offsetting indices appropriately.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Position and normal interleaved as `f32`, six floats per vertex.
    pub fn interleaved_vertices(&self) -> Vec<f32> {
        self.positions
            .iter()
            .zip(&self.normals)
            .flat_map(|(p, n)| {
                [p.x, p.y, p.z, n.x, n.y, n.z].map(|c| c as f32)
            })
            .collect()
    }

    /// Compute the axis-aligned bounding box of all positions.
    pub fn bounding_box(&self) -> Aabb3 {
        Aabb3::from_points(self.positions.iter().copied())
            .unwrap_or(Aabb3::new(Point3::ZERO, Point3::ZERO))
    }
}

impl From<&TessellatedSurface> for TriangleMesh {
    fn from(tess: &TessellatedSurface) -> Self {
        Self::from_tessellation(tess)
    }
}
