//! [`Fragment`] -> [`Mesh`] conversion: the boundary crossing back to the
//! host-facing interchange format.

use crate::mesh::{Mesh, SubmeshGroup, SubmeshId};

use super::Fragment;

impl Fragment {
    /// Flattens this fragment's outer and cut-face submeshes into a single
    /// [`Mesh`], with `groups` recording where each submesh's indices start.
    /// Cut-face vertices are appended after outer vertices, so cut-face
    /// triangle indices are offset by `vertices().len()`.
    pub fn to_mesh(&self) -> Mesh {
        let vertex_offset = self.vertices.len() as u32;

        let mut positions: Vec<_> = self.vertices.iter().map(|v| v.position).collect();
        let mut normals: Vec<_> = self.vertices.iter().map(|v| v.normal).collect();
        let mut uvs: Vec<_> = self.vertices.iter().map(|v| v.uv).collect();

        positions.extend(self.cut_vertices.iter().map(|v| v.position));
        normals.extend(self.cut_vertices.iter().map(|v| v.normal));
        uvs.extend(self.cut_vertices.iter().map(|v| v.uv));

        let mut indices = Vec::with_capacity(self.triangles[0].len() + self.triangles[1].len());
        let mut groups = Vec::with_capacity(2);

        if !self.triangles[SubmeshId::Outer as usize].is_empty() {
            let start = indices.len() as u32;
            indices.extend_from_slice(&self.triangles[SubmeshId::Outer as usize]);
            groups.push(SubmeshGroup {
                start,
                count: self.triangles[SubmeshId::Outer as usize].len() as u32,
                submesh_id: SubmeshId::Outer,
            });
        }

        if !self.triangles[SubmeshId::CutFace as usize].is_empty() {
            let start = indices.len() as u32;
            indices.extend(self.triangles[SubmeshId::CutFace as usize].iter().map(|i| i + vertex_offset));
            groups.push(SubmeshGroup {
                start,
                count: self.triangles[SubmeshId::CutFace as usize].len() as u32,
                submesh_id: SubmeshId::CutFace,
            });
        }

        Mesh {
            positions,
            normals,
            uvs,
            indices,
            groups,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::types::MeshVertex;
    use glam::{Vec2, Vec3};

    fn vtx(x: f32) -> MeshVertex {
        MeshVertex::new(Vec3::new(x, 0.0, 0.0), Vec3::Z, Vec2::ZERO)
    }

    #[test]
    fn cut_face_indices_offset_past_outer_vertices() {
        let mut f = Fragment::new();
        f.vertices = vec![vtx(0.0), vtx(1.0), vtx(2.0)];
        f.cut_vertices = vec![vtx(3.0), vtx(4.0), vtx(5.0)];
        f.triangles[SubmeshId::Outer as usize] = vec![0, 1, 2];
        f.triangles[SubmeshId::CutFace as usize] = vec![0, 1, 2];

        let mesh = f.to_mesh();
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.indices, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(mesh.groups.len(), 2);
        assert_eq!(mesh.groups[1].submesh_id, SubmeshId::CutFace);
    }

    #[test]
    fn empty_cut_face_yields_no_group() {
        let mut f = Fragment::new();
        f.vertices = vec![vtx(0.0), vtx(1.0), vtx(2.0)];
        f.triangles[SubmeshId::Outer as usize] = vec![0, 1, 2];

        let mesh = f.to_mesh();
        assert_eq!(mesh.groups.len(), 1);
    }
}
