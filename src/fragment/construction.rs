//! Mutation primitives that build up a [`Fragment`] (§4.1): the ordered
//! operations callers (slicer, splitter, coordinator) use to populate one.

use glam::Vec2;

use crate::mesh::{Mesh, SubmeshId};

use super::types::MeshVertex;
use super::Fragment;

impl Fragment {
    /// Builds the initial Fragment for a fracture call: every input vertex
    /// copied verbatim into `vertices`, submesh-0 triangles copied as-is,
    /// submesh 1 (cut face) left empty (I5).
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let mut fragment = Fragment::new();
        fragment.vertices = (0..mesh.vertex_count())
            .map(|i| {
                MeshVertex::new(
                    mesh.positions[i],
                    mesh.normals.get(i).copied().unwrap_or(glam::Vec3::ZERO),
                    mesh.uvs.get(i).copied().unwrap_or(Vec2::ZERO),
                )
            })
            .collect();
        fragment.triangles[SubmeshId::Outer as usize] = mesh.indices.clone();
        fragment.calculate_bounds();
        fragment
    }

    /// Appends `vertex` to `vertices` and records it in `index_map` under
    /// `source_index`, so a later `add_mapped_triangle` can resolve it.
    /// Returns this fragment's new vertex index.
    pub fn add_mapped_vertex(&mut self, source_index: u32, vertex: MeshVertex) -> u32 {
        let new_index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        self.index_map.insert(source_index, new_index);
        new_index
    }

    /// Appends `vertex` to `vertices` with no source mapping (used for
    /// synthesized boundary vertices that only the outer submesh needs).
    pub fn add_vertex(&mut self, vertex: MeshVertex) -> u32 {
        let new_index = self.vertices.len() as u32;
        self.vertices.push(vertex);
        new_index
    }

    /// Inserts a newly synthesized cut-boundary vertex into both `vertices`
    /// (under `outer_vertex`, e.g. the outer-facing interpolated normal) and
    /// `cut_vertices` (under `cut_vertex`, e.g. the flat plane normal),
    /// recording the twin relationship in `vertex_adjacency` (I2). Returns
    /// `(vertices_index, cut_vertices_index)`.
    pub fn add_cut_face_vertex(&mut self, outer_vertex: MeshVertex, cut_vertex: MeshVertex) -> (u32, u32) {
        let vertices_index = self.add_vertex(outer_vertex);
        let cut_index = self.cut_vertices.len() as u32;
        self.cut_vertices.push(cut_vertex);
        self.vertex_adjacency.push(vertices_index);
        (vertices_index, cut_index)
    }

    /// Appends a triangle whose indices already address this fragment's
    /// buffers (no source-mesh translation).
    pub fn add_triangle(&mut self, v1: u32, v2: u32, v3: u32, submesh: SubmeshId) {
        let bucket = &mut self.triangles[submesh as usize];
        bucket.push(v1);
        bucket.push(v2);
        bucket.push(v3);
    }

    /// Appends a triangle named by source-mesh vertex indices, translating
    /// each through `index_map` before appending. Panics if a source index
    /// was never registered via `add_mapped_vertex` — a programmer error in
    /// the caller, since every vertex referenced by a triangle must already
    /// have been copied into this fragment.
    pub fn add_mapped_triangle(&mut self, source_v1: u32, source_v2: u32, source_v3: u32, submesh: SubmeshId) {
        let v1 = self.map_index(source_v1);
        let v2 = self.map_index(source_v2);
        let v3 = self.map_index(source_v3);
        self.add_triangle(v1, v2, v3, submesh);
    }

    fn map_index(&self, source_index: u32) -> u32 {
        *self
            .index_map
            .get(&source_index)
            .expect("vertex must be mapped via add_mapped_vertex before use in a triangle")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn vtx(x: f32) -> MeshVertex {
        MeshVertex::new(Vec3::new(x, 0.0, 0.0), Vec3::Z, Vec2::ZERO)
    }

    #[test]
    fn mapped_vertex_then_triangle_resolves() {
        let mut f = Fragment::new();
        f.add_mapped_vertex(10, vtx(0.0));
        f.add_mapped_vertex(11, vtx(1.0));
        f.add_mapped_vertex(12, vtx(2.0));
        f.add_mapped_triangle(10, 11, 12, SubmeshId::Outer);
        assert_eq!(f.triangles(SubmeshId::Outer), &[0, 1, 2]);
    }

    #[test]
    fn cut_face_vertex_links_adjacency() {
        let mut f = Fragment::new();
        let (vi, ci) = f.add_cut_face_vertex(vtx(5.0), vtx(5.0));
        assert_eq!(f.vertex_adjacency()[ci as usize], vi);
        assert_eq!(f.vertices()[vi as usize].position, f.cut_vertices()[ci as usize].position);
    }

    #[test]
    #[should_panic]
    fn unmapped_triangle_panics() {
        let mut f = Fragment::new();
        f.add_mapped_triangle(0, 1, 2, SubmeshId::Outer);
    }
}
