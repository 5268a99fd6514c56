//! Cut-face vertex welding (I3): collapses duplicate `cut_vertices` entries
//! produced by the slicer (one copy per incoming boundary edge) down to one
//! per distinct position, the same quantized-position technique the
//! reference crate's bevy mesh importer uses for its own vertex welding.

use tracing::debug;

use crate::geom::SpatialHash;

use super::Fragment;

impl Fragment {
    /// Deduplicates `cut_vertices` by spatial hash, rewrites `vertex_adjacency`
    /// and every `constraints[i]` endpoint to the post-weld indices (I3).
    /// Idempotent: welding an already-welded fragment is a no-op.
    pub fn weld_cut_face_vertices(&mut self) {
        if self.cut_vertices.is_empty() {
            return;
        }

        let mut hash = SpatialHash::new();
        let mut remap = vec![0u32; self.cut_vertices.len()];
        let mut welded_vertices = Vec::with_capacity(self.cut_vertices.len());
        let mut welded_adjacency = Vec::with_capacity(self.vertex_adjacency.len());

        for (i, vertex) in self.cut_vertices.iter().enumerate() {
            let canonical = hash.canonicalize(vertex.position, welded_vertices.len());
            remap[i] = canonical as u32;
            if canonical == welded_vertices.len() {
                welded_vertices.push(*vertex);
                welded_adjacency.push(self.vertex_adjacency[i]);
            }
        }

        let removed = self.cut_vertices.len() - welded_vertices.len();
        if removed > 0 {
            debug!(removed, "welded duplicate cut face vertices");
        }

        self.cut_vertices = welded_vertices;
        self.vertex_adjacency = welded_adjacency;

        for constraint in &mut self.constraints {
            constraint.v1 = remap[constraint.v1 as usize];
            constraint.v2 = remap[constraint.v2 as usize];
        }
    }
}
