//! Connected-Components Splitter (§4.4): a union-find pass over a
//! [`Fragment`]'s vertices, cut vertices and triangles, partitioning it into
//! one fragment per disconnected surface. Runs after the slicer, before the
//! caller ever sees an output fragment.

use crate::fragment::types::EdgeConstraint;
use crate::fragment::Fragment;
use crate::geom::SpatialHash;
use crate::mesh::SubmeshId;

struct DisjointSet {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            // Path halving: point each node at its grandparent on the way up.
            self.parent[x as usize] = self.parent[self.parent[x as usize] as usize];
            x = self.parent[x as usize];
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra as usize] < self.size[rb as usize] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb as usize] = ra;
        self.size[ra as usize] += self.size[rb as usize];
    }
}

/// Splits `fragment` into one fragment per connected component (§4.4).
/// A fragment with a single connected surface returns a one-element vector
/// containing an equivalent (but freshly re-indexed) copy.
pub fn split_connected_components(fragment: &Fragment) -> Vec<Fragment> {
    let vertex_count = fragment.vertex_count();
    let cut_count = fragment.cut_vertices().len();
    let total = vertex_count + cut_count;
    if total == 0 {
        return Vec::new();
    }

    let mut sets = DisjointSet::new(total);

    for (i, &twin) in fragment.vertex_adjacency().iter().enumerate() {
        sets.union(twin, (vertex_count + i) as u32);
    }

    let mut hash = SpatialHash::new();
    for (i, vertex) in fragment.vertices().iter().enumerate() {
        let canonical = hash.canonicalize(vertex.position, i);
        if canonical != i {
            sets.union(canonical as u32, i as u32);
        }
    }

    for submesh in [SubmeshId::Outer, SubmeshId::CutFace] {
        let offset = if submesh == SubmeshId::CutFace { vertex_count as u32 } else { 0 };
        for tri in fragment.triangles(submesh).chunks_exact(3) {
            let (a, b, c) = (tri[0] + offset, tri[1] + offset, tri[2] + offset);
            sets.union(a, b);
            sets.union(b, c);
        }
    }

    let roots: Vec<u32> = (0..total as u32).map(|i| sets.find(i)).collect();

    let mut fragments_by_root: std::collections::HashMap<u32, Fragment> = std::collections::HashMap::new();
    let mut vertex_remap = vec![u32::MAX; vertex_count];
    let mut cut_remap = vec![u32::MAX; cut_count];

    for (i, vertex) in fragment.vertices().iter().enumerate() {
        let root = roots[i];
        let output = fragments_by_root.entry(root).or_default();
        vertex_remap[i] = output.add_vertex(*vertex);
    }

    for (i, cut_vertex) in fragment.cut_vertices().iter().enumerate() {
        let root = roots[vertex_count + i];
        let output = fragments_by_root.entry(root).or_default();
        let local_cut_index = output.cut_vertices.len() as u32;
        output.cut_vertices.push(*cut_vertex);
        output.vertex_adjacency.push(vertex_remap[fragment.vertex_adjacency()[i] as usize]);
        cut_remap[i] = local_cut_index;
    }

    for submesh in [SubmeshId::Outer, SubmeshId::CutFace] {
        for tri in fragment.triangles(submesh).chunks_exact(3) {
            let root = if submesh == SubmeshId::CutFace {
                roots[vertex_count + tri[0] as usize]
            } else {
                roots[tri[0] as usize]
            };
            let output = fragments_by_root.entry(root).or_default();
            let remapped: Vec<u32> = tri
                .iter()
                .map(|&v| {
                    if submesh == SubmeshId::CutFace {
                        cut_remap[v as usize]
                    } else {
                        vertex_remap[v as usize]
                    }
                })
                .collect();
            output.add_triangle(remapped[0], remapped[1], remapped[2], submesh);
        }
    }

    for constraint in fragment.constraints() {
        let root = roots[vertex_count + constraint.v1 as usize];
        if let Some(output) = fragments_by_root.get_mut(&root) {
            output.constraints.push(EdgeConstraint::new(cut_remap[constraint.v1 as usize], cut_remap[constraint.v2 as usize]));
        }
    }

    let mut outputs: Vec<Fragment> = fragments_by_root.into_values().collect();
    for output in &mut outputs {
        output.calculate_bounds();
    }
    outputs
}
