//! The host-facing mesh interchange format (§6): three parallel attribute
//! arrays plus an index array and an optional submesh group list.
//!
//! This is the only type hosts construct directly; everything else
//! ([`crate::fragment::Fragment`], slicer/triangulator/fracture outputs)
//! converts to and from it at the boundary.

use glam::{Vec2, Vec3};

use crate::error::MeshError;

/// Submesh 0 is always the outer surface, submesh 1 is always the
/// synthesized cut face (§3, Glossary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum SubmeshId {
    Outer = 0,
    CutFace = 1,
}

/// A contiguous range of `indices` belonging to one submesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmeshGroup {
    pub start: u32,
    pub count: u32,
    pub submesh_id: SubmeshId,
}

/// An indexed triangle mesh: positions/normals/uvs are parallel arrays keyed
/// by vertex index; `indices` is a flat triangle list (length a multiple of
/// 3); `groups` partitions `indices` by submesh.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
    pub groups: Vec<SubmeshGroup>,
}

impl Mesh {
    /// Validates a raw buffer set before taking ownership. This is the one
    /// InvalidInput case worth a typed diagnostic rather than a silent
    /// empty result, since the caller is about to hand the core a buffer
    /// it built itself.
    pub fn from_arrays(
        positions: Vec<Vec3>,
        normals: Vec<Vec3>,
        uvs: Vec<Vec2>,
        indices: Vec<u32>,
        groups: Vec<SubmeshGroup>,
    ) -> Result<Self, MeshError> {
        if indices.len() % 3 != 0 {
            return Err(MeshError::UnindexedTriangles(indices.len()));
        }
        if !normals.is_empty() && normals.len() != positions.len() {
            return Err(MeshError::NormalCountMismatch {
                positions: positions.len(),
                normals: normals.len(),
            });
        }
        if !uvs.is_empty() && uvs.len() != positions.len() {
            return Err(MeshError::UvCountMismatch {
                positions: positions.len(),
                uvs: uvs.len(),
            });
        }
        for &index in &indices {
            if index as usize >= positions.len() {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    vertex_count: positions.len(),
                });
            }
        }
        Ok(Self {
            positions,
            normals,
            uvs,
            indices,
            groups,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(feature = "bevy")]
mod bevy_interop {
    use super::*;
    use bevy::asset::RenderAssetUsages;
    use bevy::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
    use bevy::prelude::Mesh as BevyMesh;

    impl Mesh {
        /// Builds a [`Mesh`] from a bevy render mesh, discarding anything
        /// that is not a triangle list. Mirrors the attribute-extraction
        /// order the half-edge mesh builder this crate is grounded on uses.
        pub fn from_bevy_mesh(mesh: &BevyMesh) -> Result<Self, MeshError> {
            let positions: Vec<Vec3> = mesh
                .attribute(BevyMesh::ATTRIBUTE_POSITION)
                .and_then(|a| a.as_float3())
                .map(|p| p.iter().map(|v| Vec3::from_array(*v)).collect())
                .unwrap_or_default();

            let normals: Vec<Vec3> = mesh
                .attribute(BevyMesh::ATTRIBUTE_NORMAL)
                .and_then(|a| a.as_float3())
                .map(|n| n.iter().map(|v| Vec3::from_array(*v)).collect())
                .unwrap_or_default();

            let uvs: Vec<Vec2> = mesh
                .attribute(BevyMesh::ATTRIBUTE_UV_0)
                .and_then(|a| match a {
                    VertexAttributeValues::Float32x2(v) => {
                        Some(v.iter().map(|uv| Vec2::from_array(*uv)).collect())
                    }
                    _ => None,
                })
                .unwrap_or_default();

            let indices: Vec<u32> = match mesh.indices() {
                Some(Indices::U16(idx)) => idx.iter().map(|&i| i as u32).collect(),
                Some(Indices::U32(idx)) => idx.to_vec(),
                None => Vec::new(),
            };

            Mesh::from_arrays(positions, normals, uvs, indices, Vec::new())
        }

        /// Converts back to a bevy render mesh, submesh-0/1 boundaries
        /// collapsed into one triangle list (bevy meshes have no submesh
        /// concept; hosts that need per-submesh materials read `self.groups`
        /// before converting, or convert each submesh separately).
        pub fn to_bevy_mesh(&self) -> BevyMesh {
            let mut mesh = BevyMesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
            mesh.insert_attribute(
                BevyMesh::ATTRIBUTE_POSITION,
                self.positions.iter().map(|p| p.to_array()).collect::<Vec<_>>(),
            );
            if !self.normals.is_empty() {
                mesh.insert_attribute(
                    BevyMesh::ATTRIBUTE_NORMAL,
                    self.normals.iter().map(|n| n.to_array()).collect::<Vec<_>>(),
                );
            }
            if !self.uvs.is_empty() {
                mesh.insert_attribute(
                    BevyMesh::ATTRIBUTE_UV_0,
                    self.uvs.iter().map(|uv| uv.to_array()).collect::<Vec<_>>(),
                );
            }
            mesh.insert_indices(Indices::U32(self.indices.clone()));
            mesh
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec<Vec3>, Vec<Vec3>, Vec<Vec2>, Vec<u32>) {
        (
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![Vec3::Z, Vec3::Z, Vec3::Z],
            vec![Vec2::ZERO, Vec2::X, Vec2::Y],
            vec![0, 1, 2],
        )
    }

    #[test]
    fn valid_triangle_mesh_constructs() {
        let (p, n, u, i) = triangle();
        let mesh = Mesh::from_arrays(p, n, u, i, Vec::new()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn rejects_unindexed_triangles() {
        let (p, n, u, _) = triangle();
        let err = Mesh::from_arrays(p, n, u, vec![0, 1], Vec::new()).unwrap_err();
        assert_eq!(err, MeshError::UnindexedTriangles(2));
    }

    #[test]
    fn rejects_out_of_range_index() {
        let (p, n, u, _) = triangle();
        let err = Mesh::from_arrays(p, n, u, vec![0, 1, 5], Vec::new()).unwrap_err();
        assert_eq!(
            err,
            MeshError::IndexOutOfRange {
                index: 5,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn rejects_mismatched_normals() {
        let (p, _, u, i) = triangle();
        let err = Mesh::from_arrays(p, vec![Vec3::Z], u, i, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            MeshError::NormalCountMismatch {
                positions: 3,
                normals: 1
            }
        );
    }

    #[test]
    fn empty_mesh_is_valid_and_empty() {
        let mesh = Mesh::from_arrays(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new()).unwrap();
        assert!(mesh.is_empty());
    }
}
