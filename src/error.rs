//! Typed errors for the handful of call sites that need one.
//!
//! Most failure modes in the slicer, triangulator and coordinator are
//! deliberately *not* a `Result::Err` — those are silent, observable only
//! through the emptiness of the returned [`crate::fragment::Fragment`]. These
//! types exist only where constructing a [`crate::mesh::Mesh`] from raw,
//! possibly-malformed buffers needs a real diagnostic, mirroring the
//! reference crate's one-`thiserror`-enum-per-subsystem convention.

use thiserror::Error;

/// Errors constructing a [`crate::mesh::Mesh`] from raw parallel arrays.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("index count {0} is not a multiple of 3")]
    UnindexedTriangles(usize),
    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
    #[error("normals length {normals} does not match positions length {positions}")]
    NormalCountMismatch { positions: usize, normals: usize },
    #[error("uvs length {uvs} does not match positions length {positions}")]
    UvCountMismatch { positions: usize, uvs: usize },
}

/// Lets hosts that build a [`crate::mesh::Mesh`] from raw buffers and then
/// fracture it in one `?`-chained expression propagate both failure kinds
/// through a single error type.
#[derive(Debug, Error)]
pub enum FractureError {
    #[error(transparent)]
    Mesh(#[from] MeshError),
}
