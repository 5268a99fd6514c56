//! Real-time destructive geometry for indexed triangle meshes: plane
//! slicing, constrained Delaunay triangulation of the resulting cut faces,
//! connected-component splitting, and Voronoi cell fracture.
//!
//! Hosts touch three things: [`Mesh`] (the interchange format), [`Fragment`]
//! (a mesh piece mid-fracture), and [`fracture`] (the coordinator). The
//! lower-level [`slice`], [`triangulate`] and [`split_connected_components`]
//! operations are exposed for callers building their own fracture pipeline.

pub mod components;
pub mod constants;
pub mod error;
pub mod fracture;
pub mod fragment;
pub mod geom;
pub mod mesh;
pub mod rng;
mod slicer;
pub mod triangulate;
pub mod voronoi;

pub use components::split_connected_components;
pub use error::{FractureError, MeshError};
pub use fracture::{fracture, fracture_fragment, FractureOptions, Method, VoronoiOptions};
pub use fragment::{Constraint, Fragment, Vertex};
pub use mesh::{Mesh, SubmeshGroup, SubmeshId};
pub use slicer::slice;
pub use triangulate::triangulate;
pub use voronoi::{clip_cells, generate_seeds, Axis, SeedOptions, VoronoiMode};
