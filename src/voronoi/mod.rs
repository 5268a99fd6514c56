//! Voronoi fracture (§4.5-4.6): seed generation and cell clipping.

mod clip;
mod seed;

pub use clip::{clip_cells, Axis, VoronoiMode};
pub use seed::{generate_seeds, SeedOptions};
