//! Compile-time numeric tolerances shared by every geometric subsystem.
//!
//! These are deliberately not configurable by callers, so that determinism
//! (P7) does not depend on host-supplied epsilons.

/// Spatial-hash grid size used to weld coincident vertices (I3).
pub const SPATIAL_HASH_TOLERANCE: f64 = 1e-9;

/// Tolerance for the plane straddle test in the slicer.
pub const STRADDLE_EPSILON: f64 = 1e-7;

/// Below this length a normal is treated as the zero vector.
pub const ZERO_LENGTH_THRESHOLD: f64 = 1e-12;

/// Fraction of impact-biased Voronoi seeds drawn from the Gaussian around the
/// impact point; the remainder is uniform in the AABB.
pub const IMPACT_BIAS_FRACTION: f64 = 0.7;

/// Number of nearest neighbors whose half-spaces are applied when clipping a
/// Voronoi cell; farther seeds are implied by closer ones.
pub const VORONOI_NEIGHBOR_CULL_K: usize = 24;

/// Safety cap on flip iterations during constraint recovery, guarding against
/// a pathological point set cycling flips forever.
pub const MAX_CONSTRAINT_FLIPS: usize = 10_000;
