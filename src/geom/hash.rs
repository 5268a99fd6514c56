//! Spatial-hash keying for vertex welding.
//!
//! Grounded on the duplicate-vertex welding in the half-edge mesh builder
//! this crate descends from: positions are quantized onto a fixed grid so
//! welding is deterministic and order-independent, regardless of the order
//! vertices were inserted in.

use std::collections::HashMap;

use glam::Vec3;

use crate::constants::SPATIAL_HASH_TOLERANCE;

/// A quantized position, hashable and equality-comparable within
/// [`SPATIAL_HASH_TOLERANCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey([i64; 3]);

impl PositionKey {
    pub fn from_position(p: Vec3) -> Self {
        let inv = 1.0 / SPATIAL_HASH_TOLERANCE;
        Self([
            (p.x as f64 * inv).round() as i64,
            (p.y as f64 * inv).round() as i64,
            (p.z as f64 * inv).round() as i64,
        ])
    }
}

/// Maps quantized positions to the first vertex index seen at that position.
///
/// Used by both `Fragment::weld_cut_face_vertices` (welding within a cut
/// face) and the connected-components splitter (stitching outer vertices
/// slicing duplicated at triangle seams).
#[derive(Debug, Default)]
pub struct SpatialHash {
    canonical: HashMap<PositionKey, usize>,
}

impl SpatialHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the canonical index for `position`, inserting `index` as the
    /// canonical one if this is the first time the position is seen.
    pub fn canonicalize(&mut self, position: Vec3, index: usize) -> usize {
        *self
            .canonical
            .entry(PositionKey::from_position(position))
            .or_insert(index)
    }

    /// Returns the existing canonical index for `position`, if any, without
    /// registering `position` as canonical.
    pub fn get(&self, position: Vec3) -> Option<usize> {
        self.canonical.get(&PositionKey::from_position(position)).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_positions_hash_equal() {
        let a = PositionKey::from_position(Vec3::new(1.0, 2.0, 3.0));
        let b = PositionKey::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(a, b);
    }

    #[test]
    fn positions_within_tolerance_collapse() {
        let a = PositionKey::from_position(Vec3::new(1.0, 2.0, 3.0));
        let b = PositionKey::from_position(Vec3::new(1.0 + 1e-10, 2.0, 3.0));
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_positions_hash_different() {
        let a = PositionKey::from_position(Vec3::new(1.0, 2.0, 3.0));
        let b = PositionKey::from_position(Vec3::new(1.0, 2.0, 3.1));
        assert_ne!(a, b);
    }

    #[test]
    fn canonicalize_is_order_independent() {
        let mut hash = SpatialHash::new();
        let p = Vec3::new(5.0, 5.0, 5.0);
        assert_eq!(hash.canonicalize(p, 3), 3);
        assert_eq!(hash.canonicalize(p, 7), 3);
        assert_eq!(hash.get(p), Some(3));
    }
}
