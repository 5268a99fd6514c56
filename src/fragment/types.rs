//! Value types owned by a [`super::Fragment`]: vertices and the constraint
//! edges the triangulator must preserve.

use glam::{Vec2, Vec3};

/// A single mesh vertex: position, normal and UV, value-identical to another
/// iff their positions collide on the spatial hash (§3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl MeshVertex {
    pub fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self { position, normal, uv }
    }

    /// Linearly interpolates position and UV, spherically-normalized-lerps
    /// the normal (§4.2 step 3).
    pub fn lerp(a: &MeshVertex, b: &MeshVertex, t: f32) -> MeshVertex {
        let normal = a.normal.lerp(b.normal, t).normalize_or_zero();
        MeshVertex {
            position: a.position.lerp(b.position, t),
            normal,
            uv: a.uv.lerp(b.uv, t),
        }
    }
}

/// An unordered pair of vertex indices that the triangulator must retain as
/// an edge. Two constraints naming the same pair (in either order) are
/// equal.
#[derive(Debug, Clone, Copy, Eq)]
pub struct EdgeConstraint {
    pub v1: u32,
    pub v2: u32,
}

impl EdgeConstraint {
    pub fn new(v1: u32, v2: u32) -> Self {
        Self { v1, v2 }
    }

    pub fn contains(&self, v: u32) -> bool {
        self.v1 == v || self.v2 == v
    }

    /// The other endpoint, given one of the two.
    pub fn other(&self, v: u32) -> Option<u32> {
        if self.v1 == v {
            Some(self.v2)
        } else if self.v2 == v {
            Some(self.v1)
        } else {
            None
        }
    }
}

impl PartialEq for EdgeConstraint {
    fn eq(&self, other: &Self) -> bool {
        (self.v1 == other.v1 && self.v2 == other.v2) || (self.v1 == other.v2 && self.v2 == other.v1)
    }
}

impl std::hash::Hash for EdgeConstraint {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        let (lo, hi) = if self.v1 <= self.v2 {
            (self.v1, self.v2)
        } else {
            (self.v2, self.v1)
        };
        lo.hash(state);
        hi.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constraint_equality_is_unordered() {
        assert_eq!(EdgeConstraint::new(1, 2), EdgeConstraint::new(2, 1));
        assert_ne!(EdgeConstraint::new(1, 2), EdgeConstraint::new(1, 3));
    }

    #[test]
    fn other_endpoint() {
        let c = EdgeConstraint::new(4, 9);
        assert_eq!(c.other(4), Some(9));
        assert_eq!(c.other(9), Some(4));
        assert_eq!(c.other(1), None);
    }
}
