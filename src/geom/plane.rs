//! Oriented planes, the on-plane tie-break, and the 2D projection basis the
//! triangulator and cut-face UV generator both need.

use glam::{Vec2, Vec3};

use crate::constants::{STRADDLE_EPSILON, ZERO_LENGTH_THRESHOLD};

/// An oriented plane: `normal` points toward the "top" slice, `origin` is any
/// point on the plane.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: Vec3,
    pub origin: Vec3,
}

/// Which side of a plane a vertex falls on.
///
/// On-plane vertices are folded into `Top` — this is the single mandated
/// tie-break (§4.2 policy) and every caller of [`Side::classify`] inherits it
/// automatically rather than re-implementing the epsilon test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
}

impl Plane {
    /// `None` if the normal is degenerate (zero length): the slicer and
    /// clipper treat this as "no plane" and return empty output.
    pub fn new(normal: Vec3, origin: Vec3) -> Option<Self> {
        if (normal.length_squared() as f64) < ZERO_LENGTH_THRESHOLD {
            return None;
        }
        Some(Self {
            normal: normal.normalize(),
            origin,
        })
    }

    /// Signed distance of `point` from the plane, positive on the top side.
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        (point - self.origin).dot(self.normal) as f64
    }

    pub fn side_of(&self, point: Vec3) -> Side {
        Side::classify(self.signed_distance(point))
    }

    /// Parametric intersection of segment `a -> b` with the plane: returns
    /// `s` in `[0, 1]` solving `(a + s*(b-a) - origin) . normal == 0`, or
    /// `None` if the segment is parallel to the plane.
    pub fn intersect_segment(&self, a: Vec3, b: Vec3) -> Option<f64> {
        let da = self.signed_distance(a);
        let db = self.signed_distance(b);
        let denom = da - db;
        if denom.abs() < ZERO_LENGTH_THRESHOLD {
            return None;
        }
        Some(da / denom)
    }

    /// An orthonormal (u, v) basis spanning the plane, with `w == normal`.
    pub fn basis(&self) -> PlaneBasis {
        PlaneBasis::from_normal(self.normal)
    }
}

impl Side {
    pub fn classify(signed_distance: f64) -> Side {
        if signed_distance >= -STRADDLE_EPSILON {
            Side::Top
        } else {
            Side::Bottom
        }
    }
}

/// Orthonormal basis for projecting 3D points lying near a plane into 2D.
#[derive(Debug, Clone, Copy)]
pub struct PlaneBasis {
    pub u: Vec3,
    pub v: Vec3,
    pub w: Vec3,
}

impl PlaneBasis {
    /// Builds an arbitrary but deterministic (u, v) pair perpendicular to
    /// `normal`. No particular rotation is mandated; only orthonormality
    /// and determinism matter to callers.
    pub fn from_normal(normal: Vec3) -> Self {
        let w = normal.normalize();
        // Pick whichever world axis is least parallel to `w` to avoid a
        // degenerate cross product.
        let helper = if w.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
        let u = helper.cross(w).normalize();
        let v = w.cross(u);
        Self { u, v, w }
    }

    /// Projects `point` into this basis's (u, v) plane, relative to `origin`.
    pub fn project(&self, origin: Vec3, point: Vec3) -> Vec2 {
        let d = point - origin;
        Vec2::new(d.dot(self.u), d.dot(self.v))
    }
}
