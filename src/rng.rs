//! Deterministic, seedable randomness (§4.5, §9). Every RNG consumer in this
//! crate goes through here rather than `rand::thread_rng()`, so a fixed seed
//! reproduces a bit-identical sequence (P7) — the core never reads a wall
//! clock or other non-deterministic entropy source.

use glam::Vec3;
use rand::{Rng as _, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::geom::Bounds;

pub struct Rng(ChaCha8Rng);

impl Rng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Uniform point inside `bounds`, inclusive of its faces.
    pub fn uniform_in_bounds(&mut self, bounds: Bounds) -> Vec3 {
        Vec3::new(
            self.0.gen_range(bounds.min.x..=bounds.max.x),
            self.0.gen_range(bounds.min.y..=bounds.max.y),
            self.0.gen_range(bounds.min.z..=bounds.max.z),
        )
    }

    /// A unit vector with zero components on any axis not set in `mask`
    /// (§4.7 `axes` option), drawn uniformly over the remaining directions.
    pub fn unit_normal_on_axes(&mut self, mask: [bool; 3]) -> Vec3 {
        loop {
            let candidate = Vec3::new(
                if mask[0] { self.0.gen_range(-1.0..1.0) } else { 0.0 },
                if mask[1] { self.0.gen_range(-1.0..1.0) } else { 0.0 },
                if mask[2] { self.0.gen_range(-1.0..1.0) } else { 0.0 },
            );
            if candidate.length_squared() > 1e-6 {
                return candidate.normalize();
            }
        }
    }

    /// 3D Gaussian sample centered at `center`, independent per axis, via the
    /// Box-Muller transform.
    pub fn gaussian3(&mut self, center: Vec3, std_dev: f32) -> Vec3 {
        center
            + Vec3::new(
                self.gaussian1(std_dev),
                self.gaussian1(std_dev),
                self.gaussian1(std_dev),
            )
    }

    fn gaussian1(&mut self, std_dev: f32) -> f32 {
        let u1: f32 = self.0.gen_range(f32::EPSILON..1.0);
        let u2: f32 = self.0.gen_range(0.0..1.0);
        let radius = (-2.0 * u1.ln()).sqrt();
        radius * (std::f32::consts::TAU * u2).cos() * std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_is_deterministic() {
        let bounds = Bounds {
            min: Vec3::ZERO,
            max: Vec3::ONE,
        };
        let mut a = Rng::from_seed(42);
        let mut b = Rng::from_seed(42);
        for _ in 0..10 {
            assert_eq!(a.uniform_in_bounds(bounds), b.uniform_in_bounds(bounds));
        }
    }

    #[test]
    fn masked_axes_stay_zero() {
        let mut rng = Rng::from_seed(1);
        for _ in 0..20 {
            let n = rng.unit_normal_on_axes([true, false, false]);
            assert_eq!(n.y, 0.0);
            assert_eq!(n.z, 0.0);
        }
    }
}
