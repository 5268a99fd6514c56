//! Voronoi Seed Generator (§4.5): produces the seed points the cell clipper
//! carves fragments around.

use glam::Vec3;

use crate::constants::IMPACT_BIAS_FRACTION;
use crate::geom::Bounds;
use crate::rng::Rng;

/// Inputs to [`generate_seeds`]. `user_seeds`, when set, short-circuits
/// everything else (§4.5 policy: used verbatim).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SeedOptions {
    pub count: usize,
    pub bounds: Bounds,
    pub impact_point: Option<Vec3>,
    pub impact_radius: Option<f32>,
    pub user_seeds: Option<Vec<Vec3>>,
}

/// Produces `options.count` seeds, or `options.user_seeds` verbatim if set.
pub fn generate_seeds(options: &SeedOptions, rng: &mut Rng) -> Vec<Vec3> {
    if let Some(user_seeds) = &options.user_seeds {
        return user_seeds.clone();
    }

    match (options.impact_point, options.impact_radius) {
        (Some(point), Some(radius)) => generate_impact_biased(options.count, options.bounds, point, radius, rng),
        _ => (0..options.count).map(|_| rng.uniform_in_bounds(options.bounds)).collect(),
    }
}

fn generate_impact_biased(count: usize, bounds: Bounds, impact_point: Vec3, impact_radius: f32, rng: &mut Rng) -> Vec<Vec3> {
    let biased_count = (count as f64 * IMPACT_BIAS_FRACTION).round() as usize;
    (0..count)
        .map(|i| {
            let point = if i < biased_count {
                rng.gaussian3(impact_point, impact_radius / 2.0)
            } else {
                rng.uniform_in_bounds(bounds)
            };
            bounds.clamp_point(point)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_bounds() -> Bounds {
        Bounds {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        }
    }

    #[test]
    fn user_seeds_pass_through_verbatim() {
        let options = SeedOptions {
            count: 5,
            bounds: unit_bounds(),
            user_seeds: Some(vec![Vec3::ZERO, Vec3::ONE]),
            ..Default::default()
        };
        let mut rng = Rng::from_seed(0);
        assert_eq!(generate_seeds(&options, &mut rng), vec![Vec3::ZERO, Vec3::ONE]);
    }

    #[test]
    fn uniform_seeds_count_matches_request() {
        let options = SeedOptions {
            count: 16,
            bounds: unit_bounds(),
            ..Default::default()
        };
        let mut rng = Rng::from_seed(7);
        let seeds = generate_seeds(&options, &mut rng);
        assert_eq!(seeds.len(), 16);
        for seed in seeds {
            assert!(unit_bounds().contains(seed));
        }
    }

    #[test]
    fn impact_biased_seeds_stay_in_bounds() {
        let options = SeedOptions {
            count: 20,
            bounds: unit_bounds(),
            impact_point: Some(Vec3::ZERO),
            impact_radius: Some(0.5),
            ..Default::default()
        };
        let mut rng = Rng::from_seed(3);
        let seeds = generate_seeds(&options, &mut rng);
        assert_eq!(seeds.len(), 20);
        for seed in seeds {
            assert!(unit_bounds().contains(seed));
        }
    }

    #[test]
    fn same_seed_is_deterministic() {
        let options = SeedOptions {
            count: 10,
            bounds: unit_bounds(),
            impact_point: Some(Vec3::ZERO),
            impact_radius: Some(0.5),
            ..Default::default()
        };
        let a = generate_seeds(&options, &mut Rng::from_seed(99));
        let b = generate_seeds(&options, &mut Rng::from_seed(99));
        assert_eq!(a, b);
    }
}
