//! Voronoi Cell Clipper (§4.6): carves one fragment per seed by intersecting
//! the fragment with that seed's Voronoi cell, one bisector plane at a time.

use glam::{Vec2, Vec3};

use crate::constants::VORONOI_NEIGHBOR_CULL_K;
use crate::fragment::Fragment;
use crate::slicer::slice;

/// Which axis a 2.5D clip is prismatic along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VoronoiMode {
    ThreeD,
    /// Seeds and cells restricted to a plane; clip normals are projected
    /// perpendicular to `projection_axis` so cells become infinite prisms
    /// along it (§4.6 mode variants).
    TwoPointFiveD { projection_axis: Axis },
}

/// Clips `fragment` into up to `seeds.len()` fragments, one per non-empty
/// Voronoi cell. `grain` is `(direction, anisotropy)`; when set, bisector
/// normals are scaled along `direction` by `1 / anisotropy` before use,
/// stretching cells along the grain (§4.5 grain policy, §4.6 anisotropic
/// mode).
pub fn clip_cells(fragment: &Fragment, seeds: &[Vec3], mode: VoronoiMode, grain: Option<(Vec3, f32)>) -> Vec<Fragment> {
    let k = VORONOI_NEIGHBOR_CULL_K.min(seeds.len().saturating_sub(1));

    let mut outputs = Vec::with_capacity(seeds.len());
    for (i, &seed) in seeds.iter().enumerate() {
        let mut neighbors: Vec<(f32, usize)> = seeds
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .map(|(j, &other)| ((other - seed).length_squared(), j))
            .collect();
        neighbors.sort_by(|a, b| a.0.total_cmp(&b.0));
        neighbors.truncate(k);

        let mut current = fragment.clone();
        for (_, j) in neighbors {
            if current.is_empty() {
                break;
            }
            let other = seeds[j];
            let mut normal = seed - other;
            if let Some((direction, anisotropy)) = grain {
                normal = scale_along_grain(normal, direction, anisotropy);
            }
            if let VoronoiMode::TwoPointFiveD { projection_axis } = mode {
                normal -= projection_axis.unit() * normal.dot(projection_axis.unit());
            }
            if normal.length_squared() < 1e-12 {
                continue;
            }
            let origin = (seed + other) * 0.5;
            let (retained, _) = slice(&current, normal, origin, Vec2::ONE, Vec2::ZERO);
            current = retained;
        }

        if !current.is_empty() {
            outputs.push(current);
        }
    }
    outputs
}

/// Scales the component of `v` along `direction` by `1 / anisotropy`,
/// leaving the perpendicular component untouched (§4.5).
fn scale_along_grain(v: Vec3, direction: Vec3, anisotropy: f32) -> Vec3 {
    let g = direction.normalize_or_zero();
    if g == Vec3::ZERO || anisotropy <= 0.0 {
        return v;
    }
    let along = v.dot(g) * g;
    let perpendicular = v - along;
    perpendicular + along / anisotropy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;

    fn cube_fragment() -> Fragment {
        let positions = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let normals = vec![Vec3::Z; 8];
        let uvs = vec![Vec2::ZERO; 8];
        #[rustfmt::skip]
        let indices = vec![
            0, 1, 2, 0, 2, 3,
            4, 6, 5, 4, 7, 6,
            0, 4, 5, 0, 5, 1,
            1, 5, 6, 1, 6, 2,
            2, 6, 7, 2, 7, 3,
            3, 7, 4, 3, 4, 0,
        ];
        let mesh = Mesh::from_arrays(positions, normals, uvs, indices, Vec::new()).unwrap();
        Fragment::from_mesh(&mesh)
    }

    #[test]
    fn two_seeds_split_cube_into_two_nonempty_cells() {
        let fragment = cube_fragment();
        let seeds = vec![Vec3::new(-0.5, 0.0, 0.0), Vec3::new(0.5, 0.0, 0.0)];
        let cells = clip_cells(&fragment, &seeds, VoronoiMode::ThreeD, None);
        assert_eq!(cells.len(), 2);
        for cell in &cells {
            assert!(!cell.is_empty());
        }
    }

    #[test]
    fn empty_fragment_yields_no_cells() {
        let cells = clip_cells(&Fragment::new(), &[Vec3::ZERO, Vec3::X], VoronoiMode::ThreeD, None);
        assert!(cells.is_empty());
    }
}
