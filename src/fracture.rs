//! Fracture Coordinator (§4.7): the single public entry point tying the
//! slicer, triangulator, splitter and Voronoi clipper together.

use std::collections::VecDeque;

use glam::{Vec2, Vec3};
use tracing::debug;

use crate::components::split_connected_components;
use crate::fragment::Fragment;
use crate::mesh::Mesh;
use crate::rng::Rng;
use crate::slicer::slice;
use crate::voronoi::{clip_cells, generate_seeds, Axis, SeedOptions, VoronoiMode};

/// Bisection (`simple`) vs. Voronoi cell clipping (`voronoi`), §4.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Method {
    Simple,
    Voronoi,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct VoronoiOptions {
    pub mode: VoronoiMode,
    pub impact_point: Option<Vec3>,
    pub impact_radius: Option<f32>,
    pub grain_direction: Option<Vec3>,
    pub anisotropy: f32,
    pub seed_points: Option<Vec<Vec3>>,
}

impl Default for VoronoiOptions {
    fn default() -> Self {
        Self {
            mode: VoronoiMode::ThreeD,
            impact_point: None,
            impact_radius: None,
            grain_direction: None,
            anisotropy: 1.0,
            seed_points: None,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FractureOptions {
    pub method: Method,
    pub fragment_count: usize,
    /// Which world axes a simple-mode random cut plane's normal may have a
    /// nonzero component on.
    pub axes: [bool; 3],
    pub voronoi: VoronoiOptions,
    pub seed: u64,
    /// No-op: the splitter always runs after every slice/clip regardless of
    /// this flag, since its cost is near-linear. Kept on the struct so hosts
    /// migrating from an API where this was load-bearing don't lose a field.
    pub detect_isolated_fragments: bool,
    pub max_generation: u32,
}

impl Default for FractureOptions {
    fn default() -> Self {
        Self {
            method: Method::Simple,
            fragment_count: 2,
            axes: [true, true, true],
            voronoi: VoronoiOptions::default(),
            seed: 0,
            detect_isolated_fragments: false,
            max_generation: u32::MAX,
        }
    }
}

/// Fractures `mesh` fresh (generation 0). Convenience wrapper over
/// [`fracture_fragment`] for callers that only have host mesh buffers.
pub fn fracture(mesh: &Mesh, options: &FractureOptions) -> Vec<Fragment> {
    fracture_fragment(&Fragment::from_mesh(mesh), options)
}

/// Fractures an existing fragment, respecting its `generation` counter
/// (§4.6 refracture). Returns `[fragment.clone()]` unchanged, with a
/// `tracing::debug!`, if `fragment.generation() >= options.max_generation`.
pub fn fracture_fragment(fragment: &Fragment, options: &FractureOptions) -> Vec<Fragment> {
    if fragment.generation() >= options.max_generation {
        debug!(generation = fragment.generation(), "refracture rejected: generation ceiling reached");
        return vec![fragment.clone()];
    }

    let next_generation = fragment.generation() + 1;
    let mut results = match options.method {
        Method::Simple => simple_mode(fragment, options),
        Method::Voronoi => voronoi_mode(fragment, options),
    };

    for output in &mut results {
        output.set_generation(next_generation);
    }
    results
}

fn centroid(fragment: &Fragment) -> Vec3 {
    if fragment.is_empty() {
        return Vec3::ZERO;
    }
    let sum: Vec3 = fragment.vertices().iter().map(|v| v.position).sum();
    sum / fragment.vertex_count() as f32
}

fn simple_mode(fragment: &Fragment, options: &FractureOptions) -> Vec<Fragment> {
    let mut rng = Rng::from_seed(options.seed);
    let mut queue: VecDeque<Fragment> = VecDeque::new();
    queue.push_back(fragment.clone());

    // Bounds the number of bisection attempts so a fragment too small to
    // keep splitting (e.g. degenerate geometry) cannot spin forever short
    // of the requested count.
    let mut attempts = 0;
    let attempt_budget = options.fragment_count.max(1) * 8;

    while queue.len() < options.fragment_count && attempts < attempt_budget {
        attempts += 1;
        let Some(popped) = queue.pop_front() else {
            break;
        };
        if popped.vertex_count() < 3 {
            queue.push_back(popped);
            continue;
        }

        let normal = rng.unit_normal_on_axes(options.axes);
        let origin = centroid(&popped);
        let (top, bottom) = slice(&popped, normal, origin, Vec2::ONE, Vec2::ZERO);

        let mut produced = Vec::new();
        for half in [top, bottom] {
            if half.is_empty() {
                continue;
            }
            produced.extend(split_connected_components(&half));
        }

        if produced.is_empty() {
            queue.push_back(popped);
            continue;
        }
        for fragment in produced {
            queue.push_back(fragment);
        }
    }

    queue.into_iter().collect()
}

fn voronoi_mode(fragment: &Fragment, options: &FractureOptions) -> Vec<Fragment> {
    let mut rng = Rng::from_seed(options.seed);
    let seed_options = SeedOptions {
        count: options.fragment_count,
        bounds: fragment.bounds(),
        impact_point: options.voronoi.impact_point,
        impact_radius: options.voronoi.impact_radius,
        user_seeds: options.voronoi.seed_points.clone(),
    };
    let seeds = generate_seeds(&seed_options, &mut rng);
    let grain = options.voronoi.grain_direction.map(|g| (g, options.voronoi.anisotropy));

    let cells = clip_cells(fragment, &seeds, options.voronoi.mode, grain);
    cells.iter().flat_map(split_connected_components).collect()
}
