//! Constraint-edge recovery: flips triangulation edges that cross a required
//! boundary edge until the edge itself exists, then protects it from future
//! flips (§4.3 steps 4-5).

use std::collections::VecDeque;

use glam::Vec2;

use crate::constants::MAX_CONSTRAINT_FLIPS;
use crate::fragment::types::EdgeConstraint;

use super::delaunay::Triangulation;

fn orient2d(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    let (a, b, c) = (a.as_dvec2(), b.as_dvec2(), c.as_dvec2());
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper segment crossing: `p1-p2` and `p3-p4` cross in their interiors,
/// sharing no endpoint (collinear touches do not count as a crossing).
fn segments_cross(p1: Vec2, p2: Vec2, p3: Vec2, p4: Vec2) -> bool {
    let d1 = orient2d(p3, p4, p1);
    let d2 = orient2d(p3, p4, p2);
    let d3 = orient2d(p1, p2, p3);
    let d4 = orient2d(p1, p2, p4);
    (d1 > 0.0) != (d2 > 0.0) && (d3 > 0.0) != (d4 > 0.0) && d1 != 0.0 && d2 != 0.0 && d3 != 0.0 && d4 != 0.0
}

/// True if the quad formed by the two triangles bordering `edge` is convex,
/// i.e. flipping its diagonal yields two non-degenerate triangles. Shared
/// endpoints are treated as convex per the inclusive policy (§4.3).
fn is_convex(triangulation: &Triangulation, edge: (u32, u32), v3: u32, v4: u32) -> bool {
    let (p1, p2, p3, p4) = (
        triangulation.point(edge.0),
        triangulation.point(edge.1),
        triangulation.point(v3),
        triangulation.point(v4),
    );
    let side1 = orient2d(p3, p4, p1);
    let side2 = orient2d(p3, p4, p2);
    side1 >= 0.0 && side2 <= 0.0 || side1 <= 0.0 && side2 >= 0.0
}

/// Recovers every edge in `constraints` by flipping crossing edges (§4.3
/// step 4), then marks each recovered edge uncuttable (§4.3 step 5).
pub(super) fn recover(triangulation: &mut Triangulation, constraints: &[EdgeConstraint]) {
    for constraint in constraints {
        let (a, b) = (constraint.v1, constraint.v2);
        if a == b {
            continue;
        }
        recover_edge(triangulation, a, b);
        triangulation.protect(a, b);
    }
}

fn recover_edge(triangulation: &mut Triangulation, a: u32, b: u32) {
    if triangulation.has_edge(a, b) {
        return;
    }

    let (pa, pb) = (triangulation.point(a), triangulation.point(b));
    let mut queue: VecDeque<(u32, u32)> = VecDeque::new();
    for index in 0..triangulation.triangle_count() {
        let Some(tri) = triangulation.triangle_at(index) else {
            continue;
        };
        for &(x, y) in &[(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if x == a || x == b || y == a || y == b {
                continue;
            }
            if segments_cross(pa, pb, triangulation.point(x), triangulation.point(y)) {
                queue.push_back((x, y));
            }
        }
    }

    let mut iterations = 0;
    while let Some(edge) = queue.pop_front() {
        iterations += 1;
        if iterations > MAX_CONSTRAINT_FLIPS {
            tracing::warn!(a, b, "constraint recovery exceeded flip budget, leaving edge unflipped");
            break;
        }
        if triangulation.has_edge(a, b) {
            break;
        }
        let Some(far_index) = triangulation.triangle_containing_edge(edge.0, edge.1) else {
            continue;
        };
        let Some(tri) = triangulation.triangle_at(far_index) else {
            continue;
        };
        if !tri.contains(&edge.0) || !tri.contains(&edge.1) {
            // Edge topology changed since this crossing was queued; skip.
            continue;
        }

        let v3 = tri.iter().copied().find(|&v| v != edge.0 && v != edge.1);
        let Some(v3) = v3 else { continue };
        let Some(near_index) = triangulation.triangle_containing_edge(edge.1, edge.0) else {
            continue;
        };
        let Some(near_tri) = triangulation.triangle_at(near_index) else {
            continue;
        };
        let v4 = near_tri.iter().copied().find(|&v| v != edge.0 && v != edge.1);
        let Some(v4) = v4 else { continue };

        if !is_convex(triangulation, edge, v3, v4) {
            queue.push_back(edge);
            continue;
        }

        if let Some(new_diagonal) = triangulation.flip(edge) {
            if segments_cross(
                pa,
                pb,
                triangulation.point(new_diagonal.0),
                triangulation.point(new_diagonal.1),
            ) {
                queue.push_back(new_diagonal);
            }
        }
    }
}
