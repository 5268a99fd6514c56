//! Constrained Delaunay triangulation of a planar point set (§4.3): the cut
//! face triangulator the slicer and Voronoi clipper both call to fill the
//! boundary loop left behind by a cut.

mod constraints;
mod delaunay;

use glam::Vec3;

use crate::fragment::types::EdgeConstraint;
use crate::geom::PlaneBasis;

use delaunay::Triangulation;

/// Triangulates `points` (assumed near-coplanar, with unit normal `normal`),
/// preserving every edge named in `constraints`. Returns a flat triangle
/// index list into `points`; empty if fewer than 3 points are given.
///
/// Triangles are wound so their 2D signed area in the `(u, v)` basis built
/// from `normal` is positive, i.e. they face `normal` — callers wanting the
/// opposite winding (the bottom slice) pass `-normal`.
pub fn triangulate(points: &[Vec3], constraints: &[EdgeConstraint], normal: Vec3) -> Vec<u32> {
    if points.len() < 3 {
        return Vec::new();
    }

    let basis = PlaneBasis::from_normal(normal);
    let origin = points[0];
    let projected = points.iter().map(|p| basis.project(origin, *p)).collect();

    let mut triangulation = Triangulation::new(projected);
    for index in 0..points.len() as u32 {
        triangulation.insert_point(index);
    }

    constraints::recover(&mut triangulation, constraints);
    triangulation.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn fewer_than_three_points_is_empty() {
        let points = vec![Vec3::ZERO, Vec3::X];
        assert!(triangulate(&points, &[], Vec3::Z).is_empty());
    }

    #[test]
    fn triangle_triangulates_to_itself() {
        let points = vec![Vec3::ZERO, Vec3::X, Vec3::Y];
        let indices = triangulate(&points, &[], Vec3::Z);
        assert_eq!(indices.len(), 3);
    }

    #[test]
    fn square_produces_two_triangles() {
        let indices = triangulate(&square(), &[], Vec3::Z);
        assert_eq!(indices.len() / 3, 2);
    }

    #[test]
    fn star_convex_with_center_produces_expected_count() {
        // A regular hexagon boundary plus a center point: property P4 expects
        // 3*(n-1) triangles for n points total (n-1 boundary + 1 center).
        let mut points = Vec::new();
        for i in 0..6 {
            let angle = std::f32::consts::TAU * i as f32 / 6.0;
            points.push(Vec3::new(angle.cos(), angle.sin(), 0.0));
        }
        points.push(Vec3::ZERO);
        let indices = triangulate(&points, &[], Vec3::Z);
        assert_eq!(indices.len() / 3, 3 * (points.len() - 1));
    }

    #[test]
    fn diagonal_constraint_is_preserved() {
        let points = square();
        let constraints = vec![EdgeConstraint::new(0, 2)];
        let indices = triangulate(&points, &constraints, Vec3::Z);
        let mut found = false;
        for tri in indices.chunks(3) {
            if tri.contains(&0) && tri.contains(&2) {
                found = true;
            }
        }
        assert!(found, "constrained diagonal must appear in the output triangles");
    }

    /// Mirrors `delaunay::orient2d` but reads straight off `Vec3::x`/`y`; valid
    /// here because every fixture above lies in the z=0 plane with
    /// `normal = Vec3::Z`, and `PlaneBasis::from_normal` projects that case
    /// through a pure rotation, which preserves orientation sign.
    fn orient2d(a: Vec3, b: Vec3, c: Vec3) -> f32 {
        (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
    }

    #[test]
    fn constraint_recovery_flip_preserves_winding() {
        let points = square();
        let constraints = vec![EdgeConstraint::new(0, 2)];
        let indices = triangulate(&points, &constraints, Vec3::Z);
        assert!(!indices.is_empty());
        for tri in indices.chunks(3) {
            let (p0, p1, p2) = (points[tri[0] as usize], points[tri[1] as usize], points[tri[2] as usize]);
            assert!(orient2d(p0, p1, p2) > 0.0, "triangle {tri:?} is wound clockwise");
        }
    }

    #[test]
    fn scenario_star_hexagon_around_a_leading_center_vertex() {
        // points = {(0,0,0)} ++ ring: the center sits at index 0, not the end.
        let mut points = vec![Vec3::ZERO];
        for k in 0..6 {
            let angle = std::f32::consts::TAU * k as f32 / 6.0;
            points.push(Vec3::new(angle.cos(), angle.sin(), 0.0));
        }
        let indices = triangulate(&points, &[], Vec3::Z);
        assert_eq!(indices.len() / 3, 18);
        for tri in indices.chunks(3) {
            assert!(tri.contains(&0), "triangle {tri:?} must touch the center vertex");
            let ring: Vec<i32> = tri.iter().copied().filter(|&v| v != 0).map(|v| v as i32 - 1).collect();
            assert_eq!(ring.len(), 2);
            let diff = (ring[0] - ring[1]).rem_euclid(6);
            assert!(diff == 1 || diff == 5, "ring vertices {ring:?} must be adjacent on the hexagon");
        }
    }

    #[test]
    fn scenario_two_disjoint_coplanar_quads() {
        let points = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.5, 0.0, 0.5),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.5, 0.0, 0.5),
        ];
        let constraints = vec![
            EdgeConstraint::new(0, 1),
            EdgeConstraint::new(1, 2),
            EdgeConstraint::new(2, 3),
            EdgeConstraint::new(3, 0),
            EdgeConstraint::new(4, 5),
            EdgeConstraint::new(5, 6),
            EdgeConstraint::new(6, 7),
            EdgeConstraint::new(7, 4),
        ];
        let indices = triangulate(&points, &constraints, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(indices.len() / 3, 4);

        // Vertex 2 sits exactly on segment (1,3) and vertex 7 exactly on
        // segment (4,6); the only non-degenerate triangulation of each quad
        // connects that collinear midpoint to the one corner not on its line.
        for tri in indices.chunks(3) {
            let in_first_quad = tri.iter().all(|&v| v < 4);
            let in_second_quad = tri.iter().all(|&v| v >= 4);
            assert!(in_first_quad || in_second_quad, "triangle {tri:?} must not mix the two disjoint quads");
        }
        let shares_edge = |a: u32, b: u32| indices.chunks(3).filter(|tri| tri.contains(&a) && tri.contains(&b)).count();
        assert_eq!(shares_edge(0, 2), 2, "quad one's two triangles must share the 0-2 diagonal");
        assert_eq!(shares_edge(5, 7), 2, "quad two's two triangles must share the 5-7 diagonal");
    }

    proptest::proptest! {
        /// P4: a star-convex polygon (regular n-gon boundary plus its
        /// center) always triangulates to exactly `3*(n-1)` triangles,
        /// for any n in the tested range.
        #[test]
        fn star_convex_polygon_produces_3n_minus_3_triangles(n in 3u32..20) {
            let mut points = Vec::new();
            for i in 0..n {
                let angle = std::f32::consts::TAU * i as f32 / n as f32;
                points.push(Vec3::new(angle.cos(), angle.sin(), 0.0));
            }
            points.push(Vec3::ZERO);
            let indices = triangulate(&points, &[], Vec3::Z);
            proptest::prop_assert_eq!(indices.len() / 3, 3 * (points.len() - 1));
        }
    }
}
