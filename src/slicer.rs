//! Mesh Slicer (§4.2): partitions a [`Fragment`] across a plane, producing
//! two new fragments with a triangulated cut face along the boundary.

use std::collections::HashMap;

use glam::{Vec2, Vec3};
use tracing::warn;

use crate::fragment::types::{EdgeConstraint, MeshVertex};
use crate::fragment::Fragment;
use crate::geom::{Plane, PlaneBasis, Side};
use crate::mesh::SubmeshId;
use crate::triangulate::triangulate;

/// Splits `fragment` across `plane`, returning `(top, bottom)`. Each output
/// gets a freshly triangulated cut face along the boundary the plane leaves
/// behind. Returns two empty fragments if the plane is degenerate or
/// `fragment` has fewer than three vertices (§4.2 error case).
pub fn slice(fragment: &Fragment, plane_normal: Vec3, plane_origin: Vec3, uv_scale: Vec2, uv_offset: Vec2) -> (Fragment, Fragment) {
    let Some(plane) = Plane::new(plane_normal, plane_origin) else {
        return (Fragment::new(), Fragment::new());
    };
    if fragment.vertex_count() < 3 {
        return (Fragment::new(), Fragment::new());
    }

    let sides: Vec<Side> = fragment.vertices().iter().map(|v| plane.side_of(v.position)).collect();

    let mut top = Fragment::new();
    let mut bottom = Fragment::new();

    for (i, vertex) in fragment.vertices().iter().enumerate() {
        match sides[i] {
            Side::Top => top.add_mapped_vertex(i as u32, *vertex),
            Side::Bottom => bottom.add_mapped_vertex(i as u32, *vertex),
        };
    }

    let basis = plane.basis();
    let mut edge_cache: HashMap<(u32, u32), MeshVertex> = HashMap::new();

    for tri in fragment.triangles(SubmeshId::Outer).chunks_exact(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let triangle = [a, b, c];
        let triangle_sides = [sides[a as usize], sides[b as usize], sides[c as usize]];

        if triangle_sides[0] == triangle_sides[1] && triangle_sides[1] == triangle_sides[2] {
            let dest = match triangle_sides[0] {
                Side::Top => &mut top,
                Side::Bottom => &mut bottom,
            };
            dest.add_mapped_triangle(a, b, c, SubmeshId::Outer);
            continue;
        }

        split_straddling_triangle(
            fragment,
            &plane,
            &basis,
            &triangle,
            &triangle_sides,
            &mut edge_cache,
            uv_scale,
            uv_offset,
            &mut top,
            &mut bottom,
        );
    }

    for (output, normal) in [(&mut top, plane.normal), (&mut bottom, -plane.normal)] {
        output.weld_cut_face_vertices();
        if !output.cut_vertices().is_empty() {
            let positions: Vec<Vec3> = output.cut_vertices().iter().map(|v| v.position).collect();
            let indices = triangulate(&positions, output.constraints(), normal);
            if indices.is_empty() && output.constraints().len() >= 3 {
                warn!("triangulation failed to recover a cut face, emitting fragment without one");
            }
            for chunk in indices.chunks_exact(3) {
                output.add_triangle(chunk[0], chunk[1], chunk[2], SubmeshId::CutFace);
            }
        }
        output.calculate_bounds();
    }

    (top, bottom)
}

#[allow(clippy::too_many_arguments)]
fn split_straddling_triangle(
    fragment: &Fragment,
    plane: &Plane,
    basis: &PlaneBasis,
    triangle: &[u32; 3],
    triangle_sides: &[Side; 3],
    edge_cache: &mut HashMap<(u32, u32), MeshVertex>,
    uv_scale: Vec2,
    uv_offset: Vec2,
    top: &mut Fragment,
    bottom: &mut Fragment,
) {
    // Find the lone minority vertex: the one whose side differs from both others.
    let minority_slot = (0..3)
        .find(|&i| triangle_sides[i] != triangle_sides[(i + 1) % 3] && triangle_sides[i] != triangle_sides[(i + 2) % 3])
        .expect("a straddling triangle has exactly one minority vertex");

    let m = triangle[minority_slot];
    let next = triangle[(minority_slot + 1) % 3];
    let prev = triangle[(minority_slot + 2) % 3];
    let minority_side = triangle_sides[minority_slot];
    let majority_side = triangle_sides[(minority_slot + 1) % 3];

    let x1 = edge_crossing(fragment, plane, m, next, edge_cache);
    let x2 = edge_crossing(fragment, plane, prev, m, edge_cache);

    let cut_uv = |position: Vec3| basis.project(plane.origin, position) * uv_scale + uv_offset;

    let minority_fragment = side_fragment(top, bottom, minority_side);
    let m_vi = minority_fragment.add_mapped_vertex(m, fragment.vertices()[m as usize]);
    let (x1_vi_minor, x1_ci_minor) = add_boundary_vertex(minority_fragment, &x1, plane, minority_side, cut_uv(x1.position));
    let (x2_vi_minor, x2_ci_minor) = add_boundary_vertex(minority_fragment, &x2, plane, minority_side, cut_uv(x2.position));
    minority_fragment.add_triangle(m_vi, x1_vi_minor, x2_vi_minor, SubmeshId::Outer);
    minority_fragment
        .constraints
        .push(EdgeConstraint::new(x1_ci_minor, x2_ci_minor));

    let majority_fragment = side_fragment(top, bottom, majority_side);
    let next_vi = majority_fragment.add_mapped_vertex(next, fragment.vertices()[next as usize]);
    let prev_vi = majority_fragment.add_mapped_vertex(prev, fragment.vertices()[prev as usize]);
    let (x1_vi_major, x1_ci_major) = add_boundary_vertex(majority_fragment, &x1, plane, majority_side, cut_uv(x1.position));
    let (x2_vi_major, x2_ci_major) = add_boundary_vertex(majority_fragment, &x2, plane, majority_side, cut_uv(x2.position));
    majority_fragment.add_triangle(x1_vi_major, next_vi, prev_vi, SubmeshId::Outer);
    majority_fragment.add_triangle(x1_vi_major, prev_vi, x2_vi_major, SubmeshId::Outer);
    majority_fragment
        .constraints
        .push(EdgeConstraint::new(x1_ci_major, x2_ci_major));
}

fn side_fragment<'a>(top: &'a mut Fragment, bottom: &'a mut Fragment, side: Side) -> &'a mut Fragment {
    match side {
        Side::Top => top,
        Side::Bottom => bottom,
    }
}

/// Adds a straddle-point boundary vertex under the given output side's plane
/// orientation and returns `(vertices index, cut_vertices index)`.
fn add_boundary_vertex(fragment: &mut Fragment, outer: &MeshVertex, plane: &Plane, side: Side, uv: Vec2) -> (u32, u32) {
    let flat_normal = match side {
        Side::Top => plane.normal,
        Side::Bottom => -plane.normal,
    };
    let cut_vertex = MeshVertex::new(outer.position, flat_normal, uv);
    fragment.add_cut_face_vertex(*outer, cut_vertex)
}

/// Interpolates the vertex at the point where `(u, w)` crosses `plane`,
/// computing it once per unordered source edge so both adjacent triangles
/// (and, transitively, both output sides) get bit-identical positions.
fn edge_crossing(fragment: &Fragment, plane: &Plane, u: u32, w: u32, cache: &mut HashMap<(u32, u32), MeshVertex>) -> MeshVertex {
    let key = if u <= w { (u, w) } else { (w, u) };
    if let Some(cached) = cache.get(&key) {
        return *cached;
    }
    let (lo, hi) = key;
    let a = &fragment.vertices()[lo as usize];
    let b = &fragment.vertices()[hi as usize];
    let t = plane
        .intersect_segment(a.position, b.position)
        .expect("a straddling edge is never parallel to the plane") as f32;
    let interpolated = MeshVertex::lerp(a, b, t.clamp(0.0, 1.0));
    cache.insert(key, interpolated);
    interpolated
}
