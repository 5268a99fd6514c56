//! Incremental Delaunay triangulation via Lawson edge flips: the point-set
//! half of the constrained triangulator (§4.3 steps 1-3, 6).

use std::collections::{HashMap, HashSet};

use glam::Vec2;

/// A 2D incremental Delaunay triangulation, built over `points` plus three
/// synthetic super-triangle vertices appended past the real points.
pub(super) struct Triangulation {
    points: Vec<Vec2>,
    real_point_count: usize,
    triangles: Vec<[u32; 3]>,
    alive: Vec<bool>,
    /// Directed edge (v1, v2) -> owning triangle index. A triangle `[a,b,c]`
    /// registers `(a,b)`, `(b,c)`, `(c,a)`.
    edge_owner: HashMap<(u32, u32), usize>,
    pub(super) protected: HashSet<(u32, u32)>,
}

fn orient2d(a: Vec2, b: Vec2, c: Vec2) -> f64 {
    let (a, b, c) = (a.as_dvec2(), b.as_dvec2(), c.as_dvec2());
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// True if `d` lies strictly inside the circumcircle of CCW triangle `(a,b,c)`.
fn in_circle(a: Vec2, b: Vec2, c: Vec2, d: Vec2) -> bool {
    let (a, b, c, d) = (a.as_dvec2(), b.as_dvec2(), c.as_dvec2(), d.as_dvec2());
    let (ax, ay) = (a.x - d.x, a.y - d.y);
    let (bx, by) = (b.x - d.x, b.y - d.y);
    let (cx, cy) = (c.x - d.x, c.y - d.y);
    let det = (ax * ax + ay * ay) * (bx * cy - cx * by)
        - (bx * bx + by * by) * (ax * cy - cx * ay)
        + (cx * cx + cy * cy) * (ax * by - bx * ay);
    det > 0.0
}

fn sorted_pair(a: u32, b: u32) -> (u32, u32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl Triangulation {
    /// Builds the super-triangle enclosing every point, at least 10x the
    /// bounding box diagonal away (§4.3 step 2).
    pub(super) fn new(points: Vec<Vec2>) -> Self {
        let real_point_count = points.len();
        let mut min = points[0];
        let mut max = points[0];
        for &p in &points {
            min = min.min(p);
            max = max.max(p);
        }
        let diagonal = (max - min).length().max(1.0);
        let margin = diagonal * 10.0;
        let center = (min + max) * 0.5;

        let mut points = points;
        let s0 = center + Vec2::new(-margin, -margin);
        let s1 = center + Vec2::new(margin, -margin);
        let s2 = center + Vec2::new(0.0, margin * 1.5);
        points.push(s0);
        points.push(s1);
        points.push(s2);

        let base = real_point_count as u32;
        let mut triangulation = Self {
            points,
            real_point_count,
            triangles: Vec::new(),
            alive: Vec::new(),
            edge_owner: HashMap::new(),
            protected: HashSet::new(),
        };
        triangulation.add_triangle([base, base + 1, base + 2]);
        triangulation
    }

    fn add_triangle(&mut self, tri: [u32; 3]) -> usize {
        let index = self.triangles.len();
        self.edge_owner.insert((tri[0], tri[1]), index);
        self.edge_owner.insert((tri[1], tri[2]), index);
        self.edge_owner.insert((tri[2], tri[0]), index);
        self.triangles.push(tri);
        self.alive.push(true);
        index
    }

    fn kill_triangle(&mut self, index: usize) {
        let tri = self.triangles[index];
        for edge in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if self.edge_owner.get(&edge) == Some(&index) {
                self.edge_owner.remove(&edge);
            }
        }
        self.alive[index] = false;
    }

    pub(super) fn point(&self, index: u32) -> Vec2 {
        self.points[index as usize]
    }

    pub(super) fn protect(&mut self, a: u32, b: u32) {
        self.protected.insert(sorted_pair(a, b));
    }

    /// Locates the alive triangle containing `p`, inclusive of its boundary
    /// (§4.3 edge-case policy: "on/right" is inclusive).
    fn locate(&self, p: Vec2) -> usize {
        for (index, tri) in self.triangles.iter().enumerate() {
            if !self.alive[index] {
                continue;
            }
            let [a, b, c] = *tri;
            let (a, b, c) = (self.point(a), self.point(b), self.point(c));
            if orient2d(a, b, p) >= 0.0 && orient2d(b, c, p) >= 0.0 && orient2d(c, a, p) >= 0.0 {
                return index;
            }
        }
        unreachable!("super-triangle must contain every inserted point")
    }

    /// Inserts point `p_index` (already present in `self.points`), splitting
    /// its enclosing triangle into three and restoring the Delaunay property
    /// via a Lawson flip stack (§4.3 step 3).
    pub(super) fn insert_point(&mut self, p_index: u32) {
        let p = self.point(p_index);
        let host = self.locate(p);
        let [a, b, c] = self.triangles[host];
        self.kill_triangle(host);

        let t1 = self.add_triangle([a, b, p_index]);
        let t2 = self.add_triangle([b, c, p_index]);
        let t3 = self.add_triangle([c, a, p_index]);
        let _ = (t1, t2, t3);

        let mut stack = vec![(a, b), (b, c), (c, a)];
        while let Some(edge) = stack.pop() {
            self.legalize_edge(edge, p_index, &mut stack);
        }
    }

    /// If the triangle on the far side of `edge` (oriented away from
    /// `p_index`) would violate the in-circle test, flips it and pushes the
    /// two new far edges back onto the stack for re-checking.
    fn legalize_edge(&mut self, edge: (u32, u32), p_index: u32, stack: &mut Vec<(u32, u32)>) {
        if self.protected.contains(&sorted_pair(edge.0, edge.1)) {
            return;
        }
        let Some(&near_index) = self.edge_owner.get(&(edge.0, edge.1)) else {
            return;
        };
        let Some(&far_index) = self.edge_owner.get(&(edge.1, edge.0)) else {
            return;
        };
        if !self.alive[near_index] || !self.alive[far_index] {
            return;
        }
        let far_tri = self.triangles[far_index];
        let opposite = far_tri
            .iter()
            .copied()
            .find(|&v| v != edge.0 && v != edge.1)
            .expect("triangle must have a third vertex");

        let (v1, v2, v3, v4) = (edge.0, edge.1, p_index, opposite);
        if !in_circle(self.point(v1), self.point(v2), self.point(v3), self.point(v4)) {
            return;
        }

        self.kill_triangle(near_index);
        self.kill_triangle(far_index);
        self.add_triangle([v3, v1, v4]);
        self.add_triangle([v4, v2, v3]);

        stack.push((v1, v4));
        stack.push((v4, v2));
    }

    /// Directed-edge lookup used by constraint recovery to test whether an
    /// edge already exists in either orientation.
    pub(super) fn has_edge(&self, a: u32, b: u32) -> bool {
        self.edge_owner.contains_key(&(a, b)) || self.edge_owner.contains_key(&(b, a))
    }

    pub(super) fn triangle_at(&self, index: usize) -> Option<[u32; 3]> {
        if self.alive[index] {
            Some(self.triangles[index])
        } else {
            None
        }
    }

    pub(super) fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub(super) fn triangle_containing_edge(&self, a: u32, b: u32) -> Option<usize> {
        self.edge_owner.get(&(a, b)).or_else(|| self.edge_owner.get(&(b, a))).copied()
    }

    /// Flips the shared diagonal of the two triangles bordering `edge`,
    /// unconditionally (used by constraint recovery, §4.3 step 4). Returns
    /// the new diagonal `(v3, v4)` on success.
    pub(super) fn flip(&mut self, edge: (u32, u32)) -> Option<(u32, u32)> {
        let near_index = *self.edge_owner.get(&(edge.0, edge.1))?;
        let far_index = *self.edge_owner.get(&(edge.1, edge.0))?;
        let near_tri = self.triangles[near_index];
        let far_tri = self.triangles[far_index];
        let v3 = near_tri.iter().copied().find(|&v| v != edge.0 && v != edge.1)?;
        let v4 = far_tri.iter().copied().find(|&v| v != edge.0 && v != edge.1)?;

        self.kill_triangle(near_index);
        self.kill_triangle(far_index);
        self.add_triangle([v3, edge.0, v4]);
        self.add_triangle([v4, edge.1, v3]);
        Some((v3, v4))
    }

    /// Removes every triangle reachable from a super-triangle vertex without
    /// crossing a protected edge, plus any remaining triangle touching a
    /// super vertex, and returns the flattened surviving index list (§4.3
    /// step 6).
    pub(super) fn finish(mut self) -> Vec<u32> {
        let super_base = self.real_point_count as u32;
        let is_super = |v: u32| v >= super_base;

        let mut exterior = vec![false; self.triangles.len()];
        let mut queue: Vec<usize> = (0..self.triangles.len())
            .filter(|&i| self.alive[i] && self.triangles[i].iter().any(|&v| is_super(v)))
            .collect();
        for &i in &queue {
            exterior[i] = true;
        }

        while let Some(index) = queue.pop() {
            let tri = self.triangles[index];
            let edges = [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])];
            for (a, b) in edges {
                if self.protected.contains(&sorted_pair(a, b)) {
                    continue;
                }
                if let Some(&neighbor) = self.edge_owner.get(&(b, a)) {
                    if self.alive[neighbor] && !exterior[neighbor] {
                        exterior[neighbor] = true;
                        queue.push(neighbor);
                    }
                }
            }
        }

        let mut out = Vec::new();
        for (index, tri) in self.triangles.iter().enumerate() {
            if !self.alive[index] || exterior[index] {
                continue;
            }
            if tri.iter().any(|&v| is_super(v)) {
                continue;
            }
            out.extend_from_slice(tri);
        }
        out
    }
}
