use crate::triangulation::{next_halfedge, prev_halfedge, Triangulation, EMPTY};

/// Per-site Voronoi cell topology derived from a half-edge triangulation.
///
/// Every site owns a range `[start, end)` of `edges`, listing the triangles around it
/// (its cell corners) counter-clockwise. Interior cells are closed loops whose last entry
/// repeats the first. Hull cells are open chains bounded by two rays stored in `vectors`
/// as `[v0x, v0y, vnx, vny]`: `v0` leaves the chain at its first corner, `vn` at its
/// last. Coincident sites, which no triangle references, get an empty range.
#[derive(Clone, Debug, Default)]
pub struct Topology {
    index: Vec<usize>,
    edges: Vec<usize>,
    vectors: Vec<f64>,
    // Outgoing hull half-edge of each site, scratch for `compute_rays`.
    hull_edges: Vec<usize>,
}

impl Topology {
    /// Walks the half-edges once per site and records the incident triangles.
    pub fn connect(&mut self, triangulation: &Triangulation, site_count: usize) {
        let Triangulation { triangles, halfedges, .. } = triangulation;
        let m = halfedges.len();

        self.index.clear();
        self.index.resize(site_count * 2, 0);
        self.edges.clear();
        self.edges.reserve(m + site_count);

        let mut malformed = 0usize;
        for i in 0..m {
            let t = triangles[i];
            if self.index[2 * t] != self.index[2 * t + 1] {
                continue;
            }
            let e0 = self.edges.len();
            self.index[2 * t] = e0;

            // Walk forward around `t` through its outgoing half-edges.
            let mut j = i;
            let mut closed = false;
            for _ in 0..m {
                self.edges.push(j / 3);
                let o = halfedges[j];
                if o == EMPTY {
                    break;
                }
                j = next_halfedge(o);
                if triangles[j] != t {
                    malformed += 1;
                    break;
                }
                if j == i {
                    closed = true;
                    break;
                }
            }

            if closed {
                self.edges.push(i / 3);
            } else {
                // Stopped early; walk backward from the start.
                let e1 = self.edges.len();
                j = i;
                for _ in 0..m {
                    let o = halfedges[prev_halfedge(j)];
                    if o == EMPTY || triangles[o] != t || o == i {
                        break;
                    }
                    j = o;
                    self.edges.push(j / 3);
                }
                if e1 < self.edges.len() {
                    self.edges[e0..e1].reverse();
                    self.edges[e0..].reverse();
                }
            }

            self.index[2 * t + 1] = self.edges.len();
        }

        if malformed > 0 {
            tracing::warn!(malformed, "triangulation is not traversal-consistent; some cells are partial");
        }
    }

    /// Computes the two outward rays of every hull site.
    ///
    /// For each hull edge, the ray runs from the circumcenter of the triangle on that edge
    /// towards the edge midpoint, flipped when necessary so that it points away from the
    /// triangle's third vertex. When the circumcenter sits on the midpoint, or is not
    /// finite, the edge normal is used instead.
    pub fn compute_rays(&mut self, triangulation: &Triangulation, points: &[f64], circumcenters: &[f64]) {
        let Triangulation { triangles, halfedges, hull } = triangulation;
        let site_count = points.len() / 2;

        self.vectors.clear();
        self.vectors.resize(site_count * 4, 0.0);
        self.hull_edges.clear();
        self.hull_edges.resize(site_count, EMPTY);

        for (e, &o) in halfedges.iter().enumerate() {
            if o == EMPTY {
                self.hull_edges[triangles[e]] = e;
            }
        }

        let n = hull.len();
        if n < 2 || triangles.is_empty() {
            return;
        }

        for k in 0..n {
            let a = hull[k];
            let b = hull[(k + 1) % n];
            let e = match self.hull_edge_between(triangles, a, b) {
                Some(e) => e,
                None => continue,
            };
            let from = triangles[e];
            let to = triangles[next_halfedge(e)];
            let third = triangles[prev_halfedge(e)];
            let ray = outward_ray(points, circumcenters, e / 3, from, to, third);

            self.vectors[4 * from + 2] = ray[0];
            self.vectors[4 * from + 3] = ray[1];
            self.vectors[4 * to] = ray[0];
            self.vectors[4 * to + 1] = ray[1];
        }
    }

    fn hull_edge_between(&self, triangles: &[usize], a: usize, b: usize) -> Option<usize> {
        let ab = self.hull_edges[a];
        if ab != EMPTY && triangles[next_halfedge(ab)] == b {
            return Some(ab);
        }
        let ba = self.hull_edges[b];
        if ba != EMPTY && triangles[next_halfedge(ba)] == a {
            return Some(ba);
        }
        None
    }

    /// The `[start, end)` range of site `i` in [`Topology::edges`].
    pub fn range(&self, i: usize) -> (usize, usize) {
        (self.index[2 * i], self.index[2 * i + 1])
    }

    /// Triangles around site `i`, in cell order.
    pub fn cell(&self, i: usize) -> &[usize] {
        let (start, end) = self.range(i);
        &self.edges[start..end]
    }

    pub fn is_degenerate(&self, i: usize) -> bool {
        let (start, end) = self.range(i);
        start == end
    }

    /// `[v0x, v0y, vnx, vny]` for site `i`; all zero for interior sites.
    pub fn rays(&self, i: usize) -> [f64; 4] {
        let v = &self.vectors[4 * i..4 * i + 4];
        [v[0], v[1], v[2], v[3]]
    }

    pub fn is_hull(&self, i: usize) -> bool {
        let v = &self.vectors[4 * i..4 * i + 4];
        v.iter().any(|&c| c != 0.0)
    }

    pub fn edges(&self) -> &[usize] {
        &self.edges
    }

    pub fn edges_capacity(&self) -> usize {
        self.edges.capacity()
    }

    pub fn vectors(&self) -> &[f64] {
        &self.vectors
    }
}

fn outward_ray(points: &[f64], circumcenters: &[f64], t: usize, from: usize, to: usize, third: usize) -> [f64; 2] {
    let (x0, y0) = (points[2 * from], points[2 * from + 1]);
    let (x1, y1) = (points[2 * to], points[2 * to + 1]);
    let (xw, yw) = (points[2 * third], points[2 * third + 1]);
    let (ex, ey) = (x1 - x0, y1 - y0);

    // Normal of the hull edge on the side away from the third vertex.
    let interior_left = ex * (yw - y0) - ey * (xw - x0) > 0.0;
    let (nx, ny) = if interior_left { (ey, -ex) } else { (-ey, ex) };

    let (cx, cy) = (circumcenters[2 * t], circumcenters[2 * t + 1]);
    let dx = (x0 + x1) / 2.0 - cx;
    let dy = (y0 + y1) / 2.0 - cy;
    if !dx.is_finite() || !dy.is_finite() || (dx == 0.0 && dy == 0.0) {
        return [nx, ny];
    }

    let k = if dx * nx + dy * ny < 0.0 { -1.0 } else { 1.0 };
    [k * dx, k * dy]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circumcenters::compute_circumcenters;
    use crate::triangulation::{Delaunator, Triangulator};

    fn build(points: &[f64]) -> (Triangulation, Topology) {
        let tri = Delaunator::default().triangulate(points);
        let mut centers = Vec::new();
        compute_circumcenters(points, &tri.triangles, &mut centers);
        let mut topo = Topology::default();
        topo.connect(&tri, points.len() / 2);
        topo.compute_rays(&tri, points, &centers);
        (tri, topo)
    }

    #[test]
    fn test_interior_site_is_closed() {
        // Square with a center point.
        let points = [0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0, 2.0, 2.0];
        let (_, topo) = build(&points);

        let cell = topo.cell(4);
        assert_eq!(cell.len(), 5);
        assert_eq!(cell.first(), cell.last());
        assert!(!topo.is_hull(4));
        assert_eq!(topo.rays(4), [0.0; 4]);

        for i in 0..4 {
            assert!(topo.is_hull(i));
            assert_eq!(topo.cell(i).len(), 2);
        }
    }

    #[test]
    fn test_rays_point_outward() {
        let points = [0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0, 2.0, 2.0];
        let (_, topo) = build(&points);

        for i in 0..4 {
            let [v0x, v0y, vnx, vny] = topo.rays(i);
            let (x, y) = (points[2 * i] - 2.0, points[2 * i + 1] - 2.0);
            // Both rays of a corner site point away from the square's center.
            assert!(v0x * x + v0y * y > 0.0, "site {i} v0 points inward");
            assert!(vnx * x + vny * y > 0.0, "site {i} vn points inward");
        }
    }

    #[test]
    fn test_right_triangle_ray_uses_edge_normal() {
        // The hypotenuse midpoint coincides with the circumcenter.
        let points = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
        let (_, topo) = build(&points);
        let [v0x, v0y, vnx, vny] = topo.rays(1);
        assert!(v0x != 0.0 || v0y != 0.0);
        assert!(vnx != 0.0 || vny != 0.0);
        // The hypotenuse ray of site 1 leaves towards (+1, +1).
        let along = |vx: f64, vy: f64| vx > 0.0 && vy > 0.0 && (vx - vy).abs() < 1e-12;
        assert!(along(v0x, v0y) || along(vnx, vny));
    }

    #[test]
    fn test_coincident_site_is_degenerate() {
        let points = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0];
        let (_, topo) = build(&points);
        assert!(topo.is_degenerate(3));
        assert!(!topo.is_degenerate(1));
    }

    #[test]
    fn test_chain_runs_from_incoming_to_outgoing_hull_edge() {
        let points = [0.0, 0.0, 4.0, 0.0, 4.0, 4.0, 0.0, 4.0, 2.0, 2.0];
        let (tri, topo) = build(&points);
        for i in 0..4 {
            let cell = topo.cell(i);
            let first = cell[0];
            let last = cell[cell.len() - 1];
            // The last triangle holds the hull edge leaving `i`.
            assert!((0..3).any(|k| {
                let e = 3 * last + k;
                tri.triangles[e] == i && tri.halfedges[e] == EMPTY
            }));
            // The first triangle holds the hull edge arriving at `i`.
            assert!((0..3).any(|k| {
                let e = 3 * first + k;
                tri.triangles[next_halfedge(e)] == i && tri.halfedges[e] == EMPTY
            }));
        }
    }

    #[test]
    fn test_malformed_triangulation_breaks_early() {
        // A single triangle whose half-edges claim a neighbor that does not match.
        let tri = Triangulation {
            triangles: vec![0, 1, 2],
            halfedges: vec![1, 0, EMPTY],
            hull: vec![0, 2, 1],
        };
        let mut topo = Topology::default();
        topo.connect(&tri, 3);
        for i in 0..3 {
            assert!(!topo.is_degenerate(i));
            assert!(topo.cell(i).len() <= 4);
        }
    }
}
