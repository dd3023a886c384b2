//! The seam between the diagram and the Delaunay triangulation it is derived from.
//!
//! The diagram only needs three flat buffers: the triangle corners, the opposite
//! half-edges and the convex hull loop. Any algorithm producing those (in the winding
//! described on [`Triangulation`]) can be plugged in through [`Triangulator`].

/// Sentinel for "no opposite half-edge" (the edge lies on the convex hull).
pub const EMPTY: usize = usize::MAX;

/// Next half-edge of the same triangle.
#[inline]
pub fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 { e - 2 } else { e + 1 }
}

/// Previous half-edge of the same triangle.
#[inline]
pub fn prev_halfedge(e: usize) -> usize {
    if e % 3 == 0 { e + 2 } else { e - 1 }
}

/// A half-edge triangulation of a planar point set.
///
/// Triangles wind clockwise in a y-up frame (counter-clockwise on a y-down screen), the
/// same convention `delaunator` uses. Half-edge `3t + k` runs from `triangles[3t + k]`
/// to `triangles[3t + (k + 1) % 3]`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Triangulation {
    pub triangles: Vec<usize>,
    pub halfedges: Vec<usize>,
    pub hull: Vec<usize>,
}

impl Triangulation {
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Flips the winding of every triangle if the first non-degenerate one winds the wrong way.
    ///
    /// Corners 1 and 2 of each triangle are swapped, half-edge `3t + k` becomes
    /// `3t + 2 - k` and the hull loop is reversed. Returns whether anything changed.
    pub fn normalize_winding(&mut self, points: &[f64]) -> bool {
        let reversed = self.triangles.chunks_exact(3).find_map(|t| {
            let cross = signed_area2(points, t[0], t[1], t[2]);
            if cross != 0.0 && cross.is_finite() { Some(cross > 0.0) } else { None }
        });
        if reversed != Some(true) {
            return false;
        }

        let remap = |h: usize| if h == EMPTY { EMPTY } else { h - h % 3 + (2 - h % 3) };
        for t in 0..self.triangle_count() {
            let base = 3 * t;
            self.triangles.swap(base + 1, base + 2);
            let (h0, h1, h2) = (self.halfedges[base], self.halfedges[base + 1], self.halfedges[base + 2]);
            self.halfedges[base] = remap(h2);
            self.halfedges[base + 1] = remap(h1);
            self.halfedges[base + 2] = remap(h0);
        }
        self.hull.reverse();
        true
    }
}

/// Twice the signed area of triangle `(a, b, c)`; positive when counter-clockwise in a y-up frame.
#[inline]
pub(crate) fn signed_area2(points: &[f64], a: usize, b: usize, c: usize) -> f64 {
    let (ax, ay) = (points[2 * a], points[2 * a + 1]);
    let (bx, by) = (points[2 * b], points[2 * b + 1]);
    let (cx, cy) = (points[2 * c], points[2 * c + 1]);
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

/// Trait for the external Delaunay triangulation step.
///
/// Implementations receive the flat coordinate buffer `[x0, y0, x1, y1, ...]` and return
/// a fresh triangulation of it. Coincident points must be left out of every triangle.
pub trait Triangulator: Send + Sync {
    fn triangulate(&mut self, points: &[f64]) -> Triangulation;
}

/// [`Triangulator`] backed by the `delaunator` crate.
#[derive(Clone, Debug, Default)]
pub struct Delaunator {
    scratch: Vec<delaunator::Point>,
}

impl Triangulator for Delaunator {
    fn triangulate(&mut self, points: &[f64]) -> Triangulation {
        if points.len() < 6 {
            return Triangulation {
                hull: (0..points.len() / 2).collect(),
                ..Triangulation::default()
            };
        }

        self.scratch.clear();
        self.scratch.extend(points.chunks_exact(2).map(|p| delaunator::Point { x: p[0], y: p[1] }));

        let result = delaunator::triangulate(&self.scratch);
        let halfedges = result
            .halfedges
            .into_iter()
            .map(|h| if h == delaunator::EMPTY { EMPTY } else { h })
            .collect();

        let mut triangulation = Triangulation {
            triangles: result.triangles,
            halfedges,
            hull: result.hull,
        };
        if triangulation.normalize_winding(points) {
            tracing::trace!("reversed triangle winding from delaunator");
        }
        triangulation
    }
}
