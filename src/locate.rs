//! Nearest-site search over the Delaunay graph.
//!
//! A greedy walk that always moves to a strictly closer Delaunay neighbor ends at the
//! nearest site, since the triangulation contains the nearest-neighbor graph.

use crate::topology::Topology;

#[inline]
fn dist2(points: &[f64], i: usize, x: f64, y: f64) -> f64 {
    let dx = x - points[2 * i];
    let dy = y - points[2 * i + 1];
    dx * dx + dy * dy
}

/// Walks from `seed` to the site nearest `(x, y)` across triangle neighbors.
///
/// Sites that no triangle references are skipped, both as seeds and as results.
pub fn find_triangulated(points: &[f64], triangles: &[usize], topology: &Topology, x: f64, y: f64, seed: usize) -> Option<usize> {
    let n = points.len() / 2;
    if n == 0 || !x.is_finite() || !y.is_finite() {
        return None;
    }

    let seed = if seed < n { seed } else { 0 };
    let mut i = (0..n).map(|k| (seed + k) % n).find(|&k| !topology.is_degenerate(k))?;
    let mut di = dist2(points, i, x, y);

    loop {
        let mut c = i;
        let mut dc = di;
        for &t in topology.cell(i) {
            for &k in &triangles[3 * t..3 * t + 3] {
                if k == i {
                    continue;
                }
                let dk = dist2(points, k, x, y);
                if dk < dc {
                    dc = dk;
                    c = k;
                }
            }
        }
        if c == i {
            return Some(i);
        }
        i = c;
        di = dc;
    }
}

/// The sites of a fully collinear set, in their order along the line.
#[derive(Clone, Copy, Debug)]
pub struct CollinearOrder<'a> {
    points: &'a [f64],
    order: &'a [usize],
    rank: &'a [usize],
}

impl<'a> CollinearOrder<'a> {
    /// `rank` is the inverse permutation of `order`.
    pub fn new(points: &'a [f64], order: &'a [usize], rank: &'a [usize]) -> Self {
        Self { points, order, rank }
    }

    fn same(&self, a: usize, b: usize) -> bool {
        let (pa, pb) = (self.order[a], self.order[b]);
        self.points[2 * pa] == self.points[2 * pb] && self.points[2 * pa + 1] == self.points[2 * pb + 1]
    }

    /// First position of the group of coincident sites containing `pos`.
    fn group_start(&self, mut pos: usize) -> usize {
        while pos > 0 && self.same(pos - 1, pos) {
            pos -= 1;
        }
        pos
    }

    /// One past the last position of the group containing `pos`.
    fn group_end(&self, mut pos: usize) -> usize {
        while pos + 1 < self.order.len() && self.same(pos, pos + 1) {
            pos += 1;
        }
        pos + 1
    }

    /// The lowest-index site coincident with `i`.
    pub fn representative(&self, i: usize) -> usize {
        self.order[self.group_start(self.rank[i])]
    }

    /// The representatives of the distinct sites before and after `i`'s group.
    pub fn adjacent(&self, i: usize) -> (Option<usize>, Option<usize>) {
        let start = self.group_start(self.rank[i]);
        let end = self.group_end(self.rank[i]);
        let prev = (start > 0).then(|| self.order[self.group_start(start - 1)]);
        let next = (end < self.order.len()).then(|| self.order[end]);
        (prev, next)
    }

    /// Hill-climbs along the line from `seed` to the representative nearest `(x, y)`.
    pub fn find(&self, x: f64, y: f64, seed: usize) -> Option<usize> {
        let n = self.order.len();
        if n == 0 || !x.is_finite() || !y.is_finite() {
            return None;
        }

        let mut i = self.representative(if seed < n { seed } else { 0 });
        let mut di = dist2(self.points, i, x, y);
        loop {
            let (prev, next) = self.adjacent(i);
            let mut c = i;
            let mut dc = di;
            for k in [prev, next].into_iter().flatten() {
                let dk = dist2(self.points, k, x, y);
                if dk < dc {
                    dc = dk;
                    c = k;
                }
            }
            if c == i {
                return Some(i);
            }
            i = c;
            di = dc;
        }
    }
}
