use crate::bounds::BoundingBox;
use crate::circumcenters::compute_circumcenters;
use crate::clip::{clip_cell, CellRegion};
use crate::delaunay::Delaunay;
use crate::locate::{find_triangulated, CollinearOrder};
use crate::polygon::{polygon_area, polygon_centroid, strip_cell};
use crate::render::RenderContext;
use crate::topology::Topology;
use crate::triangulation::{Delaunator, Triangulator, EMPTY};
use rayon::prelude::*;

/// The Voronoi diagram of a [`Delaunay`] triangulation, clipped to a rectangle.
///
/// Cells are never stored. Every query derives the cell of a site from the shared
/// topology and circumcenter buffers, which [`Voronoi::update`] refills in place after
/// the sites move.
pub struct Voronoi<T: Triangulator = Delaunator> {
    delaunay: Delaunay<T>,
    bounds: BoundingBox,
    topology: Topology,
    circumcenters: Vec<f64>,
    // Position of each site in the collinear order; empty unless the sites are collinear.
    rank: Vec<usize>,
}

impl<T: Triangulator> Voronoi<T> {
    pub fn new(delaunay: Delaunay<T>, bounds: BoundingBox) -> Self {
        let mut voronoi = Self {
            delaunay,
            bounds,
            topology: Topology::default(),
            circumcenters: Vec::new(),
            rank: Vec::new(),
        };
        voronoi.rebuild();
        voronoi
    }

    /// Clips to the default `[0, 0, 960, 500]` rectangle.
    pub fn with_default_bounds(delaunay: Delaunay<T>) -> Self {
        Self::new(delaunay, BoundingBox::default())
    }

    /// Re-triangulates the current coordinates and recomputes every derived buffer.
    pub fn update(&mut self) -> &mut Self {
        self.delaunay.update();
        self.rebuild();
        self
    }

    fn rebuild(&mut self) {
        let before = (self.circumcenters.as_ptr(), self.topology.edges().as_ptr());
        let n = self.delaunay.len();
        let triangulation = self.delaunay.triangulation();
        let points = self.delaunay.points();

        compute_circumcenters(points, &triangulation.triangles, &mut self.circumcenters);
        self.topology.connect(triangulation, n);
        self.topology.compute_rays(triangulation, points, &self.circumcenters);

        self.rank.clear();
        if let Some(order) = self.delaunay.collinear() {
            self.rank.resize(n, 0);
            for (pos, &i) in order.iter().enumerate() {
                self.rank[i] = pos;
            }
        }

        let after = (self.circumcenters.as_ptr(), self.topology.edges().as_ptr());
        if before != after {
            tracing::trace!(
                circumcenters = self.circumcenters.capacity(),
                edges = self.topology.edges_capacity(),
                "voronoi buffers reallocated"
            );
        }
        tracing::debug!(
            sites = n,
            corners = self.circumcenters.len() / 2,
            edges = self.topology.edges().len(),
            collinear = !self.rank.is_empty(),
            "voronoi rebuilt"
        );
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    pub fn delaunay(&self) -> &Delaunay<T> {
        &self.delaunay
    }

    /// Mutable access to the site coordinates; call [`Voronoi::update`] afterwards.
    pub fn points_mut(&mut self) -> &mut [f64] {
        self.delaunay.points_mut()
    }

    pub fn circumcenters(&self) -> &[f64] {
        &self.circumcenters
    }

    /// Ray directions `[v0x, v0y, vnx, vny]` per site.
    pub fn vectors(&self) -> &[f64] {
        self.topology.vectors()
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.delaunay.len()
    }

    pub fn is_empty(&self) -> bool {
        self.delaunay.is_empty()
    }

    fn collinear(&self) -> Option<CollinearOrder<'_>> {
        let order = self.delaunay.collinear()?;
        Some(CollinearOrder::new(self.delaunay.points(), order, &self.rank))
    }

    /// Finite circumcenters around site `i`, in cell order.
    fn raw_cell(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.len() || self.topology.is_degenerate(i) {
            return None;
        }
        let mut points = Vec::with_capacity(self.topology.cell(i).len() * 2);
        for &t in self.topology.cell(i) {
            let (x, y) = (self.circumcenters[2 * t], self.circumcenters[2 * t + 1]);
            if x.is_finite() && y.is_finite() {
                points.extend([x, y]);
            }
        }
        (!points.is_empty()).then_some(points)
    }

    fn region<'a>(&self, i: usize, points: &'a [f64]) -> CellRegion<'a> {
        if self.topology.is_hull(i) {
            let [v0x, v0y, vnx, vny] = self.topology.rays(i);
            CellRegion::Infinite { points, v0: [v0x, v0y], vn: [vnx, vny] }
        } else {
            CellRegion::Finite(points)
        }
    }

    /// The clipped cell of site `i` as an open flat vertex list.
    fn clip(&self, i: usize) -> Option<Vec<f64>> {
        if i >= self.len() {
            return None;
        }
        if let Some(line) = self.collinear() {
            if line.representative(i) != i {
                return None;
            }
            let (prev, next) = line.adjacent(i);
            return strip_cell(
                &self.bounds,
                self.delaunay.point(i),
                prev.map(|j| self.delaunay.point(j)),
                next.map(|j| self.delaunay.point(j)),
            );
        }

        let points = self.raw_cell(i)?;
        clip_cell(&self.bounds, self.region(i, &points))
    }

    /// The clipped cell of site `i`, closed by repeating its first vertex.
    pub fn cell_polygon(&self, i: usize) -> Option<Vec<[f64; 2]>> {
        let flat = self.clip(i)?;
        let mut polygon: Vec<[f64; 2]> = flat.chunks_exact(2).map(|p| [p[0], p[1]]).collect();
        polygon.push(polygon[0]);
        Some(polygon)
    }

    /// Every non-empty cell with its site index.
    pub fn cell_polygons(&self) -> impl Iterator<Item = (Vec<[f64; 2]>, usize)> + '_ {
        (0..self.len()).filter_map(move |i| self.cell_polygon(i).map(|polygon| (polygon, i)))
    }

    /// Whether `(x, y)` lies in the unclipped cell of site `i`.
    pub fn contains(&self, i: usize, x: f64, y: f64) -> bool {
        if i >= self.len() || !x.is_finite() || !y.is_finite() {
            return false;
        }
        if self.collinear().is_some() {
            return self.find_from(x, y, i) == Some(i);
        }
        match self.raw_cell(i) {
            Some(points) => self.region(i, &points).contains(x, y),
            None => false,
        }
    }

    /// Sites adjacent to `i` in the triangulation, without repeats.
    fn delaunay_neighbors(&self, i: usize) -> Vec<usize> {
        if let Some(line) = self.collinear() {
            if line.representative(i) != i {
                return Vec::new();
            }
            let (prev, next) = line.adjacent(i);
            return [prev, next].into_iter().flatten().collect();
        }

        let triangles = self.delaunay.triangles();
        let mut out = Vec::new();
        for &t in self.topology.cell(i) {
            for &k in &triangles[3 * t..3 * t + 3] {
                if k != i && !out.contains(&k) {
                    out.push(k);
                }
            }
        }
        out
    }

    /// Sites whose clipped cells share an edge with the clipped cell of `i`.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let cell = self.clip(i);
        let candidates = if cell.is_some() { self.delaunay_neighbors(i) } else { Vec::new() };
        let collinear = self.collinear().is_some();

        candidates.into_iter().filter(move |&j| {
            let (Some(ci), Some(cj)) = (cell.as_deref(), self.clip(j)) else {
                return false;
            };
            collinear || shares_edge(ci, &cj)
        })
    }

    /// Index of the site nearest `(x, y)`.
    pub fn find(&self, x: f64, y: f64) -> Option<usize> {
        self.find_from(x, y, 0)
    }

    /// Like [`Voronoi::find`], starting the walk at site `seed`.
    pub fn find_from(&self, x: f64, y: f64, seed: usize) -> Option<usize> {
        if let Some(line) = self.collinear() {
            return line.find(x, y, seed);
        }
        find_triangulated(self.delaunay.points(), self.delaunay.triangles(), &self.topology, x, y, seed)
    }

    /// Draws every clipped Voronoi edge, including the hull rays.
    pub fn render<C: RenderContext>(&self, ctx: &mut C) {
        if let Some(line) = self.collinear() {
            for i in 0..self.len() {
                if line.representative(i) != i {
                    continue;
                }
                if let (_, Some(j)) = line.adjacent(i) {
                    self.render_bisector(self.delaunay.point(i), self.delaunay.point(j), ctx);
                }
            }
            return;
        }
        if self.delaunay.hull().len() <= 1 {
            return;
        }

        let triangles = self.delaunay.triangles();
        let cc = &self.circumcenters;
        for (e, &o) in self.delaunay.halfedges().iter().enumerate() {
            let ti = e / 3;
            if o == EMPTY {
                let [_, _, vx, vy] = self.topology.rays(triangles[e]);
                let (x, y) = (cc[2 * ti], cc[2 * ti + 1]);
                if let Some([px, py]) = self.bounds.project(x, y, vx, vy) {
                    self.render_segment(x, y, px, py, ctx);
                }
            } else if o > e {
                let tj = o / 3;
                self.render_segment(cc[2 * ti], cc[2 * ti + 1], cc[2 * tj], cc[2 * tj + 1], ctx);
            }
        }
    }

    fn render_segment<C: RenderContext>(&self, x0: f64, y0: f64, x1: f64, y1: f64, ctx: &mut C) {
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return;
        }
        let c0 = self.bounds.region_code(x0, y0);
        let c1 = self.bounds.region_code(x1, y1);
        if c0 == 0 && c1 == 0 {
            ctx.move_to(x0, y0);
            ctx.line_to(x1, y1);
        } else if let Some([sx0, sy0, sx1, sy1]) = self.bounds.clip_segment(x0, y0, x1, y1, c0, c1) {
            ctx.move_to(sx0, sy0);
            ctx.line_to(sx1, sy1);
        }
    }

    fn render_bisector<C: RenderContext>(&self, a: [f64; 2], b: [f64; 2], ctx: &mut C) {
        let (dx, dy) = (-(b[1] - a[1]), b[0] - a[0]);
        let len = dx.hypot(dy);
        if len == 0.0 {
            return;
        }
        let mid = [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0];
        let [cx, cy] = self.bounds.center();
        // Long enough that both ends fall outside the box.
        let reach = self.bounds.width() + self.bounds.height() + (mid[0] - cx).hypot(mid[1] - cy) + 1.0;
        let (ux, uy) = (dx / len * reach, dy / len * reach);
        self.render_segment(mid[0] - ux, mid[1] - uy, mid[0] + ux, mid[1] + uy, ctx);
    }

    pub fn render_bounds<C: RenderContext>(&self, ctx: &mut C) {
        ctx.rect(self.bounds.min[0], self.bounds.min[1], self.bounds.width(), self.bounds.height());
    }

    /// Draws the clipped cell of site `i`; returns whether there was one.
    pub fn render_cell<C: RenderContext>(&self, i: usize, ctx: &mut C) -> bool {
        let Some(flat) = self.clip(i) else {
            return false;
        };
        ctx.move_to(flat[0], flat[1]);
        for p in flat[2..].chunks_exact(2) {
            ctx.line_to(p[0], p[1]);
        }
        ctx.close_path();
        true
    }

    /// Area of the clipped cell of site `i`; zero when it has none.
    pub fn cell_area(&self, i: usize) -> f64 {
        self.clip(i).map_or(0.0, |flat| polygon_area(&flat))
    }

    pub fn cell_centroid(&self, i: usize) -> Option<[f64; 2]> {
        self.clip(i).and_then(|flat| polygon_centroid(&flat))
    }

    /// Moves every site to the centroid of its clipped cell (one Lloyd iteration).
    pub fn relax(&mut self) -> &mut Self {
        let centroids: Vec<Option<[f64; 2]>> = (0..self.len()).into_par_iter().map(|i| self.cell_centroid(i)).collect();

        let points = self.delaunay.points_mut();
        for (i, centroid) in centroids.into_iter().enumerate() {
            if let Some([x, y]) = centroid {
                points[2 * i] = x;
                points[2 * i + 1] = y;
            }
        }
        self.update()
    }
}

/// Whether two open polygons have an edge in common, traversed in opposite directions.
fn shares_edge(a: &[f64], b: &[f64]) -> bool {
    let (la, lb) = (a.len(), b.len());
    for ai in (0..la).step_by(2) {
        let an = (ai + 2) % la;
        for bi in (0..lb).step_by(2) {
            let bp = (bi + lb - 2) % lb;
            if a[ai] == b[bi] && a[ai + 1] == b[bi + 1] && a[an] == b[bp] && a[an + 1] == b[bp + 1] {
                return true;
            }
        }
    }
    false
}
