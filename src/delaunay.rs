use crate::bounds::BoundingBox;
use crate::error::VoronoiError;
use crate::render::RenderContext;
use crate::triangulation::{signed_area2, Delaunator, Triangulation, Triangulator, EMPTY};
use crate::voronoi::Voronoi;

/// Triangles whose twice-area is below this fraction of the squared extent of the sites
/// are treated as flat when checking for collinear input.
const COLLINEAR_EPSILON: f64 = 1e-10;

/// A point set together with its current Delaunay triangulation.
///
/// The coordinate buffer is owned here and may be rewritten in place through
/// [`Delaunay::points_mut`]; [`Delaunay::update`] (or [`Voronoi::update`]) brings the
/// triangulation back in sync.
pub struct Delaunay<T: Triangulator = Delaunator> {
    points: Vec<f64>,
    triangulation: Triangulation,
    /// Site indices sorted by `(x, y)` when every site lies on one line.
    collinear: Option<Vec<usize>>,
    triangulator: T,
}

impl Delaunay<Delaunator> {
    /// Triangulates the flat buffer `[x0, y0, x1, y1, ...]`.
    pub fn new(points: Vec<f64>) -> Result<Self, VoronoiError> {
        Self::with_triangulator(points, Delaunator::default())
    }

    /// Triangulates a list of `[x, y]` pairs.
    pub fn from_points(points: &[[f64; 2]]) -> Self {
        let flat = points.iter().flat_map(|p| [p[0], p[1]]).collect();
        Self::assemble(flat, Delaunator::default())
    }
}

impl<T: Triangulator> Delaunay<T> {
    pub fn with_triangulator(points: Vec<f64>, triangulator: T) -> Result<Self, VoronoiError> {
        if points.len() % 2 != 0 {
            return Err(VoronoiError::CoordinateLength(points.len()));
        }
        Ok(Self::assemble(points, triangulator))
    }

    fn assemble(points: Vec<f64>, triangulator: T) -> Self {
        let mut delaunay = Self {
            points,
            triangulation: Triangulation::default(),
            collinear: None,
            triangulator,
        };
        delaunay.update();
        delaunay
    }

    /// Re-triangulates the current coordinates and rebuilds the collinear marker.
    pub fn update(&mut self) -> &mut Self {
        self.triangulation = self.triangulator.triangulate(&self.points);

        let tolerance = COLLINEAR_EPSILON * squared_extent(&self.points);
        let flat = self.triangulation.triangles.chunks_exact(3).all(|t| {
            signed_area2(&self.points, t[0], t[1], t[2]).abs() <= tolerance
        });

        if flat && !self.points.is_empty() {
            let mut order = self.collinear.take().unwrap_or_default();
            order.clear();
            order.extend(0..self.len());
            let points = &self.points;
            order.sort_by(|&i, &j| {
                points[2 * i]
                    .total_cmp(&points[2 * j])
                    .then(points[2 * i + 1].total_cmp(&points[2 * j + 1]))
            });
            self.triangulation.triangles.clear();
            self.triangulation.halfedges.clear();
            self.collinear = Some(order);
        } else {
            self.collinear = None;
        }

        tracing::debug!(
            sites = self.len(),
            triangles = self.triangulation.triangle_count(),
            hull = self.triangulation.hull.len(),
            collinear = self.collinear.is_some(),
            "triangulated"
        );
        self
    }

    /// Number of sites.
    pub fn len(&self) -> usize {
        self.points.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Mutable access to the coordinates; call `update` afterwards.
    pub fn points_mut(&mut self) -> &mut [f64] {
        &mut self.points
    }

    pub fn point(&self, i: usize) -> [f64; 2] {
        [self.points[2 * i], self.points[2 * i + 1]]
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.triangulation
    }

    pub fn triangles(&self) -> &[usize] {
        &self.triangulation.triangles
    }

    pub fn halfedges(&self) -> &[usize] {
        &self.triangulation.halfedges
    }

    pub fn hull(&self) -> &[usize] {
        &self.triangulation.hull
    }

    /// Sites sorted along their common line, if the input is fully collinear.
    pub fn collinear(&self) -> Option<&[usize]> {
        self.collinear.as_deref()
    }

    /// Draws every triangulation edge once, then the hull.
    pub fn render<C: RenderContext>(&self, ctx: &mut C) {
        let Triangulation { triangles, halfedges, .. } = &self.triangulation;
        for (e, &o) in halfedges.iter().enumerate() {
            if o == EMPTY || o < e {
                continue;
            }
            let [x0, y0] = self.point(triangles[e]);
            let [x1, y1] = self.point(triangles[o]);
            ctx.move_to(x0, y0);
            ctx.line_to(x1, y1);
        }
        self.render_hull(ctx);
    }

    /// Draws the hull loop as one segment per hull edge.
    pub fn render_hull<C: RenderContext>(&self, ctx: &mut C) {
        let hull = &self.triangulation.hull;
        for (k, &i) in hull.iter().enumerate() {
            let [x0, y0] = self.point(i);
            let [x1, y1] = self.point(hull[(k + 1) % hull.len()]);
            ctx.move_to(x0, y0);
            ctx.line_to(x1, y1);
        }
    }

    /// Draws triangle `t` as a closed path; returns whether it exists.
    pub fn render_triangle<C: RenderContext>(&self, t: usize, ctx: &mut C) -> bool {
        let Some(corners) = self.triangulation.triangles.get(3 * t..3 * t + 3) else {
            return false;
        };
        let [x0, y0] = self.point(corners[0]);
        ctx.move_to(x0, y0);
        for &i in &corners[1..] {
            let [x, y] = self.point(i);
            ctx.line_to(x, y);
        }
        ctx.close_path();
        true
    }

    /// Builds the Voronoi diagram clipped to `[xmin, ymin, xmax, ymax]`.
    pub fn voronoi(self, extent: [f64; 4]) -> Result<Voronoi<T>, VoronoiError> {
        Ok(Voronoi::new(self, BoundingBox::from_extent(extent)?))
    }
}

/// Squared diagonal of the bounding box of the finite sites.
fn squared_extent(points: &[f64]) -> f64 {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in points.chunks_exact(2) {
        if p[0].is_finite() && p[1].is_finite() {
            min = [min[0].min(p[0]), min[1].min(p[1])];
            max = [max[0].max(p[0]), max[1].max(p[1])];
        }
    }
    if min[0] > max[0] {
        return 0.0;
    }
    let (w, h) = (max[0] - min[0], max[1] - min[1]);
    w * w + h * h
}
