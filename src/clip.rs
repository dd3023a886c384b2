//! Clipping of raw Voronoi cells against the bounding rectangle.
//!
//! Cells arrive as flat corner chains `[x0, y0, x1, y1, ...]`, counter-clockwise in a
//! y-up frame. Bounded cells are closed loops; hull cells are open chains with a ray at
//! each end. The output is an open, deduplicated vertex list, or `None` when the cell
//! does not reach into the rectangle.

use crate::bounds::{BoundingBox, CODE_XMAX, CODE_XMIN, CODE_YMAX, CODE_YMIN};

/// The unclipped region of one cell, used to gate corner insertion.
#[derive(Clone, Copy, Debug)]
pub enum CellRegion<'a> {
    Finite(&'a [f64]),
    Infinite {
        points: &'a [f64],
        v0: [f64; 2],
        vn: [f64; 2],
    },
}

impl CellRegion<'_> {
    pub fn points(&self) -> &[f64] {
        match self {
            CellRegion::Finite(points) => points,
            CellRegion::Infinite { points, .. } => points,
        }
    }

    /// Whether `(x, y)` lies inside the region or on its boundary.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match *self {
            CellRegion::Finite(points) => contains_finite(points, x, y),
            CellRegion::Infinite { points, v0, vn } => contains_infinite(points, v0, vn, x, y),
        }
    }
}

fn contains_finite(points: &[f64], x: f64, y: f64) -> bool {
    let n = points.len();
    if n < 2 {
        return false;
    }
    let (mut x1, mut y1) = (points[n - 2], points[n - 1]);
    for p in points.chunks_exact(2) {
        let (x0, y0) = (x1, y1);
        (x1, y1) = (p[0], p[1]);
        if (x1 - x0) * (y - y0) < (y1 - y0) * (x - x0) {
            return false;
        }
    }
    true
}

fn contains_infinite(points: &[f64], v0: [f64; 2], vn: [f64; 2], x: f64, y: f64) -> bool {
    let n = points.len();
    if n < 2 {
        return false;
    }
    let (mut x1, mut y1) = (points[0], points[1]);
    // Incoming ray, from infinity to the first corner.
    if (x1 + v0[0] - x) * (y1 - y) < (y1 + v0[1] - y) * (x1 - x) {
        return false;
    }
    for p in points[2..].chunks_exact(2) {
        let (x0, y0) = (x1, y1);
        (x1, y1) = (p[0], p[1]);
        if (x0 - x) * (y1 - y) < (y0 - y) * (x1 - x) {
            return false;
        }
    }
    // Outgoing ray.
    (x1 - x) * (y1 + vn[1] - y) >= (y1 - y) * (x1 + vn[0] - x)
}

/// Clips a cell to `bounds`, then simplifies and deduplicates the result.
pub fn clip_cell(bounds: &BoundingBox, region: CellRegion<'_>) -> Option<Vec<f64>> {
    let mut clipped = match region {
        CellRegion::Finite(points) => clip_finite(bounds, points, &region),
        CellRegion::Infinite { points, v0, vn } => clip_infinite(bounds, points, v0, vn, &region),
    }?;
    simplify(&mut clipped);
    dedupe(&mut clipped).then_some(clipped)
}

/// Sutherland–Hodgman pass over a closed chain, splicing in rectangle corners that
/// `region` owns whenever the kept boundary moves from one side of the box to another.
pub fn clip_finite(bounds: &BoundingBox, points: &[f64], region: &CellRegion<'_>) -> Option<Vec<f64>> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let mut out: Vec<f64> = Vec::with_capacity(n + 8);
    let (mut x1, mut y1) = (points[n - 2], points[n - 1]);
    let mut c1 = bounds.region_code(x1, y1);
    let mut e1 = 0u8;

    for p in points.chunks_exact(2) {
        let (x0, y0, c0) = (x1, y1, c1);
        (x1, y1) = (p[0], p[1]);
        c1 = bounds.region_code(x1, y1);

        if c0 == 0 && c1 == 0 {
            e1 = 0;
            out.extend([x1, y1]);
            continue;
        }

        let Some([sx0, sy0, sx1, sy1]) = bounds.clip_segment(x0, y0, x1, y1, c0, c1) else {
            continue;
        };
        if c0 != 0 {
            let e0 = e1;
            e1 = bounds.edge_code(sx0, sy0);
            if e0 != 0 && e1 != 0 {
                let at = out.len();
                insert_corners(bounds, region, e0, e1, &mut out, at);
            }
            out.extend([sx0, sy0]);
        }
        let e0 = e1;
        e1 = bounds.edge_code(sx1, sy1);
        if e0 != 0 && e1 != 0 {
            let at = out.len();
            insert_corners(bounds, region, e0, e1, &mut out, at);
        }
        out.extend([sx1, sy1]);
    }

    if out.is_empty() {
        let [cx, cy] = bounds.center();
        return region.contains(cx, cy).then(|| bounds.corners());
    }

    let e0 = e1;
    e1 = bounds.edge_code(out[0], out[1]);
    if e0 != 0 && e1 != 0 {
        let at = out.len();
        insert_corners(bounds, region, e0, e1, &mut out, at);
    }
    Some(out)
}

/// Extends an open chain to the box along its two rays, clips it, then fills in the
/// corners between consecutive boundary points.
pub fn clip_infinite(
    bounds: &BoundingBox,
    points: &[f64],
    v0: [f64; 2],
    vn: [f64; 2],
    region: &CellRegion<'_>,
) -> Option<Vec<f64>> {
    let n = points.len();
    if n < 2 {
        return None;
    }

    let mut chain = Vec::with_capacity(n + 4);
    if let Some(p) = bounds.project(points[0], points[1], v0[0], v0[1]) {
        chain.extend(p);
    }
    chain.extend_from_slice(points);
    if let Some(p) = bounds.project(points[n - 2], points[n - 1], vn[0], vn[1]) {
        chain.extend(p);
    }

    let mut out = clip_finite(bounds, &chain, region)?;

    let len = out.len();
    let mut c1 = bounds.edge_code(out[len - 2], out[len - 1]);
    let mut j = 0;
    while j < out.len() {
        let c0 = c1;
        c1 = bounds.edge_code(out[j], out[j + 1]);
        if c0 != 0 && c1 != 0 {
            j = insert_corners(bounds, region, c0, c1, &mut out, j);
        }
        j += 2;
    }
    Some(out)
}

/// Walks the box boundary counter-clockwise from edge code `e0` to `e1`, inserting each
/// corner passed on the way at `at` when the cell owns it and it is not already there.
/// Returns the position after the inserted corners.
fn insert_corners(bounds: &BoundingBox, region: &CellRegion<'_>, mut e0: u8, e1: u8, out: &mut Vec<f64>, mut at: usize) -> usize {
    const BOTTOM_LEFT: u8 = CODE_XMIN | CODE_YMIN;
    const BOTTOM_RIGHT: u8 = CODE_XMAX | CODE_YMIN;
    const TOP_RIGHT: u8 = CODE_XMAX | CODE_YMAX;
    const TOP_LEFT: u8 = CODE_XMIN | CODE_YMAX;

    while e0 != e1 {
        let (x, y) = match e0 {
            BOTTOM_LEFT => {
                e0 = CODE_YMIN;
                continue;
            }
            CODE_YMIN => {
                e0 = BOTTOM_RIGHT;
                (bounds.max[0], bounds.min[1])
            }
            BOTTOM_RIGHT => {
                e0 = CODE_XMAX;
                continue;
            }
            CODE_XMAX => {
                e0 = TOP_RIGHT;
                (bounds.max[0], bounds.max[1])
            }
            TOP_RIGHT => {
                e0 = CODE_YMAX;
                continue;
            }
            CODE_YMAX => {
                e0 = TOP_LEFT;
                (bounds.min[0], bounds.max[1])
            }
            TOP_LEFT => {
                e0 = CODE_XMIN;
                continue;
            }
            CODE_XMIN => {
                e0 = BOTTOM_LEFT;
                (bounds.min[0], bounds.min[1])
            }
            _ => break,
        };

        let present = out.get(at) == Some(&x) && out.get(at + 1) == Some(&y);
        if !present && region.contains(x, y) {
            out.splice(at..at, [x, y]);
            at += 2;
        }
    }
    at
}

/// Drops the middle vertex of every three consecutive vertices sharing an x or a y.
pub fn simplify(vertices: &mut Vec<f64>) {
    let mut i = 0;
    while i < vertices.len() && vertices.len() > 4 {
        let n = vertices.len();
        let j = (i + 2) % n;
        let k = (i + 4) % n;
        let same_x = vertices[i] == vertices[j] && vertices[j] == vertices[k];
        let same_y = vertices[i + 1] == vertices[j + 1] && vertices[j + 1] == vertices[k + 1];
        if same_x || same_y {
            vertices.drain(j..j + 2);
            if j < i {
                i -= 2;
            }
        } else {
            i += 2;
        }
    }
}

/// Removes repeated vertices, including a last vertex equal to the first.
/// Returns whether at least three vertices remain.
pub fn dedupe(vertices: &mut Vec<f64>) -> bool {
    let mut write = 0;
    for read in (0..vertices.len()).step_by(2) {
        let (x, y) = (vertices[read], vertices[read + 1]);
        if write > 0 && vertices[write - 2] == x && vertices[write - 1] == y {
            continue;
        }
        vertices[write] = x;
        vertices[write + 1] = y;
        write += 2;
    }
    vertices.truncate(write);

    while vertices.len() > 2 && vertices[0] == vertices[vertices.len() - 2] && vertices[1] == vertices[vertices.len() - 1] {
        vertices.truncate(vertices.len() - 2);
    }
    vertices.len() >= 6
}
