use crate::bounds::BoundingBox;

/// Vertices within this fraction of the polygon's extent from a clipping line count as on it.
const PLANE_EPSILON: f64 = 1e-9;

/// Area of an open polygon `[x, y, x, y, ...]`, by the shoelace formula.
pub fn polygon_area(vertices: &[f64]) -> f64 {
    let n = vertices.len() / 2;
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i * 2] * vertices[j * 2 + 1] - vertices[j * 2] * vertices[i * 2 + 1];
    }
    (area * 0.5).abs()
}

/// Centroid of an open polygon, or `None` for a polygon without area.
pub fn polygon_centroid(vertices: &[f64]) -> Option<[f64; 2]> {
    let n = vertices.len() / 2;
    if n < 3 {
        return None;
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    let mut area = 0.0;

    for i in 0..n {
        let j = (i + 1) % n;
        let xi = vertices[i * 2];
        let yi = vertices[i * 2 + 1];
        let xj = vertices[j * 2];
        let yj = vertices[j * 2 + 1];

        let cross = xi * yj - xj * yi;
        area += cross;
        cx += (xi + xj) * cross;
        cy += (yi + yj) * cross;
    }

    if area == 0.0 || !area.is_finite() {
        return None;
    }

    let factor = 1.0 / (3.0 * area);
    Some([cx * factor, cy * factor])
}

/// Keeps the part of `vertices` where `(v - point) · normal <= 0`.
///
/// `scratch` receives the clipped polygon and is then swapped in, so repeated clips reuse
/// both allocations. Returns whether the polygon changed.
pub fn clip_half_plane(vertices: &mut Vec<f64>, scratch: &mut Vec<f64>, point: [f64; 2], normal: [f64; 2]) -> bool {
    let n = vertices.len() / 2;
    if n < 3 {
        return false;
    }

    let dist = |i: usize| (vertices[i * 2] - point[0]) * normal[0] + (vertices[i * 2 + 1] - point[1]) * normal[1];
    let eps = PLANE_EPSILON * normal[0].hypot(normal[1]) * extent(vertices);

    let mut all_inside = true;
    let mut all_outside = true;
    for i in 0..n {
        let d = dist(i);
        if d > eps {
            all_inside = false;
        } else if d < -eps {
            all_outside = false;
        }
    }

    if all_inside {
        return false;
    }
    if all_outside {
        vertices.clear();
        return true;
    }

    scratch.clear();
    for i in 0..n {
        let j = (i + 1) % n;
        let d_i = dist(i);
        let d_j = dist(j);
        let (xi, yi) = (vertices[i * 2], vertices[i * 2 + 1]);
        let (xj, yj) = (vertices[j * 2], vertices[j * 2 + 1]);

        if d_i <= eps {
            scratch.extend([xi, yi]);
            if d_j > eps {
                // Leaving.
                let t = d_i / (d_i - d_j);
                scratch.extend([xi + t * (xj - xi), yi + t * (yj - yi)]);
            }
        } else if d_j <= eps {
            // Entering.
            let t = d_i / (d_i - d_j);
            scratch.extend([xi + t * (xj - xi), yi + t * (yj - yi)]);
        }
    }

    std::mem::swap(vertices, scratch);
    true
}

/// Diagonal of the bounding box of `vertices`.
fn extent(vertices: &[f64]) -> f64 {
    let mut min = [f64::INFINITY; 2];
    let mut max = [f64::NEG_INFINITY; 2];
    for p in vertices.chunks_exact(2) {
        min = [min[0].min(p[0]), min[1].min(p[1])];
        max = [max[0].max(p[0]), max[1].max(p[1])];
    }
    (max[0] - min[0]).hypot(max[1] - min[1])
}

/// Cell of `site` when all sites lie on one line: the strip of the box between the
/// bisectors shared with the previous and next distinct sites along that line.
pub fn strip_cell(bounds: &BoundingBox, site: [f64; 2], prev: Option<[f64; 2]>, next: Option<[f64; 2]>) -> Option<Vec<f64>> {
    if prev.is_none() && next.is_none() {
        return Some(bounds.corners());
    }

    let mut vertices = vec![
        bounds.min[0], bounds.max[1],
        bounds.min[0], bounds.min[1],
        bounds.max[0], bounds.min[1],
        bounds.max[0], bounds.max[1],
    ];
    let mut scratch = Vec::with_capacity(vertices.len() + 4);

    for other in [prev, next].into_iter().flatten() {
        let mid = [(site[0] + other[0]) / 2.0, (site[1] + other[1]) / 2.0];
        let normal = [other[0] - site[0], other[1] - site[1]];
        clip_half_plane(&mut vertices, &mut scratch, mid, normal);
        if vertices.is_empty() {
            return None;
        }
    }

    crate::clip::dedupe(&mut vertices).then_some(vertices)
}
