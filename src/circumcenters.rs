/// Writes the circumcenter of every triangle into `out` as `[cx0, cy0, cx1, cy1, ...]`.
///
/// `out` is cleared and refilled, so its allocation is kept across calls with the same
/// triangle count. Nearly flat triangles divide by a vanishing determinant and yield
/// infinite or NaN centers; those are left as they are.
pub fn compute_circumcenters(points: &[f64], triangles: &[usize], out: &mut Vec<f64>) {
    out.clear();
    out.reserve(triangles.len() / 3 * 2);

    for t in triangles.chunks_exact(3) {
        let (x1, y1) = (points[2 * t[0]], points[2 * t[0] + 1]);
        let (x2, y2) = (points[2 * t[1]], points[2 * t[1] + 1]);
        let (x3, y3) = (points[2 * t[2]], points[2 * t[2] + 1]);

        let a2 = x1 - x2;
        let a3 = x1 - x3;
        let b2 = y1 - y2;
        let b3 = y1 - y3;
        let d1 = x1 * x1 + y1 * y1;
        let d2 = d1 - x2 * x2 - y2 * y2;
        let d3 = d1 - x3 * x3 - y3 * y3;
        let ab = (a3 * b2 - a2 * b3) * 2.0;

        out.push((b2 * d3 - b3 * d2) / ab);
        out.push((a3 * d2 - a2 * d3) / ab);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_triangle() {
        let points = [0.0, 0.0, 0.0, 2.0, 2.0, 0.0];
        let mut out = Vec::new();
        compute_circumcenters(&points, &[0, 1, 2], &mut out);
        assert!((out[0] - 1.0).abs() < 1e-12);
        assert!((out[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_equidistant() {
        let points = [0.3, -1.2, 4.5, 2.25, -3.0, 1.0];
        let mut out = Vec::new();
        compute_circumcenters(&points, &[0, 2, 1], &mut out);
        let d = |i: usize| ((points[2 * i] - out[0]).powi(2) + (points[2 * i + 1] - out[1]).powi(2)).sqrt();
        assert!((d(0) - d(1)).abs() < 1e-9);
        assert!((d(0) - d(2)).abs() < 1e-9);
    }

    #[test]
    fn test_flat_triangle_is_not_finite() {
        let points = [0.0, 0.0, 1.0, 1.0, 2.0, 2.0];
        let mut out = Vec::new();
        compute_circumcenters(&points, &[0, 1, 2], &mut out);
        assert!(!out[0].is_finite() || !out[1].is_finite());
    }

    #[test]
    fn test_reuses_buffer() {
        let points = [0.0, 0.0, 0.0, 2.0, 2.0, 0.0];
        let mut out = Vec::new();
        compute_circumcenters(&points, &[0, 1, 2], &mut out);
        let ptr = out.as_ptr();
        compute_circumcenters(&points, &[2, 1, 0], &mut out);
        assert_eq!(out.as_ptr(), ptr);
        assert_eq!(out.len(), 2);
    }
}
