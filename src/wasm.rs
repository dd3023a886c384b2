use crate::bounds::BoundingBox;
use crate::delaunay::Delaunay;
use crate::render::Path;
use crate::voronoi::Voronoi;
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen_rayon::init_thread_pool;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_threads(n: usize) -> js_sys::Promise {
    init_thread_pool(n)
}

/// `count` random sites inside `[xmin, ymin, xmax, ymax]`.
#[wasm_bindgen(js_name = randomPoints)]
pub fn random_points(count: usize, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Vec<f64>, JsError> {
    let bounds = BoundingBox::from_extent([xmin, ymin, xmax, ymax])?;
    Ok(bounds.random_points(count, rand::random()))
}

#[wasm_bindgen(js_name = Voronoi)]
pub struct VoronoiJs {
    inner: Voronoi,
}

#[wasm_bindgen(js_class = Voronoi)]
impl VoronoiJs {
    #[wasm_bindgen(constructor)]
    pub fn new(points: Vec<f64>, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<VoronoiJs, JsError> {
        let inner = Delaunay::new(points)?.voronoi([xmin, ymin, xmax, ymax])?;
        Ok(VoronoiJs { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn points(&self) -> Vec<f64> {
        self.inner.delaunay().points().to_vec()
    }

    /// Replaces the sites. A buffer of the same length is written in place and
    /// re-triangulated; any other length rebuilds the diagram.
    pub fn set_points(&mut self, points: &[f64]) -> Result<(), JsError> {
        if points.len() == self.inner.delaunay().points().len() {
            self.inner.points_mut().copy_from_slice(points);
            self.inner.update();
        } else {
            let bounds = *self.inner.bounds();
            self.inner = Voronoi::new(Delaunay::new(points.to_vec())?, bounds);
        }
        Ok(())
    }

    pub fn update(&mut self) {
        self.inner.update();
    }

    pub fn relax(&mut self) {
        self.inner.relax();
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.inner.len()
    }

    #[wasm_bindgen(getter)]
    pub fn circumcenters(&self) -> Vec<f64> {
        self.inner.circumcenters().to_vec()
    }

    /// Closed cell polygon as `[x0, y0, x1, y1, ..., x0, y0]`.
    pub fn cell_polygon(&self, i: usize) -> Option<Vec<f64>> {
        self.inner
            .cell_polygon(i)
            .map(|polygon| polygon.into_iter().flatten().collect())
    }

    /// Nearest site, or -1 when there is none.
    pub fn find(&self, x: f64, y: f64, seed: usize) -> i32 {
        self.inner
            .find_from(x, y, seed)
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    pub fn contains(&self, i: usize, x: f64, y: f64) -> bool {
        self.inner.contains(i, x, y)
    }

    pub fn neighbors(&self, i: usize) -> Vec<u32> {
        self.inner.neighbors(i).map(|j| j as u32).collect()
    }

    pub fn area(&self, i: usize) -> f64 {
        self.inner.cell_area(i)
    }

    pub fn centroid(&self, i: usize) -> Option<Vec<f64>> {
        self.inner.cell_centroid(i).map(|c| c.to_vec())
    }

    /// SVG path data for every Voronoi edge.
    pub fn render(&self) -> String {
        let mut path = Path::new();
        self.inner.render(&mut path);
        path.into_string()
    }

    pub fn render_bounds(&self) -> String {
        let mut path = Path::new();
        self.inner.render_bounds(&mut path);
        path.into_string()
    }

    pub fn render_cell(&self, i: usize) -> String {
        let mut path = Path::new();
        self.inner.render_cell(i, &mut path);
        path.into_string()
    }

    /// SVG path data for the triangulation edges and hull.
    pub fn render_delaunay(&self) -> String {
        let mut path = Path::new();
        self.inner.delaunay().render(&mut path);
        path.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapper_round_trip() {
        let mut v = VoronoiJs::new(vec![10.0, 10.0, 20.0, 10.0], 0.0, 0.0, 30.0, 20.0).ok().unwrap();
        assert_eq!(v.count(), 2);
        assert_eq!(v.cell_polygon(0), Some(vec![0.0, 20.0, 0.0, 0.0, 15.0, 0.0, 15.0, 20.0, 0.0, 20.0]));
        assert_eq!(v.find(25.0, 5.0, 0), 1);
        assert_eq!(v.find(f64::NAN, 5.0, 0), -1);
        assert_eq!(v.neighbors(0), vec![1]);
        assert_eq!(v.render_cell(0), "M0,20L0,0L15,0L15,20Z");

        v.set_points(&[10.0, 10.0, 20.0, 10.0, 15.0, 18.0]).ok().unwrap();
        assert_eq!(v.count(), 3);
        assert!(v.cell_polygon(2).is_some());
        assert_eq!(v.find(15.0, 19.0, 0), 2);
        assert_eq!(v.render_delaunay().matches('M').count(), 3);
    }

    #[test]
    fn test_random_points_inside_bounds() {
        let points = random_points(50, 1.0, 2.0, 3.0, 4.0).ok().unwrap();
        assert_eq!(points.len(), 100);
        for p in points.chunks_exact(2) {
            assert!((1.0..=3.0).contains(&p[0]) && (2.0..=4.0).contains(&p[1]));
        }
    }
}
