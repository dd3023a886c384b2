use std::fmt::Write;

/// Sink for the drawing commands issued by the `render*` methods of the diagram.
pub trait RenderContext {
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn close_path(&mut self);
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);
}

/// Collects closed polygons; the first vertex of each is repeated at its end.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polygon {
    pub polygons: Vec<Vec<[f64; 2]>>,
}

impl Polygon {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent polygon.
    pub fn value(&self) -> Option<&[[f64; 2]]> {
        self.polygons.last().map(Vec::as_slice)
    }
}

impl RenderContext for Polygon {
    fn move_to(&mut self, x: f64, y: f64) {
        self.polygons.push(vec![[x, y]]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        if let Some(polygon) = self.polygons.last_mut() {
            polygon.push([x, y]);
        }
    }

    fn close_path(&mut self) {
        if let Some(polygon) = self.polygons.last_mut() {
            if let Some(&first) = polygon.first() {
                polygon.push(first);
            }
        }
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.polygons.push(vec![[x, y], [x + w, y], [x + w, y + h], [x, y + h], [x, y]]);
    }
}

/// Accumulates SVG path data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    data: String,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.data
    }

    pub fn into_string(self) -> String {
        self.data
    }
}

impl RenderContext for Path {
    fn move_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.data, "M{x},{y}");
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let _ = write!(self.data, "L{x},{y}");
    }

    fn close_path(&mut self) {
        self.data.push('Z');
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        let _ = write!(self.data, "M{x},{y}h{w}v{h}h{}Z", -w);
    }
}
