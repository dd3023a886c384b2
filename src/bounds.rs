use crate::error::VoronoiError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Outcode bit for the `x = xmin` side of the box.
pub const CODE_XMIN: u8 = 0b0001;
/// Outcode bit for the `x = xmax` side of the box.
pub const CODE_XMAX: u8 = 0b0010;
/// Outcode bit for the `y = ymin` side of the box.
pub const CODE_YMIN: u8 = 0b0100;
/// Outcode bit for the `y = ymax` side of the box.
pub const CODE_YMAX: u8 = 0b1000;

/// Bounds used when none are given: `[0, 0, 960, 500]`.
pub const DEFAULT_EXTENT: [f64; 4] = [0.0, 0.0, 960.0, 500.0];

const MAX_CLIP_STEPS: usize = 8;

/// Axis-aligned clipping rectangle for the diagram.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl BoundingBox {
    /// Creates a box, rejecting `max < min` on either axis.
    pub fn try_new(min: [f64; 2], max: [f64; 2]) -> Result<Self, VoronoiError> {
        // Written as negated `>=` so NaN bounds are rejected as well.
        if !(max[0] >= min[0]) || !(max[1] >= min[1]) {
            return Err(VoronoiError::InvalidBounds {
                xmin: min[0],
                ymin: min[1],
                xmax: max[0],
                ymax: max[1],
            });
        }
        Ok(Self { min, max })
    }

    /// Creates a box from `[xmin, ymin, xmax, ymax]`.
    pub fn from_extent(extent: [f64; 4]) -> Result<Self, VoronoiError> {
        Self::try_new([extent[0], extent[1]], [extent[2], extent[3]])
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    pub fn center(&self) -> [f64; 2] {
        [(self.min[0] + self.max[0]) / 2.0, (self.min[1] + self.max[1]) / 2.0]
    }

    /// The whole box as a flat, counter-clockwise vertex list starting at `(xmax, ymin)`.
    pub fn corners(&self) -> Vec<f64> {
        vec![
            self.max[0], self.min[1],
            self.max[0], self.max[1],
            self.min[0], self.max[1],
            self.min[0], self.min[1],
        ]
    }

    /// Which sides of the box the point lies strictly beyond.
    pub fn region_code(&self, x: f64, y: f64) -> u8 {
        let cx = if x < self.min[0] { CODE_XMIN } else if x > self.max[0] { CODE_XMAX } else { 0 };
        let cy = if y < self.min[1] { CODE_YMIN } else if y > self.max[1] { CODE_YMAX } else { 0 };
        cx | cy
    }

    /// Which sides of the box the point lies exactly on; 0 for anything else.
    pub fn edge_code(&self, x: f64, y: f64) -> u8 {
        let cx = if x == self.min[0] { CODE_XMIN } else if x == self.max[0] { CODE_XMAX } else { 0 };
        let cy = if y == self.min[1] { CODE_YMIN } else if y == self.max[1] { CODE_YMAX } else { 0 };
        cx | cy
    }

    /// Cohen–Sutherland clip of the segment `(x0, y0) -> (x1, y1)` with outcodes `c0`, `c1`.
    ///
    /// The segment is always walked from the endpoint with the larger outcode, so the same
    /// edge clipped from either side yields bit-identical points.
    pub fn clip_segment(&self, x0: f64, y0: f64, x1: f64, y1: f64, c0: u8, c1: u8) -> Option<[f64; 4]> {
        let flip = c0 < c1;
        let (mut x0, mut y0, mut x1, mut y1, mut c0, mut c1) = if flip {
            (x1, y1, x0, y0, c1, c0)
        } else {
            (x0, y0, x1, y1, c0, c1)
        };

        for _ in 0..MAX_CLIP_STEPS {
            if c0 == 0 && c1 == 0 {
                return Some(if flip { [x1, y1, x0, y0] } else { [x0, y0, x1, y1] });
            }
            if c0 & c1 != 0 {
                return None;
            }
            let c = if c0 != 0 { c0 } else { c1 };
            let (x, y) = if c & CODE_YMAX != 0 {
                (x0 + (x1 - x0) * (self.max[1] - y0) / (y1 - y0), self.max[1])
            } else if c & CODE_YMIN != 0 {
                (x0 + (x1 - x0) * (self.min[1] - y0) / (y1 - y0), self.min[1])
            } else if c & CODE_XMAX != 0 {
                (self.max[0], y0 + (y1 - y0) * (self.max[0] - x0) / (x1 - x0))
            } else {
                (self.min[0], y0 + (y1 - y0) * (self.min[0] - x0) / (x1 - x0))
            };
            if c0 != 0 {
                (x0, y0) = (x, y);
                c0 = self.region_code(x0, y0);
            } else {
                (x1, y1) = (x, y);
                c1 = self.region_code(x1, y1);
            }
        }
        None
    }

    /// Projects the ray `(x0, y0) + t·(vx, vy)` onto the box boundary.
    ///
    /// Returns the first crossing in the direction of travel, or `None` when the ray starts
    /// beyond a side it is moving away from.
    pub fn project(&self, x0: f64, y0: f64, vx: f64, vy: f64) -> Option<[f64; 2]> {
        let mut t = f64::INFINITY;
        let mut hit = None;

        if vy < 0.0 {
            if y0 <= self.min[1] {
                return None;
            }
            let c = (self.min[1] - y0) / vy;
            if c < t {
                t = c;
                hit = Some([x0 + t * vx, self.min[1]]);
            }
        } else if vy > 0.0 {
            if y0 >= self.max[1] {
                return None;
            }
            let c = (self.max[1] - y0) / vy;
            if c < t {
                t = c;
                hit = Some([x0 + t * vx, self.max[1]]);
            }
        }

        if vx > 0.0 {
            if x0 >= self.max[0] {
                return None;
            }
            let c = (self.max[0] - x0) / vx;
            if c < t {
                t = c;
                hit = Some([self.max[0], y0 + t * vy]);
            }
        } else if vx < 0.0 {
            if x0 <= self.min[0] {
                return None;
            }
            let c = (self.min[0] - x0) / vx;
            if c < t {
                t = c;
                hit = Some([self.min[0], y0 + t * vy]);
            }
        }

        hit
    }

    /// `count` uniformly random sites inside the box, as a flat buffer.
    ///
    /// The same seed always yields the same sites.
    pub fn random_points(&self, count: usize, seed: u64) -> Vec<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let (w, h) = (self.width(), self.height());
        let mut points = Vec::with_capacity(count * 2);
        for _ in 0..count {
            points.push(self.min[0] + rng.r#gen::<f64>() * w);
            points.push(self.min[1] + rng.r#gen::<f64>() * h);
        }
        points
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            min: [DEFAULT_EXTENT[0], DEFAULT_EXTENT[1]],
            max: [DEFAULT_EXTENT[2], DEFAULT_EXTENT[3]],
        }
    }
}
