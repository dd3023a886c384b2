//! Error types for diagram construction.

/// Errors raised while building a [`Delaunay`](crate::Delaunay) or a [`Voronoi`](crate::Voronoi).
///
/// Only construction validates its input. Queries never fail: degenerate geometry
/// surfaces as `None` polygons or `false` containment instead.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VoronoiError {
    /// The clipping rectangle has `xmax < xmin` or `ymax < ymin` (or a NaN bound).
    #[error("invalid bounds: [{xmin}, {ymin}, {xmax}, {ymax}]")]
    InvalidBounds {
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    },

    /// The flat coordinate buffer does not hold `[x, y]` pairs.
    #[error("coordinate buffer length must be even, got {0}")]
    CoordinateLength(usize),
}
