//! # voronoi2d
//!
//! `voronoi2d` computes planar Voronoi diagrams from a Delaunay triangulation, designed to be
//! used in Rust as well as compiled to WebAssembly (WASM). Cells are clipped to a rectangle,
//! including the unbounded cells of hull sites.
//!
//! ## Features
//!
//! - **Clipped cells**: every cell comes back as a closed polygon inside the bounding box, or
//!   `None` when the site owns no part of it (coincident sites, cells outside the box).
//! - **Point location**: [`Voronoi::find`] walks the triangulation to the nearest site.
//! - **In-place updates**: move the sites through [`Voronoi::points_mut`] and call
//!   [`Voronoi::update`]; all derived buffers are refilled without reallocating.
//! - **Degenerate input**: duplicate and fully collinear sites are handled.
//! - **WASM-first**: built with `wasm-bindgen`, with `rayon` threads in the browser.
//!
//! ## Example
//!
//! ```
//! use voronoi2d::Delaunay;
//!
//! let voronoi = Delaunay::from_points(&[[10.0, 10.0], [20.0, 10.0]])
//!     .voronoi([0.0, 0.0, 30.0, 20.0])
//!     .unwrap();
//! assert_eq!(
//!     voronoi.cell_polygon(0),
//!     Some(vec![[0.0, 20.0], [0.0, 0.0], [15.0, 0.0], [15.0, 20.0], [0.0, 20.0]])
//! );
//! assert_eq!(voronoi.find(25.0, 5.0), Some(1));
//! ```
//!
//! See the `demos/` directory for SVG and JSON export.

mod bounds;
mod circumcenters;
mod clip;
mod delaunay;
mod error;
mod locate;
mod polygon;
mod render;
mod topology;
mod triangulation;
mod voronoi;
pub mod wasm;

pub use bounds::BoundingBox;
pub use bounds::DEFAULT_EXTENT;
pub use bounds::{CODE_XMAX, CODE_XMIN, CODE_YMAX, CODE_YMIN};
pub use circumcenters::compute_circumcenters;
pub use clip::{clip_cell, CellRegion};
pub use delaunay::Delaunay;
pub use error::VoronoiError;
pub use polygon::{polygon_area, polygon_centroid};
pub use render::{Path, Polygon, RenderContext};
pub use topology::Topology;
pub use triangulation::{next_halfedge, prev_halfedge, Delaunator, Triangulation, Triangulator, EMPTY};
pub use voronoi::Voronoi;
