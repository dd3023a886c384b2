use serde::Serialize;
use voronoi2d::{BoundingBox, Delaunay, Path};

#[derive(Serialize)]
struct Cell {
    site: usize,
    position: [f64; 2],
    polygon: Vec<[f64; 2]>,
    area: f64,
    neighbors: Vec<usize>,
}

#[derive(Serialize)]
struct Diagram {
    bounds: [f64; 4],
    cells: Vec<Cell>,
    edges: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let extent = [0.0, 0.0, 960.0, 500.0];
    let points = BoundingBox::from_extent(extent)?.random_points(40, 2024);
    let voronoi = Delaunay::new(points)?.voronoi(extent)?;

    let cells = voronoi
        .cell_polygons()
        .map(|(polygon, site)| Cell {
            site,
            position: voronoi.delaunay().point(site),
            area: voronoi.cell_area(site),
            neighbors: voronoi.neighbors(site).collect(),
            polygon,
        })
        .collect();

    let mut path = Path::new();
    voronoi.render(&mut path);

    let diagram = Diagram { bounds: extent, cells, edges: path.into_string() };
    println!("{}", serde_json::to_string_pretty(&diagram)?);
    Ok(())
}
