use plotters::prelude::*;
use rand::Rng;
use voronoi2d::Delaunay;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_example("voronoi_random.svg", 0)?;
    run_example("voronoi_relaxed.svg", 20)?;
    Ok(())
}

fn run_example(filename: &str, iterations: usize) -> Result<(), Box<dyn std::error::Error>> {
    let root = SVGBackend::new(filename, (1024, 1024)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root).build_cartesian_2d(0.0..100.0, 0.0..100.0)?;

    let mut rng = rand::thread_rng();
    let mut generators = Vec::with_capacity(500 * 2);
    for _ in 0..500 {
        generators.push(rng.gen_range(0.0..100.0));
        generators.push(rng.gen_range(0.0..100.0));
    }

    let mut voronoi = Delaunay::new(generators)?.voronoi([0.0, 0.0, 100.0, 100.0])?;
    for _ in 0..iterations {
        voronoi.relax();
    }

    // Draw bounding box
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0), (0.0, 0.0)],
        BLACK.stroke_width(2),
    )))?;

    // Draw cells
    for (polygon, _) in voronoi.cell_polygons() {
        let poly: Vec<(f64, f64)> = polygon.iter().map(|p| (p[0], p[1])).collect();

        chart.draw_series(std::iter::once(Polygon::new(
            poly[..poly.len() - 1].to_vec(),
            BLUE.mix(0.1).filled(),
        )))?;
        chart.draw_series(std::iter::once(PathElement::new(poly, BLACK.mix(0.5))))?;
    }

    // Draw generators
    let points: Vec<(f64, f64)> = voronoi.delaunay().points().chunks(2).map(|c| (c[0], c[1])).collect();
    chart.draw_series(points.iter().map(|&p| Circle::new(p, 2, RED.filled())))?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}
