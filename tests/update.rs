use approx::assert_relative_eq;
use voronoi2d::{BoundingBox, Delaunay};

/// Rotates the open part of `actual` so that it starts at `expected[0]`.
fn same_cycle(actual: &[[f64; 2]], expected: &[[f64; 2]]) -> bool {
    let open = &actual[..actual.len() - 1];
    if open.len() != expected.len() {
        return false;
    }
    let Some(start) = open.iter().position(|p| *p == expected[0]) else {
        return false;
    };
    (0..open.len()).all(|k| open[(start + k) % open.len()] == expected[k])
}

#[test]
fn test_update_matches_fresh_build() {
    let bounds = BoundingBox::from_extent([-100.0, -100.0, 100.0, 100.0]).unwrap();
    let points = bounds.random_points(200, 11);
    let negated: Vec<f64> = points.iter().map(|c| -c).collect();

    let mut voronoi = Delaunay::new(points).unwrap().voronoi([-100.0, -100.0, 100.0, 100.0]).unwrap();
    for c in voronoi.points_mut() {
        *c = -*c;
    }
    voronoi.update();

    let fresh = Delaunay::new(negated).unwrap().voronoi([-100.0, -100.0, 100.0, 100.0]).unwrap();
    assert_eq!(voronoi.delaunay().points(), fresh.delaunay().points());
    assert_eq!(voronoi.circumcenters(), fresh.circumcenters());
    assert_eq!(voronoi.vectors(), fresh.vectors());
    for i in 0..voronoi.len() {
        assert_eq!(voronoi.cell_polygon(i), fresh.cell_polygon(i), "cell {i}");
    }
}

#[test]
fn test_update_reuses_buffers() {
    let bounds = BoundingBox::from_extent([0.0, 0.0, 50.0, 50.0]).unwrap();
    let points = bounds.random_points(100, 3);
    let mut voronoi = Delaunay::new(points).unwrap().voronoi([0.0, 0.0, 50.0, 50.0]).unwrap();

    let circumcenters = voronoi.circumcenters().as_ptr();
    let vectors = voronoi.vectors().as_ptr();
    let edges = voronoi.topology().edges().as_ptr();
    let capacity = voronoi.topology().edges_capacity();
    let triangles = voronoi.delaunay().triangles().len();

    for c in voronoi.points_mut() {
        *c = 50.0 - *c;
    }
    voronoi.update();

    assert_eq!(voronoi.delaunay().triangles().len(), triangles);
    assert_eq!(voronoi.circumcenters().as_ptr(), circumcenters);
    assert_eq!(voronoi.vectors().as_ptr(), vectors);
    assert_eq!(voronoi.topology().edges().as_ptr(), edges);
    assert_eq!(voronoi.topology().edges_capacity(), capacity);
}

#[test]
fn test_update_recovers_from_degenerate_sites() {
    let mut voronoi = Delaunay::new(vec![0.0; 10]).unwrap().voronoi([-500.0, -500.0, 500.0, 500.0]).unwrap();
    assert_eq!(
        voronoi.cell_polygon(0),
        Some(vec![[500.0, -500.0], [500.0, 500.0], [-500.0, 500.0], [-500.0, -500.0], [500.0, -500.0]])
    );
    assert_eq!(voronoi.cell_polygon(1), None);

    let sites = [10.0, 10.0, -290.0, 10.0, 10.0, -290.0, -290.0, -290.0, -90.0, -90.0];
    voronoi.points_mut().copy_from_slice(&sites);
    let polygon = voronoi.update().cell_polygon(1).unwrap();

    let expected = [[-500.0, -140.0], [-240.0, -140.0], [-140.0, 60.0], [-140.0, 500.0], [-500.0, 500.0]];
    assert!(same_cycle(&polygon, &expected), "got {polygon:?}");
}

#[test]
fn test_update_leaves_collinear_mode() {
    let mut voronoi = Delaunay::from_points(&[[0.0, 5.0], [10.0, 5.0], [20.0, 5.0]]).voronoi([0.0, 0.0, 20.0, 10.0]).unwrap();
    assert!(voronoi.delaunay().collinear().is_some());
    assert_relative_eq!(voronoi.cell_area(1), 100.0);

    voronoi.points_mut()[3] = 9.0;
    voronoi.update();
    assert!(voronoi.delaunay().collinear().is_none());
    let total: f64 = (0..3).map(|i| voronoi.cell_area(i)).sum();
    assert_relative_eq!(total, 200.0, epsilon = 1e-9);
}

#[test]
fn test_relax_preserves_total_area() {
    let bounds = BoundingBox::from_extent([0.0, 0.0, 80.0, 40.0]).unwrap();
    let points = bounds.random_points(64, 5);
    let mut voronoi = Delaunay::new(points).unwrap().voronoi([0.0, 0.0, 80.0, 40.0]).unwrap();

    for _ in 0..5 {
        voronoi.relax();
        let total: f64 = (0..voronoi.len()).map(|i| voronoi.cell_area(i)).sum();
        assert_relative_eq!(total, 3200.0, max_relative = 1e-9);
    }
    for p in voronoi.delaunay().points().chunks_exact(2) {
        assert_eq!(bounds.region_code(p[0], p[1]), 0);
    }
}
