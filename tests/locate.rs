use voronoi2d::{BoundingBox, Delaunay};

fn nearest(points: &[f64], x: f64, y: f64) -> f64 {
    points
        .chunks_exact(2)
        .map(|p| (p[0] - x).powi(2) + (p[1] - y).powi(2))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn test_find_matches_brute_force() {
    let bounds = BoundingBox::from_extent([-50.0, -50.0, 50.0, 50.0]).unwrap();
    let points = bounds.random_points(300, 17);
    let queries = bounds.random_points(500, 18);
    let voronoi = Delaunay::new(points.clone()).unwrap().voronoi([-50.0, -50.0, 50.0, 50.0]).unwrap();

    for q in queries.chunks_exact(2) {
        let i = voronoi.find(q[0], q[1]).unwrap();
        let p = voronoi.delaunay().point(i);
        let found = (p[0] - q[0]).powi(2) + (p[1] - q[1]).powi(2);
        assert_eq!(found, nearest(&points, q[0], q[1]), "query {q:?}");
    }
}

#[test]
fn test_find_is_independent_of_seed() {
    let bounds = BoundingBox::from_extent([0.0, 0.0, 10.0, 10.0]).unwrap();
    let points = bounds.random_points(40, 2);
    let voronoi = Delaunay::new(points.clone()).unwrap().voronoi([0.0, 0.0, 10.0, 10.0]).unwrap();

    let (x, y) = (3.3, 7.1);
    let best = nearest(&points, x, y);
    for seed in 0..voronoi.len() + 3 {
        let i = voronoi.find_from(x, y, seed).unwrap();
        let p = voronoi.delaunay().point(i);
        assert_eq!((p[0] - x).powi(2) + (p[1] - y).powi(2), best, "seed {seed}");
    }
}

#[test]
fn test_find_outside_the_box() {
    let voronoi = Delaunay::from_points(&[[1.0, 1.0], [9.0, 1.0], [5.0, 9.0]])
        .voronoi([0.0, 0.0, 10.0, 10.0])
        .unwrap();
    assert_eq!(voronoi.find(-100.0, -100.0), Some(0));
    assert_eq!(voronoi.find(100.0, -100.0), Some(1));
    assert_eq!(voronoi.find(5.0, 1000.0), Some(2));
}

#[test]
fn test_centroid_lies_in_own_cell() {
    let bounds = BoundingBox::from_extent([0.0, 0.0, 120.0, 90.0]).unwrap();
    let voronoi = Delaunay::new(bounds.random_points(70, 33))
        .unwrap()
        .voronoi([0.0, 0.0, 120.0, 90.0])
        .unwrap();
    for i in 0..voronoi.len() {
        let [cx, cy] = voronoi.cell_centroid(i).unwrap();
        assert_eq!(voronoi.find(cx, cy), Some(i));
        assert!(voronoi.contains(i, cx, cy));
    }
}

#[test]
fn test_find_skips_coincident_sites() {
    let voronoi = Delaunay::from_points(&[[0.0, 0.0], [0.0, 0.0], [4.0, 0.0], [0.0, 4.0]])
        .voronoi([-1.0, -1.0, 5.0, 5.0])
        .unwrap();
    // Site 1 duplicates site 0 and owns no cell.
    let i = voronoi.find_from(0.1, 0.1, 1).unwrap();
    assert_eq!(voronoi.delaunay().point(i), [0.0, 0.0]);
    assert_eq!(voronoi.find(3.9, 0.2), Some(2));
}

#[test]
fn test_find_on_collinear_sites() {
    let voronoi = Delaunay::from_points(&[[30.0, 30.0], [0.0, 0.0], [10.0, 10.0], [20.0, 20.0], [10.0, 10.0]])
        .voronoi([0.0, 0.0, 30.0, 30.0])
        .unwrap();
    assert!(voronoi.delaunay().collinear().is_some());

    assert_eq!(voronoi.find(5.0, 30.0), Some(3));
    assert_eq!(voronoi.find(1.0, 0.0), Some(1));
    assert_eq!(voronoi.find_from(29.0, 29.0, 1), Some(0));
    // The duplicate resolves to its lowest-index twin.
    assert_eq!(voronoi.find_from(11.0, 9.0, 4), Some(2));
    assert!(voronoi.contains(2, 11.0, 9.0));
    assert!(!voronoi.contains(4, 11.0, 9.0));
}

#[test]
fn test_find_rejects_bad_queries() {
    let voronoi = Delaunay::from_points(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]).voronoi([0.0, 0.0, 1.0, 1.0]).unwrap();
    assert_eq!(voronoi.find(f64::NAN, 0.0), None);
    assert_eq!(voronoi.find(0.0, f64::INFINITY), None);

    let empty = Delaunay::new(Vec::new()).unwrap().voronoi([0.0, 0.0, 1.0, 1.0]).unwrap();
    assert_eq!(empty.find(0.5, 0.5), None);
}
