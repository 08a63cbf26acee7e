use kerfjoint_camtools::{kerf_offset, FaceRegions};
use kerfjoint_core::{Path, Point, Region};

fn hexagon() -> FaceRegions {
    let points: Vec<Point> = (0..6)
        .map(|i| {
            let a = std::f64::consts::PI / 3.0 * f64::from(i);
            Point::new(50.0 + 40.0 * a.cos(), 50.0 + 40.0 * a.sin())
        })
        .collect();
    let mut regions = FaceRegions::new();
    regions.insert(
        "face1".to_string(),
        Region::from_path(&Path::from_points(&points, true)).unwrap(),
    );
    regions
}

#[test]
fn test_convex_round_trip() {
    let original = hexagon();
    let grown = kerf_offset(&original, 0.4).unwrap();
    let restored = kerf_offset(&grown, -0.4).unwrap();

    let before = original["face1"].area();
    assert!(grown["face1"].area() > before);
    assert!((restored["face1"].area() - before).abs() < 0.05 * before / 100.0);
    assert!(restored["face1"].contains_point(Point::new(50.0, 50.0)));
    assert!(!restored["face1"].contains_point(Point::new(90.1, 50.0)));
}
