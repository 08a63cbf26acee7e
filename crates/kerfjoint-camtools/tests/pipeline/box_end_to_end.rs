use kerfjoint_camtools::{get_processed_model, process_design};
use kerfjoint_core::Point;
use kerfjoint_designer::TreeEntry;
use serde_json::json;

use super::{joint, params, two_squares};

fn box_joint() -> serde_json::Value {
    joint(json!({
        "joint_type": "Box",
        "joint_align": "Inside",
        "fit": "Clearance",
        "tabsize": 15,
        "tabspace": 5,
        "tabnum": 5
    }))
}

#[test]
fn test_box_teeth_are_complementary() {
    let model = two_squares(json!({ "joint1": box_joint() }));
    let regions = get_processed_model(&model, &params(0.0, 0.1)).unwrap();
    let (a, b) = (&regions["face1"], &regions["face2"]);

    // face A notches start at 2.55 and repeat every 20 mm
    for x in [10.0, 30.0, 50.0, 70.0, 90.0] {
        assert!(!a.contains_point(Point::new(x, 1.5)), "face1 notch at {}", x);
        assert!(b.contains_point(Point::new(200.0 + x, 1.5)), "face2 tooth at {}", x);
    }
    for x in [1.0, 20.0, 40.0, 60.0, 80.0, 99.0] {
        assert!(a.contains_point(Point::new(x, 1.5)), "face1 tooth at {}", x);
        assert!(!b.contains_point(Point::new(200.0 + x, 1.5)), "face2 notch at {}", x);
    }

    // above the joint both faces are intact
    assert!(a.contains_point(Point::new(50.0, 50.0)));
    assert!(b.contains_point(Point::new(250.0, 50.0)));
}

#[test]
fn test_composed_outline_is_written() {
    let model = two_squares(json!({ "joint1": box_joint() }));
    let output = process_design(&model, &params(0.1, 0.1)).unwrap();
    for face in ["face1", "face2"] {
        match &output.tree[face] {
            TreeEntry::Layer(layer) => {
                assert!(!layer.paths.is_empty());
                let paths = layer.parsed().unwrap();
                assert!(paths.iter().all(|p| p.subpaths.iter().all(|s| s.closed)));
            }
            other => panic!("expected a layer for {}, got {:?}", face, other),
        }
    }
}
