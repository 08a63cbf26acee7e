use kerfjoint_camtools::{
    joint_adds, joint_cuts, original_regions, process_joints, CamToolError,
};
use kerfjoint_core::Point;
use kerfjoint_designer::Joint;
use serde_json::{json, Value};

use super::{joint, params, two_squares};

fn every_kind() -> Vec<(&'static str, Value)> {
    let tabbed = json!({"tabsize": 15, "tabspace": 5, "tabnum": 3});
    let fastener = json!({"boltsize": "M3", "boltspace": 20, "boltnum": 2, "boltlength": 16});
    let slotted = json!({
        "intersection": 10, "percentage": 0.5,
        "tabDist1": 20, "tabSlope": [1, 1],
        "baseDist1": 30, "baseSlope": [1, 0]
    });
    vec![
        ("Box", tabbed.clone()),
        ("Tab-and-Slot", tabbed),
        ("Bolt", fastener.clone()),
        ("TSlot", fastener),
        ("Interlocking", json!({})),
        ("Divider", json!({})),
        ("Flat", json!({})),
        ("Slotted", slotted),
    ]
}

fn typed_joint(kind: &str, mut fields: Value) -> Joint {
    fields["joint_type"] = json!(kind);
    serde_json::from_value(joint(fields)).unwrap()
}

#[test]
fn test_every_kind_contributes() {
    let p = params(0.0, 0.1);
    for (kind, fields) in every_kind() {
        let joint = typed_joint(kind, fields);
        let cuts = joint_cuts(&joint, &p).unwrap();
        assert!(!cuts.is_empty(), "{} cuts nothing", kind);

        let adds = joint_adds(&joint, &p).unwrap();
        let adds_nothing = matches!(kind, "Slotted" | "Flat" | "Divider");
        assert_eq!(adds.is_empty(), adds_nothing, "{} adds", kind);
    }
}

#[test]
fn test_unknown_kind_changes_nothing() {
    let model = two_squares(json!({
        "joint1": joint(json!({"joint_type": "Dovetail"}))
    }));
    let original = original_regions(&model).unwrap();
    let processed = process_joints(&original, &model.joints, &params(0.0, 0.0)).unwrap();
    assert_eq!(processed, original);
}

#[test]
fn test_cut_wins_over_add_from_another_joint() {
    // joint1 cuts a slot straddling the edge; joint2 adds a band over the
    // same area. Adds all run first, so the slot survives.
    let mut interlock = joint(json!({"joint_type": "Interlocking"}));
    interlock["edge_b"]["face"] = json!("face1");
    interlock["edge_b"]["d"] = json!("M 0 100 L 100 100");
    let model = two_squares(json!({
        "joint1": joint(json!({"joint_type": "Flat"})),
        "joint2": interlock
    }));

    let original = original_regions(&model).unwrap();
    let processed = process_joints(&original, &model.joints, &params(0.0, 0.0)).unwrap();
    let face = &processed["face1"];
    assert!(!face.contains_point(Point::new(50.0, -1.5)));
    assert!(!face.contains_point(Point::new(10.0, 1.5)));
    assert!(face.contains_point(Point::new(50.0, 50.0)));
}

#[test]
fn test_joint_on_missing_face_is_an_error() {
    let mut stray = joint(json!({"joint_type": "Flat"}));
    stray["edge_a"]["face"] = json!("face9");
    let model = two_squares(json!({ "joint1": stray }));
    let original = original_regions(&model).unwrap();
    let err = process_joints(&original, &model.joints, &params(0.0, 0.0)).unwrap_err();
    assert!(matches!(err, CamToolError::UnknownFace { .. }));
}
