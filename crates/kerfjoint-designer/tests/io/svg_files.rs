//! Integration tests for reading and writing drawing files

use kerfjoint_designer::{load_svg_file, save_svg_file, svg_to_model, DesignModel};
use tempfile::TempDir;

const TWO_PANELS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 260 120" width="260mm" height="120mm">
  <g id="layer1" transform="translate(5,5)">
    <path d="M 0 0 L 100 0 L 100 100 L 0 100 Z"/>
    <path d="m 40 40 h 20 v 20 h -20 z"/>
  </g>
  <rect x="150" y="0" width="100" height="100"/>
</svg>"#;

#[test]
fn test_first_import_derives_faces_and_edges() {
    let model = svg_to_model(TWO_PANELS).unwrap();
    let faces = model.faces();
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0].0, "face1");
    assert_eq!(faces[0].1.cuts.paths.len(), 1);
    assert!(faces[1].1.cuts.paths.is_empty());
    assert_eq!(model.edge_data.edges.len(), 8);
    assert_eq!(model.edge_data.view_box, "0 0 260 120");
    assert!(model.joints.is_empty());
}

#[test]
fn test_saved_file_reloads_embedded_model() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("panels.svg");

    let model = svg_to_model(TWO_PANELS).unwrap();
    save_svg_file(&file, &model, Some(&model)).unwrap();

    let reloaded = load_svg_file(&file).unwrap();
    assert_eq!(reloaded, model);
}

#[test]
fn test_file_without_metadata_is_rederived() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("plain.svg");

    let model = svg_to_model(TWO_PANELS).unwrap();
    save_svg_file(&file, &model, None).unwrap();

    let reloaded: DesignModel = load_svg_file(&file).unwrap();
    assert_eq!(reloaded.faces().len(), 2);
    assert_eq!(reloaded.edge_data.edges.len(), 8);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    assert!(load_svg_file(&dir.path().join("absent.svg")).is_err());
}
