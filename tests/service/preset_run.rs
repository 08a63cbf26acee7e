//! A preset file driving a full processing run

use kerfjoint::camtools::process_design;
use kerfjoint::designer::{
    load_svg_file, save_svg_file, svg_to_model, Alignment, EdgeBinding, Joint, JointParameters,
    TabbedSpec, TreeEntry,
};
use kerfjoint::settings::{FitClass, JointFamily, ParameterRecord, PresetLibrary};
use kerfjoint::resolve_parameters;
use tempfile::TempDir;

const PRESETS: &str = r#"
[[presets]]
preset = "ply3"
thickness = 3.0
width = 600
height = 400
kerf = 0.2
boxC = 0.1
boxL = 0.05
boxI = 0
tabC = 0.1
tabL = 0.05
tabI = 0
slotC = 0.1
slotL = 0.05
slotI = "NA"
style = ""
notes = "birch ply"
"#;

const PANELS: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 260 110">
  <rect x="0" y="0" width="100" height="100"/>
  <rect x="150" y="0" width="100" height="100"/>
</svg>"#;

fn library(dir: &TempDir) -> PresetLibrary {
    let path = dir.path().join("presets.toml");
    std::fs::write(&path, PRESETS).unwrap();
    PresetLibrary::load_from_file(&path).unwrap()
}

#[test]
fn test_preset_with_override() {
    let dir = TempDir::new().unwrap();
    let library = library(&dir);
    let mut overrides = ParameterRecord::new();
    overrides.insert("kerf".into(), "0.15".into());

    let params = resolve_parameters(Some(&library), Some("ply3"), &overrides).unwrap();
    assert_eq!(params.thickness, 3.0);
    assert_eq!(params.kerf, 0.15);
    assert_eq!(params.notes, "birch ply");
    assert_eq!(params.fit(JointFamily::Box, FitClass::Clearance).unwrap(), 0.1);
    assert!(params.fit(JointFamily::Slot, FitClass::Press).is_err());
}

#[test]
fn test_box_joint_run_writes_reloadable_drawing() {
    let dir = TempDir::new().unwrap();
    let params = resolve_parameters(Some(&library(&dir)), Some("ply3"), &ParameterRecord::new())
        .unwrap();

    let mut model = svg_to_model(PANELS).unwrap();
    let edges = model.edge_data.edges.clone();
    let bind = |i: usize| EdgeBinding {
        d: edges[i].d.clone(),
        face: edges[i].face.clone(),
        edge: Some(edges[i].edge),
    };
    model.joints.insert(
        "joint1".to_string(),
        Joint {
            joint_parameters: JointParameters::Box(TabbedSpec {
                angle: std::f64::consts::FRAC_PI_2,
                joint_align: Alignment::Inside,
                fit: FitClass::Clearance,
                tabsize: 15.0,
                tabspace: 5.0,
                tabnum: 5,
            }),
            edge_a: bind(0),
            edge_b: bind(4),
        },
    );
    model.joint_index = 2;

    let output = process_design(&model, &params).unwrap();
    assert_eq!(output.tree.len(), 2);
    assert!(output
        .tree
        .values()
        .all(|entry| matches!(entry, TreeEntry::Layer(layer) if !layer.paths.is_empty())));

    let path = dir.path().join("out.svg");
    save_svg_file(&path, &output, Some(&model)).unwrap();
    let reloaded = load_svg_file(&path).unwrap();
    assert_eq!(reloaded.tree, model.tree);
    assert_eq!(reloaded.edge_data, model.edge_data);
    assert_eq!(reloaded.joints["joint1"].edge_b, model.joints["joint1"].edge_b);
    assert!(matches!(
        reloaded.joints["joint1"].joint_parameters,
        JointParameters::Box(TabbedSpec { tabnum: 5, .. })
    ));
}
