//! Scaling a model and writing it keeps the source model intact.

use kerfjoint_designer::{model_to_svg, parse_svg, scale_design, svg_to_model, DesignModel};

const PANEL: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 50 50">
  <rect x="0" y="0" width="40" height="20"/>
</svg>"#;

#[test]
fn test_scaled_output_embeds_unscaled_model() {
    let source = svg_to_model(PANEL).unwrap();
    let scaled = scale_design(&source, 2.0).unwrap();
    let svg = model_to_svg(&scaled, Some(&source)).unwrap();

    let parsed = parse_svg(&svg).unwrap();
    assert_eq!(parsed.attrib["viewBox"], "0 0 100 100");
    let embedded = DesignModel::from_json(&parsed.embedded_model.unwrap()).unwrap();
    assert_eq!(embedded, source);
}

#[test]
fn test_scale_by_one_is_identity() {
    let source = svg_to_model(PANEL).unwrap();
    assert_eq!(scale_design(&source, 1.0).unwrap(), source);
}
