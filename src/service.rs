//! Request handlers
//!
//! Transport-agnostic handlers for the two service requests: processing a
//! design model into an output drawing, and deriving a design model from a
//! raw drawing. Every call builds its own model and touches no files, so
//! handlers may run concurrently.

use anyhow::{Context, Result};
use tracing::info;

use kerfjoint_camtools::process_design;
use kerfjoint_designer::{model_to_svg, svg_to_model, DesignModel};
use kerfjoint_settings::{record_from_json, LaserParameters, ParameterRecord, PresetLibrary};

/// Builds run parameters from an optional preset plus field overrides.
///
/// Without a preset the built-in defaults are the base record. Overrides
/// replace record cells before validation, so a bad override fails the
/// same way a bad preset cell would.
pub fn resolve_parameters(
    library: Option<&PresetLibrary>,
    preset: Option<&str>,
    overrides: &ParameterRecord,
) -> Result<LaserParameters> {
    let mut record = match preset {
        Some(name) => {
            let library = library.context("A preset was named but no preset library is loaded")?;
            info!("Looking for preset '{}'", name);
            let found = library.find(name)?;
            info!("Found preset '{}'", found.name);
            found.record.clone()
        }
        None => LaserParameters::default_record(),
    };

    for (key, value) in overrides {
        info!("Setting {} to {}", key, value);
        record.insert(key.clone(), value.clone());
    }

    LaserParameters::from_record(&record).context("Converting presets/arguments to parameters")
}

/// Processes a JSON design model with JSON parameters into SVG text.
///
/// The output drawing embeds the input model so it can be re-loaded.
pub fn get_output(model_json: &str, params_json: &str) -> Result<String> {
    let model = DesignModel::from_json(model_json).context("Invalid input model")?;
    let value: serde_json::Value =
        serde_json::from_str(params_json).context("Invalid laser parameters")?;
    let params = LaserParameters::from_record(&record_from_json(&value)?)?;

    info!("Processing model with {} joints", model.joints.len());
    let output = process_design(&model, &params)?;
    Ok(model_to_svg(&output, Some(&model))?)
}

/// Derives (or reads back) the design model of raw SVG text as JSON.
pub fn get_model(svg: &str) -> Result<String> {
    let model = svg_to_model(svg)?;
    info!(
        "Derived model with {} entries and {} edges",
        model.tree.len(),
        model.edge_data.edges.len()
    );
    Ok(model.to_json()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kerfjoint_settings::SettingsError;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
  <rect x="0" y="0" width="100" height="100"/>
  <rect x="40" y="40" width="20" height="20"/>
</svg>"#;

    fn params_json() -> String {
        let mut record = LaserParameters::default_record();
        record.insert("thickness".into(), "3".into());
        record.insert("kerf".into(), "0.2".into());
        serde_json::to_string(&record).unwrap()
    }

    #[test]
    fn test_get_model_derives_faces() {
        let json = get_model(SQUARE).unwrap();
        let model = DesignModel::from_json(&json).unwrap();
        let faces = model.faces();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].1.cuts.paths.len(), 1);
        assert_eq!(model.edge_data.edges.len(), 4);
    }

    #[test]
    fn test_get_output_embeds_input() {
        let model = get_model(SQUARE).unwrap();
        let svg = get_output(&model, &params_json()).unwrap();
        assert!(svg.contains("laserassistant"));
        assert!(svg.contains(r#"id="face1""#));

        let reloaded = DesignModel::from_json(&get_model(&svg).unwrap()).unwrap();
        assert_eq!(reloaded, DesignModel::from_json(&model).unwrap());
    }

    #[test]
    fn test_get_output_requires_every_field() {
        let model = get_model(SQUARE).unwrap();
        let err = get_output(&model, r#"{"thickness": 3}"#).unwrap_err();
        assert!(err.to_string().contains("Missing configuration key"));
    }

    #[test]
    fn test_overrides_apply_over_defaults() {
        let mut overrides = ParameterRecord::new();
        overrides.insert("kerf".into(), "0.25".into());
        overrides.insert("material".into(), "Wood".into());
        let params = resolve_parameters(None, None, &overrides).unwrap();
        assert_eq!(params.kerf, 0.25);
        assert_eq!(params.scale, 1.0);
    }

    #[test]
    fn test_unknown_preset_lists_names() {
        let mut row = LaserParameters::default_record();
        row.insert("preset".into(), "ply3".into());
        let library = PresetLibrary::from_records(vec![row]);
        let err = resolve_parameters(Some(&library), Some("birch"), &ParameterRecord::new())
            .unwrap_err();
        match err.downcast_ref::<SettingsError>() {
            Some(SettingsError::PresetNotFound { available, .. }) => {
                assert_eq!(available, &vec!["ply3".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
