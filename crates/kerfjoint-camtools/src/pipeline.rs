//! End-to-end processing of a design model.
//!
//! Scaling, original outlines, the two joint passes and kerf compensation,
//! producing an output model with one composed layer per face.

use tracing::info;

use kerfjoint_core::constants::EPSILON;
use kerfjoint_designer::{scale_design, DesignModel, Layer, TreeEntry};
use kerfjoint_settings::LaserParameters;

use crate::compositor::{original_regions, process_joints, FaceRegions};
use crate::error::{CamToolResult, ParameterError};
use crate::kerf::kerf_offset;

/// Root style of every output drawing; the configured style is appended.
pub const OUTPUT_STYLE: &str = "fill:none;stroke:#ff0000;stroke-linejoin:round;\
stroke-width:0.1px;stroke-linecap:round;stroke-opacity:0.5;";

fn check_parameters(params: &LaserParameters) -> CamToolResult<()> {
    if !(params.thickness.is_finite() && params.thickness > 0.0) {
        return Err(ParameterError::InvalidDimensions(format!(
            "thickness must be positive, got {}",
            params.thickness
        ))
        .into());
    }
    if !(params.scale.is_finite() && params.scale > 0.0) {
        return Err(ParameterError::InvalidValue {
            name: "scale".to_string(),
            reason: format!("{} is not a positive number", params.scale),
        }
        .into());
    }
    Ok(())
}

/// Composed, kerf-compensated outline of every face of `model`.
pub fn get_processed_model(
    model: &DesignModel,
    params: &LaserParameters,
) -> CamToolResult<FaceRegions> {
    let original = original_regions(model)?;
    let processed = process_joints(&original, &model.joints, params)?;
    kerf_offset(&processed, params.kerf)
}

/// Runs the whole pipeline and returns the styled output model.
///
/// The model is scaled first when `params.scale` differs from 1. The
/// output keeps the (scaled) root attributes and holds one layer per face.
pub fn process_design(model: &DesignModel, params: &LaserParameters) -> CamToolResult<DesignModel> {
    check_parameters(params)?;
    let scaled = if (params.scale - 1.0).abs() > EPSILON {
        scale_design(model, params.scale)?
    } else {
        model.clone()
    };

    info!(
        "Processing {} face(s) with {} joint(s)",
        scaled.faces().len(),
        scaled.joints.len()
    );
    let regions = get_processed_model(&scaled, params)?;

    let mut output = DesignModel::blank(scaled.attrib.clone());
    output
        .attrib
        .insert("style".to_string(), format!("{}{}", OUTPUT_STYLE, params.style));
    for (face, region) in regions {
        let layer = Layer::from_paths(&region.to_paths());
        output.tree.insert(face, TreeEntry::Layer(layer));
    }
    Ok(output)
}
