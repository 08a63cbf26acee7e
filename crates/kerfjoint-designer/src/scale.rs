//! Uniform model scaling.

use tracing::info;

use kerfjoint_core::{format_number, Path};

use crate::error::{DesignError, DesignResult};
use crate::model::{DesignModel, EdgeBinding, Layer, TreeEntry};

fn scale_data(d: &str, factor: f64) -> DesignResult<String> {
    Ok(Path::parse(d)?.scale(factor).to_svg_data())
}

fn scale_layer(layer: &Layer, factor: f64) -> DesignResult<Layer> {
    let paths = layer
        .paths
        .iter()
        .map(|d| scale_data(d, factor))
        .collect::<DesignResult<Vec<_>>>()?;
    Ok(Layer::new(paths))
}

fn scale_binding(binding: &EdgeBinding, factor: f64) -> DesignResult<EdgeBinding> {
    Ok(EdgeBinding {
        d: scale_data(&binding.d, factor)?,
        ..binding.clone()
    })
}

/// Multiplies every number of a `viewBox` value.
pub fn scale_view_box(view_box: &str, factor: f64) -> DesignResult<String> {
    view_box
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|coord| {
            coord
                .parse::<f64>()
                .map(|v| format_number(v * factor))
                .map_err(|_| DesignError::InvalidModel(format!("bad viewBox '{}'", view_box)))
        })
        .collect::<DesignResult<Vec<_>>>()
        .map(|parts| parts.join(" "))
}

/// Returns a copy of `model` with all geometry, joint edge snapshots, the
/// edge registry and the length-type joint parameters scaled by `factor`.
pub fn scale_design(model: &DesignModel, factor: f64) -> DesignResult<DesignModel> {
    info!("Scaling design by {}", factor);
    let mut scaled = model.clone();

    if let Some(view_box) = model.view_box() {
        scaled
            .attrib
            .insert("viewBox".to_string(), scale_view_box(view_box, factor)?);
    }

    for (name, entry) in &model.tree {
        let new_entry = match entry {
            TreeEntry::Face(face) => {
                let mut face = face.clone();
                face.perimeter = scale_layer(&face.perimeter, factor)?;
                face.cuts = scale_layer(&face.cuts, factor)?;
                TreeEntry::Face(face)
            }
            TreeEntry::Layer(layer) => TreeEntry::Layer(scale_layer(layer, factor)?),
        };
        scaled.tree.insert(name.clone(), new_entry);
    }

    for (id, joint) in &model.joints {
        let mut joint = joint.clone();
        joint.edge_a = scale_binding(&joint.edge_a, factor)?;
        joint.edge_b = scale_binding(&joint.edge_b, factor)?;
        joint.joint_parameters = joint.joint_parameters.scaled(factor);
        scaled.joints.insert(id.clone(), joint);
    }

    if !model.edge_data.view_box.is_empty() {
        scaled.edge_data.view_box = scale_view_box(&model.edge_data.view_box, factor)?;
    }
    for edge in &mut scaled.edge_data.edges {
        edge.d = scale_data(&edge.d, factor)?;
    }

    Ok(scaled)
}
