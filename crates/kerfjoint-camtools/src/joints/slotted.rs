//! Slotted joints.
//!
//! Two panels crossing at `intersection` are each notched part of the way
//! through: face A by `percentage` of the intersection and face B by the
//! rest. Notch widths widen with the slope of the crossing panel.

use tracing::debug;

use kerfjoint_core::constants::EPSILON;
use kerfjoint_core::Path;
use kerfjoint_designer::SlottedSpec;
use kerfjoint_settings::LaserParameters;

use super::{Contribution, ContributionBuilder, JointEdges, Side};
use crate::error::{CamToolResult, ParameterError};

/// Width of a slot cut by stock of `thickness` crossing along `slope`.
///
/// A vertical or flat slope leaves the width at `thickness`.
pub fn angled_width(thickness: f64, slope: [f64; 2]) -> f64 {
    let [sx, sy] = slope;
    if sx.abs() <= EPSILON {
        return thickness;
    }
    let sin = (sy / sx).atan().sin();
    if sin.abs() <= EPSILON {
        thickness
    } else {
        (thickness / sin).abs()
    }
}

fn check_percentage(percentage: f64) -> CamToolResult<f64> {
    if !(0.0..=1.0).contains(&percentage) {
        return Err(ParameterError::InvalidValue {
            name: "percentage".to_string(),
            reason: format!("{percentage} is outside 0..=1"),
        }
        .into());
    }
    Ok(percentage)
}

pub fn slotted_cuts(
    spec: &SlottedSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = params.thickness;
    let percentage = check_percentage(spec.percentage)?;
    let tab_width = angled_width(thickness, spec.tab_slope);
    let base_width = angled_width(thickness, spec.base_slope);
    debug!(
        "Slotted joint: widths {} / {}, split {}",
        tab_width, base_width, percentage
    );

    let align = Some((spec.joint_align, thickness));
    let tab = Path::rectangle(
        spec.tab_dist1,
        0.0,
        spec.tab_dist1 + tab_width,
        spec.intersection * percentage,
    );
    let base = Path::rectangle(
        spec.base_dist1,
        0.0,
        spec.base_dist1 + base_width,
        spec.intersection * (1.0 - percentage),
    );

    let mut out = ContributionBuilder::new();
    out.push(&edges.face_a, edges.place(Side::A, &tab, align)?);
    out.push(&edges.face_b, edges.place(Side::B, &base, align)?);
    Ok(out.build())
}
