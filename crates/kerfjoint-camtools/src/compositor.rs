//! Boolean composition of faces and joints.
//!
//! Every face starts as its perimeter minus its cut-outs. All joints then
//! add material in one pass and remove material in a second, so a cut
//! always wins over an add from any joint on the same face.

use std::collections::BTreeMap;

use tracing::{debug, info};

use kerfjoint_core::Region;
use kerfjoint_designer::{DesignModel, Joint};
use kerfjoint_settings::LaserParameters;

use crate::error::{CamToolError, CamToolResult};
use crate::joints::{joint_adds, joint_cuts, Contribution};

/// Filled outline per face identifier.
pub type FaceRegions = BTreeMap<String, Region>;

/// Each face's perimeter with its cut-outs removed.
pub fn original_regions(model: &DesignModel) -> CamToolResult<FaceRegions> {
    let mut regions = FaceRegions::new();
    for (name, face) in model.faces() {
        let perimeter = Region::from_paths(&face.perimeter.parsed()?)?;
        let cuts = Region::from_paths(&face.cuts.parsed()?)?;
        let outline = perimeter.difference(&cuts);
        debug!("{}: original area {:.3}", name, outline.area());
        regions.insert(name.to_string(), outline);
    }
    Ok(regions)
}

#[derive(Debug, Clone, Copy)]
enum Pass {
    Adds,
    Cuts,
}

fn apply(
    regions: &mut FaceRegions,
    joint_id: &str,
    contribution: Contribution,
    pass: Pass,
) -> CamToolResult<()> {
    for (face, paths) in contribution {
        let region = regions
            .get_mut(&face)
            .ok_or_else(|| CamToolError::UnknownFace {
                joint: joint_id.to_string(),
                face: face.clone(),
            })?;
        let shape = Region::from_paths(&paths)?;
        *region = match pass {
            Pass::Adds => region.union(&shape),
            Pass::Cuts => region.difference(&shape),
        };
    }
    Ok(())
}

/// Applies every joint's adds, then every joint's cuts.
pub fn process_joints(
    regions: &FaceRegions,
    joints: &BTreeMap<String, Joint>,
    params: &LaserParameters,
) -> CamToolResult<FaceRegions> {
    let mut out = regions.clone();

    info!("Adding joint material for {} joint(s)", joints.len());
    for (id, joint) in joints {
        apply(&mut out, id, joint_adds(joint, params)?, Pass::Adds)?;
    }

    info!("Cutting joint material for {} joint(s)", joints.len());
    for (id, joint) in joints {
        apply(&mut out, id, joint_cuts(joint, params)?, Pass::Cuts)?;
    }

    Ok(out)
}
