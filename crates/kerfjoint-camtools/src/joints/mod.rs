//! Joint geometry generators.
//!
//! Every joint kind has an `adds` generator (material unioned onto the
//! faces) and a `cuts` generator (material removed). Both return the
//! geometry already placed onto the bound edges, keyed by face.
//!
//! Unrecognized joint kinds contribute nothing on either side.

pub mod box_joint;
pub mod fastener;
pub mod halving;
pub mod placement;
pub mod slotted;
pub mod thickness;

use std::collections::BTreeMap;

use tracing::debug;

use kerfjoint_core::Path;
use kerfjoint_designer::{Alignment, Joint, JointParameters};
use kerfjoint_settings::LaserParameters;

use crate::error::{CamToolResult, ParameterError};

pub use placement::{align_joint, place_on_edge};
pub use thickness::effective_thickness;

/// Placed joint geometry per face identifier.
pub type Contribution = BTreeMap<String, Vec<Path>>;

/// Which of the two bound edges a piece of geometry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

/// The two edges a joint binds, parsed and measured.
#[derive(Debug, Clone)]
pub struct JointEdges {
    pub face_a: String,
    pub face_b: String,
    pub edge_a: Path,
    pub edge_b: Path,
    pub length_a: f64,
    pub length_b: f64,
}

impl JointEdges {
    pub fn from_joint(joint: &Joint) -> CamToolResult<Self> {
        let edge_a = joint.edge_a.path()?;
        let edge_b = joint.edge_b.path()?;
        Ok(Self {
            face_a: joint.edge_a.face.clone(),
            face_b: joint.edge_b.face.clone(),
            length_a: edge_a.length(),
            length_b: edge_b.length(),
            edge_a,
            edge_b,
        })
    }

    pub fn length(&self, side: Side) -> f64 {
        match side {
            Side::A => self.length_a,
            Side::B => self.length_b,
        }
    }

    pub fn face(&self, side: Side) -> &str {
        match side {
            Side::A => &self.face_a,
            Side::B => &self.face_b,
        }
    }

    /// Carries canonical geometry onto the edge of `side`, after shifting
    /// it for `alignment` when one is given.
    pub fn place(
        &self,
        side: Side,
        local: &Path,
        alignment: Option<(Alignment, f64)>,
    ) -> CamToolResult<Path> {
        let aligned = match alignment {
            Some((align, thickness)) => align_joint(local, thickness, align),
            None => local.clone(),
        };
        let edge = match side {
            Side::A => &self.edge_a,
            Side::B => &self.edge_b,
        };
        place_on_edge(&aligned, edge)
    }
}

/// Collects placed paths per face; both edges may belong to one face.
#[derive(Debug, Default)]
pub(crate) struct ContributionBuilder {
    faces: Contribution,
}

impl ContributionBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, face: &str, path: Path) {
        if path.is_empty() {
            return;
        }
        self.faces.entry(face.to_string()).or_default().push(path);
    }

    pub(crate) fn build(self) -> Contribution {
        self.faces
    }
}

/// Rejects a zero count before it reaches a layout formula.
pub(crate) fn require_count(count: u32, name: &str, joint_type: &str) -> CamToolResult<u32> {
    if count == 0 {
        return Err(ParameterError::ZeroCount {
            name: name.to_string(),
            joint_type: joint_type.to_string(),
        }
        .into());
    }
    Ok(count)
}

/// Band `[0, L] × [y0, y1]` in the canonical frame of `side`.
fn band(edges: &JointEdges, side: Side, y0: f64, y1: f64) -> Path {
    Path::rectangle(0.0, y0, edges.length(side), y1)
}

/// Material added by box joints: a thickness band behind both edges.
pub(crate) fn flush_adds(
    edges: &JointEdges,
    thickness: f64,
    alignment: Alignment,
) -> CamToolResult<Contribution> {
    let mut out = ContributionBuilder::new();
    for side in [Side::A, Side::B] {
        let placed = edges.place(
            side,
            &band(edges, side, 0.0, thickness),
            Some((alignment, thickness)),
        )?;
        out.push(edges.face(side), placed);
    }
    Ok(out.build())
}

/// Material added by tab, bolt and T-slot joints: face A gets a band
/// straddling its edge, face B a band behind its edge.
pub(crate) fn straddle_adds(
    edges: &JointEdges,
    thickness: f64,
    alignment: Alignment,
) -> CamToolResult<Contribution> {
    let mut out = ContributionBuilder::new();
    let a = band(edges, Side::A, -thickness, thickness);
    out.push(
        &edges.face_a,
        edges.place(Side::A, &a, Some((alignment, thickness)))?,
    );
    let b = band(edges, Side::B, 0.0, thickness);
    out.push(
        &edges.face_b,
        edges.place(Side::B, &b, Some((alignment, thickness)))?,
    );
    Ok(out.build())
}

/// Material added by interlocking joints: a straddling band on both faces.
pub(crate) fn double_straddle_adds(
    edges: &JointEdges,
    thickness: f64,
    alignment: Alignment,
) -> CamToolResult<Contribution> {
    let mut out = ContributionBuilder::new();
    for side in [Side::A, Side::B] {
        let placed = edges.place(
            side,
            &band(edges, side, -thickness, thickness),
            Some((alignment, thickness)),
        )?;
        out.push(edges.face(side), placed);
    }
    Ok(out.build())
}

/// Material a joint adds to its faces.
pub fn joint_adds(joint: &Joint, params: &LaserParameters) -> CamToolResult<Contribution> {
    let kind = joint.joint_parameters.type_name();
    let adds = match &joint.joint_parameters {
        JointParameters::Slotted(_)
        | JointParameters::Divider(_)
        | JointParameters::Flat(_)
        | JointParameters::Unknown => Contribution::new(),
        other => {
            let edges = JointEdges::from_joint(joint)?;
            match other {
                JointParameters::Box(spec) => box_joint::box_adds(spec, &edges, params)?,
                JointParameters::TabAndSlot(spec) => {
                    box_joint::tab_and_slot_adds(spec, &edges, params)?
                }
                JointParameters::Bolt(spec) | JointParameters::TSlot(spec) => {
                    fastener::fastener_adds(spec, &edges, params)?
                }
                JointParameters::Interlocking(spec) => {
                    halving::interlocking_adds(spec, &edges, params)?
                }
                _ => Contribution::new(),
            }
        }
    };
    debug!("{} joint adds material to {} face(s)", kind, adds.len());
    Ok(adds)
}

/// Material a joint removes from its faces.
pub fn joint_cuts(joint: &Joint, params: &LaserParameters) -> CamToolResult<Contribution> {
    let kind = joint.joint_parameters.type_name();
    let cuts = match &joint.joint_parameters {
        JointParameters::Unknown => Contribution::new(),
        other => {
            let edges = JointEdges::from_joint(joint)?;
            match other {
                JointParameters::Box(spec) => box_joint::box_cuts(spec, &edges, params)?,
                JointParameters::TabAndSlot(spec) => {
                    box_joint::tab_and_slot_cuts(spec, &edges, params)?
                }
                JointParameters::Bolt(spec) => fastener::bolt_cuts(spec, &edges, params)?,
                JointParameters::TSlot(spec) => fastener::tslot_cuts(spec, &edges, params)?,
                JointParameters::Interlocking(spec) => {
                    halving::interlocking_cuts(spec, &edges, params)?
                }
                JointParameters::Divider(spec) => halving::divider_cuts(spec, &edges, params)?,
                JointParameters::Flat(spec) => halving::flat_cuts(spec, &edges, params)?,
                JointParameters::Slotted(spec) => slotted::slotted_cuts(spec, &edges, params)?,
                JointParameters::Unknown => Contribution::new(),
            }
        }
    };
    debug!("{} joint cuts material from {} face(s)", kind, cuts.len());
    Ok(cuts)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use kerfjoint_designer::EdgeBinding;
    use kerfjoint_settings::{FitClass, FitTable, FitValue, JointFamily};

    pub fn binding(d: &str, face: &str) -> EdgeBinding {
        EdgeBinding {
            d: d.to_string(),
            face: face.to_string(),
            edge: None,
        }
    }

    pub fn joint(parameters: JointParameters) -> Joint {
        Joint {
            joint_parameters: parameters,
            edge_a: binding("M 0 0 L 100 0", "face1"),
            edge_b: binding("M 0 200 L 100 200", "face2"),
        }
    }

    pub fn params(thickness: f64, fit: f64) -> LaserParameters {
        let mut fits = FitTable::default();
        for family in JointFamily::ALL {
            for class in FitClass::ALL {
                fits.set(family, class, FitValue::Value(fit));
            }
        }
        LaserParameters {
            thickness,
            fits,
            ..LaserParameters::default()
        }
    }

    pub fn widths(path: &Path) -> Vec<(f64, f64)> {
        path.subpaths
            .iter()
            .map(|sp| {
                let xs: Vec<f64> = sp.segment_starts().map(|p| p.x).collect();
                let lo = xs.iter().cloned().fold(f64::INFINITY, f64::min);
                let hi = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                (lo, hi)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use kerfjoint_designer::HalvingSpec;

    #[test]
    fn test_unknown_joint_is_noop() {
        let mut joint = joint(JointParameters::Unknown);
        joint.edge_a.d = "not a path".to_string();
        let params = params(3.0, 0.0);
        assert!(joint_adds(&joint, &params).unwrap().is_empty());
        assert!(joint_cuts(&joint, &params).unwrap().is_empty());
    }

    #[test]
    fn test_flat_adds_nothing() {
        let joint = joint(JointParameters::Flat(HalvingSpec::default()));
        assert!(joint_adds(&joint, &params(3.0, 0.0)).unwrap().is_empty());
        let cuts = joint_cuts(&joint, &params(3.0, 0.0)).unwrap();
        assert_eq!(cuts.keys().collect::<Vec<_>>(), vec!["face1"]);
    }

    #[test]
    fn test_same_face_edges_share_entry() {
        let mut joint = joint(JointParameters::Interlocking(HalvingSpec::default()));
        joint.edge_b.face = "face1".to_string();
        let adds = joint_adds(&joint, &params(3.0, 0.0)).unwrap();
        assert_eq!(adds.len(), 1);
        assert_eq!(adds["face1"].len(), 2);
    }

    #[test]
    fn test_bad_edge_data_is_an_error() {
        let mut joint = joint(JointParameters::Flat(HalvingSpec::default()));
        joint.edge_a.d = "M 0 0 L".to_string();
        assert!(joint_cuts(&joint, &params(3.0, 0.0)).is_err());
    }
}
