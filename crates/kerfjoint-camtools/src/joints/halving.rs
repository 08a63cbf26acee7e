//! Interlocking, divider and flat joints.
//!
//! These are sized from the edges alone and take their fit from the
//! material table rather than the per-family fit fields.

use kerfjoint_core::Path;
use kerfjoint_designer::HalvingSpec;
use kerfjoint_settings::{FitClass, LaserParameters};

use super::{
    double_straddle_adds, effective_thickness, Contribution, ContributionBuilder, JointEdges,
    Side,
};
use crate::error::CamToolResult;

/// Effective thickness and material fit for a halving joint.
fn depth_and_fit(spec: &HalvingSpec, params: &LaserParameters, class: FitClass) -> (f64, f64) {
    let thickness = effective_thickness(params.thickness, spec.angle);
    (thickness, params.material.fit(thickness, class))
}

/// Half the shorter of the two edges.
fn cut_length(edges: &JointEdges) -> f64 {
    edges.length_a.min(edges.length_b) / 2.0
}

/// Places canonical geometry on `side` without an alignment shift.
fn place_plain(
    edges: &JointEdges,
    side: Side,
    local: &Path,
    out: &mut ContributionBuilder,
) -> CamToolResult<()> {
    let placed = edges.place(side, local, None)?;
    out.push(edges.face(side), placed);
    Ok(())
}

pub fn interlocking_adds(
    spec: &HalvingSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = effective_thickness(params.thickness, spec.angle);
    double_straddle_adds(edges, thickness, spec.joint_align)
}

/// A centered notch half the shorter edge long on both faces.
pub fn interlocking_cuts(
    spec: &HalvingSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let (thickness, fit) = depth_and_fit(spec, params, spec.fit);
    let cut = cut_length(edges);
    let mut out = ContributionBuilder::new();
    for side in [Side::A, Side::B] {
        let start = (edges.length(side) - cut) / 2.0;
        let notch = Path::rectangle(start, 0.0, start + cut, thickness - fit);
        let placed = edges.place(side, &notch, Some((spec.joint_align, thickness)))?;
        out.push(edges.face(side), placed);
    }
    Ok(out.build())
}

/// A slot straddling edge A and a half-depth slot straddling edge B.
pub fn divider_cuts(
    spec: &HalvingSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let (thickness, fit) = depth_and_fit(spec, params, spec.fit);
    let cut = cut_length(edges);
    let depth = thickness - fit;
    let mut out = ContributionBuilder::new();
    place_plain(
        edges,
        Side::A,
        &Path::rectangle(0.0, -depth, cut, depth),
        &mut out,
    )?;
    place_plain(
        edges,
        Side::B,
        &Path::rectangle(0.0, -depth / 2.0, cut, depth / 2.0),
        &mut out,
    )?;
    Ok(out.build())
}

/// A full-length slot straddling edge A; face B is untouched. Always uses
/// the clearance fit.
pub fn flat_cuts(
    spec: &HalvingSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let (thickness, fit) = depth_and_fit(spec, params, FitClass::Clearance);
    let depth = thickness - fit;
    let mut out = ContributionBuilder::new();
    place_plain(
        edges,
        Side::A,
        &Path::rectangle(0.0, -depth, edges.length_a, depth),
        &mut out,
    )?;
    Ok(out.build())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{joint, params, widths};
    use super::*;
    use crate::joints::{joint_adds, joint_cuts};
    use kerfjoint_designer::JointParameters;
    use kerfjoint_settings::Material;

    #[test]
    fn test_interlocking_notch_is_centered() {
        let mut joint = joint(JointParameters::Interlocking(HalvingSpec::default()));
        joint.edge_b.d = "M 0 200 L 60 200".to_string();
        let cuts = joint_cuts(&joint, &params(3.0, 0.0)).unwrap();
        assert_eq!(widths(&cuts["face1"][0]), vec![(35.0, 65.0)]);
        assert_eq!(widths(&cuts["face2"][0]), vec![(15.0, 45.0)]);
    }

    #[test]
    fn test_material_fit_uses_effective_thickness() {
        let mut p = params(4.0, 0.0);
        p.material = Material::Wood;
        let spec = HalvingSpec {
            angle: 1.2,
            fit: FitClass::Press,
            ..HalvingSpec::default()
        };
        let (thickness, fit) = depth_and_fit(&spec, &p, spec.fit);
        assert!(thickness > 4.5);
        assert_eq!(fit, 0.075);
    }

    #[test]
    fn test_divider_depths() {
        let joint = joint(JointParameters::Divider(HalvingSpec::default()));
        let mut p = params(3.0, 0.0);
        p.material = Material::Acrylic;
        let cuts = joint_cuts(&joint, &p).unwrap();
        let (lo, hi) = cuts["face1"][0].bounds().unwrap();
        assert!((hi.y - 3.1).abs() < 1e-9);
        assert!((lo.y + 3.1).abs() < 1e-9);
        assert!((hi.x - 50.0).abs() < 1e-9);
        let (_, hi_b) = cuts["face2"][0].bounds().unwrap();
        assert!((hi_b.y - 200.0 - 1.55).abs() < 1e-9);
    }

    #[test]
    fn test_flat_spans_edge_a_only() {
        let joint = joint(JointParameters::Flat(HalvingSpec::default()));
        let cuts = joint_cuts(&joint, &params(3.0, 0.0)).unwrap();
        assert!(!cuts.contains_key("face2"));
        let (lo, hi) = cuts["face1"][0].bounds().unwrap();
        assert!(lo.x.abs() < 1e-9 && (hi.x - 100.0).abs() < 1e-9);
        assert!(joint_adds(&joint, &params(3.0, 0.0)).unwrap().is_empty());
    }
}
