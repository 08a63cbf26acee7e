//! Box and tab-and-slot joints.
//!
//! Both lay out `tabnum` notches of `tabsize` separated by `tabspace`,
//! centered on the edge. Face A is notched at those positions and face B
//! at the complement, so the fingers left on each face fill the other's
//! notches. Face A notches are narrowed by `fit`; face B notches start
//! `fit` later.

use tracing::debug;

use kerfjoint_core::Path;
use kerfjoint_designer::TabbedSpec;
use kerfjoint_settings::{FitClass, JointFamily, LaserParameters};

use super::{
    effective_thickness, flush_adds, require_count, straddle_adds, Contribution,
    ContributionBuilder, JointEdges, Side,
};
use crate::error::CamToolResult;

/// Cut intervals along each edge, in canonical x coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ToothLayout {
    pub face_a: Vec<(f64, f64)>,
    pub face_b: Vec<(f64, f64)>,
}

impl ToothLayout {
    /// Lays out teeth for edges of length `length_a` and `length_b`.
    pub fn new(
        tabnum: u32,
        tabsize: f64,
        tabspace: f64,
        fit: f64,
        length_a: f64,
        length_b: f64,
    ) -> Self {
        let n = f64::from(tabnum);
        let nominal = tabsize * n + tabspace * (n - 1.0);
        let offset_a = (length_a - (nominal - fit)) / 2.0;
        let offset_b = (length_b - (nominal + fit)) / 2.0;
        let step = tabsize + tabspace;

        let face_a = (0..tabnum)
            .map(|i| {
                let x = offset_a + f64::from(i) * step;
                (x, x + tabsize - fit)
            })
            .collect();

        let mut face_b = vec![(0.0, offset_b)];
        let mut position = offset_b;
        for _ in 1..tabnum {
            face_b.push((position + tabsize + fit, position + tabsize + tabspace));
            position += step;
        }
        position += tabsize;
        face_b.push((position + fit, length_b));

        Self { face_a, face_b }
    }

    /// Width of every interval on one face.
    pub fn widths(intervals: &[(f64, f64)]) -> Vec<f64> {
        intervals.iter().map(|(x0, x1)| x1 - x0).collect()
    }
}

fn intervals_to_path(intervals: &[(f64, f64)], depth: f64) -> Path {
    let mut path = Path::new();
    for &(x0, x1) in intervals {
        path.append(Path::rectangle(x0, 0.0, x1, depth));
    }
    path
}

fn tooth_cuts(
    spec: &TabbedSpec,
    edges: &JointEdges,
    thickness: f64,
    fit: f64,
    joint_type: &str,
) -> CamToolResult<Contribution> {
    let tabnum = require_count(spec.tabnum, "tabnum", joint_type)?;
    let layout = ToothLayout::new(
        tabnum,
        spec.tabsize,
        spec.tabspace,
        fit,
        edges.length_a,
        edges.length_b,
    );
    debug!(
        "{} joint: {} teeth, fit {}, depth {}",
        joint_type, tabnum, fit, thickness
    );

    let mut out = ContributionBuilder::new();
    for (side, intervals) in [(Side::A, &layout.face_a), (Side::B, &layout.face_b)] {
        let local = intervals_to_path(intervals, thickness);
        let placed = edges.place(side, &local, Some((spec.joint_align, thickness)))?;
        out.push(edges.face(side), placed);
    }
    Ok(out.build())
}

pub fn box_adds(
    spec: &TabbedSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = effective_thickness(params.thickness, spec.angle);
    flush_adds(edges, thickness, spec.joint_align)
}

pub fn box_cuts(
    spec: &TabbedSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = effective_thickness(params.thickness, spec.angle);
    let fit = params.fit(JointFamily::Box, spec.fit)?;
    tooth_cuts(spec, edges, thickness, fit, "Box")
}

pub fn tab_and_slot_adds(
    spec: &TabbedSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = effective_thickness(params.thickness, spec.angle);
    straddle_adds(edges, thickness, spec.joint_align)
}

/// Tab-and-slot teeth are cut to the raw thickness less the tab family's
/// clearance fit, whatever fit class the joint asks for.
pub fn tab_and_slot_cuts(
    spec: &TabbedSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = params.thickness - params.fit(JointFamily::Tab, FitClass::Clearance)?;
    let fit = params.fit(JointFamily::Tab, spec.fit)?;
    tooth_cuts(spec, edges, thickness, fit, "Tab-and-Slot")
}
