//! Bolt and T-slot joints.
//!
//! Each fastener occupies a segment three nut widths long, and the row of
//! segments (separated by `boltspace`) is centered on the edge. Face A gets
//! a bolt hole in the middle third of every segment; face B gets a keyhole
//! slot there that captures the nut. Bolt joints also notch face A either
//! side of the hole and cut face B between and around the segments.

use tracing::debug;

use kerfjoint_core::{Path, Point, Subpath};
use kerfjoint_designer::{FastenerDims, FastenerSpec};
use kerfjoint_settings::LaserParameters;

use super::{
    effective_thickness, require_count, straddle_adds, Contribution, ContributionBuilder,
    JointEdges, Side,
};
use crate::error::CamToolResult;

/// Canonical-frame layout of a fastener row on one edge.
#[derive(Debug, Clone, Copy)]
struct FastenerRow {
    dims: FastenerDims,
    count: u32,
    space: f64,
    bolt_length: f64,
}

impl FastenerRow {
    fn new(spec: &FastenerSpec, joint_type: &str) -> CamToolResult<Self> {
        Ok(Self {
            dims: spec.boltsize.dims(),
            count: require_count(spec.boltnum, "boltnum", joint_type)?,
            space: spec.boltspace,
            bolt_length: spec.boltlength,
        })
    }

    fn segment(&self) -> f64 {
        self.dims.nut_width * 3.0
    }

    /// Unused length at each end of an edge of `length`.
    fn buffer(&self, length: f64) -> f64 {
        let n = f64::from(self.count);
        (length - (n * self.segment() + self.space * (n - 1.0))) / 2.0
    }

    /// Start of every fastener segment.
    fn positions(&self, length: f64) -> impl Iterator<Item = f64> {
        let buffer = self.buffer(length);
        let pitch = self.segment() + self.space;
        (0..self.count).map(move |i| buffer + f64::from(i) * pitch)
    }

    /// Bolt shaft hole centered in the middle third, at half depth.
    fn bolt_hole(&self, position: f64, thickness: f64) -> Path {
        let d = self.dims;
        let radius = d.bolt_diameter / 2.0;
        let left = position + d.nut_width + (d.nut_width - d.bolt_diameter) / 2.0;
        let y = thickness / 2.0;
        Path::from_subpath(
            Subpath::new(Point::new(left, y))
                .arc_to(radius, false, true, Point::new(left + d.bolt_diameter, y))
                .arc_to(radius, false, true, Point::new(left, y))
                .close(),
        )
    }

    /// Twelve-sided keyhole: shaft channel with a nut pocket across it.
    fn keyhole(&self, position: f64) -> Path {
        let d = self.dims;
        let base = position + d.nut_width;
        let x0 = base;
        let x1 = base + (d.nut_width - d.bolt_diameter) / 2.0;
        let x2 = base + (d.nut_width + d.bolt_diameter) / 2.0;
        let x3 = base + d.nut_width;
        let y2 = self.bolt_length - 2.0 * d.nut_height;
        let y3 = self.bolt_length - d.nut_height;
        let y4 = self.bolt_length;
        Path::from_points(
            &[
                Point::new(x1, 0.0),
                Point::new(x1, y2),
                Point::new(x0, y2),
                Point::new(x0, y3),
                Point::new(x1, y3),
                Point::new(x1, y4),
                Point::new(x2, y4),
                Point::new(x2, y3),
                Point::new(x3, y3),
                Point::new(x3, y2),
                Point::new(x2, y2),
                Point::new(x2, 0.0),
            ],
            true,
        )
    }
}

pub fn fastener_adds(
    spec: &FastenerSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = effective_thickness(params.thickness, spec.angle);
    straddle_adds(edges, thickness, spec.joint_align)
}

fn keyholes(
    row: &FastenerRow,
    spec: &FastenerSpec,
    edges: &JointEdges,
    thickness: f64,
    out: &mut ContributionBuilder,
) -> CamToolResult<()> {
    for position in row.positions(edges.length_b) {
        let placed = edges.place(
            Side::B,
            &row.keyhole(position),
            Some((spec.joint_align, thickness)),
        )?;
        out.push(&edges.face_b, placed);
    }
    Ok(())
}

fn bolt_holes(
    row: &FastenerRow,
    spec: &FastenerSpec,
    edges: &JointEdges,
    thickness: f64,
    with_nut_notches: bool,
    out: &mut ContributionBuilder,
) -> CamToolResult<()> {
    let align = Some((spec.joint_align, thickness));
    let nut = row.dims.nut_width;
    for position in row.positions(edges.length_a) {
        if with_nut_notches {
            let notch = Path::rectangle(position, 0.0, position + nut, thickness);
            out.push(&edges.face_a, edges.place(Side::A, &notch, align)?);
        }
        let hole = row.bolt_hole(position, thickness);
        out.push(&edges.face_a, edges.place(Side::A, &hole, align)?);
        if with_nut_notches {
            let notch = Path::rectangle(position + 2.0 * nut, 0.0, position + 3.0 * nut, thickness);
            out.push(&edges.face_a, edges.place(Side::A, &notch, align)?);
        }
    }
    Ok(())
}

pub fn bolt_cuts(
    spec: &FastenerSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = effective_thickness(params.thickness, spec.angle);
    let row = FastenerRow::new(spec, "Bolt")?;
    debug!(
        "Bolt joint: {} x {:?}, segment {}",
        row.count,
        spec.boltsize,
        row.segment()
    );
    let align = Some((spec.joint_align, thickness));
    let mut out = ContributionBuilder::new();

    bolt_holes(&row, spec, edges, thickness, true, &mut out)?;

    let length = edges.length_b;
    let buffer = row.buffer(length);
    let mut ends = Path::rectangle(0.0, 0.0, buffer, thickness);
    ends.append(Path::rectangle(length - buffer, 0.0, length, thickness));
    out.push(&edges.face_b, edges.place(Side::B, &ends, align)?);

    let nut = row.dims.nut_width;
    let segment = row.segment();
    for position in row.positions(length) {
        let middle = Path::rectangle(position + nut, 0.0, position + 2.0 * nut, thickness);
        out.push(&edges.face_b, edges.place(Side::B, &middle, align)?);
        let spacer = Path::rectangle(
            position + segment,
            0.0,
            position + segment + row.space,
            thickness,
        );
        out.push(&edges.face_b, edges.place(Side::B, &spacer, align)?);
    }

    keyholes(&row, spec, edges, thickness, &mut out)?;
    Ok(out.build())
}

pub fn tslot_cuts(
    spec: &FastenerSpec,
    edges: &JointEdges,
    params: &LaserParameters,
) -> CamToolResult<Contribution> {
    let thickness = effective_thickness(params.thickness, spec.angle);
    let row = FastenerRow::new(spec, "TSlot")?;
    debug!("T-slot joint: {} x {:?}", row.count, spec.boltsize);
    let mut out = ContributionBuilder::new();
    bolt_holes(&row, spec, edges, thickness, false, &mut out)?;
    keyholes(&row, spec, edges, thickness, &mut out)?;
    Ok(out.build())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{joint, params};
    use super::*;
    use crate::joints::{joint_adds, joint_cuts};
    use kerfjoint_designer::{Alignment, BoltSize, JointParameters};
    use kerfjoint_settings::FitClass;
    use std::f64::consts::FRAC_PI_2;

    fn spec(boltnum: u32) -> FastenerSpec {
        FastenerSpec {
            angle: FRAC_PI_2,
            joint_align: Alignment::Inside,
            fit: FitClass::Clearance,
            boltsize: BoltSize::M3,
            boltspace: 20.0,
            boltnum,
            boltlength: 16.0,
        }
    }

    #[test]
    fn test_row_is_centered() {
        let row = FastenerRow::new(&spec(2), "Bolt").unwrap();
        let positions: Vec<f64> = row.positions(100.0).collect();
        let segment = row.segment();
        assert!((segment - 16.8).abs() < 1e-9);
        let end = positions[1] + segment;
        assert!((positions[0] - (100.0 - end)).abs() < 1e-9);
    }

    #[test]
    fn test_keyhole_shape() {
        let row = FastenerRow::new(&spec(1), "Bolt").unwrap();
        let keyhole = row.keyhole(0.0);
        assert_eq!(keyhole.subpaths[0].segments.len(), 11);
        assert!(keyhole.subpaths[0].closed);
        let (lo, hi) = keyhole.bounds().unwrap();
        assert!((hi.y - 16.0).abs() < 1e-9);
        assert!((lo.x - 5.6).abs() < 1e-9);
        assert!((hi.x - 11.2).abs() < 1e-9);
    }

    #[test]
    fn test_bolt_hole_is_a_circle() {
        let row = FastenerRow::new(&spec(1), "Bolt").unwrap();
        let hole = row.bolt_hole(0.0, 3.0);
        let expected = std::f64::consts::PI * 3.1;
        assert!((hole.length() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_bolt_piece_counts() {
        let joint = joint(JointParameters::Bolt(spec(2)));
        let cuts = joint_cuts(&joint, &params(3.0, 0.0)).unwrap();
        // notch, hole, notch per bolt
        assert_eq!(cuts["face1"].len(), 6);
        // ends, then middle and spacer per bolt, then keyholes
        assert_eq!(cuts["face2"].len(), 1 + 4 + 2);
        assert_eq!(joint_adds(&joint, &params(3.0, 0.0)).unwrap().len(), 2);
    }

    #[test]
    fn test_tslot_cuts_shaft_holes_and_keyholes_without_nuts_or_spacers() {
        let joint = joint(JointParameters::TSlot(spec(3)));
        let cuts = joint_cuts(&joint, &params(3.0, 0.0)).unwrap();
        // one shaft hole per bolt on face A, no nut notches
        assert_eq!(cuts["face1"].len(), 3);
        let row = FastenerRow::new(&spec(3), "TSlot").unwrap();
        let circumference = std::f64::consts::PI * row.dims.bolt_diameter;
        assert!(cuts["face1"]
            .iter()
            .all(|hole| (hole.length() - circumference).abs() < 1e-6));
        // one keyhole per bolt on face B, no ends, middles or spacers
        assert_eq!(cuts["face2"].len(), 3);
        assert!(cuts["face2"]
            .iter()
            .all(|keyhole| keyhole.subpaths.len() == 1 && keyhole.subpaths[0].segments.len() == 11));
    }
}
