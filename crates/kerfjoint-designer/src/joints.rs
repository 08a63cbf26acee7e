//! Joint parameter types
//!
//! A joint record carries a `joint_type` tag plus the fields that joint
//! kind needs. Tags that are not recognized deserialize to
//! [`JointParameters::Unknown`] and generate nothing.

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;

use kerfjoint_settings::FitClass;

fn right_angle() -> f64 {
    FRAC_PI_2
}

/// Where the joint geometry sits relative to the material edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Alignment {
    /// Edge baseline at offset 0
    #[default]
    Inside,
    /// Shifted by half the effective thickness
    Middle,
    /// Shifted by the full effective thickness
    Outside,
}

impl Alignment {
    /// Offset of the reference line below the edge.
    pub fn offset(self, thickness: f64) -> f64 {
        match self {
            Alignment::Inside => 0.0,
            Alignment::Middle => thickness / 2.0,
            Alignment::Outside => thickness,
        }
    }
}

/// Metric fastener sizes with a nut-and-bolt table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BoltSize {
    M2,
    #[serde(rename = "M2.5")]
    M2_5,
    #[default]
    M3,
    M4,
}

/// Nut width, nut height and bolt diameter (mm) including clearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastenerDims {
    pub nut_width: f64,
    pub nut_height: f64,
    pub bolt_diameter: f64,
}

impl BoltSize {
    /// Added to every nominal fastener dimension.
    pub const CLEARANCE: f64 = 0.1;

    pub fn dims(self) -> FastenerDims {
        let (nut_width, nut_height, bolt_diameter) = match self {
            BoltSize::M2 => (3.3, 2.0, 2.0),
            BoltSize::M2_5 => (4.3, 2.0, 2.5),
            BoltSize::M3 => (5.5, 2.0, 3.0),
            BoltSize::M4 => (7.0, 2.0, 4.0),
        };
        FastenerDims {
            nut_width: nut_width + Self::CLEARANCE,
            nut_height: nut_height + Self::CLEARANCE,
            bolt_diameter: bolt_diameter + Self::CLEARANCE,
        }
    }
}

/// Box and tab-and-slot joints: a row of teeth centered on the edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabbedSpec {
    #[serde(default = "right_angle")]
    pub angle: f64,
    #[serde(default)]
    pub joint_align: Alignment,
    #[serde(default)]
    pub fit: FitClass,
    pub tabsize: f64,
    pub tabspace: f64,
    pub tabnum: u32,
}

/// Bolt and T-slot joints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FastenerSpec {
    #[serde(default = "right_angle")]
    pub angle: f64,
    #[serde(default)]
    pub joint_align: Alignment,
    #[serde(default)]
    pub fit: FitClass,
    pub boltsize: BoltSize,
    pub boltspace: f64,
    pub boltnum: u32,
    pub boltlength: f64,
}

/// Interlocking, divider and flat joints; sized from the edges alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalvingSpec {
    #[serde(default = "right_angle")]
    pub angle: f64,
    #[serde(default)]
    pub joint_align: Alignment,
    #[serde(default)]
    pub fit: FitClass,
}

impl Default for HalvingSpec {
    fn default() -> Self {
        Self {
            angle: right_angle(),
            joint_align: Alignment::Inside,
            fit: FitClass::Clearance,
        }
    }
}

/// Slotted joints: two notches meeting at an `intersection` length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlottedSpec {
    #[serde(default)]
    pub joint_align: Alignment,
    #[serde(default)]
    pub fit: FitClass,
    pub intersection: f64,
    /// Share of the intersection cut into face A
    pub percentage: f64,
    #[serde(rename = "tabDist1")]
    pub tab_dist1: f64,
    /// Baseline run after the face A notch. It encloses no area, so the
    /// notch geometry does not depend on it.
    #[serde(rename = "tabDist2", default)]
    pub tab_dist2: f64,
    #[serde(rename = "tabSlope")]
    pub tab_slope: [f64; 2],
    #[serde(rename = "baseDist1")]
    pub base_dist1: f64,
    /// Baseline run after the face B notch; like `tab_dist2` it only
    /// extends the baseline.
    #[serde(rename = "baseDist2", default)]
    pub base_dist2: f64,
    #[serde(rename = "baseSlope")]
    pub base_slope: [f64; 2],
}

/// Type-specific joint parameters, tagged by `joint_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "joint_type")]
pub enum JointParameters {
    Box(TabbedSpec),
    #[serde(rename = "Tab-and-Slot")]
    TabAndSlot(TabbedSpec),
    Interlocking(HalvingSpec),
    Bolt(FastenerSpec),
    #[serde(rename = "TSlot")]
    TSlot(FastenerSpec),
    Divider(HalvingSpec),
    Flat(HalvingSpec),
    Slotted(SlottedSpec),
    #[serde(other)]
    Unknown,
}

impl JointParameters {
    pub fn type_name(&self) -> &'static str {
        match self {
            JointParameters::Box(_) => "Box",
            JointParameters::TabAndSlot(_) => "Tab-and-Slot",
            JointParameters::Interlocking(_) => "Interlocking",
            JointParameters::Bolt(_) => "Bolt",
            JointParameters::TSlot(_) => "TSlot",
            JointParameters::Divider(_) => "Divider",
            JointParameters::Flat(_) => "Flat",
            JointParameters::Slotted(_) => "Slotted",
            JointParameters::Unknown => "Unknown",
        }
    }

    /// Multiplies the length parameters that scale with the drawing
    /// (`tabsize`, `tabspace`, `boltspace`).
    pub fn scaled(&self, factor: f64) -> Self {
        let mut scaled = self.clone();
        match &mut scaled {
            JointParameters::Box(spec) | JointParameters::TabAndSlot(spec) => {
                spec.tabsize *= factor;
                spec.tabspace *= factor;
            }
            JointParameters::Bolt(spec) | JointParameters::TSlot(spec) => {
                spec.boltspace *= factor;
            }
            _ => {}
        }
        scaled
    }
}
