//! Drawing model
//!
//! The JSON-compatible structure embedded in exported drawings: root SVG
//! attributes, a tree of face layers, the joint registry and the edge
//! registry joints are bound from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use kerfjoint_core::Path;

use crate::error::{DesignError, DesignResult};
use crate::joints::JointParameters;

pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Root `<svg>` attributes (`xmlns`, `viewBox`, `style`, ...).
pub type Attributes = BTreeMap<String, String>;

/// A list of SVG path-data strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Layer {
    pub fn new(paths: Vec<String>) -> Self {
        Self { paths }
    }

    pub fn from_paths(paths: &[Path]) -> Self {
        Self {
            paths: paths.iter().map(Path::to_svg_data).collect(),
        }
    }

    /// Parses every stored path.
    pub fn parsed(&self) -> DesignResult<Vec<Path>> {
        self.paths
            .iter()
            .map(|d| Path::parse(d).map_err(DesignError::from))
            .collect()
    }
}

/// A face before processing: its outer perimeter and internal cut-outs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceLayers {
    #[serde(rename = "Perimeter")]
    pub perimeter: Layer,
    #[serde(rename = "Cuts", default)]
    pub cuts: Layer,
}

/// One entry of the model tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeEntry {
    Face(FaceLayers),
    Layer(Layer),
}

impl TreeEntry {
    /// All path data in this entry, perimeter first.
    pub fn all_paths(&self) -> impl Iterator<Item = &String> {
        let (first, second) = match self {
            TreeEntry::Face(face) => (&face.perimeter.paths, Some(&face.cuts.paths)),
            TreeEntry::Layer(layer) => (&layer.paths, None),
        };
        first.iter().chain(second.into_iter().flatten())
    }

    pub fn as_face(&self) -> Option<&FaceLayers> {
        match self {
            TreeEntry::Face(face) => Some(face),
            TreeEntry::Layer(_) => None,
        }
    }
}

/// A joint's snapshot of one bound edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeBinding {
    pub d: String,
    pub face: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<u32>,
}

impl EdgeBinding {
    pub fn path(&self) -> DesignResult<Path> {
        Ok(Path::parse(&self.d)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Joint {
    pub joint_parameters: JointParameters,
    pub edge_a: EdgeBinding,
    pub edge_b: EdgeBinding,
}

/// One perimeter segment in the edge registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub d: String,
    pub face: String,
    /// 1-based, in perimeter traversal order across all faces
    pub edge: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    #[serde(rename = "viewBox", default)]
    pub view_box: String,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

fn first_joint_index() -> u32 {
    1
}

/// The complete drawing model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignModel {
    #[serde(default)]
    pub attrib: Attributes,
    #[serde(default)]
    pub tree: BTreeMap<String, TreeEntry>,
    #[serde(default)]
    pub joints: BTreeMap<String, Joint>,
    #[serde(default)]
    pub edge_data: EdgeData,
    #[serde(default = "first_joint_index")]
    pub joint_index: u32,
}

impl Default for DesignModel {
    fn default() -> Self {
        Self::blank(Attributes::new())
    }
}

/// Numeric suffix of a face identifier (`face12` → 12).
pub fn face_number(name: &str) -> Option<u32> {
    name.strip_prefix("face")?.parse().ok()
}

pub fn face_name(index: usize) -> String {
    format!("face{}", index)
}

impl DesignModel {
    /// Empty model; any `id` attribute is dropped and the SVG namespace set.
    pub fn blank(mut attrib: Attributes) -> Self {
        attrib.remove("id");
        attrib.insert("xmlns".to_string(), SVG_NAMESPACE.to_string());
        Self {
            attrib,
            tree: BTreeMap::new(),
            joints: BTreeMap::new(),
            edge_data: EdgeData::default(),
            joint_index: first_joint_index(),
        }
    }

    pub fn from_json(json: &str) -> DesignResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> DesignResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn view_box(&self) -> Option<&str> {
        self.attrib.get("viewBox").map(String::as_str)
    }

    /// Face entries in numeric order (`face2` before `face10`).
    pub fn faces(&self) -> Vec<(&str, &FaceLayers)> {
        let mut faces: Vec<(&str, &FaceLayers)> = self
            .tree
            .iter()
            .filter(|(name, _)| name.starts_with("face"))
            .filter_map(|(name, entry)| entry.as_face().map(|face| (name.as_str(), face)))
            .collect();
        faces.sort_by_key(|(name, _)| (face_number(name).unwrap_or(u32::MAX), name.to_string()));
        faces
    }

    /// Checks that every joint binds faces present in the tree.
    pub fn validate(&self) -> DesignResult<()> {
        for (id, joint) in &self.joints {
            for binding in [&joint.edge_a, &joint.edge_b] {
                if !self.tree.contains_key(&binding.face) {
                    return Err(DesignError::InvalidModel(format!(
                        "{} references unknown face '{}'",
                        id, binding.face
                    )));
                }
            }
        }
        Ok(())
    }
}
