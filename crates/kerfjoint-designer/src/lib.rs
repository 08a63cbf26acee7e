//! # KerfJoint Designer
//!
//! The drawing model that joints are defined against, and the ways in and
//! out of it.
//!
//! ## Components
//!
//! - **Model**: faces (perimeter and cut-out layers), joints bound to pairs
//!   of edges, and the numbered edge registry
//! - **Joints**: tagged joint parameter records (box, tab-and-slot, bolt,
//!   T-slot, interlocking, divider, flat, slotted)
//! - **Extraction**: raw closed/open paths to faces and edges
//! - **SVG**: import of shapes and embedded models, export with grouped
//!   faces and a metadata copy of the source model
//! - **Scaling**: uniform resize of a whole model
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kerfjoint_designer::{svg_to_model, model_to_svg};
//!
//! let model = svg_to_model(&std::fs::read_to_string("drawing.svg")?)?;
//! let svg = model_to_svg(&model, Some(&model))?;
//! ```

pub mod error;
pub mod extract;
pub mod joints;
pub mod model;
pub mod scale;
pub mod svg;

pub use error::{DesignError, DesignResult, FileFormatError, FileFormatResult};
pub use extract::{
    get_edges, model_from_paths, paths_to_faces, separate_closed_paths,
    separate_perims_from_cuts, OPEN_PATHS_KEY,
};
pub use joints::{
    Alignment, BoltSize, FastenerDims, FastenerSpec, HalvingSpec, JointParameters, SlottedSpec,
    TabbedSpec,
};
pub use model::{
    face_name, face_number, Attributes, DesignModel, Edge, EdgeBinding, EdgeData, FaceLayers,
    Joint, Layer, TreeEntry, SVG_NAMESPACE,
};
pub use scale::{scale_design, scale_view_box};
pub use svg::{load_svg_file, model_to_svg, parse_svg, save_svg_file, svg_to_model, ParsedSvg};
