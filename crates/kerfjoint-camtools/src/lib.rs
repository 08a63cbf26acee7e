//! # KerfJoint CAM Tools
//!
//! Joint generation and outline composition for laser-cut panel assemblies.
//!
//! ## Stages
//!
//! - **Joints**: per-kind generators for the material each joint adds to
//!   and cuts from its two faces, placed onto the bound edges
//! - **Compositor**: face outlines (perimeter minus cut-outs), then all
//!   joint adds, then all joint cuts
//! - **Kerf**: offsets every composed outline by half the beam width
//! - **Pipeline**: scaling, composition, kerf and output styling in one call

pub mod compositor;
pub mod error;
pub mod joints;
pub mod kerf;
pub mod pipeline;

pub use compositor::{original_regions, process_joints, FaceRegions};
pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use joints::{
    align_joint, effective_thickness, joint_adds, joint_cuts, place_on_edge, Contribution,
    JointEdges, Side,
};
pub use kerf::kerf_offset;
pub use pipeline::{get_processed_model, process_design, OUTPUT_STYLE};
