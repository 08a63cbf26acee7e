//! # KerfJoint Core
//!
//! Geometry primitives shared by the KerfJoint crates.
//! Provides SVG path parsing and formatting, rigid placement of paths,
//! filled regions with polygon booleans, and kerf offsetting.

pub mod constants;
pub mod error;
pub mod geometry;

pub use error::{GeometryError, Result};

pub use geometry::{
    format_number, loop_area, loop_contains, offset_region, push_unique_point, validate_loop, Path,
    Point, Region, Segment, Subpath,
};
