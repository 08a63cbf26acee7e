//! Paths, regions and the operations the joint pipeline composes.

pub mod flatten;
pub mod offset;
pub mod path;
pub mod point;
pub mod region;
pub mod transform;

pub use offset::offset_region;
pub use path::{format_number, Path, Segment, Subpath};
pub use point::{push_unique_point, Point};
pub use region::{loop_area, loop_contains, validate_loop, Region};
