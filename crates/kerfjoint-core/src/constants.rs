//! Numeric tolerances shared by the geometry primitives.

/// Below this magnitude a length, slope component or sine is treated as zero.
pub const EPSILON: f64 = 1e-6;

/// Two points closer than this (mm) are the same vertex.
pub const POINT_TOLERANCE: f64 = 1e-4;

/// Maximum deviation (mm) between a curve and its flattened polyline.
pub const FLATTEN_TOLERANCE: f64 = 0.01;

/// Loops with less area than this (mm²) are dropped before boolean operations.
pub const MIN_LOOP_AREA: f64 = 1e-9;
