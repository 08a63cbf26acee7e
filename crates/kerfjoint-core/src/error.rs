//! Error handling for KerfJoint geometry
//!
//! Provides the error type shared by every geometry primitive:
//! - Path data errors (SVG path syntax)
//! - Degenerate geometry handed to a boolean operation
//! - Offset engine failures
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Represents failures of the path, region and offset primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Path data could not be parsed
    #[error("Invalid path data at token {position}: {reason}")]
    PathSyntax {
        /// Index of the offending token.
        position: usize,
        /// Why the token was rejected.
        reason: String,
    },

    /// A path without any drawable segment was used where a point is needed
    #[error("Path is empty")]
    EmptyPath,

    /// A loop cannot take part in a boolean operation
    #[error("Degenerate geometry: {reason}")]
    Degenerate {
        /// Description of the defect.
        reason: String,
    },

    /// The offset engine failed on a loop
    #[error("Offset failed: {reason}")]
    OffsetFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl GeometryError {
    /// Create a degenerate-geometry error from a message
    pub fn degenerate(reason: impl Into<String>) -> Self {
        GeometryError::Degenerate {
            reason: reason.into(),
        }
    }

    /// Check if this error reports degenerate boolean input
    pub fn is_degenerate(&self) -> bool {
        matches!(self, GeometryError::Degenerate { .. })
    }
}

/// Result type using GeometryError
pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::PathSyntax {
            position: 3,
            reason: "expected number".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid path data at token 3: expected number"
        );

        let err = GeometryError::degenerate("loop crosses itself");
        assert_eq!(err.to_string(), "Degenerate geometry: loop crosses itself");
        assert!(err.is_degenerate());

        assert!(!GeometryError::EmptyPath.is_degenerate());
    }
}
