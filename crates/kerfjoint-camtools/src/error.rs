//! Error types for the joint tools crate.
//!
//! This module provides structured error types for joint generation,
//! composition and joint parameter validation.

use thiserror::Error;

use kerfjoint_core::GeometryError;
use kerfjoint_designer::DesignError;
use kerfjoint_settings::ConfigError;

/// Errors that can occur while generating or composing joints.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// A joint binds a face the model does not contain.
    #[error("Joint '{joint}' references unknown face '{face}'")]
    UnknownFace { joint: String, face: String },

    /// A boolean or offset operation failed.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// A fit or other parameter lookup failed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The drawing model could not be read or transformed.
    #[error("Design error: {0}")]
    Design(#[from] DesignError),

    /// A joint parameter validation error occurred.
    #[error("Parameter error: {0}")]
    Parameter(#[from] ParameterError),
}

/// Errors related to joint parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A count parameter must be at least one.
    #[error("'{name}' must be at least 1 for {joint_type} joints")]
    ZeroCount { name: String, joint_type: String },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Dimensions are invalid (zero or negative).
    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

/// Result type alias for joint tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
