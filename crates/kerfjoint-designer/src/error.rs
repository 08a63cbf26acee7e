//! Error types for the designer crate.
//!
//! This module provides structured error types for the drawing model,
//! face extraction and SVG reading/writing.

use std::io;
use thiserror::Error;

use kerfjoint_core::GeometryError;

/// Errors that can occur while building or transforming a drawing model.
#[derive(Error, Debug)]
pub enum DesignError {
    /// The model references something it does not contain.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// A path in the model could not be parsed or combined.
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// A file format error occurred.
    #[error("File format error: {0}")]
    FileFormat(#[from] FileFormatError),
}

/// Errors related to SVG parsing and writing.
#[derive(Error, Debug)]
pub enum FileFormatError {
    /// The SVG file could not be parsed.
    #[error("SVG parse error: {0}")]
    SvgParseError(String),

    /// The SVG file could not be written.
    #[error("SVG write error: {0}")]
    SvgWriteError(String),

    /// An element lacks an attribute it cannot do without.
    #[error("<{element}> is missing attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// The file has no root `<svg>` element.
    #[error("Empty file: {0}")]
    EmptyFile(String),
}

/// Result type alias for designer operations.
pub type DesignResult<T> = Result<T, DesignError>;

/// Result type alias for file format operations.
pub type FileFormatResult<T> = Result<T, FileFormatError>;
