//! Error types for the settings crate.
//!
//! This module provides structured error types for laser parameter records,
//! fit lookups and the preset library.

use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The preset file could not be loaded.
    #[error("Failed to load presets: {0}")]
    LoadError(String),

    /// The preset file could not be saved.
    #[error("Failed to save presets: {0}")]
    SaveError(String),

    /// No preset carries the requested name.
    #[error("Preset '{name}' not found. Available presets: {}", available.join(", "))]
    PresetNotFound {
        name: String,
        available: Vec<String>,
    },

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// A parameter record failed validation.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors related to laser parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A required parameter is missing.
    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    /// A numeric parameter does not parse as a float.
    #[error("Invalid number for '{key}': '{value}'")]
    InvalidNumber { key: String, value: String },

    /// The preset file format is not supported.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A fit adjustment marked "NA" was requested by a joint.
    #[error("Fit '{key}' is not specified for this material")]
    UnspecifiedFit { key: String },

    /// A material name is not in the fit table.
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// A fit class name is not Clearance, Friction or Press.
    #[error("Unknown fit class: {0}")]
    UnknownFitClass(String),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
