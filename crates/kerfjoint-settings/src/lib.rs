//! KerfJoint Settings Crate
//!
//! Laser parameter records, fit tables and the preset library.

pub mod config;
pub mod error;
pub mod presets;

pub use config::{
    record_from_json, FitClass, FitTable, FitValue, JointFamily, LaserParameters, Material,
    ParameterRecord, DEFAULT_STYLE, REQUIRED_KEYS,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use presets::{Preset, PresetLibrary, PRESET_FILE_NAME};
