//! # KerfJoint
//!
//! Generates laser-cut joints between the faces of a flat-panel drawing.
//! A drawing's faces and edges are extracted (or read back from the model
//! embedded in a previous export), every joint's geometry is unioned onto
//! or cut from its faces, and the result is kerf compensated and written
//! back out as SVG.
//!
//! ## Architecture
//!
//! KerfJoint is organized as a workspace with multiple crates:
//!
//! 1. **kerfjoint-core** - Paths, regions, polygon booleans and offsetting
//! 2. **kerfjoint-settings** - Laser/material parameters and preset library
//! 3. **kerfjoint-designer** - Drawing model, face/edge extraction, SVG I/O
//! 4. **kerfjoint-camtools** - Joint generators, compositor, kerf, pipeline
//! 5. **kerfjoint** - Request handlers and the command line tool

pub mod service;

pub use kerfjoint_camtools as camtools;
pub use kerfjoint_core as geometry;
pub use kerfjoint_designer as designer;
pub use kerfjoint_settings as settings;

pub use service::{get_model, get_output, resolve_parameters};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Log lines go to stderr so command output on stdout stays clean.
/// `RUST_LOG` overrides the default `info` level; `json` switches to
/// one JSON object per line.
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .compact();
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}
