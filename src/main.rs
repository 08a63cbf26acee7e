//! kerfjoint CLI
//!
//! Processes a drawing's joints into a cuttable SVG, or derives the design
//! model of a raw drawing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};

use kerfjoint::camtools::process_design;
use kerfjoint::designer::{load_svg_file, save_svg_file, svg_to_model};
use kerfjoint::settings::{ParameterRecord, PresetLibrary};
use kerfjoint::{init_logging, resolve_parameters, BUILD_DATE, VERSION};

#[derive(Parser)]
#[command(name = "kerfjoint", version)]
#[command(about = "Generate laser-cut joints between the faces of a panel drawing", long_about = None)]
struct Cli {
    /// Emit log lines as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate joints, compose outlines and apply kerf compensation
    Process {
        /// Preset to load; other arguments, if given, override it
        #[arg(long)]
        preset: Option<String>,
        /// Preset library (TOML or JSON); defaults to presets.toml
        #[arg(long)]
        presets: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
        /// Drawing to process
        input: PathBuf,
        /// SVG to write
        output: PathBuf,
    },
    /// Print the design model of a drawing as JSON
    Derive {
        /// Drawing to read
        input: PathBuf,
        /// Write the model here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Per-field parameter overrides.
#[derive(Args, Debug)]
struct Overrides {
    /// Material thickness (mm)
    #[arg(long)]
    thickness: Option<f64>,
    /// Sheet width (mm)
    #[arg(long)]
    width: Option<f64>,
    /// Sheet height (mm)
    #[arg(long)]
    height: Option<f64>,
    /// Cut width (mm)
    #[arg(long)]
    kerf: Option<f64>,
    /// Clearance fit adjustment for box joints (mm)
    #[arg(long = "boxC")]
    box_c: Option<String>,
    /// Friction fit adjustment for box joints (mm)
    #[arg(long = "boxL")]
    box_l: Option<String>,
    /// Press fit adjustment for box joints (mm)
    #[arg(long = "boxI")]
    box_i: Option<String>,
    /// Clearance fit adjustment for tab-and-slot joints (mm)
    #[arg(long = "tabC")]
    tab_c: Option<String>,
    /// Friction fit adjustment for tab-and-slot joints (mm)
    #[arg(long = "tabL")]
    tab_l: Option<String>,
    /// Press fit adjustment for tab-and-slot joints (mm)
    #[arg(long = "tabI")]
    tab_i: Option<String>,
    /// Clearance fit adjustment for slotted joints (mm)
    #[arg(long = "slotC")]
    slot_c: Option<String>,
    /// Friction fit adjustment for slotted joints (mm)
    #[arg(long = "slotL")]
    slot_l: Option<String>,
    /// Press fit adjustment for slotted joints (mm)
    #[arg(long = "slotI")]
    slot_i: Option<String>,
    /// Style appended to the output drawing
    #[arg(long)]
    style: Option<String>,
    /// Notes for the preset
    #[arg(long)]
    notes: Option<String>,
    /// Scale factor applied before processing
    #[arg(long)]
    scale: Option<f64>,
    /// Stock material for halving joints (Wood, None, Acrylic)
    #[arg(long)]
    material: Option<String>,
}

impl Overrides {
    /// The given overrides as record cells.
    fn to_record(&self) -> ParameterRecord {
        let numbers = [
            ("thickness", self.thickness),
            ("width", self.width),
            ("height", self.height),
            ("kerf", self.kerf),
            ("scale", self.scale),
        ];
        // fit cells stay text so "NA" and "" keep their meaning
        let cells = [
            ("boxC", &self.box_c),
            ("boxL", &self.box_l),
            ("boxI", &self.box_i),
            ("tabC", &self.tab_c),
            ("tabL", &self.tab_l),
            ("tabI", &self.tab_i),
            ("slotC", &self.slot_c),
            ("slotL", &self.slot_l),
            ("slotI", &self.slot_i),
            ("style", &self.style),
            ("notes", &self.notes),
            ("material", &self.material),
        ];

        let mut record = ParameterRecord::new();
        for (key, value) in numbers {
            if let Some(v) = value {
                record.insert(key.to_string(), v.to_string());
            }
        }
        for (key, value) in cells {
            if let Some(v) = value {
                record.insert(key.to_string(), v.clone());
            }
        }
        record
    }
}

fn load_library(path: Option<&Path>) -> Result<PresetLibrary> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PresetLibrary::default_path().context("No preset library found")?,
    };
    info!("Loading presets from '{}'", path.display());
    Ok(PresetLibrary::load_from_file(&path)?)
}

fn process(
    preset: Option<&str>,
    presets: Option<&Path>,
    overrides: &Overrides,
    input: &Path,
    output: &Path,
) -> Result<()> {
    info!("Loading model from '{}'", input.display());
    let model = load_svg_file(input)?;
    info!("Loaded model with {} joints", model.joints.len());

    let library = match preset {
        Some(_) => Some(load_library(presets)?),
        None => None,
    };
    let params = resolve_parameters(library.as_ref(), preset, &overrides.to_record())?;
    info!("Using parameters: {:?}", params);

    info!("Processing model");
    let processed = process_design(&model, &params)?;

    info!("Writing model to '{}'", output.display());
    save_svg_file(output, &processed, Some(&model))?;
    info!("Done");
    Ok(())
}

fn derive(input: &Path, output: Option<&Path>) -> Result<()> {
    let text = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read '{}'", input.display()))?;
    let model = svg_to_model(&text)?;
    let json = serde_json::to_string_pretty(&model)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!("Wrote model to '{}'", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json)?;
    info!("kerfjoint {} (built {})", VERSION, BUILD_DATE);

    let result = match &cli.command {
        Commands::Process {
            preset,
            presets,
            overrides,
            input,
            output,
        } => process(
            preset.as_deref(),
            presets.as_deref(),
            overrides,
            input,
            output,
        ),
        Commands::Derive { input, output } => derive(input, output.as_deref()),
    };

    if let Err(e) = result {
        error!("{:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
