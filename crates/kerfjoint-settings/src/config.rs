//! Laser parameter record
//!
//! Holds the per-material settings a processing run needs: sheet size,
//! material thickness, kerf width, the fit adjustment tables and the output
//! style. Records arrive as flat string maps (preset rows, CLI overrides,
//! service payloads) and are validated once into [`LaserParameters`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{ConfigError, ConfigResult};

/// Flat key/value form of a parameter set.
pub type ParameterRecord = BTreeMap<String, String>;

/// Keys every record must carry.
pub const REQUIRED_KEYS: [&str; 16] = [
    "thickness", "width", "height", "kerf", "boxC", "boxL", "boxI", "tabC", "tabL", "tabI",
    "slotC", "slotL", "slotI", "style", "preset", "notes",
];

/// Style used when no preset or override provides one.
pub const DEFAULT_STYLE: &str = "stroke:#000000;stroke-width:1px;";

/// How tightly two joint halves should mate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum FitClass {
    #[default]
    Clearance,
    Friction,
    Press,
}

impl FitClass {
    pub const ALL: [FitClass; 3] = [FitClass::Clearance, FitClass::Friction, FitClass::Press];

    /// Suffix used by the record keys (`boxC`, `boxL`, `boxI`).
    pub fn code(self) -> char {
        match self {
            FitClass::Clearance => 'C',
            FitClass::Friction => 'L',
            FitClass::Press => 'I',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for FitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitClass::Clearance => write!(f, "Clearance"),
            FitClass::Friction => write!(f, "Friction"),
            FitClass::Press => write!(f, "Press"),
        }
    }
}

impl FromStr for FitClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s {
            "Clearance" | "clearance" | "C" => Ok(FitClass::Clearance),
            "Friction" | "friction" | "L" => Ok(FitClass::Friction),
            "Press" | "press" | "I" => Ok(FitClass::Press),
            other => Err(ConfigError::UnknownFitClass(other.to_string())),
        }
    }
}

/// Joint families that carry their own row of numeric fit adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointFamily {
    Box,
    Tab,
    Slot,
}

impl JointFamily {
    pub const ALL: [JointFamily; 3] = [JointFamily::Box, JointFamily::Tab, JointFamily::Slot];

    pub fn prefix(self) -> &'static str {
        match self {
            JointFamily::Box => "box",
            JointFamily::Tab => "tab",
            JointFamily::Slot => "slot",
        }
    }

    /// Record key for this family and fit class, e.g. `tabL`.
    pub fn key(self, class: FitClass) -> String {
        format!("{}{}", self.prefix(), class.code())
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// One cell of the fit table.
///
/// Preset sheets leave cells blank (zero) or mark them `NA` when a fit class
/// has not been measured for a material.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FitValue {
    Value(f64),
    #[default]
    Zero,
    Unspecified,
}

impl FitValue {
    pub fn parse(key: &str, cell: &str) -> ConfigResult<Self> {
        match cell.trim() {
            "NA" => Ok(FitValue::Unspecified),
            "" => Ok(FitValue::Zero),
            text => parse_number(key, text).map(FitValue::Value),
        }
    }

    pub fn resolve(self, key: &str) -> ConfigResult<f64> {
        match self {
            FitValue::Value(v) => Ok(v),
            FitValue::Zero => Ok(0.0),
            FitValue::Unspecified => Err(ConfigError::UnspecifiedFit {
                key: key.to_string(),
            }),
        }
    }

    fn to_cell(self) -> String {
        match self {
            FitValue::Value(v) => v.to_string(),
            FitValue::Zero => String::new(),
            FitValue::Unspecified => "NA".to_string(),
        }
    }
}

/// Fit adjustments indexed by joint family and fit class.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FitTable {
    cells: [[FitValue; 3]; 3],
}

impl FitTable {
    pub fn get(&self, family: JointFamily, class: FitClass) -> FitValue {
        self.cells[family.index()][class.index()]
    }

    pub fn set(&mut self, family: JointFamily, class: FitClass, value: FitValue) {
        self.cells[family.index()][class.index()] = value;
    }
}

/// Stock material, selecting the secondary fit table used by halving joints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    None,
    Wood,
    Acrylic,
}

impl Material {
    /// Fit adjustment for interlocking, divider and flat joints.
    pub fn fit(self, thickness: f64, class: FitClass) -> f64 {
        let thick = thickness > 4.5;
        match (self, class) {
            (Material::None, _) => 0.0,
            (Material::Wood, FitClass::Clearance) => -0.05,
            (Material::Wood, FitClass::Friction) => {
                if thick {
                    0.05
                } else {
                    0.04
                }
            }
            (Material::Wood, FitClass::Press) => {
                if thick {
                    0.075
                } else {
                    0.05
                }
            }
            (Material::Acrylic, FitClass::Clearance) => -0.1,
            (Material::Acrylic, _) => 0.0,
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Material::None => write!(f, "None"),
            Material::Wood => write!(f, "Wood"),
            Material::Acrylic => write!(f, "Acrylic"),
        }
    }
}

impl FromStr for Material {
    type Err = ConfigError;

    fn from_str(s: &str) -> ConfigResult<Self> {
        match s.trim() {
            "" | "None" | "none" => Ok(Material::None),
            "Wood" | "wood" => Ok(Material::Wood),
            "Acrylic" | "acrylic" => Ok(Material::Acrylic),
            other => Err(ConfigError::UnknownMaterial(other.to_string())),
        }
    }
}

fn parse_number(key: &str, text: &str) -> ConfigResult<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| ConfigError::InvalidNumber {
            key: key.to_string(),
            value: text.to_string(),
        })
}

fn required<'a>(record: &'a ParameterRecord, key: &str) -> ConfigResult<&'a str> {
    record
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| ConfigError::MissingKey(key.to_string()))
}

/// Validated laser/material parameters for one processing run.
#[derive(Debug, Clone, PartialEq)]
pub struct LaserParameters {
    /// Material thickness (mm)
    pub thickness: f64,
    /// Sheet width (mm)
    pub width: f64,
    /// Sheet height (mm)
    pub height: f64,
    /// Cut width of the beam (mm)
    pub kerf: f64,
    pub fits: FitTable,
    /// Appended to the output drawing's style
    pub style: String,
    pub preset: String,
    pub notes: String,
    /// Applied to the drawing before processing
    pub scale: f64,
    pub material: Material,
}

impl LaserParameters {
    /// Validate a flat record. Every key in [`REQUIRED_KEYS`] must be present.
    pub fn from_record(record: &ParameterRecord) -> ConfigResult<Self> {
        let number = |key: &str| required(record, key).and_then(|v| parse_number(key, v));

        let mut fits = FitTable::default();
        for family in JointFamily::ALL {
            for class in FitClass::ALL {
                let key = family.key(class);
                let cell = required(record, &key)?;
                fits.set(family, class, FitValue::parse(&key, cell)?);
            }
        }

        let scale = match record.get("scale") {
            Some(v) if !v.trim().is_empty() => parse_number("scale", v)?,
            _ => 1.0,
        };
        let material = match record.get("material") {
            Some(v) => v.parse()?,
            None => Material::None,
        };

        Ok(Self {
            thickness: number("thickness")?,
            width: number("width")?,
            height: number("height")?,
            kerf: number("kerf")?,
            fits,
            style: required(record, "style")?.to_string(),
            preset: required(record, "preset")?.to_string(),
            notes: required(record, "notes")?.to_string(),
            scale,
            material,
        })
    }

    /// Flat form accepted by [`LaserParameters::from_record`].
    pub fn to_record(&self) -> ParameterRecord {
        let mut record = ParameterRecord::new();
        record.insert("thickness".into(), self.thickness.to_string());
        record.insert("width".into(), self.width.to_string());
        record.insert("height".into(), self.height.to_string());
        record.insert("kerf".into(), self.kerf.to_string());
        for family in JointFamily::ALL {
            for class in FitClass::ALL {
                record.insert(family.key(class), self.fits.get(family, class).to_cell());
            }
        }
        record.insert("style".into(), self.style.clone());
        record.insert("preset".into(), self.preset.clone());
        record.insert("notes".into(), self.notes.clone());
        record.insert("scale".into(), self.scale.to_string());
        record.insert("material".into(), self.material.to_string());
        record
    }

    /// Record used when no preset is named: zero sizes and fits, unit scale.
    pub fn default_record() -> ParameterRecord {
        let mut record: ParameterRecord = ["thickness", "width", "height", "kerf"]
            .into_iter()
            .map(|k| (k.to_string(), "0".to_string()))
            .collect();
        for family in JointFamily::ALL {
            for class in FitClass::ALL {
                record.insert(family.key(class), "0".to_string());
            }
        }
        record.insert("style".into(), DEFAULT_STYLE.to_string());
        record.insert("preset".into(), String::new());
        record.insert("notes".into(), String::new());
        record.insert("scale".into(), "1".to_string());
        record
    }

    /// Fit adjustment for a joint family; `NA` cells are an error here.
    pub fn fit(&self, family: JointFamily, class: FitClass) -> ConfigResult<f64> {
        self.fits.get(family, class).resolve(&family.key(class))
    }
}

impl Default for LaserParameters {
    fn default() -> Self {
        Self {
            thickness: 0.0,
            width: 0.0,
            height: 0.0,
            kerf: 0.0,
            fits: FitTable::default(),
            style: DEFAULT_STYLE.to_string(),
            preset: String::new(),
            notes: String::new(),
            scale: 1.0,
            material: Material::None,
        }
    }
}

/// Converts a JSON object of string, number or null cells into a record.
pub fn record_from_json(value: &serde_json::Value) -> ConfigResult<ParameterRecord> {
    let object = value
        .as_object()
        .ok_or_else(|| ConfigError::UnsupportedFormat("parameters must be an object".into()))?;
    Ok(object
        .iter()
        .filter_map(|(key, cell)| {
            let text = match cell {
                serde_json::Value::String(s) => s.clone(),
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                serde_json::Value::Null => String::new(),
                _ => return None,
            };
            Some((key.clone(), text))
        })
        .collect())
}
