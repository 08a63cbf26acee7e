//! Preset library
//!
//! Named parameter sets stored as a TOML file (`[[presets]]` tables) or a
//! JSON array of records. Rows that are not usable are skipped with a
//! warning so one bad row does not hide the rest of the library.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::{record_from_json, LaserParameters, ParameterRecord};
use crate::error::{ConfigError, SettingsError, SettingsResult};

/// File name looked up in the working directory and the config directory.
pub const PRESET_FILE_NAME: &str = "presets.toml";

/// A named, validated parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub record: ParameterRecord,
    pub parameters: LaserParameters,
}

/// Ordered collection of presets.
#[derive(Debug, Clone, Default)]
pub struct PresetLibrary {
    presets: Vec<Preset>,
}

impl PresetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a library from raw rows, skipping rows that lack a `preset`
    /// column or do not validate.
    pub fn from_records(records: impl IntoIterator<Item = ParameterRecord>) -> Self {
        let mut presets = Vec::new();
        for record in records {
            let Some(name) = record.get("preset").cloned() else {
                warn!("Skipping preset row without 'preset' column");
                continue;
            };
            match LaserParameters::from_record(&record) {
                Ok(parameters) => presets.push(Preset {
                    name,
                    record,
                    parameters,
                }),
                Err(e) => warn!("Skipping preset row '{}': {}", name, e),
            }
        }
        debug!("Loaded {} presets", presets.len());
        Self { presets }
    }

    pub fn from_toml_str(content: &str) -> SettingsResult<Self> {
        let doc: toml::Table = toml::from_str(content)?;
        let rows = match doc.get("presets") {
            Some(toml::Value::Array(rows)) => rows,
            Some(_) => {
                return Err(SettingsError::LoadError(
                    "'presets' must be an array of tables".to_string(),
                ))
            }
            None => return Ok(Self::new()),
        };

        let records = rows.iter().filter_map(|row| match row {
            toml::Value::Table(table) => Some(
                table
                    .iter()
                    .filter_map(|(key, cell)| toml_cell(cell).map(|text| (key.clone(), text)))
                    .collect::<ParameterRecord>(),
            ),
            _ => {
                warn!("Skipping preset row that is not a table");
                None
            }
        });
        Ok(Self::from_records(records.collect::<Vec<_>>()))
    }

    pub fn from_json_str(content: &str) -> SettingsResult<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let rows = match &value {
            serde_json::Value::Array(rows) => rows.as_slice(),
            serde_json::Value::Object(obj) => match obj.get("presets") {
                Some(serde_json::Value::Array(rows)) => rows.as_slice(),
                _ => {
                    return Err(SettingsError::LoadError(
                        "expected a 'presets' array".to_string(),
                    ))
                }
            },
            _ => {
                return Err(SettingsError::LoadError(
                    "expected an array of preset records".to_string(),
                ))
            }
        };

        let mut records = Vec::new();
        for row in rows {
            match record_from_json(row) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping preset row: {}", e),
            }
        }
        Ok(Self::from_records(records))
    }

    /// Load presets from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            Self::from_toml_str(&content)
        } else {
            Err(ConfigError::UnsupportedFormat(
                "Preset file must be .json or .toml".to_string(),
            )
            .into())
        }
    }

    /// Save presets to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        let records: Vec<&ParameterRecord> = self.presets.iter().map(|p| &p.record).collect();

        let content = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::to_string_pretty(&serde_json::json!({ "presets": records }))?
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            let mut doc = toml::Table::new();
            doc.insert(
                "presets".to_string(),
                toml::Value::Array(
                    records
                        .iter()
                        .map(|r| {
                            toml::Value::Table(
                                r.iter()
                                    .map(|(k, v)| (k.clone(), toml::Value::String(v.clone())))
                                    .collect(),
                            )
                        })
                        .collect(),
                ),
            );
            toml::to_string_pretty(&doc).map_err(|e| SettingsError::SaveError(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(
                "Preset file must be .json or .toml".to_string(),
            )
            .into());
        };

        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;
        Ok(())
    }

    /// `presets.toml` in the current directory, else in the user config dir.
    pub fn default_path() -> Option<PathBuf> {
        let local = PathBuf::from(PRESET_FILE_NAME);
        if local.exists() {
            return Some(local);
        }
        dirs::config_dir().map(|dir| dir.join("kerfjoint").join(PRESET_FILE_NAME))
    }

    pub fn add(&mut self, record: ParameterRecord) -> SettingsResult<()> {
        let name = record
            .get("preset")
            .cloned()
            .ok_or_else(|| ConfigError::MissingKey("preset".to_string()))?;
        let parameters = LaserParameters::from_record(&record)?;
        self.presets.retain(|p| p.name != name);
        self.presets.push(Preset {
            name,
            record,
            parameters,
        });
        Ok(())
    }

    pub fn names(&self) -> Vec<String> {
        self.presets.iter().map(|p| p.name.clone()).collect()
    }

    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Look up a preset by name; the error lists every available name.
    pub fn find(&self, name: &str) -> SettingsResult<&Preset> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| SettingsError::PresetNotFound {
                name: name.to_string(),
                available: self.names(),
            })
    }
}

fn toml_cell(cell: &toml::Value) -> Option<String> {
    match cell {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) if f.is_nan() => Some("NA".to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOML: &str = r#"
[[presets]]
preset = "ply3"
thickness = 3.0
width = 600
height = 400
kerf = 0.15
boxC = 0.05
boxL = 0.1
boxI = 0.15
tabC = 0.05
tabL = ""
tabI = "NA"
slotC = 0
slotL = 0
slotI = 0
style = "stroke:#000000;"
notes = "birch ply"

[[presets]]
preset = "broken"
thickness = "thick"

[[presets]]
thickness = 2.0
"#;

    #[test]
    fn test_toml_library_skips_bad_rows() {
        let lib = PresetLibrary::from_toml_str(TOML).unwrap();
        assert_eq!(lib.names(), vec!["ply3".to_string()]);
        let preset = lib.find("ply3").unwrap();
        assert_eq!(preset.parameters.thickness, 3.0);
        assert_eq!(preset.parameters.kerf, 0.15);
    }

    #[test]
    fn test_find_unknown_lists_names() {
        let lib = PresetLibrary::from_toml_str(TOML).unwrap();
        match lib.find("acrylic") {
            Err(SettingsError::PresetNotFound { name, available }) => {
                assert_eq!(name, "acrylic");
                assert_eq!(available, vec!["ply3".to_string()]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_json_library() {
        let mut row = LaserParameters::default_record();
        row.insert("preset".into(), "acrylic3".into());
        let json = serde_json::to_string(&vec![row]).unwrap();
        let lib = PresetLibrary::from_json_str(&json).unwrap();
        assert_eq!(lib.len(), 1);
        assert!(lib.find("acrylic3").is_ok());
    }

    #[test]
    fn test_add_replaces_same_name() {
        let mut lib = PresetLibrary::new();
        let mut row = LaserParameters::default_record();
        row.insert("preset".into(), "a".into());
        lib.add(row.clone()).unwrap();
        row.insert("kerf".into(), "0.3".into());
        lib.add(row).unwrap();
        assert_eq!(lib.len(), 1);
        assert_eq!(lib.find("a").unwrap().parameters.kerf, 0.3);
    }
}
