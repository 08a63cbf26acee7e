use kerfjoint_settings::{
    ConfigError, FitClass, JointFamily, LaserParameters, PresetLibrary, SettingsError,
};
use tempfile::tempdir;

fn library() -> PresetLibrary {
    let mut lib = PresetLibrary::new();
    for (name, kerf) in [("ply3", "0.15"), ("acrylic3", "0.1")] {
        let mut row = LaserParameters::default_record();
        row.insert("preset".into(), name.into());
        row.insert("thickness".into(), "3".into());
        row.insert("kerf".into(), kerf.into());
        row.insert("tabI".into(), "NA".into());
        lib.add(row).unwrap();
    }
    lib
}

#[test]
fn test_toml_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("presets.toml");
    library().save_to_file(&path).unwrap();

    let loaded = PresetLibrary::load_from_file(&path).unwrap();
    assert_eq!(loaded.names(), vec!["ply3".to_string(), "acrylic3".to_string()]);
    let params = &loaded.find("acrylic3").unwrap().parameters;
    assert_eq!(params.kerf, 0.1);
    assert!(params.fit(JointFamily::Tab, FitClass::Press).is_err());
}

#[test]
fn test_json_file_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("presets.json");
    library().save_to_file(&path).unwrap();

    let loaded = PresetLibrary::load_from_file(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.find("ply3").unwrap().parameters.kerf, 0.15);
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("presets.csv");
    std::fs::write(&path, "preset,thickness\n").unwrap();
    assert!(matches!(
        PresetLibrary::load_from_file(&path),
        Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        PresetLibrary::load_from_file(&dir.path().join("none.toml")),
        Err(SettingsError::LoadError(_))
    ));
}
