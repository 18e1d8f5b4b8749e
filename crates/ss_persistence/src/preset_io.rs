use ss_spawn::SpawnSettings;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default directory for spawner presets.
pub const PRESETS_DIR: &str = "assets/spawners";

/// Error type for preset I/O operations.
#[derive(Debug, Error)]
pub enum PresetIoError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON serialization error: {0}")]
    Ron(#[from] ron::Error),
    #[error("RON parse error in {file}: {source}")]
    RonSpanned {
        file: String,
        source: ron::error::SpannedError,
    },
}

/// Named spawn settings; the name is the file stem.
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub name: String,
    pub settings: SpawnSettings,
}

/// Save spawn settings to a RON file.
pub fn save_settings(path: &Path, settings: &SpawnSettings) -> Result<(), PresetIoError> {
    let pretty_config = ron::ser::PrettyConfig::new().depth_limit(2);

    let ron_string = ron::ser::to_string_pretty(settings, pretty_config)?;
    fs::write(path, ron_string)?;
    Ok(())
}

/// Load spawn settings from a RON file. Missing fields take their defaults.
pub fn load_settings(path: &Path) -> Result<SpawnSettings, PresetIoError> {
    let contents = fs::read_to_string(path)?;
    ron::from_str(&contents).map_err(|source| PresetIoError::RonSpanned {
        file: path.display().to_string(),
        source,
    })
}

/// Load every `*.ron` preset in `dir`, sorted by name.
///
/// A missing directory yields no presets. One unreadable preset fails the
/// whole load.
pub fn load_presets(dir: &Path) -> Result<Vec<Preset>, PresetIoError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut presets = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("ron") {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        presets.push(Preset {
            name: name.to_string(),
            settings: load_settings(&path)?,
        });
    }

    presets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(presets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_settings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("forest.ron");

        let settings = SpawnSettings {
            spawn_radius: 350.0,
            align_to_surface: false,
            ..SpawnSettings::repeating(2.5, 12)
        };
        save_settings(&path, &settings).unwrap();

        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn partial_preset_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.ron");
        fs::write(&path, "(repeat: true, max_spawn_count: 9)").unwrap();

        let settings = load_settings(&path).unwrap();
        assert!(settings.repeat);
        assert_eq!(settings.max_spawn_count, 9);
        assert_eq!(settings.spawn_radius, 100.0);
        assert_eq!(settings.repeat_interval, 5.0);
    }

    #[test]
    fn malformed_preset_names_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.ron");
        fs::write(&path, "(spawn_radius: \"wide\")").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, PresetIoError::RonSpanned { .. }));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let dir = tempdir().unwrap();
        let result = load_settings(&dir.path().join("nope.ron"));
        assert!(matches!(result, Err(PresetIoError::Io(_))));
    }

    #[test]
    fn load_presets_reads_ron_files_by_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("rocks.ron"), "(spawn_radius: 40.0)").unwrap();
        fs::write(dir.path().join("ferns.ron"), "(repeat: true, max_spawn_count: 2)").unwrap();
        fs::write(dir.path().join("notes.txt"), "not a preset").unwrap();

        let presets = load_presets(dir.path()).unwrap();
        let names: Vec<_> = presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["ferns", "rocks"]);
        assert_eq!(presets[0].settings.max_spawn_count, 2);
        assert_eq!(presets[1].settings.spawn_radius, 40.0);
    }

    #[test]
    fn load_presets_from_missing_dir_is_empty() {
        let dir = tempdir().unwrap();
        assert!(load_presets(&dir.path().join("absent")).unwrap().is_empty());
    }
}
