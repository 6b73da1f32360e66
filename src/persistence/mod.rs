//! JSON persistence for settings and records
//!
//! Writes go to a sibling `.tmp` file first and are renamed over the target,
//! so a crash mid-write leaves the previous file intact.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::tuning::TuningError;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}

impl PersistError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read and parse a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, PersistError> {
    let text = fs::read_to_string(path).map_err(|e| PersistError::io(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Read a JSON file, falling back to `T::default()` when it is missing or broken
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    match load_json(path) {
        Ok(value) => value,
        Err(PersistError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No file at {}, using defaults", path.display());
            T::default()
        }
        Err(e) => {
            log::warn!("Failed to load {}: {e}; using defaults", path.display());
            T::default()
        }
    }
}

/// Serialize to pretty JSON and atomically replace `path`
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), PersistError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, json).map_err(|e| PersistError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| PersistError::io(path, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("pianew-tiles-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_save_then_load() {
        let dir = scratch_dir("save-load");
        let path = dir.join("settings.json");
        let settings = Settings {
            haptics: false,
            music_volume: 20,
            ..Settings::default()
        };
        save_json(&path, &settings).unwrap();
        assert!(!path.with_extension("tmp").exists());

        let loaded: Settings = load_json(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_or_broken_file_falls_back() {
        let dir = scratch_dir("fallback");
        let path = dir.join("settings.json");
        let loaded: Settings = load_json_or_default(&path);
        assert_eq!(loaded, Settings::default());

        fs::create_dir_all(&dir).unwrap();
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            load_json::<Settings>(&path),
            Err(PersistError::Json(_))
        ));
        let loaded: Settings = load_json_or_default(&path);
        assert_eq!(loaded, Settings::default());
        let _ = fs::remove_dir_all(&dir);
    }
}
