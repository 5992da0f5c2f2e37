use std::fs;
use std::path::{Path, PathBuf};

use crate::config::settings::Settings;
use crate::error::ConfigError;

pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("econ-brief").join("settings.json"))
}

/// Load settings from `explicit` if given, otherwise from the default
/// location. Only an explicit path is required to exist.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    if let Some(path) = explicit {
        return read_settings(path);
    }

    match default_settings_path() {
        Some(path) if path.is_file() => read_settings(&path),
        _ => Ok(Settings::default()),
    }
}

/// Read a settings file. A relative `prompt.file` inside it is taken
/// relative to the settings file's own directory.
pub fn read_settings(path: &Path) -> Result<Settings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let mut settings: Settings =
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if let (Some(file), Some(base)) = (settings.prompt.file.as_mut(), path.parent()) {
        if file.is_relative() {
            *file = base.join(&*file);
        }
    }

    Ok(settings)
}
