use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::domain::settings::{parse_settings_content, render_settings};
use crate::domain::{AppError, Settings};

const APP_DIR: &str = ".ngcli";
const SETTINGS_FILE: &str = "config.yaml";
const TEMPLATES_DIR: &str = "templates";

fn app_home() -> Result<PathBuf, AppError> {
    dirs::home_dir()
        .map(|home| home.join(APP_DIR))
        .ok_or_else(|| AppError::config_error("could not determine home directory"))
}

/// `~/.ngcli/config.yaml`
pub fn default_settings_path() -> Result<PathBuf, AppError> {
    Ok(app_home()?.join(SETTINGS_FILE))
}

/// `~/.ngcli/templates`
pub fn default_template_dir() -> Result<PathBuf, AppError> {
    Ok(app_home()?.join(TEMPLATES_DIR))
}

/// Read settings from `path`; `None` when the file does not exist.
pub fn load_settings(path: &Path) -> Result<Option<Settings>, AppError> {
    match fs::read_to_string(path) {
        Ok(content) => parse_settings_content(&content, path).map(Some),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(AppError::path_io("failed to read settings", path, err)),
    }
}

/// Write settings to `path`, creating its directory.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<(), AppError> {
    let content = render_settings(settings, path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::path_io("failed to create directory", parent, e))?;
    }
    fs::write(path, content).map_err(|e| AppError::path_io("failed to write settings", path, e))
}
