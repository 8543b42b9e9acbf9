//! Where generated configurations live.

use std::path::{Path, PathBuf};

/// Extension given to generated configuration files.
pub const CONFIG_EXTENSION: &str = ".conf";

/// Resolved nginx directory layout.
///
/// Debian-style installs have both `sites-available` and `sites-enabled`;
/// `conf.d` installs have no enabled directory and every file is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerLayout {
    pub config_dir: PathBuf,
    pub enabled_dir: Option<PathBuf>,
}

impl ServerLayout {
    pub fn new(config_dir: impl Into<PathBuf>, enabled_dir: Option<PathBuf>) -> Self {
        Self { config_dir: config_dir.into(), enabled_dir }
    }

    /// Path of the generated file for `config_name`.
    pub fn config_path(&self, config_name: &str) -> PathBuf {
        self.config_dir.join(config_file_name(config_name))
    }

    /// Path of the enable symlink for a configuration file name.
    pub fn enabled_path(&self, file_name: &str) -> Option<PathBuf> {
        self.enabled_dir.as_deref().map(|dir| dir.join(file_name))
    }

    pub fn supports_enable(&self) -> bool {
        self.enabled_dir.is_some()
    }
}

/// File name for a configuration; names already ending in `.conf` are kept.
pub fn config_file_name(config_name: &str) -> String {
    if config_name.ends_with(CONFIG_EXTENSION) {
        config_name.to_string()
    } else {
        format!("{config_name}{CONFIG_EXTENSION}")
    }
}

/// Display name for a configuration file (extension stripped).
pub fn display_name(file_name: &str) -> &str {
    file_name.strip_suffix(CONFIG_EXTENSION).filter(|s| !s.is_empty()).unwrap_or(file_name)
}

/// Whether a directory entry looks like a managed configuration file.
pub fn is_config_file(file_name: &str) -> bool {
    file_name.ends_with(CONFIG_EXTENSION) || !file_name.contains('.')
}

/// File name component of a path as UTF-8, if any.
pub fn file_name_of(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}
