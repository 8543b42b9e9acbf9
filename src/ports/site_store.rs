use std::path::PathBuf;

use crate::domain::{AppError, ServerLayout};

/// Port for generated configuration files and their enable symlinks.
///
/// `file_name` arguments are bare file names inside the configuration directory.
pub trait SiteStore {
    /// The directory layout this store operates on.
    fn layout(&self) -> &ServerLayout;

    /// Map a user-supplied configuration name to an existing file name.
    ///
    /// Tries the name as given, then with `.conf` appended.
    fn resolve(&self, config_name: &str) -> Result<String, AppError>;

    /// Whether a configuration file exists.
    fn exists(&self, file_name: &str) -> bool;

    /// Read a configuration file.
    fn read(&self, file_name: &str) -> Result<String, AppError>;

    /// Write a configuration file, creating the directory if needed.
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf, AppError>;

    /// Copy an existing configuration to a timestamped backup; `None` if absent.
    fn backup(&self, file_name: &str) -> Result<Option<PathBuf>, AppError>;

    /// Delete a configuration file.
    fn delete(&self, file_name: &str) -> Result<(), AppError>;

    /// Configuration file names in enumeration order.
    fn list(&self) -> Result<Vec<String>, AppError>;

    /// Whether an enable symlink exists for the file.
    fn is_enabled(&self, file_name: &str) -> bool;

    /// Create (or replace) the enable symlink; returns its path.
    fn enable(&self, file_name: &str) -> Result<PathBuf, AppError>;

    /// Remove the enable symlink for `config_name` (tried as given, then with
    /// `.conf`); returns its path.
    fn disable(&self, config_name: &str) -> Result<PathBuf, AppError>;
}
