//! `init`: install the shipped templates and a default settings file.

use std::path::{Path, PathBuf};

use crate::adapters::TemplateLibrary;
use crate::adapters::builtin_templates::builtin_templates;
use crate::adapters::settings_file::save_settings;
use crate::adapters::site_filesystem::check_write_permission;
use crate::app::RuntimeConfig;
use crate::domain::{AppError, Settings};

#[derive(Debug)]
pub struct InitOutcome {
    pub template_dir: PathBuf,
    /// Built-in templates written by this run.
    pub installed: Vec<String>,
    /// Built-in templates left alone because a file already existed.
    pub skipped: Vec<String>,
    /// Path of the settings file, when this run created it.
    pub settings_written: Option<PathBuf>,
    /// Existing nginx directories the current user cannot write to.
    pub permission_warnings: Vec<AppError>,
}

/// Idempotent: existing templates and settings are never overwritten.
pub fn execute(config: &RuntimeConfig) -> Result<InitOutcome, AppError> {
    let library = TemplateLibrary::new(&config.template_dir);
    library.ensure_dir()?;

    let mut installed = Vec::new();
    let mut skipped = Vec::new();
    for template in builtin_templates()? {
        if library.install(template.name, template.content)? {
            installed.push(template.name.to_string());
        } else {
            skipped.push(template.name.to_string());
        }
    }
    tracing::debug!(?installed, ?skipped, "installed built-in templates");

    let settings_written = if config.settings_path.exists() {
        None
    } else {
        save_settings(&config.settings_path, &Settings::builtin(config.template_dir.clone()))?;
        Some(config.settings_path.clone())
    };

    let permission_warnings = match &config.layout {
        Some(layout) => {
            let dirs = std::iter::once(layout.config_dir.as_path()).chain(layout.enabled_dir.as_deref());
            check_existing(dirs)
        }
        None => Vec::new(),
    };

    Ok(InitOutcome {
        template_dir: config.template_dir.clone(),
        installed,
        skipped,
        settings_written,
        permission_warnings,
    })
}

fn check_existing<'a>(dirs: impl Iterator<Item = &'a Path>) -> Vec<AppError> {
    dirs.filter(|dir| dir.is_dir()).filter_map(|dir| check_write_permission(dir).err()).collect()
}
