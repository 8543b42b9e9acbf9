//! Runtime configuration resolved from flags, the settings file and the host.

use std::path::{Path, PathBuf};

use crate::adapters::nginx_command::DEFAULT_NGINX_BIN;
use crate::adapters::settings_file::{default_settings_path, default_template_dir, load_settings};
use crate::adapters::site_filesystem::{SYSTEM_ETC, detect_config_dir, detect_enabled_dir};
use crate::domain::{AppError, ServerLayout, Settings};

/// Values supplied on the command line (or their environment variables).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub template_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub enabled_dir: Option<PathBuf>,
    pub settings_path: Option<PathBuf>,
    pub nginx_bin: Option<String>,
    pub etc_dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Fully resolved configuration handed to every command.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub template_dir: PathBuf,
    pub settings_path: PathBuf,
    /// Effective settings; the built-in defaults when no file exists.
    pub settings: Settings,
    pub settings_found: bool,
    pub layout: Option<ServerLayout>,
    pub nginx_bin: String,
    pub verbose: bool,
}

impl RuntimeConfig {
    /// Resolve with precedence: flag, then settings file, then host detection.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, AppError> {
        let settings_path = match &overrides.settings_path {
            Some(path) => path.clone(),
            None => default_settings_path()?,
        };

        let loaded = load_settings(&settings_path)?;
        let settings_found = loaded.is_some();

        let template_dir = match overrides
            .template_dir
            .clone()
            .or_else(|| loaded.as_ref().and_then(|s| s.template_dir.clone()))
        {
            Some(dir) => dir,
            None => default_template_dir()?,
        };
        let settings = loaded.unwrap_or_else(|| Settings::builtin(template_dir.clone()));

        let etc = overrides.etc_dir.clone().unwrap_or_else(|| PathBuf::from(SYSTEM_ETC));
        let layout = resolve_layout(overrides, &settings, &etc);

        let nginx_bin = overrides
            .nginx_bin
            .clone()
            .or_else(|| settings.nginx_bin.clone())
            .unwrap_or_else(|| DEFAULT_NGINX_BIN.to_string());

        Ok(RuntimeConfig {
            verbose: overrides.verbose || settings.verbose,
            template_dir,
            settings_path,
            settings,
            settings_found,
            layout,
            nginx_bin,
        })
    }

    /// The configuration layout, or an error naming the flag to pass.
    pub fn layout(&self) -> Result<&ServerLayout, AppError> {
        self.layout.as_ref().ok_or_else(|| {
            AppError::config_error(
                "unable to detect nginx configuration directory. Provide --output-dir <DIR>.",
            )
        })
    }

    /// Replace the configuration directory, keeping the enabled directory.
    pub fn with_config_dir(mut self, config_dir: &Path) -> Self {
        let enabled_dir = self.layout.take().and_then(|layout| layout.enabled_dir);
        self.layout = Some(ServerLayout::new(config_dir, enabled_dir));
        self
    }
}

fn resolve_layout(overrides: &ConfigOverrides, settings: &Settings, etc: &Path) -> Option<ServerLayout> {
    let config_dir = overrides
        .output_dir
        .clone()
        .or_else(|| settings.output_dir.clone())
        .or_else(|| detect_config_dir(etc))?;

    let enabled_dir = overrides
        .enabled_dir
        .clone()
        .or_else(|| settings.enabled_dir.clone())
        .or_else(|| detect_enabled_dir(etc));

    Some(ServerLayout::new(config_dir, enabled_dir))
}
