use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{FakeService, ScriptedPrompter};
use crate::adapters::FilesystemSiteStore;
use crate::adapters::builtin_templates::builtin_templates;
use crate::app::{AppContext, RuntimeConfig};
use crate::domain::{ServerLayout, Settings};

pub type TestContext = AppContext<FilesystemSiteStore, FakeService, ScriptedPrompter>;

/// Throwaway template and nginx directories for command tests.
pub struct Sandbox {
    root: TempDir,
    pub config: RuntimeConfig,
}

impl Sandbox {
    /// Debian-style layout with a `sites-enabled` directory.
    pub fn new() -> Self {
        Self::build(true)
    }

    /// `conf.d`-style layout without an enabled directory.
    pub fn without_enabled_dir() -> Self {
        Self::build(false)
    }

    fn build(with_enabled: bool) -> Self {
        let root = TempDir::new().expect("create sandbox");
        let template_dir = root.path().join("templates");
        let config_dir = root.path().join("sites-available");
        let enabled_dir = root.path().join("sites-enabled");
        fs::create_dir_all(&template_dir).unwrap();
        fs::create_dir_all(&config_dir).unwrap();
        if with_enabled {
            fs::create_dir_all(&enabled_dir).unwrap();
        }

        let config = RuntimeConfig {
            settings_path: root.path().join("config.yaml"),
            settings: Settings::builtin(template_dir.clone()),
            settings_found: false,
            layout: Some(ServerLayout::new(config_dir, with_enabled.then_some(enabled_dir))),
            nginx_bin: "nginx".to_string(),
            verbose: false,
            template_dir,
        };
        Self { root, config }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("sites-available")
    }

    pub fn enabled_dir(&self) -> PathBuf {
        self.root.path().join("sites-enabled")
    }

    pub fn write_template(&self, name: &str, content: &str) {
        fs::write(self.config.template_dir.join(format!("{name}.conf.tpl")), content).unwrap();
    }

    pub fn install_builtins(&self) {
        for template in builtin_templates().unwrap() {
            fs::write(self.config.template_dir.join(template.file_name), template.content).unwrap();
        }
    }

    pub fn write_config(&self, file_name: &str, content: &str) {
        fs::write(self.config_dir().join(file_name), content).unwrap();
    }

    pub fn context(&self, prompter: ScriptedPrompter) -> TestContext {
        let layout = self.config.layout.clone().expect("sandbox layout");
        AppContext::new(
            self.config.clone(),
            FilesystemSiteStore::new(layout),
            FakeService::new(),
            prompter,
        )
    }
}
