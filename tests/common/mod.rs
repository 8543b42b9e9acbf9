//! Shared testing utilities for ngcli CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated home, template, and nginx directories for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Debian-style layout with `sites-available` and `sites-enabled`.
    pub fn new() -> Self {
        let ctx = Self::without_enabled_dir();
        fs::create_dir_all(ctx.enabled_dir()).expect("Failed to create sites-enabled");
        ctx
    }

    /// `conf.d`-style layout: no enabled directory.
    pub fn without_enabled_dir() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        fs::create_dir_all(root.path().join("home")).expect("Failed to create home");
        fs::create_dir_all(root.path().join("etc")).expect("Failed to create etc");
        let ctx = Self { root };
        fs::create_dir_all(ctx.config_dir()).expect("Failed to create config directory");
        ctx
    }

    pub fn home(&self) -> PathBuf {
        self.root.path().join("home")
    }

    pub fn template_dir(&self) -> PathBuf {
        self.home().join(".ngcli/templates")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home().join(".ngcli/config.yaml")
    }

    pub fn config_dir(&self) -> PathBuf {
        self.root.path().join("nginx/sites-available")
    }

    pub fn enabled_dir(&self) -> PathBuf {
        self.root.path().join("nginx/sites-enabled")
    }

    pub fn config_path(&self, file_name: &str) -> PathBuf {
        self.config_dir().join(file_name)
    }

    pub fn link_path(&self, file_name: &str) -> PathBuf {
        self.enabled_dir().join(file_name)
    }

    /// Build a command for the compiled `ngcli` binary with every location
    /// pointed inside the sandbox and nginx replaced by `true`.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("ngcli").expect("Failed to locate ngcli binary");
        cmd.current_dir(self.root.path())
            .env("HOME", self.home())
            .env("NGCLI_TEMPLATE_DIR", self.template_dir())
            .env("NGCLI_OUTPUT_DIR", self.config_dir())
            .env("NGCLI_CONFIG", self.settings_path())
            .env("NGCLI_NGINX_BIN", "true")
            .env("NGCLI_ETC_DIR", self.root.path().join("etc"))
            .env_remove("NGCLI_ENABLED_DIR")
            .env_remove("RUST_LOG");
        if self.enabled_dir().is_dir() {
            cmd.env("NGCLI_ENABLED_DIR", self.enabled_dir());
        }
        cmd
    }

    /// Run `ngcli init` and assert success.
    pub fn init(&self) {
        self.cli().arg("init").assert().success();
    }

    pub fn write_template(&self, name: &str, content: &str) {
        fs::create_dir_all(self.template_dir()).unwrap();
        fs::write(self.template_dir().join(format!("{name}.conf.tpl")), content).unwrap();
    }

    pub fn write_config(&self, file_name: &str, content: &str) {
        fs::write(self.config_path(file_name), content).unwrap();
    }

    pub fn read_config(&self, file_name: &str) -> String {
        fs::read_to_string(self.config_path(file_name)).unwrap()
    }

    pub fn is_linked(&self, file_name: &str) -> bool {
        is_symlink(&self.link_path(file_name))
    }
}

pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).map(|m| m.file_type().is_symlink()).unwrap_or(false)
}
