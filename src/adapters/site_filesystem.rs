use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::domain::layout::{config_file_name, file_name_of, is_config_file};
use crate::domain::{AppError, ServerLayout};
use crate::ports::SiteStore;

/// Root of the system configuration tree probed by layout detection.
pub const SYSTEM_ETC: &str = "/etc";

/// Guess the directory generated configurations belong in.
///
/// Prefers an existing `sites-available`, then an existing `conf.d`. When
/// neither exists on Linux, Debian-family systems get `sites-available` and
/// everything else gets `conf.d`.
pub fn detect_config_dir(etc: &Path) -> Option<PathBuf> {
    let nginx = etc.join("nginx");
    let sites_available = nginx.join("sites-available");
    let conf_d = nginx.join("conf.d");

    if sites_available.is_dir() {
        return Some(sites_available);
    }
    if conf_d.is_dir() {
        return Some(conf_d);
    }

    if cfg!(target_os = "linux") {
        let debian = ["debian_version", "lsb-release"].iter().any(|f| etc.join(f).exists());
        tracing::debug!(debian, "no nginx config directory found, guessing from distribution");
        return Some(if debian { sites_available } else { conf_d });
    }

    None
}

/// The `sites-enabled` directory, when this system has one.
pub fn detect_enabled_dir(etc: &Path) -> Option<PathBuf> {
    let sites_enabled = etc.join("nginx").join("sites-enabled");
    sites_enabled.is_dir().then_some(sites_enabled)
}

/// Whether the current user can create files in `dir`.
pub fn check_write_permission(dir: &Path) -> Result<(), AppError> {
    let probe = dir.join(".ngcli-write-test");
    fs::write(&probe, b"test").map_err(|e| AppError::path_io("no write permission to", dir, e))?;
    let _ = fs::remove_file(&probe);
    Ok(())
}

/// Name of the timestamped copy made before an overwrite.
pub fn backup_path(path: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    PathBuf::from(format!("{}.backup-{}", path.display(), stamp))
}

/// Filesystem-backed site store.
#[derive(Debug, Clone)]
pub struct FilesystemSiteStore {
    layout: ServerLayout,
}

impl FilesystemSiteStore {
    pub fn new(layout: ServerLayout) -> Self {
        Self { layout }
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.layout.config_dir.join(file_name)
    }

    fn enabled_dir(&self) -> Result<&Path, AppError> {
        self.layout.enabled_dir.as_deref().ok_or(AppError::EnableUnsupported)
    }
}

fn link_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

#[cfg(unix)]
fn create_symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(source, link)
}

#[cfg(windows)]
fn create_symlink(source: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(source, link)
}

impl SiteStore for FilesystemSiteStore {
    fn layout(&self) -> &ServerLayout {
        &self.layout
    }

    fn resolve(&self, config_name: &str) -> Result<String, AppError> {
        if self.path(config_name).is_file() {
            return Ok(config_name.to_string());
        }
        let with_extension = config_file_name(config_name);
        if self.path(&with_extension).is_file() {
            return Ok(with_extension);
        }
        Err(AppError::ConfigNotFound { path: self.path(config_name) })
    }

    fn exists(&self, file_name: &str) -> bool {
        self.path(file_name).exists()
    }

    fn read(&self, file_name: &str) -> Result<String, AppError> {
        let path = self.path(file_name);
        fs::read_to_string(&path)
            .map_err(|e| AppError::path_io("failed to read configuration", &path, e))
    }

    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf, AppError> {
        let dir = &self.layout.config_dir;
        fs::create_dir_all(dir)
            .map_err(|e| AppError::path_io("failed to create directory", dir, e))?;

        let path = self.path(file_name);
        fs::write(&path, content)
            .map_err(|e| AppError::path_io("failed to write configuration", &path, e))?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote configuration");
        Ok(path)
    }

    fn backup(&self, file_name: &str) -> Result<Option<PathBuf>, AppError> {
        let path = self.path(file_name);
        if !path.exists() {
            return Ok(None);
        }

        let backup = backup_path(&path);
        fs::copy(&path, &backup).map_err(|e| AppError::path_io("failed to create backup", &backup, e))?;
        tracing::debug!(backup = %backup.display(), "backed up existing configuration");
        Ok(Some(backup))
    }

    fn delete(&self, file_name: &str) -> Result<(), AppError> {
        let path = self.path(file_name);
        fs::remove_file(&path)
            .map_err(|e| AppError::path_io("failed to delete configuration", &path, e))
    }

    fn list(&self) -> Result<Vec<String>, AppError> {
        let dir = &self.layout.config_dir;
        let entries =
            fs::read_dir(dir).map_err(|e| AppError::path_io("failed to read directory", dir, e))?;

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| AppError::path_io("failed to read directory", dir, e))?;
            let path = entry.path();
            if path.is_dir() {
                continue;
            }
            if let Some(name) = file_name_of(&path).filter(|name| is_config_file(name)) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn is_enabled(&self, file_name: &str) -> bool {
        self.layout.enabled_path(file_name).is_some_and(|link| link_exists(&link))
    }

    fn enable(&self, file_name: &str) -> Result<PathBuf, AppError> {
        let enabled_dir = self.enabled_dir()?;
        let source = self.path(file_name);
        if !source.is_file() {
            return Err(AppError::ConfigNotFound { path: source });
        }

        let link = enabled_dir.join(file_name);
        if link_exists(&link) {
            fs::remove_file(&link)
                .map_err(|e| AppError::path_io("failed to remove existing symlink", &link, e))?;
        }

        // An absolute target keeps the link valid whatever the enabled dir is.
        let target = fs::canonicalize(&source).unwrap_or(source);
        create_symlink(&target, &link)
            .map_err(|e| AppError::path_io("failed to create symlink", &link, e))?;
        tracing::debug!(link = %link.display(), target = %target.display(), "created symlink");
        Ok(link)
    }

    fn disable(&self, config_name: &str) -> Result<PathBuf, AppError> {
        let enabled_dir = self.enabled_dir()?;

        let link = [config_name.to_string(), config_file_name(config_name)]
            .into_iter()
            .map(|name| enabled_dir.join(name))
            .find(|candidate| link_exists(candidate))
            .ok_or_else(|| AppError::NotEnabled(config_name.to_string()))?;

        let metadata = fs::symlink_metadata(&link)
            .map_err(|e| AppError::path_io("failed to inspect", &link, e))?;
        if !metadata.file_type().is_symlink() {
            return Err(AppError::config_error(format!(
                "{} is not a symbolic link",
                link.display()
            )));
        }

        fs::remove_file(&link).map_err(|e| AppError::path_io("failed to remove symlink", &link, e))?;
        tracing::debug!(link = %link.display(), "removed symlink");
        Ok(link)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Sandbox {
        _root: TempDir,
        store: FilesystemSiteStore,
    }

    fn sandbox(with_enabled: bool) -> Sandbox {
        let root = TempDir::new().unwrap();
        let available = root.path().join("sites-available");
        let enabled = root.path().join("sites-enabled");
        fs::create_dir_all(&available).unwrap();
        if with_enabled {
            fs::create_dir_all(&enabled).unwrap();
        }
        let layout = ServerLayout::new(available, with_enabled.then_some(enabled));
        Sandbox { _root: root, store: FilesystemSiteStore::new(layout) }
    }

    #[test]
    fn resolve_tries_bare_name_then_extension() {
        let sb = sandbox(false);
        sb.store.write("blog.conf", "server {}").unwrap();
        sb.store.write("default", "server {}").unwrap();

        assert_eq!(sb.store.resolve("blog").unwrap(), "blog.conf");
        assert_eq!(sb.store.resolve("blog.conf").unwrap(), "blog.conf");
        assert_eq!(sb.store.resolve("default").unwrap(), "default");
        assert!(matches!(sb.store.resolve("missing"), Err(AppError::ConfigNotFound { .. })));
    }

    #[test]
    fn list_filters_backups_and_directories() {
        let sb = sandbox(false);
        let dir = sb.store.layout().config_dir.clone();
        sb.store.write("a.conf", "").unwrap();
        sb.store.write("default", "").unwrap();
        sb.store.write("a.conf.backup-20240101-000000", "").unwrap();
        fs::create_dir(dir.join("nested")).unwrap();

        let mut names = sb.store.list().unwrap();
        names.sort();
        assert_eq!(names, ["a.conf", "default"]);
    }

    #[test]
    fn backup_copies_with_timestamp_suffix() {
        let sb = sandbox(false);
        sb.store.write("blog.conf", "old").unwrap();

        let backup = sb.store.backup("blog.conf").unwrap().expect("backup created");
        let name = file_name_of(&backup).unwrap().to_string();

        assert!(name.starts_with("blog.conf.backup-"), "{name}");
        let stamp = name.trim_start_matches("blog.conf.backup-");
        assert_eq!(stamp.len(), "YYYYMMDD-HHMMSS".len());
        assert_eq!(fs::read_to_string(&backup).unwrap(), "old");
        assert_eq!(sb.store.backup("absent.conf").unwrap(), None);
    }

    #[test]
    fn enable_disable_lifecycle() {
        let sb = sandbox(true);
        sb.store.write("blog.conf", "server {}").unwrap();

        assert!(!sb.store.is_enabled("blog.conf"));
        let link = sb.store.enable("blog.conf").unwrap();
        assert!(sb.store.is_enabled("blog.conf"));
        assert_eq!(fs::read_to_string(&link).unwrap(), "server {}");

        // Re-enabling replaces the existing link.
        sb.store.enable("blog.conf").unwrap();

        assert_eq!(sb.store.disable("blog").unwrap(), link);
        assert!(!sb.store.is_enabled("blog.conf"));
        assert!(matches!(sb.store.disable("blog"), Err(AppError::NotEnabled(name)) if name == "blog"));
    }

    #[test]
    fn disable_refuses_regular_files() {
        let sb = sandbox(true);
        let enabled = sb.store.layout().enabled_dir.clone().unwrap();
        fs::write(enabled.join("manual.conf"), "").unwrap();

        let err = sb.store.disable("manual").unwrap_err();
        assert!(err.to_string().contains("is not a symbolic link"));
    }

    #[test]
    fn enable_requires_enabled_dir_and_source() {
        let conf_d = sandbox(false);
        conf_d.store.write("blog.conf", "").unwrap();
        assert!(matches!(conf_d.store.enable("blog.conf"), Err(AppError::EnableUnsupported)));
        assert!(!conf_d.store.is_enabled("blog.conf"));

        let debian = sandbox(true);
        assert!(matches!(debian.store.enable("ghost.conf"), Err(AppError::ConfigNotFound { .. })));
    }

    #[test]
    fn detection_prefers_existing_directories() {
        let etc = TempDir::new().unwrap();
        let nginx = etc.path().join("nginx");

        fs::create_dir_all(nginx.join("conf.d")).unwrap();
        assert_eq!(detect_config_dir(etc.path()), Some(nginx.join("conf.d")));
        assert_eq!(detect_enabled_dir(etc.path()), None);

        fs::create_dir_all(nginx.join("sites-available")).unwrap();
        fs::create_dir_all(nginx.join("sites-enabled")).unwrap();
        assert_eq!(detect_config_dir(etc.path()), Some(nginx.join("sites-available")));
        assert_eq!(detect_enabled_dir(etc.path()), Some(nginx.join("sites-enabled")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn detection_falls_back_on_distribution() {
        let etc = TempDir::new().unwrap();
        let nginx = etc.path().join("nginx");
        assert_eq!(detect_config_dir(etc.path()), Some(nginx.join("conf.d")));

        fs::write(etc.path().join("debian_version"), "12\n").unwrap();
        assert_eq!(detect_config_dir(etc.path()), Some(nginx.join("sites-available")));
    }

    #[test]
    fn write_permission_probe_cleans_up() {
        let dir = TempDir::new().unwrap();
        check_write_permission(dir.path()).unwrap();
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
