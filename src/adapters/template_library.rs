use std::fs;
use std::path::{Path, PathBuf};

use super::template_engine::{Template, list_templates};
use crate::domain::AppError;
use crate::domain::template::template_file_name;

/// The user's template directory.
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    dir: PathBuf,
}

impl TemplateLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing template `name`.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.join(template_file_name(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// Template names sorted for display.
    pub fn names(&self) -> Result<Vec<String>, AppError> {
        let mut names = list_templates(&self.dir)?;
        names.sort();
        Ok(names)
    }

    pub fn load(&self, name: &str) -> Result<Template, AppError> {
        Template::load(name, &self.dir)
    }

    pub fn ensure_dir(&self) -> Result<(), AppError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::path_io("failed to create template directory", &self.dir, e))
    }

    /// Write a new template; fails if one with the same name exists.
    pub fn create(&self, name: &str, content: &str) -> Result<PathBuf, AppError> {
        let path = self.path(name);
        if path.exists() {
            return Err(AppError::AlreadyExists { what: "template", path });
        }
        self.ensure_dir()?;
        fs::write(&path, content).map_err(|e| AppError::path_io("failed to write template", &path, e))?;
        tracing::debug!(template = name, path = %path.display(), "created template");
        Ok(path)
    }

    /// Write a template only if absent. Returns whether it was written.
    pub fn install(&self, name: &str, content: &str) -> Result<bool, AppError> {
        match self.create(name, content) {
            Ok(_) => Ok(true),
            Err(AppError::AlreadyExists { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    pub fn delete(&self, name: &str) -> Result<PathBuf, AppError> {
        let path = self.path(name);
        if !path.is_file() {
            return Err(AppError::TemplateNotFound { path });
        }
        fs::remove_file(&path)
            .map_err(|e| AppError::path_io("failed to delete template", &path, e))?;
        Ok(path)
    }
}
