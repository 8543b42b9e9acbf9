//! Minijinja-backed template engine.
//!
//! Template bodies use minijinja syntax: `{{ domain }}` placeholders,
//! `{% if ssl_enabled == "yes" %}` conditionals and `{% for name in aliases | csv %}`
//! loops over comma-separated `array` values. A placeholder whose parameter is
//! absent renders as the empty string.

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::domain::AppError;
use crate::domain::template::{
    self, Parameters, TemplateMetadata, template_file_name, template_name_from_file,
};

/// A loaded, render-ready template.
#[derive(Debug)]
pub struct Template {
    name: String,
    path: PathBuf,
    raw_content: String,
    engine: Environment<'static>,
    metadata: TemplateMetadata,
}

impl Template {
    /// Load `name` (with or without the `.conf.tpl` suffix) from `dir`.
    pub fn load(name: &str, dir: &Path) -> Result<Self, AppError> {
        let file_name = template_file_name(name);
        let path = dir.join(&file_name);

        if !path.is_file() {
            return Err(AppError::TemplateNotFound { path });
        }

        let raw_content = fs::read_to_string(&path)
            .map_err(|e| AppError::path_io("failed to read template", &path, e))?;
        let logical_name = template_name_from_file(&file_name).unwrap_or(name).to_string();

        tracing::debug!(template = %logical_name, path = %path.display(), "loading template");
        Self::from_source(logical_name, path, raw_content)
    }

    /// Build a template from text already in memory.
    pub fn from_source(
        name: impl Into<String>,
        path: impl Into<PathBuf>,
        raw_content: impl Into<String>,
    ) -> Result<Self, AppError> {
        let name = name.into();
        let raw_content = raw_content.into();

        let mut engine = build_environment();
        engine.add_template_owned(name.clone(), raw_content.clone()).map_err(|e| {
            AppError::TemplateSyntax { template: name.clone(), details: e.to_string() }
        })?;

        let metadata = template::parse(&raw_content);
        tracing::debug!(
            template = %name,
            parameters = metadata.parameters.len(),
            "compiled template"
        );

        Ok(Self { name, path: path.into(), raw_content, engine, metadata })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn raw_content(&self) -> &str {
        &self.raw_content
    }

    pub fn metadata(&self) -> &TemplateMetadata {
        &self.metadata
    }

    /// Substitute `params` without validation.
    pub fn render(&self, params: &Parameters) -> Result<String, AppError> {
        let compiled = self.engine.get_template(&self.name).map_err(|e| AppError::TemplateRender {
            template: self.name.clone(),
            details: e.to_string(),
        })?;

        compiled.render(params).map_err(|e| AppError::TemplateRender {
            template: self.name.clone(),
            details: e.to_string(),
        })
    }

    /// Apply declared defaults, validate, then render.
    pub fn render_validated(&self, params: &Parameters) -> Result<String, AppError> {
        let resolved = self.metadata.apply_defaults(params);
        self.metadata.validate(&resolved)?;
        self.render(&resolved)
    }
}

/// Logical names of the templates in `dir` (non-recursive, enumeration order).
pub fn list_templates(dir: &Path) -> Result<Vec<String>, AppError> {
    let entries = fs::read_dir(dir)
        .map_err(|e| AppError::path_io("failed to read template directory", dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| AppError::path_io("failed to read template directory", dir, e))?;
        if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
            continue;
        }
        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str().and_then(template_name_from_file) {
            names.push(name.to_string());
        }
    }

    Ok(names)
}

/// Check that `raw_text` compiles, without loading metadata.
pub fn validate_syntax(raw_text: &str) -> Result<(), AppError> {
    let engine = build_environment();
    engine
        .template_from_str(raw_text)
        .map(|_| ())
        .map_err(|e| AppError::TemplateSyntax { template: "<input>".into(), details: e.to_string() })
}

/// Check the syntax of a template file on disk.
pub fn validate_file(path: &Path) -> Result<(), AppError> {
    let raw_text = fs::read_to_string(path)
        .map_err(|e| AppError::path_io("failed to read template", path, e))?;
    validate_syntax(&raw_text).map_err(|err| match err {
        AppError::TemplateSyntax { details, .. } => {
            AppError::TemplateSyntax { template: path.display().to_string(), details }
        }
        other => other,
    })
}

fn build_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Lenient);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("csv", csv);
    env
}

/// Split a comma-separated `array` value into trimmed, non-empty items.
fn csv(value: String) -> Vec<String> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty()).map(str::to_string).collect()
}
