//! Listing, inspecting, editing, deleting, and validating templates.

use std::path::{Path, PathBuf};

use super::{EditCheck, edit_and_check};
use crate::adapters::{Template, TemplateLibrary};
use crate::domain::template::is_builtin;
use crate::domain::{AppError, validate_template_name};
use crate::ports::Prompter;

const DESCRIPTION_WIDTH: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    BuiltIn,
    Custom,
    /// The file could not be loaded.
    Error,
}

impl TemplateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateKind::BuiltIn => "built-in",
            TemplateKind::Custom => "custom",
            TemplateKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSummary {
    pub name: String,
    pub kind: TemplateKind,
    /// Display-ready description, truncated to the table width.
    pub description: String,
}

/// Summaries sorted by name. A missing directory lists as empty.
pub fn list(library: &TemplateLibrary) -> Result<Vec<TemplateSummary>, AppError> {
    if !library.dir().is_dir() {
        return Ok(Vec::new());
    }

    let summaries = library
        .names()?
        .into_iter()
        .map(|name| match library.load(&name) {
            Ok(template) => TemplateSummary {
                kind: if is_builtin(&name) { TemplateKind::BuiltIn } else { TemplateKind::Custom },
                description: truncate_description(&template.metadata().description),
                name,
            },
            Err(err) => {
                tracing::debug!(template = %name, error = %err, "failed to load template");
                TemplateSummary {
                    name,
                    kind: TemplateKind::Error,
                    description: "failed to parse".to_string(),
                }
            }
        })
        .collect();
    Ok(summaries)
}

/// Truncate to 47 characters plus `...` when longer than 50.
pub fn truncate_description(description: &str) -> String {
    if description.is_empty() {
        return "no description".to_string();
    }
    if description.chars().count() > DESCRIPTION_WIDTH {
        let head: String = description.chars().take(DESCRIPTION_WIDTH - 3).collect();
        return format!("{head}...");
    }
    description.to_string()
}

pub fn show(library: &TemplateLibrary, name: &str) -> Result<Template, AppError> {
    validate_template_name(name)?;
    library.load(name)
}

#[derive(Debug)]
pub struct EditOutcome {
    pub path: PathBuf,
    pub check: EditCheck,
}

pub fn edit<F>(library: &TemplateLibrary, name: &str, launch: F) -> Result<EditOutcome, AppError>
where
    F: FnOnce(&Path) -> Result<(), AppError>,
{
    validate_template_name(name)?;
    let path = library.path(name);
    if !path.is_file() {
        return Err(AppError::TemplateNotFound { path });
    }
    let check = edit_and_check(&path, launch)?;
    Ok(EditOutcome { path, check })
}

#[derive(Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted(PathBuf),
}

pub fn delete<P: Prompter>(
    library: &TemplateLibrary,
    prompter: &P,
    name: &str,
    force: bool,
) -> Result<DeleteOutcome, AppError> {
    validate_template_name(name)?;
    if is_builtin(name) {
        return Err(AppError::BuiltinTemplate(name.to_string()));
    }
    if !library.exists(name) {
        return Err(AppError::TemplateNotFound { path: library.path(name) });
    }

    if !force {
        if !prompter.is_interactive() {
            return Err(AppError::config_error(format!(
                "refusing to delete template '{}' without confirmation. Pass --force to skip the prompt.",
                name
            )));
        }
        let prompt = format!("Are you sure you want to delete template '{}'?", name);
        if !prompter.confirm(&prompt, false)? {
            return Ok(DeleteOutcome::Cancelled);
        }
    }

    library.delete(name).map(DeleteOutcome::Deleted)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub name: String,
    pub parameter_count: usize,
    pub required: Vec<String>,
    /// Declared defaults that would fail their own checks.
    pub warnings: Vec<String>,
}

/// Compile the template and summarize its declarations.
pub fn validate(library: &TemplateLibrary, name: &str) -> Result<ValidationReport, AppError> {
    let template = show(library, name)?;
    let metadata = template.metadata();
    Ok(ValidationReport {
        name: template.name().to_string(),
        parameter_count: metadata.parameters.len(),
        required: metadata.required_names().into_iter().map(str::to_string).collect(),
        warnings: metadata.declaration_warnings(),
    })
}
