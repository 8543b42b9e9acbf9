use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::template::ValidationError;

/// Library-wide error type for ngcli operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure without a known path.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// I/O failure on a specific path.
    #[error("{action} {}: {source}", path.display())]
    PathIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Template file does not exist at the resolved path.
    #[error("template not found: {}", path.display())]
    TemplateNotFound { path: PathBuf },

    /// Template body rejected by the template engine.
    #[error("template syntax error in '{template}': {details}")]
    TemplateSyntax { template: String, details: String },

    /// Rendering failed after a successful compile.
    #[error("failed to render template '{template}': {details}")]
    TemplateRender { template: String, details: String },

    /// Declared parameters are missing or hold invalid values.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Template or configuration already exists at the target location.
    #[error("{what} already exists: {}", path.display())]
    AlreadyExists { what: &'static str, path: PathBuf },

    /// Generated configuration file does not exist.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound { path: PathBuf },

    /// Configuration has no enable symlink.
    #[error("configuration not enabled: {0}")]
    NotEnabled(String),

    /// Layout has no sites-enabled directory.
    #[error("sites-enabled directory not found (this system may not support enable/disable)")]
    EnableUnsupported,

    /// Built-in templates are protected from deletion.
    #[error("cannot delete built-in template: {0}")]
    BuiltinTemplate(String),

    /// Name would escape its directory or contains unsupported characters.
    #[error("invalid {what} name '{name}': must be alphanumeric with hyphens, underscores, or periods")]
    InvalidName { what: &'static str, name: String },

    /// `--set` flag does not have the `key=value` shape.
    #[error("invalid set flag format: {0} (expected key=value)")]
    InvalidSetFlag(String),

    /// `--set` flag has an empty key.
    #[error("empty key in set flag: {0}")]
    EmptySetKey(String),

    /// Settings file could not be parsed or written.
    #[error("settings error in {}: {details}", path.display())]
    Settings { path: PathBuf, details: String },

    /// External service command failed.
    #[error("{command} failed: {details}")]
    ServiceCommand { command: String, details: String },

    /// Interactive prompt failed or is unavailable.
    #[error("{0}")]
    Interaction(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn path_io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::PathIo { action, path: path.into(), source }
    }

    /// Provide an `io::ErrorKind`-like view for callers distinguishing failure classes.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::PathIo { source, .. } => source.kind(),
            AppError::TemplateNotFound { .. }
            | AppError::ConfigNotFound { .. }
            | AppError::NotEnabled(_)
            | AppError::EnableUnsupported => io::ErrorKind::NotFound,
            AppError::AlreadyExists { .. } => io::ErrorKind::AlreadyExists,
            AppError::TemplateSyntax { .. }
            | AppError::TemplateRender { .. }
            | AppError::Settings { .. } => io::ErrorKind::InvalidData,
            AppError::Configuration(_)
            | AppError::Validation(_)
            | AppError::BuiltinTemplate(_)
            | AppError::InvalidName { .. }
            | AppError::InvalidSetFlag(_)
            | AppError::EmptySetKey(_)
            | AppError::Interaction(_) => io::ErrorKind::InvalidInput,
            AppError::ServiceCommand { .. } => io::ErrorKind::Other,
        }
    }
}
