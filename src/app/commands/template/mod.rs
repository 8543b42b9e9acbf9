//! `template` subcommands operating on the user's template directory.

pub mod create;
pub mod manage;

use std::path::Path;

use crate::domain::AppError;

/// Outcome of handing a template file to the editor.
#[derive(Debug)]
pub enum EditCheck {
    /// The editor was not opened.
    NotOpened,
    /// The edited file compiles.
    Valid,
    /// The edited file was saved but fails to compile.
    Invalid(AppError),
}

/// Run the editor on `path`, then syntax-check whatever was saved.
pub(crate) fn edit_and_check<F>(path: &Path, launch: F) -> Result<EditCheck, AppError>
where
    F: FnOnce(&Path) -> Result<(), AppError>,
{
    launch(path)?;
    Ok(match crate::adapters::template_engine::validate_file(path) {
        Ok(()) => EditCheck::Valid,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "edited template does not compile");
            EditCheck::Invalid(err)
        }
    })
}
