use std::env;
use std::path::Path;
use std::process::Command;

use crate::domain::AppError;

const FALLBACK_EDITORS: [&str; 5] = ["nano", "vi", "vim", "code", "emacs"];
const LAST_RESORT_EDITOR: &str = "vi";

/// Choose an editor: explicit flag, `$VISUAL`, `$EDITOR`, then the first
/// common editor found on `PATH`.
pub fn detect_editor(flag: Option<&str>) -> String {
    let from_env = |key: &str| env::var(key).ok().filter(|value| !value.trim().is_empty());

    flag.filter(|value| !value.trim().is_empty())
        .map(str::to_string)
        .or_else(|| from_env("VISUAL"))
        .or_else(|| from_env("EDITOR"))
        .or_else(|| {
            FALLBACK_EDITORS
                .iter()
                .find(|candidate| which::which(candidate).is_ok())
                .map(|candidate| candidate.to_string())
        })
        .unwrap_or_else(|| LAST_RESORT_EDITOR.to_string())
}

/// Editor command that blocks until the file is closed.
///
/// GUI editors that return immediately get `--wait`.
pub fn blocking_editor(editor: &str) -> String {
    let needs_wait =
        (editor.contains("code") || editor.contains("subl")) && !editor.contains("--wait");
    if needs_wait { format!("{editor} --wait") } else { editor.to_string() }
}

/// Run the editor attached to the current terminal.
///
/// The editor string is shell-interpreted so it may carry flags; the file
/// path is passed as `$1` and never parsed by the shell.
pub fn open_in_editor(editor: &str, path: &Path) -> Result<(), AppError> {
    let editor = blocking_editor(editor);
    let command_line = format!("{} {}", editor, path.display());
    tracing::debug!(command = %command_line, "launching editor");

    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{editor} \"$1\""))
        .arg("sh")
        .arg(path)
        .status()
        .map_err(|e| AppError::ServiceCommand {
            command: command_line.clone(),
            details: e.to_string(),
        })?;

    if !status.success() {
        return Err(AppError::ServiceCommand { command: command_line, details: status.to_string() });
    }
    Ok(())
}
