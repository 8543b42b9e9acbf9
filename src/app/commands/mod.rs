pub mod generate;
pub mod init;
pub mod reload;
pub mod sites;
pub mod template;

use crate::domain::AppError;
use crate::ports::ServiceControl;

/// What happened to the reload that follows a configuration change.
#[derive(Debug)]
pub enum ReloadStatus {
    Skipped,
    Reloaded,
    Failed(AppError),
}

/// Reload unless `skip`; a failed reload is reported, not raised.
pub(crate) fn reload_after_change<C: ServiceControl>(service: &C, skip: bool) -> ReloadStatus {
    if skip {
        return ReloadStatus::Skipped;
    }
    match service.reload() {
        Ok(()) => ReloadStatus::Reloaded,
        Err(err) => {
            tracing::warn!(error = %err, "reload after change failed");
            ReloadStatus::Failed(err)
        }
    }
}
