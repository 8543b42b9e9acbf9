//! `reload`: optionally test, then reload the running server.

use crate::domain::AppError;
use crate::ports::{ServiceAction, ServiceControl};

#[derive(Debug, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Dry run: the command lines that would execute, in order.
    Preview(Vec<String>),
    Reloaded,
}

pub fn execute<C: ServiceControl>(
    service: &C,
    test_first: bool,
    dry_run: bool,
) -> Result<ReloadOutcome, AppError> {
    if dry_run {
        let mut commands = Vec::new();
        if test_first {
            commands.push(service.command_line(ServiceAction::Test));
        }
        commands.push(service.command_line(ServiceAction::Reload));
        return Ok(ReloadOutcome::Preview(commands));
    }

    if test_first {
        service.test_config().map_err(|err| {
            AppError::config_error(format!("configuration test failed: {}", err))
        })?;
    }
    service.reload()?;
    Ok(ReloadOutcome::Reloaded)
}
