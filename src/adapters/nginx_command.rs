use std::process::Command;

use crate::domain::AppError;
use crate::ports::{ServiceAction, ServiceControl};

/// Binary invoked when no override is configured.
pub const DEFAULT_NGINX_BIN: &str = "nginx";

/// Drives nginx through its command-line signals.
#[derive(Debug, Clone)]
pub struct NginxCommand {
    binary: String,
}

impl NginxCommand {
    pub fn new(binary: impl Into<String>) -> Self {
        Self { binary: binary.into() }
    }

    fn args(action: ServiceAction) -> &'static [&'static str] {
        match action {
            ServiceAction::Test => &["-t"],
            ServiceAction::Reload => &["-s", "reload"],
        }
    }

    fn run(&self, action: ServiceAction) -> Result<String, AppError> {
        let command_line = self.command_line(action);
        tracing::debug!(command = %command_line, "running service command");

        let output = Command::new(&self.binary)
            .args(Self::args(action))
            .output()
            .map_err(|e| AppError::ServiceCommand {
                command: command_line.clone(),
                details: e.to_string(),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}{}", stdout, stderr).trim().to_string();

        if !output.status.success() {
            return Err(AppError::ServiceCommand {
                command: command_line,
                details: if combined.is_empty() { output.status.to_string() } else { combined },
            });
        }

        Ok(combined)
    }
}

impl Default for NginxCommand {
    fn default() -> Self {
        Self::new(DEFAULT_NGINX_BIN)
    }
}

impl ServiceControl for NginxCommand {
    fn test_config(&self) -> Result<(), AppError> {
        self.run(ServiceAction::Test).map(|_| ())
    }

    fn reload(&self) -> Result<(), AppError> {
        self.run(ServiceAction::Reload).map(|_| ())
    }

    fn command_line(&self, action: ServiceAction) -> String {
        format!("{} {}", self.binary, Self::args(action).join(" "))
    }
}
