use crate::domain::AppError;

/// Operations the tool asks of the running web server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceAction {
    /// Syntax-check the full server configuration.
    Test,
    /// Ask the running server to reload its configuration.
    Reload,
}

/// Port for controlling the external web server process.
pub trait ServiceControl {
    /// Run the configuration test; the error carries the server's diagnostic output.
    fn test_config(&self) -> Result<(), AppError>;

    /// Reload the running server.
    fn reload(&self) -> Result<(), AppError>;

    /// The command line that `action` would execute, for previews.
    fn command_line(&self, action: ServiceAction) -> String;
}
