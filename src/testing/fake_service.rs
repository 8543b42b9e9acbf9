use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::{ServiceAction, ServiceControl};

/// Records service calls and fails on demand.
#[derive(Default)]
pub struct FakeService {
    pub calls: Mutex<Vec<ServiceAction>>,
    pub test_failure: Mutex<Option<String>>,
    pub reload_failure: Mutex<Option<String>>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_test(&self, output: &str) {
        *self.test_failure.lock().unwrap() = Some(output.to_string());
    }

    pub fn fail_reload(&self, output: &str) {
        *self.reload_failure.lock().unwrap() = Some(output.to_string());
    }

    pub fn calls(&self) -> Vec<ServiceAction> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, action: ServiceAction, failure: &Mutex<Option<String>>) -> Result<(), AppError> {
        self.calls.lock().unwrap().push(action);
        match failure.lock().unwrap().clone() {
            Some(details) => {
                Err(AppError::ServiceCommand { command: self.command_line(action), details })
            }
            None => Ok(()),
        }
    }
}

impl ServiceControl for FakeService {
    fn test_config(&self) -> Result<(), AppError> {
        self.record(ServiceAction::Test, &self.test_failure)
    }

    fn reload(&self) -> Result<(), AppError> {
        self.record(ServiceAction::Reload, &self.reload_failure)
    }

    fn command_line(&self, action: ServiceAction) -> String {
        match action {
            ServiceAction::Test => "nginx -t".to_string(),
            ServiceAction::Reload => "nginx -s reload".to_string(),
        }
    }
}
