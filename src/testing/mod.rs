mod fake_service;
mod sandbox;
mod scripted_prompter;

pub use fake_service::FakeService;
pub use sandbox::{Sandbox, TestContext};
pub use scripted_prompter::{Answer, ScriptedPrompter};
