mod prompter;
mod service_control;
mod site_store;

pub use prompter::Prompter;
pub use service_control::{ServiceAction, ServiceControl};
pub use site_store::SiteStore;
