use super::config::RuntimeConfig;
use crate::adapters::TemplateLibrary;
use crate::ports::{Prompter, ServiceControl, SiteStore};

/// Application context holding dependencies for command execution.
pub struct AppContext<S: SiteStore, C: ServiceControl, P: Prompter> {
    config: RuntimeConfig,
    templates: TemplateLibrary,
    sites: S,
    service: C,
    prompter: P,
}

impl<S: SiteStore, C: ServiceControl, P: Prompter> AppContext<S, C, P> {
    /// Create a new application context.
    pub fn new(config: RuntimeConfig, sites: S, service: C, prompter: P) -> Self {
        let templates = TemplateLibrary::new(&config.template_dir);
        Self { config, templates, sites, service, prompter }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Get a reference to the template directory.
    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    /// Get a reference to the configuration store.
    pub fn sites(&self) -> &S {
        &self.sites
    }

    pub fn service(&self) -> &C {
        &self.service
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }
}
