pub mod builtin_templates;
pub mod editor;
pub mod nginx_command;
pub mod settings_file;
pub mod site_filesystem;
pub mod template_engine;
pub mod template_library;
pub mod terminal_prompter;

pub use nginx_command::NginxCommand;
pub use site_filesystem::FilesystemSiteStore;
pub use template_engine::Template;
pub use template_library::TemplateLibrary;
pub use terminal_prompter::TerminalPrompter;
