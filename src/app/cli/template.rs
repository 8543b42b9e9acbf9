//! Template command implementation.

use std::path::Path;

use clap::Subcommand;

use super::rule;
use crate::adapters::editor::{detect_editor, open_in_editor};
use crate::adapters::{TemplateLibrary, TerminalPrompter};
use crate::app::RuntimeConfig;
use crate::app::commands::template::create::{self, CreateOptions};
use crate::app::commands::template::manage::{self, DeleteOutcome};
use crate::app::commands::template::EditCheck;
use crate::domain::AppError;
use crate::domain::template::template_file_name;

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Create a new template from the skeleton or an existing template
    #[clap(visible_alias = "new")]
    Create {
        /// Template name
        name: String,
        /// Copy an existing template instead of the skeleton
        #[arg(long, value_name = "TEMPLATE")]
        from: Option<String>,
        /// Open the editor without asking
        #[arg(short, long)]
        edit: bool,
        /// Editor command (default: $VISUAL, $EDITOR, then a common editor)
        #[arg(long)]
        editor: Option<String>,
    },
    /// List templates
    #[clap(visible_alias = "ls")]
    List,
    /// Show a template's metadata, parameters, and content
    Show {
        /// Template name
        name: String,
        /// Only show parameter help
        #[arg(short, long)]
        params: bool,
    },
    /// Open a template in an editor
    Edit {
        /// Template name
        name: String,
        /// Editor command
        #[arg(long)]
        editor: Option<String>,
    },
    /// Delete a custom template
    #[clap(visible_alias = "rm")]
    Delete {
        /// Template name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Check a template's syntax and declarations
    Validate {
        /// Template name
        name: String,
    },
}

pub fn run_template(config: &RuntimeConfig, command: TemplateCommands) -> Result<(), AppError> {
    let library = TemplateLibrary::new(&config.template_dir);
    match command {
        TemplateCommands::Create { name, from, edit, editor } => {
            run_create(&library, CreateOptions { name, from, edit }, editor.as_deref())
        }
        TemplateCommands::List => run_list(&library),
        TemplateCommands::Show { name, params } => run_show(&library, &name, params),
        TemplateCommands::Edit { name, editor } => run_edit(&library, &name, editor.as_deref()),
        TemplateCommands::Delete { name, force } => run_delete(&library, &name, force),
        TemplateCommands::Validate { name } => run_validate(&library, &name),
    }
}

/// `list --templates`: template files in the configured directory.
pub fn run_list_template_files(config: &RuntimeConfig) -> Result<(), AppError> {
    let library = TemplateLibrary::new(&config.template_dir);
    if !library.dir().is_dir() {
        println!("Template directory does not exist: {}", library.dir().display());
        println!("Run 'ngcli init' to initialize templates");
        return Ok(());
    }

    let names = library.names()?;
    println!("Available templates ({}):", library.dir().display());
    println!();
    println!("{:<20} {}", "NAME", "FILE");
    println!("{:<20} {}", "----", "----");
    for name in &names {
        println!("{:<20} {}", name, template_file_name(name));
    }
    println!();
    println!("Total: {} templates", names.len());
    Ok(())
}

fn launcher(editor: Option<&str>) -> impl FnOnce(&Path) -> Result<(), AppError> {
    let editor = detect_editor(editor);
    move |path: &Path| open_in_editor(&editor, path)
}

fn print_edit_check(name: &str, check: &EditCheck) {
    match check {
        EditCheck::NotOpened => {}
        EditCheck::Valid => println!("✅ Template {} saved and validated successfully", name),
        EditCheck::Invalid(err) => {
            println!("⚠️  Warning: template validation failed: {}", err);
            println!("Template saved but may have syntax errors");
        }
    }
}

fn run_create(
    library: &TemplateLibrary,
    options: CreateOptions,
    editor: Option<&str>,
) -> Result<(), AppError> {
    let prompter = TerminalPrompter::new();
    let outcome = create::execute(library, &prompter, &options, launcher(editor))?;

    println!("✅ Created template: {}", outcome.name);
    println!("Template file: {}", outcome.path.display());
    match outcome.edit {
        EditCheck::NotOpened => {
            println!("Template created. Use 'ngcli template edit' to modify it later");
        }
        ref check => print_edit_check(&outcome.name, check),
    }
    Ok(())
}

fn run_list(library: &TemplateLibrary) -> Result<(), AppError> {
    let summaries = manage::list(library)?;
    if summaries.is_empty() {
        println!("No templates found in {}", library.dir().display());
        println!(
            "Run 'ngcli init' to create default templates or 'ngcli template create' to create custom templates"
        );
        return Ok(());
    }

    println!("Available templates ({}):", library.dir().display());
    println!();
    println!("{:<20} {:<10} {}", "NAME", "TYPE", "DESCRIPTION");
    println!("{:<20} {:<10} {}", "----", "----", "-----------");
    for summary in &summaries {
        println!("{:<20} {:<10} {}", summary.name, summary.kind.as_str(), summary.description);
    }
    println!();
    println!("Total: {} templates", summaries.len());
    Ok(())
}

fn run_show(library: &TemplateLibrary, name: &str, params_only: bool) -> Result<(), AppError> {
    let template = manage::show(library, name)?;
    let metadata = template.metadata();

    if params_only {
        println!("Template: {}", template.name());
        if !metadata.description.is_empty() {
            println!("Description: {}", metadata.description);
        }
        println!();
        print!("{}", metadata.parameter_help());
        return Ok(());
    }

    println!("Template: {}", template.name());
    println!("File: {}", template.path().display());
    for (label, value) in [
        ("Description", &metadata.description),
        ("Author", &metadata.author),
        ("Version", &metadata.version),
    ] {
        if !value.is_empty() {
            println!("{}: {}", label, value);
        }
    }
    println!();
    print!("{}", metadata.parameter_help());
    println!();
    println!("Template content:");
    println!("{}", rule());
    print!("{}", template.raw_content());
    if !template.raw_content().ends_with('\n') {
        println!();
    }
    println!("{}", rule());
    Ok(())
}

fn run_edit(library: &TemplateLibrary, name: &str, editor: Option<&str>) -> Result<(), AppError> {
    let outcome = manage::edit(library, name, launcher(editor))?;
    print_edit_check(name, &outcome.check);
    Ok(())
}

fn run_delete(library: &TemplateLibrary, name: &str, force: bool) -> Result<(), AppError> {
    match manage::delete(library, &TerminalPrompter::new(), name, force)? {
        DeleteOutcome::Cancelled => println!("Deletion cancelled"),
        DeleteOutcome::Deleted(_) => println!("✅ Deleted template: {}", name),
    }
    Ok(())
}

fn run_validate(library: &TemplateLibrary, name: &str) -> Result<(), AppError> {
    let report = manage::validate(library, name)?;

    println!("Template: {}", report.name);
    println!("Syntax: valid");
    if report.parameter_count == 0 {
        println!("Parameters: none defined");
    } else {
        println!("Parameters: {} defined", report.parameter_count);
    }
    if !report.required.is_empty() {
        println!("Required parameters: {}", report.required.join(", "));
    }
    for warning in &report.warnings {
        println!("⚠️  Warning: {}", warning);
    }
    println!("✅ Template validation successful");
    Ok(())
}
