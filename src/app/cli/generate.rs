//! Generate command implementation.

use std::path::{Path, PathBuf};

use clap::Args;

use super::{build_context, rule};
use crate::app::RuntimeConfig;
use crate::app::commands::generate::{self, Activation, GenerateOptions, GenerateOutcome};
use crate::domain::AppError;
use crate::domain::layout::file_name_of;

#[derive(Args)]
pub struct GenerateArgs {
    /// Configuration name (written as <name>.conf)
    config: String,
    /// Template to render (prompted when omitted)
    #[arg(short, long)]
    template: Option<String>,
    /// Template parameter as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    set: Vec<String>,
    /// Prompt for parameters not given with --set
    #[arg(short, long)]
    interactive: bool,
    /// Print the rendered configuration without writing it
    #[arg(long)]
    dry_run: bool,
    /// Output file path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Overwrite an existing file without asking
    #[arg(short, long, visible_alias = "yes")]
    force: bool,
}

pub fn run_generate(config: RuntimeConfig, args: GenerateArgs) -> Result<(), AppError> {
    let mut options = GenerateOptions {
        config_name: args.config,
        template: args.template,
        set: args.set,
        interactive: args.interactive,
        dry_run: args.dry_run,
        force: args.force,
        file_name: None,
    };

    let config = match &args.output {
        Some(output) => {
            let file_name = file_name_of(output).ok_or_else(|| {
                AppError::config_error(format!("invalid output path: {}", output.display()))
            })?;
            options.file_name = Some(file_name.to_string());
            let parent = output.parent().filter(|p| !p.as_os_str().is_empty());
            config.with_config_dir(parent.unwrap_or(Path::new(".")))
        }
        None => config,
    };

    let ctx = build_context(config)?;
    match generate::execute(&ctx, &options)? {
        GenerateOutcome::ParametersRequired { template, description, help } => {
            println!("Template: {}", template);
            if !description.is_empty() {
                println!("Description: {}", description);
            }
            println!();
            print!("{}", help);
            if options.dry_run {
                println!(
                    "Use --set key=value to provide parameters, or --interactive for guided input"
                );
            } else {
                println!("Use --set key=value to provide parameters manually");
            }
        }
        GenerateOutcome::Invalid { error, help } => {
            return Err(AppError::config_error(format!(
                "Template validation failed: {}\n\n{}",
                error,
                help.trim_end()
            )));
        }
        GenerateOutcome::Preview { config_name, template, description, content } => {
            println!("Config: {} (using template: {})", config_name, template);
            if !description.is_empty() {
                println!("Description: {}", description);
            }
            println!("Generated configuration preview:");
            println!("{}", rule());
            print!("{}", content);
            if !content.ends_with('\n') {
                println!();
            }
            println!("{}", rule());
        }
        GenerateOutcome::Cancelled => println!("Operation cancelled"),
        GenerateOutcome::Written(report) => {
            println!("✅ Generated configuration: {}", report.config_path.display());
            if let Some(backup) = &report.backup {
                println!("Backup of previous file: {}", backup.display());
            }
            if report.description.is_empty() {
                println!("Template: {}", report.template);
            } else {
                println!("Template: {} - {}", report.template, report.description);
            }

            match report.activation {
                Activation::TestFailed(err) => {
                    println!();
                    println!("Error: nginx -t validation failed: {}", err);
                    println!("Configuration file generated but NOT enabled (syntax errors detected)");
                    println!(
                        "Please fix the configuration manually and run 'ngcli enable' when ready"
                    );
                    return Err(AppError::config_error("nginx validation failed"));
                }
                Activation::EnableFailed(err) => {
                    println!("⚠️  Warning: failed to enable configuration: {}", err);
                    println!("Configuration generated but not enabled");
                    println!("Run 'ngcli enable {}' manually to enable it", report.file_name);
                }
                Activation::Applied { link, reload_error } => {
                    if link.is_some() {
                        println!("✅ Enabled configuration: {}", report.file_name);
                    }
                    match reload_error {
                        Some(err) => {
                            println!("⚠️  Warning: failed to reload nginx: {}", err);
                            println!(
                                "Configuration generated and enabled but nginx reload failed"
                            );
                            println!("Run 'ngcli reload' manually to apply changes");
                        }
                        None => {
                            println!("✅ Nginx configuration reloaded successfully");
                            println!();
                            println!("Configuration is now active!");
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
