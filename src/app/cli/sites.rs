//! Configuration file commands: list, show, enable, disable, delete, reload.

use super::build_context;
use crate::adapters::NginxCommand;
use crate::app::RuntimeConfig;
use crate::app::commands::reload::{self, ReloadOutcome};
use crate::app::commands::sites::{self, DeleteOutcome};
use crate::app::commands::ReloadStatus;
use crate::domain::AppError;
use crate::domain::layout::file_name_of;

pub fn run_list(config: RuntimeConfig) -> Result<(), AppError> {
    let ctx = build_context(config)?;
    let dir = &ctx.config().layout()?.config_dir;
    let entries = sites::list(ctx.sites())?;

    if entries.is_empty() {
        println!("No configuration files found in {}", dir.display());
        return Ok(());
    }

    println!("Nginx configurations ({}):", dir.display());
    println!();
    println!("{:<30} {}", "NAME", "STATUS");
    println!("{:<30} {}", "----", "------");
    for entry in &entries {
        println!("{:<30} {}", entry.name, entry.status.as_str());
    }
    println!();
    println!("Total: {} configurations", entries.len());
    Ok(())
}

pub fn run_show(config: RuntimeConfig, name: &str) -> Result<(), AppError> {
    let ctx = build_context(config)?;
    let shown = sites::show(ctx.sites(), name)?;

    println!("Configuration: {}", shown.path.display());
    println!("---");
    print!("{}", shown.content);
    if !shown.content.ends_with('\n') {
        println!();
    }
    Ok(())
}

pub fn run_enable(config: RuntimeConfig, name: &str, no_reload: bool) -> Result<(), AppError> {
    let ctx = build_context(config)?;
    let outcome = sites::enable(&ctx, name, no_reload)?;

    println!("✅ Enabled configuration: {}", outcome.file_name);
    print_reload(outcome.reload, "Configuration enabled but nginx reload failed");
    Ok(())
}

pub fn run_disable(config: RuntimeConfig, name: &str, no_reload: bool) -> Result<(), AppError> {
    let ctx = build_context(config)?;
    let outcome = sites::disable(&ctx, name, no_reload)?;

    println!("✅ Disabled configuration: {}", file_name_of(&outcome.link).unwrap_or(name));
    print_reload(outcome.reload, "Configuration disabled but nginx reload failed");
    Ok(())
}

pub fn run_delete(
    config: RuntimeConfig,
    name: &str,
    force: bool,
    no_reload: bool,
) -> Result<(), AppError> {
    let ctx = build_context(config)?;
    match sites::delete(&ctx, name, force, no_reload)? {
        DeleteOutcome::Cancelled => println!("Deletion cancelled"),
        DeleteOutcome::Deleted { unlink_error, reload, .. } => {
            if let Some(err) = unlink_error {
                println!("⚠️  Warning: failed to remove symlink: {}", err);
            }
            println!("✅ Deleted configuration: {}", name);
            print_reload(reload, "Configuration deleted but nginx reload failed");
        }
    }
    Ok(())
}

pub fn run_reload(config: &RuntimeConfig, test: bool, dry_run: bool) -> Result<(), AppError> {
    let service = NginxCommand::new(config.nginx_bin.clone());
    match reload::execute(&service, test, dry_run)? {
        ReloadOutcome::Preview(commands) => {
            println!("Commands that would be executed:");
            for command in commands {
                println!("  {}", command);
            }
        }
        ReloadOutcome::Reloaded => println!("✅ Nginx configuration reloaded successfully"),
    }
    Ok(())
}

fn print_reload(status: ReloadStatus, failure_summary: &str) {
    match status {
        ReloadStatus::Skipped => {}
        ReloadStatus::Reloaded => println!("✅ Nginx configuration reloaded successfully"),
        ReloadStatus::Failed(err) => {
            println!("⚠️  Warning: failed to reload nginx: {}", err);
            println!("{}", failure_summary);
            println!("Run 'ngcli reload' manually to apply changes");
        }
    }
}
