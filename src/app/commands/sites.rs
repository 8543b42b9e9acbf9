//! Commands over generated configuration files: list, show, enable, disable, delete.

use std::path::PathBuf;

use super::{ReloadStatus, reload_after_change};
use crate::app::AppContext;
use crate::domain::layout::display_name;
use crate::domain::{AppError, validate_config_name};
use crate::ports::{Prompter, ServiceControl, SiteStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteStatus {
    Enabled,
    Disabled,
    /// The layout has no enabled directory; every file is active.
    NotApplicable,
}

impl SiteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SiteStatus::Enabled => "enabled",
            SiteStatus::Disabled => "disabled",
            SiteStatus::NotApplicable => "n/a",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub name: String,
    pub file_name: String,
    pub status: SiteStatus,
}

/// Configuration files sorted by name, with their enable status.
///
/// A missing configuration directory lists as empty.
pub fn list<S: SiteStore>(sites: &S) -> Result<Vec<ConfigEntry>, AppError> {
    if !sites.layout().config_dir.is_dir() {
        return Ok(Vec::new());
    }

    let supports_enable = sites.layout().supports_enable();
    let mut entries: Vec<ConfigEntry> = sites
        .list()?
        .into_iter()
        .map(|file_name| {
            let status = if !supports_enable {
                SiteStatus::NotApplicable
            } else if sites.is_enabled(&file_name) {
                SiteStatus::Enabled
            } else {
                SiteStatus::Disabled
            };
            ConfigEntry { name: display_name(&file_name).to_string(), file_name, status }
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.file_name.cmp(&b.file_name)));
    Ok(entries)
}

#[derive(Debug)]
pub struct ShowOutcome {
    pub path: PathBuf,
    pub content: String,
}

pub fn show<S: SiteStore>(sites: &S, config_name: &str) -> Result<ShowOutcome, AppError> {
    validate_config_name(config_name)?;
    let file_name = sites.resolve(config_name)?;
    let content = sites.read(&file_name)?;
    Ok(ShowOutcome { path: sites.layout().config_dir.join(&file_name), content })
}

#[derive(Debug)]
pub struct EnableOutcome {
    pub file_name: String,
    pub link: PathBuf,
    pub reload: ReloadStatus,
}

pub fn enable<S, C, P>(
    ctx: &AppContext<S, C, P>,
    config_name: &str,
    no_reload: bool,
) -> Result<EnableOutcome, AppError>
where
    S: SiteStore,
    C: ServiceControl,
    P: Prompter,
{
    validate_config_name(config_name)?;
    if !ctx.sites().layout().supports_enable() {
        return Err(AppError::EnableUnsupported);
    }
    let file_name = ctx.sites().resolve(config_name)?;
    let link = ctx.sites().enable(&file_name)?;
    let reload = reload_after_change(ctx.service(), no_reload);
    Ok(EnableOutcome { file_name, link, reload })
}

#[derive(Debug)]
pub struct DisableOutcome {
    pub link: PathBuf,
    pub reload: ReloadStatus,
}

pub fn disable<S, C, P>(
    ctx: &AppContext<S, C, P>,
    config_name: &str,
    no_reload: bool,
) -> Result<DisableOutcome, AppError>
where
    S: SiteStore,
    C: ServiceControl,
    P: Prompter,
{
    validate_config_name(config_name)?;
    let link = ctx.sites().disable(config_name)?;
    let reload = reload_after_change(ctx.service(), no_reload);
    Ok(DisableOutcome { link, reload })
}

#[derive(Debug)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted {
        path: PathBuf,
        /// Failure to remove the enable symlink; the file itself was deleted.
        unlink_error: Option<AppError>,
        reload: ReloadStatus,
    },
}

pub fn delete<S, C, P>(
    ctx: &AppContext<S, C, P>,
    config_name: &str,
    force: bool,
    no_reload: bool,
) -> Result<DeleteOutcome, AppError>
where
    S: SiteStore,
    C: ServiceControl,
    P: Prompter,
{
    validate_config_name(config_name)?;
    let sites = ctx.sites();
    let file_name = sites.resolve(config_name)?;
    let path = sites.layout().config_dir.join(&file_name);

    if !force {
        if !ctx.prompter().is_interactive() {
            return Err(AppError::config_error(format!(
                "refusing to delete {} without confirmation. Pass --force to skip the prompt.",
                path.display()
            )));
        }
        let prompt = format!("Are you sure you want to delete {}?", config_name);
        if !ctx.prompter().confirm(&prompt, false)? {
            return Ok(DeleteOutcome::Cancelled);
        }
    }

    let was_enabled = sites.is_enabled(&file_name);
    let unlink_error = if was_enabled { sites.disable(&file_name).err() } else { None };
    sites.delete(&file_name)?;
    tracing::debug!(path = %path.display(), was_enabled, "deleted configuration");

    let reload = reload_after_change(ctx.service(), no_reload || !was_enabled);
    Ok(DeleteOutcome::Deleted { path, unlink_error, reload })
}
