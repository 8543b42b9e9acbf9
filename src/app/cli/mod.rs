//! CLI Adapter.

mod generate;
mod init;
mod sites;
mod template;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::adapters::{FilesystemSiteStore, NginxCommand, TerminalPrompter};
use crate::app::{AppContext, ConfigOverrides, RuntimeConfig};
use crate::domain::AppError;

/// Context wired to the real filesystem, nginx binary, and terminal.
type CliContext = AppContext<FilesystemSiteStore, NginxCommand, TerminalPrompter>;

const RULE_WIDTH: usize = 50;

#[derive(Parser)]
#[command(name = "ngcli")]
#[command(version)]
#[command(about = "Generate and manage nginx configurations from templates", long_about = None)]
struct Cli {
    /// Template directory (default: ~/.ngcli/templates)
    #[arg(long, global = true, env = "NGCLI_TEMPLATE_DIR", value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Directory generated configurations are written to
    #[arg(long, global = true, env = "NGCLI_OUTPUT_DIR", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory holding enable symlinks (sites-enabled)
    #[arg(long, global = true, env = "NGCLI_ENABLED_DIR", value_name = "DIR")]
    enabled_dir: Option<PathBuf>,

    /// Settings file (default: ~/.ngcli/config.yaml)
    #[arg(long = "config", global = true, env = "NGCLI_CONFIG", value_name = "FILE")]
    settings: Option<PathBuf>,

    /// nginx executable used for testing and reloading
    #[arg(long, global = true, env = "NGCLI_NGINX_BIN", value_name = "PATH")]
    nginx_bin: Option<String>,

    /// Root probed for the nginx directory layout
    #[arg(long, global = true, env = "NGCLI_ETC_DIR", hide = true)]
    etc_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Install built-in templates and default settings
    Init,
    /// Generate a configuration from a template
    #[clap(visible_alias = "gen")]
    Generate(generate::GenerateArgs),
    /// List generated configurations
    #[clap(visible_alias = "ls")]
    List {
        /// List templates instead of configurations
        #[arg(short, long)]
        templates: bool,
    },
    /// Print a configuration file
    Show {
        /// Configuration name
        config: String,
    },
    /// Enable a configuration
    Enable {
        /// Configuration name
        config: String,
        /// Do not reload nginx afterwards
        #[arg(long)]
        no_reload: bool,
    },
    /// Disable a configuration
    Disable {
        /// Configuration name
        config: String,
        /// Do not reload nginx afterwards
        #[arg(long)]
        no_reload: bool,
    },
    /// Delete a configuration
    #[clap(visible_alias = "rm")]
    Delete {
        /// Configuration name
        config: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
        /// Do not reload nginx afterwards
        #[arg(long)]
        no_reload: bool,
    },
    /// Reload nginx
    Reload {
        /// Run `nginx -t` first
        #[arg(short, long)]
        test: bool,
        /// Print the commands without running them
        #[arg(long)]
        dry_run: bool,
    },
    /// Manage templates
    #[clap(visible_alias = "tpl")]
    Template {
        #[command(subcommand)]
        command: template::TemplateCommands,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<(), AppError> {
    let overrides = ConfigOverrides {
        template_dir: cli.template_dir,
        output_dir: cli.output_dir,
        enabled_dir: cli.enabled_dir,
        settings_path: cli.settings,
        nginx_bin: cli.nginx_bin,
        etc_dir: cli.etc_dir,
        verbose: cli.verbose,
    };
    let config = RuntimeConfig::resolve(&overrides)?;
    init_logging(config.verbose);
    tracing::debug!(
        template_dir = %config.template_dir.display(),
        settings = %config.settings_path.display(),
        settings_found = config.settings_found,
        layout = ?config.layout,
        "resolved configuration"
    );

    match cli.command {
        Commands::Init => init::run_init(&config),
        Commands::Generate(args) => generate::run_generate(config, args),
        Commands::List { templates: true } => template::run_list_template_files(&config),
        Commands::List { templates: false } => sites::run_list(config),
        Commands::Show { config: name } => sites::run_show(config, &name),
        Commands::Enable { config: name, no_reload } => sites::run_enable(config, &name, no_reload),
        Commands::Disable { config: name, no_reload } => {
            sites::run_disable(config, &name, no_reload)
        }
        Commands::Delete { config: name, force, no_reload } => {
            sites::run_delete(config, &name, force, no_reload)
        }
        Commands::Reload { test, dry_run } => sites::run_reload(&config, test, dry_run),
        Commands::Template { command } => template::run_template(&config, command),
    }
}

/// `RUST_LOG` wins; otherwise `debug` with `--verbose` and `warn` by default.
fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("ngcli=debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// Wire the real adapters; fails when no configuration directory is known.
fn build_context(config: RuntimeConfig) -> Result<CliContext, AppError> {
    let layout = config.layout()?.clone();
    let service = NginxCommand::new(config.nginx_bin.clone());
    Ok(AppContext::new(config, FilesystemSiteStore::new(layout), service, TerminalPrompter::new()))
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}
