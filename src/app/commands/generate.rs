//! `generate`: render a template into a configuration file and activate it.

use std::path::PathBuf;

use crate::adapters::Template;
use crate::app::AppContext;
use crate::domain::layout::config_file_name;
use crate::domain::{
    AppError, ParameterInfo, Parameters, ValidationError, parse_set_flags, validate_config_name,
    validate_template_name,
};
use crate::ports::{Prompter, ServiceControl, SiteStore};

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub config_name: String,
    pub template: Option<String>,
    pub set: Vec<String>,
    pub interactive: bool,
    pub dry_run: bool,
    pub force: bool,
    /// Output file name overriding `<config_name>.conf`.
    pub file_name: Option<String>,
}

#[derive(Debug)]
pub enum GenerateOutcome {
    /// The template declares parameters but none were supplied.
    ParametersRequired { template: String, description: String, help: String },
    /// Rendering was rejected by parameter validation.
    Invalid { error: ValidationError, help: String },
    Preview { config_name: String, template: String, description: String, content: String },
    Cancelled,
    Written(GenerateReport),
}

#[derive(Debug)]
pub struct GenerateReport {
    pub config_path: PathBuf,
    pub file_name: String,
    pub backup: Option<PathBuf>,
    pub template: String,
    pub description: String,
    pub activation: Activation,
}

/// Post-write steps: test, enable, reload.
#[derive(Debug)]
pub enum Activation {
    /// `nginx -t` rejected the configuration; it was written but not enabled.
    TestFailed(AppError),
    /// The enable symlink could not be created; reload was not attempted.
    EnableFailed(AppError),
    /// `link` is `None` on layouts without an enabled directory.
    Applied { link: Option<PathBuf>, reload_error: Option<AppError> },
}

pub fn execute<S, C, P>(
    ctx: &AppContext<S, C, P>,
    options: &GenerateOptions,
) -> Result<GenerateOutcome, AppError>
where
    S: SiteStore,
    C: ServiceControl,
    P: Prompter,
{
    validate_config_name(&options.config_name)?;

    let template_name = match &options.template {
        Some(name) => name.clone(),
        None => match select_template(ctx)? {
            Some(name) => name,
            None => return Ok(GenerateOutcome::Cancelled),
        },
    };
    validate_template_name(&template_name)?;

    let supplied = parse_set_flags(&options.set)?;
    let template = ctx.templates().load(&template_name)?;
    let metadata = template.metadata();
    let has_parameters = !metadata.parameters.is_empty();

    let mut interactive = options.interactive;
    if has_parameters && supplied.is_empty() && !interactive {
        if options.dry_run {
            return Ok(parameters_required(&template));
        }
        if ctx.prompter().is_interactive() {
            let prompt = format!(
                "Template '{}' declares {} parameter(s). Enter them interactively?",
                template.name(),
                metadata.parameters.len()
            );
            if !ctx.prompter().confirm(&prompt, true)? {
                return Ok(parameters_required(&template));
            }
            interactive = true;
        }
    }

    let configured = &ctx.config().settings;
    let mut params = configured.merge_defaults(&supplied);
    if interactive {
        let answers = prompt_parameters(ctx.prompter(), &template, &supplied, &configured.defaults)?;
        params.extend(answers);
    }
    tracing::debug!(template = %template.name(), ?params, "resolved parameters");

    let content = match template.render_validated(&params) {
        Ok(content) => content,
        Err(AppError::Validation(error)) => {
            return Ok(GenerateOutcome::Invalid { error, help: metadata.parameter_help() });
        }
        Err(err) => return Err(err),
    };

    if options.dry_run {
        return Ok(GenerateOutcome::Preview {
            config_name: options.config_name.clone(),
            template: template.name().to_string(),
            description: metadata.description.clone(),
            content,
        });
    }

    let file_name =
        options.file_name.clone().unwrap_or_else(|| config_file_name(&options.config_name));
    let sites = ctx.sites();

    let mut backup = None;
    if sites.exists(&file_name) {
        let path = sites.layout().config_dir.join(&file_name);
        if !options.force {
            if !ctx.prompter().is_interactive() {
                return Err(AppError::AlreadyExists { what: "configuration file", path });
            }
            let prompt =
                format!("Configuration file already exists: {}. Overwrite?", path.display());
            if !ctx.prompter().confirm(&prompt, false)? {
                return Ok(GenerateOutcome::Cancelled);
            }
        }
        backup = sites.backup(&file_name)?;
    }

    let config_path = sites.write(&file_name, &content)?;
    let activation = activate(ctx, &file_name);

    Ok(GenerateOutcome::Written(GenerateReport {
        config_path,
        file_name,
        backup,
        template: template.name().to_string(),
        description: metadata.description.clone(),
        activation,
    }))
}

fn parameters_required(template: &Template) -> GenerateOutcome {
    GenerateOutcome::ParametersRequired {
        template: template.name().to_string(),
        description: template.metadata().description.clone(),
        help: template.metadata().parameter_help(),
    }
}

fn activate<S, C, P>(ctx: &AppContext<S, C, P>, file_name: &str) -> Activation
where
    S: SiteStore,
    C: ServiceControl,
    P: Prompter,
{
    if let Err(err) = ctx.service().test_config() {
        return Activation::TestFailed(err);
    }

    let link = if ctx.sites().layout().supports_enable() {
        match ctx.sites().enable(file_name) {
            Ok(link) => Some(link),
            Err(err) => return Activation::EnableFailed(err),
        }
    } else {
        tracing::debug!("no enabled directory; configuration is active by default");
        None
    };

    Activation::Applied { link, reload_error: ctx.service().reload().err() }
}

fn select_template<S, C, P>(ctx: &AppContext<S, C, P>) -> Result<Option<String>, AppError>
where
    S: SiteStore,
    C: ServiceControl,
    P: Prompter,
{
    let names = if ctx.templates().dir().is_dir() { ctx.templates().names()? } else { Vec::new() };
    if names.is_empty() {
        return Err(AppError::config_error(
            "no templates found. Run 'ngcli init' to create default templates",
        ));
    }
    if !ctx.prompter().is_interactive() {
        return Err(AppError::config_error(
            "Template selection requires a TTY. Provide --template <NAME>.",
        ));
    }

    let items: Vec<String> = names
        .iter()
        .map(|name| match ctx.templates().load(name) {
            Ok(template) if !template.metadata().description.is_empty() => {
                format!("{} - {}", name, template.metadata().description)
            }
            Ok(_) => format!("{} - No description", name),
            Err(_) => name.clone(),
        })
        .collect();

    let selection = ctx.prompter().select("Select template", &items)?;
    Ok(selection.map(|index| names[index].clone()))
}

/// Prompt label for one parameter: `name (description) [default: x] *required*`.
pub fn parameter_prompt(param: &ParameterInfo, suggested: Option<&str>) -> String {
    let mut prompt = format!("{} ({})", param.name, param.description);
    if let Some(default) = suggested {
        prompt.push_str(&format!(" [default: {}]", default));
    }
    if param.required {
        prompt.push_str(" *required*");
    }
    prompt
}

/// Ask for every declared parameter not supplied on the command line.
///
/// An empty answer takes the suggested default (configured default first,
/// then the declared one); an empty answer for a required parameter without
/// a default is an error.
fn prompt_parameters<P: Prompter>(
    prompter: &P,
    template: &Template,
    supplied: &Parameters,
    configured: &Parameters,
) -> Result<Parameters, AppError> {
    if !prompter.is_interactive() {
        return Err(AppError::config_error(
            "Interactive parameter input requires a TTY. Provide --set key=value.",
        ));
    }

    let mut answers = Parameters::new();
    for param in &template.metadata().parameters {
        if supplied.contains_key(&param.name) {
            continue;
        }

        let suggested = configured
            .get(&param.name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .or_else(|| param.effective_default());

        let answer = prompter.input(&parameter_prompt(param, suggested))?;
        let value = if answer.is_empty() { suggested.unwrap_or_default().to_string() } else { answer };

        if value.is_empty() {
            if param.required {
                return Err(AppError::Validation(ValidationError {
                    missing: vec![param.name.clone()],
                    invalid: Vec::new(),
                }));
            }
            continue;
        }
        answers.insert(param.name.clone(), value);
    }
    Ok(answers)
}
