use include_dir::{Dir, include_dir};
use minijinja::syntax::SyntaxConfig;
use minijinja::{Environment, UndefinedBehavior, context};

use crate::domain::AppError;
use crate::domain::template::{BUILTIN_TEMPLATES, template_file_name};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");
static SKELETON: &str = include_str!("../assets/skeleton/custom.conf.tpl");

/// A template shipped inside the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinTemplate {
    pub name: &'static str,
    pub file_name: &'static str,
    pub content: &'static str,
}

/// The shipped templates in `prod`, `staging`, `dev` order.
pub fn builtin_templates() -> Result<Vec<BuiltinTemplate>, AppError> {
    BUILTIN_TEMPLATES
        .iter()
        .map(|&name| {
            let file_name = template_file_name(name);
            let file = TEMPLATES_DIR.get_file(&file_name).ok_or_else(|| {
                AppError::config_error(format!("Built-in template missing: {}", file_name))
            })?;
            let content = file.contents_utf8().ok_or_else(|| {
                AppError::config_error(format!("Built-in template is not UTF-8: {}", file_name))
            })?;
            let file_name = file.path().to_str().unwrap_or_default();
            Ok(BuiltinTemplate { name, file_name, content })
        })
        .collect()
}

/// Starter template written by `template create` without `--from`.
///
/// The skeleton itself contains `{{ }}` placeholders, so it is rendered with
/// bracket delimiters instead of the defaults.
pub fn skeleton(name: &str, author: &str) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    let syntax = SyntaxConfig::builder()
        .block_delimiters("[%", "%]")
        .variable_delimiters("[[[", "]]]")
        .comment_delimiters("[#", "#]")
        .build()
        .map_err(|err| {
            AppError::config_error(format!("Failed to configure skeleton syntax: {}", err))
        })?;
    env.set_syntax(syntax);

    env.render_str(SKELETON, context! { name => name, author => author }).map_err(|err| {
        AppError::TemplateRender { template: name.to_string(), details: err.to_string() }
    })
}
