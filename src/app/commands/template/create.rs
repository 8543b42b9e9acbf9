use std::env;
use std::path::{Path, PathBuf};

use super::{EditCheck, edit_and_check};
use crate::adapters::TemplateLibrary;
use crate::adapters::builtin_templates::skeleton;
use crate::domain::template::rewrite_header;
use crate::domain::{AppError, validate_template_name};
use crate::ports::Prompter;

const UNKNOWN_AUTHOR: &str = "unknown";

#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    pub name: String,
    /// Existing template to copy instead of the skeleton.
    pub from: Option<String>,
    /// Open the editor without asking.
    pub edit: bool,
}

#[derive(Debug)]
pub struct CreateOutcome {
    pub name: String,
    pub path: PathBuf,
    pub edit: EditCheck,
}

/// Create a template and optionally open it for editing.
///
/// Without `--edit`, a terminal user is asked whether to open the editor;
/// non-interactive runs never open it.
pub fn execute<P, F>(
    library: &TemplateLibrary,
    prompter: &P,
    options: &CreateOptions,
    launch: F,
) -> Result<CreateOutcome, AppError>
where
    P: Prompter,
    F: FnOnce(&Path) -> Result<(), AppError>,
{
    validate_template_name(&options.name)?;
    if library.exists(&options.name) {
        return Err(AppError::AlreadyExists { what: "template", path: library.path(&options.name) });
    }

    let content = match &options.from {
        Some(source) => {
            validate_template_name(source)?;
            let source_template = library.load(source)?;
            rewrite_header(source_template.raw_content(), &options.name, source)
        }
        None => skeleton(&options.name, &author())?,
    };
    let path = library.create(&options.name, &content)?;

    let open = options.edit
        || (prompter.is_interactive() && prompter.confirm("Open template in editor now?", true)?);
    let edit = if open { edit_and_check(&path, launch)? } else { EditCheck::NotOpened };

    Ok(CreateOutcome { name: options.name.clone(), path, edit })
}

fn author() -> String {
    env::var("USER")
        .ok()
        .filter(|user| !user.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Answer, Sandbox, ScriptedPrompter};
    use std::fs;

    fn options(name: &str) -> CreateOptions {
        CreateOptions { name: name.to_string(), ..CreateOptions::default() }
    }

    fn never_launch(path: &Path) -> Result<(), AppError> {
        panic!("editor should not open for {}", path.display())
    }

    #[test]
    fn skeleton_template_is_named_and_usable() {
        let sandbox = Sandbox::new();
        let ctx = sandbox.context(ScriptedPrompter::non_interactive());

        let outcome =
            execute(ctx.templates(), ctx.prompter(), &options("blog"), never_launch).unwrap();

        assert!(matches!(outcome.edit, EditCheck::NotOpened));
        let template = ctx.templates().load("blog").unwrap();
        assert_eq!(template.metadata().name, "blog");
        assert_eq!(template.metadata().required_names(), ["domain", "root_path"]);
        assert_eq!(outcome.path, sandbox.config.template_dir.join("blog.conf.tpl"));
    }

    #[test]
    fn copy_rewrites_header_only() {
        let sandbox = Sandbox::new();
        sandbox.install_builtins();
        let ctx = sandbox.context(ScriptedPrompter::non_interactive());

        let mut opts = options("api");
        opts.from = Some("dev".into());
        execute(ctx.templates(), ctx.prompter(), &opts, never_launch).unwrap();

        let copy = ctx.templates().load("api").unwrap();
        let original = ctx.templates().load("dev").unwrap();
        assert_eq!(copy.metadata().name, "api");
        assert_eq!(copy.metadata().description, "api (based on dev)");
        assert_eq!(copy.metadata().parameters, original.metadata().parameters);
    }

    #[test]
    fn refuses_existing_and_missing_source() {
        let sandbox = Sandbox::new();
        sandbox.write_template("blog", "x");
        let ctx = sandbox.context(ScriptedPrompter::non_interactive());

        let err = execute(ctx.templates(), ctx.prompter(), &options("blog"), never_launch)
            .unwrap_err();
        assert!(matches!(err, AppError::AlreadyExists { what: "template", .. }));

        let mut opts = options("copy");
        opts.from = Some("ghost".into());
        let err = execute(ctx.templates(), ctx.prompter(), &opts, never_launch).unwrap_err();
        assert!(matches!(err, AppError::TemplateNotFound { .. }));
        assert!(!ctx.templates().exists("copy"));
    }

    #[test]
    fn edit_flag_opens_editor_and_checks_result() {
        let sandbox = Sandbox::new();
        let ctx = sandbox.context(ScriptedPrompter::non_interactive());

        let mut opts = options("broken");
        opts.edit = true;
        let outcome = execute(ctx.templates(), ctx.prompter(), &opts, |path: &Path| {
            fs::write(path, "{% if %}\n").map_err(AppError::from)
        })
        .unwrap();

        assert!(matches!(outcome.edit, EditCheck::Invalid(AppError::TemplateSyntax { .. })));
        assert!(outcome.path.exists());
    }

    #[test]
    fn terminal_user_is_asked_before_editing() {
        let sandbox = Sandbox::new();

        let ctx = sandbox.context(ScriptedPrompter::with_answers([Answer::Confirm(true)]));
        let outcome =
            execute(ctx.templates(), ctx.prompter(), &options("a"), |_: &Path| Ok(())).unwrap();
        assert!(matches!(outcome.edit, EditCheck::Valid));
        assert_eq!(ctx.prompter().prompts(), ["Open template in editor now?"]);

        let ctx = sandbox.context(ScriptedPrompter::with_answers([Answer::Confirm(false)]));
        let outcome =
            execute(ctx.templates(), ctx.prompter(), &options("b"), never_launch).unwrap();
        assert!(matches!(outcome.edit, EditCheck::NotOpened));
    }

    #[test]
    fn rejects_path_like_names() {
        let sandbox = Sandbox::new();
        let ctx = sandbox.context(ScriptedPrompter::non_interactive());
        let err = execute(ctx.templates(), ctx.prompter(), &options("../x"), never_launch)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidName { what: "template", .. }));
    }
}
