//! Public template API exercised the way an embedding program would.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use ngcli::{AppError, ParameterType, Parameters, Template, list_templates, parse, validate_syntax};

const PROXY: &str = "# Template: proxy\n\
# Description: Reverse proxy\n\
# @param domain string required \"Domain\"\n\
# @param upstream_port integer required \"Port\" default=3000\n\
# @param mode string optional \"Mode\" default=on options=[\"on\",\"off\"]\n\
# @param aliases array optional \"Extra names\"\n\
server {\n\
    server_name {{ domain }}{% if aliases %} {{ aliases | csv | join(\" \") }}{% endif %};\n\
    proxy_pass http://127.0.0.1:{{ upstream_port }};\n\
    {% if mode == \"on\" %}proxy_buffering on;{% endif %}\n\
}\n";

fn params(pairs: &[(&str, &str)]) -> Parameters {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn library() -> TempDir {
    let dir = TempDir::new().unwrap();
    dir.child("proxy.conf.tpl").write_str(PROXY).unwrap();
    dir.child("notes.txt").write_str("ignored").unwrap();
    dir
}

#[test]
fn load_and_render_with_defaults() {
    let dir = library();
    let template = Template::load("proxy", dir.path()).unwrap();

    assert_eq!(template.metadata().description, "Reverse proxy");
    assert_eq!(template.metadata().parameters[3].kind, ParameterType::Array);

    let output = template.render_validated(&params(&[("domain", "example.com")])).unwrap();
    assert!(output.contains("server_name example.com;"));
    assert!(output.contains("proxy_pass http://127.0.0.1:3000;"));
    assert!(output.contains("proxy_buffering on;"));
    assert!(output.starts_with("# Template: proxy\n"));
}

#[test]
fn array_values_split_on_commas() {
    let dir = library();
    let template = Template::load("proxy", dir.path()).unwrap();

    let output = template
        .render_validated(&params(&[("domain", "a.com"), ("aliases", "b.com, c.com")]))
        .unwrap();
    assert!(output.contains("server_name a.com b.com c.com;"), "{output}");
}

#[test]
fn validation_collects_every_problem() {
    let dir = library();
    let template = Template::load("proxy", dir.path()).unwrap();

    let err = template
        .render_validated(&params(&[("upstream_port", "x"), ("mode", "maybe")]))
        .unwrap_err();

    let AppError::Validation(validation) = err else { panic!("expected validation error") };
    assert_eq!(validation.missing, ["domain"]);
    let names: Vec<&str> = validation.invalid.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["upstream_port", "mode"]);
}

#[test]
fn unchecked_render_leaves_missing_values_empty() {
    let dir = library();
    let template = Template::load("proxy", dir.path()).unwrap();

    let output = template.render(&Parameters::new()).unwrap();
    assert!(output.contains("server_name ;"));
}

#[test]
fn listing_and_syntax_checks() {
    let dir = library();
    assert_eq!(list_templates(dir.path()).unwrap(), ["proxy"]);
    assert!(validate_syntax(PROXY).is_ok());
    assert!(validate_syntax("{% if %}").is_err());
    assert!(matches!(
        Template::load("missing", dir.path()),
        Err(AppError::TemplateNotFound { .. })
    ));
    assert_eq!(parse(PROXY).required_names(), ["domain", "upstream_port"]);
}
