//! Template header parsing.
//!
//! A template declares its schema in the unbroken block of `#` comment and
//! blank lines at the top of the file:
//!
//! ```text
//! # Template: prod
//! # Description: Production reverse proxy
//! # @param domain string required "Primary domain"
//! # @param port integer optional "Listen port" default=80
//! # @param mode string optional "Mode" default=on options=["on","off"]
//! ```
//!
//! Parsing never fails. Lines that match no recognizer are skipped.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static TEMPLATE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*Template:\s*(.+)$").expect("valid regex"));
static DESCRIPTION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*Description:\s*(.+)$").expect("valid regex"));
static AUTHOR_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*Author:\s*(.+)$").expect("valid regex"));
static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\s*Version:\s*(.+)$").expect("valid regex"));
static PARAM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^#\s*@param\s+([A-Za-z0-9_]+)\s+([A-Za-z0-9_]+)\s+(required|optional)\s+"([^"]+)"(?:\s+(.*))?$"#,
    )
    .expect("valid regex")
});
static DEFAULT_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"default=("[^"]*"|[^,\s]+)"#).expect("valid regex"));
static OPTIONS_ATTR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"options=\[([^\]]+)\]").expect("valid regex"));

/// Declared type of a template parameter.
///
/// A type name outside the known set is kept as `Other` so the declaration
/// still takes part in required and options checks; its values are not
/// type-checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParameterType {
    String,
    Integer,
    Boolean,
    FilePath,
    Array,
    Other(String),
}

impl ParameterType {
    pub const ALL: [ParameterType; 5] = [
        ParameterType::String,
        ParameterType::Integer,
        ParameterType::Boolean,
        ParameterType::FilePath,
        ParameterType::Array,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ParameterType::String => "string",
            ParameterType::Integer => "integer",
            ParameterType::Boolean => "boolean",
            ParameterType::FilePath => "file_path",
            ParameterType::Array => "array",
            ParameterType::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ParameterType::Other(_))
    }
}

impl From<&str> for ParameterType {
    fn from(name: &str) -> Self {
        ParameterType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .unwrap_or_else(|| ParameterType::Other(name.to_string()))
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `@param` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub name: String,
    pub kind: ParameterType,
    pub required: bool,
    pub description: String,
    pub default: Option<String>,
    pub options: Vec<String>,
}

impl ParameterInfo {
    /// The default value, if one was declared and is non-empty.
    pub fn effective_default(&self) -> Option<&str> {
        self.default.as_deref().filter(|value| !value.is_empty())
    }
}

/// Structured schema extracted from a template header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
    pub author: String,
    pub version: String,
    pub parameters: Vec<ParameterInfo>,
}

impl TemplateMetadata {
    /// Look up a declared parameter by name.
    pub fn parameter(&self, name: &str) -> Option<&ParameterInfo> {
        self.parameters.iter().find(|param| param.name == name)
    }

    /// Names of parameters declared `required`, in declaration order.
    pub fn required_names(&self) -> Vec<&str> {
        self.parameters.iter().filter(|p| p.required).map(|p| p.name.as_str()).collect()
    }

    fn push_parameter(&mut self, param: ParameterInfo) {
        match self.parameters.iter_mut().find(|existing| existing.name == param.name) {
            Some(existing) => {
                tracing::warn!(
                    parameter = %param.name,
                    "duplicate @param declaration; the later declaration replaces the earlier one"
                );
                *existing = param;
            }
            None => self.parameters.push(param),
        }
    }
}

/// Parse the metadata header of a template's raw text.
pub fn parse(raw_text: &str) -> TemplateMetadata {
    let mut metadata = TemplateMetadata::default();

    for raw_line in raw_text.lines() {
        let line = raw_line.trim();

        if !line.is_empty() && !line.starts_with('#') {
            break;
        }

        if let Some(value) = capture(&TEMPLATE_LINE, line) {
            metadata.name = value;
        } else if let Some(value) = capture(&DESCRIPTION_LINE, line) {
            metadata.description = value;
        } else if let Some(value) = capture(&AUTHOR_LINE, line) {
            metadata.author = value;
        } else if let Some(value) = capture(&VERSION_LINE, line) {
            metadata.version = value;
        } else if let Some(param) = parse_param_line(line) {
            metadata.push_parameter(param);
        }
    }

    metadata
}

fn capture(pattern: &Regex, line: &str) -> Option<String> {
    pattern.captures(line).map(|caps| caps[1].trim().to_string())
}

fn parse_param_line(line: &str) -> Option<ParameterInfo> {
    let caps = PARAM_LINE.captures(line)?;

    let kind = ParameterType::from(&caps[2]);
    if !kind.is_known() {
        tracing::warn!(
            parameter = &caps[1],
            kind = %kind,
            "unknown @param type; values are not type-checked"
        );
    }

    let (default, options) = match caps.get(5).map(|m| m.as_str()).filter(|s| !s.is_empty()) {
        Some(attributes) => parse_attributes(attributes),
        None => (None, Vec::new()),
    };

    Some(ParameterInfo {
        name: caps[1].to_string(),
        kind,
        required: &caps[3] == "required",
        description: caps[4].to_string(),
        default,
        options,
    })
}

fn parse_attributes(attributes: &str) -> (Option<String>, Vec<String>) {
    let default = DEFAULT_ATTR.captures(attributes).map(|caps| strip_quotes(&caps[1]).to_string());

    let options = OPTIONS_ATTR
        .captures(attributes)
        .map(|caps| {
            caps[1]
                .split(',')
                .map(|token| strip_quotes(token.trim()))
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    (default, options)
}

fn strip_quotes(value: &str) -> &str {
    value.trim_matches('"')
}
