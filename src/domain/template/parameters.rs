//! Parameter resolution rules applied before rendering.

use std::collections::BTreeMap;
use std::fmt::{self, Write as _};

use super::metadata::{ParameterInfo, ParameterType, TemplateMetadata};

/// Resolved name → value substitutions handed to the renderer.
pub type Parameters = BTreeMap<String, String>;

/// A declared parameter whose value failed its type or options check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidParameter {
    pub name: String,
    pub reason: String,
}

impl fmt::Display for InvalidParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.reason)
    }
}

/// Every violation found in a single validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<String>,
    pub invalid: Vec<InvalidParameter>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sections = Vec::new();
        if !self.missing.is_empty() {
            sections.push(format!("missing required parameters: {}", self.missing.join(", ")));
        }
        if !self.invalid.is_empty() {
            let entries: Vec<String> = self.invalid.iter().map(ToString::to_string).collect();
            sections.push(format!("invalid parameter values: {}", entries.join("; ")));
        }
        write!(f, "{}", sections.join("\n"))
    }
}

impl std::error::Error for ValidationError {}

impl TemplateMetadata {
    /// Fill absent parameters from their declared non-empty defaults.
    ///
    /// Keys already present in `params` are never overwritten.
    pub fn apply_defaults(&self, params: &Parameters) -> Parameters {
        let mut resolved = params.clone();
        for param in &self.parameters {
            if let Some(default) = param.effective_default() {
                resolved.entry(param.name.clone()).or_insert_with(|| default.to_string());
            }
        }
        resolved
    }

    /// Check required presence, types, and allowed options for every declared parameter.
    ///
    /// All problems are collected before returning.
    pub fn validate(&self, params: &Parameters) -> Result<(), ValidationError> {
        let mut error = ValidationError::default();

        for param in &self.parameters {
            match params.get(&param.name) {
                None if param.required => error.missing.push(param.name.clone()),
                None => {}
                Some(value) => {
                    if let Err(reason) = check_value(param, value) {
                        error.invalid.push(InvalidParameter { name: param.name.clone(), reason });
                    }
                }
            }
        }

        if error.is_empty() { Ok(()) } else { Err(error) }
    }

    /// Problems in the declarations themselves: unknown types and defaults
    /// that would fail validation.
    pub fn declaration_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        for param in &self.parameters {
            if !param.kind.is_known() {
                warnings.push(format!(
                    "{}: unknown type '{}', values are not type-checked",
                    param.name, param.kind
                ));
            }
            if let Some(default) = param.effective_default() {
                if let Err(reason) = check_value(param, default) {
                    warnings.push(format!("{}: default '{}' {}", param.name, default, reason));
                }
            }
        }
        warnings
    }

    /// Human-readable parameter listing, one block per parameter in declaration order.
    pub fn parameter_help(&self) -> String {
        if self.parameters.is_empty() {
            return "No parameters defined for this template\n".to_string();
        }

        let mut help = String::from("Parameters:\n");
        for param in &self.parameters {
            let required = if param.required { "required" } else { "optional" };
            let _ = writeln!(
                help,
                "  {:<15} {:<8} {:<8} {}",
                param.name,
                param.kind.as_str(),
                required,
                param.description
            );
            if let Some(default) = param.effective_default() {
                let _ = writeln!(help, "  {:<15} default: {}", "", default);
            }
            if !param.options.is_empty() {
                let _ = writeln!(help, "  {:<15} options: {}", "", param.options.join(", "));
            }
            help.push('\n');
        }
        help
    }
}

/// Validate a single value against its declaration.
pub fn check_value(param: &ParameterInfo, value: &str) -> Result<(), String> {
    match param.kind {
        ParameterType::Integer if value.parse::<i64>().is_err() => {
            return Err("must be an integer".to_string());
        }
        ParameterType::Boolean if value != "true" && value != "false" => {
            return Err("must be true or false".to_string());
        }
        ParameterType::FilePath if value.trim().is_empty() => {
            return Err("file path cannot be empty".to_string());
        }
        _ => {}
    }

    if !param.options.is_empty() && !param.options.iter().any(|option| option == value) {
        return Err(format!("must be one of: {}", param.options.join(", ")));
    }

    Ok(())
}
