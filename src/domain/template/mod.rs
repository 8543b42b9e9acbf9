//! Template schema: header metadata and parameter rules.

pub mod metadata;
pub mod parameters;

pub use metadata::{ParameterInfo, ParameterType, TemplateMetadata, parse};
pub use parameters::{InvalidParameter, Parameters, ValidationError, check_value};

/// File-name suffix identifying template files.
pub const TEMPLATE_SUFFIX: &str = ".conf.tpl";

/// Templates shipped with the binary; these cannot be deleted.
pub const BUILTIN_TEMPLATES: [&str; 3] = ["prod", "staging", "dev"];

/// Whether `name` is one of the shipped templates.
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TEMPLATES.contains(&name)
}

/// Logical template name for a file name, if it carries the template suffix.
pub fn template_name_from_file(file_name: &str) -> Option<&str> {
    file_name.strip_suffix(TEMPLATE_SUFFIX).filter(|name| !name.is_empty())
}

/// File name for a logical template name; names already carrying the suffix are kept.
pub fn template_file_name(name: &str) -> String {
    if name.ends_with(TEMPLATE_SUFFIX) { name.to_string() } else { format!("{name}{TEMPLATE_SUFFIX}") }
}

/// Copy of `content` re-labelled as template `new_name`, derived from `source_name`.
///
/// Only the header's `Template:` and `Description:` lines change.
pub fn rewrite_header(content: &str, new_name: &str, source_name: &str) -> String {
    let mut in_header = true;
    content
        .split('\n')
        .map(|line| {
            let trimmed = line.trim();
            if !trimmed.is_empty() && !trimmed.starts_with('#') {
                in_header = false;
            }
            let label = trimmed.strip_prefix('#').map(str::trim_start).filter(|_| in_header);
            match label {
                Some(l) if l.starts_with("Template:") => format!("# Template: {new_name}"),
                Some(l) if l.starts_with("Description:") => {
                    format!("# Description: {new_name} (based on {source_name})")
                }
                _ => line.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_header_relabels_copy() {
        let source = "# Template: prod\n# Description: Production\n# @param domain string required \"D\"\n\nserver_name {{ domain }}; # Template: inline\n";

        let copy = rewrite_header(source, "blog", "prod");

        assert_eq!(
            copy,
            "# Template: blog\n# Description: blog (based on prod)\n# @param domain string required \"D\"\n\nserver_name {{ domain }}; # Template: inline\n"
        );
        let metadata = parse(&copy);
        assert_eq!(metadata.name, "blog");
        assert_eq!(metadata.parameters.len(), 1);
    }

    #[test]
    fn file_names_round_trip_through_suffix() {
        assert_eq!(template_file_name("prod"), "prod.conf.tpl");
        assert_eq!(template_file_name("prod.conf.tpl"), "prod.conf.tpl");
        assert_eq!(template_name_from_file("prod.conf.tpl"), Some("prod"));
        assert_eq!(template_name_from_file("notes.txt"), None);
        assert_eq!(template_name_from_file(".conf.tpl"), None);
    }

    #[test]
    fn builtin_names() {
        assert!(is_builtin("staging"));
        assert!(!is_builtin("custom"));
    }
}
