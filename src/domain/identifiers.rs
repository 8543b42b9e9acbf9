use super::AppError;

/// Validates an identifier string.
///
/// Checks:
/// - Non-empty
/// - No path separators (/, \)
/// - Not "." or ".."
/// - Does not start with '.' (hidden files)
/// - Characters are alphanumeric, '-', '_', or (optionally) '.'
pub fn validate_identifier(id: &str, allow_dots: bool) -> bool {
    if id.is_empty() || id.starts_with('.') {
        return false;
    }
    if id.contains('/') || id.contains('\\') || id.contains('\0') {
        return false;
    }
    id.chars().all(|c| c.is_alphanumeric() || c == '-' || c == '_' || (allow_dots && c == '.'))
}

/// Reject configuration names that would escape the configuration directory.
pub fn validate_config_name(name: &str) -> Result<(), AppError> {
    if validate_identifier(name, true) {
        Ok(())
    } else {
        Err(AppError::InvalidName { what: "configuration", name: name.to_string() })
    }
}

/// Reject template names that would escape the template directory.
pub fn validate_template_name(name: &str) -> Result<(), AppError> {
    if validate_identifier(name, true) {
        Ok(())
    } else {
        Err(AppError::InvalidName { what: "template", name: name.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_identifiers() {
        assert!(validate_identifier("mysite", false));
        assert!(validate_identifier("api-server", false));
        assert!(validate_identifier("api_v2", false));
    }

    #[test]
    fn valid_identifiers_with_dots() {
        assert!(validate_identifier("example.com", true));
        assert!(!validate_identifier("example.com", false));
    }

    #[test]
    fn invalid_identifiers() {
        assert!(!validate_identifier("", true));
        assert!(!validate_identifier("../escape", true));
        assert!(!validate_identifier("has/slash", true));
        assert!(!validate_identifier("has\\backslash", true));
        assert!(!validate_identifier(".", true));
        assert!(!validate_identifier("..", true));
        assert!(!validate_identifier(".hidden", true));
        assert!(!validate_identifier("has space", true));
        assert!(!validate_identifier("null\0byte", true));
    }

    #[test]
    fn config_name_errors_name_the_kind() {
        let err = validate_config_name("../../etc/passwd").unwrap_err();
        assert!(err.to_string().contains("invalid configuration name"));
    }
}
