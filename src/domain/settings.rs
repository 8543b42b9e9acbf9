//! User settings model (`~/.ngcli/config.yaml`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::AppError;
use super::template::Parameters;

/// Persistent user settings.
///
/// Every field is optional in the file; absent fields fall back to built-in
/// behavior during configuration resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nginx_bin: Option<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub defaults: BTreeMap<String, String>,
}

impl Settings {
    /// Settings used when no file exists.
    pub fn builtin(template_dir: PathBuf) -> Self {
        let defaults = [
            ("root_path", "/var/www/html"),
            ("ssl_cert", "/etc/ssl/certs/nginx.crt"),
            ("ssl_key", "/etc/ssl/private/nginx.key"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Settings { template_dir: Some(template_dir), defaults, ..Settings::default() }
    }

    /// Overlay `params` on top of the configured defaults.
    pub fn merge_defaults(&self, params: &Parameters) -> Parameters {
        let mut merged: Parameters = self.defaults.clone();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

/// Parse settings file content.
pub fn parse_settings_content(content: &str, path: &Path) -> Result<Settings, AppError> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content)
        .map_err(|e| AppError::Settings { path: path.to_path_buf(), details: e.to_string() })
}

/// Serialize settings for writing.
pub fn render_settings(settings: &Settings, path: &Path) -> Result<String, AppError> {
    serde_yaml::to_string(settings)
        .map_err(|e| AppError::Settings { path: path.to_path_buf(), details: e.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_settings() {
        let settings = parse_settings_content(
            "template_dir: /srv/templates\ndefaults:\n  root_path: /srv/www\n",
            Path::new("config.yaml"),
        )
        .unwrap();

        assert_eq!(settings.template_dir, Some(PathBuf::from("/srv/templates")));
        assert_eq!(settings.output_dir, None);
        assert!(!settings.verbose);
        assert_eq!(settings.defaults["root_path"], "/srv/www");
    }

    #[test]
    fn empty_file_is_default() {
        let settings = parse_settings_content("\n", Path::new("config.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn malformed_yaml_reports_path() {
        let err = parse_settings_content("defaults: [unclosed", Path::new("/h/.ngcli/config.yaml"))
            .unwrap_err();
        assert!(err.to_string().contains("/h/.ngcli/config.yaml"));
    }

    #[test]
    fn explicit_params_override_defaults() {
        let settings = Settings::builtin(PathBuf::from("/t"));
        let params: Parameters = [("root_path".to_string(), "/srv/app".to_string())].into();

        let merged = settings.merge_defaults(&params);

        assert_eq!(merged["root_path"], "/srv/app");
        assert_eq!(merged["ssl_key"], "/etc/ssl/private/nginx.key");
    }

    #[test]
    fn settings_round_trip_through_yaml() {
        let settings = Settings::builtin(PathBuf::from("/t"));
        let path = Path::new("config.yaml");
        let yaml = render_settings(&settings, path).unwrap();
        assert_eq!(parse_settings_content(&yaml, path).unwrap(), settings);
    }
}
