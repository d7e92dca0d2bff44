//! Tool settings and form defaults.
//!
//! Settings come from command-line flags and their environment variables.
//! Form defaults may be shipped alongside the template sources in a
//! `lmake.json`, `lmake.yml` or `lmake.yaml` file.

use crate::cli::Args;
use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::provision::TemplateSource;
use log::debug;
use serde::Deserialize;
use std::path::PathBuf;

/// Values resolved once per run from flags and environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub templates_dir: Option<PathBuf>,
    pub source_folder: String,
    pub template_version: String,
    pub compiler: String,
}

impl Settings {
    pub fn template_source(&self) -> TemplateSource {
        TemplateSource::new(self.templates_dir.clone(), self.source_folder.clone())
    }
}

impl From<&Args> for Settings {
    fn from(args: &Args) -> Self {
        Self {
            templates_dir: args.templates.clone(),
            source_folder: args.source_folder.clone(),
            template_version: args.template_version.clone(),
            compiler: args.compiler.clone(),
        }
    }
}

/// Initial values offered by the project creation form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub promotion: String,
    pub school: String,
    pub subject: String,
    pub center_footer: String,
    /// Put the authors in the left footer (right footer otherwise)
    pub authors_in_left_footer: bool,
    /// Compose the footers from the other answers
    pub auto_footers: bool,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            promotion: "SEC25".to_string(),
            school: "ECN".to_string(),
            subject: String::new(),
            center_footer: "\\thepage".to_string(),
            authors_in_left_footer: true,
            auto_footers: true,
        }
    }
}

/// Parses form defaults, trying JSON first and YAML second.
pub fn parse_form_defaults(content: &str) -> Result<FormDefaults> {
    match serde_json::from_str(content) {
        Ok(defaults) => Ok(defaults),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid form defaults: {e}"))),
    }
}

/// Loads the form defaults shipped with the template sources.
///
/// Falls back to the built-in defaults when no file is present.
pub fn load_form_defaults(source: &TemplateSource) -> Result<FormDefaults> {
    for file in CONFIG_FILES {
        if let Ok(path) = source.locate(&[file]) {
            if path.is_file() {
                debug!("Loading form defaults from '{}'.", path.display());
                return parse_form_defaults(&std::fs::read_to_string(&path)?);
            }
        }
    }
    debug!("No form defaults file found in {source}, using built-in defaults.");
    Ok(FormDefaults::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let defaults = parse_form_defaults("school: Centrale\nauto_footers: false\n").unwrap();
        assert_eq!(defaults.school, "Centrale");
        assert!(!defaults.auto_footers);
        assert_eq!(defaults.promotion, "SEC25");
        assert_eq!(defaults.center_footer, "\\thepage");
    }

    #[test]
    fn test_json_defaults() {
        let defaults = parse_form_defaults(r#"{"promotion": "SEC26"}"#).unwrap();
        assert_eq!(defaults.promotion, "SEC26");
        assert!(defaults.authors_in_left_footer);
    }

    #[test]
    fn test_invalid_defaults() {
        assert!(matches!(
            parse_form_defaults("promotion: [unclosed"),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_load_from_source_folder() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("latex");
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join("lmake.yml"), "school: ENSTA\n").unwrap();

        let source = TemplateSource::new(Some(temp_dir.path().to_path_buf()), "latex");
        assert_eq!(load_form_defaults(&source).unwrap().school, "ENSTA");

        let missing = TemplateSource::new(None, "latex");
        assert_eq!(load_form_defaults(&missing).unwrap(), FormDefaults::default());
    }
}
