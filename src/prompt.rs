//! User interaction: the project form and yes/no confirmations.
//!
//! Commands only talk to the [`Prompter`] trait. The terminal form is backed
//! by dialoguer; answers can also be fed as JSON on stdin.

use crate::config::FormDefaults;
use crate::error::{Error, Result};
use crate::project::ProjectConfig;
use dialoguer::{Confirm, Input};
use std::io::Read;

/// Which form to show.
#[derive(Debug, Clone, Copy)]
pub enum FormMode<'a> {
    /// New project, offering the given defaults
    Create(&'a FormDefaults),
    /// Existing project, pre-filled with its current values
    Edit,
}

pub trait Prompter {
    /// Asks a yes/no question. `skip` answers yes without asking.
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool>;

    /// Collects the project record, starting from `initial`.
    fn collect_fields(&self, initial: ProjectConfig, mode: FormMode<'_>) -> Result<ProjectConfig>;
}

/// Builds the left and right footers from the creation form answers.
///
/// Authors are comma separated and end up one per line (`\\`); the other
/// footer reads `<school> - <promotion>\\<subject>`.
pub fn compose_footers(
    authors: &str,
    school: &str,
    promotion: &str,
    subject: &str,
    authors_left: bool,
) -> (String, String) {
    let authors = authors
        .split(',')
        .map(str::trim)
        .filter(|author| !author.is_empty())
        .collect::<Vec<_>>()
        .join("\\\\");
    let course = format!("{school} - {promotion}\\\\{subject}");

    if authors_left {
        (authors, course)
    } else {
        (course, authors)
    }
}

/// Terminal form backed by dialoguer.
#[derive(Debug, Default)]
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }

    fn text(&self, prompt: &str, default: &str) -> Result<String> {
        Ok(Input::<String>::new()
            .with_prompt(prompt)
            .default(default.to_string())
            .allow_empty(true)
            .interact_text()?)
    }
}

impl Prompter for DialoguerPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        if skip {
            return Ok(true);
        }
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn collect_fields(&self, initial: ProjectConfig, mode: FormMode<'_>) -> Result<ProjectConfig> {
        let mut fields = initial.fields;
        fields.title = self.text("Title", &fields.title)?;
        let file_name = self.text("File name", initial.file_name.as_deref().unwrap_or_default())?;
        fields.authors = self.text("Authors (comma-separated)", &fields.authors)?;

        if let FormMode::Create(defaults) = mode {
            let subject = self.text("Subject", &defaults.subject)?;
            let promotion = self.text("Promotion", &defaults.promotion)?;
            let school = self.text("School", &defaults.school)?;

            fields.center_footer = defaults.center_footer.clone();
            if defaults.auto_footers {
                let (left, right) = compose_footers(
                    &fields.authors,
                    &school,
                    &promotion,
                    &subject,
                    defaults.authors_in_left_footer,
                );
                fields.left_footer = left;
                fields.right_footer = right;
            }
        }

        fields.left_footer = self.text("Left footer", &fields.left_footer)?;
        fields.center_footer = self.text("Center footer", &fields.center_footer)?;
        fields.right_footer = self.text("Right footer", &fields.right_footer)?;

        Ok(ProjectConfig::new(Some(file_name), fields))
    }
}

/// Non-interactive prompter answering from a preloaded JSON object.
///
/// Keys present in the answers override the initial record. When creating
/// a project, the form defaults and composed footers apply first, using the
/// `subject`, `promotion` and `school` answers when given. Confirmations are
/// only granted when skipped explicitly.
#[derive(Debug)]
pub struct AnswersPrompter {
    answers: serde_json::Value,
}

impl AnswersPrompter {
    pub fn new(answers: serde_json::Value) -> Self {
        Self { answers }
    }

    /// Reads the answers from `reader`. Empty input means no answers.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut buffer = String::new();
        reader.read_to_string(&mut buffer)?;
        let buffer = buffer.trim();
        if buffer.is_empty() {
            return Ok(Self::new(serde_json::Value::Null));
        }
        let answers = serde_json::from_str(buffer)
            .map_err(|e| Error::ConfigError(format!("Failed to parse answers as JSON: {e}")))?;
        Ok(Self::new(answers))
    }
}

impl Prompter for AnswersPrompter {
    fn confirm(&self, skip: bool, prompt: String) -> Result<bool> {
        log::debug!("Non-interactive confirmation '{}': {}.", prompt, skip);
        Ok(skip)
    }

    fn collect_fields(&self, initial: ProjectConfig, mode: FormMode<'_>) -> Result<ProjectConfig> {
        let empty = serde_json::Map::new();
        let answers = match &self.answers {
            serde_json::Value::Null => &empty,
            serde_json::Value::Object(answers) => answers,
            other => {
                return Err(Error::ConfigError(format!(
                    "Answers must be a JSON object, got '{other}'"
                )))
            }
        };

        let mut initial = initial;
        if let FormMode::Create(defaults) = mode {
            initial.fields.center_footer = defaults.center_footer.clone();
            if defaults.auto_footers {
                let text = |key: &str, default: &str| {
                    answers
                        .get(key)
                        .and_then(serde_json::Value::as_str)
                        .unwrap_or(default)
                        .to_string()
                };
                let (left, right) = compose_footers(
                    &text("authors", &initial.fields.authors),
                    &text("school", &defaults.school),
                    &text("promotion", &defaults.promotion),
                    &text("subject", &defaults.subject),
                    defaults.authors_in_left_footer,
                );
                initial.fields.left_footer = left;
                initial.fields.right_footer = right;
            }
        }
        if answers.is_empty() {
            return Ok(initial);
        }

        let mut merged = match serde_json::to_value(&initial) {
            Ok(serde_json::Value::Object(merged)) => merged,
            _ => serde_json::Map::new(),
        };
        for (key, value) in answers {
            merged.insert(key.clone(), value.clone());
        }

        serde_json::from_value(serde_json::Value::Object(merged))
            .map_err(|e| Error::ConfigError(format!("Invalid answers: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::TemplateFields;
    use serde_json::json;

    #[test]
    fn test_compose_footers_authors_left() {
        let (left, right) = compose_footers(" Ada ,Alan,, ", "ECN", "SEC25", "Compilers", true);
        assert_eq!(left, "Ada\\\\Alan");
        assert_eq!(right, "ECN - SEC25\\\\Compilers");
    }

    #[test]
    fn test_compose_footers_authors_right() {
        let (left, right) = compose_footers("Ada", "ECN", "SEC25", "", false);
        assert_eq!(left, "ECN - SEC25\\\\");
        assert_eq!(right, "Ada");
    }

    #[test]
    fn test_answers_override_initial_values() {
        let prompter = AnswersPrompter::new(json!({"title": "Rapport", "file_name": "rapport"}));
        let initial = ProjectConfig::new(
            Some("main.tex".to_string()),
            TemplateFields { authors: "Ada".to_string(), ..Default::default() },
        );

        let config = prompter.collect_fields(initial, FormMode::Edit).unwrap();
        assert_eq!(config.file_name.as_deref(), Some("rapport"));
        assert_eq!(config.fields.title, "Rapport");
        assert_eq!(config.fields.authors, "Ada");
    }

    #[test]
    fn test_answers_from_reader() {
        let prompter = AnswersPrompter::from_reader("  ".as_bytes()).unwrap();
        let initial = ProjectConfig::default();
        assert_eq!(prompter.collect_fields(initial.clone(), FormMode::Edit).unwrap(), initial);

        assert!(AnswersPrompter::from_reader("{\"title\": ".as_bytes()).is_err());
        let array = AnswersPrompter::from_reader("[1, 2]".as_bytes()).unwrap();
        assert!(array.collect_fields(initial, FormMode::Edit).is_err());
    }

    #[test]
    fn test_answers_create_applies_form_defaults() {
        let defaults = FormDefaults::default();
        let prompter = AnswersPrompter::new(json!({
            "title": "T",
            "authors": "Ada, Alan",
            "subject": "Compilers",
        }));

        let config = prompter
            .collect_fields(ProjectConfig::default(), FormMode::Create(&defaults))
            .unwrap();
        assert_eq!(config.fields.title, "T");
        assert_eq!(config.fields.left_footer, "Ada\\\\Alan");
        assert_eq!(config.fields.center_footer, "\\thepage");
        assert_eq!(config.fields.right_footer, "ECN - SEC25\\\\Compilers");
    }

    #[test]
    fn test_answers_create_keeps_explicit_footers() {
        let defaults = FormDefaults { auto_footers: false, ..FormDefaults::default() };
        let prompter = AnswersPrompter::new(json!({"right_footer": "Annexe"}));

        let config = prompter
            .collect_fields(ProjectConfig::default(), FormMode::Create(&defaults))
            .unwrap();
        assert_eq!(config.fields.left_footer, "");
        assert_eq!(config.fields.center_footer, "\\thepage");
        assert_eq!(config.fields.right_footer, "Annexe");
    }

    #[test]
    fn test_answers_confirm_only_when_skipped() {
        let prompter = AnswersPrompter::new(serde_json::Value::Null);
        assert!(prompter.confirm(true, "Continue?".to_string()).unwrap());
        assert!(!prompter.confirm(false, "Continue?".to_string()).unwrap());
    }
}
