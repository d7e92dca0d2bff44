//! The configuration record carried through a single command.

use crate::fields::TemplateFields;
use serde::{Deserialize, Serialize};

/// Values describing a project: the desired root file name plus the
/// template fields. Built once per command (from user input or from the
/// customization file) and passed down by value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub fields: TemplateFields,
}

impl ProjectConfig {
    pub fn new(file_name: Option<String>, fields: TemplateFields) -> Self {
        Self { file_name, fields }
    }

    /// The requested root file name, ignoring blank answers.
    pub fn requested_file_name(&self) -> Option<&str> {
        self.file_name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }
}
