//! Reading and writing the user-editable fields of the customization file.
//!
//! Each field lives on its own line (`\title{..}`, `\author{..}`,
//! `\fancyfoot[L]{..}`, ...). Updates replace the captured value span and
//! nothing else, so a value that also appears elsewhere in the file is never
//! touched outside its own line.

use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::ops::Range;
use std::path::Path;

/// Fields of the customization file, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Authors,
    LeftFooter,
    CenterFooter,
    RightFooter,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Authors,
        Field::LeftFooter,
        Field::CenterFooter,
        Field::RightFooter,
    ];

    /// LaTeX command prefix holding the field, up to the opening brace.
    fn command(self) -> &'static str {
        match self {
            Field::Title => r"\\title",
            Field::Authors => r"\\author",
            Field::LeftFooter => r"\\fancyfoot\[L\]",
            Field::CenterFooter => r"\\fancyfoot\[C\]",
            Field::RightFooter => r"\\fancyfoot\[R\]",
        }
    }

    /// Whole-line pattern capturing the value between the first `{` and the
    /// last `}` of the line.
    pub fn pattern(self) -> Result<Regex> {
        Ok(Regex::new(&format!(
            r"(?m)^[ \t]*{}\{{(?P<value>.*)\}}[ \t]*\r?$",
            self.command()
        ))?)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Authors => "authors",
            Field::LeftFooter => "left footer",
            Field::CenterFooter => "center footer",
            Field::RightFooter => "right footer",
        };
        f.write_str(name)
    }
}

/// User-editable values of a provisioned template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateFields {
    pub title: String,
    pub authors: String,
    pub left_footer: String,
    pub center_footer: String,
    pub right_footer: String,
}

impl TemplateFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Authors => &self.authors,
            Field::LeftFooter => &self.left_footer,
            Field::CenterFooter => &self.center_footer,
            Field::RightFooter => &self.right_footer,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Authors => &mut self.authors,
            Field::LeftFooter => &mut self.left_footer,
            Field::CenterFooter => &mut self.center_footer,
            Field::RightFooter => &mut self.right_footer,
        }
    }
}

/// Locates the value span of every field in `content`.
///
/// `source` only names the file in error messages.
fn field_spans(content: &str, source: &str) -> Result<Vec<(Field, Range<usize>)>> {
    let mut spans = Vec::with_capacity(Field::ALL.len());
    for field in Field::ALL {
        let pattern = field.pattern()?;
        let mut matches = pattern.captures_iter(content);

        let value = matches
            .next()
            .and_then(|captures| captures.name("value"))
            .ok_or_else(|| Error::ParseError {
                field: field.to_string(),
                file: source.to_string(),
                reason: "pattern not found".to_string(),
            })?;

        let extra = matches.count();
        if extra > 0 {
            return Err(Error::ParseError {
                field: field.to_string(),
                file: source.to_string(),
                reason: format!("pattern found {} times", extra + 1),
            });
        }
        spans.push((field, value.range()));
    }
    Ok(spans)
}

/// Extracts the fields from the text of a customization file.
pub fn parse_str(content: &str, source: &str) -> Result<TemplateFields> {
    let mut fields = TemplateFields::default();
    for (field, span) in field_spans(content, source)? {
        *fields.get_mut(field) = content[span].to_string();
    }
    Ok(fields)
}

/// Reads the fields stored in the customization file at `path`.
///
/// # Errors
/// * `Error::NotFound` if the file does not exist
/// * `Error::ParseError` if a field is missing or repeated
pub fn parse<P: AsRef<Path>>(path: P) -> Result<TemplateFields> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::not_found(path));
    }
    let content = fs::read_to_string(path)?;
    parse_str(&content, &path.display().to_string())
}

/// Returns `content` with every field value replaced by the one in `fields`.
pub fn customize_str(content: &str, fields: &TemplateFields, source: &str) -> Result<String> {
    for field in Field::ALL {
        if fields.get(field).contains(['\n', '\r']) {
            return Err(Error::InvalidArgument(format!(
                "the {field} must fit on a single line"
            )));
        }
    }

    let mut spans = field_spans(content, source)?;
    spans.sort_by_key(|(_, span)| span.start);

    let mut updated = String::with_capacity(content.len());
    let mut cursor = 0;
    for (field, span) in spans {
        updated.push_str(&content[cursor..span.start]);
        updated.push_str(fields.get(field));
        cursor = span.end;
    }
    updated.push_str(&content[cursor..]);
    Ok(updated)
}

/// Writes `fields` into the customization file at `path`, in place.
pub fn customize<P: AsRef<Path>>(path: P, fields: &TemplateFields) -> Result<()> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::not_found(path));
    }
    let content = fs::read_to_string(path)?;
    let updated = customize_str(&content, fields, &path.display().to_string())?;

    if updated != content {
        debug!("Updating template fields in '{}'.", path.display());
        fs::write(path, updated)?;
    }
    Ok(())
}
