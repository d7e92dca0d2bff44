//! Template source resolution and provisioning.
//! Template trees live under a base directory named by the `TEMPLATE`
//! environment variable, either in a dedicated source subfolder or flat.

use crate::constants::{SETTINGS_FOLDER, TEMPLATE_FOLDER};
use crate::error::{Error, Result};
use log::debug;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Location of the template sources.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    /// Base directory, `None` when the environment does not provide one
    base: Option<PathBuf>,
    /// Dedicated subfolder tried before the flat layout
    source_folder: String,
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base {
            Some(base) => write!(f, "'{}'", base.join(&self.source_folder).display()),
            None => write!(f, "<unset>"),
        }
    }
}

/// Template and settings trees resolved for a new project.
#[derive(Debug)]
pub struct ProjectSources {
    pub template_tree: PathBuf,
    pub settings_tree: PathBuf,
}

impl TemplateSource {
    pub fn new<S: Into<String>>(base: Option<PathBuf>, source_folder: S) -> Self {
        Self { base, source_folder: source_folder.into() }
    }

    /// Resolves `segments` under the base directory.
    ///
    /// Tries `<base>/<source_folder>/<segments>` first, then
    /// `<base>/<segments>`.
    ///
    /// # Errors
    /// * `Error::TemplateSourceMissing` if the base is unset or neither
    ///   candidate exists
    pub fn locate(&self, segments: &[&str]) -> Result<PathBuf> {
        let item = segments.join("/");
        let Some(base) = &self.base else {
            return Err(Error::TemplateSourceMissing {
                item,
                tried: "no template directory configured".to_string(),
            });
        };

        let relative: PathBuf = segments.iter().collect();
        let candidates = [base.join(&self.source_folder).join(&relative), base.join(&relative)];
        for candidate in &candidates {
            if candidate.exists() {
                debug!("Template source '{}' resolved to '{}'.", item, candidate.display());
                return Ok(candidate.clone());
            }
        }

        Err(Error::TemplateSourceMissing {
            item,
            tried: candidates
                .iter()
                .map(|c| format!("'{}'", c.display()))
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Resolves both trees needed by a new project before anything is copied.
    pub fn locate_project(&self, version: &str) -> Result<ProjectSources> {
        Ok(ProjectSources {
            template_tree: self.locate(&[version])?,
            settings_tree: self.locate(&[SETTINGS_FOLDER])?,
        })
    }
}

fn copy_file(source: &Path, dest: &Path) -> Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(source, dest).map(|_| ()).map_err(Error::IoError)
}

/// Copies the tree at `src` into `dest`, merging with existing content.
///
/// Files with the same relative path are overwritten, unrelated files are
/// left alone. Returns the number of files copied.
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dest: Q) -> Result<usize> {
    let src = src.as_ref();
    let dest = dest.as_ref();
    if !src.is_dir() {
        return Err(Error::not_found(src));
    }

    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::InvalidArgument(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            debug!("Copying '{}' to '{}'.", entry.path().display(), target.display());
            copy_file(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Copies the template tree and the settings tree into `dest`.
pub fn provision_from<P: AsRef<Path>>(sources: &ProjectSources, dest: P) -> Result<()> {
    let dest = dest.as_ref();
    let template_files = copy_tree(&sources.template_tree, dest)?;
    let settings_files = copy_tree(&sources.settings_tree, dest.join(SETTINGS_FOLDER))?;
    debug!(
        "Provisioned {} template files and {} settings files into '{}'.",
        template_files,
        settings_files,
        dest.display()
    );
    Ok(())
}

/// Resolves and copies a template version with its settings into `dest`.
pub fn provision<P: AsRef<Path>>(source: &TemplateSource, version: &str, dest: P) -> Result<()> {
    let sources = source.locate_project(version)?;
    provision_from(&sources, dest)
}

/// Replaces the hidden template tree of the project at `dest` with the one
/// of `version`, leaving the rest of the project alone.
pub fn refresh_template_tree<P: AsRef<Path>>(
    source: &TemplateSource,
    version: &str,
    dest: P,
) -> Result<usize> {
    let tree = source.locate(&[version, TEMPLATE_FOLDER])?;
    copy_tree(tree, dest.as_ref().join(TEMPLATE_FOLDER))
}
