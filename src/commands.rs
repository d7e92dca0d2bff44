//! Top level commands.
//!
//! Each command works on an explicit project directory and receives the
//! settings, prompter and compiler it needs as arguments.

use crate::compiler::{CompileOutcome, Compiler};
use crate::config::{load_form_defaults, Settings};
use crate::constants::{
    CUSTOMIZATION_FILE, MAIN_TEX, PDF_EXTENSION, SCRATCH_DIR, SETTINGS_FOLDER, TEMPLATE_FOLDER,
    TEX_EXTENSION,
};
use crate::error::{Error, Result};
use crate::fields::{self, TemplateFields};
use crate::paths::{normalize, remove_paths, with_extension};
use crate::project::ProjectConfig;
use crate::prompt::{FormMode, Prompter};
use crate::provision::{provision_from, refresh_template_tree};
use crate::root::{find_root, tag_as_root};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the customization file inside a project.
pub fn customization_file<P: AsRef<Path>>(project_dir: P) -> PathBuf {
    project_dir.as_ref().join(TEMPLATE_FOLDER).join(CUSTOMIZATION_FILE)
}

/// Creates a project from the configured template in `project_dir`.
///
/// # Flow
/// 1. Resolves the template and settings trees (nothing is copied if either is missing)
/// 2. Collects the project record through the prompter
/// 3. Copies both trees into the project
/// 4. Writes the fields into the customization file
/// 5. Renames the root document when a file name was given
///
/// Returns the path of the root document.
pub fn create_project<P: AsRef<Path>>(
    settings: &Settings,
    prompter: &dyn Prompter,
    project_dir: P,
) -> Result<PathBuf> {
    let project_dir = project_dir.as_ref();
    let source = settings.template_source();
    let sources = source.locate_project(&settings.template_version)?;
    let defaults = load_form_defaults(&source)?;

    let record = prompter.collect_fields(ProjectConfig::default(), FormMode::Create(&defaults))?;

    provision_from(&sources, project_dir)?;

    let root = project_dir.join(MAIN_TEX);
    let root = if root.is_file() { root } else { find_root(project_dir)? };
    apply_record(project_dir, &root, &record)
}

/// Updates the template tree of the project to the configured version,
/// carrying the current fields over.
pub fn reload_template<P: AsRef<Path>>(settings: &Settings, project_dir: P) -> Result<TemplateFields> {
    let project_dir = project_dir.as_ref();
    let customization = customization_file(project_dir);
    let current = fields::parse(&customization)?;

    let source = settings.template_source();
    let copied = refresh_template_tree(&source, &settings.template_version, project_dir)?;
    debug!("Refreshed {copied} template files.");

    fields::customize(&customization, &current)?;
    Ok(current)
}

/// Lets the user edit the fields and file name of an existing project.
///
/// Returns the path of the root document, renamed if requested.
pub fn edit_template<P: AsRef<Path>>(prompter: &dyn Prompter, project_dir: P) -> Result<PathBuf> {
    let project_dir = project_dir.as_ref();
    let root = find_root(project_dir)?;
    let current = fields::parse(customization_file(project_dir))?;
    let file_name = root.file_name().map(|name| name.to_string_lossy().into_owned());

    let record = prompter.collect_fields(ProjectConfig::new(file_name, current), FormMode::Edit)?;
    apply_record(project_dir, &root, &record)
}

/// Writes `record` into the project and renames `root` if it asks for it.
fn apply_record(project_dir: &Path, root: &Path, record: &ProjectConfig) -> Result<PathBuf> {
    fields::customize(customization_file(project_dir), &record.fields)?;
    match record.requested_file_name() {
        Some(name) => rename_root_file(root, name),
        None => Ok(root.to_path_buf()),
    }
}

/// Renames the root document of `project_dir` to `new_name`.
pub fn rename_root<P: AsRef<Path>>(project_dir: P, new_name: &str) -> Result<PathBuf> {
    let root = find_root(project_dir)?;
    rename_root_file(&root, new_name)
}

/// Renames the root document at `root` to `new_name`.
///
/// The new name gets the `.tex` extension and is normalized. The marker
/// line follows the new name and the PDF of the old name is removed.
///
/// # Errors
/// * `Error::InvalidArgument` if `new_name` is not a bare file name or the
///   target already exists
pub fn rename_root_file<P: AsRef<Path>>(root: P, new_name: &str) -> Result<PathBuf> {
    let root = root.as_ref();
    if !root.is_file() {
        return Err(Error::not_found(root));
    }

    let requested = Path::new(new_name.trim());
    if requested.components().count() != 1 || requested.file_name().is_none() {
        return Err(Error::InvalidArgument(format!(
            "'{new_name}' is not a valid file name"
        )));
    }
    let file_name = normalize(with_extension(requested, TEX_EXTENSION, false)?, false)?;
    let target = root.with_file_name(file_name);

    if target != root {
        if target.exists() {
            return Err(Error::InvalidArgument(format!(
                "'{}' already exists",
                target.display()
            )));
        }
        debug!("Renaming root document '{}' to '{}'.", root.display(), target.display());
        fs::rename(root, &target)?;
        remove_paths([with_extension(root, PDF_EXTENSION, false)?])?;
    }

    if !tag_as_root(&target)? {
        warn!("'{}' has no root marker to update.", target.display());
    }
    Ok(target)
}

/// Compiles `target` (or the detected root document) into a PDF.
///
/// Relative targets are resolved against `project_dir`. A failed
/// compilation is returned as `Error::CompileFailure`.
pub fn compile<P: AsRef<Path>>(
    project_dir: P,
    target: Option<&Path>,
    compiler: &Compiler,
) -> Result<PathBuf> {
    let project_dir = project_dir.as_ref();
    let root = match target {
        Some(target) => project_dir.join(target),
        None => find_root(project_dir)?,
    };

    match compiler.compile(&root)? {
        CompileOutcome::Success { pdf } => Ok(pdf),
        CompileOutcome::Failure { log } => Err(Error::CompileFailure {
            root: root.display().to_string(),
            log: log.map(|log| log.display().to_string()),
        }),
    }
}

/// Removes the root document, its PDF, the template tree and the editor
/// settings from `project_dir` after confirmation.
///
/// Returns `false` when the user declined.
pub fn clean_project<P: AsRef<Path>>(
    prompter: &dyn Prompter,
    project_dir: P,
    skip_confirm: bool,
) -> Result<bool> {
    let project_dir = project_dir.as_ref();
    let confirmed = prompter.confirm(
        skip_confirm,
        format!(
            "Remove the root document, its PDF, its log and the template from '{}'?",
            project_dir.display()
        ),
    )?;
    if !confirmed {
        return Ok(false);
    }

    let mut targets = vec![
        project_dir.join(TEMPLATE_FOLDER),
        project_dir.join(SETTINGS_FOLDER),
        project_dir.join(SCRATCH_DIR),
    ];
    match find_root(project_dir) {
        Ok(root) => {
            targets.push(with_extension(&root, PDF_EXTENSION, false)?);
            targets.push(with_extension(&root, "log", false)?);
            targets.push(root);
        }
        Err(Error::NotFound { path }) => warn!("No {path}, removing the template only."),
        Err(e) => return Err(e),
    }

    remove_paths(&targets)?;
    Ok(true)
}
