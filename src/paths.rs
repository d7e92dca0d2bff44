//! File name helpers: extension handling, name normalization and removal
//! of generated files.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the extension of `path` without the leading dot, if any.
pub fn extension_of<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref().extension().map(|ext| ext.to_string_lossy().into_owned())
}

/// Returns `path` with its extension removed.
pub fn trim_extension<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    match path.file_stem() {
        Some(stem) => path.with_file_name(stem),
        None => path.to_path_buf(),
    }
}

/// Case-insensitive extension check. `ext` may carry a leading dot.
pub fn has_extension<P: AsRef<Path>>(path: P, ext: &str) -> bool {
    let ext = ext.trim_start_matches('.');
    extension_of(path).is_some_and(|current| current.eq_ignore_ascii_case(ext))
}

/// Replaces the extension of `path` with `ext` (with or without leading dot).
///
/// # Arguments
/// * `path` - File path to update
/// * `ext` - New extension
/// * `apply` - Whether to rename the file on disk as well
///
/// # Errors
/// * `Error::NotFound` if `apply` is set and `path` is not an existing file
pub fn with_extension<P: AsRef<Path>>(path: P, ext: &str, apply: bool) -> Result<PathBuf> {
    let path = path.as_ref();
    if apply && !path.is_file() {
        return Err(Error::not_found(path));
    }

    let target = path.with_extension(ext.trim_start_matches('.'));

    if apply {
        debug!("Renaming '{}' to '{}'.", path.display(), target.display());
        fs::rename(path, &target)?;
    }
    Ok(target)
}

/// Normalizes a file or directory name into a portable form.
///
/// Non-ASCII characters are transliterated to their closest ASCII
/// equivalent, then the name is lower-cased and spaces become underscores.
/// Only the last path component is touched.
///
/// # Errors
/// * `Error::NotFound` if `apply` is set and nothing exists at `path`
pub fn normalize<P: AsRef<Path>>(path: P, apply: bool) -> Result<PathBuf> {
    let path = path.as_ref();
    if apply && !path.exists() {
        return Err(Error::not_found(path));
    }

    let Some(name) = path.file_name() else {
        return Err(Error::InvalidArgument(format!(
            "'{}' has no file name to normalize",
            path.display()
        )));
    };
    let target = path.with_file_name(normalize_name(&name.to_string_lossy()));

    if apply && target != path {
        debug!("Renaming '{}' to '{}'.", path.display(), target.display());
        fs::rename(path, &target)?;
    }
    Ok(target)
}

/// Transliterated names stay a single path component.
fn normalize_name(name: &str) -> String {
    deunicode::deunicode(name)
        .to_lowercase()
        .replace([' ', '/', '\\'], "_")
}

/// Removes every existing file or directory in `paths`.
/// Absent entries are skipped.
pub fn remove_paths<I, P>(paths: I) -> Result<()>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    for path in paths {
        let path = path.as_ref();
        if path.is_dir() {
            debug!("Removing directory '{}'.", path.display());
            fs::remove_dir_all(path)?;
        } else if path.exists() {
            debug!("Removing file '{}'.", path.display());
            fs::remove_file(path)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Mon Fichier.tex"), "mon_fichier.tex");
        assert_eq!(normalize_name("Résumé Final.TEX"), "resume_final.tex");
        assert_eq!(normalize_name("already_fine.tex"), "already_fine.tex");
        assert_eq!(normalize_name("Chapitre ½.tex"), "chapitre_1_2.tex");
    }

    #[test]
    fn test_extension_helpers() {
        assert_eq!(extension_of("report.tex").as_deref(), Some("tex"));
        assert_eq!(extension_of("report"), None);
        assert_eq!(trim_extension("dir/report.tex"), PathBuf::from("dir/report"));
        assert!(has_extension("REPORT.TEX", ".tex"));
        assert!(!has_extension("report.texx", "tex"));
    }
}
