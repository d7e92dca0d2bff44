//! Root document discovery and tagging.
//!
//! The root document is not identified by its name but by a marker line
//! (`% !TeX root = <file>`) seeded by the template. Editors rely on that line
//! to know which file to compile, so it has to follow the file on rename.

use crate::constants::{ROOT_MARKER, TEX_EXTENSION};
use crate::error::{Error, Result};
use crate::paths::has_extension;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Looks for the root document directly inside `dir`.
///
/// Candidates are the `.tex` files of `dir`, visited in lexicographic order
/// of their names; the first one containing the marker wins.
///
/// # Errors
/// * `Error::NotFound` if no file carries the marker
pub fn find_root<P: AsRef<Path>>(dir: P) -> Result<PathBuf> {
    let dir = dir.as_ref();
    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, TEX_EXTENSION) {
            candidates.push(path);
        }
    }
    candidates.sort();

    for candidate in candidates {
        if is_root(&candidate)? {
            debug!("Root document found: '{}'.", candidate.display());
            return Ok(candidate);
        }
    }

    Err(Error::NotFound {
        path: format!("root document in '{}'", dir.display()),
    })
}

/// Returns whether the file at `path` carries the root marker.
///
/// # Errors
/// * `Error::NotFound` if `path` is not an existing file
pub fn is_root<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::not_found(path));
    }
    let content = fs::read(path)?;
    Ok(String::from_utf8_lossy(&content).contains(ROOT_MARKER))
}

/// Points the marker line of `path` at the file's own name.
///
/// Only the first line containing the marker is rewritten; text before the
/// marker and the line ending are kept. A file without marker is left
/// untouched and `false` is returned.
pub fn tag_as_root<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .ok_or_else(|| Error::InvalidArgument(format!("'{}' is not a file", path.display())))?
        .to_string_lossy()
        .into_owned();

    let content = fs::read_to_string(path)?;
    match retag(&content, &name) {
        Some(updated) => {
            if updated != content {
                debug!("Tagging '{}' as root.", path.display());
                fs::write(path, updated)?;
            }
            Ok(true)
        }
        None => {
            debug!("No root marker in '{}', nothing to tag.", path.display());
            Ok(false)
        }
    }
}

/// Rewrites the first marker line of `content` to reference `name`.
fn retag(content: &str, name: &str) -> Option<String> {
    let start = content.find(ROOT_MARKER)?;
    let line_end = content[start..]
        .find('\n')
        .map(|offset| start + offset)
        .unwrap_or(content.len());
    let end = if content[..line_end].ends_with('\r') { line_end - 1 } else { line_end };

    let mut updated = String::with_capacity(content.len() + name.len());
    updated.push_str(&content[..start]);
    updated.push_str(ROOT_MARKER);
    updated.push(' ');
    updated.push_str(name);
    updated.push_str(&content[end..]);
    Some(updated)
}
