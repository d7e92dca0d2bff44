//! External LaTeX compiler invocation.
//!
//! The compiler runs in batch mode inside a scratch directory next to the
//! root document. Only the final PDF (or, on failure, the compiler log) is
//! moved back beside the root document.

use crate::constants::{MINTED_PREFIX, PDF_EXTENSION, SCRATCH_DIR, TEX_EXTENSION};
use crate::error::{Error, Result};
use crate::paths::{has_extension, remove_paths};
use crate::root::is_root;
use log::{debug, warn};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Result of a single compiler run.
#[derive(Debug, PartialEq, Eq)]
pub enum CompileOutcome {
    /// The PDF now sits beside the root document
    Success { pdf: PathBuf },
    /// The compiler failed; its log was kept when it produced one
    Failure { log: Option<PathBuf> },
}

impl CompileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompileOutcome::Success { .. })
    }
}

/// A compiler command like `pdflatex` or `latexmk -pdf`.
#[derive(Debug, Clone)]
pub struct Compiler {
    /// The compiler executable
    program: String,
    /// Arguments placed before the ones lmake adds
    args: Vec<String>,
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl Compiler {
    /// Creates a compiler from a whitespace separated command.
    pub fn new(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(String::from);
        let program = parts
            .next()
            .ok_or_else(|| Error::InvalidArgument("the compiler command is empty".to_string()))?;
        Ok(Self { program, args: parts.collect() })
    }

    /// Arguments passed to the compiler for the given root file name.
    pub fn arguments(&self, root_file_name: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push("-shell-escape".to_string());
        args.push(format!("-output-directory={SCRATCH_DIR}"));
        args.push("-interaction=batchmode".to_string());
        args.push(root_file_name.to_string());
        args
    }

    /// Compiles the root document at `root` into a PDF beside it.
    ///
    /// # Errors
    /// * `Error::NotFound` if `root` does not exist
    /// * `Error::InvalidArgument` if `root` is not a tagged `.tex` root document
    /// * `Error::CompilerNotFound` if the program cannot be resolved
    ///
    /// A compiler failure is not an error: it is reported as
    /// [`CompileOutcome::Failure`].
    pub fn compile<P: AsRef<Path>>(&self, root: P) -> Result<CompileOutcome> {
        let root = root.as_ref();
        if !root.is_file() {
            return Err(Error::not_found(root));
        }
        if !has_extension(root, TEX_EXTENSION) {
            return Err(Error::InvalidArgument(format!(
                "'{}' is not a LaTeX file",
                root.display()
            )));
        }
        if !is_root(root)? {
            return Err(Error::InvalidArgument(format!(
                "'{}' is not a root document",
                root.display()
            )));
        }

        let executable = which::which(&self.program).map_err(|e| Error::CompilerNotFound {
            program: self.program.clone(),
            reason: e.to_string(),
        })?;

        let work_dir = match root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = root
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let pdf = work_dir.join(format!("{stem}.{PDF_EXTENSION}"));
        let scratch = work_dir.join(SCRATCH_DIR);
        let minted = work_dir.join(format!("{MINTED_PREFIX}{stem}"));
        let kept_log = work_dir.join(format!("{stem}.log"));

        // Leftovers of a previous run
        remove_paths([&pdf, &scratch, &minted, &kept_log])?;
        fs::create_dir_all(&scratch)?;

        let args = self.arguments(&file_name);
        debug!("Running '{} {}' in '{}'.", executable.display(), args.join(" "), work_dir.display());

        let outcome = run_in_scratch(&executable, &args, &work_dir, &stem, &pdf, &kept_log);
        let cleanup = remove_paths([&scratch, &minted]);
        let outcome = outcome?;
        cleanup?;
        Ok(outcome)
    }
}

/// Runs the compiler and moves its output out of the scratch directory.
/// The scratch directory is left for the caller to remove.
fn run_in_scratch(
    executable: &Path,
    args: &[String],
    work_dir: &Path,
    stem: &str,
    pdf: &Path,
    kept_log: &Path,
) -> Result<CompileOutcome> {
    let status = Command::new(executable)
        .args(args)
        .current_dir(work_dir)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;

    let scratch = work_dir.join(SCRATCH_DIR);
    let produced = scratch.join(format!("{stem}.{PDF_EXTENSION}"));
    if status.success() && produced.is_file() {
        fs::copy(&produced, pdf)?;
        return Ok(CompileOutcome::Success { pdf: pdf.to_path_buf() });
    }

    if status.success() {
        warn!("Compiler exited successfully but produced no '{}'.", produced.display());
    } else {
        debug!("Compiler exited with {status}.");
    }
    Ok(CompileOutcome::Failure { log: keep_log(&scratch, kept_log, stem)? })
}

/// Moves the compiler log out of the scratch directory, if there is one.
fn keep_log(scratch: &Path, kept: &Path, stem: &str) -> Result<Option<PathBuf>> {
    let log = scratch.join(format!("{stem}.log"));
    if !log.is_file() {
        return Ok(None);
    }
    fs::copy(&log, kept)?;
    Ok(Some(kept.to_path_buf()))
}
