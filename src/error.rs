//! Error handling for lmake.
//! Defines the error type and result alias used throughout the application.

use std::io;
use thiserror::Error;

/// Custom error types for lmake operations.
///
/// Every command propagates these up to `main`, where
/// [`default_error_handler`] reports them and ends the process.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// An expected file or directory is absent
    #[error("Not found: {path}.")]
    NotFound { path: String },

    /// An expected marker or field pattern is missing (or repeated) in a text file
    #[error("Failed to parse field '{field}' in '{file}': {reason}.")]
    ParseError { field: String, file: String, reason: String },

    /// The target is not a recognized root document or is otherwise unusable
    #[error("Invalid argument: {0}.")]
    InvalidArgument(String),

    /// The external compiler reported a failure
    #[error("Generation of '{root}' failed. Please check the logs{}.", log_hint(.log))]
    CompileFailure { root: String, log: Option<String> },

    /// None of the candidate template locations exist
    #[error("Template source '{item}' not found (tried: {tried}).")]
    TemplateSourceMissing { item: String, tried: String },

    /// The compiler executable could not be resolved
    #[error("Compiler '{program}' could not be found: {reason}.")]
    CompilerNotFound { program: String, reason: String },

    /// Represents errors in the form defaults file
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors that occur while interacting with the user
    #[error("Prompt error: {0}.")]
    PromptError(#[from] dialoguer::Error),

    #[error("Regex error: {0}.")]
    RegexError(#[from] regex::Error),

    #[error("Directory traversal error: {0}.")]
    WalkDirError(#[from] walkdir::Error),
}

impl Error {
    pub(crate) fn not_found<P: AsRef<std::path::Path>>(path: P) -> Self {
        Error::NotFound { path: path.as_ref().display().to_string() }
    }
}

fn log_hint(log: &Option<String>) -> String {
    log.as_ref().map(|log| format!(" in '{log}'")).unwrap_or_default()
}

/// Convenience type alias for Results with lmake's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{err}");
    std::process::exit(1);
}
