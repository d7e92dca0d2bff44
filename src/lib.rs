//! lmake scaffolds, renames, compiles and cleans LaTeX projects built from
//! a shared template.

/// Command-line interface module for the lmake application
pub mod cli;

/// Top level commands combining the modules below
pub mod commands;

/// External compiler invocation
pub mod compiler;

/// Tool settings and form defaults
/// Supports JSON and YAML formats (lmake.json, lmake.yml, lmake.yaml)
pub mod config;

pub mod constants;

/// Error types and handling for the lmake application
pub mod error;

/// Title, author and footer fields of the customization file
pub mod fields;

/// Extension and file name helpers
pub mod paths;

/// Configuration record carried through a command
pub mod project;

/// User input and interaction handling
pub mod prompt;

/// Template source resolution and copy into projects
pub mod provision;

/// Root document discovery and tagging
pub mod root;
