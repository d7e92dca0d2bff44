//! Command-line interface implementation for lmake.
//! Provides argument parsing and help text formatting using clap.

use crate::constants::{
    COMPILER_ENV, DEFAULT_COMPILER, DEFAULT_SOURCE_FOLDER, DEFAULT_TEMPLATE_VERSION, TEMPLATE_ENV,
};
use clap::{error::ErrorKind, ArgGroup, CommandFactory, Parser};
use std::path::PathBuf;

/// Command-line arguments structure for lmake.
#[derive(Parser, Debug)]
#[command(author, version, about = "lmake: LaTeX project scaffolding and build tool", long_about = None)]
#[command(group(
    ArgGroup::new("action")
        .required(true)
        .args(["compile", "rename", "template", "reload_template", "edit_template", "clean"])
))]
pub struct Args {
    /// Compile a LaTeX root document into a PDF (defaults to the detected root document)
    #[arg(short, long, value_name = "TEX_FILE", num_args = 0..=1)]
    pub compile: Option<Option<PathBuf>>,

    /// Rename the root document
    #[arg(short, long, value_name = "NEW_NAME")]
    pub rename: Option<String>,

    /// Create a project from the template in the current directory
    #[arg(short, long)]
    pub template: bool,

    /// Update the template tree to the latest version, keeping the current fields
    #[arg(short = 'u', long)]
    pub reload_template: bool,

    /// Edit the title, authors, footers and file name of the project
    #[arg(short, long)]
    pub edit_template: bool,

    /// Remove the root document, its PDF and the template tree
    #[arg(long)]
    pub clean: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Read the form answers as a JSON object from stdin
    #[arg(short, long)]
    pub stdin: bool,

    /// Answer yes to confirmation prompts
    #[arg(short, long)]
    pub yes: bool,

    /// Directory holding the template sources
    #[arg(long, value_name = "DIR", env = TEMPLATE_ENV)]
    pub templates: Option<PathBuf>,

    /// Subfolder of the template directory tried first
    #[arg(long, value_name = "NAME", default_value = DEFAULT_SOURCE_FOLDER)]
    pub source_folder: String,

    /// Template version to provision
    #[arg(long, value_name = "NAME", default_value = DEFAULT_TEMPLATE_VERSION)]
    pub template_version: String,

    /// Compiler command, optionally followed by extra arguments
    #[arg(long, value_name = "COMMAND", env = COMPILER_ENV, default_value = DEFAULT_COMPILER)]
    pub compiler: String,
}

/// The command selected on the command line.
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    Compile(Option<PathBuf>),
    Rename(String),
    CreateTemplate,
    ReloadTemplate,
    EditTemplate,
    Clean,
}

impl Args {
    /// Returns the selected command. Exactly one is guaranteed by the
    /// `action` argument group.
    pub fn action(&self) -> Action {
        if let Some(target) = &self.compile {
            Action::Compile(target.clone())
        } else if let Some(name) = &self.rename {
            Action::Rename(name.clone())
        } else if self.template {
            Action::CreateTemplate
        } else if self.reload_template {
            Action::ReloadTemplate
        } else if self.edit_template {
            Action::EditTemplate
        } else {
            Action::Clean
        }
    }
}

impl Action {
    /// Whether the command asks for input, either on the terminal or as
    /// answers on stdin.
    pub fn needs_prompt(&self) -> bool {
        matches!(self, Action::CreateTemplate | Action::EditTemplate | Action::Clean)
    }
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With status code 1 if no command was given
/// * With clap's default error handling for other argument errors
pub fn get_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            if e.kind() == ErrorKind::MissingRequiredArgument {
                let _ = Args::command()
                    .help_template(
                        r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#,
                    )
                    .print_help();
                std::process::exit(1);
            } else {
                e.exit();
            }
        }
    }
}
