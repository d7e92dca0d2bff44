//! lmake's main application entry point.
//! Parses the command line, sets up logging and dispatches to the
//! selected command.

use lmake::{
    cli::{get_args, Action, Args},
    commands::{clean_project, compile, create_project, edit_template, reload_template, rename_root},
    compiler::Compiler,
    config::Settings,
    error::{default_error_handler, Result},
    prompt::{AnswersPrompter, DialoguerPrompter, Prompter},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// Every command runs against the current working directory.
fn run(args: Args) -> Result<()> {
    let project_dir = std::env::current_dir()?;
    let settings = Settings::from(&args);
    let action = args.action();
    // Answers on stdin are only consumed by commands that prompt
    let prompt: Box<dyn Prompter> = if args.stdin && action.needs_prompt() {
        Box::new(AnswersPrompter::from_reader(std::io::stdin())?)
    } else {
        Box::new(DialoguerPrompter::new())
    };

    match action {
        Action::Compile(target) => {
            let compiler = Compiler::new(&settings.compiler)?;
            let pdf = compile(&project_dir, target.as_deref(), &compiler)?;
            println!("PDF '{}' generated.", pdf.display());
        }
        Action::Rename(new_name) => {
            let root = rename_root(&project_dir, &new_name)?;
            println!("Root document renamed to '{}'.", root.display());
        }
        Action::CreateTemplate => {
            let root = create_project(&settings, &*prompt, &project_dir)?;
            println!("Template created, root document is '{}'.", root.display());
        }
        Action::ReloadTemplate => {
            reload_template(&settings, &project_dir)?;
            println!("Template updated to '{}'.", settings.template_version);
        }
        Action::EditTemplate => {
            let root = edit_template(&*prompt, &project_dir)?;
            println!("Template edited, root document is '{}'.", root.display());
        }
        Action::Clean => {
            if clean_project(&*prompt, &project_dir, args.yes)? {
                println!("Project cleaned.");
            } else {
                println!("Cleaning aborted.");
            }
        }
    }
    Ok(())
}
