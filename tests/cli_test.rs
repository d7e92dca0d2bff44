use clap::Parser;
use lmake::cli::{Action, Args};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("lmake")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_compile_with_target() {
    let parsed = Args::try_parse_from(make_args(&["-c", "report.tex"])).unwrap();
    assert_eq!(parsed.action(), Action::Compile(Some(PathBuf::from("report.tex"))));
    assert!(!parsed.verbose);
}

#[test]
fn test_compile_without_target() {
    let parsed = Args::try_parse_from(make_args(&["--compile", "-v"])).unwrap();
    assert_eq!(parsed.action(), Action::Compile(None));
    assert!(parsed.verbose);
}

#[test]
fn test_each_action() {
    let cases = [
        (vec!["-r", "rapport"], Action::Rename("rapport".to_string())),
        (vec!["-t"], Action::CreateTemplate),
        (vec!["--reload-template"], Action::ReloadTemplate),
        (vec!["-u"], Action::ReloadTemplate),
        (vec!["-e"], Action::EditTemplate),
        (vec!["--clean", "-y"], Action::Clean),
    ];
    for (args, expected) in cases {
        let parsed = Args::try_parse_from(make_args(&args)).unwrap();
        assert_eq!(parsed.action(), expected, "arguments {args:?}");
    }
}

#[test]
fn test_only_prompting_actions_read_answers() {
    let parsed = Args::try_parse_from(make_args(&["-s", "-c"])).unwrap();
    assert!(parsed.stdin);
    assert!(!parsed.action().needs_prompt());
    assert!(!Action::Rename("rapport".to_string()).needs_prompt());
    assert!(!Action::ReloadTemplate.needs_prompt());

    assert!(Action::CreateTemplate.needs_prompt());
    assert!(Action::EditTemplate.needs_prompt());
    assert!(Action::Clean.needs_prompt());
}

#[test]
fn test_defaults() {
    let parsed =
        Args::try_parse_from(make_args(&["-t", "--templates", "/opt/templates"])).unwrap();
    assert_eq!(parsed.templates, Some(PathBuf::from("/opt/templates")));
    assert_eq!(parsed.source_folder, "latex");
    assert_eq!(parsed.template_version, "t_school_v1");
    assert!(!parsed.stdin);
    assert!(!parsed.yes);
}

#[test]
fn test_compiler_flag() {
    let parsed =
        Args::try_parse_from(make_args(&["-c", "--compiler", "latexmk -pdf"])).unwrap();
    assert_eq!(parsed.compiler, "latexmk -pdf");
}

#[test]
fn test_missing_action() {
    let err = Args::try_parse_from(make_args(&["-v"])).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
}

#[test]
fn test_actions_are_exclusive() {
    assert!(Args::try_parse_from(make_args(&["-t", "--clean"])).is_err());
    assert!(Args::try_parse_from(make_args(&["-c", "-r", "rapport"])).is_err());
}
