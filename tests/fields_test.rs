use lmake::error::Error;
use lmake::fields::{customize, parse, TemplateFields};
use std::fs;
use tempfile::TempDir;

const TITLE_FILE: &str = "\\title{ChangeTitle}\n\\author{ChangeAuthor}\n\n\\pagestyle{fancy}\n\\fancyhead{}\n\\fancyfoot[L]{ChangeAuthor}\n\\fancyfoot[C]{\\thepage}\n\\fancyfoot[R]{}\n% Title: ChangeTitle\n";

fn write_title_file(temp_dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join("title.tex");
    fs::write(&path, content).unwrap();
    path
}

fn sample_fields() -> TemplateFields {
    TemplateFields {
        title: "Rapport de stage".to_string(),
        authors: "Ada Lovelace, Alan Turing".to_string(),
        left_footer: "Ada Lovelace\\\\Alan Turing".to_string(),
        center_footer: "\\thepage".to_string(),
        right_footer: "ECN - SEC25\\\\Compilers".to_string(),
    }
}

#[test]
fn test_parse() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_title_file(&temp_dir, TITLE_FILE);

    let fields = parse(&path).unwrap();
    assert_eq!(fields.title, "ChangeTitle");
    assert_eq!(fields.authors, "ChangeAuthor");
    assert_eq!(fields.left_footer, "ChangeAuthor");
    assert_eq!(fields.center_footer, "\\thepage");
    assert_eq!(fields.right_footer, "");
}

#[test]
fn test_parse_missing_field() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_title_file(&temp_dir, &TITLE_FILE.replace("\\fancyfoot[R]{}\n", ""));

    match parse(&path) {
        Err(Error::ParseError { field, .. }) => assert_eq!(field, "right footer"),
        other => panic!("Expected ParseError, got {other:?}"),
    }
}

#[test]
fn test_parse_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(matches!(
        parse(temp_dir.path().join("title.tex")),
        Err(Error::NotFound { .. })
    ));
}

#[test]
fn test_customize_only_touches_fields() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_title_file(&temp_dir, TITLE_FILE);

    customize(&path, &sample_fields()).unwrap();
    let content = fs::read_to_string(&path).unwrap();

    assert!(content.starts_with("\\title{Rapport de stage}\n\\author{Ada Lovelace, Alan Turing}\n"));
    assert!(content.contains("\\fancyfoot[L]{Ada Lovelace\\\\Alan Turing}\n"));
    assert!(content.contains("\\fancyfoot[R]{ECN - SEC25\\\\Compilers}\n"));
    // The comment repeating the old title is not a field
    assert!(content.ends_with("% Title: ChangeTitle\n"));
    assert_eq!(parse(&path).unwrap(), sample_fields());
}

#[test]
fn test_customize_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_title_file(&temp_dir, TITLE_FILE);

    customize(&path, &sample_fields()).unwrap();
    let once = fs::read_to_string(&path).unwrap();
    customize(&path, &sample_fields()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), once);
}

#[test]
fn test_parse_then_customize_is_identity() {
    let temp_dir = TempDir::new().unwrap();
    let content = TITLE_FILE.replace('\n', "\r\n");
    let path = write_title_file(&temp_dir, &content);

    let fields = parse(&path).unwrap();
    customize(&path, &fields).unwrap();
    assert_eq!(fs::read(&path).unwrap(), content.as_bytes());
}

#[test]
fn test_customize_rejects_multiline_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_title_file(&temp_dir, TITLE_FILE);
    let fields = TemplateFields { title: "Two\nlines".to_string(), ..sample_fields() };

    assert!(matches!(customize(&path, &fields), Err(Error::InvalidArgument(_))));
    assert_eq!(fs::read_to_string(&path).unwrap(), TITLE_FILE);
}
