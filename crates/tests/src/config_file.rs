use config::file::Root;
use config::{DiagnosticLines, Statics};

#[test]
fn defaults() {
  let root: Root = toml::from_str("version = 1\n").unwrap();
  assert_eq!(root.version, 1);
  let cfg = Statics::from(&root);
  assert_eq!(cfg.max_type_errors, Statics::DEFAULT_MAX_TYPE_ERRORS);
  assert_eq!(cfg.lines, DiagnosticLines::One);
}

#[test]
fn statics() {
  let contents = r#"
version = 1

[statics]
max-type-errors = 2
diagnostic-lines = "many"
"#;
  let root: Root = toml::from_str(contents).unwrap();
  let cfg = Statics::from(&root);
  assert_eq!(cfg.max_type_errors, 2);
  assert_eq!(cfg.lines, DiagnosticLines::Many);
}

#[test]
fn unknown_lines() {
  let contents = r#"
version = 1

[statics]
diagnostic-lines = "some"
"#;
  assert!(toml::from_str::<Root>(contents).is_err());
}

#[test]
fn file_name() {
  assert_eq!(config::file::NAME, "bolt.toml");
}
