//! Configuration stored in a config file.

use serde::Deserialize;

/// The name of the config file.
pub const NAME: &str = "bolt.toml";

/// The root config.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Root {
  /// The version. Should be 1.
  pub version: u16,
  /// The checker config.
  #[serde(default)]
  pub statics: Statics,
}

/// Configuration for the checker.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Statics {
  /// After this many type errors, stop solving constraints.
  pub max_type_errors: Option<usize>,
  /// How to render messages.
  pub diagnostic_lines: Option<DiagnosticLines>,
}

/// How many lines a diagnostic message may have.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticLines {
  /// Error messages may not have newlines.
  One,
  /// Error messages may (or may not) have newlines.
  Many,
}
