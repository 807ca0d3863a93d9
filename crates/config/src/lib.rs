//! Configuration.

pub mod file;

/// How many lines a diagnostic message may have.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticLines {
  /// Error messages may not have newlines.
  #[default]
  One,
  /// Error messages may (or may not) have newlines.
  Many,
}

/// Configuration for the checker.
#[derive(Debug, Clone, Copy)]
pub struct Statics {
  /// After this many type errors, stop solving constraints.
  pub max_type_errors: usize,
  /// How to render messages.
  pub lines: DiagnosticLines,
}

impl Statics {
  /// The default for `max_type_errors`.
  pub const DEFAULT_MAX_TYPE_ERRORS: usize = 5;
}

impl Default for Statics {
  fn default() -> Self {
    Self { max_type_errors: Self::DEFAULT_MAX_TYPE_ERRORS, lines: DiagnosticLines::default() }
  }
}

impl From<&file::Root> for Statics {
  fn from(val: &file::Root) -> Self {
    let file = &val.statics;
    Self {
      max_type_errors: file.max_type_errors.unwrap_or(Self::DEFAULT_MAX_TYPE_ERRORS),
      lines: match file.diagnostic_lines {
        None | Some(file::DiagnosticLines::One) => DiagnosticLines::One,
        Some(file::DiagnosticLines::Many) => DiagnosticLines::Many,
      },
    }
  }
}
