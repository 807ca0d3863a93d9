//! Errors.

use bolt_hir::Lab;
use bolt_statics_types::display::VarNames;
use bolt_statics_types::kind::Kind;
use bolt_statics_types::ty::Ty;
use diagnostic::{Code, Severity};
use std::fmt;
use str_util::Name;

#[derive(Debug)]
pub(crate) enum ErrorKind {
  /// the module path it was looked up in, if any, and the name.
  BindingNotFound(Vec<Name>, Name),
  /// the rest of the path, starting with the module that was not found.
  ModuleNotFound(Vec<Name>),
  TypeclassNotFound(Name),
  TypeclassDeclaredTwice(Name),
  KindMismatch(Kind, Kind),
  TypeMismatch(Mismatch),
  FieldNotFound(Lab, Vec<bolt_hir::Idx>),
  Circularity(Ty, Ty),
  DuplicateLab(Lab),
}

#[derive(Debug)]
pub(crate) struct Mismatch {
  pub(crate) lhs: Ty,
  pub(crate) rhs: Ty,
  /// where the failing constraint arose, then where each one it was copied from arose.
  pub(crate) provenance: Vec<bolt_hir::Idx>,
  pub(crate) path: Vec<Lab>,
}

struct ErrorKindDisplay<'a> {
  kind: &'a ErrorKind,
  st: &'a bolt_statics_types::St,
  lines: config::DiagnosticLines,
}

impl fmt::Display for ErrorKindDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let tys = &self.st.tys;
    match self.kind {
      ErrorKind::BindingNotFound(prefix, name) => {
        f.write_str("binding not found: ")?;
        for module in prefix {
          write!(f, "{module}.")?;
        }
        name.fmt(f)
      }
      ErrorKind::ModuleNotFound(rest) => {
        let module = rest.first().map_or("", Name::as_str);
        write!(f, "module not found: {module}")?;
        if rest.len() > 1 {
          f.write_str(" (in path ")?;
          fmt_util::sep_seq(f, ".", rest.iter())?;
          f.write_str(")")?;
        }
        Ok(())
      }
      ErrorKind::TypeclassNotFound(name) => write!(f, "type class not found: {name}"),
      ErrorKind::TypeclassDeclaredTwice(name) => {
        write!(f, "type class declared more than once: {name}")
      }
      ErrorKind::KindMismatch(lhs, rhs) => {
        let lhs = self.st.kinds.display(*lhs);
        let rhs = self.st.kinds.display(*rhs);
        write!(f, "incompatible kinds: {lhs} and {rhs}")
      }
      ErrorKind::TypeMismatch(mismatch) => {
        let names = VarNames::new(tys, &[mismatch.lhs, mismatch.rhs], &[]);
        let lhs = tys.display_with(&names, mismatch.lhs);
        let rhs = tys.display_with(&names, mismatch.rhs);
        match self.lines {
          config::DiagnosticLines::One => {
            write!(f, "incompatible types: {lhs} and {rhs}")?;
            if !mismatch.path.is_empty() {
              f.write_str(" in field ")?;
              fmt_util::sep_seq(f, ".", mismatch.path.iter())?;
            }
            Ok(())
          }
          config::DiagnosticLines::Many => {
            f.write_str("incompatible types")?;
            if !mismatch.path.is_empty() {
              f.write_str(" in field ")?;
              fmt_util::sep_seq(f, ".", mismatch.path.iter())?;
            }
            writeln!(f)?;
            writeln!(f, "  left:  {lhs}")?;
            write!(f, "  right: {rhs}")?;
            let copies = mismatch.provenance.len().saturating_sub(1);
            if copies != 0 {
              let s = if copies == 1 { "" } else { "s" };
              write!(f, "\n  via {copies} instantiation{s} of a generalized binding")?;
            }
            Ok(())
          }
        }
      }
      ErrorKind::FieldNotFound(lab, _) => write!(f, "field not found: {lab}"),
      ErrorKind::Circularity(var, ty) => {
        let names = VarNames::new(tys, &[*var, *ty], &[]);
        let var = tys.display_with(&names, *var);
        let ty = tys.display_with(&names, *ty);
        write!(f, "circular type: {var} occurs in {ty}")
      }
      ErrorKind::DuplicateLab(lab) => write!(f, "duplicate label: {lab}"),
    }
  }
}

/// An error.
#[derive(Debug)]
pub struct Error {
  pub(crate) idx: bolt_hir::Idx,
  pub(crate) kind: ErrorKind,
}

impl Error {
  /// Returns the [`bolt_hir::Idx`] for this.
  #[must_use]
  pub fn idx(&self) -> bolt_hir::Idx {
    self.idx
  }

  /// Returns every node that led to this error, starting with [`Self::idx`]. For errors from
  /// constraints copied out of generalized bindings, this includes where each copy was made.
  #[must_use]
  pub fn provenance(&self) -> Vec<bolt_hir::Idx> {
    match &self.kind {
      ErrorKind::TypeMismatch(mismatch) => mismatch.provenance.clone(),
      ErrorKind::FieldNotFound(_, provenance) => provenance.clone(),
      _ => vec![self.idx],
    }
  }

  /// Returns a value that displays the message.
  #[must_use]
  pub fn display<'a>(
    &'a self,
    st: &'a bolt_statics_types::St,
    lines: config::DiagnosticLines,
  ) -> impl fmt::Display + 'a {
    ErrorKindDisplay { kind: &self.kind, st, lines }
  }

  /// Returns whether this came from solving a type constraint, which are the errors that count
  /// towards the limit.
  #[must_use]
  pub fn is_type_error(&self) -> bool {
    matches!(
      self.kind,
      ErrorKind::TypeMismatch(_) | ErrorKind::FieldNotFound(..) | ErrorKind::Circularity(..)
    )
  }

  /// Returns the code for this.
  #[must_use]
  pub fn code(&self) -> Code {
    match self.kind {
      ErrorKind::BindingNotFound(..) => Code::n(5001),
      ErrorKind::ModuleNotFound(_) => Code::n(5002),
      ErrorKind::TypeclassNotFound(_) => Code::n(5003),
      ErrorKind::TypeclassDeclaredTwice(_) => Code::n(5004),
      ErrorKind::KindMismatch(..) => Code::n(5005),
      ErrorKind::TypeMismatch(_) => Code::n(5006),
      ErrorKind::FieldNotFound(..) => Code::n(5007),
      ErrorKind::Circularity(..) => Code::n(5008),
      ErrorKind::DuplicateLab(_) => Code::n(5009),
    }
  }

  /// Returns the severity for this.
  #[must_use]
  pub fn severity(&self) -> Severity {
    match self.kind {
      ErrorKind::BindingNotFound(..)
      | ErrorKind::ModuleNotFound(_)
      | ErrorKind::TypeclassNotFound(_)
      | ErrorKind::TypeclassDeclaredTwice(_)
      | ErrorKind::KindMismatch(..)
      | ErrorKind::TypeMismatch(_)
      | ErrorKind::FieldNotFound(..)
      | ErrorKind::Circularity(..)
      | ErrorKind::DuplicateLab(_) => Severity::Error,
    }
  }
}
