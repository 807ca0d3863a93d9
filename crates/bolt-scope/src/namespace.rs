//! See [`Namespace`].

use std::fmt;

/// A set of namespaces a name may live in.
///
/// A single name may be declared in more than one namespace at once, e.g. `struct Foo` declares
/// `Foo` the type and `Foo` the constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Namespace(u8);

impl Namespace {
  /// Values, functions and constructors.
  pub const VAR: Self = Self(1);
  /// Types.
  pub const TYPE: Self = Self(1 << 1);
  /// Modules.
  pub const MODULE: Self = Self(1 << 2);
  /// Type classes.
  pub const CLASS: Self = Self(1 << 3);

  /// Returns the union of the two.
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Returns whether the two have a namespace in common.
  #[must_use]
  pub const fn intersects(self, other: Self) -> bool {
    self.0 & other.0 != 0
  }
}

impl fmt::Display for Namespace {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let names = [
      (Self::VAR, "value"),
      (Self::TYPE, "type"),
      (Self::MODULE, "module"),
      (Self::CLASS, "class"),
    ];
    let iter = names.into_iter().filter(|&(ns, _)| self.intersects(ns)).map(|(_, name)| name);
    fmt_util::sep_seq(f, " or ", iter)
  }
}
