//! See [`Info`].

use bolt_statics_types::kind::Kind;
use bolt_statics_types::scheme::Scheme;
use bolt_statics_types::ty::{Ty, Tys};
use fast_hash::FxHashMap;
use str_util::Name;

/// Information about a checked source file.
#[derive(Debug, Default)]
pub struct Info {
  tys: FxHashMap<bolt_hir::Idx, Ty>,
  schemes: FxHashMap<Name, Scheme>,
  kinds: FxHashMap<Name, Kind>,
}

impl Info {
  pub(crate) fn insert<I>(&mut self, idx: I, ty: Ty)
  where
    I: Into<bolt_hir::Idx>,
  {
    self.tys.insert(idx.into(), ty);
  }

  pub(crate) fn insert_scheme(&mut self, name: Name, scheme: Scheme) {
    self.schemes.insert(name, scheme);
  }

  pub(crate) fn insert_kind(&mut self, name: Name, kind: Kind) {
    self.kinds.insert(name, kind);
  }

  /// replaces every solved variable in the recorded types by its solution.
  pub(crate) fn apply(&mut self, tys: &mut Tys) {
    for ty in self.tys.values_mut() {
      *ty = tys.apply(*ty);
    }
    for scheme in self.schemes.values_mut() {
      scheme.ty = tys.apply(scheme.ty);
    }
  }

  /// Returns the type of the expression, pattern or type expression, with every solved variable
  /// replaced by its solution.
  #[must_use]
  pub fn ty_of<I>(&self, idx: I) -> Option<Ty>
  where
    I: Into<bolt_hir::Idx>,
  {
    self.tys.get(&idx.into()).copied()
  }

  /// Returns the scheme of the top-level value with this name.
  #[must_use]
  pub fn scheme_of(&self, name: &str) -> Option<&Scheme> {
    self.schemes.get(name)
  }

  /// Returns the kind of the top-level type with this name.
  #[must_use]
  pub fn kind_of(&self, name: &str) -> Option<Kind> {
    self.kinds.get(name).copied()
  }
}
