//! Substitutions of types for type variables.

use crate::ty::{Ty, TyVar};
use fast_hash::FxHashMap;

/// A map from type variables to the types replacing them.
#[derive(Debug, Default, Clone)]
pub struct TVSub(FxHashMap<TyVar, Ty>);

impl TVSub {
  /// Adds a replacement.
  pub fn insert(&mut self, var: TyVar, ty: Ty) {
    self.0.insert(var, ty);
  }

  /// Returns the replacement for the var.
  #[must_use]
  pub fn get(&self, var: TyVar) -> Option<Ty> {
    self.0.get(&var).copied()
  }

  /// Returns whether this replaces nothing.
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl FromIterator<(TyVar, Ty)> for TVSub {
  fn from_iter<T: IntoIterator<Item = (TyVar, Ty)>>(iter: T) -> Self {
    Self(iter.into_iter().collect())
  }
}
