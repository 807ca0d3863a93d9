//! Type schemes, aka polymorphic types.

use crate::constraint::Constraint;
use crate::sub::TVSub;
use crate::ty::{Ty, TyVar, Tys};

/// A type, quantified over some type variables, carrying the constraints that must hold of every
/// instance.
#[derive(Debug, Clone)]
pub struct Scheme {
  /// The quantified vars.
  pub ty_vars: Vec<TyVar>,
  /// Must hold whenever the scheme is instantiated.
  pub constraint: Constraint,
  /// The type.
  pub ty: Ty,
}

impl Scheme {
  /// Returns a scheme that quantifies nothing.
  #[must_use]
  pub fn mono(ty: Ty) -> Self {
    Self { ty_vars: Vec::new(), constraint: Constraint::Empty, ty }
  }

  /// Returns a new scheme.
  ///
  /// # Panics
  ///
  /// If some quantified var does not occur in the type or the constraint.
  #[must_use]
  pub fn new(tys: &Tys, ty_vars: Vec<TyVar>, constraint: Constraint, ty: Ty) -> Self {
    let mut occurring = Vec::new();
    tys.free_vars(ty, &mut occurring);
    constraint.free_vars(tys, &mut occurring);
    for var in &ty_vars {
      assert!(occurring.contains(var), "quantified var {var:?} does not occur");
    }
    Self { ty_vars, constraint, ty }
  }

  /// Returns whether this quantifies nothing.
  #[must_use]
  pub fn is_mono(&self) -> bool {
    self.ty_vars.is_empty()
  }

  /// Pushes the free vars of this onto `out`: those in the type or the constraint that are not
  /// quantified.
  pub fn free_vars(&self, tys: &Tys, out: &mut Vec<TyVar>) {
    let mut all = Vec::new();
    tys.free_vars(self.ty, &mut all);
    self.constraint.free_vars(tys, &mut all);
    for var in all {
      if !self.ty_vars.contains(&var) && !out.contains(&var) {
        out.push(var);
      }
    }
  }

  /// Returns the type and constraint with each quantified var replaced by the var `fresh` returns
  /// for it. The constraint copies remember `idx` as where they arose.
  pub fn instantiate<F>(&self, tys: &mut Tys, idx: bolt_hir::Idx, mut fresh: F) -> (Ty, Constraint)
  where
    F: FnMut(&mut Tys) -> TyVar,
  {
    if self.is_mono() {
      return (self.ty, Constraint::Empty);
    }
    let sub: TVSub = self
      .ty_vars
      .iter()
      .map(|&var| {
        let new_var = fresh(tys);
        (var, tys.var_ty(new_var))
      })
      .collect();
    let ty = tys.subst(&sub, self.ty);
    let constraint = self.constraint.instantiate(tys, &sub, idx);
    (ty, constraint)
  }
}
