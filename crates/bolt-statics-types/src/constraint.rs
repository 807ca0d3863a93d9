//! Constraints between types, to be solved by unification.

use crate::sub::TVSub;
use crate::ty::{Ty, TyVar, Tys};
use crate::unify::Structs;
use std::rc::Rc;

/// A constraint.
#[derive(Debug, Clone, Default)]
pub enum Constraint {
  /// Two types must be equal.
  Equal(Rc<Equal>),
  /// All of these must hold.
  Many(Vec<Constraint>),
  /// Trivially holds.
  #[default]
  Empty,
}

impl Constraint {
  /// Pushes the free vars of the types in this onto `out`, like [`Tys::free_vars`].
  pub fn free_vars(&self, tys: &Tys, out: &mut Vec<TyVar>) {
    for equal in self.equals() {
      tys.free_vars(equal.lhs, out);
      tys.free_vars(equal.rhs, out);
    }
  }

  /// Returns the equality constraints in this, flattened.
  #[must_use]
  pub fn equals(&self) -> Vec<&Rc<Equal>> {
    let mut ret = Vec::new();
    self.equals_go(&mut ret);
    ret
  }

  fn equals_go<'a>(&'a self, ac: &mut Vec<&'a Rc<Equal>>) {
    match self {
      Constraint::Equal(equal) => ac.push(equal),
      Constraint::Many(cs) => {
        for c in cs {
          c.equals_go(ac);
        }
      }
      Constraint::Empty => {}
    }
  }

  /// Returns a copy of this with the substitution applied, as it is when the scheme carrying this
  /// is instantiated at `idx`. Each new equality remembers the one it was copied from.
  #[must_use]
  pub fn instantiate(&self, tys: &mut Tys, sub: &TVSub, idx: bolt_hir::Idx) -> Constraint {
    match self {
      Constraint::Equal(equal) => {
        let lhs = tys.subst(sub, equal.lhs);
        let rhs = tys.subst(sub, equal.rhs);
        let prev = Some(Rc::clone(equal));
        Constraint::Equal(Rc::new(Equal { lhs, rhs, idx, structs: equal.structs, prev }))
      }
      Constraint::Many(cs) => {
        Constraint::Many(cs.iter().map(|c| c.instantiate(tys, sub, idx)).collect())
      }
      Constraint::Empty => Constraint::Empty,
    }
  }
}

/// Two types must be equal.
#[derive(Debug)]
pub struct Equal {
  /// One type.
  pub lhs: Ty,
  /// The other type.
  pub rhs: Ty,
  /// Where this arose.
  pub idx: bolt_hir::Idx,
  /// Whether structs unfold to meet rows when solving this.
  pub structs: Structs,
  /// If this was copied from a generalized binding's constraint when the binding was used, the
  /// constraint it was copied from.
  pub prev: Option<Rc<Equal>>,
}

impl Equal {
  /// Returns a new equality with no history.
  #[must_use]
  pub fn new(lhs: Ty, rhs: Ty, idx: bolt_hir::Idx) -> Self {
    Self { lhs, rhs, idx, structs: Structs::Opaque, prev: None }
  }

  /// Returns a new equality between a type and a row it projects a field from, so a struct may
  /// unfold to its fields.
  #[must_use]
  pub fn projection(ty: Ty, row: Ty, idx: bolt_hir::Idx) -> Self {
    Self { lhs: ty, rhs: row, idx, structs: Structs::Unfold, prev: None }
  }

  /// Returns where this arose, then where the one it was copied from arose, and so on.
  pub fn provenance(&self) -> impl Iterator<Item = bolt_hir::Idx> + '_ {
    std::iter::successors(Some(self), |equal| equal.prev.as_deref()).map(|equal| equal.idx)
  }
}

impl From<Equal> for Constraint {
  fn from(val: Equal) -> Self {
    Constraint::Equal(Rc::new(val))
  }
}
