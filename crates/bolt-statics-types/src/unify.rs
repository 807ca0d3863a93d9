//! Unification: given two types, figuring out whether they are "compatible", and if so, how.

use crate::ty::{Ty, TyData, TyVar, Tys};
use bolt_hir::Lab;

/// An error when unifying.
#[derive(Debug)]
pub struct Error {
  /// What went wrong.
  pub kind: Incompatible,
  /// The labels of the fields, outermost first, we were inside of when it went wrong.
  pub path: Vec<Lab>,
}

/// A reason why types were incompatible.
#[derive(Debug)]
pub enum Incompatible {
  /// The first type, a var, occurs in the second, which is not the var itself.
  Circularity(Ty, Ty),
  /// The types have different shapes.
  Mismatch(Ty, Ty),
  /// One row had the field, and the other did not.
  MissingField(Lab),
}

/// What unifying did to the type variables.
#[derive(Debug, Default)]
pub struct Changes {
  /// Vars that were solved.
  pub solved: Vec<TyVar>,
  /// Fresh vars that were made.
  pub fresh: Vec<TyVar>,
}

/// Whether a struct may meet a row of fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Structs {
  /// A struct only unifies with itself.
  Opaque,
  /// A fully applied struct unfolds to its row of fields to meet a row, as when projecting a field.
  Unfold,
}

/// Unifies two types, updating `tys` as necessary to record how, and recording the effect on
/// variables in `changes`.
///
/// Unifying keeps going after an error, so every independent failure is reported. Solutions made
/// along the way are kept.
///
/// # Errors
///
/// If the types couldn't be unified, with every reason why.
pub fn unify(
  tys: &mut Tys,
  changes: &mut Changes,
  structs: Structs,
  lhs: Ty,
  rhs: Ty,
) -> Result<(), Vec<Error>> {
  let mut cx = Cx { tys, changes, structs, path: Vec::new(), errors: Vec::new() };
  cx.unify(lhs, rhs);
  if cx.errors.is_empty() { Ok(()) } else { Err(cx.errors) }
}

struct Cx<'a> {
  tys: &'a mut Tys,
  changes: &'a mut Changes,
  structs: Structs,
  path: Vec<Lab>,
  errors: Vec<Error>,
}

impl Cx<'_> {
  fn err(&mut self, kind: Incompatible) {
    self.errors.push(Error { kind, path: self.path.clone() });
  }

  fn unify(&mut self, lhs: Ty, rhs: Ty) {
    let lhs = self.tys.find(lhs);
    let rhs = self.tys.find(rhs);
    if lhs == rhs {
      return;
    }
    match (self.tys.data(lhs), self.tys.data(rhs)) {
      // interesting cases
      (TyData::Var(var), _) => self.solve(var, lhs, rhs),
      (_, TyData::Var(var)) => self.solve(var, rhs, lhs),
      (TyData::Field(l1, t1, r1), TyData::Field(l2, t2, r2)) => {
        if l1 == l2 {
          self.path.push(l1.clone());
          self.unify_field(l1, t1, t2);
          self.path.pop();
          self.unify(r1, r2);
          return;
        }
        // both rows ending in the same unsolved var would need that var to contain itself.
        let tail = self.tys.row_tail(r1);
        if tail == self.tys.row_tail(r2) && matches!(self.tys.data(tail), TyData::Var(_)) {
          self.err(Incompatible::Mismatch(lhs, rhs));
          return;
        }
        let var = self.tys.regular_var();
        self.changes.fresh.push(var);
        let rest = self.tys.var_ty(var);
        let with_l2 = self.tys.field(l2, t2, rest);
        self.unify(r1, with_l2);
        let with_l1 = self.tys.field(l1, t1, rest);
        self.unify(r2, with_l1);
      }
      (TyData::Nil, TyData::Field(lab, ty, rest)) | (TyData::Field(lab, ty, rest), TyData::Nil) => {
        self.path.push(lab.clone());
        self.unify_field(lab, ty, Ty::ABSENT);
        self.path.pop();
        self.unify(rest, Ty::NIL);
      }
      // trivial base cases
      (TyData::Nil, TyData::Nil) | (TyData::Absent, TyData::Absent) => {}
      (TyData::Con(c1), TyData::Con(c2)) if c1 == c2 => {}
      // recursive cases
      (TyData::Arrow(p1, r1), TyData::Arrow(p2, r2)) => {
        self.unify(p1, p2);
        self.unify(r1, r2);
      }
      (TyData::App(f1, a1), TyData::App(f2, a2)) => {
        self.unify(f1, f2);
        self.unify(a1, a2);
      }
      (TyData::Present(t1), TyData::Present(t2)) => self.unify(t1, t2),
      // a struct against a row of fields is its row of fields, if allowed.
      (TyData::Field(..) | TyData::Nil, _) => match self.unfold(rhs) {
        Some(rhs) => self.unify(lhs, rhs),
        None => self.err(Incompatible::Mismatch(lhs, rhs)),
      },
      (_, TyData::Field(..) | TyData::Nil) => match self.unfold(lhs) {
        Some(lhs) => self.unify(lhs, rhs),
        None => self.err(Incompatible::Mismatch(lhs, rhs)),
      },
      _ => self.err(Incompatible::Mismatch(lhs, rhs)),
    }
  }

  fn unfold(&mut self, ty: Ty) -> Option<Ty> {
    match self.structs {
      Structs::Opaque => None,
      Structs::Unfold => self.tys.unfold_struct(ty),
    }
  }

  /// unifies the presence types of the field with the label.
  fn unify_field(&mut self, lab: Lab, lhs: Ty, rhs: Ty) {
    match (self.tys.data(lhs), self.tys.data(rhs)) {
      (TyData::Present(_), TyData::Absent) | (TyData::Absent, TyData::Present(_)) => {
        self.err(Incompatible::MissingField(lab));
      }
      _ => self.unify(lhs, rhs),
    }
  }

  fn solve(&mut self, var: TyVar, var_ty: Ty, ty: Ty) {
    if self.tys.occurs(var, ty) {
      self.err(Incompatible::Circularity(var_ty, ty));
      return;
    }
    self.tys.solve(var, ty);
    self.changes.solved.push(var);
  }
}
