//! Emitting and solving constraints.
//!
//! A constraint that mentions vars of more than one generalization level waits in the poly of the
//! deepest one until that poly is finished. Everything else is solved right away.

use crate::error::{ErrorKind, Mismatch};
use crate::st::St;
use bolt_statics_types::constraint::{Constraint, Equal};
use bolt_statics_types::ty::Ty;
use bolt_statics_types::unify::{self, Changes, Incompatible};
use std::rc::Rc;

/// the level of the source file.
const GLOBAL: usize = 0;

impl St<'_> {
  /// adds the constraint, solving it now or deferring it.
  pub(crate) fn add_constraint(&mut self, constraint: Constraint) {
    match constraint {
      Constraint::Empty => {}
      Constraint::Many(cs) => {
        for c in cs {
          self.add_constraint(c);
        }
      }
      Constraint::Equal(equal) => match self.deferral_level(&equal) {
        None => self.solve(&equal),
        Some(level) => {
          cov_mark::hit("defer_constraint");
          log::debug!("defer constraint to level {level}");
          self.defer(level, Constraint::Equal(equal));
        }
      },
    }
  }

  /// adds a constraint that the types are equal.
  pub(crate) fn equal<I>(&mut self, lhs: Ty, rhs: Ty, idx: I)
  where
    I: Into<bolt_hir::Idx>,
  {
    self.add_constraint(Equal::new(lhs, rhs, idx.into()).into());
  }

  /// adds a constraint that the type has the fields of the row, as when projecting a field.
  pub(crate) fn projection<I>(&mut self, ty: Ty, row: Ty, idx: I)
  where
    I: Into<bolt_hir::Idx>,
  {
    self.add_constraint(Equal::projection(ty, row, idx.into()).into());
  }

  /// returns the level to defer to, which is the deepest level of a var on either side, unless
  /// every var of both sides is at that level, or a side has no var above the source file.
  fn deferral_level(&self, equal: &Equal) -> Option<usize> {
    let lhs = self.side_levels(equal.lhs);
    let rhs = self.side_levels(equal.rhs);
    let lhs_max = lhs.iter().copied().max().unwrap_or(GLOBAL);
    let rhs_max = rhs.iter().copied().max().unwrap_or(GLOBAL);
    if lhs_max == GLOBAL || rhs_max == GLOBAL {
      return None;
    }
    let upper = lhs_max.max(rhs_max);
    let lower = lhs.iter().chain(rhs.iter()).copied().min().unwrap_or(upper);
    (lower != upper).then_some(upper)
  }

  /// the levels of the vars in the type that were introduced at some level.
  fn side_levels(&self, ty: Ty) -> Vec<usize> {
    let mut vars = Vec::new();
    self.syms_tys.tys.free_vars(ty, &mut vars);
    vars.into_iter().filter_map(|var| self.level(var)).collect()
  }

  fn solve(&mut self, equal: &Rc<Equal>) {
    if !self.can_solve() {
      cov_mark::hit("skip_solve");
      return;
    }
    let mut changes = Changes::default();
    let tys = &mut self.syms_tys.tys;
    let result = unify::unify(tys, &mut changes, equal.structs, equal.lhs, equal.rhs);
    for var in changes.solved {
      self.forget(var);
    }
    for var in changes.fresh {
      self.introduce(var);
    }
    let Err(errors) = result else { return };
    for e in errors {
      if !self.can_solve() {
        break;
      }
      let provenance: Vec<_> = equal.provenance().collect();
      let kind = match e.kind {
        Incompatible::Mismatch(lhs, rhs) => {
          let lhs = self.syms_tys.tys.apply(lhs);
          let rhs = self.syms_tys.tys.apply(rhs);
          ErrorKind::TypeMismatch(Mismatch { lhs, rhs, provenance, path: e.path })
        }
        Incompatible::MissingField(lab) => ErrorKind::FieldNotFound(lab, provenance),
        Incompatible::Circularity(var, ty) => {
          let ty = self.syms_tys.tys.apply(ty);
          ErrorKind::Circularity(var, ty)
        }
      };
      self.type_err(equal.idx, kind);
    }
  }
}
