//! Generalization, one of the fundamental operations on types for the inference algorithm.

use crate::constraint::Constraint;
use crate::scheme::Scheme;
use crate::ty::{Ty, TyVar, Tys};

/// Generalizes a type into a type scheme, quantifying over the vars in it (after applying
/// solutions) that `can_quantify` allows. Those of the `pending` constraints that mention a
/// quantified var become the constraint of the scheme.
pub fn get<F>(tys: &mut Tys, ty: Ty, pending: &[Constraint], can_quantify: F) -> Scheme
where
  F: Fn(TyVar) -> bool,
{
  let ty = tys.apply(ty);
  let mut vars = Vec::new();
  tys.free_vars(ty, &mut vars);
  vars.retain(|&var| can_quantify(var));
  if vars.is_empty() {
    return Scheme::mono(ty);
  }
  let mut kept: Vec<Constraint> =
    pending.iter().filter(|c| mentions_any(tys, c, &vars)).cloned().collect();
  let constraint = match kept.len() {
    0 => Constraint::Empty,
    1 => kept.pop().unwrap_or_default(),
    _ => Constraint::Many(kept),
  };
  Scheme::new(tys, vars, constraint, ty)
}

/// Returns whether the constraint mentions any of the vars.
#[must_use]
pub fn mentions_any(tys: &Tys, constraint: &Constraint, vars: &[TyVar]) -> bool {
  let mut free = Vec::new();
  constraint.free_vars(tys, &mut free);
  free.iter().any(|var| vars.contains(var))
}
