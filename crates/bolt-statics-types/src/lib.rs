//! Types and fundamental operations for checking.

pub mod constraint;
pub mod display;
pub mod env;
pub mod generalize;
pub mod kind;
pub mod scheme;
pub mod sub;
pub mod ty;
pub mod unify;

/// The overall mutable state when checking: the storage for types and for kinds.
#[derive(Debug, Default, Clone)]
pub struct St {
  /// The tys.
  pub tys: ty::Tys,
  /// The kinds.
  pub kinds: kind::Kinds,
}
