//! Kinds, the types of types, and their unification.

use std::fmt;

/// Storage of all the kinds.
#[derive(Debug, Clone)]
pub struct Kinds {
  data: Vec<KindData>,
  solutions: Vec<Option<Kind>>,
}

impl Default for Kinds {
  fn default() -> Self {
    let mut ret = Self { data: Vec::new(), solutions: Vec::new() };
    assert_eq!(ret.mk(KindData::Type), Kind::TYPE);
    ret
  }
}

impl Kinds {
  fn mk(&mut self, data: KindData) -> Kind {
    let ret = Kind(idx::Idx::new(self.data.len()));
    self.data.push(data);
    ret
  }

  /// Returns a fresh kind variable.
  pub fn var(&mut self) -> Kind {
    let var = KindVar(idx::Idx::new(self.solutions.len()));
    self.solutions.push(None);
    self.mk(KindData::Var(var))
  }

  /// Returns `param -> res`.
  pub fn arrow(&mut self, param: Kind, res: Kind) -> Kind {
    self.mk(KindData::Arrow(param, res))
  }

  /// Returns `p1 -> p2 -> .. -> res`.
  pub fn arrows<I>(&mut self, params: I, res: Kind) -> Kind
  where
    I: IntoIterator<Item = Kind>,
    I::IntoIter: DoubleEndedIterator,
  {
    params.into_iter().rev().fold(res, |ac, param| self.arrow(param, ac))
  }

  /// Follows solved variables.
  #[must_use]
  pub fn canonicalize(&self, mut kind: Kind) -> Kind {
    while let KindData::Var(var) = self.data[kind.0.to_usize()] {
      match self.solutions[var.0.to_usize()] {
        Some(sol) => kind = sol,
        None => break,
      }
    }
    kind
  }

  /// Returns the data for the kind, after following solved variables.
  #[must_use]
  pub fn data(&self, kind: Kind) -> KindData {
    self.data[self.canonicalize(kind).0.to_usize()]
  }

  fn occurs(&self, var: KindVar, kind: Kind) -> bool {
    match self.data(kind) {
      KindData::Type => false,
      KindData::Var(v) => v == var,
      KindData::Arrow(a, b) => self.occurs(var, a) || self.occurs(var, b),
    }
  }

  /// Returns a value that displays the kind.
  #[must_use]
  pub fn display(&self, kind: Kind) -> impl fmt::Display + '_ {
    KindDisplay { kinds: self, kind, prec: Prec::Arrow }
  }
}

/// Unifies the kinds.
///
/// # Errors
///
/// If they cannot be unified.
pub fn unify(kinds: &mut Kinds, lhs: Kind, rhs: Kind) -> Result<(), Mismatch> {
  let lhs = kinds.canonicalize(lhs);
  let rhs = kinds.canonicalize(rhs);
  if lhs == rhs {
    return Ok(());
  }
  match (kinds.data(lhs), kinds.data(rhs)) {
    (KindData::Var(var), _) => solve(kinds, var, lhs, rhs),
    (_, KindData::Var(var)) => solve(kinds, var, rhs, lhs),
    (KindData::Type, KindData::Type) => Ok(()),
    (KindData::Arrow(a1, b1), KindData::Arrow(a2, b2)) => {
      unify(kinds, a1, a2)?;
      unify(kinds, b1, b2)
    }
    (KindData::Type, KindData::Arrow(..)) | (KindData::Arrow(..), KindData::Type) => {
      Err(Mismatch { lhs, rhs })
    }
  }
}

fn solve(kinds: &mut Kinds, var: KindVar, var_kind: Kind, kind: Kind) -> Result<(), Mismatch> {
  if kinds.occurs(var, kind) {
    return Err(Mismatch { lhs: var_kind, rhs: kind });
  }
  kinds.solutions[var.0.to_usize()] = Some(kind);
  Ok(())
}

/// The kinds were not compatible.
#[derive(Debug)]
pub struct Mismatch {
  /// One kind.
  pub lhs: Kind,
  /// The other kind.
  pub rhs: Kind,
}

/// A kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind(idx::Idx);

impl Kind {
  /// The kind of types that have values.
  pub const TYPE: Self = Self(idx::Idx::new_u32(0));
}

/// The structure of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindData {
  /// The kind of types that have values.
  Type,
  /// The kind of type constructors.
  Arrow(Kind, Kind),
  /// An unsolved kind variable.
  Var(KindVar),
}

/// A kind variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindVar(idx::Idx);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
  Arrow,
  Atom,
}

struct KindDisplay<'a> {
  kinds: &'a Kinds,
  kind: Kind,
  prec: Prec,
}

impl fmt::Display for KindDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.kinds.data(self.kind) {
      KindData::Type => f.write_str("Type"),
      KindData::Var(var) => write!(f, "?k{}", var.0.to_usize()),
      KindData::Arrow(param, res) => {
        let needs_parens = self.prec > Prec::Arrow;
        if needs_parens {
          f.write_str("(")?;
        }
        let param = KindDisplay { kinds: self.kinds, kind: param, prec: Prec::Atom };
        let res = KindDisplay { kinds: self.kinds, kind: res, prec: Prec::Arrow };
        write!(f, "{param} -> {res}")?;
        if needs_parens {
          f.write_str(")")?;
        }
        Ok(())
      }
    }
  }
}
