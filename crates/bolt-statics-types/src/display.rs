//! Displaying types and schemes.

use crate::scheme::Scheme;
use crate::ty::{ConKind, Ty, TyData, TyVar, Tys};
use fast_hash::FxHashMap;
use std::fmt;

/// Names for the type variables in some types.
///
/// Rigid vars use their written name. Quantified vars get `a`, `b`, and so on, and other unsolved
/// vars get `?a`, `?b`, and so on, in order of appearance.
#[derive(Debug, Default)]
pub struct VarNames {
  names: FxHashMap<TyVar, String>,
}

impl VarNames {
  /// Returns names for the vars in the types, treating `quantified` as bound.
  #[must_use]
  pub fn new(tys: &Tys, these: &[Ty], quantified: &[TyVar]) -> Self {
    let mut vars = Vec::new();
    for &ty in these {
      tys.free_vars(ty, &mut vars);
    }
    let mut ret = Self::default();
    let (mut bound, mut free) = (0usize, 0usize);
    for var in vars {
      let name = if let Some(name) = tys.rigid_name(var) {
        name.as_str().to_owned()
      } else if quantified.contains(&var) {
        bound += 1;
        letters(bound - 1)
      } else {
        free += 1;
        format!("?{}", letters(free - 1))
      };
      ret.names.insert(var, name);
    }
    ret
  }

  fn get(&self, var: TyVar) -> &str {
    self.names.get(&var).map_or("?", String::as_str)
  }
}

fn letters(n: usize) -> String {
  let alpha = b'a' + u8::try_from(n % 26).unwrap_or_default();
  let ch = char::from(alpha);
  match n / 26 {
    0 => ch.to_string(),
    k => format!("{ch}{k}"),
  }
}

impl Tys {
  /// Returns a value that displays the type.
  #[must_use]
  pub fn display(&self, ty: Ty) -> impl fmt::Display + '_ {
    TyDisplayOwned { names: VarNames::new(self, &[ty], &[]), tys: self, ty }
  }

  /// Returns a value that displays the type with the given var names.
  #[must_use]
  pub fn display_with<'a>(&'a self, names: &'a VarNames, ty: Ty) -> impl fmt::Display + 'a {
    TyDisplay { tys: self, names, ty, prec: Prec::Arrow }
  }
}

impl Scheme {
  /// Returns a value that displays this.
  #[must_use]
  pub fn display<'a>(&'a self, tys: &'a Tys) -> impl fmt::Display + 'a {
    SchemeDisplay { names: VarNames::new(tys, &[self.ty], &self.ty_vars), tys, scheme: self }
  }
}

struct TyDisplayOwned<'a> {
  names: VarNames,
  tys: &'a Tys,
  ty: Ty,
}

impl fmt::Display for TyDisplayOwned<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    TyDisplay { tys: self.tys, names: &self.names, ty: self.ty, prec: Prec::Arrow }.fmt(f)
  }
}

struct SchemeDisplay<'a> {
  names: VarNames,
  tys: &'a Tys,
  scheme: &'a Scheme,
}

impl fmt::Display for SchemeDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if !self.scheme.ty_vars.is_empty() {
      f.write_str("forall ")?;
      fmt_util::sep_seq(f, " ", self.scheme.ty_vars.iter().map(|&var| self.names.get(var)))?;
      f.write_str(". ")?;
    }
    TyDisplay { tys: self.tys, names: &self.names, ty: self.scheme.ty, prec: Prec::Arrow }.fmt(f)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
  Arrow,
  App,
  Atom,
}

#[derive(Clone, Copy)]
struct TyDisplay<'a> {
  tys: &'a Tys,
  names: &'a VarNames,
  ty: Ty,
  prec: Prec,
}

impl TyDisplay<'_> {
  fn with(self, ty: Ty, prec: Prec) -> Self {
    Self { ty, prec, ..self }
  }

  fn fmt_app(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut args = Vec::<Ty>::new();
    let mut head = self.ty;
    while let TyData::App(func, arg) = self.tys.data(head) {
      args.push(arg);
      head = func;
    }
    args.reverse();
    if let TyData::Con(con) = self.tys.data(head)
      && self.tys.con_data(con).kind == ConKind::Tuple(args.len())
    {
      f.write_str("(")?;
      fmt_util::comma_seq(f, args.iter().map(|&arg| self.with(arg, Prec::Arrow)))?;
      return f.write_str(")");
    }
    let needs_parens = self.prec > Prec::App;
    if needs_parens {
      f.write_str("(")?;
    }
    self.with(head, Prec::App).fmt(f)?;
    for arg in args {
      write!(f, " {}", self.with(arg, Prec::Atom))?;
    }
    if needs_parens {
      f.write_str(")")?;
    }
    Ok(())
  }

  fn fmt_row(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("{")?;
    let mut ty = self.ty;
    let mut first = true;
    loop {
      match self.tys.data(ty) {
        TyData::Field(lab, presence, rest) => {
          ty = rest;
          if matches!(self.tys.data(presence), TyData::Absent) {
            continue;
          }
          f.write_str(if first { " " } else { ", " })?;
          first = false;
          write!(f, "{lab}: {}", self.with(presence, Prec::Arrow))?;
        }
        TyData::Nil => break,
        _ => {
          write!(f, " | {}", self.with(ty, Prec::Arrow))?;
          break;
        }
      }
    }
    f.write_str(if first { "}" } else { " }" })
  }
}

impl fmt::Display for TyDisplay<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.tys.data(self.ty) {
      TyData::Var(var) | TyData::Rigid(var) => f.write_str(self.names.get(var)),
      TyData::Con(con) => {
        let data = self.tys.con_data(con);
        match data.kind {
          ConKind::Tuple(0) => f.write_str("()"),
          ConKind::Named | ConKind::Tuple(_) => data.name.fmt(f),
        }
      }
      TyData::Arrow(param, res) => {
        let needs_parens = self.prec > Prec::Arrow;
        if needs_parens {
          f.write_str("(")?;
        }
        write!(f, "{} -> {}", self.with(param, Prec::App), self.with(res, Prec::Arrow))?;
        if needs_parens {
          f.write_str(")")?;
        }
        Ok(())
      }
      TyData::App(..) => self.fmt_app(f),
      TyData::Field(..) | TyData::Nil => self.fmt_row(f),
      TyData::Present(ty) => self.with(ty, self.prec).fmt(f),
      TyData::Absent => f.write_str("absent"),
    }
  }
}
