//! Semantic types.

#![allow(clippy::module_name_repetitions)]

use bolt_hir::Lab;
use fast_hash::{FxHashMap, FxHashSet};
use std::collections::BTreeMap;
use str_util::Name;

/// Storage of all the semantic types.
///
/// Also holds the counters that hand out fresh variables and type constructors, which are just the
/// lengths of the vecs.
#[derive(Debug, Clone)]
pub struct Tys {
  data: Vec<TyData>,
  vars: Vec<VarData>,
  cons: Vec<ConData>,
  tuples: FxHashMap<usize, Con>,
  structs: FxHashMap<Con, StructRow>,
}

impl Default for Tys {
  fn default() -> Self {
    let mut ret = Self {
      data: Vec::new(),
      vars: Vec::new(),
      cons: Vec::new(),
      tuples: FxHashMap::default(),
      structs: FxHashMap::default(),
    };
    // @sync(special_ty_order)
    for (name, con, ty) in [
      ("Int", Con::INT, Ty::INT),
      ("String", Con::STRING, Ty::STRING),
      ("Bool", Con::BOOL, Ty::BOOL),
    ] {
      let got = ret.named_con(Name::new(name));
      assert_eq!(got, con);
      assert_eq!(ret.con_ty(got), ty);
    }
    let unit = ret.tuple_con(0);
    assert_eq!(unit, Con::UNIT);
    assert_eq!(ret.con_ty(unit), Ty::UNIT);
    assert_eq!(ret.mk(TyData::Nil), Ty::NIL);
    assert_eq!(ret.mk(TyData::Absent), Ty::ABSENT);
    ret
  }
}

impl Tys {
  fn mk(&mut self, data: TyData) -> Ty {
    let ret = Ty(idx::Idx::new(self.data.len()));
    self.data.push(data);
    ret
  }

  /// Returns a fresh regular type variable.
  pub fn regular_var(&mut self) -> TyVar {
    let var = TyVar(idx::Idx::new(self.vars.len()));
    let ty = self.mk(TyData::Var(var));
    self.vars.push(VarData { kind: VarKind::Regular(None), ty });
    var
  }

  /// Returns a fresh rigid type variable, which only unifies with itself.
  pub fn rigid_var(&mut self, name: Name) -> TyVar {
    let var = TyVar(idx::Idx::new(self.vars.len()));
    let ty = self.mk(TyData::Rigid(var));
    self.vars.push(VarData { kind: VarKind::Rigid(name), ty });
    var
  }

  /// Returns the type that is just the var.
  #[must_use]
  pub fn var_ty(&self, var: TyVar) -> Ty {
    self.vars[var.0.to_usize()].ty
  }

  /// Returns the name of the var, if it is rigid.
  #[must_use]
  pub fn rigid_name(&self, var: TyVar) -> Option<&Name> {
    match &self.vars[var.0.to_usize()].kind {
      VarKind::Rigid(name) => Some(name),
      VarKind::Regular(_) => None,
    }
  }

  /// Returns a fresh nominal type constructor.
  pub fn named_con(&mut self, name: Name) -> Con {
    self.new_con(name, ConKind::Named)
  }

  /// Returns the type constructor for tuples of the given length.
  pub fn tuple_con(&mut self, len: usize) -> Con {
    if let Some(&con) = self.tuples.get(&len) {
      return con;
    }
    let name = if len == 0 { Name::new("()") } else { Name::new(format!("#tuple{len}")) };
    let ret = self.new_con(name, ConKind::Tuple(len));
    self.tuples.insert(len, ret);
    ret
  }

  fn new_con(&mut self, name: Name, kind: ConKind) -> Con {
    let con = Con(idx::Idx::new(self.cons.len()));
    // push a placeholder first so `mk` can refer to the con.
    let ty = Ty(idx::Idx::new(self.data.len()));
    self.cons.push(ConData { name, kind, ty });
    assert_eq!(self.mk(TyData::Con(con)), ty);
    con
  }

  /// Returns data about the constructor.
  #[must_use]
  pub fn con_data(&self, con: Con) -> &ConData {
    &self.cons[con.0.to_usize()]
  }

  /// Returns the type that is just the constructor.
  #[must_use]
  pub fn con_ty(&self, con: Con) -> Ty {
    self.con_data(con).ty
  }

  /// Returns `param -> res`.
  pub fn arrow(&mut self, param: Ty, res: Ty) -> Ty {
    self.mk(TyData::Arrow(param, res))
  }

  /// Returns `p1 -> p2 -> .. -> res`.
  pub fn arrows<I>(&mut self, params: I, res: Ty) -> Ty
  where
    I: IntoIterator<Item = Ty>,
    I::IntoIter: DoubleEndedIterator,
  {
    params.into_iter().rev().fold(res, |ac, param| self.arrow(param, ac))
  }

  /// Returns `func arg`.
  pub fn app(&mut self, func: Ty, arg: Ty) -> Ty {
    self.mk(TyData::App(func, arg))
  }

  /// Returns `func a1 a2 ..`.
  pub fn apps<I>(&mut self, func: Ty, args: I) -> Ty
  where
    I: IntoIterator<Item = Ty>,
  {
    args.into_iter().fold(func, |ac, arg| self.app(ac, arg))
  }

  /// Returns the tuple type with the elements. The empty tuple is the unit type.
  pub fn tuple(&mut self, elems: Vec<Ty>) -> Ty {
    let con = self.tuple_con(elems.len());
    let con = self.con_ty(con);
    self.apps(con, elems)
  }

  /// Returns a row that has the field, then continues with `rest`. `ty` should be a presence type.
  pub fn field(&mut self, lab: Lab, ty: Ty, rest: Ty) -> Ty {
    self.mk(TyData::Field(lab, ty, rest))
  }

  /// Returns the presence type for a field that is there with the type.
  pub fn present(&mut self, ty: Ty) -> Ty {
    self.mk(TyData::Present(ty))
  }

  /// Returns a row with the given fields all present, followed by `rest`. The fields are ordered
  /// by label. When a label repeats, only its first field is kept.
  pub fn row<I>(&mut self, fields: I, rest: Ty) -> Ty
  where
    I: IntoIterator<Item = (Lab, Ty)>,
  {
    let mut map = BTreeMap::<Lab, Ty>::new();
    for (lab, ty) in fields {
      map.entry(lab).or_insert(ty);
    }
    map.into_iter().rev().fold(rest, |ac, (lab, ty)| {
      let ty = self.present(ty);
      self.field(lab, ty, ac)
    })
  }

  /// Records that the nominal constructor, applied to types for `params`, is a struct with the
  /// given row of fields.
  ///
  /// # Panics
  ///
  /// If the con was already given a row.
  pub fn set_struct_row(&mut self, con: Con, params: Vec<TyVar>, row: Ty) {
    assert!(self.structs.insert(con, StructRow { params, row }).is_none());
  }

  /// If the type is a struct constructor, fully applied, returns its row of fields with the
  /// arguments substituted in.
  pub fn unfold_struct(&mut self, ty: Ty) -> Option<Ty> {
    let mut args = Vec::<Ty>::new();
    let mut head = self.canonicalize(ty);
    while let TyData::App(func, arg) = self.data[head.0.to_usize()] {
      args.push(arg);
      head = self.canonicalize(func);
    }
    let TyData::Con(con) = self.data[head.0.to_usize()] else { return None };
    let StructRow { params, row } = self.structs.get(&con)?;
    if params.len() != args.len() {
      return None;
    }
    args.reverse();
    let sub: crate::sub::TVSub = params.iter().copied().zip(args).collect();
    let row = *row;
    Some(self.subst(&sub, row))
  }

  /// Returns the data for the type, after following solved variables.
  #[must_use]
  pub fn data(&self, ty: Ty) -> TyData {
    self.data[self.canonicalize(ty).0.to_usize()].clone()
  }

  /// Follows solved variables until reaching a type that is not one.
  #[must_use]
  pub fn canonicalize(&self, mut ty: Ty) -> Ty {
    while let TyData::Var(var) = self.data[ty.0.to_usize()] {
      match self.vars[var.0.to_usize()].kind {
        VarKind::Regular(Some(sol)) => ty = sol,
        VarKind::Regular(None) | VarKind::Rigid(_) => break,
      }
    }
    ty
  }

  /// Like `canonicalize`, but also points every variable along the way directly at the end.
  pub fn find(&mut self, ty: Ty) -> Ty {
    let ret = self.canonicalize(ty);
    let mut cur = ty;
    while let TyData::Var(var) = self.data[cur.0.to_usize()] {
      let kind = &mut self.vars[var.0.to_usize()].kind;
      match kind {
        VarKind::Regular(Some(sol)) => {
          cur = *sol;
          *kind = VarKind::Regular(Some(ret));
        }
        VarKind::Regular(None) | VarKind::Rigid(_) => break,
      }
    }
    ret
  }

  /// Solves the var to the type.
  ///
  /// # Panics
  ///
  /// If the var was rigid or already solved.
  pub(crate) fn solve(&mut self, var: TyVar, ty: Ty) {
    let kind = &mut self.vars[var.0.to_usize()].kind;
    assert!(matches!(kind, VarKind::Regular(None)), "can only solve an unsolved regular var");
    *kind = VarKind::Regular(Some(ty));
  }

  /// Returns whether the var occurs in the type.
  #[must_use]
  pub fn occurs(&self, var: TyVar, ty: Ty) -> bool {
    match self.data(ty) {
      // interesting cases
      TyData::Var(v) | TyData::Rigid(v) => v == var,
      // trivial base cases
      TyData::Con(_) | TyData::Nil | TyData::Absent => false,
      // recursive cases
      TyData::Arrow(a, b) | TyData::App(a, b) | TyData::Field(_, a, b) => {
        self.occurs(var, a) || self.occurs(var, b)
      }
      TyData::Present(a) => self.occurs(var, a),
    }
  }

  /// Pushes the unsolved regular vars and rigid vars in the type onto `out`, each at most once, in
  /// order of appearance.
  pub fn free_vars(&self, ty: Ty, out: &mut Vec<TyVar>) {
    let mut seen: FxHashSet<TyVar> = out.iter().copied().collect();
    self.free_vars_go(ty, &mut seen, out);
  }

  fn free_vars_go(&self, ty: Ty, seen: &mut FxHashSet<TyVar>, out: &mut Vec<TyVar>) {
    match self.data(ty) {
      TyData::Var(v) | TyData::Rigid(v) => {
        if seen.insert(v) {
          out.push(v);
        }
      }
      TyData::Con(_) | TyData::Nil | TyData::Absent => {}
      TyData::Arrow(a, b) | TyData::App(a, b) | TyData::Field(_, a, b) => {
        self.free_vars_go(a, seen, out);
        self.free_vars_go(b, seen, out);
      }
      TyData::Present(a) => self.free_vars_go(a, seen, out),
    }
  }

  /// Replaces every solved variable in the type by its solution, all the way down. Returns the same
  /// type back if nothing changed, so applying twice gives back the same type.
  pub fn apply(&mut self, ty: Ty) -> Ty {
    let ty = self.find(ty);
    match self.data[ty.0.to_usize()].clone() {
      TyData::Var(_) | TyData::Rigid(_) | TyData::Con(_) | TyData::Nil | TyData::Absent => ty,
      TyData::Arrow(a, b) => {
        let (a2, b2) = (self.apply(a), self.apply(b));
        if a == a2 && b == b2 { ty } else { self.arrow(a2, b2) }
      }
      TyData::App(a, b) => {
        let (a2, b2) = (self.apply(a), self.apply(b));
        if a == a2 && b == b2 { ty } else { self.app(a2, b2) }
      }
      TyData::Field(lab, a, b) => {
        let (a2, b2) = (self.apply(a), self.apply(b));
        if a == a2 && b == b2 { ty } else { self.field(lab, a2, b2) }
      }
      TyData::Present(a) => {
        let a2 = self.apply(a);
        if a == a2 { ty } else { self.present(a2) }
      }
    }
  }

  /// Replaces the variables in the type according to the substitution.
  pub fn subst(&mut self, sub: &crate::sub::TVSub, ty: Ty) -> Ty {
    let ty = self.canonicalize(ty);
    match self.data[ty.0.to_usize()].clone() {
      TyData::Var(v) | TyData::Rigid(v) => sub.get(v).unwrap_or(ty),
      TyData::Con(_) | TyData::Nil | TyData::Absent => ty,
      TyData::Arrow(a, b) => {
        let (a, b) = (self.subst(sub, a), self.subst(sub, b));
        self.arrow(a, b)
      }
      TyData::App(a, b) => {
        let (a, b) = (self.subst(sub, a), self.subst(sub, b));
        self.app(a, b)
      }
      TyData::Field(lab, a, b) => {
        let (a, b) = (self.subst(sub, a), self.subst(sub, b));
        self.field(lab, a, b)
      }
      TyData::Present(a) => {
        let a = self.subst(sub, a);
        self.present(a)
      }
    }
  }

  /// Returns the last row in the chain of fields, after following solved variables.
  #[must_use]
  pub fn row_tail(&self, mut ty: Ty) -> Ty {
    loop {
      let canon = self.canonicalize(ty);
      match &self.data[canon.0.to_usize()] {
        TyData::Field(_, _, rest) => ty = *rest,
        _ => return canon,
      }
    }
  }
}

/// A semantic type.
///
/// Cheap to copy, but must be looked up in [`Tys`] to get at the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ty(idx::Idx);

impl Ty {
  /// `Int`.
  pub const INT: Self = Self(idx::Idx::new_u32(0));
  /// `String`.
  pub const STRING: Self = Self(idx::Idx::new_u32(1));
  /// `Bool`.
  pub const BOOL: Self = Self(idx::Idx::new_u32(2));
  /// `()`.
  pub const UNIT: Self = Self(idx::Idx::new_u32(3));
  /// The empty closed row.
  pub const NIL: Self = Self(idx::Idx::new_u32(4));
  /// A field that is not there.
  pub const ABSENT: Self = Self(idx::Idx::new_u32(5));
}

/// The structure of a type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TyData {
  /// An unsolved regular variable.
  Var(TyVar),
  /// A rigid variable, from a type annotation.
  Rigid(TyVar),
  /// A type constructor, like `Int` or `List`.
  Con(Con),
  /// A function type.
  Arrow(Ty, Ty),
  /// A type constructor applied to an argument.
  App(Ty, Ty),
  /// A row with a field. The middle type is `Present` or `Absent`.
  Field(Lab, Ty, Ty),
  /// The empty closed row.
  Nil,
  /// A field that is there, with the type.
  Present(Ty),
  /// A field that is not there.
  Absent,
}

/// A type variable, regular or rigid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TyVar(idx::Idx);

#[derive(Debug, Clone)]
struct VarData {
  kind: VarKind,
  ty: Ty,
}

#[derive(Debug, Clone)]
enum VarKind {
  Regular(Option<Ty>),
  Rigid(Name),
}

/// A type constructor. Each struct and enum declaration makes a distinct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Con(idx::Idx);

impl Con {
  /// `Int`.
  pub const INT: Self = Self(idx::Idx::new_u32(0));
  /// `String`.
  pub const STRING: Self = Self(idx::Idx::new_u32(1));
  /// `Bool`.
  pub const BOOL: Self = Self(idx::Idx::new_u32(2));
  /// The unit type.
  pub const UNIT: Self = Self(idx::Idx::new_u32(3));
}

/// Data about a type constructor.
#[derive(Debug, Clone)]
pub struct ConData {
  /// The name it was declared with.
  pub name: Name,
  /// What sort it is.
  pub kind: ConKind,
  ty: Ty,
}

/// A sort of type constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConKind {
  /// Declared by name.
  Named,
  /// The tuple of this many elements.
  Tuple(usize),
}

#[derive(Debug, Clone)]
struct StructRow {
  params: Vec<TyVar>,
  row: Ty,
}
