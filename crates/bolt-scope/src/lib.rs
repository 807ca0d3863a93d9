//! Lexical scopes: what declaration a name refers to from a given place in the tree.
//!
//! A scope is created for the source file and for every `let`, which owns its parameters and the
//! statements of its block body. Names declared in a module, class, instance, or `if` are visible
//! in the scope enclosing that construct.
//!
//! Alongside the scopes, we record the enclosing module of every node and the module tree, which is
//! what qualified lookups walk.

mod namespace;

pub use namespace::Namespace;

use bolt_hir::la_arena::ArenaMap;
use bolt_hir::{Arenas, Body, Dec, DecIdx, Exp, ExpIdx, Pat, PatIdx, RecordExpRow, Root, Ty, TyIdx};
use fast_hash::FxHashMap;
use str_util::Name;

/// A declaration a name may refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decl {
  /// A let, via a name in its pattern.
  Let(DecIdx),
  /// The `usize`th parameter of the let.
  Param(DecIdx, usize),
  /// A struct, as a type or as its constructor.
  Struct(DecIdx),
  /// An enum.
  Enum(DecIdx),
  /// The `usize`th variant of the enum.
  Variant(DecIdx, usize),
  /// A type alias.
  Type(DecIdx),
  /// A module.
  Module(DecIdx),
  /// A class.
  Class(DecIdx),
}

/// A module, or the source file, which acts as the outermost module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
  /// The source file.
  Root,
  /// A module declaration.
  Dec(DecIdx),
}

/// An identifier for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(idx::Idx);

#[derive(Debug)]
struct ScopeData {
  parent: Option<ScopeId>,
  depth: usize,
  names: FxHashMap<Name, Vec<(Namespace, Decl)>>,
}

#[derive(Debug, Default)]
struct ModuleData {
  parent: Option<Module>,
  children: FxHashMap<Name, DecIdx>,
}

/// The scopes of a compilation unit.
#[derive(Debug)]
pub struct Scopes {
  scopes: Vec<ScopeData>,
  modules: FxHashMap<Module, ModuleData>,
  let_scope: ArenaMap<DecIdx, ScopeId>,
  dec_scope: ArenaMap<DecIdx, ScopeId>,
  exp_scope: ArenaMap<ExpIdx, ScopeId>,
  dec_module: ArenaMap<DecIdx, Module>,
  exp_module: ArenaMap<ExpIdx, Module>,
  ty_module: ArenaMap<TyIdx, Module>,
}

impl Scopes {
  /// Computes the scopes for the root.
  #[must_use]
  pub fn get(arenas: &Arenas, root: &Root) -> Self {
    let mut ret = Self {
      scopes: Vec::new(),
      modules: FxHashMap::default(),
      let_scope: ArenaMap::default(),
      dec_scope: ArenaMap::default(),
      exp_scope: ArenaMap::default(),
      dec_module: ArenaMap::default(),
      exp_module: ArenaMap::default(),
      ty_module: ArenaMap::default(),
    };
    let scope = ret.new_scope(None);
    ret.add_module(Module::Root, None, arenas, root);
    let mut cx = Cx { arenas, scopes: &mut ret };
    cx.scan_decs(scope, root);
    for &dec in root {
      cx.get_dec(scope, Module::Root, dec);
    }
    ret
  }

  /// Returns the scope the expression is in.
  ///
  /// # Panics
  ///
  /// If the expression was not in the tree these scopes were computed from.
  #[must_use]
  pub fn of_exp(&self, exp: ExpIdx) -> ScopeId {
    self.exp_scope[exp]
  }

  /// Returns the scope the declaration is in.
  ///
  /// # Panics
  ///
  /// If the declaration was not in the tree these scopes were computed from.
  #[must_use]
  pub fn of_dec(&self, dec: DecIdx) -> ScopeId {
    self.dec_scope[dec]
  }

  /// Returns the scope owned by the declaration, if it is a let.
  #[must_use]
  pub fn of_let(&self, dec: DecIdx) -> Option<ScopeId> {
    self.let_scope.get(dec).copied()
  }

  /// Returns the number of scopes enclosing this one.
  #[must_use]
  pub fn depth(&self, scope: ScopeId) -> usize {
    self.scopes[scope.0.to_usize()].depth
  }

  /// Looks up the name from the scope, returning the first declaration in one of the namespaces.
  #[must_use]
  pub fn lookup(&self, mut scope: ScopeId, name: &str, ns: Namespace) -> Option<Decl> {
    loop {
      let data = &self.scopes[scope.0.to_usize()];
      let found = data
        .names
        .get(name)
        .and_then(|entries| entries.iter().find(|&&(entry_ns, _)| entry_ns.intersects(ns)));
      if let Some(&(_, decl)) = found {
        return Some(decl);
      }
      scope = data.parent?;
    }
  }

  /// Returns the module that encloses the declaration.
  ///
  /// # Panics
  ///
  /// If the declaration was not in the tree these scopes were computed from.
  #[must_use]
  pub fn dec_module(&self, dec: DecIdx) -> Module {
    self.dec_module[dec]
  }

  /// Returns the module that encloses the expression.
  ///
  /// # Panics
  ///
  /// If the expression was not in the tree these scopes were computed from.
  #[must_use]
  pub fn exp_module(&self, exp: ExpIdx) -> Module {
    self.exp_module[exp]
  }

  /// Returns the module that encloses the type expression.
  ///
  /// # Panics
  ///
  /// If the type expression was not in the tree these scopes were computed from.
  #[must_use]
  pub fn ty_module(&self, ty: TyIdx) -> Module {
    self.ty_module[ty]
  }

  /// Returns the module enclosing this one, or `None` for the source file.
  #[must_use]
  pub fn parent_module(&self, module: Module) -> Option<Module> {
    self.modules.get(&module).and_then(|data| data.parent)
  }

  /// Returns the module directly declared in `module` with the given name.
  #[must_use]
  pub fn child_module(&self, module: Module, name: &str) -> Option<Module> {
    let data = self.modules.get(&module)?;
    data.children.get(name).map(|&dec| Module::Dec(dec))
  }

  fn new_scope(&mut self, parent: Option<ScopeId>) -> ScopeId {
    let depth = parent.map_or(0, |p| self.depth(p) + 1);
    let ret = ScopeId(idx::Idx::new(self.scopes.len()));
    self.scopes.push(ScopeData { parent, depth, names: FxHashMap::default() });
    ret
  }

  fn add(&mut self, scope: ScopeId, name: &Name, ns: Namespace, decl: Decl) {
    let data = &mut self.scopes[scope.0.to_usize()];
    data.names.entry(name.clone()).or_default().push((ns, decl));
  }

  fn add_module(
    &mut self,
    module: Module,
    parent: Option<Module>,
    arenas: &Arenas,
    decs: &[DecIdx],
  ) {
    let mut data = ModuleData { parent, children: FxHashMap::default() };
    for &dec in decs {
      if let Dec::Module(m) = &arenas.dec[dec] {
        // the first one wins, like for lookups.
        data.children.entry(m.name.clone()).or_insert(dec);
      }
    }
    self.modules.insert(module, data);
  }
}

struct Cx<'a> {
  arenas: &'a Arenas,
  scopes: &'a mut Scopes,
}

impl Cx<'_> {
  /// adds the names declared by the decs to the scope.
  fn scan_decs(&mut self, scope: ScopeId, decs: &[DecIdx]) {
    for &dec in decs {
      self.scan_dec(scope, dec);
    }
  }

  fn scan_dec(&mut self, scope: ScopeId, dec: DecIdx) {
    let arenas = self.arenas;
    match &arenas.dec[dec] {
      Dec::Let(let_dec) => self.scan_pat(scope, let_dec.pat, Decl::Let(dec)),
      Dec::Struct(struct_dec) => {
        let ns = Namespace::TYPE.union(Namespace::VAR);
        self.scopes.add(scope, &struct_dec.name, ns, Decl::Struct(dec));
      }
      Dec::Enum(enum_dec) => {
        self.scopes.add(scope, &enum_dec.name, Namespace::TYPE, Decl::Enum(dec));
        for (idx, variant) in enum_dec.variants.iter().enumerate() {
          self.scopes.add(scope, variant.name(), Namespace::VAR, Decl::Variant(dec, idx));
        }
      }
      Dec::Type(type_dec) => {
        self.scopes.add(scope, &type_dec.name, Namespace::TYPE, Decl::Type(dec));
      }
      Dec::Module(module_dec) => {
        self.scopes.add(scope, &module_dec.name, Namespace::MODULE, Decl::Module(dec));
        self.scan_decs(scope, &module_dec.decs);
      }
      Dec::Class(class_dec) => {
        self.scopes.add(scope, &class_dec.name, Namespace::CLASS, Decl::Class(dec));
        self.scan_decs(scope, &class_dec.decs);
      }
      Dec::Instance(instance_dec) => self.scan_decs(scope, &instance_dec.decs),
      Dec::If(cases) => {
        for case in cases {
          self.scan_decs(scope, &case.decs);
        }
      }
      Dec::Exp(_) | Dec::Return(_) => {}
    }
  }

  fn scan_pat(&mut self, scope: ScopeId, pat: PatIdx, decl: Decl) {
    let arenas = self.arenas;
    match &arenas.pat[pat] {
      Pat::Name(name) => self.scopes.add(scope, name, Namespace::VAR, decl),
      Pat::Lit(_) => {}
      Pat::Con(_, args) => {
        for &arg in args {
          self.scan_pat(scope, arg, decl);
        }
      }
      Pat::Record(rows) => {
        for row in rows {
          match row {
            bolt_hir::RecordPatRow::Field(_, pat) | bolt_hir::RecordPatRow::Rest(Some(pat)) => {
              self.scan_pat(scope, *pat, decl);
            }
            bolt_hir::RecordPatRow::Punned(name) => {
              self.scopes.add(scope, name, Namespace::VAR, decl);
            }
            bolt_hir::RecordPatRow::Rest(None) => {}
          }
        }
      }
      Pat::Or(lhs, rhs) => {
        self.scan_pat(scope, *lhs, decl);
        self.scan_pat(scope, *rhs, decl);
      }
    }
  }

  fn get_decs(&mut self, scope: ScopeId, module: Module, decs: &[DecIdx]) {
    for &dec in decs {
      self.get_dec(scope, module, dec);
    }
  }

  fn get_dec(&mut self, scope: ScopeId, module: Module, dec: DecIdx) {
    self.scopes.dec_scope.insert(dec, scope);
    self.scopes.dec_module.insert(dec, module);
    let arenas = self.arenas;
    match &arenas.dec[dec] {
      Dec::Let(let_dec) => {
        let inner = self.scopes.new_scope(Some(scope));
        self.scopes.let_scope.insert(dec, inner);
        for (idx, &param) in let_dec.params.iter().enumerate() {
          self.scan_pat(inner, param, Decl::Param(dec, idx));
        }
        if let Some(ty) = let_dec.ty {
          self.get_ty(module, ty);
        }
        match &let_dec.body {
          None => {}
          Some(Body::Exp(exp)) => self.get_exp(inner, module, *exp),
          Some(Body::Block(decs)) => {
            self.scan_decs(inner, decs);
            self.get_decs(inner, module, decs);
          }
        }
      }
      Dec::Struct(struct_dec) => {
        for &(_, ty) in &struct_dec.fields {
          self.get_ty(module, ty);
        }
      }
      Dec::Enum(enum_dec) => {
        for variant in &enum_dec.variants {
          match variant {
            bolt_hir::Variant::Tuple(_, tys) => {
              for &ty in tys {
                self.get_ty(module, ty);
              }
            }
            bolt_hir::Variant::Record(_, fields) => {
              for &(_, ty) in fields {
                self.get_ty(module, ty);
              }
            }
          }
        }
      }
      Dec::Type(type_dec) => self.get_ty(module, type_dec.ty),
      Dec::Module(module_dec) => {
        let inner = Module::Dec(dec);
        self.scopes.add_module(inner, Some(module), arenas, &module_dec.decs);
        self.get_decs(scope, inner, &module_dec.decs);
      }
      Dec::Class(bolt_hir::ClassDec { tys, constraints, decs, .. })
      | Dec::Instance(bolt_hir::InstanceDec { tys, constraints, decs, .. }) => {
        for &ty in tys {
          self.get_ty(module, ty);
        }
        for constraint in constraints {
          for &ty in &constraint.tys {
            self.get_ty(module, ty);
          }
        }
        self.get_decs(scope, module, decs);
      }
      Dec::Exp(exp) | Dec::Return(Some(exp)) => self.get_exp(scope, module, *exp),
      Dec::Return(None) => {}
      Dec::If(cases) => {
        for case in cases {
          if let Some(test) = case.test {
            self.get_exp(scope, module, test);
          }
          self.get_decs(scope, module, &case.decs);
        }
      }
    }
  }

  fn get_exp(&mut self, scope: ScopeId, module: Module, exp: ExpIdx) {
    self.scopes.exp_scope.insert(exp, scope);
    self.scopes.exp_module.insert(exp, module);
    let arenas = self.arenas;
    match &arenas.exp[exp] {
      Exp::Lit(_) | Exp::Path(_) => {}
      Exp::Member(exp, _) => self.get_exp(scope, module, *exp),
      Exp::Call(func, args) => {
        self.get_exp(scope, module, *func);
        for &arg in args {
          self.get_exp(scope, module, arg);
        }
      }
      Exp::Record(_, rows) => {
        for row in rows {
          match row {
            RecordExpRow::Field(_, exp) => self.get_exp(scope, module, *exp),
            RecordExpRow::Punned(_) => {}
          }
        }
      }
      Exp::Tuple(exps) => {
        for &exp in exps {
          self.get_exp(scope, module, exp);
        }
      }
      Exp::Match(head, arms) => {
        if let Some(head) = head {
          self.get_exp(scope, module, *head);
        }
        for arm in arms {
          self.get_exp(scope, module, arm.exp);
        }
      }
      Exp::Infix(lhs, _, rhs) => {
        self.get_exp(scope, module, *lhs);
        self.get_exp(scope, module, *rhs);
      }
    }
  }

  fn get_ty(&mut self, module: Module, ty: TyIdx) {
    self.scopes.ty_module.insert(ty, module);
    let arenas = self.arenas;
    match &arenas.ty[ty] {
      Ty::Path(_) | Ty::Var(_) => {}
      Ty::App(func, args) => {
        self.get_ty(module, *func);
        for &arg in args {
          self.get_ty(module, arg);
        }
      }
      Ty::Arrow(params, res) => {
        for &param in params {
          self.get_ty(module, param);
        }
        self.get_ty(module, *res);
      }
      Ty::Tuple(tys) => {
        for &ty in tys {
          self.get_ty(module, ty);
        }
      }
      Ty::Forall(_, ty) => self.get_ty(module, *ty),
      Ty::WithConstraints(constraints, ty) => {
        for constraint in constraints {
          for &ty in &constraint.tys {
            self.get_ty(module, ty);
          }
        }
        self.get_ty(module, *ty);
      }
    }
  }
}
