//! See [`St`].

use crate::error::{Error, ErrorKind};
use crate::info::Info;
use bolt_analyser::Groups;
use bolt_hir::la_arena::ArenaMap;
use bolt_hir::{Arenas, DecIdx, Lab};
use bolt_scope::{Module, Scopes};
use bolt_statics_types::constraint::Constraint;
use bolt_statics_types::env::{EnvId, KindEnvId, KindEnvs, TypeEnvs};
use bolt_statics_types::generalize;
use bolt_statics_types::scheme::Scheme;
use bolt_statics_types::ty::{Con, Ty, TyVar};
use fast_hash::{FxHashMap, FxHashSet};
use str_util::Name;

/// The mutable state.
#[derive(Debug)]
pub(crate) struct St<'a> {
  pub(crate) cfg: config::Statics,
  pub(crate) arenas: &'a Arenas,
  pub(crate) scopes: &'a Scopes,
  pub(crate) groups: &'a Groups,
  pub(crate) syms_tys: &'a mut bolt_statics_types::St,
  pub(crate) info: Info,
  pub(crate) envs: TypeEnvs,
  pub(crate) kind_envs: KindEnvs,
  /// the env for each module.
  pub(crate) module_envs: FxHashMap<Module, EnvId>,
  /// the kind env for each module.
  pub(crate) module_kind_envs: FxHashMap<Module, KindEnvId>,
  /// the env owned by a let, class, or instance.
  pub(crate) dec_envs: ArenaMap<DecIdx, EnvId>,
  /// the env a let binds its names in.
  pub(crate) owner_envs: ArenaMap<DecIdx, EnvId>,
  /// the kind env owned by a let.
  pub(crate) let_kind_envs: ArenaMap<DecIdx, KindEnvId>,
  pub(crate) lets: ArenaMap<DecIdx, LetState>,
  pub(crate) fns: ArenaMap<DecIdx, FnData>,
  /// lets directly inside a class or instance.
  pub(crate) methods: FxHashMap<DecIdx, MethodOf>,
  /// lets directly inside a module, by the names they bind.
  pub(crate) module_values: FxHashMap<(Module, Name), DecIdx>,
  pub(crate) classes: FxHashSet<Name>,
  /// for a struct or enum, its parameters and its type applied to them.
  pub(crate) nominals: ArenaMap<DecIdx, Nominal>,
  /// the parameters of each type alias, by the env it is bound in and its name.
  pub(crate) aliases: FxHashMap<(EnvId, Name), Vec<TyVar>>,
  /// the return types of the functions we are inside.
  pub(crate) ret_stack: Vec<Ty>,
  basis_env: EnvId,
  env_stack: Vec<EnvId>,
  polys: Vec<PolyContext>,
  poly_stack: Vec<PolyId>,
  var_poly: FxHashMap<TyVar, PolyId>,
  errors: Vec<Error>,
  type_errors: usize,
}

/// Where a let is in being inferred.
#[derive(Debug, Clone)]
pub(crate) enum LetState {
  /// Being inferred, with the type it has so far.
  InProgress(Ty),
  /// Done, with the scheme for the whole pattern.
  Done(Scheme),
}

/// Data for a function-like let, made when its group is prepared.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FnData {
  pub(crate) ret: Ty,
  pub(crate) ty: Ty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodOf {
  Class,
  Instance,
}

#[derive(Debug, Clone)]
pub(crate) struct Nominal {
  pub(crate) con: Con,
  pub(crate) params: Vec<(Name, TyVar)>,
  /// the con applied to the params.
  pub(crate) ty: Ty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PolyId(usize);

impl PolyId {
  /// the source file.
  pub(crate) const ROOT: Self = Self(0);
}

/// A generalization boundary: the vars introduced inside it that may be generalized, and the
/// constraints deferred to when it is done.
#[derive(Debug, Default)]
struct PolyContext {
  ty_vars: FxHashSet<TyVar>,
  constraints: Vec<Constraint>,
}

impl<'a> St<'a> {
  pub(crate) fn new(
    cfg: config::Statics,
    arenas: &'a Arenas,
    scopes: &'a Scopes,
    groups: &'a Groups,
    syms_tys: &'a mut bolt_statics_types::St,
  ) -> Self {
    let mut envs = TypeEnvs::default();
    let basis_env = envs.new_env(None);
    Self {
      cfg,
      arenas,
      scopes,
      groups,
      syms_tys,
      info: Info::default(),
      envs,
      kind_envs: KindEnvs::default(),
      module_envs: FxHashMap::default(),
      module_kind_envs: FxHashMap::default(),
      dec_envs: ArenaMap::default(),
      owner_envs: ArenaMap::default(),
      let_kind_envs: ArenaMap::default(),
      lets: ArenaMap::default(),
      fns: ArenaMap::default(),
      methods: FxHashMap::default(),
      module_values: FxHashMap::default(),
      classes: FxHashSet::default(),
      nominals: ArenaMap::default(),
      aliases: FxHashMap::default(),
      ret_stack: Vec::new(),
      basis_env,
      env_stack: Vec::new(),
      polys: vec![PolyContext::default()],
      poly_stack: vec![PolyId::ROOT],
      var_poly: FxHashMap::default(),
      errors: Vec::new(),
      type_errors: 0,
    }
  }

  pub(crate) fn err<I>(&mut self, idx: I, kind: ErrorKind)
  where
    I: Into<bolt_hir::Idx>,
  {
    self.errors.push(Error { idx: idx.into(), kind });
  }

  /// reports an error from solving, which counts towards the limit.
  pub(crate) fn type_err(&mut self, idx: bolt_hir::Idx, kind: ErrorKind) {
    self.type_errors += 1;
    self.err(idx, kind);
    if !self.can_solve() {
      log::debug!("reached the limit of {} type errors", self.cfg.max_type_errors);
    }
  }

  pub(crate) fn can_solve(&self) -> bool {
    self.type_errors < self.cfg.max_type_errors
  }

  pub(crate) fn finish(&mut self) -> Vec<Error> {
    std::mem::take(&mut self.errors)
  }

  // envs //

  /// the env that holds the basis, which every other env descends from.
  pub(crate) fn basis_env(&self) -> EnvId {
    self.basis_env
  }

  pub(crate) fn cur_env(&self) -> EnvId {
    self.env_stack.last().copied().unwrap_or(self.basis_env)
  }

  pub(crate) fn push_env(&mut self, env: EnvId) {
    self.env_stack.push(env);
  }

  pub(crate) fn pop_env(&mut self) {
    self.env_stack.pop();
  }

  /// makes a new env whose parent is the current env, and pushes it.
  pub(crate) fn push_new_env(&mut self) -> EnvId {
    let env = self.envs.new_env(Some(self.cur_env()));
    self.push_env(env);
    env
  }

  /// runs `f` with `env` as the only env on the stack and no enclosing functions, as when
  /// inferring a let out of tree order.
  pub(crate) fn with_env<F, T>(&mut self, env: EnvId, f: F) -> T
  where
    F: FnOnce(&mut Self) -> T,
  {
    let old_envs = std::mem::replace(&mut self.env_stack, vec![env]);
    let old_rets = std::mem::take(&mut self.ret_stack);
    let ret = f(self);
    self.env_stack = old_envs;
    self.ret_stack = old_rets;
    ret
  }

  // polys //

  pub(crate) fn new_poly(&mut self) -> PolyId {
    let ret = PolyId(self.polys.len());
    self.polys.push(PolyContext::default());
    ret
  }

  pub(crate) fn push_poly(&mut self, poly: PolyId) {
    self.poly_stack.push(poly);
  }

  pub(crate) fn pop_poly(&mut self) {
    self.poly_stack.pop();
  }

  pub(crate) fn top_poly(&self) -> PolyId {
    self.poly_stack.last().copied().unwrap_or(PolyId::ROOT)
  }

  /// the position on the stack of the poly that introduced the var, if any.
  pub(crate) fn level(&self, var: TyVar) -> Option<usize> {
    let poly = self.var_poly.get(&var)?;
    self.poly_stack.iter().rposition(|p| p == poly)
  }

  /// records the var as introduced in the top poly.
  pub(crate) fn introduce(&mut self, var: TyVar) {
    let poly = self.top_poly();
    self.polys[poly.0].ty_vars.insert(var);
    self.var_poly.insert(var, poly);
  }

  /// records the var as no longer generalizable, since it was solved.
  pub(crate) fn forget(&mut self, var: TyVar) {
    if let Some(poly) = self.var_poly.remove(&var) {
      self.polys[poly.0].ty_vars.remove(&var);
    }
  }

  pub(crate) fn defer(&mut self, level: usize, constraint: Constraint) {
    let poly = self.poly_stack.get(level).copied().unwrap_or(PolyId::ROOT);
    self.polys[poly.0].constraints.push(constraint);
  }

  /// generalizes the type over the vars introduced in the poly, except those free in the env or
  /// in a let being inferred other than those in `skip`. The deferred constraints of the poly that
  /// mention a generalized var go in the scheme.
  pub(crate) fn generalize(&mut self, poly: PolyId, env: EnvId, skip: &[DecIdx], ty: Ty) -> Scheme {
    let mut fixed = self.in_progress_vars(skip);
    self.envs.free_vars(&self.syms_tys.tys, env, &mut fixed);
    let candidates = &self.polys[poly.0].ty_vars;
    let pending = &self.polys[poly.0].constraints;
    generalize::get(&mut self.syms_tys.tys, ty, pending, |var| {
      candidates.contains(&var) && !fixed.contains(&var)
    })
  }

  /// generalizes the type of a let that is not function-like over the vars introduced in the top
  /// poly, except those free in the env, in a let being inferred other than those in `skip`, or in
  /// a deferred constraint. such a let has no poly of its own, so no constraint goes in the scheme.
  pub(crate) fn generalize_var_let(&mut self, env: EnvId, skip: &[DecIdx], ty: Ty) -> Scheme {
    let mut fixed = self.in_progress_vars(skip);
    self.envs.free_vars(&self.syms_tys.tys, env, &mut fixed);
    for poly in &self.poly_stack {
      for constraint in &self.polys[poly.0].constraints {
        constraint.free_vars(&self.syms_tys.tys, &mut fixed);
      }
    }
    let top = self.top_poly();
    let candidates = &self.polys[top.0].ty_vars;
    generalize::get(&mut self.syms_tys.tys, ty, &[], |var| {
      candidates.contains(&var) && !fixed.contains(&var)
    })
  }

  /// finishes the poly after it was popped. the vars it introduced that were not generalized move
  /// to the new top poly, and its deferred constraints that mention no generalized var are added
  /// again.
  pub(crate) fn finish_poly(&mut self, poly: PolyId, generalized: &[TyVar]) {
    let ty_vars = std::mem::take(&mut self.polys[poly.0].ty_vars);
    for var in ty_vars {
      self.var_poly.remove(&var);
      if !generalized.contains(&var) {
        self.introduce(var);
      }
    }
    let constraints = std::mem::take(&mut self.polys[poly.0].constraints);
    for constraint in constraints {
      if !generalize::mentions_any(&self.syms_tys.tys, &constraint, generalized) {
        self.add_constraint(constraint);
      }
    }
  }

  /// returns the row of the fields followed by `rest`, reporting each label after its first use.
  pub(crate) fn row<I>(&mut self, idx: I, fields: Vec<(Lab, Ty)>, rest: Ty) -> Ty
  where
    I: Into<bolt_hir::Idx> + Copy,
  {
    let mut seen = FxHashSet::<Lab>::default();
    for (lab, _) in &fields {
      if !seen.insert(lab.clone()) {
        self.err(idx, ErrorKind::DuplicateLab(lab.clone()));
      }
    }
    self.syms_tys.tys.row(fields, rest)
  }

  // vars //

  /// returns a fresh regular var in the top poly.
  pub(crate) fn fresh_var(&mut self) -> TyVar {
    let var = self.syms_tys.tys.regular_var();
    self.introduce(var);
    var
  }

  /// returns a fresh regular var in the top poly, as a type.
  pub(crate) fn fresh(&mut self) -> Ty {
    let var = self.fresh_var();
    self.syms_tys.tys.var_ty(var)
  }

  /// returns a fresh rigid var in the top poly, as a type.
  pub(crate) fn rigid(&mut self, name: Name) -> Ty {
    let var = self.syms_tys.tys.rigid_var(name);
    self.introduce(var);
    self.syms_tys.tys.var_ty(var)
  }

  /// instantiates the scheme with fresh vars, emitting its constraint at `idx`.
  pub(crate) fn instantiate<I>(&mut self, scheme: &Scheme, idx: I) -> Ty
  where
    I: Into<bolt_hir::Idx>,
  {
    let mut fresh = Vec::new();
    let (ty, constraint) = scheme.instantiate(&mut self.syms_tys.tys, idx.into(), |tys| {
      let var = tys.regular_var();
      fresh.push(var);
      var
    });
    for var in fresh {
      self.introduce(var);
    }
    self.add_constraint(constraint);
    ty
  }

  /// the free vars of working types of lets currently being inferred, other than those in `skip`.
  fn in_progress_vars(&self, skip: &[DecIdx]) -> Vec<TyVar> {
    let mut ret = Vec::new();
    for (dec, state) in self.lets.iter() {
      if let LetState::InProgress(ty) = state
        && !skip.contains(&dec)
      {
        self.syms_tys.tys.free_vars(*ty, &mut ret);
      }
    }
    ret
  }
}
