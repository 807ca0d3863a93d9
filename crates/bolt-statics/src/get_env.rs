//! Looking up names, possibly qualified by a module path.
//!
//! A qualified path is resolved starting at the module the reference is written in. If some
//! module in the path is not a child of where we are, we go up to the enclosing module and try the
//! whole path again from there, stopping at the source file.

use crate::dec;
use crate::error::ErrorKind;
use crate::st::{LetState, St};
use bolt_hir::Path;
use bolt_scope::{Decl, Module, Namespace, ScopeId, Scopes};
use bolt_statics_types::env::{EnvId, KindEnvId};
use bolt_statics_types::scheme::Scheme;
use bolt_statics_types::ty::Ty;
use str_util::Name;

/// Returns the module the prefix names, starting the search at `start`.
///
/// # Errors
///
/// If no enclosing module has the path, returns the rest of the path starting at the module that
/// was not found, for the attempt that got the furthest.
pub(crate) fn get_module(
  scopes: &Scopes,
  start: Module,
  prefix: &[Name],
) -> Result<Module, Vec<Name>> {
  let mut max_index = 0usize;
  let mut base = Some(start);
  while let Some(module) = base {
    match descend(scopes, module, prefix) {
      Ok(ret) => return Ok(ret),
      Err(idx) => max_index = max_index.max(idx),
    }
    base = scopes.parent_module(module);
    if base.is_some() {
      cov_mark::hit("module_backtrack");
    }
  }
  Err(prefix[max_index..].to_vec())
}

/// descends from the module through each name in the prefix. on failure, returns the index of the
/// name that was not a child.
fn descend(scopes: &Scopes, mut module: Module, prefix: &[Name]) -> Result<Module, usize> {
  for (idx, name) in prefix.iter().enumerate() {
    module = scopes.child_module(module, name.as_str()).ok_or(idx)?;
  }
  Ok(module)
}

impl St<'_> {
  /// returns the env of the module named by the prefix, reporting an error at `idx` if there is
  /// no such module.
  fn module_env<I>(&mut self, from: Module, prefix: &[Name], idx: I) -> Option<(Module, EnvId)>
  where
    I: Into<bolt_hir::Idx>,
  {
    match get_module(self.scopes, from, prefix) {
      Ok(module) => Some((module, *self.module_envs.get(&module)?)),
      Err(rest) => {
        self.err(idx, ErrorKind::ModuleNotFound(rest));
        None
      }
    }
  }

  /// returns the env the declaration binds its names in.
  pub(crate) fn decl_env(&self, decl: Decl) -> Option<EnvId> {
    match decl {
      Decl::Let(dec)
      | Decl::Struct(dec)
      | Decl::Enum(dec)
      | Decl::Variant(dec, _)
      | Decl::Type(dec) => self.owner_envs.get(dec).copied(),
      Decl::Param(dec, _) => self.dec_envs.get(dec).copied(),
      Decl::Module(_) | Decl::Class(_) => None,
    }
  }

  /// returns the type of a reference to a value, written in `scope` and `module`.
  pub(crate) fn get_value<I>(&mut self, scope: ScopeId, module: Module, path: &Path, idx: I) -> Ty
  where
    I: Into<bolt_hir::Idx> + Copy,
  {
    let name = path.last();
    if path.prefix().is_empty() {
      return self.get_unqualified_value(scope, name, idx);
    }
    let Some((module, env)) = self.module_env(module, path.prefix(), idx) else {
      return self.fresh();
    };
    if let Some(&dec) = self.module_values.get(&(module, name.clone())) {
      dec::ensure_let(self, dec);
      if let Some(LetState::InProgress(ty)) = self.lets.get(dec) {
        return *ty;
      }
    }
    match self.envs.get_local(env, name.as_str(), Namespace::VAR).cloned() {
      Some(scheme) => self.instantiate(&scheme, idx),
      None => {
        self.err(idx, ErrorKind::BindingNotFound(path.prefix().to_vec(), name.clone()));
        self.fresh()
      }
    }
  }

  fn get_unqualified_value<I>(&mut self, scope: ScopeId, name: &Name, idx: I) -> Ty
  where
    I: Into<bolt_hir::Idx> + Copy,
  {
    let decl = self.scopes.lookup(scope, name.as_str(), Namespace::VAR);
    if let Some(Decl::Let(dec)) = decl {
      dec::ensure_let(self, dec);
    }
    let stop = decl.and_then(|decl| self.decl_env(decl));
    // names bound by match arms are not in the scopes, and shadow what the scopes found.
    let mut env = Some(self.cur_env());
    while let Some(e) = env {
      if Some(e) == stop {
        break;
      }
      if let Some(scheme) = self.envs.get_local(e, name.as_str(), Namespace::VAR).cloned() {
        return self.instantiate(&scheme, idx);
      }
      env = self.envs.parent(e);
    }
    if let Some(Decl::Let(dec)) = decl
      && let Some(LetState::InProgress(ty)) = self.lets.get(dec)
    {
      let ty = *ty;
      let is_name = self.arenas.dec[dec].as_let().and_then(|l| l.name(self.arenas)) == Some(name);
      return if is_name { ty } else { self.fresh() };
    }
    let found = match stop {
      Some(stop) => self.envs.get_local(stop, name.as_str(), Namespace::VAR),
      None => self.envs.get(self.cur_env(), name.as_str(), Namespace::VAR),
    };
    if let Some(scheme) = found.cloned() {
      return self.instantiate(&scheme, idx);
    }
    self.err(idx, ErrorKind::BindingNotFound(Vec::new(), name.clone()));
    self.fresh()
  }

  /// looks up a type name, returning the env it was found in and its scheme.
  pub(crate) fn get_ty_name(
    &mut self,
    ty: bolt_hir::TyIdx,
    path: &Path,
  ) -> Option<(EnvId, Scheme)> {
    let name = path.last().as_str();
    if path.prefix().is_empty() {
      let mut env = Some(self.cur_env());
      while let Some(e) = env {
        if let Some(scheme) = self.envs.get_local(e, name, Namespace::TYPE) {
          return Some((e, scheme.clone()));
        }
        env = self.envs.parent(e);
      }
      self.err(ty, ErrorKind::BindingNotFound(Vec::new(), path.last().clone()));
      return None;
    }
    let module = self.scopes.ty_module(ty);
    let (_, env) = self.module_env(module, path.prefix(), ty)?;
    match self.envs.get_local(env, name, Namespace::TYPE) {
      Some(scheme) => Some((env, scheme.clone())),
      None => {
        self.err(ty, ErrorKind::BindingNotFound(path.prefix().to_vec(), path.last().clone()));
        None
      }
    }
  }

  /// looks up the kind env of the module named by the prefix of a path in a type. Errors are left
  /// for when the type itself is checked.
  pub(crate) fn get_kind_module_env(
    &self,
    ty: bolt_hir::TyIdx,
    prefix: &[Name],
  ) -> Option<KindEnvId> {
    let module = get_module(self.scopes, self.scopes.ty_module(ty), prefix).ok()?;
    self.module_kind_envs.get(&module).copied()
  }
}
