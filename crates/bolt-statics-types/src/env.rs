//! Environments, mapping names to what they mean during checking.
//!
//! Environments form a tree: each has an optional parent, and lookups fall back to it.

#![allow(clippy::module_name_repetitions)]

use crate::kind::Kind;
use crate::scheme::Scheme;
use crate::ty::{TyVar, Tys};
use bolt_scope::Namespace;
use fast_hash::FxHashMap;
use str_util::Name;

/// A reference to a type environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnvId(idx::Idx);

#[derive(Debug)]
struct TypeEnv {
  parent: Option<EnvId>,
  map: FxHashMap<Name, Vec<(Namespace, Scheme)>>,
}

/// All the type environments.
///
/// One name may be bound in several namespaces in the same environment.
#[derive(Debug, Default)]
pub struct TypeEnvs {
  envs: Vec<TypeEnv>,
}

impl TypeEnvs {
  /// Returns a new empty environment.
  pub fn new_env(&mut self, parent: Option<EnvId>) -> EnvId {
    let ret = EnvId(idx::Idx::new(self.envs.len()));
    self.envs.push(TypeEnv { parent, map: FxHashMap::default() });
    ret
  }

  /// Returns the parent of the environment.
  #[must_use]
  pub fn parent(&self, env: EnvId) -> Option<EnvId> {
    self.envs[env.0.to_usize()].parent
  }

  /// Binds the name in the environment.
  pub fn add(&mut self, env: EnvId, name: Name, ns: Namespace, scheme: Scheme) {
    self.envs[env.0.to_usize()].map.entry(name).or_default().push((ns, scheme));
  }

  /// Looks up the name in just this environment, not its ancestors. The latest binding wins.
  #[must_use]
  pub fn get_local(&self, env: EnvId, name: &str, ns: Namespace) -> Option<&Scheme> {
    let entries = self.envs[env.0.to_usize()].map.get(name)?;
    entries.iter().rev().find(|(entry_ns, _)| entry_ns.intersects(ns)).map(|(_, scheme)| scheme)
  }

  /// Looks up the name in the environment and then its ancestors.
  #[must_use]
  pub fn get(&self, mut env: EnvId, name: &str, ns: Namespace) -> Option<&Scheme> {
    loop {
      if let Some(scheme) = self.get_local(env, name, ns) {
        return Some(scheme);
      }
      env = self.parent(env)?;
    }
  }

  /// Iterates over the value bindings in just this environment, latest binding for each name.
  pub fn values(&self, env: EnvId) -> impl Iterator<Item = (&Name, &Scheme)> + '_ {
    self.envs[env.0.to_usize()].map.iter().filter_map(|(name, entries)| {
      let (_, scheme) = entries.iter().rev().find(|(ns, _)| ns.intersects(Namespace::VAR))?;
      Some((name, scheme))
    })
  }

  /// Pushes the free vars of every scheme in the environment and its ancestors onto `out`.
  pub fn free_vars(&self, tys: &Tys, mut env: EnvId, out: &mut Vec<TyVar>) {
    loop {
      for entries in self.envs[env.0.to_usize()].map.values() {
        for (_, scheme) in entries {
          scheme.free_vars(tys, out);
        }
      }
      match self.parent(env) {
        Some(parent) => env = parent,
        None => break,
      }
    }
  }
}

/// A reference to a kind environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindEnvId(idx::Idx);

#[derive(Debug)]
struct KindEnv {
  parent: Option<KindEnvId>,
  map: FxHashMap<Name, Kind>,
}

/// All the kind environments.
#[derive(Debug, Default)]
pub struct KindEnvs {
  envs: Vec<KindEnv>,
}

impl KindEnvs {
  /// Returns a new empty environment.
  pub fn new_env(&mut self, parent: Option<KindEnvId>) -> KindEnvId {
    let ret = KindEnvId(idx::Idx::new(self.envs.len()));
    self.envs.push(KindEnv { parent, map: FxHashMap::default() });
    ret
  }

  /// Sets the kind of the name in the environment, replacing any old kind.
  pub fn set(&mut self, env: KindEnvId, name: Name, kind: Kind) {
    self.envs[env.0.to_usize()].map.insert(name, kind);
  }

  /// Looks up the name in just this environment.
  #[must_use]
  pub fn get_local(&self, env: KindEnvId, name: &str) -> Option<Kind> {
    self.envs[env.0.to_usize()].map.get(name).copied()
  }

  /// Looks up the name in the environment and then its ancestors.
  #[must_use]
  pub fn get(&self, mut env: KindEnvId, name: &str) -> Option<Kind> {
    loop {
      if let Some(kind) = self.get_local(env, name) {
        return Some(kind);
      }
      env = self.envs[env.0.to_usize()].parent?;
    }
  }
}
