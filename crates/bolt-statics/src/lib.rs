//! Kind and type checking for a source file.
//!
//! Types are inferred in the style of Hindley and Milner, extended with rows for records, nominal
//! struct and enum types, and rigid variables for annotations. Inference emits equality
//! constraints, which are solved by unification as soon as their sides are at the same level of
//! generalization, and otherwise wait until the deeper level is done.

mod basis;
mod dec;
mod error;
mod exp;
mod get_env;
mod info;
mod kind;
mod pat;
mod solve;
mod st;
mod ty;

pub use error::Error;
pub use info::Info;

use bolt_hir::{Arenas, Dec, Root};
use bolt_scope::Module;

/// The result of checking.
#[derive(Debug)]
pub struct Statics {
  /// Information about the source file.
  pub info: Info,
  /// Errors found, in the order they were found.
  pub errors: Vec<Error>,
}

/// Checks the source file. The types and kinds made in the process are kept in `syms_tys`.
pub fn get(
  syms_tys: &mut bolt_statics_types::St,
  cfg: config::Statics,
  arenas: &Arenas,
  root: &Root,
) -> Statics {
  elapsed::log("bolt_statics::get", || {
    let scopes = bolt_scope::Scopes::get(arenas, root);
    let groups = bolt_analyser::get(arenas, &scopes, root);
    let mut st = st::St::new(cfg, arenas, &scopes, &groups, syms_tys);
    let basis_kinds = basis::get(&mut st);
    let kind_env = kind::get(&mut st, basis_kinds, root);
    let env = st.envs.new_env(Some(st.basis_env()));
    st.module_envs.insert(Module::Root, env);
    dec::declare(&mut st, env, Some(Module::Root), root);
    dec::declare_types(&mut st, root);
    dec::define_types(&mut st, root);
    st.push_env(env);
    elapsed::log("bolt_statics::dec::get_decs", || dec::get_decs(&mut st, root));
    st.pop_env();
    for &dec in root {
      let name = match &arenas.dec[dec] {
        Dec::Struct(bolt_hir::StructDec { name, .. })
        | Dec::Enum(bolt_hir::EnumDec { name, .. })
        | Dec::Type(bolt_hir::TypeDec { name, .. }) => name,
        _ => continue,
      };
      if let Some(kind) = st.kind_envs.get_local(kind_env, name.as_str()) {
        let kind = st.syms_tys.kinds.canonicalize(kind);
        st.info.insert_kind(name.clone(), kind);
      }
    }
    let values: Vec<_> =
      st.envs.values(env).map(|(name, scheme)| (name.clone(), scheme.clone())).collect();
    for (name, scheme) in values {
      st.info.insert_scheme(name, scheme);
    }
    let mut info = std::mem::take(&mut st.info);
    info.apply(&mut st.syms_tys.tys);
    let errors = st.finish();
    log::debug!("{} errors", errors.len());
    Statics { info, errors }
  })
}
