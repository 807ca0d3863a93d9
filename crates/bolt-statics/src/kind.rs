//! Kind inference, run over every type-level declaration before any type inference.
//!
//! First every struct and enum is bound to a fresh kind variable and every alias to the kind of
//! its body, so declarations may refer to each other in any order. Then the bodies are checked.

use crate::error::ErrorKind;
use crate::st::St;
use bolt_hir::{Body, Dec, DecIdx, Ty, TyIdx, Variant};
use bolt_scope::Module;
use bolt_statics_types::env::KindEnvId;
use bolt_statics_types::kind::{self, Kind, KindData};
use str_util::Name;

/// infers kinds for the root, whose kind env is a child of `basis`. Returns the kind env of the
/// root.
pub(crate) fn get(st: &mut St<'_>, basis: KindEnvId, root: &[DecIdx]) -> KindEnvId {
  elapsed::log("bolt_statics::kind::get", || {
    let env = st.kind_envs.new_env(Some(basis));
    st.module_kind_envs.insert(Module::Root, env);
    let mut declared = Vec::new();
    declare_nominal(st, env, root, &mut declared);
    declare_aliases(st, env, root, &mut declared);
    check_decs(st, env, root);
    // nothing constrains the kind of an unused parameter.
    for kind in declared {
      default_to_type(&mut st.syms_tys.kinds, kind);
    }
    env
  })
}

fn declare_nominal(st: &mut St<'_>, env: KindEnvId, decs: &[DecIdx], declared: &mut Vec<Kind>) {
  let arenas = st.arenas;
  for &dec in decs {
    match &arenas.dec[dec] {
      Dec::Struct(bolt_hir::StructDec { name, .. }) | Dec::Enum(bolt_hir::EnumDec { name, .. }) => {
        let kind = st.syms_tys.kinds.var();
        st.kind_envs.set(env, name.clone(), kind);
        declared.push(kind);
      }
      Dec::Module(module_dec) => {
        let inner = st.kind_envs.new_env(Some(env));
        st.module_kind_envs.insert(Module::Dec(dec), inner);
        declare_nominal(st, inner, &module_dec.decs, declared);
      }
      Dec::Let(let_dec) => {
        let inner = st.kind_envs.new_env(Some(env));
        st.let_kind_envs.insert(dec, inner);
        if let Some(Body::Block(decs)) = &let_dec.body {
          declare_nominal(st, inner, decs, declared);
        }
      }
      Dec::Class(bolt_hir::ClassDec { decs, .. })
      | Dec::Instance(bolt_hir::InstanceDec { decs, .. }) => {
        declare_nominal(st, env, decs, declared);
      }
      Dec::If(cases) => {
        for case in cases {
          declare_nominal(st, env, &case.decs, declared);
        }
      }
      Dec::Type(_) | Dec::Exp(_) | Dec::Return(_) => {}
    }
  }
}

fn declare_aliases(st: &mut St<'_>, env: KindEnvId, decs: &[DecIdx], declared: &mut Vec<Kind>) {
  let arenas = st.arenas;
  for &dec in decs {
    match &arenas.dec[dec] {
      Dec::Type(type_dec) => {
        let inner = st.kind_envs.new_env(Some(env));
        let params = bind_params(st, inner, &type_dec.ty_vars);
        let body = infer(st, inner, type_dec.ty);
        let kind = st.syms_tys.kinds.arrows(params, body);
        st.kind_envs.set(env, type_dec.name.clone(), kind);
        declared.push(kind);
      }
      Dec::Module(module_dec) => {
        if let Some(&inner) = st.module_kind_envs.get(&Module::Dec(dec)) {
          declare_aliases(st, inner, &module_dec.decs, declared);
        }
      }
      Dec::Let(let_dec) => {
        if let Some(Body::Block(decs)) = &let_dec.body
          && let Some(&inner) = st.let_kind_envs.get(dec)
        {
          declare_aliases(st, inner, decs, declared);
        }
      }
      Dec::Class(bolt_hir::ClassDec { decs, .. })
      | Dec::Instance(bolt_hir::InstanceDec { decs, .. }) => {
        declare_aliases(st, env, decs, declared);
      }
      Dec::If(cases) => {
        for case in cases {
          declare_aliases(st, env, &case.decs, declared);
        }
      }
      Dec::Struct(_) | Dec::Enum(_) | Dec::Exp(_) | Dec::Return(_) => {}
    }
  }
}

fn check_decs(st: &mut St<'_>, env: KindEnvId, decs: &[DecIdx]) {
  for &dec in decs {
    check_dec(st, env, dec);
  }
}

fn check_dec(st: &mut St<'_>, env: KindEnvId, dec: DecIdx) {
  let arenas = st.arenas;
  match &arenas.dec[dec] {
    Dec::Struct(struct_dec) => {
      let inner = st.kind_envs.new_env(Some(env));
      let params = bind_params(st, inner, &struct_dec.ty_vars);
      for &(_, ty) in &struct_dec.fields {
        expect_type(st, inner, ty);
      }
      check_nominal(st, env, dec, &struct_dec.name, params);
    }
    Dec::Enum(enum_dec) => {
      let inner = st.kind_envs.new_env(Some(env));
      let params = bind_params(st, inner, &enum_dec.ty_vars);
      for variant in &enum_dec.variants {
        match variant {
          Variant::Tuple(_, tys) => {
            for &ty in tys {
              expect_type(st, inner, ty);
            }
          }
          Variant::Record(_, fields) => {
            for &(_, ty) in fields {
              expect_type(st, inner, ty);
            }
          }
        }
      }
      check_nominal(st, env, dec, &enum_dec.name, params);
    }
    Dec::Module(module_dec) => {
      if let Some(&inner) = st.module_kind_envs.get(&Module::Dec(dec)) {
        check_decs(st, inner, &module_dec.decs);
      }
    }
    Dec::Class(bolt_hir::ClassDec { tys, constraints, decs, .. })
    | Dec::Instance(bolt_hir::InstanceDec { tys, constraints, decs, .. }) => {
      let inner = st.kind_envs.new_env(Some(env));
      for &ty in tys {
        expect_type(st, inner, ty);
      }
      for constraint in constraints {
        for &ty in &constraint.tys {
          infer(st, inner, ty);
        }
      }
      check_decs(st, env, decs);
    }
    Dec::Let(let_dec) => {
      let Some(&inner) = st.let_kind_envs.get(dec) else { return };
      if let Some(ty) = let_dec.ty {
        expect_type(st, inner, ty);
      }
      if let Some(Body::Block(decs)) = &let_dec.body {
        check_decs(st, inner, decs);
      }
    }
    Dec::If(cases) => {
      for case in cases {
        check_decs(st, env, &case.decs);
      }
    }
    Dec::Type(_) | Dec::Exp(_) | Dec::Return(_) => {}
  }
}

/// unifies the kind the struct or enum was forward declared with and the kind of its definition.
fn check_nominal(st: &mut St<'_>, env: KindEnvId, dec: DecIdx, name: &Name, params: Vec<Kind>) {
  let kinds = &mut st.syms_tys.kinds;
  let kind = kinds.arrows(params, Kind::TYPE);
  let Some(declared) = st.kind_envs.get_local(env, name.as_str()) else { return };
  if let Err(e) = kind::unify(kinds, declared, kind) {
    st.err(dec, ErrorKind::KindMismatch(e.lhs, e.rhs));
  }
}

fn bind_params(st: &mut St<'_>, env: KindEnvId, names: &[Name]) -> Vec<Kind> {
  names
    .iter()
    .map(|name| {
      let kind = st.syms_tys.kinds.var();
      st.kind_envs.set(env, name.clone(), kind);
      kind
    })
    .collect()
}

fn expect_type(st: &mut St<'_>, env: KindEnvId, ty: TyIdx) {
  let kind = infer(st, env, ty);
  if let Err(e) = kind::unify(&mut st.syms_tys.kinds, kind, Kind::TYPE) {
    st.err(ty, ErrorKind::KindMismatch(e.lhs, e.rhs));
  }
}

/// returns the kind of the type. unbound names get a fresh kind, and are reported when the type
/// itself is checked.
fn infer(st: &mut St<'_>, env: KindEnvId, ty: TyIdx) -> Kind {
  let arenas = st.arenas;
  match &arenas.ty[ty] {
    Ty::Path(path) => {
      let found = if path.prefix().is_empty() {
        st.kind_envs.get(env, path.last().as_str())
      } else {
        st.get_kind_module_env(ty, path.prefix())
          .and_then(|module| st.kind_envs.get_local(module, path.last().as_str()))
      };
      found.unwrap_or_else(|| st.syms_tys.kinds.var())
    }
    Ty::Var(name) => st.kind_envs.get(env, name.as_str()).unwrap_or_else(|| {
      let kind = st.syms_tys.kinds.var();
      st.kind_envs.set(env, name.clone(), kind);
      kind
    }),
    Ty::App(func, args) => {
      let mut kind = infer(st, env, *func);
      for &arg in args {
        let arg_kind = infer(st, env, arg);
        let res = st.syms_tys.kinds.var();
        let want = st.syms_tys.kinds.arrow(arg_kind, res);
        if let Err(e) = kind::unify(&mut st.syms_tys.kinds, kind, want) {
          st.err(arg, ErrorKind::KindMismatch(e.lhs, e.rhs));
        }
        kind = res;
      }
      kind
    }
    Ty::Arrow(params, res) => {
      for &param in params {
        expect_type(st, env, param);
      }
      expect_type(st, env, *res);
      Kind::TYPE
    }
    Ty::Tuple(tys) => {
      for &ty in tys {
        expect_type(st, env, ty);
      }
      Kind::TYPE
    }
    Ty::Forall(names, inner) => {
      let env = st.kind_envs.new_env(Some(env));
      bind_params(st, env, names);
      infer(st, env, *inner)
    }
    Ty::WithConstraints(constraints, inner) => {
      for constraint in constraints {
        for &ty in &constraint.tys {
          infer(st, env, ty);
        }
      }
      infer(st, env, *inner)
    }
  }
}

fn default_to_type(kinds: &mut kind::Kinds, kind: Kind) {
  match kinds.data(kind) {
    KindData::Type => {}
    KindData::Var(_) => {
      // a var always unifies with Type.
      let _ = kind::unify(kinds, kind, Kind::TYPE);
    }
    KindData::Arrow(param, res) => {
      default_to_type(kinds, param);
      default_to_type(kinds, res);
    }
  }
}
