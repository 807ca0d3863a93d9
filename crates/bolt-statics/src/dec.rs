//! Declarations and statements.
//!
//! Before any inference, every let, module, class and instance gets its env, and every type
//! declaration is bound. Then lets are inferred in tree order, except that a reference to a let
//! not yet inferred infers it, along with its whole group of mutually recursive lets, right away.

use crate::error::ErrorKind;
use crate::exp;
use crate::pat;
use crate::st::{FnData, LetState, MethodOf, Nominal, St};
use crate::ty::{self, Mode};
use bolt_hir::{Body, Dec, DecIdx, Lab, LetDec, Variant};
use bolt_scope::{Module, Namespace};
use bolt_statics_types::constraint::Constraint;
use bolt_statics_types::env::EnvId;
use bolt_statics_types::scheme::Scheme;
use bolt_statics_types::ty::{Ty, TyVar};
use str_util::Name;

// envs //

/// makes the envs for the decs, whose names are bound in `env`. `module` is the module the decs
/// are directly in, if any.
pub(crate) fn declare(st: &mut St<'_>, env: EnvId, module: Option<Module>, decs: &[DecIdx]) {
  let arenas = st.arenas;
  for &dec in decs {
    match &arenas.dec[dec] {
      Dec::Let(let_dec) => {
        st.owner_envs.insert(dec, env);
        let own = st.envs.new_env(Some(env));
        st.dec_envs.insert(dec, own);
        if let Some(module) = module {
          let mut names = Vec::new();
          pat::names(arenas, let_dec.pat, &mut names);
          for name in names {
            st.module_values.entry((module, name)).or_insert(dec);
          }
        }
        if let Some(Body::Block(decs)) = &let_dec.body {
          declare(st, own, None, decs);
        }
      }
      Dec::Struct(_) | Dec::Enum(_) | Dec::Type(_) => {
        st.owner_envs.insert(dec, env);
      }
      Dec::Module(module_dec) => {
        let inner = st.envs.new_env(Some(env));
        st.module_envs.insert(Module::Dec(dec), inner);
        declare(st, inner, Some(Module::Dec(dec)), &module_dec.decs);
      }
      Dec::Class(bolt_hir::ClassDec { decs, .. }) => {
        declare_methods(st, env, dec, MethodOf::Class, decs);
      }
      Dec::Instance(bolt_hir::InstanceDec { decs, .. }) => {
        declare_methods(st, env, dec, MethodOf::Instance, decs);
      }
      Dec::If(cases) => {
        for case in cases {
          declare(st, env, module, &case.decs);
        }
      }
      Dec::Exp(_) | Dec::Return(_) => {}
    }
  }
}

fn declare_methods(st: &mut St<'_>, env: EnvId, dec: DecIdx, of: MethodOf, decs: &[DecIdx]) {
  let inner = st.envs.new_env(Some(env));
  st.dec_envs.insert(dec, inner);
  for &method in decs {
    if matches!(st.arenas.dec[method], Dec::Let(_)) {
      st.methods.insert(method, of);
    }
  }
  declare(st, inner, None, decs);
}

// type declarations //

/// binds the heads of the nominal types and registers the classes.
pub(crate) fn declare_types(st: &mut St<'_>, decs: &[DecIdx]) {
  let arenas = st.arenas;
  for &dec in decs {
    match &arenas.dec[dec] {
      Dec::Struct(bolt_hir::StructDec { name, ty_vars, .. })
      | Dec::Enum(bolt_hir::EnumDec { name, ty_vars, .. }) => {
        let Some(&env) = st.owner_envs.get(dec) else { continue };
        let tys = &mut st.syms_tys.tys;
        let con = tys.named_con(name.clone());
        let params: Vec<(Name, TyVar)> =
          ty_vars.iter().map(|ty_var| (ty_var.clone(), tys.regular_var())).collect();
        let con_ty = tys.con_ty(con);
        let args: Vec<_> = params.iter().map(|&(_, var)| tys.var_ty(var)).collect();
        let ty = tys.apps(con_ty, args);
        st.envs.add(env, name.clone(), Namespace::TYPE, Scheme::mono(con_ty));
        st.nominals.insert(dec, Nominal { con, params, ty });
      }
      Dec::Class(class_dec) => {
        if !st.classes.insert(class_dec.name.clone()) {
          st.err(dec, ErrorKind::TypeclassDeclaredTwice(class_dec.name.clone()));
        }
        declare_types(st, &class_dec.decs);
      }
      Dec::Instance(bolt_hir::InstanceDec { decs, .. })
      | Dec::Module(bolt_hir::ModuleDec { decs, .. }) => declare_types(st, decs),
      Dec::Let(let_dec) => {
        if let Some(Body::Block(decs)) = &let_dec.body {
          declare_types(st, decs);
        }
      }
      Dec::If(cases) => {
        for case in cases {
          declare_types(st, &case.decs);
        }
      }
      Dec::Type(_) | Dec::Exp(_) | Dec::Return(_) => {}
    }
  }
}

/// defines the nominal types, their constructors, and the aliases, and checks the class and
/// instance heads.
pub(crate) fn define_types(st: &mut St<'_>, decs: &[DecIdx]) {
  let arenas = st.arenas;
  for &dec in decs {
    match &arenas.dec[dec] {
      Dec::Struct(struct_dec) => {
        let (Some(nominal), Some(&env)) = (st.nominals.get(dec).cloned(), st.owner_envs.get(dec))
        else {
          continue;
        };
        let row =
          with_params(st, env, &nominal.params, |st| record_row(st, dec, &struct_dec.fields));
        let vars: Vec<_> = nominal.params.iter().map(|&(_, var)| var).collect();
        let tys = &mut st.syms_tys.tys;
        tys.set_struct_row(nominal.con, vars.clone(), row);
        let ctor = tys.arrow(row, nominal.ty);
        let scheme = Scheme::new(tys, vars, Constraint::Empty, ctor);
        st.envs.add(env, struct_dec.name.clone(), Namespace::VAR, scheme);
      }
      Dec::Enum(enum_dec) => {
        let (Some(nominal), Some(&env)) = (st.nominals.get(dec).cloned(), st.owner_envs.get(dec))
        else {
          continue;
        };
        let vars: Vec<_> = nominal.params.iter().map(|&(_, var)| var).collect();
        for variant in &enum_dec.variants {
          let ctor = with_params(st, env, &nominal.params, |st| match variant {
            Variant::Tuple(_, args) => {
              let args: Vec<_> = args.iter().map(|&arg| ty::get(st, Mode::Strict, arg)).collect();
              st.syms_tys.tys.arrows(args, nominal.ty)
            }
            Variant::Record(_, fields) => {
              let row = record_row(st, dec, fields);
              st.syms_tys.tys.arrow(row, nominal.ty)
            }
          });
          let scheme = Scheme::new(&st.syms_tys.tys, vars.clone(), Constraint::Empty, ctor);
          st.envs.add(env, variant.name().clone(), Namespace::VAR, scheme);
        }
      }
      Dec::Type(type_dec) => {
        let Some(&env) = st.owner_envs.get(dec) else { continue };
        let params: Vec<(Name, TyVar)> = type_dec
          .ty_vars
          .iter()
          .map(|ty_var| (ty_var.clone(), st.syms_tys.tys.regular_var()))
          .collect();
        let body = with_params(st, env, &params, |st| ty::get(st, Mode::Strict, type_dec.ty));
        let mut occurring = Vec::new();
        st.syms_tys.tys.free_vars(body, &mut occurring);
        let vars: Vec<_> = params.iter().map(|&(_, var)| var).collect();
        let quantified: Vec<_> =
          vars.iter().copied().filter(|var| occurring.contains(var)).collect();
        let scheme = Scheme::new(&st.syms_tys.tys, quantified, Constraint::Empty, body);
        st.envs.add(env, type_dec.name.clone(), Namespace::TYPE, scheme);
        if !vars.is_empty() {
          st.aliases.insert((env, type_dec.name.clone()), vars);
        }
      }
      Dec::Class(bolt_hir::ClassDec { tys, constraints, decs, .. })
      | Dec::Instance(bolt_hir::InstanceDec { tys, constraints, decs, .. }) => {
        if let Dec::Instance(instance_dec) = &arenas.dec[dec]
          && !st.classes.contains(&instance_dec.name)
        {
          st.err(dec, ErrorKind::TypeclassNotFound(instance_dec.name.clone()));
        }
        if let Some(&env) = st.dec_envs.get(dec) {
          st.with_env(env, |st| {
            for &ty in tys {
              ty::get(st, Mode::Rigid, ty);
            }
            for constraint in constraints {
              if !st.classes.contains(&constraint.name) {
                st.err(dec, ErrorKind::TypeclassNotFound(constraint.name.clone()));
              }
              for &ty in &constraint.tys {
                ty::get(st, Mode::Rigid, ty);
              }
            }
          });
        }
        define_types(st, decs);
      }
      Dec::Module(module_dec) => define_types(st, &module_dec.decs),
      Dec::Let(let_dec) => {
        if let Some(Body::Block(decs)) = &let_dec.body {
          define_types(st, decs);
        }
      }
      Dec::If(cases) => {
        for case in cases {
          define_types(st, &case.decs);
        }
      }
      Dec::Exp(_) | Dec::Return(_) => {}
    }
  }
}

/// runs `f` in a new env, child of `env`, with the type params bound.
fn with_params<'a, F, T>(st: &mut St<'a>, env: EnvId, params: &[(Name, TyVar)], f: F) -> T
where
  F: FnOnce(&mut St<'a>) -> T,
{
  let inner = st.envs.new_env(Some(env));
  for (name, var) in params {
    let ty = st.syms_tys.tys.var_ty(*var);
    st.envs.add(inner, name.clone(), Namespace::TYPE, Scheme::mono(ty));
  }
  st.with_env(inner, f)
}

/// returns the closed row of the declared fields.
fn record_row(st: &mut St<'_>, dec: DecIdx, fields: &[(Name, bolt_hir::TyIdx)]) -> Ty {
  let fields: Vec<_> = fields
    .iter()
    .map(|(name, ty)| (Lab::Name(name.clone()), ty::get(st, Mode::Strict, *ty)))
    .collect();
  st.row(dec, fields, Ty::NIL)
}

// statements //

pub(crate) fn get_decs(st: &mut St<'_>, decs: &[DecIdx]) {
  for &dec in decs {
    get_dec(st, dec);
  }
}

fn get_dec(st: &mut St<'_>, dec: DecIdx) {
  let arenas = st.arenas;
  match &arenas.dec[dec] {
    Dec::Let(_) => ensure_let(st, dec),
    Dec::Struct(_) | Dec::Enum(_) | Dec::Type(_) => {}
    Dec::Module(module_dec) => {
      let Some(&env) = st.module_envs.get(&Module::Dec(dec)) else { return };
      st.push_env(env);
      get_decs(st, &module_dec.decs);
      st.pop_env();
    }
    Dec::Class(bolt_hir::ClassDec { decs, .. })
    | Dec::Instance(bolt_hir::InstanceDec { decs, .. }) => {
      let Some(&env) = st.dec_envs.get(dec) else { return };
      st.push_env(env);
      get_decs(st, decs);
      st.pop_env();
    }
    Dec::Exp(exp) => {
      exp::get(st, *exp);
    }
    Dec::Return(exp) => {
      let ty = match exp {
        Some(exp) => exp::get(st, *exp),
        None => Ty::UNIT,
      };
      if let Some(&ret) = st.ret_stack.last() {
        st.equal(ret, ty, dec);
      }
    }
    Dec::If(cases) => {
      for case in cases {
        if let Some(test) = case.test {
          let ty = exp::get(st, test);
          st.equal(Ty::BOOL, ty, test);
        }
        get_decs(st, &case.decs);
      }
    }
  }
}

// lets //

/// infers the let, if it was not already.
pub(crate) fn ensure_let(st: &mut St<'_>, dec: DecIdx) {
  if st.lets.get(dec).is_some() {
    return;
  }
  let Some(let_dec) = st.arenas.dec[dec].as_let() else { return };
  if is_fn_like(st, dec, let_dec) {
    get_group(st, dec);
  } else {
    get_var_let(st, dec, let_dec);
  }
}

fn is_fn_like(st: &St<'_>, dec: DecIdx, let_dec: &LetDec) -> bool {
  st.methods.contains_key(&dec) || let_dec.is_fn_like(st.arenas)
}

/// infers the function-like lets in the group of `dec` together, in one poly.
fn get_group(st: &mut St<'_>, dec: DecIdx) {
  let arenas = st.arenas;
  let groups = st.groups;
  let group = groups.group_of(dec).unwrap_or(std::slice::from_ref(&dec));
  let members: Vec<(DecIdx, &LetDec)> = group
    .iter()
    .filter_map(|&member| {
      let let_dec = arenas.dec[member].as_let()?;
      let todo = st.lets.get(member).is_none() && is_fn_like(st, member, let_dec);
      todo.then_some((member, let_dec))
    })
    .collect();
  if members.is_empty() {
    return;
  }
  log::trace!("infer group of {} lets", members.len());
  let poly = st.new_poly();
  st.push_poly(poly);
  // every member has a type before any body is inferred, so they may refer to each other.
  for &(member, let_dec) in &members {
    prepare_fn(st, member, let_dec);
  }
  for &(member, let_dec) in &members {
    get_fn_body(st, member, let_dec);
  }
  st.pop_poly();
  let skip: Vec<_> = members.iter().map(|&(member, _)| member).collect();
  let mut generalized = Vec::<TyVar>::new();
  let mut done = Vec::<(DecIdx, EnvId, Scheme)>::new();
  for &(member, _) in &members {
    let (Some(fn_data), Some(&env)) = (st.fns.get(member).copied(), st.owner_envs.get(member))
    else {
      continue;
    };
    let scheme = if st.methods.get(&member) == Some(&MethodOf::Instance) {
      Scheme::mono(st.syms_tys.tys.apply(fn_data.ty))
    } else {
      st.generalize(poly, env, &skip, fn_data.ty)
    };
    generalized.extend(scheme.ty_vars.iter().copied());
    done.push((member, env, scheme));
  }
  for (member, env, scheme) in done {
    if let Some(name) = arenas.dec[member].as_let().and_then(|let_dec| let_dec.name(arenas)) {
      st.envs.add(env, name.clone(), Namespace::VAR, scheme.clone());
    }
    st.lets.insert(member, LetState::Done(scheme));
  }
  st.finish_poly(poly, &generalized);
}

fn pat_cx(st: &St<'_>, dec: DecIdx) -> pat::Cx {
  let scope = st.scopes.of_let(dec).unwrap_or_else(|| st.scopes.of_dec(dec));
  pat::Cx { scope, module: st.scopes.dec_module(dec) }
}

fn prepare_fn(st: &mut St<'_>, dec: DecIdx, let_dec: &LetDec) {
  let Some(&env) = st.dec_envs.get(dec) else { return };
  let cx = pat_cx(st, dec);
  st.with_env(env, |st| {
    let ret = st.fresh();
    let params: Vec<_> = let_dec.params.iter().map(|&param| pat::get(st, cx, param)).collect();
    let ty = st.syms_tys.tys.arrows(params, ret);
    if let Some(assert) = let_dec.ty {
      let want = ty::get(st, Mode::Rigid, assert);
      st.equal(want, ty, assert);
    }
    st.info.insert(let_dec.pat, ty);
    st.fns.insert(dec, FnData { ret, ty });
    st.lets.insert(dec, LetState::InProgress(ty));
  });
}

fn get_fn_body(st: &mut St<'_>, dec: DecIdx, let_dec: &LetDec) {
  let (Some(&env), Some(fn_data)) = (st.dec_envs.get(dec), st.fns.get(dec).copied()) else {
    return;
  };
  st.with_env(env, |st| {
    st.ret_stack.push(fn_data.ret);
    match &let_dec.body {
      None => {}
      Some(Body::Exp(exp)) => {
        let ty = exp::get(st, *exp);
        st.equal(fn_data.ret, ty, *exp);
      }
      Some(Body::Block(decs)) => get_decs(st, decs),
    }
    st.ret_stack.pop();
  });
}

/// infers a let that is not function-like in the poly it is in, then generalizes each name its
/// pattern binds.
fn get_var_let(st: &mut St<'_>, dec: DecIdx, let_dec: &LetDec) {
  let (Some(&own), Some(&owner)) = (st.dec_envs.get(dec), st.owner_envs.get(dec)) else {
    return;
  };
  let cx = pat::Cx { scope: st.scopes.of_dec(dec), module: st.scopes.dec_module(dec) };
  let ty = st.fresh();
  st.lets.insert(dec, LetState::InProgress(ty));
  let pat_env = st.with_env(own, |st| {
    if let Some(assert) = let_dec.ty {
      let want = ty::get(st, Mode::Strict, assert);
      st.equal(want, ty, assert);
    }
    match &let_dec.body {
      None => {}
      Some(Body::Exp(exp)) => {
        let got = exp::get(st, *exp);
        st.equal(ty, got, *exp);
      }
      Some(Body::Block(decs)) => {
        st.ret_stack.push(ty);
        get_decs(st, decs);
        st.ret_stack.pop();
      }
    }
    let pat_env = st.push_new_env();
    let pat_ty = pat::get(st, cx, let_dec.pat);
    st.pop_env();
    st.equal(pat_ty, ty, let_dec.pat);
    pat_env
  });
  let skip = [dec];
  let scheme = st.generalize_var_let(owner, &skip, ty);
  let bound: Vec<(Name, Ty)> =
    st.envs.values(pat_env).map(|(name, scheme)| (name.clone(), scheme.ty)).collect();
  for (name, name_ty) in bound {
    let name_scheme = st.generalize_var_let(owner, &skip, name_ty);
    st.envs.add(owner, name, Namespace::VAR, name_scheme);
  }
  st.lets.insert(dec, LetState::Done(scheme));
}
