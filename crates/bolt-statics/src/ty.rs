//! Type expressions.

use crate::error::ErrorKind;
use crate::st::St;
use bolt_hir::{Ty, TyIdx};
use bolt_scope::Namespace;
use bolt_statics_types::scheme::Scheme;
use bolt_statics_types::sub::TVSub;

/// What to do with a type variable that is not in scope.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Mode {
  /// Introduce it as a rigid var, bound in the current env.
  Rigid,
  /// Report it.
  Strict,
}

pub(crate) fn get(st: &mut St<'_>, mode: Mode, ty: TyIdx) -> bolt_statics_types::ty::Ty {
  let ret = get_(st, mode, ty);
  st.info.insert(ty, ret);
  ret
}

fn get_(st: &mut St<'_>, mode: Mode, ty: TyIdx) -> bolt_statics_types::ty::Ty {
  let arenas = st.arenas;
  match &arenas.ty[ty] {
    Ty::Path(path) => match st.get_ty_name(ty, path) {
      Some((_, scheme)) => st.instantiate(&scheme, ty),
      None => st.fresh(),
    },
    Ty::Var(name) => {
      let env = st.cur_env();
      if let Some(scheme) = st.envs.get(env, name.as_str(), Namespace::TYPE) {
        return scheme.ty;
      }
      match mode {
        Mode::Rigid => {
          let ret = st.rigid(name.clone());
          st.envs.add(env, name.clone(), Namespace::TYPE, Scheme::mono(ret));
          ret
        }
        Mode::Strict => {
          st.err(ty, ErrorKind::BindingNotFound(Vec::new(), name.clone()));
          // later uses of the name get the same var and no more errors.
          let ret = st.fresh();
          st.envs.add(env, name.clone(), Namespace::TYPE, Scheme::mono(ret));
          ret
        }
      }
    }
    Ty::App(func, args) => {
      let args: Vec<_> = args.iter().map(|&arg| get(st, mode, arg)).collect();
      let func = *func;
      let Ty::Path(path) = &arenas.ty[func] else {
        let func_ty = get(st, mode, func);
        return st.syms_tys.tys.apps(func_ty, args);
      };
      let Some((env, scheme)) = st.get_ty_name(func, path) else {
        let func_ty = st.fresh();
        st.info.insert(func, func_ty);
        return st.syms_tys.tys.apps(func_ty, args);
      };
      if let Some(params) = st.aliases.get(&(env, path.last().clone()))
        && params.len() == args.len()
      {
        cov_mark::hit("expand_alias");
        let sub: TVSub = params.iter().copied().zip(args).collect();
        st.info.insert(func, scheme.ty);
        return st.syms_tys.tys.subst(&sub, scheme.ty);
      }
      let func_ty = st.instantiate(&scheme, func);
      st.info.insert(func, func_ty);
      st.syms_tys.tys.apps(func_ty, args)
    }
    Ty::Arrow(params, res) => {
      let params: Vec<_> = params.iter().map(|&param| get(st, mode, param)).collect();
      let res = get(st, mode, *res);
      st.syms_tys.tys.arrows(params, res)
    }
    Ty::Tuple(tys) => {
      let tys: Vec<_> = tys.iter().map(|&ty| get(st, mode, ty)).collect();
      st.syms_tys.tys.tuple(tys)
    }
    Ty::Forall(names, inner) => {
      st.push_new_env();
      let env = st.cur_env();
      for name in names {
        let var = st.rigid(name.clone());
        st.envs.add(env, name.clone(), Namespace::TYPE, Scheme::mono(var));
      }
      let ret = get(st, mode, *inner);
      st.pop_env();
      ret
    }
    Ty::WithConstraints(constraints, inner) => {
      for constraint in constraints {
        if !st.classes.contains(&constraint.name) {
          st.err(ty, ErrorKind::TypeclassNotFound(constraint.name.clone()));
        }
        for &arg in &constraint.tys {
          get(st, mode, arg);
        }
      }
      get(st, mode, *inner)
    }
  }
}
