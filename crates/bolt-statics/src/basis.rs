//! The built-in types and values every source file starts with.

use crate::st::St;
use bolt_scope::Namespace;
use bolt_statics_types::constraint::Constraint;
use bolt_statics_types::env::KindEnvId;
use bolt_statics_types::kind::Kind;
use bolt_statics_types::scheme::Scheme;
use bolt_statics_types::ty::Ty;
use str_util::Name;

/// binds the basis in the root env, and returns a new kind env with the basis kinds.
pub(crate) fn get(st: &mut St<'_>) -> KindEnvId {
  let env = st.basis_env();
  let kind_env = st.kind_envs.new_env(None);
  for (name, ty) in [("Int", Ty::INT), ("String", Ty::STRING), ("Bool", Ty::BOOL)] {
    st.envs.add(env, Name::new(name), Namespace::TYPE, Scheme::mono(ty));
    st.kind_envs.set(kind_env, Name::new(name), Kind::TYPE);
  }
  let tys = &mut st.syms_tys.tys;
  let int_op = {
    let res = tys.arrow(Ty::INT, Ty::INT);
    tys.arrow(Ty::INT, res)
  };
  let not = tys.arrow(Ty::BOOL, Ty::BOOL);
  let eq = {
    let a = tys.regular_var();
    let a_ty = tys.var_ty(a);
    let ty = tys.arrows([a_ty, a_ty], Ty::BOOL);
    Scheme::new(tys, vec![a], Constraint::Empty, ty)
  };
  let app = {
    let a = tys.regular_var();
    let b = tys.regular_var();
    let a_ty = tys.var_ty(a);
    let b_ty = tys.var_ty(b);
    let func = tys.arrow(a_ty, b_ty);
    let param = tys.arrow(func, a_ty);
    let ty = tys.arrow(param, b_ty);
    Scheme::new(tys, vec![a, b], Constraint::Empty, ty)
  };
  let values = [
    ("True", Scheme::mono(Ty::BOOL)),
    ("False", Scheme::mono(Ty::BOOL)),
    ("+", Scheme::mono(int_op)),
    ("-", Scheme::mono(int_op)),
    ("*", Scheme::mono(int_op)),
    ("/", Scheme::mono(int_op)),
    ("==", eq),
    ("not", Scheme::mono(not)),
    ("$", app),
  ];
  for (name, scheme) in values {
    st.envs.add(env, Name::new(name), Namespace::VAR, scheme);
  }
  kind_env
}
