//! Patterns. Every name a pattern binds goes in the current env, monomorphically.

use crate::st::St;
use bolt_hir::{Lab, Lit, Pat, PatIdx, RecordPatRow};
use bolt_scope::{Module, Namespace, ScopeId};
use bolt_statics_types::scheme::Scheme;
use bolt_statics_types::ty::Ty;
use str_util::Name;

/// Where a pattern is, for looking up the constructors in it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Cx {
  pub(crate) scope: ScopeId,
  pub(crate) module: Module,
}

pub(crate) fn get(st: &mut St<'_>, cx: Cx, pat: PatIdx) -> Ty {
  let ret = get_(st, cx, pat);
  st.info.insert(pat, ret);
  ret
}

fn get_(st: &mut St<'_>, cx: Cx, pat: PatIdx) -> Ty {
  let arenas = st.arenas;
  match &arenas.pat[pat] {
    Pat::Name(name) => bind(st, name),
    Pat::Lit(lit) => lit_ty(lit),
    Pat::Con(path, args) => {
      let con = st.get_value(cx.scope, cx.module, path, pat);
      let args: Vec<_> = args.iter().map(|&arg| get(st, cx, arg)).collect();
      if args.is_empty() {
        return con;
      }
      let ret = st.fresh();
      let want = st.syms_tys.tys.arrows(args, ret);
      st.equal(con, want, pat);
      ret
    }
    Pat::Record(rows) => {
      let mut fields = Vec::<(Lab, Ty)>::new();
      let mut rest = Ty::NIL;
      for row in rows {
        match row {
          RecordPatRow::Field(lab, pat) => {
            let ty = get(st, cx, *pat);
            fields.push((lab.clone(), ty));
          }
          RecordPatRow::Punned(name) => {
            let ty = bind(st, name);
            fields.push((Lab::Name(name.clone()), ty));
          }
          RecordPatRow::Rest(rest_pat) => {
            rest = st.fresh();
            if let Some(rest_pat) = rest_pat {
              let ty = get(st, cx, *rest_pat);
              st.equal(rest, ty, *rest_pat);
            }
          }
        }
      }
      st.row(pat, fields, rest)
    }
    Pat::Or(lhs, rhs) => {
      let lhs_ty = get(st, cx, *lhs);
      // the rhs binds the same names, which must have the same types as in the lhs.
      let env = st.cur_env();
      let inner = st.push_new_env();
      let rhs_ty = get(st, cx, *rhs);
      st.pop_env();
      let bound: Vec<(Name, Ty)> =
        st.envs.values(inner).map(|(name, scheme)| (name.clone(), scheme.ty)).collect();
      for (name, ty) in bound {
        match st.envs.get_local(env, name.as_str(), Namespace::VAR).map(|scheme| scheme.ty) {
          Some(lhs_name_ty) => st.equal(lhs_name_ty, ty, *rhs),
          None => st.envs.add(env, name, Namespace::VAR, Scheme::mono(ty)),
        }
      }
      st.equal(lhs_ty, rhs_ty, pat);
      lhs_ty
    }
  }
}

fn bind(st: &mut St<'_>, name: &Name) -> Ty {
  let ty = st.fresh();
  let env = st.cur_env();
  st.envs.add(env, name.clone(), Namespace::VAR, Scheme::mono(ty));
  ty
}

pub(crate) fn lit_ty(lit: &Lit) -> Ty {
  match lit {
    Lit::Int(_) => Ty::INT,
    Lit::String(_) => Ty::STRING,
  }
}

/// pushes the names the pattern binds onto `out`.
pub(crate) fn names(arenas: &bolt_hir::Arenas, pat: PatIdx, out: &mut Vec<Name>) {
  match &arenas.pat[pat] {
    Pat::Name(name) => out.push(name.clone()),
    Pat::Lit(_) => {}
    Pat::Con(_, args) => {
      for &arg in args {
        names(arenas, arg, out);
      }
    }
    Pat::Record(rows) => {
      for row in rows {
        match row {
          RecordPatRow::Field(_, pat) | RecordPatRow::Rest(Some(pat)) => names(arenas, *pat, out),
          RecordPatRow::Punned(name) => out.push(name.clone()),
          RecordPatRow::Rest(None) => {}
        }
      }
    }
    Pat::Or(lhs, _) => names(arenas, *lhs, out),
  }
}
