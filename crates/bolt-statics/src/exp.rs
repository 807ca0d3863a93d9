//! Expressions.

use crate::pat;
use crate::st::St;
use bolt_hir::{Exp, ExpIdx, Lab, Path, RecordExpRow};
use bolt_statics_types::ty::Ty;

pub(crate) fn get(st: &mut St<'_>, exp: ExpIdx) -> Ty {
  let ret = get_(st, exp);
  st.info.insert(exp, ret);
  ret
}

fn get_(st: &mut St<'_>, exp: ExpIdx) -> Ty {
  let arenas = st.arenas;
  let scope = st.scopes.of_exp(exp);
  let module = st.scopes.exp_module(exp);
  match &arenas.exp[exp] {
    Exp::Lit(lit) => pat::lit_ty(lit),
    Exp::Path(path) => st.get_value(scope, module, path, exp),
    Exp::Member(inner, labs) => {
      let mut ty = get(st, *inner);
      // each projection only needs the one field, whatever else the record has.
      for lab in labs {
        let field = st.fresh();
        let rest = st.fresh();
        let present = st.syms_tys.tys.present(field);
        let row = st.syms_tys.tys.field(lab.clone(), present, rest);
        st.projection(ty, row, exp);
        ty = field;
      }
      ty
    }
    Exp::Call(func, args) => {
      let func_ty = get(st, *func);
      let args: Vec<_> = args.iter().map(|&arg| get(st, arg)).collect();
      let ret = st.fresh();
      let want = st.syms_tys.tys.arrows(args, ret);
      st.equal(func_ty, want, exp);
      ret
    }
    Exp::Record(name, rows) => {
      let fields: Vec<(Lab, Ty)> = rows
        .iter()
        .map(|row| match row {
          RecordExpRow::Field(lab, row_exp) => (lab.clone(), get(st, *row_exp)),
          RecordExpRow::Punned(name) => {
            let ty = st.get_value(scope, module, &Path::one(name.clone()), exp);
            (Lab::Name(name.clone()), ty)
          }
        })
        .collect();
      let row = st.row(exp, fields, Ty::NIL);
      let Some(name) = name else { return row };
      let con = st.get_value(scope, module, name, exp);
      let ret = st.fresh();
      let want = st.syms_tys.tys.arrow(row, ret);
      st.equal(con, want, exp);
      ret
    }
    Exp::Tuple(exps) => {
      let tys: Vec<_> = exps.iter().map(|&exp| get(st, exp)).collect();
      st.syms_tys.tys.tuple(tys)
    }
    Exp::Match(head, arms) => {
      let head_ty = match head {
        Some(head) => get(st, *head),
        None => st.fresh(),
      };
      let ret = st.fresh();
      let cx = pat::Cx { scope, module };
      for arm in arms {
        st.push_new_env();
        let pat_ty = pat::get(st, cx, arm.pat);
        st.equal(head_ty, pat_ty, arm.pat);
        let arm_ty = get(st, arm.exp);
        st.equal(ret, arm_ty, arm.exp);
        st.pop_env();
      }
      if head.is_some() { ret } else { st.syms_tys.tys.arrow(head_ty, ret) }
    }
    Exp::Infix(lhs, op, rhs) => {
      let lhs = get(st, *lhs);
      let rhs = get(st, *rhs);
      let op_ty = st.get_value(scope, module, &Path::one(op.clone()), exp);
      let ret = st.fresh();
      let want = st.syms_tys.tys.arrows([lhs, rhs], ret);
      st.equal(want, op_ty, exp);
      ret
    }
  }
}
