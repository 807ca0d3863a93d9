//! Constraints between a var of an enclosing function and a var of an inner function wait until
//! the inner function is done.

use crate::check::Builder;

/// `let g y = x y`
fn apply_x(b: &mut Builder) -> (bolt_hir::DecIdx, bolt_hir::ExpIdx) {
  let x = b.var("x");
  let y = b.var("y");
  let call = b.call(x, vec![y]);
  (b.fun("g", &["y"], None, call), call)
}

#[test]
fn inner_fn() {
  let mut b = Builder::default();
  let (g, _) = apply_x(&mut b);
  let g_ref = b.var("g");
  let one = b.int(1);
  let call = b.call(g_ref, vec![one]);
  let ret = b.ret(call);
  let f = b.fun_block("f", &["x"], vec![g, ret]);
  let c = b.check(&[f]);
  cov_mark::check("defer_constraint");
  c.assert_ok();
  assert_eq!(c.scheme("f"), "forall a. (Int -> a) -> a");
}

#[test]
fn unused_var_let_checked() {
  let mut b = Builder::default();
  let (g, _) = apply_x(&mut b);
  let g_1 = b.var("g");
  let one = b.int(1);
  let call_1 = b.call(g_1, vec![one]);
  let a = b.val("a", None, call_1);
  let g_2 = b.var("g");
  let s = b.string("s");
  let call_2 = b.call(g_2, vec![s]);
  let b_dec = b.val("b", None, call_2);
  let a_ref = b.var("a");
  let ret = b.ret(a_ref);
  let f = b.fun_block("f", &["x"], vec![g, a, b_dec, ret]);
  let c = b.check(&[f]);
  c.assert_one(5006, "incompatible types: Int and String");
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(call_2));
  assert_eq!(c.scheme("f"), "forall a. (Int -> a) -> a");
}

#[test]
fn var_let_calls_param() {
  let mut b = Builder::default();
  let x = b.var("x");
  let s = b.string("s");
  let call = b.call(x, vec![s]);
  let v = b.val("v", None, call);
  let x_ref = b.var("x");
  let one = b.int(1);
  let plus = b.infix(x_ref, "+", one);
  let ret = b.ret(plus);
  let f = b.fun_block("f", &["x"], vec![v, ret]);
  let c = b.check(&[f]);
  assert_eq!(c.codes(), vec![diagnostic::Code::n(5006)]);
}

#[test]
fn inner_var() {
  let mut b = Builder::default();
  let x = b.var("x");
  let y = b.val("y", None, x);
  let y_ref = b.var("y");
  let ret = b.ret(y_ref);
  let f = b.fun_block("f", &["x"], vec![y, ret]);
  let c = b.check(&[f]);
  cov_mark::check_not("defer_constraint");
  c.assert_ok();
  assert_eq!(c.scheme("f"), "forall a. a -> a");
}

#[test]
fn provenance() {
  let mut b = Builder::default();
  let (g, x_y) = apply_x(&mut b);
  let x = b.var("x");
  let one = b.int(1);
  let plus = b.infix(x, "+", one);
  let g_ref = b.var("g");
  let one = b.int(1);
  let call = b.call(g_ref, vec![one]);
  let tuple = b.tuple(vec![plus, call]);
  let ret = b.ret(tuple);
  let f = b.fun_block("f", &["x"], vec![g, ret]);
  let c = b.check(&[f]);
  c.assert_one(5006, "incompatible types: Int and ?a -> ?b");
  let e = &c.statics.errors[0];
  assert_eq!(e.idx(), bolt_hir::Idx::from(g_ref));
  assert_eq!(e.provenance(), vec![bolt_hir::Idx::from(g_ref), bolt_hir::Idx::from(x_y)]);
  let many = c.messages_with(config::DiagnosticLines::Many);
  assert!(many[0].contains("via 1 instantiation of a generalized binding"), "{many:?}");
}

#[test]
fn same_level() {
  let mut b = Builder::default();
  let x = b.var("x");
  let one = b.int(1);
  let call = b.call(x, vec![one]);
  let f = b.fun("f", &["x"], None, call);
  let c = b.check(&[f]);
  cov_mark::check_not("defer_constraint");
  c.assert_ok();
  assert_eq!(c.scheme("f"), "forall a. (Int -> a) -> a");
}

#[test]
fn outer_and_inner_vars_on_one_side() {
  let mut b = Builder::default();
  let x = b.var("x");
  let y = b.var("y");
  let head = b.tuple(vec![x, y]);
  let z = b.p_name("z");
  let z_ref = b.var("z");
  let body = b.match_(head, vec![(z, z_ref)]);
  let g = b.fun("g", &["y"], None, body);
  let x_ref = b.var("x");
  let ret = b.ret(x_ref);
  let f = b.fun_block("f", &["x"], vec![g, ret]);
  let c = b.check(&[f]);
  cov_mark::check("defer_constraint");
  c.assert_ok();
  assert_eq!(c.scheme("f"), "forall a. a -> a");
}
