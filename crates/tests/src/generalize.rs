use crate::check::Builder;

#[test]
fn id_fn() {
  let mut b = Builder::default();
  let x = b.var("x");
  let id = b.fun("id", &["x"], None, x);
  let c = b.check(&[id]);
  c.assert_ok();
  assert_eq!(c.scheme("id"), "forall a. a -> a");
  assert_eq!(c.statics.info.scheme_of("id").unwrap().ty_vars.len(), 1);
}

#[test]
fn id_match() {
  let mut b = Builder::default();
  let p = b.p_name("x");
  let x = b.var("x");
  let lam = b.lambda(vec![(p, x)]);
  let id = b.val("id", None, lam);
  let c = b.check(&[id]);
  c.assert_ok();
  assert_eq!(c.scheme("id"), "forall a. a -> a");
  assert_eq!(c.statics.info.scheme_of("id").unwrap().ty_vars.len(), 1);
}

#[test]
fn id_used_twice() {
  let mut b = Builder::default();
  let x = b.var("x");
  let id = b.fun("id", &["x"], None, x);
  let id_1 = b.var("id");
  let one = b.int(1);
  let call_1 = b.call(id_1, vec![one]);
  let a = b.val("a", None, call_1);
  let id_2 = b.var("id");
  let s = b.string("s");
  let call_2 = b.call(id_2, vec![s]);
  let b_dec = b.val("b", None, call_2);
  let c = b.check(&[id, a, b_dec]);
  c.assert_ok();
  assert_eq!(c.scheme("a"), "Int");
  assert_eq!(c.scheme("b"), "String");
}

#[test]
fn used_before_declared() {
  let mut b = Builder::default();
  let id_1 = b.var("id");
  let one = b.int(1);
  let call = b.call(id_1, vec![one]);
  let a = b.val("a", None, call);
  let x = b.var("x");
  let id = b.fun("id", &["x"], None, x);
  let c = b.check(&[a, id]);
  c.assert_ok();
  assert_eq!(c.scheme("a"), "Int");
  assert_eq!(c.scheme("id"), "forall a. a -> a");
}

#[test]
fn pair() {
  let mut b = Builder::default();
  let x = b.var("x");
  let y = b.var("y");
  let t = b.tuple(vec![x, y]);
  let pair = b.fun("pair", &["x", "y"], None, t);
  let c = b.check(&[pair]);
  c.assert_ok();
  assert_eq!(c.scheme("pair"), "forall a b. a -> b -> (a, b)");
}

#[test]
fn param_is_monomorphic() {
  let mut b = Builder::default();
  let x_1 = b.var("x");
  let one = b.int(1);
  let call_1 = b.call(x_1, vec![one]);
  let x_2 = b.var("x");
  let s = b.string("s");
  let call_2 = b.call(x_2, vec![s]);
  let t = b.tuple(vec![call_1, call_2]);
  let f = b.fun("f", &["x"], None, t);
  let c = b.check(&[f]);
  assert_eq!(c.codes(), vec![diagnostic::Code::n(5006)]);
}

#[test]
fn mutual_recursion() {
  let mut b = Builder::default();
  let g = b.var("g");
  let x = b.var("x");
  let g_x = b.call(g, vec![x]);
  let f_dec = b.fun("f", &["x"], None, g_x);
  let f = b.var("f");
  let y = b.var("y");
  let f_y = b.call(f, vec![y]);
  let g_dec = b.fun("g", &["y"], None, f_y);
  let c = b.check(&[f_dec, g_dec]);
  c.assert_ok();
  assert_eq!(c.scheme("f"), "forall a b. a -> b");
  assert_eq!(c.scheme("g"), "forall a b. a -> b");
}

/// `is_odd (m - 1)` or `is_even (m - 1)`.
fn call_pred(b: &mut Builder, func: &str, m: &str) -> bolt_hir::ExpIdx {
  let func = b.var(func);
  let m = b.var(m);
  let one = b.int(1);
  let minus = b.infix(m, "-", one);
  b.call(func, vec![minus])
}

/// `let name n = match n { 0 -> base, m -> other (m - 1) }`
fn parity(b: &mut Builder, name: &str, base: &str, other: &str) -> bolt_hir::DecIdx {
  let n = b.var("n");
  let zero = b.p_int(0);
  let base = b.var(base);
  let m = b.p_name("m");
  let rec = call_pred(b, other, "m");
  let body = b.match_(n, vec![(zero, base), (m, rec)]);
  b.fun(name, &["n"], None, body)
}

#[test]
fn even_odd() {
  let mut b = Builder::default();
  let is_even = parity(&mut b, "is_even", "True", "is_odd");
  let is_odd = parity(&mut b, "is_odd", "False", "is_even");
  let c = b.check(&[is_even, is_odd]);
  c.assert_ok();
  assert_eq!(c.scheme("is_even"), "Int -> Bool");
  assert_eq!(c.scheme("is_odd"), "Int -> Bool");
}

#[test]
fn apply_op() {
  let mut b = Builder::default();
  let not = b.var("not");
  let t = b.var("True");
  let app = b.infix(not, "$", t);
  let x = b.val("x", None, app);
  let c = b.check(&[x]);
  c.assert_ok();
  assert_eq!(c.scheme("x"), "Bool");
}

#[test]
fn eq_op() {
  let mut b = Builder::default();
  let one = b.int(1);
  let two = b.int(2);
  let eq = b.infix(one, "==", two);
  let x = b.val("x", None, eq);
  let s = b.string("s");
  let three = b.int(3);
  let bad = b.infix(s, "==", three);
  let y = b.val("y", None, bad);
  let c = b.check(&[x, y]);
  assert_eq!(c.scheme("x"), "Bool");
  assert_eq!(c.codes(), vec![diagnostic::Code::n(5006)]);
}
