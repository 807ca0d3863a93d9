use crate::check::Builder;

#[test]
fn infix() {
  let mut b = Builder::default();
  let one = b.int(1);
  let two = b.int(2);
  let sum = b.infix(one, "+", two);
  let n = b.val("n", None, sum);
  let c = b.check(&[n]);
  c.assert_ok();
  assert_eq!(c.scheme("n"), "Int");
}

#[test]
fn infix_mismatch() {
  let mut b = Builder::default();
  let one = b.int(1);
  let s = b.string("s");
  let sum = b.infix(one, "+", s);
  let stmt = b.stmt(sum);
  let c = b.check(&[stmt]);
  c.assert_one(5006, "incompatible types: String and Int");
  assert!(matches!(c.statics.errors[0].severity(), diagnostic::Severity::Error));
}

#[test]
fn call_non_fn() {
  let mut b = Builder::default();
  let one = b.int(1);
  let two = b.int(2);
  let call = b.call(one, vec![two]);
  let v = b.val("v", None, call);
  let c = b.check(&[v]);
  c.assert_one(5006, "incompatible types: Int and Int -> ?a");
}

#[test]
fn unbound() {
  let mut b = Builder::default();
  let y = b.var("y");
  let x = b.val("x", None, y);
  let c = b.check(&[x]);
  c.assert_one(5001, "binding not found: y");
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(y));
}

#[test]
fn latest_binding_wins() {
  let mut b = Builder::default();
  let one = b.int(1);
  let x_1 = b.val("x", None, one);
  let s = b.string("s");
  let x_2 = b.val("x", None, s);
  let c = b.check(&[x_1, x_2]);
  c.assert_ok();
  assert_eq!(c.scheme("x"), "String");
}

#[test]
fn types_are_applied() {
  let mut b = Builder::default();
  let x = b.var("x");
  let one = b.int(1);
  let call = b.call(x, vec![one]);
  let f = b.fun("f", &["x"], None, call);
  let f_ref = b.var("f");
  let g = b.var("g");
  let app = b.call(f_ref, vec![g]);
  let y = b.val("y", None, app);
  let n = b.var("n");
  let g_dec = b.fun("g", &["n"], None, n);
  let mut c = b.check(&[f, y, g_dec]);
  c.assert_ok();
  for idx in [call, app] {
    let ty = c.statics.info.ty_of(idx).expect("no type");
    assert_eq!(c.syms_tys.tys.apply(ty), ty);
  }
  assert_eq!(c.ty_of(app), "Int");
  assert_eq!(c.scheme("y"), "Int");
}

#[test]
fn every_mismatch_reported() {
  let mut b = Builder::default();
  let s = b.string("s");
  let t = b.string("t");
  let sum = b.infix(s, "+", t);
  let v = b.val("v", None, sum);
  let c = b.check(&[v]);
  assert_eq!(c.messages(), vec!["incompatible types: String and Int".to_owned(); 2]);
  assert_eq!(c.scheme("v"), "Int");
}
