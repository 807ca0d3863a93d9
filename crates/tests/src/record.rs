use crate::check::Builder;

#[test]
fn literal() {
  let mut b = Builder::default();
  let one = b.int(1);
  let s = b.string("s");
  let rec = b.record(None, vec![("y", one), ("x", s)]);
  let r = b.val("r", None, rec);
  let c = b.check(&[r]);
  c.assert_ok();
  assert_eq!(c.scheme("r"), "{ x: String, y: Int }");
}

#[test]
fn empty() {
  let mut b = Builder::default();
  let rec = b.record(None, Vec::new());
  let r = b.val("r", None, rec);
  let c = b.check(&[r]);
  c.assert_ok();
  assert_eq!(c.scheme("r"), "{}");
}

#[test]
fn project() {
  let mut b = Builder::default();
  let q = b.var("q");
  let x = b.member(q, &["x"]);
  let getx = b.fun("getx", &["q"], None, x);
  let c = b.check(&[getx]);
  c.assert_ok();
  assert_eq!(c.scheme("getx"), "forall a b. { x: a | b } -> a");
}

#[test]
fn project_nested() {
  let mut b = Builder::default();
  let q = b.var("q");
  let xy = b.member(q, &["x", "y"]);
  let get = b.fun("get", &["q"], None, xy);
  let c = b.check(&[get]);
  c.assert_ok();
  assert_eq!(c.scheme("get"), "forall a b c. { x: { y: a | b } | c } -> a");
}

#[test]
fn project_two() {
  let mut b = Builder::default();
  let r_1 = b.var("r");
  let y = b.member(r_1, &["y"]);
  let r_2 = b.var("r");
  let x = b.member(r_2, &["x"]);
  let pair = b.tuple(vec![y, x]);
  let f = b.fun("f", &["r"], None, pair);
  let f_ref = b.var("f");
  let s = b.string("s");
  let one = b.int(1);
  let arg = b.record(None, vec![("x", s), ("y", one)]);
  let call = b.call(f_ref, vec![arg]);
  let t = b.val("t", None, call);
  let c = b.check(&[f, t]);
  c.assert_ok();
  assert_eq!(c.scheme("t"), "(Int, String)");
}

#[test]
fn missing_field() {
  let mut b = Builder::default();
  let one = b.int(1);
  let rec = b.record(None, vec![("a", one)]);
  let proj = b.member(rec, &["b"]);
  let v = b.val("v", None, proj);
  let c = b.check(&[v]);
  c.assert_one(5007, "field not found: b");
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(proj));
}

#[test]
fn duplicate_label() {
  let mut b = Builder::default();
  let one = b.int(1);
  let s = b.string("s");
  let rec = b.record(None, vec![("a", one), ("a", s)]);
  let r = b.val("r", None, rec);
  let c = b.check(&[r]);
  c.assert_one(5009, "duplicate label: a");
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(rec));
  assert_eq!(c.scheme("r"), "{ a: Int }");
}

#[test]
fn duplicate_struct_field() {
  let mut b = Builder::default();
  let int_1 = b.t_name("Int");
  let int_2 = b.t_name("Int");
  let point = b.struct_("Point", &[], vec![("x", int_1), ("x", int_2)]);
  let c = b.check(&[point]);
  c.assert_one(5009, "duplicate label: x");
}
