use crate::check::Builder;

fn pair(b: &mut Builder) -> bolt_hir::DecIdx {
  let a = b.t_var("a");
  let b_var = b.t_var("b");
  let tuple = b.t_tuple(vec![a, b_var]);
  b.alias("Pair", &["a", "b"], tuple)
}

fn pair_of(b: &mut Builder, lhs: &str, rhs: &str) -> bolt_hir::TyIdx {
  let pair = b.t_name("Pair");
  let lhs = b.t_name(lhs);
  let rhs = b.t_name(rhs);
  b.t_app(pair, vec![lhs, rhs])
}

#[test]
fn expand() {
  let mut b = Builder::default();
  let pair = pair(&mut b);
  let ann = pair_of(&mut b, "Int", "String");
  let one = b.int(1);
  let s = b.string("s");
  let tuple = b.tuple(vec![one, s]);
  let p = b.val("p", Some(ann), tuple);
  let c = b.check(&[pair, p]);
  cov_mark::check("expand_alias");
  c.assert_ok();
  assert_eq!(c.scheme("p"), "(Int, String)");
  assert_eq!(c.ty_of(ann), "(Int, String)");
}

#[test]
fn expand_mismatch() {
  let mut b = Builder::default();
  let pair = pair(&mut b);
  let ann = pair_of(&mut b, "Int", "String");
  let one = b.int(1);
  let two = b.int(2);
  let tuple = b.tuple(vec![one, two]);
  let p = b.val("p", Some(ann), tuple);
  let c = b.check(&[pair, p]);
  c.assert_one(5006, "incompatible types: String and Int");
}

#[test]
fn no_params() {
  let mut b = Builder::default();
  let int = b.t_name("Int");
  let num = b.alias("Num", &[], int);
  let ann = b.t_name("Num");
  let one = b.int(1);
  let n = b.val("n", Some(ann), one);
  let c = b.check(&[num, n]);
  cov_mark::check_not("expand_alias");
  c.assert_ok();
  assert_eq!(c.scheme("n"), "Int");
  assert_eq!(c.kind("Num"), "Type");
}

#[test]
fn alias_of_alias() {
  let mut b = Builder::default();
  let pair = pair(&mut b);
  let body = pair_of(&mut b, "Int", "Int");
  let ints = b.alias("Ints", &[], body);
  let ann = b.t_name("Ints");
  let one = b.int(1);
  let two = b.int(2);
  let tuple = b.tuple(vec![one, two]);
  let p = b.val("p", Some(ann), tuple);
  let c = b.check(&[pair, ints, p]);
  c.assert_ok();
  assert_eq!(c.scheme("p"), "(Int, Int)");
}

#[test]
fn in_fn_assert() {
  let mut b = Builder::default();
  let pair = pair(&mut b);
  let param = pair_of(&mut b, "Int", "String");
  let int = b.t_name("Int");
  let ann = b.t_arrow(vec![param], int);
  let one = b.int(1);
  let first = b.fun("first", &["p"], Some(ann), one);
  let c = b.check(&[pair, first]);
  c.assert_ok();
  assert_eq!(c.scheme("first"), "(Int, String) -> Int");
}
