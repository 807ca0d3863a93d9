use crate::check::Builder;

#[test]
fn self_application() {
  let mut b = Builder::default();
  let x_1 = b.var("x");
  let x_2 = b.var("x");
  let call = b.call(x_1, vec![x_2]);
  let f = b.fun("f", &["x"], None, call);
  let c = b.check(&[f]);
  c.assert_one(5008, "circular type: ?a occurs in ?a -> ?b");
}

#[test]
fn returns_itself() {
  let mut b = Builder::default();
  let f_ref = b.var("f");
  let f = b.fun("f", &["x"], None, f_ref);
  let c = b.check(&[f]);
  c.assert_one(5008, "circular type: ?a occurs in ?b -> ?a");
}
