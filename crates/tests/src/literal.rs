use crate::check::Builder;

#[test]
fn int() {
  let mut b = Builder::default();
  let three = b.int(3);
  let x = b.val("x", None, three);
  let c = b.check(&[x]);
  c.assert_ok();
  assert_eq!(c.scheme("x"), "Int");
  assert_eq!(c.ty_of(three), "Int");
}

#[test]
fn string() {
  let mut b = Builder::default();
  let s = b.string("hi");
  let x = b.val("x", None, s);
  let c = b.check(&[x]);
  c.assert_ok();
  assert_eq!(c.scheme("x"), "String");
}

#[test]
fn tuple() {
  let mut b = Builder::default();
  let one = b.int(1);
  let s = b.string("s");
  let t = b.tuple(vec![one, s]);
  let x = b.val("x", None, t);
  let c = b.check(&[x]);
  c.assert_ok();
  assert_eq!(c.scheme("x"), "(Int, String)");
}

#[test]
fn unit() {
  let mut b = Builder::default();
  let t = b.tuple(Vec::new());
  let x = b.val("x", None, t);
  let c = b.check(&[x]);
  c.assert_ok();
  assert_eq!(c.scheme("x"), "()");
}

#[test]
fn annotation_mismatch() {
  let mut b = Builder::default();
  let int = b.t_name("Int");
  let s = b.string("foo");
  let a = b.val("a", Some(int), s);
  let c = b.check(&[a]);
  c.assert_one(5006, "incompatible types: Int and String");
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(s));
}

#[test]
fn annotation_mismatch_many_lines() {
  let mut b = Builder::default();
  let int = b.t_name("Int");
  let s = b.string("foo");
  let a = b.val("a", Some(int), s);
  let c = b.check(&[a]);
  pretty_assertions::assert_eq!(
    c.messages_with(config::DiagnosticLines::Many),
    vec!["incompatible types\n  left:  Int\n  right: String".to_owned()]
  );
}
