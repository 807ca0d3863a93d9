use crate::check::Builder;

#[test]
fn nullary() {
  let mut b = Builder::default();
  let int = b.t_name("Int");
  let point = b.struct_("Point", &[], vec![("x", int)]);
  let c = b.check(&[point]);
  c.assert_ok();
  assert_eq!(c.kind("Point"), "Type");
}

#[test]
fn unary() {
  let mut b = Builder::default();
  let a_1 = b.t_var("a");
  let box_ = b.struct_("Box", &["a"], vec![("value", a_1)]);
  let a_2 = b.t_var("a");
  let opt = b.enum_("Opt", &["a"], vec![("None", Vec::new()), ("Some", vec![a_2])]);
  let c = b.check(&[box_, opt]);
  c.assert_ok();
  assert_eq!(c.kind("Box"), "Type -> Type");
  assert_eq!(c.kind("Opt"), "Type -> Type");
}

#[test]
fn phantom_param() {
  let mut b = Builder::default();
  let tag = b.enum_("Tag", &["a"], vec![("T", Vec::new())]);
  let c = b.check(&[tag]);
  c.assert_ok();
  assert_eq!(c.kind("Tag"), "Type -> Type");
}

#[test]
fn alias() {
  let mut b = Builder::default();
  let a = b.t_var("a");
  let b_var = b.t_var("b");
  let tuple = b.t_tuple(vec![a, b_var]);
  let pair = b.alias("Pair", &["a", "b"], tuple);
  let c = b.check(&[pair]);
  c.assert_ok();
  assert_eq!(c.kind("Pair"), "Type -> Type -> Type");
}

#[test]
fn higher() {
  let mut b = Builder::default();
  let f = b.t_var("f");
  let a = b.t_var("a");
  let app = b.t_app(f, vec![a]);
  let wrap = b.struct_("Wrap", &["f", "a"], vec![("inner", app)]);
  let c = b.check(&[wrap]);
  c.assert_ok();
  assert_eq!(c.kind("Wrap"), "(Type -> Type) -> Type -> Type");
}

#[test]
fn uses_later_decl() {
  let mut b = Builder::default();
  let box_name = b.t_name("Box");
  let int = b.t_name("Int");
  let app = b.t_app(box_name, vec![int]);
  let holder = b.struct_("Holder", &[], vec![("held", app)]);
  let a = b.t_var("a");
  let box_ = b.struct_("Box", &["a"], vec![("value", a)]);
  let c = b.check(&[holder, box_]);
  c.assert_ok();
  assert_eq!(c.kind("Holder"), "Type");
  assert_eq!(c.kind("Box"), "Type -> Type");
}

#[test]
fn applied_too_much() {
  let mut b = Builder::default();
  let int_1 = b.t_name("Int");
  let int_2 = b.t_name("Int");
  let app = b.t_app(int_1, vec![int_2]);
  let one = b.int(1);
  let x = b.val("x", Some(app), one);
  let c = b.check(&[x]);
  assert_eq!(c.codes(), vec![diagnostic::Code::n(5005), diagnostic::Code::n(5006)]);
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(int_2));
  assert_eq!(c.messages()[0], "incompatible kinds: Type and Type -> Type");
}

#[test]
fn not_applied() {
  let mut b = Builder::default();
  let a = b.t_var("a");
  let box_ = b.struct_("Box", &["a"], vec![("value", a)]);
  let box_name = b.t_name("Box");
  let holder = b.struct_("Holder", &[], vec![("held", box_name)]);
  let c = b.check(&[box_, holder]);
  c.assert_one(5005, "incompatible kinds: Type -> Type and Type");
}
