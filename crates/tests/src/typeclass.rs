use crate::check::Builder;
use bolt_hir::{ClassConstraint, Ty};
use str_util::Name;

fn show_class(b: &mut Builder) -> bolt_hir::DecIdx {
  let a = b.t_var("a");
  b.class("Show", vec![a], Vec::new())
}

#[test]
fn declared_twice() {
  let mut b = Builder::default();
  let first = show_class(&mut b);
  let second = show_class(&mut b);
  let c = b.check(&[first, second]);
  c.assert_one(5004, "type class declared more than once: Show");
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(second));
}

#[test]
fn instance_of_unknown() {
  let mut b = Builder::default();
  let int = b.t_name("Int");
  let inst = b.instance("Eq", vec![int], Vec::new(), Vec::new());
  let c = b.check(&[inst]);
  c.assert_one(5003, "type class not found: Eq");
}

#[test]
fn unknown_instance_constraint() {
  let mut b = Builder::default();
  let class = show_class(&mut b);
  let int_1 = b.t_name("Int");
  let int_2 = b.t_name("Int");
  let inst = b.instance("Show", vec![int_1], vec![("Eq", vec![int_2])], Vec::new());
  let c = b.check(&[class, inst]);
  c.assert_one(5003, "type class not found: Eq");
}

#[test]
fn unknown_constraint_in_assert() {
  let mut b = Builder::default();
  let a_1 = b.t_var("a");
  let constraint = ClassConstraint { name: Name::new("Eq"), tys: vec![a_1] };
  let a_2 = b.t_var("a");
  let a_3 = b.t_var("a");
  let arrow = b.t_arrow(vec![a_2], a_3);
  let ann = b.ty(Ty::WithConstraints(vec![constraint], arrow));
  let x = b.var("x");
  let id = b.fun("id", &["x"], Some(ann), x);
  let c = b.check(&[id]);
  c.assert_one(5003, "type class not found: Eq");
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(ann));
  assert_eq!(c.scheme("id"), "forall a. a -> a");
}

#[test]
fn instance_method_not_generalized() {
  let mut b = Builder::default();
  let class = show_class(&mut b);
  let s = b.string("int");
  let show = b.fun("show", &["x"], None, s);
  let int = b.t_name("Int");
  let inst = b.instance("Show", vec![int], Vec::new(), vec![show]);
  let c = b.check(&[class, inst]);
  c.assert_ok();
  let pat = c.arenas.dec[show].as_let().expect("not a let").pat;
  assert_eq!(c.ty_of(pat), "?a -> String");
  assert!(c.statics.info.scheme_of("show").is_none());
}

#[test]
fn class_method_sees_param() {
  let mut b = Builder::default();
  let a = b.t_var("a");
  let string = b.t_name("String");
  let ann = b.t_arrow(vec![a], string);
  let s = b.string("s");
  let show = b.fun("show", &["x"], Some(ann), s);
  let a = b.t_var("a");
  let class = b.class("Show", vec![a], vec![show]);
  let c = b.check(&[class]);
  c.assert_ok();
  let pat = c.arenas.dec[show].as_let().expect("not a let").pat;
  assert_eq!(c.ty_of(pat), "a -> String");
}
