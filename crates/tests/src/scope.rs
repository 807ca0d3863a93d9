use crate::check::Builder;
use bolt_scope::{Decl, Module, Namespace, Scopes};

#[test]
fn param() {
  let mut b = Builder::default();
  let x = b.var("x");
  let f = b.fun("f", &["y", "x"], None, x);
  let scopes = Scopes::get(&b.arenas, &[f]);
  assert_eq!(scopes.lookup(scopes.of_exp(x), "x", Namespace::VAR), Some(Decl::Param(f, 1)));
  assert_eq!(scopes.lookup(scopes.of_exp(x), "f", Namespace::VAR), Some(Decl::Let(f)));
  assert_eq!(scopes.lookup(scopes.of_dec(f), "x", Namespace::VAR), None);
  assert_eq!(scopes.depth(scopes.of_dec(f)), 0);
  assert_eq!(scopes.of_let(f).map(|s| scopes.depth(s)), Some(1));
}

#[test]
fn namespaces() {
  let mut b = Builder::default();
  let int = b.t_name("Int");
  let p = b.struct_("P", &[], vec![("x", int)]);
  let e = b.enum_("E", &[], vec![("A", Vec::new())]);
  let int = b.t_name("Int");
  let t = b.alias("T", &[], int);
  let cls = b.class("C", Vec::new(), Vec::new());
  let root = [p, e, t, cls];
  let scopes = Scopes::get(&b.arenas, &root);
  let lookup = |name: &str, ns: Namespace| scopes.lookup(scopes.of_dec(p), name, ns);
  assert_eq!(lookup("P", Namespace::TYPE), Some(Decl::Struct(p)));
  assert_eq!(lookup("P", Namespace::VAR), Some(Decl::Struct(p)));
  assert_eq!(lookup("E", Namespace::TYPE), Some(Decl::Enum(e)));
  assert_eq!(lookup("E", Namespace::VAR), None);
  assert_eq!(lookup("A", Namespace::VAR), Some(Decl::Variant(e, 0)));
  assert_eq!(lookup("T", Namespace::TYPE), Some(Decl::Type(t)));
  assert_eq!(lookup("C", Namespace::CLASS), Some(Decl::Class(cls)));
  assert_eq!(lookup("C", Namespace::TYPE), None);
}

#[test]
fn flattened_into_enclosing() {
  let mut b = Builder::default();
  let one = b.int(1);
  let x = b.val("x", None, one);
  let m = b.module("M", vec![x]);
  let two = b.int(2);
  let y = b.val("y", None, two);
  let s = b.string("s");
  let z = b.val("z", None, s);
  let test = b.var("True");
  let if_ = b.if_(test, vec![y], vec![z]);
  let scopes = Scopes::get(&b.arenas, &[m, if_]);
  let root = scopes.of_dec(m);
  assert_eq!(scopes.lookup(root, "x", Namespace::VAR), Some(Decl::Let(x)));
  assert_eq!(scopes.lookup(root, "y", Namespace::VAR), Some(Decl::Let(y)));
  assert_eq!(scopes.lookup(root, "z", Namespace::VAR), Some(Decl::Let(z)));
  assert_eq!(scopes.lookup(root, "M", Namespace::MODULE), Some(Decl::Module(m)));
  assert_eq!(scopes.of_dec(x), root);
  assert_eq!(scopes.of_dec(if_), root);
}

#[test]
fn modules() {
  let mut b = Builder::default();
  let one = b.int(1);
  let x = b.val("x", None, one);
  let inner = b.module("B", vec![x]);
  let outer = b.module("A", vec![inner]);
  let scopes = Scopes::get(&b.arenas, &[outer]);
  let a = scopes.child_module(Module::Root, "A");
  assert_eq!(a, Some(Module::Dec(outer)));
  let b_mod = a.and_then(|a| scopes.child_module(a, "B"));
  assert_eq!(b_mod, Some(Module::Dec(inner)));
  assert_eq!(scopes.child_module(Module::Root, "B"), None);
  assert_eq!(scopes.parent_module(Module::Dec(inner)), Some(Module::Dec(outer)));
  assert_eq!(scopes.parent_module(Module::Dec(outer)), Some(Module::Root));
  assert_eq!(scopes.parent_module(Module::Root), None);
  assert_eq!(scopes.dec_module(x), Module::Dec(inner));
  assert_eq!(scopes.exp_module(one), Module::Dec(inner));
}

#[test]
fn namespace_display() {
  assert_eq!(Namespace::TYPE.union(Namespace::VAR).to_string(), "value or type");
  assert_eq!(Namespace::CLASS.to_string(), "class");
}
