use crate::check::Builder;
use bolt_hir::DecIdx;

fn analyse(b: &Builder, root: &[DecIdx]) -> bolt_analyser::Groups {
  let scopes = bolt_scope::Scopes::get(&b.arenas, root);
  bolt_analyser::get(&b.arenas, &scopes, root)
}

#[test]
fn mutual() {
  let mut b = Builder::default();
  let g_ref = b.var("g");
  let x = b.var("x");
  let g_x = b.call(g_ref, vec![x]);
  let f = b.fun("f", &["x"], None, g_x);
  let f_ref = b.var("f");
  let y = b.var("y");
  let f_y = b.call(f_ref, vec![y]);
  let g = b.fun("g", &["y"], None, f_y);
  let f_ref = b.var("f");
  let one = b.int(1);
  let call = b.call(f_ref, vec![one]);
  let h = b.val("h", None, call);
  let groups = analyse(&b, &[h, f, g]);
  let fg = groups.group_of(f).expect("no group");
  assert_eq!(fg.len(), 2);
  assert!(fg.contains(&g));
  assert_eq!(groups.group_of(h), Some([h].as_slice()));
  let pos = |dec| groups.groups().iter().position(|group| group.contains(&dec));
  assert!(pos(f) < pos(h));
}

#[test]
fn params_are_not_edges() {
  let mut b = Builder::default();
  let x = b.var("x");
  let f = b.fun("f", &["x"], None, x);
  let one = b.int(1);
  let x_dec = b.val("x", None, one);
  let groups = analyse(&b, &[f, x_dec]);
  assert_eq!(groups.group_of(f), Some([f].as_slice()));
  assert_eq!(groups.group_of(x_dec), Some([x_dec].as_slice()));
}

#[test]
fn infix_op_is_edge() {
  let mut b = Builder::default();
  let a_1 = b.var("a");
  let a_2 = b.var("a");
  let body = b.infix(a_1, "<>", a_2);
  let user = b.fun("user", &["a"], None, body);
  let x = b.var("x");
  let op = b.fun("<>", &["x", "y"], None, x);
  let groups = analyse(&b, &[user, op]);
  let pos = |dec| groups.groups().iter().position(|group| group.contains(&dec));
  assert!(pos(op) < pos(user));
  assert_eq!(groups.group_of(user), Some([user].as_slice()));
}

#[test]
fn referenced_in_parent_scope() {
  let mut b = Builder::default();
  let y = b.var("y");
  let g = b.fun("g", &["y"], None, y);
  let g_ref = b.var("g");
  let one = b.int(1);
  let call = b.call(g_ref, vec![one]);
  let ret = b.ret(call);
  let f = b.fun_block("f", &[], vec![g, ret]);
  let f_ref = b.var("f");
  let h = b.val("h", None, f_ref);
  let groups = analyse(&b, &[f, h]);
  assert!(groups.is_referenced_in_parent_scope(g));
  assert!(!groups.is_referenced_in_parent_scope(f));
  assert!(!groups.is_referenced_in_parent_scope(h));
}
