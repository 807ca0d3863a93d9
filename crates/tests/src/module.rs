use crate::check::Builder;

/// ```text
/// module A
///   module B
///     let x = 1
///   module D
///     let y = B.x
/// module C
///   let z = A.B.x
/// ```
fn nested(b: &mut Builder) -> Vec<bolt_hir::DecIdx> {
  let one = b.int(1);
  let x = b.val("x", None, one);
  let module_b = b.module("B", vec![x]);
  let b_x = b.var("B.x");
  let y = b.val("y", None, b_x);
  let module_d = b.module("D", vec![y]);
  let module_a = b.module("A", vec![module_b, module_d]);
  let a_b_x = b.var("A.B.x");
  let z = b.val("z", None, a_b_x);
  let module_c = b.module("C", vec![z]);
  vec![module_a, module_c]
}

#[test]
fn backtrack() {
  let mut b = Builder::default();
  let mut decs = nested(&mut b);
  let a_b_x = b.var("A.B.x");
  let w = b.val("w", None, a_b_x);
  decs.push(w);
  let c = b.check(&decs);
  cov_mark::check("module_backtrack");
  c.assert_ok();
  assert_eq!(c.scheme("w"), "Int");
}

#[test]
fn direct() {
  let mut b = Builder::default();
  let one = b.int(1);
  let x = b.val("x", None, one);
  let m = b.module("M", vec![x]);
  let m_x = b.var("M.x");
  let w = b.val("w", None, m_x);
  let c = b.check(&[m, w]);
  cov_mark::check_not("module_backtrack");
  c.assert_ok();
  assert_eq!(c.scheme("w"), "Int");
}

#[test]
fn used_before_declared() {
  let mut b = Builder::default();
  let m_id = b.var("M.id");
  let one = b.int(1);
  let call = b.call(m_id, vec![one]);
  let w = b.val("w", None, call);
  let x = b.var("x");
  let id = b.fun("id", &["x"], None, x);
  let m = b.module("M", vec![id]);
  let c = b.check(&[w, m]);
  c.assert_ok();
  assert_eq!(c.scheme("w"), "Int");
}

#[test]
fn module_not_found() {
  let mut b = Builder::default();
  let mut decs = nested(&mut b);
  let a_z_x = b.var("A.Z.x");
  let w = b.val("w", None, a_z_x);
  decs.push(w);
  let c = b.check(&decs);
  c.assert_one(5002, "module not found: Z");
  assert_eq!(c.statics.errors[0].idx(), bolt_hir::Idx::from(a_z_x));
}

#[test]
fn module_not_found_first() {
  let mut b = Builder::default();
  let q_r_v = b.var("Q.R.v");
  let w = b.val("w", None, q_r_v);
  let c = b.check(&[w]);
  c.assert_one(5002, "module not found: Q (in path Q.R)");
}

#[test]
fn binding_not_found() {
  let mut b = Builder::default();
  let mut decs = nested(&mut b);
  let nope = b.var("A.B.nope");
  let w = b.val("w", None, nope);
  decs.push(w);
  let c = b.check(&decs);
  c.assert_one(5001, "binding not found: A.B.nope");
}

#[test]
fn qualified_type() {
  let mut b = Builder::default();
  let int = b.t_name("Int");
  let p = b.struct_("P", &[], vec![("x", int)]);
  let m = b.module("M", vec![p]);
  let m_p = b.t_name("M.P");
  let int = b.t_name("Int");
  let ann = b.t_arrow(vec![m_p], int);
  let q = b.var("q");
  let qx = b.member(q, &["x"]);
  let getx = b.fun("getx", &["q"], Some(ann), qx);
  let c = b.check(&[m, getx]);
  c.assert_ok();
  assert_eq!(c.scheme("getx"), "P -> Int");
}

#[test]
fn qualified_type_not_found() {
  let mut b = Builder::default();
  let m = b.module("M", Vec::new());
  let m_p = b.t_name("M.P");
  let one = b.int(1);
  let v = b.val("v", Some(m_p), one);
  let c = b.check(&[m, v]);
  c.assert_one(5001, "binding not found: M.P");
}
