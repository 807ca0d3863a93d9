use crate::check::Builder;

/// `let name : Int = "s"`, which has one type error.
fn bad(b: &mut Builder, name: &str) -> bolt_hir::DecIdx {
  let int = b.t_name("Int");
  let s = b.string("s");
  b.val(name, Some(int), s)
}

fn bad_decs(b: &mut Builder, n: usize) -> Vec<bolt_hir::DecIdx> {
  (0..n).map(|i| bad(b, &format!("a{i}"))).collect()
}

#[test]
fn default_limit() {
  let mut b = Builder::default();
  let decs = bad_decs(&mut b, 7);
  let c = b.check(&decs);
  cov_mark::check("skip_solve");
  assert!(c.codes().iter().all(|code| *code == diagnostic::Code::n(5006)));
  assert_eq!(c.statics.errors.len(), config::Statics::DEFAULT_MAX_TYPE_ERRORS);
}

#[test]
fn under_limit() {
  let mut b = Builder::default();
  let decs = bad_decs(&mut b, 4);
  let c = b.check(&decs);
  cov_mark::check_not("skip_solve");
  assert_eq!(c.codes().len(), 4);
}

#[test]
fn configured() {
  let mut b = Builder::default();
  let decs = bad_decs(&mut b, 4);
  let cfg = config::Statics { max_type_errors: 2, ..Default::default() };
  let c = b.check_with(cfg, &decs);
  assert_eq!(c.codes().len(), 2);
  assert!(c.codes().iter().all(|code| *code == diagnostic::Code::n(5006)));
}

#[test]
fn other_errors_not_counted() {
  let mut b = Builder::default();
  let mut decs = bad_decs(&mut b, 2);
  for name in ["y1", "y2", "y3"] {
    let exp = b.var(name);
    decs.push(b.val(&format!("x_{name}"), None, exp));
  }
  let cfg = config::Statics { max_type_errors: 1, ..Default::default() };
  let c = b.check_with(cfg, &decs);
  let codes: Vec<_> = [5006, 5001, 5001, 5001].into_iter().map(diagnostic::Code::n).collect();
  assert_eq!(c.codes(), codes);
  assert_eq!(c.statics.errors.iter().filter(|e| e.is_type_error()).count(), 1);
}
