//! Dependency analysis between `let` declarations.
//!
//! We walk the tree once, adding an edge `a -> b` whenever the body of `a` refers to `b`. The
//! strongly connected components of that graph are the groups of mutually recursive declarations,
//! which must be inferred together.

mod graph;

use bolt_hir::{Arenas, Body, Dec, DecIdx, Exp, ExpIdx, RecordExpRow, Root};
use bolt_scope::{Decl, Namespace, Scopes};
use fast_hash::{FxHashMap, FxHashSet};

/// The result of the analysis.
#[derive(Debug, Default)]
pub struct Groups {
  groups: Vec<Vec<DecIdx>>,
  group_of: FxHashMap<DecIdx, usize>,
  referenced_in_parent: FxHashSet<DecIdx>,
}

impl Groups {
  /// Returns the groups of mutually recursive declarations, such that every group comes after the
  /// groups it refers to. A declaration that is not recursive is a group by itself.
  #[must_use]
  pub fn groups(&self) -> &[Vec<DecIdx>] {
    &self.groups
  }

  /// Returns the group containing the declaration.
  #[must_use]
  pub fn group_of(&self, dec: DecIdx) -> Option<&[DecIdx]> {
    self.group_of.get(&dec).map(|&idx| self.groups[idx].as_slice())
  }

  /// Returns whether some declaration in a shallower scope than this one refers to it.
  #[must_use]
  pub fn is_referenced_in_parent_scope(&self, dec: DecIdx) -> bool {
    self.referenced_in_parent.contains(&dec)
  }
}

/// Analyzes the root.
#[must_use]
pub fn get(arenas: &Arenas, scopes: &Scopes, root: &Root) -> Groups {
  elapsed::log("bolt_analyser::get", || {
    let mut cx = Cx { arenas, scopes, graph: graph::Graph::default() };
    cx.get_decs(None, root);
    let Cx { graph, .. } = cx;
    let mut ret = Groups::default();
    for (src, dst) in graph.edges() {
      if scopes.depth(scopes.of_dec(src)) < scopes.depth(scopes.of_dec(dst)) {
        ret.referenced_in_parent.insert(dst);
      }
    }
    for group in graph.sccs() {
      log::trace!("group: {group:?}");
      let idx = ret.groups.len();
      for &dec in &group {
        ret.group_of.insert(dec, idx);
      }
      ret.groups.push(group);
    }
    ret
  })
}

struct Cx<'a> {
  arenas: &'a Arenas,
  scopes: &'a Scopes,
  graph: graph::Graph,
}

impl Cx<'_> {
  fn get_decs(&mut self, src: Option<DecIdx>, decs: &[DecIdx]) {
    for &dec in decs {
      self.get_dec(src, dec);
    }
  }

  fn get_dec(&mut self, src: Option<DecIdx>, dec: DecIdx) {
    let arenas = self.arenas;
    match &arenas.dec[dec] {
      Dec::Let(let_dec) => {
        self.graph.add_vertex(dec);
        match &let_dec.body {
          None => {}
          Some(Body::Exp(exp)) => self.get_exp(Some(dec), *exp),
          Some(Body::Block(decs)) => self.get_decs(Some(dec), decs),
        }
      }
      Dec::Module(bolt_hir::ModuleDec { decs, .. })
      | Dec::Class(bolt_hir::ClassDec { decs, .. })
      | Dec::Instance(bolt_hir::InstanceDec { decs, .. }) => self.get_decs(src, decs),
      Dec::Exp(exp) | Dec::Return(Some(exp)) => self.get_exp(src, *exp),
      Dec::If(cases) => {
        for case in cases {
          if let Some(test) = case.test {
            self.get_exp(src, test);
          }
          self.get_decs(src, &case.decs);
        }
      }
      Dec::Struct(_) | Dec::Enum(_) | Dec::Type(_) | Dec::Return(None) => {}
    }
  }

  fn get_exp(&mut self, src: Option<DecIdx>, exp: ExpIdx) {
    let arenas = self.arenas;
    match &arenas.exp[exp] {
      Exp::Lit(_) => {}
      // only unqualified references make edges.
      Exp::Path(path) => {
        if path.prefix().is_empty() {
          self.add_reference(src, exp, path.last().as_str());
        }
      }
      Exp::Member(exp, _) => self.get_exp(src, *exp),
      Exp::Call(func, args) => {
        self.get_exp(src, *func);
        for &arg in args {
          self.get_exp(src, arg);
        }
      }
      Exp::Record(_, rows) => {
        for row in rows {
          match row {
            RecordExpRow::Field(_, row_exp) => self.get_exp(src, *row_exp),
            RecordExpRow::Punned(name) => self.add_reference(src, exp, name.as_str()),
          }
        }
      }
      Exp::Tuple(exps) => {
        for &exp in exps {
          self.get_exp(src, exp);
        }
      }
      Exp::Match(head, arms) => {
        if let Some(head) = head {
          self.get_exp(src, *head);
        }
        for arm in arms {
          self.get_exp(src, arm.exp);
        }
      }
      Exp::Infix(lhs, op, rhs) => {
        self.get_exp(src, *lhs);
        self.add_reference(src, exp, op.as_str());
        self.get_exp(src, *rhs);
      }
    }
  }

  /// `at` is the expression the reference is written in, for its scope.
  fn add_reference(&mut self, src: Option<DecIdx>, at: ExpIdx, name: &str) {
    let Some(src) = src else { return };
    let scope = self.scopes.of_exp(at);
    match self.scopes.lookup(scope, name, Namespace::VAR) {
      Some(Decl::Let(dst)) => self.graph.add_edge(src, dst),
      // params, constructors, or unbound.
      Some(_) | None => {}
    }
  }
}
