//! A directed graph of declarations, and its strongly connected components.

use bolt_hir::DecIdx;
use fast_hash::FxHashMap;

#[derive(Debug, Default)]
pub(crate) struct Graph {
  vertices: Vec<DecIdx>,
  index: FxHashMap<DecIdx, usize>,
  edges: Vec<Vec<usize>>,
}

impl Graph {
  pub(crate) fn add_vertex(&mut self, dec: DecIdx) -> usize {
    if let Some(&idx) = self.index.get(&dec) {
      return idx;
    }
    let idx = self.vertices.len();
    self.vertices.push(dec);
    self.edges.push(Vec::new());
    self.index.insert(dec, idx);
    idx
  }

  pub(crate) fn add_edge(&mut self, src: DecIdx, dst: DecIdx) {
    let src = self.add_vertex(src);
    let dst = self.add_vertex(dst);
    if !self.edges[src].contains(&dst) {
      self.edges[src].push(dst);
    }
  }

  pub(crate) fn edges(&self) -> impl Iterator<Item = (DecIdx, DecIdx)> + '_ {
    self.edges.iter().enumerate().flat_map(move |(src, dsts)| {
      dsts.iter().map(move |&dst| (self.vertices[src], self.vertices[dst]))
    })
  }

  /// Returns the strongly connected components, with every component after all the components it
  /// has edges to. Within a component, vertices are in the order they were added.
  pub(crate) fn sccs(&self) -> Vec<Vec<DecIdx>> {
    let mut st = Tarjan {
      graph: self,
      next_index: 0,
      index: vec![None; self.vertices.len()],
      low_link: vec![0; self.vertices.len()],
      on_stack: vec![false; self.vertices.len()],
      stack: Vec::new(),
      ret: Vec::new(),
    };
    for v in 0..self.vertices.len() {
      if st.index[v].is_none() {
        st.strong_connect(v);
      }
    }
    st.ret
  }
}

struct Tarjan<'a> {
  graph: &'a Graph,
  next_index: usize,
  index: Vec<Option<usize>>,
  low_link: Vec<usize>,
  on_stack: Vec<bool>,
  stack: Vec<usize>,
  ret: Vec<Vec<DecIdx>>,
}

impl Tarjan<'_> {
  fn strong_connect(&mut self, v: usize) {
    self.index[v] = Some(self.next_index);
    self.low_link[v] = self.next_index;
    self.next_index += 1;
    self.stack.push(v);
    self.on_stack[v] = true;
    for &w in &self.graph.edges[v] {
      match self.index[w] {
        None => {
          self.strong_connect(w);
          self.low_link[v] = self.low_link[v].min(self.low_link[w]);
        }
        Some(w_index) => {
          if self.on_stack[w] {
            self.low_link[v] = self.low_link[v].min(w_index);
          }
        }
      }
    }
    if Some(self.low_link[v]) != self.index[v] {
      return;
    }
    let mut component = Vec::new();
    while let Some(w) = self.stack.pop() {
      self.on_stack[w] = false;
      component.push(w);
      if w == v {
        break;
      }
    }
    component.sort_unstable();
    self.ret.push(component.into_iter().map(|w| self.graph.vertices[w]).collect());
  }
}
