use crate::datastructures::BitSet;
use crate::error::{GenerationError, Result};
use crate::graph::{canonical, Edge, EdgeList};
use fxhash::FxHashSet;

/// Adjacency view over a vertex range `[0, n)`, built from an edge list to
/// inspect the result of a generator.
#[derive(Clone, Debug)]
pub struct EdgeGraph {
    data: Vec<FxHashSet<usize>>,
    size: usize,
}

impl EdgeGraph {
    pub fn new(n: usize) -> Self {
        Self {
            data: vec![FxHashSet::default(); n],
            size: 0,
        }
    }

    pub fn from_edges(n: usize, edges: &[Edge]) -> Result<Self> {
        let mut graph = Self::new(n);
        for (u, v) in edges.iter().copied() {
            if u == v || u >= n || v >= n {
                return Err(GenerationError::invalid_edge(&format!(
                    "({}, {}) is not an edge on {} vertices",
                    u, v, n
                )));
            }
            if !graph.add_edge(u, v) {
                return Err(GenerationError::invalid_edge(&format!(
                    "({}, {}) appears twice",
                    u, v
                )));
            }
        }
        Ok(graph)
    }

    /// Inserts `{u, v}`, returns false if it was already present.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        if self.data[u].insert(v) {
            self.data[v].insert(u);
            self.size += 1;
            true
        } else {
            false
        }
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.data[u].contains(&v)
    }

    pub fn order(&self) -> usize {
        self.data.len()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn degree(&self, u: usize) -> usize {
        self.data[u].len()
    }

    pub fn min_degree(&self) -> Option<usize> {
        self.data.iter().map(|nb| nb.len()).min()
    }

    pub fn dfs(&self, u: usize) -> EdgeGraphDfs<'_> {
        let mut visited = BitSet::new(self.order());
        visited.set_bit(u);
        EdgeGraphDfs {
            graph: self,
            stack: vec![u],
            visited,
        }
    }

    pub fn is_connected(&self) -> bool {
        if self.data.is_empty() {
            return true;
        }
        self.dfs(0).count() == self.order()
    }

    pub fn is_tree(&self) -> bool {
        self.size + 1 == self.order() && self.is_connected()
    }

    /// Edges in canonical order.
    pub fn edges(&self) -> EdgeList {
        let mut edges: EdgeList = self
            .data
            .iter()
            .enumerate()
            .flat_map(|(u, nb)| {
                nb.iter()
                    .filter(move |v| u < **v)
                    .map(move |v| canonical(u, *v))
            })
            .collect();
        edges.sort_unstable();
        edges
    }
}

pub struct EdgeGraphDfs<'a> {
    graph: &'a EdgeGraph,
    stack: Vec<usize>,
    visited: BitSet,
}

impl<'a> Iterator for EdgeGraphDfs<'a> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        for c in self.graph.data[current].iter().copied() {
            if !self.visited.at(c) {
                self.stack.push(c);
                self.visited.set_bit(c);
            }
        }
        Some(current)
    }
}
