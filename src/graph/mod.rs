pub use edge_graph::{EdgeGraph, EdgeGraphDfs};

mod edge_graph;

/// An undirected edge, canonically stored as `(min, max)`.
pub type Edge = (usize, usize);

/// Ordered sequence of canonical edges.
pub type EdgeList = Vec<Edge>;

#[inline]
pub fn canonical(u: usize, v: usize) -> Edge {
    if u < v {
        (u, v)
    } else {
        (v, u)
    }
}
