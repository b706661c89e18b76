use crate::error::{GenerationError, Result};
use crate::graph::EdgeList;
use crate::indexer::EdgeIndexer;

/// All edges of K_n in canonical order, so that the edge at position `i`
/// is `EdgeIndexer::new(n).pair_at(i)`.
pub fn complete_graph(n: usize) -> Result<EdgeList> {
    if n < 1 {
        return Err(GenerationError::invalid_argument(
            "a complete graph needs at least one vertex",
        ));
    }
    let expected = EdgeIndexer::new(n).edge_count();
    let mut edges = Vec::with_capacity(expected);
    for x in 0..n {
        for y in (x + 1)..n {
            edges.push((x, y));
        }
    }
    if edges.len() != expected {
        return Err(GenerationError::invalid_argument(&format!(
            "generated {} edges for K_{}, expected {}",
            edges.len(),
            n,
            expected
        )));
    }
    Ok(edges)
}
