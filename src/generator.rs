use crate::complete::complete_graph;
use crate::error::{GenerationError, Result};
use crate::graph::{EdgeGraph, EdgeList};
use crate::indexer::EdgeIndexer;
use crate::prufer::random_tree;
use crate::remover::ConstrainedEdgeRemover;
#[cfg(feature = "log")]
use log::info;
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};

fn check_bounds(n: usize, m: usize) -> Result<()> {
    if n < 1 {
        return Err(GenerationError::invalid_argument(
            "the graph needs at least one vertex",
        ));
    }
    let full = EdgeIndexer::new(n).edge_count();
    if m < n - 1 || m > full {
        return Err(GenerationError::invalid_argument(&format!(
            "a connected graph on {} vertices has between {} and {} edges, requested {}",
            n,
            n - 1,
            full,
            m
        )));
    }
    Ok(())
}

/// Builds connected graphs bottom-up: a uniformly random spanning tree
/// grown by random non-edges until the requested size is reached.
#[derive(Clone, Debug, Default)]
pub struct TreeGrowthGenerator {
    seed: Option<u64>,
}

impl TreeGrowthGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    impl_setter!(self, seed, Option<u64>);

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => SeedableRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Connected graph with exactly `m` edges on `[0, n)`, in canonical
    /// order.
    pub fn generate(&self, n: usize, m: usize) -> Result<EdgeList> {
        check_bounds(n, m)?;
        let mut rng = self.rng();
        grow(n, m, &mut rng)
    }

    /// Connected graph on `[0, n)` whose number of extra edges on top of the
    /// spanning tree is uniform in `[0, n(n-1)/2 - (n-1))`, so the result is
    /// never complete. Graphs on fewer than three vertices have no room for
    /// extra edges and come out as trees.
    pub fn generate_unbounded(&self, n: usize) -> Result<EdgeList> {
        check_bounds(n, n.saturating_sub(1))?;
        let mut rng = self.rng();
        let spare = EdgeIndexer::new(n).edge_count() - (n - 1);
        let extra = if spare > 0 { rng.gen_range(0..spare) } else { 0 };
        grow(n, n - 1 + extra, &mut rng)
    }
}

/// Random spanning tree plus random non-edges until `m` edges are present.
/// Callers guarantee `n - 1 <= m <= n(n-1)/2`.
fn grow<R: Rng>(n: usize, m: usize, rng: &mut R) -> Result<EdgeList> {
    let tree = random_tree(n, rng)?;
    let mut graph = EdgeGraph::from_edges(n, &tree)?;

    #[cfg(feature = "log")]
    info!("growing a tree on {} vertices to {} edges", n, m);

    let mut candidates: Vec<Vec<usize>> = (0..n)
        .map(|v| (0..n).filter(|w| *w != v && !graph.has_edge(v, *w)).collect())
        .collect();
    let mut matchable: Vec<usize> = (0..n).collect();

    while graph.size() < m {
        let v_idx = rng.gen_range(0..matchable.len());
        let v = matchable[v_idx];
        if candidates[v].is_empty() {
            matchable.swap_remove(v_idx);
            continue;
        }
        let w_idx = rng.gen_range(0..candidates[v].len());
        let w = candidates[v].swap_remove(w_idx);
        if let Some(pos) = candidates[w].iter().position(|u| *u == v) {
            candidates[w].swap_remove(pos);
        }
        graph.add_edge(v, w);
    }
    Ok(graph.edges())
}

/// Connected graph with exactly `m` edges obtained by thinning K_n while
/// keeping it connected.
pub fn pruned_connected(n: usize, m: usize, seed: Option<u64>) -> Result<EdgeList> {
    check_bounds(n, m)?;
    let edges = complete_graph(n)?;
    ConstrainedEdgeRemover::new(m)
        .seed(seed)
        .preserve_connectivity(true)
        .remove(&edges, n)
}
