use crate::datastructures::BitSet;
use crate::error::{GenerationError, GenerationErrorKind, Result};
use crate::graph::{canonical, Edge, EdgeList};
use crate::indexer::EdgeIndexer;
#[cfg(feature = "log")]
use log::{debug, info};
use rand::prelude::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "handle-ctrlc")]
use crate::signals::received_ctrl_c;

pub const DEFAULT_RETRY_FACTOR: usize = 64;
#[cfg(feature = "log")]
const PROGRESS_INTERVAL: usize = 100;

/// Bound on the number of consecutive rejected draws before the sampler
/// gives up with `InfeasibleSamplingError`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryLimit {
    Unbounded,
    Fixed(usize),
    /// `factor * n * n` draws, so a single removable edge among all ordered
    /// pairs is still found with overwhelming probability.
    PerPair(usize),
}

impl Default for RetryLimit {
    fn default() -> Self {
        Self::PerPair(DEFAULT_RETRY_FACTOR)
    }
}

impl RetryLimit {
    fn resolve(&self, n: usize) -> Option<usize> {
        match *self {
            RetryLimit::Unbounded => None,
            RetryLimit::Fixed(limit) => Some(limit),
            RetryLimit::PerPair(factor) => Some(factor.saturating_mul(n).saturating_mul(n)),
        }
    }
}

/// Receives every accepted removal together with the number of edges left.
pub trait RemovalObserver {
    fn removed(&mut self, edge: Edge, remaining: usize);

    /// Called once per rejected draw.
    fn rejected(&mut self) {}
}

impl<F: FnMut(Edge, usize)> RemovalObserver for F {
    fn removed(&mut self, edge: Edge, remaining: usize) {
        self(edge, remaining)
    }
}

pub struct Silent;

impl RemovalObserver for Silent {
    fn removed(&mut self, _edge: Edge, _remaining: usize) {}
}

/// Thins the canonical edge list of K_n down to `target` edges by rejection
/// sampling. A candidate pair is accepted only if it is a real edge, has not
/// been removed yet and both endpoints keep at least one incident edge.
///
/// As long as `target >= n - 1` a removable edge always exists. If every
/// remaining edge touched a degree-1 vertex, mapping each edge to such an
/// endpoint would be injective, so there would be at most `n - 1` of them,
/// yet more than `target` remain. The same holds with
/// `preserve_connectivity`, since a connected graph with at least `n` edges
/// has a cycle and all cycle vertices have degree two or more.
#[derive(Clone, Debug)]
pub struct ConstrainedEdgeRemover {
    target: usize,
    seed: Option<u64>,
    retry_limit: RetryLimit,
    preserve_connectivity: bool,
}

struct RemovalState {
    indexer: EdgeIndexer,
    degrees: Vec<usize>,
    chosen: BitSet,
}

impl RemovalState {
    fn new(indexer: EdgeIndexer) -> Self {
        let n = indexer.n();
        Self {
            indexer,
            degrees: vec![n.saturating_sub(1); n],
            chosen: BitSet::new(indexer.edge_count()),
        }
    }

    fn present(&self, u: usize, v: usize) -> bool {
        let (x, y) = canonical(u, v);
        !self.chosen.at(self.indexer.offset(x, y))
    }

    /// Whether `x` and `y` stay connected once the edge `skip` is gone.
    /// Walks the live part of K_n through the indexer instead of an
    /// adjacency structure.
    fn connected_without(&self, x: usize, y: usize, skip: usize) -> bool {
        let n = self.indexer.n();
        let mut visited = BitSet::new(n);
        visited.set_bit(x);
        let mut stack = vec![x];
        while let Some(u) = stack.pop() {
            for w in 0..n {
                if w == u || visited.at(w) || !self.present(u, w) {
                    continue;
                }
                let (a, b) = canonical(u, w);
                if self.indexer.offset(a, b) == skip {
                    continue;
                }
                if w == y {
                    return true;
                }
                visited.set_bit(w);
                stack.push(w);
            }
        }
        false
    }

    fn remove(&mut self, idx: usize, v: usize, w: usize) {
        self.chosen.set_bit(idx);
        self.degrees[v] -= 1;
        self.degrees[w] -= 1;
    }
}

impl ConstrainedEdgeRemover {
    pub fn new(target: usize) -> Self {
        Self {
            target,
            seed: None,
            retry_limit: RetryLimit::default(),
            preserve_connectivity: false,
        }
    }

    impl_setter!(self, target, usize);
    impl_setter!(self, seed, Option<u64>);
    impl_setter!(self, retry_limit, RetryLimit);
    impl_setter!(self, preserve_connectivity, bool);

    fn validate(&self, edges: &[Edge], indexer: &EdgeIndexer) -> Result<()> {
        let n = indexer.n();
        if n < 1 {
            return Err(GenerationError::invalid_argument(
                "the graph needs at least one vertex",
            ));
        }
        if self.target < n - 1 {
            return Err(GenerationError::invalid_argument(&format!(
                "target of {} edges is below the n - 1 = {} edges of a spanning tree",
                self.target,
                n - 1
            )));
        }
        if edges.len() != indexer.edge_count() {
            return Err(GenerationError::invalid_argument(&format!(
                "expected the {} edges of K_{}, got {}",
                indexer.edge_count(),
                n,
                edges.len()
            )));
        }
        if self.target > edges.len() {
            return Err(GenerationError::invalid_argument(&format!(
                "target of {} edges exceeds the {} edges of K_{}",
                self.target,
                edges.len(),
                n
            )));
        }
        let mut expected = (0..n).flat_map(|x| ((x + 1)..n).map(move |y| (x, y)));
        if let Some(position) = edges.iter().position(|e| Some(*e) != expected.next()) {
            return Err(GenerationError::invalid_argument(&format!(
                "edge {:?} at position {} breaks the canonical order of K_{}",
                edges[position], position, n
            )));
        }
        Ok(())
    }

    /// Removes edges from the complete edge list of K_n until `target`
    /// remain. The survivors keep their canonical order.
    pub fn remove(&self, edges: &[Edge], n: usize) -> Result<EdgeList> {
        self.remove_observed(edges, n, &mut Silent)
    }

    pub fn remove_observed<O: RemovalObserver>(
        &self,
        edges: &[Edge],
        n: usize,
        observer: &mut O,
    ) -> Result<EdgeList> {
        let indexer = EdgeIndexer::new(n);
        self.validate(edges, &indexer)?;

        let mut rng: StdRng = match self.seed {
            Some(seed) => SeedableRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let max_retries = self.retry_limit.resolve(n);
        let mut state = RemovalState::new(indexer);
        let mut remaining = edges.len();
        let mut rejected = 0usize;

        #[cfg(feature = "log")]
        info!(
            "removing {} of {} edges on {} vertices",
            remaining - self.target,
            remaining,
            n
        );

        while remaining > self.target {
            #[cfg(feature = "handle-ctrlc")]
            if received_ctrl_c() {
                return Err(GenerationError::new(
                    GenerationErrorKind::Interrupted,
                    &format!("interrupted with {} edges remaining", remaining),
                ));
            }
            if let Some(limit) = max_retries {
                if rejected >= limit {
                    return Err(GenerationError::new(
                        GenerationErrorKind::InfeasibleSamplingError,
                        &format!(
                            "no removable edge found in {} draws with {} edges left and a target of {}",
                            limit, remaining, self.target
                        ),
                    ));
                }
            }

            let v = rng.gen_range(0..n);
            let w = rng.gen_range(0..n);
            let (x, y) = canonical(v, w);
            let removable = v != w
                && state.degrees[v] > 1
                && state.degrees[w] > 1
                && !state.chosen.at(indexer.offset(x, y))
                && (!self.preserve_connectivity
                    || state.connected_without(x, y, indexer.offset(x, y)));
            if !removable {
                rejected += 1;
                observer.rejected();
                continue;
            }

            let idx = indexer.offset(x, y);
            state.remove(idx, v, w);
            remaining -= 1;
            rejected = 0;
            observer.removed((x, y), remaining);

            #[cfg(feature = "log")]
            if state.chosen.cardinality() % PROGRESS_INTERVAL == 0 {
                debug!("{} edges remaining", remaining);
            }
        }

        debug_assert_eq!(state.chosen.cardinality(), edges.len() - self.target);
        #[cfg(feature = "log")]
        info!("removed {} edges", state.chosen.cardinality());

        Ok(edges
            .iter()
            .enumerate()
            .filter(|(idx, _)| !state.chosen.at(*idx))
            .map(|(_, e)| *e)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConstrainedEdgeRemover, RemovalObserver, RetryLimit};
    use crate::complete::complete_graph;
    use crate::error::GenerationErrorKind;
    use crate::graph::{Edge, EdgeGraph};
    use fxhash::FxHashSet;
    use proptest::prelude::*;

    fn check_result(n: usize, m: usize, result: &[Edge]) {
        assert_eq!(result.len(), m);
        let original: FxHashSet<Edge> = complete_graph(n).unwrap().into_iter().collect();
        assert!(result.iter().all(|e| original.contains(e)));
        let graph = EdgeGraph::from_edges(n, result).unwrap();
        assert!(graph.min_degree().unwrap() >= 1);
    }

    #[test]
    fn k5_down_to_seven() {
        let edges = complete_graph(5).unwrap();
        let result = ConstrainedEdgeRemover::new(7)
            .seed(Some(42))
            .remove(&edges, 5)
            .unwrap();
        check_result(5, 7, &result);
        let vertices: FxHashSet<usize> = result.iter().flat_map(|(u, v)| vec![*u, *v]).collect();
        assert_eq!(vertices.len(), 5);
    }

    #[test]
    fn full_target_is_identity() {
        let edges = complete_graph(8).unwrap();
        let mut calls = 0;
        let result = ConstrainedEdgeRemover::new(28)
            .remove_observed(&edges, 8, &mut |_: Edge, _: usize| calls += 1)
            .unwrap();
        assert_eq!(result, edges);
        assert_eq!(calls, 0);
    }

    #[test]
    fn target_below_spanning_tree() {
        let edges = complete_graph(5).unwrap();
        let err = ConstrainedEdgeRemover::new(3)
            .remove(&edges, 5)
            .unwrap_err();
        assert_eq!(err.kind(), GenerationErrorKind::InvalidArgumentError);
    }

    #[test]
    fn rejects_foreign_edge_lists() {
        let edges = complete_graph(5).unwrap();
        let remover = ConstrainedEdgeRemover::new(6);
        assert!(remover.remove(&edges[1..], 5).is_err());
        assert!(remover.remove(&edges, 6).is_err());
        let mut shuffled = edges.clone();
        shuffled.swap(0, 1);
        let err = remover.remove(&shuffled, 5).unwrap_err();
        assert_eq!(err.kind(), GenerationErrorKind::InvalidArgumentError);
        let err = ConstrainedEdgeRemover::new(11)
            .remove(&edges, 5)
            .unwrap_err();
        assert_eq!(err.kind(), GenerationErrorKind::InvalidArgumentError);
    }

    #[test]
    fn trivial_graphs() {
        assert!(ConstrainedEdgeRemover::new(0)
            .remove(&[], 1)
            .unwrap()
            .is_empty());
        assert_eq!(
            ConstrainedEdgeRemover::new(1).remove(&[(0, 1)], 2).unwrap(),
            vec![(0, 1)]
        );
        assert!(ConstrainedEdgeRemover::new(0).remove(&[], 0).is_err());
    }

    #[test]
    fn same_seed_same_graph() {
        let edges = complete_graph(20).unwrap();
        let remover = ConstrainedEdgeRemover::new(40).seed(Some(7));
        assert_eq!(
            remover.remove(&edges, 20).unwrap(),
            remover.remove(&edges, 20).unwrap()
        );
    }

    #[test]
    fn observer_sees_every_removal() {
        let edges = complete_graph(10).unwrap();
        let mut seen = Vec::new();
        let result = ConstrainedEdgeRemover::new(20)
            .seed(Some(3))
            .remove_observed(&edges, 10, &mut |e: Edge, remaining: usize| {
                seen.push((e, remaining))
            })
            .unwrap();
        assert_eq!(seen.len(), 25);
        assert_eq!(seen.last().unwrap().1, 20);
        for (e, _) in seen.iter() {
            assert!(!result.contains(e));
        }
    }

    #[test]
    fn retry_cap_exhaustion() {
        let edges = complete_graph(6).unwrap();
        let err = ConstrainedEdgeRemover::new(5)
            .seed(Some(1))
            .retry_limit(RetryLimit::Fixed(0))
            .remove(&edges, 6)
            .unwrap_err();
        assert_eq!(err.kind(), GenerationErrorKind::InfeasibleSamplingError);
    }

    /// Counts draws and records the rejection streak preceding each accept.
    #[derive(Default)]
    struct Tally {
        accepted: usize,
        draws: usize,
        streak: usize,
        streaks: Vec<usize>,
    }

    impl RemovalObserver for Tally {
        fn removed(&mut self, _edge: Edge, _remaining: usize) {
            self.accepted += 1;
            self.draws += 1;
            self.streaks.push(self.streak);
            self.streak = 0;
        }

        fn rejected(&mut self) {
            self.draws += 1;
            self.streak += 1;
        }
    }

    fn tally_run(limit: RetryLimit, tally: &mut Tally) -> crate::error::Result<Vec<Edge>> {
        let edges = complete_graph(20).unwrap();
        ConstrainedEdgeRemover::new(19)
            .seed(Some(9))
            .retry_limit(limit)
            .remove_observed(&edges, 20, tally)
    }

    #[test]
    fn retry_cap_counts_consecutive_rejections() {
        let mut reference = Tally::default();
        let expected = tally_run(RetryLimit::Unbounded, &mut reference).unwrap();
        let longest = *reference.streaks.iter().max().unwrap();
        assert_eq!(reference.accepted, 190 - 19);

        let mut capped = Tally::default();
        let result = tally_run(RetryLimit::Fixed(longest + 1), &mut capped).unwrap();
        assert_eq!(result, expected);
        assert_eq!(capped.draws, reference.draws);
        assert!(capped.draws > longest + 1);
    }

    #[test]
    fn retry_cap_fails_after_accepted_removals() {
        let mut reference = Tally::default();
        tally_run(RetryLimit::Unbounded, &mut reference).unwrap();
        let longest = *reference.streaks.iter().max().unwrap();
        let first_longest = reference
            .streaks
            .iter()
            .position(|s| *s == longest)
            .unwrap();

        let mut capped = Tally::default();
        let err = tally_run(RetryLimit::Fixed(longest), &mut capped).unwrap_err();
        assert_eq!(err.kind(), GenerationErrorKind::InfeasibleSamplingError);
        assert_eq!(capped.accepted, first_longest);
        assert!(capped.accepted > 0);
        assert_eq!(capped.streak, longest);
    }

    #[test]
    fn retry_limit_resolution() {
        assert_eq!(RetryLimit::PerPair(3).resolve(10), Some(300));
        assert_eq!(RetryLimit::default().resolve(5), Some(64 * 25));
        assert_eq!(RetryLimit::Fixed(7).resolve(10), Some(7));
        assert_eq!(RetryLimit::Unbounded.resolve(10), None);
        assert_eq!(RetryLimit::PerPair(2).resolve(usize::MAX), Some(usize::MAX));
    }

    #[test]
    fn unbounded_retries_still_terminate_on_spanning_target() {
        let edges = complete_graph(12).unwrap();
        let result = ConstrainedEdgeRemover::new(11)
            .seed(Some(11))
            .retry_limit(RetryLimit::Unbounded)
            .remove(&edges, 12)
            .unwrap();
        check_result(12, 11, &result);
    }

    #[test]
    fn preserved_connectivity_down_to_a_tree() {
        for seed in 0..10 {
            let edges = complete_graph(15).unwrap();
            let result = ConstrainedEdgeRemover::new(14)
                .seed(Some(seed))
                .preserve_connectivity(true)
                .remove(&edges, 15)
                .unwrap();
            let graph = EdgeGraph::from_edges(15, &result).unwrap();
            assert!(graph.is_tree());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn keeps_m_distinct_edges_without_isolated_vertices(
            n in 4usize..25,
            extra in any::<usize>(),
            seed in any::<u64>(),
        ) {
            let full = n * (n - 1) / 2;
            let m = n - 1 + extra % (full - n + 2);
            let edges = complete_graph(n).unwrap();
            let result = ConstrainedEdgeRemover::new(m)
                .seed(Some(seed))
                .remove(&edges, n)
                .unwrap();
            check_result(n, m, &result);
            prop_assert!(result.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
