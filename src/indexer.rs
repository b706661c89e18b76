use crate::error::{GenerationError, Result};
use crate::graph::Edge;
use std::ops::Range;

/// Bijection between the vertex pairs `(x, y)`, `x < y < n`, of the complete
/// graph K_n and the positions `[0, n(n-1)/2)` of its canonical edge list.
///
/// The canonical list holds, for every `x` in ascending order, the pairs
/// `(x, x + 1), ..., (x, n - 1)`. Row `x` therefore starts after the
/// `(n - 1) + (n - 2) + ... + (n - x) = x*n - x(x+1)/2` pairs of the rows
/// before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeIndexer {
    n: usize,
}

impl EdgeIndexer {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of edges of K_n.
    pub fn edge_count(&self) -> usize {
        self.n * self.n.saturating_sub(1) / 2
    }

    #[inline]
    fn row_start(&self, x: usize) -> usize {
        x * self.n - x * (x + 1) / 2
    }

    /// Position of `(x, y)` without bounds checks. Callers guarantee
    /// `x < y < n`.
    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        self.row_start(x) + (y - x - 1)
    }

    pub fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= y {
            return Err(GenerationError::invalid_edge(&format!(
                "({}, {}) is not canonical, x must be smaller than y",
                x, y
            )));
        }
        if y >= self.n {
            return Err(GenerationError::invalid_edge(&format!(
                "({}, {}) is out of range for {} vertices",
                x, y, self.n
            )));
        }
        Ok(self.offset(x, y))
    }

    /// Inverse of [`index`](Self::index).
    pub fn pair_at(&self, idx: usize) -> Result<Edge> {
        if idx >= self.edge_count() {
            return Err(GenerationError::invalid_edge(&format!(
                "index {} is out of range for {} edges",
                idx,
                self.edge_count()
            )));
        }
        // row_start is increasing on [0, n - 1), look for the last row
        // starting at or before idx
        let mut lo = 0;
        let mut hi = self.n - 1;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.row_start(mid) <= idx {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let x = lo;
        Ok((x, idx - self.row_start(x) + x + 1))
    }

    /// Positions of the pairs `(x, x + 1), ..., (x, n - 1)`.
    pub fn row(&self, x: usize) -> Result<Range<usize>> {
        if x >= self.n {
            return Err(GenerationError::invalid_edge(&format!(
                "vertex {} is out of range for {} vertices",
                x, self.n
            )));
        }
        let start = self.row_start(x);
        Ok(start..start + (self.n - 1 - x))
    }

    /// The edges of `x` towards larger endpoints, read directly off a full
    /// canonical edge list. Only meaningful while `edges` has not been
    /// shrunk.
    pub fn neighbors_above<'a>(&self, edges: &'a [Edge], x: usize) -> Result<&'a [Edge]> {
        if edges.len() != self.edge_count() {
            return Err(GenerationError::invalid_argument(&format!(
                "expected the full list of {} edges, got {}",
                self.edge_count(),
                edges.len()
            )));
        }
        Ok(&edges[self.row(x)?])
    }
}
