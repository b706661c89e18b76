use crate::error::{GenerationError, Result};
use crate::graph::{canonical, EdgeList};
use rand::Rng;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Decodes a Pruefer sequence of length `n - 2` into the `n - 1` edges of
/// the labeled tree on `[0, n)` it encodes. Every step joins the smallest
/// current leaf to the next label of the sequence.
pub fn decode_prufer(sequence: &[usize]) -> Result<EdgeList> {
    let n = sequence.len() + 2;
    if let Some(label) = sequence.iter().find(|v| **v >= n) {
        return Err(GenerationError::invalid_argument(&format!(
            "label {} is out of range for a sequence encoding {} vertices",
            label, n
        )));
    }

    let mut degrees = vec![1usize; n];
    for v in sequence {
        degrees[*v] += 1;
    }
    let mut leaves: BinaryHeap<Reverse<usize>> = degrees
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 1)
        .map(|(v, _)| Reverse(v))
        .collect();

    let mut edges = Vec::with_capacity(n - 1);
    for v in sequence.iter().copied() {
        // a sequence of length n - 2 always leaves a leaf to take
        let Reverse(leaf) = match leaves.pop() {
            Some(leaf) => leaf,
            None => break,
        };
        edges.push(canonical(leaf, v));
        degrees[leaf] -= 1;
        degrees[v] -= 1;
        if degrees[v] == 1 {
            leaves.push(Reverse(v));
        }
    }

    match (leaves.pop(), leaves.pop()) {
        (Some(Reverse(u)), Some(Reverse(v))) => edges.push(canonical(u, v)),
        _ => {
            return Err(GenerationError::invalid_argument(
                "sequence did not leave two final leaves",
            ))
        }
    }
    Ok(edges)
}

pub fn random_prufer_sequence<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    (0..n.saturating_sub(2)).map(|_| rng.gen_range(0..n)).collect()
}

/// Uniformly random labeled tree on `n` vertices.
pub fn random_tree<R: Rng>(n: usize, rng: &mut R) -> Result<EdgeList> {
    match n {
        0 => Err(GenerationError::invalid_argument(
            "a tree needs at least one vertex",
        )),
        1 => Ok(Vec::new()),
        _ => decode_prufer(&random_prufer_sequence(n, rng)),
    }
}
