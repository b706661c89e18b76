use crate::graph::Edge;
use std::io;
use std::io::Write;

/// Writes an edge list in the DIMACS-style line format read by external
/// edge-list loaders: a `p edge <n> <m>` header, then one `e <u> <v>` line
/// per edge with 1-based vertex labels.
pub struct EdgeListWriter<'a, W: Write> {
    edges: &'a [Edge],
    n: usize,
    writer: W,
}

impl<'a, W: Write> EdgeListWriter<'a, W> {
    pub fn new(edges: &'a [Edge], n: usize, writer: W) -> Self {
        Self { edges, n, writer }
    }

    pub fn output(mut self) -> io::Result<()> {
        writeln!(self.writer, "p edge {} {}", self.n, self.edges.len())?;
        for (u, v) in self.edges.iter() {
            writeln!(self.writer, "e {} {}", u + 1, v + 1)?;
        }
        self.writer.flush()
    }
}
