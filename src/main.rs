use kn_sampler::generator::TreeGrowthGenerator;
use kn_sampler::io::EdgeListWriter;
use kn_sampler::logging::{init_logger, level_for_verbosity};
use kn_sampler::remover::RetryLimit;
use kn_sampler::{complete_graph, random_tree, ConstrainedEdgeRemover, EdgeList, GenerationError};
use rand::prelude::StdRng;
use rand::SeedableRng;
use std::fs::OpenOptions;
use std::io;
use std::io::stdout;
use std::path::PathBuf;
use structopt::StructOpt;

#[cfg(not(target_env = "msvc"))]
use jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "kn-sampler-cli",
    about = "Samples a sparse graph on n vertices by removing random edges from K_n."
)]
struct Opt {
    /// Number of vertices.
    n: usize,

    /// Number of edges to keep. Defaults to n - 1.
    m: Option<usize>,

    /// Output file. `stdout` if not specified.
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Seed for the random number generator.
    #[structopt(short, long)]
    seed: Option<u64>,

    /// Consecutive rejected draws before giving up.
    #[structopt(long, conflicts_with = "unbounded")]
    max_retries: Option<usize>,

    /// Retry forever instead of giving up.
    #[structopt(long)]
    unbounded: bool,

    /// Only remove edges that keep the graph connected.
    #[structopt(short, long)]
    connected: bool,

    /// Grow a random spanning tree instead of thinning K_n.
    #[structopt(long, conflicts_with = "connected")]
    grow: bool,

    /// Grow a random spanning tree by a random number of edges and ignore m.
    #[structopt(long, conflicts_with_all = &["grow", "connected", "tree"])]
    random_size: bool,

    /// Output a uniformly random labeled tree and ignore m.
    #[structopt(long, conflicts_with_all = &["grow", "connected"])]
    tree: bool,

    /// Log verbosity, repeat for more.
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn to_io(e: GenerationError) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

fn generate(opt: &Opt) -> Result<EdgeList, GenerationError> {
    if opt.tree {
        let mut rng: StdRng = match opt.seed {
            Some(seed) => SeedableRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        return random_tree(opt.n, &mut rng);
    }
    if opt.random_size {
        return TreeGrowthGenerator::new()
            .seed(opt.seed)
            .generate_unbounded(opt.n);
    }
    let m = opt.m.unwrap_or_else(|| opt.n.saturating_sub(1));
    if opt.grow {
        return TreeGrowthGenerator::new().seed(opt.seed).generate(opt.n, m);
    }
    let retry_limit = if opt.unbounded {
        RetryLimit::Unbounded
    } else {
        opt.max_retries.map(RetryLimit::Fixed).unwrap_or_default()
    };
    let edges = complete_graph(opt.n)?;
    ConstrainedEdgeRemover::new(m)
        .seed(opt.seed)
        .retry_limit(retry_limit)
        .preserve_connectivity(opt.connected)
        .remove(&edges, opt.n)
}

fn main() -> io::Result<()> {
    let opt = Opt::from_args();
    init_logger(level_for_verbosity(opt.verbose));

    #[cfg(feature = "handle-ctrlc")]
    kn_sampler::signals::install_interrupt_handler()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    let edges = generate(&opt).map_err(to_io)?;

    match opt.output {
        Some(path) => {
            let writer = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)?;
            EdgeListWriter::new(&edges, opt.n, writer).output()
        }
        None => {
            let writer = stdout();
            EdgeListWriter::new(&edges, opt.n, writer.lock()).output()
        }
    }
}
