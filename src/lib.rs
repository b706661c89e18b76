macro_rules! impl_setter {
    ($self:ident, $field:ident, $type:ty) => {
        pub fn $field(mut $self, $field: $type) -> Self {
            $self.$field = $field;
            $self
        }
    };
}

pub(crate) mod datastructures;

pub mod complete;
pub mod error;
pub mod generator;
pub mod graph;
pub mod indexer;
pub mod io;
pub mod prufer;
pub mod remover;

#[cfg(feature = "log-progress")]
pub mod logging;
#[cfg(feature = "handle-ctrlc")]
pub mod signals;

pub use complete::complete_graph;
pub use error::{GenerationError, GenerationErrorKind, Result};
pub use graph::{Edge, EdgeGraph, EdgeList};
pub use indexer::EdgeIndexer;
pub use prufer::{decode_prufer, random_tree};
pub use remover::{ConstrainedEdgeRemover, RemovalObserver};
