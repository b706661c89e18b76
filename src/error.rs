use std::error::Error;
use std::fmt;

pub type Result<T> = std::result::Result<T, GenerationError>;

#[derive(Debug, Clone)]
pub struct GenerationError {
    kind: GenerationErrorKind,
    msg: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationErrorKind {
    /// A vertex count, target edge count or sequence violates its bounds.
    InvalidArgumentError,
    /// A vertex pair or edge index does not name an edge of K_n.
    InvalidEdgeError,
    /// The rejection sampler ran out of retries.
    InfeasibleSamplingError,
    /// The sampler observed a ctrl-c.
    Interrupted,
}

impl fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::InvalidArgumentError => f.write_str("InvalidArgumentError"),
            Self::InvalidEdgeError => f.write_str("InvalidEdgeError"),
            Self::InfeasibleSamplingError => f.write_str("InfeasibleSamplingError"),
            Self::Interrupted => f.write_str("Interrupted"),
        }
    }
}

impl GenerationError {
    pub(crate) fn new(kind: GenerationErrorKind, msg: &str) -> Self {
        Self {
            kind,
            msg: String::from(msg),
        }
    }

    pub(crate) fn invalid_argument(msg: &str) -> Self {
        Self::new(GenerationErrorKind::InvalidArgumentError, msg)
    }

    pub(crate) fn invalid_edge(msg: &str) -> Self {
        Self::new(GenerationErrorKind::InvalidEdgeError, msg)
    }

    pub fn kind(&self) -> GenerationErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.msg
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.msg)
    }
}

impl Error for GenerationError {}
