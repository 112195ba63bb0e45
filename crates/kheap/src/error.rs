use thiserror::Error;

/// Contract violations reported by the heap, the search driver and the
/// DIMACS reader. None of these is recoverable inside the library.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("heap arity must be at least 2, got {0}")]
    InvalidArity(i64),

    #[error("slot {index} is out of range for a heap of size {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("heap is empty")]
    EmptyHeap,

    #[error("heap is full (capacity {0})")]
    HeapFull(usize),

    #[error("vertex {0} is already in the heap")]
    AlreadyPresent(usize),

    #[error("vertex {vertex} is out of range, ids must be below {limit}")]
    VertexOutOfRange { vertex: usize, limit: usize },

    #[error("line {line}: negative arc weight {weight}")]
    NegativeWeight { line: usize, weight: String },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("distance to vertex {vertex} reaches the unreachable sentinel")]
    DistanceOverflow { vertex: usize },

    /// Carries the rendered `std::io::Error`; the source is flattened so the
    /// enum stays `Clone + PartialEq` for tests.
    #[error("failed to read input: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, Error>;
