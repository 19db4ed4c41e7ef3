//! Error kinds raised across the traversal engine, edge extraction, and adapters.

use thiserror::Error;

/// Errors that can occur while building or running a graph-augmented retrieval.
#[derive(Debug, Error)]
pub enum GraphRetrieverError {
    /// An `EdgeSpec` selector was neither a non-empty field name nor the `$id` sentinel.
    #[error("edge spec selector must be a non-empty field name or `$id`")]
    InvalidEdgeSpec,

    /// Neither the traversal builder nor the call site supplied an edge schema.
    #[error("no edges supplied to traversal")]
    MissingEdges,

    /// A `GraphTraversal` was invoked more than once.
    #[error("traversal instance already used")]
    AlreadyUsed,

    /// Two embeddings compared by `cosine_matrix` had different widths.
    #[error("embedding dimensions differ: {0} vs {1}")]
    DimensionMismatch(usize, usize),

    /// An adapter's `adjacent` received an edge variant it does not know how to resolve.
    #[error("adapter received an edge variant it cannot handle")]
    UnsupportedEdge,

    /// A content/document conversion was attempted without an embedding.
    #[error("content is missing an embedding")]
    MissingEmbedding,

    /// A content/document conversion was attempted without an id.
    #[error("content is missing an id")]
    MissingId,

    /// The underlying vector store signaled a failure. No retry happens at this layer.
    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),
}

/// Opaque failure surfaced by a vector-store adapter implementation.
///
/// Adapters wrap their own backend errors in this type rather than exposing
/// their native error type through the `Adapter` trait.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AdapterError {
    message: String,
}

impl AdapterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GraphRetrieverError>;
