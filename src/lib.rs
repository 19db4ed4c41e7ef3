//! Graph-augmented vector retrieval: dense-vector similarity search combined
//! with a metadata-induced document graph.
//!
//! # Core Concepts
//!
//! - **Content**: the immutable record a vector-store adapter returns —
//!   text, embedding, and metadata.
//! - **Edge**: a tagged connection between documents derived from metadata
//!   (`MetadataEdgeFunction`) rather than stored explicitly.
//! - **Adapter**: the vector-store contract (`search`, `get`, `adjacent`);
//!   `InMemoryAdapter` is the reference implementation.
//! - **Strategy**: the node-selection policy driving each expansion round
//!   (`Eager` breadth-first, `Scored` priority-ordered).
//! - **GraphTraversal**: the single-shot seed → expand → select → finalize
//!   engine tying the three together.
//!
//! # Example
//!
//! ```
//! use graph_retriever::adapter::memory::InMemoryAdapter;
//! use graph_retriever::edge::EdgeSpec;
//! use graph_retriever::extractor::MetadataEdgeFunction;
//! use graph_retriever::strategy::eager::Eager;
//! use graph_retriever::traversal::{SeedQuery, TraversalBuilder};
//! use std::sync::Arc;
//!
//! # async fn run() -> graph_retriever::error::Result<()> {
//! let adapter = Arc::new(InMemoryAdapter::new(|_: &str| vec![0.0, 0.0, 0.0]));
//! let edge_fn = Arc::new(MetadataEdgeFunction::new(vec![EdgeSpec::new("topic", "topic")?])?);
//! let strategy = Arc::new(Eager::default());
//!
//! let traversal = TraversalBuilder::new(adapter, edge_fn, strategy).build();
//! let _nodes = traversal.run(SeedQuery::new("a warm coastal city", 5)).await?;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod content;
pub mod edge;
pub mod error;
pub mod extractor;
pub mod graphbuild;
pub mod math;
pub mod node;
pub mod strategy;
pub mod traversal;

pub use adapter::Adapter;
pub use content::Content;
pub use edge::{Edge, EdgeSpec, Scalar, Selector};
pub use error::{GraphRetrieverError, Result};
pub use extractor::{EdgeFunction, MetadataEdgeFunction};
pub use graphbuild::DocumentGraph;
pub use node::{Annotations, Node};
pub use strategy::Strategy;
pub use traversal::{GraphTraversal, SeedQuery, TraversalBuilder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
