//! Adapter: the contract a vector-store backend implements.
//!
//! Thread-safe (`Send + Sync`) to support concurrent access from multiple
//! traversal rounds, following the same requirement the teacher places on
//! its own storage backends.

pub mod memory;

use crate::content::{Content, Metadata};
use crate::edge::Edge;
use crate::error::Result;
use crate::math::top_k;
use async_trait::async_trait;

/// Filter criteria for a metadata-equality query: `field -> required value`.
/// Matching follows `content::metadata_value_matches` (equality, or
/// array-contains when the stored value is an array).
pub type MetadataFilter = Metadata;

/// Options governing a similarity search.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub filter: MetadataFilter,
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Options governing a direct id lookup.
#[derive(Debug, Clone, Default)]
pub struct GetOptions {
    pub filter: MetadataFilter,
}

/// Options governing an `adjacent` edge resolution.
#[derive(Debug, Clone)]
pub struct AdjacentOptions {
    pub filter: MetadataFilter,
    pub limit: usize,
}

impl AdjacentOptions {
    pub fn new(limit: usize) -> Self {
        Self {
            filter: MetadataFilter::new(),
            limit,
        }
    }

    pub fn with_filter(mut self, filter: MetadataFilter) -> Self {
        self.filter = filter;
        self
    }
}

/// Generic adapter-level option bag, reserved for backend-specific
/// tuning knobs (e.g. an index name) that don't belong on the shared
/// contract. Deliberately a typed bag rather than open metadata, so a
/// typo in a key surfaces as "field unused" rather than silent no-op.
pub type AdapterOptions = Metadata;

/// The contract a vector-store backend implements.
///
/// `search`/`search_with_embedding`/`get` are the three primitive operations
/// a backend must support; `adjacent` has a default implementation in terms
/// of them, covering every `Edge` variant this crate defines today. A
/// backend only needs to override `adjacent` if it can resolve edges more
/// efficiently than "filter then fetch".
#[async_trait]
pub trait Adapter: Send + Sync {
    /// Similarity search against an already-computed query embedding.
    async fn search(&self, embedding: &[f32], options: &SearchOptions) -> Result<Vec<Content>>;

    /// Similarity search against a natural-language query: the adapter
    /// embeds `query` itself and returns the embedding it used alongside the
    /// ranked contents, so a caller that only has text can still obtain the
    /// embedding the rest of a traversal scores against.
    async fn search_with_embedding(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<(Vec<f32>, Vec<Content>)>;

    /// Direct lookup by id. Returns an empty vec for ids that don't exist
    /// or that fail the given filter.
    async fn get(&self, ids: &[String], options: &GetOptions) -> Result<Vec<Content>>;

    /// Resolve the contents reachable by a single edge from the current
    /// frontier.
    ///
    /// `Metadata` edges become a `search` call with the edge's field/value
    /// conjoined into `options.filter`; `Id` edges become a `get` for the
    /// named id, filtered the same way. The query embedding re-ranks the
    /// concatenated result and `options.limit` caps it, matching the
    /// contract every caller of `adjacent` relies on regardless of which
    /// edge variant was resolved.
    async fn adjacent(
        &self,
        edge: &Edge,
        query_embedding: &[f32],
        options: &AdjacentOptions,
    ) -> Result<Vec<Content>> {
        let found = match edge {
            Edge::Metadata { field, value } => {
                let mut filter = options.filter.clone();
                filter.insert(field.clone(), value.to_value());
                self.search(query_embedding, &SearchOptions::new().with_filter(filter))
                    .await?
            }
            Edge::Id { id } => {
                self.get(&[id.clone()], &GetOptions { filter: options.filter.clone() })
                    .await?
            }
        };
        Ok(top_k(found, query_embedding, options.limit))
    }
}
