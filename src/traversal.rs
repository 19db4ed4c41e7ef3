//! `GraphTraversal`: the single-shot seed → expand → select → finalize
//! engine that ties an `Adapter`, an `EdgeFunction`, and a `Strategy`
//! together into one retrieval call.

use crate::adapter::{Adapter, GetOptions, SearchOptions};
use crate::content::Content;
use crate::edge::Edge;
use crate::error::{GraphRetrieverError, Result};
use crate::extractor::EdgeFunction;
use crate::math::cosine;
use crate::node::Node;
use crate::strategy::tracker::NodeTracker;
use crate::strategy::Strategy;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The seeding half of a traversal request: a natural-language query (the
/// adapter embeds it and the embedding it returns is what the rest of the
/// traversal scores against), any explicit ids to pull in regardless of
/// similarity, and how many similarity-ranked seeds to fetch.
#[derive(Debug, Clone)]
pub struct SeedQuery {
    pub query: String,
    pub ids: Vec<String>,
    pub k: usize,
}

impl SeedQuery {
    pub fn new(query: impl Into<String>, k: usize) -> Self {
        Self { query: query.into(), ids: Vec::new(), k }
    }

    pub fn with_ids(mut self, ids: Vec<String>) -> Self {
        self.ids = ids;
        self
    }
}

/// Builds a `GraphTraversal`. Every field but the three contracts (adapter,
/// edge function, strategy) has a sensible default.
pub struct TraversalBuilder {
    adapter: Arc<dyn Adapter>,
    edge_fn: Arc<dyn EdgeFunction>,
    strategy: Arc<dyn Strategy>,
    max_depth: Option<usize>,
    max_traverse: Option<usize>,
    expand_width: usize,
    metadata_filter: crate::adapter::MetadataFilter,
}

impl TraversalBuilder {
    pub fn new(adapter: Arc<dyn Adapter>, edge_fn: Arc<dyn EdgeFunction>, strategy: Arc<dyn Strategy>) -> Self {
        Self {
            adapter,
            edge_fn,
            strategy,
            max_depth: None,
            max_traverse: None,
            expand_width: crate::strategy::DEFAULT_SELECT_K,
            metadata_filter: crate::adapter::MetadataFilter::new(),
        }
    }

    /// Cap how deep the traversal goes from any seed.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Cap how many distinct outgoing edges, in total across the whole run,
    /// the engine will resolve via `Adapter::adjacent`.
    pub fn with_max_traverse(mut self, max_traverse: usize) -> Self {
        self.max_traverse = Some(max_traverse);
        self
    }

    /// How many contents to fetch per edge resolved.
    pub fn with_expand_width(mut self, width: usize) -> Self {
        self.expand_width = width;
        self
    }

    /// A metadata filter applied to every adapter call this traversal makes
    /// (seed fetch and edge resolution alike), conjoined where an edge also
    /// contributes its own field/value constraint.
    pub fn with_metadata_filter(mut self, filter: crate::adapter::MetadataFilter) -> Self {
        self.metadata_filter = filter;
        self
    }

    pub fn build(self) -> GraphTraversal {
        GraphTraversal {
            adapter: self.adapter,
            edge_fn: self.edge_fn,
            strategy: self.strategy,
            max_depth: self.max_depth,
            max_traverse: self.max_traverse,
            expand_width: self.expand_width,
            metadata_filter: self.metadata_filter,
            used: AtomicBool::new(false),
        }
    }
}

/// Convenience free function: build a traversal with defaults and run it
/// once. Equivalent to `TraversalBuilder::new(..).build().run(seeds)`.
pub async fn traverse(
    adapter: Arc<dyn Adapter>,
    edge_fn: Arc<dyn EdgeFunction>,
    strategy: Arc<dyn Strategy>,
    seeds: SeedQuery,
) -> Result<Vec<Node>> {
    TraversalBuilder::new(adapter, edge_fn, strategy).build().run(seeds).await
}

/// A single-shot traversal: seeds, expands outward round by round honoring
/// depth and edge budget, selects via the strategy each round, and finalizes
/// the accumulated result. `run` may be called at most once per instance;
/// a second call fails with `AlreadyUsed`.
pub struct GraphTraversal {
    adapter: Arc<dyn Adapter>,
    edge_fn: Arc<dyn EdgeFunction>,
    strategy: Arc<dyn Strategy>,
    max_depth: Option<usize>,
    max_traverse: Option<usize>,
    expand_width: usize,
    metadata_filter: crate::adapter::MetadataFilter,
    used: AtomicBool,
}

impl GraphTraversal {
    pub async fn run(&self, seeds: SeedQuery) -> Result<Vec<Node>> {
        if self.used.swap(true, Ordering::SeqCst) {
            return Err(GraphRetrieverError::AlreadyUsed);
        }

        tracing::debug!(k = seeds.k, ids = seeds.ids.len(), "fetching seeds");

        let (by_id, by_similarity) = tokio::join!(
            self.adapter.get(
                &seeds.ids,
                &GetOptions { filter: self.metadata_filter.clone() }
            ),
            self.adapter.search_with_embedding(
                &seeds.query,
                &SearchOptions::new()
                    .with_limit(seeds.k)
                    .with_filter(self.metadata_filter.clone()),
            ),
        );
        let by_id = by_id?;
        let (query_embedding, by_similarity) = by_similarity?;

        let mut seed_contents = by_id;
        seed_contents.extend(by_similarity);
        let seed_contents = dedup_by_id(seed_contents);

        let mut tracker = NodeTracker::new(self.strategy.select_k(), self.max_depth);
        let mut edge_budget = self.max_traverse;
        let mut visited_edges: HashSet<Edge> = HashSet::new();

        let seed_nodes: Vec<Node> = seed_contents
            .into_iter()
            .filter(|c| !tracker.is_discovered(&c.id))
            .map(|c| self.wrap_content(c, 0, &query_embedding))
            .collect();

        self.strategy.iterate(seed_nodes, &query_embedding, &mut tracker);

        while !tracker.should_stop() {
            let frontier = tracker.drain_to_traverse();
            tracing::debug!(frontier = frontier.len(), "expanding traversal round");

            let mut parent_depths: HashMap<String, usize> = HashMap::new();
            let mut candidates: Vec<Content> = Vec::new();
            let mut any_edge_resolved = false;

            'frontier: for parent in &frontier {
                for edge in &parent.outgoing_edges {
                    if visited_edges.contains(edge) {
                        continue;
                    }
                    if edge_budget == Some(0) {
                        break 'frontier;
                    }
                    visited_edges.insert(edge.clone());
                    any_edge_resolved = true;
                    if let Some(budget) = edge_budget.as_mut() {
                        *budget -= 1;
                    }

                    let found = self.resolve_edge(edge, &query_embedding).await?;
                    for content in found {
                        parent_depths
                            .entry(content.id.clone())
                            .and_modify(|d| *d = (*d).min(parent.depth))
                            .or_insert(parent.depth);
                        candidates.push(content);
                    }
                }
            }

            if !any_edge_resolved {
                break;
            }

            let candidates = dedup_by_id(candidates);
            let candidate_nodes: Vec<Node> = candidates
                .into_iter()
                .filter(|c| !tracker.is_discovered(&c.id))
                .map(|c| {
                    let depth = parent_depths.get(&c.id).map(|d| d + 1).unwrap_or(0);
                    self.wrap_content(c, depth, &query_embedding)
                })
                .collect();

            self.strategy.iterate(candidate_nodes, &query_embedding, &mut tracker);

            if edge_budget == Some(0) {
                tracing::debug!("edge budget exhausted, stopping traversal");
                break;
            }
        }

        Ok(self.strategy.finalize_nodes(tracker.take_selected()))
    }

    async fn resolve_edge(&self, edge: &Edge, query_embedding: &[f32]) -> Result<Vec<Content>> {
        let options = crate::adapter::AdjacentOptions::new(self.expand_width)
            .with_filter(self.metadata_filter.clone());
        self.adapter.adjacent(edge, query_embedding, &options).await
    }

    fn wrap_content(&self, content: Content, depth: usize, query_embedding: &[f32]) -> Node {
        let similarity_score = cosine(&content.embedding, query_embedding);
        let edges = self.edge_fn.extract(&content);
        Node::new(content, depth, similarity_score, edges.incoming, edges.outgoing)
    }
}

/// Deduplicate by id, last write wins, preserving first-seen order —
/// the same rule `math::top_k` applies, factored out here since this call
/// site has no ranking to do, only merging.
fn dedup_by_id(contents: Vec<Content>) -> Vec<Content> {
    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<String, Content> = HashMap::new();
    for content in contents {
        if !by_id.contains_key(&content.id) {
            order.push(content.id.clone());
        }
        by_id.insert(content.id.clone(), content);
    }
    order.into_iter().filter_map(|id| by_id.remove(&id)).collect()
}
