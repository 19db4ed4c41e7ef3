//! Node: the traversal-time view of a `Content`.

use crate::content::{Content, Metadata};
use crate::edge::Edge;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

/// Strategy-written annotations layered onto a node's original metadata.
///
/// An explicit, narrow mapping rather than letting callers write arbitrary
/// keys directly into `Node::metadata` — this is the seam strategies use to
/// stamp `_depth`, `_similarity_score`, and `_score`, kept separate from the
/// document's own metadata so the two never collide silently.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotations(BTreeMap<String, Value>);

impl Annotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> Option<usize> {
        self.0.get("_depth").and_then(Value::as_u64).map(|v| v as usize)
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.0.insert("_depth".to_string(), Value::from(depth));
    }

    pub fn similarity_score(&self) -> Option<f32> {
        self.0
            .get("_similarity_score")
            .and_then(Value::as_f64)
            .map(|v| v as f32)
    }

    pub fn set_similarity_score(&mut self, score: f32) {
        self.0
            .insert("_similarity_score".to_string(), score_to_value(score));
    }

    pub fn score(&self) -> Option<f32> {
        self.0.get("_score").and_then(Value::as_f64).map(|v| v as f32)
    }

    pub fn set_score(&mut self, score: f32) {
        self.0.insert("_score".to_string(), score_to_value(score));
    }

    /// Escape hatch for strategy-specific annotations beyond the three named ones.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Merge this node's original metadata with its annotations, annotations
    /// winning on key conflicts — the shape downstream consumers expect.
    pub fn merged_with(&self, metadata: &Metadata) -> Metadata {
        let mut merged = metadata.clone();
        for (k, v) in &self.0 {
            merged.insert(k.clone(), v.clone());
        }
        merged
    }
}

fn score_to_value(score: f32) -> Value {
    serde_json::Number::from_f64(score as f64)
        .map(Value::Number)
        .unwrap_or(Value::from(0))
}

/// A traversal-time record built from a `Content`.
///
/// Created once when an id is first discovered; never mutated thereafter
/// except by writing into `annotations`.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    pub content: String,
    pub embedding: Vec<f32>,
    pub metadata: Metadata,
    /// `0` for seeds; otherwise `1 + min(depth(parent))` over the incoming
    /// edge that first discovered this node.
    pub depth: usize,
    /// Cosine similarity between `embedding` and the query embedding.
    pub similarity_score: f32,
    pub incoming_edges: HashSet<Edge>,
    pub outgoing_edges: HashSet<Edge>,
    pub annotations: Annotations,
}

impl Node {
    /// Build a node from a content, a depth, and its already-computed
    /// incoming/outgoing edges.
    pub fn new(
        content: Content,
        depth: usize,
        similarity_score: f32,
        incoming_edges: HashSet<Edge>,
        outgoing_edges: HashSet<Edge>,
    ) -> Self {
        Self {
            id: content.id,
            content: content.content,
            embedding: content.embedding,
            metadata: content.metadata,
            depth,
            similarity_score,
            incoming_edges,
            outgoing_edges,
            annotations: Annotations::new(),
        }
    }

    /// `metadata`, with `annotations` merged in (annotations win on conflict) —
    /// the shape external consumers expect per the retrieval entry point's
    /// output contract.
    pub fn output_metadata(&self) -> Metadata {
        self.annotations.merged_with(&self.metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(id: &str) -> Content {
        Content::new(id, "text", vec![1.0, 0.0, 0.0])
    }

    #[test]
    fn annotations_roundtrip_depth_and_score() {
        let mut ann = Annotations::new();
        ann.set_depth(2);
        ann.set_similarity_score(0.5);
        ann.set_score(1.25);

        assert_eq!(ann.depth(), Some(2));
        assert_eq!(ann.similarity_score(), Some(0.5));
        assert_eq!(ann.score(), Some(1.25));
    }

    #[test]
    fn output_metadata_prefers_annotations_on_conflict() {
        let mut metadata = Metadata::new();
        metadata.insert("category".to_string(), serde_json::json!("geo"));
        metadata.insert("_depth".to_string(), serde_json::json!("stale"));

        let node = Node::new(
            content("d1").with_metadata(metadata),
            0,
            1.0,
            HashSet::new(),
            HashSet::new(),
        );
        let mut node = node;
        node.annotations.set_depth(3);

        let merged = node.output_metadata();
        assert_eq!(merged.get("category"), Some(&serde_json::json!("geo")));
        assert_eq!(merged.get("_depth"), Some(&serde_json::json!(3)));
    }
}
