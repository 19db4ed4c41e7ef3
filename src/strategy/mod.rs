//! Strategy: how a traversal chooses which discovered nodes to keep
//! expanding, and how it shapes the final result set.

pub mod eager;
pub mod scored;
pub mod tracker;

use crate::node::Node;
use tracker::NodeTracker;

/// Default `selectK` a strategy uses when none is configured explicitly.
pub const DEFAULT_SELECT_K: usize = 10;

/// A pluggable node-selection policy for `GraphTraversal`.
///
/// One call to `iterate` corresponds to one expansion round: it's handed the
/// nodes freshly resolved from the current frontier's edges (already deduped
/// by the engine against ids seen in earlier rounds) and decides, via
/// `tracker`, which of them to add to the output and which to keep exploring
/// from. The query embedding is threaded in as a parameter rather than
/// stored as mutable strategy state — `Scored`'s default scorer reads
/// `node.similarity_score`, already stamped against the query embedding by
/// the engine before `iterate` runs, so a strategy object carries no
/// per-call state and stays reusable across concurrent traversals.
pub trait Strategy: Send + Sync {
    /// The output budget `NodeTracker` enforces for this strategy.
    fn select_k(&self) -> usize;

    /// Process one round of freshly discovered candidates, driving `tracker`
    /// (typically via `select_and_traverse`) to decide which are added to
    /// the output and which are queued for further expansion.
    fn iterate(&self, candidates: Vec<Node>, query_embedding: &[f32], tracker: &mut NodeTracker);

    /// Shape the accumulated, already `selectK`-bounded result set before
    /// it's returned to the caller. The default preserves insertion order.
    fn finalize_nodes(&self, selected: Vec<Node>) -> Vec<Node> {
        selected
    }
}

/// Per-call overrides layered onto a base strategy without mutating it.
///
/// `select_k` is the traversal's output budget. `with_k` is a legacy alias:
/// the external entry point historically accepted a bare `k` for `selectK`.
#[derive(Debug, Clone, Default)]
pub struct StrategyOverrides {
    pub select_k: Option<usize>,
}

impl StrategyOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_select_k(mut self, k: usize) -> Self {
        self.select_k = Some(k);
        self
    }

    /// Legacy alias for `with_select_k`.
    pub fn with_k(self, k: usize) -> Self {
        self.with_select_k(k)
    }
}

/// Build a strategy with overrides applied, as a decorator rather than a
/// mutable field on the strategy itself — an open strategy object mutated in
/// place by the engine would make strategies non-reusable across concurrent
/// traversals.
pub fn build(
    strategy: std::sync::Arc<dyn Strategy>,
    overrides: StrategyOverrides,
) -> std::sync::Arc<dyn Strategy> {
    match overrides.select_k {
        Some(k) => std::sync::Arc::new(OverriddenStrategy { inner: strategy, select_k: k }),
        None => strategy,
    }
}

struct OverriddenStrategy {
    inner: std::sync::Arc<dyn Strategy>,
    select_k: usize,
}

impl Strategy for OverriddenStrategy {
    fn select_k(&self) -> usize {
        self.select_k
    }

    fn iterate(&self, candidates: Vec<Node>, query_embedding: &[f32], tracker: &mut NodeTracker) {
        self.inner.iterate(candidates, query_embedding, tracker)
    }

    fn finalize_nodes(&self, selected: Vec<Node>) -> Vec<Node> {
        self.inner.finalize_nodes(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use std::collections::HashSet;
    use std::sync::Arc;

    struct PassThrough {
        select_k: usize,
    }
    impl Strategy for PassThrough {
        fn select_k(&self) -> usize {
            self.select_k
        }
        fn iterate(&self, candidates: Vec<Node>, _query_embedding: &[f32], tracker: &mut NodeTracker) {
            tracker.select_and_traverse(candidates);
        }
    }

    fn node(id: &str, score: f32) -> Node {
        let mut n = Node::new(Content::new(id, "text", vec![1.0]), 0, score, HashSet::new(), HashSet::new());
        n.similarity_score = score;
        n
    }

    #[test]
    fn default_finalize_preserves_insertion_order() {
        let strategy = PassThrough { select_k: 10 };
        let mut tracker = NodeTracker::new(strategy.select_k(), None);
        tracker.select(vec![node("a", 0.2), node("b", 0.9)]);
        let finalized = strategy.finalize_nodes(tracker.take_selected());
        assert_eq!(finalized[0].id, "a");
        assert_eq!(finalized[1].id, "b");
    }

    #[test]
    fn overridden_strategy_stops_the_tracker_early_at_select_k() {
        let base: Arc<dyn Strategy> = Arc::new(PassThrough { select_k: 10 });
        let overridden = build(base, StrategyOverrides::new().with_select_k(1));
        let mut tracker = NodeTracker::new(overridden.select_k(), None);

        overridden.iterate(vec![node("a", 0.2), node("b", 0.9)], &[1.0], &mut tracker);
        assert!(tracker.should_stop());

        let finalized = overridden.finalize_nodes(tracker.take_selected());
        assert_eq!(finalized.len(), 1);
        assert_eq!(finalized[0].id, "a");
    }
}
