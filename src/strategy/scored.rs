//! `Scored`: priority-ordered expansion — each round keeps only the
//! highest-scoring candidates, bounded by `width` and `select_k`.

use crate::node::Node;
use crate::strategy::tracker::NodeTracker;
use crate::strategy::Strategy;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;

/// Orders candidates by a user-supplied `scorer` and keeps only the top
/// `width` per round (further capped by the tracker's remaining output
/// budget). `f32` isn't `Ord`, so entries carry a `total_cmp` based ordering
/// plus an insertion sequence to break exact ties deterministically rather
/// than leaving heap-pop order unspecified.
///
/// The default scorer reads `node.similarity_score`, which the engine has
/// already stamped against the query embedding before handing candidates to
/// `iterate` — a caller can supply any other pure function of `Node`
/// instead (e.g. one favoring shallower nodes).
#[derive(Clone)]
pub struct Scored {
    pub width: usize,
    select_k: usize,
    scorer: Arc<dyn Fn(&Node) -> f32 + Send + Sync>,
}

impl Scored {
    pub fn new(width: usize) -> Self {
        Self {
            width,
            select_k: crate::strategy::DEFAULT_SELECT_K,
            scorer: Arc::new(|node: &Node| node.similarity_score),
        }
    }

    pub fn with_select_k(mut self, select_k: usize) -> Self {
        self.select_k = select_k;
        self
    }

    pub fn with_scorer(mut self, scorer: impl Fn(&Node) -> f32 + Send + Sync + 'static) -> Self {
        self.scorer = Arc::new(scorer);
        self
    }
}

impl Default for Scored {
    fn default() -> Self {
        Self::new(crate::strategy::DEFAULT_SELECT_K)
    }
}

struct ScoredEntry {
    score: f32,
    seq: u64,
    node: Node,
}

impl PartialEq for ScoredEntry {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}
impl Eq for ScoredEntry {}

impl PartialOrd for ScoredEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScoredEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score.total_cmp(&other.score).then(self.seq.cmp(&other.seq))
    }
}

impl Strategy for Scored {
    fn select_k(&self) -> usize {
        self.select_k
    }

    fn iterate(&self, candidates: Vec<Node>, _query_embedding: &[f32], tracker: &mut NodeTracker) {
        let mut heap: BinaryHeap<ScoredEntry> = candidates
            .into_iter()
            .enumerate()
            .map(|(seq, node)| {
                let score = (self.scorer)(&node);
                ScoredEntry { score, seq: seq as u64, node }
            })
            .collect();

        let limit = tracker.num_remaining().min(self.width);
        let mut top = Vec::with_capacity(limit.min(heap.len()));
        while top.len() < limit {
            match heap.pop() {
                Some(mut entry) => {
                    entry.node.annotations.set_score(entry.score);
                    top.push(entry.node);
                }
                None => break,
            }
        }

        tracker.select_and_traverse(top);
    }

    fn finalize_nodes(&self, mut selected: Vec<Node>) -> Vec<Node> {
        selected.sort_by(|a, b| {
            let score_a = a.annotations.score().unwrap_or(f32::NEG_INFINITY);
            let score_b = b.annotations.score().unwrap_or(f32::NEG_INFINITY);
            score_b.total_cmp(&score_a)
        });
        selected.truncate(self.select_k);
        selected
    }
}
