//! Offline graph building: materialize a full document graph from a content
//! set and an `EdgeFunction`, for callers who want community structure
//! rather than a single seeded traversal.

use crate::content::Content;
use crate::extractor::EdgeFunction;
use std::collections::{HashMap, HashSet};

/// A materialized, undirected document graph: every content's outgoing
/// edges are resolved against every other content's incoming edges (and
/// vice versa) to produce adjacency, independent of any single query.
pub struct DocumentGraph {
    ids: Vec<String>,
    adjacency: HashMap<String, HashSet<String>>,
}

impl DocumentGraph {
    /// Build the graph by extracting edges from every content and joining
    /// a content's outgoing edge set against every other content's incoming
    /// edge set (structural equality on `Edge`, via the canonical `Scalar`
    /// form) — an edge connects two documents exactly when one's outgoing
    /// set and the other's incoming set share a member.
    pub fn build(contents: &[Content], edge_fn: &dyn EdgeFunction) -> Self {
        let extracted: Vec<_> = contents
            .iter()
            .map(|c| (c.id.clone(), edge_fn.extract(c)))
            .collect();

        let ids: Vec<String> = extracted.iter().map(|(id, _)| id.clone()).collect();
        let mut adjacency: HashMap<String, HashSet<String>> =
            ids.iter().map(|id| (id.clone(), HashSet::new())).collect();

        for (source_id, source_edges) in &extracted {
            for (target_id, target_edges) in &extracted {
                if source_id == target_id {
                    continue;
                }
                if source_edges.outgoing.intersection(&target_edges.incoming).next().is_some() {
                    adjacency.get_mut(source_id).unwrap().insert(target_id.clone());
                    adjacency.get_mut(target_id).unwrap().insert(source_id.clone());
                }
            }
        }

        Self { ids, adjacency }
    }

    pub fn neighbors(&self, id: &str) -> Option<&HashSet<String>> {
        self.adjacency.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.ids.len()
    }

    /// Connected components of the undirected adjacency, via BFS from each
    /// unvisited node — the same shape as a standard graph-metrics utility,
    /// chosen over a weighted community-detection algorithm because this
    /// graph carries no edge weights to optimize over.
    pub fn communities(&self) -> Vec<HashSet<String>> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut components: Vec<HashSet<String>> = Vec::new();

        for id in &self.ids {
            if visited.contains(id.as_str()) {
                continue;
            }

            let mut component = HashSet::new();
            let mut stack = vec![id.as_str()];
            while let Some(current) = stack.pop() {
                if !visited.insert(current) {
                    continue;
                }
                component.insert(current.to_string());
                if let Some(neighbors) = self.adjacency.get(current) {
                    for neighbor in neighbors {
                        if !visited.contains(neighbor.as_str()) {
                            stack.push(neighbor.as_str());
                        }
                    }
                }
            }
            components.push(component);
        }

        components
    }
}
