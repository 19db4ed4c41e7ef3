//! Edge extraction: turning a content's metadata into incoming/outgoing edge sets.

use crate::content::{metadata_get, Content};
use crate::edge::{Edge, EdgeSpec, Edges, Scalar, Selector};
use crate::error::{GraphRetrieverError, Result};

/// A content → edges mapping. Implemented by `MetadataEdgeFunction` for the
/// declarative `EdgeSpec` schema, and by any closure for callers who want to
/// supply edge logic directly.
pub trait EdgeFunction: Send + Sync {
    fn extract(&self, content: &Content) -> Edges;
}

impl<F> EdgeFunction for F
where
    F: Fn(&Content) -> Edges + Send + Sync,
{
    fn extract(&self, content: &Content) -> Edges {
        self(content)
    }
}

/// Extracts edges from a set of declarative `EdgeSpec`s.
///
/// For outgoing edges: resolve the source selector against the content; if
/// it's a scalar, emit one edge keyed by the target selector; if it's an
/// array, emit one edge per scalar element (non-scalar elements are skipped
/// with a diagnostic). For incoming edges, the same rule applies with source
/// and target swapped, making the schema symmetric.
#[derive(Clone)]
pub struct MetadataEdgeFunction {
    specs: Vec<EdgeSpec>,
}

impl MetadataEdgeFunction {
    /// Fails with `MissingEdges` if `specs` is empty — a traversal with no
    /// edge schema at all can never expand past its seed.
    pub fn new(specs: Vec<EdgeSpec>) -> Result<Self> {
        if specs.is_empty() {
            return Err(GraphRetrieverError::MissingEdges);
        }
        Ok(Self { specs })
    }
}

impl EdgeFunction for MetadataEdgeFunction {
    fn extract(&self, content: &Content) -> Edges {
        let mut edges = Edges::default();
        for spec in &self.specs {
            extract_one_direction(content, &spec.source, &spec.target, &mut edges.outgoing);
            extract_one_direction(content, &spec.target, &spec.source, &mut edges.incoming);
        }
        edges
    }
}

/// Resolve `resolve_selector` against `content`; for each scalar value found,
/// emit an edge keyed by `key_selector` into `out`.
fn extract_one_direction(
    content: &Content,
    resolve_selector: &Selector,
    key_selector: &Selector,
    out: &mut std::collections::HashSet<Edge>,
) {
    let Some(resolved) = resolve(content, resolve_selector) else {
        return;
    };

    match resolved.as_array() {
        Some(items) => {
            for item in items {
                match Scalar::from_value(item) {
                    Some(scalar) => {
                        out.insert(make_edge(key_selector, scalar));
                    }
                    None => {
                        tracing::warn!(
                            field = resolve_selector.as_str(),
                            "skipping non-scalar array element during edge extraction"
                        );
                    }
                }
            }
        }
        None => {
            if let Some(scalar) = Scalar::from_value(&resolved) {
                out.insert(make_edge(key_selector, scalar));
            }
        }
    }
}

fn resolve(content: &Content, selector: &Selector) -> Option<serde_json::Value> {
    match selector {
        Selector::Id => Some(serde_json::Value::String(content.id.clone())),
        Selector::Field(field) => metadata_get(&content.metadata, field).cloned(),
    }
}

fn make_edge(key_selector: &Selector, value: Scalar) -> Edge {
    match key_selector {
        Selector::Id => Edge::Id {
            id: match &value {
                Scalar::String(s) => s.clone(),
                other => other.to_value().to_string(),
            },
        },
        Selector::Field(field) => Edge::Metadata {
            field: field.clone(),
            value,
        },
    }
}
