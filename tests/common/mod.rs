//! Shared fixtures for the integration test suite.

use graph_retriever::content::{Content, Metadata};
use serde_json::json;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize a tracing subscriber once per test binary, the way the
/// teacher's own `tests/common` does for its spike investigations.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The embedding function worked examples use throughout: `E(t) = [len(t), 0, 0]`.
/// Deterministic and dependency-free, so traversal scenarios are reproducible
/// without an actual embedding model.
pub fn length_embedding(text: &str) -> Vec<f32> {
    vec![text.len() as f32, 0.0, 0.0]
}

fn metadata(pairs: &[(&str, serde_json::Value)]) -> Metadata {
    pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
}

/// A small four-document corpus with a mix of metadata-induced edges:
/// `d1` and `d2` share a `topic`; `d2` explicitly `mentions` `d3`; `d4` is
/// isolated. Embeddings follow `length_embedding` over each document's text.
pub fn sample_corpus() -> Vec<Content> {
    let docs = [
        ("d1", "alpha", json!("geo"), None),
        ("d2", "bravo-charlie", json!("geo"), Some("d3")),
        ("d3", "delta", json!("culture"), None),
        ("d4", "echo-foxtrot-golf", json!("culture"), None),
    ];

    docs.iter()
        .map(|(id, text, topic, mentions)| {
            let mut pairs = vec![("topic", topic.clone())];
            if let Some(m) = mentions {
                pairs.push(("mentions", json!(m)));
            }
            Content::new(*id, *text, length_embedding(text)).with_metadata(metadata(&pairs))
        })
        .collect()
}
