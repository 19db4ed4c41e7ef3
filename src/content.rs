//! Content: the immutable record a vector-store adapter returns.

use crate::error::{GraphRetrieverError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON-like metadata mapping: scalars, arrays, and nested mappings.
pub type Metadata = Map<String, Value>;

/// An immutable record returned by an adapter.
///
/// Invariant: `id` uniquely identifies a logical document within a store;
/// embeddings from the same store share a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Unique identifier within the originating store.
    pub id: String,
    /// The document's text.
    pub content: String,
    /// Dense embedding vector.
    pub embedding: Vec<f32>,
    /// Arbitrary JSON-like metadata.
    #[serde(default)]
    pub metadata: Metadata,
    /// MIME type of `content`. Adapters should emit `text/plain` unless they
    /// know otherwise.
    #[serde(default = "default_mime_type")]
    pub mime_type: String,
}

fn default_mime_type() -> String {
    "text/plain".to_string()
}

impl Content {
    /// Build a `Content` directly, assuming `id` and `embedding` are already known good.
    pub fn new(id: impl Into<String>, content: impl Into<String>, embedding: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            embedding,
            metadata: Metadata::new(),
            mime_type: default_mime_type(),
        }
    }

    /// Attach metadata (builder style).
    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Set the MIME type (builder style).
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    /// Convert loose parts (as they'd arrive from an upstream document-preparation
    /// step) into a `Content`, enforcing the two invariants spec callers rely on:
    /// an id must be present, and an embedding must be present.
    pub fn try_new(
        id: impl Into<String>,
        content: impl Into<String>,
        embedding: Option<Vec<f32>>,
        metadata: Metadata,
        mime_type: Option<String>,
    ) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(GraphRetrieverError::MissingId);
        }
        let embedding = embedding.ok_or(GraphRetrieverError::MissingEmbedding)?;
        Ok(Self {
            id,
            content: content.into(),
            embedding,
            metadata,
            mime_type: mime_type.unwrap_or_else(default_mime_type),
        })
    }

    /// Look up `field` in this content's metadata, following dotted paths
    /// (`"a.b"`) into nested mappings.
    pub fn metadata_get(&self, field: &str) -> Option<&Value> {
        metadata_get(&self.metadata, field)
    }
}

/// Resolve a dotted path (`"a.b.c"`) against a metadata mapping.
pub fn metadata_get<'a>(metadata: &'a Metadata, path: &str) -> Option<&'a Value> {
    let mut current: &Value = metadata.get(path.split('.').next()?)?;
    let mut segments = path.split('.');
    segments.next();
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Does `value` (the content-side metadata value) match `filter_value`
/// (the value named by a filter or edge constraint)?
///
/// Equal scalars match. An array-valued `value` matches if `filter_value`
/// is one of its elements.
pub fn metadata_value_matches(value: &Value, filter_value: &Value) -> bool {
    if value == filter_value {
        return true;
    }
    if let Some(items) = value.as_array() {
        return items.iter().any(|item| item == filter_value);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dotted_path_resolves_nested_field() {
        let mut metadata = Metadata::new();
        metadata.insert(
            "a".to_string(),
            json!({ "b": "value" }),
        );
        assert_eq!(metadata_get(&metadata, "a.b"), Some(&json!("value")));
    }

    #[test]
    fn missing_field_resolves_to_none() {
        let metadata = Metadata::new();
        assert_eq!(metadata_get(&metadata, "missing"), None);
    }

    #[test]
    fn array_value_matches_element() {
        let value = json!(["geo", "landmark"]);
        assert!(metadata_value_matches(&value, &json!("geo")));
        assert!(!metadata_value_matches(&value, &json!("culture")));
    }

    #[test]
    fn scalar_value_matches_equal_only() {
        let value = json!("FR");
        assert!(metadata_value_matches(&value, &json!("FR")));
        assert!(!metadata_value_matches(&value, &json!("UK")));
    }

    #[test]
    fn try_new_rejects_empty_id() {
        let err = Content::try_new("", "text", Some(vec![1.0]), Metadata::new(), None)
            .expect_err("empty id must fail");
        assert!(matches!(err, GraphRetrieverError::MissingId));
    }

    #[test]
    fn try_new_rejects_missing_embedding() {
        let err = Content::try_new("id", "text", None, Metadata::new(), None)
            .expect_err("missing embedding must fail");
        assert!(matches!(err, GraphRetrieverError::MissingEmbedding));
    }

    #[test]
    fn try_new_defaults_mime_type() {
        let c = Content::try_new("id", "text", Some(vec![1.0]), Metadata::new(), None).unwrap();
        assert_eq!(c.mime_type, "text/plain");
    }
}
