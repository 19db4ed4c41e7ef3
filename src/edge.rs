//! Edge model: tagged connections between documents, and the declarative
//! schema (`EdgeSpec`) that maps metadata fields to them.

use crate::error::{GraphRetrieverError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// The `$id` sentinel a selector may name instead of a metadata field.
pub const ID_SENTINEL: &str = "$id";

/// A canonical, hashable form of a JSON scalar.
///
/// Edge equality and hashing must be cheap and must not depend on how a
/// backend happened to serialize a number or string, so metadata values are
/// normalized into this form before becoming part of an `Edge`. Floats
/// compare and hash on their bit pattern; callers are not expected to route
/// `NaN` through metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Scalar {
    String(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::String(a), Scalar::String(b)) => a == b,
            (Scalar::Bool(a), Scalar::Bool(b)) => a == b,
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a.to_bits() == b.to_bits(),
            _ => false,
        }
    }
}

impl Eq for Scalar {}

impl std::hash::Hash for Scalar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Scalar::String(s) => {
                0u8.hash(state);
                s.hash(state);
            }
            Scalar::Bool(b) => {
                1u8.hash(state);
                b.hash(state);
            }
            Scalar::Int(i) => {
                2u8.hash(state);
                i.hash(state);
            }
            Scalar::Float(f) => {
                3u8.hash(state);
                f.to_bits().hash(state);
            }
        }
    }
}

impl Scalar {
    /// Normalize a `serde_json::Value`, if it is a scalar. Arrays and
    /// objects are not scalars and yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::String(s.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Scalar::Int(i))
                } else {
                    n.as_f64().map(Scalar::Float)
                }
            }
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    /// Render back to a `serde_json::Value`, e.g. to merge into a filter map.
    pub fn to_value(&self) -> Value {
        match self {
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Bool(b) => Value::Bool(*b),
            Scalar::Int(i) => Value::from(*i),
            Scalar::Float(f) => {
                serde_json::Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null)
            }
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

/// A tagged connection between documents.
///
/// `Metadata` matches any content whose `metadata[field]` equals `value`, or
/// contains `value` when that metadata entry is an array. `Id` matches the
/// single content whose `id` equals `id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Edge {
    Metadata { field: String, value: Scalar },
    Id { id: String },
}

/// The pair of edge sets an extractor produces for one content: edges it
/// reaches out along, and edges other documents would use to reach it.
#[derive(Debug, Clone, Default)]
pub struct Edges {
    pub incoming: HashSet<Edge>,
    pub outgoing: HashSet<Edge>,
}

/// Either a dotted metadata field path or the `$id` sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Id,
    Field(String),
}

impl Selector {
    /// Parse a selector string. Fails only if the string is empty — neither
    /// a valid field path nor the `$id` sentinel.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(GraphRetrieverError::InvalidEdgeSpec);
        }
        if s == ID_SENTINEL {
            Ok(Selector::Id)
        } else {
            Ok(Selector::Field(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Selector::Id => ID_SENTINEL,
            Selector::Field(f) => f,
        }
    }
}

/// A declarative pair naming source and target selectors. A set of
/// `EdgeSpec`s defines a symmetric schema for outgoing and incoming edges.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeSpec {
    pub source: Selector,
    pub target: Selector,
}

impl EdgeSpec {
    /// Build a spec from a pair of selector strings, e.g. `("country", "country")`.
    pub fn new(source: &str, target: &str) -> Result<Self> {
        Ok(Self {
            source: Selector::parse(source)?,
            target: Selector::parse(target)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_parses_id_sentinel() {
        assert_eq!(Selector::parse("$id").unwrap(), Selector::Id);
    }

    #[test]
    fn selector_parses_field_path() {
        assert_eq!(
            Selector::parse("a.b").unwrap(),
            Selector::Field("a.b".to_string())
        );
    }

    #[test]
    fn selector_rejects_empty_string() {
        let err = Selector::parse("").expect_err("empty selector must fail");
        assert!(matches!(err, GraphRetrieverError::InvalidEdgeSpec));
    }

    #[test]
    fn scalar_equality_is_structural_not_pointer() {
        let a = Scalar::from("FR");
        let b = Scalar::String("FR".to_string());
        assert_eq!(a, b);
    }

    #[test]
    fn scalar_from_value_skips_containers() {
        assert!(Scalar::from_value(&serde_json::json!([1, 2])).is_none());
        assert!(Scalar::from_value(&serde_json::json!({"a": 1})).is_none());
        assert!(Scalar::from_value(&serde_json::json!(null)).is_none());
    }

    #[test]
    fn edge_set_dedups_structurally_equal_edges() {
        let mut edges = HashSet::new();
        edges.insert(Edge::Metadata {
            field: "country".to_string(),
            value: Scalar::from("FR"),
        });
        edges.insert(Edge::Metadata {
            field: "country".to_string(),
            value: Scalar::from("FR"),
        });
        assert_eq!(edges.len(), 1);
    }
}
