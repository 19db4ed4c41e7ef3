//! In-memory reference `Adapter`: a `DashMap`-backed document store with an
//! injectable embedder, for tests and for callers who don't need a real
//! vector-store backend.

use crate::adapter::{Adapter, GetOptions, SearchOptions};
use crate::content::{metadata_value_matches, Content};
use crate::error::Result;
use crate::math::top_k;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Embeds query text into a vector, for the `search` (as opposed to
/// `search_with_embedding`) entry point.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;
}

impl<F> Embedder for F
where
    F: Fn(&str) -> Vec<f32> + Send + Sync,
{
    fn embed(&self, text: &str) -> Vec<f32> {
        self(text)
    }
}

/// Reference `Adapter` implementation backed by an in-process `DashMap`.
///
/// Reentrant for concurrent reads the way the teacher's `PlexusEngine`
/// context cache is; writes (`upsert`) are independent per key so
/// traversal rounds reading the map never block each other.
pub struct InMemoryAdapter {
    documents: DashMap<String, Content>,
    embedder: Arc<dyn Embedder>,
}

impl InMemoryAdapter {
    pub fn new(embedder: impl Embedder + 'static) -> Self {
        Self {
            documents: DashMap::new(),
            embedder: Arc::new(embedder),
        }
    }

    pub fn upsert(&self, content: Content) {
        self.documents.insert(content.id.clone(), content);
    }

    pub fn upsert_all(&self, contents: impl IntoIterator<Item = Content>) {
        for content in contents {
            self.upsert(content);
        }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn matches_filter(content: &Content, options: &crate::adapter::MetadataFilter) -> bool {
        options.iter().all(|(field, expected)| {
            content
                .metadata_get(field)
                .is_some_and(|actual| metadata_value_matches(actual, expected))
        })
    }
}

#[async_trait]
impl Adapter for InMemoryAdapter {
    async fn search(&self, embedding: &[f32], options: &SearchOptions) -> Result<Vec<Content>> {
        let matching: Vec<Content> = self
            .documents
            .iter()
            .filter(|entry| Self::matches_filter(entry.value(), &options.filter))
            .map(|entry| entry.value().clone())
            .collect();
        let limit = options.limit.unwrap_or(matching.len());
        Ok(top_k(matching, embedding, limit))
    }

    async fn search_with_embedding(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<(Vec<f32>, Vec<Content>)> {
        let embedding = self.embedder.embed(query);
        let found = self.search(&embedding, options).await?;
        Ok((embedding, found))
    }

    async fn get(&self, ids: &[String], options: &GetOptions) -> Result<Vec<Content>> {
        Ok(ids
            .iter()
            .filter_map(|id| self.documents.get(id).map(|entry| entry.value().clone()))
            .filter(|content| Self::matches_filter(content, &options.filter))
            .collect())
    }
}
