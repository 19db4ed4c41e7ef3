//! Vector math: cosine similarity and top-k selection.
//!
//! Grounded on the brute-force `DenseRetriever` cosine ranking pattern and
//! plexus's own `cosine_similarity` zero-magnitude rule.

use crate::content::Content;
use crate::error::{GraphRetrieverError, Result};
use std::collections::HashMap;

/// Cosine similarity between two vectors.
///
/// A zero-magnitude vector (on either side) yields `0`, and any NaN/infinite
/// result is coerced to `0` rather than propagated.
pub fn cosine(u: &[f32], v: &[f32]) -> f32 {
    let dot: f32 = u.iter().zip(v.iter()).map(|(a, b)| a * b).sum();
    let norm_u: f32 = u.iter().map(|a| a * a).sum::<f32>().sqrt();
    let norm_v: f32 = v.iter().map(|a| a * a).sum::<f32>().sqrt();
    if norm_u == 0.0 || norm_v == 0.0 {
        return 0.0;
    }
    let sim = dot / (norm_u * norm_v);
    if sim.is_finite() {
        sim
    } else {
        0.0
    }
}

/// Row-wise cosine similarity between every vector in `xs` and every vector
/// in `ys`. Every vector in `xs` and `ys` must share the same width.
pub fn cosine_matrix(xs: &[Vec<f32>], ys: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
    let width = xs.first().or_else(|| ys.first()).map(|v| v.len());
    if let Some(width) = width {
        for v in xs.iter().chain(ys.iter()) {
            if v.len() != width {
                return Err(GraphRetrieverError::DimensionMismatch(width, v.len()));
            }
        }
    }
    Ok(xs
        .iter()
        .map(|x| ys.iter().map(|y| cosine(x, y)).collect())
        .collect())
}

/// Rank `contents` by cosine similarity to `embedding`, deduplicating by id
/// (last write wins) and returning at most `k` items. Ties are broken by
/// original insertion order (stable).
pub fn top_k(contents: impl IntoIterator<Item = Content>, embedding: &[f32], k: usize) -> Vec<Content> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut deduped: Vec<Content> = Vec::new();
    for content in contents {
        if let Some(&idx) = positions.get(&content.id) {
            deduped[idx] = content;
        } else {
            positions.insert(content.id.clone(), deduped.len());
            deduped.push(content);
        }
    }

    let mut scored: Vec<(f32, usize, Content)> = deduped
        .into_iter()
        .enumerate()
        .map(|(i, c)| {
            let score = cosine(&c.embedding, embedding);
            (score, i, c)
        })
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().take(k).map(|(_, _, c)| c).collect()
}
