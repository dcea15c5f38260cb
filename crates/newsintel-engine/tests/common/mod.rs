//! Deterministic test embedder shared by the integration tests.
#![allow(dead_code)]

use newsintel_engine::{EmbeddingError, Embedder};

/// Keyword groups; each group is one embedding dimension.
const TOPICS: &[&[&str]] = &[
    &["hdfc", "dividend", "buyback"],
    &[
        "rbi",
        "reserve bank",
        "central bank",
        "repo",
        "rate",
        "inflation",
        "policy",
    ],
    &["icici", "branch"],
    &["npa", "credit", "banking sector"],
    &["bank"],
];

/// Bag-of-keywords embedder: component `d` counts occurrences of topic `d`'s
/// keywords in the lowercased text.
pub struct KeywordEmbedder;

#[allow(clippy::cast_precision_loss)]
pub fn keyword_vector(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    TOPICS
        .iter()
        .map(|keywords| {
            keywords
                .iter()
                .map(|kw| lower.matches(kw).count())
                .sum::<usize>() as f32
        })
        .collect()
}

impl Embedder for KeywordEmbedder {
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| keyword_vector(t)).collect())
    }
}

/// Always unavailable.
pub struct OfflineEmbedder;

impl Embedder for OfflineEmbedder {
    fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::Request("connection refused".to_string()))
    }
}
