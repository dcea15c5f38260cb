//! Story clustering: group near-duplicate headlines under one `story_id`.
//!
//! Grouping is a single greedy pass in input order. Each unvisited item
//! seeds a new cluster, and every other unvisited item whose similarity to
//! *that seed* reaches the threshold joins it. Membership is similarity to
//! the seed, not transitive closure: if A~B and B~C but not A~C, and A seeds
//! first, C stays out of A's cluster. Results therefore depend on input
//! order.

use std::collections::{HashMap, HashSet};

use newsintel_core::NewsItem;

use crate::embeddings::{embed_checked, Embedder};
use crate::error::EngineError;
use crate::similarity::SimilarityMatrix;

/// Similarity at or above which a headline joins a seed's story.
pub const DEFAULT_CLUSTER_THRESHOLD: f32 = 0.8;

/// Group `ids` by seed similarity. Clusters are returned in the order they
/// were opened; ids within a cluster keep input order after the seed.
///
/// # Panics
///
/// Panics if `matrix` is smaller than `ids`.
#[must_use]
pub fn cluster_articles(matrix: &SimilarityMatrix, ids: &[&str], threshold: f32) -> Vec<Vec<String>> {
    let mut visited = vec![false; ids.len()];
    let mut clusters: Vec<Vec<String>> = Vec::new();

    for (i, id_i) in ids.iter().enumerate() {
        if visited[i] {
            continue;
        }
        let mut cluster = vec![(*id_i).to_string()];
        visited[i] = true;

        for (j, id_j) in ids.iter().enumerate() {
            if visited[j] {
                continue;
            }
            if matrix.get(i, j) >= threshold {
                cluster.push((*id_j).to_string());
                visited[j] = true;
            }
        }

        tracing::debug!(seed = %id_i, size = cluster.len(), "opened story cluster");
        clusters.push(cluster);
    }

    clusters
}

/// Map every item id to its `story_<k>` id.
///
/// # Errors
///
/// - [`EngineError::InvalidInput`] if `items` is empty, an id is blank or
///   repeated, a title is blank, or `threshold` is outside `[0, 1]`.
/// - [`EngineError::Embedding`] if the embedder fails or returns malformed
///   vectors.
pub fn cluster(
    items: &[NewsItem],
    embedder: &dyn Embedder,
    threshold: f32,
) -> Result<HashMap<String, String>, EngineError> {
    validate_batch(items, threshold)?;

    let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
    let embeddings = embed_checked(embedder, &titles)?;
    let matrix = SimilarityMatrix::from_embeddings(&embeddings);

    let ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
    let clusters = cluster_articles(&matrix, &ids, threshold);

    tracing::info!(
        items = items.len(),
        stories = clusters.len(),
        threshold,
        "clustered headlines into stories"
    );

    let mut story_ids = HashMap::with_capacity(items.len());
    for (k, group) in clusters.into_iter().enumerate() {
        let story_id = format!("story_{}", k + 1);
        for news_id in group {
            story_ids.insert(news_id, story_id.clone());
        }
    }

    Ok(story_ids)
}

/// Cluster `items` and write the resulting `story_id` into each one.
///
/// # Errors
///
/// Same as [`cluster`]. On error no item is modified.
pub fn add_story_ids(
    items: &mut [NewsItem],
    embedder: &dyn Embedder,
    threshold: f32,
) -> Result<(), EngineError> {
    let mut story_ids = cluster(items, embedder, threshold)?;
    for item in items.iter_mut() {
        item.story_id = story_ids.remove(&item.id);
    }
    Ok(())
}

fn validate_batch(items: &[NewsItem], threshold: f32) -> Result<(), EngineError> {
    if items.is_empty() {
        return Err(EngineError::InvalidInput(
            "cannot cluster an empty batch".to_string(),
        ));
    }

    if !(0.0..=1.0).contains(&threshold) {
        return Err(EngineError::InvalidInput(format!(
            "threshold {threshold} is outside [0, 1]"
        )));
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if item.id.trim().is_empty() {
            return Err(EngineError::InvalidInput("item id must be non-empty".to_string()));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(EngineError::InvalidInput(format!(
                "duplicate item id: '{}'",
                item.id
            )));
        }
        if item.title.trim().is_empty() {
            return Err(EngineError::InvalidInput(format!(
                "item '{}' has no title",
                item.id
            )));
        }
    }

    Ok(())
}
