//! Hybrid news search: entity filter, then semantic ranking.
//!
//! 1. Understand the query by lexical matching against the knowledge base
//!    (no NER on the query side), adding each mentioned company's sector.
//! 2. Keep items sharing any company, sector or regulator with the query.
//!    The filter is advisory: when nothing matches, every item is a candidate.
//! 3. Rank candidates by cosine similarity between query and title embeddings.
//! 4. Return the top `top_k`, ties keeping candidate order.

use std::collections::BTreeSet;

use newsintel_core::{KnowledgeBase, NewsItem};
use serde::Serialize;

use crate::embeddings::{embed_checked, Embedder};
use crate::error::EngineError;
use crate::similarity::cosine_similarity;

/// Result count used when the caller has no preference.
pub const DEFAULT_TOP_K: usize = 5;

/// Entities a query asks about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryIntent {
    pub companies: BTreeSet<String>,
    pub sectors: BTreeSet<String>,
    pub regulators: BTreeSet<String>,
}

impl QueryIntent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty() && self.sectors.is_empty() && self.regulators.is_empty()
    }

    /// True when `item` shares at least one company, sector or regulator.
    #[must_use]
    pub fn matches(&self, item: &NewsItem) -> bool {
        !self.companies.is_disjoint(&item.companies)
            || !self.sectors.is_disjoint(&item.sectors)
            || !self.regulators.is_disjoint(&item.regulators)
    }
}

/// One ranked row: the item's columns plus its similarity to the query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    #[serde(flatten)]
    pub item: NewsItem,
    pub similarity: f32,
}

pub struct QueryEngine<'a> {
    kb: &'a KnowledgeBase,
    embedder: &'a dyn Embedder,
}

impl<'a> QueryEngine<'a> {
    #[must_use]
    pub fn new(kb: &'a KnowledgeBase, embedder: &'a dyn Embedder) -> Self {
        Self { kb, embedder }
    }

    /// Detect companies, sectors and regulators mentioned in `query`.
    #[must_use]
    pub fn understand(&self, query: &str) -> QueryIntent {
        let q_lower = query.to_lowercase();
        let mut intent = QueryIntent::default();

        for company in &self.kb.companies {
            if q_lower.contains(&company.name.to_lowercase()) {
                intent.companies.insert(company.name.clone());
            }
        }

        for kw in &self.kb.sector_keywords {
            if q_lower.contains(&kw.keyword.to_lowercase()) {
                intent.sectors.insert(kw.sector.clone());
            }
        }

        for kw in &self.kb.regulator_keywords {
            if q_lower.contains(&kw.keyword.to_lowercase()) {
                intent.regulators.insert(kw.regulator.clone());
            }
        }

        // A company question is also a question about its sector.
        for company in &intent.companies {
            if let Some(sector) = self.kb.sector_for(company) {
                intent.sectors.insert(sector.to_string());
            }
        }

        intent
    }

    /// Candidates for ranking. Never empty unless `items` is.
    #[must_use]
    pub fn filter_candidates<'i>(&self, items: &'i [NewsItem], intent: &QueryIntent) -> Vec<&'i NewsItem> {
        if intent.is_empty() {
            return items.iter().collect();
        }

        let filtered: Vec<&NewsItem> = items.iter().filter(|item| intent.matches(item)).collect();
        if filtered.is_empty() {
            tracing::warn!(
                items = items.len(),
                "no items match query entities; ranking the full table"
            );
            return items.iter().collect();
        }

        tracing::debug!(
            candidates = filtered.len(),
            items = items.len(),
            "filtered items by query entities"
        );
        filtered
    }

    /// Search `items` for `query` and return at most `top_k` hits, most
    /// similar first.
    ///
    /// # Errors
    ///
    /// - [`EngineError::MissingField`] if any item has a blank title.
    /// - [`EngineError::Embedding`] if the embedder fails or returns
    ///   malformed vectors.
    pub fn search(
        &self,
        query: &str,
        items: &[NewsItem],
        top_k: usize,
    ) -> Result<Vec<SearchHit>, EngineError> {
        if let Some(item) = items.iter().find(|item| item.title.trim().is_empty()) {
            return Err(EngineError::MissingField {
                field: "title",
                id: item.id.clone(),
            });
        }

        if top_k == 0 || items.is_empty() {
            return Ok(Vec::new());
        }

        let intent = self.understand(query);
        let candidates = self.filter_candidates(items, &intent);

        let mut texts: Vec<&str> = Vec::with_capacity(candidates.len() + 1);
        texts.push(query);
        texts.extend(candidates.iter().map(|item| item.title.as_str()));
        let embeddings = embed_checked(self.embedder, &texts)?;
        let (query_embedding, title_embeddings) = embeddings.split_at(1);

        let mut hits: Vec<SearchHit> = candidates
            .into_iter()
            .zip(title_embeddings)
            .map(|(item, embedding)| SearchHit {
                item: item.clone(),
                similarity: cosine_similarity(&query_embedding[0], embedding),
            })
            .collect();

        // `sort_by` is stable, so equal scores keep candidate order.
        hits.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
        hits.truncate(top_k);

        tracing::info!(
            query,
            companies = intent.companies.len(),
            sectors = intent.sectors.len(),
            regulators = intent.regulators.len(),
            results = hits.len(),
            "search complete"
        );

        Ok(hits)
    }
}
