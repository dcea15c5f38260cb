//! News processing pipeline orchestration.
//!
//! Six stages run in a fixed order, each taking and returning the same
//! [`PipelineState`]:
//!
//! 1. `ingest`: fetch raw items from the [`NewsSource`].
//! 2. `dedup`: assign story ids by headline similarity.
//! 3. `entities`: extract companies, sectors and regulators.
//! 4. `impact`: map entities to impacted stocks.
//! 5. `store`: overwrite [`NewsMemory`] with the processed table.
//! 6. `query`: search the stored table; empty results when no query is set.

use std::path::PathBuf;

use newsintel_core::{load_news_items, AppConfig, KnowledgeBase, NewsItem};

use crate::dedup::{add_story_ids, DEFAULT_CLUSTER_THRESHOLD};
use crate::embeddings::Embedder;
use crate::entities::{EntityExtractor, NerTagger};
use crate::error::EngineError;
use crate::impact::add_impacts;
use crate::memory::NewsMemory;
use crate::query::{QueryEngine, SearchHit, DEFAULT_TOP_K};

/// Producer of raw `{id, title}` items.
pub trait NewsSource {
    /// # Errors
    ///
    /// Returns [`EngineError::Ingest`] if the source cannot be read.
    fn fetch(&self) -> Result<Vec<NewsItem>, EngineError>;
}

impl NewsSource for Vec<NewsItem> {
    fn fetch(&self) -> Result<Vec<NewsItem>, EngineError> {
        Ok(self.clone())
    }
}

/// Reads a YAML/JSON news file, falling back to the mock dataset.
#[derive(Debug, Clone, Default)]
pub struct FileNewsSource {
    path: Option<PathBuf>,
}

impl FileNewsSource {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.news_path.clone())
    }
}

impl NewsSource for FileNewsSource {
    fn fetch(&self) -> Result<Vec<NewsItem>, EngineError> {
        Ok(load_news_items(self.path.as_deref())?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Ingest,
    Dedup,
    Entities,
    Impact,
    Store,
    Query,
}

impl Stage {
    /// Execution order. Each stage reads columns written by its predecessors.
    pub const ORDER: [Stage; 6] = [
        Stage::Ingest,
        Stage::Dedup,
        Stage::Entities,
        Stage::Impact,
        Stage::Store,
        Stage::Query,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Stage::Ingest => "ingest",
            Stage::Dedup => "dedup",
            Stage::Entities => "entities",
            Stage::Impact => "impact",
            Stage::Store => "store",
            Stage::Query => "query",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// State threaded through every stage.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    pub query: Option<String>,
    pub items: Vec<NewsItem>,
    pub results: Vec<SearchHit>,
}

impl PipelineState {
    #[must_use]
    pub fn with_query(query: &str) -> Self {
        Self {
            query: Some(query.to_string()),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipelineConfig {
    pub cluster_threshold: f32,
    pub top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            cluster_threshold: config.cluster_threshold,
            top_k: config.search_top_k,
        }
    }
}

pub struct Pipeline<'a> {
    kb: &'a KnowledgeBase,
    embedder: &'a dyn Embedder,
    tagger: Option<&'a dyn NerTagger>,
    source: &'a dyn NewsSource,
    memory: &'a NewsMemory,
    config: PipelineConfig,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(
        kb: &'a KnowledgeBase,
        embedder: &'a dyn Embedder,
        source: &'a dyn NewsSource,
        memory: &'a NewsMemory,
    ) -> Self {
        Self {
            kb,
            embedder,
            tagger: None,
            source,
            memory,
            config: PipelineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_tagger(mut self, tagger: &'a dyn NerTagger) -> Self {
        self.tagger = Some(tagger);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Run every stage in order.
    ///
    /// # Errors
    ///
    /// Returns the first stage error; later stages do not run.
    pub fn run(&self, mut state: PipelineState) -> Result<PipelineState, EngineError> {
        for stage in Stage::ORDER {
            state = self.run_stage(stage, state).inspect_err(|e| {
                tracing::warn!(stage = %stage, error = %e, "pipeline stage failed");
            })?;
        }
        Ok(state)
    }

    /// Process all news without a query and return the stored table.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run`].
    pub fn process_all_news(&self) -> Result<Vec<NewsItem>, EngineError> {
        self.run(PipelineState::default()).map(|state| state.items)
    }

    /// Process all news, then answer `query` against the fresh table.
    ///
    /// # Errors
    ///
    /// See [`Pipeline::run`].
    pub fn run_query(&self, query: &str) -> Result<Vec<SearchHit>, EngineError> {
        self.run(PipelineState::with_query(query))
            .map(|state| state.results)
    }

    fn run_stage(&self, stage: Stage, mut state: PipelineState) -> Result<PipelineState, EngineError> {
        match stage {
            Stage::Ingest => {
                state.items = self.source.fetch()?;
            }
            Stage::Dedup => {
                add_story_ids(&mut state.items, self.embedder, self.config.cluster_threshold)?;
            }
            Stage::Entities => {
                let extractor = match self.tagger {
                    Some(tagger) => EntityExtractor::with_tagger(self.kb, tagger),
                    None => EntityExtractor::new(self.kb),
                };
                extractor.annotate(&mut state.items);
            }
            Stage::Impact => {
                add_impacts(&mut state.items, self.kb);
            }
            Stage::Store => {
                self.memory.replace(state.items.clone());
            }
            Stage::Query => {
                state.results = match state.query.as_deref().filter(|q| !q.trim().is_empty()) {
                    Some(query) => QueryEngine::new(self.kb, self.embedder).search(
                        query,
                        &self.memory.snapshot(),
                        self.config.top_k,
                    )?,
                    None => Vec::new(),
                };
            }
        }

        tracing::info!(
            stage = %stage,
            items = state.items.len(),
            results = state.results.len(),
            "pipeline stage complete"
        );
        Ok(state)
    }
}
