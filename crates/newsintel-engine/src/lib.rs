//! Story clustering and hybrid search over financial news headlines.
//!
//! Headlines are embedded (via a TEI server or any [`Embedder`]), grouped
//! into stories by seed similarity, annotated with companies, sectors and
//! regulators from a [`newsintel_core::KnowledgeBase`], mapped to impacted
//! stocks, and stored in a [`NewsMemory`] that the [`QueryEngine`] searches
//! with an entity filter followed by semantic ranking.

pub mod dedup;
pub mod embeddings;
pub mod entities;
pub mod error;
pub mod impact;
pub mod memory;
pub mod pipeline;
pub mod query;
pub mod similarity;
pub mod telemetry;

pub use dedup::{add_story_ids, cluster, cluster_articles, DEFAULT_CLUSTER_THRESHOLD};
pub use embeddings::{Embedder, TeiEmbedder};
pub use entities::{EntityExtractor, EntityLabel, EntitySpan, NerTagger};
pub use error::{EmbeddingError, EngineError};
pub use impact::{add_impacts, map_stock_impact};
pub use memory::NewsMemory;
pub use pipeline::{FileNewsSource, NewsSource, Pipeline, PipelineConfig, PipelineState, Stage};
pub use query::{QueryEngine, QueryIntent, SearchHit, DEFAULT_TOP_K};
pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use telemetry::init_tracing;
