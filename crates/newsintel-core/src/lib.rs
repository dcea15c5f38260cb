pub mod app_config;
pub mod config;
pub mod ingestion;
pub mod knowledge_base;
pub mod news;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use ingestion::{load_news_items, mock_news_items, parse_news_items, IngestError};
pub use knowledge_base::{
    load_knowledge_base, load_knowledge_base_or_builtin, parse_knowledge_base, CompanyEntry,
    KnowledgeBase, RegulatorKeyword, RegulatorSector, SectorKeyword,
};
pub use news::{EntitySet, EntitySetRef, ImpactType, NewsItem, StockImpact};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read knowledge base file {path}: {source}")]
    KnowledgeBaseIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse knowledge base file: {0}")]
    KnowledgeBaseParse(#[from] serde_yaml::Error),

    #[error("knowledge base validation failed: {0}")]
    Validation(String),
}
