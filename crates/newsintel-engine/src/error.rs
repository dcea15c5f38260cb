use newsintel_core::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("item '{id}' is missing required field '{field}'")]
    MissingField { field: &'static str, id: String },

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("ingestion error: {0}")]
    Ingest(#[from] IngestError),
}

/// Failures of the embedding capability. Never retried by the engine.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("embedding client could not be built: {0}")]
    Client(String),

    #[error("embedding request failed: {0}")]
    Request(String),

    #[error("embedding server returned status {0}")]
    Status(u16),

    #[error("malformed embedding output: {0}")]
    Malformed(String),
}
