use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Base URL of the Text Embeddings Inference server.
    pub tei_url: String,
    pub tei_timeout_secs: u64,
    /// Minimum cosine similarity for a headline to join a story seed.
    pub cluster_threshold: f32,
    pub search_top_k: usize,
    /// YAML knowledge base; the built-in tables are used when unset.
    pub knowledge_base_path: Option<PathBuf>,
    /// News records file, a YAML or JSON list of `{id, title}` records.
    /// CSV is not accepted. The mock dataset is used when unset or missing.
    pub news_path: Option<PathBuf>,
}
