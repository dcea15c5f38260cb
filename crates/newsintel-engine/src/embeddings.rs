//! Text embedding capability and its TEI (Text Embeddings Inference) client.

use std::time::Duration;

use newsintel_core::AppConfig;
use serde::Serialize;

use crate::error::EmbeddingError;

/// Maximum number of texts per /embed call.
const BATCH_SIZE: usize = 64;

/// Turns texts into fixed-length vectors.
///
/// Implementations must be deterministic: identical input yields identical
/// vectors. One output vector per input text, in input order.
pub trait Embedder {
    /// # Errors
    ///
    /// Returns [`EmbeddingError`] when the backing model is unavailable.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError>;
}

/// Embed `texts` and reject output that cannot be compared with cosine
/// similarity: wrong count, empty vectors, mixed dimensions or non-finite
/// components.
///
/// # Errors
///
/// Propagates the embedder's error, or [`EmbeddingError::Malformed`].
pub(crate) fn embed_checked(
    embedder: &dyn Embedder,
    texts: &[&str],
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if texts.is_empty() {
        return Ok(Vec::new());
    }

    let embeddings = embedder.embed(texts)?;

    if embeddings.len() != texts.len() {
        return Err(EmbeddingError::Malformed(format!(
            "{} embeddings for {} inputs",
            embeddings.len(),
            texts.len()
        )));
    }

    let dim = embeddings[0].len();
    if dim == 0 {
        return Err(EmbeddingError::Malformed("empty embedding vector".to_string()));
    }

    for (i, vector) in embeddings.iter().enumerate() {
        if vector.len() != dim {
            return Err(EmbeddingError::Malformed(format!(
                "embedding {i} has {} dimensions, expected {dim}",
                vector.len()
            )));
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(EmbeddingError::Malformed(format!(
                "embedding {i} contains a non-finite value"
            )));
        }
    }

    Ok(embeddings)
}

/// Blocking HTTP client for a TEI server.
pub struct TeiEmbedder {
    client: reqwest::blocking::Client,
    url: String,
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    inputs: &'a [&'a str],
}

impl TeiEmbedder {
    /// Create a client for the TEI server at `tei_url`.
    ///
    /// # Errors
    ///
    /// Returns [`EmbeddingError::Client`] if the HTTP client cannot be built.
    pub fn new(tei_url: &str, timeout_secs: u64) -> Result<Self, EmbeddingError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("newsintel/0.1 (story-clustering)")
            .build()
            .map_err(|e| EmbeddingError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: format!("{}/embed", tei_url.trim_end_matches('/')),
        })
    }

    /// # Errors
    ///
    /// Returns [`EmbeddingError::Client`] if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, EmbeddingError> {
        Self::new(&config.tei_url, config.tei_timeout_secs)
    }
}

impl Embedder for TeiEmbedder {
    /// Texts are sent in groups of [`BATCH_SIZE`] (64) per request.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(BATCH_SIZE) {
            let request = EmbedRequest { inputs: chunk };
            let response = self
                .client
                .post(&self.url)
                .json(&request)
                .send()
                .map_err(|e| EmbeddingError::Request(e.to_string()))?;

            if !response.status().is_success() {
                return Err(EmbeddingError::Status(response.status().as_u16()));
            }

            let embeddings: Vec<Vec<f32>> = response
                .json()
                .map_err(|e| EmbeddingError::Malformed(format!("TEI response parse error: {e}")))?;

            if embeddings.len() != chunk.len() {
                return Err(EmbeddingError::Malformed(format!(
                    "TEI returned {} embeddings for {} inputs",
                    embeddings.len(),
                    chunk.len()
                )));
            }

            tracing::debug!(count = chunk.len(), "embedded batch");
            all_embeddings.extend(embeddings);
        }

        Ok(all_embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<Vec<f32>>);

    impl Embedder for Fixed {
        fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn empty_input_skips_embedder() {
        struct Unreachable;
        impl Embedder for Unreachable {
            fn embed(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
                Err(EmbeddingError::Request("should not be called".to_string()))
            }
        }
        assert!(embed_checked(&Unreachable, &[]).unwrap().is_empty());
    }

    #[test]
    fn count_mismatch_is_malformed() {
        let err = embed_checked(&Fixed(vec![vec![1.0]]), &["a", "b"]).unwrap_err();
        assert!(matches!(err, EmbeddingError::Malformed(_)));
    }

    #[test]
    fn mixed_dimensions_are_malformed() {
        let err =
            embed_checked(&Fixed(vec![vec![1.0, 0.0], vec![1.0]]), &["a", "b"]).unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }

    #[test]
    fn empty_vector_is_malformed() {
        let err = embed_checked(&Fixed(vec![vec![]]), &["a"]).unwrap_err();
        assert!(matches!(err, EmbeddingError::Malformed(_)));
    }

    #[test]
    fn nan_is_malformed() {
        let err = embed_checked(&Fixed(vec![vec![f32::NAN]]), &["a"]).unwrap_err();
        assert!(err.to_string().contains("non-finite"));
    }

    #[test]
    fn well_formed_output_passes_through() {
        let out = embed_checked(&Fixed(vec![vec![0.5, 0.5], vec![0.0, 1.0]]), &["a", "b"]).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn tei_url_strips_trailing_slash() {
        let tei = TeiEmbedder::new("http://localhost:8080/", 5).unwrap();
        assert_eq!(tei.url, "http://localhost:8080/embed");
    }
}
