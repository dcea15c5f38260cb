//! Integration tests for `TeiEmbedder` using wiremock HTTP mocks.
//!
//! The embedder uses a blocking client, so each call runs on a blocking
//! thread while the mock server runs on the async runtime.

use newsintel_engine::{EmbeddingError, Embedder, TeiEmbedder};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn embed_blocking(
    base_url: String,
    texts: Vec<String>,
) -> tokio::task::JoinHandle<Result<Vec<Vec<f32>>, EmbeddingError>> {
    tokio::task::spawn_blocking(move || {
        let tei = TeiEmbedder::new(&base_url, 5)?;
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        tei.embed(&refs)
    })
}

#[tokio::test]
async fn embed_returns_vectors_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .and(body_json(serde_json::json!({ "inputs": ["first", "second"] })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([[1.0, 0.0], [0.0, 1.0]])),
        )
        .mount(&server)
        .await;

    let vectors = embed_blocking(server.uri(), vec!["first".into(), "second".into()])
        .await
        .unwrap()
        .expect("embed should succeed");

    assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
}

#[tokio::test]
async fn large_inputs_are_sent_in_batches_of_64() {
    let server = MockServer::start().await;

    let vectors: Vec<Vec<f32>> = (0..64).map(|_| vec![1.0]).collect();
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&vectors))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let tail: Vec<Vec<f32>> = (0..6).map(|_| vec![1.0]).collect();
    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&tail))
        .expect(1)
        .mount(&server)
        .await;

    let texts: Vec<String> = (0..70).map(|i| format!("headline {i}")).collect();
    let result = embed_blocking(server.uri(), texts)
        .await
        .unwrap()
        .expect("embed should succeed");

    assert_eq!(result.len(), 70);
}

#[tokio::test]
async fn server_error_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = embed_blocking(server.uri(), vec!["a".into()])
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(err, EmbeddingError::Status(503)), "got {err:?}");
}

#[tokio::test]
async fn short_response_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[1.0]])))
        .mount(&server)
        .await;

    let err = embed_blocking(server.uri(), vec!["a".into(), "b".into()])
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(err, EmbeddingError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embed"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = embed_blocking(server.uri(), vec!["a".into()])
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(err, EmbeddingError::Malformed(_)), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_is_request_error() {
    // Nothing listens on the discard port.
    let err = embed_blocking("http://127.0.0.1:9".to_string(), vec!["a".into()])
        .await
        .unwrap()
        .unwrap_err();

    assert!(matches!(err, EmbeddingError::Request(_)), "got {err:?}");
}
