use crate::error::{EmbeddingError, Result};
use crate::protocol::{EmbedBatchResponse, EmbedItem, HealthResponse};
use crate::Embedder;
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_endpoint() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_batch_size() -> usize {
    64
}

fn default_dimension() -> usize {
    crate::DEFAULT_EMBEDDING_DIM
}

/// Configuration for the HTTP embedder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpEmbedderConfig {
    /// Base URL of the batch embedding service
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of texts per request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,

    /// Dimensionality of the vectors the service produces
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

impl Default for HttpEmbedderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_batch_size: default_max_batch_size(),
            dimension: default_dimension(),
        }
    }
}

/// Embedder backed by the batch embedding service.
///
/// Texts are posted in caller order as `[{"id", "content"}]` batches; the
/// service answers with an id-to-vector map, which is flattened back into
/// input order.
pub struct HttpEmbedder {
    client: reqwest::Client,
    config: HttpEmbedderConfig,
}

impl HttpEmbedder {
    pub fn new(config: HttpEmbedderConfig) -> Result<Self> {
        info!("Initializing HTTP embedder for {}", config.endpoint);
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| EmbeddingError::Initialization(err.to_string()))?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.endpoint.trim_end_matches('/'))
    }

    /// Check whether the service is up and answering.
    pub async fn health(&self) -> Result<bool> {
        let response = self.client.get(self.url("health")).send().await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let health: HealthResponse = response.json().await?;
        Ok(health.is_ok())
    }

    async fn embed_chunk(&self, chunk: &[String]) -> Result<Vec<Vec<f32>>> {
        let items: Vec<EmbedItem> = chunk
            .iter()
            .enumerate()
            .map(|(index, content)| EmbedItem {
                id: index.to_string(),
                content: content.clone(),
            })
            .collect();

        let response = self
            .client
            .post(self.url("embed_batch"))
            .json(&items)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::Http(format!(
                "embed_batch failed: {status} - {body}"
            )));
        }

        let parsed: EmbedBatchResponse = response.json().await?;
        let mut vectors = Vec::with_capacity(chunk.len());
        for item in &items {
            let vector = parsed
                .results
                .get(&item.id)
                .cloned()
                .ok_or_else(|| EmbeddingError::MissingResult(item.id.clone()))?;
            vectors.push(vector);
        }
        Ok(vectors)
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn encode_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Embedding {} texts over HTTP", texts.len());
        let mut vectors = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.max_batch_size) {
            vectors.extend(self.embed_chunk(chunk).await?);
        }
        Ok(vectors)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn embedder_for(server: &MockServer) -> HttpEmbedder {
        let config = HttpEmbedderConfig {
            endpoint: server.uri(),
            dimension: 3,
            ..HttpEmbedderConfig::default()
        };
        HttpEmbedder::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_encode_many_preserves_input_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed_batch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": {
                    "0": [1.0, 0.0, 0.0],
                    "1": [0.0, 1.0, 0.0],
                }
            })))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let vectors = embedder
            .encode_many(&["first".to_string(), "second".to_string()])
            .await
            .unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0, 0.0], vec![0.0, 1.0, 0.0]]);
    }

    #[tokio::test]
    async fn test_encode_single_via_default_method() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed_batch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": { "0": [0.5, 0.5, 0.0] }
            })))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let vector = embedder.encode("hello").await.unwrap();
        assert_eq!(vector, vec![0.5, 0.5, 0.0]);
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed_batch"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let err = embedder.encode("hello").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Http(_)));
    }

    #[tokio::test]
    async fn test_missing_vector_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed_batch"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": {} })))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let err = embedder.encode("hello").await.unwrap_err();
        assert!(matches!(err, EmbeddingError::MissingResult(id) if id == "0"));
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        assert!(embedder.health().await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_input_sends_nothing() {
        let server = MockServer::start().await;
        // No mock mounted: any request would 404 and fail the call.
        let embedder = embedder_for(&server);
        let vectors = embedder.encode_many(&[]).await.unwrap();
        assert!(vectors.is_empty());
    }
}
