//! Local ONNX embedding backend, compiled in with the `onnx` feature.

use crate::error::{EmbeddingError, Result};
use crate::Embedder;
use async_trait::async_trait;
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Supported local embedding models
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum LocalModel {
    /// All-MiniLM-L6-v2 (lightweight, the corpus pipeline default)
    AllMiniLmL6V2,
    /// Nomic-embed-text-v1.5 (larger, supports Matryoshka truncation)
    NomicEmbedTextV15,
}

impl LocalModel {
    fn to_fastembed_model(self) -> EmbeddingModel {
        match self {
            LocalModel::AllMiniLmL6V2 => EmbeddingModel::AllMiniLML6V2,
            LocalModel::NomicEmbedTextV15 => EmbeddingModel::NomicEmbedTextV15,
        }
    }

    fn native_dimension(self) -> usize {
        match self {
            LocalModel::AllMiniLmL6V2 => 384,
            LocalModel::NomicEmbedTextV15 => 768,
        }
    }
}

/// Configuration for the local ONNX embedder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FastembedConfig {
    /// Model to load
    pub model: LocalModel,

    /// Target dimension; vectors longer than this are truncated
    pub dimension: usize,

    /// Maximum batch size per model invocation
    pub batch_size: usize,

    /// Show download progress when fetching model files
    pub show_download_progress: bool,
}

impl Default for FastembedConfig {
    fn default() -> Self {
        Self {
            model: LocalModel::AllMiniLmL6V2,
            dimension: LocalModel::AllMiniLmL6V2.native_dimension(),
            batch_size: 64,
            show_download_progress: false,
        }
    }
}

/// Embedder running a local ONNX model.
pub struct FastembedEmbedder {
    model: TextEmbedding,
    config: FastembedConfig,
}

impl FastembedEmbedder {
    pub fn new() -> Result<Self> {
        Self::with_config(FastembedConfig::default())
    }

    pub fn with_config(config: FastembedConfig) -> Result<Self> {
        info!(
            "Initializing local embedder with model {:?}, dimension {}",
            config.model, config.dimension
        );
        let init_options = InitOptions::new(config.model.to_fastembed_model())
            .with_show_download_progress(config.show_download_progress);
        let model = TextEmbedding::try_new(init_options)
            .map_err(|err| EmbeddingError::Initialization(err.to_string()))?;
        Ok(Self { model, config })
    }

    pub fn config(&self) -> &FastembedConfig {
        &self.config
    }
}

#[async_trait]
impl Embedder for FastembedEmbedder {
    async fn encode_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Generating embeddings for {} texts", texts.len());

        let mut all_embeddings = Vec::with_capacity(texts.len());
        for chunk in texts.chunks(self.config.batch_size) {
            let batch = self.model.embed(chunk.to_vec(), None)?;
            for mut embedding in batch {
                if embedding.len() > self.config.dimension {
                    embedding.truncate(self.config.dimension);
                }
                all_embeddings.push(embedding);
            }
        }
        Ok(all_embeddings)
    }

    fn dimension(&self) -> usize {
        self.config.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests download model files on first run.
    #[tokio::test]
    #[ignore]
    async fn test_encode_produces_native_dimension() {
        let embedder = FastembedEmbedder::new().unwrap();
        let vector = embedder.encode("test text").await.unwrap();
        assert_eq!(vector.len(), LocalModel::AllMiniLmL6V2.native_dimension());
    }
}
