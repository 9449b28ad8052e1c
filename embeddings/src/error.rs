use thiserror::Error;

/// Errors that can occur while producing embeddings
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// Failed to initialize an embedding backend
    #[error("Failed to initialize embedder: {0}")]
    Initialization(String),

    /// Failed to generate embeddings
    #[error("Failed to generate embeddings: {0}")]
    Generation(String),

    /// A request to the embedding service failed
    #[error("Embedding request failed: {0}")]
    Http(String),

    /// The embedding service response is missing a requested vector
    #[error("Embedding service returned no vector for id {0}")]
    MissingResult(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for EmbeddingError {
    fn from(err: reqwest::Error) -> Self {
        EmbeddingError::Http(err.to_string())
    }
}

#[cfg(feature = "onnx")]
impl From<fastembed::Error> for EmbeddingError {
    fn from(err: fastembed::Error) -> Self {
        EmbeddingError::Generation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EmbeddingError>;
