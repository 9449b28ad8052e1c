use thiserror::Error;

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Corpus error: {0}")]
    Corpus(#[from] sift_corpus::CorpusError),

    #[error("Embedding error: {0}")]
    Embedding(#[from] sift_embeddings::EmbeddingError),

    #[error("Vector index error: {0}")]
    Index(#[from] sift_vector_index::IndexError),

    #[error("Invalid retrieval config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
