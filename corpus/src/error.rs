use thiserror::Error;

#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Duplicate document id: {id}")]
    DuplicateDocument { id: String },

    #[error("Position {position} out of range for corpus of {len} documents")]
    OutOfRange { position: usize, len: usize },

    #[error("Embedding matrix has {rows} rows for a corpus of {docs} documents")]
    RowCountMismatch { rows: usize, docs: usize },

    #[error("Embedding row {row} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CorpusError>;
