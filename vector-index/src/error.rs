use thiserror::Error;

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Query vector has dimension {actual}, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, IndexError>;
