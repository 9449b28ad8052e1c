//! # Sift Vector Index
//!
//! Nearest-neighbor lookup over corpus embeddings. [`VectorIndex`] is
//! the capability the retrieval layer is injected with; [`FlatIndex`]
//! is the in-tree brute-force implementation.

mod error;
mod flat;

pub use error::{IndexError, Result};
pub use flat::{cosine_similarity, FlatIndex};

/// One nearest-neighbor hit. Smaller distance means more similar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Corpus position of the matched document
    pub position: usize,

    /// Cosine distance from the query (`1 - similarity`)
    pub distance: f32,
}

/// Nearest-neighbor index over the corpus embedding space.
pub trait VectorIndex: Send + Sync {
    /// Return up to `k` nearest neighbors of `vector`, ordered by
    /// ascending distance with ties broken by ascending position.
    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>>;

    /// Dimensionality the index expects of query vectors.
    fn dimension(&self) -> usize;

    /// Number of indexed vectors.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
