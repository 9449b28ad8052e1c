use crate::error::Result;
use crate::result::ScoredCandidate;
use log::debug;
use sift_embeddings::Embedder;
use sift_vector_index::VectorIndex;
use std::sync::Arc;

/// Embedding-similarity search over the corpus.
///
/// The index is optional: a corpus without embeddings simply has no
/// vector channel, and every search returns empty rather than failing.
pub struct VectorSearcher {
    embedder: Arc<dyn Embedder>,
    index: Option<Arc<dyn VectorIndex>>,
}

impl VectorSearcher {
    pub fn new(embedder: Arc<dyn Embedder>, index: Option<Arc<dyn VectorIndex>>) -> Self {
        Self { embedder, index }
    }

    pub fn has_index(&self) -> bool {
        self.index.is_some()
    }

    /// Up to `k` candidates scored by cosine similarity
    /// (`1 - distance`), ordered by descending similarity with ties
    /// broken by ascending position.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredCandidate>> {
        let Some(index) = &self.index else {
            debug!("No vector index attached, vector channel empty");
            return Ok(Vec::new());
        };
        if query.trim().is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let vector = self.embedder.encode(query).await?;
        let neighbors = index.query(&vector, k)?;

        let mut candidates: Vec<ScoredCandidate> = neighbors
            .into_iter()
            .map(|n| ScoredCandidate::new(n.position, 1.0 - n.distance))
            .collect();
        // The flat index already orders this way; enforce the contract
        // for foreign indexes too.
        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.position.cmp(&b.position))
        });
        Ok(candidates)
    }
}
