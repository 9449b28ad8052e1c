use crate::error::{IndexError, Result};
use crate::{Neighbor, VectorIndex};
use log::debug;
use sift_corpus::EmbeddingMatrix;

/// Brute-force cosine nearest-neighbor index.
///
/// Every query scores every row via [`cosine_similarity`]. Fine for
/// prototype-scale corpora; anything larger belongs behind a real ANN
/// structure implementing [`VectorIndex`].
pub struct FlatIndex {
    dim: usize,
    rows: Vec<Vec<f32>>,
}

impl FlatIndex {
    /// Build an index over a corpus embedding matrix. Row i of the
    /// matrix answers for corpus position i.
    pub fn from_matrix(matrix: &EmbeddingMatrix) -> Self {
        let rows = matrix.rows().to_vec();
        debug!("Built flat index over {} vectors", rows.len());
        Self {
            dim: matrix.dim(),
            rows,
        }
    }
}

impl VectorIndex for FlatIndex {
    fn query(&self, vector: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if self.rows.is_empty() || k == 0 {
            return Ok(Vec::new());
        }
        if vector.len() != self.dim {
            return Err(IndexError::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }

        let mut neighbors: Vec<Neighbor> = self
            .rows
            .iter()
            .enumerate()
            .map(|(position, row)| Neighbor {
                position,
                distance: 1.0 - cosine_similarity(vector, row),
            })
            .collect();

        neighbors.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.position.cmp(&b.position))
        });
        neighbors.truncate(k);
        Ok(neighbors)
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Cosine similarity of two raw vectors, 0.0 when either has no
/// magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let mag_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let mag_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if mag_a == 0.0 || mag_b == 0.0 {
        0.0
    } else {
        dot / (mag_a * mag_b)
    }
}
