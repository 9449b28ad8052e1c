//! # Sift Embeddings
//!
//! Text embedding capability for the hybrid retrieval engine. The
//! [`Embedder`] trait is the seam the retrieval and evaluation layers
//! depend on; backends behind it:
//!
//! - [`HttpEmbedder`]: client of the batch embedding service
//! - [`HashingEmbedder`]: deterministic, model-free (tests and offline runs)
//! - `FastembedEmbedder`: local ONNX models, behind the `onnx` feature
//!
//! ## Example
//!
//! ```
//! use sift_embeddings::{Embedder, HashingEmbedder};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), sift_embeddings::EmbeddingError> {
//! let embedder = HashingEmbedder::default();
//! let vector = embedder.encode("how do I return an order").await?;
//! assert_eq!(vector.len(), embedder.dimension());
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;

mod error;
mod hashing;
mod http;
#[cfg(feature = "onnx")]
mod onnx;
pub mod protocol;

pub use error::{EmbeddingError, Result};
pub use hashing::HashingEmbedder;
pub use http::{HttpEmbedder, HttpEmbedderConfig};
#[cfg(feature = "onnx")]
pub use onnx::{FastembedConfig, FastembedEmbedder, LocalModel};

/// Default embedding dimension, matching All-MiniLM-L6-v2
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Something that can turn text into fixed-dimension vectors.
///
/// Implementations must be deterministic for a fixed text and model
/// version, and `encode_many` output must correspond 1:1 with input
/// order.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a batch of texts.
    async fn encode_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    async fn encode(&self, text: &str) -> Result<Vec<f32>> {
        self.encode_many(&[text.to_string()])
            .await?
            .pop()
            .ok_or_else(|| EmbeddingError::Generation("No embedding generated".into()))
    }

    /// Dimensionality of produced vectors.
    fn dimension(&self) -> usize;
}
