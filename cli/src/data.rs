//! Data-directory conventions shared by the subcommands: where the
//! corpus metadata and embedding matrix live, and how the engine is
//! wired up from them.

use anyhow::{Context, Result};
use log::{info, warn};
use sift_corpus::{DocumentStore, EmbeddingMatrix, loader};
use sift_embeddings::Embedder;
#[cfg(feature = "onnx")]
use sift_embeddings::FastembedEmbedder;
#[cfg(not(feature = "onnx"))]
use sift_embeddings::HashingEmbedder;
use sift_retrieval::{HybridRetriever, RetrievalConfig};
use sift_vector_index::{FlatIndex, VectorIndex};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const METADATA_FILE: &str = "metadata.json";
pub const EMBEDDINGS_FILE: &str = "embeddings.json";

pub fn metadata_path(data_dir: &Path) -> PathBuf {
    data_dir.join(METADATA_FILE)
}

pub fn embeddings_path(data_dir: &Path) -> PathBuf {
    data_dir.join(EMBEDDINGS_FILE)
}

/// Load the corpus metadata alone. A missing corpus is fatal.
pub fn load_metadata(data_dir: &Path) -> Result<DocumentStore> {
    let metadata = metadata_path(data_dir);
    if !metadata.is_file() {
        anyhow::bail!(
            "No corpus metadata at {}. Run 'sift ingest' first.",
            metadata.display()
        );
    }
    let documents = loader::read_metadata(&metadata)
        .with_context(|| format!("Failed to read corpus metadata from {}", metadata.display()))?;
    DocumentStore::load(documents).context("Corpus failed integrity checks")
}

/// Load the corpus, attaching the embedding matrix when one is present.
/// A missing matrix only degrades vector search.
pub fn load_store(data_dir: &Path) -> Result<Arc<DocumentStore>> {
    let mut store = load_metadata(data_dir)?;

    let embeddings = embeddings_path(data_dir);
    if embeddings.is_file() {
        let matrix = EmbeddingMatrix::load(&embeddings).with_context(|| {
            format!("Failed to read embedding matrix from {}", embeddings.display())
        })?;
        store
            .attach_embeddings(matrix)
            .context("Embedding matrix does not match the corpus")?;
        info!("Loaded corpus with embedding matrix from {}", data_dir.display());
    } else {
        warn!(
            "No embedding matrix at {}; vector search is unavailable",
            embeddings.display()
        );
    }
    Ok(Arc::new(store))
}

#[cfg(not(feature = "onnx"))]
pub fn build_embedder() -> Result<Arc<dyn Embedder>> {
    Ok(Arc::new(HashingEmbedder::default()))
}

#[cfg(feature = "onnx")]
pub fn build_embedder() -> Result<Arc<dyn Embedder>> {
    Ok(Arc::new(FastembedEmbedder::new()?))
}

/// Wire the retrieval engine from a loaded store: the vector channel is
/// only enabled when the store carries a matrix.
pub fn build_retriever(
    store: Arc<DocumentStore>,
    config: RetrievalConfig,
) -> Result<Arc<HybridRetriever>> {
    let embedder = build_embedder()?;
    let index: Option<Arc<dyn VectorIndex>> = store
        .embeddings()
        .map(|matrix| Arc::new(FlatIndex::from_matrix(matrix)) as Arc<dyn VectorIndex>);
    let retriever = HybridRetriever::new(store, embedder, index, config)?;
    Ok(Arc::new(retriever))
}
