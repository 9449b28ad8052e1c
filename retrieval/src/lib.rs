/*!
# Hybrid Retrieval

Retrieval engine over an in-memory document corpus combining:
- **Lexical search** via case-insensitive substring matching
- **Vector search** via embeddings and a cosine index
- **Weighted reciprocal rank fusion** to merge the two rankings
- **Optional reranking** for phrase and title boosts

## Architecture

```text
Query
  ├─> Lexical channel (substring scan)
  │     └─> Candidate positions
  ├─> Vector channel (embedder + index)
  │     └─> Candidate positions
  └─> Weighted RRF merge
        └─> Optional rerank
              └─> Top-k results
```

The vector channel is best-effort: a missing index or a failing embedder
degrades the engine to lexical-only instead of failing the query.

## Example

```rust,no_run
use sift_corpus::{Document, DocumentStore};
use sift_embeddings::HashingEmbedder;
use sift_retrieval::{HybridRetriever, RetrievalConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let docs = vec![Document::new("kb.json", 0, "Returns", "how to return an order")];
    let store = Arc::new(DocumentStore::load(docs)?);
    let embedder = Arc::new(HashingEmbedder::default());

    let retriever = HybridRetriever::new(store, embedder, None, RetrievalConfig::default())?;
    for hit in retriever.search("return an order", 5).await? {
        println!("{} (score: {:.4})", hit.position, hit.score);
    }
    Ok(())
}
```
*/

mod config;
mod error;
pub mod fusion;
mod lexical;
mod rerank;
mod result;
mod retriever;
mod vector;

pub use config::RetrievalConfig;
pub use error::{Result, RetrievalError};
pub use fusion::RankedList;
pub use lexical::LexicalSearcher;
pub use rerank::{Reranker, TermOverlapReranker};
pub use result::{ScoredCandidate, StrategyKind};
pub use retriever::{HybridRetriever, SearchStrategy};
pub use vector::VectorSearcher;
