//! # Sift Corpus
//!
//! Document storage for the hybrid retrieval engine. A corpus is an
//! ordered, immutable set of documents ingested from JSON knowledge-base
//! exports, each addressed two ways: by dense zero-based position (the
//! currency of the search layers) and by stable identity
//! `"<source_file>::<original_index>"` (the currency of gold labels).
//!
//! ## Example
//!
//! ```
//! use sift_corpus::{DocId, Document, DocumentStore};
//!
//! let store = DocumentStore::load(vec![
//!     Document::new("faq.json", 0, "Returns", "How to return an order"),
//!     Document::new("faq.json", 1, "Shipping", "Delivery times by region"),
//! ])?;
//!
//! assert_eq!(store.len(), 2);
//! assert_eq!(store.position_of(&DocId::new("faq.json", 1)), Some(1));
//! # Ok::<(), sift_corpus::CorpusError>(())
//! ```

mod error;
pub mod loader;
mod store;
mod types;

pub use error::{CorpusError, Result};
pub use store::{DocumentStore, EmbeddingMatrix};
pub use types::{DocId, Document, ID_SEPARATOR};
