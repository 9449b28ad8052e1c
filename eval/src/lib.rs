//! # Sift Eval
//!
//! Retrieval quality evaluation: gold datasets, id resolution, binary
//! recall@k and mean reciprocal rank, and a harness that scores every
//! strategy over the same queries. Gold ids that resolve to no document
//! are collected and reported, never counted as misses; a coverage
//! check surfaces them before an evaluation run quietly skips queries.
//!
//! ## Example
//!
//! ```
//! use sift_corpus::{Document, DocumentStore};
//! use sift_eval::resolver;
//!
//! let store = DocumentStore::load(vec![
//!     Document::new("a.json", 0, "", "transformer overheating fault"),
//! ])?;
//!
//! let resolution = resolver::resolve(&store, &["a.json::0".to_string()]);
//! assert_eq!(resolution.resolved.len(), 1);
//! # Ok::<(), sift_eval::EvalError>(())
//! ```

pub mod coverage;
pub mod dataset;
mod error;
pub mod harness;
pub mod metrics;
pub mod resolver;

pub use coverage::CoverageReport;
pub use dataset::{EvalDataset, GoldQuery};
pub use error::{EvalError, Result};
pub use harness::{EvaluationReport, StrategyReport};
pub use resolver::Resolution;
