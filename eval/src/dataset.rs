//! Gold dataset loading, saving, and generation.
//!
//! The wire format is a JSON object with a `queries` array; each entry
//! carries a free-text query and the external ids
//! (`"<source_file>::<original_index>"`) of the documents that count as
//! correct answers.

use crate::error::{EvalError, Result};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sift_corpus::{Document, DocumentStore};
use std::fs;
use std::io::BufWriter;
use std::path::Path;

/// Generated queries only sample documents with more content than this.
pub const MIN_CONTENT_LEN: usize = 20;

/// Generated query text is this many characters of the document content.
pub const QUERY_PREFIX_LEN: usize = 30;

/// A single graded query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoldQuery {
    pub id: String,
    #[serde(rename = "query")]
    pub text: String,
    pub gold: Vec<String>,
}

/// A set of graded queries, as stored in the gold dataset file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalDataset {
    pub queries: Vec<GoldQuery>,
}

impl EvalDataset {
    /// Read a dataset file. Missing or unparseable files are fatal; the
    /// harness cannot grade anything without the gold set.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|source| EvalError::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset: Self =
            serde_json::from_str(&raw).map_err(|source| EvalError::DatasetParse {
                path: path.to_path_buf(),
                source,
            })?;
        info!(
            "Loaded {} eval queries from {}",
            dataset.queries.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Write the dataset as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = fs::File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// Generate a self-gold dataset with the default sampling knobs.
pub fn generate(store: &DocumentStore, count: usize, seed: u64) -> EvalDataset {
    generate_with(store, count, seed, MIN_CONTENT_LEN, QUERY_PREFIX_LEN)
}

/// Generate a dataset by sampling documents: the query is a prefix of
/// the document's own content and the document's external id is the
/// gold answer. The shuffle is seeded so runs are reproducible.
pub fn generate_with(
    store: &DocumentStore,
    count: usize,
    seed: u64,
    min_content_len: usize,
    query_prefix_len: usize,
) -> EvalDataset {
    let mut candidates: Vec<&Document> = store
        .iter()
        .filter(|doc| doc.content.trim().chars().count() > min_content_len)
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    candidates.shuffle(&mut rng);

    let queries: Vec<GoldQuery> = candidates
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(i, doc)| {
            let content = doc.content.trim();
            GoldQuery {
                id: format!("q{}", i + 1),
                text: content.chars().take(query_prefix_len).collect(),
                gold: vec![doc.id().to_string()],
            }
        })
        .collect();

    info!(
        "Generated {} eval queries from {} eligible documents",
        queries.len(),
        store.len()
    );
    EvalDataset { queries }
}
