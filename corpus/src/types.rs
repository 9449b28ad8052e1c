use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the source file and the array index in an external id.
pub const ID_SEPARATOR: &str = "::";

/// A single searchable entry of the knowledge corpus.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    /// Basename of the file this entry was ingested from
    pub source_file: String,

    /// Index of the entry within the source file's array, counting
    /// entries that were skipped during extraction
    pub original_index: usize,

    /// Entry title, empty when the source had none
    #[serde(default)]
    pub title: String,

    /// Searchable text extracted from the entry
    pub content: String,
}

impl Document {
    pub fn new(
        source_file: impl Into<String>,
        original_index: usize,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            original_index,
            title: title.into(),
            content: content.into(),
        }
    }

    /// Stable identity of this document across ingestion runs.
    pub fn id(&self) -> DocId {
        DocId {
            source_file: self.source_file.clone(),
            original_index: self.original_index,
        }
    }
}

/// Identity of a document, independent of its position in the corpus.
///
/// The external form is `"<source_file>::<original_index>"`, the format
/// gold labels use to reference documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocId {
    pub source_file: String,
    pub original_index: usize,
}

impl DocId {
    pub fn new(source_file: impl Into<String>, original_index: usize) -> Self {
        Self {
            source_file: source_file.into(),
            original_index,
        }
    }

    /// Parse an external id of the form `"<source_file>::<index>"`.
    ///
    /// The split happens at the first separator. Returns `None` when the
    /// separator is missing or the index half is not a base-10 integer.
    pub fn parse(raw: &str) -> Option<Self> {
        let (source_file, index) = raw.split_once(ID_SEPARATOR)?;
        let original_index = index.parse::<usize>().ok()?;
        Some(Self {
            source_file: source_file.to_string(),
            original_index,
        })
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.source_file, ID_SEPARATOR, self.original_index
        )
    }
}
