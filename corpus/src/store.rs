use crate::error::{CorpusError, Result};
use crate::types::{DocId, Document};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

/// Dense matrix of document embeddings, one row per corpus position.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingMatrix {
    dim: usize,
    rows: Vec<Vec<f32>>,
}

impl EmbeddingMatrix {
    /// Build a matrix from raw rows, validating that every row has the
    /// same dimensionality. An empty matrix has dimension zero.
    pub fn new(rows: Vec<Vec<f32>>) -> Result<Self> {
        let dim = rows.first().map_or(0, Vec::len);
        for (row, vector) in rows.iter().enumerate() {
            if vector.len() != dim {
                return Err(CorpusError::DimensionMismatch {
                    row,
                    expected: dim,
                    actual: vector.len(),
                });
            }
        }
        Ok(Self { dim, rows })
    }

    /// Load a matrix from a JSON array-of-float-arrays file.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let rows: Vec<Vec<f32>> = serde_json::from_reader(std::io::BufReader::new(file))?;
        Self::new(rows)
    }

    /// Write the matrix as a JSON array-of-float-arrays file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer(std::io::BufWriter::new(file), &self.rows)?;
        Ok(())
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, position: usize) -> Option<&[f32]> {
        self.rows.get(position).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<f32>] {
        &self.rows
    }
}

/// Ordered, immutable collection of corpus documents.
///
/// Every document gets a dense zero-based position assigned at load time;
/// positions are the working currency of the search and evaluation layers,
/// while [`DocId`]s tie results back to the source data. The store never
/// changes after a successful load, so shared references can be handed to
/// any number of concurrent readers.
#[derive(Debug)]
pub struct DocumentStore {
    documents: Vec<Document>,
    positions: HashMap<DocId, usize>,
    embeddings: Option<EmbeddingMatrix>,
}

impl DocumentStore {
    /// Build a store from ingested documents, assigning positions in
    /// input order. Fails if two documents share an identity.
    pub fn load(documents: Vec<Document>) -> Result<Self> {
        let mut positions = HashMap::with_capacity(documents.len());
        for (position, doc) in documents.iter().enumerate() {
            if positions.insert(doc.id(), position).is_some() {
                return Err(CorpusError::DuplicateDocument {
                    id: doc.id().to_string(),
                });
            }
        }

        info!("Loaded corpus of {} documents", documents.len());
        Ok(Self {
            documents,
            positions,
            embeddings: None,
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Look up a document by position.
    pub fn get(&self, position: usize) -> Result<&Document> {
        self.documents
            .get(position)
            .ok_or(CorpusError::OutOfRange {
                position,
                len: self.documents.len(),
            })
    }

    /// Position of the document with the given identity, if present.
    pub fn position_of(&self, id: &DocId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Attach the embedding matrix for this corpus. The matrix must have
    /// exactly one row per document; dimensional consistency is already
    /// guaranteed by [`EmbeddingMatrix::new`].
    pub fn attach_embeddings(&mut self, matrix: EmbeddingMatrix) -> Result<()> {
        if matrix.len() != self.documents.len() {
            return Err(CorpusError::RowCountMismatch {
                rows: matrix.len(),
                docs: self.documents.len(),
            });
        }
        debug!(
            "Attached {}x{} embedding matrix",
            matrix.len(),
            matrix.dim()
        );
        self.embeddings = Some(matrix);
        Ok(())
    }

    pub fn embeddings(&self) -> Option<&EmbeddingMatrix> {
        self.embeddings.as_ref()
    }
}
