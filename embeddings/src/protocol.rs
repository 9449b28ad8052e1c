//! Wire format of the batch embedding service.
//!
//! A batch request is a bare JSON array of items; the response maps each
//! item id back to its vector. Consumers of these types are the HTTP
//! embedder, the embedding service itself and the pending-file worker.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One text to embed, addressed by caller-chosen id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedItem {
    pub id: String,
    pub content: String,
}

/// Response to a batch request, mapping each item id to its vector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmbedBatchResponse {
    pub results: HashMap<String, Vec<f32>>,
}

/// Body of the health endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
