//! Pending-file embedding worker.
//!
//! Callers drop `{ "id": …, "content": … }` files into
//! `<dir>/pending/`. One pass embeds every pending item through the
//! batch service, writes `<id>.emb` (raw little-endian f32) and a
//! `<id>.json` done marker into `<dir>`, then removes the consumed
//! pending files.

use anyhow::Context;
use log::{info, warn};
use reqwest::Client;
use sift_embeddings::protocol::{EmbedBatchResponse, EmbedItem};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Outcome of one worker pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerSummary {
    pub consumed: usize,
    pub written: usize,
}

/// Run one polling pass. An empty or missing pending directory is a
/// clean no-op; a pending file that cannot be parsed is skipped (and
/// left in place) with a warning.
pub async fn run_worker_pass(dir: &Path, endpoint: &str) -> anyhow::Result<WorkerSummary> {
    let pending_dir = dir.join("pending");
    let (batch, consumed) = scan_pending(&pending_dir)?;
    if batch.is_empty() {
        info!("No pending embedding requests in {}", pending_dir.display());
        return Ok(WorkerSummary::default());
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?;
    let url = format!("{}/embed_batch", endpoint.trim_end_matches('/'));
    let response = client
        .post(&url)
        .json(&batch)
        .send()
        .await
        .with_context(|| format!("Failed to reach embedding service at {url}"))?
        .error_for_status()
        .context("Embedding service rejected the batch")?;
    let parsed: EmbedBatchResponse = response
        .json()
        .await
        .context("Failed to parse embedding service response")?;

    let mut written = 0;
    for (id, vector) in &parsed.results {
        write_embedding(dir, id, vector)
            .with_context(|| format!("Failed to write embedding for id {id}"))?;
        written += 1;
    }

    for path in &consumed {
        if let Err(err) = fs::remove_file(path) {
            warn!(
                "Failed to remove consumed pending file {}: {err}",
                path.display()
            );
        }
    }

    info!("Worker pass wrote {written} embeddings to {}", dir.display());
    Ok(WorkerSummary {
        consumed: consumed.len(),
        written,
    })
}

/// Collect parseable pending items and the paths they came from, in
/// path order so batches are stable across runs.
fn scan_pending(pending_dir: &Path) -> anyhow::Result<(Vec<EmbedItem>, Vec<PathBuf>)> {
    let mut batch = Vec::new();
    let mut consumed = Vec::new();
    if !pending_dir.is_dir() {
        return Ok((batch, consumed));
    }

    let mut paths: Vec<PathBuf> = fs::read_dir(pending_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        let item = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|raw| serde_json::from_str::<EmbedItem>(&raw).map_err(anyhow::Error::from));
        match item {
            Ok(item) => {
                batch.push(item);
                consumed.push(path);
            }
            Err(err) => warn!("Skipping unreadable pending file {}: {err}", path.display()),
        }
    }
    Ok((batch, consumed))
}

fn write_embedding(dir: &Path, id: &str, vector: &[f32]) -> anyhow::Result<()> {
    let mut bytes = Vec::with_capacity(vector.len() * 4);
    for value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    fs::write(dir.join(format!("{id}.emb")), bytes)?;

    let marker = serde_json::json!({ "id": id, "status": "done" });
    fs::write(dir.join(format!("{id}.json")), serde_json::to_vec(&marker)?)?;
    Ok(())
}
