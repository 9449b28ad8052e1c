use crate::data;
use anyhow::{Context, Result};
use clap::Parser;
use sift_embeddings::protocol::{EmbedBatchResponse, EmbedItem};
use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
pub struct EmbedBatchArgs {
    /// Batch file: a JSON array of {"id", "content"} items
    #[arg(value_name = "FILE")]
    pub batch: PathBuf,
}

#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// Address to bind the embedding service on
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub addr: SocketAddr,
}

#[derive(Debug, Parser)]
pub struct WorkerArgs {
    /// Embeddings directory; pending requests live under <DIR>/pending
    #[arg(long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Embedding service endpoint
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub endpoint: String,
}

pub async fn run_embed_batch(args: EmbedBatchArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.batch)
        .with_context(|| format!("Failed to read batch file {}", args.batch.display()))?;
    let items: Vec<EmbedItem> =
        serde_json::from_str(&raw).context("Batch file is not a JSON array of id/content items")?;

    let embedder = data::build_embedder()?;
    let texts: Vec<String> = items.iter().map(|item| item.content.clone()).collect();
    let vectors = embedder.encode_many(&texts).await?;

    let mut results = HashMap::with_capacity(items.len());
    for (item, vector) in items.into_iter().zip(vectors) {
        results.insert(item.id, vector);
    }
    println!(
        "{}",
        serde_json::to_string(&EmbedBatchResponse { results })?
    );
    Ok(())
}

pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let embedder = data::build_embedder()?;
    sift_embed_server::run_service(args.addr, embedder).await
}

pub async fn run_worker(data_dir: &Path, args: WorkerArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| data_dir.join("embeddings"));
    let summary = sift_embed_server::run_worker_pass(&dir, &args.endpoint).await?;
    if summary.consumed == 0 {
        println!("no pending");
    } else {
        println!(
            "Wrote {} embeddings to {}",
            summary.written,
            dir.display()
        );
    }
    Ok(())
}
