use crate::data;
use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use sift_corpus::{EmbeddingMatrix, loader};
use sift_eval::dataset;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// Directories to scan for .json / .jsonl knowledge-base exports
    #[arg(value_name = "DIR", required = true)]
    pub sources: Vec<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// Number of queries to sample
    #[arg(long, default_value_t = 100)]
    pub count: usize,

    /// Shuffle seed, for reproducible sampling
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output dataset file
    #[arg(long, value_name = "FILE", default_value = "eval_generated.json")]
    pub out: PathBuf,
}

pub async fn run_ingest(data_dir: &Path, args: IngestArgs) -> Result<()> {
    let documents = loader::scan_dirs(&args.sources).context("Failed to scan source directories")?;
    if documents.is_empty() {
        println!("No documents found under the given directories");
        return Ok(());
    }

    println!("Found {} documents, computing embeddings...", documents.len());
    let embedder = data::build_embedder()?;
    let texts: Vec<String> = documents.iter().map(|doc| doc.content.clone()).collect();
    let rows = embedder
        .encode_many(&texts)
        .await
        .context("Failed to compute embeddings")?;
    let matrix = EmbeddingMatrix::new(rows)?;

    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
    loader::write_metadata(&data::metadata_path(data_dir), &documents)?;
    matrix.save(&data::embeddings_path(data_dir))?;

    println!(
        "{} Saved {} documents and a {}-dim embedding matrix to {}",
        "✓".bright_green(),
        documents.len(),
        matrix.dim(),
        data_dir.display()
    );
    Ok(())
}

pub fn run_generate(data_dir: &Path, args: GenerateArgs) -> Result<()> {
    let store = data::load_metadata(data_dir)?;
    let dataset = dataset::generate(&store, args.count, args.seed);
    dataset
        .save(&args.out)
        .with_context(|| format!("Failed to write dataset to {}", args.out.display()))?;
    println!("Wrote {} queries to {}", dataset.len(), args.out.display());
    Ok(())
}
