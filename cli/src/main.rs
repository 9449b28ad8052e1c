//! `sift` searches and evaluates JSON knowledge-base corpora with a
//! hybrid lexical + vector engine.
//!
//! ```bash
//! sift ingest exports/            # build metadata + embedding matrix
//! sift search "transformer fault" --k 5
//! sift generate --count 100 --out eval.json
//! sift evaluate --dataset eval.json --k 10
//! sift check-gold --dataset eval.json
//! sift serve --addr 127.0.0.1:8000
//! ```

mod corpus_cmd;
mod data;
mod embed_cmd;
mod eval_cmd;
mod search_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Hybrid retrieval and evaluation over JSON knowledge-base exports.
#[derive(Debug, Parser)]
#[command(name = "sift", version, about)]
struct Cli {
    /// Directory holding corpus metadata and the embedding matrix
    #[arg(long, value_name = "DIR", default_value = "data", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ingest knowledge-base exports and compute embeddings
    Ingest(corpus_cmd::IngestArgs),

    /// Search the ingested corpus
    Search(search_cmd::SearchArgs),

    /// Score every retrieval strategy against a gold dataset
    Evaluate(eval_cmd::EvaluateArgs),

    /// Report gold ids that match no document in the corpus
    CheckGold(eval_cmd::CheckGoldArgs),

    /// Generate a self-gold eval dataset by sampling the corpus
    Generate(corpus_cmd::GenerateArgs),

    /// Embed a batch file and print the results JSON
    EmbedBatch(embed_cmd::EmbedBatchArgs),

    /// Run the batch embedding service
    Serve(embed_cmd::ServeArgs),

    /// Run one pass of the pending-file embedding worker
    Worker(embed_cmd::WorkerArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Ingest(args) => corpus_cmd::run_ingest(&cli.data_dir, args).await,
        Command::Search(args) => search_cmd::run_search(&cli.data_dir, args).await,
        Command::Evaluate(args) => eval_cmd::run_evaluate(&cli.data_dir, args).await,
        Command::CheckGold(args) => eval_cmd::run_check_gold(&cli.data_dir, args),
        Command::Generate(args) => corpus_cmd::run_generate(&cli.data_dir, args),
        Command::EmbedBatch(args) => embed_cmd::run_embed_batch(args).await,
        Command::Serve(args) => embed_cmd::run_serve(args).await,
        Command::Worker(args) => embed_cmd::run_worker(&cli.data_dir, args).await,
    }
}
