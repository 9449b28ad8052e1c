use crate::data;
use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use sift_retrieval::{RetrievalConfig, ScoredCandidate, StrategyKind};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Number of results to return
    #[arg(long, default_value_t = 10)]
    pub k: usize,

    /// Strategy to answer with
    #[arg(long, default_value = "hybrid")]
    pub strategy: StrategyKind,

    /// Weight of the lexical channel in fusion
    #[arg(long, default_value_t = 2.0)]
    pub lexical_weight: f32,

    /// Weight of the vector channel in fusion
    #[arg(long, default_value_t = 1.0)]
    pub vector_weight: f32,

    /// Show longer content previews
    #[arg(short, long)]
    pub verbose: bool,
}

pub async fn run_search(data_dir: &Path, args: SearchArgs) -> Result<()> {
    let store = data::load_store(data_dir)?;
    let config = RetrievalConfig {
        lexical_weight: args.lexical_weight,
        vector_weight: args.vector_weight,
        ..Default::default()
    };
    let retriever = data::build_retriever(Arc::clone(&store), config)?;

    let candidates: Vec<ScoredCandidate> = match args.strategy {
        StrategyKind::Lexical => retriever
            .search_lexical(&args.query, args.k)
            .into_iter()
            .map(|position| ScoredCandidate::new(position, 1.0))
            .collect(),
        StrategyKind::Vector => retriever
            .search_vector(&args.query, args.k)
            .await
            .context("Vector search failed")?,
        StrategyKind::Hybrid => retriever
            .search(&args.query, args.k)
            .await
            .context("Hybrid search failed")?,
    };

    if candidates.is_empty() {
        println!("{} No results found", "✗".bright_red());
        return Ok(());
    }

    let preview_len = if args.verbose { 1200 } else { 400 };
    for (rank, candidate) in candidates.iter().enumerate() {
        let doc = store.get(candidate.position)?;
        println!(
            "{} idx={} score={} src={} title={}",
            format!("#{}", rank + 1).bright_yellow(),
            candidate.position,
            format!("{:.4}", candidate.score).bright_green(),
            doc.source_file.bright_cyan(),
            doc.title
        );
        let preview: String = doc
            .content
            .chars()
            .take(preview_len)
            .collect::<String>()
            .replace('\n', " ");
        println!("{preview}");
        println!("{}", "-".repeat(60).bright_black());
    }
    Ok(())
}
