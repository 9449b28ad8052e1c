use crate::data;
use anyhow::Result;
use clap::Parser;
use sift_eval::{EvalDataset, coverage, harness};
use sift_retrieval::RetrievalConfig;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Parser)]
pub struct EvaluateArgs {
    /// Gold dataset file
    #[arg(long, value_name = "FILE")]
    pub dataset: PathBuf,

    /// Rank cutoff for recall and truncation
    #[arg(long, default_value_t = 10)]
    pub k: usize,

    /// Weight of the lexical channel in fusion
    #[arg(long, default_value_t = 2.0)]
    pub lexical_weight: f32,

    /// Weight of the vector channel in fusion
    #[arg(long, default_value_t = 1.0)]
    pub vector_weight: f32,
}

#[derive(Debug, Parser)]
pub struct CheckGoldArgs {
    /// Gold dataset file
    #[arg(long, value_name = "FILE")]
    pub dataset: PathBuf,
}

pub async fn run_evaluate(data_dir: &Path, args: EvaluateArgs) -> Result<()> {
    let store = data::load_store(data_dir)?;
    let dataset = EvalDataset::load(&args.dataset)?;

    let config = RetrievalConfig {
        lexical_weight: args.lexical_weight,
        vector_weight: args.vector_weight,
        ..Default::default()
    };
    let retriever = data::build_retriever(Arc::clone(&store), config)?;
    let strategies = retriever.strategies();

    let report = harness::evaluate(&store, &strategies, &dataset, args.k).await?;
    print!("{}", report.render());
    Ok(())
}

pub fn run_check_gold(data_dir: &Path, args: CheckGoldArgs) -> Result<()> {
    let store = data::load_metadata(data_dir)?;
    let dataset = EvalDataset::load(&args.dataset)?;
    let report = coverage::check(&store, &dataset);
    print!("{}", report.render());
    Ok(())
}
