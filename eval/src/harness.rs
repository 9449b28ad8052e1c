//! Runs every retrieval strategy over a gold dataset and aggregates
//! recall@k and mean reciprocal rank per strategy.

use crate::dataset::EvalDataset;
use crate::error::Result;
use crate::metrics;
use crate::resolver;
use log::{debug, info};
use sift_corpus::DocumentStore;
use sift_retrieval::SearchStrategy;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Aggregated metrics for one strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyReport {
    pub strategy: String,
    pub graded: usize,
    pub recall_at_k: f64,
    pub mrr: f64,
}

/// Full evaluation outcome: one report per strategy in input order,
/// plus the queries and gold ids that could not be graded.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub k: usize,
    pub reports: Vec<StrategyReport>,
    pub ungraded: usize,
    pub unresolved: BTreeMap<String, Vec<String>>,
}

impl EvaluationReport {
    /// Plain-text rendering, one line per strategy.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for report in &self.reports {
            if report.graded == 0 {
                let _ = writeln!(out, "{}: no queries", report.strategy);
            } else {
                let _ = writeln!(
                    out,
                    "{}: Recall@{}={:.4}  MRR={:.4}  n={}",
                    report.strategy, self.k, report.recall_at_k, report.mrr, report.graded
                );
            }
        }
        if self.ungraded > 0 {
            let _ = writeln!(out, "Ungraded queries (no resolved gold ids): {}", self.ungraded);
        }
        if !self.unresolved.is_empty() {
            let _ = writeln!(out, "Unresolved gold identifiers:");
            for (id, query_ids) in &self.unresolved {
                let sample: Vec<&str> = query_ids.iter().take(5).map(String::as_str).collect();
                let _ = writeln!(out, "  {id} referenced by queries: {sample:?}");
            }
        }
        out
    }
}

/// Evaluate each strategy over the dataset at cutoff `k`.
///
/// A query whose gold ids all fail to resolve is skipped before any
/// strategy runs and counted as ungraded; graded means are taken over
/// the remaining queries only.
pub async fn evaluate(
    store: &DocumentStore,
    strategies: &[Box<dyn SearchStrategy>],
    dataset: &EvalDataset,
    k: usize,
) -> Result<EvaluationReport> {
    let mut totals = vec![(0.0f64, 0.0f64, 0usize); strategies.len()];
    let mut ungraded = 0;
    let mut unresolved: BTreeMap<String, Vec<String>> = BTreeMap::new();

    for query in &dataset.queries {
        let resolution = resolver::resolve(store, &query.gold);
        for id in &resolution.unresolved {
            unresolved
                .entry(id.clone())
                .or_default()
                .push(query.id.clone());
        }
        if !resolution.is_graded() {
            debug!("Skipping query '{}': no gold ids resolved", query.id);
            ungraded += 1;
            continue;
        }

        for (slot, strategy) in totals.iter_mut().zip(strategies) {
            let mut ranked = strategy.run(&query.text, k).await?;
            ranked.truncate(k);
            slot.0 += metrics::recall_at_k(&ranked, &resolution.resolved, k);
            slot.1 += metrics::reciprocal_rank(&ranked, &resolution.resolved);
            slot.2 += 1;
        }
    }

    let reports = strategies
        .iter()
        .zip(totals)
        .map(|(strategy, (recall_sum, mrr_sum, graded))| StrategyReport {
            strategy: strategy.name().to_string(),
            graded,
            recall_at_k: if graded == 0 {
                0.0
            } else {
                recall_sum / graded as f64
            },
            mrr: if graded == 0 { 0.0 } else { mrr_sum / graded as f64 },
        })
        .collect();

    info!(
        "Evaluated {} strategies over {} queries ({} ungraded) at k={}",
        strategies.len(),
        dataset.len(),
        ungraded,
        k
    );
    Ok(EvaluationReport {
        k,
        reports,
        ungraded,
        unresolved,
    })
}
