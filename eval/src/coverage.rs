//! Corpus coverage check for gold datasets: reports every referenced
//! gold id that no document in the store renders, before an evaluation
//! silently skips those queries.

use crate::dataset::EvalDataset;
use sift_corpus::DocumentStore;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

const MISSING_EXAMPLE_CAP: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub total_queries: usize,
    pub unique_gold_ids: usize,
    /// Missing gold id, mapped to the ids of the queries referencing it.
    pub missing: BTreeMap<String, Vec<String>>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Total queries: {}", self.total_queries);
        let _ = writeln!(
            out,
            "Total unique gold ids referenced: {}",
            self.unique_gold_ids
        );
        let _ = writeln!(out, "Missing gold identifiers count: {}", self.missing.len());
        if self.missing.is_empty() {
            let _ = writeln!(out, "All gold identifiers present in the corpus");
        } else {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "Examples of missing gold identifiers (up to {MISSING_EXAMPLE_CAP}):"
            );
            for (id, query_ids) in self.missing.iter().take(MISSING_EXAMPLE_CAP) {
                let sample: Vec<&str> = query_ids.iter().take(5).map(String::as_str).collect();
                let _ = writeln!(out, "  {id} referenced by queries: {sample:?}");
            }
        }
        out
    }
}

/// Check every gold id in the dataset against the store's rendered ids.
///
/// Membership is literal string equality with `"<source_file>::<index>"`,
/// so an id that would parse but renders differently (say a zero-padded
/// index) still counts as missing.
pub fn check(store: &DocumentStore, dataset: &EvalDataset) -> CoverageReport {
    let known: BTreeSet<String> = store.iter().map(|doc| doc.id().to_string()).collect();

    let mut unique: BTreeSet<&str> = BTreeSet::new();
    let mut missing: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for query in &dataset.queries {
        for gold in &query.gold {
            unique.insert(gold);
            if !known.contains(gold) {
                missing
                    .entry(gold.clone())
                    .or_default()
                    .push(query.id.clone());
            }
        }
    }

    CoverageReport {
        total_queries: dataset.len(),
        unique_gold_ids: unique.len(),
        missing,
    }
}
