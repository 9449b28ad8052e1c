//! Weighted reciprocal-rank fusion of independently ranked lists.
//!
//! A document at 1-indexed rank `r` in a list of weight `w` contributes
//! `w / r`; contributions for the same document are summed across lists.
//! The merged order depends only on ranks and weights, never on the raw
//! channel scores, which keeps incomparable scoring domains (corpus
//! order vs cosine similarity) from polluting each other.

use crate::result::ScoredCandidate;
use log::debug;
use std::collections::{HashMap, HashSet};

/// One ranked input to the merge, best candidate first.
#[derive(Debug, Clone, Copy)]
pub struct RankedList<'a> {
    pub positions: &'a [usize],
    pub weight: f32,
}

impl<'a> RankedList<'a> {
    pub fn new(positions: &'a [usize], weight: f32) -> Self {
        Self { positions, weight }
    }
}

/// Merge ranked lists into at most `k` fused candidates.
///
/// Each corpus position appears at most once in the output, and only
/// with a nonzero fused score: a position found solely by zero-weight
/// lists is dropped. A position repeated within one list only counts
/// its best rank there. Ordering is by fused score descending, ties
/// broken by ascending position, so a merge of identical inputs is
/// always byte-for-byte identical.
pub fn merge(lists: &[RankedList<'_>], k: usize) -> Vec<ScoredCandidate> {
    let mut scores: HashMap<usize, f32> = HashMap::new();
    for list in lists {
        let mut seen = HashSet::new();
        for (rank, &position) in list.positions.iter().enumerate() {
            if !seen.insert(position) {
                continue;
            }
            let contribution = list.weight / (rank as f32 + 1.0);
            *scores.entry(position).or_insert(0.0) += contribution;
        }
    }

    let mut merged: Vec<ScoredCandidate> = scores
        .into_iter()
        .filter(|&(_, score)| score > 0.0)
        .map(|(position, score)| ScoredCandidate::new(position, score))
        .collect();
    merged.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.position.cmp(&b.position))
    });
    merged.truncate(k);

    debug!("Fused {} lists into {} candidates", lists.len(), merged.len());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn positions(candidates: &[ScoredCandidate]) -> Vec<usize> {
        candidates.iter().map(|c| c.position).collect()
    }

    #[test]
    fn test_weighted_contributions_sum_across_lists() {
        let lexical = [3, 1, 2];
        let vector = [1];
        let merged = merge(
            &[
                RankedList::new(&lexical, 1.0),
                RankedList::new(&vector, 2.0),
            ],
            10,
        );

        assert_eq!(positions(&merged), vec![1, 3, 2]);
        // 1.0/2 + 2.0/1, 1.0/1, 1.0/3
        assert!((merged[0].score - 2.5).abs() < 1e-6);
        assert!((merged[1].score - 1.0).abs() < 1e-6);
        assert!((merged[2].score - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_shared_top_rank_adds_weights() {
        let a = [5];
        let b = [5];
        let merged = merge(&[RankedList::new(&a, 2.0), RankedList::new(&b, 1.0)], 10);
        assert_eq!(merged.len(), 1);
        assert!((merged[0].score - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_duplicate_positions_in_output() {
        let a = [1, 2, 3];
        let b = [3, 2, 1];
        let merged = merge(&[RankedList::new(&a, 1.0), RankedList::new(&b, 1.0)], 10);
        let mut seen = positions(&merged);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), merged.len());
    }

    #[test]
    fn test_repeat_within_one_list_counts_best_rank_only() {
        let a = [7, 7, 7];
        let merged = merge(&[RankedList::new(&a, 1.0)], 10);
        assert_eq!(merged.len(), 1);
        assert!((merged[0].score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ties_break_by_ascending_position() {
        let a = [9];
        let b = [4];
        let merged = merge(&[RankedList::new(&a, 1.0), RankedList::new(&b, 1.0)], 10);
        assert_eq!(positions(&merged), vec![4, 9]);
    }

    #[test]
    fn test_merge_is_deterministic() {
        let a = [0, 4, 2, 8];
        let b = [8, 0, 5];
        let lists = [RankedList::new(&a, 2.0), RankedList::new(&b, 1.0)];
        let first = merge(&lists, 10);
        let second = merge(&lists, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_truncates_to_k() {
        let a = [1, 2, 3, 4, 5];
        let merged = merge(&[RankedList::new(&a, 1.0)], 2);
        assert_eq!(positions(&merged), vec![1, 2]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge(&[], 10).is_empty());
        let empty: [usize; 0] = [];
        assert!(merge(&[RankedList::new(&empty, 1.0)], 10).is_empty());
    }

    #[test]
    fn test_zero_weight_list_is_excluded_entirely() {
        let a = [7, 8];
        let b = [1, 2];
        let merged = merge(&[RankedList::new(&a, 0.0), RankedList::new(&b, 1.0)], 10);
        assert_eq!(positions(&merged), vec![1, 2]);
        assert!((merged[0].score - 1.0).abs() < 1e-6);
    }
}
