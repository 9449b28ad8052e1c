use std::collections::BTreeSet;

/// Binary success@k: 1.0 when any of the first `k` ranked positions is
/// in the gold set, else 0.0. Intentionally not a fractional recall;
/// gold sets here are typically singletons.
pub fn recall_at_k(ranked: &[usize], gold: &BTreeSet<usize>, k: usize) -> f64 {
    if ranked.iter().take(k).any(|position| gold.contains(position)) {
        1.0
    } else {
        0.0
    }
}

/// Reciprocal rank of the first gold hit (1-indexed), 0.0 when none of
/// the ranked positions is in the gold set.
pub fn reciprocal_rank(ranked: &[usize], gold: &BTreeSet<usize>) -> f64 {
    for (rank, position) in ranked.iter().enumerate() {
        if gold.contains(position) {
            return 1.0 / (rank + 1) as f64;
        }
    }
    0.0
}
