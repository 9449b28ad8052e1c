use crate::result::ScoredCandidate;
use log::debug;
use sift_corpus::{Document, DocumentStore};

/// Optional post-fusion refinement step.
///
/// Implementations adjust candidate scores with signals fusion cannot
/// see (document text, external models) and re-sort. A cross-encoder
/// belongs behind this trait.
pub trait Reranker: Send + Sync {
    fn rerank(
        &self,
        query: &str,
        candidates: Vec<ScoredCandidate>,
        store: &DocumentStore,
    ) -> Vec<ScoredCandidate>;
}

/// Reranker boosting candidates whose text overlaps the query.
///
/// Multiplicative boosts for an exact phrase hit, a title hit and
/// per-term coverage, clamped to [0.5, 2.0] so no single signal can
/// eject a strong fusion candidate.
pub struct TermOverlapReranker;

impl TermOverlapReranker {
    fn boost(query: &str, doc: &Document) -> f32 {
        let content = doc.content.to_lowercase();
        let title = doc.title.to_lowercase();

        let mut boost = 1.0;
        if content.contains(query) {
            boost *= 1.3;
        }
        if !title.is_empty() && title.contains(query) {
            boost *= 1.15;
        }

        let terms: Vec<&str> = query.split_whitespace().collect();
        if !terms.is_empty() {
            let hits = terms.iter().filter(|term| content.contains(*term)).count();
            let coverage = hits as f32 / terms.len() as f32;
            boost *= 1.0 + coverage * 0.2;
        }

        boost.clamp(0.5, 2.0)
    }
}

impl Reranker for TermOverlapReranker {
    fn rerank(
        &self,
        query: &str,
        mut candidates: Vec<ScoredCandidate>,
        store: &DocumentStore,
    ) -> Vec<ScoredCandidate> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || candidates.is_empty() {
            return candidates;
        }
        debug!("Term-overlap reranking {} candidates", candidates.len());

        for candidate in &mut candidates {
            if let Ok(doc) = store.get(candidate.position) {
                candidate.score *= Self::boost(&query, doc);
            }
        }

        candidates.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.position.cmp(&b.position))
        });
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_store() -> DocumentStore {
        DocumentStore::load(vec![
            Document::new("kb.json", 0, "Shipping", "delivery times by region"),
            Document::new("kb.json", 1, "Returns", "how to return an order"),
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_phrase_hit_overtakes_close_score() {
        let store = sample_store();
        let candidates = vec![
            ScoredCandidate::new(0, 1.0),
            ScoredCandidate::new(1, 0.95),
        ];
        let reranked = TermOverlapReranker.rerank("return an order", candidates, &store);
        assert_eq!(reranked[0].position, 1);
    }

    #[test]
    fn test_boost_is_clamped() {
        let doc = Document::new("kb.json", 0, "return", "return return an order return");
        let boost = TermOverlapReranker::boost("return an order", &doc);
        assert!(boost <= 2.0);
        assert!(boost >= 0.5);
    }

    #[test]
    fn test_empty_query_is_a_no_op() {
        let store = sample_store();
        let candidates = vec![ScoredCandidate::new(0, 1.0), ScoredCandidate::new(1, 0.5)];
        let reranked = TermOverlapReranker.rerank("  ", candidates.clone(), &store);
        assert_eq!(reranked, candidates);
    }

    #[test]
    fn test_unknown_position_keeps_score() {
        let store = sample_store();
        let candidates = vec![ScoredCandidate::new(9, 1.0)];
        let reranked = TermOverlapReranker.rerank("order", candidates, &store);
        assert_eq!(reranked[0].score, 1.0);
    }
}
