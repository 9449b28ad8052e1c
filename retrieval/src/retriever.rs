use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};
use crate::fusion::{self, RankedList};
use crate::lexical::LexicalSearcher;
use crate::rerank::Reranker;
use crate::result::{ScoredCandidate, StrategyKind};
use crate::vector::VectorSearcher;
use async_trait::async_trait;
use log::{debug, info, warn};
use lru::LruCache;
use sift_corpus::DocumentStore;
use sift_embeddings::Embedder;
use sift_vector_index::VectorIndex;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Hybrid retrieval engine combining lexical and vector search.
///
/// The wiring is fixed at construction: a corpus, an embedder, and
/// optionally a vector index. Everything is immutable afterwards except
/// the query cache, so one engine serves any number of concurrent
/// callers.
pub struct HybridRetriever {
    store: Arc<DocumentStore>,
    lexical: LexicalSearcher,
    vector: VectorSearcher,
    reranker: Option<Box<dyn Reranker>>,
    cache: Option<Mutex<LruCache<String, Vec<ScoredCandidate>>>>,
    config: RetrievalConfig,
}

impl HybridRetriever {
    pub fn new(
        store: Arc<DocumentStore>,
        embedder: Arc<dyn Embedder>,
        index: Option<Arc<dyn VectorIndex>>,
        config: RetrievalConfig,
    ) -> Result<Self> {
        config.validate().map_err(RetrievalError::InvalidConfig)?;

        let lexical = LexicalSearcher::new(&store);
        let vector = VectorSearcher::new(embedder, index);
        let cache = if config.enable_cache {
            let size = NonZeroUsize::new(config.cache_size)
                .ok_or_else(|| RetrievalError::InvalidConfig("cache_size must be > 0".into()))?;
            Some(Mutex::new(LruCache::new(size)))
        } else {
            None
        };

        info!(
            "Initialized hybrid retriever over {} documents (vector channel: {})",
            store.len(),
            if vector.has_index() { "on" } else { "off" }
        );
        Ok(Self {
            store,
            lexical,
            vector,
            reranker: None,
            cache,
            config,
        })
    }

    /// Attach a reranking step applied after fusion.
    pub fn with_reranker(mut self, reranker: Box<dyn Reranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Run the full hybrid pipeline: over-fetch both channels, fuse,
    /// optionally rerank. A failing vector channel degrades to
    /// lexical-only rather than failing the search.
    pub async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredCandidate>> {
        if query.trim().is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let cache_key = format!("{k}:{query}");
        if let Some(cache) = &self.cache {
            let mut cache = cache.lock().await;
            if let Some(cached) = cache.get(&cache_key) {
                debug!("Cache hit for '{query}'");
                return Ok(cached.clone());
            }
        }

        let pool = k.saturating_mul(self.config.candidate_factor);
        let lexical_hits = self.lexical.search(query, pool);
        debug!("Lexical channel found {} candidates", lexical_hits.len());

        let vector_hits = match self.vector.search(query, pool).await {
            Ok(hits) => hits,
            Err(err) => {
                warn!("Vector channel unavailable, continuing lexical-only: {err}");
                Vec::new()
            }
        };
        debug!("Vector channel found {} candidates", vector_hits.len());

        let vector_positions: Vec<usize> = vector_hits.iter().map(|c| c.position).collect();
        let lists = [
            RankedList::new(&lexical_hits, self.config.lexical_weight),
            RankedList::new(&vector_positions, self.config.vector_weight),
        ];
        let mut merged = fusion::merge(&lists, k);

        if let Some(reranker) = &self.reranker {
            merged = reranker.rerank(query, merged, &self.store);
        }

        if let Some(cache) = &self.cache {
            cache.lock().await.put(cache_key, merged.clone());
        }
        Ok(merged)
    }

    /// Lexical channel only: positions in ascending corpus order.
    pub fn search_lexical(&self, query: &str, k: usize) -> Vec<usize> {
        self.lexical.search(query, k)
    }

    /// Vector channel only. Errors propagate; callers that prefer
    /// degradation handle them (the hybrid pipeline and the vector
    /// strategy both do).
    pub async fn search_vector(&self, query: &str, k: usize) -> Result<Vec<ScoredCandidate>> {
        self.vector.search(query, k).await
    }

    pub async fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.lock().await.clear();
            info!("Search cache cleared");
        }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// One strategy handle, borrowing this engine.
    pub fn strategy(self: &Arc<Self>, kind: StrategyKind) -> Box<dyn SearchStrategy> {
        match kind {
            StrategyKind::Lexical => Box::new(LexicalStrategy {
                retriever: Arc::clone(self),
            }),
            StrategyKind::Vector => Box::new(VectorStrategy {
                retriever: Arc::clone(self),
            }),
            StrategyKind::Hybrid => Box::new(HybridStrategy {
                retriever: Arc::clone(self),
            }),
        }
    }

    /// All strategies in canonical evaluation order.
    pub fn strategies(self: &Arc<Self>) -> Vec<Box<dyn SearchStrategy>> {
        StrategyKind::ALL
            .iter()
            .map(|kind| self.strategy(*kind))
            .collect()
    }
}

/// A named way of answering a query with ranked corpus positions.
///
/// This is the seam the evaluation harness scores through; it neither
/// knows nor cares how the positions were produced.
#[async_trait]
pub trait SearchStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Ranked corpus positions, best first, at most `k`.
    async fn run(&self, query: &str, k: usize) -> Result<Vec<usize>>;
}

struct LexicalStrategy {
    retriever: Arc<HybridRetriever>,
}

#[async_trait]
impl SearchStrategy for LexicalStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Lexical
    }

    async fn run(&self, query: &str, k: usize) -> Result<Vec<usize>> {
        Ok(self.retriever.search_lexical(query, k))
    }
}

struct VectorStrategy {
    retriever: Arc<HybridRetriever>,
}

#[async_trait]
impl SearchStrategy for VectorStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Vector
    }

    async fn run(&self, query: &str, k: usize) -> Result<Vec<usize>> {
        match self.retriever.search_vector(query, k).await {
            Ok(candidates) => Ok(candidates.into_iter().map(|c| c.position).collect()),
            Err(err) => {
                warn!("Vector strategy unavailable for '{query}': {err}");
                Ok(Vec::new())
            }
        }
    }
}

struct HybridStrategy {
    retriever: Arc<HybridRetriever>,
}

#[async_trait]
impl SearchStrategy for HybridStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Hybrid
    }

    async fn run(&self, query: &str, k: usize) -> Result<Vec<usize>> {
        let candidates = self.retriever.search(query, k).await?;
        Ok(candidates.into_iter().map(|c| c.position).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rerank::TermOverlapReranker;
    use pretty_assertions::assert_eq;
    use sift_corpus::{Document, EmbeddingMatrix};
    use sift_embeddings::{EmbeddingError, HashingEmbedder};
    use sift_vector_index::FlatIndex;

    fn sample_documents() -> Vec<Document> {
        vec![
            Document::new("kb.json", 0, "Shipping", "delivery times by region"),
            Document::new("kb.json", 1, "Returns", "how to return an order"),
            Document::new("kb.json", 2, "Tracking", "track your parcel order online"),
            Document::new("kb.json", 3, "Refunds", "refund speed after a return"),
        ]
    }

    async fn retriever_with_index(config: RetrievalConfig) -> Arc<HybridRetriever> {
        let store = Arc::new(DocumentStore::load(sample_documents()).unwrap());
        let embedder = Arc::new(HashingEmbedder::new(64));
        let texts: Vec<String> = store.iter().map(|d| d.content.clone()).collect();
        let rows = embedder.encode_many(&texts).await.unwrap();
        let matrix = EmbeddingMatrix::new(rows).unwrap();
        let index: Arc<dyn VectorIndex> = Arc::new(FlatIndex::from_matrix(&matrix));
        Arc::new(HybridRetriever::new(store, embedder, Some(index), config).unwrap())
    }

    fn retriever_without_index() -> Arc<HybridRetriever> {
        let store = Arc::new(DocumentStore::load(sample_documents()).unwrap());
        let embedder = Arc::new(HashingEmbedder::new(64));
        Arc::new(
            HybridRetriever::new(store, embedder, None, RetrievalConfig::default()).unwrap(),
        )
    }

    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn encode_many(&self, _texts: &[String]) -> sift_embeddings::Result<Vec<Vec<f32>>> {
            Err(EmbeddingError::Generation("embedder down".into()))
        }

        fn dimension(&self) -> usize {
            64
        }
    }

    async fn retriever_with_failing_embedder() -> Arc<HybridRetriever> {
        let store = Arc::new(DocumentStore::load(sample_documents()).unwrap());
        let healthy = HashingEmbedder::new(64);
        let texts: Vec<String> = store.iter().map(|d| d.content.clone()).collect();
        let rows = healthy.encode_many(&texts).await.unwrap();
        let matrix = EmbeddingMatrix::new(rows).unwrap();
        let index: Arc<dyn VectorIndex> = Arc::new(FlatIndex::from_matrix(&matrix));
        Arc::new(
            HybridRetriever::new(
                store,
                Arc::new(FailingEmbedder),
                Some(index),
                RetrievalConfig::default(),
            )
            .unwrap(),
        )
    }

    #[test_log::test(tokio::test)]
    async fn test_hybrid_prefers_documents_both_channels_rank() {
        let retriever = retriever_with_index(RetrievalConfig::default()).await;
        let results = retriever.search("return an order", 4).await.unwrap();
        assert!(!results.is_empty());
        // Position 1 matches the substring and embeds closest.
        assert_eq!(results[0].position, 1);

        let mut seen: Vec<usize> = results.iter().map(|c| c.position).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), results.len());
    }

    #[test_log::test(tokio::test)]
    async fn test_hybrid_without_index_matches_lexical_order() {
        let retriever = retriever_without_index();
        let fused = retriever.search("order", 4).await.unwrap();
        let lexical = retriever.search_lexical("order", 4);
        let fused_positions: Vec<usize> = fused.iter().map(|c| c.position).collect();
        assert_eq!(fused_positions, lexical);
    }

    #[test_log::test(tokio::test)]
    async fn test_empty_query_returns_empty() {
        let retriever = retriever_with_index(RetrievalConfig::default()).await;
        assert!(retriever.search("   ", 5).await.unwrap().is_empty());
        assert!(retriever.search_lexical("", 5).is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_failing_embedder_degrades_to_lexical() {
        let retriever = retriever_with_failing_embedder().await;
        let fused = retriever.search("order", 4).await.unwrap();
        let lexical = retriever.search_lexical("order", 4);
        let fused_positions: Vec<usize> = fused.iter().map(|c| c.position).collect();
        assert_eq!(fused_positions, lexical);

        // The standalone vector channel still reports the failure.
        assert!(retriever.search_vector("order", 4).await.is_err());

        // The strategy layer degrades it to an empty ranking instead.
        let strategy = retriever.strategy(StrategyKind::Vector);
        assert!(strategy.run("order", 4).await.unwrap().is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_repeated_query_is_stable() {
        let retriever = retriever_with_index(RetrievalConfig::default()).await;
        let first = retriever.search("parcel", 3).await.unwrap();
        let second = retriever.search("parcel", 3).await.unwrap();
        assert_eq!(first, second);

        retriever.clear_cache().await;
        let third = retriever.search("parcel", 3).await.unwrap();
        assert_eq!(first, third);
    }

    #[test_log::test(tokio::test)]
    async fn test_strategies_come_in_canonical_order() {
        let retriever = retriever_with_index(RetrievalConfig::default()).await;
        let strategies = retriever.strategies();
        let names: Vec<&str> = strategies.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["lexical", "vector", "hybrid"]);
    }

    #[test_log::test(tokio::test)]
    async fn test_reranker_is_applied() {
        let store = Arc::new(DocumentStore::load(sample_documents()).unwrap());
        let embedder = Arc::new(HashingEmbedder::new(64));
        let retriever = Arc::new(
            HybridRetriever::new(store, embedder, None, RetrievalConfig::default())
                .unwrap()
                .with_reranker(Box::new(TermOverlapReranker)),
        );
        // Lexical order alone would put position 1 ("how to return an
        // order") before 3; the exact-phrase boost on "a return" cannot
        // reorder equals-ranked docs here, so just assert the pipeline
        // runs and stays duplicate-free.
        let results = retriever.search("return", 4).await.unwrap();
        let mut seen: Vec<usize> = results.iter().map(|c| c.position).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), results.len());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let store = Arc::new(DocumentStore::load(sample_documents()).unwrap());
        let embedder = Arc::new(HashingEmbedder::new(64));
        let config = RetrievalConfig {
            candidate_factor: 0,
            ..Default::default()
        };
        assert!(matches!(
            HybridRetriever::new(store, embedder, None, config),
            Err(RetrievalError::InvalidConfig(_))
        ));
    }
}
