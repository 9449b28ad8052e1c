use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sift_corpus::{Document, DocumentStore, EmbeddingMatrix};
use sift_embeddings::{Embedder, HashingEmbedder};
use sift_retrieval::{fusion, HybridRetriever, RankedList, RetrievalConfig};
use sift_vector_index::{FlatIndex, VectorIndex};
use std::sync::Arc;
use tokio::runtime::Runtime;

fn sample_corpus(count: usize) -> Vec<Document> {
    (0..count)
        .map(|i| {
            Document::new(
                "bench.json",
                i,
                format!("Article {i}"),
                format!("topic {} covers shipping returns and order {}", i % 50, i),
            )
        })
        .collect()
}

async fn setup_retriever(doc_count: usize) -> Arc<HybridRetriever> {
    let store = Arc::new(DocumentStore::load(sample_corpus(doc_count)).unwrap());
    let embedder = Arc::new(HashingEmbedder::new(64));

    let texts: Vec<String> = store.iter().map(|d| d.content.clone()).collect();
    let rows = embedder.encode_many(&texts).await.unwrap();
    let matrix = EmbeddingMatrix::new(rows).unwrap();
    let index: Arc<dyn VectorIndex> = Arc::new(FlatIndex::from_matrix(&matrix));

    Arc::new(
        HybridRetriever::new(store, embedder, Some(index), RetrievalConfig::default()).unwrap(),
    )
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_fusion");

    for list_len in [100, 1000, 10000] {
        group.throughput(Throughput::Elements(list_len as u64));

        let forward: Vec<usize> = (0..list_len).collect();
        // A permuted second list so the two rankings disagree.
        let permuted: Vec<usize> = (0..list_len).map(|i| (i * 7 + 3) % list_len).collect();

        group.bench_with_input(BenchmarkId::from_parameter(list_len), &list_len, |b, _| {
            b.iter(|| {
                let lists = [
                    RankedList::new(black_box(&forward), 2.0),
                    RankedList::new(black_box(&permuted), 1.0),
                ];
                black_box(fusion::merge(&lists, 10));
            });
        });
    }

    group.finish();
}

fn bench_search_latency(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("hybrid_search");

    for doc_count in [100, 1000, 5000] {
        group.throughput(Throughput::Elements(doc_count as u64));

        let retriever = rt.block_on(setup_retriever(doc_count));

        group.bench_with_input(BenchmarkId::from_parameter(doc_count), &doc_count, |b, _| {
            b.to_async(&rt).iter(|| {
                let retriever = Arc::clone(&retriever);
                async move {
                    let query = format!("shipping order {}", rand::random::<u32>());
                    let results = retriever.search(black_box(&query), 10).await.unwrap();
                    black_box(results);
                }
            });
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let retriever = rt.block_on(setup_retriever(1000));

    let mut group = c.benchmark_group("cache");

    group.bench_function("cold_cache", |b| {
        b.to_async(&rt).iter(|| {
            let retriever = Arc::clone(&retriever);
            async move {
                let query = format!("unique query {}", rand::random::<u32>());
                let results = retriever.search(black_box(&query), 10).await.unwrap();
                black_box(results);
            }
        });
    });

    let _ = rt.block_on(retriever.search("cached query", 10));
    group.bench_function("warm_cache", |b| {
        b.to_async(&rt).iter(|| {
            let retriever = Arc::clone(&retriever);
            async move {
                let results = retriever.search(black_box("cached query"), 10).await.unwrap();
                black_box(results);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_merge, bench_search_latency, bench_cache);
criterion_main!(benches);
