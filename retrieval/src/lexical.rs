use log::debug;
use sift_corpus::DocumentStore;

/// Case-insensitive substring search over document text.
///
/// Haystacks (`content + " " + title`, lowercased) are precomputed per
/// corpus position at build time, so each query is a single linear scan.
/// Hits come back in ascending position order; corpus order is the only
/// ranking the lexical channel has.
pub struct LexicalSearcher {
    haystacks: Vec<String>,
}

impl LexicalSearcher {
    pub fn new(store: &DocumentStore) -> Self {
        let haystacks = store
            .iter()
            .map(|doc| format!("{} {}", doc.content, doc.title).to_lowercase())
            .collect::<Vec<_>>();
        debug!("Built lexical searcher over {} documents", haystacks.len());
        Self { haystacks }
    }

    /// Positions of up to `k` documents containing the trimmed,
    /// lowercased query as a contiguous substring. An empty or
    /// whitespace-only query matches nothing.
    pub fn search(&self, query: &str, k: usize) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for (position, haystack) in self.haystacks.iter().enumerate() {
            if haystack.contains(&needle) {
                hits.push(position);
                if hits.len() == k {
                    break;
                }
            }
        }
        hits
    }

    pub fn len(&self) -> usize {
        self.haystacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.haystacks.is_empty()
    }
}
