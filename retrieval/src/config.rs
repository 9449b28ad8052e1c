use serde::{Deserialize, Serialize};

/// Configuration for hybrid retrieval
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Fusion weight of the lexical channel
    #[serde(default = "default_lexical_weight")]
    pub lexical_weight: f32,

    /// Fusion weight of the vector channel
    #[serde(default = "default_vector_weight")]
    pub vector_weight: f32,

    /// Each channel is asked for `k * candidate_factor` candidates
    /// before fusion, so documents ranked past `k` in one channel can
    /// still surface in the merged list
    #[serde(default = "default_candidate_factor")]
    pub candidate_factor: usize,

    /// Enable caching of hybrid search results
    #[serde(default = "default_true")]
    pub enable_cache: bool,

    /// Cache size (number of queries to cache)
    #[serde(default = "default_cache_size")]
    pub cache_size: usize,
}

fn default_lexical_weight() -> f32 {
    2.0
}

fn default_vector_weight() -> f32 {
    1.0
}

fn default_candidate_factor() -> usize {
    2
}

fn default_true() -> bool {
    true
}

fn default_cache_size() -> usize {
    100
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            lexical_weight: default_lexical_weight(),
            vector_weight: default_vector_weight(),
            candidate_factor: default_candidate_factor(),
            enable_cache: true,
            cache_size: default_cache_size(),
        }
    }
}

impl RetrievalConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.lexical_weight.is_finite() || self.lexical_weight < 0.0 {
            return Err(format!(
                "lexical_weight must be finite and >= 0, got {}",
                self.lexical_weight
            ));
        }

        if !self.vector_weight.is_finite() || self.vector_weight < 0.0 {
            return Err(format!(
                "vector_weight must be finite and >= 0, got {}",
                self.vector_weight
            ));
        }

        if self.lexical_weight == 0.0 && self.vector_weight == 0.0 {
            return Err("at least one channel weight must be > 0".to_string());
        }

        if self.candidate_factor == 0 {
            return Err("candidate_factor must be > 0".to_string());
        }

        if self.enable_cache && self.cache_size == 0 {
            return Err("cache_size must be > 0 when caching is enabled".to_string());
        }

        Ok(())
    }

    /// Weighted toward exact matches, the corpus pipeline default.
    pub fn lexical_heavy() -> Self {
        Self::default()
    }

    /// Both channels contribute equally.
    pub fn unweighted() -> Self {
        Self {
            lexical_weight: 1.0,
            vector_weight: 1.0,
            ..Default::default()
        }
    }

    /// Weighted toward embedding similarity, for paraphrased queries.
    pub fn vector_heavy() -> Self {
        Self {
            lexical_weight: 1.0,
            vector_weight: 2.0,
            ..Default::default()
        }
    }
}
