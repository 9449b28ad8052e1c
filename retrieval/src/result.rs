use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A candidate produced by one of the search channels.
///
/// Scores are only comparable within one ranked list; the lexical
/// channel ranks by corpus position, the vector channel by cosine
/// similarity, and fusion by summed reciprocal-rank contributions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredCandidate {
    /// Corpus position of the document
    pub position: usize,

    /// Relevance score, higher is better
    pub score: f32,
}

impl ScoredCandidate {
    pub fn new(position: usize, score: f32) -> Self {
        Self { position, score }
    }
}

/// The retrieval strategies the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Substring matching over content and title
    Lexical,
    /// Nearest neighbors in embedding space
    Vector,
    /// Weighted reciprocal-rank fusion of both channels
    Hybrid,
}

impl StrategyKind {
    /// Every strategy, in canonical evaluation order.
    pub const ALL: [StrategyKind; 3] = [
        StrategyKind::Lexical,
        StrategyKind::Vector,
        StrategyKind::Hybrid,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Lexical => "lexical",
            StrategyKind::Vector => "vector",
            StrategyKind::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexical" => Ok(StrategyKind::Lexical),
            "vector" => Ok(StrategyKind::Vector),
            "hybrid" => Ok(StrategyKind::Hybrid),
            other => Err(format!(
                "unknown strategy '{other}', expected lexical, vector or hybrid"
            )),
        }
    }
}
