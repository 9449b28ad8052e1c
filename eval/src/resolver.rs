use sift_corpus::{DocId, DocumentStore};
use std::collections::BTreeSet;

/// Outcome of mapping external gold ids onto corpus positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub resolved: BTreeSet<usize>,
    pub unresolved: Vec<String>,
}

impl Resolution {
    pub fn is_graded(&self) -> bool {
        !self.resolved.is_empty()
    }
}

/// Map external ids of the form `"<source_file>::<original_index>"` to
/// corpus positions.
///
/// An id lands in `unresolved` when the separator is missing, the
/// suffix is not a base-10 integer, or no document matches. Resolution
/// never fails; callers report coverage gaps without aborting a run.
pub fn resolve(store: &DocumentStore, ids: &[String]) -> Resolution {
    let mut resolution = Resolution::default();
    for raw in ids {
        match DocId::parse(raw).and_then(|id| store.position_of(&id)) {
            Some(position) => {
                resolution.resolved.insert(position);
            }
            None => resolution.unresolved.push(raw.clone()),
        }
    }
    resolution
}
