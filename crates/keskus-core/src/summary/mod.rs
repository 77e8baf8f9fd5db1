pub mod engine;
pub mod outcome;

pub use engine::{icon_signature, summarize};
pub use outcome::{AggregatedByProtection, AggregatedItem, SummaryResult};

use crate::store::backend::KeyValueStore;
use crate::store::ExtractionStore;

/// Caches the last summary, recomputing when the store is mutated or a
/// different store is passed in.
#[derive(Debug, Default)]
pub struct MemoizedSummary {
    cached: Option<((u64, u64), SummaryResult)>,
    computations: usize,
}

impl MemoizedSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<S: KeyValueStore>(&mut self, store: &ExtractionStore<S>) -> &SummaryResult {
        let key = (store.instance_id(), store.version());
        if self.cached.as_ref().map(|(k, _)| *k) != Some(key) {
            self.cached = None;
        }
        if self.cached.is_none() {
            self.computations += 1;
        }
        let (_, result) = self
            .cached
            .get_or_insert_with(|| (key, summarize(store.get())));
        result
    }

    /// Number of times the summary has been recomputed.
    pub fn computations(&self) -> usize {
        self.computations
    }
}
