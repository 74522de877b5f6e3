//! Composition facade: resolution plus learner bookkeeping in one call.

use std::sync::Arc;

use crate::learner::manager::SynonymLearner;
use crate::matcher::engine::Matcher;
use crate::matcher::result::MatchResult;

/// The entry point order-processing glue calls.
///
/// Wires the [`Matcher`] and the [`SynonymLearner`] together: every
/// resolution with a name input is forwarded to the learner, which counts
/// synonym usage and turns strong fuzzy hits into pending suggestions.
pub struct ProductResolver {
    matcher: Matcher,
    learner: Arc<SynonymLearner>,
}

impl ProductResolver {
    /// Create a resolver over a matcher and a learner.
    pub fn new(matcher: Matcher, learner: Arc<SynonymLearner>) -> Self {
        ProductResolver { matcher, learner }
    }

    /// Resolve a reference and record the outcome with the learner.
    pub fn resolve(&self, name: Option<&str>, code: Option<&str>) -> MatchResult {
        let result = self.matcher.resolve(name, code);

        if let Some(name) = name {
            self.learner.observe_match(name, &result);
        }

        result
    }

    /// The underlying matcher.
    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// The underlying learner.
    pub fn learner(&self) -> &SynonymLearner {
        &self.learner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::cache::CatalogCache;
    use crate::catalog::entry::{CatalogEntry, ProductRecord, SynonymRecord};
    use crate::catalog::handle::CatalogHandle;
    use crate::learner::store::MemorySynonymStore;

    fn resolver() -> ProductResolver {
        let entries = vec![
            CatalogEntry::new("12345", "Rakza 9 Black 2.0mm"),
            CatalogEntry::new("12346", "Rakza 9 Red 2.0mm"),
        ];
        let synonyms = vec![SynonymRecord::new("R9 Black", "12345", "Rakza 9 Black 2.0mm")];
        let handle = Arc::new(CatalogHandle::new(CatalogCache::build(entries, synonyms)));

        let store = Arc::new(MemorySynonymStore::new(vec![
            ProductRecord::new("12345", "Rakza 9 Black 2.0mm", vec!["R9 Black".to_string()]),
            ProductRecord::new("12346", "Rakza 9 Red 2.0mm", vec![]),
        ]));
        let learner = Arc::new(SynonymLearner::new(store));

        ProductResolver::new(Matcher::new(handle), learner)
    }

    #[test]
    fn test_resolve_tracks_synonym_usage() {
        let resolver = resolver();

        resolver.resolve(Some("r9 black"), None);
        resolver.resolve(Some("r9 black"), None);

        let report = resolver.learner().usage_statistics();
        assert_eq!(report.total_usage, 2);
        assert_eq!(report.top_used[0].0, "r9 black");
    }

    #[test]
    fn test_strong_fuzzy_hit_leaves_one_pending_suggestion() {
        let resolver = resolver();

        // Typo'd size unit: strong fuzzy hit but not exact
        let result = resolver.resolve(Some("Rakza 9 Black 2.0m"), None);
        assert!(result.is_match());
        assert!(result.score >= 85 && result.score < 100);

        // Same input again: no duplicate suggestion
        resolver.resolve(Some("Rakza 9 Black 2.0m"), None);

        let pending = resolver.learner().list_pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].synonym, "Rakza 9 Black 2.0m");
        assert_eq!(pending[0].code, "12345");
    }

    #[test]
    fn test_exact_hit_leaves_no_suggestion() {
        let resolver = resolver();

        let result = resolver.resolve(Some("Rakza 9 Black 2.0mm"), None);
        assert_eq!(result.score, 100);
        assert!(resolver.learner().list_pending().is_empty());
    }
}
