//! The synonym learner.

use std::sync::Arc;

use ahash::AHashMap;
use log::{info, warn};
use parking_lot::Mutex;

use crate::learner::store::{SynonymAppend, SynonymStore};
use crate::learner::suggestion::{SynonymSuggestion, UsageReport};
use crate::matcher::result::{MatchMethod, MatchResult};

/// Default lower bound of the suggestion band; scores in
/// `[DEFAULT_SUGGEST_FLOOR, 100)` qualify as suggestion material.
pub const DEFAULT_SUGGEST_FLOOR: u8 = 85;

/// How many entries [`SynonymLearner::usage_statistics`] reports at most.
const TOP_USED_LIMIT: usize = 20;

#[derive(Debug, Default)]
struct LearnerState {
    pending: Vec<SynonymSuggestion>,
    usage: AHashMap<String, u64>,
}

/// Observes match outcomes, proposes synonyms for strong fuzzy hits, and
/// tracks the suggestion lifecycle plus synonym usage counts.
///
/// All mutable state sits behind one narrow mutex; reads take a snapshot
/// under the same guard. The learner owns its state independently of any
/// cache generation.
pub struct SynonymLearner {
    store: Arc<dyn SynonymStore>,
    state: Mutex<LearnerState>,
    suggest_floor: u8,
}

impl SynonymLearner {
    /// Create a learner over the given store with the default suggestion
    /// band.
    pub fn new(store: Arc<dyn SynonymStore>) -> Self {
        Self::with_suggest_floor(store, DEFAULT_SUGGEST_FLOOR)
    }

    /// Create a learner with a custom suggestion band floor.
    pub fn with_suggest_floor(store: Arc<dyn SynonymStore>, suggest_floor: u8) -> Self {
        SynonymLearner {
            store,
            state: Mutex::new(LearnerState::default()),
            suggest_floor,
        }
    }

    /// Record the outcome of one resolution.
    ///
    /// Synonym hits increment the usage counter for the raw input text.
    /// Scores in `[suggest_floor, 100)` with both code and name resolved
    /// create a pending suggestion, unless one with the same case-folded
    /// synonym text and code already exists.
    pub fn observe_match(&self, input_text: &str, result: &MatchResult) {
        let mut state = self.state.lock();

        if result.method == Some(MatchMethod::Synonym) {
            *state.usage.entry(input_text.to_string()).or_insert(0) += 1;
        }

        if result.score >= self.suggest_floor
            && result.score < 100
            && let (Some(code), Some(name)) = (&result.code, &result.name)
        {
            let exists = state
                .pending
                .iter()
                .any(|suggestion| suggestion.matches(input_text, code));

            if !exists {
                state.pending.push(SynonymSuggestion::pending(
                    input_text,
                    code.clone(),
                    name.clone(),
                    result.score,
                ));
                info!("Suggested synonym: {input_text} -> {name}");
            }
        }
    }

    /// Snapshot of all pending suggestions.
    pub fn list_pending(&self) -> Vec<SynonymSuggestion> {
        self.state.lock().pending.clone()
    }

    /// Approve a suggestion: persist the synonym into the product store and
    /// drop matching pending suggestions.
    ///
    /// Returns `false` when no product record exists for `code` (pending
    /// suggestions are left intact) or when the synonym is already present
    /// (pending suggestions are still cleared). Store failures are logged
    /// and reported as `false`.
    pub fn approve(&self, synonym: &str, code: &str) -> bool {
        match self.store.append_synonym(code, synonym) {
            Ok(SynonymAppend::Added) => {
                self.remove_pending(synonym, code);
                info!("Approved synonym: {synonym} -> {code}");
                true
            }
            Ok(SynonymAppend::Duplicate) => {
                self.remove_pending(synonym, code);
                false
            }
            Ok(SynonymAppend::UnknownCode) => false,
            Err(e) => {
                warn!("Error approving synonym {synonym} -> {code}: {e}");
                false
            }
        }
    }

    /// Reject a suggestion: drop matching pending suggestions.
    ///
    /// Returns `true` iff at least one was removed.
    pub fn reject(&self, synonym: &str, code: &str) -> bool {
        let removed = self.remove_pending(synonym, code);
        if removed > 0 {
            info!("Rejected synonym: {synonym} -> {code}");
        }
        removed > 0
    }

    /// Synonym usage statistics, most used first.
    pub fn usage_statistics(&self) -> UsageReport {
        let state = self.state.lock();

        let mut top_used: Vec<(String, u64)> = state
            .usage
            .iter()
            .map(|(synonym, count)| (synonym.clone(), *count))
            .collect();
        // Synonym text as secondary key keeps equal counts deterministic
        top_used.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        top_used.truncate(TOP_USED_LIMIT);

        UsageReport {
            total_synonyms: state.usage.len(),
            total_usage: state.usage.values().sum(),
            top_used,
        }
    }

    fn remove_pending(&self, synonym: &str, code: &str) -> usize {
        let mut state = self.state.lock();
        let before = state.pending.len();
        state
            .pending
            .retain(|suggestion| !suggestion.matches(synonym, code));
        before - state.pending.len()
    }
}
