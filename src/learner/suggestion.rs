//! Synonym suggestion types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a synonym suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionStatus {
    /// Awaiting operator review.
    Pending,
    /// Approved and persisted into the product store.
    Approved,
    /// Rejected by an operator.
    Rejected,
}

/// A proposed synonym, created from a strong but non-exact fuzzy match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymSuggestion {
    /// The input text proposed as a synonym.
    pub synonym: String,
    /// Code the suggestion resolves to.
    pub code: String,
    /// Name the suggestion resolves to.
    pub name: String,
    /// Score of the fuzzy match that triggered the suggestion (85 to 99).
    pub score: u8,
    /// When the suggestion was created.
    pub suggested_at: DateTime<Utc>,
    /// Lifecycle state.
    pub status: SuggestionStatus,
}

impl SynonymSuggestion {
    /// Create a new pending suggestion.
    pub fn pending<S: Into<String>, C: Into<String>, N: Into<String>>(
        synonym: S,
        code: C,
        name: N,
        score: u8,
    ) -> Self {
        SynonymSuggestion {
            synonym: synonym.into(),
            code: code.into(),
            name: name.into(),
            score,
            suggested_at: Utc::now(),
            status: SuggestionStatus::Pending,
        }
    }

    /// Whether this suggestion is for the given synonym text and code,
    /// comparing the synonym case-folded.
    pub fn matches(&self, synonym: &str, code: &str) -> bool {
        self.code == code && self.synonym.to_lowercase() == synonym.to_lowercase()
    }
}

/// Synonym usage statistics for the review surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageReport {
    /// Distinct synonym texts observed in matches.
    pub total_synonyms: usize,
    /// Most used synonyms, descending by count.
    pub top_used: Vec<(String, u64)>,
    /// Total synonym match count.
    pub total_usage: u64,
}
