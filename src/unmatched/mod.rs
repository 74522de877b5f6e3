//! Bookkeeping for inputs that failed to resolve.
//!
//! Groups unmatched inputs by a closed reason taxonomy and keeps near-miss
//! candidate suggestions alongside, so operators can see *why* an input fell
//! through and what it was probably meant to be. Items that resolved but
//! carry warnings are tracked separately.

use chrono::{DateTime, Utc};
use log::warn;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::matcher::result::SearchHit;

/// Why an input failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchedReason {
    /// No strategy produced a candidate at all.
    NoMatchFound,
    /// Candidates existed but none cleared the threshold.
    LowMatchScore,
    /// Several candidates scored too close to pick one.
    AmbiguousMatch,
    /// The input was missing a usable name and code.
    MissingData,
}

impl UnmatchedReason {
    /// All reasons, in reporting order.
    pub const ALL: [UnmatchedReason; 4] = [
        UnmatchedReason::NoMatchFound,
        UnmatchedReason::LowMatchScore,
        UnmatchedReason::AmbiguousMatch,
        UnmatchedReason::MissingData,
    ];

    /// Stable string tag for this reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnmatchedReason::NoMatchFound => "no_match_found",
            UnmatchedReason::LowMatchScore => "low_match_score",
            UnmatchedReason::AmbiguousMatch => "ambiguous_match",
            UnmatchedReason::MissingData => "missing_data",
        }
    }
}

/// One unmatched input with its reason and near-miss candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedItem {
    /// The input text as received.
    pub original_text: String,
    /// Why it did not resolve.
    pub reason: UnmatchedReason,
    /// Free-form detail (best score seen, threshold in effect, ...).
    pub detail: String,
    /// Closest catalog candidates, if any were computed.
    pub suggestions: Vec<SearchHit>,
    /// When the item was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// An input that resolved but carries warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchWarning {
    /// Resolved catalog code.
    pub code: String,
    /// Resolved catalog name.
    pub name: String,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// When the warning was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Summary counts over all recorded items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedSummary {
    /// Total unmatched items.
    pub total_unmatched: usize,
    /// Total resolved-with-warnings items.
    pub total_warnings: usize,
    /// Unmatched counts per reason, reasons with no items omitted.
    pub by_reason: Vec<(UnmatchedReason, usize)>,
}

#[derive(Debug, Default)]
struct TrackerState {
    items: Vec<UnmatchedItem>,
    warnings: Vec<MatchWarning>,
}

/// Records and summarizes unmatched inputs.
///
/// Shared mutable state behind one narrow mutex, like the synonym learner.
#[derive(Debug, Default)]
pub struct UnmatchedTracker {
    state: Mutex<TrackerState>,
}

impl UnmatchedTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an unmatched input.
    pub fn record<T: Into<String>, D: Into<String>>(
        &self,
        original_text: T,
        reason: UnmatchedReason,
        detail: D,
        suggestions: Vec<SearchHit>,
    ) {
        let item = UnmatchedItem {
            original_text: original_text.into(),
            reason,
            detail: detail.into(),
            suggestions,
            recorded_at: Utc::now(),
        };
        warn!(
            "Unmatched item: {} - Reason: {}",
            item.original_text,
            reason.as_str()
        );
        self.state.lock().items.push(item);
    }

    /// Record an input that resolved with warnings.
    pub fn record_warning<C: Into<String>, N: Into<String>>(
        &self,
        code: C,
        name: N,
        warnings: Vec<String>,
    ) {
        let warning = MatchWarning {
            code: code.into(),
            name: name.into(),
            warnings,
            recorded_at: Utc::now(),
        };
        self.state.lock().warnings.push(warning);
    }

    /// Snapshot of all unmatched items, in insertion order.
    pub fn items(&self) -> Vec<UnmatchedItem> {
        self.state.lock().items.clone()
    }

    /// Snapshot of unmatched items with the given reason, in insertion
    /// order.
    pub fn items_by_reason(&self, reason: UnmatchedReason) -> Vec<UnmatchedItem> {
        self.state
            .lock()
            .items
            .iter()
            .filter(|item| item.reason == reason)
            .cloned()
            .collect()
    }

    /// Snapshot of all resolved-with-warnings items.
    pub fn warnings(&self) -> Vec<MatchWarning> {
        self.state.lock().warnings.clone()
    }

    /// Summary counts grouped by reason.
    pub fn summary(&self) -> UnmatchedSummary {
        let state = self.state.lock();

        let by_reason = UnmatchedReason::ALL
            .iter()
            .filter_map(|reason| {
                let count = state.items.iter().filter(|i| i.reason == *reason).count();
                (count > 0).then_some((*reason, count))
            })
            .collect();

        UnmatchedSummary {
            total_unmatched: state.items.len(),
            total_warnings: state.warnings.len(),
            by_reason,
        }
    }

    /// Drop all recorded items and warnings.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.items.clear();
        state.warnings.clear();
    }
}
