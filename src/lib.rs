//! # skumatch
//!
//! A fuzzy product resolution engine for Rust: resolves free-form,
//! error-prone product references (names, codes, partial descriptions) to
//! canonical catalog entries.
//!
//! ## Features
//!
//! - Versioned, immutable in-memory catalog index with lock-free reads
//! - Multi-strategy matching with deterministic tie-breaking
//! - Token-based size/color variant disambiguation
//! - Synonym-learning feedback loop with an operator review surface
//! - Unmatched-input tracking and reporting

pub mod catalog;
pub mod error;
pub mod learner;
pub mod matcher;
pub mod resolver;
pub mod similarity;
pub mod tokens;
pub mod unmatched;

pub use catalog::{CacheInfo, CatalogCache, CatalogEntry, CatalogHandle, ProductRecord, SynonymRecord};
pub use error::{Result, SkuMatchError};
pub use learner::{
    MemorySynonymStore, SuggestionStatus, SynonymAppend, SynonymLearner, SynonymStore,
    SynonymSuggestion, UsageReport,
};
pub use matcher::{MatchMethod, MatchResult, Matcher, MatcherConfig, SearchHit};
pub use resolver::ProductResolver;
pub use tokens::TokenExtractor;
pub use unmatched::{UnmatchedReason, UnmatchedSummary, UnmatchedTracker};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
