//! Resolution result types.

use serde::{Deserialize, Serialize};

/// How a match was produced, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    /// Input code matched a catalog code exactly.
    ExactCode,
    /// Input code owned several entries; the name picked one.
    ExactCodeDisambiguated,
    /// Input name matched a catalog name exactly.
    ExactName,
    /// Input name owned several codes; variant tokens picked one.
    ExactNameTokenDisambiguated,
    /// Input name matched a curated synonym.
    Synonym,
    /// Input code matched a catalog code fuzzily.
    FuzzyCode,
    /// Input name matched fuzzily, with token-based rescoring.
    FuzzyNameTokenEnhanced,
}

impl MatchMethod {
    /// Stable string tag for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMethod::ExactCode => "exact_code",
            MatchMethod::ExactCodeDisambiguated => "exact_code_disambiguated",
            MatchMethod::ExactName => "exact_name",
            MatchMethod::ExactNameTokenDisambiguated => "exact_name_token_disambiguated",
            MatchMethod::Synonym => "synonym",
            MatchMethod::FuzzyCode => "fuzzy_code",
            MatchMethod::FuzzyNameTokenEnhanced => "fuzzy_name_token_enhanced",
        }
    }
}

/// Result of resolving one product reference.
///
/// Absence of a match is a successfully computed result with score 0 and no
/// method, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Resolved catalog code, if any.
    pub code: Option<String>,
    /// Resolved catalog name, if any.
    pub name: Option<String>,
    /// Match score (0 to 100).
    pub score: u8,
    /// Strategy that produced the match.
    pub method: Option<MatchMethod>,
}

impl MatchResult {
    /// Create a successful match result.
    pub fn matched<C: Into<String>, N: Into<String>>(
        code: C,
        name: N,
        score: u8,
        method: MatchMethod,
    ) -> Self {
        MatchResult {
            code: Some(code.into()),
            name: Some(name.into()),
            score,
            method: Some(method),
        }
    }

    /// Create the no-match result.
    pub fn no_match() -> Self {
        MatchResult {
            code: None,
            name: None,
            score: 0,
            method: None,
        }
    }

    /// Whether a catalog entry was resolved.
    pub fn is_match(&self) -> bool {
        self.method.is_some()
    }
}

/// One candidate returned by [`Matcher::search`](crate::matcher::engine::Matcher::search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Catalog code (first by catalog order for duplicate names).
    pub code: String,
    /// Catalog name.
    pub name: String,
    /// Similarity score against the query (0 to 100).
    pub score: u8,
}
