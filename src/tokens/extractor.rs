//! Regex-based size/color token extraction.

use std::sync::Arc;

use ahash::AHashSet;
use regex::Regex;

/// Closed color vocabulary recognized as variant tokens.
const COLORS: &[&str] = &[
    "black", "red", "blue", "green", "white", "yellow", "orange", "purple", "pink", "brown",
    "grey", "gray",
];

/// Extracts normalized size and color tokens from product descriptions.
///
/// Size tokens are decimal numbers followed by `mm`, followed by an inch
/// mark, or enclosed in parentheses alone; all three forms normalize to the
/// bare numeric string (`"2.0mm"`, `"2.0\""` and `"(2.0)"` all yield
/// `"2.0"`). Color tokens come from a fixed vocabulary and are matched as
/// case-insensitive substrings.
#[derive(Clone, Debug)]
pub struct TokenExtractor {
    /// Size patterns, each with the numeric part as capture group 1
    size_patterns: Vec<Arc<Regex>>,
}

impl TokenExtractor {
    /// Create a new token extractor.
    pub fn new() -> Self {
        let size_patterns = [r#"(\d+\.?\d*)\s*mm"#, r#"(\d+\.?\d*)\s*""#, r#"\((\d+\.?\d*)\)"#]
            .iter()
            .map(|pattern| {
                let regex = Regex::new(&format!("(?i){pattern}"))
                    .expect("Builtin size pattern should be valid");
                Arc::new(regex)
            })
            .collect();

        TokenExtractor { size_patterns }
    }

    /// Extract the set of normalized size and color tokens from `text`.
    pub fn extract(&self, text: &str) -> AHashSet<String> {
        let mut tokens = AHashSet::new();

        for pattern in &self.size_patterns {
            for captures in pattern.captures_iter(text) {
                if let Some(size) = captures.get(1) {
                    tokens.insert(size.as_str().to_lowercase());
                }
            }
        }

        let text_lower = text.to_lowercase();
        for color in COLORS {
            if text_lower.contains(color) {
                tokens.insert((*color).to_string());
            }
        }

        tokens
    }

    /// Jaccard similarity between two token sets, in `0.0..=1.0`.
    ///
    /// Defined as 0.0 when either set is empty.
    pub fn similarity(tokens1: &AHashSet<String>, tokens2: &AHashSet<String>) -> f64 {
        if tokens1.is_empty() || tokens2.is_empty() {
            return 0.0;
        }

        let intersection = tokens1.intersection(tokens2).count();
        let union = tokens1.union(tokens2).count();

        intersection as f64 / union as f64
    }
}

impl Default for TokenExtractor {
    fn default() -> Self {
        Self::new()
    }
}
