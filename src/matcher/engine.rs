//! The resolution pipeline.

use std::sync::Arc;

use ahash::AHashSet;

use crate::catalog::cache::CatalogCache;
use crate::catalog::handle::CatalogHandle;
use crate::matcher::config::MatcherConfig;
use crate::matcher::result::{MatchMethod, MatchResult, SearchHit};
use crate::similarity::extract::{extract_best, extract_top_n};
use crate::similarity::scorer::{ratio, token_sort_ratio};
use crate::tokens::extractor::TokenExtractor;

/// Resolves one product reference against the current catalog generation.
///
/// Strategies run in a fixed order; the first one producing a result wins.
/// Every call fetches the current generation once and consults only that
/// generation, so a concurrent refresh never yields a mixed view. `resolve`
/// is read-only and has no error outcomes.
pub struct Matcher {
    handle: Arc<CatalogHandle>,
    extractor: TokenExtractor,
    config: MatcherConfig,
}

impl Matcher {
    /// Create a matcher with the default configuration.
    pub fn new(handle: Arc<CatalogHandle>) -> Self {
        Self::with_config(handle, MatcherConfig::default())
    }

    /// Create a matcher with a custom configuration.
    pub fn with_config(handle: Arc<CatalogHandle>, config: MatcherConfig) -> Self {
        Matcher {
            handle,
            extractor: TokenExtractor::new(),
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Resolve a reference using the configured fuzzy name threshold.
    pub fn resolve(&self, name: Option<&str>, code: Option<&str>) -> MatchResult {
        self.resolve_with_threshold(name, code, self.config.threshold)
    }

    /// Resolve a reference with a per-call fuzzy name threshold.
    pub fn resolve_with_threshold(
        &self,
        name: Option<&str>,
        code: Option<&str>,
        threshold: u8,
    ) -> MatchResult {
        let cache = self.handle.current();

        // Strategy 1: exact code
        if let Some(code) = code
            && let Some(result) = self.match_exact_code(&cache, code, name)
        {
            return result;
        }

        // Strategy 2: exact name
        if let Some(name) = name
            && let Some(result) = self.match_exact_name(&cache, name)
        {
            return result;
        }

        // Strategy 3: synonym
        if let Some(name) = name
            && let Some(record) = cache.by_synonym(name)
        {
            return MatchResult::matched(
                record.code.clone(),
                record.name.clone(),
                record.score,
                MatchMethod::Synonym,
            );
        }

        // Strategy 4: fuzzy code
        if let Some(code) = code
            && let Some(result) = self.match_fuzzy_code(&cache, code)
        {
            return result;
        }

        // Strategy 5: fuzzy name with token enhancement
        if let Some(name) = name
            && let Some(result) = self.match_fuzzy_name(&cache, name, threshold)
        {
            return result;
        }

        MatchResult::no_match()
    }

    /// Top fuzzy name candidates for interactive lookup, one hit per unique
    /// catalog name, descending by score with ties in catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit> {
        let cache = self.handle.current();

        extract_top_n(
            query,
            cache.all_names().iter().map(String::as_str),
            limit,
            token_sort_ratio,
        )
        .into_iter()
        .filter_map(|candidate| {
            cache.by_name(candidate.candidate).first().map(|code| SearchHit {
                code: code.clone(),
                name: candidate.candidate.to_string(),
                score: candidate.score,
            })
        })
        .collect()
    }

    fn match_exact_code(
        &self,
        cache: &CatalogCache,
        code: &str,
        name: Option<&str>,
    ) -> Option<MatchResult> {
        let entries = cache.by_code(code);
        if entries.is_empty() {
            return None;
        }

        if entries.len() == 1 {
            let entry = &entries[0];
            return Some(MatchResult::matched(
                entry.code.clone(),
                entry.name.clone(),
                100,
                MatchMethod::ExactCode,
            ));
        }

        if let Some(name) = name {
            // Several name variants recorded for this code: pick the one
            // closest to the given name.
            let best = extract_best(
                name,
                entries.iter().map(|entry| entry.name.as_str()),
                token_sort_ratio,
            )?;
            let entry = &entries[best.index];
            return Some(MatchResult::matched(
                entry.code.clone(),
                entry.name.clone(),
                100,
                MatchMethod::ExactCodeDisambiguated,
            ));
        }

        // No name to disambiguate with: first by catalog order
        let entry = &entries[0];
        Some(MatchResult::matched(
            entry.code.clone(),
            entry.name.clone(),
            100,
            MatchMethod::ExactCode,
        ))
    }

    fn match_exact_name(&self, cache: &CatalogCache, name: &str) -> Option<MatchResult> {
        let codes = cache.by_name(name);
        if codes.is_empty() {
            return None;
        }

        if codes.len() == 1 {
            return Some(MatchResult::matched(
                codes[0].clone(),
                name,
                100,
                MatchMethod::ExactName,
            ));
        }

        // True catalog duplicates: same name under several codes
        match self.disambiguate_codes(cache, name, codes) {
            Some(code) => Some(MatchResult::matched(
                code,
                name,
                100,
                MatchMethod::ExactNameTokenDisambiguated,
            )),
            None => Some(MatchResult::matched(
                codes[0].clone(),
                name,
                100,
                MatchMethod::ExactName,
            )),
        }
    }

    fn match_fuzzy_code(&self, cache: &CatalogCache, code: &str) -> Option<MatchResult> {
        let best = extract_best(code, cache.all_codes().iter().map(String::as_str), ratio)?;
        if best.score < self.config.fuzzy_code_threshold {
            return None;
        }

        let entry = cache.by_code(best.candidate).first()?;
        Some(MatchResult::matched(
            entry.code.clone(),
            entry.name.clone(),
            best.score,
            MatchMethod::FuzzyCode,
        ))
    }

    fn match_fuzzy_name(
        &self,
        cache: &CatalogCache,
        name: &str,
        threshold: u8,
    ) -> Option<MatchResult> {
        let survivors: Vec<_> = extract_top_n(
            name,
            cache.all_names().iter().map(String::as_str),
            self.config.fuzzy_name_pool,
            token_sort_ratio,
        )
        .into_iter()
        .filter(|candidate| candidate.score >= threshold)
        .collect();

        if survivors.is_empty() {
            return None;
        }

        // A single survivor is used directly; rescoring only runs when the
        // pure fuzzy pass is ambiguous.
        let (winner_name, winner_score) = if survivors.len() == 1 {
            (survivors[0].candidate, survivors[0].score)
        } else {
            self.rescore_with_tokens(name, &survivors)
        };

        let codes = cache.by_name(winner_name);
        let code = match codes.len() {
            0 => return None,
            1 => codes[0].clone(),
            _ => self
                .disambiguate_codes(cache, name, codes)
                .unwrap_or_else(|| codes[0].clone()),
        };

        Some(MatchResult::matched(
            code,
            winner_name,
            winner_score,
            MatchMethod::FuzzyNameTokenEnhanced,
        ))
    }

    /// Combine fuzzy score and token similarity for each surviving
    /// candidate; ties keep the earlier fuzzy rank.
    fn rescore_with_tokens<'a>(
        &self,
        name: &str,
        survivors: &[crate::similarity::extract::ScoredCandidate<'a>],
    ) -> (&'a str, u8) {
        let input_tokens = self.extractor.extract(name);

        let mut winner = survivors[0].candidate;
        let mut winner_combined = f64::MIN;

        for candidate in survivors {
            let candidate_tokens = self.extractor.extract(candidate.candidate);
            let token_similarity = TokenExtractor::similarity(&input_tokens, &candidate_tokens);

            let combined = self.config.fuzzy_weight * candidate.score as f64
                + self.config.token_weight * (100.0 * token_similarity);

            if combined > winner_combined {
                winner_combined = combined;
                winner = candidate.candidate;
            }
        }

        (winner, winner_combined.round().min(100.0) as u8)
    }

    /// Pick the code whose stored names share the most variant tokens with
    /// the input name. Returns `None` when no code clears the cutoff or the
    /// input has no variant tokens at all.
    fn disambiguate_codes(
        &self,
        cache: &CatalogCache,
        name: &str,
        codes: &[String],
    ) -> Option<String> {
        let input_tokens = self.extractor.extract(name);
        if input_tokens.is_empty() {
            return None;
        }

        let mut best_code: Option<&String> = None;
        let mut best_similarity = 0.0;

        for code in codes {
            for entry in cache.by_code(code) {
                let entry_tokens: AHashSet<String> = self.extractor.extract(&entry.name);
                let similarity = TokenExtractor::similarity(&input_tokens, &entry_tokens);

                if similarity > best_similarity {
                    best_similarity = similarity;
                    best_code = Some(code);
                }
            }
        }

        if best_similarity > self.config.token_cutoff {
            best_code.cloned()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::entry::{CatalogEntry, SynonymRecord};

    fn matcher_for(entries: Vec<CatalogEntry>, synonyms: Vec<SynonymRecord>) -> Matcher {
        let handle = Arc::new(CatalogHandle::new(CatalogCache::build(entries, synonyms)));
        Matcher::new(handle)
    }

    fn sample_catalog() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("12345", "Rakza 9 Black 2.0mm"),
            CatalogEntry::new("12346", "Rakza 9 Red 2.0mm"),
            CatalogEntry::new("54321", "Tenergy 05 Red 1.9mm"),
        ]
    }

    #[test]
    fn test_exact_code() {
        let matcher = matcher_for(sample_catalog(), Vec::new());
        let result = matcher.resolve(None, Some("12345"));

        assert_eq!(result.code.as_deref(), Some("12345"));
        assert_eq!(result.name.as_deref(), Some("Rakza 9 Black 2.0mm"));
        assert_eq!(result.score, 100);
        assert_eq!(result.method, Some(MatchMethod::ExactCode));
    }

    #[test]
    fn test_exact_code_beats_name_disambiguation() {
        // Duplicate name under two codes; an exact code must win before any
        // name-based logic runs.
        let entries = vec![
            CatalogEntry::new("12345", "Rakza 9 Black 2.0mm"),
            CatalogEntry::new("12347", "Rakza 9 Black 2.0mm"),
        ];
        let matcher = matcher_for(entries, Vec::new());

        let result = matcher.resolve(Some("Rakza 9 Black 2.0mm"), Some("12345"));
        assert_eq!(result.code.as_deref(), Some("12345"));
        assert_eq!(result.method, Some(MatchMethod::ExactCode));
    }

    #[test]
    fn test_exact_code_disambiguated_by_name() {
        let entries = vec![
            CatalogEntry::new("12345", "Rakza 9 Black 2.0mm"),
            CatalogEntry::new("12345", "Rakza 9 Black Max"),
        ];
        let matcher = matcher_for(entries, Vec::new());

        let result = matcher.resolve(Some("Rakza 9 Black Max"), Some("12345"));
        assert_eq!(result.name.as_deref(), Some("Rakza 9 Black Max"));
        assert_eq!(result.score, 100);
        assert_eq!(result.method, Some(MatchMethod::ExactCodeDisambiguated));
    }

    #[test]
    fn test_exact_code_multiple_entries_no_name_returns_first() {
        let entries = vec![
            CatalogEntry::new("12345", "Rakza 9 Black 2.0mm"),
            CatalogEntry::new("12345", "Rakza 9 Black Max"),
        ];
        let matcher = matcher_for(entries, Vec::new());

        let result = matcher.resolve(None, Some("12345"));
        assert_eq!(result.name.as_deref(), Some("Rakza 9 Black 2.0mm"));
        assert_eq!(result.method, Some(MatchMethod::ExactCode));
    }

    #[test]
    fn test_exact_name_single_code() {
        let matcher = matcher_for(sample_catalog(), Vec::new());
        let result = matcher.resolve(Some("Rakza 9 Black 2.0mm"), None);

        assert_eq!(result.code.as_deref(), Some("12345"));
        assert_eq!(result.score, 100);
        assert_eq!(result.method, Some(MatchMethod::ExactName));
    }

    #[test]
    fn test_exact_name_duplicate_is_deterministic() {
        let entries = vec![
            CatalogEntry::new("12345", "Rakza 9 Black 2.0mm"),
            CatalogEntry::new("12347", "Rakza 9 Black 2.0mm"),
        ];
        let matcher = matcher_for(entries, Vec::new());

        // Identical names carry identical tokens; the tie stays with the
        // first code by catalog order, on every call.
        for _ in 0..3 {
            let result = matcher.resolve(Some("Rakza 9 Black 2.0mm"), None);
            assert_eq!(result.code.as_deref(), Some("12345"));
            assert_eq!(result.score, 100);
            assert_eq!(result.method, Some(MatchMethod::ExactNameTokenDisambiguated));
        }
    }

    #[test]
    fn test_exact_name_duplicate_without_tokens_returns_first() {
        let entries = vec![
            CatalogEntry::new("11111", "Competition Net"),
            CatalogEntry::new("22222", "Competition Net"),
        ];
        let matcher = matcher_for(entries, Vec::new());

        // No size or color tokens to disambiguate with
        let result = matcher.resolve(Some("Competition Net"), None);
        assert_eq!(result.code.as_deref(), Some("11111"));
        assert_eq!(result.method, Some(MatchMethod::ExactName));
    }

    #[test]
    fn test_synonym_match() {
        let synonyms = vec![SynonymRecord::new("R9 Black", "12345", "Rakza 9 Black 2.0mm")];
        let matcher = matcher_for(sample_catalog(), synonyms);

        let result = matcher.resolve(Some("r9 black"), None);
        assert_eq!(result.code.as_deref(), Some("12345"));
        assert_eq!(result.score, 100);
        assert_eq!(result.method, Some(MatchMethod::Synonym));
    }

    #[test]
    fn test_synonym_is_exact_only() {
        let synonyms = vec![SynonymRecord::new("R9 Black", "12345", "Rakza 9 Black 2.0mm")];
        let matcher = matcher_for(sample_catalog(), synonyms);

        // One character short: must not resolve via the synonym index
        let result = matcher.resolve(Some("r9 blac"), None);
        assert_ne!(result.method, Some(MatchMethod::Synonym));
    }

    #[test]
    fn test_fuzzy_code() {
        let matcher = matcher_for(sample_catalog(), Vec::new());

        // Dropped final digit
        let result = matcher.resolve(None, Some("1234"));
        assert_eq!(result.code.as_deref(), Some("12345"));
        assert_eq!(result.method, Some(MatchMethod::FuzzyCode));
        assert!(result.score >= 85 && result.score < 100);
    }

    #[test]
    fn test_fuzzy_code_below_floor_is_rejected() {
        let matcher = matcher_for(sample_catalog(), Vec::new());

        let result = matcher.resolve(None, Some("99999"));
        assert!(!result.is_match());
    }

    #[test]
    fn test_fuzzy_name_token_enhanced_picks_variant() {
        let matcher = matcher_for(sample_catalog(), Vec::new());

        // No size token in the input; the color token separates the variants
        let result = matcher.resolve(Some("Rakza 9 Black"), None);
        assert_eq!(result.code.as_deref(), Some("12345"));
        assert_eq!(result.method, Some(MatchMethod::FuzzyNameTokenEnhanced));
        assert!(result.score >= 80);
    }

    #[test]
    fn test_fuzzy_name_below_threshold_no_match() {
        let matcher = matcher_for(sample_catalog(), Vec::new());

        let result = matcher.resolve(Some("completely unrelated thing"), None);
        assert!(!result.is_match());
        assert_eq!(result.score, 0);
    }

    #[test]
    fn test_no_input_no_match() {
        let matcher = matcher_for(sample_catalog(), Vec::new());
        assert_eq!(matcher.resolve(None, None), MatchResult::no_match());
    }

    #[test]
    fn test_empty_catalog_no_match() {
        let matcher = matcher_for(Vec::new(), Vec::new());
        let result = matcher.resolve(Some("Rakza 9 Black 2.0mm"), Some("12345"));
        assert!(!result.is_match());
    }

    #[test]
    fn test_search_order_and_limit() {
        let matcher = matcher_for(sample_catalog(), Vec::new());

        let hits = matcher.search("Rakza 9 Black", 2);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].score >= hits[1].score);
        assert_eq!(hits[0].code, "12345");
    }

    #[test]
    fn test_resolve_with_threshold_override() {
        let matcher = matcher_for(sample_catalog(), Vec::new());

        // Strict threshold rejects what the default accepts
        let strict = matcher.resolve_with_threshold(Some("Rakza 9 Black"), None, 95);
        assert!(!strict.is_match());

        let relaxed = matcher.resolve_with_threshold(Some("Rakza 9 Black"), None, 80);
        assert!(relaxed.is_match());
    }
}
