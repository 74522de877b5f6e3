//! Configuration for the resolution pipeline.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SkuMatchError};

/// Configuration for the [`Matcher`](crate::matcher::engine::Matcher).
///
/// The weights and cutoffs are empirically chosen constants carried over
/// from the production tuning of the matching pipeline; they are exposed as
/// named fields rather than hard-coded so deployments can override them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Minimum fuzzy name score for a candidate to survive (0 to 100).
    pub threshold: u8,
    /// Minimum fuzzy code score for a fuzzy code match (0 to 100).
    pub fuzzy_code_threshold: u8,
    /// How many fuzzy name candidates to consider before rescoring.
    pub fuzzy_name_pool: usize,
    /// Weight of the fuzzy score in the combined score.
    pub fuzzy_weight: f64,
    /// Weight of the token similarity in the combined score.
    pub token_weight: f64,
    /// Minimum token similarity for token-based code disambiguation.
    pub token_cutoff: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        MatcherConfig {
            threshold: 80,
            fuzzy_code_threshold: 85,
            fuzzy_name_pool: 5,
            fuzzy_weight: 0.7,
            token_weight: 0.3,
            token_cutoff: 0.5,
        }
    }
}

impl MatcherConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.threshold > 100 || self.fuzzy_code_threshold > 100 {
            return Err(SkuMatchError::config("thresholds must be within 0..=100"));
        }
        if self.fuzzy_name_pool == 0 {
            return Err(SkuMatchError::config("fuzzy_name_pool must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.token_cutoff) {
            return Err(SkuMatchError::config("token_cutoff must be within 0.0..=1.0"));
        }
        if ((self.fuzzy_weight + self.token_weight) - 1.0).abs() > 1e-9 {
            return Err(SkuMatchError::config(
                "fuzzy_weight and token_weight must sum to 1.0",
            ));
        }
        Ok(())
    }
}
