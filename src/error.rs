//! Error types for the skumatch library.
//!
//! All fallible operations in skumatch return [`Result`], built on the
//! [`SkuMatchError`] enum. Match resolution itself is failure-free and never
//! appears here; errors are confined to configuration validation, snapshot
//! decoding, and the synonym persistence boundary.

use anyhow;
use thiserror::Error;

/// The main error type for skumatch operations.
#[derive(Error, Debug)]
pub enum SkuMatchError {
    /// Catalog snapshot errors (malformed rows, decode failures)
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration errors (invalid thresholds, weights)
    #[error("Config error: {0}")]
    Config(String),

    /// Synonym store errors (persistence boundary failures)
    #[error("Store error: {0}")]
    Store(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with SkuMatchError.
pub type Result<T> = std::result::Result<T, SkuMatchError>;

impl SkuMatchError {
    /// Create a new catalog error.
    pub fn catalog<S: Into<String>>(msg: S) -> Self {
        SkuMatchError::Catalog(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SkuMatchError::Config(msg.into())
    }

    /// Create a new store error.
    pub fn store<S: Into<String>>(msg: S) -> Self {
        SkuMatchError::Store(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        SkuMatchError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = SkuMatchError::catalog("Test catalog error");
        assert_eq!(error.to_string(), "Catalog error: Test catalog error");

        let error = SkuMatchError::config("Test config error");
        assert_eq!(error.to_string(), "Config error: Test config error");

        let error = SkuMatchError::store("Test store error");
        assert_eq!(error.to_string(), "Store error: Test store error");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let error = SkuMatchError::from(json_error);

        match error {
            SkuMatchError::Json(_) => {}
            _ => panic!("Expected JSON error variant"),
        }
    }
}
