//! Multi-strategy product resolution pipeline.
//!
//! The [`Matcher`] tries a fixed sequence of strategies against one catalog
//! generation: exact code, exact name, synonym, fuzzy code, fuzzy name with
//! token enhancement. The first strategy producing a result wins; absence of
//! a match is a valid result, never an error.

pub mod config;
pub mod engine;
pub mod result;

// Re-export commonly used types
pub use config::*;
pub use engine::*;
pub use result::*;
