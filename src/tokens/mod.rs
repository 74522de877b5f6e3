//! Variant token extraction for product descriptions.
//!
//! Pulls normalized size and color tokens out of free-form product text so
//! the matcher can tell otherwise near-identical variants apart
//! (`"Rakza 9 Black 2.0mm"` vs `"Rakza 9 Red 2.0mm"`).

pub mod extractor;

// Re-export commonly used types
pub use extractor::*;
