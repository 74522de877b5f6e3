//! Persistence boundary for approved synonyms.

use parking_lot::Mutex;

use crate::catalog::entry::ProductRecord;
use crate::error::Result;

/// Outcome of appending a synonym to a stored product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynonymAppend {
    /// The synonym was added to the product record.
    Added,
    /// The product already carries this synonym.
    Duplicate,
    /// No product record exists for the code.
    UnknownCode,
}

/// Persistent product store, seen from the synonym learner.
///
/// Implementations append an approved synonym to the stored product record
/// for a code. Appending is idempotent on duplicates; the only hard failures
/// are transport-level (I/O, serialization), surfaced through the error.
pub trait SynonymStore: Send + Sync {
    /// Append `synonym` to the product record for `code`.
    fn append_synonym(&self, code: &str, synonym: &str) -> Result<SynonymAppend>;
}

/// In-memory synonym store for composition roots and tests.
#[derive(Debug, Default)]
pub struct MemorySynonymStore {
    products: Mutex<Vec<ProductRecord>>,
}

impl MemorySynonymStore {
    /// Create a store over the given product records.
    pub fn new(products: Vec<ProductRecord>) -> Self {
        MemorySynonymStore {
            products: Mutex::new(products),
        }
    }

    /// Snapshot of all product records, e.g. for a cache refresh.
    pub fn records(&self) -> Vec<ProductRecord> {
        self.products.lock().clone()
    }
}

impl SynonymStore for MemorySynonymStore {
    fn append_synonym(&self, code: &str, synonym: &str) -> Result<SynonymAppend> {
        let mut products = self.products.lock();

        let Some(product) = products.iter_mut().find(|p| p.code == code) else {
            return Ok(SynonymAppend::UnknownCode);
        };

        let folded = synonym.to_lowercase();
        if product.synonyms.iter().any(|s| s.to_lowercase() == folded) {
            return Ok(SynonymAppend::Duplicate);
        }

        product.synonyms.push(synonym.to_string());
        Ok(SynonymAppend::Added)
    }
}
