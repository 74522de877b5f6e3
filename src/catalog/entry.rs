//! Catalog entry and synonym record types.

use serde::{Deserialize, Serialize};

/// A single catalog row: a canonical product code and one recorded name.
///
/// A code may own multiple entries (name variants recorded over time), and a
/// name may map to multiple codes (true catalog duplicates). Entries are
/// immutable once loaded into a cache generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Canonical catalog identifier (article/SKU).
    pub code: String,
    /// Product name as recorded in the catalog.
    pub name: String,
}

impl CatalogEntry {
    /// Create a new catalog entry.
    pub fn new<C: Into<String>, N: Into<String>>(code: C, name: N) -> Self {
        CatalogEntry {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// An operator-curated alternate text form for a catalog entry.
///
/// Synonyms are exact matches by construction and bypass fuzzy scoring
/// entirely; the stored synonym text is case-folded for lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymRecord {
    /// Case-folded synonym text.
    pub synonym: String,
    /// Code the synonym resolves to.
    pub code: String,
    /// Name the synonym resolves to.
    pub name: String,
    /// Match score a synonym hit reports (always 100).
    pub score: u8,
}

impl SynonymRecord {
    /// Create a new synonym record. The synonym text is case-folded.
    pub fn new<S: Into<String>, C: Into<String>, N: Into<String>>(
        synonym: S,
        code: C,
        name: N,
    ) -> Self {
        SynonymRecord {
            synonym: synonym.into().to_lowercase(),
            code: code.into(),
            name: name.into(),
            score: 100,
        }
    }
}

/// One row of the synonym snapshot consumed from the persistent product
/// store: a product plus its curated synonym list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Canonical catalog identifier.
    pub code: String,
    /// Product name.
    pub name: String,
    /// Curated synonyms for this product.
    #[serde(default)]
    pub synonyms: Vec<String>,
}

impl ProductRecord {
    /// Create a new product record.
    pub fn new<C: Into<String>, N: Into<String>>(code: C, name: N, synonyms: Vec<String>) -> Self {
        ProductRecord {
            code: code.into(),
            name: name.into(),
            synonyms,
        }
    }

    /// Expand snapshot rows into one [`SynonymRecord`] per synonym.
    pub fn expand_synonyms(records: &[ProductRecord]) -> Vec<SynonymRecord> {
        records
            .iter()
            .flat_map(|record| {
                record
                    .synonyms
                    .iter()
                    .map(|synonym| SynonymRecord::new(synonym.clone(), &record.code, &record.name))
            })
            .collect()
    }
}
