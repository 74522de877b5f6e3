//! Immutable catalog index generations.

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::entry::{CatalogEntry, ProductRecord, SynonymRecord};

/// One immutable generation of the catalog index.
///
/// Owns three indexes (code to entries, name to codes, folded synonym to
/// record) plus the candidate pools the fuzzy passes scan. Buckets preserve
/// catalog insertion order, so every "return first" disambiguation fallback
/// is deterministic. A generation is never mutated after construction;
/// refresh means building the next generation and swapping the reference via
/// [`CatalogHandle`](crate::catalog::handle::CatalogHandle).
#[derive(Debug, Clone)]
pub struct CatalogCache {
    /// Code to catalog entries, insertion order preserved.
    code_index: AHashMap<String, Vec<CatalogEntry>>,
    /// Exact name to codes, insertion order preserved.
    name_index: AHashMap<String, Vec<String>>,
    /// Case-folded synonym text to synonym record.
    synonym_index: AHashMap<String, SynonymRecord>,
    /// All entries in catalog order.
    entries: Vec<CatalogEntry>,
    /// Unique codes in first-seen order (fuzzy code candidate pool).
    codes: Vec<String>,
    /// Unique names in first-seen order (fuzzy name candidate pool).
    names: Vec<String>,
    /// Generation version, monotonically increasing across refreshes.
    version: u64,
    /// When this generation was built.
    built_at: DateTime<Utc>,
}

/// Statistics about one cache generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheInfo {
    /// Generation version.
    pub version: u64,
    /// Build timestamp.
    pub built_at: DateTime<Utc>,
    /// Total catalog entries, duplicates included.
    pub total_entries: usize,
    /// Total synonym records.
    pub total_synonyms: usize,
    /// Distinct catalog codes.
    pub unique_codes: usize,
    /// Distinct catalog names.
    pub unique_names: usize,
}

impl CatalogCache {
    /// Build a new first-generation cache from catalog entries and synonym
    /// records.
    ///
    /// Pure constructor: the result is internally consistent and immutable.
    /// Later synonym records win on folded-text collisions.
    pub fn build(entries: Vec<CatalogEntry>, synonyms: Vec<SynonymRecord>) -> Self {
        Self::build_generation(entries, synonyms, 1)
    }

    /// Build a first-generation cache straight from snapshot rows, expanding
    /// each product record's synonym list.
    pub fn from_snapshot(entries: Vec<CatalogEntry>, records: &[ProductRecord]) -> Self {
        Self::build(entries, ProductRecord::expand_synonyms(records))
    }

    /// Build the generation that succeeds this one (`version + 1`).
    pub fn next_generation(&self, entries: Vec<CatalogEntry>, synonyms: Vec<SynonymRecord>) -> Self {
        Self::build_generation(entries, synonyms, self.version + 1)
    }

    fn build_generation(
        entries: Vec<CatalogEntry>,
        synonyms: Vec<SynonymRecord>,
        version: u64,
    ) -> Self {
        let mut code_index: AHashMap<String, Vec<CatalogEntry>> = AHashMap::new();
        let mut name_index: AHashMap<String, Vec<String>> = AHashMap::new();
        let mut codes = Vec::new();
        let mut names = Vec::new();

        for entry in &entries {
            if !code_index.contains_key(&entry.code) {
                codes.push(entry.code.clone());
            }
            code_index
                .entry(entry.code.clone())
                .or_default()
                .push(entry.clone());

            if !name_index.contains_key(&entry.name) {
                names.push(entry.name.clone());
            }
            name_index
                .entry(entry.name.clone())
                .or_default()
                .push(entry.code.clone());
        }

        let mut synonym_index = AHashMap::new();
        for record in synonyms {
            synonym_index.insert(record.synonym.clone(), record);
        }

        CatalogCache {
            code_index,
            name_index,
            synonym_index,
            entries,
            codes,
            names,
            version,
            built_at: Utc::now(),
        }
    }

    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// All entries recorded for a code, in catalog order. Empty if absent.
    pub fn by_code(&self, code: &str) -> &[CatalogEntry] {
        self.code_index.get(code).map_or(&[], Vec::as_slice)
    }

    /// All codes recorded for an exact name, in catalog order. Empty if
    /// absent.
    pub fn by_name(&self, name: &str) -> &[String] {
        self.name_index.get(name).map_or(&[], Vec::as_slice)
    }

    /// Look up a synonym by case-folded exact match. Never fuzzy.
    pub fn by_synonym(&self, text: &str) -> Option<&SynonymRecord> {
        self.synonym_index.get(&text.to_lowercase())
    }

    /// All entries in catalog order, duplicates included.
    pub fn all_entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Unique codes in first-seen order.
    pub fn all_codes(&self) -> &[String] {
        &self.codes
    }

    /// Unique names in first-seen order.
    pub fn all_names(&self) -> &[String] {
        &self.names
    }

    /// Generation version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// When this generation was built.
    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    /// Statistics for health reporting.
    pub fn info(&self) -> CacheInfo {
        CacheInfo {
            version: self.version,
            built_at: self.built_at,
            total_entries: self.entries.len(),
            total_synonyms: self.synonym_index.len(),
            unique_codes: self.code_index.len(),
            unique_names: self.name_index.len(),
        }
    }
}

impl Default for CatalogCache {
    fn default() -> Self {
        Self::build(Vec::new(), Vec::new())
    }
}
