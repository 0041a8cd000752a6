//! Immutable catalog snapshots and their ingestion boundary.
//!
//! Both catalogs are built once from already-converted JSON and held as
//! read-only snapshots for the process lifetime; every engine operation
//! takes `&FaqCatalog` / `&PriceCatalog` and never writes back.
//!
//! Ingestion responsibilities at this boundary:
//!
//! - de-duplicate price rows by `(modelFull, combinedFacetKey)`, keeping the
//!   first occurrence in source order (catalog order is the documented
//!   tie-break for facet resolution, so ordering must stay stable);
//! - reject facet values containing the reserved continuation delimiter;
//! - re-coerce numeric fields (`0` ⇒ absent) and blank link fields
//!   (`""` ⇒ `None`) in case the offline converter missed them.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;
use thiserror::Error;
use tracing::{debug, info};

use crate::model::{FaqEntry, PriceEntry};
use crate::price::facet::FACET_DELIMITER;

/// Errors from catalog loading and validation.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("facet value {value:?} of model {model} contains the reserved delimiter \"::\"")]
    DelimiterInFacet { model: String, value: String },
}

/// Read-only snapshot of the FAQ catalog.
#[derive(Debug, Clone, Default)]
pub struct FaqCatalog {
    entries: Vec<FaqEntry>,
}

impl FaqCatalog {
    /// Build a snapshot, normalizing blank link fields to absent.
    pub fn from_entries(entries: Vec<FaqEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|mut entry| {
                entry.url = entry.url.filter(|u| !u.trim().is_empty());
                entry.url_button = entry.url_button.filter(|b| !b.trim().is_empty());
                entry
            })
            .collect::<Vec<_>>();
        debug!(count = entries.len(), "faq catalog snapshot built");
        Self { entries }
    }

    /// Load a snapshot from a converter-produced JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let entries: Vec<FaqEntry> = serde_json::from_str(&raw)?;
        info!(
            path = %path.as_ref().display(),
            count = entries.len(),
            "loaded faq catalog"
        );
        Ok(Self::from_entries(entries))
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sorted distinct non-empty mid-category labels, for menu rendering.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = FxHashSet::default();
        let mut cats: Vec<String> = self
            .entries
            .iter()
            .map(|e| e.category2.clone())
            .filter(|c| !c.is_empty() && seen.insert(c.clone()))
            .collect();
        cats.sort();
        cats
    }

    /// Entries whose mid or fine category equals `name`.
    pub fn by_category(&self, name: &str) -> Vec<&FaqEntry> {
        self.entries
            .iter()
            .filter(|e| e.category2 == name || e.category3 == name)
            .collect()
    }
}

/// Read-only snapshot of the price catalog.
#[derive(Debug, Clone, Default)]
pub struct PriceCatalog {
    entries: Vec<PriceEntry>,
}

impl PriceCatalog {
    /// Build a snapshot: validate facet values, de-duplicate, coerce zeros.
    ///
    /// Later duplicates of a `(modelFull, combinedFacetKey)` pair are
    /// discarded; source order of the survivors is preserved.
    pub fn from_entries(entries: Vec<PriceEntry>) -> Result<Self, CatalogError> {
        let total = entries.len();
        let mut seen: FxHashSet<(String, String)> = FxHashSet::default();
        let mut kept = Vec::with_capacity(total);
        for mut entry in entries {
            for value in [&entry.care_type, &entry.care_detail, &entry.visit_cycle] {
                if value.contains(FACET_DELIMITER) {
                    return Err(CatalogError::DelimiterInFacet {
                        model: entry.model_full.clone(),
                        value: value.clone(),
                    });
                }
            }
            if !seen.insert(entry.dedup_key()) {
                continue;
            }
            entry.activation = coerce(entry.activation);
            entry.price_3y = coerce(entry.price_3y);
            entry.price_4y = coerce(entry.price_4y);
            entry.price_5y = coerce(entry.price_5y);
            entry.price_6y = coerce(entry.price_6y);
            entry.prepay30_lump = coerce(entry.prepay30_lump);
            entry.prepay30_monthly = coerce(entry.prepay30_monthly);
            entry.prepay50_lump = coerce(entry.prepay50_lump);
            entry.prepay50_monthly = coerce(entry.prepay50_monthly);
            kept.push(entry);
        }
        if kept.len() < total {
            debug!(
                dropped = total - kept.len(),
                kept = kept.len(),
                "price catalog de-duplication"
            );
        }
        Ok(Self { entries: kept })
    }

    /// Load a snapshot from a converter-produced JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = fs::read_to_string(path.as_ref())?;
        let entries: Vec<PriceEntry> = serde_json::from_str(&raw)?;
        info!(
            path = %path.as_ref().display(),
            count = entries.len(),
            "loaded price catalog"
        );
        Self::from_entries(entries)
    }

    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All records for a model query, in catalog order.
    ///
    /// Prefers case-insensitive exact matches on the full model code; when
    /// there are none, falls back to prefix matches so a shortened code
    /// (e.g. `A720WA` for `A720WA.AKOR`) still resolves. The fallback is
    /// restricted to a single model: when the prefix matches several
    /// distinct `model_full` values, only the first model in catalog order
    /// is returned. Mixing sibling models would let facet narrowing
    /// resolve to one model's price while the caller meant another.
    pub fn find_model(&self, query: &str) -> Vec<&PriceEntry> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let exact: Vec<&PriceEntry> = self
            .entries
            .iter()
            .filter(|e| e.model_full.eq_ignore_ascii_case(query))
            .collect();
        if !exact.is_empty() {
            return exact;
        }
        let has_prefix = |e: &PriceEntry| {
            e.model_full
                .get(..query.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(query))
        };
        let Some(first) = self.entries.iter().find(|e| has_prefix(e)) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .filter(|e| e.model_full == first.model_full)
            .collect()
    }
}

fn coerce(value: Option<u32>) -> Option<u32> {
    value.filter(|&v| v != 0)
}
