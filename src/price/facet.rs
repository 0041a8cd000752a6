//! Stepwise facet narrowing for model-price queries.
//!
//! A price lookup starts from all records of a model and narrows along the
//! fixed facet order G → H → I (care type, care detail, visit cycle) until
//! exactly one priced record remains. All disambiguation state travels in
//! the continuation token the caller echoes back (`model[::g[::h[::i]]]`);
//! nothing is kept server-side.
//!
//! The narrowing is an explicit bounded loop over the three [`FacetLevel`]s
//! — never recursion — so termination holds even for malformed or
//! adversarial tokens. Narrowing is monotonic: each step's candidate set is
//! a subset of the previous step's.

use std::sync::atomic::{AtomicU64, Ordering};

use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::PriceCatalog;
use crate::model::PriceEntry;

/// Reserved segment delimiter of the continuation token. Catalog ingestion
/// rejects facet values containing it, so it can never occur naturally.
pub const FACET_DELIMITER: &str = "::";

/// Maximum selectable values offered in one disambiguation prompt.
pub const MAX_PROMPT_OPTIONS: usize = 10;

/// Records resolved by the exhausted-facet fallback while ≥2 candidates
/// remained. A growing count points at duplicate facet-complete rows in the
/// source data.
static RESIDUAL_AMBIGUITY: AtomicU64 = AtomicU64::new(0);

/// How many price lookups have hit the residual-ambiguity fallback.
pub fn residual_ambiguity_count() -> u64 {
    RESIDUAL_AMBIGUITY.load(Ordering::Relaxed)
}

/// The three ordered disambiguation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FacetLevel {
    CareType,
    CareDetail,
    VisitCycle,
}

impl FacetLevel {
    /// Fixed narrowing order G → H → I.
    pub const ALL: [FacetLevel; 3] = [
        FacetLevel::CareType,
        FacetLevel::CareDetail,
        FacetLevel::VisitCycle,
    ];

    fn value<'a>(self, entry: &'a PriceEntry) -> &'a str {
        match self {
            FacetLevel::CareType => &entry.care_type,
            FacetLevel::CareDetail => &entry.care_detail,
            FacetLevel::VisitCycle => &entry.visit_cycle,
        }
    }

    /// Korean prompt line asking the user to pick a value at this level.
    pub fn prompt_line(self) -> &'static str {
        match self {
            FacetLevel::CareType => "케어십 유형을 선택해주세요!",
            FacetLevel::CareDetail => "세부 유형을 선택해주세요!",
            FacetLevel::VisitCycle => "방문주기를 선택해주세요!",
        }
    }
}

/// Parsed continuation token: model query plus up to three facet segments.
///
/// A present-but-empty segment means the level was consumed without fixing
/// a value (the engine emits those when a level had nothing to
/// discriminate), so `Some("")` and `None` narrow identically but encode
/// differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken {
    pub model: String,
    pub selections: [Option<String>; 3],
}

impl ContinuationToken {
    /// Start-of-flow token for a bare model query.
    pub fn for_model(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            selections: [None, None, None],
        }
    }

    /// Split a raw token into at most four `::`-delimited segments.
    ///
    /// Returns `None` for a token with more than four segments: a facet
    /// value can never contain the reserved delimiter, so such a token
    /// cannot have been produced by this engine.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.splitn(4, FACET_DELIMITER);
        let model = parts.next().unwrap_or_default().trim().to_string();
        let mut selections: [Option<String>; 3] = [None, None, None];
        for slot in &mut selections {
            let Some(segment) = parts.next() else { break };
            if segment.contains(FACET_DELIMITER) {
                return None;
            }
            *slot = Some(segment.trim().to_string());
        }
        Some(Self { model, selections })
    }

    /// Re-encode as the wire token, emitting empty segments for consumed
    /// levels so the receiving side re-enters at the same depth.
    pub fn encode(&self) -> String {
        let depth = self
            .selections
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + 1);
        let mut out = self.model.clone();
        for selection in &self.selections[..depth] {
            out.push_str(FACET_DELIMITER);
            out.push_str(selection.as_deref().unwrap_or(""));
        }
        out
    }

    /// The token a prompt option sends back: this token with `value` bound
    /// at `level` (earlier unset levels become consumed-empty segments).
    pub fn with_selection(&self, level: FacetLevel, value: &str) -> Self {
        let index = FacetLevel::ALL
            .iter()
            .position(|l| *l == level)
            .unwrap_or(0);
        let mut next = self.clone();
        for slot in next.selections[..index].iter_mut() {
            if slot.is_none() {
                *slot = Some(String::new());
            }
        }
        next.selections[index] = Some(value.to_string());
        next
    }
}

/// One selectable value in a disambiguation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    /// Facet value shown to the user.
    pub label: String,
    /// Continuation token the caller echoes back on selection.
    pub payload: String,
}

/// A disambiguation prompt: the next facet's distinct values as options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetPrompt {
    pub product: String,
    pub model_full: String,
    /// The facet level being asked about.
    pub level: FacetLevel,
    /// Facet values already fixed, for header rendering.
    pub chosen: Vec<String>,
    /// Up to [`MAX_PROMPT_OPTIONS`] selectable values. The transport layer
    /// appends the "return to start" affordance when rendering.
    pub options: Vec<FacetOption>,
}

/// Result of one narrowing pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FacetOutcome {
    /// Exactly one priced record remains.
    Resolved(PriceEntry),
    /// ≥2 candidates and a facet that discriminates: ask the user.
    Prompt(FacetPrompt),
    /// No record matches the model query at all.
    NotFound,
    /// The model exists but the selected facet combination eliminated
    /// every candidate.
    NoMatch,
}

/// Narrow a model's price records by the token's facet selections.
///
/// Single evaluation pass, at most three level steps:
///
/// 1. look up all records for the model (none ⇒ [`FacetOutcome::NotFound`]);
/// 2. per level in fixed order: apply a bound non-empty selection (empty
///    result ⇒ [`FacetOutcome::NoMatch`]); for an unbound level, auto-skip
///    when the level has 0 or 1 distinct values across the candidates and
///    prompt when it has ≥2;
/// 3. a single remaining candidate resolves immediately at any point, even
///    with levels still unset.
///
/// If all levels are exhausted and ≥2 candidates remain, the first
/// candidate in catalog order resolves the query; the event is logged and
/// counted (see [`residual_ambiguity_count`]) since it indicates duplicate
/// facet-complete rows in the source data.
pub fn resolve(token: &ContinuationToken, catalog: &PriceCatalog) -> FacetOutcome {
    let mut candidates = catalog.find_model(&token.model);
    if candidates.is_empty() {
        debug!(model = %token.model, "no price records for model");
        return FacetOutcome::NotFound;
    }
    let product = candidates[0].product.clone();
    let model_full = candidates[0].model_full.clone();

    // Working copy: auto-advanced levels are bound here so prompt payloads
    // carry every fixed value at its correct position.
    let mut token = token.clone();

    for (index, level) in FacetLevel::ALL.into_iter().enumerate() {
        if candidates.len() == 1 {
            return FacetOutcome::Resolved(candidates[0].clone());
        }
        let selection = token.selections[index].clone();
        match selection.as_deref() {
            Some(selected) if !selected.is_empty() => {
                candidates.retain(|e| level.value(e) == selected);
                if candidates.is_empty() {
                    debug!(model = %token.model, ?level, selected, "facet selection eliminated all candidates");
                    return FacetOutcome::NoMatch;
                }
            }
            Some(_) => {
                // level consumed without a filter
            }
            None => {
                let values: Vec<&str> = candidates
                    .iter()
                    .map(|e| level.value(e))
                    .filter(|v| !v.is_empty())
                    .unique()
                    .collect();
                match values.len() {
                    0 => {
                        // nothing to discriminate: consume the level empty
                        token.selections[index] = Some(String::new());
                    }
                    1 => {
                        // auto-skip: bind the single value without prompting
                        candidates.retain(|e| level.value(e) == values[0]);
                        token.selections[index] = Some(values[0].to_string());
                    }
                    _ => {
                        let options = values
                            .iter()
                            .take(MAX_PROMPT_OPTIONS)
                            .map(|value| FacetOption {
                                label: (*value).to_string(),
                                payload: token.with_selection(level, value).encode(),
                            })
                            .collect();
                        let chosen = token.selections[..index]
                            .iter()
                            .filter_map(|s| s.clone())
                            .filter(|s| !s.is_empty())
                            .collect();
                        return FacetOutcome::Prompt(FacetPrompt {
                            product,
                            model_full,
                            level,
                            chosen,
                            options,
                        });
                    }
                }
            }
        }
    }

    if candidates.len() > 1 {
        RESIDUAL_AMBIGUITY.fetch_add(1, Ordering::Relaxed);
        warn!(
            model = %model_full,
            remaining = candidates.len(),
            "all facets exhausted with multiple candidates; resolving to first in catalog order"
        );
    }
    FacetOutcome::Resolved(candidates[0].clone())
}
