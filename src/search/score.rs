//! Catalog scoring: two tuned strategies behind one interface.
//!
//! - [`FreeTextStrategy`] scans the entry's question/category/answer text
//!   with tiered per-keyword bonuses. It pairs with the token-set-union
//!   synonym discipline in [`crate::search::keywords`].
//! - [`KeywordListStrategy`] matches an entry's explicit keyword list
//!   against a query rewritten by ordered longest-synonym-first substring
//!   replacement, damping short high-frequency generic terms.
//!
//! The two strategies are tuned independently; their constants must never
//! be merged. [`rank`] picks per entry: entries carrying an explicit
//! keyword list use the keyword-list strategy, all others the free-text
//! one. Scoring is a pure function of `(query, catalog)`: deterministic,
//! no side effects, safe to call concurrently.

use serde::Serialize;
use tracing::debug;

use crate::catalog::FaqCatalog;
use crate::lexicon::Lexicon;
use crate::model::FaqEntry;
use crate::search::keywords::{expand, extract_keywords};
use crate::search::normalize::normalize;

/// Normalized query equals the normalized question.
pub const EXACT_BONUS: i64 = 100;
/// One side contains the other (and they are not equal).
pub const CONTAINMENT_BONUS: i64 = 50;
/// Keyword found in the question text.
pub const QUESTION_TIER: i64 = 10;
/// Keyword found in the category labels.
pub const CATEGORY_TIER: i64 = 5;
/// Keyword found in the answer text.
pub const ANSWER_TIER: i64 = 2;
/// Each surface synonym of a canonical keyword found in the question.
pub const SYNONYM_IN_QUESTION_BONUS: i64 = 7;
/// Containment hit on a damped generic keyword (keyword-list strategy).
pub const GENERIC_KEYWORD_SCORE: i64 = 3;
/// Base for a non-generic keyword-list hit; the keyword's character count
/// is added on top, so longer (more specific) keywords score higher.
pub const KEYWORD_BASE_SCORE: i64 = 10;
/// Per-matched-keyword bonus when at least two distinct keywords hit.
pub const CO_OCCURRENCE_BONUS: i64 = 5;

/// A query prepared once and scored against every entry.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    /// Normalized full utterance.
    pub normalized: String,
    /// Extracted and synonym-expanded keywords (union, first-seen order).
    pub keywords: Vec<String>,
    /// Normalized utterance after longest-synonym-first substring
    /// replacement to canonical representatives (keyword-list strategy).
    pub rewritten: String,
}

impl PreparedQuery {
    pub fn prepare(query: &str, lexicon: &Lexicon) -> Self {
        let normalized = normalize(query);
        let keywords = expand(&extract_keywords(query, lexicon), lexicon);
        let rewritten = rewrite_to_canonical(&normalized, lexicon);
        Self {
            normalized,
            keywords,
            rewritten,
        }
    }

    /// No usable keywords survived extraction.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Replace surface synonyms with their canonical representatives, longest
/// surface first so a longer synonym is never shadowed by a shorter one it
/// contains.
fn rewrite_to_canonical(normalized: &str, lexicon: &Lexicon) -> String {
    let mut text = normalized.to_string();
    for (surface, canonical) in lexicon.replacement_pairs() {
        let surface_norm = normalize(surface);
        if !surface_norm.is_empty() && text.contains(&surface_norm) {
            text = text.replace(&surface_norm, canonical);
        }
    }
    text
}

/// Score breakdown for one entry.
#[derive(Debug, Clone, Default)]
pub struct EntryScore {
    pub total: i64,
    /// Keywords (and surface synonyms) that contributed to the score.
    pub matched: Vec<String>,
}

/// One scoring discipline over a prepared query and a single entry.
pub trait ScoringStrategy {
    fn score(&self, query: &PreparedQuery, entry: &FaqEntry, lexicon: &Lexicon) -> EntryScore;
}

/// Free-text scanning of question / category / answer fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeTextStrategy;

impl ScoringStrategy for FreeTextStrategy {
    fn score(&self, query: &PreparedQuery, entry: &FaqEntry, lexicon: &Lexicon) -> EntryScore {
        let question = normalize(&entry.question);
        let category = normalize(&format!("{} {}", entry.category2, entry.category3));
        let answer = normalize(&entry.answer);

        let mut score = EntryScore::default();
        score_question_overlap(&mut score, &query.normalized, &question);

        // Tiered per-keyword bonus; a keyword scores once, at its highest tier.
        let mut tier_hits = 0i64;
        for keyword in &query.keywords {
            let tier = if question.contains(keyword.as_str()) {
                QUESTION_TIER
            } else if category.contains(keyword.as_str()) {
                CATEGORY_TIER
            } else if answer.contains(keyword.as_str()) {
                ANSWER_TIER
            } else {
                continue;
            };
            score.total += tier;
            score.matched.push(keyword.clone());
            tier_hits += 1;
        }

        // Canonical keywords earn a bonus for each surface synonym that
        // appears in the question text.
        for keyword in &query.keywords {
            if let Some(surfaces) = lexicon.surfaces_of(keyword) {
                for surface in surfaces {
                    if question.contains(&normalize(surface)) {
                        score.total += SYNONYM_IN_QUESTION_BONUS;
                        score.matched.push(surface.clone());
                    }
                }
            }
        }

        if tier_hits >= 2 {
            score.total += CO_OCCURRENCE_BONUS * tier_hits;
        }
        score
    }
}

/// Explicit per-entry keyword lists with generic-term damping.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordListStrategy;

impl ScoringStrategy for KeywordListStrategy {
    fn score(&self, query: &PreparedQuery, entry: &FaqEntry, lexicon: &Lexicon) -> EntryScore {
        let question = normalize(&entry.question);

        let mut score = EntryScore::default();
        score_question_overlap(&mut score, &query.normalized, &question);

        let Some(keywords) = entry.keywords.as_deref() else {
            return score;
        };
        let mut hits = 0i64;
        for keyword in keywords {
            let keyword_norm = normalize(keyword);
            if keyword_norm.is_empty() || !query.rewritten.contains(&keyword_norm) {
                continue;
            }
            score.total += if lexicon.is_generic(&keyword_norm) {
                GENERIC_KEYWORD_SCORE
            } else {
                KEYWORD_BASE_SCORE + keyword_norm.chars().count() as i64
            };
            score.matched.push(keyword.clone());
            hits += 1;
        }
        if hits >= 2 {
            score.total += CO_OCCURRENCE_BONUS * hits;
        }
        score
    }
}

/// Exact/containment bonuses shared by both strategies.
fn score_question_overlap(score: &mut EntryScore, query_norm: &str, question_norm: &str) {
    if query_norm.is_empty() || question_norm.is_empty() {
        return;
    }
    if query_norm == question_norm {
        score.total += EXACT_BONUS;
        score.matched.push("exact".to_string());
    } else if question_norm.contains(query_norm) || query_norm.contains(question_norm) {
        score.total += CONTAINMENT_BONUS;
        score.matched.push("contains".to_string());
    }
}

/// One FAQ hit in the ranked result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedFaq {
    pub entry: FaqEntry,
    pub score: i64,
    pub matched: Vec<String>,
}

/// Rank the catalog against a prepared query.
///
/// Entries scoring ≤ 0 are excluded. The sort is stable and strictly
/// descending by score, so ties keep catalog iteration order.
pub fn rank(query: &PreparedQuery, catalog: &FaqCatalog, lexicon: &Lexicon) -> Vec<RankedFaq> {
    let free_text = FreeTextStrategy;
    let keyword_list = KeywordListStrategy;
    let mut ranked: Vec<RankedFaq> = catalog
        .entries()
        .iter()
        .filter_map(|entry| {
            let strategy: &dyn ScoringStrategy = if entry.keywords.is_some() {
                &keyword_list
            } else {
                &free_text
            };
            let scored = strategy.score(query, entry, lexicon);
            (scored.total > 0).then(|| RankedFaq {
                entry: entry.clone(),
                score: scored.total,
                matched: dedup_preserving_order(scored.matched),
            })
        })
        .collect();
    ranked.sort_by_key(|hit| std::cmp::Reverse(hit.score));
    debug!(
        keywords = ?query.keywords,
        hits = ranked.len(),
        "ranked faq catalog"
    );
    ranked
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = rustc_hash::FxHashSet::default();
    items.into_iter().filter(|i| seen.insert(i.clone())).collect()
}
