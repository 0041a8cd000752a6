//! Top-level dispatch over the two retrieval paths.
//!
//! One evaluation pass per utterance, fully synchronous. The engine holds
//! only borrowed read-only snapshots, so any number of requests may run
//! concurrently without locks; all disambiguation state is in the
//! continuation token the caller echoes back.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{CatalogError, FaqCatalog, PriceCatalog};
use crate::lexicon::Lexicon;
use crate::model::PriceEntry;
use crate::price::facet::{self, ContinuationToken, FACET_DELIMITER, FacetOutcome, FacetPrompt};
use crate::price::looks_like_model;
use crate::search::score::{PreparedQuery, RankedFaq};
use crate::search::{dedupe, rank};

/// Unexpected failures, converted at the boundary into a uniform apology
/// reply. Never carries user-facing text.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("malformed continuation token: {0:?}")]
    MalformedToken(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Every answer the engine can give. All variants are first-class,
/// recoverable outcomes — the transport layer decides how to render them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outcome {
    /// Ranked, de-duplicated FAQ hits (non-empty).
    Faq { results: Vec<RankedFaq> },
    /// A single resolved price record.
    Price { entry: PriceEntry },
    /// A facet disambiguation prompt.
    Prompt { prompt: FacetPrompt },
    /// Keyword extraction yielded nothing usable.
    EmptyQuery,
    /// Nothing in either catalog matches.
    NotFound,
    /// The model exists but the selected facet combination does not.
    NoMatch,
}

/// The retrieval engine: borrowed snapshots plus the static lexicon.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    faq: &'a FaqCatalog,
    price: &'a PriceCatalog,
    lexicon: &'a Lexicon,
}

impl<'a> Engine<'a> {
    pub fn new(faq: &'a FaqCatalog, price: &'a PriceCatalog, lexicon: &'a Lexicon) -> Self {
        Self { faq, price, lexicon }
    }

    /// Answer one trimmed utterance.
    ///
    /// Routing order: continuation token, then model-shaped utterance, then
    /// FAQ search. A model-shaped utterance that matches no price record
    /// falls through to FAQ search (a false positive of the shape check
    /// must stay harmless); a true continuation token never falls through.
    pub fn handle(&self, utterance: &str) -> Result<Outcome, EngineError> {
        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Ok(Outcome::EmptyQuery);
        }

        if utterance.contains(FACET_DELIMITER) {
            let token = ContinuationToken::parse(utterance)
                .ok_or_else(|| EngineError::MalformedToken(utterance.to_string()))?;
            return Ok(facet::resolve(&token, self.price).into());
        }

        if looks_like_model(utterance) {
            let outcome = facet::resolve(&ContinuationToken::for_model(utterance), self.price);
            if outcome != FacetOutcome::NotFound {
                return Ok(outcome.into());
            }
            debug!(utterance, "model-shaped utterance not in price catalog; trying faq");
        }

        let query = PreparedQuery::prepare(utterance, self.lexicon);
        if query.is_empty() {
            return Ok(Outcome::EmptyQuery);
        }
        let results = dedupe(rank(&query, self.faq, self.lexicon));
        if results.is_empty() {
            Ok(Outcome::NotFound)
        } else {
            Ok(Outcome::Faq { results })
        }
    }
}

impl From<FacetOutcome> for Outcome {
    fn from(outcome: FacetOutcome) -> Self {
        match outcome {
            FacetOutcome::Resolved(entry) => Outcome::Price { entry },
            FacetOutcome::Prompt(prompt) => Outcome::Prompt { prompt },
            FacetOutcome::NotFound => Outcome::NotFound,
            FacetOutcome::NoMatch => Outcome::NoMatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FaqEntry;

    fn faq(question: &str, answer: &str) -> FaqEntry {
        FaqEntry {
            id: 0,
            category1: String::new(),
            category2: String::new(),
            category3: String::new(),
            question: question.to_string(),
            answer: answer.to_string(),
            url: None,
            url_button: None,
            keywords: None,
        }
    }

    fn price(model: &str, g: &str) -> PriceEntry {
        PriceEntry {
            model_full: model.to_string(),
            product: "에어컨".to_string(),
            care_type: g.to_string(),
            care_detail: String::new(),
            visit_cycle: String::new(),
            care_combined: g.to_string(),
            activation: None,
            price_3y: Some(30000),
            price_4y: None,
            price_5y: None,
            price_6y: None,
            prepay30_lump: None,
            prepay30_monthly: None,
            prepay50_lump: None,
            prepay50_monthly: None,
        }
    }

    fn fixtures() -> (FaqCatalog, PriceCatalog) {
        let faq_catalog = FaqCatalog::from_entries(vec![
            faq("미납 정책이 궁금해요", "미납 시 안내"),
            faq("배송 일정 안내", "배송 안내"),
        ]);
        let price_catalog = PriceCatalog::from_entries(vec![
            price("AC720", "방문형"),
            price("AC720", "셀프형"),
        ])
        .unwrap();
        (faq_catalog, price_catalog)
    }

    #[test]
    fn empty_utterance_is_empty_query() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        assert_eq!(engine.handle("   ").unwrap(), Outcome::EmptyQuery);
    }

    #[test]
    fn stopword_only_utterance_is_empty_query() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        assert_eq!(engine.handle("그게 뭐 어떻게").unwrap(), Outcome::EmptyQuery);
    }

    #[test]
    fn model_shaped_utterance_routes_to_price_path() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        let outcome = engine.handle("AC720").unwrap();
        assert!(matches!(outcome, Outcome::Prompt { .. }));
    }

    #[test]
    fn unknown_model_falls_through_to_faq() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        // model-shaped but not in the price catalog, and not in the faq either
        assert_eq!(engine.handle("ZZ999X").unwrap(), Outcome::NotFound);
    }

    #[test]
    fn continuation_token_never_falls_through() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        assert_eq!(engine.handle("ZZ999X::방문형").unwrap(), Outcome::NotFound);
    }

    #[test]
    fn continuation_token_resolves_price() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        let outcome = engine.handle("AC720::셀프형").unwrap();
        let Outcome::Price { entry } = outcome else {
            panic!("expected price, got {outcome:?}");
        };
        assert_eq!(entry.care_type, "셀프형");
    }

    #[test]
    fn oversplit_token_is_an_internal_fault() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        let err = engine.handle("A::b::c::d::e").unwrap_err();
        assert!(matches!(err, EngineError::MalformedToken(_)));
    }

    #[test]
    fn free_text_routes_to_faq_search() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        let Outcome::Faq { results } = engine.handle("미납").unwrap() else {
            panic!("expected faq results");
        };
        assert_eq!(results[0].entry.question, "미납 정책이 궁금해요");
    }

    #[test]
    fn unmatched_free_text_is_not_found() {
        let (faq_catalog, price_catalog) = fixtures();
        let engine = Engine::new(&faq_catalog, &price_catalog, Lexicon::builtin());
        assert_eq!(engine.handle("냉장고 수리").unwrap(), Outcome::NotFound);
    }
}
