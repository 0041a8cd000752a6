//! Retrieval core for a subscription-care chat assistant.
//!
//! Two stateless paths over immutable in-memory catalogs:
//!
//! - **FAQ search** — normalization, stopword stripping, synonym expansion,
//!   tiered scoring, and near-duplicate removal over a fixed
//!   question–answer catalog ([`search`]).
//! - **Price lookup** — a model-code classifier plus a stepwise
//!   facet-narrowing state machine that resolves an ambiguous model query
//!   to exactly one priced record, carrying all disambiguation state in a
//!   caller-echoed continuation token ([`price`]).
//!
//! [`Engine::handle`] dispatches one utterance through both paths and
//! returns an [`Outcome`]; [`Reply::from_outcome`] renders outcomes into
//! the closed set of reply shapes the transport layer consumes. Everything
//! is synchronous and lock-free: catalogs are read-only snapshots and all
//! operations are pure functions over `(input, snapshot)`.

pub mod catalog;
pub mod engine;
pub mod lexicon;
pub mod model;
pub mod price;
pub mod response;
pub mod search;

pub use catalog::{CatalogError, FaqCatalog, PriceCatalog};
pub use engine::{Engine, EngineError, Outcome};
pub use lexicon::Lexicon;
pub use model::{FaqEntry, PriceEntry};
pub use price::facet::{ContinuationToken, FacetOutcome, FacetPrompt, residual_ambiguity_count};
pub use price::looks_like_model;
pub use response::{Reply, ReplyOption};
pub use search::score::RankedFaq;
