//! Model-price lookup path.
//!
//! - [`classifier`] — routes model-shaped utterances to this path
//! - [`facet`] — continuation token and the facet narrowing state machine

pub mod classifier;
pub mod facet;

pub use classifier::looks_like_model;
pub use facet::{ContinuationToken, FacetOutcome, FacetPrompt, resolve};
