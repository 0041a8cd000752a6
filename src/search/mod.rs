//! Free-text FAQ retrieval path.
//!
//! - [`normalize`] — text canonicalization for comparison
//! - [`keywords`] — tokenization, stopword stripping, synonym expansion
//! - [`score`] — the two scoring strategies and catalog ranking
//! - [`dedupe`] — near-duplicate answer removal on ranked results

pub mod dedupe;
pub mod keywords;
pub mod normalize;
pub mod score;

pub use dedupe::dedupe;
pub use keywords::{expand, extract_keywords};
pub use normalize::normalize;
pub use score::{PreparedQuery, RankedFaq, rank};
