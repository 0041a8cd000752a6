//! Catalog record types.

pub mod types;

pub use types::{FaqEntry, PriceEntry};
