//! Model-code shape heuristic.
//!
//! Routes an utterance to the price path instead of FAQ search. The check
//! only has to be plausible: a false negative falls through to FAQ search,
//! a false positive ends in a harmless "no such model" outcome.

use once_cell::sync::Lazy;
use regex::Regex;

/// ASCII alphanumerics with optional interior `-`/`.`, 3–20 chars.
static MODEL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9.-]{1,18}[A-Za-z0-9]$").expect("valid pattern"));

/// Whether trimmed input looks like a product model code.
///
/// Requires the characteristic mixed shape: at least one ASCII letter and
/// at least one digit, no spaces, no Hangul.
pub fn looks_like_model(text: &str) -> bool {
    let text = text.trim();
    MODEL_SHAPE.is_match(text)
        && text.chars().any(|c| c.is_ascii_alphabetic())
        && text.chars().any(|c| c.is_ascii_digit())
}
