//! Keyword extraction and synonym expansion.
//!
//! Extraction tokenizes normalized text and strips stopwords; the result is
//! a duplicate-free token list in first-seen order (set semantics with a
//! deterministic iteration order). Expansion unions each token with its
//! canonical representative — originals are never removed, since ambiguity
//! is resolved by scoring, not by expansion.

use rustc_hash::FxHashSet;

use crate::lexicon::Lexicon;
use crate::search::normalize::normalize;

/// Tokenize, strip stopwords, deduplicate.
///
/// An empty result means "no usable query" (e.g. the utterance consisted
/// solely of particles and fillers) and is a first-class outcome for the
/// caller, not an error.
pub fn extract_keywords(text: &str, lexicon: &Lexicon) -> Vec<String> {
    let normalized = normalize(text);
    let mut seen = FxHashSet::default();
    normalized
        .split(' ')
        .filter(|token| !token.is_empty() && !lexicon.is_stopword(token))
        .filter(|token| seen.insert(token.to_string()))
        .map(str::to_string)
        .collect()
}

/// Union the tokens with their canonical representatives.
///
/// A token that is itself a canonical key passes through unchanged; any
/// other token that matches a surface synonym additionally contributes the
/// group's canonical representative. Order: originals first, then the
/// canonical additions in token order.
pub fn expand(tokens: &[String], lexicon: &Lexicon) -> Vec<String> {
    let mut seen: FxHashSet<&str> = tokens.iter().map(String::as_str).collect();
    let mut expanded: Vec<String> = tokens.to_vec();
    for token in tokens {
        if lexicon.is_canonical(token) {
            continue;
        }
        if let Some(canonical) = lexicon.canonical_for(token)
            && seen.insert(canonical)
        {
            expanded.push(canonical.to_string());
        }
    }
    expanded
}
