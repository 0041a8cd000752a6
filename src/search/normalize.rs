//! Text normalization for consistent matching.
//!
//! Every comparison in the FAQ path happens between normalized strings, so
//! the pipeline must be deterministic and idempotent: the same visual input
//! always produces the same output, and re-normalizing is a no-op.

use unicode_normalization::UnicodeNormalization;

/// Canonicalize raw text for comparison.
///
/// NFC first (decomposed Hangul/Latin input must compare equal to composed
/// input), then lowercase, then every character that is not a word
/// character or a Hangul syllable becomes a space, then whitespace runs
/// collapse and the ends are trimmed. Empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .nfc()
        .flat_map(char::to_lowercase)
        .map(|c| if is_word_char(c) { c } else { ' ' })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Word characters: ASCII alphanumerics, underscore, Hangul syllables.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(normalize("Lotte Card!! 혜택?"), "lotte card 혜택");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize("  미납   정책  "), "미납 정책");
        assert_eq!(normalize("a\t\nb"), "a b");
    }

    #[test]
    fn keeps_underscore_and_digits() {
        assert_eq!(normalize("model_A720 v2"), "model_a720 v2");
    }

    #[test]
    fn empty_and_punctuation_only_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("?!.,~"), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn idempotent() {
        for input in ["", "?!", "  Mixed 한글 TEXT  ", "미납!!", "café au lait"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn nfc_composed_and_decomposed_agree() {
        // 한 as a precomposed syllable vs. conjoining jamo
        let composed = "\u{D55C}\u{AE00}";
        let decomposed = "\u{1112}\u{1161}\u{11AB}\u{AE00}";
        assert_eq!(normalize(composed), normalize(decomposed));
    }

    #[test]
    fn non_hangul_non_ascii_letters_become_spaces() {
        // Jamo and kana are outside the syllable block and get stripped
        assert_eq!(normalize("ㅋㅋ 미납 カナ"), "미납");
    }
}
