//! Near-duplicate removal for ranked FAQ results.
//!
//! Several catalog rows can share one answer (the same policy filed under
//! different questions). Walking in rank order and fingerprinting the
//! answer keeps only the highest-ranked spelling of each answer.

use rustc_hash::FxHashSet;

use crate::search::score::RankedFaq;

/// Characters of answer text that form the content fingerprint.
const FINGERPRINT_CHARS: usize = 50;

/// Drop results whose answer fingerprint was already kept.
///
/// The fingerprint is the first 50 characters (not bytes — answers are
/// Korean) of the answer text. Relative order of kept items is preserved.
pub fn dedupe(results: Vec<RankedFaq>) -> Vec<RankedFaq> {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    results
        .into_iter()
        .filter(|hit| seen.insert(fingerprint(&hit.entry.answer)))
        .collect()
}

fn fingerprint(answer: &str) -> String {
    answer.chars().take(FINGERPRINT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FaqEntry;

    fn hit(question: &str, answer: &str, score: i64) -> RankedFaq {
        RankedFaq {
            entry: FaqEntry {
                id: 0,
                category1: String::new(),
                category2: String::new(),
                category3: String::new(),
                question: question.to_string(),
                answer: answer.to_string(),
                url: None,
                url_button: None,
                keywords: None,
            },
            score,
            matched: Vec::new(),
        }
    }

    #[test]
    fn keeps_higher_ranked_of_identical_answers() {
        let results = vec![
            hit("q1", "동일한 답변", 90),
            hit("q2", "동일한 답변", 40),
            hit("q3", "다른 답변", 30),
        ];
        let kept = dedupe(results);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].entry.question, "q1");
        assert_eq!(kept[1].entry.question, "q3");
    }

    #[test]
    fn fingerprint_ignores_divergence_past_50_chars() {
        let prefix: String = "가".repeat(50);
        let results = vec![
            hit("q1", &format!("{prefix} 뒤쪽이 다름 A"), 90),
            hit("q2", &format!("{prefix} 뒤쪽이 다름 B"), 40),
        ];
        assert_eq!(dedupe(results).len(), 1);
    }

    #[test]
    fn short_answers_differing_early_are_kept() {
        let results = vec![hit("q1", "답 A", 90), hit("q2", "답 B", 40)];
        assert_eq!(dedupe(results).len(), 2);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
