//! Process-wide immutable lexicon: stopwords, synonym groups, generic terms.
//!
//! The tables are embedded literals, built once behind a [`Lazy`] and shared
//! read-only across concurrent requests. Engines borrow `&Lexicon`, so tests
//! can substitute a small custom lexicon without touching the statics.

use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

/// One synonym group: a canonical representative and its surface forms.
#[derive(Debug, Clone)]
struct SynonymGroup {
    canonical: String,
    surfaces: Vec<String>,
}

/// Immutable matching tables shared by the FAQ search path.
#[derive(Debug, Clone)]
pub struct Lexicon {
    stopwords: FxHashSet<String>,
    groups: Vec<SynonymGroup>,
    canonical_index: FxHashMap<String, usize>,
    generic_terms: FxHashSet<String>,
}

impl Lexicon {
    pub fn new<S, C>(
        stopwords: impl IntoIterator<Item = S>,
        groups: impl IntoIterator<Item = (C, Vec<&'static str>)>,
        generic_terms: impl IntoIterator<Item = S>,
    ) -> Self
    where
        S: Into<String>,
        C: Into<String>,
    {
        let groups: Vec<SynonymGroup> = groups
            .into_iter()
            .map(|(canonical, surfaces)| SynonymGroup {
                canonical: canonical.into(),
                surfaces: surfaces.into_iter().map(str::to_string).collect(),
            })
            .collect();
        let canonical_index = groups
            .iter()
            .enumerate()
            .map(|(i, g)| (g.canonical.clone(), i))
            .collect();
        Self {
            stopwords: stopwords.into_iter().map(Into::into).collect(),
            groups,
            canonical_index,
            generic_terms: generic_terms.into_iter().map(Into::into).collect(),
        }
    }

    /// The built-in production lexicon.
    pub fn builtin() -> &'static Lexicon {
        &BUILTIN
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Whether `token` is itself a canonical representative.
    pub fn is_canonical(&self, token: &str) -> bool {
        self.canonical_index.contains_key(token)
    }

    /// Surface synonyms of a canonical representative, if any.
    pub fn surfaces_of(&self, canonical: &str) -> Option<&[String]> {
        self.canonical_index
            .get(canonical)
            .map(|&i| self.groups[i].surfaces.as_slice())
    }

    /// Map a token to its canonical representative.
    ///
    /// A token maps to a group when it equals, contains, or is contained by
    /// any of the group's surface forms. Groups are checked in table order;
    /// the first match wins.
    pub fn canonical_for(&self, token: &str) -> Option<&str> {
        for group in &self.groups {
            for surface in &group.surfaces {
                if token == surface || token.contains(surface.as_str()) || surface.contains(token) {
                    return Some(&group.canonical);
                }
            }
        }
        None
    }

    pub fn is_generic(&self, term: &str) -> bool {
        self.generic_terms.contains(term)
    }

    /// `(surface, canonical)` pairs ordered longest surface first, for the
    /// substring-replacement discipline used by keyword-list scoring.
    pub fn replacement_pairs(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .groups
            .iter()
            .flat_map(|g| {
                g.surfaces
                    .iter()
                    .map(move |s| (s.as_str(), g.canonical.as_str()))
            })
            .collect();
        pairs.sort_by(|a, b| b.0.chars().count().cmp(&a.0.chars().count()));
        pairs
    }
}

static BUILTIN: Lazy<Lexicon> = Lazy::new(|| {
    Lexicon::new(
        STOPWORDS.iter().copied(),
        SYNONYMS.iter().map(|(c, s)| (*c, s.to_vec())),
        GENERIC_TERMS.iter().copied(),
    )
});

/// Canonical representative → surface synonyms.
const SYNONYMS: &[(&str, &[&str])] = &[
    ("해약", &["해약금", "해지", "위약금", "해약비", "구독해약", "구독해지"]),
    ("미납", &["연체", "미납시", "미납정책", "구독료미납"]),
    ("변경", &["계약변경", "기간변경", "구독변경", "변경방법"]),
    ("명의변경", &["명의이전", "명의", "이름변경"]),
    ("결합", &["결합할인", "결합혜택", "다중구독"]),
    ("선납", &["미리납부", "일시납", "선납할인", "선납금"]),
    ("케어", &["케어서비스", "방문케어", "케어십", "무상AS", "AS", "방문서비스"]),
    ("배송", &["배송일", "배송일정", "설치", "설치일"]),
    ("소모품", &["필터", "소모품교체", "필터교체"]),
    ("롯데", &["롯데카드", "롯데제휴카드"]),
    ("국민", &["국민카드", "KB카드", "KB", "국민제휴카드"]),
    ("신한", &["신한카드", "신한제휴카드"]),
    ("우리", &["우리카드", "우리제휴카드"]),
    ("혜택", &["카드혜택", "할인혜택", "할인", "혜택금액"]),
    ("실적제외", &["실적제외항목", "실적", "카드실적"]),
    ("청구할인", &["캐시백", "청구할인방식", "할인방식"]),
    ("연회비", &["카드연회비", "연회비금액"]),
    ("프로모션", &["프로모", "이벤트", "행사"]),
];

/// Particles, fillers, and generic question words dropped before matching.
const STOPWORDS: &[&str] = &[
    "은", "는", "이", "가", "을", "를", "의", "에", "에서", "도", "로", "으로",
    "와", "과", "하고", "이랑", "랑", "며", "고", "지만", "인데", "거든",
    "것", "거", "건", "게", "때", "때문", "경우", "위해", "대해", "통해",
    "좀", "잠깐", "혹시", "그", "그게", "뭐", "어떻게", "얼마", "언제", "어디",
    "알려줘", "알려주세요", "궁금", "질문", "문의", "확인", "해줘", "해주세요",
    "하면", "되나요", "인가요", "인지", "나요", "인데요", "요", "네요",
    "수", "있", "없", "안", "못", "다", "더", "덜", "매우", "정말", "진짜",
    "합니다", "합니까", "하나요", "인가", "일까", "할까",
    "우리", "저", "나", "제", "엄마", "아빠", "고객", "사람", "분",
    "그냥", "일단", "아", "어", "음", "그래서", "근데", "그런데",
];

/// Short, high-frequency terms damped by the keyword-list scoring strategy.
const GENERIC_TERMS: &[&str] = &["카드", "방법", "요금", "금액", "할인", "혜택", "구독"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_load() {
        let lex = Lexicon::builtin();
        assert!(lex.is_stopword("은"));
        assert!(lex.is_canonical("미납"));
        assert!(!lex.is_canonical("연체"));
        assert!(lex.is_generic("카드"));
    }

    #[test]
    fn canonical_for_exact_surface() {
        let lex = Lexicon::builtin();
        assert_eq!(lex.canonical_for("연체"), Some("미납"));
        assert_eq!(lex.canonical_for("위약금"), Some("해약"));
    }

    #[test]
    fn canonical_for_containment_both_directions() {
        let lex = Lexicon::builtin();
        // token contains the surface
        assert_eq!(lex.canonical_for("연체되면"), Some("미납"));
        // surface contains the token
        assert_eq!(lex.canonical_for("배송일"), Some("배송"));
    }

    #[test]
    fn canonical_for_unknown_token() {
        assert_eq!(Lexicon::builtin().canonical_for("냉장고"), None);
    }

    #[test]
    fn surfaces_of_lists_group() {
        let surfaces = Lexicon::builtin().surfaces_of("미납").unwrap();
        assert!(surfaces.contains(&"연체".to_string()));
        assert_eq!(Lexicon::builtin().surfaces_of("연체"), None);
    }

    #[test]
    fn replacement_pairs_are_longest_first() {
        let pairs = Lexicon::builtin().replacement_pairs();
        for window in pairs.windows(2) {
            assert!(window[0].0.chars().count() >= window[1].0.chars().count());
        }
    }

    #[test]
    fn custom_lexicon_is_independent() {
        let lex = Lexicon::new(
            ["the"],
            [("late", vec!["overdue", "past-due"])],
            ["fee"],
        );
        assert!(lex.is_stopword("the"));
        assert_eq!(lex.canonical_for("overdue"), Some("late"));
        assert!(lex.is_generic("fee"));
        assert!(!lex.is_stopword("은"));
    }
}
