//! Tagged reply variants handed to the transport layer.
//!
//! The engine's outcomes are rendered into a small closed set of reply
//! shapes — plain text, card with a link, menu with options — built by
//! explicit constructors and validated once. The transport layer maps these
//! onto its chat-surface envelope; nothing here knows about that envelope.

use serde::Serialize;

use crate::engine::Outcome;
use crate::model::PriceEntry;
use crate::price::facet::{FacetPrompt, MAX_PROMPT_OPTIONS};
use crate::search::score::RankedFaq;

/// Label/message pair the chat surface turns into a quick-reply button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyOption {
    pub label: String,
    /// Utterance sent back when the option is tapped.
    pub message: String,
}

impl ReplyOption {
    pub fn new(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            message: message.into(),
        }
    }

    /// The ever-present "return to start" affordance.
    pub fn home() -> Self {
        Self::new("🏠 처음으로", "처음으로")
    }
}

/// The closed set of reply shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    /// Plain text plus optional quick replies.
    Text {
        text: String,
        options: Vec<ReplyOption>,
    },
    /// Text with a reference link rendered as a button.
    Card {
        text: String,
        link_label: String,
        url: String,
        options: Vec<ReplyOption>,
    },
    /// A question with selectable options (always ends with home).
    Menu {
        text: String,
        options: Vec<ReplyOption>,
    },
}

impl Reply {
    pub fn text(text: impl Into<String>, options: Vec<ReplyOption>) -> Self {
        Reply::Text {
            text: text.into(),
            options,
        }
    }

    pub fn card(
        text: impl Into<String>,
        link_label: impl Into<String>,
        url: impl Into<String>,
        options: Vec<ReplyOption>,
    ) -> Self {
        Reply::Card {
            text: text.into(),
            link_label: link_label.into(),
            url: url.into(),
            options,
        }
    }

    /// Menu constructor; truncates to the option cap and appends home.
    pub fn menu(text: impl Into<String>, mut options: Vec<ReplyOption>) -> Self {
        options.truncate(MAX_PROMPT_OPTIONS);
        options.push(ReplyOption::home());
        Reply::Menu {
            text: text.into(),
            options,
        }
    }

    /// Uniform apology for any internal fault. Carries no diagnostics.
    pub fn fallback() -> Self {
        Reply::text(
            "죄송합니다. 일시적인 오류가 발생했습니다. 잠시 후 다시 시도해주세요.",
            vec![ReplyOption::home()],
        )
    }

    /// Render an engine outcome for the chat surface.
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Faq { results } => render_faq(results),
            Outcome::Price { entry } => Reply::text(
                format_price(entry),
                vec![
                    ReplyOption::home(),
                    ReplyOption::new("💰 다른 모델 조회", "가격표"),
                ],
            ),
            Outcome::Prompt { prompt } => render_prompt(prompt),
            Outcome::EmptyQuery => Reply::text(
                "궁금한 내용을 키워드로 입력해주세요!\n\n💡 예시:\n• \"미납\" → 미납 정책 안내\n• \"해약금\" → 해약금 안내\n• \"A720WA\" → 구독료 조회",
                vec![ReplyOption::home()],
            ),
            Outcome::NotFound => Reply::text(
                "죄송합니다 😅 답변을 찾지 못했어요.\n\n💡 다른 키워드로 질문해보세요!\n• 예: \"미납\", \"롯데카드 혜택\", \"해약금\"\n• 모델명: \"A720WA\", \"OLED55B4KW\"",
                vec![ReplyOption::home()],
            ),
            Outcome::NoMatch => Reply::text(
                "선택하신 조합의 가격 정보가 없어요 😅\n이전 단계로 돌아가 다른 유형을 선택해주세요.",
                vec![ReplyOption::home()],
            ),
        }
    }
}

/// Follow-up suggestions only appear above this score.
const FOLLOW_UP_MIN_SCORE: i64 = 5;
/// At most this many follow-up suggestions under a FAQ answer.
const MAX_FOLLOW_UPS: usize = 2;
/// Question text longer than this is truncated in follow-up labels.
const FOLLOW_UP_LABEL_CHARS: usize = 12;

fn render_faq(results: &[RankedFaq]) -> Reply {
    // the engine never produces an empty hit list, but the outcome can be
    // constructed by hand
    let Some(best) = results.first() else {
        return Reply::fallback();
    };
    let mut options: Vec<ReplyOption> = results[1..]
        .iter()
        .filter(|hit| hit.score > FOLLOW_UP_MIN_SCORE)
        .take(MAX_FOLLOW_UPS)
        .map(|hit| {
            let question = &hit.entry.question;
            let label = if question.chars().count() > FOLLOW_UP_LABEL_CHARS {
                let short: String = question.chars().take(FOLLOW_UP_LABEL_CHARS).collect();
                format!("🔍 {short}..")
            } else {
                format!("🔍 {question}")
            };
            ReplyOption::new(label, question.clone())
        })
        .collect();
    options.push(ReplyOption::home());

    match &best.entry.url {
        Some(url) => {
            let label = best
                .entry
                .url_button
                .clone()
                .unwrap_or_else(|| "상세보기".to_string());
            Reply::card(best.entry.answer.clone(), label, url.clone(), options)
        }
        None => Reply::text(best.entry.answer.clone(), options),
    }
}

fn render_prompt(prompt: &FacetPrompt) -> Reply {
    let mut header = format!("📦 {} | {}", prompt.product, prompt.model_full);
    if !prompt.chosen.is_empty() {
        header.push_str(&format!("\n🔧 케어십: {}", prompt.chosen.join(" > ")));
    }
    let text = format!("{header}\n\n{}", prompt.level.prompt_line());
    let options = prompt
        .options
        .iter()
        .map(|o| ReplyOption::new(o.label.clone(), o.payload.clone()))
        .collect();
    Reply::menu(text, options)
}

/// Render one resolved price record as the chat price block.
///
/// Absent fields are omitted entirely, so a record with only a 3-year
/// price renders a single line.
pub fn format_price(entry: &PriceEntry) -> String {
    let mut lines = vec![format!("📦 {} | {}", entry.product, entry.model_full)];

    let facets: Vec<&str> = [&entry.care_type, &entry.care_detail, &entry.visit_cycle]
        .into_iter()
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .collect();
    if !facets.is_empty() {
        lines.push(format!("🔧 {}", facets.join(" > ")));
    }
    if let Some(fee) = entry.activation {
        lines.push(format!("🎫 가입비: {}원", format_won(fee)));
    }

    let terms = [
        ("3년", entry.price_3y),
        ("4년", entry.price_4y),
        ("5년", entry.price_5y),
        ("6년", entry.price_6y),
    ];
    if terms.iter().any(|(_, p)| p.is_some()) {
        lines.push("💰 월 구독료".to_string());
        for (label, price) in terms {
            if let Some(price) = price {
                lines.push(format!(" • {label}: {}원", format_won(price)));
            }
        }
    }

    let prepays = [
        ("30%", entry.prepay30_lump, entry.prepay30_monthly),
        ("50%", entry.prepay50_lump, entry.prepay50_monthly),
    ];
    if prepays.iter().any(|(_, l, m)| l.is_some() || m.is_some()) {
        lines.push("💳 선납 할인".to_string());
        for (label, lump, monthly) in prepays {
            match (lump, monthly) {
                (Some(lump), Some(monthly)) => lines.push(format!(
                    " • {label} 선납: {}원 / 월 {}원",
                    format_won(lump),
                    format_won(monthly)
                )),
                (Some(lump), None) => {
                    lines.push(format!(" • {label} 선납: {}원", format_won(lump)));
                }
                (None, Some(monthly)) => {
                    lines.push(format!(" • {label} 선납 시 월 {}원", format_won(monthly)));
                }
                (None, None) => {}
            }
        }
    }

    lines.join("\n")
}

/// Thousands-separated won amount.
fn format_won(amount: u32) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
