//! Immutable catalog record structs.
//!
//! Field names on the wire follow the JSON produced by the offline
//! spreadsheet conversion job (`faq.json` / `price-data.json`), so both
//! catalogs deserialize from the converter's output without adapters.

use serde::{Deserialize, Serialize};

/// One question–answer record from the FAQ catalog.
///
/// `keywords` is present only for catalogs curated with explicit per-entry
/// keyword lists; such entries are scored with the keyword-list strategy
/// instead of free-text field scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaqEntry {
    #[serde(default)]
    pub id: u32,
    /// Coarse category label. Carried from the source data; not scored.
    #[serde(default)]
    pub category1: String,
    /// Mid category label, scanned by category-tier scoring.
    #[serde(default)]
    pub category2: String,
    /// Fine category label, scanned by category-tier scoring.
    #[serde(default)]
    pub category3: String,
    pub question: String,
    pub answer: String,
    /// Reference link; blank in the source data means absent.
    #[serde(default)]
    pub url: Option<String>,
    /// Label for the reference link button.
    #[serde(default)]
    pub url_button: Option<String>,
    /// Explicit keyword list (keyword-list scoring strategy only).
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

/// One priced subscription record from the price catalog.
///
/// The three facet values (`care_type`, `care_detail`, `visit_cycle`) are
/// the ordered disambiguation dimensions G → H → I. Numeric fields are
/// absent when not applicable; when present they are non-negative won
/// amounts already coerced by the ingestion boundary (blank/zero ⇒ absent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceEntry {
    pub model_full: String,
    /// Product family name (e.g. a washer or air purifier line).
    #[serde(default)]
    pub product: String,
    /// Facet G: care service type.
    #[serde(default)]
    pub care_type: String,
    /// Facet H: care service detail.
    #[serde(default)]
    pub care_detail: String,
    /// Facet I: visit cycle.
    #[serde(default)]
    pub visit_cycle: String,
    /// Combined facet key, used only for ingestion-time de-duplication.
    #[serde(default)]
    pub care_combined: String,
    /// One-time activation fee.
    #[serde(default)]
    pub activation: Option<u32>,
    /// Monthly price for a 3-year term.
    #[serde(rename = "price3y", default)]
    pub price_3y: Option<u32>,
    #[serde(rename = "price4y", default)]
    pub price_4y: Option<u32>,
    #[serde(rename = "price5y", default)]
    pub price_5y: Option<u32>,
    #[serde(rename = "price6y", default)]
    pub price_6y: Option<u32>,
    /// 30% prepayment: lump sum paid up front.
    #[serde(rename = "prepay30_lump", default)]
    pub prepay30_lump: Option<u32>,
    /// 30% prepayment: reduced monthly price.
    #[serde(rename = "prepay30_monthly", default)]
    pub prepay30_monthly: Option<u32>,
    #[serde(rename = "prepay50_lump", default)]
    pub prepay50_lump: Option<u32>,
    #[serde(rename = "prepay50_monthly", default)]
    pub prepay50_monthly: Option<u32>,
}

impl PriceEntry {
    /// Ingestion de-duplication key: `(modelFull, combinedFacetKey)`.
    pub fn dedup_key(&self) -> (String, String) {
        (self.model_full.clone(), self.care_combined.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn faq_entry_deserializes_converter_field_names() {
        let entry: FaqEntry = serde_json::from_value(json!({
            "id": 3,
            "category1": "구독",
            "category2": "계약",
            "category3": "미납",
            "question": "미납 정책이 궁금해요",
            "answer": "미납 시 안내입니다",
            "url": "https://example.com/policy",
            "urlButton": "상세보기"
        }))
        .unwrap();
        assert_eq!(entry.id, 3);
        assert_eq!(entry.category2, "계약");
        assert_eq!(entry.url_button.as_deref(), Some("상세보기"));
        assert!(entry.keywords.is_none());
    }

    #[test]
    fn faq_entry_minimal_fields() {
        let entry: FaqEntry = serde_json::from_value(json!({
            "question": "q",
            "answer": "a"
        }))
        .unwrap();
        assert_eq!(entry.id, 0);
        assert!(entry.url.is_none());
        assert_eq!(entry.category1, "");
    }

    #[test]
    fn faq_entry_serde_roundtrip() {
        let entry = FaqEntry {
            id: 9,
            category1: "구독".into(),
            category2: "판촉".into(),
            category3: "롯데".into(),
            question: "롯데카드 혜택".into(),
            answer: "청구할인 안내".into(),
            url: None,
            url_button: None,
            keywords: Some(vec!["롯데".into(), "카드".into()]),
        };
        let json = serde_json::to_string(&entry).unwrap();
        let back: FaqEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn price_entry_deserializes_converter_field_names() {
        let entry: PriceEntry = serde_json::from_value(json!({
            "modelFull": "A720WA.AKOR",
            "product": "공기청정기",
            "careType": "방문형",
            "careDetail": "스페셜",
            "visitCycle": "6개월",
            "careCombined": "방문형|스페셜|6개월",
            "activation": 10000,
            "price3y": 45900,
            "price4y": 41900,
            "prepay30_lump": 495720,
            "prepay30_monthly": 32130
        }))
        .unwrap();
        assert_eq!(entry.model_full, "A720WA.AKOR");
        assert_eq!(entry.care_type, "방문형");
        assert_eq!(entry.price_3y, Some(45900));
        assert_eq!(entry.prepay30_lump, Some(495720));
        assert!(entry.price_5y.is_none());
    }

    #[test]
    fn price_entry_null_numerics_are_absent() {
        let entry: PriceEntry = serde_json::from_value(json!({
            "modelFull": "X100",
            "price3y": null
        }))
        .unwrap();
        assert!(entry.price_3y.is_none());
        assert!(entry.activation.is_none());
        assert_eq!(entry.care_type, "");
    }

    #[test]
    fn dedup_key_pairs_model_and_combined_facet() {
        let entry: PriceEntry = serde_json::from_value(json!({
            "modelFull": "X100",
            "careCombined": "방문형|표준"
        }))
        .unwrap();
        assert_eq!(
            entry.dedup_key(),
            ("X100".to_string(), "방문형|표준".to_string())
        );
    }
}
