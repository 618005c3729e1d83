//! Value normalizer: turns extracted raw values into stable display labels.
//!
//! Every canonical field belongs to one [`Normalization`] class. Cleanup is a
//! projection: normalizing an already-normalized label returns it unchanged.
//! Categorical output is always a member of the field's label set or the
//! [`UNDETERMINED`] sentinel.

use crate::types::{CanonicalField, RawValue};
use regex::Regex;
use std::sync::OnceLock;

/// Placeholder label for categorical values that did not resolve.
pub const UNDETERMINED: &str = "미정";

/// Default display name for records without one.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Sales stages, best first.
pub const STAGE_LABELS: &[&str] = &["S", "A", "B", "C", "D"];

/// A fixed visit-count range and its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitBucket {
    pub min: u64,
    /// Inclusive upper bound; `None` for the open-ended top bucket.
    pub max: Option<u64>,
    pub label: &'static str,
}

/// Visit-count buckets in display order.
pub const VISIT_BUCKETS: &[VisitBucket] = &[
    VisitBucket { min: 0, max: Some(0), label: "0회" },
    VisitBucket { min: 1, max: Some(1), label: "1회" },
    VisitBucket { min: 2, max: Some(2), label: "2회" },
    VisitBucket { min: 3, max: Some(3), label: "3회" },
    VisitBucket { min: 4, max: Some(4), label: "4회" },
    VisitBucket { min: 5, max: Some(5), label: "5회" },
    VisitBucket { min: 6, max: Some(10), label: "6-10회" },
    VisitBucket { min: 11, max: None, label: "11회+" },
];

/// How a canonical field's raw value is cleaned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Free text; blank or "unknown" becomes `default`.
    Text { default: &'static str },
    /// Open label set; blank or "unknown" becomes [`UNDETERMINED`].
    Categorical,
    /// Closed, ordered label set matched case-insensitively.
    Graded(&'static [&'static str]),
    /// Count embedded in free text, bucketed via [`VISIT_BUCKETS`].
    Bucketed,
    /// Numeric amount.
    Amount,
    /// ISO date string; blank becomes empty.
    Date,
}

pub fn normalization(field: CanonicalField) -> Normalization {
    match field {
        CanonicalField::Customer => Normalization::Text { default: UNKNOWN_NAME },
        CanonicalField::Notes | CanonicalField::Phone | CanonicalField::Email => {
            Normalization::Text { default: "" }
        }
        CanonicalField::Product | CanonicalField::Status | CanonicalField::Reaction => {
            Normalization::Categorical
        }
        CanonicalField::SalesStage => Normalization::Graded(STAGE_LABELS),
        CanonicalField::VisitCount => Normalization::Bucketed,
        CanonicalField::Amount => Normalization::Amount,
        CanonicalField::LastVisitDate | CanonicalField::Date => Normalization::Date,
    }
}

/// A normalized field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Amount(f64),
}

impl FieldValue {
    pub fn into_text(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Amount(n) => RawValue::Number(n).to_text(),
        }
    }

    pub fn as_amount(&self) -> f64 {
        match self {
            FieldValue::Amount(n) => *n,
            FieldValue::Text(s) => parse_amount(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Normalize an extracted value (or its absence) for `field`.
pub fn normalize(field: CanonicalField, raw: Option<&RawValue>) -> FieldValue {
    match (normalization(field), raw) {
        (Normalization::Amount, None) => FieldValue::Amount(0.0),
        (Normalization::Amount, Some(RawValue::Number(n))) => {
            FieldValue::Amount(if n.is_finite() { *n } else { 0.0 })
        }
        (Normalization::Amount, Some(RawValue::Text(s))) => FieldValue::Amount(parse_amount(s)),
        (_, None) => FieldValue::Text(default_label(field).to_string()),
        (_, Some(value)) => FieldValue::Text(normalize_text(field, &value.to_text())),
    }
}

/// Normalize a text value for `field`.
pub fn normalize_text(field: CanonicalField, raw: &str) -> String {
    let trimmed = raw.trim();
    match normalization(field) {
        Normalization::Text { default } => {
            if is_blank_or_unknown(trimmed) {
                default.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Normalization::Categorical => {
            if is_blank_or_unknown(trimmed) {
                UNDETERMINED.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Normalization::Graded(labels) => {
            let folded = trimmed.to_uppercase();
            labels
                .iter()
                .find(|label| **label == folded)
                .copied()
                .unwrap_or(UNDETERMINED)
                .to_string()
        }
        Normalization::Bucketed => visit_bucket(leading_count(trimmed)).label.to_string(),
        Normalization::Amount => RawValue::Number(parse_amount(trimmed)).to_text(),
        Normalization::Date => {
            if is_blank_or_unknown(trimmed) {
                String::new()
            } else {
                trimmed.to_string()
            }
        }
    }
}

/// Sort key for a display value of `field`; lower sorts first.
///
/// Graded and bucketed fields rank by their table position with the sentinel
/// last. Open categorical fields rank every label 0 and the sentinel 1. Other
/// fields are unranked.
pub fn rank(field: CanonicalField, display: &str) -> usize {
    match normalization(field) {
        Normalization::Graded(labels) => {
            let label = normalize_text(field, display);
            labels
                .iter()
                .position(|l| *l == label)
                .unwrap_or(labels.len())
        }
        Normalization::Bucketed => {
            let label = normalize_text(field, display);
            VISIT_BUCKETS
                .iter()
                .position(|bucket| bucket.label == label)
                .unwrap_or(VISIT_BUCKETS.len())
        }
        Normalization::Categorical => usize::from(normalize_text(field, display) == UNDETERMINED),
        Normalization::Text { .. } | Normalization::Amount | Normalization::Date => 0,
    }
}

/// Label used when nothing resolves for `field`.
pub fn default_label(field: CanonicalField) -> &'static str {
    match normalization(field) {
        Normalization::Text { default } => default,
        Normalization::Categorical | Normalization::Graded(_) => UNDETERMINED,
        Normalization::Bucketed => VISIT_BUCKETS[0].label,
        Normalization::Amount => "0",
        Normalization::Date => "",
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn is_blank_or_unknown(trimmed: &str) -> bool {
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown")
}

fn digits_re() -> &'static Regex {
    static DIGITS_RE: OnceLock<Regex> = OnceLock::new();
    DIGITS_RE.get_or_init(|| Regex::new(r"[0-9]+").expect("valid digit run regex"))
}

/// First run of ASCII digits in `text` as an integer; 0 when there is none.
/// Runs too long for a `u64` saturate.
pub fn leading_count(text: &str) -> u64 {
    digits_re()
        .find(text)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// The bucket containing `count`.
pub fn visit_bucket(count: u64) -> &'static VisitBucket {
    VISIT_BUCKETS
        .iter()
        .find(|bucket| count >= bucket.min && bucket.max.map_or(true, |max| count <= max))
        .unwrap_or(&VISIT_BUCKETS[VISIT_BUCKETS.len() - 1])
}

fn amount_re() -> &'static Regex {
    static AMOUNT_RE: OnceLock<Regex> = OnceLock::new();
    AMOUNT_RE.get_or_init(|| {
        Regex::new(r"-?[0-9][0-9,]*(\.[0-9]+)?").expect("valid amount token regex")
    })
}

/// Parse a money amount written as text (`"₩12,000"`, `"3,500원"`,
/// `"1,200 Euro"`): the first numeric token with its thousands separators
/// removed. Text without one is 0.
pub fn parse_amount(text: &str) -> f64 {
    let Some(token) = amount_re().find(text) else {
        return 0.0;
    };
    match token.as_str().replace(',', "").parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
