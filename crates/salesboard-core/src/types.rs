//! Core types for salesboard-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! fetched [`RawRecord`] with its [`TypedProperty`] bag, the fixed
//! [`CanonicalField`] output schema and the [`CanonicalRecord`] it produces,
//! plus the page envelope and progress types the pager works with.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// Source-side records
// ---------------------------------------------------------------------------

/// A record as returned by the remote database, before any mapping.
///
/// Owned by the source and never mutated after it is fetched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RawRecord {
    pub id: String,
    #[serde(default)]
    pub properties: HashMap<String, TypedProperty>,
}

/// Declared value-kind of a source property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Title,
    RichText,
    Select,
    Status,
    Number,
    Date,
    PhoneNumber,
    Email,
    /// Any kind the pipeline does not read (`multi_select`, `formula`, …).
    Unsupported,
}

impl std::fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyKind::Title => write!(f, "title"),
            PropertyKind::RichText => write!(f, "rich_text"),
            PropertyKind::Select => write!(f, "select"),
            PropertyKind::Status => write!(f, "status"),
            PropertyKind::Number => write!(f, "number"),
            PropertyKind::Date => write!(f, "date"),
            PropertyKind::PhoneNumber => write!(f, "phone_number"),
            PropertyKind::Email => write!(f, "email"),
            PropertyKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// One entry of a title or rich-text list.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextFragment {
    #[serde(default)]
    pub plain_text: String,
}

/// Payload of `select` and `status` properties.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SelectOption {
    pub name: Option<String>,
}

/// Payload of `date` properties.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DateRange {
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

/// A property value tagged by its kind.
///
/// Mirrors the wire shape `{"type": "<kind>", "<kind>": <payload>}`; the
/// payload is only meaningful for the kind that carries it. A `None` payload
/// means the property exists but holds nothing.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TypedProperty {
    Title {
        title: Option<Vec<TextFragment>>,
    },
    RichText {
        rich_text: Option<Vec<TextFragment>>,
    },
    Select {
        select: Option<SelectOption>,
    },
    Status {
        status: Option<SelectOption>,
    },
    Number {
        number: Option<f64>,
    },
    Date {
        date: Option<DateRange>,
    },
    PhoneNumber {
        phone_number: Option<String>,
    },
    Email {
        email: Option<String>,
    },
    #[serde(other)]
    Unsupported,
}

impl TypedProperty {
    pub fn kind(&self) -> PropertyKind {
        match self {
            TypedProperty::Title { .. } => PropertyKind::Title,
            TypedProperty::RichText { .. } => PropertyKind::RichText,
            TypedProperty::Select { .. } => PropertyKind::Select,
            TypedProperty::Status { .. } => PropertyKind::Status,
            TypedProperty::Number { .. } => PropertyKind::Number,
            TypedProperty::Date { .. } => PropertyKind::Date,
            TypedProperty::PhoneNumber { .. } => PropertyKind::PhoneNumber,
            TypedProperty::Email { .. } => PropertyKind::Email,
            TypedProperty::Unsupported => PropertyKind::Unsupported,
        }
    }
}

/// A value pulled out of a [`TypedProperty`] by the extractor.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Text(String),
    Number(f64),
}

impl RawValue {
    /// Text view of the value; numbers render without a trailing `.0`.
    pub fn to_text(&self) -> String {
        match self {
            RawValue::Text(s) => s.clone(),
            RawValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            RawValue::Number(n) => n.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// A request for one page of the remote collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Continuation token from the previous page; `None` for the first page.
    pub cursor: Option<String>,
    pub page_size: usize,
}

/// One page of results as returned by the source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page {
    #[serde(rename = "results")]
    pub records: Vec<RawRecord>,
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Progress notification emitted while a run is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 0 to 100 inclusive, never decreasing within one run.
    pub percent: u8,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(percent: u8, message: impl Into<String>) -> Self {
        Self {
            percent: percent.min(100),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical output schema
// ---------------------------------------------------------------------------

/// A named slot in the fixed output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    Customer,
    Product,
    Status,
    VisitCount,
    LastVisitDate,
    Reaction,
    SalesStage,
    Amount,
    Date,
    Notes,
    Phone,
    Email,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 12] = [
        CanonicalField::Customer,
        CanonicalField::Product,
        CanonicalField::Status,
        CanonicalField::VisitCount,
        CanonicalField::LastVisitDate,
        CanonicalField::Reaction,
        CanonicalField::SalesStage,
        CanonicalField::Amount,
        CanonicalField::Date,
        CanonicalField::Notes,
        CanonicalField::Phone,
        CanonicalField::Email,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CanonicalField::Customer => "customer",
            CanonicalField::Product => "product",
            CanonicalField::Status => "status",
            CanonicalField::VisitCount => "visit_count",
            CanonicalField::LastVisitDate => "last_visit_date",
            CanonicalField::Reaction => "reaction",
            CanonicalField::SalesStage => "sales_stage",
            CanonicalField::Amount => "amount",
            CanonicalField::Date => "date",
            CanonicalField::Notes => "notes",
            CanonicalField::Phone => "phone",
            CanonicalField::Email => "email",
        }
    }

    /// Property kinds this field can be read from.
    pub fn accepted_kinds(self) -> &'static [PropertyKind] {
        use PropertyKind::*;
        match self {
            CanonicalField::Customer => &[Title, RichText],
            CanonicalField::Product => &[Select, RichText, Title],
            CanonicalField::Status | CanonicalField::Reaction => &[Select, Status],
            CanonicalField::SalesStage => &[Select, Status, RichText],
            CanonicalField::VisitCount => &[Select, RichText, Number],
            CanonicalField::LastVisitDate | CanonicalField::Date => &[Date],
            CanonicalField::Amount => &[Number, RichText],
            CanonicalField::Notes => &[RichText, Title],
            CanonicalField::Phone => &[PhoneNumber, RichText],
            CanonicalField::Email => &[Email, RichText],
        }
    }
}

impl std::fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CanonicalField {
    type Err = crate::error::MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        CanonicalField::ALL
            .into_iter()
            .find(|field| field.as_str() == key)
            .ok_or_else(|| crate::error::MappingError::UnknownField(s.to_string()))
    }
}

/// A fully populated output record.
///
/// Every field holds either a resolved, normalised value or that field's
/// explicit default; nothing is left unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    pub id: String,
    pub customer: String,
    pub product: String,
    pub status: String,
    pub visit_count: String,
    pub last_visit_date: String,
    pub reaction: String,
    pub sales_stage: String,
    pub amount: f64,
    pub date: String,
    pub notes: String,
    pub phone: String,
    pub email: String,
}

impl CanonicalRecord {
    /// Text value of a string-valued field; `amount` is rendered.
    pub fn text(&self, field: CanonicalField) -> String {
        match field {
            CanonicalField::Customer => self.customer.clone(),
            CanonicalField::Product => self.product.clone(),
            CanonicalField::Status => self.status.clone(),
            CanonicalField::VisitCount => self.visit_count.clone(),
            CanonicalField::LastVisitDate => self.last_visit_date.clone(),
            CanonicalField::Reaction => self.reaction.clone(),
            CanonicalField::SalesStage => self.sales_stage.clone(),
            CanonicalField::Amount => RawValue::Number(self.amount).to_text(),
            CanonicalField::Date => self.date.clone(),
            CanonicalField::Notes => self.notes.clone(),
            CanonicalField::Phone => self.phone.clone(),
            CanonicalField::Email => self.email.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
