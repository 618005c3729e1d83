//! Test builders: ergonomic constructors for `RawRecord`, `Page`, and
//! `CanonicalRecord`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use fake::faker::company::en::CompanyName;
use fake::Fake;
use salesboard_core::normalize::UNDETERMINED;
use salesboard_core::types::{DateRange, SelectOption, TextFragment};
use salesboard_core::{CanonicalRecord, Page, RawRecord, TypedProperty};
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// RecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] fixtures.
///
/// # Example
///
/// ```rust
/// let record = RecordBuilder::new("page-1")
///     .title("Name", "서울내과")
///     .select("세일즈단계", "a")
///     .number("Amount", 120000.0)
///     .build();
/// ```
pub struct RecordBuilder {
    id: String,
    properties: HashMap<String, TypedProperty>,
}

impl RecordBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            properties: HashMap::new(),
        }
    }

    pub fn property(mut self, name: &str, prop: TypedProperty) -> Self {
        self.properties.insert(name.to_string(), prop);
        self
    }

    pub fn title(self, name: &str, text: &str) -> Self {
        self.property(
            name,
            TypedProperty::Title {
                title: Some(vec![TextFragment { plain_text: text.to_string() }]),
            },
        )
    }

    pub fn rich_text(self, name: &str, text: &str) -> Self {
        self.property(
            name,
            TypedProperty::RichText {
                rich_text: Some(vec![TextFragment { plain_text: text.to_string() }]),
            },
        )
    }

    pub fn select(self, name: &str, option: &str) -> Self {
        self.property(
            name,
            TypedProperty::Select {
                select: Some(SelectOption { name: Some(option.to_string()) }),
            },
        )
    }

    /// A `select` property that exists but has no option chosen.
    pub fn null_select(self, name: &str) -> Self {
        self.property(name, TypedProperty::Select { select: None })
    }

    pub fn status(self, name: &str, option: &str) -> Self {
        self.property(
            name,
            TypedProperty::Status {
                status: Some(SelectOption { name: Some(option.to_string()) }),
            },
        )
    }

    pub fn number(self, name: &str, value: f64) -> Self {
        self.property(name, TypedProperty::Number { number: Some(value) })
    }

    pub fn date(self, name: &str, start: &str) -> Self {
        self.property(
            name,
            TypedProperty::Date {
                date: Some(DateRange { start: Some(start.to_string()), end: None }),
            },
        )
    }

    pub fn email(self, name: &str, value: &str) -> Self {
        self.property(name, TypedProperty::Email { email: Some(value.to_string()) })
    }

    pub fn phone(self, name: &str, value: &str) -> Self {
        self.property(name, TypedProperty::PhoneNumber { phone_number: Some(value.to_string()) })
    }

    pub fn build(self) -> RawRecord {
        RawRecord {
            id: self.id,
            properties: self.properties,
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// `n` records with ids `{prefix}-{i}` and a generated company name.
pub fn sales_records(prefix: &str, n: usize) -> Vec<RawRecord> {
    (0..n)
        .map(|i| {
            let name: String = CompanyName().fake();
            RecordBuilder::new(format!("{prefix}-{i}"))
                .title("Name", &name)
                .select("상태", if i % 2 == 0 { "진행중" } else { "완료" })
                .number("Amount", (i * 1000) as f64)
                .build()
        })
        .collect()
}

/// A page of `n` records; `next` is the continuation cursor, if any.
pub fn page_of(prefix: &str, n: usize, next: Option<&str>) -> Page {
    Page {
        records: sales_records(prefix, n),
        has_more: next.is_some(),
        next_cursor: next.map(str::to_string),
    }
}

/// Split `sizes` into a cursor-linked page chain (`c1`, `c2`, …).
pub fn page_chain(sizes: &[usize]) -> Vec<Page> {
    sizes
        .iter()
        .enumerate()
        .map(|(i, n)| {
            let next = (i + 1 < sizes.len()).then(|| format!("c{}", i + 1));
            page_of(&format!("p{i}"), *n, next.as_deref())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Canonical records
// ---------------------------------------------------------------------------

/// A canonical record with every field at its default except the ones given.
pub fn canonical(id: &str, customer: &str, status: &str, amount: f64, date: &str) -> CanonicalRecord {
    CanonicalRecord {
        id: id.to_string(),
        customer: customer.to_string(),
        product: UNDETERMINED.to_string(),
        status: status.to_string(),
        visit_count: "0회".to_string(),
        last_visit_date: String::new(),
        reaction: UNDETERMINED.to_string(),
        sales_stage: UNDETERMINED.to_string(),
        amount,
        date: date.to_string(),
        notes: String::new(),
        phone: String::new(),
        email: String::new(),
    }
}
