//! Field extractor: walks a field's candidate chain over one record.
//!
//! A candidate only resolves when the named property exists, carries the
//! candidate's kind, and holds a non-empty payload for that kind. The first
//! candidate that resolves wins.

use crate::mapping::FieldMapping;
use crate::types::{CanonicalField, RawRecord, RawValue, TypedProperty};

/// Read the payload of one property according to its kind.
///
/// Returns `None` when the payload counts as empty for the kind. A `select`
/// or `status` property whose payload is null is *not* empty: it resolves to
/// an explicit empty string so later candidates are not consulted.
pub fn read_payload(prop: &TypedProperty) -> Option<RawValue> {
    match prop {
        TypedProperty::Title { title: fragments } | TypedProperty::RichText { rich_text: fragments } => {
            fragments
                .as_ref()?
                .first()
                .filter(|fragment| !fragment.plain_text.is_empty())
                .map(|fragment| RawValue::Text(fragment.plain_text.clone()))
        }
        TypedProperty::Select { select: option } | TypedProperty::Status { status: option } => {
            match option {
                None => Some(RawValue::Text(String::new())),
                Some(option) => option.name.clone().map(RawValue::Text),
            }
        }
        TypedProperty::Number { number } => number.map(RawValue::Number),
        TypedProperty::Date { date } => date
            .as_ref()?
            .start
            .as_ref()
            .filter(|start| !start.is_empty())
            .map(|start| RawValue::Text(start.clone())),
        TypedProperty::PhoneNumber { phone_number: value } | TypedProperty::Email { email: value } => {
            value
                .as_ref()
                .filter(|s| !s.is_empty())
                .map(|s| RawValue::Text(s.clone()))
        }
        TypedProperty::Unsupported => None,
    }
}

/// Resolve `field` on `record` using the chain in `mapping`.
///
/// `None` means no candidate resolved; the caller substitutes the field's
/// default.
pub fn extract(record: &RawRecord, field: CanonicalField, mapping: &FieldMapping) -> Option<RawValue> {
    for candidate in mapping.candidates(field) {
        let Some(prop) = record.properties.get(&candidate.property) else {
            continue;
        };
        if prop.kind() != candidate.kind {
            continue;
        }
        if let Some(value) = read_payload(prop) {
            tracing::trace!(
                record = %record.id,
                %field,
                property = %candidate.property,
                kind = %candidate.kind,
                "field resolved"
            );
            return Some(value);
        }
    }
    tracing::trace!(record = %record.id, %field, "field unresolved, using default");
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
