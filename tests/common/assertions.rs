//! Domain-specific assertion macros for salesboard harnesses.
//!
//! These wrap `pretty_assertions` and add failure messages that name the
//! canonical field or progress step that went wrong.

use salesboard_core::normalize::{STAGE_LABELS, UNDETERMINED, VISIT_BUCKETS};
use salesboard_core::{CanonicalRecord, ProgressEvent};

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a canonical field of a record displays as the expected text.
///
/// ```rust
/// assert_field!(record, CanonicalField::SalesStage, "A");
/// ```
#[macro_export]
macro_rules! assert_field {
    ($record:expr, $field:expr, $expected:expr) => {{
        let record: &salesboard_core::CanonicalRecord = &$record;
        let field: salesboard_core::CanonicalField = $field;
        let expected: &str = $expected;
        let actual = record.text(field);
        if actual != expected {
            panic!(
                "assert_field! failed on record {:?}:\n  field:    {}\n  expected: {:?}\n  actual:   {:?}",
                record.id, field, expected, actual
            );
        }
    }};
}

/// Assert that a categorical field fell back to the undetermined sentinel.
#[macro_export]
macro_rules! assert_undetermined {
    ($record:expr, $field:expr) => {{
        $crate::assert_field!($record, $field, salesboard_core::normalize::UNDETERMINED);
    }};
}

// ---------------------------------------------------------------------------
// Progress assertions
// ---------------------------------------------------------------------------

/// Assert that a progress sequence never decreases, starts at 0 and ends at 100.
///
/// ```rust
/// assert_progress_complete!(events);
/// ```
#[macro_export]
macro_rules! assert_progress_complete {
    ($events:expr) => {{
        let events: &[salesboard_core::ProgressEvent] = &$events;
        let percents: Vec<u8> = events.iter().map(|e| e.percent).collect();
        assert!(!percents.is_empty(), "assert_progress_complete! failed: no events");
        assert_eq!(
            percents.first(),
            Some(&0),
            "assert_progress_complete! failed: first event must be 0%: {:?}",
            percents
        );
        assert_eq!(
            percents.last(),
            Some(&100),
            "assert_progress_complete! failed: last event must be 100%: {:?}",
            percents
        );
        if let Some(pair) = percents.windows(2).find(|w| w[1] < w[0]) {
            panic!(
                "assert_progress_complete! failed: progress went from {} to {}: {:?}",
                pair[0], pair[1], percents
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Record invariants
// ---------------------------------------------------------------------------

/// Check the invariants every canonical record must hold regardless of
/// input: categorical fields never empty, graded and bucketed fields drawn
/// from their closed label sets.
pub fn assert_canonical_invariants(record: &CanonicalRecord) {
    for (name, value) in [
        ("customer", &record.customer),
        ("product", &record.product),
        ("status", &record.status),
        ("reaction", &record.reaction),
    ] {
        assert!(
            !value.is_empty(),
            "record {:?}: {name} must never be empty",
            record.id
        );
    }

    assert!(
        STAGE_LABELS.contains(&record.sales_stage.as_str()) || record.sales_stage == UNDETERMINED,
        "record {:?}: sales_stage {:?} is not a known grade",
        record.id,
        record.sales_stage
    );
    assert!(
        VISIT_BUCKETS.iter().any(|b| b.label == record.visit_count),
        "record {:?}: visit_count {:?} is not a known bucket",
        record.id,
        record.visit_count
    );
    assert!(record.amount.is_finite(), "record {:?}: amount must be finite", record.id);
}

/// Percent values of a recorded progress sequence.
pub fn percents(events: &[ProgressEvent]) -> Vec<u8> {
    events.iter().map(|e| e.percent).collect()
}
