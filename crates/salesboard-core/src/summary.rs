//! Summary: read-only aggregates over canonical records.
//!
//! [`Summary::from_records`] is an order-independent fold: shuffling the
//! input yields the same summary. Amounts are added in ascending order so
//! float totals do not depend on record order either.

use crate::normalize::{rank, STAGE_LABELS, UNDETERMINED, VISIT_BUCKETS};
use crate::types::{CanonicalField, CanonicalRecord};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregated view of a run's output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub record_count: usize,
    pub total_amount: f64,
    pub average_amount: f64,
    /// Records per status label, label order.
    pub by_status: BTreeMap<String, usize>,
    /// Records per sales stage, stage rank order, zero counts included.
    pub by_stage: Vec<(String, usize)>,
    /// Records per visit bucket, bucket order, zero counts included.
    pub by_visit_count: Vec<(String, usize)>,
    /// Amount and record count per `YYYY-MM` of the record date.
    pub monthly: BTreeMap<String, MonthTotal>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthTotal {
    pub amount: f64,
    pub count: usize,
}

impl Summary {
    pub fn from_records(records: &[CanonicalRecord]) -> Self {
        let record_count = records.len();
        let total_amount = ordered_sum(records.iter().map(|r| r.amount).collect());
        let average_amount = if record_count > 0 {
            total_amount / record_count as f64
        } else {
            0.0
        };

        let mut by_status = BTreeMap::new();
        for record in records {
            *by_status.entry(record.status.clone()).or_insert(0) += 1;
        }

        let stage_labels = STAGE_LABELS.iter().copied().chain([UNDETERMINED]);
        let by_stage = ranked_counts(records, CanonicalField::SalesStage, stage_labels);
        let by_visit_count = ranked_counts(
            records,
            CanonicalField::VisitCount,
            VISIT_BUCKETS.iter().map(|b| b.label),
        );

        let mut month_amounts: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for record in records {
            if let Some(month) = month_key(&record.date) {
                month_amounts.entry(month).or_default().push(record.amount);
            }
        }
        let monthly = month_amounts
            .into_iter()
            .map(|(month, amounts)| {
                let count = amounts.len();
                (month, MonthTotal { amount: ordered_sum(amounts), count })
            })
            .collect();

        Self {
            record_count,
            total_amount,
            average_amount,
            by_status,
            by_stage,
            by_visit_count,
            monthly,
        }
    }
}

/// Sum after sorting, so the result depends only on the multiset of values.
fn ordered_sum(mut amounts: Vec<f64>) -> f64 {
    amounts.sort_by(f64::total_cmp);
    amounts.into_iter().sum()
}

/// Count records per label of a ranked field, in rank order.
fn ranked_counts<'a>(
    records: &[CanonicalRecord],
    field: CanonicalField,
    labels: impl Iterator<Item = &'a str>,
) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = labels.map(|l| (l.to_string(), 0)).collect();
    for record in records {
        let slot = rank(field, &record.text(field));
        if let Some((_, count)) = counts.get_mut(slot) {
            *count += 1;
        }
    }
    counts
}

/// The `n` records with the largest amounts, largest first. Ties keep input
/// order.
pub fn top_by_amount(records: &[CanonicalRecord], n: usize) -> Vec<&CanonicalRecord> {
    let mut sorted: Vec<&CanonicalRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    sorted.truncate(n);
    sorted
}

/// `YYYY-MM` for an ISO date or datetime string.
pub fn month_key(date: &str) -> Option<String> {
    let date = date.trim();
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(date).ok().map(|dt| dt.date_naive()))?;
    Some(day.format("%Y-%m").to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
