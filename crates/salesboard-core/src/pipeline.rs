//! Pipeline: the single entry point from source to canonical records.
//!
//! ```text
//! Pager ──► RawRecord[] ──► probe ──► resolve mapping ──► extract ──► normalize ──► CanonicalRecord[]
//! ```
//!
//! Only the page fetch can fail. Once every page is in memory the remaining
//! steps are pure and per-record, so a dropped `run` future leaves nothing
//! half-written.

use crate::config::PagerConfig;
use crate::error::PipelineError;
use crate::extract::extract;
use crate::mapping::{resolve, FieldMapping, MappingOverrides};
use crate::normalize::normalize;
use crate::pager::{PageSource, Pager};
use crate::schema::probe_records;
use crate::types::{CanonicalField, CanonicalRecord, ProgressEvent, RawRecord};

/// Percent reported once fetching is done and extraction begins.
const EXTRACT_PERCENT: u8 = 95;

/// A page source wired to a pager and a base field mapping.
pub struct Pipeline<S> {
    source: S,
    pager: Pager,
    base_mapping: FieldMapping,
}

impl<S: PageSource> Pipeline<S> {
    pub fn new(source: S, pager_config: &PagerConfig) -> Self {
        Self {
            source,
            pager: Pager::new(pager_config),
            base_mapping: FieldMapping::builtin(),
        }
    }

    /// Replace the built-in candidate chains.
    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.base_mapping = mapping;
        self
    }

    /// Fetch every record and map it onto the canonical schema.
    ///
    /// Progress is non-decreasing and always ends at 100. A transport failure
    /// on any page fails the whole run with no partial output.
    pub async fn run<P>(
        &self,
        overrides: &MappingOverrides,
        mut on_progress: P,
    ) -> Result<Vec<CanonicalRecord>, PipelineError>
    where
        P: FnMut(ProgressEvent),
    {
        let records = self.pager.fetch_pages(&self.source, &mut on_progress).await?;

        on_progress(ProgressEvent::new(
            EXTRACT_PERCENT,
            format!("Normalizing {} records", records.len()),
        ));
        let canonical = canonicalize_all(&records, &self.base_mapping, overrides);

        tracing::info!(
            fetched = records.len(),
            produced = canonical.len(),
            "pipeline run complete"
        );
        on_progress(ProgressEvent::new(100, format!("Loaded {} records", canonical.len())));
        Ok(canonical)
    }
}

/// Probe, resolve and canonicalize a fetched collection.
///
/// An empty probe result (no records, or a first record without properties)
/// produces no output.
pub fn canonicalize_all(
    records: &[RawRecord],
    base: &FieldMapping,
    overrides: &MappingOverrides,
) -> Vec<CanonicalRecord> {
    let schema = probe_records(records);
    if schema.is_empty() {
        return Vec::new();
    }
    let mapping = resolve(base, overrides, &schema);
    records.iter().map(|record| canonicalize(record, &mapping)).collect()
}

/// Map one record onto the canonical schema, substituting defaults.
pub fn canonicalize(record: &RawRecord, mapping: &FieldMapping) -> CanonicalRecord {
    let text = |field: CanonicalField| normalize(field, extract(record, field, mapping).as_ref()).into_text();

    CanonicalRecord {
        id: record.id.clone(),
        customer: text(CanonicalField::Customer),
        product: text(CanonicalField::Product),
        status: text(CanonicalField::Status),
        visit_count: text(CanonicalField::VisitCount),
        last_visit_date: text(CanonicalField::LastVisitDate),
        reaction: text(CanonicalField::Reaction),
        sales_stage: text(CanonicalField::SalesStage),
        amount: normalize(
            CanonicalField::Amount,
            extract(record, CanonicalField::Amount, mapping).as_ref(),
        )
        .as_amount(),
        date: text(CanonicalField::Date),
        notes: text(CanonicalField::Notes),
        phone: text(CanonicalField::Phone),
        email: text(CanonicalField::Email),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
