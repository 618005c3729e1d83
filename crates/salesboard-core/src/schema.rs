//! Schema prober: classifies the properties of a sample record by kind.
//!
//! The whole collection is assumed to share the sample's shape, so only one
//! record is ever inspected.

use crate::types::{PropertyKind, RawRecord};
use std::collections::BTreeMap;

/// Property name → declared kind, as observed on a sample record.
pub type Schema = BTreeMap<String, PropertyKind>;

/// Read the kind tag of every property on `sample`.
pub fn probe(sample: &RawRecord) -> Schema {
    sample
        .properties
        .iter()
        .map(|(name, prop)| (name.clone(), prop.kind()))
        .collect()
}

/// Probe the first record of a fetched collection. An empty collection gives
/// an empty schema, which callers treat as "nothing to map".
pub fn probe_records(records: &[RawRecord]) -> Schema {
    let schema = records.first().map(probe).unwrap_or_default();
    tracing::debug!(properties = schema.len(), "schema probed");
    schema
}

/// Names of the probed properties of a given kind, in name order.
pub fn properties_of_kind(schema: &Schema, kind: PropertyKind) -> Vec<&str> {
    schema
        .iter()
        .filter(|(_, k)| **k == kind)
        .map(|(name, _)| name.as_str())
        .collect()
}
