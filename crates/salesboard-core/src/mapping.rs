//! Mapping resolver: candidate chains per canonical field.
//!
//! [`FieldMapping::builtin`] carries the fallback chains for every property
//! naming convention seen across the sales database's revisions. A user
//! [`MappingOverrides`] table can pin a field to one explicit property; the
//! resolver turns the pair into the chains the extractor walks.

use crate::error::MappingError;
use crate::schema::{properties_of_kind, Schema};
use crate::types::{CanonicalField, PropertyKind};
use std::collections::BTreeMap;

/// One `(property name, expected kind)` pair tried while resolving a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub property: String,
    pub kind: PropertyKind,
}

impl Candidate {
    pub fn new(property: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            property: property.into(),
            kind,
        }
    }
}

// ---------------------------------------------------------------------------
// Built-in chains
// ---------------------------------------------------------------------------

type Chain = &'static [(&'static str, PropertyKind)];

const CUSTOMER: Chain = &[
    ("Name", PropertyKind::Title),
    ("Name", PropertyKind::RichText),
    ("Title", PropertyKind::Title),
    ("Title", PropertyKind::RichText),
    ("고객명", PropertyKind::Title),
    ("의원명", PropertyKind::Title),
    ("Customer", PropertyKind::RichText),
];

const PRODUCT: Chain = &[
    ("Product", PropertyKind::Select),
    ("Product", PropertyKind::RichText),
    ("제품", PropertyKind::Select),
    ("진료과목", PropertyKind::Select),
];

const STATUS: Chain = &[
    ("상태", PropertyKind::Select),
    ("상태", PropertyKind::Status),
    ("Status", PropertyKind::Select),
    ("Status", PropertyKind::Status),
];

const VISIT_COUNT: Chain = &[
    ("방문차수", PropertyKind::Select),
    ("방문차수", PropertyKind::RichText),
    ("방문차수", PropertyKind::Number),
    ("Visit Count", PropertyKind::Select),
    ("Visit Count", PropertyKind::RichText),
    ("Visit Count", PropertyKind::Number),
];

const LAST_VISIT_DATE: Chain = &[
    ("최종방문일자", PropertyKind::Date),
    ("Last Visit Date", PropertyKind::Date),
];

const REACTION: Chain = &[
    ("반응", PropertyKind::Select),
    ("Reaction", PropertyKind::Select),
];

const SALES_STAGE: Chain = &[
    ("세일즈단계", PropertyKind::Select),
    ("세일즈단계", PropertyKind::Status),
    ("Sales Stage", PropertyKind::Select),
    ("Sales Stage", PropertyKind::Status),
];

const AMOUNT: Chain = &[
    ("Amount", PropertyKind::Number),
    ("Price", PropertyKind::Number),
    ("금액", PropertyKind::Number),
];

const DATE: Chain = &[
    ("Date", PropertyKind::Date),
    ("Created", PropertyKind::Date),
    ("날짜", PropertyKind::Date),
];

const NOTES: Chain = &[
    ("메모", PropertyKind::RichText),
    ("Notes", PropertyKind::RichText),
];

const PHONE: Chain = &[
    ("연락처", PropertyKind::PhoneNumber),
    ("Phone", PropertyKind::PhoneNumber),
];

const EMAIL: Chain = &[
    ("이메일", PropertyKind::Email),
    ("Email", PropertyKind::Email),
];

fn builtin_chain(field: CanonicalField) -> Chain {
    match field {
        CanonicalField::Customer => CUSTOMER,
        CanonicalField::Product => PRODUCT,
        CanonicalField::Status => STATUS,
        CanonicalField::VisitCount => VISIT_COUNT,
        CanonicalField::LastVisitDate => LAST_VISIT_DATE,
        CanonicalField::Reaction => REACTION,
        CanonicalField::SalesStage => SALES_STAGE,
        CanonicalField::Amount => AMOUNT,
        CanonicalField::Date => DATE,
        CanonicalField::Notes => NOTES,
        CanonicalField::Phone => PHONE,
        CanonicalField::Email => EMAIL,
    }
}

// ---------------------------------------------------------------------------
// FieldMapping
// ---------------------------------------------------------------------------

/// Ordered candidate list per canonical field. List order is precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    chains: BTreeMap<CanonicalField, Vec<Candidate>>,
}

impl FieldMapping {
    /// The built-in fallback chains.
    pub fn builtin() -> Self {
        let chains = CanonicalField::ALL
            .into_iter()
            .map(|field| {
                let chain = builtin_chain(field)
                    .iter()
                    .map(|(name, kind)| Candidate::new(*name, *kind))
                    .collect();
                (field, chain)
            })
            .collect();
        Self { chains }
    }

    /// Candidates for `field`, highest precedence first.
    pub fn candidates(&self, field: CanonicalField) -> &[Candidate] {
        self.chains.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Replace the chain for `field`.
    pub fn set(&mut self, field: CanonicalField, chain: Vec<Candidate>) {
        self.chains.insert(field, chain);
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::builtin()
    }
}

// ---------------------------------------------------------------------------
// Overrides
// ---------------------------------------------------------------------------

/// User-chosen source property per canonical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingOverrides {
    properties: BTreeMap<CanonicalField, String>,
}

impl MappingOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: CanonicalField, property: impl Into<String>) {
        self.properties.insert(field, property.into());
    }

    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.properties.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Build overrides from a `field → property` table such as the config
    /// file's `[mapping]` section.
    pub fn from_table<'a, I>(table: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut overrides = Self::new();
        for (field, property) in table {
            let field: CanonicalField = field.parse()?;
            let property = property.trim();
            if property.is_empty() {
                return Err(MappingError::EmptyProperty(field.to_string()));
            }
            overrides.insert(field, property);
        }
        Ok(overrides)
    }

    /// Parse one `field=Property` assignment, as given on the command line.
    pub fn parse_assignment(&mut self, assignment: &str) -> Result<(), MappingError> {
        let (field, property) = assignment
            .split_once('=')
            .ok_or_else(|| MappingError::Malformed(assignment.to_string()))?;
        let field: CanonicalField = field.parse()?;
        let property = property.trim();
        if property.is_empty() {
            return Err(MappingError::EmptyProperty(field.to_string()));
        }
        self.insert(field, property);
        Ok(())
    }

    /// Layer `other` on top of `self`; entries in `other` win.
    pub fn merged_with(mut self, other: &MappingOverrides) -> Self {
        for (field, property) in &other.properties {
            self.properties.insert(*field, property.clone());
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Combine `base` with the user's overrides against a probed schema.
///
/// An override for a field whose property was probed with an accepted kind
/// replaces the whole chain with that single property. An override naming a
/// property the prober never saw leaves the field with an empty chain, so it
/// falls back to its default. An override naming a property of a kind the
/// field cannot read is ignored.
pub fn resolve(base: &FieldMapping, overrides: &MappingOverrides, schema: &Schema) -> FieldMapping {
    let mut resolved = base.clone();
    if overrides.is_empty() {
        return resolved;
    }
    for field in CanonicalField::ALL {
        let Some(property) = overrides.get(field) else {
            continue;
        };
        match schema.get(property) {
            Some(kind) if field.accepted_kinds().contains(kind) => {
                tracing::debug!(%field, property, %kind, "mapping override applied");
                resolved.set(field, vec![Candidate::new(property, *kind)]);
            }
            Some(kind) => {
                tracing::warn!(
                    %field,
                    property,
                    %kind,
                    "mapping override ignored: property kind not readable for this field"
                );
            }
            None => {
                let available: Vec<&str> = field
                    .accepted_kinds()
                    .iter()
                    .flat_map(|kind| properties_of_kind(schema, *kind))
                    .collect();
                tracing::warn!(
                    %field,
                    property,
                    ?available,
                    "mapping override names a property missing from the database"
                );
                resolved.set(field, Vec::new());
            }
        }
    }
    resolved
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
