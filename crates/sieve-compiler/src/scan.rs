//! Field table validation and scanning.
//!
//! [`validate`] checks a filter type's static field table once, when a filter
//! instance is wrapped for compilation. [`scan`] then walks the table of a
//! populated instance in declaration order, pairing each row with the
//! instance's current value.

use std::collections::HashSet;

use crate::error::{FilterError, Result};
use crate::meta::{FieldMeta, FilterField};
use crate::traits::Filter;
use crate::value::FilterValue;

/// An annotated field together with its current value.
#[derive(Debug, Clone, Copy)]
pub struct ScannedField<'a> {
    /// The table row.
    pub field: &'static FilterField,
    /// The current value on the scanned instance.
    pub value: FilterValue<'a>,
}

impl ScannedField<'_> {
    /// Filter field name.
    pub fn name(&self) -> &'static str {
        self.field.name
    }

    /// Model field this field targets.
    pub fn target(&self) -> &'static str {
        self.field.target_name()
    }

    /// Matching rules.
    pub fn meta(&self) -> &'static FieldMeta {
        &self.field.meta
    }

    /// Returns `true` if the value contributes under the field's emptiness
    /// policy.
    pub fn is_present(&self) -> bool {
        self.value.is_present(self.field.meta.ignore_if_empty)
    }
}

/// Checks that a field table describes a usable filter.
///
/// The table must declare at least one field, every field must have a
/// filterable kind, and names must be non-empty and unique.
pub fn validate(fields: &[FilterField]) -> Result<()> {
    if fields.is_empty() {
        return Err(FilterError::NoFilterFields);
    }

    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if field.name.is_empty() {
            return Err(FilterError::EmptyFieldName);
        }
        if !field.kind.is_filterable() {
            return Err(FilterError::UnsupportedFieldKind {
                field: field.name.to_string(),
                kind: field.kind,
            });
        }
        if !seen.insert(field.name) {
            return Err(FilterError::DuplicateField {
                field: field.name.to_string(),
            });
        }
    }

    Ok(())
}

/// Iterates over the annotated fields of a filter, in declaration order.
pub fn scan<F: Filter>(filter: &F) -> impl Iterator<Item = ScannedField<'_>> + '_ {
    F::FIELDS.iter().map(move |field| ScannedField {
        field,
        value: filter.filter_value(field.name),
    })
}
