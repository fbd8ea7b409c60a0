//! Per-field filter metadata.
//!
//! A filter type describes its annotated fields with a `const` table of
//! [`FilterField`] rows. Each row pairs the field's name and kind with a
//! [`FieldMeta`] record saying how the field is matched and combined.
//!
//! Everything here is `const`-constructible so the table can live in static
//! memory:
//!
//! ```
//! use sieve_compiler::{Case, FieldKind, FieldMeta, FilterField, Logic};
//!
//! const FIELDS: &[FilterField] = &[
//!     FilterField::new("id", FieldKind::Text, FieldMeta::new()),
//!     FilterField::new(
//!         "tags",
//!         FieldKind::TextList,
//!         FieldMeta::new().target("labels").case(Case::Insensitive).logic(Logic::Or),
//!     ),
//! ];
//!
//! assert_eq!(FIELDS[1].target_name(), "labels");
//! ```

use crate::op::{Case, DateOp, Logic, TextMatch};
use crate::value::FieldKind;

/// Matching and combination rules for one filter field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldMeta {
    /// Model field name, when it differs from the filter field name.
    pub target: Option<&'static str>,
    /// Case sensitivity for text comparisons.
    pub case: Case,
    /// Equality or substring match for scalar text.
    pub text_match: TextMatch,
    /// Comparison for date fields.
    pub date_op: DateOp,
    /// How the field folds into the composite predicate.
    pub logic: Logic,
    /// Leave the field out of synthesis entirely.
    pub skip_synthesis: bool,
    /// Treat empty text and empty lists as absent.
    pub ignore_if_empty: bool,
}

impl FieldMeta {
    /// Default metadata: same-name target, case-sensitive equality, date
    /// equality, `And`, empty values ignored.
    pub const fn new() -> Self {
        FieldMeta {
            target: None,
            case: Case::Sensitive,
            text_match: TextMatch::Equals,
            date_op: DateOp::Equality,
            logic: Logic::And,
            skip_synthesis: false,
            ignore_if_empty: true,
        }
    }

    /// Maps the field to a differently named model field.
    pub const fn target(mut self, name: &'static str) -> Self {
        self.target = Some(name);
        self
    }

    /// Sets case sensitivity.
    pub const fn case(mut self, case: Case) -> Self {
        self.case = case;
        self
    }

    /// Sets the text comparison method.
    pub const fn text_match(mut self, text_match: TextMatch) -> Self {
        self.text_match = text_match;
        self
    }

    /// Sets the date comparison.
    pub const fn date_op(mut self, op: DateOp) -> Self {
        self.date_op = op;
        self
    }

    /// Sets the logical combination.
    pub const fn logic(mut self, logic: Logic) -> Self {
        self.logic = logic;
        self
    }

    /// Excludes the field from synthesis.
    pub const fn skip_synthesis(mut self, skip: bool) -> Self {
        self.skip_synthesis = skip;
        self
    }

    /// Sets the emptiness policy.
    pub const fn ignore_if_empty(mut self, ignore: bool) -> Self {
        self.ignore_if_empty = ignore;
        self
    }
}

impl Default for FieldMeta {
    fn default() -> Self {
        FieldMeta::new()
    }
}

/// One row of a filter type's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterField {
    /// Filter field name, as passed to `Filter::filter_value`.
    pub name: &'static str,
    /// Declared kind of the field.
    pub kind: FieldKind,
    /// Matching rules.
    pub meta: FieldMeta,
}

impl FilterField {
    /// Creates a table row.
    pub const fn new(name: &'static str, kind: FieldKind, meta: FieldMeta) -> Self {
        FilterField { name, kind, meta }
    }

    /// The model field this filter field is matched against.
    pub fn target_name(&self) -> &'static str {
        self.meta.target.unwrap_or(self.name)
    }
}
