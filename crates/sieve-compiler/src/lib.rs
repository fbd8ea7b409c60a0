//! Sieve - Compile declarative filter structs into composable predicates.
//!
//! A *filter* is a plain struct whose fields carry metadata describing how
//! each one should be matched against a *model* type. Sieve turns a populated
//! filter instance into a [`Predicate`] over the model that can be evaluated
//! against in-memory collections or translated for another data source.
//!
//! - Text fields match by equality or substring, case-sensitive or not
//! - List fields match by membership (scalar model field) or overlap (list
//!   model field)
//! - Date fields compare with the filter value on the left
//! - Each field joins the running predicate with AND or OR, in declaration
//!   order
//!
//! # Quick Start
//!
//! ```rust
//! use sieve_compiler::{
//!     Case, FieldKind, FieldMeta, Filter, FilterField, FilterValue, Logic, Model, Value,
//! };
//!
//! struct Task {
//!     name: String,
//!     tags: Vec<String>,
//! }
//!
//! impl Model for Task {
//!     fn field_kind(field: &str) -> Option<FieldKind> {
//!         match field {
//!             "name" => Some(FieldKind::Text),
//!             "tags" => Some(FieldKind::TextList),
//!             _ => None,
//!         }
//!     }
//!
//!     fn field_value(&self, field: &str) -> Value<'_> {
//!         match field {
//!             "name" => Value::Text(&self.name),
//!             "tags" => Value::TextList(&self.tags),
//!             _ => Value::None,
//!         }
//!     }
//! }
//!
//! #[derive(Default)]
//! struct TaskFilter {
//!     name: Option<String>,
//!     tags: Option<Vec<String>>,
//! }
//!
//! impl Filter for TaskFilter {
//!     type Model = Task;
//!
//!     const FIELDS: &'static [FilterField] = &[
//!         FilterField::new("name", FieldKind::Text, FieldMeta::new()),
//!         FilterField::new(
//!             "tags",
//!             FieldKind::TextList,
//!             FieldMeta::new().case(Case::Insensitive).logic(Logic::Or),
//!         ),
//!     ];
//!
//!     fn filter_value(&self, field: &str) -> FilterValue<'_> {
//!         match field {
//!             "name" => FilterValue::Text(self.name.as_deref()),
//!             "tags" => FilterValue::TextList(self.tags.as_deref()),
//!             _ => FilterValue::None,
//!         }
//!     }
//! }
//!
//! let tasks = vec![
//!     Task { name: "Write docs".into(), tags: vec!["docs".into()] },
//!     Task { name: "Fix bug".into(), tags: vec!["Urgent".into()] },
//!     Task { name: "Refactor".into(), tags: vec![] },
//! ];
//!
//! let filter = TaskFilter {
//!     name: Some("Write docs".into()),
//!     tags: Some(vec!["urgent".into()]),
//! };
//!
//! let predicate = filter.compile()?.synthesize_default()?.expect("fields are set");
//! assert_eq!(predicate.count(&tasks), 2);
//! assert_eq!(
//!     predicate.to_string(),
//!     r#"name == "Write docs" OR tags ~overlaps ["urgent"]"#
//! );
//! # Ok::<(), sieve_compiler::FilterError>(())
//! ```
//!
//! With the `macros` feature the `Filter` and `Model` impls above are
//! generated by `#[derive(Filter)]` and `#[derive(Model)]`.
//!
//! # Synthesis
//!
//! Fields are visited in declaration order. For each field:
//!
//! 1. Fields marked `skip_synthesis` are left out.
//! 2. The target model field must exist, else synthesis fails with
//!    [`FilterError::MissingModelField`]. With
//!    [`FilterOptions::optimistic`] the field is skipped instead.
//! 3. Null values are skipped, and so are empty strings and lists unless the
//!    field sets `ignore_if_empty(false)`.
//! 4. The field test is folded into the running predicate:
//!    `(((f1 op f2) op f3) ...)`.
//!
//! If no field contributes, synthesis returns `None`: there is nothing to
//! filter on.
//!
//! | Filter field | Model field | Test |
//! |--------------|-------------|------|
//! | text | text | equality or substring ([`TextMatch`]) |
//! | text list | text | model value is in the list |
//! | text list | text list | lists share an element |
//! | optional date | date / optional date | `filter <op> model` ([`DateOp`]); a null model date never matches |

mod compiler;
mod diag;
mod error;
mod meta;
mod op;
mod options;
mod predicate;
mod scan;
mod synth;
mod traits;
mod value;

// Re-export public API
pub use compiler::FilterCompiler;
pub use diag::{fingerprint, has_any, has_all};
pub use error::{ErrorKind, FilterError, Result};
pub use meta::{FieldMeta, FilterField};
pub use op::{Case, DateOp, Logic, TextMatch};
pub use options::FilterOptions;
pub use predicate::{Expr, FieldPredicate, FieldTest, Predicate, Translate};
pub use scan::{scan, validate, ScannedField};
pub use synth::synthesize;
pub use traits::{Filter, FilterFieldType, Model, ModelFieldType, Paging};
pub use value::{AsTimestamp, FieldKind, FilterValue, Timestamp, Value};

#[cfg(feature = "macros")]
pub use sieve_macros::{Filter, Model};
