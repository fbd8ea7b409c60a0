//! Derive macros for sieve.
//!
//! - [`Filter`] - Build a filter type's ordered field table from
//!   `#[filter(...)]` annotations
//! - [`Model`] - Describe a model type's fields and generate field name
//!   constants
//!
//! Generated code refers to `::sieve_compiler`; enable the `macros` feature of
//! `sieve-compiler` to use these through its re-exports.
//!
//! For working examples, see `sieve-compiler/tests/derive.rs`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod filter;
mod model;

/// Derives the `Filter` trait for a filter struct.
///
/// Fields marked `#[filter]` become rows of the static field table, in
/// declaration order. Unmarked fields are invisible to the compiler.
///
/// # Struct Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `model = Type` | The model type the filter targets (required) |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `target = "..."` | Model field to match (default: field name) |
/// | `case = "insensitive"` | Case-insensitive text comparison |
/// | `method = "contains"` | Substring instead of equality for scalar text |
/// | `op = "lt"` | Date comparison: `eq`, `ne`, `lt`, `lte`, `gt`, `gte` |
/// | `logic = "or"` | Join the running predicate with OR instead of AND |
/// | `ignore_if_empty = false` | Empty strings and lists still constrain |
/// | `skip_synthesis` | Leave the field to manual composition |
/// | `paging` | The field holds the filter's `Paging` |
///
/// Supported field types are the implementors of `FilterFieldType`: text
/// (`String`, `Option<String>`), text lists (`Vec<String>`,
/// `Option<Vec<String>>`) and optional dates (`Option<Timestamp>` and the
/// `chrono` types).
///
/// # Example
///
/// ```ignore
/// use sieve_compiler::{Filter, Model, Paging};
///
/// #[derive(Model)]
/// struct Task {
///     name: String,
///     item1: String,
///     date: chrono::NaiveDate,
/// }
///
/// #[derive(Filter, Default)]
/// #[filter(model = Task)]
/// struct TaskFilter {
///     #[filter(case = "insensitive")]
///     name: Option<String>,
///
///     #[filter(target = "item1", logic = "or")]
///     items: Option<Vec<String>>,
///
///     #[filter(target = "date", op = "lt")]
///     after: Option<chrono::NaiveDate>,
///
///     #[filter(paging)]
///     paging: Paging,
/// }
///
/// let compiler = TaskFilter { name: Some("fix".into()), ..Default::default() }.compile()?;
/// let predicate = compiler.synthesize_default()?;
/// ```
#[proc_macro_derive(Filter, attributes(filter))]
pub fn filter_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    filter::filter_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Derives the `Model` trait for a record type.
///
/// Every named field is included. Its kind comes from `ModelFieldType`, so a
/// field of an unsupported type fails to compile; skip it instead.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from the model |
/// | `rename = "..."` | Use a custom name for filter targets |
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Task::NAME`, `Task::ITEM1`)
/// 2. Implementation of `Model::field_kind()` and `Model::field_value()`
#[proc_macro_derive(Model, attributes(model))]
pub fn model_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    model::model_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
