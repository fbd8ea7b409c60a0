//! Traits implemented by filter and model types.
//!
//! [`Filter`] and [`Model`] are usually derived with `#[derive(Filter)]` and
//! `#[derive(Model)]` from `sieve-macros` (re-exported here with the `macros`
//! feature), but both are small enough to implement by hand.
//!
//! [`FilterFieldType`] and [`ModelFieldType`] map Rust field types to a
//! [`FieldKind`] and a borrowed value. The derive macros lean on them, so a
//! field of an unsupported type fails to compile.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::compiler::FilterCompiler;
use crate::error::Result;
use crate::meta::FilterField;
use crate::value::{AsTimestamp, FieldKind, FilterValue, Timestamp, Value};

/// A type whose instances can be matched by a synthesized predicate.
///
/// # Manual Implementation
///
/// ```
/// use sieve_compiler::{FieldKind, Model, Value};
///
/// struct Task {
///     name: String,
///     tags: Vec<String>,
/// }
///
/// impl Model for Task {
///     fn field_kind(field: &str) -> Option<FieldKind> {
///         match field {
///             "name" => Some(FieldKind::Text),
///             "tags" => Some(FieldKind::TextList),
///             _ => None,
///         }
///     }
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::Text(&self.name),
///             "tags" => Value::TextList(&self.tags),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Model {
    /// Returns the declared kind of a field, or `None` if the model has no
    /// field with that name.
    fn field_kind(field: &str) -> Option<FieldKind>;

    /// Returns the value of a field, or [`Value::None`] if it is missing or
    /// null.
    fn field_value(&self, field: &str) -> Value<'_>;
}

/// A declarative filter over a [`Model`].
///
/// `FIELDS` lists the annotated fields in declaration order. That order is
/// the order sub-predicates are folded in, so it changes the meaning of
/// filters mixing `And` and `Or` fields.
///
/// # Manual Implementation
///
/// ```
/// use sieve_compiler::{FieldKind, FieldMeta, Filter, FilterField, FilterValue, Model, Value};
///
/// struct Task {
///     name: String,
/// }
///
/// impl Model for Task {
///     fn field_kind(field: &str) -> Option<FieldKind> {
///         (field == "name").then_some(FieldKind::Text)
///     }
///
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::Text(&self.name),
///             _ => Value::None,
///         }
///     }
/// }
///
/// struct TaskFilter {
///     name: Option<String>,
/// }
///
/// impl Filter for TaskFilter {
///     type Model = Task;
///
///     const FIELDS: &'static [FilterField] =
///         &[FilterField::new("name", FieldKind::Text, FieldMeta::new())];
///
///     fn filter_value(&self, field: &str) -> FilterValue<'_> {
///         match field {
///             "name" => FilterValue::Text(self.name.as_deref()),
///             _ => FilterValue::None,
///         }
///     }
/// }
///
/// let filter = TaskFilter { name: Some("Fix bug".into()) }.compile().unwrap();
/// let predicate = filter.synthesize_default().unwrap().unwrap();
/// assert!(predicate.matches(&Task { name: "Fix bug".into() }));
/// ```
pub trait Filter {
    /// The model this filter is matched against.
    type Model: Model;

    /// Annotated fields, in declaration order.
    const FIELDS: &'static [FilterField];

    /// Returns the current value of an annotated field.
    fn filter_value(&self, field: &str) -> FilterValue<'_>;

    /// Returns the paging fields carried by this filter.
    fn paging(&self) -> Paging {
        Paging::default()
    }

    /// Validates the field table and wraps this instance for compilation.
    ///
    /// Fails with a configuration error if the table is malformed.
    fn compile(self) -> Result<FilterCompiler<Self>>
    where
        Self: Sized,
    {
        FilterCompiler::new(self)
    }
}

/// Paging fields carried on every filter.
///
/// The compiler never applies them. They only take part in the fingerprint.
/// `-1` means "not set".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Paging {
    /// Index of the first item to return.
    pub starting_index: i32,
    /// Maximum number of items to return.
    pub page_size: i32,
}

impl Paging {
    /// Creates paging fields.
    pub fn new(starting_index: i32, page_size: i32) -> Self {
        Paging {
            starting_index,
            page_size,
        }
    }
}

impl Default for Paging {
    fn default() -> Self {
        Paging::new(-1, -1)
    }
}

/// A Rust type that can back an annotated filter field.
pub trait FilterFieldType {
    /// Kind recorded in the filter's field table.
    const KIND: FieldKind;

    /// Borrows the current value.
    fn filter_value(&self) -> FilterValue<'_>;
}

impl FilterFieldType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn filter_value(&self) -> FilterValue<'_> {
        FilterValue::Text(Some(self.as_str()))
    }
}

impl FilterFieldType for Option<String> {
    const KIND: FieldKind = FieldKind::Text;

    fn filter_value(&self) -> FilterValue<'_> {
        FilterValue::Text(self.as_deref())
    }
}

impl FilterFieldType for Vec<String> {
    const KIND: FieldKind = FieldKind::TextList;

    fn filter_value(&self) -> FilterValue<'_> {
        FilterValue::TextList(Some(self.as_slice()))
    }
}

impl FilterFieldType for Option<Vec<String>> {
    const KIND: FieldKind = FieldKind::TextList;

    fn filter_value(&self) -> FilterValue<'_> {
        FilterValue::TextList(self.as_deref())
    }
}

impl<Tz: TimeZone> FilterFieldType for Option<DateTime<Tz>> {
    const KIND: FieldKind = FieldKind::OptionalDate;

    fn filter_value(&self) -> FilterValue<'_> {
        FilterValue::Date(self.as_ref().map(AsTimestamp::as_timestamp))
    }
}

/// A Rust type that can back a model field.
pub trait ModelFieldType {
    /// Kind reported by `Model::field_kind`.
    const KIND: FieldKind;

    /// Borrows the current value.
    fn model_value(&self) -> Value<'_>;
}

impl ModelFieldType for String {
    const KIND: FieldKind = FieldKind::Text;

    fn model_value(&self) -> Value<'_> {
        Value::Text(self.as_str())
    }
}

/// A null text field never matches.
impl ModelFieldType for Option<String> {
    const KIND: FieldKind = FieldKind::Text;

    fn model_value(&self) -> Value<'_> {
        self.as_deref().map_or(Value::None, Value::Text)
    }
}

impl ModelFieldType for Vec<String> {
    const KIND: FieldKind = FieldKind::TextList;

    fn model_value(&self) -> Value<'_> {
        Value::TextList(self.as_slice())
    }
}

impl ModelFieldType for Option<Vec<String>> {
    const KIND: FieldKind = FieldKind::TextList;

    fn model_value(&self) -> Value<'_> {
        self.as_deref().map_or(Value::None, Value::TextList)
    }
}

impl ModelFieldType for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn model_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl<Tz: TimeZone> ModelFieldType for DateTime<Tz> {
    const KIND: FieldKind = FieldKind::Date;

    fn model_value(&self) -> Value<'_> {
        Value::Date(self.as_timestamp())
    }
}

impl<Tz: TimeZone> ModelFieldType for Option<DateTime<Tz>> {
    const KIND: FieldKind = FieldKind::OptionalDate;

    fn model_value(&self) -> Value<'_> {
        Value::OptionalDate(self.as_ref().map(AsTimestamp::as_timestamp))
    }
}

macro_rules! date_field_types {
    ($($ty:ty),*) => {
        $(
            impl FilterFieldType for Option<$ty> {
                const KIND: FieldKind = FieldKind::OptionalDate;

                fn filter_value(&self) -> FilterValue<'_> {
                    FilterValue::Date(self.as_ref().map(AsTimestamp::as_timestamp))
                }
            }

            impl ModelFieldType for $ty {
                const KIND: FieldKind = FieldKind::Date;

                fn model_value(&self) -> Value<'_> {
                    Value::Date(self.as_timestamp())
                }
            }

            impl ModelFieldType for Option<$ty> {
                const KIND: FieldKind = FieldKind::OptionalDate;

                fn model_value(&self) -> Value<'_> {
                    Value::OptionalDate(self.as_ref().map(AsTimestamp::as_timestamp))
                }
            }
        )*
    };
}

date_field_types!(Timestamp, NaiveDateTime, NaiveDate);

macro_rules! number_field_types {
    ($($ty:ty),*) => {
        $(
            impl ModelFieldType for $ty {
                const KIND: FieldKind = FieldKind::Number;

                fn model_value(&self) -> Value<'_> {
                    Value::Number
                }
            }
        )*
    };
}

number_field_types!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
