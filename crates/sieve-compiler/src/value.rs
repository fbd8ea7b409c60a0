//! Field shapes and runtime values.
//!
//! [`FieldKind`] names the shape of a field on either side of a comparison.
//! [`FilterValue`] is what a filter instance currently holds for an annotated
//! field, and [`Value`] is what a model instance exposes for one of its fields.
//! Both borrow from the struct they were read from.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// The declared shape of a filter or model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Scalar text.
    Text,
    /// List of text values.
    TextList,
    /// Non-nullable date.
    Date,
    /// Nullable date.
    OptionalDate,
    /// Numeric value. Models only.
    Number,
    /// Boolean value. Models only.
    Bool,
}

impl FieldKind {
    /// Returns `true` if a filter field may be declared with this kind.
    pub fn is_filterable(self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::TextList | FieldKind::OptionalDate
        )
    }

    /// Returns the display name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::TextList => "text list",
            FieldKind::Date => "date",
            FieldKind::OptionalDate => "optional date",
            FieldKind::Number => "number",
            FieldKind::Bool => "bool",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current value of an annotated filter field.
///
/// `Option::None` inside a variant means the field is null; the outer
/// [`FilterValue::None`] means the filter could not produce the field at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterValue<'a> {
    /// Scalar text.
    Text(Option<&'a str>),
    /// List of text values.
    TextList(Option<&'a [String]>),
    /// Optional date.
    Date(Option<Timestamp>),
    /// Field not readable.
    None,
}

impl<'a> FilterValue<'a> {
    /// Returns `true` if this value should contribute to a predicate.
    ///
    /// Null values are never present. Empty text and empty lists are present
    /// only when `ignore_if_empty` is `false`. Dates are null-checked only.
    pub fn is_present(&self, ignore_if_empty: bool) -> bool {
        match self {
            FilterValue::Text(Some(s)) => !s.is_empty() || !ignore_if_empty,
            FilterValue::TextList(Some(list)) => !list.is_empty() || !ignore_if_empty,
            FilterValue::Date(Some(_)) => true,
            FilterValue::Text(None)
            | FilterValue::TextList(None)
            | FilterValue::Date(None)
            | FilterValue::None => false,
        }
    }

    /// Returns the kind of this value, or `None` if the field is not readable.
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FilterValue::Text(_) => Some(FieldKind::Text),
            FilterValue::TextList(_) => Some(FieldKind::TextList),
            FilterValue::Date(_) => Some(FieldKind::OptionalDate),
            FilterValue::None => None,
        }
    }
}

/// Runtime value of a model field, borrowed from the model instance.
///
/// # Example
///
/// ```
/// use sieve_compiler::Value;
///
/// struct Task {
///     name: String,
///     priority: u8,
/// }
///
/// fn value<'a>(task: &'a Task, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::Text(&task.name),
///         "priority" => Value::Number,
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Scalar text.
    Text(&'a str),
    /// List of text values.
    TextList(&'a [String]),
    /// Non-nullable date.
    Date(Timestamp),
    /// Nullable date.
    OptionalDate(Option<Timestamp>),
    /// Numeric field. No test compares numbers, so the value is not carried.
    Number,
    /// Boolean value.
    Bool(bool),
    /// Field not present or null.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Extracts the text value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the text list, if present.
    pub fn as_list(&self) -> Option<&'a [String]> {
        match self {
            Value::TextList(list) => Some(list),
            _ => None,
        }
    }

    /// Extracts the date, if present. Null optional dates yield `None`.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Date(ts) | Value::OptionalDate(Some(ts)) => Some(*ts),
            _ => None,
        }
    }
}

const NANOS_PER_SEC: i128 = 1_000_000_000;
const NANOS_PER_MILLI: i128 = 1_000_000;

/// Date value represented as nanoseconds since the Unix epoch.
///
/// This is the single comparable representation for every date type the
/// compiler accepts. Convert from `chrono` types with [`AsTimestamp`]; no
/// precision is lost on the way, so instants a few nanoseconds apart stay
/// distinct.
///
/// ```
/// use sieve_compiler::Timestamp;
///
/// assert!(Timestamp::from_millis(1000) < Timestamp::from_millis(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// assert!(Timestamp::from_nanos(1) < Timestamp::from_nanos(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub i128);

impl Timestamp {
    /// Creates a new timestamp from nanoseconds since Unix epoch.
    pub fn from_nanos(nanos: i128) -> Self {
        Timestamp(nanos)
    }

    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(i128::from(millis) * NANOS_PER_MILLI)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(i128::from(secs) * NANOS_PER_SEC)
    }

    /// Returns the timestamp as nanoseconds since Unix epoch.
    pub fn as_nanos(self) -> i128 {
        self.0
    }

    /// Returns the timestamp as whole milliseconds since Unix epoch, rounding
    /// toward negative infinity.
    pub fn as_millis(self) -> i128 {
        self.0.div_euclid(NANOS_PER_MILLI)
    }

    /// Returns the timestamp as whole seconds since Unix epoch, rounding
    /// toward negative infinity.
    pub fn as_secs(self) -> i128 {
        self.0.div_euclid(NANOS_PER_SEC)
    }

    /// Converts to a UTC date time, if chrono can represent the instant.
    pub fn to_datetime(self) -> Option<DateTime<Utc>> {
        let secs = i64::try_from(self.as_secs()).ok()?;
        let nanos = u32::try_from(self.0.rem_euclid(NANOS_PER_SEC)).ok()?;
        DateTime::from_timestamp(secs, nanos)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(dt) = self.to_datetime() else {
            return write!(f, "{}ns", self.0);
        };
        if self.0.rem_euclid(NANOS_PER_MILLI) == 0 {
            write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.3fZ"))
        } else {
            write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S%.9fZ"))
        }
    }
}

/// Conversion of date types into [`Timestamp`].
///
/// Implemented for `Timestamp` itself and the `chrono` date types. Implement
/// it for your own date type to use that type in filters and models.
pub trait AsTimestamp {
    /// Converts this value to a [`Timestamp`] for comparison.
    fn as_timestamp(&self) -> Timestamp;
}

impl AsTimestamp for Timestamp {
    fn as_timestamp(&self) -> Timestamp {
        *self
    }
}

impl<Tz: TimeZone> AsTimestamp for DateTime<Tz> {
    fn as_timestamp(&self) -> Timestamp {
        // Leap seconds report up to 1_999_999_999 subsecond nanos.
        Timestamp(
            i128::from(self.timestamp()) * NANOS_PER_SEC
                + i128::from(self.timestamp_subsec_nanos()),
        )
    }
}

impl AsTimestamp for NaiveDateTime {
    fn as_timestamp(&self) -> Timestamp {
        self.and_utc().as_timestamp()
    }
}

/// Dates convert to midnight UTC.
impl AsTimestamp for NaiveDate {
    fn as_timestamp(&self) -> Timestamp {
        self.and_time(NaiveTime::MIN).as_timestamp()
    }
}
