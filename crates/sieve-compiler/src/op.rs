//! Comparison and combination operators carried by field metadata.
//!
//! Each operator applies to one family of fields:
//! - [`Case`] and [`TextMatch`]: text fields
//! - [`DateOp`]: date fields
//! - [`Logic`]: every field, when folding into the composite predicate

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Case sensitivity of text comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Case {
    /// Exact, case-sensitive comparison.
    #[default]
    Sensitive,
    /// Both sides are lower-cased before comparing.
    Insensitive,
}

impl Case {
    /// Normalizes a string for comparison under this sensitivity.
    pub fn normalize(self, s: &str) -> String {
        match self {
            Case::Sensitive => s.to_string(),
            Case::Insensitive => s.to_lowercase(),
        }
    }

    /// Returns the display name of this sensitivity.
    pub fn as_str(self) -> &'static str {
        match self {
            Case::Sensitive => "sensitive",
            Case::Insensitive => "insensitive",
        }
    }
}

/// How a scalar text filter value is compared with the model value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatch {
    /// Whole-value equality.
    #[default]
    Equals,
    /// The model value contains the filter value.
    Contains,
}

impl TextMatch {
    /// Returns the display name of this method.
    pub fn as_str(self) -> &'static str {
        match self {
            TextMatch::Equals => "equals",
            TextMatch::Contains => "contains",
        }
    }
}

/// Date comparison, read with the filter value on the left.
///
/// `LessThan` holds when `filter < model`. Two fields targeting the same model
/// date with `LessThan` and `GreaterThan` therefore select the open interval
/// between the two filter dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOp {
    /// `filter == model`
    #[default]
    Equality,
    /// `filter != model`
    Inequality,
    /// `filter < model`
    LessThan,
    /// `filter <= model`
    LessThanOrEqual,
    /// `filter > model`
    GreaterThan,
    /// `filter >= model`
    GreaterThanOrEqual,
}

impl DateOp {
    /// Evaluates the operation given `filter.cmp(&model)`.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            DateOp::Equality => ordering == Ordering::Equal,
            DateOp::Inequality => ordering != Ordering::Equal,
            DateOp::LessThan => ordering == Ordering::Less,
            DateOp::LessThanOrEqual => ordering != Ordering::Greater,
            DateOp::GreaterThan => ordering == Ordering::Greater,
            DateOp::GreaterThanOrEqual => ordering != Ordering::Less,
        }
    }

    /// Evaluates `filter <op> model`.
    pub fn eval<T: Ord>(self, filter: T, model: T) -> bool {
        self.eval_ordering(filter.cmp(&model))
    }

    /// The same relation with the operands swapped, so it reads `model <op> filter`.
    pub fn flipped(self) -> DateOp {
        match self {
            DateOp::LessThan => DateOp::GreaterThan,
            DateOp::LessThanOrEqual => DateOp::GreaterThanOrEqual,
            DateOp::GreaterThan => DateOp::LessThan,
            DateOp::GreaterThanOrEqual => DateOp::LessThanOrEqual,
            other => other,
        }
    }

    /// Returns the operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            DateOp::Equality => "==",
            DateOp::Inequality => "!=",
            DateOp::LessThan => "<",
            DateOp::LessThanOrEqual => "<=",
            DateOp::GreaterThan => ">",
            DateOp::GreaterThanOrEqual => ">=",
        }
    }

    /// Returns the display name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            DateOp::Equality => "equality",
            DateOp::Inequality => "inequality",
            DateOp::LessThan => "less_than",
            DateOp::LessThanOrEqual => "less_than_or_equal",
            DateOp::GreaterThan => "greater_than",
            DateOp::GreaterThanOrEqual => "greater_than_or_equal",
        }
    }
}

/// How a field's sub-predicate joins everything synthesized before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Logic {
    /// `composite AND field`
    #[default]
    And,
    /// `composite OR field`
    Or,
}

impl Logic {
    /// Returns the display name of this operation.
    pub fn as_str(self) -> &'static str {
        match self {
            Logic::And => "and",
            Logic::Or => "or",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Case, TextMatch, DateOp, Logic);

impl FromStr for Case {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sensitive" | "case_sensitive" => Ok(Case::Sensitive),
            "insensitive" | "case_insensitive" | "ignore_case" => Ok(Case::Insensitive),
            _ => Err(FilterError::UnknownCase(s.to_string())),
        }
    }
}

impl FromStr for TextMatch {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equals" | "eq" => Ok(TextMatch::Equals),
            "contains" => Ok(TextMatch::Contains),
            _ => Err(FilterError::UnknownTextMatch(s.to_string())),
        }
    }
}

impl FromStr for DateOp {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "equality" | "eq" | "==" => Ok(DateOp::Equality),
            "inequality" | "ne" | "!=" => Ok(DateOp::Inequality),
            "less_than" | "lt" | "<" => Ok(DateOp::LessThan),
            "less_than_or_equal" | "lte" | "<=" => Ok(DateOp::LessThanOrEqual),
            "greater_than" | "gt" | ">" => Ok(DateOp::GreaterThan),
            "greater_than_or_equal" | "gte" | ">=" => Ok(DateOp::GreaterThanOrEqual),
            _ => Err(FilterError::UnknownDateOp(s.to_string())),
        }
    }
}

impl FromStr for Logic {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "and" | "&&" => Ok(Logic::And),
            "or" | "||" => Ok(Logic::Or),
            _ => Err(FilterError::UnknownLogic(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_op_reads_filter_first() {
        // filter 10 < model 20
        assert!(DateOp::LessThan.eval(10, 20));
        assert!(!DateOp::LessThan.eval(20, 20));
        assert!(DateOp::LessThanOrEqual.eval(20, 20));
        assert!(DateOp::GreaterThan.eval(30, 20));
        assert!(!DateOp::GreaterThan.eval(20, 20));
        assert!(DateOp::GreaterThanOrEqual.eval(20, 20));
        assert!(DateOp::Equality.eval(20, 20));
        assert!(DateOp::Inequality.eval(10, 20));
        assert!(!DateOp::Inequality.eval(20, 20));
    }

    #[test]
    fn date_op_flip_swaps_operands() {
        for op in [
            DateOp::Equality,
            DateOp::Inequality,
            DateOp::LessThan,
            DateOp::LessThanOrEqual,
            DateOp::GreaterThan,
            DateOp::GreaterThanOrEqual,
        ] {
            for (a, b) in [(1, 2), (2, 2), (3, 2)] {
                assert_eq!(op.eval(a, b), op.flipped().eval(b, a), "{op}");
            }
        }
    }

    #[test]
    fn parse_known_names() {
        assert_eq!("lt".parse::<DateOp>().unwrap(), DateOp::LessThan);
        assert_eq!(
            "GREATER_THAN_OR_EQUAL".parse::<DateOp>().unwrap(),
            DateOp::GreaterThanOrEqual
        );
        assert_eq!("or".parse::<Logic>().unwrap(), Logic::Or);
        assert_eq!("Contains".parse::<TextMatch>().unwrap(), TextMatch::Contains);
        assert_eq!("insensitive".parse::<Case>().unwrap(), Case::Insensitive);
    }

    #[test]
    fn parse_unknown_names_is_schema_mismatch() {
        let err = "between".parse::<DateOp>().unwrap_err();
        assert_eq!(err, FilterError::UnknownDateOp("between".into()));
        assert!(err.is_schema_mismatch());

        assert!("xor".parse::<Logic>().unwrap_err().is_schema_mismatch());
        assert!("like".parse::<TextMatch>().unwrap_err().is_schema_mismatch());
        assert!("upper".parse::<Case>().unwrap_err().is_schema_mismatch());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        assert_eq!(
            DateOp::LessThanOrEqual.to_string().parse::<DateOp>().unwrap(),
            DateOp::LessThanOrEqual
        );
        assert_eq!(Logic::Or.to_string(), "or");
        assert_eq!(Case::Insensitive.normalize("OnE"), "one");
        assert_eq!(Case::Sensitive.normalize("OnE"), "OnE");
    }

    #[test]
    fn defaults() {
        assert_eq!(Case::default(), Case::Sensitive);
        assert_eq!(TextMatch::default(), TextMatch::Equals);
        assert_eq!(DateOp::default(), DateOp::Equality);
        assert_eq!(Logic::default(), Logic::And);
    }
}
