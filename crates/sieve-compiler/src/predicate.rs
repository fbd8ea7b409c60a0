//! Predicate trees produced by synthesis.
//!
//! A [`FieldTest`] is a single comparison against one model field. A
//! [`FieldPredicate`] binds a test to the model field name. [`Expr`] combines
//! field predicates with AND/OR, and [`Predicate`] ties an expression to the
//! model type it evaluates.
//!
//! Predicates evaluate directly against model instances and can be handed to a
//! [`Translate`] implementation to push them into another query language.

use std::fmt;
use std::marker::PhantomData;

use crate::op::{Case, DateOp};
use crate::traits::Model;
use crate::value::{Timestamp, Value};

/// A single comparison against one model field.
///
/// Text values held by a test are already normalized for its [`Case`], so
/// only the model side is normalized when matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldTest {
    /// Model text equals the value.
    TextEquals { value: String, case: Case },
    /// Model text contains the value.
    TextContains { value: String, case: Case },
    /// Model text is one of the values.
    OneOf { values: Vec<String>, case: Case },
    /// Model list shares at least one element with the values.
    Overlaps { values: Vec<String>, case: Case },
    /// `value <op> model date`. A nullable model date that is null never
    /// matches.
    Date {
        op: DateOp,
        value: Timestamp,
        nullable: bool,
    },
}

impl FieldTest {
    /// Whole-value text equality.
    pub fn text_equals(value: &str, case: Case) -> Self {
        FieldTest::TextEquals {
            value: case.normalize(value),
            case,
        }
    }

    /// Substring match.
    pub fn text_contains(value: &str, case: Case) -> Self {
        FieldTest::TextContains {
            value: case.normalize(value),
            case,
        }
    }

    /// Membership of a scalar model value in a list.
    pub fn one_of(values: &[String], case: Case) -> Self {
        FieldTest::OneOf {
            values: values.iter().map(|v| case.normalize(v)).collect(),
            case,
        }
    }

    /// Non-empty intersection of a model list with a list.
    pub fn overlaps(values: &[String], case: Case) -> Self {
        FieldTest::Overlaps {
            values: values.iter().map(|v| case.normalize(v)).collect(),
            case,
        }
    }

    /// Date comparison with the filter value on the left.
    pub fn date(op: DateOp, value: Timestamp, nullable: bool) -> Self {
        FieldTest::Date {
            op,
            value,
            nullable,
        }
    }

    /// Evaluates this test against a model field value.
    ///
    /// A missing or null value never matches, and neither does a value of the
    /// wrong kind.
    pub fn matches(&self, field_value: &Value<'_>) -> bool {
        match (self, field_value) {
            (FieldTest::TextEquals { value, case }, Value::Text(s)) => match case {
                Case::Sensitive => *s == value.as_str(),
                Case::Insensitive => s.to_lowercase() == *value,
            },

            (FieldTest::TextContains { value, case }, Value::Text(s)) => match case {
                Case::Sensitive => s.contains(value.as_str()),
                Case::Insensitive => s.to_lowercase().contains(value.as_str()),
            },

            (FieldTest::OneOf { values, case }, Value::Text(s)) => contains(values, s, *case),

            (FieldTest::Overlaps { values, case }, Value::TextList(list)) => {
                list.iter().any(|item| contains(values, item, *case))
            }

            (FieldTest::Date { op, value, .. }, Value::Date(ts)) => op.eval(*value, *ts),
            (FieldTest::Date { op, value, .. }, Value::OptionalDate(Some(ts))) => {
                op.eval(*value, *ts)
            }

            // Null dates, missing fields and kind mismatches
            _ => false,
        }
    }
}

fn contains(values: &[String], s: &str, case: Case) -> bool {
    match case {
        Case::Sensitive => values.iter().any(|v| v == s),
        Case::Insensitive => {
            let s = s.to_lowercase();
            values.iter().any(|v| *v == s)
        }
    }
}

impl fmt::Display for FieldTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |case: &Case| match case {
            Case::Sensitive => "",
            Case::Insensitive => "~",
        };

        match self {
            FieldTest::TextEquals { value, case } => write!(f, "{}== {:?}", mark(case), value),
            FieldTest::TextContains { value, case } => {
                write!(f, "{}contains {:?}", mark(case), value)
            }
            FieldTest::OneOf { values, case } => write!(f, "{}in {:?}", mark(case), values),
            FieldTest::Overlaps { values, case } => {
                write!(f, "{}overlaps {:?}", mark(case), values)
            }
            // Rendered model-first, so the operator is flipped.
            FieldTest::Date { op, value, .. } => write!(f, "{} {}", op.flipped().symbol(), value),
        }
    }
}

/// A [`FieldTest`] bound to a model field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPredicate {
    /// Model field name.
    pub field: String,
    /// The comparison.
    pub test: FieldTest,
}

impl FieldPredicate {
    /// Creates a field predicate.
    pub fn new(field: impl Into<String>, test: FieldTest) -> Self {
        FieldPredicate {
            field: field.into(),
            test,
        }
    }

    /// Evaluates this predicate against a model instance.
    pub fn matches<M: Model>(&self, item: &M) -> bool {
        self.test.matches(&item.field_value(&self.field))
    }
}

impl fmt::Display for FieldPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.test {
            FieldTest::Date { nullable: true, .. } => write!(f, "{}? {}", self.field, self.test),
            _ => write!(f, "{} {}", self.field, self.test),
        }
    }
}

/// Boolean combination of field predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A single field predicate.
    Field(FieldPredicate),
    /// Both sides hold.
    And(Box<Expr>, Box<Expr>),
    /// Either side holds.
    Or(Box<Expr>, Box<Expr>),
}

impl Expr {
    /// Combines two expressions with AND.
    pub fn and(self, other: Expr) -> Expr {
        Expr::And(Box::new(self), Box::new(other))
    }

    /// Combines two expressions with OR.
    pub fn or(self, other: Expr) -> Expr {
        Expr::Or(Box::new(self), Box::new(other))
    }

    /// Evaluates the expression, short-circuiting left to right.
    pub fn matches<M: Model>(&self, item: &M) -> bool {
        match self {
            Expr::Field(predicate) => predicate.matches(item),
            Expr::And(left, right) => left.matches(item) && right.matches(item),
            Expr::Or(left, right) => left.matches(item) || right.matches(item),
        }
    }

    /// Returns the field predicates in left-to-right order.
    pub fn fields(&self) -> Vec<&FieldPredicate> {
        let mut out = Vec::new();
        self.collect_fields(&mut out);
        out
    }

    fn collect_fields<'a>(&'a self, out: &mut Vec<&'a FieldPredicate>) {
        match self {
            Expr::Field(predicate) => out.push(predicate),
            Expr::And(left, right) | Expr::Or(left, right) => {
                left.collect_fields(out);
                right.collect_fields(out);
            }
        }
    }

    /// Folds the expression bottom-up through a [`Translate`] implementation.
    pub fn translate<T: Translate>(&self, translator: &mut T) -> T::Output {
        match self {
            Expr::Field(predicate) => translator.field(predicate),
            Expr::And(left, right) => {
                let left = left.translate(translator);
                let right = right.translate(translator);
                translator.and(left, right)
            }
            Expr::Or(left, right) => {
                let left = left.translate(translator);
                let right = right.translate(translator);
                translator.or(left, right)
            }
        }
    }

    fn fmt_operand(&self, parent_is_and: bool, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::And(..) if !parent_is_and => write!(f, "({})", self),
            Expr::Or(..) if parent_is_and => write!(f, "({})", self),
            _ => write!(f, "{}", self),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Field(predicate) => write!(f, "{}", predicate),
            Expr::And(left, right) => {
                left.fmt_operand(true, f)?;
                f.write_str(" AND ")?;
                right.fmt_operand(true, f)
            }
            Expr::Or(left, right) => {
                left.fmt_operand(false, f)?;
                f.write_str(" OR ")?;
                right.fmt_operand(false, f)
            }
        }
    }
}

/// Target of predicate pushdown.
///
/// [`Expr::translate`] calls [`Translate::field`] for each leaf and combines
/// the results with [`Translate::and`] / [`Translate::or`], mirroring the
/// structure of the tree.
pub trait Translate {
    /// Translated form of an expression.
    type Output;

    /// Translates a single field predicate.
    fn field(&mut self, predicate: &FieldPredicate) -> Self::Output;

    /// Combines two translated expressions with AND.
    fn and(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;

    /// Combines two translated expressions with OR.
    fn or(&mut self, left: Self::Output, right: Self::Output) -> Self::Output;
}

/// A composite predicate over model type `M`.
///
/// # Example
///
/// ```
/// use sieve_compiler::{Case, Expr, FieldKind, FieldPredicate, FieldTest, Model, Predicate, Value};
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
/// let predicate: Predicate<Task> =
///     Predicate::from_field(FieldPredicate::new("name", FieldTest::text_contains("BUG", Case::Insensitive)));
///
/// let tasks = vec![Task { name: "Fix bug".into() }, Task { name: "Write docs".into() }];
/// let matched = predicate.filter(&tasks);
/// assert_eq!(matched.len(), 1);
/// assert_eq!(matched[0].name, "Fix bug");
/// ```
pub struct Predicate<M> {
    expr: Expr,
    _model: PhantomData<fn(&M) -> bool>,
}

impl<M> Predicate<M> {
    /// Wraps an expression.
    pub fn new(expr: Expr) -> Self {
        Predicate {
            expr,
            _model: PhantomData,
        }
    }

    /// A predicate consisting of a single field predicate.
    pub fn from_field(predicate: FieldPredicate) -> Self {
        Predicate::new(Expr::Field(predicate))
    }

    /// Returns the expression tree.
    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Unwraps the expression tree.
    pub fn into_expr(self) -> Expr {
        self.expr
    }

    /// Combines with another predicate using AND.
    pub fn and(self, other: Predicate<M>) -> Self {
        Predicate::new(self.expr.and(other.expr))
    }

    /// Combines with another predicate using OR.
    pub fn or(self, other: Predicate<M>) -> Self {
        Predicate::new(self.expr.or(other.expr))
    }

    /// Translates the predicate for another data source.
    pub fn translate<T: Translate>(&self, translator: &mut T) -> T::Output {
        self.expr.translate(translator)
    }
}

impl<M: Model> Predicate<M> {
    /// Tests a single item.
    pub fn matches(&self, item: &M) -> bool {
        self.expr.matches(item)
    }

    /// Borrows the predicate as a closure, for iterator adaptors.
    pub fn as_fn(&self) -> impl Fn(&M) -> bool + '_ {
        move |item| self.matches(item)
    }

    /// Returns references to the matching items, in input order.
    pub fn filter<'a>(&self, items: &'a [M]) -> Vec<&'a M> {
        items.iter().filter(|item| self.matches(item)).collect()
    }

    /// Clones the matching items.
    pub fn filter_cloned(&self, items: &[M]) -> Vec<M>
    where
        M: Clone,
    {
        items
            .iter()
            .filter(|item| self.matches(item))
            .cloned()
            .collect()
    }

    /// Keeps only the matching items.
    pub fn filter_mut(&self, items: &mut Vec<M>) {
        items.retain(|item| self.matches(item));
    }

    /// Counts the matching items.
    pub fn count(&self, items: &[M]) -> usize {
        items.iter().filter(|item| self.matches(item)).count()
    }

    /// Returns `true` if any item matches.
    pub fn any(&self, items: &[M]) -> bool {
        items.iter().any(|item| self.matches(item))
    }

    /// Returns `true` if all items match.
    pub fn all(&self, items: &[M]) -> bool {
        items.iter().all(|item| self.matches(item))
    }

    /// Finds the first matching item.
    pub fn find<'a>(&self, items: &'a [M]) -> Option<&'a M> {
        items.iter().find(|item| self.matches(item))
    }

    /// Finds the index of the first matching item.
    pub fn position(&self, items: &[M]) -> Option<usize> {
        items.iter().position(|item| self.matches(item))
    }
}

impl<M> Clone for Predicate<M> {
    fn clone(&self) -> Self {
        Predicate::new(self.expr.clone())
    }
}

impl<M> PartialEq for Predicate<M> {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

impl<M> fmt::Debug for Predicate<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.expr).finish()
    }
}

impl<M> fmt::Display for Predicate<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl<M> From<Predicate<M>> for Expr {
    fn from(predicate: Predicate<M>) -> Self {
        predicate.expr
    }
}
