//! Predicate synthesis.
//!
//! Walks the scanned fields of a filter in declaration order, builds one
//! [`FieldTest`] per contributing field and folds it into a single composite
//! expression. The fold is strictly left to right: for fields `f1..fn` with
//! logic `op2..opn` the result is `(((f1 op2 f2) op3 f3) ... opn fn)`, so an
//! `Or` field combines with everything synthesized before it.

use tracing::{debug, trace};

use crate::error::{FilterError, Result};
use crate::op::{Logic, TextMatch};
use crate::options::FilterOptions;
use crate::predicate::{Expr, FieldPredicate, FieldTest, Predicate};
use crate::scan::{scan, ScannedField};
use crate::traits::{Filter, Model};
use crate::value::{FieldKind, FilterValue};

/// Accumulating composite predicate.
#[derive(Debug, Default)]
enum Composite {
    #[default]
    Unstarted,
    Started(Expr),
}

impl Composite {
    fn fold(self, sub: Expr, logic: Logic) -> Composite {
        match self {
            Composite::Unstarted => Composite::Started(sub),
            Composite::Started(acc) => Composite::Started(match logic {
                Logic::And => acc.and(sub),
                Logic::Or => acc.or(sub),
            }),
        }
    }

    fn finish(self) -> Option<Expr> {
        match self {
            Composite::Unstarted => None,
            Composite::Started(expr) => Some(expr),
        }
    }
}

/// Synthesizes the composite predicate for a filter instance.
///
/// Returns `Ok(None)` when no field contributed. Fails with
/// [`FilterError::MissingModelField`] when a field targets a model field that
/// does not exist (unless `options.optimistic` is set), and with
/// [`FilterError::UnsupportedPairing`] when the filter and model kinds cannot
/// be compared.
///
/// The field table is assumed valid; [`crate::FilterCompiler`] checks it up
/// front.
pub fn synthesize<F: Filter>(
    filter: &F,
    options: &FilterOptions,
) -> Result<Option<Predicate<F::Model>>> {
    let mut composite = Composite::Unstarted;

    for scanned in scan(filter) {
        let meta = scanned.meta();
        if meta.skip_synthesis {
            continue;
        }

        let target = scanned.target();
        let Some(model_kind) = <F::Model as Model>::field_kind(target) else {
            if options.optimistic {
                debug!(
                    field = scanned.name(),
                    model_field = target,
                    "model field not found, skipping"
                );
                continue;
            }
            return Err(FilterError::MissingModelField {
                field: scanned.name().to_string(),
                target: target.to_string(),
            });
        };

        if !scanned.is_present() {
            continue;
        }

        let test = build_test(&scanned, model_kind)?;
        let sub = Expr::Field(FieldPredicate::new(target, test));
        trace!(field = scanned.name(), logic = %meta.logic, predicate = %sub, "folding");
        composite = composite.fold(sub, meta.logic);
    }

    let expr = composite.finish();
    match &expr {
        Some(expr) => debug!(predicate = %expr, "synthesized predicate"),
        None => debug!("no field contributed, nothing to filter"),
    }

    Ok(expr.map(Predicate::new))
}

/// Builds the field-level test for a present value against a model field of
/// kind `model_kind`.
fn build_test(scanned: &ScannedField<'_>, model_kind: FieldKind) -> Result<FieldTest> {
    let meta = scanned.meta();

    let test = match (scanned.value, model_kind) {
        (FilterValue::Text(Some(value)), FieldKind::Text) => match meta.text_match {
            TextMatch::Equals => FieldTest::text_equals(value, meta.case),
            TextMatch::Contains => FieldTest::text_contains(value, meta.case),
        },
        (FilterValue::TextList(Some(values)), FieldKind::Text) => FieldTest::one_of(values, meta.case),
        (FilterValue::TextList(Some(values)), FieldKind::TextList) => {
            FieldTest::overlaps(values, meta.case)
        }
        (FilterValue::Date(Some(value)), FieldKind::Date) => FieldTest::date(meta.date_op, value, false),
        (FilterValue::Date(Some(value)), FieldKind::OptionalDate) => {
            FieldTest::date(meta.date_op, value, true)
        }
        _ => {
            return Err(FilterError::UnsupportedPairing {
                field: scanned.name().to_string(),
                filter_kind: scanned.field.kind,
                target: scanned.target().to_string(),
                model_kind,
            })
        }
    };

    Ok(test)
}
