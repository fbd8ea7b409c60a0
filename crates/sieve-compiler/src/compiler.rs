//! The validating wrapper around a filter instance.

use crate::diag;
use crate::error::Result;
use crate::options::FilterOptions;
use crate::predicate::Predicate;
use crate::scan;
use crate::synth;
use crate::traits::{Filter, Paging};

/// A filter instance whose field table has been validated.
///
/// Construct one with [`FilterCompiler::new`] or [`Filter::compile`]. The
/// compiler never mutates the filter; every call to
/// [`synthesize`](Self::synthesize) builds a fresh predicate.
#[derive(Debug, Clone)]
pub struct FilterCompiler<F> {
    filter: F,
}

impl<F: Filter> FilterCompiler<F> {
    /// Wraps a filter instance, validating its field table.
    ///
    /// Fails with a configuration error if the table declares no field, a
    /// field of an unsupported kind, or an empty or duplicate name.
    pub fn new(filter: F) -> Result<Self> {
        scan::validate(F::FIELDS)?;
        Ok(FilterCompiler { filter })
    }

    /// Synthesizes the composite predicate.
    ///
    /// Returns `Ok(None)` when no field contributes, meaning there is nothing
    /// to filter on.
    pub fn synthesize(&self, options: &FilterOptions) -> Result<Option<Predicate<F::Model>>> {
        synth::synthesize(&self.filter, options)
    }

    /// Synthesizes with default (strict) options.
    pub fn synthesize_default(&self) -> Result<Option<Predicate<F::Model>>> {
        self.synthesize(&FilterOptions::default())
    }

    /// Order-independent hash over all annotated values and the paging
    /// fields. See [`diag::fingerprint`].
    pub fn fingerprint(&self) -> u64 {
        diag::fingerprint(&self.filter)
    }

    /// Returns `true` if any annotated field holds a present value.
    pub fn has_any(&self) -> bool {
        diag::has_any(&self.filter)
    }

    /// Returns `true` if every annotated field holds a present value.
    pub fn has_all(&self) -> bool {
        diag::has_all(&self.filter)
    }

    /// The wrapped filter.
    pub fn filter(&self) -> &F {
        &self.filter
    }

    /// Paging fields of the wrapped filter.
    pub fn paging(&self) -> Paging {
        self.filter.paging()
    }

    /// Unwraps the filter.
    pub fn into_inner(self) -> F {
        self.filter
    }
}
