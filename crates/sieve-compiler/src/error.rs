//! Error types for the sieve compiler.

use thiserror::Error;

use crate::value::FieldKind;

/// Broad classification of a [`FilterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The filter type's field table is malformed. Raised when a filter is
    /// wrapped for compilation.
    Configuration,
    /// The filter does not line up with the model it targets, or a metadata
    /// value could not be recognized.
    SchemaMismatch,
}

/// Errors that can occur when validating filters or synthesizing predicates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The filter type declares no annotated field.
    #[error("filter declares no annotated fields; at least one field needs filter metadata")]
    NoFilterFields,

    /// An annotated field has a kind filters cannot carry.
    #[error("filter field '{field}' has unsupported kind {kind}; expected text, text list or optional date")]
    UnsupportedFieldKind { field: String, kind: FieldKind },

    /// An annotated field has an empty name.
    #[error("filter field names must not be empty")]
    EmptyFieldName,

    /// Two annotated fields share a name.
    #[error("filter field '{field}' is declared more than once")]
    DuplicateField { field: String },

    /// The model has no field with the resolved target name.
    #[error("model has no field '{target}' required by filter field '{field}'")]
    MissingModelField { field: String, target: String },

    /// The filter field kind cannot be compared against the model field kind.
    #[error("{filter_kind} filter field '{field}' cannot target {model_kind} model field '{target}'")]
    UnsupportedPairing {
        field: String,
        filter_kind: FieldKind,
        target: String,
        model_kind: FieldKind,
    },

    /// Unrecognized date comparison operation.
    #[error("unknown comparison operation '{0}'")]
    UnknownDateOp(String),

    /// Unrecognized logical operation.
    #[error("unknown logical operation '{0}'")]
    UnknownLogic(String),

    /// Unrecognized text comparison method.
    #[error("unknown text comparison method '{0}'")]
    UnknownTextMatch(String),

    /// Unrecognized case sensitivity.
    #[error("unknown case sensitivity '{0}'")]
    UnknownCase(String),
}

impl FilterError {
    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::NoFilterFields
            | FilterError::UnsupportedFieldKind { .. }
            | FilterError::EmptyFieldName
            | FilterError::DuplicateField { .. } => ErrorKind::Configuration,
            FilterError::MissingModelField { .. }
            | FilterError::UnsupportedPairing { .. }
            | FilterError::UnknownDateOp(_)
            | FilterError::UnknownLogic(_)
            | FilterError::UnknownTextMatch(_)
            | FilterError::UnknownCase(_) => ErrorKind::SchemaMismatch,
        }
    }

    /// Returns `true` for errors raised while validating a filter type.
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Returns `true` for errors raised while matching a filter to its model.
    pub fn is_schema_mismatch(&self) -> bool {
        self.kind() == ErrorKind::SchemaMismatch
    }
}

/// Result type for sieve operations.
pub type Result<T> = std::result::Result<T, FilterError>;
