//! Error types for expression and predicate evaluation.

use crate::access::ValueError;
use thiserror::Error;

/// Errors that can occur while evaluating an expression against a row
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredicateError {
    #[error(transparent)]
    Value(#[from] ValueError),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),
}

/// Result type for expression operations
pub type PredicateResult<T> = Result<T, PredicateError>;
