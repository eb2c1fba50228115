//! Query execution error types.

use crate::access::ValueError;
use crate::catalog::{Attribute, HeaderError};
use crate::expression::PredicateError;
use crate::relation::RelationError;
use thiserror::Error;

/// Errors that can occur while executing a query tree
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Unknown attributes: {0:?}")]
    UnknownAttributes(Vec<String>),

    #[error("Incompatible attributes: {}", pairs(.0))]
    IncompatibleAttributes(Vec<(Attribute, Attribute)>),

    #[error("Not union compatible: ({}) vs ({})", list(.0), list(.1))]
    NotUnionCompatible(Vec<Attribute>, Vec<Attribute>),

    #[error("Attributes are not disjoint: ({}) vs ({})", list(.0), list(.1))]
    NotDisjoint(Vec<Attribute>, Vec<Attribute>),

    #[error("Attributes are not a superset: ({}) does not contain ({})", list(.0), list(.1))]
    NotSuperset(Vec<Attribute>, Vec<Attribute>),

    #[error(transparent)]
    Predicate(#[from] PredicateError),

    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error(transparent)]
    Value(#[from] ValueError),

    /// An input relation had already failed
    #[error(transparent)]
    Relation(Box<RelationError>),
}

/// Result type for query execution.
pub type QueryResult<T> = Result<T, QueryError>;

fn list(attributes: &[Attribute]) -> String {
    attributes
        .iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn pairs(pairs: &[(Attribute, Attribute)]) -> String {
    pairs
        .iter()
        .map(|(l, r)| format!("{} vs {}", l, r))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ValueType;

    #[test]
    fn test_error_display() {
        let err = QueryError::UnknownAttributes(vec!["email".to_string()]);
        assert_eq!(err.to_string(), "Unknown attributes: [\"email\"]");

        let err = QueryError::NotDisjoint(
            vec![Attribute::required("id", ValueType::Integer)],
            vec![Attribute::required("id", ValueType::Integer)],
        );
        assert_eq!(
            err.to_string(),
            "Attributes are not disjoint: (id: int) vs (id: int)"
        );

        let err = QueryError::IncompatibleAttributes(vec![(
            Attribute::required("id", ValueType::Integer),
            Attribute::optional("id", ValueType::String),
        )]);
        assert_eq!(
            err.to_string(),
            "Incompatible attributes: id: int vs id: string?"
        );

        let err = QueryError::from(HeaderError::Empty);
        assert_eq!(
            err.to_string(),
            "Header is empty: a relation needs at least one attribute"
        );
    }
}
