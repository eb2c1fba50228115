//! Executor layer for query execution.
//!
//! Every relational operator has its own executor. Executors resolve their
//! child queries through [`execute`], validate the resulting headers, and
//! produce a fully materialized [`Resolved`] relation. Binary operators
//! always resolve the left input first, so a failing left input wins over a
//! failing right input.

use crate::access::Tuples;
use crate::catalog::Header;
use crate::query::{JoinKind, Query};
use crate::relation::Relation;

pub mod division;
pub mod error;
pub mod join;
pub mod product;
pub mod projection;
pub mod rename;
pub mod selection;
pub mod semi_join;
pub mod set_operation;
pub mod sort;

pub use division::DivisionExecutor;
pub use error::{QueryError, QueryResult};
pub use join::NestedLoopJoinExecutor;
pub use product::ProductExecutor;
pub use projection::ProjectionExecutor;
pub use rename::RenameExecutor;
pub use selection::SelectionExecutor;
pub use semi_join::SemiJoinExecutor;
pub use set_operation::{SetOperation, SetOperationExecutor};
pub use sort::SortExecutor;

/// Trait for all query executors
pub trait Executor {
    /// Evaluate the operator over its resolved inputs
    fn execute(&self) -> QueryResult<Resolved>;
}

/// A fully evaluated relation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resolved {
    pub header: Header,
    pub tuples: Tuples,
}

impl Resolved {
    pub fn new(header: Header, tuples: Tuples) -> Self {
        Self { header, tuples }
    }

    /// Wrap this result as an already-resolved query leaf
    pub(crate) fn into_query(self) -> Query {
        Query::Relation(Relation::from(self))
    }
}

/// Evaluate a query tree
pub fn execute(query: &Query) -> QueryResult<Resolved> {
    let result = match query {
        Query::Relation(relation) => relation
            .resolve()
            .map(|resolved| (*resolved).clone())
            .map_err(|e| QueryError::Relation(Box::new(e))),
        Query::Projection { attributes, input } => {
            ProjectionExecutor::new(attributes, input).execute()
        }
        Query::Selection { predicate, input } => SelectionExecutor::new(predicate, input).execute(),
        Query::Rename {
            new_name,
            old_name,
            input,
        } => RenameExecutor::new(new_name, old_name, input).execute(),
        Query::OrderBy { keys, input } => SortExecutor::new(keys, input).execute(),
        Query::Intersection(left, right) => {
            SetOperationExecutor::new(SetOperation::Intersection, left, right).execute()
        }
        Query::Union(left, right) => {
            SetOperationExecutor::new(SetOperation::Union, left, right).execute()
        }
        Query::Subtraction(left, right) => {
            SetOperationExecutor::new(SetOperation::Difference, left, right).execute()
        }
        Query::Product(left, right) => ProductExecutor::new(left, right).execute(),
        Query::Division(left, right) => DivisionExecutor::new(left, right).execute(),
        Query::Join { kind, left, right } => match kind {
            JoinKind::Natural => NestedLoopJoinExecutor::natural(left, right).execute(),
            JoinKind::Theta(predicate) => {
                NestedLoopJoinExecutor::theta(predicate, left, right).execute()
            }
            JoinKind::Semi(semi) => SemiJoinExecutor::new(*semi, left, right).execute(),
        },
    };

    match &result {
        Ok(resolved) => log::debug!(
            "{} produced {} tuples over {}",
            query.name(),
            resolved.tuples.len(),
            resolved.header
        ),
        Err(e) => log::debug!("{} failed: {}", query.name(), e),
    }
    result
}

/// Fail with every name in `names` that `header` lacks
pub(crate) fn ensure_attributes<'a, I>(header: &Header, names: I) -> QueryResult<()>
where
    I: IntoIterator<Item = &'a String>,
{
    let missing = header.missing(names);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(QueryError::UnknownAttributes(missing))
    }
}
