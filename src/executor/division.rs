//! Division executor implementation.
//!
//! For a dividend `l` and a divisor `r` whose attributes are a subset of
//! `l`'s, the quotient holds every tuple over the remaining attributes `U`
//! that appears in `l` together with every tuple of `r`:
//!
//! ```text
//! T = πU(l) × r
//! W = πU(T − l)
//! l ÷ r = πU(l) − W
//! ```
//!
//! The identity is evaluated by building the corresponding query tree over
//! already-resolved leaves and executing it.

use crate::executor::{execute, Executor, QueryError, QueryResult, Resolved};
use crate::query::Query;

/// Executor for relational division
pub struct DivisionExecutor<'a> {
    left: &'a Query,
    right: &'a Query,
}

impl<'a> DivisionExecutor<'a> {
    pub fn new(left: &'a Query, right: &'a Query) -> Self {
        Self { left, right }
    }
}

impl Executor for DivisionExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let left = execute(self.left)?;
        let right = execute(self.right)?;

        let is_superset = right
            .header
            .attributes()
            .iter()
            .all(|attribute| left.header.attribute(&attribute.name) == Some(attribute));
        if !is_superset {
            return Err(QueryError::NotSuperset(
                left.header.attributes().to_vec(),
                right.header.attributes().to_vec(),
            ));
        }

        let left_names = left.header.names();
        let unique: Vec<String> = left_names
            .iter()
            .filter(|name| !right.header.contains(name))
            .cloned()
            .collect();

        let left = left.into_query();
        let right = right.into_query();

        // πU(l) is used twice, so resolve it once
        let candidates = execute(&Query::projection(unique.clone(), left.clone()))?.into_query();

        let pairs = Query::product(candidates.clone(), right);
        let missing = Query::projection(
            unique,
            Query::subtraction(Query::projection(left_names, pairs), left),
        );

        execute(&Query::subtraction(candidates, missing))
    }
}
