//! Selection executor implementation.
//!
//! This executor keeps the tuples of its input for which a predicate holds.
//! The predicate's attributes are checked against the input header before
//! any tuple is looked at.

use crate::executor::{ensure_attributes, execute, Executor, QueryResult, Resolved};
use crate::expression::{evaluate_predicate, Predicate};
use crate::query::Query;

/// Executor that filters tuples based on a predicate
pub struct SelectionExecutor<'a> {
    /// Predicate evaluated against each tuple
    predicate: &'a Predicate,
    /// Input query
    input: &'a Query,
}

impl<'a> SelectionExecutor<'a> {
    pub fn new(predicate: &'a Predicate, input: &'a Query) -> Self {
        Self { predicate, input }
    }
}

impl Executor for SelectionExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let input = execute(self.input)?;

        ensure_attributes(&input.header, &self.predicate.attributes())?;

        let tuples = input
            .tuples
            .filter(|tuple| evaluate_predicate(self.predicate, tuple))?;

        Ok(Resolved::new(input.header, tuples))
    }
}
