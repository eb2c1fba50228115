//! Sort executor implementation.
//!
//! This executor orders the tuples of its input by one or more keys.
//!
//! Supports:
//! - Multi-attribute ordering (age DESC, name ASC)
//! - Absent values, which order below every present value
//! - Stability: tuples equal on every key keep their input order

use crate::access::{Tuple, Value, ValueResult};
use crate::executor::{ensure_attributes, execute, Executor, QueryResult, Resolved};
use crate::query::{Query, SortOrder};
use std::cmp::Ordering;

/// Executor that sorts tuples based on multiple keys
pub struct SortExecutor<'a> {
    /// Sort keys in order of precedence
    keys: &'a [(String, SortOrder)],
    /// Input query
    input: &'a Query,
}

impl<'a> SortExecutor<'a> {
    pub fn new(keys: &'a [(String, SortOrder)], input: &'a Query) -> Self {
        Self { keys, input }
    }

    /// Compare two tuples key by key; the first non-equal key decides
    fn compare_tuples(&self, a: &Tuple, b: &Tuple) -> ValueResult<Ordering> {
        for (name, order) in self.keys {
            let v1 = a.get(name).unwrap_or(&Value::Null);
            let v2 = b.get(name).unwrap_or(&Value::Null);

            let cmp = match order {
                SortOrder::Ascending => v1.compare(v2)?,
                SortOrder::Descending => v1.compare(v2)?.reverse(),
            };
            if cmp != Ordering::Equal {
                return Ok(cmp);
            }
        }
        // All keys equal
        Ok(Ordering::Equal)
    }
}

impl Executor for SortExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let input = execute(self.input)?;

        ensure_attributes(&input.header, self.keys.iter().map(|(name, _)| name))?;

        let tuples = input
            .tuples
            .sorted_by(|a, b| self.compare_tuples(a, b))?;

        Ok(Resolved::new(input.header, tuples))
    }
}
