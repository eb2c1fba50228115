//! Nested Loop Join executor implementation.
//!
//! This executor joins two inputs by scanning every right tuple for each
//! left tuple. Attributes with the same name on both sides are unified into
//! one column and a pair only joins when their values agree. A theta join
//! additionally keeps only the merged tuples for which its predicate holds.

use crate::access::{Tuple, Tuples};
use crate::catalog::{Attribute, Header};
use crate::executor::{ensure_attributes, execute, Executor, QueryError, QueryResult, Resolved};
use crate::expression::{evaluate_predicate, Predicate};
use crate::query::Query;

/// Executor that performs a nested loop join
pub struct NestedLoopJoinExecutor<'a> {
    /// Extra condition over the merged tuple, `None` for a natural join
    predicate: Option<&'a Predicate>,
    left: &'a Query,
    right: &'a Query,
}

impl<'a> NestedLoopJoinExecutor<'a> {
    /// Join on every shared attribute name
    pub fn natural(left: &'a Query, right: &'a Query) -> Self {
        Self {
            predicate: None,
            left,
            right,
        }
    }

    /// Join on every shared attribute name and `predicate`
    pub fn theta(predicate: &'a Predicate, left: &'a Query, right: &'a Query) -> Self {
        Self {
            predicate: Some(predicate),
            left,
            right,
        }
    }

    fn matches(&self, left: &Tuple, right: &Tuple, shared: &[String]) -> bool {
        shared.iter().all(|name| left.get(name) == right.get(name))
    }
}

impl Executor for NestedLoopJoinExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let left = execute(self.left)?;
        let right = execute(self.right)?;

        let (header, shared) = unify_headers(&left.header, &right.header)?;
        if let Some(predicate) = self.predicate {
            ensure_attributes(&header, &predicate.attributes())?;
        }

        let mut tuples = Tuples::new();
        for l in &left.tuples {
            for r in &right.tuples {
                if !self.matches(l, r, &shared) {
                    continue;
                }
                let merged = l.merge(r);
                if let Some(predicate) = self.predicate {
                    if !evaluate_predicate(predicate, &merged)? {
                        continue;
                    }
                }
                tuples.insert(merged);
            }
        }

        Ok(Resolved::new(header, tuples))
    }
}

/// Unify two headers for a join.
///
/// The result holds every left attribute followed by the right attributes
/// whose names the left side lacks. Also returns the shared names, which
/// must carry the same type on both sides.
pub(crate) fn unify_headers(left: &Header, right: &Header) -> QueryResult<(Header, Vec<String>)> {
    let mut shared = Vec::new();
    let mut incompatible: Vec<(Attribute, Attribute)> = Vec::new();
    let mut attributes = left.attributes().to_vec();

    for attribute in right.attributes() {
        match left.attribute(&attribute.name) {
            Some(other) if other.attribute_type == attribute.attribute_type => {
                shared.push(attribute.name.clone())
            }
            Some(other) => incompatible.push((other.clone(), attribute.clone())),
            None => attributes.push(attribute.clone()),
        }
    }

    if !incompatible.is_empty() {
        return Err(QueryError::IncompatibleAttributes(incompatible));
    }

    Ok((Header::new(attributes)?, shared))
}
