//! Rename executor implementation.

use crate::catalog::{Attribute, Header};
use crate::executor::{ensure_attributes, execute, Executor, QueryResult, Resolved};
use crate::query::Query;
use std::slice;

/// Executor that renames one attribute, keeping its position in the header
pub struct RenameExecutor<'a> {
    new_name: &'a String,
    old_name: &'a String,
    input: &'a Query,
}

impl<'a> RenameExecutor<'a> {
    pub fn new(new_name: &'a String, old_name: &'a String, input: &'a Query) -> Self {
        Self {
            new_name,
            old_name,
            input,
        }
    }
}

impl Executor for RenameExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let input = execute(self.input)?;

        ensure_attributes(&input.header, slice::from_ref(self.old_name))?;
        if self.new_name == self.old_name {
            return Ok(input);
        }

        // A clash with another attribute surfaces as a duplicate-name error
        let header = Header::new(
            input
                .header
                .attributes()
                .iter()
                .map(|attribute| {
                    if &attribute.name == self.old_name {
                        Attribute::new(self.new_name.clone(), attribute.attribute_type)
                    } else {
                        attribute.clone()
                    }
                })
                .collect(),
        )?;

        let tuples = input
            .tuples
            .iter()
            .map(|tuple| tuple.renamed(self.old_name, self.new_name))
            .collect();

        Ok(Resolved::new(header, tuples))
    }
}
