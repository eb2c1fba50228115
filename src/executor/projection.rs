//! Projection executor implementation.
//!
//! This executor restricts its input to a list of attributes, in the order
//! requested. Tuples that become equal after projection collapse into one.

use crate::catalog::Header;
use crate::executor::{ensure_attributes, execute, Executor, QueryResult, Resolved};
use crate::query::Query;

/// Executor that keeps only the requested attributes
pub struct ProjectionExecutor<'a> {
    /// Attribute names to keep, in output order
    attributes: &'a [String],
    /// Input query
    input: &'a Query,
}

impl<'a> ProjectionExecutor<'a> {
    /// Create a new projection executor
    ///
    /// # Example
    /// ```ignore
    /// // If the input has attributes [id, name, age, hobby]
    /// // attributes ["age", "id"] would produce [age, id]
    /// ```
    pub fn new(attributes: &'a [String], input: &'a Query) -> Self {
        Self { attributes, input }
    }
}

impl Executor for ProjectionExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let input = execute(self.input)?;

        // Report every unknown name at once
        ensure_attributes(&input.header, self.attributes)?;

        let header = Header::new(
            self.attributes
                .iter()
                .filter_map(|name| input.header.attribute(name).cloned())
                .collect(),
        )?;

        let tuples = input
            .tuples
            .iter()
            .map(|tuple| tuple.project(self.attributes))
            .collect();

        Ok(Resolved::new(header, tuples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Value, ValueType};
    use crate::catalog::{Attribute, HeaderError};
    use crate::executor::fixtures::students;
    use crate::executor::QueryError;
    use anyhow::Result;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_projection_basic() -> Result<()> {
        let attributes = names(&["id", "name"]);
        let input = students().query();
        let resolved = ProjectionExecutor::new(&attributes, &input).execute()?;

        assert_eq!(
            resolved.header.attributes(),
            &[
                Attribute::required("id", ValueType::Integer),
                Attribute::required("name", ValueType::String),
            ]
        );

        let rows: Vec<_> = resolved
            .tuples
            .iter()
            .map(|t| (t.get("id").cloned(), t.get("name").cloned()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (Some(Value::Integer(1)), Some(Value::string("Alice"))),
                (Some(Value::Integer(2)), Some(Value::string("Bob"))),
                (Some(Value::Integer(3)), Some(Value::string("Carol"))),
            ]
        );
        assert!(resolved.tuples.iter().all(|t| t.len() == 2));
        Ok(())
    }

    #[test]
    fn test_projection_reordering() -> Result<()> {
        let attributes = names(&["hobby", "id"]);
        let input = students().query();
        let resolved = ProjectionExecutor::new(&attributes, &input).execute()?;
        assert_eq!(resolved.header.names(), vec!["hobby", "id"]);
        assert!(resolved.header.attribute("hobby").unwrap().attribute_type.is_optional());
        Ok(())
    }

    #[test]
    fn test_projection_collapses_duplicates() -> Result<()> {
        // Alice and Carol both have no hobby
        let attributes = names(&["hobby"]);
        let input = students().query();
        let resolved = ProjectionExecutor::new(&attributes, &input).execute()?;
        assert_eq!(resolved.tuples.len(), 2);
        Ok(())
    }

    #[test]
    fn test_projection_reports_all_unknown() {
        let attributes = names(&["id", "email", "name", "zip"]);
        let input = students().query();
        assert_eq!(
            ProjectionExecutor::new(&attributes, &input).execute(),
            Err(QueryError::UnknownAttributes(names(&["email", "zip"])))
        );
    }

    #[test]
    fn test_projection_header_errors() {
        let input = students().query();

        let empty: Vec<String> = vec![];
        assert_eq!(
            ProjectionExecutor::new(&empty, &input).execute(),
            Err(QueryError::Header(HeaderError::Empty))
        );

        let repeated = names(&["id", "id"]);
        assert_eq!(
            ProjectionExecutor::new(&repeated, &input).execute(),
            Err(QueryError::Header(HeaderError::Duplicates(names(&["id"]))))
        );
    }
}
