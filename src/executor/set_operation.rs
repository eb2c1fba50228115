//! Union, intersection and difference of union-compatible relations.

use crate::executor::{execute, Executor, QueryError, QueryResult, Resolved};
use crate::query::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperation {
    Union,
    Intersection,
    Difference,
}

/// Executor for the set operations.
///
/// Both inputs must have exactly the same header: same attributes with the
/// same types, in the same order.
pub struct SetOperationExecutor<'a> {
    operation: SetOperation,
    left: &'a Query,
    right: &'a Query,
}

impl<'a> SetOperationExecutor<'a> {
    pub fn new(operation: SetOperation, left: &'a Query, right: &'a Query) -> Self {
        Self {
            operation,
            left,
            right,
        }
    }
}

impl Executor for SetOperationExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let left = execute(self.left)?;
        let right = execute(self.right)?;

        if left.header != right.header {
            return Err(QueryError::NotUnionCompatible(
                left.header.attributes().to_vec(),
                right.header.attributes().to_vec(),
            ));
        }

        let tuples = match self.operation {
            SetOperation::Union => left.tuples.union(&right.tuples),
            SetOperation::Intersection => left.tuples.intersection(&right.tuples),
            SetOperation::Difference => left.tuples.difference(&right.tuples),
        };

        Ok(Resolved::new(left.header, tuples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Value, ValueType};
    use crate::catalog::Attribute;
    use crate::executor::fixtures::numbers;
    use crate::relation::Relation;
    use anyhow::Result;

    fn run(operation: SetOperation, left: &Relation, right: &Relation) -> QueryResult<Resolved> {
        SetOperationExecutor::new(operation, &left.query(), &right.query()).execute()
    }

    fn sorted_values(resolved: &Resolved) -> Vec<i64> {
        let mut values: Vec<i64> = resolved
            .tuples
            .iter()
            .filter_map(|t| match t.get("n") {
                Some(Value::Integer(i)) => Some(*i),
                _ => None,
            })
            .collect();
        values.sort();
        values
    }

    #[test]
    fn test_union() -> Result<()> {
        let resolved = run(
            SetOperation::Union,
            &numbers("n", &[1, 2, 3]),
            &numbers("n", &[3, 4]),
        )?;
        assert_eq!(sorted_values(&resolved), vec![1, 2, 3, 4]);
        Ok(())
    }

    #[test]
    fn test_intersection() -> Result<()> {
        let resolved = run(
            SetOperation::Intersection,
            &numbers("n", &[1, 2, 3]),
            &numbers("n", &[3, 2, 7]),
        )?;
        assert_eq!(sorted_values(&resolved), vec![2, 3]);
        Ok(())
    }

    #[test]
    fn test_difference() -> Result<()> {
        let resolved = run(
            SetOperation::Difference,
            &numbers("n", &[1, 2, 3]),
            &numbers("n", &[3, 4]),
        )?;
        assert_eq!(sorted_values(&resolved), vec![1, 2]);
        Ok(())
    }

    #[test]
    fn test_not_union_compatible() {
        let left = numbers("n", &[1]);

        // Different name
        let right = numbers("m", &[1]);
        assert_eq!(
            run(SetOperation::Union, &left, &right),
            Err(QueryError::NotUnionCompatible(
                vec![Attribute::required("n", ValueType::Integer)],
                vec![Attribute::required("m", ValueType::Integer)],
            ))
        );

        // Same name, optional type
        let right = Relation::new(
            vec![Attribute::optional("n", ValueType::Integer)],
            vec![vec![Value::Integer(1)]],
        );
        assert!(matches!(
            run(SetOperation::Difference, &left, &right),
            Err(QueryError::NotUnionCompatible(..))
        ));
    }

    #[test]
    fn test_attribute_order_matters() {
        let ab = Relation::new(
            vec![
                Attribute::required("a", ValueType::Integer),
                Attribute::required("b", ValueType::Integer),
            ],
            vec![vec![Value::Integer(1), Value::Integer(2)]],
        );
        let ba = Relation::new(
            vec![
                Attribute::required("b", ValueType::Integer),
                Attribute::required("a", ValueType::Integer),
            ],
            vec![vec![Value::Integer(2), Value::Integer(1)]],
        );
        assert!(matches!(
            run(SetOperation::Intersection, &ab, &ba),
            Err(QueryError::NotUnionCompatible(..))
        ));
    }
}
