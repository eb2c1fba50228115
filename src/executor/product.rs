//! Cartesian product executor implementation.

use crate::access::Tuples;
use crate::catalog::Header;
use crate::executor::{execute, Executor, QueryError, QueryResult, Resolved};
use crate::query::Query;

/// Executor pairing every left tuple with every right tuple.
///
/// The two headers must not share any attribute name.
pub struct ProductExecutor<'a> {
    left: &'a Query,
    right: &'a Query,
}

impl<'a> ProductExecutor<'a> {
    pub fn new(left: &'a Query, right: &'a Query) -> Self {
        Self { left, right }
    }
}

impl Executor for ProductExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let left = execute(self.left)?;
        let right = execute(self.right)?;

        let overlap_left: Vec<_> = left
            .header
            .attributes()
            .iter()
            .filter(|a| right.header.contains(&a.name))
            .cloned()
            .collect();
        if !overlap_left.is_empty() {
            let overlap_right = right
                .header
                .attributes()
                .iter()
                .filter(|a| left.header.contains(&a.name))
                .cloned()
                .collect();
            return Err(QueryError::NotDisjoint(overlap_left, overlap_right));
        }

        let header = Header::new(
            left.header
                .attributes()
                .iter()
                .chain(right.header.attributes())
                .cloned()
                .collect(),
        )?;

        let mut tuples = Tuples::new();
        for l in &left.tuples {
            for r in &right.tuples {
                tuples.insert(l.merge(r));
            }
        }

        Ok(Resolved::new(header, tuples))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::{Tuple, Value, ValueType};
    use crate::catalog::Attribute;
    use crate::executor::fixtures::{numbers, students};
    use anyhow::Result;

    #[test]
    fn test_product() -> Result<()> {
        let left = numbers("a", &[1, 2, 3]);
        let right = numbers("b", &[10, 20]);
        let resolved = ProductExecutor::new(&left.query(), &right.query()).execute()?;

        assert_eq!(resolved.header.names(), vec!["a", "b"]);
        assert_eq!(resolved.tuples.len(), 6);
        assert!(resolved.tuples.contains(&Tuple::new([
            ("a", Value::Integer(3)),
            ("b", Value::Integer(20))
        ])));
        Ok(())
    }

    #[test]
    fn test_product_with_empty() -> Result<()> {
        let left = numbers("a", &[1, 2, 3]);
        let right = numbers("b", &[]);
        let resolved = ProductExecutor::new(&left.query(), &right.query()).execute()?;
        assert!(resolved.tuples.is_empty());
        assert_eq!(resolved.header.len(), 2);
        Ok(())
    }

    #[test]
    fn test_product_not_disjoint() {
        let left = students();
        let right = numbers("id", &[1]);
        assert_eq!(
            ProductExecutor::new(&left.query(), &right.query()).execute(),
            Err(QueryError::NotDisjoint(
                vec![Attribute::required("id", ValueType::Integer)],
                vec![Attribute::required("id", ValueType::Integer)],
            ))
        );
    }
}
