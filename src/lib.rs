pub mod access;
pub mod catalog;
pub mod executor;
pub mod expression;
pub mod query;
pub mod relation;

pub use access::{AttributeType, RoundingRule, Tuple, Tuples, Value, ValueError, ValueType};
pub use catalog::{Attribute, Header, HeaderError};
pub use executor::{execute, QueryError, Resolved};
pub use expression::{Expression, NumericExpression, Predicate, PredicateError, StringExpression};
pub use query::{JoinKind, Query, SemiJoinKind, SortOrder};
pub use relation::{Relation, RelationError, RelationResult};
