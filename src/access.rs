//! Access layer for values and tuples.
//!
//! This module provides the in-memory data model relations are built from:
//!
//! - **Value**: Scalar attribute values and the operations defined on them
//! - **AttributeType**: Declared types values are checked against
//! - **Tuple**: A single row, mapping attribute names to values
//! - **Tuples**: Insertion-ordered, deduplicated row collections with set algebra

pub mod tuple;
pub mod tuples;
pub mod value;

pub use tuple::Tuple;
pub use tuples::Tuples;
pub use value::{AttributeType, RoundingRule, Value, ValueError, ValueResult, ValueType};
