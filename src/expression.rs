//! Expression evaluation framework for query execution.
//!
//! This module provides:
//! - Expression and predicate trees (member, numeric, string, boolean families)
//! - Static collection of the attribute names an expression reads
//! - Evaluation of expressions against a row's attribute values

pub mod error;
pub mod eval;
pub mod expr;
pub mod operator;

pub use error::{PredicateError, PredicateResult};
pub use eval::{evaluate_expression, evaluate_predicate, Context, ExpressionEvaluator};
pub use expr::{Expression, Member, NumericExpression, Predicate, StringExpression};
pub use operator::{ArithmeticOperator, ComparisonOperator};
