//! Expression evaluation implementation.

use crate::access::{Tuple, Value, ValueError, ValueType};
use crate::expression::{
    Expression, Member, NumericExpression, Predicate, PredicateError, PredicateResult,
    StringExpression,
};
use std::collections::{BTreeMap, HashMap};

/// Attribute values an expression is evaluated against
pub trait Context {
    /// Look up an attribute; `None` means the context has no such attribute
    /// at all, which is different from holding the absent value
    fn value(&self, name: &str) -> Option<&Value>;
}

impl Context for Tuple {
    fn value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Context for BTreeMap<String, Value> {
    fn value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl Context for HashMap<String, Value> {
    fn value(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Evaluator for expressions
pub struct ExpressionEvaluator<'a, C: Context + ?Sized> {
    /// The row values to evaluate against
    context: &'a C,
}

impl<'a, C: Context + ?Sized> ExpressionEvaluator<'a, C> {
    pub fn new(context: &'a C) -> Self {
        Self { context }
    }

    /// Evaluate an expression of any family
    pub fn evaluate(&self, expr: &Expression) -> PredicateResult<Value> {
        match expr {
            Expression::Member(member) => self.evaluate_member(member),
            Expression::Boolean(predicate) => {
                self.evaluate_predicate(predicate).map(Value::Boolean)
            }
            Expression::Numeric(numeric) => self.evaluate_numeric(numeric),
            Expression::String(string) => self.evaluate_string(string),
        }
    }

    pub fn evaluate_member(&self, member: &Member) -> PredicateResult<Value> {
        match member {
            Member::Literal(value) => Ok(value.clone()),
            Member::Attribute(name) => self
                .context
                .value(name)
                .cloned()
                .ok_or_else(|| PredicateError::UnknownAttribute(name.clone())),
        }
    }

    pub fn evaluate_numeric(&self, expr: &NumericExpression) -> PredicateResult<Value> {
        match expr {
            NumericExpression::Member(member) => self.evaluate_member(member),
            NumericExpression::Arithmetic { op, left, right } => {
                let left_val = self.evaluate_numeric(left)?;
                let right_val = self.evaluate_numeric(right)?;
                Ok(op.apply(&left_val, &right_val)?)
            }
            NumericExpression::Rounded { rule, operand } => {
                Ok(self.evaluate_numeric(operand)?.rounded(*rule)?)
            }
            NumericExpression::Length(operand) => Ok(self.evaluate_string(operand)?.length()?),
        }
    }

    pub fn evaluate_string(&self, expr: &StringExpression) -> PredicateResult<Value> {
        match expr {
            StringExpression::Member(member) => self.evaluate_member(member),
            StringExpression::Lowercased(operand) => {
                Ok(self.evaluate_string(operand)?.lowercased()?)
            }
            StringExpression::Uppercased(operand) => {
                Ok(self.evaluate_string(operand)?.uppercased()?)
            }
            StringExpression::Concat(left, right) => {
                let left_val = self.evaluate_string(left)?;
                let right_val = self.evaluate_string(right)?;
                Ok(left_val.concat(&right_val)?)
            }
        }
    }

    /// Evaluate a predicate to a boolean.
    ///
    /// Both sides of `And`/`Or` are always evaluated, so an error on either
    /// side surfaces even when the other side already decides the result.
    pub fn evaluate_predicate(&self, predicate: &Predicate) -> PredicateResult<bool> {
        match predicate {
            Predicate::Member(member) => {
                let value = self.evaluate_member(member)?;
                as_bool(value)
            }
            Predicate::Comparison { op, left, right } => {
                let left_val = self.evaluate(left)?;
                let right_val = self.evaluate(right)?;
                Ok(op.apply(&left_val, &right_val)?)
            }
            Predicate::And(left, right) => {
                let left_val = self.evaluate_predicate(left)?;
                let right_val = self.evaluate_predicate(right)?;
                Ok(left_val && right_val)
            }
            Predicate::Or(left, right) => {
                let left_val = self.evaluate_predicate(left)?;
                let right_val = self.evaluate_predicate(right)?;
                Ok(left_val || right_val)
            }
            Predicate::Not(operand) => Ok(!self.evaluate_predicate(operand)?),
        }
    }
}

/// An absent boolean does not satisfy a predicate
fn as_bool(value: Value) -> PredicateResult<bool> {
    match value {
        Value::Boolean(b) => Ok(b),
        Value::Null => Ok(false),
        other => Err(ValueError::Mismatch {
            values: vec![other],
            expected: vec![ValueType::Boolean],
        }
        .into()),
    }
}

/// Helper function to evaluate an expression against a context
pub fn evaluate_expression<C: Context + ?Sized>(
    expr: &Expression,
    context: &C,
) -> PredicateResult<Value> {
    ExpressionEvaluator::new(context).evaluate(expr)
}

/// Helper function to evaluate a predicate against a context
pub fn evaluate_predicate<C: Context + ?Sized>(
    predicate: &Predicate,
    context: &C,
) -> PredicateResult<bool> {
    ExpressionEvaluator::new(context).evaluate_predicate(predicate)
}
