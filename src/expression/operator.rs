//! Operator definitions for expressions.

use crate::access::{Value, ValueResult};
use std::cmp::Ordering;
use std::fmt;

/// Binary arithmetic operators over numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl ArithmeticOperator {
    pub fn apply(&self, left: &Value, right: &Value) -> ValueResult<Value> {
        match self {
            ArithmeticOperator::Add => left.add(right),
            ArithmeticOperator::Sub => left.subtract(right),
            ArithmeticOperator::Mul => left.multiply(right),
            ArithmeticOperator::Div => left.divide(right),
            ArithmeticOperator::Rem => left.remainder(right),
        }
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOperator::Add => "+",
            ArithmeticOperator::Sub => "-",
            ArithmeticOperator::Mul => "*",
            ArithmeticOperator::Div => "/",
            ArithmeticOperator::Rem => "%",
        }
    }
}

impl fmt::Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operators, producing booleans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOperator {
    pub fn apply(&self, left: &Value, right: &Value) -> ValueResult<bool> {
        let ordering = left.compare(right)?;
        Ok(match self {
            ComparisonOperator::Eq => ordering == Ordering::Equal,
            ComparisonOperator::Ne => ordering != Ordering::Equal,
            ComparisonOperator::Lt => ordering == Ordering::Less,
            ComparisonOperator::Le => ordering != Ordering::Greater,
            ComparisonOperator::Gt => ordering == Ordering::Greater,
            ComparisonOperator::Ge => ordering != Ordering::Less,
        })
    }

    /// Get the display string for this operator
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOperator::Eq => "==",
            ComparisonOperator::Ne => "!=",
            ComparisonOperator::Lt => "<",
            ComparisonOperator::Le => "<=",
            ComparisonOperator::Gt => ">",
            ComparisonOperator::Ge => ">=",
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::ValueError;

    #[test]
    fn test_arithmetic_apply() {
        let ten = Value::Integer(10);
        let four = Value::Integer(4);
        assert_eq!(ArithmeticOperator::Add.apply(&ten, &four), Ok(Value::Integer(14)));
        assert_eq!(ArithmeticOperator::Sub.apply(&ten, &four), Ok(Value::Integer(6)));
        assert_eq!(ArithmeticOperator::Mul.apply(&ten, &four), Ok(Value::Integer(40)));
        assert_eq!(ArithmeticOperator::Div.apply(&ten, &four), Ok(Value::Integer(2)));
        assert_eq!(ArithmeticOperator::Rem.apply(&ten, &four), Ok(Value::Integer(2)));
    }

    #[test]
    fn test_comparison_apply() {
        let one = Value::Integer(1);
        let two = Value::Integer(2);
        assert_eq!(ComparisonOperator::Lt.apply(&one, &two), Ok(true));
        assert_eq!(ComparisonOperator::Le.apply(&two, &two), Ok(true));
        assert_eq!(ComparisonOperator::Gt.apply(&one, &two), Ok(false));
        assert_eq!(ComparisonOperator::Ge.apply(&one, &two), Ok(false));
        assert_eq!(ComparisonOperator::Ne.apply(&one, &two), Ok(true));
        assert_eq!(ComparisonOperator::Eq.apply(&Value::Null, &Value::Null), Ok(true));
        assert_eq!(ComparisonOperator::Lt.apply(&Value::Null, &one), Ok(true));

        assert!(matches!(
            ComparisonOperator::Eq.apply(&one, &Value::Float(1.0)),
            Err(ValueError::Incompatible(..))
        ));
    }

    #[test]
    fn test_operator_display() {
        assert_eq!(ArithmeticOperator::Rem.as_str(), "%");
        assert_eq!(ComparisonOperator::Eq.as_str(), "==");
        assert_eq!(ComparisonOperator::Ge.as_str(), ">=");
        assert_eq!(ArithmeticOperator::Mul.to_string(), "*");
        assert_eq!(ComparisonOperator::Ne.to_string(), "!=");
    }
}
