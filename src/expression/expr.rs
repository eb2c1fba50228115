//! Expression and predicate trees.
//!
//! Expressions come in families (numeric, string, boolean) that all bottom
//! out in a [`Member`]: either a reference to an attribute of the row being
//! evaluated or a literal value. [`Predicate`] is the boolean family and is
//! what selections and theta joins take.

use crate::access::{RoundingRule, Value};
use crate::expression::operator::{ArithmeticOperator, ComparisonOperator};
use std::collections::BTreeSet;
use std::fmt;

/// Leaf of every expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Attribute(String),
    Literal(Value),
}

impl Member {
    pub fn attribute(name: impl Into<String>) -> Self {
        Member::Attribute(name.into())
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        Member::Literal(value.into())
    }

    pub fn attributes(&self) -> BTreeSet<String> {
        match self {
            Member::Attribute(name) => BTreeSet::from([name.clone()]),
            Member::Literal(_) => BTreeSet::new(),
        }
    }
}

/// Expressions producing integers or floats
#[derive(Debug, Clone, PartialEq)]
pub enum NumericExpression {
    Member(Member),

    Arithmetic {
        op: ArithmeticOperator,
        left: Box<NumericExpression>,
        right: Box<NumericExpression>,
    },

    Rounded {
        rule: RoundingRule,
        operand: Box<NumericExpression>,
    },

    /// Character count of a string
    Length(Box<StringExpression>),
}

impl NumericExpression {
    pub fn attribute(name: impl Into<String>) -> Self {
        NumericExpression::Member(Member::attribute(name))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        NumericExpression::Member(Member::literal(value))
    }

    pub fn arithmetic(
        op: ArithmeticOperator,
        left: NumericExpression,
        right: NumericExpression,
    ) -> Self {
        NumericExpression::Arithmetic {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn add_expr(left: NumericExpression, right: NumericExpression) -> Self {
        Self::arithmetic(ArithmeticOperator::Add, left, right)
    }

    pub fn sub_expr(left: NumericExpression, right: NumericExpression) -> Self {
        Self::arithmetic(ArithmeticOperator::Sub, left, right)
    }

    pub fn mul_expr(left: NumericExpression, right: NumericExpression) -> Self {
        Self::arithmetic(ArithmeticOperator::Mul, left, right)
    }

    pub fn div_expr(left: NumericExpression, right: NumericExpression) -> Self {
        Self::arithmetic(ArithmeticOperator::Div, left, right)
    }

    pub fn rem_expr(left: NumericExpression, right: NumericExpression) -> Self {
        Self::arithmetic(ArithmeticOperator::Rem, left, right)
    }

    pub fn rounded(operand: NumericExpression, rule: RoundingRule) -> Self {
        NumericExpression::Rounded {
            rule,
            operand: Box::new(operand),
        }
    }

    pub fn length(operand: StringExpression) -> Self {
        NumericExpression::Length(Box::new(operand))
    }

    pub fn attributes(&self) -> BTreeSet<String> {
        match self {
            NumericExpression::Member(member) => member.attributes(),
            NumericExpression::Arithmetic { left, right, .. } => {
                let mut names = left.attributes();
                names.extend(right.attributes());
                names
            }
            NumericExpression::Rounded { operand, .. } => operand.attributes(),
            NumericExpression::Length(operand) => operand.attributes(),
        }
    }
}

/// Expressions producing strings
#[derive(Debug, Clone, PartialEq)]
pub enum StringExpression {
    Member(Member),
    Lowercased(Box<StringExpression>),
    Uppercased(Box<StringExpression>),
    Concat(Box<StringExpression>, Box<StringExpression>),
}

impl StringExpression {
    pub fn attribute(name: impl Into<String>) -> Self {
        StringExpression::Member(Member::attribute(name))
    }

    pub fn literal(value: impl Into<Value>) -> Self {
        StringExpression::Member(Member::literal(value))
    }

    pub fn lowercased(operand: StringExpression) -> Self {
        StringExpression::Lowercased(Box::new(operand))
    }

    pub fn uppercased(operand: StringExpression) -> Self {
        StringExpression::Uppercased(Box::new(operand))
    }

    pub fn concat(left: StringExpression, right: StringExpression) -> Self {
        StringExpression::Concat(Box::new(left), Box::new(right))
    }

    pub fn attributes(&self) -> BTreeSet<String> {
        match self {
            StringExpression::Member(member) => member.attributes(),
            StringExpression::Lowercased(operand) | StringExpression::Uppercased(operand) => {
                operand.attributes()
            }
            StringExpression::Concat(left, right) => {
                let mut names = left.attributes();
                names.extend(right.attributes());
                names
            }
        }
    }
}

/// Boolean expression tree used for selections and theta joins
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// A boolean attribute or literal
    Member(Member),

    Comparison {
        op: ComparisonOperator,
        left: Expression,
        right: Expression,
    },

    And(Box<Predicate>, Box<Predicate>),

    Or(Box<Predicate>, Box<Predicate>),

    Not(Box<Predicate>),
}

impl Predicate {
    pub fn attribute(name: impl Into<String>) -> Self {
        Predicate::Member(Member::attribute(name))
    }

    pub fn literal(value: bool) -> Self {
        Predicate::Member(Member::literal(value))
    }

    pub fn comparison(
        op: ComparisonOperator,
        left: impl Into<Expression>,
        right: impl Into<Expression>,
    ) -> Self {
        Predicate::Comparison {
            op,
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create an equality predicate
    pub fn eq(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::comparison(ComparisonOperator::Eq, left, right)
    }

    /// Create a not-equal predicate
    pub fn ne(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::comparison(ComparisonOperator::Ne, left, right)
    }

    /// Create a less-than predicate
    pub fn lt(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::comparison(ComparisonOperator::Lt, left, right)
    }

    /// Create a less-than-or-equal predicate
    pub fn le(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::comparison(ComparisonOperator::Le, left, right)
    }

    /// Create a greater-than predicate
    pub fn gt(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::comparison(ComparisonOperator::Gt, left, right)
    }

    /// Create a greater-than-or-equal predicate
    pub fn ge(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::comparison(ComparisonOperator::Ge, left, right)
    }

    pub fn and(left: Predicate, right: Predicate) -> Self {
        Predicate::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Predicate, right: Predicate) -> Self {
        Predicate::Or(Box::new(left), Box::new(right))
    }

    pub fn not_expr(operand: Predicate) -> Self {
        Predicate::Not(Box::new(operand))
    }

    /// Every attribute name this predicate reads, transitively
    pub fn attributes(&self) -> BTreeSet<String> {
        match self {
            Predicate::Member(member) => member.attributes(),
            Predicate::Comparison { left, right, .. } => {
                let mut names = left.attributes();
                names.extend(right.attributes());
                names
            }
            Predicate::And(left, right) | Predicate::Or(left, right) => {
                let mut names = left.attributes();
                names.extend(right.attributes());
                names
            }
            Predicate::Not(operand) => operand.attributes(),
        }
    }
}

/// An expression of any family
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Member(Member),
    Boolean(Box<Predicate>),
    Numeric(NumericExpression),
    String(StringExpression),
}

impl Expression {
    /// Create an attribute reference expression
    pub fn attribute(name: impl Into<String>) -> Self {
        Expression::Member(Member::attribute(name))
    }

    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        Expression::Member(Member::literal(value))
    }

    pub fn attributes(&self) -> BTreeSet<String> {
        match self {
            Expression::Member(member) => member.attributes(),
            Expression::Boolean(predicate) => predicate.attributes(),
            Expression::Numeric(numeric) => numeric.attributes(),
            Expression::String(string) => string.attributes(),
        }
    }
}

impl From<Member> for Expression {
    fn from(member: Member) -> Self {
        Expression::Member(member)
    }
}

impl From<Value> for Expression {
    fn from(value: Value) -> Self {
        Expression::Member(Member::Literal(value))
    }
}

impl From<Predicate> for Expression {
    fn from(predicate: Predicate) -> Self {
        Expression::Boolean(Box::new(predicate))
    }
}

impl From<NumericExpression> for Expression {
    fn from(numeric: NumericExpression) -> Self {
        Expression::Numeric(numeric)
    }
}

impl From<StringExpression> for Expression {
    fn from(string: StringExpression) -> Self {
        Expression::String(string)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Attribute(name) => f.write_str(name),
            Member::Literal(value) => write!(f, "{}", value),
        }
    }
}

impl fmt::Display for NumericExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericExpression::Member(member) => write!(f, "{}", member),
            NumericExpression::Arithmetic { op, left, right } => {
                write!(f, "({} {} {})", left, op, right)
            }
            NumericExpression::Rounded { rule, operand } => {
                write!(f, "rounded({}, {:?})", operand, rule)
            }
            NumericExpression::Length(operand) => write!(f, "length({})", operand),
        }
    }
}

impl fmt::Display for StringExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StringExpression::Member(member) => write!(f, "{}", member),
            StringExpression::Lowercased(operand) => write!(f, "lowercased({})", operand),
            StringExpression::Uppercased(operand) => write!(f, "uppercased({})", operand),
            StringExpression::Concat(left, right) => write!(f, "concat({}, {})", left, right),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Member(member) => write!(f, "{}", member),
            Predicate::Comparison { op, left, right } => write!(f, "{} {} {}", left, op, right),
            Predicate::And(left, right) => write!(f, "({} && {})", left, right),
            Predicate::Or(left, right) => write!(f, "({} || {})", left, right),
            Predicate::Not(operand) => write!(f, "!{}", operand),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Member(member) => write!(f, "{}", member),
            Expression::Boolean(predicate) => write!(f, "({})", predicate),
            Expression::Numeric(numeric) => write!(f, "{}", numeric),
            Expression::String(string) => write!(f, "{}", string),
        }
    }
}
