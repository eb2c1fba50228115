use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Scalar types an attribute can be declared with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Boolean,
    String,
    Integer,
    Float,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Boolean => "bool",
            ValueType::String => "string",
            ValueType::Integer => "int",
            ValueType::Float => "float",
        };
        f.write_str(name)
    }
}

/// Declared type of an attribute: a value type that may or may not be absent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    Required(ValueType),
    Optional(ValueType),
}

impl AttributeType {
    pub fn value_type(&self) -> ValueType {
        match self {
            AttributeType::Required(t) | AttributeType::Optional(t) => *t,
        }
    }

    pub fn is_optional(&self) -> bool {
        matches!(self, AttributeType::Optional(_))
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeType::Required(t) => write!(f, "{}", t),
            AttributeType::Optional(t) => write!(f, "{}?", t),
        }
    }
}

/// Rounding rules accepted by [`Value::rounded`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingRule {
    ToNearestOrAwayFromZero,
    ToNearestOrEven,
    Up,
    Down,
    TowardZero,
    AwayFromZero,
}

impl RoundingRule {
    fn apply(self, x: f64) -> f64 {
        match self {
            RoundingRule::ToNearestOrAwayFromZero => x.round(),
            RoundingRule::ToNearestOrEven => x.round_ties_even(),
            RoundingRule::Up => x.ceil(),
            RoundingRule::Down => x.floor(),
            RoundingRule::TowardZero => x.trunc(),
            RoundingRule::AwayFromZero => {
                if x.is_sign_negative() {
                    x.floor()
                } else {
                    x.ceil()
                }
            }
        }
    }
}

/// Errors raised by operations on values
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValueError {
    #[error("Value mismatch: {values:?} do not match expected types {expected:?}")]
    Mismatch {
        values: Vec<Value>,
        expected: Vec<ValueType>,
    },

    #[error("Incompatible values: cannot compare {0} with {1}")]
    Incompatible(Value, Value),

    #[error("Division by zero")]
    DivisionByZero,
}

pub type ValueResult<T> = Result<T, ValueError>;

/// A single attribute value. `Null` is the absent value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    String(String),
    Integer(i64),
    Float(f64),
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Get the type of this value, `None` for the absent value
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Boolean(_) => Some(ValueType::Boolean),
            Value::String(_) => Some(ValueType::String),
            Value::Integer(_) => Some(ValueType::Integer),
            Value::Float(_) => Some(ValueType::Float),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value can be stored under the given attribute type
    pub fn matches(&self, attribute_type: &AttributeType) -> bool {
        match (self.value_type(), attribute_type) {
            (None, AttributeType::Optional(_)) => true,
            (None, AttributeType::Required(_)) => false,
            (Some(actual), declared) => actual == declared.value_type(),
        }
    }

    pub fn add(&self, other: &Value) -> ValueResult<Value> {
        self.arithmetic(other, |a, b| Ok(a.wrapping_add(b)), |a, b| a + b)
    }

    pub fn subtract(&self, other: &Value) -> ValueResult<Value> {
        self.arithmetic(other, |a, b| Ok(a.wrapping_sub(b)), |a, b| a - b)
    }

    pub fn multiply(&self, other: &Value) -> ValueResult<Value> {
        self.arithmetic(other, |a, b| Ok(a.wrapping_mul(b)), |a, b| a * b)
    }

    pub fn divide(&self, other: &Value) -> ValueResult<Value> {
        self.arithmetic(
            other,
            |a, b| {
                if b == 0 {
                    Err(ValueError::DivisionByZero)
                } else {
                    Ok(a.wrapping_div(b))
                }
            },
            |a, b| a / b,
        )
    }

    pub fn remainder(&self, other: &Value) -> ValueResult<Value> {
        self.arithmetic(
            other,
            |a, b| {
                if b == 0 {
                    Err(ValueError::DivisionByZero)
                } else {
                    Ok(a.wrapping_rem(b))
                }
            },
            |a, b| a % b,
        )
    }

    fn arithmetic(
        &self,
        other: &Value,
        int_op: impl FnOnce(i64, i64) -> ValueResult<i64>,
        float_op: impl FnOnce(f64, f64) -> f64,
    ) -> ValueResult<Value> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => int_op(*a, *b).map(Value::Integer),
            (Value::Float(a), Value::Float(b)) => Ok(Value::Float(float_op(*a, *b))),
            // Absent short-circuits as long as the other side is numeric
            (Value::Null, Value::Null | Value::Integer(_) | Value::Float(_))
            | (Value::Integer(_) | Value::Float(_), Value::Null) => Ok(Value::Null),
            _ => Err(ValueError::Mismatch {
                values: vec![self.clone(), other.clone()],
                expected: vec![ValueType::Integer, ValueType::Float],
            }),
        }
    }

    /// Total order between two values of the same type.
    ///
    /// The absent value orders below every present value. Values of different
    /// types, integers and floats included, are incompatible.
    pub fn compare(&self, other: &Value) -> ValueResult<Ordering> {
        let ordering = match (self, other) {
            (Value::Null, Value::Null) => Some(Ordering::Equal),
            (Value::Null, _) => Some(Ordering::Less),
            (_, Value::Null) => Some(Ordering::Greater),
            (Value::Boolean(a), Value::Boolean(b)) => Some(a.cmp(b)),
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        };
        ordering.ok_or_else(|| ValueError::Incompatible(self.clone(), other.clone()))
    }

    pub fn length(&self) -> ValueResult<Value> {
        match self {
            Value::String(s) => Ok(Value::Integer(s.chars().count() as i64)),
            Value::Null => Ok(Value::Null),
            _ => Err(self.string_mismatch()),
        }
    }

    pub fn lowercased(&self) -> ValueResult<Value> {
        match self {
            Value::String(s) => Ok(Value::String(s.to_lowercase())),
            Value::Null => Ok(Value::Null),
            _ => Err(self.string_mismatch()),
        }
    }

    pub fn uppercased(&self) -> ValueResult<Value> {
        match self {
            Value::String(s) => Ok(Value::String(s.to_uppercase())),
            Value::Null => Ok(Value::Null),
            _ => Err(self.string_mismatch()),
        }
    }

    pub fn concat(&self, other: &Value) -> ValueResult<Value> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{}{}", a, b))),
            (Value::Null, Value::Null | Value::String(_)) | (Value::String(_), Value::Null) => {
                Ok(Value::Null)
            }
            _ => Err(ValueError::Mismatch {
                values: vec![self.clone(), other.clone()],
                expected: vec![ValueType::String, ValueType::String],
            }),
        }
    }

    pub fn rounded(&self, rule: RoundingRule) -> ValueResult<Value> {
        match self {
            Value::Float(x) => Ok(Value::Float(rule.apply(*x))),
            Value::Null => Ok(Value::Null),
            _ => Err(ValueError::Mismatch {
                values: vec![self.clone()],
                expected: vec![ValueType::Float],
            }),
        }
    }

    fn string_mismatch(&self) -> ValueError {
        ValueError::Mismatch {
            values: vec![self.clone()],
            expected: vec![ValueType::String],
        }
    }
}

/// Bits identifying a float for equality and hashing: zeros of either sign
/// share one key, as do all NaNs.
fn float_key(x: f64) -> u64 {
    if x == 0.0 {
        0.0f64.to_bits()
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

// Equality agrees with `compare` wherever `compare` succeeds. NaN equals
// itself so values can be stored in hashed collections.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => float_key(*a) == float_key(*b),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Boolean(b) => b.hash(state),
            Value::String(s) => s.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Float(x) => float_key(*x).hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{:?}", x),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
