//! Attribute (column) metadata.

use crate::access::{AttributeType, ValueType};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub attribute_type: AttributeType,
}

impl Attribute {
    pub fn new(name: impl Into<String>, attribute_type: AttributeType) -> Self {
        Self {
            name: name.into(),
            attribute_type,
        }
    }

    pub fn required(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(name, AttributeType::Required(value_type))
    }

    pub fn optional(name: impl Into<String>, value_type: ValueType) -> Self {
        Self::new(name, AttributeType::Optional(value_type))
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.attribute_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_creation() {
        let id = Attribute::required("id", ValueType::Integer);
        assert_eq!(id.name, "id");
        assert_eq!(id.attribute_type, AttributeType::Required(ValueType::Integer));
        assert_eq!(id.to_string(), "id: int");

        let hobby = Attribute::optional("hobby", ValueType::String);
        assert!(hobby.attribute_type.is_optional());
        assert_eq!(hobby.to_string(), "hobby: string?");
    }
}
