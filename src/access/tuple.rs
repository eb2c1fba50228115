use crate::access::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A single row: attribute name -> value.
///
/// A tuple carries no schema of its own. Conformance to a header is checked
/// by whoever builds the tuples of a relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Tuple {
    values: BTreeMap<String, Value>,
}

impl Tuple {
    pub fn new<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Combine two rows; values of `self` win when both have a name
    pub fn merge(&self, other: &Tuple) -> Tuple {
        let mut values = other.values.clone();
        for (name, value) in &self.values {
            values.insert(name.clone(), value.clone());
        }
        Tuple { values }
    }

    /// Keep only `names`; names the row lacks become `Null`
    pub fn project(&self, names: &[String]) -> Tuple {
        Tuple {
            values: names
                .iter()
                .map(|name| {
                    let value = self.values.get(name).cloned().unwrap_or(Value::Null);
                    (name.clone(), value)
                })
                .collect(),
        }
    }

    /// Move the value stored under `old` to `new`
    pub fn renamed(&self, old: &str, new: &str) -> Tuple {
        let mut values = self.values.clone();
        if let Some(value) = values.remove(old) {
            values.insert(new.to_string(), value);
        }
        Tuple { values }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Tuple {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Tuple::new(iter)
    }
}

impl From<BTreeMap<String, Value>> for Tuple {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self { values }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Tuple {
        Tuple::new([
            ("id", Value::Integer(1)),
            ("name", Value::string("Alice")),
            ("hobby", Value::Null),
        ])
    }

    #[test]
    fn test_tuple_access() {
        let tuple = alice();
        assert_eq!(tuple.len(), 3);
        assert_eq!(tuple.get("name"), Some(&Value::string("Alice")));
        assert_eq!(tuple.get("hobby"), Some(&Value::Null));
        assert!(tuple.get("age").is_none());
        assert_eq!(
            tuple.to_string(),
            "(hobby: null, id: 1, name: \"Alice\")"
        );
    }

    #[test]
    fn test_tuple_equality_is_structural() {
        let reordered = Tuple::new([
            ("hobby", Value::Null),
            ("name", Value::string("Alice")),
            ("id", Value::Integer(1)),
        ]);
        assert_eq!(alice(), reordered);
        assert_ne!(alice(), alice().renamed("id", "identifier"));
    }

    #[test]
    fn test_tuple_project() {
        let projected = alice().project(&["name".to_string(), "age".to_string()]);
        assert_eq!(
            projected,
            Tuple::new([("name", Value::string("Alice")), ("age", Value::Null)])
        );
    }

    #[test]
    fn test_tuple_merge_left_wins() {
        let left = Tuple::new([("id", Value::Integer(1)), ("x", Value::Integer(10))]);
        let right = Tuple::new([("id", Value::Integer(2)), ("y", Value::Integer(20))]);
        let merged = left.merge(&right);
        assert_eq!(merged.get("id"), Some(&Value::Integer(1)));
        assert_eq!(merged.get("y"), Some(&Value::Integer(20)));
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_tuple_renamed() {
        let renamed = alice().renamed("id", "identifier");
        assert!(!renamed.contains("id"));
        assert_eq!(renamed.get("identifier"), Some(&Value::Integer(1)));
    }
}
