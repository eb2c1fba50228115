//! Relation headers (schemas).

use crate::catalog::Attribute;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors raised when building a header.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    #[error("Header is empty: a relation needs at least one attribute")]
    Empty,

    #[error("Header has duplicate attribute names: {0:?}")]
    Duplicates(Vec<String>),
}

pub type HeaderResult<T> = Result<T, HeaderError>;

/// Ordered, non-empty list of uniquely named attributes.
#[derive(Debug, Clone)]
pub struct Header {
    attributes: Vec<Attribute>,
    /// Attribute name -> position in `attributes`
    positions: HashMap<String, usize>,
}

impl Header {
    /// Build a header, failing on an empty list or on repeated names.
    ///
    /// Every duplicated name is reported, each once, in the order it was
    /// first repeated.
    pub fn new(attributes: Vec<Attribute>) -> HeaderResult<Self> {
        if attributes.is_empty() {
            return Err(HeaderError::Empty);
        }

        let mut positions = HashMap::with_capacity(attributes.len());
        let mut duplicates = Vec::new();
        let mut reported = HashSet::new();
        for (i, attribute) in attributes.iter().enumerate() {
            if positions.contains_key(&attribute.name) {
                if reported.insert(attribute.name.clone()) {
                    duplicates.push(attribute.name.clone());
                }
            } else {
                positions.insert(attribute.name.clone(), i);
            }
        }

        if !duplicates.is_empty() {
            return Err(HeaderError::Duplicates(duplicates));
        }

        Ok(Self {
            attributes,
            positions,
        })
    }

    /// Attributes in declaration order
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Attribute names in declaration order
    pub fn names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.clone()).collect()
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.positions.get(name).map(|&i| &self.attributes[i])
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Names from `names` this header does not contain, in request order,
    /// each reported once.
    pub fn missing<'a, I>(&self, names: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        let mut missing: Vec<String> = Vec::new();
        for name in names {
            if !self.contains(name) && !missing.contains(name) {
                missing.push(name.clone());
            }
        }
        missing
    }
}

impl PartialEq for Header {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
    }
}

impl Eq for Header {}

impl Hash for Header {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.attributes.hash(state);
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, attribute) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", attribute)?;
        }
        f.write_str(")")
    }
}
