//! Insertion-ordered, deduplicated tuple collections.
//!
//! `Tuples` behaves like a set that remembers insertion order: inserting a
//! tuple equal to one already present is a no-op and the earlier position
//! is kept. All transformations thread a `Result` through the rows and stop
//! at the first error, dropping whatever had been produced so far.

use crate::access::{Tuple, Value};
use crate::catalog::Header;
use indexmap::IndexSet;
use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

#[derive(Debug, Clone, Default)]
pub struct Tuples {
    rows: IndexSet<Tuple>,
}

impl Tuples {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from positional rows laid out in header order.
    ///
    /// Rows with the wrong arity or with a value that does not match its
    /// attribute type are dropped without error.
    pub fn from_rows(header: &Header, rows: Vec<Vec<Value>>) -> Self {
        let total = rows.len();
        let tuples: Tuples = rows
            .into_iter()
            .filter(|row| {
                row.len() == header.len()
                    && row
                        .iter()
                        .zip(header.attributes())
                        .all(|(value, attribute)| value.matches(&attribute.attribute_type))
            })
            .map(|row| {
                header
                    .attributes()
                    .iter()
                    .map(|attribute| attribute.name.clone())
                    .zip(row)
                    .collect::<Tuple>()
            })
            .collect();
        log_dropped(total, &tuples);
        tuples
    }

    /// Build a collection from keyed rows.
    ///
    /// A missing key counts as the absent value. Rows with a key outside the
    /// header, or with a value that does not match its attribute type, are
    /// dropped without error.
    pub fn from_maps(header: &Header, rows: Vec<BTreeMap<String, Value>>) -> Self {
        let total = rows.len();
        let names = header.names();
        let tuples: Tuples = rows
            .into_iter()
            .filter(|row| {
                row.keys().all(|name| header.contains(name))
                    && header.attributes().iter().all(|attribute| {
                        row.get(&attribute.name)
                            .unwrap_or(&Value::Null)
                            .matches(&attribute.attribute_type)
                    })
            })
            .map(|row| Tuple::from(row).project(&names))
            .collect();
        log_dropped(total, &tuples);
        tuples
    }

    /// Insert a tuple, returning false if an equal tuple was already present
    pub fn insert(&mut self, tuple: Tuple) -> bool {
        self.rows.insert(tuple)
    }

    pub fn contains(&self, tuple: &Tuple) -> bool {
        self.rows.contains(tuple)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tuple> {
        self.rows.iter()
    }

    pub fn map<F, E>(&self, f: F) -> Result<Tuples, E>
    where
        F: FnMut(&Tuple) -> Result<Tuple, E>,
    {
        self.rows.iter().map(f).collect()
    }

    pub fn filter<F, E>(&self, mut f: F) -> Result<Tuples, E>
    where
        F: FnMut(&Tuple) -> Result<bool, E>,
    {
        let mut result = Tuples::new();
        for tuple in &self.rows {
            if f(tuple)? {
                result.insert(tuple.clone());
            }
        }
        Ok(result)
    }

    pub fn flat_map<F, I, E>(&self, mut f: F) -> Result<Tuples, E>
    where
        F: FnMut(&Tuple) -> Result<I, E>,
        I: IntoIterator<Item = Tuple>,
    {
        let mut result = Tuples::new();
        for tuple in &self.rows {
            result.rows.extend(f(tuple)?);
        }
        Ok(result)
    }

    pub fn compact_map<F, E>(&self, mut f: F) -> Result<Tuples, E>
    where
        F: FnMut(&Tuple) -> Result<Option<Tuple>, E>,
    {
        let mut result = Tuples::new();
        for tuple in &self.rows {
            if let Some(mapped) = f(tuple)? {
                result.insert(mapped);
            }
        }
        Ok(result)
    }

    /// Stable sort with a fallible comparator.
    ///
    /// The first comparator error aborts the sort and is returned.
    pub fn sorted_by<F, E>(&self, mut compare: F) -> Result<Tuples, E>
    where
        F: FnMut(&Tuple, &Tuple) -> Result<Ordering, E>,
    {
        let mut rows: Vec<&Tuple> = self.rows.iter().collect();
        let mut error = None;
        rows.sort_by(|a, b| {
            if error.is_some() {
                return Ordering::Equal;
            }
            compare(a, b).unwrap_or_else(|e| {
                error = Some(e);
                Ordering::Equal
            })
        });
        match error {
            Some(e) => Err(e),
            None => Ok(rows.into_iter().cloned().collect()),
        }
    }

    pub fn union(&self, other: &Tuples) -> Tuples {
        Tuples {
            rows: self.rows.union(&other.rows).cloned().collect(),
        }
    }

    pub fn intersection(&self, other: &Tuples) -> Tuples {
        Tuples {
            rows: self.rows.intersection(&other.rows).cloned().collect(),
        }
    }

    pub fn difference(&self, other: &Tuples) -> Tuples {
        Tuples {
            rows: self.rows.difference(&other.rows).cloned().collect(),
        }
    }
}

fn log_dropped(total: usize, kept: &Tuples) {
    // Duplicates shrink the count too
    if kept.len() < total {
        log::debug!(
            "Built {} tuples from {} input rows (non-conforming rows and duplicates dropped)",
            kept.len(),
            total
        );
    }
}

/// Set equality: order does not matter
impl PartialEq for Tuples {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl Eq for Tuples {}

impl Hash for Tuples {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-independent combination of the row hashes
        let combined = self.rows.iter().fold(0u64, |acc, tuple| {
            let mut hasher = DefaultHasher::new();
            tuple.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        });
        self.rows.len().hash(state);
        combined.hash(state);
    }
}

impl FromIterator<Tuple> for Tuples {
    fn from_iter<I: IntoIterator<Item = Tuple>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Tuples {
    type Item = Tuple;
    type IntoIter = indexmap::set::IntoIter<Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tuples {
    type Item = &'a Tuple;
    type IntoIter = indexmap::set::Iter<'a, Tuple>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
