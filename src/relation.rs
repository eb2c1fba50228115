//! Relations and their lazy, memoized resolution.
//!
//! A [`Relation`] is either built from literal data, in which case it is
//! resolved immediately, or by composing an operator onto existing
//! relations, in which case it holds a pending [`Query`] until something
//! reads its header or tuples. The first read runs the query and caches
//! the outcome. A relation that failed stays failed.
//!
//! # Equality
//!
//! Two relations are equal when their resolved headers and tuples are
//! equal. Comparing or hashing a pending relation therefore evaluates it.
//!
//! # Concurrency
//!
//! Clones share one memo cell guarded by a mutex. The lock is held while the
//! query runs, so when several threads read the same pending relation the
//! query runs once and the other readers wait for its result. Resolving a
//! relation locks the relations its query reads from, which were all built
//! before it, so lock acquisition always follows construction order.

use crate::access::{Tuples, Value, ValueError};
use crate::catalog::{Attribute, Header, HeaderError};
use crate::executor::{execute, QueryError, Resolved};
use crate::expression::Predicate;
use crate::query::{JoinKind, Query, SemiJoinKind, SortOrder};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RelationError {
    #[error(transparent)]
    Header(#[from] HeaderError),

    #[error(transparent)]
    Value(#[from] ValueError),

    #[error(transparent)]
    Query(QueryError),
}

impl From<QueryError> for RelationError {
    fn from(error: QueryError) -> Self {
        match error {
            // A failed leaf keeps its own error
            QueryError::Relation(inner) => *inner,
            QueryError::Value(e) => RelationError::Value(e),
            other => RelationError::Query(other),
        }
    }
}

pub type RelationResult<T> = Result<T, RelationError>;

enum State {
    Pending(Query),
    Resolved(Arc<Resolved>),
    Failed(RelationError),
}

/// A typed set of tuples, possibly not evaluated yet
#[derive(Clone)]
pub struct Relation {
    state: Arc<Mutex<State>>,
}

impl Relation {
    fn with_state(state: State) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn literal(attributes: Vec<Attribute>, build: impl FnOnce(&Header) -> Tuples) -> Self {
        match Header::new(attributes) {
            Ok(header) => {
                let tuples = build(&header);
                Self::from(Resolved::new(header, tuples))
            }
            Err(e) => {
                log::debug!("relation header rejected: {}", e);
                Self::with_state(State::Failed(e.into()))
            }
        }
    }

    /// Build a relation from positional rows.
    ///
    /// Rows whose arity or value types do not fit `attributes` are dropped.
    /// An invalid header makes the relation permanently failed.
    pub fn new(attributes: Vec<Attribute>, rows: Vec<Vec<Value>>) -> Self {
        Self::literal(attributes, |header| Tuples::from_rows(header, rows))
    }

    /// Build a relation from keyed rows. A missing key reads as absent.
    pub fn from_maps(attributes: Vec<Attribute>, rows: Vec<BTreeMap<String, Value>>) -> Self {
        Self::literal(attributes, |header| Tuples::from_maps(header, rows))
    }

    /// Wrap a query; nothing is evaluated until the relation is read
    pub fn from_query(query: Query) -> Self {
        Self::with_state(State::Pending(query))
    }

    /// This relation as a query leaf
    pub fn query(&self) -> Query {
        Query::Relation(self.clone())
    }

    /// Evaluate the relation if needed and return the cached outcome
    pub fn resolve(&self) -> RelationResult<Arc<Resolved>> {
        let mut state = self.state.lock();
        let outcome = match &*state {
            State::Resolved(resolved) => {
                log::trace!("relation cache hit");
                return Ok(Arc::clone(resolved));
            }
            State::Failed(e) => return Err(e.clone()),
            State::Pending(query) => execute(query)
                .map(Arc::new)
                .map_err(RelationError::from),
        };

        *state = match &outcome {
            Ok(resolved) => State::Resolved(Arc::clone(resolved)),
            Err(e) => State::Failed(e.clone()),
        };
        outcome
    }

    pub fn header(&self) -> RelationResult<Header> {
        Ok(self.resolve()?.header.clone())
    }

    pub fn tuples(&self) -> RelationResult<Tuples> {
        Ok(self.resolve()?.tuples.clone())
    }

    /// Whether the relation has been evaluated, successfully or not
    pub fn is_resolved(&self) -> bool {
        !matches!(*self.state.lock(), State::Pending(_))
    }

    pub fn project<I, S>(&self, attributes: I) -> Relation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let attributes = attributes.into_iter().map(Into::into).collect();
        Query::projection(attributes, self.query()).into()
    }

    pub fn select(&self, predicate: Predicate) -> Relation {
        Query::selection(predicate, self.query()).into()
    }

    pub fn rename(&self, new_name: impl Into<String>, old_name: impl Into<String>) -> Relation {
        Query::rename(new_name, old_name, self.query()).into()
    }

    pub fn order_by<I, S>(&self, keys: I) -> Relation
    where
        I: IntoIterator<Item = (S, SortOrder)>,
        S: Into<String>,
    {
        let keys = keys
            .into_iter()
            .map(|(name, order)| (name.into(), order))
            .collect();
        Query::order_by(keys, self.query()).into()
    }

    pub fn intersect(&self, other: &Relation) -> Relation {
        Query::intersection(self.query(), other.query()).into()
    }

    pub fn union(&self, other: &Relation) -> Relation {
        Query::union(self.query(), other.query()).into()
    }

    pub fn subtract(&self, other: &Relation) -> Relation {
        Query::subtraction(self.query(), other.query()).into()
    }

    pub fn product(&self, other: &Relation) -> Relation {
        Query::product(self.query(), other.query()).into()
    }

    pub fn divide(&self, other: &Relation) -> Relation {
        Query::division(self.query(), other.query()).into()
    }

    pub fn join(&self, other: &Relation, kind: JoinKind) -> Relation {
        Query::join(kind, self.query(), other.query()).into()
    }

    pub fn natural_join(&self, other: &Relation) -> Relation {
        self.join(other, JoinKind::Natural)
    }

    pub fn theta_join(&self, other: &Relation, predicate: Predicate) -> Relation {
        self.join(other, JoinKind::Theta(predicate))
    }

    pub fn semi_join(&self, other: &Relation, kind: SemiJoinKind) -> Relation {
        self.join(other, JoinKind::Semi(kind))
    }

    pub fn left_semi_join(&self, other: &Relation) -> Relation {
        self.semi_join(other, SemiJoinKind::Left)
    }

    pub fn right_semi_join(&self, other: &Relation) -> Relation {
        self.semi_join(other, SemiJoinKind::Right)
    }

    pub fn anti_semi_join(&self, other: &Relation) -> Relation {
        self.semi_join(other, SemiJoinKind::Anti)
    }
}

impl From<Resolved> for Relation {
    fn from(resolved: Resolved) -> Self {
        Self::with_state(State::Resolved(Arc::new(resolved)))
    }
}

impl From<Query> for Relation {
    fn from(query: Query) -> Self {
        Self::from_query(query)
    }
}

/// Forces evaluation of both sides.
impl PartialEq for Relation {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.state, &other.state) {
            return true;
        }
        match (self.resolve(), other.resolve()) {
            (Ok(a), Ok(b)) => a == b,
            (Err(a), Err(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Relation {}

/// Forces evaluation.
impl Hash for Relation {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.resolve() {
            Ok(resolved) => resolved.hash(state),
            Err(e) => e.to_string().hash(state),
        }
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("Relation");
        // Never evaluates, and never blocks on a resolution in progress
        match self.state.try_lock() {
            Some(state) => match &*state {
                State::Pending(query) => debug.field("pending", &query.name()),
                State::Resolved(resolved) => debug
                    .field("header", &resolved.header.to_string())
                    .field("tuples", &resolved.tuples.len()),
                State::Failed(e) => debug.field("failed", e),
            },
            None => debug.field("pending", &"<resolving>"),
        };
        debug.finish()
    }
}
