//! Relational algebra query trees.
//!
//! A `Query` is a plain value: leaves hold relations and every other node
//! owns its children. Evaluating a tree is a pure function of the tree (see
//! [`crate::executor::execute`]), so the same subtree may appear in several
//! places without aliasing concerns.

use crate::expression::Predicate;
use crate::relation::Relation;

/// Direction of a single ordering key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Which side a semi join keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemiJoinKind {
    /// Left tuples with at least one natural-join partner
    Left,
    /// Right tuples with at least one natural-join partner
    Right,
    /// Left tuples with no natural-join partner
    Anti,
}

#[derive(Debug, Clone)]
pub enum JoinKind {
    Natural,
    Theta(Predicate),
    Semi(SemiJoinKind),
}

#[derive(Debug, Clone)]
pub enum Query {
    Relation(Relation),

    Projection {
        attributes: Vec<String>,
        input: Box<Query>,
    },

    Selection {
        predicate: Predicate,
        input: Box<Query>,
    },

    Rename {
        new_name: String,
        old_name: String,
        input: Box<Query>,
    },

    OrderBy {
        keys: Vec<(String, SortOrder)>,
        input: Box<Query>,
    },

    Intersection(Box<Query>, Box<Query>),

    Union(Box<Query>, Box<Query>),

    Subtraction(Box<Query>, Box<Query>),

    Product(Box<Query>, Box<Query>),

    Division(Box<Query>, Box<Query>),

    Join {
        kind: JoinKind,
        left: Box<Query>,
        right: Box<Query>,
    },
}

impl Query {
    pub fn projection(attributes: Vec<String>, input: Query) -> Self {
        Query::Projection {
            attributes,
            input: Box::new(input),
        }
    }

    pub fn selection(predicate: Predicate, input: Query) -> Self {
        Query::Selection {
            predicate,
            input: Box::new(input),
        }
    }

    pub fn rename(new_name: impl Into<String>, old_name: impl Into<String>, input: Query) -> Self {
        Query::Rename {
            new_name: new_name.into(),
            old_name: old_name.into(),
            input: Box::new(input),
        }
    }

    pub fn order_by(keys: Vec<(String, SortOrder)>, input: Query) -> Self {
        Query::OrderBy {
            keys,
            input: Box::new(input),
        }
    }

    pub fn intersection(left: Query, right: Query) -> Self {
        Query::Intersection(Box::new(left), Box::new(right))
    }

    pub fn union(left: Query, right: Query) -> Self {
        Query::Union(Box::new(left), Box::new(right))
    }

    pub fn subtraction(left: Query, right: Query) -> Self {
        Query::Subtraction(Box::new(left), Box::new(right))
    }

    pub fn product(left: Query, right: Query) -> Self {
        Query::Product(Box::new(left), Box::new(right))
    }

    pub fn division(left: Query, right: Query) -> Self {
        Query::Division(Box::new(left), Box::new(right))
    }

    pub fn join(kind: JoinKind, left: Query, right: Query) -> Self {
        Query::Join {
            kind,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Operator name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Query::Relation(_) => "relation",
            Query::Projection { .. } => "projection",
            Query::Selection { .. } => "selection",
            Query::Rename { .. } => "rename",
            Query::OrderBy { .. } => "order by",
            Query::Intersection(..) => "intersection",
            Query::Union(..) => "union",
            Query::Subtraction(..) => "subtraction",
            Query::Product(..) => "product",
            Query::Division(..) => "division",
            Query::Join {
                kind: JoinKind::Natural,
                ..
            } => "natural join",
            Query::Join {
                kind: JoinKind::Theta(_),
                ..
            } => "theta join",
            Query::Join {
                kind: JoinKind::Semi(_),
                ..
            } => "semi join",
        }
    }
}

impl From<Relation> for Query {
    fn from(relation: Relation) -> Self {
        Query::Relation(relation)
    }
}
