//! Semi join and anti semi join.
//!
//! A semi join keeps the tuples of one side that have at least one natural
//! join partner on the other side, without merging any columns into them.
//! The anti semi join keeps the left tuples that have none. Both are built
//! from projection, natural join and subtraction over resolved leaves.

use crate::executor::{execute, Executor, QueryResult, Resolved};
use crate::query::{JoinKind, Query, SemiJoinKind};

pub struct SemiJoinExecutor<'a> {
    kind: SemiJoinKind,
    left: &'a Query,
    right: &'a Query,
}

impl<'a> SemiJoinExecutor<'a> {
    pub fn new(kind: SemiJoinKind, left: &'a Query, right: &'a Query) -> Self {
        Self { kind, left, right }
    }
}

/// π_names(kept ⋈ other)
fn semi(names: Vec<String>, kept: Query, other: Query) -> Query {
    Query::projection(names, Query::join(JoinKind::Natural, kept, other))
}

impl Executor for SemiJoinExecutor<'_> {
    fn execute(&self) -> QueryResult<Resolved> {
        let left = execute(self.left)?;
        let right = execute(self.right)?;

        let query = match self.kind {
            SemiJoinKind::Left => semi(left.header.names(), left.into_query(), right.into_query()),
            SemiJoinKind::Right => {
                semi(right.header.names(), right.into_query(), left.into_query())
            }
            SemiJoinKind::Anti => {
                let names = left.header.names();
                let left = left.into_query();
                Query::subtraction(left.clone(), semi(names, left, right.into_query()))
            }
        };

        execute(&query)
    }
}
