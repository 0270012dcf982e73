//! Query builder and the immutable [`Query`] it produces.

use std::num::NonZeroUsize;

use crate::error::{QueryError, Result};
use crate::limit::{Limit, NameLimit, TimeLimit};
use crate::predicate::{NamePredicate, TimePredicate};
use crate::record::Record;
use crate::set::PredicateSet;
use crate::timestamp::Timestamp;

/// Upper bound on the number of records a query returns.
///
/// There is no numeric "zero means everything": an unbounded query says so
/// with [`MaxCount::Unbounded`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaxCount {
    /// Return every match.
    Unbounded,
    /// Return at most this many matches.
    Limited(NonZeroUsize),
}

impl MaxCount {
    /// Creates a limited bound, rejecting zero.
    pub fn limited(n: usize) -> Result<Self> {
        NonZeroUsize::new(n)
            .map(MaxCount::Limited)
            .ok_or(QueryError::ZeroMaxCount)
    }

    /// The bound as a number, or `None` when unbounded.
    pub fn get(self) -> Option<usize> {
        match self {
            MaxCount::Unbounded => None,
            MaxCount::Limited(n) => Some(n.get()),
        }
    }

    /// Returns `true` once `collected` results satisfy the bound.
    pub fn is_reached(self, collected: usize) -> bool {
        match self {
            MaxCount::Unbounded => false,
            MaxCount::Limited(n) => collected >= n.get(),
        }
    }
}

impl From<NonZeroUsize> for MaxCount {
    fn from(n: NonZeroUsize) -> Self {
        MaxCount::Limited(n)
    }
}

/// A validated query over record names and timestamps.
///
/// A record matches when every name predicate passes its name AND every
/// time predicate passes its timestamp. Empty predicate groups impose no
/// constraint. At most [`max_count`](Query::max_count) matches are returned,
/// in source order.
///
/// Queries are built with [`Query::builder`] and are immutable afterwards.
///
/// # Example
///
/// ```
/// use qaul_query::Query;
///
/// let query = Query::builder()
///     .starts_with("img_")
///     .newer(100u64)
///     .max_count(2)
///     .build()
///     .unwrap();
///
/// let records = [("img_001", 150u64), ("doc_1", 160), ("img_002", 90), ("img_003", 170)];
/// let result = query.evaluate(records);
/// let names: Vec<&str> = result.iter().map(|r| r.0).collect();
/// assert_eq!(names, ["img_001", "img_003"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    names: PredicateSet<NamePredicate>,
    times: PredicateSet<TimePredicate>,
    max_count: MaxCount,
}

impl Query {
    /// Starts building a query.
    pub fn builder() -> QueryBuilder {
        QueryBuilder::default()
    }

    /// Builds a query from parallel value and limit sequences.
    ///
    /// Each `names[i]` is paired with `name_limits[i]` and each `times[i]`
    /// with `time_limits[i]`. Sequences of different lengths, limits from
    /// the wrong domain, empty patterns and a zero `max_count` are rejected.
    /// `max_count` of `None` means unbounded.
    pub fn from_parallel<S: AsRef<str>>(
        names: &[S],
        name_limits: &[Limit],
        times: &[u64],
        time_limits: &[Limit],
        max_count: Option<usize>,
    ) -> Result<Query> {
        if names.len() != name_limits.len() {
            return Err(QueryError::LengthMismatch {
                kind: "name",
                values: names.len(),
                limits: name_limits.len(),
            });
        }
        if times.len() != time_limits.len() {
            return Err(QueryError::LengthMismatch {
                kind: "time",
                values: times.len(),
                limits: time_limits.len(),
            });
        }

        let mut builder = Query::builder();
        for (name, limit) in names.iter().zip(name_limits) {
            builder = builder.name(name.as_ref(), NameLimit::try_from(*limit)?);
        }
        for (time, limit) in times.iter().zip(time_limits) {
            builder = builder.time(*time, TimeLimit::try_from(*limit)?);
        }
        let builder = match max_count {
            Some(n) => builder.max_count(n),
            None => builder.unbounded(),
        };
        builder.build()
    }

    /// The name predicates, in the order they were added.
    pub fn name_predicates(&self) -> &PredicateSet<NamePredicate> {
        &self.names
    }

    /// The time predicates, in the order they were added.
    pub fn time_predicates(&self) -> &PredicateSet<TimePredicate> {
        &self.times
    }

    /// The result bound.
    pub fn max_count(&self) -> MaxCount {
        self.max_count
    }

    /// Returns `true` if this query has no predicates (matches every record).
    pub fn is_unconstrained(&self) -> bool {
        self.names.is_empty() && self.times.is_empty()
    }

    /// Tests a single record against both predicate groups.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.names.matches_all(record.name()) && self.times.matches_all(&record.timestamp())
    }
}

/// Fluent builder for [`Query`].
///
/// Predicates are collected as given; validation happens in
/// [`build`](QueryBuilder::build), which reports the first problem found.
/// The result bound must be chosen with [`max_count`](QueryBuilder::max_count)
/// or [`unbounded`](QueryBuilder::unbounded) before building.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    names: Vec<(String, NameLimit)>,
    times: Vec<TimePredicate>,
    max_count: Option<usize>,
    unbounded: bool,
}

impl QueryBuilder {
    // ========================================================================
    // Name predicates
    // ========================================================================

    /// Adds a name predicate.
    pub fn name(mut self, pattern: impl Into<String>, limit: NameLimit) -> Self {
        self.names.push((pattern.into(), limit));
        self
    }

    /// Adds a "name starts with" predicate.
    pub fn starts_with(self, pattern: impl Into<String>) -> Self {
        self.name(pattern, NameLimit::StartsWith)
    }

    /// Adds a "name ends with" predicate.
    pub fn ends_with(self, pattern: impl Into<String>) -> Self {
        self.name(pattern, NameLimit::EndsWith)
    }

    /// Adds a "name equals" predicate.
    pub fn equals(self, pattern: impl Into<String>) -> Self {
        self.name(pattern, NameLimit::Equals)
    }

    // ========================================================================
    // Time predicates
    // ========================================================================

    /// Adds a time predicate.
    pub fn time(mut self, instant: impl Into<Timestamp>, limit: TimeLimit) -> Self {
        self.times.push(TimePredicate::new(instant, limit));
        self
    }

    /// Adds a "strictly newer than" predicate.
    pub fn newer(self, instant: impl Into<Timestamp>) -> Self {
        self.time(instant, TimeLimit::Newer)
    }

    /// Adds a "strictly older than" predicate.
    pub fn older(self, instant: impl Into<Timestamp>) -> Self {
        self.time(instant, TimeLimit::Older)
    }

    // ========================================================================
    // Bound
    // ========================================================================

    /// Caps the result at `n` records. Zero is rejected by `build`.
    pub fn max_count(mut self, n: usize) -> Self {
        self.max_count = Some(n);
        self.unbounded = false;
        self
    }

    /// Returns every match.
    pub fn unbounded(mut self) -> Self {
        self.max_count = None;
        self.unbounded = true;
        self
    }

    // ========================================================================
    // Build
    // ========================================================================

    /// Validates the collected predicates and produces the query.
    pub fn build(self) -> Result<Query> {
        let names = self
            .names
            .into_iter()
            .enumerate()
            .map(|(index, (pattern, limit))| {
                NamePredicate::new(pattern, limit).map_err(|err| match err {
                    QueryError::EmptyPattern { .. } => QueryError::EmptyPattern { index },
                    other => other,
                })
            })
            .collect::<Result<PredicateSet<_>>>()?;

        let max_count = match (self.max_count, self.unbounded) {
            (Some(n), _) => MaxCount::limited(n)?,
            (None, true) => MaxCount::Unbounded,
            (None, false) => return Err(QueryError::MissingMaxCount),
        };

        Ok(Query {
            names,
            times: self.times.into_iter().collect(),
            max_count,
        })
    }
}
