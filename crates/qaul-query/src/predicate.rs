//! Single-field predicates.
//!
//! A predicate is one pass/fail test against one field of a record: a
//! [`NamePredicate`] checks the name, a [`TimePredicate`] checks the
//! timestamp. Both are pure and own their comparison values.

use crate::error::{QueryError, Result};
use crate::limit::{NameLimit, TimeLimit};
use crate::timestamp::Timestamp;

/// A pass/fail test over one field value.
///
/// Implemented by the built-in predicates. An alternative matcher (a glob
/// compiler, say) can implement it too and be grouped in a
/// [`PredicateSet`](crate::PredicateSet).
pub trait Predicate {
    /// The field value this predicate inspects.
    type Input: ?Sized;

    /// Returns `true` if the value passes this predicate.
    fn matches(&self, value: &Self::Input) -> bool;
}

/// Tests a record name against a pattern.
///
/// # Example
///
/// ```
/// use qaul_query::{NameLimit, NamePredicate};
///
/// let pred = NamePredicate::new("img_", NameLimit::StartsWith).unwrap();
/// assert!(pred.matches("img_001"));
/// assert!(!pred.matches("doc_1"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamePredicate {
    pattern: String,
    limit: NameLimit,
}

impl NamePredicate {
    /// Creates a name predicate. The pattern must not be empty.
    pub fn new(pattern: impl Into<String>, limit: NameLimit) -> Result<Self> {
        let pattern = pattern.into();
        if pattern.is_empty() {
            return Err(QueryError::EmptyPattern { index: 0 });
        }
        Ok(NamePredicate { pattern, limit })
    }

    /// The pattern compared against.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The comparison operator.
    pub fn limit(&self) -> NameLimit {
        self.limit
    }

    /// Returns `true` if `name` satisfies this predicate.
    pub fn matches(&self, name: &str) -> bool {
        self.limit.eval(name, &self.pattern)
    }
}

impl Predicate for NamePredicate {
    type Input = str;

    fn matches(&self, value: &str) -> bool {
        NamePredicate::matches(self, value)
    }
}

/// Tests a record timestamp against an instant.
///
/// A candidate equal to the instant matches neither [`TimeLimit::Newer`]
/// nor [`TimeLimit::Older`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimePredicate {
    instant: Timestamp,
    limit: TimeLimit,
}

impl TimePredicate {
    /// Creates a time predicate.
    pub fn new(instant: impl Into<Timestamp>, limit: TimeLimit) -> Self {
        TimePredicate {
            instant: instant.into(),
            limit,
        }
    }

    /// The instant compared against.
    pub fn instant(&self) -> Timestamp {
        self.instant
    }

    /// The comparison operator.
    pub fn limit(&self) -> TimeLimit {
        self.limit
    }

    /// Returns `true` if `timestamp` satisfies this predicate.
    pub fn matches(&self, timestamp: Timestamp) -> bool {
        self.limit.eval(timestamp, self.instant)
    }
}

impl Predicate for TimePredicate {
    type Input = Timestamp;

    fn matches(&self, value: &Timestamp) -> bool {
        TimePredicate::matches(self, *value)
    }
}
