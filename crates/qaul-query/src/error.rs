//! Error types for query construction.
//!
//! Evaluation has no error type of its own: a failing record source reports
//! its own error, which [`try_evaluate`](crate::try_evaluate) hands back
//! unchanged.

use thiserror::Error;

/// Errors that can occur while building a [`Query`](crate::Query).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A name predicate was given an empty pattern.
    #[error("name predicate {index} has an empty pattern")]
    EmptyPattern { index: usize },

    /// Parallel value and limit sequences have different lengths.
    #[error("{kind} values and limits differ in length ({values} values, {limits} limits)")]
    LengthMismatch {
        kind: &'static str,
        values: usize,
        limits: usize,
    },

    /// A limit was applied to a domain it does not support.
    #[error("limit '{limit}' is not valid for {expected} predicates")]
    WrongDomain {
        limit: &'static str,
        expected: &'static str,
    },

    /// A limit name could not be parsed.
    #[error("unknown limit '{0}'")]
    UnknownLimit(String),

    /// A numeric max count of zero was given.
    #[error("max count must be at least 1; use an unbounded query to return every match")]
    ZeroMaxCount,

    /// The builder was finished without choosing a result bound.
    #[error("no max count chosen; call max_count(n) or unbounded()")]
    MissingMaxCount,
}

/// Result type for query construction.
pub type Result<T> = std::result::Result<T, QueryError>;
