//! qaul-query - Name and time queries over named, timestamped records.
//!
//! A [`Query`] filters a stream of records (files, messages, any entry with
//! a name and a timestamp) with two groups of predicates and caps the result
//! at a maximum count. It supports:
//!
//! - Name predicates: `StartsWith`, `EndsWith`, `Equals` (byte-exact, case-sensitive)
//! - Time predicates: `Newer`, `Older` (strict, ties match neither)
//! - An explicit result bound, or an explicit "unbounded"
//! - Lazy, short-circuiting evaluation over any iterator, fallible or not
//!
//! # Quick Start
//!
//! ```rust
//! use qaul_query::Query;
//!
//! let query = Query::builder()
//!     .starts_with("img_")
//!     .max_count(2)
//!     .build()
//!     .unwrap();
//!
//! let records = vec![
//!     ("img_001", 10u64),
//!     ("doc_1", 11),
//!     ("img_002", 12),
//!     ("img_003", 13),
//! ];
//!
//! let result = query.evaluate(records);
//! assert_eq!(result.into_vec(), [("img_001", 10), ("img_002", 12)]);
//! ```
//!
//! # Query Semantics
//!
//! ```text
//! match = (every name predicate passes the record name)
//!       ∧ (every time predicate passes the record timestamp)
//! ```
//!
//! An empty group is trivially satisfied. Matches are returned in the order
//! the source produced them, and the source is not pulled again once the
//! bound is met, so unbounded or expensive sources are safe to query.
//!
//! # Limits and Domains
//!
//! | Field | Limits |
//! |-------|--------|
//! | Name | `StartsWith`, `EndsWith`, `Equals` |
//! | Timestamp | `Newer`, `Older` |
//!
//! Name and time limits are distinct types. The untyped [`Limit`] exists for
//! inputs that carry limits as loose tags; converting one into the wrong
//! domain fails when the query is built, never during evaluation.

mod error;
mod evaluator;
pub mod fs;
mod limit;
mod predicate;
mod query;
mod record;
mod set;
mod spec;
mod timestamp;

// Re-export public API
pub use error::{QueryError, Result};
pub use evaluator::{evaluate, try_evaluate, MatchResult, Matches, TryMatches};
pub use limit::{Limit, NameLimit, TimeLimit};
pub use predicate::{NamePredicate, Predicate, TimePredicate};
pub use query::{MaxCount, Query, QueryBuilder};
pub use record::Record;
pub use set::PredicateSet;
pub use spec::{NameSpec, QuerySpec, TimeSpec};
pub use timestamp::Timestamp;
