//! Plain-data description of a query, for loading from configuration.
//!
//! [`QuerySpec`] mirrors a [`Query`] field for field but performs no
//! validation of its own; [`QuerySpec::into_query`] routes it through the
//! builder, so a spec can only ever produce a valid query.
//!
//! ```
//! use qaul_query::QuerySpec;
//!
//! let spec: QuerySpec = serde_json::from_str(r#"{
//!     "names": [{ "pattern": "img_", "limit": "startswith" }],
//!     "times": [{ "instant": 100, "limit": "newer" }],
//!     "max_count": 2
//! }"#).unwrap();
//!
//! let query = spec.into_query().unwrap();
//! assert!(query.matches(&("img_001", 150u64)));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::limit::{NameLimit, TimeLimit};
use crate::query::{MaxCount, Query, QueryBuilder};
use crate::timestamp::Timestamp;

/// One name predicate in a [`QuerySpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSpec {
    pub pattern: String,
    pub limit: NameLimit,
}

/// One time predicate in a [`QuerySpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpec {
    pub instant: Timestamp,
    pub limit: TimeLimit,
}

/// Serializable query description.
///
/// A missing or `null` `max_count` means unbounded; `0` is rejected when
/// converting to a [`Query`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuerySpec {
    pub names: Vec<NameSpec>,
    pub times: Vec<TimeSpec>,
    pub max_count: Option<usize>,
}

impl QuerySpec {
    /// Validates this spec into a [`Query`].
    pub fn into_query(self) -> Result<Query> {
        self.into_builder()?.build()
    }

    /// Loads this spec into a builder so more predicates can be added.
    ///
    /// The bound is checked here: a zero `max_count` fails now, before a
    /// later `max_count`/`unbounded` call on the builder could replace it.
    pub fn into_builder(self) -> Result<QueryBuilder> {
        let mut builder = Query::builder();
        for name in self.names {
            builder = builder.name(name.pattern, name.limit);
        }
        for time in self.times {
            builder = builder.time(time.instant, time.limit);
        }
        Ok(match self.max_count {
            Some(n) => {
                MaxCount::limited(n)?;
                builder.max_count(n)
            }
            None => builder.unbounded(),
        })
    }
}

impl TryFrom<QuerySpec> for Query {
    type Error = crate::error::QueryError;

    fn try_from(spec: QuerySpec) -> Result<Query> {
        spec.into_query()
    }
}

impl From<&Query> for QuerySpec {
    fn from(query: &Query) -> Self {
        QuerySpec {
            names: query
                .name_predicates()
                .iter()
                .map(|pred| NameSpec {
                    pattern: pred.pattern().to_string(),
                    limit: pred.limit(),
                })
                .collect(),
            times: query
                .time_predicates()
                .iter()
                .map(|pred| TimeSpec {
                    instant: pred.instant(),
                    limit: pred.limit(),
                })
                .collect(),
            max_count: match query.max_count() {
                MaxCount::Unbounded => None,
                MaxCount::Limited(n) => Some(n.get()),
            },
        }
    }
}
