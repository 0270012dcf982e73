//! Comparison operators ("limits") for query predicates.
//!
//! Name and time operators live in separate enums so a string operator can
//! never be applied to a timestamp. [`Limit`] is the untyped union of both,
//! used where limits arrive as loose tags (parallel sequences, CLI flags)
//! and must be sorted into their domain at construction time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, Result};

/// Operator for a name predicate. Matching is byte-exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameLimit {
    /// Name begins with the pattern.
    StartsWith,
    /// Name ends with the pattern.
    EndsWith,
    /// Name is exactly the pattern.
    Equals,
}

impl NameLimit {
    /// Applies this operator to a candidate name.
    pub fn eval(self, name: &str, pattern: &str) -> bool {
        match self {
            NameLimit::StartsWith => name.as_bytes().starts_with(pattern.as_bytes()),
            NameLimit::EndsWith => name.as_bytes().ends_with(pattern.as_bytes()),
            NameLimit::Equals => name.as_bytes() == pattern.as_bytes(),
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        Limit::from(self).as_str()
    }
}

/// Operator for a time predicate. Both bounds are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeLimit {
    /// Candidate is strictly later than the instant.
    Newer,
    /// Candidate is strictly earlier than the instant.
    Older,
}

impl TimeLimit {
    /// Applies this operator to a candidate timestamp.
    pub fn eval<T: Ord>(self, candidate: T, instant: T) -> bool {
        match self {
            TimeLimit::Newer => candidate > instant,
            TimeLimit::Older => candidate < instant,
        }
    }

    /// Returns the display name of this operator.
    pub fn as_str(self) -> &'static str {
        Limit::from(self).as_str()
    }
}

/// Any limit, regardless of domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Limit {
    StartsWith,
    EndsWith,
    Equals,
    Newer,
    Older,
}

impl Limit {
    /// Every limit, in declaration order.
    pub const ALL: [Limit; 5] = [
        Limit::StartsWith,
        Limit::EndsWith,
        Limit::Equals,
        Limit::Newer,
        Limit::Older,
    ];

    /// Returns `true` if this limit applies to names.
    pub fn is_name_limit(self) -> bool {
        matches!(self, Limit::StartsWith | Limit::EndsWith | Limit::Equals)
    }

    /// Returns `true` if this limit applies to timestamps.
    pub fn is_time_limit(self) -> bool {
        matches!(self, Limit::Newer | Limit::Older)
    }

    /// Returns the display name of this limit.
    pub fn as_str(self) -> &'static str {
        match self {
            Limit::StartsWith => "startswith",
            Limit::EndsWith => "endswith",
            Limit::Equals => "equals",
            Limit::Newer => "newer",
            Limit::Older => "older",
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for NameLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TimeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Limit {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        Limit::ALL
            .into_iter()
            .find(|limit| limit.as_str() == s)
            .ok_or_else(|| QueryError::UnknownLimit(s.to_string()))
    }
}

impl FromStr for NameLimit {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Limit>()?.try_into()
    }
}

impl FromStr for TimeLimit {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self> {
        s.parse::<Limit>()?.try_into()
    }
}

impl From<NameLimit> for Limit {
    fn from(limit: NameLimit) -> Self {
        match limit {
            NameLimit::StartsWith => Limit::StartsWith,
            NameLimit::EndsWith => Limit::EndsWith,
            NameLimit::Equals => Limit::Equals,
        }
    }
}

impl From<TimeLimit> for Limit {
    fn from(limit: TimeLimit) -> Self {
        match limit {
            TimeLimit::Newer => Limit::Newer,
            TimeLimit::Older => Limit::Older,
        }
    }
}

impl TryFrom<Limit> for NameLimit {
    type Error = QueryError;

    fn try_from(limit: Limit) -> Result<Self> {
        match limit {
            Limit::StartsWith => Ok(NameLimit::StartsWith),
            Limit::EndsWith => Ok(NameLimit::EndsWith),
            Limit::Equals => Ok(NameLimit::Equals),
            other => Err(QueryError::WrongDomain {
                limit: other.as_str(),
                expected: "name",
            }),
        }
    }
}

impl TryFrom<Limit> for TimeLimit {
    type Error = QueryError;

    fn try_from(limit: Limit) -> Result<Self> {
        match limit {
            Limit::Newer => Ok(TimeLimit::Newer),
            Limit::Older => Ok(TimeLimit::Older),
            other => Err(QueryError::WrongDomain {
                limit: other.as_str(),
                expected: "time",
            }),
        }
    }
}
