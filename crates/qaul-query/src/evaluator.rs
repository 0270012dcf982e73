//! Query evaluation over record sources.
//!
//! A record source is any iterator of [`Record`]s, or of `Result<Record, E>`
//! for sources that can fail mid-scan. Evaluation is a single forward pass:
//! records are tested in source order, matches are kept in that order, and
//! the source is not pulled again once the query's bound is met. Nothing is
//! shared between evaluations, so independent queries can run on separate
//! threads without coordination.

use tracing::{debug, trace};

use crate::query::{MaxCount, Query};
use crate::record::Record;

/// The records accepted by one evaluation, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<R> {
    records: Vec<R>,
    limit_reached: bool,
}

impl<R> MatchResult<R> {
    fn new(records: Vec<R>, max_count: MaxCount) -> Self {
        let limit_reached = max_count.is_reached(records.len());
        MatchResult {
            records,
            limit_reached,
        }
    }

    /// Number of matched records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if nothing matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if evaluation stopped because the bound was met.
    ///
    /// The source may or may not have held further matches; it was not
    /// read past the bound to find out.
    pub fn limit_reached(&self) -> bool {
        self.limit_reached
    }

    /// Iterates the matched records.
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    /// The matched records as a slice.
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    /// Consumes the result, returning the matched records.
    pub fn into_vec(self) -> Vec<R> {
        self.records
    }
}

impl<R> IntoIterator for MatchResult<R> {
    type Item = R;
    type IntoIter = std::vec::IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a, R> IntoIterator for &'a MatchResult<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Lazy iterator over the records of a source that match a query.
///
/// Created by [`Query::matching`]. Stops pulling from the source as soon as
/// the query's bound is met.
#[derive(Debug)]
pub struct Matches<'q, I> {
    query: &'q Query,
    source: I,
    scanned: usize,
    matched: usize,
}

impl<'q, I> Matches<'q, I> {
    /// Records pulled from the source so far.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Records yielded so far.
    pub fn matched(&self) -> usize {
        self.matched
    }
}

impl<'q, I> Iterator for Matches<'q, I>
where
    I: Iterator,
    I::Item: Record,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.query.max_count().is_reached(self.matched) {
            return None;
        }
        for record in self.source.by_ref() {
            self.scanned += 1;
            if self.query.matches(&record) {
                self.matched += 1;
                trace!(record = record.name(), "record matched");
                return Some(record);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (_, upper) = self.source.size_hint();
        match self.query.max_count().get() {
            Some(max) => {
                let remaining = max.saturating_sub(self.matched);
                (0, Some(upper.map_or(remaining, |upper| upper.min(remaining))))
            }
            None => (0, upper),
        }
    }
}

/// Lazy iterator over the matching records of a fallible source.
///
/// Created by [`Query::try_matching`]. A source error is yielded as-is;
/// after the bound is met the source is not pulled again.
#[derive(Debug)]
pub struct TryMatches<'q, I> {
    query: &'q Query,
    source: I,
    scanned: usize,
    matched: usize,
}

impl<'q, I> TryMatches<'q, I> {
    /// Records pulled from the source so far, including failed pulls.
    pub fn scanned(&self) -> usize {
        self.scanned
    }

    /// Records yielded so far.
    pub fn matched(&self) -> usize {
        self.matched
    }
}

impl<'q, I, R, E> Iterator for TryMatches<'q, I>
where
    I: Iterator<Item = Result<R, E>>,
    R: Record,
{
    type Item = Result<R, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.query.max_count().is_reached(self.matched) {
            return None;
        }
        for item in self.source.by_ref() {
            self.scanned += 1;
            match item {
                Ok(record) if self.query.matches(&record) => {
                    self.matched += 1;
                    trace!(record = record.name(), "record matched");
                    return Some(Ok(record));
                }
                Ok(_) => {}
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }
}

/// Evaluates `query` against `source`.
///
/// Returns at most `query.max_count()` records, in the order the source
/// produced them. An empty result is a normal outcome.
pub fn evaluate<I>(query: &Query, source: I) -> MatchResult<I::Item>
where
    I: IntoIterator,
    I::Item: Record,
{
    let mut matches = query.matching(source);
    let records: Vec<_> = matches.by_ref().collect();
    let result = MatchResult::new(records, query.max_count());
    debug!(
        scanned = matches.scanned(),
        matched = result.len(),
        limit_reached = result.limit_reached(),
        "query evaluated"
    );
    result
}

/// Evaluates `query` against a source that may fail.
///
/// The first source error ends evaluation: records accepted so far are
/// discarded and the error is returned unchanged.
pub fn try_evaluate<I, R, E>(query: &Query, source: I) -> Result<MatchResult<R>, E>
where
    I: IntoIterator<Item = Result<R, E>>,
    R: Record,
{
    let mut matches = query.try_matching(source);
    match matches.by_ref().collect::<Result<Vec<R>, E>>() {
        Ok(records) => {
            let result = MatchResult::new(records, query.max_count());
            debug!(
                scanned = matches.scanned(),
                matched = result.len(),
                limit_reached = result.limit_reached(),
                "query evaluated"
            );
            Ok(result)
        }
        Err(err) => {
            debug!(
                scanned = matches.scanned(),
                discarded = matches.matched(),
                "record source failed, discarding partial result"
            );
            Err(err)
        }
    }
}

impl Query {
    /// Lazily yields the records of `source` that match this query.
    pub fn matching<I>(&self, source: I) -> Matches<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Record,
    {
        Matches {
            query: self,
            source: source.into_iter(),
            scanned: 0,
            matched: 0,
        }
    }

    /// Lazily yields the matching records of a fallible source.
    pub fn try_matching<I, R, E>(&self, source: I) -> TryMatches<'_, I::IntoIter>
    where
        I: IntoIterator<Item = Result<R, E>>,
        R: Record,
    {
        TryMatches {
            query: self,
            source: source.into_iter(),
            scanned: 0,
            matched: 0,
        }
    }

    /// Evaluates this query against `source`. See [`evaluate`].
    pub fn evaluate<I>(&self, source: I) -> MatchResult<I::Item>
    where
        I: IntoIterator,
        I::Item: Record,
    {
        evaluate(self, source)
    }

    /// Evaluates this query against a fallible source. See [`try_evaluate`].
    pub fn try_evaluate<I, R, E>(&self, source: I) -> Result<MatchResult<R>, E>
    where
        I: IntoIterator<Item = Result<R, E>>,
        R: Record,
    {
        try_evaluate(self, source)
    }

    /// Returns the first matching record, pulling no further.
    pub fn find_first<I>(&self, source: I) -> Option<I::Item>
    where
        I: IntoIterator,
        I::Item: Record,
    {
        self.matching(source).next()
    }

    /// Returns `true` if any record in `source` matches.
    pub fn any<I>(&self, source: I) -> bool
    where
        I: IntoIterator,
        I::Item: Record,
    {
        self.find_first(source).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn records() -> Vec<(&'static str, u64)> {
        vec![
            ("img_001", 10),
            ("doc_1", 11),
            ("img_002", 12),
            ("img_003", 13),
        ]
    }

    fn names<R: Record>(result: &MatchResult<R>) -> Vec<&str> {
        result.iter().map(Record::name).collect()
    }

    #[test]
    fn unbounded_returns_every_match() {
        let query = Query::builder().starts_with("img_").unbounded().build().unwrap();
        let result = query.evaluate(records());
        assert_eq!(names(&result), ["img_001", "img_002", "img_003"]);
        assert!(!result.limit_reached());
    }

    #[test]
    fn bound_truncates_in_source_order() {
        let query = Query::builder().starts_with("img_").max_count(2).build().unwrap();
        let result = query.evaluate(records());
        assert_eq!(names(&result), ["img_001", "img_002"]);
        assert!(result.limit_reached());
    }

    #[test]
    fn stops_pulling_once_bound_is_met() {
        let pulled = Cell::new(0);
        let source = records().into_iter().inspect(|_| pulled.set(pulled.get() + 1));

        let query = Query::builder().starts_with("img_").max_count(2).build().unwrap();
        let result = query.evaluate(source);

        assert_eq!(result.len(), 2);
        assert_eq!(pulled.get(), 3);
    }

    #[test]
    fn infinite_source_terminates() {
        let source = (0u64..).map(|n| (format!("item_{n}"), n));
        let query = Query::builder().ends_with("7").max_count(3).build().unwrap();

        let result = query.evaluate(source);
        assert_eq!(names(&result), ["item_7", "item_17", "item_27"]);
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        let query = Query::builder().equals("missing").max_count(5).build().unwrap();
        let result = query.evaluate(records());
        assert!(result.is_empty());
        assert!(!result.limit_reached());
    }

    #[test]
    fn matching_is_lazy() {
        let query = Query::builder().starts_with("img_").unbounded().build().unwrap();
        let mut matches = query.matching(records());

        assert_eq!(matches.next().map(|r| r.0), Some("img_001"));
        assert_eq!(matches.scanned(), 1);
        assert_eq!(matches.next().map(|r| r.0), Some("img_002"));
        assert_eq!(matches.scanned(), 3);
        assert_eq!(matches.matched(), 2);
    }

    #[test]
    fn size_hint_respects_bound() {
        let query = Query::builder().max_count(2).build().unwrap();
        let matches = query.matching(records());
        assert_eq!(matches.size_hint(), (0, Some(2)));

        let query = Query::builder().unbounded().build().unwrap();
        let matches = query.matching(records());
        assert_eq!(matches.size_hint(), (0, Some(4)));
    }

    #[test]
    fn try_evaluate_propagates_source_error() {
        let source: Vec<Result<(&str, u64), &str>> =
            vec![Ok(("img_001", 1)), Err("disk on fire"), Ok(("img_002", 2))];
        let query = Query::builder().unbounded().build().unwrap();

        assert_eq!(query.try_evaluate(source), Err("disk on fire"));
    }

    #[test]
    fn try_evaluate_ignores_errors_past_the_bound() {
        let source: Vec<Result<(&str, u64), &str>> =
            vec![Ok(("img_001", 1)), Ok(("img_002", 2)), Err("unreached")];
        let query = Query::builder().max_count(2).build().unwrap();

        let result = query.try_evaluate(source).unwrap();
        assert_eq!(names(&result), ["img_001", "img_002"]);
    }

    #[test]
    fn find_first_and_any() {
        let query = Query::builder().ends_with("_1").unbounded().build().unwrap();
        assert_eq!(query.find_first(records()), Some(("doc_1", 11)));
        assert!(query.any(records()));

        let query = Query::builder().newer(100u64).unbounded().build().unwrap();
        assert!(!query.any(records()));
    }

    #[test]
    fn evaluates_borrowed_records() {
        let owned = records();
        let query = Query::builder().older(12u64).unbounded().build().unwrap();
        let result = query.evaluate(&owned);
        assert_eq!(result.into_vec(), [&owned[0], &owned[1]]);
    }
}
