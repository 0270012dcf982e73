//! AND-combined groups of predicates over one field kind.

use crate::predicate::Predicate;

/// An ordered group of predicates combined with AND.
///
/// Every predicate must pass for [`matches_all`](PredicateSet::matches_all)
/// to return `true`. An empty set imposes no constraint and passes every
/// value.
///
/// ```
/// use qaul_query::{NameLimit, NamePredicate, PredicateSet};
///
/// let mut set = PredicateSet::new();
/// set.push(NamePredicate::new("img_", NameLimit::StartsWith).unwrap());
/// set.push(NamePredicate::new(".png", NameLimit::EndsWith).unwrap());
///
/// assert!(set.matches_all("img_01.png"));
/// assert!(!set.matches_all("img_01.jpg"));
/// assert!(PredicateSet::<NamePredicate>::new().matches_all("anything"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredicateSet<P> {
    predicates: Vec<P>,
}

impl<P> Default for PredicateSet<P> {
    fn default() -> Self {
        PredicateSet {
            predicates: Vec::new(),
        }
    }
}

impl<P> PredicateSet<P> {
    /// Creates an empty set.
    pub fn new() -> Self {
        PredicateSet::default()
    }

    /// Appends a predicate.
    pub fn push(&mut self, predicate: P) {
        self.predicates.push(predicate);
    }

    /// Number of predicates in the set.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns `true` if the set has no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Iterates the predicates in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.predicates.iter()
    }

    /// The predicates as a slice.
    pub fn as_slice(&self) -> &[P] {
        &self.predicates
    }
}

impl<P: Predicate> PredicateSet<P> {
    /// Returns `true` if every predicate passes `value`.
    pub fn matches_all(&self, value: &P::Input) -> bool {
        self.predicates.iter().all(|pred| pred.matches(value))
    }
}

impl<P> FromIterator<P> for PredicateSet<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        PredicateSet {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl<P> From<Vec<P>> for PredicateSet<P> {
    fn from(predicates: Vec<P>) -> Self {
        PredicateSet { predicates }
    }
}

impl<'a, P> IntoIterator for &'a PredicateSet<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.predicates.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limit::{NameLimit, TimeLimit};
    use crate::predicate::{NamePredicate, TimePredicate};
    use crate::timestamp::Timestamp;

    fn names(preds: &[(&str, NameLimit)]) -> PredicateSet<NamePredicate> {
        preds
            .iter()
            .map(|(pattern, limit)| NamePredicate::new(*pattern, *limit).unwrap())
            .collect()
    }

    #[test]
    fn empty_sets_match_everything() {
        let names: PredicateSet<NamePredicate> = PredicateSet::new();
        assert!(names.matches_all(""));
        assert!(names.matches_all("whatever"));

        let times: PredicateSet<TimePredicate> = PredicateSet::new();
        assert!(times.matches_all(&Timestamp(0)));
        assert!(times.matches_all(&Timestamp(u64::MAX)));
    }

    #[test]
    fn all_predicates_must_pass() {
        let set = names(&[("a", NameLimit::Equals), ("a", NameLimit::StartsWith)]);
        assert!(set.matches_all("a"));
        assert!(!set.matches_all("ab"));
        assert!(!set.matches_all("b"));
    }

    #[test]
    fn time_window() {
        let set: PredicateSet<TimePredicate> = vec![
            TimePredicate::new(100u64, TimeLimit::Newer),
            TimePredicate::new(200u64, TimeLimit::Older),
        ]
        .into();

        assert!(set.matches_all(&Timestamp(150)));
        assert!(!set.matches_all(&Timestamp(100)));
        assert!(!set.matches_all(&Timestamp(200)));
        assert!(!set.matches_all(&Timestamp(250)));
    }

    #[test]
    fn contradictory_set_matches_nothing() {
        let set = names(&[("a", NameLimit::Equals), ("b", NameLimit::Equals)]);
        assert!(!set.matches_all("a"));
        assert!(!set.matches_all("b"));
    }

    #[test]
    fn preserves_insertion_order() {
        let set = names(&[("x", NameLimit::EndsWith), ("y", NameLimit::StartsWith)]);
        let patterns: Vec<&str> = set.iter().map(NamePredicate::pattern).collect();
        assert_eq!(patterns, ["x", "y"]);
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
    }
}
