//! Hash-based set operators: Distinct, Union, Intersect, Except.
//!
//! All of them run over a [`KeySet`] built fresh per traversal, so repeated
//! traversals (or repeated calls against the same second sequence) never share
//! state. Output preserves first-sequence order.

use crate::cursor::Producer;
use crate::sequence::Sequence;
use crate::upstream::Upstream;
use lazyq_lookup::KeySet;
use lazyq_result::Result as LazyqResult;
use lazyq_types::{DefaultEquality, EqualityComparer};
use std::fmt;
use std::hash::Hash;

/// How an element of the first sequence is tested against the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SetMode {
    /// Yield when inserting succeeds. The set starts empty (Distinct) or
    /// seeded with the second sequence (Except).
    Insert,
    /// Yield when removing succeeds. The set starts seeded (Intersect).
    Remove,
}

impl fmt::Display for SetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetMode::Insert => write!(f, "INSERT"),
            SetMode::Remove => write!(f, "REMOVE"),
        }
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Elements in first-seen order, dropping later duplicates.
    pub fn distinct(&self) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        self.distinct_with(DefaultEquality)
    }

    pub fn distinct_with<C>(&self, comparer: C) -> Sequence<T>
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        self.set_op(None, SetMode::Insert, comparer)
    }

    /// Distinct elements of `self` followed by those of `other` not yet seen.
    pub fn union(&self, other: &Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        self.union_with(other, DefaultEquality)
    }

    pub fn union_with<C>(&self, other: &Sequence<T>, comparer: C) -> Sequence<T>
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        self.concat(other).distinct_with(comparer)
    }

    /// Distinct elements of `self` that also occur in `other`.
    ///
    /// `other` is read completely on the first advance.
    pub fn intersect(&self, other: &Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        self.intersect_with(other, DefaultEquality)
    }

    pub fn intersect_with<C>(&self, other: &Sequence<T>, comparer: C) -> Sequence<T>
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        self.set_op(Some(other.clone()), SetMode::Remove, comparer)
    }

    /// Distinct elements of `self` that do not occur in `other`.
    ///
    /// `other` is read completely on the first advance.
    pub fn except(&self, other: &Sequence<T>) -> Sequence<T>
    where
        T: Hash + Eq,
    {
        self.except_with(other, DefaultEquality)
    }

    pub fn except_with<C>(&self, other: &Sequence<T>, comparer: C) -> Sequence<T>
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        self.set_op(Some(other.clone()), SetMode::Insert, comparer)
    }

    fn set_op<C>(&self, seed: Option<Sequence<T>>, mode: SetMode, comparer: C) -> Sequence<T>
    where
        C: EqualityComparer<T> + Clone + 'static,
    {
        let source = self.clone();
        Sequence::from_producer(move || SetFilter {
            upstream: Upstream::new(source.clone()),
            seed: seed.clone().map(Upstream::new),
            mode,
            comparer: comparer.clone(),
            set: None,
        })
    }
}

struct SetFilter<T, C> {
    upstream: Upstream<T>,
    seed: Option<Upstream<T>>,
    mode: SetMode,
    comparer: C,
    set: Option<KeySet<T, C>>,
}

impl<T, C> Producer for SetFilter<T, C>
where
    T: Clone + 'static,
    C: EqualityComparer<T> + Clone,
{
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        let mut set = KeySet::new(self.comparer.clone());
        if let Some(seed) = self.seed.as_mut() {
            set.extend(seed.drain()?);
            tracing::debug!(mode = %self.mode, seeded = set.len(), "set operator seeded");
        }
        self.set = Some(set);
        self.upstream.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        let Some(set) = self.set.as_mut() else {
            return Ok(None);
        };
        while let Some(item) = self.upstream.pull()? {
            let keep = match self.mode {
                SetMode::Insert => set.add(item.clone()),
                SetMode::Remove => set.remove(&item),
            };
            if keep {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn dispose(&mut self) {
        self.upstream.close();
        if let Some(seed) = self.seed.as_mut() {
            seed.close();
        }
        self.set = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_types::CaseInsensitive;

    fn collect<T: 'static>(seq: &Sequence<T>) -> Vec<T> {
        seq.traverse().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_except_and_intersect_dedup() {
        let left = Sequence::from_vec(vec![1, 2, 3, 4, 4]);
        let right = Sequence::from_vec(vec![3, 4, 5, 6]);
        assert_eq!(collect(&left.except(&right)), vec![1, 2]);
        assert_eq!(collect(&left.intersect(&right)), vec![3, 4]);
    }

    #[test]
    fn test_except_removes_left_duplicates() {
        let left = Sequence::from_vec(vec![7, 1, 7, 1, 2]);
        let right = Sequence::from_vec(vec![2]);
        assert_eq!(collect(&left.except(&right)), vec![7, 1]);
    }

    #[test]
    fn test_intersect_repeatable() {
        let left = Sequence::from_vec(vec![1, 2, 2, 3]);
        let right = Sequence::from_vec(vec![2, 3]);
        let both = left.intersect(&right);
        assert_eq!(collect(&both), vec![2, 3]);
        assert_eq!(collect(&both), vec![2, 3]);
        assert_eq!(collect(&left.intersect(&right)), vec![2, 3]);
    }

    #[test]
    fn test_distinct_and_union() {
        let a = Sequence::from_vec(vec![3, 1, 3, 2, 1]);
        let b = Sequence::from_vec(vec![2, 5, 3, 6]);
        assert_eq!(collect(&a.distinct()), vec![3, 1, 2]);
        assert_eq!(collect(&a.union(&b)), vec![3, 1, 2, 5, 6]);
    }

    #[test]
    fn test_set_ops_with_comparer() {
        let a = Sequence::from_vec(vec!["Red".to_string(), "red".into(), "Blue".into()]);
        let b = Sequence::from_vec(vec!["BLUE".to_string()]);
        assert_eq!(collect(&a.distinct_with(CaseInsensitive)), vec!["Red", "Blue"]);
        assert_eq!(collect(&a.except_with(&b, CaseInsensitive)), vec!["Red"]);
        assert_eq!(collect(&a.intersect_with(&b, CaseInsensitive)), vec!["Blue"]);
    }
}
