//! Hash Join and GroupJoin over lazyq sequences.
//!
//! [`SequenceJoinExt`] adds the join operators to every [`Sequence`]. The outer
//! sequence streams; the inner sequence is hashed into a
//! [`Lookup`](lazyq_lookup::Lookup) on demand (see [`hash_join`]). Keys the
//! comparer reports as null never match, on either side.
#![forbid(unsafe_code)]

mod hash_join;

use hash_join::{BuildSide, GroupJoin, InnerJoin};
use lazyq_seq::{Sequence, Upstream};
use lazyq_types::{DefaultEquality, EqualityComparer};
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

/// Shape of the join output.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinType {
    /// One result per matching (outer, inner) pair.
    Inner,
    /// One result per outer element, carrying every match.
    Group,
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinType::Inner => write!(f, "INNER"),
            JoinType::Group => write!(f, "GROUP"),
        }
    }
}

/// Extension trait adding Join and GroupJoin to [`Sequence`].
pub trait SequenceJoinExt<O> {
    /// Inner equi-join.
    ///
    /// Results follow outer order; for each outer element, matches follow
    /// inner order.
    fn join<I, K, FO, FI, R, U>(
        &self,
        inner: &Sequence<I>,
        outer_key: FO,
        inner_key: FI,
        result: R,
    ) -> Sequence<U>
    where
        I: 'static,
        K: Hash + Eq + 'static,
        FO: Fn(&O) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        R: Fn(&O, &I) -> U + 'static,
        U: 'static;

    /// Inner join under a custom key comparer.
    fn join_with<I, K, FO, FI, R, U, C>(
        &self,
        inner: &Sequence<I>,
        outer_key: FO,
        inner_key: FI,
        result: R,
        comparer: C,
    ) -> Sequence<U>
    where
        I: 'static,
        K: 'static,
        FO: Fn(&O) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        R: Fn(&O, &I) -> U + 'static,
        U: 'static,
        C: EqualityComparer<K> + Clone + 'static;

    /// Correlate each outer element with its (possibly empty) group of inner
    /// matches.
    fn group_join<I, K, FO, FI, R, U>(
        &self,
        inner: &Sequence<I>,
        outer_key: FO,
        inner_key: FI,
        result: R,
    ) -> Sequence<U>
    where
        I: 'static,
        K: Hash + Eq + 'static,
        FO: Fn(&O) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        R: Fn(&O, &[I]) -> U + 'static,
        U: 'static;

    fn group_join_with<I, K, FO, FI, R, U, C>(
        &self,
        inner: &Sequence<I>,
        outer_key: FO,
        inner_key: FI,
        result: R,
        comparer: C,
    ) -> Sequence<U>
    where
        I: 'static,
        K: 'static,
        FO: Fn(&O) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        R: Fn(&O, &[I]) -> U + 'static,
        U: 'static,
        C: EqualityComparer<K> + Clone + 'static;
}

impl<O: 'static> SequenceJoinExt<O> for Sequence<O> {
    fn join<I, K, FO, FI, R, U>(
        &self,
        inner: &Sequence<I>,
        outer_key: FO,
        inner_key: FI,
        result: R,
    ) -> Sequence<U>
    where
        I: 'static,
        K: Hash + Eq + 'static,
        FO: Fn(&O) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        R: Fn(&O, &I) -> U + 'static,
        U: 'static,
    {
        self.join_with(inner, outer_key, inner_key, result, DefaultEquality)
    }

    fn join_with<I, K, FO, FI, R, U, C>(
        &self,
        inner: &Sequence<I>,
        outer_key: FO,
        inner_key: FI,
        result: R,
        comparer: C,
    ) -> Sequence<U>
    where
        I: 'static,
        K: 'static,
        FO: Fn(&O) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        R: Fn(&O, &I) -> U + 'static,
        U: 'static,
        C: EqualityComparer<K> + Clone + 'static,
    {
        let outer = self.clone();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let result = Rc::new(result);
        Sequence::from_producer(move || InnerJoin {
            outer: Upstream::new(outer.clone()),
            outer_key: Rc::clone(&outer_key),
            build: BuildSide {
                inner: Upstream::new(inner.clone()),
                inner_key: Rc::clone(&inner_key),
                comparer: comparer.clone(),
                join_type: JoinType::Inner,
                lookup: None,
            },
            result: Rc::clone(&result),
            pending: None,
        })
    }

    fn group_join<I, K, FO, FI, R, U>(
        &self,
        inner: &Sequence<I>,
        outer_key: FO,
        inner_key: FI,
        result: R,
    ) -> Sequence<U>
    where
        I: 'static,
        K: Hash + Eq + 'static,
        FO: Fn(&O) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        R: Fn(&O, &[I]) -> U + 'static,
        U: 'static,
    {
        self.group_join_with(inner, outer_key, inner_key, result, DefaultEquality)
    }

    fn group_join_with<I, K, FO, FI, R, U, C>(
        &self,
        inner: &Sequence<I>,
        outer_key: FO,
        inner_key: FI,
        result: R,
        comparer: C,
    ) -> Sequence<U>
    where
        I: 'static,
        K: 'static,
        FO: Fn(&O) -> K + 'static,
        FI: Fn(&I) -> K + 'static,
        R: Fn(&O, &[I]) -> U + 'static,
        U: 'static,
        C: EqualityComparer<K> + Clone + 'static,
    {
        let outer = self.clone();
        let inner = inner.clone();
        let outer_key = Rc::new(outer_key);
        let inner_key = Rc::new(inner_key);
        let result = Rc::new(result);
        Sequence::from_producer(move || GroupJoin {
            outer: Upstream::new(outer.clone()),
            outer_key: Rc::clone(&outer_key),
            build: BuildSide {
                inner: Upstream::new(inner.clone()),
                inner_key: Rc::clone(&inner_key),
                comparer: comparer.clone(),
                join_type: JoinType::Group,
                lookup: None,
            },
            result: Rc::clone(&result),
        })
    }
}
