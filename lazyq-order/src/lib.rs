//! Ordering operators for lazyq sequences.
//!
//! [`SequenceOrderExt`] adds `order_by` and friends to every
//! [`Sequence`]. They return an [`OrderedSequence`], which accepts further
//! `then_by*` criteria. Sorting is deferred: the first advance of a traversal
//! buffers the whole source, extracts every key once per criterion, and runs a
//! single stable sort over row positions.
//!
//! ```
//! use lazyq_order::SequenceOrderExt;
//! use lazyq_seq::Sequence;
//!
//! let words = Sequence::from_vec(vec!["pear", "fig", "apple", "kiwi"]);
//! let sorted = words.order_by(|w| w.len()).then_by(|w| *w);
//! assert_eq!(sorted.to_vec().unwrap(), vec!["fig", "kiwi", "pear", "apple"]);
//! ```
#![forbid(unsafe_code)]

mod compare;
mod ordered;

pub use compare::SortDirection;
pub use ordered::OrderedSequence;

use compare::KeyCriterion;
use lazyq_seq::Sequence;
use lazyq_types::{Comparer, DefaultOrder};
use std::rc::Rc;

/// Extension trait adding OrderBy to [`Sequence`].
pub trait SequenceOrderExt<T> {
    /// Sort ascending by `key`.
    fn order_by<K, F>(&self, key: F) -> OrderedSequence<T>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static;

    fn order_by_descending<K, F>(&self, key: F) -> OrderedSequence<T>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static;

    /// Sort ascending by `key` under a custom [`Comparer`].
    fn order_by_with<K, F, C>(&self, key: F, comparer: C) -> OrderedSequence<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Comparer<K> + 'static;

    fn order_by_descending_with<K, F, C>(&self, key: F, comparer: C) -> OrderedSequence<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Comparer<K> + 'static;

    /// Sort by `key` in the given direction.
    fn order_by_direction<K, F>(&self, key: F, direction: SortDirection) -> OrderedSequence<T>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static;
}

impl<T: 'static> SequenceOrderExt<T> for Sequence<T> {
    fn order_by<K, F>(&self, key: F) -> OrderedSequence<T>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.order_by_direction(key, SortDirection::Ascending)
    }

    fn order_by_descending<K, F>(&self, key: F) -> OrderedSequence<T>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.order_by_direction(key, SortDirection::Descending)
    }

    fn order_by_with<K, F, C>(&self, key: F, comparer: C) -> OrderedSequence<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Comparer<K> + 'static,
    {
        let first = KeyCriterion::new(key, comparer, SortDirection::Ascending);
        OrderedSequence::new(self.clone(), Rc::new(first))
    }

    fn order_by_descending_with<K, F, C>(&self, key: F, comparer: C) -> OrderedSequence<T>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Comparer<K> + 'static,
    {
        let first = KeyCriterion::new(key, comparer, SortDirection::Descending);
        OrderedSequence::new(self.clone(), Rc::new(first))
    }

    fn order_by_direction<K, F>(&self, key: F, direction: SortDirection) -> OrderedSequence<T>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let first = KeyCriterion::new(key, DefaultOrder, direction);
        OrderedSequence::new(self.clone(), Rc::new(first))
    }
}
