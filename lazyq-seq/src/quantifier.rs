//! Quantifiers and sequence equality.
//!
//! All of these short-circuit: the traversal is dropped (and so disposed) as
//! soon as the answer is known.

use crate::sequence::Sequence;
use lazyq_result::Result as LazyqResult;
use lazyq_types::{DefaultEquality, EqualityComparer};

impl<T: 'static> Sequence<T> {
    /// Whether the source has at least one element. Pulls at most one.
    pub fn any(&self) -> LazyqResult<bool> {
        if let Some(len) = self.known_len() {
            return Ok(len > 0);
        }
        Ok(self.traverse().advance()?.is_some())
    }

    pub fn any_by<F>(&self, predicate: F) -> LazyqResult<bool>
    where
        F: Fn(&T) -> bool,
    {
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            if predicate(&item) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// True for an empty source.
    pub fn all<F>(&self, predicate: F) -> LazyqResult<bool>
    where
        F: Fn(&T) -> bool,
    {
        Ok(!self.any_by(|item| !predicate(item))?)
    }

    pub fn contains(&self, value: &T) -> LazyqResult<bool>
    where
        T: PartialEq,
    {
        self.any_by(|item| item == value)
    }

    pub fn contains_with<C>(&self, value: &T, comparer: C) -> LazyqResult<bool>
    where
        C: EqualityComparer<T>,
    {
        self.any_by(|item| comparer.equals(item, value))
    }

    /// Pairwise equality, in order, of two sequences of equal length.
    pub fn sequence_equal(&self, other: &Sequence<T>) -> LazyqResult<bool>
    where
        T: std::hash::Hash + Eq,
    {
        self.sequence_equal_with(other, DefaultEquality)
    }

    pub fn sequence_equal_with<C>(&self, other: &Sequence<T>, comparer: C) -> LazyqResult<bool>
    where
        C: EqualityComparer<T>,
    {
        if let (Some(a), Some(b)) = (self.known_len(), other.known_len())
            && a != b
        {
            return Ok(false);
        }
        let mut left = self.traverse();
        let mut right = other.traverse();
        loop {
            match (left.advance()?, right.advance()?) {
                (None, None) => return Ok(true),
                (Some(a), Some(b)) if comparer.equals(&a, &b) => {}
                _ => return Ok(false),
            }
        }
    }
}
