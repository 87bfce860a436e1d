use crate::compare::{KeyCriterion, SortCriterion, SortDirection, sort_rows};
use lazyq_result::Result as LazyqResult;
use lazyq_seq::{Producer, Sequence, Upstream};
use lazyq_types::{Comparer, DefaultOrder};
use std::ops::Deref;
use std::rc::Rc;

/// A sequence sorted by one or more keys.
///
/// Built by [`SequenceOrderExt`](crate::SequenceOrderExt) and extended with
/// the `then_by*` methods. Every criterion lands in one composite comparator,
/// so the whole chain is a single stable sort. Dereferences to the sorted
/// [`Sequence`] for every other operator.
pub struct OrderedSequence<T> {
    source: Sequence<T>,
    criteria: Vec<Rc<dyn SortCriterion<T>>>,
    sorted: Sequence<T>,
}

impl<T> Clone for OrderedSequence<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            criteria: self.criteria.clone(),
            sorted: self.sorted.clone(),
        }
    }
}

impl<T: 'static> OrderedSequence<T> {
    pub(crate) fn new(source: Sequence<T>, first: Rc<dyn SortCriterion<T>>) -> Self {
        Self::with_criteria(source, vec![first])
    }

    fn with_criteria(source: Sequence<T>, criteria: Vec<Rc<dyn SortCriterion<T>>>) -> Self {
        let base = source.clone();
        let shared = criteria.clone();
        let mut sorted = Sequence::from_producer(move || SortProducer {
            upstream: Upstream::new(base.clone()),
            criteria: shared.clone(),
            rows: Vec::new().into_iter(),
        });
        if let Some(len) = source.known_len() {
            sorted = sorted.with_known_len(len);
        }
        Self {
            source,
            criteria,
            sorted,
        }
    }

    fn then(&self, next: Rc<dyn SortCriterion<T>>) -> Self {
        let mut criteria = self.criteria.clone();
        criteria.push(next);
        Self::with_criteria(self.source.clone(), criteria)
    }

    /// Break ties by `key`, ascending.
    pub fn then_by<K, F>(&self, key: F) -> Self
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.then_by_with(key, DefaultOrder)
    }

    pub fn then_by_descending<K, F>(&self, key: F) -> Self
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.then_by_descending_with(key, DefaultOrder)
    }

    pub fn then_by_with<K, F, C>(&self, key: F, comparer: C) -> Self
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Comparer<K> + 'static,
    {
        self.then(Rc::new(KeyCriterion::new(key, comparer, SortDirection::Ascending)))
    }

    pub fn then_by_descending_with<K, F, C>(&self, key: F, comparer: C) -> Self
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: Comparer<K> + 'static,
    {
        self.then(Rc::new(KeyCriterion::new(key, comparer, SortDirection::Descending)))
    }

    /// Re-sort by `key` alone.
    ///
    /// The existing criteria are not combined with `key`: the current sorted
    /// output becomes the input of a fresh single-key sort, so rows tied on
    /// `key` keep their previously sorted relative order. Use
    /// [`then_by`](OrderedSequence::then_by) to add a secondary key instead.
    pub fn order_by<K, F>(&self, key: F) -> Self
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.reorder(Rc::new(KeyCriterion::new(key, DefaultOrder, SortDirection::Ascending)))
    }

    pub fn order_by_descending<K, F>(&self, key: F) -> Self
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.reorder(Rc::new(KeyCriterion::new(key, DefaultOrder, SortDirection::Descending)))
    }

    fn reorder(&self, first: Rc<dyn SortCriterion<T>>) -> Self {
        tracing::debug!(
            discarded = self.criteria.len(),
            "order_by on an ordered sequence; prior criteria no longer compose"
        );
        Self::new(self.sorted.clone(), first)
    }

    /// Number of chained criteria.
    pub fn criteria_len(&self) -> usize {
        self.criteria.len()
    }

    pub fn as_sequence(&self) -> &Sequence<T> {
        &self.sorted
    }

    pub fn into_sequence(self) -> Sequence<T> {
        self.sorted
    }
}

impl<T> Deref for OrderedSequence<T> {
    type Target = Sequence<T>;

    fn deref(&self) -> &Sequence<T> {
        &self.sorted
    }
}

impl<T> From<OrderedSequence<T>> for Sequence<T> {
    fn from(ordered: OrderedSequence<T>) -> Self {
        ordered.sorted
    }
}

/// Buffers the whole source on the first advance, sorts it, then replays it.
struct SortProducer<T> {
    upstream: Upstream<T>,
    criteria: Vec<Rc<dyn SortCriterion<T>>>,
    rows: std::vec::IntoIter<T>,
}

impl<T: 'static> Producer for SortProducer<T> {
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        let rows = self.upstream.drain()?;
        tracing::debug!(
            rows = rows.len(),
            criteria = self.criteria.len(),
            primary = %self.criteria.first().map(|c| c.direction()).unwrap_or_default(),
            "sorting buffered rows"
        );
        self.rows = sort_rows(rows, &self.criteria).into_iter();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        Ok(self.rows.next())
    }

    fn dispose(&mut self) {
        self.upstream.close();
        self.rows = Vec::new().into_iter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SequenceOrderExt;

    #[derive(Clone, Debug, PartialEq)]
    struct Person {
        name: &'static str,
        age: u32,
    }

    fn people() -> Sequence<Person> {
        Sequence::from_vec(vec![
            Person { name: "Cleo", age: 30 },
            Person { name: "Abe", age: 25 },
            Person { name: "Bea", age: 30 },
            Person { name: "Abe", age: 41 },
        ])
    }

    fn names(seq: &Sequence<Person>) -> Vec<(&'static str, u32)> {
        seq.to_vec()
            .unwrap()
            .into_iter()
            .map(|p| (p.name, p.age))
            .collect()
    }

    #[test]
    fn test_then_by_is_secondary() {
        let sorted = people().order_by(|p| p.name).then_by_descending(|p| p.age);
        assert_eq!(sorted.criteria_len(), 2);
        assert_eq!(
            names(&sorted),
            vec![("Abe", 41), ("Abe", 25), ("Bea", 30), ("Cleo", 30)]
        );
        assert_eq!(sorted.known_len(), Some(4));
    }

    #[test]
    fn test_order_by_on_ordered_discards_criteria() {
        let by_name = people().order_by(|p| p.name);
        let by_age = by_name.order_by(|p| p.age);
        assert_eq!(by_age.criteria_len(), 1);
        // Ties on age keep the name order of the previous sort.
        assert_eq!(
            names(&by_age),
            vec![("Abe", 25), ("Bea", 30), ("Cleo", 30), ("Abe", 41)]
        );
    }

    #[test]
    fn test_sorted_sequence_composes() {
        let oldest = people()
            .order_by_descending(|p| p.age)
            .filter(|p| p.age < 40)
            .select(|p| p.name)
            .first()
            .unwrap();
        assert_eq!(oldest, "Cleo");
    }
}
