//! Terminal aggregation operators.
//!
//! [`SequenceAggregateExt`] adds Count, Sum, Min/Max, Average and Aggregate to
//! every [`Sequence`]; [`NullableAggregateExt`] adds the variants over
//! `Option` elements that skip `None`. Every method runs one traversal and
//! returns.
//!
//! Empty-source behaviour:
//! - `sum` returns zero;
//! - `min`, `max`, `average` and the unseeded `aggregate` fail with
//!   [`Error::EmptySequence`];
//! - the nullable forms return `None` instead of failing.
#![forbid(unsafe_code)]

mod accumulator;
mod numeric;

pub use accumulator::{Extremum, ExtremumKind, Mean, Sum};
pub use numeric::Numeric;

use lazyq_result::{Error, Result as LazyqResult};
use lazyq_seq::Sequence;
use lazyq_types::Comparer;

/// Extension trait adding the aggregation operators to [`Sequence`].
pub trait SequenceAggregateExt<T> {
    /// Number of elements. Sources with a known length answer without
    /// traversing; others are walked without keeping any element.
    fn count(&self) -> LazyqResult<usize>;

    fn count_by<F>(&self, predicate: F) -> LazyqResult<usize>
    where
        F: Fn(&T) -> bool;

    /// Count as `u64`.
    fn long_count(&self) -> LazyqResult<u64>;

    /// Checked sum; zero for an empty source.
    fn sum(&self) -> LazyqResult<T>
    where
        T: Numeric;

    fn sum_by<N, F>(&self, selector: F) -> LazyqResult<N>
    where
        N: Numeric,
        F: Fn(&T) -> N;

    fn min(&self) -> LazyqResult<T>
    where
        T: Ord;

    fn max(&self) -> LazyqResult<T>
    where
        T: Ord;

    fn min_with<C>(&self, comparer: C) -> LazyqResult<T>
    where
        C: Comparer<T>;

    fn max_with<C>(&self, comparer: C) -> LazyqResult<T>
    where
        C: Comparer<T>;

    /// Smallest projected value.
    fn min_of<K, F>(&self, selector: F) -> LazyqResult<K>
    where
        K: Ord,
        F: Fn(&T) -> K;

    /// Largest projected value.
    fn max_of<K, F>(&self, selector: F) -> LazyqResult<K>
    where
        K: Ord,
        F: Fn(&T) -> K;

    /// The element whose key is smallest; the first one on ties.
    fn min_by_key<K, F>(&self, key: F) -> LazyqResult<T>
    where
        K: Ord,
        F: Fn(&T) -> K;

    /// The element whose key is largest; the first one on ties.
    fn max_by_key<K, F>(&self, key: F) -> LazyqResult<T>
    where
        K: Ord,
        F: Fn(&T) -> K;

    fn average(&self) -> LazyqResult<f64>
    where
        T: Numeric;

    fn average_by<N, F>(&self, selector: F) -> LazyqResult<f64>
    where
        N: Numeric,
        F: Fn(&T) -> N;

    /// Fold with the first element as the seed.
    fn aggregate<F>(&self, func: F) -> LazyqResult<T>
    where
        F: Fn(T, T) -> T;

    fn aggregate_seeded<A, F>(&self, seed: A, func: F) -> LazyqResult<A>
    where
        F: Fn(A, T) -> A;

    /// Seeded fold followed by a projection of the final accumulator.
    fn aggregate_result<A, R, F, G>(&self, seed: A, func: F, result: G) -> LazyqResult<R>
    where
        F: Fn(A, T) -> A,
        G: FnOnce(A) -> R;
}

impl<T: 'static> SequenceAggregateExt<T> for Sequence<T> {
    fn count(&self) -> LazyqResult<usize> {
        if let Some(len) = self.known_len() {
            tracing::trace!(len, "count answered from known length");
            return Ok(len);
        }
        self.count_by(|_| true)
    }

    fn count_by<F>(&self, predicate: F) -> LazyqResult<usize>
    where
        F: Fn(&T) -> bool,
    {
        let mut cursor = self.traverse();
        let mut count = 0usize;
        while let Some(item) = cursor.advance()? {
            if predicate(&item) {
                count = count
                    .checked_add(1)
                    .ok_or_else(|| Error::overflow("count exceeded usize::MAX"))?;
            }
        }
        Ok(count)
    }

    fn long_count(&self) -> LazyqResult<u64> {
        let count = self.count()?;
        u64::try_from(count).map_err(|_| Error::overflow("count exceeded u64::MAX"))
    }

    fn sum(&self) -> LazyqResult<T>
    where
        T: Numeric,
    {
        self.sum_by(|item| *item)
    }

    fn sum_by<N, F>(&self, selector: F) -> LazyqResult<N>
    where
        N: Numeric,
        F: Fn(&T) -> N,
    {
        let mut sum = Sum::new();
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            sum.add(selector(&item))?;
        }
        Ok(sum.finish())
    }

    fn min(&self) -> LazyqResult<T>
    where
        T: Ord,
    {
        extremum(self, ExtremumKind::Min, |a, b| a.cmp(b))
    }

    fn max(&self) -> LazyqResult<T>
    where
        T: Ord,
    {
        extremum(self, ExtremumKind::Max, |a, b| a.cmp(b))
    }

    fn min_with<C>(&self, comparer: C) -> LazyqResult<T>
    where
        C: Comparer<T>,
    {
        extremum(self, ExtremumKind::Min, |a, b| comparer.compare(a, b))
    }

    fn max_with<C>(&self, comparer: C) -> LazyqResult<T>
    where
        C: Comparer<T>,
    {
        extremum(self, ExtremumKind::Max, |a, b| comparer.compare(a, b))
    }

    fn min_of<K, F>(&self, selector: F) -> LazyqResult<K>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        projected_extremum(self, ExtremumKind::Min, selector)
    }

    fn max_of<K, F>(&self, selector: F) -> LazyqResult<K>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        projected_extremum(self, ExtremumKind::Max, selector)
    }

    fn min_by_key<K, F>(&self, key: F) -> LazyqResult<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        keyed_extremum(self, ExtremumKind::Min, key)
    }

    fn max_by_key<K, F>(&self, key: F) -> LazyqResult<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        keyed_extremum(self, ExtremumKind::Max, key)
    }

    fn average(&self) -> LazyqResult<f64>
    where
        T: Numeric,
    {
        self.average_by(|item| *item)
    }

    fn average_by<N, F>(&self, selector: F) -> LazyqResult<f64>
    where
        N: Numeric,
        F: Fn(&T) -> N,
    {
        let mut mean = Mean::default();
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            mean.add(selector(&item));
        }
        mean.finish().ok_or(Error::EmptySequence)
    }

    fn aggregate<F>(&self, func: F) -> LazyqResult<T>
    where
        F: Fn(T, T) -> T,
    {
        let mut cursor = self.traverse();
        let mut acc = cursor.advance()?.ok_or(Error::EmptySequence)?;
        while let Some(item) = cursor.advance()? {
            acc = func(acc, item);
        }
        Ok(acc)
    }

    fn aggregate_seeded<A, F>(&self, seed: A, func: F) -> LazyqResult<A>
    where
        F: Fn(A, T) -> A,
    {
        let mut cursor = self.traverse();
        let mut acc = seed;
        while let Some(item) = cursor.advance()? {
            acc = func(acc, item);
        }
        Ok(acc)
    }

    fn aggregate_result<A, R, F, G>(&self, seed: A, func: F, result: G) -> LazyqResult<R>
    where
        F: Fn(A, T) -> A,
        G: FnOnce(A) -> R,
    {
        Ok(result(self.aggregate_seeded(seed, func)?))
    }
}

fn extremum<T, F>(seq: &Sequence<T>, kind: ExtremumKind, compare: F) -> LazyqResult<T>
where
    T: 'static,
    F: Fn(&T, &T) -> std::cmp::Ordering,
{
    let mut best = Extremum::new(kind);
    let mut cursor = seq.traverse();
    while let Some(item) = cursor.advance()? {
        best.update_by(item, &compare);
    }
    best.finish().ok_or(Error::EmptySequence)
}

fn projected_extremum<T, K, F>(seq: &Sequence<T>, kind: ExtremumKind, selector: F) -> LazyqResult<K>
where
    T: 'static,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut best = Extremum::new(kind);
    let mut cursor = seq.traverse();
    while let Some(item) = cursor.advance()? {
        best.update_by(selector(&item), K::cmp);
    }
    best.finish().ok_or(Error::EmptySequence)
}

fn keyed_extremum<T, K, F>(seq: &Sequence<T>, kind: ExtremumKind, key: F) -> LazyqResult<T>
where
    T: 'static,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut best = Extremum::new(kind);
    let mut cursor = seq.traverse();
    while let Some(item) = cursor.advance()? {
        let k = key(&item);
        best.update_by((k, item), |a, b| a.0.cmp(&b.0));
    }
    best.finish()
        .map(|(_, item)| item)
        .ok_or(Error::EmptySequence)
}

/// Aggregates over `Option` elements. `None` elements are skipped.
pub trait NullableAggregateExt<T> {
    /// `None` when the source has no `Some` element.
    fn min_nullable(&self) -> LazyqResult<Option<T>>
    where
        T: Ord;

    fn max_nullable(&self) -> LazyqResult<Option<T>>
    where
        T: Ord;

    /// Sum of the `Some` elements; zero when there are none.
    fn sum_nullable(&self) -> LazyqResult<T>
    where
        T: Numeric;

    fn average_nullable(&self) -> LazyqResult<Option<f64>>
    where
        T: Numeric;
}

impl<T: 'static> NullableAggregateExt<T> for Sequence<Option<T>> {
    fn min_nullable(&self) -> LazyqResult<Option<T>>
    where
        T: Ord,
    {
        nullable_extremum(self, ExtremumKind::Min)
    }

    fn max_nullable(&self) -> LazyqResult<Option<T>>
    where
        T: Ord,
    {
        nullable_extremum(self, ExtremumKind::Max)
    }

    fn sum_nullable(&self) -> LazyqResult<T>
    where
        T: Numeric,
    {
        let mut sum = Sum::new();
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            if let Some(value) = item {
                sum.add(value)?;
            }
        }
        Ok(sum.finish())
    }

    fn average_nullable(&self) -> LazyqResult<Option<f64>>
    where
        T: Numeric,
    {
        let mut mean = Mean::default();
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            if let Some(value) = item {
                mean.add(value);
            }
        }
        Ok(mean.finish())
    }
}

fn nullable_extremum<T>(seq: &Sequence<Option<T>>, kind: ExtremumKind) -> LazyqResult<Option<T>>
where
    T: Ord + 'static,
{
    let mut best = Extremum::new(kind);
    let mut cursor = seq.traverse();
    while let Some(item) = cursor.advance()? {
        if let Some(value) = item {
            best.update_by(value, T::cmp);
        }
    }
    Ok(best.finish())
}
