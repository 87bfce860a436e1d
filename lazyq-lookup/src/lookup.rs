//! Insertion-ordered multi-map.
//!
//! Layout:
//! - `keys[i]` / `values[i]` hold group `i` in first-seen order.
//! - `buckets` maps a comparer hash to the indices of the groups sharing it;
//!   collisions are resolved with `EqualityComparer::equals`.
//! - `null_group` is the index of the null-key group, if one was opened. Null
//!   keys are never hashed.

use crate::options::{LookupOptions, NullKeyPolicy};
use lazyq_result::Result as LazyqResult;
use lazyq_types::{DefaultEquality, EqualityComparer};
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// A key and every element that mapped to it, in source order.
#[derive(Debug)]
pub struct Grouping<K, T> {
    key: K,
    elements: Rc<[T]>,
}

impl<K, T> Grouping<K, T> {
    pub fn new(key: K, elements: Vec<T>) -> Self {
        Self {
            key,
            elements: elements.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    /// Shared handle to the elements; cloning it does not copy them.
    pub fn shared_elements(&self) -> Rc<[T]> {
        Rc::clone(&self.elements)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn into_parts(self) -> (K, Rc<[T]>) {
        (self.key, self.elements)
    }
}

impl<K: Clone, T> Clone for Grouping<K, T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            elements: Rc::clone(&self.elements),
        }
    }
}

impl<K: PartialEq, T: PartialEq> PartialEq for Grouping<K, T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.elements == other.elements
    }
}

impl<'a, K, T> IntoIterator for &'a Grouping<K, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

/// Accumulates key/element pairs in one pass, then freezes into a [`Lookup`].
pub struct LookupBuilder<K, T, C = DefaultEquality> {
    keys: Vec<K>,
    values: Vec<Vec<T>>,
    buckets: FxHashMap<u64, Vec<usize>>,
    null_group: Option<usize>,
    comparer: C,
    options: LookupOptions,
    elements: usize,
}

impl<K, T, C> LookupBuilder<K, T, C>
where
    C: EqualityComparer<K>,
{
    pub fn new(comparer: C, options: LookupOptions) -> Self {
        let capacity = options.capacity;
        Self {
            keys: Vec::with_capacity(capacity),
            values: Vec::with_capacity(capacity),
            buckets: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            null_group: None,
            comparer,
            options,
            elements: 0,
        }
    }

    /// Append `value` to the group of `key`, opening the group on first sight.
    pub fn push(&mut self, key: K, value: T) {
        if self.comparer.is_null(&key) {
            if self.options.null_keys == NullKeyPolicy::Skip {
                return;
            }
            let idx = match self.null_group {
                Some(idx) => idx,
                None => {
                    let idx = self.open_group(key);
                    self.null_group = Some(idx);
                    idx
                }
            };
            self.values[idx].push(value);
            self.elements += 1;
            return;
        }

        let hash = self.comparer.hash_code(&key);
        let bucket = self.buckets.entry(hash).or_default();
        let found = bucket
            .iter()
            .copied()
            .find(|&idx| self.comparer.equals(&self.keys[idx], &key));
        match found {
            Some(idx) => self.values[idx].push(value),
            None => {
                let idx = self.keys.len();
                self.keys.push(key);
                self.values.push(vec![value]);
                bucket.push(idx);
            }
        }
        self.elements += 1;
    }

    /// Drain a fallible source into the builder, splitting each item into a
    /// key and the element stored under it. Stops at the first error.
    pub fn try_extend<S, I, F>(&mut self, items: I, mut split: F) -> LazyqResult<()>
    where
        I: IntoIterator<Item = LazyqResult<S>>,
        F: FnMut(S) -> (K, T),
    {
        for item in items {
            let (key, value) = split(item?);
            self.push(key, value);
        }
        Ok(())
    }

    pub fn finish(self) -> Lookup<K, T, C> {
        tracing::debug!(
            keys = self.keys.len(),
            elements = self.elements,
            null_group = self.null_group.is_some(),
            "lookup built"
        );
        let groups = self
            .keys
            .into_iter()
            .zip(self.values)
            .map(|(key, values)| Grouping::new(key, values))
            .collect();
        Lookup {
            groups,
            buckets: self.buckets,
            null_group: self.null_group,
            comparer: self.comparer,
        }
    }

    fn open_group(&mut self, key: K) -> usize {
        let idx = self.keys.len();
        self.keys.push(key);
        self.values.push(Vec::new());
        idx
    }
}

/// Immutable multi-map from key to an ordered group of elements.
///
/// Looking up an absent key yields an empty slice, never an error. Iteration
/// visits groups in first-seen key order; the null-key group (if any) sits at
/// the position where its first element appeared.
pub struct Lookup<K, T, C = DefaultEquality> {
    groups: Vec<Grouping<K, T>>,
    buckets: FxHashMap<u64, Vec<usize>>,
    null_group: Option<usize>,
    comparer: C,
}

impl<K, T, C> Lookup<K, T, C>
where
    C: EqualityComparer<K>,
{
    /// Build a lookup from a fallible source in a single pass.
    pub fn try_build<S, I, F>(
        items: I,
        comparer: C,
        options: LookupOptions,
        split: F,
    ) -> LazyqResult<Self>
    where
        I: IntoIterator<Item = LazyqResult<S>>,
        F: FnMut(S) -> (K, T),
    {
        let mut builder = LookupBuilder::new(comparer, options);
        builder.try_extend(items, split)?;
        Ok(builder.finish())
    }

    fn index_of(&self, key: &K) -> Option<usize> {
        if self.comparer.is_null(key) {
            return self.null_group;
        }
        let hash = self.comparer.hash_code(key);
        self.buckets.get(&hash).and_then(|bucket| {
            bucket
                .iter()
                .copied()
                .find(|&idx| self.comparer.equals(&self.groups[idx].key, key))
        })
    }

    /// Elements stored under `key`, or an empty slice.
    pub fn get(&self, key: &K) -> &[T] {
        self.index_of(key)
            .map_or(&[], |idx| self.groups[idx].elements())
    }

    pub fn grouping(&self, key: &K) -> Option<&Grouping<K, T>> {
        self.index_of(key).map(|idx| &self.groups[idx])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.index_of(key).is_some()
    }
}

impl<K, T, C> Lookup<K, T, C> {
    /// Number of distinct keys, counting the null-key group when present.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn groups(&self) -> &[Grouping<K, T>] {
        &self.groups
    }

    pub fn null_group(&self) -> Option<&Grouping<K, T>> {
        self.null_group.map(|idx| &self.groups[idx])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Grouping<K, T>> {
        self.groups.iter()
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    pub fn into_groups(self) -> Vec<Grouping<K, T>> {
        self.groups
    }
}

impl<'a, K, T, C> IntoIterator for &'a Lookup<K, T, C> {
    type Item = &'a Grouping<K, T>;
    type IntoIter = std::slice::Iter<'a, Grouping<K, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_types::{CaseInsensitive, NullAware};

    fn words() -> Vec<&'static str> {
        vec!["apple", "avocado", "banana", "blueberry", "cherry", "apricot"]
    }

    #[test]
    fn test_first_seen_order() {
        let lookup = Lookup::try_build(
            words().into_iter().map(Ok),
            DefaultEquality,
            LookupOptions::for_grouping(),
            |w: &str| (w.as_bytes()[0], w),
        )
        .unwrap();

        let keys: Vec<u8> = lookup.iter().map(|g| *g.key()).collect();
        assert_eq!(keys, vec![b'a', b'b', b'c']);
        assert_eq!(lookup.get(&b'a'), ["apple", "avocado", "apricot"]);
        assert_eq!(lookup.len(), 3);
    }

    #[test]
    fn test_absent_key_is_empty() {
        let lookup: Lookup<i32, i32> = Lookup::try_build(
            vec![Ok(1), Ok(2)],
            DefaultEquality,
            LookupOptions::default(),
            |v| (v, v),
        )
        .unwrap();
        assert!(lookup.get(&42).is_empty());
        assert!(!lookup.contains_key(&42));
    }

    #[test]
    fn test_null_group_position_and_policy() {
        let items = vec![Some(1), None, Some(2), None, Some(1)];
        let grouped = Lookup::try_build(
            items.iter().copied().map(Ok),
            NullAware(DefaultEquality),
            LookupOptions::for_grouping(),
            |k: Option<i32>| (k, k),
        )
        .unwrap();
        let keys: Vec<Option<i32>> = grouped.iter().map(|g| *g.key()).collect();
        assert_eq!(keys, vec![Some(1), None, Some(2)]);
        assert_eq!(grouped.get(&None).len(), 2);
        assert_eq!(grouped.null_group().map(Grouping::len), Some(2));

        let skipped = Lookup::try_build(
            items.into_iter().map(Ok),
            NullAware(DefaultEquality),
            LookupOptions::for_join(),
            |k: Option<i32>| (k, k),
        )
        .unwrap();
        assert_eq!(skipped.len(), 2);
        assert!(skipped.get(&None).is_empty());
    }

    #[test]
    fn test_custom_comparer_merges_keys() {
        let lookup = Lookup::try_build(
            ["Red", "red", "BLUE", "RED"].into_iter().map(|s| Ok(s.to_string())),
            CaseInsensitive,
            LookupOptions::for_grouping(),
            |s: String| (s.clone(), s),
        )
        .unwrap();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.groups()[0].key(), "Red");
        assert_eq!(lookup.get(&"rEd".to_string()), ["Red", "red", "RED"]);
    }

    #[test]
    fn test_build_stops_on_error() {
        let items = vec![Ok(1), Err(lazyq_result::Error::NoMatch), Ok(3)];
        let res: LazyqResult<Lookup<i32, i32>> = Lookup::try_build(
            items,
            DefaultEquality,
            LookupOptions::default(),
            |v| (v, v),
        );
        assert!(matches!(res, Err(lazyq_result::Error::NoMatch)));
    }
}
