//! Materializing conversions: ToList, ToDictionary, ToHashSet.

use crate::sequence::Sequence;
use lazyq_result::{Error, Result as LazyqResult};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;

impl<T: 'static> Sequence<T> {
    /// Drain one traversal into a `Vec`.
    pub fn to_vec(&self) -> LazyqResult<Vec<T>> {
        let mut out = Vec::with_capacity(self.known_len().unwrap_or(0));
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            out.push(item);
        }
        Ok(out)
    }

    /// Map each element by a unique key.
    ///
    /// Fails with [`Error::DuplicateKey`] on the first repeated key. Use
    /// [`to_lookup`](Sequence::to_lookup) to group duplicates instead.
    pub fn to_dictionary<K, F>(&self, key: F) -> LazyqResult<FxHashMap<K, T>>
    where
        K: Hash + Eq + fmt::Debug,
        F: Fn(&T) -> K,
    {
        self.to_dictionary_with(key, |item| item)
    }

    pub fn to_dictionary_with<K, V, F, G>(&self, key: F, value: G) -> LazyqResult<FxHashMap<K, V>>
    where
        K: Hash + Eq + fmt::Debug,
        F: Fn(&T) -> K,
        G: Fn(T) -> V,
    {
        let mut map = FxHashMap::default();
        map.reserve(self.known_len().unwrap_or(0));
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            match map.entry(key(&item)) {
                Entry::Occupied(slot) => return Err(Error::duplicate_key(slot.key())),
                Entry::Vacant(slot) => {
                    slot.insert(value(item));
                }
            }
        }
        Ok(map)
    }

    pub fn to_hash_set(&self) -> LazyqResult<FxHashSet<T>>
    where
        T: Hash + Eq,
    {
        let mut set = FxHashSet::default();
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            set.insert(item);
        }
        Ok(set)
    }
}
