use lazyq_types::{DefaultEquality, EqualityComparer};
use rustc_hash::FxHashMap;

/// Hash set over a pluggable [`EqualityComparer`].
///
/// Values the comparer reports as null share a single slot.
pub struct KeySet<T, C = DefaultEquality> {
    buckets: FxHashMap<u64, Vec<T>>,
    has_null: bool,
    len: usize,
    comparer: C,
}

impl<T, C> KeySet<T, C>
where
    C: EqualityComparer<T>,
{
    pub fn new(comparer: C) -> Self {
        Self {
            buckets: FxHashMap::default(),
            has_null: false,
            len: 0,
            comparer,
        }
    }

    /// Insert `value`; returns false if an equal value was already present.
    pub fn add(&mut self, value: T) -> bool {
        if self.comparer.is_null(&value) {
            if self.has_null {
                return false;
            }
            self.has_null = true;
            self.len += 1;
            return true;
        }
        let hash = self.comparer.hash_code(&value);
        let bucket = self.buckets.entry(hash).or_default();
        if bucket.iter().any(|v| self.comparer.equals(v, &value)) {
            return false;
        }
        bucket.push(value);
        self.len += 1;
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        if self.comparer.is_null(value) {
            return self.has_null;
        }
        let hash = self.comparer.hash_code(value);
        self.buckets
            .get(&hash)
            .is_some_and(|bucket| bucket.iter().any(|v| self.comparer.equals(v, value)))
    }

    /// Remove the value equal to `value`; returns false if none was present.
    pub fn remove(&mut self, value: &T) -> bool {
        if self.comparer.is_null(value) {
            let had = self.has_null;
            if had {
                self.has_null = false;
                self.len -= 1;
            }
            return had;
        }
        let hash = self.comparer.hash_code(value);
        let Some(bucket) = self.buckets.get_mut(&hash) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|v| self.comparer.equals(v, value)) else {
            return false;
        };
        bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&hash);
        }
        self.len -= 1;
        true
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<T, C> Extend<T> for KeySet<T, C>
where
    C: EqualityComparer<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}
