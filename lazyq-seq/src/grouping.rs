//! GroupBy and ToLookup.
//!
//! `to_lookup` is the eager primitive. `group_by` returns a lazy-looking
//! sequence, but its first advance builds the complete lookup (one full pass
//! over the source) before yielding the first group. Side effects of the
//! source or key selector are therefore all observed by the time the first
//! group is visible.

use crate::cursor::Producer;
use crate::sequence::Sequence;
use crate::upstream::Upstream;
use lazyq_lookup::{Grouping, Lookup, LookupBuilder, LookupOptions};
use lazyq_result::Result as LazyqResult;
use lazyq_types::{DefaultEquality, EqualityComparer};
use std::hash::Hash;
use std::rc::Rc;

impl<T: 'static> Sequence<T> {
    /// Group elements by key, in first-seen key order.
    pub fn group_by<K, F>(&self, key: F) -> Sequence<Grouping<K, T>>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.group_by_with(key, DefaultEquality)
    }

    /// GroupBy with a custom key comparer.
    pub fn group_by_with<K, F, C>(&self, key: F, comparer: C) -> Sequence<Grouping<K, T>>
    where
        K: 'static,
        F: Fn(&T) -> K + 'static,
        C: EqualityComparer<K> + Clone + 'static,
    {
        self.group_split(move |item| (key(&item), item), comparer)
    }

    /// GroupBy storing `element(item)` instead of the item itself.
    pub fn group_by_elements<K, E, F, G>(&self, key: F, element: G) -> Sequence<Grouping<K, E>>
    where
        K: Hash + Eq + 'static,
        E: 'static,
        F: Fn(&T) -> K + 'static,
        G: Fn(T) -> E + 'static,
    {
        self.group_split(move |item| (key(&item), element(item)), DefaultEquality)
    }

    fn group_split<K, E, S, C>(&self, split: S, comparer: C) -> Sequence<Grouping<K, E>>
    where
        K: 'static,
        E: 'static,
        S: Fn(T) -> (K, E) + 'static,
        C: EqualityComparer<K> + Clone + 'static,
    {
        let source = self.clone();
        let split = Rc::new(split);
        Sequence::from_producer(move || GroupBy {
            upstream: Upstream::new(source.clone()),
            split: Rc::clone(&split),
            comparer: comparer.clone(),
            groups: None,
        })
    }

    /// Build the lookup now, in one pass.
    pub fn to_lookup<K, F>(&self, key: F) -> LazyqResult<Lookup<K, T>>
    where
        K: Hash + Eq,
        F: Fn(&T) -> K,
    {
        self.to_lookup_with(key, DefaultEquality)
    }

    pub fn to_lookup_with<K, F, C>(&self, key: F, comparer: C) -> LazyqResult<Lookup<K, T, C>>
    where
        F: Fn(&T) -> K,
        C: EqualityComparer<K>,
    {
        Lookup::try_build(
            self.traverse(),
            comparer,
            LookupOptions::for_grouping(),
            |item| (key(&item), item),
        )
    }
}

impl<K: Clone + 'static, T: 'static> Sequence<Grouping<K, T>> {
    /// Replay the groups of an already built lookup.
    pub fn from_lookup<C>(lookup: Lookup<K, T, C>) -> Self {
        Sequence::from_vec(lookup.into_groups())
    }
}

impl<T: Clone + 'static> Sequence<T> {
    /// Replay the elements of one group without copying them.
    pub fn from_grouping<K>(group: &Grouping<K, T>) -> Self {
        Sequence::from_shared(group.shared_elements())
    }
}

struct GroupBy<T, K, E, S, C> {
    upstream: Upstream<T>,
    split: Rc<S>,
    comparer: C,
    groups: Option<std::vec::IntoIter<Grouping<K, E>>>,
}

impl<T, K, E, S, C> Producer for GroupBy<T, K, E, S, C>
where
    T: 'static,
    S: Fn(T) -> (K, E),
    C: EqualityComparer<K> + Clone,
{
    type Item = Grouping<K, E>;

    fn start(&mut self) -> LazyqResult<()> {
        let mut builder = LookupBuilder::new(self.comparer.clone(), LookupOptions::for_grouping());
        self.upstream.open();
        while let Some(item) = self.upstream.pull()? {
            let (key, element) = (self.split)(item);
            builder.push(key, element);
        }
        self.upstream.close();
        self.groups = Some(builder.finish().into_groups().into_iter());
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<Grouping<K, E>>> {
        Ok(self.groups.as_mut().and_then(Iterator::next))
    }

    fn dispose(&mut self) {
        self.upstream.close();
        self.groups = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazyq_types::{CaseInsensitive, NullAware};

    #[test]
    fn test_group_by_key_and_element_order() {
        let seq = Sequence::from_vec(vec![1, 2, 3, 4, 5, 6, 7]);
        let groups: Vec<(i32, Vec<i32>)> = seq
            .group_by(|x| x % 3)
            .traverse()
            .map(|g| {
                let g = g.unwrap();
                (*g.key(), g.elements().to_vec())
            })
            .collect();
        assert_eq!(
            groups,
            vec![(1, vec![1, 4, 7]), (2, vec![2, 5]), (0, vec![3, 6])]
        );
    }

    #[test]
    fn test_group_by_with_comparer_and_elements() {
        let words = Sequence::from_vec(vec!["Ant", "bee", "ape", "Bat"]);
        let by_initial = words.group_by_with(
            |w| w[..1].to_string(),
            CaseInsensitive,
        );
        let keys: Vec<String> = by_initial
            .traverse()
            .map(|g| g.unwrap().key().clone())
            .collect();
        assert_eq!(keys, vec!["A", "b"]);

        let lengths = words.group_by_elements(|w| w.len(), |w| w.to_uppercase());
        let first = lengths.traverse().next().unwrap().unwrap();
        assert_eq!(first.elements(), ["ANT", "BEE", "APE", "BAT"]);
    }

    #[test]
    fn test_to_lookup_null_keys() {
        let seq = Sequence::from_vec(vec![Some("a"), None, Some("b"), None]);
        let lookup = seq.to_lookup_with(|x| *x, NullAware(DefaultEquality)).unwrap();
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.get(&None), [None, None]);
        assert!(lookup.get(&Some("zzz")).is_empty());
    }

    #[test]
    fn test_lookup_and_grouping_replay() {
        let lookup = Sequence::from_vec(vec!["x1", "y1", "x2"])
            .to_lookup(|s| s.as_bytes()[0])
            .unwrap();
        let x_group = lookup.grouping(&b'x').unwrap().clone();
        let groups = Sequence::from_lookup(lookup);
        assert_eq!(groups.known_len(), Some(2));
        let replay = Sequence::from_grouping(&x_group);
        let values: Vec<&str> = replay.traverse().map(|r| r.unwrap()).collect();
        assert_eq!(values, vec!["x1", "x2"]);
    }
}
