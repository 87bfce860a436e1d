//! Element access: First, Last, Single, ElementAt and their OrDefault forms.
//!
//! These are terminal: each call runs one traversal and returns. The plain
//! forms fail with [`Error::EmptySequence`] (or [`Error::NoMatch`] when a
//! predicate is given); the `_or_default` forms return `T::default()` instead.

use crate::sequence::Sequence;
use lazyq_result::{Error, Result as LazyqResult};

/// Outcome of scanning for a unique match.
enum Unique<T> {
    None,
    One(T),
    Many,
}

impl<T: 'static> Sequence<T> {
    pub fn first(&self) -> LazyqResult<T> {
        self.traverse().advance()?.ok_or(Error::EmptySequence)
    }

    /// First element satisfying `predicate`; stops pulling once found.
    pub fn first_by<F>(&self, predicate: F) -> LazyqResult<T>
    where
        F: Fn(&T) -> bool,
    {
        self.find_first(predicate)?.ok_or(Error::NoMatch)
    }

    pub fn first_or_default(&self) -> LazyqResult<T>
    where
        T: Default,
    {
        Ok(self.traverse().advance()?.unwrap_or_default())
    }

    pub fn first_or_default_by<F>(&self, predicate: F) -> LazyqResult<T>
    where
        T: Default,
        F: Fn(&T) -> bool,
    {
        Ok(self.find_first(predicate)?.unwrap_or_default())
    }

    /// Last element. Indexable sources answer without traversing.
    pub fn last(&self) -> LazyqResult<T> {
        self.find_last(|_| true)?.ok_or(Error::EmptySequence)
    }

    pub fn last_by<F>(&self, predicate: F) -> LazyqResult<T>
    where
        F: Fn(&T) -> bool,
    {
        self.find_last(predicate)?.ok_or(Error::NoMatch)
    }

    pub fn last_or_default(&self) -> LazyqResult<T>
    where
        T: Default,
    {
        Ok(self.find_last(|_| true)?.unwrap_or_default())
    }

    pub fn last_or_default_by<F>(&self, predicate: F) -> LazyqResult<T>
    where
        T: Default,
        F: Fn(&T) -> bool,
    {
        Ok(self.find_last(predicate)?.unwrap_or_default())
    }

    /// The only element.
    ///
    /// Fails with [`Error::EmptySequence`] when there is none and with
    /// [`Error::MultipleMatches`] when there is more than one.
    pub fn single(&self) -> LazyqResult<T> {
        match self.find_unique(|_| true)? {
            Unique::None => Err(Error::EmptySequence),
            Unique::One(item) => Ok(item),
            Unique::Many => Err(Error::MultipleMatches),
        }
    }

    /// The only element satisfying `predicate`. After the first match the scan
    /// continues until the source ends or a second match turns up.
    pub fn single_by<F>(&self, predicate: F) -> LazyqResult<T>
    where
        F: Fn(&T) -> bool,
    {
        match self.find_unique(predicate)? {
            Unique::None => Err(Error::NoMatch),
            Unique::One(item) => Ok(item),
            Unique::Many => Err(Error::MultipleMatches),
        }
    }

    /// Like [`single`](Sequence::single) but an empty source yields
    /// `T::default()`. More than one element still fails.
    pub fn single_or_default(&self) -> LazyqResult<T>
    where
        T: Default,
    {
        self.single_or_default_by(|_| true)
    }

    pub fn single_or_default_by<F>(&self, predicate: F) -> LazyqResult<T>
    where
        T: Default,
        F: Fn(&T) -> bool,
    {
        match self.find_unique(predicate)? {
            Unique::None => Ok(T::default()),
            Unique::One(item) => Ok(item),
            Unique::Many => Err(Error::MultipleMatches),
        }
    }

    /// Element at zero-based `index`.
    ///
    /// Indexable sources are read directly; anything else is walked forward.
    /// Fails with [`Error::IndexOutOfRange`] carrying the observed length.
    pub fn element_at(&self, index: usize) -> LazyqResult<T> {
        self.find_at(index)?
            .map_err(|len| Error::IndexOutOfRange { index, len })
    }

    pub fn element_at_or_default(&self, index: usize) -> LazyqResult<T>
    where
        T: Default,
    {
        Ok(self.find_at(index)?.unwrap_or_default())
    }

    fn find_first<F>(&self, predicate: F) -> LazyqResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut cursor = self.traverse();
        while let Some(item) = cursor.advance()? {
            if predicate(&item) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn find_last<F>(&self, predicate: F) -> LazyqResult<Option<T>>
    where
        F: Fn(&T) -> bool,
    {
        if let Some(len) = self.known_len() {
            // Walk an indexable source backwards; the first hit is the last match.
            if self.try_get(0).is_some() {
                for idx in (0..len).rev() {
                    match self.try_get(idx).flatten() {
                        Some(item) if predicate(&item) => return Ok(Some(item)),
                        _ => {}
                    }
                }
                return Ok(None);
            }
        }
        let mut cursor = self.traverse();
        let mut found = None;
        while let Some(item) = cursor.advance()? {
            if predicate(&item) {
                found = Some(item);
            }
        }
        Ok(found)
    }

    fn find_unique<F>(&self, predicate: F) -> LazyqResult<Unique<T>>
    where
        F: Fn(&T) -> bool,
    {
        let mut cursor = self.traverse();
        let mut found = Unique::None;
        while let Some(item) = cursor.advance()? {
            if !predicate(&item) {
                continue;
            }
            match found {
                Unique::None => found = Unique::One(item),
                Unique::One(_) | Unique::Many => return Ok(Unique::Many),
            }
        }
        Ok(found)
    }

    /// `Ok(Err(len))` when the source ended after `len` elements.
    fn find_at(&self, index: usize) -> LazyqResult<std::result::Result<T, usize>> {
        if let (Some(len), Some(hit)) = (self.known_len(), self.try_get(index)) {
            return Ok(hit.ok_or(len));
        }
        let mut cursor = self.traverse();
        let mut seen = 0usize;
        while let Some(item) = cursor.advance()? {
            if seen == index {
                return Ok(Ok(item));
            }
            seen += 1;
        }
        Ok(Err(seen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn opaque(values: Vec<i32>) -> Sequence<i32> {
        Sequence::from_iter_fn(move || values.clone())
    }

    #[test]
    fn test_first_variants() {
        let seq = opaque(vec![4, 5, 6]);
        assert_eq!(seq.first().unwrap(), 4);
        assert_eq!(seq.first_by(|x| x % 2 == 1).unwrap(), 5);
        assert_eq!(seq.first_by(|x| *x > 10), Err(Error::NoMatch));
        assert_eq!(seq.first_or_default_by(|x| *x > 10).unwrap(), 0);

        let empty = opaque(vec![]);
        assert_eq!(empty.first(), Err(Error::EmptySequence));
        assert_eq!(empty.first_or_default().unwrap(), 0);
    }

    #[test]
    fn test_first_stops_pulling() {
        let pulls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&pulls);
        let seq = Sequence::range(1, 100).unwrap().select(move |x| {
            seen.set(seen.get() + 1);
            x
        });
        assert_eq!(seq.first_by(|x| *x == 3).unwrap(), 3);
        assert_eq!(pulls.get(), 3);
    }

    #[test]
    fn test_last_indexed_and_opaque() {
        let indexed = Sequence::from_vec(vec![1, 2, 3, 4]);
        assert_eq!(indexed.last().unwrap(), 4);
        assert_eq!(indexed.last_by(|x| x % 2 == 1).unwrap(), 3);

        let walked = opaque(vec![1, 2, 3, 4]);
        assert_eq!(walked.last().unwrap(), 4);
        assert_eq!(walked.last_by(|x| *x < 3).unwrap(), 2);
        assert_eq!(walked.last_by(|x| *x > 9), Err(Error::NoMatch));
        assert_eq!(opaque(vec![]).last(), Err(Error::EmptySequence));
        assert_eq!(opaque(vec![]).last_or_default().unwrap(), 0);
    }

    #[test]
    fn test_single_failure_modes() {
        assert_eq!(opaque(vec![]).single(), Err(Error::EmptySequence));
        assert_eq!(opaque(vec![1, 2]).single(), Err(Error::MultipleMatches));
        assert_eq!(opaque(vec![1, 2]).single_by(|x| *x == 1).unwrap(), 1);
        assert_eq!(
            opaque(vec![1, 1]).single_by(|x| *x == 1),
            Err(Error::MultipleMatches)
        );
        assert_eq!(opaque(vec![2]).single_by(|x| *x == 1), Err(Error::NoMatch));
        assert_eq!(opaque(vec![]).single_or_default().unwrap(), 0);
        assert_eq!(
            opaque(vec![3, 4]).single_or_default(),
            Err(Error::MultipleMatches)
        );
    }

    #[test]
    fn test_single_stops_at_second_match() {
        let pulls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&pulls);
        let unbounded = Sequence::from_iter_fn(|| 0u32..).select(move |x| {
            seen.set(seen.get() + 1);
            x
        });
        assert_eq!(unbounded.single(), Err(Error::MultipleMatches));
        assert_eq!(pulls.get(), 2);
        assert_eq!(
            unbounded.single_by(|x| x % 10 == 3),
            Err(Error::MultipleMatches)
        );
        assert_eq!(pulls.get(), 2 + 14);
    }

    #[test]
    fn test_element_at() {
        let indexed = Sequence::from_vec(vec!['a', 'b']);
        assert_eq!(indexed.element_at(1).unwrap(), 'b');
        assert_eq!(
            indexed.element_at(5),
            Err(Error::IndexOutOfRange { index: 5, len: 2 })
        );

        let walked = opaque(vec![10, 20, 30]);
        assert_eq!(walked.element_at(2).unwrap(), 30);
        assert_eq!(
            walked.element_at(3),
            Err(Error::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(walked.element_at_or_default(7).unwrap(), 0);
    }
}
