//! Combining and reshaping: Concat, Zip, Append, Prepend, DefaultIfEmpty, Reverse.

use crate::cursor::Producer;
use crate::sequence::{Sequence, Shape};
use crate::upstream::Upstream;
use lazyq_result::Result as LazyqResult;
use std::rc::Rc;

impl<T: 'static> Sequence<T> {
    /// Every element of `self`, then every element of `other`.
    ///
    /// `other` is not opened until `self` is exhausted.
    pub fn concat(&self, other: &Sequence<T>) -> Sequence<T> {
        let first = self.clone();
        let second = other.clone();
        let shape = match (self.known_len(), other.known_len()) {
            (Some(a), Some(b)) => a.checked_add(b).map_or(Shape::Opaque, Shape::Counted),
            _ => Shape::Opaque,
        };
        Sequence::from_producer(move || Concat {
            first: Upstream::new(first.clone()),
            second: Upstream::new(second.clone()),
            on_second: false,
        })
        .with_shape(shape)
    }

    /// Pair elements positionally; stops at the end of the shorter input.
    ///
    /// `other` is only advanced after `self` produced an element.
    pub fn zip<U, R, F>(&self, other: &Sequence<U>, selector: F) -> Sequence<R>
    where
        U: 'static,
        R: 'static,
        F: Fn(T, U) -> R + 'static,
    {
        let first = self.clone();
        let second = other.clone();
        let selector = Rc::new(selector);
        let shape = match (self.known_len(), other.known_len()) {
            (Some(a), Some(b)) => Shape::Counted(a.min(b)),
            _ => Shape::Opaque,
        };
        Sequence::from_producer(move || Zip {
            first: Upstream::new(first.clone()),
            second: Upstream::new(second.clone()),
            selector: Rc::clone(&selector),
        })
        .with_shape(shape)
    }

    pub fn append(&self, value: T) -> Sequence<T>
    where
        T: Clone,
    {
        self.concat(&Sequence::from_vec(vec![value]))
    }

    pub fn prepend(&self, value: T) -> Sequence<T>
    where
        T: Clone,
    {
        Sequence::from_vec(vec![value]).concat(self)
    }

    /// The source, or a single `T::default()` when the source is empty.
    pub fn default_if_empty(&self) -> Sequence<T>
    where
        T: Clone + Default,
    {
        self.default_if_empty_with(T::default())
    }

    /// The source, or a single `value` when the source is empty.
    pub fn default_if_empty_with(&self, value: T) -> Sequence<T>
    where
        T: Clone,
    {
        let source = self.clone();
        let value = Rc::new(value);
        Sequence::from_producer(move || DefaultIfEmpty {
            upstream: Upstream::new(source.clone()),
            fallback: Some(Rc::clone(&value)),
        })
    }

    /// Elements in reverse order.
    ///
    /// The whole source is buffered on the first advance, so this never
    /// completes on an infinite source.
    pub fn reverse(&self) -> Sequence<T> {
        let source = self.clone();
        let shape = match self.known_len() {
            Some(len) => Shape::Counted(len),
            None => Shape::Opaque,
        };
        Sequence::from_producer(move || Reverse {
            upstream: Upstream::new(source.clone()),
            buffer: Vec::new(),
        })
        .with_shape(shape)
    }
}

struct Concat<T> {
    first: Upstream<T>,
    second: Upstream<T>,
    on_second: bool,
}

impl<T: 'static> Producer for Concat<T> {
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        self.first.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        if !self.on_second {
            if let Some(item) = self.first.pull()? {
                return Ok(Some(item));
            }
            self.first.close();
            self.second.open();
            self.on_second = true;
        }
        self.second.pull()
    }

    fn dispose(&mut self) {
        self.first.close();
        self.second.close();
    }
}

struct Zip<T, U, F> {
    first: Upstream<T>,
    second: Upstream<U>,
    selector: Rc<F>,
}

impl<T, U, R, F> Producer for Zip<T, U, F>
where
    T: 'static,
    U: 'static,
    F: Fn(T, U) -> R,
{
    type Item = R;

    fn start(&mut self) -> LazyqResult<()> {
        self.first.open();
        self.second.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<R>> {
        let Some(left) = self.first.pull()? else {
            return Ok(None);
        };
        let Some(right) = self.second.pull()? else {
            return Ok(None);
        };
        Ok(Some((self.selector)(left, right)))
    }

    fn dispose(&mut self) {
        self.first.close();
        self.second.close();
    }
}

struct DefaultIfEmpty<T> {
    upstream: Upstream<T>,
    fallback: Option<Rc<T>>,
}

impl<T: Clone + 'static> Producer for DefaultIfEmpty<T> {
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        self.upstream.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        match self.upstream.pull()? {
            Some(item) => {
                self.fallback = None;
                Ok(Some(item))
            }
            None => Ok(self.fallback.take().map(|value| (*value).clone())),
        }
    }

    fn dispose(&mut self) {
        self.upstream.close();
    }
}

struct Reverse<T> {
    upstream: Upstream<T>,
    buffer: Vec<T>,
}

impl<T: 'static> Producer for Reverse<T> {
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        self.buffer = self.upstream.drain()?;
        tracing::debug!(rows = self.buffer.len(), "reverse buffered source");
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        Ok(self.buffer.pop())
    }

    fn dispose(&mut self) {
        self.upstream.close();
        self.buffer = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect<T: 'static>(seq: &Sequence<T>) -> Vec<T> {
        seq.traverse().map(|r| r.unwrap()).collect()
    }

    #[test]
    fn test_concat_append_prepend() {
        let a = Sequence::from_vec(vec![1, 2]);
        let b = Sequence::from_vec(vec![3]);
        let joined = a.concat(&b).append(4).prepend(0);
        assert_eq!(collect(&joined), vec![0, 1, 2, 3, 4]);
        assert_eq!(joined.known_len(), Some(5));
    }

    #[test]
    fn test_zip_stops_at_shorter() {
        let nums = Sequence::range(1, 5).unwrap();
        let words = Sequence::from_vec(vec!["one", "two", "three"]);
        let zipped = nums.zip(&words, |n, w| format!("{n}-{w}"));
        assert_eq!(collect(&zipped), vec!["1-one", "2-two", "3-three"]);
        assert_eq!(zipped.known_len(), Some(3));
    }

    #[test]
    fn test_default_if_empty() {
        let empty: Sequence<i32> = Sequence::empty();
        assert_eq!(collect(&empty.default_if_empty()), vec![0]);
        assert_eq!(collect(&empty.default_if_empty_with(9)), vec![9]);
        let some = Sequence::from_vec(vec![4, 5]);
        assert_eq!(collect(&some.default_if_empty()), vec![4, 5]);
    }

    #[test]
    fn test_reverse() {
        let seq = Sequence::from_vec(vec!['a', 'b', 'c']).reverse();
        assert_eq!(collect(&seq), vec!['c', 'b', 'a']);
        // Each traversal buffers its own copy.
        assert_eq!(collect(&seq), vec!['c', 'b', 'a']);
    }
}
