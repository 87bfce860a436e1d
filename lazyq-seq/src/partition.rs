//! Partitioning: Take, Skip, TakeWhile, SkipWhile.

use crate::cursor::Producer;
use crate::sequence::{Sequence, Shape};
use crate::upstream::Upstream;
use lazyq_result::Result as LazyqResult;
use std::rc::Rc;

impl<T: 'static> Sequence<T> {
    /// The first `count` elements. Never pulls the element after the last one
    /// returned, and never opens the source when `count` is zero.
    pub fn take(&self, count: usize) -> Sequence<T> {
        let source = self.clone();
        let shape = match self.known_len() {
            Some(len) => Shape::Counted(len.min(count)),
            None => Shape::Opaque,
        };
        Sequence::from_producer(move || Take {
            upstream: Upstream::new(source.clone()),
            remaining: count,
        })
        .with_shape(shape)
    }

    /// Everything after the first `count` elements.
    pub fn skip(&self, count: usize) -> Sequence<T> {
        let source = self.clone();
        let shape = match self.known_len() {
            Some(len) => Shape::Counted(len.saturating_sub(count)),
            None => Shape::Opaque,
        };
        Sequence::from_producer(move || Skip {
            upstream: Upstream::new(source.clone()),
            to_skip: count,
        })
        .with_shape(shape)
    }

    /// Elements up to (not including) the first that fails `predicate`.
    pub fn take_while<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Sequence::from_producer(move || TakeWhile {
            upstream: Upstream::new(source.clone()),
            predicate: Rc::clone(&predicate),
            done: false,
        })
    }

    /// Elements from the first that fails `predicate` onwards.
    pub fn skip_while<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Sequence::from_producer(move || SkipWhile {
            upstream: Upstream::new(source.clone()),
            predicate: Rc::clone(&predicate),
            yielding: false,
        })
    }
}

struct Take<T> {
    upstream: Upstream<T>,
    remaining: usize,
}

impl<T: 'static> Producer for Take<T> {
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        if self.remaining > 0 {
            self.upstream.open();
        }
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let item = self.upstream.pull()?;
        if item.is_some() {
            self.remaining -= 1;
        }
        Ok(item)
    }

    fn dispose(&mut self) {
        self.upstream.close();
    }
}

struct Skip<T> {
    upstream: Upstream<T>,
    to_skip: usize,
}

impl<T: 'static> Producer for Skip<T> {
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        self.upstream.open();
        while self.to_skip > 0 {
            if self.upstream.pull()?.is_none() {
                break;
            }
            self.to_skip -= 1;
        }
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        self.upstream.pull()
    }

    fn dispose(&mut self) {
        self.upstream.close();
    }
}

struct TakeWhile<T, F> {
    upstream: Upstream<T>,
    predicate: Rc<F>,
    done: bool,
}

impl<T, F> Producer for TakeWhile<T, F>
where
    T: 'static,
    F: Fn(&T) -> bool,
{
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        self.upstream.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        if self.done {
            return Ok(None);
        }
        match self.upstream.pull()? {
            Some(item) if (self.predicate)(&item) => Ok(Some(item)),
            _ => {
                self.done = true;
                Ok(None)
            }
        }
    }

    fn dispose(&mut self) {
        self.upstream.close();
    }
}

struct SkipWhile<T, F> {
    upstream: Upstream<T>,
    predicate: Rc<F>,
    yielding: bool,
}

impl<T, F> Producer for SkipWhile<T, F>
where
    T: 'static,
    F: Fn(&T) -> bool,
{
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        self.upstream.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        if self.yielding {
            return self.upstream.pull();
        }
        while let Some(item) = self.upstream.pull()? {
            if !(self.predicate)(&item) {
                self.yielding = true;
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn dispose(&mut self) {
        self.upstream.close();
    }
}
