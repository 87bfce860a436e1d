//! Re-traversable sequences.
//!
//! A [`Sequence`] is an immutable factory: it captures some root state (a
//! snapshot slice, an upstream sequence plus a closure, ...) and builds a fresh
//! [`Cursor`] every time [`traverse`](Sequence::traverse) is called. Two cursors
//! from the same sequence never share a position, so traversals may be
//! interleaved freely.
//!
//! Constructing a sequence, or layering operators on top of one, does no
//! per-element work. Nothing runs until some cursor is advanced.

use crate::cursor::{Cursor, Producer};
use lazyq_result::{Error, Result as LazyqResult};
use std::fmt;
use std::rc::Rc;

type CursorFactory<T> = dyn Fn() -> Cursor<T>;

/// What is known about a sequence without traversing it.
pub(crate) enum Shape<T> {
    Opaque,
    /// Element count is known up front.
    Counted(usize),
    /// Element count is known and elements can be fetched by position.
    Indexed {
        len: usize,
        at: Rc<dyn Fn(usize) -> Option<T>>,
    },
}

impl<T> Shape<T> {
    pub(crate) fn len(&self) -> Option<usize> {
        match self {
            Shape::Opaque => None,
            Shape::Counted(len) | Shape::Indexed { len, .. } => Some(*len),
        }
    }
}

impl<T> Clone for Shape<T> {
    fn clone(&self) -> Self {
        match self {
            Shape::Opaque => Shape::Opaque,
            Shape::Counted(len) => Shape::Counted(*len),
            Shape::Indexed { len, at } => Shape::Indexed {
                len: *len,
                at: Rc::clone(at),
            },
        }
    }
}

/// A lazily evaluated, repeatable source of elements.
pub struct Sequence<T> {
    factory: Rc<CursorFactory<T>>,
    shape: Shape<T>,
}

impl<T> Clone for Sequence<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
            shape: self.shape.clone(),
        }
    }
}

impl<T> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sequence")
            .field("known_len", &self.shape.len())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> Sequence<T> {
    /// Wrap a cursor factory. The factory runs once per traversal.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Cursor<T> + 'static,
    {
        Self {
            factory: Rc::new(factory),
            shape: Shape::Opaque,
        }
    }

    /// A sequence whose traversals each run a fresh producer from `make`.
    pub fn from_producer<P, F>(make: F) -> Self
    where
        P: Producer<Item = T> + 'static,
        F: Fn() -> P + 'static,
    {
        Self::new(move || Cursor::new(make()))
    }

    pub(crate) fn with_shape(mut self, shape: Shape<T>) -> Self {
        self.shape = shape;
        self
    }

    /// Declare the element count of a sequence built by another crate.
    ///
    /// Every traversal must then yield exactly `len` elements; `count`, `any`
    /// and `sequence_equal` trust it without traversing.
    pub fn with_known_len(self, len: usize) -> Self {
        self.with_shape(Shape::Counted(len))
    }

    /// Start an independent traversal.
    pub fn traverse(&self) -> Cursor<T> {
        (self.factory)()
    }

    /// Element count, when it is known without traversing.
    pub fn known_len(&self) -> Option<usize> {
        self.shape.len()
    }

    /// Fetch by position without traversing, for indexable sources.
    ///
    /// Returns `None` when the source is not indexable. `Some(None)` means the
    /// source is indexable but `index` is past its end.
    pub fn try_get(&self, index: usize) -> Option<Option<T>> {
        match &self.shape {
            Shape::Indexed { at, .. } => Some(at(index)),
            _ => None,
        }
    }

    /// A sequence with no elements.
    pub fn empty() -> Self {
        Self::from_producer(|| Empty(std::marker::PhantomData)).with_shape(Shape::Counted(0))
    }

    /// Snapshot `values`; every traversal replays them in order.
    pub fn from_vec(values: Vec<T>) -> Self
    where
        T: Clone,
    {
        Self::from_shared(values.into())
    }

    /// Replay a shared slice without copying it.
    pub fn from_shared(values: Rc<[T]>) -> Self
    where
        T: Clone,
    {
        let len = values.len();
        let items = Rc::clone(&values);
        let at: Rc<dyn Fn(usize) -> Option<T>> = Rc::new(move |idx| values.get(idx).cloned());
        Self::from_producer(move || SliceProducer {
            items: Rc::clone(&items),
            pos: 0,
        })
        .with_shape(Shape::Indexed { len, at })
    }

    /// Re-run `make` on every traversal and drain the std iterator it returns.
    ///
    /// `make` is only called when the traversal starts, not when the cursor is
    /// created.
    pub fn from_iter_fn<I, F>(make: F) -> Self
    where
        I: IntoIterator<Item = T> + 'static,
        I::IntoIter: 'static,
        F: Fn() -> I + 'static,
    {
        let make = Rc::new(make);
        Self::from_producer(move || IterProducer::<I, F> {
            make: Rc::clone(&make),
            iter: None,
        })
    }

    /// `value` repeated `count` times.
    pub fn repeat(value: T, count: i32) -> LazyqResult<Self>
    where
        T: Clone,
    {
        let count = usize::try_from(count).map_err(|_| {
            Error::InvalidArgumentError(format!("repeat count must be >= 0, got {count}"))
        })?;
        let value = Rc::new(value);
        let at_value = Rc::clone(&value);
        let at: Rc<dyn Fn(usize) -> Option<T>> =
            Rc::new(move |idx| (idx < count).then(|| (*at_value).clone()));
        Ok(Self::from_producer(move || RepeatProducer {
            value: Rc::clone(&value),
            remaining: count,
        })
        .with_shape(Shape::Indexed { len: count, at }))
    }
}

impl Sequence<i32> {
    /// `count` consecutive integers starting at `start`.
    ///
    /// Fails when `count` is negative or the last value would not fit in `i32`.
    pub fn range(start: i32, count: i32) -> LazyqResult<Self> {
        if count < 0 {
            return Err(Error::InvalidArgumentError(format!(
                "range count must be >= 0, got {count}"
            )));
        }
        if i64::from(start) + i64::from(count) - 1 > i64::from(i32::MAX) {
            return Err(Error::InvalidArgumentError(format!(
                "range of {count} values starting at {start} exceeds i32::MAX"
            )));
        }
        let len = count as usize;
        let at: Rc<dyn Fn(usize) -> Option<i32>> =
            Rc::new(move |idx| (idx < len).then(|| start + idx as i32));
        Ok(Self::from_producer(move || RangeProducer {
            next: start,
            remaining: count,
        })
        .with_shape(Shape::Indexed { len, at }))
    }
}

impl<'a, T: 'static> IntoIterator for &'a Sequence<T> {
    type Item = LazyqResult<T>;
    type IntoIter = Cursor<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.traverse()
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::from_vec(values)
    }
}

struct Empty<T>(std::marker::PhantomData<T>);

impl<T> Producer for Empty<T> {
    type Item = T;

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        Ok(None)
    }
}

struct SliceProducer<T> {
    items: Rc<[T]>,
    pos: usize,
}

impl<T: Clone> Producer for SliceProducer<T> {
    type Item = T;

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        let item = self.items.get(self.pos).cloned();
        if item.is_some() {
            self.pos += 1;
        }
        Ok(item)
    }
}

struct IterProducer<I: IntoIterator, F> {
    make: Rc<F>,
    iter: Option<I::IntoIter>,
}

impl<I, F> Producer for IterProducer<I, F>
where
    I: IntoIterator,
    F: Fn() -> I,
{
    type Item = I::Item;

    fn start(&mut self) -> LazyqResult<()> {
        self.iter = Some((self.make)().into_iter());
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<I::Item>> {
        Ok(self.iter.as_mut().and_then(Iterator::next))
    }

    fn dispose(&mut self) {
        self.iter = None;
    }
}

struct RepeatProducer<T> {
    value: Rc<T>,
    remaining: usize,
}

impl<T: Clone> Producer for RepeatProducer<T> {
    type Item = T;

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        Ok(Some((*self.value).clone()))
    }
}

struct RangeProducer {
    next: i32,
    remaining: i32,
}

impl Producer for RangeProducer {
    type Item = i32;

    fn produce(&mut self) -> LazyqResult<Option<i32>> {
        if self.remaining == 0 {
            return Ok(None);
        }
        let value = self.next;
        self.remaining -= 1;
        // The last value may be i32::MAX; only step when more remain.
        if self.remaining > 0 {
            self.next += 1;
        }
        Ok(Some(value))
    }
}
