//! Single-pass filtering and projection: Where, Select, SelectMany, Cast, OfType.
//!
//! Each operator returns a sequence whose producer holds one [`Upstream`] and
//! applies its closure per pulled element. Nothing is buffered.

use crate::cursor::{Cursor, Producer};
use crate::sequence::{Sequence, Shape};
use crate::upstream::Upstream;
use lazyq_result::{Error, Result as LazyqResult};
use lazyq_types::{FromVariant, Variant};
use std::marker::PhantomData;
use std::rc::Rc;

/// Running element index for the indexed operator variants.
///
/// Fails with [`Error::Overflow`] instead of wrapping.
#[derive(Debug, Default)]
struct ElementIndex(usize);

impl ElementIndex {
    fn bump(&mut self) -> LazyqResult<usize> {
        let index = self.0;
        self.0 = index
            .checked_add(1)
            .ok_or_else(|| Error::overflow("element index exceeded usize::MAX"))?;
        Ok(index)
    }
}

impl<T: 'static> Sequence<T> {
    /// Keep the elements for which `predicate` holds (Where).
    pub fn filter<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.filter_indexed(move |item, _| predicate(item))
    }

    /// Where, with the zero-based position of each source element.
    pub fn filter_indexed<F>(&self, predicate: F) -> Sequence<T>
    where
        F: Fn(&T, usize) -> bool + 'static,
    {
        let source = self.clone();
        let predicate = Rc::new(predicate);
        Sequence::from_producer(move || Filter {
            upstream: Upstream::new(source.clone()),
            predicate: Rc::clone(&predicate),
            index: ElementIndex::default(),
        })
    }

    /// Project each element (Select).
    pub fn select<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        self.select_indexed(move |item, _| selector(item))
    }

    /// Select, with the zero-based position of each element.
    pub fn select_indexed<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(T, usize) -> U + 'static,
    {
        let source = self.clone();
        let selector = Rc::new(selector);
        let shape = match self.known_len() {
            Some(len) => Shape::Counted(len),
            None => Shape::Opaque,
        };
        Sequence::from_producer(move || Select {
            upstream: Upstream::new(source.clone()),
            selector: Rc::clone(&selector),
            index: ElementIndex::default(),
        })
        .with_shape(shape)
    }

    /// Flatten the sequence each element maps to (SelectMany).
    pub fn select_many<U, F>(&self, selector: F) -> Sequence<U>
    where
        U: 'static,
        F: Fn(&T) -> Sequence<U> + 'static,
    {
        self.select_many_with(selector, |_, inner| inner)
    }

    /// SelectMany with a result selector that also sees the outer element.
    pub fn select_many_with<C, U, F, R>(&self, collection: F, result: R) -> Sequence<U>
    where
        C: 'static,
        U: 'static,
        F: Fn(&T) -> Sequence<C> + 'static,
        R: Fn(&T, C) -> U + 'static,
    {
        let source = self.clone();
        let collection = Rc::new(collection);
        let result = Rc::new(result);
        Sequence::from_producer(move || FlatMap {
            upstream: Upstream::new(source.clone()),
            collection: Rc::clone(&collection),
            result: Rc::clone(&result),
            outer: None,
            inner: None,
        })
    }
}

impl Sequence<Variant> {
    /// Convert every element to `U`, failing with [`Error::InvalidCast`] on the
    /// first element that does not convert.
    pub fn cast<U>(&self) -> Sequence<U>
    where
        U: FromVariant + 'static,
    {
        let source = self.clone();
        // No known length: counting must still convert every element.
        Sequence::from_producer(move || Convert::<U> {
            upstream: Upstream::new(source.clone()),
            strict: true,
            target: PhantomData,
        })
    }

    /// Keep only the elements that convert to `U`; `Null` never does.
    pub fn of_type<U>(&self) -> Sequence<U>
    where
        U: FromVariant + 'static,
    {
        let source = self.clone();
        Sequence::from_producer(move || Convert::<U> {
            upstream: Upstream::new(source.clone()),
            strict: false,
            target: PhantomData,
        })
    }
}

struct Filter<T, F> {
    upstream: Upstream<T>,
    predicate: Rc<F>,
    index: ElementIndex,
}

impl<T, F> Producer for Filter<T, F>
where
    T: 'static,
    F: Fn(&T, usize) -> bool,
{
    type Item = T;

    fn start(&mut self) -> LazyqResult<()> {
        self.upstream.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<T>> {
        while let Some(item) = self.upstream.pull()? {
            let index = self.index.bump()?;
            if (self.predicate)(&item, index) {
                return Ok(Some(item));
            }
        }
        Ok(None)
    }

    fn dispose(&mut self) {
        self.upstream.close();
    }
}

struct Select<T, F> {
    upstream: Upstream<T>,
    selector: Rc<F>,
    index: ElementIndex,
}

impl<T, U, F> Producer for Select<T, F>
where
    T: 'static,
    F: Fn(T, usize) -> U,
{
    type Item = U;

    fn start(&mut self) -> LazyqResult<()> {
        self.upstream.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<U>> {
        match self.upstream.pull()? {
            Some(item) => {
                let index = self.index.bump()?;
                Ok(Some((self.selector)(item, index)))
            }
            None => Ok(None),
        }
    }

    fn dispose(&mut self) {
        self.upstream.close();
    }
}

struct FlatMap<T, C, F, R> {
    upstream: Upstream<T>,
    collection: Rc<F>,
    result: Rc<R>,
    outer: Option<T>,
    inner: Option<Cursor<C>>,
}

impl<T, C, U, F, R> Producer for FlatMap<T, C, F, R>
where
    T: 'static,
    C: 'static,
    F: Fn(&T) -> Sequence<C>,
    R: Fn(&T, C) -> U,
{
    type Item = U;

    fn start(&mut self) -> LazyqResult<()> {
        self.upstream.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<U>> {
        loop {
            if let Some(inner) = self.inner.as_mut() {
                if let Some(value) = inner.advance()? {
                    let outer = self.outer.as_ref().ok_or_else(|| {
                        Error::Internal("select_many inner cursor without outer element".into())
                    })?;
                    return Ok(Some((self.result)(outer, value)));
                }
                self.inner = None;
                self.outer = None;
            }

            let Some(outer) = self.upstream.pull()? else {
                return Ok(None);
            };
            self.inner = Some((self.collection)(&outer).traverse());
            self.outer = Some(outer);
        }
    }

    fn dispose(&mut self) {
        if let Some(mut inner) = self.inner.take() {
            inner.dispose();
        }
        self.outer = None;
        self.upstream.close();
    }
}

struct Convert<U> {
    upstream: Upstream<Variant>,
    strict: bool,
    target: PhantomData<U>,
}

impl<U: FromVariant> Producer for Convert<U> {
    type Item = U;

    fn start(&mut self) -> LazyqResult<()> {
        self.upstream.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<U>> {
        while let Some(value) = self.upstream.pull()? {
            if !self.strict && value.is_null() {
                continue;
            }
            match U::from_variant(value) {
                Ok(converted) => return Ok(Some(converted)),
                Err(original) if self.strict => {
                    return Err(Error::InvalidCast {
                        from: original.type_name(),
                        to: std::any::type_name::<U>(),
                    });
                }
                Err(_) => continue,
            }
        }
        Ok(None)
    }

    fn dispose(&mut self) {
        self.upstream.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn collect<T: 'static>(seq: &Sequence<T>) -> LazyqResult<Vec<T>> {
        seq.traverse().collect()
    }

    #[test]
    fn test_filter_then_select() {
        let seq = Sequence::range(-1, 5)
            .unwrap()
            .filter(|x| *x > 0)
            .select(|x| x * x);
        assert_eq!(collect(&seq).unwrap(), vec![1, 4, 9]);
    }

    #[test]
    fn test_indexed_variants() {
        let words = Sequence::from_vec(vec!["a", "b", "c", "d"]);
        let odd = words.filter_indexed(|_, i| i % 2 == 1);
        assert_eq!(collect(&odd).unwrap(), vec!["b", "d"]);

        let tagged = words.select_indexed(|w, i| format!("{i}:{w}"));
        assert_eq!(collect(&tagged).unwrap(), vec!["0:a", "1:b", "2:c", "3:d"]);
        assert_eq!(tagged.known_len(), Some(4));
    }

    #[test]
    fn test_element_index_overflows() {
        let mut index = ElementIndex(usize::MAX - 1);
        assert_eq!(index.bump().unwrap(), usize::MAX - 1);
        assert!(matches!(index.bump(), Err(Error::Overflow(_))));
    }

    #[test]
    fn test_construction_is_lazy() {
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        let seq = Sequence::from_vec(vec![1, 2, 3]).select(move |x| {
            seen.set(seen.get() + 1);
            x
        });
        let mut cursor = seq.traverse();
        assert_eq!(calls.get(), 0);
        cursor.advance().unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_select_many() {
        let seq = Sequence::from_vec(vec![1, 0, 3]).select_many(|n| {
            Sequence::repeat(*n, *n).unwrap()
        });
        assert_eq!(collect(&seq).unwrap(), vec![1, 3, 3, 3]);

        let pairs = Sequence::from_vec(vec!["x", "y"]).select_many_with(
            |_| Sequence::range(1, 2).unwrap(),
            |outer, n| format!("{outer}{n}"),
        );
        assert_eq!(collect(&pairs).unwrap(), vec!["x1", "x2", "y1", "y2"]);
    }

    #[test]
    fn test_cast_and_of_type() {
        let mixed = Sequence::from_vec(vec![
            Variant::Int(1),
            Variant::Null,
            Variant::from("two"),
            Variant::Int(3),
        ]);
        assert_eq!(collect(&mixed.of_type::<i64>()).unwrap(), vec![1, 3]);
        assert_eq!(
            collect(&mixed.of_type::<Option<i64>>()).unwrap(),
            vec![Some(1), Some(3)]
        );

        let mut cursor = mixed.cast::<i64>().traverse();
        assert_eq!(cursor.next(), Some(Ok(1)));
        assert!(matches!(
            cursor.next(),
            Some(Err(Error::InvalidCast { from: "Null", .. }))
        ));
        assert_eq!(cursor.next(), None);

        let nullable = mixed.cast::<Option<i64>>();
        assert!(matches!(
            collect(&nullable),
            Err(Error::InvalidCast { from: "Text", .. })
        ));
    }

    #[test]
    fn test_cast_has_no_known_len() {
        let mixed = Sequence::from_vec(vec![Variant::from("x"), Variant::Int(1)]);
        let ints = mixed.cast::<i64>();
        assert_eq!(ints.known_len(), None);
        assert!(matches!(
            ints.any(),
            Err(Error::InvalidCast { from: "Text", .. })
        ));
    }
}
