//! Build/probe machinery shared by Join and GroupJoin.
//!
//! The inner (build) side is hashed into a [`Lookup`] with null keys skipped.
//! The build is deferred until the outer (probe) side has produced its first
//! element, so an empty outer sequence never evaluates the inner sequence or
//! its key selector.

use crate::JoinType;
use lazyq_lookup::{Lookup, LookupBuilder, LookupOptions};
use lazyq_result::Result as LazyqResult;
use lazyq_seq::{Producer, Upstream};
use lazyq_types::EqualityComparer;
use std::rc::Rc;

/// The build side of one join traversal.
pub(crate) struct BuildSide<I, K, FI, C> {
    pub(crate) inner: Upstream<I>,
    pub(crate) inner_key: Rc<FI>,
    pub(crate) comparer: C,
    pub(crate) join_type: JoinType,
    pub(crate) lookup: Option<Lookup<K, I, C>>,
}

impl<I, K, FI, C> BuildSide<I, K, FI, C>
where
    I: 'static,
    FI: Fn(&I) -> K,
    C: EqualityComparer<K> + Clone,
{
    /// Matches for `key`, building the lookup on first use.
    pub(crate) fn probe(&mut self, key: &K) -> LazyqResult<Option<Rc<[I]>>> {
        if self.lookup.is_none() {
            self.lookup = Some(self.build()?);
        }
        Ok(self
            .lookup
            .as_ref()
            .and_then(|lookup| lookup.grouping(key))
            .map(|group| group.shared_elements()))
    }

    fn build(&mut self) -> LazyqResult<Lookup<K, I, C>> {
        let options = match self.inner.source().known_len() {
            Some(len) => LookupOptions::for_join().with_capacity(len),
            None => LookupOptions::for_join(),
        };
        let mut builder = LookupBuilder::new(self.comparer.clone(), options);
        self.inner.open();
        while let Some(item) = self.inner.pull()? {
            builder.push((self.inner_key)(&item), item);
        }
        self.inner.close();
        let lookup = builder.finish();
        tracing::debug!(
            join_type = %self.join_type,
            keys = lookup.len(),
            "join build side hashed"
        );
        Ok(lookup)
    }

    pub(crate) fn dispose(&mut self) {
        self.inner.close();
        self.lookup = None;
    }
}

/// Flattened (outer, inner) pairs in outer order, then inner-group order.
pub(crate) struct InnerJoin<O, I, K, FO, FI, R, C> {
    pub(crate) outer: Upstream<O>,
    pub(crate) outer_key: Rc<FO>,
    pub(crate) build: BuildSide<I, K, FI, C>,
    pub(crate) result: Rc<R>,
    /// Current outer element, its matches, and the next match to emit.
    pub(crate) pending: Option<(O, Rc<[I]>, usize)>,
}

impl<O, I, K, FO, FI, R, C, U> Producer for InnerJoin<O, I, K, FO, FI, R, C>
where
    O: 'static,
    I: 'static,
    FO: Fn(&O) -> K,
    FI: Fn(&I) -> K,
    R: Fn(&O, &I) -> U,
    C: EqualityComparer<K> + Clone,
{
    type Item = U;

    fn start(&mut self) -> LazyqResult<()> {
        self.outer.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<U>> {
        loop {
            if let Some((outer, matches, pos)) = self.pending.as_mut() {
                if let Some(inner) = matches.get(*pos) {
                    *pos += 1;
                    return Ok(Some((self.result)(outer, inner)));
                }
                self.pending = None;
            }

            let Some(outer) = self.outer.pull()? else {
                return Ok(None);
            };
            let key = (self.outer_key)(&outer);
            if let Some(matches) = self.build.probe(&key)? {
                self.pending = Some((outer, matches, 0));
            }
        }
    }

    fn dispose(&mut self) {
        self.outer.close();
        self.build.dispose();
        self.pending = None;
    }
}

/// One result per outer element, with its whole (possibly empty) group.
pub(crate) struct GroupJoin<O, I, K, FO, FI, R, C> {
    pub(crate) outer: Upstream<O>,
    pub(crate) outer_key: Rc<FO>,
    pub(crate) build: BuildSide<I, K, FI, C>,
    pub(crate) result: Rc<R>,
}

impl<O, I, K, FO, FI, R, C, U> Producer for GroupJoin<O, I, K, FO, FI, R, C>
where
    O: 'static,
    I: 'static,
    FO: Fn(&O) -> K,
    FI: Fn(&I) -> K,
    R: Fn(&O, &[I]) -> U,
    C: EqualityComparer<K> + Clone,
{
    type Item = U;

    fn start(&mut self) -> LazyqResult<()> {
        self.outer.open();
        Ok(())
    }

    fn produce(&mut self) -> LazyqResult<Option<U>> {
        let Some(outer) = self.outer.pull()? else {
            return Ok(None);
        };
        let key = (self.outer_key)(&outer);
        let matches = self.build.probe(&key)?;
        let group: &[I] = matches.as_deref().unwrap_or(&[]);
        Ok(Some((self.result)(&outer, group)))
    }

    fn dispose(&mut self) {
        self.outer.close();
        self.build.dispose();
    }
}
