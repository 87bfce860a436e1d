use crate::cursor::Cursor;
use crate::sequence::Sequence;
use lazyq_result::Result as LazyqResult;

/// A not-yet-opened traversal of an upstream sequence.
///
/// Operator producers hold one of these per input. The cursor is created in
/// [`open`](Upstream::open) (from the producer's `start` hook) and released in
/// [`close`](Upstream::close) (from its `dispose` hook), so a traversal that is
/// never started never touches its inputs.
pub struct Upstream<T> {
    source: Sequence<T>,
    cursor: Option<Cursor<T>>,
}

impl<T: 'static> Upstream<T> {
    pub fn new(source: Sequence<T>) -> Self {
        Self {
            source,
            cursor: None,
        }
    }

    pub fn open(&mut self) {
        if self.cursor.is_none() {
            self.cursor = Some(self.source.traverse());
        }
    }

    /// Pull the next upstream value. Reports exhaustion when closed.
    pub fn pull(&mut self) -> LazyqResult<Option<T>> {
        match self.cursor.as_mut() {
            Some(cursor) => cursor.advance(),
            None => Ok(None),
        }
    }

    /// Open (if needed) and drain every remaining value.
    pub fn drain(&mut self) -> LazyqResult<Vec<T>> {
        self.open();
        let mut out = Vec::with_capacity(self.source.known_len().unwrap_or(0));
        while let Some(value) = self.pull()? {
            out.push(value);
        }
        self.close();
        Ok(out)
    }

    pub fn close(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            cursor.dispose();
        }
    }

    pub fn source(&self) -> &Sequence<T> {
        &self.source
    }
}
